//! Zodiac signs and calendar-range resolution.
//!
//! Sign assignment is a fixed month/day lookup (tropical calendar ranges), not an
//! ephemeris computation. The twelve inclusive ranges partition the year; Capricorn
//! wraps the year boundary (Dec 22 - Jan 19).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Zodiac signs in declaration order (Aries=0 .. Pisces=11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// All signs in resolution order.
    pub const ALL: [ZodiacSign; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    /// English display name.
    pub fn english(&self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Hindi (rashi) display name.
    pub fn hindi(&self) -> &'static str {
        match self {
            Self::Aries => "मेष",
            Self::Taurus => "वृषभ",
            Self::Gemini => "मिथुन",
            Self::Cancer => "कर्क",
            Self::Leo => "सिंह",
            Self::Virgo => "कन्या",
            Self::Libra => "तुला",
            Self::Scorpio => "वृश्चिक",
            Self::Sagittarius => "धनु",
            Self::Capricorn => "मकर",
            Self::Aquarius => "कुम्भ",
            Self::Pisces => "मीन",
        }
    }

    /// Inclusive (month, day) start of the sign's range.
    pub fn start(&self) -> (u32, u32) {
        match self {
            Self::Aries => (3, 21),
            Self::Taurus => (4, 20),
            Self::Gemini => (5, 21),
            Self::Cancer => (6, 21),
            Self::Leo => (7, 23),
            Self::Virgo => (8, 23),
            Self::Libra => (9, 23),
            Self::Scorpio => (10, 23),
            Self::Sagittarius => (11, 22),
            Self::Capricorn => (12, 22),
            Self::Aquarius => (1, 20),
            Self::Pisces => (2, 19),
        }
    }

    /// Inclusive (month, day) end of the sign's range.
    pub fn end(&self) -> (u32, u32) {
        match self {
            Self::Aries => (4, 19),
            Self::Taurus => (5, 20),
            Self::Gemini => (6, 20),
            Self::Cancer => (7, 22),
            Self::Leo => (8, 22),
            Self::Virgo => (9, 22),
            Self::Libra => (10, 22),
            Self::Scorpio => (11, 21),
            Self::Sagittarius => (12, 21),
            Self::Capricorn => (1, 19),
            Self::Aquarius => (2, 18),
            Self::Pisces => (3, 20),
        }
    }

    /// Case-insensitive lookup by English name ("leo", " Scorpio ").
    pub fn from_name(name: &str) -> Option<Self> {
        let n = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.english().eq_ignore_ascii_case(n))
    }

    /// Range label for display, e.g. "12/22 - 1/19".
    pub fn date_range_label(&self) -> String {
        let (sm, sd) = self.start();
        let (em, ed) = self.end();
        format!("{}/{} - {}/{}", sm, sd, em, ed)
    }

    /// True if (month, day) falls within this sign's inclusive range.
    ///
    /// Every range in the table spans exactly two months: either adjacent months in the
    /// same year or, for Capricorn, December into January. Both cases reduce to
    /// "start month from start day, or end month up to end day".
    fn contains(&self, month: u32, day: u32) -> bool {
        let (start_month, start_day) = self.start();
        let (end_month, end_day) = self.end();
        if start_month == end_month {
            month == start_month && (start_day..=end_day).contains(&day)
        } else {
            (month == start_month && day >= start_day) || (month == end_month && day <= end_day)
        }
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english())
    }
}

/// Returns the first sign (in [`ZodiacSign::ALL`] order) whose range contains the date.
pub fn try_resolve(date: NaiveDate) -> Option<ZodiacSign> {
    let (month, day) = (date.month(), date.day());
    ZodiacSign::ALL.iter().copied().find(|s| s.contains(month, day))
}

/// Maps a birth date to its zodiac sign.
///
/// Falls back to Capricorn when no range matches. That can only happen if the range
/// table above has a gap, so the fallback is logged at error level.
pub fn resolve(date: NaiveDate) -> ZodiacSign {
    match try_resolve(date) {
        Some(sign) => sign,
        None => {
            tracing::error!(
                target: "astro::zodiac",
                date = %date,
                "no zodiac range matched; falling back to Capricorn (range table gap)"
            );
            ZodiacSign::Capricorn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn every_day_of_leap_year_resolves_to_exactly_one_sign() {
        let mut date = d(1, 1);
        while date.year() == 2024 {
            let matches = ZodiacSign::ALL
                .iter()
                .filter(|s| s.contains(date.month(), date.day()))
                .count();
            assert_eq!(matches, 1, "date {} matched {} signs", date, matches);
            assert!(try_resolve(date).is_some());
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn year_wrap_boundaries() {
        assert_eq!(resolve(d(12, 21)), ZodiacSign::Sagittarius);
        assert_eq!(resolve(d(12, 22)), ZodiacSign::Capricorn);
        assert_eq!(resolve(d(12, 31)), ZodiacSign::Capricorn);
        assert_eq!(resolve(d(1, 1)), ZodiacSign::Capricorn);
        assert_eq!(resolve(d(1, 19)), ZodiacSign::Capricorn);
        assert_eq!(resolve(d(1, 20)), ZodiacSign::Aquarius);
    }

    #[test]
    fn interior_boundaries() {
        assert_eq!(resolve(d(3, 20)), ZodiacSign::Pisces);
        assert_eq!(resolve(d(3, 21)), ZodiacSign::Aries);
        assert_eq!(resolve(d(2, 29)), ZodiacSign::Pisces);
        assert_eq!(resolve(d(8, 20)), ZodiacSign::Leo);
        assert_eq!(resolve(d(8, 23)), ZodiacSign::Virgo);
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(ZodiacSign::from_name("leo"), Some(ZodiacSign::Leo));
        assert_eq!(ZodiacSign::from_name(" SCORPIO "), Some(ZodiacSign::Scorpio));
        assert_eq!(ZodiacSign::from_name("ophiuchus"), None);
    }

    #[test]
    fn range_label() {
        assert_eq!(ZodiacSign::Capricorn.date_range_label(), "12/22 - 1/19");
        assert_eq!(ZodiacSign::Aries.date_range_label(), "3/21 - 4/19");
    }
}
