//! Inbound request contract: raw string fields as received from a front end.

use crate::error::InputError;
use crate::shared::{BirthDetails, Language};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// `{ name, birth_date: "YYYY-MM-DD", birth_time: "HH:MM", birth_place, language: "en"|"hi" }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, InputError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InputError::MissingField(field))
}

impl InsightRequest {
    /// Validates and parses the request. Every field, including `language`, is required.
    pub fn into_parts(self) -> Result<(BirthDetails, Language), InputError> {
        let name = required(&self.name, "name")?;
        let birth_date = required(&self.birth_date, "birth_date")?;
        let birth_time = required(&self.birth_time, "birth_time")?;
        let birth_place = required(&self.birth_place, "birth_place")?;
        let language = required(&self.language, "language")?;

        let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
            .map_err(|e| InputError::InvalidFormat(format!("birth_date '{}': {}", birth_date, e)))?;
        let birth_time = NaiveTime::parse_from_str(birth_time, "%H:%M")
            .map_err(|e| InputError::InvalidFormat(format!("birth_time '{}': {}", birth_time, e)))?;
        let language = Language::from_code(language)
            .ok_or_else(|| InputError::UnsupportedLanguage(language.to_string()))?;

        let details = BirthDetails {
            name: name.to_string(),
            birth_date,
            birth_time,
            birth_place: birth_place.to_string(),
        };
        Ok((details, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> InsightRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Ritika",
            "birth_date": "1995-08-20",
            "birth_time": "14:30",
            "birth_place": "Jaipur, India",
            "language": "en"
        }))
        .unwrap()
    }

    #[test]
    fn parses_valid_request() {
        let (details, lang) = full().into_parts().unwrap();
        assert_eq!(details.name, "Ritika");
        assert_eq!(details.birth_date, NaiveDate::from_ymd_opt(1995, 8, 20).unwrap());
        assert_eq!(details.birth_time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn missing_or_blank_fields_are_reported_in_order() {
        let mut req = full();
        req.birth_place = Some("  ".to_string());
        assert_eq!(
            req.into_parts().unwrap_err(),
            InputError::MissingField("birth_place")
        );
        let mut req = full();
        req.language = None;
        assert_eq!(
            req.into_parts().unwrap_err().to_string(),
            "Missing required field: language"
        );
    }

    #[test]
    fn bad_formats() {
        let mut req = full();
        req.birth_date = Some("20-08-1995".to_string());
        assert!(matches!(req.into_parts(), Err(InputError::InvalidFormat(_))));
        let mut req = full();
        req.birth_time = Some("25:00".to_string());
        assert!(matches!(req.into_parts(), Err(InputError::InvalidFormat(_))));
        let mut req = full();
        req.language = Some("fr".to_string());
        assert_eq!(
            req.into_parts().unwrap_err(),
            InputError::UnsupportedLanguage("fr".to_string())
        );
    }
}
