//! Static trait catalog: per-sign traits, strengths and challenges.

use crate::zodiac::ZodiacSign;
use serde::Serialize;

/// Descriptive phrases for one sign. All three lists are non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitSet {
    pub traits: &'static [&'static str],
    pub strengths: &'static [&'static str],
    pub challenges: &'static [&'static str],
}

const ARIES: TraitSet = TraitSet {
    traits: &["bold", "energetic", "pioneering", "impulsive"],
    strengths: &["leadership", "courage", "enthusiasm"],
    challenges: &["impatience", "aggression"],
};

const TAURUS: TraitSet = TraitSet {
    traits: &["practical", "reliable", "patient", "stubborn"],
    strengths: &["stability", "determination", "loyalty"],
    challenges: &["inflexibility", "materialism"],
};

const GEMINI: TraitSet = TraitSet {
    traits: &["adaptable", "curious", "communicative", "restless"],
    strengths: &["versatility", "intelligence", "wit"],
    challenges: &["inconsistency", "superficiality"],
};

const CANCER: TraitSet = TraitSet {
    traits: &["nurturing", "emotional", "intuitive", "protective"],
    strengths: &["empathy", "imagination", "loyalty"],
    challenges: &["moodiness", "oversensitivity"],
};

const LEO: TraitSet = TraitSet {
    traits: &["confident", "generous", "dramatic", "proud"],
    strengths: &["leadership", "creativity", "warmth"],
    challenges: &["arrogance", "attention-seeking"],
};

const VIRGO: TraitSet = TraitSet {
    traits: &["analytical", "practical", "perfectionist", "helpful"],
    strengths: &["attention to detail", "reliability", "service"],
    challenges: &["overcritical", "worry"],
};

const LIBRA: TraitSet = TraitSet {
    traits: &["diplomatic", "harmonious", "social", "indecisive"],
    strengths: &["balance", "fairness", "charm"],
    challenges: &["indecision", "people-pleasing"],
};

const SCORPIO: TraitSet = TraitSet {
    traits: &["intense", "mysterious", "passionate", "determined"],
    strengths: &["depth", "transformation", "intuition"],
    challenges: &["jealousy", "secretiveness"],
};

const SAGITTARIUS: TraitSet = TraitSet {
    traits: &["adventurous", "philosophical", "optimistic", "blunt"],
    strengths: &["freedom", "wisdom", "honesty"],
    challenges: &["restlessness", "tactlessness"],
};

const CAPRICORN: TraitSet = TraitSet {
    traits: &["ambitious", "disciplined", "practical", "reserved"],
    strengths: &["responsibility", "perseverance", "wisdom"],
    challenges: &["pessimism", "rigidity"],
};

const AQUARIUS: TraitSet = TraitSet {
    traits: &["innovative", "independent", "humanitarian", "detached"],
    strengths: &["originality", "idealism", "friendship"],
    challenges: &["aloofness", "unpredictability"],
};

const PISCES: TraitSet = TraitSet {
    traits: &["compassionate", "artistic", "intuitive", "escapist"],
    strengths: &["empathy", "creativity", "spirituality"],
    challenges: &["oversensitivity", "confusion"],
};

/// Trait lookup. Exhaustive over [`ZodiacSign`], so it cannot miss a sign.
pub fn traits_for(sign: ZodiacSign) -> &'static TraitSet {
    match sign {
        ZodiacSign::Aries => &ARIES,
        ZodiacSign::Taurus => &TAURUS,
        ZodiacSign::Gemini => &GEMINI,
        ZodiacSign::Cancer => &CANCER,
        ZodiacSign::Leo => &LEO,
        ZodiacSign::Virgo => &VIRGO,
        ZodiacSign::Libra => &LIBRA,
        ZodiacSign::Scorpio => &SCORPIO,
        ZodiacSign::Sagittarius => &SAGITTARIUS,
        ZodiacSign::Capricorn => &CAPRICORN,
        ZodiacSign::Aquarius => &AQUARIUS,
        ZodiacSign::Pisces => &PISCES,
    }
}

/// Public sign profile (display names, range label, trait lists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInfo {
    pub sign: &'static str,
    pub hindi_name: &'static str,
    pub date_range: String,
    pub traits: Vec<&'static str>,
    pub strengths: Vec<&'static str>,
    pub challenges: Vec<&'static str>,
}

impl SignInfo {
    pub fn for_sign(sign: ZodiacSign) -> Self {
        let set = traits_for(sign);
        Self {
            sign: sign.english(),
            hindi_name: sign.hindi(),
            date_range: sign.date_range_label(),
            traits: set.traits.to_vec(),
            strengths: set.strengths.to_vec(),
            challenges: set.challenges.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sign_has_non_empty_lists() {
        for sign in ZodiacSign::ALL {
            let set = traits_for(sign);
            assert!(!set.traits.is_empty(), "{} traits empty", sign);
            assert!(!set.strengths.is_empty(), "{} strengths empty", sign);
            assert!(!set.challenges.is_empty(), "{} challenges empty", sign);
        }
    }

    #[test]
    fn sign_info_for_virgo() {
        let info = SignInfo::for_sign(ZodiacSign::Virgo);
        assert_eq!(info.sign, "Virgo");
        assert_eq!(info.hindi_name, "कन्या");
        assert_eq!(info.date_range, "8/23 - 9/22");
        assert!(info.strengths.contains(&"attention to detail"));
    }
}
