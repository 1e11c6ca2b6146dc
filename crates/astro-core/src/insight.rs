//! Deterministic insight composition from the trait catalog.
//!
//! The seed is `md5(name)` truncated to its first 32 bits (the first 8 hex digits of the
//! digest) plus `hour + minute` of the birth time. Draws come from ChaCha8 seeded with that
//! value, so the same inputs give the same sentence on every run and every machine.

use crate::catalog::traits_for;
use crate::shared::{BirthDetails, Language};
use crate::zodiac::ZodiacSign;
use chrono::Timelike;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TEMPLATES: [&str; 5] = [
    "Your {trait} nature will guide you through today's challenges. Focus on {strength} and be mindful of {challenge}.",
    "Today's energy resonates with your {trait} spirit. Channel your {strength} while staying aware of potential {challenge}.",
    "As a {trait} soul, you'll find opportunities to showcase your {strength}. Watch out for tendencies toward {challenge}.",
    "The stars align with your {trait} essence today. Embrace your natural {strength} but guard against {challenge}.",
    "Your inherent {trait} qualities will shine bright. Let your {strength} lead the way while managing any {challenge}.",
];

const HINDI_TEMPLATES: [&str; 3] = [
    "आज आपका {sign} राशि का प्रभाव सकारात्मक होगा। नए अवसरों का लाभ उठाएं।",
    "{sign} राशि वालों के लिए आज का दिन शुभ है। अपनी प्राकृतिक क्षमताओं का उपयोग करें।",
    "आपके {sign} राशि के गुण आज चमकेंगे। धैर्य और समझदारी से काम लें।",
];

/// Seed for the trait draw: 32-bit md5 prefix of the name plus `hour + minute`.
///
/// The time factor is deliberately not normalized to minutes since midnight.
pub fn seed_for(details: &BirthDetails) -> u64 {
    let digest = md5::compute(details.name.as_bytes());
    let prefix = u32::from_be_bytes([digest.0[0], digest.0[1], digest.0[2], digest.0[3]]);
    let time_factor = details.birth_time.hour() + details.birth_time.minute();
    u64::from(prefix) + u64::from(time_factor)
}

/// Suffix keyed by birth hour: 5-11 morning, 12-17 afternoon, 18-22 evening, else night.
pub fn time_of_day_suffix(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Morning energy favors new beginnings.",
        12..=17 => "Afternoon brings clarity to decisions.",
        18..=22 => "Evening encourages reflection and planning.",
        _ => "Night time enhances intuition and dreams.",
    }
}

/// Composes the daily insight sentence.
///
/// For [`Language::Hindi`] the English sentence is discarded and one of three fixed Hindi
/// sentences naming the sign is returned instead. The Hindi pick continues the same seeded
/// stream, so it is deterministic too.
pub fn compose(details: &BirthDetails, sign: ZodiacSign, language: Language) -> String {
    let set = traits_for(sign);
    let mut rng = ChaCha8Rng::seed_from_u64(seed_for(details));

    // Catalog lists are non-empty; the fallbacks are never taken.
    let trait_ = set.traits.choose(&mut rng).copied().unwrap_or_default();
    let strength = set.strengths.choose(&mut rng).copied().unwrap_or_default();
    let challenge = set.challenges.choose(&mut rng).copied().unwrap_or_default();
    let template = TEMPLATES.choose(&mut rng).copied().unwrap_or(TEMPLATES[0]);

    let mut insight = template
        .replace("{trait}", trait_)
        .replace("{strength}", strength)
        .replace("{challenge}", challenge);
    insight.push(' ');
    insight.push_str(time_of_day_suffix(details.birth_time.hour()));

    match language {
        Language::English => insight,
        Language::Hindi => {
            let template = HINDI_TEMPLATES
                .choose(&mut rng)
                .copied()
                .unwrap_or(HINDI_TEMPLATES[0]);
            template.replace("{sign}", sign.hindi())
        }
    }
}
