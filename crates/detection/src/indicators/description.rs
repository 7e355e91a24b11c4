use crate::core::{AppRecord, DetectionConfig};
use serde::Serialize;

/// Marketing language promising returns no legitimate product can offer.
const UNREALISTIC_CLAIM_KEYWORDS: &[&str] = &[
    "1000%",
    "guaranteed",
    "no risk",
    "risk free",
    "passive income",
    "double your money",
    "get rich",
];

/// Vocabulary that does not belong in a Finance or Tools listing and
/// suggests the description was written for a different product than the
/// declared category.
const SPECULATION_VOCAB: &[&str] = &[
    "casino",
    "jackpot",
    "slots",
    "betting",
    "lottery",
    "pump signal",
    "moonshot",
    "meme coin",
    "trading signals",
];

const MISMATCH_CATEGORIES: &[&str] = &["finance", "tools"];

/// Description red flags for one app.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptionIndicators {
    /// Uppercase share of alphabetic characters; 0 for empty descriptions.
    pub uppercase_ratio: f64,
    pub excessive_uppercase: bool,
    pub exclamations_per_100_chars: f64,
    pub excessive_exclamations: bool,
    pub unrealistic_claims: Vec<String>,
    pub category_mismatch: bool,
}

pub fn analyze(app: &AppRecord, config: &DetectionConfig) -> DescriptionIndicators {
    let description = &app.description;
    let lowered = description.to_lowercase();

    let alphabetic = description.chars().filter(|c| c.is_alphabetic()).count();
    let uppercase = description.chars().filter(|c| c.is_uppercase()).count();
    let uppercase_ratio = if alphabetic > 0 {
        uppercase as f64 / alphabetic as f64
    } else {
        0.0
    };

    let total_chars = description.chars().count();
    let exclamations = description.chars().filter(|c| *c == '!').count();
    let exclamations_per_100_chars = if total_chars > 0 {
        exclamations as f64 * 100.0 / total_chars as f64
    } else {
        0.0
    };

    let unrealistic_claims: Vec<String> = UNREALISTIC_CLAIM_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .map(|k| k.to_string())
        .collect();

    let category = app.category.to_lowercase();
    let category_mismatch = MISMATCH_CATEGORIES.contains(&category.as_str())
        && SPECULATION_VOCAB.iter().any(|k| lowered.contains(k));

    DescriptionIndicators {
        uppercase_ratio,
        excessive_uppercase: uppercase_ratio > config.thresholds.uppercase_ratio_flag,
        exclamations_per_100_chars,
        excessive_exclamations: exclamations_per_100_chars
            > config.thresholds.exclamations_per_100_flag,
        unrealistic_claims,
        category_mismatch,
    }
}
