use crate::core::{DetectionConfig, DeveloperProfile};
use serde::Serialize;

/// Developer-profile completeness signals.
///
/// A bare developer id alone is not treated as fraud by itself, but a
/// profile missing both contact routes and a privacy policy is flagged.
#[derive(Debug, Clone, Serialize)]
pub struct DeveloperIndicators {
    /// 0-4: one point each for non-empty id, email, website, privacy policy.
    pub completeness_score: u8,
    pub incomplete_profile: bool,
    pub missing_email: bool,
    pub missing_website: bool,
    pub missing_privacy_policy: bool,
}

pub fn analyze(developer: &DeveloperProfile, config: &DetectionConfig) -> DeveloperIndicators {
    let present = [
        &developer.id,
        &developer.email,
        &developer.website,
        &developer.privacy_policy,
    ];
    let completeness_score = present.iter().filter(|f| !f.trim().is_empty()).count() as u8;

    DeveloperIndicators {
        completeness_score,
        incomplete_profile: completeness_score < config.thresholds.developer_completeness_min,
        missing_email: developer.email.trim().is_empty(),
        missing_website: developer.website.trim().is_empty(),
        missing_privacy_policy: developer.privacy_policy.trim().is_empty(),
    }
}
