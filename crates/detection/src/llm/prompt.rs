//! Deterministic prompt assembly.
//!
//! Pure string building over the record and its indicator bundle, so the
//! whole contract is unit-testable without any network. For a fixed input
//! the output is byte-identical across calls; the only JSON embedded in the
//! prompt comes from structs with fixed field order and pre-sorted lists.

use crate::core::{AppRecord, DetectionConfig};
use crate::indicators::IndicatorBundle;

/// System and user halves of one model invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const SYSTEM_PROMPT: &str = "\
You are a marketplace trust and safety analyst. You review mobile app \
listings for fraud indicators and harmful behavior.

Consider these common fraud patterns:
- Misleading descriptions versus the declared category
- Excessive permissions relative to stated purpose
- Developers with no contact details, website, or privacy policy
- Financial apps promising unrealistic returns or guarantees
- Review sections that look manufactured (duplicated texts, skewed ratings)
- Sensitive permissions requested without clear justification

Respond with a JSON object ONLY, in this exact format:
{\"type\": \"fraud\" | \"genuine\" | \"suspected\", \"reason\": \"<concise explanation in less than 300 characters>\"}

Worked examples:

Listing: a flashlight app, 2 permissions (camera for the flash LED, \
vibrate), complete developer profile, 4.4 average rating over varied \
review texts.
Answer: {\"type\": \"genuine\", \"reason\": \"Permissions match the stated purpose, developer profile is complete and reviews look organic.\"}

Listing: a wallpaper app requesting SMS and contact permissions, developer \
has no website or privacy policy, reviews are mixed.
Answer: {\"type\": \"suspected\", \"reason\": \"SMS and contacts access is unjustified for wallpapers and the developer profile is incomplete; needs manual review.\"}

Listing: a Finance app promising guaranteed 1000% returns, anonymous \
developer, all reviews are identical five-star texts except one reporting \
lost money.
Answer: {\"type\": \"fraud\", \"reason\": \"Unrealistic guaranteed returns, anonymous developer and manufactured reviews alongside a credible loss report.\"}

Your analysis should be thorough, but the output must match the exact \
format specified.";

/// Builds the instruction payload for one app. Restates the factual
/// metadata, then enumerates every computed indicator with its value.
pub fn build_prompt(
    app: &AppRecord,
    indicators: &IndicatorBundle,
    config: &DetectionConfig,
) -> Prompt {
    let description = truncate_chars(&app.description, config.thresholds.description_prompt_chars);

    // Struct serialization keeps a fixed key order, so these blocks are
    // stable inputs to the determinism contract.
    let developer_json = serde_json::to_string_pretty(&app.developer)
        .unwrap_or_else(|_| "{}".to_string());
    let indicators_json =
        serde_json::to_string_pretty(indicators).unwrap_or_else(|_| "{}".to_string());

    let mut permissions: Vec<&str> = app.permissions.iter().map(String::as_str).collect();
    permissions.sort_unstable();
    permissions.dedup();

    let user = format!(
        "Analyze this app listing for potential fraud indicators or harmful behavior.\n\
         \n\
         App Title: {title}\n\
         App Category: {category}\n\
         Price: {price}\n\
         Content Rating: {content_rating}\n\
         \n\
         Description:\n\
         {description}\n\
         \n\
         Developer Info:\n\
         {developer}\n\
         \n\
         Permissions:\n\
         {permissions}\n\
         \n\
         Computed suspicion indicators:\n\
         {indicators}\n\
         \n\
         Based on this information:\n\
         1. Evaluate the consistency between app description and category\n\
         2. Assess if the requested permissions match the stated functionality\n\
         3. Check developer credibility indicators\n\
         4. Identify patterns matching known financial scams or malware\n\
         5. Analyze review patterns for authenticity",
        title = app.title,
        category = app.category,
        price = app.price,
        content_rating = app.content_rating,
        description = description,
        developer = developer_json,
        permissions = serde_json::to_string_pretty(&permissions).unwrap_or_else(|_| "[]".to_string()),
        indicators = indicators_json,
    );

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeveloperProfile, Review};

    fn sample_app() -> AppRecord {
        AppRecord {
            app_id: "com.test.app".to_string(),
            title: "Test Finance App".to_string(),
            description: "This is a test finance app that helps you manage your money."
                .to_string(),
            category: "Finance".to_string(),
            content_rating: "Rated for 3+".to_string(),
            price: 0.0,
            developer: DeveloperProfile {
                privacy_policy: "https://testapp.com/privacy".to_string(),
                ..Default::default()
            },
            permissions: vec![
                "android.permission.READ_SMS".to_string(),
                "android.permission.INTERNET".to_string(),
            ],
            reviews: vec![Review {
                user_name: "a".to_string(),
                score: 5,
                text: "Great".to_string(),
            }],
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let config = DetectionConfig::default();
        let app = sample_app();
        let indicators = IndicatorBundle::extract(&app, &config);

        let first = build_prompt(&app, &indicators, &config);
        let second = build_prompt(&app, &indicators, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_restates_metadata_and_indicators() {
        let config = DetectionConfig::default();
        let app = sample_app();
        let indicators = IndicatorBundle::extract(&app, &config);
        let prompt = build_prompt(&app, &indicators, &config);

        assert!(prompt.user.contains("Test Finance App"));
        assert!(prompt.user.contains("Finance"));
        assert!(prompt.user.contains("android.permission.READ_SMS"));
        assert!(prompt.user.contains("dangerous_ratio"));
        assert!(prompt.user.contains("incomplete_profile"));
        assert!(prompt.system.contains("JSON object ONLY"));
    }

    #[test]
    fn test_prompt_contains_few_shot_examples() {
        let config = DetectionConfig::default();
        let app = sample_app();
        let indicators = IndicatorBundle::extract(&app, &config);
        let prompt = build_prompt(&app, &indicators, &config);

        for verdict in ["\"genuine\"", "\"suspected\"", "\"fraud\""] {
            assert!(
                prompt.system.contains(verdict),
                "missing worked example for {verdict}"
            );
        }
    }

    #[test]
    fn test_long_description_is_truncated() {
        let config = DetectionConfig::default();
        let mut app = sample_app();
        app.description = "x".repeat(5000);
        let indicators = IndicatorBundle::extract(&app, &config);
        let prompt = build_prompt(&app, &indicators, &config);

        assert!(!prompt.user.contains(&"x".repeat(1001)));
        assert!(prompt.user.contains(&"x".repeat(1000)));
    }
}
