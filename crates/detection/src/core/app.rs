//! Raw marketplace listing data as delivered by the external data source.
//!
//! Records are trusted input: every optional field may arrive empty and the
//! engine degrades to neutral defaults rather than rejecting the record.

use serde::{Deserialize, Serialize};

/// Contact and policy details published by an app developer. Any field may
/// be an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeveloperProfile {
    pub id: String,
    pub email: String,
    pub website: String,
    #[serde(rename = "privacyPolicy")]
    pub privacy_policy: String,
}

/// A single user review. Scores range 1-5 on the marketplace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub score: u8,
    pub text: String,
}

/// One app listing, immutable for the duration of an analysis pass.
///
/// Field names follow the marketplace JSON (`appId`, `contentRating`, ...).
/// Permissions may contain repeats; de-duplication happens during indicator
/// extraction, not at load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppRecord {
    #[serde(rename = "appId")]
    pub app_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "contentRating")]
    pub content_rating: String,
    pub price: f64,
    pub developer: DeveloperProfile,
    pub permissions: Vec<String>,
    pub reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_marketplace_field_names() {
        let json = r#"{
            "appId": "com.example.wallet",
            "title": "Example Wallet",
            "description": "Track your spending.",
            "category": "Finance",
            "contentRating": "Everyone",
            "price": 0,
            "developer": {
                "id": "dev-1",
                "email": "support@example.com",
                "privacyPolicy": "https://example.com/privacy"
            },
            "permissions": ["android.permission.INTERNET"],
            "reviews": [{"userName": "a", "score": 5, "text": "Great"}]
        }"#;

        let record: AppRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.app_id, "com.example.wallet");
        assert_eq!(record.content_rating, "Everyone");
        assert_eq!(record.developer.privacy_policy, "https://example.com/privacy");
        assert!(record.developer.website.is_empty());
        assert_eq!(record.reviews[0].score, 5);
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: AppRecord = serde_json::from_str(r#"{"appId": "com.bare.app"}"#).unwrap();
        assert_eq!(record.app_id, "com.bare.app");
        assert!(record.permissions.is_empty());
        assert!(record.reviews.is_empty());
        assert_eq!(record.price, 0.0);
    }
}
