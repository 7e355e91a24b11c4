use serde::{Deserialize, Serialize};
use std::fmt;

/// Final label assigned to one app listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Genuine,
    Suspected,
    Fraud,
}

impl Verdict {
    /// Case-insensitive parse of a model-produced label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "genuine" => Some(Self::Genuine),
            "suspected" => Some(Self::Suspected),
            "fraud" => Some(Self::Fraud),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Genuine => "genuine",
            Self::Suspected => "suspected",
            Self::Fraud => "fraud",
        }
    }

    /// Binary label used by the metrics engine: anything flagged for review
    /// (suspected or fraud) counts as a positive prediction.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Self::Genuine)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// The per-app analysis result persisted to the output file.
///
/// Serializes to exactly the keys `app_id`, `app_title`, `type`, `reason`.
/// `app_id` and `app_title` always come from the input record, never from
/// model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub app_id: String,
    pub app_title: String,
    #[serde(rename = "type")]
    pub verdict: Verdict,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_label_round_trip() {
        assert_eq!(Verdict::from_label("fraud"), Some(Verdict::Fraud));
        assert_eq!(Verdict::from_label("FRAUD"), Some(Verdict::Fraud));
        assert_eq!(Verdict::from_label(" Genuine "), Some(Verdict::Genuine));
        assert_eq!(Verdict::from_label("maybe_fraud"), None);
        assert_eq!(Verdict::Suspected.as_label(), "suspected");
    }

    #[test]
    fn test_flagged_mapping() {
        assert!(Verdict::Fraud.is_flagged());
        assert!(Verdict::Suspected.is_flagged());
        assert!(!Verdict::Genuine.is_flagged());
    }

    #[test]
    fn test_classification_serializes_to_output_contract() {
        let result = Classification {
            app_id: "com.example.app".to_string(),
            app_title: "Example".to_string(),
            verdict: Verdict::Fraud,
            reason: "Unrealistic return claims".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"app_id":"com.example.app","app_title":"Example","type":"fraud","reason":"Unrealistic return claims"}"#
        );
    }
}
