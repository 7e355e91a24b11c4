use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Android permissions treated as dangerous by default. Taken from the
/// marketplace's dangerous-permission groups: messaging, contacts, location,
/// recording hardware, storage, telephony and account access.
pub const DEFAULT_DANGEROUS_PERMISSIONS: &[&str] = &[
    "android.permission.READ_CONTACTS",
    "android.permission.ACCESS_FINE_LOCATION",
    "android.permission.ACCESS_COARSE_LOCATION",
    "android.permission.RECORD_AUDIO",
    "android.permission.CAMERA",
    "android.permission.READ_SMS",
    "android.permission.SEND_SMS",
    "android.permission.RECEIVE_SMS",
    "android.permission.CALL_PHONE",
    "android.permission.READ_CALL_LOG",
    "android.permission.READ_EXTERNAL_STORAGE",
    "android.permission.WRITE_EXTERNAL_STORAGE",
    "android.permission.GET_ACCOUNTS",
    "android.permission.READ_PHONE_STATE",
];

/// Engine configuration, passed explicitly into the orchestrator so that
/// multiple configurations can coexist in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Deterministic prefix cap on how many records a batch processes.
    #[serde(default = "default_max_apps")]
    pub max_apps: usize,

    #[serde(default = "default_dangerous_permissions")]
    pub dangerous_permissions: Vec<String>,

    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Tunable heuristic cutoffs. The exact values are inferred defaults, not
/// pinned-down constants, so they live in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Developer profiles scoring below this (out of 4) are flagged.
    #[serde(default = "default_developer_completeness_min")]
    pub developer_completeness_min: u8,

    /// Share of max-score reviews at which a rating distribution is skewed.
    #[serde(default = "default_rating_skew_share")]
    pub rating_skew_share: f64,

    /// Dangerous/total permission ratio above which the app is flagged.
    #[serde(default = "default_dangerous_ratio_flag")]
    pub dangerous_ratio_flag: f64,

    /// Uppercase share of alphabetic description characters above which the
    /// description is flagged as shouting.
    #[serde(default = "default_uppercase_ratio_flag")]
    pub uppercase_ratio_flag: f64,

    /// Exclamation marks per 100 description characters above which the
    /// description is flagged.
    #[serde(default = "default_exclamations_per_100_flag")]
    pub exclamations_per_100_flag: f64,

    /// Hard cap on the explanatory reason carried in a classification.
    #[serde(default = "default_reason_max_chars")]
    pub reason_max_chars: usize,

    /// Descriptions are truncated to this many characters before prompting.
    #[serde(default = "default_description_prompt_chars")]
    pub description_prompt_chars: usize,
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_max_apps() -> usize {
    50
}
fn default_dangerous_permissions() -> Vec<String> {
    DEFAULT_DANGEROUS_PERMISSIONS
        .iter()
        .map(|p| p.to_string())
        .collect()
}
fn default_developer_completeness_min() -> u8 {
    2
}
fn default_rating_skew_share() -> f64 {
    0.8
}
fn default_dangerous_ratio_flag() -> f64 {
    0.4
}
fn default_uppercase_ratio_flag() -> f64 {
    0.4
}
fn default_exclamations_per_100_flag() -> f64 {
    3.0
}
fn default_reason_max_chars() -> usize {
    500
}
fn default_description_prompt_chars() -> usize {
    1000
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            developer_completeness_min: default_developer_completeness_min(),
            rating_skew_share: default_rating_skew_share(),
            dangerous_ratio_flag: default_dangerous_ratio_flag(),
            uppercase_ratio_flag: default_uppercase_ratio_flag(),
            exclamations_per_100_flag: default_exclamations_per_100_flag(),
            reason_max_chars: default_reason_max_chars(),
            description_prompt_chars: default_description_prompt_chars(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_apps: default_max_apps(),
            dangerous_permissions: default_dangerous_permissions(),
            thresholds: Thresholds::default(),
        }
    }
}

impl DetectionConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlay environment variables onto this configuration.
    pub fn apply_env(&mut self) {
        if let Ok(model) = std::env::var("STOREGUARD_MODEL") {
            self.model = model;
        }

        if let Ok(temp) = std::env::var("STOREGUARD_TEMPERATURE") {
            if let Ok(t) = temp.parse::<f32>() {
                self.temperature = t;
            }
        }

        if let Ok(cap) = std::env::var("STOREGUARD_MAX_APPS") {
            if let Ok(n) = cap.parse::<usize>() {
                self.max_apps = n;
            }
        }
    }

    pub fn is_dangerous_permission(&self, permission: &str) -> bool {
        self.dangerous_permissions.iter().any(|p| p == permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DetectionConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.thresholds.developer_completeness_min, 2);
        assert!(config.is_dangerous_permission("android.permission.READ_SMS"));
        assert!(!config.is_dangerous_permission("android.permission.INTERNET"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = DetectionConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: DetectionConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.model, parsed.model);
        assert_eq!(config.dangerous_permissions, parsed.dangerous_permissions);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model: gpt-4-turbo\nmax_apps: 3").unwrap();

        let config = DetectionConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.model, "gpt-4-turbo");
        assert_eq!(config.max_apps, 3);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.thresholds.reason_max_chars, 500);
    }
}
