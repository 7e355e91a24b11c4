use crate::core::DetectionConfig;
use serde::Serialize;
use std::collections::BTreeSet;

/// Dangerous-permission signals for one app.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionIndicators {
    pub total_count: usize,
    pub dangerous_count: usize,
    /// dangerous / max(1, total), always in [0, 1].
    pub dangerous_ratio: f64,
    pub dangerous_found: Vec<String>,
    pub excessive_dangerous: bool,
}

/// Counts how many of the app's permissions intersect the configured
/// dangerous set. Repeated permissions are de-duplicated first; the
/// matched list is kept sorted so the prompt text stays deterministic.
pub fn analyze(permissions: &[String], config: &DetectionConfig) -> PermissionIndicators {
    let unique: BTreeSet<&str> = permissions.iter().map(String::as_str).collect();

    let dangerous_found: Vec<String> = unique
        .iter()
        .filter(|p| config.is_dangerous_permission(p))
        .map(|p| p.to_string())
        .collect();

    let total_count = unique.len();
    let dangerous_count = dangerous_found.len();
    let dangerous_ratio = dangerous_count as f64 / total_count.max(1) as f64;

    PermissionIndicators {
        total_count,
        dangerous_count,
        dangerous_ratio,
        dangerous_found,
        excessive_dangerous: dangerous_ratio > config.thresholds.dangerous_ratio_flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_dangerous_ratio() {
        let config = DetectionConfig::default();
        let indicators = analyze(
            &perms(&[
                "android.permission.INTERNET",
                "android.permission.READ_SMS",
                "android.permission.SEND_SMS",
            ]),
            &config,
        );

        assert_eq!(indicators.total_count, 3);
        assert_eq!(indicators.dangerous_count, 2);
        assert!((indicators.dangerous_ratio - 2.0 / 3.0).abs() < 1e-9);
        assert!(indicators.excessive_dangerous);
    }

    #[test]
    fn test_repeats_are_deduplicated() {
        let config = DetectionConfig::default();
        let indicators = analyze(
            &perms(&[
                "android.permission.CAMERA",
                "android.permission.CAMERA",
                "android.permission.INTERNET",
            ]),
            &config,
        );

        assert_eq!(indicators.total_count, 2);
        assert_eq!(indicators.dangerous_count, 1);
        assert_eq!(indicators.dangerous_found, perms(&["android.permission.CAMERA"]));
    }

    #[test]
    fn test_empty_permissions_do_not_divide_by_zero() {
        let config = DetectionConfig::default();
        let indicators = analyze(&[], &config);
        assert_eq!(indicators.total_count, 0);
        assert_eq!(indicators.dangerous_ratio, 0.0);
        assert!(!indicators.excessive_dangerous);
    }
}
