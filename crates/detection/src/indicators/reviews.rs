use crate::core::{DetectionConfig, Review};
use serde::Serialize;
use std::collections::HashMap;

const MAX_SCORE: u8 = 5;

/// Review texts containing any of these suggest real users reporting harm,
/// which contradicts an overwhelmingly positive rating distribution.
const NEGATIVE_KEYWORDS: &[&str] = &[
    "scam",
    "lost money",
    "fake",
    "fraud",
    "stole",
    "stolen",
    "refund",
];

/// Review-corpus signals for one app.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewIndicators {
    pub count: usize,
    /// Absent when the app has no reviews.
    pub average_rating: Option<f64>,
    pub five_star_share: f64,
    pub one_star_share: f64,
    /// Size of the largest group of near-duplicate review texts over the
    /// total review count; 0 when there are no reviews.
    pub duplicate_review_ratio: f64,
    /// True when ratings are overwhelmingly max-score yet at least one
    /// review text reads like a credible complaint.
    pub rating_skew: bool,
}

pub fn analyze(reviews: &[Review], config: &DetectionConfig) -> ReviewIndicators {
    let count = reviews.len();
    if count == 0 {
        return ReviewIndicators {
            count: 0,
            average_rating: None,
            five_star_share: 0.0,
            one_star_share: 0.0,
            duplicate_review_ratio: 0.0,
            rating_skew: false,
        };
    }

    let total = count as f64;
    let average_rating = reviews.iter().map(|r| r.score as f64).sum::<f64>() / total;
    let five_star_count = reviews.iter().filter(|r| r.score == MAX_SCORE).count();
    let one_star_count = reviews.iter().filter(|r| r.score == 1).count();

    let mut groups: HashMap<String, usize> = HashMap::new();
    for review in reviews {
        *groups.entry(normalize(&review.text)).or_insert(0) += 1;
    }
    let max_group = groups.values().copied().max().unwrap_or(0);

    let five_star_share = five_star_count as f64 / total;
    let has_negative_outlier = reviews.iter().any(|r| {
        let text = r.text.to_lowercase();
        NEGATIVE_KEYWORDS.iter().any(|k| text.contains(k))
    });

    ReviewIndicators {
        count,
        average_rating: Some(average_rating),
        five_star_share,
        one_star_share: one_star_count as f64 / total,
        duplicate_review_ratio: max_group as f64 / total,
        rating_skew: five_star_share >= config.thresholds.rating_skew_share && has_negative_outlier,
    }
}

/// Lowercases and strips everything that is not alphanumeric, so that
/// trivially restyled copies of the same review collapse to one group.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(score: u8, text: &str) -> Review {
        Review {
            user_name: String::new(),
            score,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty_reviews_use_neutral_defaults() {
        let config = DetectionConfig::default();
        let indicators = analyze(&[], &config);
        assert_eq!(indicators.count, 0);
        assert_eq!(indicators.average_rating, None);
        assert_eq!(indicators.duplicate_review_ratio, 0.0);
        assert!(!indicators.rating_skew);
    }

    #[test]
    fn test_duplicate_detection_ignores_case_and_punctuation() {
        let config = DetectionConfig::default();
        let reviews = vec![
            review(5, "Best app ever!!!"),
            review(5, "best app ever"),
            review(5, "BEST, app, EVER."),
            review(3, "It is fine"),
        ];

        let indicators = analyze(&reviews, &config);
        assert!((indicators.duplicate_review_ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_rating_skew_needs_negative_outlier() {
        let config = DetectionConfig::default();

        let glowing = vec![
            review(5, "Amazing"),
            review(5, "Love it"),
            review(5, "Perfect"),
            review(5, "Great"),
        ];
        assert!(!analyze(&glowing, &config).rating_skew);

        let contradictory = vec![
            review(5, "Amazing"),
            review(5, "Love it"),
            review(5, "Perfect"),
            review(5, "Great"),
            review(1, "This is a scam, I lost money"),
        ];
        assert!(analyze(&contradictory, &config).rating_skew);
    }

    #[test]
    fn test_average_and_shares() {
        let config = DetectionConfig::default();
        let reviews = vec![review(5, "a"), review(1, "b"), review(3, "c"), review(5, "d")];
        let indicators = analyze(&reviews, &config);

        assert_eq!(indicators.average_rating, Some(3.5));
        assert_eq!(indicators.five_star_share, 0.5);
        assert_eq!(indicators.one_star_share, 0.25);
    }
}
