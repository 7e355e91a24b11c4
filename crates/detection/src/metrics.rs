//! Detection-quality scoring against labeled ground truth.
//!
//! Pure computation over two index-aligned binary label sequences. Degenerate
//! denominators (no positive predictions, no negatives) report 0.0 instead of
//! failing, since skewed label distributions are routine; mismatched sequence
//! lengths are a caller bug and a hard error.

use crate::core::Classification;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Ground-truth entry joined to predictions by app id. Label 0 is genuine,
/// 1 is fraud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruthLabel {
    pub app_id: String,
    pub label: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
    pub confusion_matrix: ConfusionMatrix,
}

/// Scores predictions against truth. Both sequences are 0/1, equal length,
/// index-aligned; any non-zero label counts as positive.
pub fn evaluate(true_labels: &[u8], predicted_labels: &[u8]) -> Result<MetricsReport> {
    if true_labels.len() != predicted_labels.len() {
        bail!(
            "Label sequences must have the same length (got {} true, {} predicted)",
            true_labels.len(),
            predicted_labels.len()
        );
    }

    let mut matrix = ConfusionMatrix {
        true_positives: 0,
        false_positives: 0,
        true_negatives: 0,
        false_negatives: 0,
    };

    for (&truth, &predicted) in true_labels.iter().zip(predicted_labels) {
        match (truth != 0, predicted != 0) {
            (true, true) => matrix.true_positives += 1,
            (false, true) => matrix.false_positives += 1,
            (false, false) => matrix.true_negatives += 1,
            (true, false) => matrix.false_negatives += 1,
        }
    }

    let accuracy = ratio(
        matrix.true_positives + matrix.true_negatives,
        true_labels.len() as u64,
    );
    let precision = ratio(
        matrix.true_positives,
        matrix.true_positives + matrix.false_positives,
    );
    let recall = ratio(
        matrix.true_positives,
        matrix.true_positives + matrix.false_negatives,
    );
    let f1_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    let false_positive_rate = ratio(
        matrix.false_positives,
        matrix.false_positives + matrix.true_negatives,
    );
    let false_negative_rate = ratio(
        matrix.false_negatives,
        matrix.false_negatives + matrix.true_positives,
    );

    info!(
        "Performance metrics calculated: accuracy={:.3}, f1={:.3}",
        accuracy, f1_score
    );

    Ok(MetricsReport {
        accuracy,
        precision,
        recall,
        f1_score,
        false_positive_rate,
        false_negative_rate,
        confusion_matrix: matrix,
    })
}

/// Joins ground truth to classification results by app id, producing the
/// aligned label sequences `evaluate` expects. Suspected and fraud verdicts
/// both map to predicted label 1 (flagged for review).
pub fn align_labels(
    truth: &[TruthLabel],
    results: &[Classification],
) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut true_labels = Vec::with_capacity(truth.len());
    let mut predicted_labels = Vec::with_capacity(truth.len());

    for entry in truth {
        let result = results
            .iter()
            .find(|r| r.app_id == entry.app_id)
            .ok_or_else(|| {
                anyhow::anyhow!("No classification result for labeled app {}", entry.app_id)
            })?;

        true_labels.push(if entry.label != 0 { 1 } else { 0 });
        predicted_labels.push(if result.verdict.is_flagged() { 1 } else { 0 });
    }

    Ok((true_labels, predicted_labels))
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Verdict;

    #[test]
    fn test_worked_example() {
        let report = evaluate(&[1, 1, 0, 0], &[1, 0, 0, 0]).unwrap();

        assert_eq!(
            report.confusion_matrix,
            ConfusionMatrix {
                true_positives: 1,
                false_positives: 0,
                true_negatives: 2,
                false_negatives: 1,
            }
        );
        assert_eq!(report.accuracy, 0.75);
        assert_eq!(report.precision, 1.0);
        assert_eq!(report.recall, 0.5);
        assert!((report.f1_score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.false_positive_rate, 0.0);
        assert_eq!(report.false_negative_rate, 0.5);
    }

    #[test]
    fn test_zero_denominators_report_zero() {
        let report = evaluate(&[0, 0, 0], &[0, 0, 0]).unwrap();
        assert_eq!(report.precision, 0.0);
        assert_eq!(report.recall, 0.0);
        assert_eq!(report.f1_score, 0.0);
        assert_eq!(report.false_negative_rate, 0.0);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_mismatched_lengths_are_an_error() {
        assert!(evaluate(&[1, 0], &[1]).is_err());
    }

    #[test]
    fn test_empty_sequences_degrade_to_zeros() {
        let report = evaluate(&[], &[]).unwrap();
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.f1_score, 0.0);
        assert_eq!(report.confusion_matrix.true_positives, 0);
    }

    #[test]
    fn test_report_serializes_to_contract_keys() {
        let report = evaluate(&[1, 0], &[1, 1]).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        for key in [
            "accuracy",
            "precision",
            "recall",
            "f1_score",
            "false_positive_rate",
            "false_negative_rate",
        ] {
            assert!(value[key].is_number(), "missing metric key {key}");
        }
        assert!(value["confusion_matrix"]["true_positives"].is_u64());
    }

    #[test]
    fn test_align_labels_maps_suspected_to_positive() {
        let truth = vec![
            TruthLabel {
                app_id: "a".to_string(),
                label: 1,
            },
            TruthLabel {
                app_id: "b".to_string(),
                label: 0,
            },
        ];
        let results = vec![
            Classification {
                app_id: "b".to_string(),
                app_title: "B".to_string(),
                verdict: Verdict::Suspected,
                reason: "r".to_string(),
            },
            Classification {
                app_id: "a".to_string(),
                app_title: "A".to_string(),
                verdict: Verdict::Fraud,
                reason: "r".to_string(),
            },
        ];

        let (true_labels, predicted_labels) = align_labels(&truth, &results).unwrap();
        assert_eq!(true_labels, vec![1, 0]);
        assert_eq!(predicted_labels, vec![1, 1]);
    }

    #[test]
    fn test_align_labels_missing_result_is_an_error() {
        let truth = vec![TruthLabel {
            app_id: "missing".to_string(),
            label: 1,
        }];
        assert!(align_labels(&truth, &[]).is_err());
    }
}
