//! Scores a saved classification run against labeled ground truth.

use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use storeguard_detection::{align_labels, evaluate, Classification, TruthLabel};

use super::{load_json, save_json};

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// JSON file with ground-truth labels: [{"app_id": ..., "label": 0|1}]
    #[arg(short, long)]
    pub truth: PathBuf,

    /// JSON file with classification results from `analyze`
    #[arg(short, long)]
    pub predictions: PathBuf,

    /// Optional path to also write the metrics report as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let truth: Vec<TruthLabel> = load_json(&args.truth)?;
    let predictions: Vec<Classification> = load_json(&args.predictions)?;

    let (true_labels, predicted_labels) = align_labels(&truth, &predictions)?;
    let report = evaluate(&true_labels, &predicted_labels)?;

    println!("\n{}", "========= DETECTION QUALITY =========".bold());
    println!("Apps scored: {}", true_labels.len());
    println!("Accuracy:            {:.3}", report.accuracy);
    println!("Precision:           {:.3}", report.precision);
    println!("Recall:              {:.3}", report.recall);
    println!("F1 score:            {:.3}", report.f1_score);
    println!("False positive rate: {:.3}", report.false_positive_rate);
    println!("False negative rate: {:.3}", report.false_negative_rate);

    let matrix = &report.confusion_matrix;
    println!("\nConfusion matrix:");
    println!(
        "  TP: {}  FP: {}  TN: {}  FN: {}",
        matrix.true_positives.to_string().green(),
        matrix.false_positives.to_string().red(),
        matrix.true_negatives.to_string().green(),
        matrix.false_negatives.to_string().red(),
    );

    if let Some(path) = &args.output {
        save_json(&report, path)?;
        println!("\nReport saved to {}", path.display().to_string().cyan());
    }

    Ok(())
}
