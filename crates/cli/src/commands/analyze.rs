//! Batch classification over a saved input file.
//!
//! Loads an array of raw app records, runs the detection engine and writes
//! the classification array. With `--mock` the offline provider replaces
//! the real transport, which keeps demo runs and CI keyless.

use anyhow::{bail, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use storeguard_detection::{
    AppRecord, Classification, DetectionConfig, DetectionEngine, LLMProvider, MockProvider,
    OpenAIProvider, Verdict,
};

use super::{load_json, save_json};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file containing an array of app records
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the classification results
    #[arg(short, long, default_value = "analysis_results.json")]
    pub output: PathBuf,

    /// Optional YAML or JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model name override
    #[arg(long)]
    pub model: Option<String>,

    /// Cap on how many records to analyze (deterministic prefix)
    #[arg(long)]
    pub max_apps: Option<usize>,

    /// API key for the model provider (falls back to OPENAI_API_KEY)
    #[arg(long)]
    pub openai_api_key: Option<String>,

    /// Use the offline mock provider instead of a real model
    #[arg(long)]
    pub mock: bool,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let start = Instant::now();
    let config = build_config(&args)?;

    let records: Vec<AppRecord> = load_json(&args.input)?;
    if records.is_empty() {
        bail!("No app records found in {}", args.input.display());
    }
    println!(
        "🔍 Analyzing {} app listings with {}",
        records.len().min(config.max_apps),
        if args.mock { "mock provider" } else { config.model.as_str() }
    );

    let provider = build_provider(&args, &config)?;
    let engine = DetectionEngine::new(provider, config);

    let results = engine.analyze_batch(&records).await;
    save_json(&results, &args.output)?;

    display_summary(&results, &args.output);
    println!("   Time: {:.1}s", start.elapsed().as_secs_f64());

    Ok(())
}

fn build_config(args: &AnalyzeArgs) -> Result<DetectionConfig> {
    let mut config = match &args.config {
        Some(path) => match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DetectionConfig::from_json_file(path)?,
            _ => DetectionConfig::from_yaml_file(path)?,
        },
        None => DetectionConfig::default(),
    };

    config.apply_env();

    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(max_apps) = args.max_apps {
        config.max_apps = max_apps;
    }

    Ok(config)
}

fn build_provider(args: &AnalyzeArgs, config: &DetectionConfig) -> Result<Arc<dyn LLMProvider>> {
    if args.mock {
        return Ok(Arc::new(MockProvider::new()));
    }

    let api_key = args
        .openai_api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());

    match api_key {
        Some(key) => Ok(Arc::new(OpenAIProvider::with_api_key(
            key,
            config.model.clone(),
        ))),
        None => bail!(
            "An API key is required: pass --openai-api-key, set OPENAI_API_KEY, or use --mock"
        ),
    }
}

fn display_summary(results: &[Classification], output: &PathBuf) {
    let count_of = |verdict: Verdict| results.iter().filter(|r| r.verdict == verdict).count();
    let fraud = count_of(Verdict::Fraud);
    let suspected = count_of(Verdict::Suspected);
    let genuine = count_of(Verdict::Genuine);

    println!("\n{}", "========= ANALYSIS SUMMARY =========".bold());
    println!("Total apps analyzed: {}", results.len());
    println!("- Fraud: {}", fraud.to_string().red());
    println!("- Suspected: {}", suspected.to_string().yellow());
    println!("- Genuine: {}", genuine.to_string().green());
    println!("\nResults saved to {}", output.display().to_string().cyan());
}
