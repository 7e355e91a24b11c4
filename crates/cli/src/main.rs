use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{analyze::AnalyzeArgs, evaluate::EvaluateArgs};

#[derive(Parser)]
#[command(name = "storeguard")]
#[command(about = "LLM-assisted fraud detection for app store listings")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a batch of app listings as genuine, suspected or fraud
    Analyze(AnalyzeArgs),

    /// Score saved classifications against labeled ground truth
    Evaluate(EvaluateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::analyze::execute(args))
        }
        Commands::Evaluate(args) => commands::evaluate::execute(args),
    }
}
