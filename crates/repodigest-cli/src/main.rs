//! repodigest CLI entry point.
//!
//! Binary name: `rdigest`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the
//! analyze or refine command handler.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use repodigest_core::prompt::AggregationFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,repodigest_core=debug,repodigest_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Analyze(args) => {
            let output = cli::analyze::run_analysis(&args, AggregationFormat::Questions).await?;
            println!();
            println!("{}", output.answer);
        }
        Commands::Refine(args) => {
            cli::refine::run(&args).await?;
        }
    }

    Ok(())
}
