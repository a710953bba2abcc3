//! CLI argument definitions and command handlers.

pub mod analyze;
pub mod input;
pub mod refine;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use repodigest_core::prompt::AggregationFormat;

/// Summarize a GitHub repository with a chat-completion model.
#[derive(Parser)]
#[command(name = "rdigest", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, chunk, summarize, and synthesize a repository
    Analyze(AnalyzeArgs),

    /// Analyze, then refine the answer interactively (enter 'bye' to stop)
    Refine(AnalyzeArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Repository in "owner/name" form
    #[arg(long)]
    pub repo: Option<String>,

    /// Branch to read files from
    #[arg(long)]
    pub branch: Option<String>,

    /// File extension to include, without the dot (repeatable)
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Model identifier sent to the chat-completion API
    #[arg(long)]
    pub model: Option<String>,

    /// Language name used in the prompts
    #[arg(long)]
    pub language: Option<String>,

    /// Aggregation prompt format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Timeout for each remote call, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Path to the config file
    #[arg(long, default_value = "repodigest.toml")]
    pub config: PathBuf,
}

/// CLI-facing aggregation format names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Overall purpose plus example runs
    Questions,
    /// Developer-ready problem statement
    ProblemStatement,
}

impl From<FormatArg> for AggregationFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Questions => AggregationFormat::Questions,
            FormatArg::ProblemStatement => AggregationFormat::ProblemStatement,
        }
    }
}
