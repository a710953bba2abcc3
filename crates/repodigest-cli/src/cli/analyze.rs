//! The fetch → split → summarize → aggregate pipeline run.
//!
//! Credentials and split parameters are validated before the first network
//! call; after that the run is strictly sequential and fails fast on the
//! first error.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use repodigest_core::pipeline::{self, PipelineOptions};
use repodigest_core::prompt::AggregationFormat;
use repodigest_core::split::RecursiveSplitter;
use repodigest_infra::config::load_config;
use repodigest_infra::github::GithubLoader;
use repodigest_infra::llm::OpenAiCompatibleProvider;
use repodigest_infra::secret::Credentials;
use repodigest_types::config::AnalyzerConfig;

use super::AnalyzeArgs;

/// Everything the refine loop needs to continue the conversation.
pub struct AnalysisOutput {
    pub answer: String,
    pub opts: PipelineOptions,
    pub provider: OpenAiCompatibleProvider,
}

/// Run the full analysis pipeline and return the synthesized answer.
pub async fn run_analysis(
    args: &AnalyzeArgs,
    default_format: AggregationFormat,
) -> anyhow::Result<AnalysisOutput> {
    let config = merge_config(load_config(&args.config).await, args);

    // Startup checks, in order: credentials then split parameters.
    // Both must fail before any network call.
    let credentials = Credentials::from_env()?;
    let splitter = RecursiveSplitter::from_config(&config)?;

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let loader = GithubLoader::new(
        config.repo.clone(),
        config.branch.clone(),
        credentials.github_token,
        timeout,
    )?;

    let spinner = new_spinner(format!("fetching {}@{}...", config.repo, config.branch));
    let suffixes = extension_suffixes(&config.extensions);
    let documents = loader
        .load(|path| suffixes.iter().any(|s| path.ends_with(s.as_str())))
        .await?;
    spinner.finish_and_clear();
    tracing::info!(documents = documents.len(), "repository loaded");

    let chunks = splitter.split_documents(&documents);
    println!(
        "  {} number of chunks is {}",
        style(">").cyan().bold(),
        style(chunks.len()).bold()
    );

    let provider = OpenAiCompatibleProvider::openai(credentials.api_key, &config.model, timeout)?;
    let opts = PipelineOptions {
        model: config.model.clone(),
        language: config.language.clone(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };

    let spinner = new_spinner(format!("summarizing {} chunks...", chunks.len()));
    let summaries = pipeline::summarize_chunks(&provider, &opts, &chunks).await?;
    spinner.finish_and_clear();
    println!(
        "  {} length of summaries is {}",
        style(">").cyan().bold(),
        style(summaries.len()).bold()
    );

    let format = args.format.map(Into::into).unwrap_or(default_format);
    let spinner = new_spinner("synthesizing final answer...".to_string());
    let answer = pipeline::aggregate(&provider, &opts, &summaries, format).await?;
    spinner.finish_and_clear();

    Ok(AnalysisOutput {
        answer,
        opts,
        provider,
    })
}

/// Apply CLI overrides on top of the file config.
fn merge_config(mut config: AnalyzerConfig, args: &AnalyzeArgs) -> AnalyzerConfig {
    if let Some(ref repo) = args.repo {
        config.repo = repo.clone();
    }
    if let Some(ref branch) = args.branch {
        config.branch = branch.clone();
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    if let Some(ref model) = args.model {
        config.model = model.clone();
    }
    if let Some(ref language) = args.language {
        config.language = language.clone();
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout_secs = secs;
    }
    config
}

/// Turn bare extensions into path suffixes ("scala" -> ".scala").
fn extension_suffixes(extensions: &[String]) -> Vec<String> {
    extensions.iter().map(|e| format!(".{e}")).collect()
}

fn new_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
