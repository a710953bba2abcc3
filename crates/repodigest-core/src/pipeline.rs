//! Summarization pipeline: map (one completion per chunk) then reduce
//! (one completion over the joined summaries).
//!
//! Strictly sequential: each request is issued only after the previous
//! response has been fully received. No retries, no caching; the first
//! failed call aborts the run.

use repodigest_types::document::Chunk;
use repodigest_types::error::PipelineError;

use crate::llm::LlmProvider;
use crate::prompt::{single_turn_request, AggregationFormat, AggregationPrompt, ChunkPrompt};

/// Model parameters shared by every completion in a run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub model: String,
    /// Language name used in the prompts (e.g., "Scala").
    pub language: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

/// Summarize each chunk with one completion request, in input order.
///
/// The result has exactly one summary per chunk, in chunk order.
#[tracing::instrument(
    name = "summarize_chunks",
    skip(provider, opts, chunks),
    fields(model = %opts.model, chunk_count = chunks.len())
)]
pub async fn summarize_chunks<P: LlmProvider>(
    provider: &P,
    opts: &PipelineOptions,
    chunks: &[Chunk],
) -> Result<Vec<String>, PipelineError> {
    let mut summaries = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let prompt = ChunkPrompt {
            language: &opts.language,
            code: &chunk.content,
        }
        .render();
        let request =
            single_turn_request(&opts.model, prompt, None, opts.max_tokens, opts.temperature);
        let response = provider.complete(&request).await?;
        tracing::debug!(
            index,
            path = %chunk.metadata.path,
            output_tokens = response.usage.output_tokens,
            "chunk summarized"
        );
        summaries.push(response.content);
    }
    Ok(summaries)
}

/// Synthesize the per-chunk summaries into one final answer with a single
/// completion request.
#[tracing::instrument(
    name = "aggregate",
    skip(provider, opts, summaries),
    fields(model = %opts.model, summary_count = summaries.len())
)]
pub async fn aggregate<P: LlmProvider>(
    provider: &P,
    opts: &PipelineOptions,
    summaries: &[String],
    format: AggregationFormat,
) -> Result<String, PipelineError> {
    let prompt = AggregationPrompt {
        language: &opts.language,
        summaries,
        format,
    };
    let request = single_turn_request(
        &opts.model,
        prompt.render(),
        prompt.system(),
        opts.max_tokens,
        opts.temperature,
    );
    let response = provider.complete(&request).await?;
    Ok(response.content)
}
