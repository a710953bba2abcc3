use thiserror::Error;

use crate::llm::LlmError;

/// Errors detected at startup, before any network call is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable '{0}'")]
    MissingEnv(&'static str),

    #[error("environment variable '{0}' is not valid unicode")]
    InvalidEnv(&'static str),
}

/// Errors from fetching repository files.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("github authentication failed")]
    AuthFailed,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("github api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid file payload for '{path}': {reason}")]
    Decode { path: String, reason: String },
}

/// Errors from invalid chunk splitter configuration.
///
/// Rejected at construction time; splitting itself cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    #[error("overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    OverlapExceedsChunkSize { overlap: usize, chunk_size: usize },
}

/// Errors from the summarization/aggregation pipeline and refinement loop.
///
/// A single failed completion aborts the run; there are no partial-success
/// semantics and no retries.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),
}
