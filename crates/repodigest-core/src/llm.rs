//! LlmProvider trait definition.
//!
//! The seam between the pipeline and the remote chat-completion API.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition); callers are
//! generic over the provider, so no boxing is needed.

use repodigest_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
///
/// Implementations live in repodigest-infra (e.g., `OpenAiCompatibleProvider`).
/// Each `complete` call is one blocking round-trip to the remote model; the
/// pipeline never issues a second request before the first resolves.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
