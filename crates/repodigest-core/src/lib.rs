//! Core logic for repodigest.
//!
//! Everything here is network-free: the chunk splitter, prompt builders,
//! the summarization pipeline (generic over an [`llm::LlmProvider`]), the
//! in-memory transcript store, and the interactive refinement loop.
//! Provider implementations live in repodigest-infra.

pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod refine;
pub mod split;
pub mod transcript;

#[cfg(test)]
pub(crate) mod testing;
