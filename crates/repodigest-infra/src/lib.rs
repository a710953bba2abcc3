//! Infrastructure implementations for repodigest.
//!
//! Everything that touches the outside world: the GitHub file loader, the
//! OpenAI-compatible chat-completion provider, environment credentials, and
//! the config file loader.

pub mod config;
pub mod github;
pub mod llm;
pub mod secret;
