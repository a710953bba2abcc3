//! Analyzer configuration.
//!
//! Deserialized from `repodigest.toml` when present; every field has a
//! default mirroring the tool's stock setup (a Scala project analyzed with
//! gpt-4o, 3000-char chunks with 100-char overlap).

use serde::{Deserialize, Serialize};

/// Full configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Repository identifier in "owner/name" form.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Branch to read files from.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// File extensions (without the dot) to include.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Maximum chunk size in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between adjacent chunks in characters.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Split boundaries in priority order.
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,

    /// Model identifier sent to the chat-completion API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Language name used in the prompts (e.g., "Scala").
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature; provider default when unset.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Timeout for each remote call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_repo() -> String {
    "mohamedallapitchai/boundingBoxP".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["scala".to_string()]
}

fn default_chunk_size() -> usize {
    3000
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_separators() -> Vec<String> {
    vec![
        "\nclass ".to_string(),
        "\nobject ".to_string(),
        "\n".to_string(),
        " ".to_string(),
    ]
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_language() -> String {
    "Scala".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            branch: default_branch(),
            extensions: default_extensions(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            separators: default_separators(),
            model: default_model(),
            language: default_language(),
            max_tokens: default_max_tokens(),
            temperature: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}
