//! Config file loader.
//!
//! Reads `repodigest.toml` and deserializes it into [`AnalyzerConfig`].
//! Falls back to the stock defaults when the file is missing or malformed;
//! only startup credentials and split parameters are hard failures, a bad
//! config file is not.

use std::path::Path;

use repodigest_types::config::AnalyzerConfig;

/// Load configuration from a TOML file.
///
/// - Missing file: returns [`AnalyzerConfig::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the default.
pub async fn load_config(path: &Path) -> AnalyzerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return AnalyzerConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return AnalyzerConfig::default();
        }
    };

    match toml::from_str::<AnalyzerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            AnalyzerConfig::default()
        }
    }
}
