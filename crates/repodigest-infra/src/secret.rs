//! Environment-sourced credentials.
//!
//! Both secrets are read once at startup so a missing variable fails the
//! run deterministically before any network call is attempted. Values are
//! wrapped in [`SecretString`] so they never land in Debug output or logs.

use secrecy::SecretString;

use repodigest_types::error::ConfigError;

/// GitHub access token variable.
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

/// Model-provider API key variable.
pub const API_KEY_VAR: &str = "API_KEY";

/// The two secrets every run needs.
pub struct Credentials {
    pub github_token: SecretString,
    pub api_key: SecretString,
}

impl Credentials {
    /// Read both credentials from the process environment.
    ///
    /// The error names the first missing variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            github_token: require_env(ACCESS_TOKEN_VAR)?,
            api_key: require_env(API_KEY_VAR)?,
        })
    }
}

fn require_env(name: &'static str) -> Result<SecretString, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(SecretString::from(value)),
        Err(std::env::VarError::NotPresent) => Err(ConfigError::MissingEnv(name)),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv(name)),
    }
}
