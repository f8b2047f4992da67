use std::io;

use thiserror::Error;

/// Library-wide error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure while reading a local configuration file.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Local configuration file could not be parsed as YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A required field is missing: the secret payload has no `secret`
    /// member, or a loaded document is not a key-value mapping.
    #[error("{0}")]
    MissingField(&'static str),

    /// Lookup of a configuration key absent from the document.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Secret retrieval failed (transport error or non-success status).
    #[error("Secret fetch failed: {0}")]
    Fetch(String),

    /// Configuration or environment issue, including HTTP client setup.
    #[error("{0}")]
    Configuration(String),
}

impl ConfigError {
    pub(crate) fn config_error<S: Into<String>>(message: S) -> Self {
        ConfigError::Configuration(message.into())
    }
}
