//! Error types for tojot-core

use thiserror::Error;

/// Result type alias using tojot-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration error types
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format or value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::config_not_found("/tmp/updater.yaml");
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /tmp/updater.yaml"
        );

        let err = Error::invalid_config("TOJOT_HTTP_TIMEOUT_SECS must be a valid number");
        assert!(err.to_string().contains("TOJOT_HTTP_TIMEOUT_SECS"));
    }
}
