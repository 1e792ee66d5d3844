//! Error types for tojot-update

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using tojot-update's error type
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Update subsystem error types
///
/// A user declining the install is not represented here; see
/// [`crate::applier::ApplyOutcome::Cancelled`].
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Release lookup or download transport failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// The release endpoint has no published release
    #[error("No published release found for {owner}/{repository}")]
    NotFound { owner: String, repository: String },

    /// Malformed version string on either side of a comparison
    #[error("Invalid version '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// No release asset matches the host platform
    #[error("No suitable update found for this platform ({host})")]
    NoSuitableAsset { host: String },

    /// Temp directory or file creation failure
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Installer dispatch has no branch for this combination
    #[error("Unsupported update artifact: {message}")]
    UnsupportedArtifact { message: String },

    /// The dialog collaborator failed to present a dialog
    #[error("Error showing dialog: {message}")]
    Dialog { message: String },

    /// Installer subprocess or binary swap failed
    #[error("Install failed: {message}")]
    Install { message: String },
}

impl UpdateError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn parse(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedArtifact {
            message: message.into(),
        }
    }

    pub fn dialog(message: impl Into<String>) -> Self {
        Self::Dialog {
            message: message.into(),
        }
    }

    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for UpdateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network(format!("request timed out: {}", err))
        } else {
            Self::network(err.to_string())
        }
    }
}
