//! Version information for the tojot CLI

use serde::{Deserialize, Serialize};
use tojot_update::resolve_current_version;

/// Version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version the updater compares against (honors `APP_VERSION`)
    pub version: String,

    /// Version compiled into this binary
    pub build_version: String,

    /// Operating system
    pub os: String,

    /// CPU architecture
    pub arch: String,
}

impl VersionInfo {
    /// Create version info for current build
    pub fn current() -> Self {
        let build_version = env!("CARGO_PKG_VERSION").to_string();
        Self {
            version: resolve_current_version(&build_version),
            build_version,
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Whether `APP_VERSION` replaced the compiled-in version
    pub fn is_overridden(&self) -> bool {
        self.version != self.build_version
    }

    /// Format as display string
    pub fn display(&self) -> String {
        format!("tojot {} ({}-{})", self.version, self.os, self.arch)
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
