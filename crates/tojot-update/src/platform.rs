//! Host platform matching and classification of release assets
//!
//! All tests are case-insensitive substring/suffix checks on the asset name.
//! A host outside darwin/windows/linux matches nothing.

use std::fmt;

/// Operating system the running instance executes on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostOs {
    Darwin,
    Windows,
    Linux,
    /// Any other OS identifier; never matches an asset
    Other(String),
}

impl HostOs {
    /// Detect the host OS of the running process
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS identifier (`std::env::consts::OS` or a GOOS-style name)
    pub fn from_os_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Self::Darwin,
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Darwin => "darwin",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Other(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a matched asset gets installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateClassification {
    /// Raw executable that replaces the running image
    BinaryReplacement,
    /// Platform-native installer run out of process
    PackagedInstaller,
}

impl fmt::Display for UpdateClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinaryReplacement => f.write_str("binary replacement"),
            Self::PackagedInstaller => f.write_str("packaged installer"),
        }
    }
}

const DARWIN_PACKAGES: &[&str] = &[".dmg", ".pkg"];
const WINDOWS_PACKAGES: &[&str] = &[".exe", ".msi"];
const LINUX_PACKAGES: &[&str] = &[".deb", ".rpm", ".appimage"];

/// Architecture tokens accepted in raw Windows binary names
const WINDOWS_ARCH_TOKENS: &[&str] = &["amd64", "x86_64", "x64", "arm64", "aarch64", "386"];

fn ends_with_any(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| name.ends_with(suffix))
}

/// Whether `asset_name` is a distributable for `host`
pub fn matches_host(asset_name: &str, host: &HostOs) -> bool {
    let name = asset_name.to_lowercase();

    match host {
        HostOs::Darwin => {
            name.contains("darwin") || name.contains("mac") || ends_with_any(&name, DARWIN_PACKAGES)
        }
        HostOs::Windows => name.contains("windows") || ends_with_any(&name, WINDOWS_PACKAGES),
        HostOs::Linux => name.contains("linux") || ends_with_any(&name, LINUX_PACKAGES),
        HostOs::Other(_) => false,
    }
}

/// Classify an asset that already matched `host`
pub fn classify(asset_name: &str, host: &HostOs) -> UpdateClassification {
    let name = asset_name.to_lowercase();

    let binary = match host {
        HostOs::Darwin => {
            name.contains("darwin")
                && name.contains("universal")
                && !ends_with_any(&name, DARWIN_PACKAGES)
        }
        HostOs::Windows => {
            name.contains("windows")
                && WINDOWS_ARCH_TOKENS.iter().any(|token| name.contains(token))
                && name.ends_with(".exe")
                && !name.contains("installer")
        }
        HostOs::Linux => name.contains("linux") && !ends_with_any(&name, LINUX_PACKAGES),
        HostOs::Other(_) => false,
    };

    if binary {
        UpdateClassification::BinaryReplacement
    } else {
        UpdateClassification::PackagedInstaller
    }
}

/// Match and classify in one step; `None` when the asset is not for `host`
pub fn select(asset_name: &str, host: &HostOs) -> Option<UpdateClassification> {
    matches_host(asset_name, host).then(|| classify(asset_name, host))
}
