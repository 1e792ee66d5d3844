//! Hierarchical configuration loader with precedence
//!
//! Loads updater configuration from multiple sources with the following
//! precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.tojot/updater.yaml)
//! 3. Environment variables (TOJOT_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::UpdaterConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Name of the user-level updater configuration file
pub const CONFIG_FILE_NAME: &str = "updater.yaml";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/embedded/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at the standard config directory (~/.tojot)
    pub fn new() -> Result<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    fn default_config_dir() -> Result<Utf8PathBuf> {
        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::invalid_config("Could not determine home directory"))?;

        Ok(Utf8PathBuf::from(home).join(".tojot"))
    }

    /// Load updater configuration with hierarchical precedence
    pub fn load(&self) -> Result<UpdaterConfig> {
        let mut config = Self::load_embedded_config::<UpdaterConfig>("updater-defaults.yaml")?;

        let user_config_path = self.config_dir.join(CONFIG_FILE_NAME);
        if user_config_path.exists() {
            debug!("Loading user updater config from {}", user_config_path);
            let file_config = self.load_yaml_file::<UpdaterConfig>(&user_config_path)?;
            config = Self::merge_config(config, file_config);
        }

        self.apply_env_overrides(config)
    }

    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge two configs section by section (base is overridden by overlay)
    fn merge_config(_base: UpdaterConfig, overlay: UpdaterConfig) -> UpdaterConfig {
        UpdaterConfig {
            release: overlay.release,
            network: overlay.network,
            updates: overlay.updates,
            display: overlay.display,
        }
    }

    fn apply_env_overrides(&self, mut config: UpdaterConfig) -> Result<UpdaterConfig> {
        // Release source
        if let Ok(val) = env::var("TOJOT_RELEASE_OWNER") {
            config.release.owner = val;
        }

        if let Ok(val) = env::var("TOJOT_RELEASE_REPO") {
            config.release.repository = val;
        }

        if let Ok(val) = env::var("TOJOT_GITHUB_API_URL") {
            config.release.api_url = val.trim_end_matches('/').to_string();
        }

        // Timeouts
        if let Ok(val) = env::var("TOJOT_HTTP_TIMEOUT_SECS") {
            config.network.http_timeout_secs = parse_number("TOJOT_HTTP_TIMEOUT_SECS", &val)?;
        }

        if let Ok(val) = env::var("TOJOT_DOWNLOAD_TIMEOUT_SECS") {
            config.network.download_timeout_secs =
                parse_number("TOJOT_DOWNLOAD_TIMEOUT_SECS", &val)?;
        }

        if let Ok(val) = env::var("TOJOT_INSTALL_TIMEOUT_SECS") {
            config.updates.install_timeout_secs =
                parse_number("TOJOT_INSTALL_TIMEOUT_SECS", &val)?;
        }

        if let Ok(val) = env::var("TOJOT_STARTUP_DELAY_MS") {
            config.updates.startup_delay_ms = parse_number("TOJOT_STARTUP_DELAY_MS", &val)?;
        }

        // Display
        if let Ok(val) = env::var("TOJOT_NO_PROGRESS") {
            config.display.show_progress = !val.parse().unwrap_or(false);
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_config(format!("{} must be a valid number", key)))
}
