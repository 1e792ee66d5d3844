//! Updater configuration types
//!
//! These types define where releases are published, how the HTTP client
//! behaves, and the pacing of the install flows.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete updater configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdaterConfig {
    /// Upstream release source
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Update check and install pacing
    #[serde(default)]
    pub updates: UpdatesConfig,

    /// Display and output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Release source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseConfig {
    /// Repository owner
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Base URL for the releases API
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repository: default_repository(),
            api_url: default_api_url(),
        }
    }
}

fn default_owner() -> String {
    "daan-gunnink".to_string()
}
fn default_repository() -> String {
    "toJot".to_string()
}
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Timeout for release API requests in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Timeout for a whole artifact download in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    600 // 10 minutes
}
fn default_user_agent() -> String {
    format!(
        "tojot/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Update check and install pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdatesConfig {
    /// Run a deferred update check when the application starts
    #[serde(default = "default_true")]
    pub check_on_startup: bool,

    /// Delay before the startup check, so the UI can finish loading
    #[serde(default = "default_startup_delay")]
    pub startup_delay_ms: u64,

    /// Delay between the restart notice and the binary swap
    #[serde(default = "default_restart_delay")]
    pub restart_delay_ms: u64,

    /// Time given to the user to start a manual installer before quitting
    #[serde(default = "default_manual_step_wait")]
    pub manual_step_wait_secs: u64,

    /// Settle time after a Windows installer returns
    #[serde(default = "default_installer_settle")]
    pub installer_settle_secs: u64,

    /// Time a quit notice stays visible before exit is requested
    #[serde(default = "default_quit_notice")]
    pub quit_notice_secs: u64,

    /// Upper bound on any installer subprocess
    #[serde(default = "default_install_timeout")]
    pub install_timeout_secs: u64,

    /// Arguments passed to the relaunched executable after an update
    #[serde(default = "default_relaunch_args")]
    pub relaunch_args: Vec<String>,
}

impl Default for UpdatesConfig {
    fn default() -> Self {
        Self {
            check_on_startup: default_true(),
            startup_delay_ms: default_startup_delay(),
            restart_delay_ms: default_restart_delay(),
            manual_step_wait_secs: default_manual_step_wait(),
            installer_settle_secs: default_installer_settle(),
            quit_notice_secs: default_quit_notice(),
            install_timeout_secs: default_install_timeout(),
            relaunch_args: default_relaunch_args(),
        }
    }
}

impl UpdatesConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    pub fn manual_step_wait(&self) -> Duration {
        Duration::from_secs(self.manual_step_wait_secs)
    }

    pub fn installer_settle(&self) -> Duration {
        Duration::from_secs(self.installer_settle_secs)
    }

    pub fn quit_notice(&self) -> Duration {
        Duration::from_secs(self.quit_notice_secs)
    }

    pub fn install_timeout(&self) -> Duration {
        Duration::from_secs(self.install_timeout_secs)
    }
}

fn default_true() -> bool {
    true
}
fn default_startup_delay() -> u64 {
    2000
}
fn default_restart_delay() -> u64 {
    1000
}
fn default_manual_step_wait() -> u64 {
    5
}
fn default_installer_settle() -> u64 {
    10
}
fn default_quit_notice() -> u64 {
    2
}
fn default_install_timeout() -> u64 {
    1800 // 30 minutes
}
fn default_relaunch_args() -> Vec<String> {
    vec!["run".to_string()]
}

/// Display and output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DisplayConfig {
    /// Render download progress bars
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_progress: default_true(),
        }
    }
}
