//! Builders for release payloads, downloaded artifacts and configuration

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tojot_core::types::{UpdaterConfig, UpdatesConfig};
use tojot_update::platform::UpdateClassification;
use tojot_update::{DownloadedArtifact, UpdateInfo};

use super::constants::*;

/// Builder for latest-release API payloads
#[derive(Debug, Clone)]
pub struct ReleaseBuilder {
    tag_name: String,
    prerelease: bool,
    assets: Vec<Value>,
}

impl ReleaseBuilder {
    pub fn new() -> Self {
        Self {
            tag_name: TAG_V1_10_0.to_string(),
            prerelease: false,
            assets: Vec::new(),
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag_name = tag.to_string();
        self
    }

    pub fn prerelease(mut self) -> Self {
        self.prerelease = true;
        self
    }

    /// Add an asset served from `base_url/download/{name}`
    pub fn asset(mut self, base_url: &str, name: &str, size: u64) -> Self {
        self.assets.push(json!({
            "name": name,
            "browser_download_url": format!("{}/download/{}", base_url, name),
            "size": size,
            "content_type": "application/octet-stream",
        }));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "tag_name": self.tag_name,
            "name": format!("toJot {}", self.tag_name),
            "draft": false,
            "prerelease": self.prerelease,
            "assets": self.assets,
        })
    }
}

impl Default for ReleaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Updater configuration pointing at `api_url` with every delay at zero
pub fn test_config(api_url: &str) -> UpdaterConfig {
    let mut config = UpdaterConfig::default();
    config.release.owner = OWNER.to_string();
    config.release.repository = REPO.to_string();
    config.release.api_url = api_url.to_string();
    config.network.http_timeout_secs = 5;
    config.network.download_timeout_secs = 5;
    config.updates = instant_timings();
    config.display.show_progress = false;
    config
}

pub fn instant_timings() -> UpdatesConfig {
    UpdatesConfig {
        check_on_startup: true,
        startup_delay_ms: 0,
        restart_delay_ms: 0,
        manual_step_wait_secs: 0,
        installer_settle_secs: 0,
        quit_notice_secs: 0,
        install_timeout_secs: 5,
        relaunch_args: vec!["run".to_string()],
    }
}

/// Write `name` into a fresh directory under `root` and describe it as downloaded
pub fn make_artifact(
    root: &Path,
    name: &str,
    classification: UpdateClassification,
) -> DownloadedArtifact {
    let dir = root.join(format!("tojot-update-{}", name.replace('.', "_")));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, ARTIFACT_CONTENT).unwrap();

    DownloadedArtifact {
        path,
        dir,
        info: UpdateInfo {
            classification,
            version: VERSION_1_10_0.to_string(),
            download_url: format!("https://example.com/{}", name),
            asset_name: name.to_string(),
        },
        size: ARTIFACT_CONTENT.len() as u64,
        sha256: String::new(),
    }
}
