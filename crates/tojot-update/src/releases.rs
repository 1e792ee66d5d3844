//! GitHub releases lookup and platform asset resolution

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tojot_core::types::{NetworkConfig, ReleaseConfig};
use tracing::{debug, info};

use crate::error::{Result, UpdateError};
use crate::platform::{self, HostOs, UpdateClassification};
use crate::version::strip_tag_prefix;

/// Upstream release source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseIdentity {
    pub owner: String,
    pub repository: String,
}

impl ReleaseIdentity {
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
        }
    }
}

impl From<&ReleaseConfig> for ReleaseIdentity {
    fn from(config: &ReleaseConfig) -> Self {
        Self::new(&config.owner, &config.repository)
    }
}

/// Release information
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v1.4.0")
    pub tag_name: String,

    /// Release name
    #[serde(default)]
    pub name: Option<String>,

    /// Whether this is a prerelease; surfaced like any other release
    #[serde(default)]
    pub prerelease: bool,

    /// Release assets, in API order
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Tag with any leading `v` removed
    pub fn version(&self) -> &str {
        strip_tag_prefix(&self.tag_name)
    }

    /// First asset (in API order) that matches `host`, with its classification
    pub fn platform_asset(&self, host: &HostOs) -> Option<(&ReleaseAsset, UpdateClassification)> {
        self.assets.iter().find_map(|asset| {
            platform::select(&asset.name, host).map(|classification| (asset, classification))
        })
    }

    pub fn has_platform_asset(&self, host: &HostOs) -> bool {
        self.platform_asset(host).is_some()
    }
}

/// Release asset
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset file name
    pub name: String,

    /// Download URL
    pub browser_download_url: String,

    /// Asset size in bytes
    #[serde(default)]
    pub size: u64,
}

/// Resolved, platform-matched update descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    pub classification: UpdateClassification,
    /// Version without the `v` prefix
    pub version: String,
    pub download_url: String,
    pub asset_name: String,
}

impl UpdateInfo {
    /// Pick the first asset of `release` suitable for `host`
    pub fn from_release(release: &Release, host: &HostOs) -> Result<Self> {
        let (asset, classification) =
            release
                .platform_asset(host)
                .ok_or_else(|| UpdateError::NoSuitableAsset {
                    host: host.to_string(),
                })?;

        debug!(
            "Selected asset {} for {} ({})",
            asset.name, host, classification
        );

        Ok(Self {
            classification,
            version: release.version().to_string(),
            download_url: asset.browser_download_url.clone(),
            asset_name: asset.name.clone(),
        })
    }
}

/// Client for the releases API
pub struct ReleaseClient {
    client: reqwest::Client,

    /// Base URL of the API, without trailing slash
    api_url: String,

    host: HostOs,
}

impl ReleaseClient {
    /// Create a client for the current host
    pub fn new(api_url: &str, network: &NetworkConfig) -> Result<Self> {
        Self::for_host(api_url, network, HostOs::current())
    }

    /// Create a client that resolves assets for an explicit host
    pub fn for_host(api_url: &str, network: &NetworkConfig, host: HostOs) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(network.http_timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            host,
        })
    }

    pub fn host(&self) -> &HostOs {
        &self.host
    }

    /// Fetch the single most recent published release
    pub async fn latest_release(&self, identity: &ReleaseIdentity) -> Result<Release> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, identity.owner, identity.repository
        );

        debug!("Fetching latest release from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpdateError::NotFound {
                owner: identity.owner.clone(),
                repository: identity.repository.clone(),
            });
        }

        if !status.is_success() {
            return Err(UpdateError::network(format!(
                "Failed to fetch release: {}",
                status
            )));
        }

        let release: Release = response.json().await?;
        info!(
            "Latest release is {} with {} assets",
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }

    /// Fetch the latest release and pick the asset for this host
    pub async fn resolve_update_info(&self, identity: &ReleaseIdentity) -> Result<UpdateInfo> {
        let release = self.latest_release(identity).await?;
        UpdateInfo::from_release(&release, &self.host)
    }
}
