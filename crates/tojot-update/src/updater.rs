//! Update orchestration
//!
//! [`Updater`] is the surface the host application talks to. The three
//! operations map one-to-one onto the buttons a UI would offer: check, download
//! and apply. The `*_summary` helpers turn results into the user-facing strings
//! the host renders as-is.

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tojot_core::types::UpdaterConfig;
use tracing::{debug, info};

use crate::applier::{ApplyOutcome, InstallHandle, UpdateApplier};
use crate::dialog::Dialog;
use crate::download::{ArtifactFetcher, DownloadedArtifact};
use crate::error::Result;
use crate::platform::HostOs;
use crate::releases::{ReleaseClient, ReleaseIdentity};
use crate::system::{AppLifecycle, HostSystem, SystemOps};
use crate::version;

/// Result of an update check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCheck {
    /// A newer release exists and ships an asset for this host
    pub available: bool,

    /// Latest published version, without the `v` prefix
    pub latest_version: String,

    /// Version the check compared against
    pub current_version: String,
}

impl UpdateCheck {
    /// User-facing one-line description
    pub fn summary(&self) -> String {
        if self.available {
            format!(
                "Update available! Version {} is available (current: {})",
                self.latest_version, self.current_version
            )
        } else {
            format!("You're running the latest version: {}", self.current_version)
        }
    }
}

/// Self-update manager for toJot
pub struct Updater {
    current_version: String,
    identity: ReleaseIdentity,
    releases: ReleaseClient,
    fetcher: ArtifactFetcher,
    applier: UpdateApplier,
}

impl Updater {
    pub fn new(
        current_version: impl Into<String>,
        identity: ReleaseIdentity,
        releases: ReleaseClient,
        fetcher: ArtifactFetcher,
        applier: UpdateApplier,
    ) -> Self {
        let current_version = current_version.into();
        debug!(
            "Updater initialized: version={}, source={}/{}",
            current_version, identity.owner, identity.repository
        );

        Self {
            current_version,
            identity,
            releases,
            fetcher,
            applier,
        }
    }

    /// Build an updater for the running host from loaded configuration
    pub fn from_config(
        config: &UpdaterConfig,
        current_version: impl Into<String>,
        dialog: Arc<dyn Dialog>,
        lifecycle: Arc<dyn AppLifecycle>,
    ) -> Result<Self> {
        let system = Arc::new(HostSystem::new(config.updates.install_timeout()));
        Self::from_config_with(
            config,
            current_version,
            HostOs::current(),
            system,
            dialog,
            lifecycle,
        )
    }

    /// Build an updater with an explicit host and system collaborator
    pub fn from_config_with(
        config: &UpdaterConfig,
        current_version: impl Into<String>,
        host: HostOs,
        system: Arc<dyn SystemOps>,
        dialog: Arc<dyn Dialog>,
        lifecycle: Arc<dyn AppLifecycle>,
    ) -> Result<Self> {
        let releases =
            ReleaseClient::for_host(&config.release.api_url, &config.network, host.clone())?;
        let fetcher =
            ArtifactFetcher::new(&config.network)?.with_progress(config.display.show_progress);
        let applier = UpdateApplier::new(host, system, dialog, lifecycle, config.updates.clone());

        Ok(Self::new(
            current_version,
            ReleaseIdentity::from(&config.release),
            releases,
            fetcher,
            applier,
        ))
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    pub fn host(&self) -> &HostOs {
        self.releases.host()
    }

    /// Compare the running version against the latest published release
    pub async fn check_for_updates(&self) -> Result<UpdateCheck> {
        let release = self.releases.latest_release(&self.identity).await?;
        let latest_version = release.version().to_string();

        let newer = version::compare(&self.current_version, &latest_version)? == Ordering::Less;
        let has_asset = release.has_platform_asset(self.host());

        if newer && !has_asset {
            info!(
                "Version {} is published but has no asset for {}",
                latest_version,
                self.host()
            );
        }

        Ok(UpdateCheck {
            available: newer && has_asset,
            latest_version,
            current_version: self.current_version.clone(),
        })
    }

    /// Resolve and download the asset for this host
    pub async fn download_update(&self) -> Result<DownloadedArtifact> {
        let info = self.releases.resolve_update_info(&self.identity).await?;
        self.fetcher.fetch(&info).await
    }

    /// Confirm with the user and start installing `artifact`
    pub fn apply_update(&self, artifact: DownloadedArtifact) -> Result<ApplyOutcome> {
        self.applier.apply(artifact)
    }

    /// Check and describe the result in one line
    pub async fn check_summary(&self) -> String {
        match self.check_for_updates().await {
            Ok(check) => check.summary(),
            Err(e) => format!("Error checking for updates: {}", e),
        }
    }

    /// Download and apply.
    ///
    /// `Ok` carries the message to show and, unless the user cancelled, the
    /// running install. `Err` carries the failure message.
    pub async fn download_and_install(
        &self,
    ) -> std::result::Result<(String, Option<InstallHandle>), String> {
        let artifact = self
            .download_update()
            .await
            .map_err(|e| format!("Error downloading update: {}", e))?;

        match self.apply_update(artifact) {
            Ok(ApplyOutcome::Started(handle)) => Ok((
                "Update process initiated. Please follow any instructions that appear.".to_string(),
                Some(handle),
            )),
            Ok(ApplyOutcome::Cancelled(artifact)) => {
                debug!("Cancelled update left at {:?}", artifact.path);
                Ok(("Update cancelled.".to_string(), None))
            }
            Err(e) => Err(format!("Error applying update: {}", e)),
        }
    }
}
