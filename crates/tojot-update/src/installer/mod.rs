//! Platform installers
//!
//! One [`PlatformInstaller`] per supported OS handles packaged artifacts;
//! [`BinaryInstaller`] handles raw executables on every supported OS.
//! Installers are picked once, when the applier is built.

mod binary;
mod darwin;
mod linux;
mod windows;

pub use binary::BinaryInstaller;
pub use darwin::DarwinInstaller;
pub use linux::LinuxInstaller;
pub use windows::WindowsInstaller;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tojot_core::types::UpdatesConfig;
use tracing::warn;

use crate::dialog::{Dialog, DialogRequest};
use crate::download::DownloadedArtifact;
use crate::error::Result;
use crate::platform::HostOs;
use crate::system::{AppLifecycle, SystemOps};

/// Terminal result of a successful install
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallReport {
    /// A new instance was launched and exit was requested
    Restarting,
    /// The user has to finish the install by hand
    AwaitingManualStep,
}

/// Collaborators shared by every install flow
#[derive(Clone)]
pub struct InstallContext {
    pub system: Arc<dyn SystemOps>,
    pub dialog: Arc<dyn Dialog>,
    pub lifecycle: Arc<dyn AppLifecycle>,
    pub timings: UpdatesConfig,
}

impl InstallContext {
    /// Show a notice; a dialog failure never aborts an install
    pub(crate) fn notify(&self, request: DialogRequest) {
        if let Err(e) = self.dialog.show(&request) {
            warn!("Could not show '{}' dialog: {}", request.title, e);
        }
    }

    pub(crate) async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[async_trait]
pub trait PlatformInstaller: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Validate the artifact and return the notice shown before installing.
    ///
    /// Called before the user is asked to confirm, so an artifact that can
    /// never be installed fails with `UnsupportedArtifact` up front.
    fn prepare(&self, artifact: &DownloadedArtifact) -> Result<DialogRequest>;

    /// Run the install flow to completion
    async fn install(
        &self,
        artifact: &DownloadedArtifact,
        ctx: &InstallContext,
    ) -> Result<InstallReport>;
}

/// Packaged-installer implementation for `host`, if the host is supported
pub fn installer_for(host: &HostOs) -> Option<Arc<dyn PlatformInstaller>> {
    match host {
        HostOs::Darwin => Some(Arc::new(DarwinInstaller)),
        HostOs::Windows => Some(Arc::new(WindowsInstaller)),
        HostOs::Linux => Some(Arc::new(LinuxInstaller)),
        HostOs::Other(_) => None,
    }
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
