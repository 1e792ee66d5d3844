//! In-place replacement of the running executable

use async_trait::async_trait;
use std::fs::File;
use tracing::{info, warn};

use super::{InstallContext, InstallReport, PlatformInstaller};
use crate::dialog::DialogRequest;
use crate::download::DownloadedArtifact;
use crate::error::{Result, UpdateError};

/// Archive suffixes that look like binaries by name but cannot be swapped in
const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tgz", ".zip", ".tar.xz"];

pub struct BinaryInstaller;

impl BinaryInstaller {
    #[cfg(unix)]
    fn make_executable(artifact: &DownloadedArtifact) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&artifact.path, std::fs::Permissions::from_mode(0o755))
            .map_err(|e| UpdateError::filesystem(&artifact.path, e))
    }

    #[cfg(not(unix))]
    fn make_executable(_artifact: &DownloadedArtifact) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl PlatformInstaller for BinaryInstaller {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn prepare(&self, artifact: &DownloadedArtifact) -> Result<DialogRequest> {
        let name = artifact.file_name_lower();
        if ARCHIVE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            return Err(UpdateError::unsupported(format!(
                "{} is an archive, not an executable",
                artifact.info.asset_name
            )));
        }

        Ok(DialogRequest::info(
            "Update Ready",
            "The application will now update and restart automatically.",
        ))
    }

    async fn install(
        &self,
        artifact: &DownloadedArtifact,
        ctx: &InstallContext,
    ) -> Result<InstallReport> {
        // Let the restart notice render first
        ctx.pause(ctx.timings.restart_delay()).await;

        if let Err(e) = File::open(&artifact.path) {
            ctx.notify(DialogRequest::error(
                "Update Failed",
                format!("Failed to open update file: {}", e),
            ));
            return Err(UpdateError::filesystem(&artifact.path, e));
        }

        let swapped = Self::make_executable(artifact)
            .and_then(|_| ctx.system.replace_executable(&artifact.path));
        if let Err(e) = swapped {
            ctx.notify(DialogRequest::error(
                "Update Failed",
                format!("Failed to apply update: {}", e),
            ));
            return Err(e);
        }

        info!("Executable replaced with version {}", artifact.info.version);

        // The swap already happened; relaunch problems do not undo it
        match ctx.system.current_exe() {
            Ok(exe) => {
                let relaunched = ctx.system.spawn_detached(&exe, &ctx.timings.relaunch_args);
                if let Err(e) = relaunched {
                    warn!("Error restarting: {}", e);
                }
            }
            Err(e) => warn!("Error getting executable path: {}", e),
        }

        ctx.lifecycle.request_exit();
        Ok(InstallReport::Restarting)
    }
}
