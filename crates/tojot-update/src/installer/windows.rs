use async_trait::async_trait;
use tracing::{info, warn};

use super::{path_arg, InstallContext, InstallReport, PlatformInstaller};
use crate::dialog::DialogRequest;
use crate::download::DownloadedArtifact;
use crate::error::{Result, UpdateError};

const RESTART_FAILED: &str =
    "Could not restart the application automatically. Please restart it manually.";

/// MSI packages and setup executables
pub struct WindowsInstaller;

impl WindowsInstaller {
    fn command_for(artifact: &DownloadedArtifact) -> (String, Vec<String>) {
        let path = path_arg(&artifact.path);
        if artifact.file_name_lower().ends_with(".msi") {
            (
                "msiexec".to_string(),
                vec!["/i".to_string(), path, "/quiet".to_string()],
            )
        } else {
            (path, Vec::new())
        }
    }
}

#[async_trait]
impl PlatformInstaller for WindowsInstaller {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn prepare(&self, artifact: &DownloadedArtifact) -> Result<DialogRequest> {
        let name = artifact.file_name_lower();
        if !(name.ends_with(".msi") || name.ends_with(".exe")) {
            return Err(UpdateError::unsupported(format!(
                "unsupported file format for Windows: {}",
                artifact.info.asset_name
            )));
        }

        Ok(DialogRequest::info(
            "Update Instructions",
            "The update will now install. Please follow the installation instructions. The application will restart automatically after installation.",
        ))
    }

    async fn install(
        &self,
        artifact: &DownloadedArtifact,
        ctx: &InstallContext,
    ) -> Result<InstallReport> {
        let (program, args) = Self::command_for(artifact);

        if let Err(e) = ctx.system.run(&program, &args).await {
            ctx.notify(DialogRequest::error(
                "Update Failed",
                format!("Failed to run installer: {}", e),
            ));
            return Err(e);
        }

        info!("Installer for {} finished", artifact.info.version);
        ctx.pause(ctx.timings.installer_settle()).await;

        ctx.notify(DialogRequest::info(
            "Update Complete",
            "The update has been installed. The application will now restart.",
        ));
        ctx.pause(ctx.timings.quit_notice()).await;

        match ctx.system.current_exe() {
            Ok(exe) => {
                let relaunched = ctx.system.spawn_detached(&exe, &ctx.timings.relaunch_args);
                if let Err(e) = relaunched {
                    warn!("Error restarting: {}", e);
                    ctx.notify(DialogRequest::error("Restart Failed", RESTART_FAILED));
                }
            }
            Err(e) => {
                warn!("Error getting executable path: {}", e);
                ctx.notify(DialogRequest::error("Restart Failed", RESTART_FAILED));
            }
        }

        ctx.lifecycle.request_exit();
        Ok(InstallReport::Restarting)
    }
}
