use async_trait::async_trait;
use tracing::info;

use super::{path_arg, InstallContext, InstallReport, PlatformInstaller};
use crate::dialog::DialogRequest;
use crate::download::DownloadedArtifact;
use crate::error::{Result, UpdateError};

/// Disk images and installer packages, opened with Finder's default handler
pub struct DarwinInstaller;

#[async_trait]
impl PlatformInstaller for DarwinInstaller {
    fn name(&self) -> &'static str {
        "darwin"
    }

    fn prepare(&self, artifact: &DownloadedArtifact) -> Result<DialogRequest> {
        let name = artifact.file_name_lower();
        let message = if name.ends_with(".dmg") {
            "The update will now open. Please follow the installation instructions and restart the application."
        } else if name.ends_with(".pkg") {
            "The update will now install. Please follow the installation instructions and restart the application."
        } else {
            return Err(UpdateError::unsupported(format!(
                "unsupported file format for macOS: {}",
                artifact.info.asset_name
            )));
        };

        Ok(DialogRequest::info("Update Instructions", message))
    }

    async fn install(
        &self,
        artifact: &DownloadedArtifact,
        ctx: &InstallContext,
    ) -> Result<InstallReport> {
        if let Err(e) = ctx.system.run("open", &[path_arg(&artifact.path)]).await {
            ctx.notify(DialogRequest::error(
                "Update Failed",
                format!("Failed to open update: {}", e),
            ));
            return Err(e);
        }

        info!("Opened {}; waiting for the user to install it", artifact.info.asset_name);
        ctx.pause(ctx.timings.manual_step_wait()).await;

        ctx.notify(DialogRequest::info(
            "Update Complete",
            "The application will now quit. Please restart it after installation.",
        ));
        ctx.pause(ctx.timings.quit_notice()).await;

        ctx.lifecycle.request_exit();
        Ok(InstallReport::AwaitingManualStep)
    }
}
