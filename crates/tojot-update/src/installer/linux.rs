use async_trait::async_trait;
use tracing::info;

use super::{path_arg, InstallContext, InstallReport, PlatformInstaller};
use crate::dialog::DialogRequest;
use crate::download::DownloadedArtifact;
use crate::error::{Result, UpdateError};

const PASSWORD_NOTICE: &str = "The update will now install. You may be prompted for your password.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinuxPackage {
    Deb,
    Rpm,
    AppImage,
}

impl LinuxPackage {
    fn detect(artifact: &DownloadedArtifact) -> Option<Self> {
        let name = artifact.file_name_lower();
        if name.ends_with(".deb") {
            Some(Self::Deb)
        } else if name.ends_with(".rpm") {
            Some(Self::Rpm)
        } else if name.ends_with(".appimage") {
            Some(Self::AppImage)
        } else {
            None
        }
    }
}

/// Distribution packages and AppImages, handed to the desktop open handler
pub struct LinuxInstaller;

impl LinuxInstaller {
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
impl PlatformInstaller for LinuxInstaller {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn prepare(&self, artifact: &DownloadedArtifact) -> Result<DialogRequest> {
        let message = match LinuxPackage::detect(artifact) {
            Some(LinuxPackage::Deb | LinuxPackage::Rpm) => PASSWORD_NOTICE,
            Some(LinuxPackage::AppImage) => {
                "The update has been downloaded. The application will close and you can run the new version."
            }
            None => {
                return Err(UpdateError::unsupported(format!(
                    "unsupported file format for Linux: {}",
                    artifact.info.asset_name
                )))
            }
        };

        Ok(DialogRequest::info("Update Instructions", message))
    }

    async fn install(
        &self,
        artifact: &DownloadedArtifact,
        ctx: &InstallContext,
    ) -> Result<InstallReport> {
        let package = LinuxPackage::detect(artifact).ok_or_else(|| {
            UpdateError::unsupported(format!(
                "unsupported file format for Linux: {}",
                artifact.info.asset_name
            ))
        })?;

        let target = match package {
            LinuxPackage::Deb | LinuxPackage::Rpm => path_arg(&artifact.path),
            LinuxPackage::AppImage => {
                Self::make_executable(artifact)?;
                path_arg(&artifact.dir)
            }
        };

        ctx.system.run("xdg-open", &[target]).await?;
        info!("Handed {} to the desktop open handler", artifact.info.asset_name);

        Ok(InstallReport::AwaitingManualStep)
    }
}
