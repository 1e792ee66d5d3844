//! Process and executable-image operations used by the installers
//!
//! Installers never touch `std::process` or the running image directly; they
//! go through [`SystemOps`] so the install flows can be driven by a recording
//! fake in tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{Result, UpdateError};

/// Requests termination of the running application
pub trait AppLifecycle: Send + Sync {
    fn request_exit(&self);
}

/// OS-level actions needed by the install flows
#[async_trait]
pub trait SystemOps: Send + Sync {
    /// Path of the running executable
    fn current_exe(&self) -> Result<PathBuf>;

    /// Swap the running executable for `new_image`; takes effect on next launch
    fn replace_executable(&self, new_image: &Path) -> Result<()>;

    /// Run `program` to completion; a non-zero exit status is an error
    async fn run(&self, program: &str, args: &[String]) -> Result<()>;

    /// Start `program` without waiting for it
    fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<()>;
}

/// Real implementation backed by `tokio::process` and `self-replace`
pub struct HostSystem {
    /// Upper bound for `run`
    timeout: Duration,
}

impl HostSystem {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl SystemOps for HostSystem {
    fn current_exe(&self) -> Result<PathBuf> {
        std::env::current_exe().map_err(|e| UpdateError::filesystem("<current executable>", e))
    }

    fn replace_executable(&self, new_image: &Path) -> Result<()> {
        info!("Replacing running executable with {:?}", new_image);
        self_replace::self_replace(new_image)
            .map_err(|e| UpdateError::install(format!("Failed to apply update: {}", e)))
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<()> {
        debug!("Running: {} {}", program, args.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| UpdateError::install(format!("Failed to start {}: {}", program, e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                UpdateError::install(format!(
                    "{} did not finish within {}s",
                    program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| UpdateError::install(format!("Failed to wait for {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("{} exited with {}: {}", program, output.status, stderr.trim());
            return Err(UpdateError::install(format!(
                "{} exited with {}",
                program, output.status
            )));
        }

        Ok(())
    }

    fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<()> {
        debug!("Spawning detached: {:?}", program);

        let mut cmd = std::process::Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        cmd.spawn()
            .map(|_| ())
            .map_err(|e| UpdateError::install(format!("Failed to start {:?}: {}", program, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_exit_status() {
        let system = HostSystem::new(Duration::from_secs(10));

        system.run("true", &[]).await.unwrap();

        let err = system.run("false", &[]).await.unwrap_err();
        assert!(matches!(err, UpdateError::Install { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let system = HostSystem::new(Duration::from_millis(100));

        let err = system
            .run("sleep", &["5".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("did not finish"));
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let system = HostSystem::new(Duration::from_secs(1));
        let err = system
            .run("tojot-definitely-not-a-real-program", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }

    #[test]
    fn test_current_exe_exists() {
        let system = HostSystem::new(Duration::from_secs(1));
        assert!(system.current_exe().unwrap().exists());
    }
}
