//! Confirm-then-install state machine
//!
//! ```text
//! Idle -> Confirming -> { Cancelled | Installing }
//!      -> { Restarting | AwaitingManualStep } -> Terminal
//! ```
//!
//! Confirmation happens on the caller's thread. The install itself runs on a
//! spawned tokio task whose completion is exposed through [`InstallHandle`].

use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tojot_core::types::UpdatesConfig;
use tracing::{debug, error, info};

use crate::dialog::{Dialog, DialogRequest};
use crate::download::DownloadedArtifact;
use crate::error::{Result, UpdateError};
use crate::installer::{installer_for, BinaryInstaller, InstallContext, PlatformInstaller};
use crate::platform::{HostOs, UpdateClassification};
use crate::system::{AppLifecycle, SystemOps};

pub use crate::installer::InstallReport;

const CONFIRM_MESSAGE: &str =
    "An update has been downloaded. The application will restart to install it. Continue?";

/// Phase of a single apply invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyState {
    Idle,
    Confirming,
    Cancelled,
    Installing,
    Restarting,
    AwaitingManualStep,
    Terminal,
}

impl ApplyState {
    /// Whether moving from `self` to `next` is a legal step
    pub fn can_transition_to(self, next: ApplyState) -> bool {
        use ApplyState::*;
        matches!(
            (self, next),
            (Idle, Confirming)
                | (Idle, Terminal)
                | (Confirming, Cancelled)
                | (Confirming, Installing)
                | (Confirming, Terminal)
                | (Cancelled, Terminal)
                | (Installing, Restarting)
                | (Installing, AwaitingManualStep)
                | (Installing, Terminal)
                | (Restarting, Terminal)
                | (AwaitingManualStep, Terminal)
        )
    }
}

impl fmt::Display for ApplyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Confirming => "confirming",
            Self::Cancelled => "cancelled",
            Self::Installing => "installing",
            Self::Restarting => "restarting",
            Self::AwaitingManualStep => "awaiting manual step",
            Self::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

/// Shared, logged state cell for one invocation
#[derive(Debug, Clone)]
struct StateTracker {
    state: Arc<Mutex<ApplyState>>,
}

impl StateTracker {
    fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ApplyState::Idle)),
        }
    }

    fn get(&self) -> ApplyState {
        match self.state.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn advance(&self, next: ApplyState) {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !guard.can_transition_to(next) {
            error!("Unexpected update state transition {} -> {}", *guard, next);
        }
        debug!("Update state: {} -> {}", *guard, next);
        *guard = next;
    }
}

/// Completion handle for a spawned install
pub struct InstallHandle {
    tracker: StateTracker,
    task: JoinHandle<Result<InstallReport>>,
}

impl InstallHandle {
    /// Current phase of the install
    pub fn state(&self) -> ApplyState {
        self.tracker.get()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the install to reach a terminal state
    pub async fn wait(self) -> Result<InstallReport> {
        self.task
            .await
            .map_err(|e| UpdateError::install(format!("install task failed: {}", e)))?
    }
}

impl fmt::Debug for InstallHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallHandle")
            .field("state", &self.state())
            .finish()
    }
}

/// Result of [`UpdateApplier::apply`]
#[derive(Debug)]
pub enum ApplyOutcome {
    /// The user declined; the untouched artifact is handed back
    Cancelled(DownloadedArtifact),
    /// The install is running in the background
    Started(InstallHandle),
}

impl ApplyOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Confirms and installs downloaded artifacts
pub struct UpdateApplier {
    host: HostOs,
    binary: Arc<dyn PlatformInstaller>,
    packaged: Option<Arc<dyn PlatformInstaller>>,
    ctx: InstallContext,
}

impl UpdateApplier {
    pub fn new(
        host: HostOs,
        system: Arc<dyn SystemOps>,
        dialog: Arc<dyn Dialog>,
        lifecycle: Arc<dyn AppLifecycle>,
        timings: UpdatesConfig,
    ) -> Self {
        let packaged = installer_for(&host);
        if let Some(installer) = &packaged {
            debug!("Using {} installer for packaged updates", installer.name());
        }

        Self {
            host,
            binary: Arc::new(BinaryInstaller),
            packaged,
            ctx: InstallContext {
                system,
                dialog,
                lifecycle,
                timings,
            },
        }
    }

    pub fn host(&self) -> &HostOs {
        &self.host
    }

    fn installer_for(
        &self,
        classification: UpdateClassification,
    ) -> Result<Arc<dyn PlatformInstaller>> {
        if !self.host.is_supported() {
            return Err(UpdateError::unsupported(format!(
                "unsupported platform: {}",
                self.host
            )));
        }

        match classification {
            UpdateClassification::BinaryReplacement => Ok(Arc::clone(&self.binary)),
            UpdateClassification::PackagedInstaller => self
                .packaged
                .clone()
                .ok_or_else(|| UpdateError::unsupported(format!("unsupported platform: {}", self.host))),
        }
    }

    /// Ask for confirmation and, if given, start installing `artifact`.
    ///
    /// Must be called from within a tokio runtime. The artifact's directory is
    /// removed on failure and after a completed restart. It is kept when the
    /// user still has to run the installer by hand, and a cancelled artifact
    /// is returned as-is in [`ApplyOutcome::Cancelled`].
    pub fn apply(&self, artifact: DownloadedArtifact) -> Result<ApplyOutcome> {
        let tracker = StateTracker::new();

        let prepared = self
            .installer_for(artifact.info.classification)
            .and_then(|installer| installer.prepare(&artifact).map(|notice| (installer, notice)));
        let (installer, notice) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                tracker.advance(ApplyState::Terminal);
                artifact.cleanup();
                return Err(e);
            }
        };

        tracker.advance(ApplyState::Confirming);
        let request = DialogRequest::confirm_install("Update Ready", CONFIRM_MESSAGE);
        let selection = match self.ctx.dialog.show(&request) {
            Ok(selection) => selection,
            Err(e) => {
                tracker.advance(ApplyState::Terminal);
                artifact.cleanup();
                return Err(e);
            }
        };

        if request.is_cancel(&selection) {
            info!("Update to {} cancelled by user", artifact.info.version);
            tracker.advance(ApplyState::Cancelled);
            tracker.advance(ApplyState::Terminal);
            return Ok(ApplyOutcome::Cancelled(artifact));
        }

        tracker.advance(ApplyState::Installing);
        info!(
            "Installing {} with the {} installer",
            artifact.info.asset_name,
            installer.name()
        );
        self.ctx.notify(notice);

        let ctx = self.ctx.clone();
        let task_tracker = tracker.clone();
        let task = tokio::spawn(async move {
            let result = installer.install(&artifact, &ctx).await;

            match &result {
                Ok(InstallReport::Restarting) => {
                    task_tracker.advance(ApplyState::Restarting);
                    artifact.cleanup();
                }
                Ok(InstallReport::AwaitingManualStep) => {
                    task_tracker.advance(ApplyState::AwaitingManualStep);
                    info!("Installer left at {:?}", artifact.path);
                }
                Err(e) => {
                    error!("Update install failed: {}", e);
                    artifact.cleanup();
                }
            }
            task_tracker.advance(ApplyState::Terminal);

            result
        });

        Ok(ApplyOutcome::Started(InstallHandle { tracker, task }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(ApplyState::Idle.can_transition_to(ApplyState::Confirming));
        assert!(ApplyState::Confirming.can_transition_to(ApplyState::Cancelled));
        assert!(ApplyState::Installing.can_transition_to(ApplyState::AwaitingManualStep));
        assert!(ApplyState::Restarting.can_transition_to(ApplyState::Terminal));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!ApplyState::Idle.can_transition_to(ApplyState::Installing));
        assert!(!ApplyState::Cancelled.can_transition_to(ApplyState::Installing));
        assert!(!ApplyState::Terminal.can_transition_to(ApplyState::Idle));
    }

    #[test]
    fn test_tracker_follows_advances() {
        let tracker = StateTracker::new();
        assert_eq!(tracker.get(), ApplyState::Idle);
        tracker.advance(ApplyState::Confirming);
        tracker.advance(ApplyState::Cancelled);
        assert_eq!(tracker.get(), ApplyState::Cancelled);
    }
}
