//! Self-update functionality for toJot
//!
//! Provides:
//! - Semantic version comparison against the latest published release
//! - Host platform matching and binary/package classification of release assets
//! - Release lookup against the GitHub releases API
//! - Streamed artifact download into a fresh temporary directory
//! - A confirm-then-install state machine with one installer per OS
//! - The `Updater` façade exposing check, download and apply

pub mod applier;
pub mod dialog;
pub mod download;
pub mod error;
pub mod installer;
pub mod platform;
pub mod releases;
pub mod scheduler;
pub mod system;
pub mod updater;
pub mod version;

pub use applier::{ApplyOutcome, ApplyState, InstallHandle, InstallReport, UpdateApplier};
pub use dialog::{AutoConfirm, Dialog, DialogKind, DialogRequest};
pub use download::{ArtifactFetcher, DownloadedArtifact};
pub use error::{Result, UpdateError};
pub use platform::{HostOs, UpdateClassification};
pub use releases::{Release, ReleaseAsset, ReleaseClient, ReleaseIdentity, UpdateInfo};
pub use scheduler::schedule_startup_check;
pub use system::{AppLifecycle, HostSystem, SystemOps};
pub use updater::{UpdateCheck, Updater};
pub use version::resolve_current_version;

/// Build-time version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
