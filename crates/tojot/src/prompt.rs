//! Terminal implementations of the updater's dialog and lifecycle seams

use dialoguer::Select;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::{Handle, RuntimeFlavor};
use tojot_update::{AppLifecycle, Dialog, DialogKind, DialogRequest, UpdateError};

use crate::output;

/// Renders questions as a selection list and notices as plain output
pub struct TerminalDialog;

impl Dialog for TerminalDialog {
    fn show(&self, request: &DialogRequest) -> tojot_update::Result<String> {
        match request.kind {
            DialogKind::Question => {
                let default = request
                    .default_button
                    .as_ref()
                    .and_then(|label| request.buttons.iter().position(|b| b == label))
                    .unwrap_or(0);

                let selection = off_worker(|| {
                    Select::new()
                        .with_prompt(format!("{}: {}", request.title, request.message))
                        .items(&request.buttons)
                        .default(default)
                        .interact_opt()
                })
                .map_err(|e| UpdateError::dialog(e.to_string()))?;

                // Escape counts as the cancel choice
                match selection {
                    Some(index) => Ok(request.buttons.get(index).cloned().unwrap_or_default()),
                    None => Ok(request.cancel_button.clone().unwrap_or_default()),
                }
            }
            DialogKind::Info => {
                output::info(&format!("{}: {}", request.title, request.message));
                Ok(request.default_button.clone().unwrap_or_default())
            }
            DialogKind::Error => {
                output::error(&format!("{}: {}", request.title, request.message));
                Ok(request.default_button.clone().unwrap_or_default())
            }
        }
    }
}

/// Run a blocking terminal interaction without stalling a runtime worker.
///
/// `block_in_place` is only available on the multi-threaded runtime; anywhere
/// else the closure runs directly.
fn off_worker<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Records exit requests; the command decides when to actually exit
#[derive(Debug, Default)]
pub struct ProcessLifecycle {
    exit_requested: AtomicBool,
}

impl ProcessLifecycle {
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }
}

impl AppLifecycle for ProcessLifecycle {
    fn request_exit(&self) {
        tracing::debug!("Exit requested by updater");
        self.exit_requested.store(true, Ordering::SeqCst);
    }
}
