//! Confirmation dialog collaborator
//!
//! The update flows only ever ask yes/cancel questions and show info or error
//! notices. How they are rendered is up to the host.

use tracing::{error, info};

use crate::error::Result;

/// Button label the applier treats as an opt-out
pub const CANCEL_BUTTON: &str = "Cancel";

/// Button label offered to confirm an install
pub const INSTALL_BUTTON: &str = "Install";

/// Default acknowledgement button for notices
pub const OK_BUTTON: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Question,
    Info,
    Error,
}

/// Everything a host needs to render one dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub buttons: Vec<String>,
    pub default_button: Option<String>,
    pub cancel_button: Option<String>,
}

impl DialogRequest {
    /// Install/Cancel question with Install as the default
    pub fn confirm_install(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Question,
            title: title.into(),
            message: message.into(),
            buttons: vec![INSTALL_BUTTON.to_string(), CANCEL_BUTTON.to_string()],
            default_button: Some(INSTALL_BUTTON.to_string()),
            cancel_button: Some(CANCEL_BUTTON.to_string()),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::notice(DialogKind::Info, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::notice(DialogKind::Error, title, message)
    }

    fn notice(kind: DialogKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            buttons: vec![OK_BUTTON.to_string()],
            default_button: Some(OK_BUTTON.to_string()),
            cancel_button: None,
        }
    }

    /// Whether `selection` is this dialog's cancel choice
    pub fn is_cancel(&self, selection: &str) -> bool {
        match &self.cancel_button {
            Some(cancel) => selection == cancel,
            None => false,
        }
    }
}

/// Presents a dialog and returns the label of the selected button
pub trait Dialog: Send + Sync {
    fn show(&self, request: &DialogRequest) -> Result<String>;
}

/// Non-interactive dialog that always picks the default button
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Dialog for AutoConfirm {
    fn show(&self, request: &DialogRequest) -> Result<String> {
        match request.kind {
            DialogKind::Error => error!("{}: {}", request.title, request.message),
            _ => info!("{}: {}", request.title, request.message),
        }

        Ok(request
            .default_button
            .clone()
            .or_else(|| request.buttons.first().cloned())
            .unwrap_or_else(|| OK_BUTTON.to_string()))
    }
}
