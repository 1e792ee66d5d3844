//! Recording fakes for the collaborator traits

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tojot_update::dialog::CANCEL_BUTTON;
use tojot_update::{AppLifecycle, Dialog, DialogKind, DialogRequest, SystemOps, UpdateError};

/// One observed call on [`RecordingSystem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCall {
    Run { program: String, args: Vec<String> },
    SpawnDetached { program: PathBuf, args: Vec<String> },
    Replace { image: PathBuf },
}

/// System fake that records every call and never touches the host
pub struct RecordingSystem {
    exe: PathBuf,
    calls: Mutex<Vec<SystemCall>>,
    fail_run: AtomicBool,
    fail_replace: AtomicBool,
}

impl RecordingSystem {
    pub fn new() -> Self {
        Self {
            exe: PathBuf::from("/opt/tojot/tojot"),
            calls: Mutex::new(Vec::new()),
            fail_run: AtomicBool::new(false),
            fail_replace: AtomicBool::new(false),
        }
    }

    pub fn failing_run(self) -> Self {
        self.fail_run.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_replace(self) -> Self {
        self.fail_replace.store(true, Ordering::SeqCst);
        self
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    pub fn calls(&self) -> Vec<SystemCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: SystemCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for RecordingSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemOps for RecordingSystem {
    fn current_exe(&self) -> tojot_update::Result<PathBuf> {
        Ok(self.exe.clone())
    }

    fn replace_executable(&self, new_image: &Path) -> tojot_update::Result<()> {
        self.record(SystemCall::Replace {
            image: new_image.to_path_buf(),
        });
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(UpdateError::install("Failed to apply update: image rejected"));
        }
        Ok(())
    }

    async fn run(&self, program: &str, args: &[String]) -> tojot_update::Result<()> {
        self.record(SystemCall::Run {
            program: program.to_string(),
            args: args.to_vec(),
        });
        if self.fail_run.load(Ordering::SeqCst) {
            return Err(UpdateError::install(format!("{} exited with exit status: 1", program)));
        }
        Ok(())
    }

    fn spawn_detached(&self, program: &Path, args: &[String]) -> tojot_update::Result<()> {
        self.record(SystemCall::SpawnDetached {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });
        Ok(())
    }
}

/// Dialog fake answering every question with a fixed choice
pub struct ScriptedDialog {
    answer: String,
    shown: Mutex<Vec<DialogRequest>>,
}

impl ScriptedDialog {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn confirming() -> Self {
        Self::answering("Install")
    }

    pub fn cancelling() -> Self {
        Self::answering(CANCEL_BUTTON)
    }

    pub fn shown(&self) -> Vec<DialogRequest> {
        self.shown.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.shown().into_iter().map(|request| request.title).collect()
    }

    pub fn errors(&self) -> Vec<DialogRequest> {
        self.shown()
            .into_iter()
            .filter(|request| request.kind == DialogKind::Error)
            .collect()
    }
}

impl Dialog for ScriptedDialog {
    fn show(&self, request: &DialogRequest) -> tojot_update::Result<String> {
        self.shown.lock().unwrap().push(request.clone());
        match request.kind {
            DialogKind::Question => Ok(self.answer.clone()),
            _ => Ok("OK".to_string()),
        }
    }
}

/// Lifecycle fake that remembers whether exit was requested
#[derive(Default)]
pub struct RecordingLifecycle {
    exit_requested: AtomicBool,
}

impl RecordingLifecycle {
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }
}

impl AppLifecycle for RecordingLifecycle {
    fn request_exit(&self) {
        self.exit_requested.store(true, Ordering::SeqCst);
    }
}
