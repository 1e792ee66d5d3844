//! Run command: application startup with the deferred update check

use anyhow::Result;
use camino::Utf8Path;
use std::sync::Arc;
use tojot_update::{schedule_startup_check, AutoConfirm};

use super::{build_updater, load_config};
use crate::output;
use crate::prompt::ProcessLifecycle;

pub async fn run(config_dir: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_dir)?;

    if !config.updates.check_on_startup {
        output::info("Startup update check is disabled");
        return Ok(());
    }

    let updater = Arc::new(build_updater(
        &config,
        Arc::new(AutoConfirm),
        Arc::new(ProcessLifecycle::default()),
    )?);

    let pending = schedule_startup_check(updater, config.updates.startup_delay());
    output::info("toJot started");

    let summary = pending.await?;
    output::info(&summary);

    Ok(())
}
