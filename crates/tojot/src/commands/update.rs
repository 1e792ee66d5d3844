//! Update command

use anyhow::{anyhow, Result};
use camino::Utf8Path;
use std::io::Write;
use std::sync::Arc;
use tojot_update::{AutoConfirm, Dialog, InstallReport};

use super::{build_updater, load_config};
use crate::cli::{UpdateCheckArgs, UpdateCommands, UpdateInstallArgs};
use crate::output;
use crate::prompt::{ProcessLifecycle, TerminalDialog};

pub async fn run(command: UpdateCommands, config_dir: Option<&Utf8Path>, quiet: bool) -> Result<()> {
    let mut config = load_config(config_dir)?;
    if quiet {
        config.display.show_progress = false;
    }

    match command {
        UpdateCommands::Check(args) => check(&config, args).await,
        UpdateCommands::Download => download(&config).await,
        UpdateCommands::Install(args) => install(&config, args).await,
    }
}

async fn check(config: &tojot_core::UpdaterConfig, args: UpdateCheckArgs) -> Result<()> {
    let updater = build_updater(
        config,
        Arc::new(AutoConfirm),
        Arc::new(ProcessLifecycle::default()),
    )?;

    let spinner = output::spinner("Checking for updates...");
    let result = updater.check_for_updates().await;
    spinner.finish_and_clear();

    let check = match result {
        Ok(check) => check,
        Err(e) => {
            output::error(&format!("Error checking for updates: {}", e));
            return Err(anyhow!("update check failed"));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else if check.available {
        output::success(&check.summary());
        output::info("Run 'tojot update install' to install the update");
    } else {
        output::info(&check.summary());
    }

    Ok(())
}

async fn download(config: &tojot_core::UpdaterConfig) -> Result<()> {
    let updater = build_updater(
        config,
        Arc::new(AutoConfirm),
        Arc::new(ProcessLifecycle::default()),
    )?;

    let artifact = updater.download_update().await?;

    output::success(&format!("Downloaded {}", artifact.info.asset_name));
    output::kv("Version", &artifact.info.version);
    output::kv("Type", &artifact.info.classification.to_string());
    output::kv("Path", &artifact.path.display().to_string());
    output::kv("Size", &format!("{} bytes", artifact.size));
    output::kv("SHA256", &artifact.sha256);

    Ok(())
}

async fn install(config: &tojot_core::UpdaterConfig, args: UpdateInstallArgs) -> Result<()> {
    let dialog: Arc<dyn Dialog> = if args.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(TerminalDialog)
    };
    let lifecycle = Arc::new(ProcessLifecycle::default());
    let updater = build_updater(config, dialog, lifecycle.clone())?;

    let (message, handle) = match updater.download_and_install().await {
        Ok(started) => started,
        Err(message) => {
            output::error(&message);
            return Err(anyhow!("update failed"));
        }
    };

    let Some(handle) = handle else {
        output::warning(&message);
        return Ok(());
    };

    output::info(&message);
    match handle.wait().await {
        Ok(InstallReport::Restarting) => output::success("Update installed, restarting"),
        Ok(InstallReport::AwaitingManualStep) => {
            output::info("Finish the installation in the window that opened")
        }
        Err(e) => {
            output::error(&format!("Error applying update: {}", e));
            return Err(anyhow!("update failed"));
        }
    }

    if lifecycle.exit_requested() {
        let _ = std::io::stdout().flush();
        std::process::exit(0);
    }

    Ok(())
}
