//! CLI command implementations

pub mod run;
pub mod update;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::sync::Arc;
use tojot_core::config::HierarchicalConfigLoader;
use tojot_core::UpdaterConfig;
use tojot_update::{resolve_current_version, AppLifecycle, Dialog, Updater};

/// Load updater configuration from `config_dir` or the default location
pub(crate) fn load_config(config_dir: Option<&Utf8Path>) -> Result<UpdaterConfig> {
    let loader = match config_dir {
        Some(dir) => HierarchicalConfigLoader::with_dir(dir.to_path_buf()),
        None => HierarchicalConfigLoader::new().context("Failed to create config loader")?,
    };

    loader.load().context("Failed to load updater configuration")
}

/// Build an updater for the running binary
pub(crate) fn build_updater(
    config: &UpdaterConfig,
    dialog: Arc<dyn Dialog>,
    lifecycle: Arc<dyn AppLifecycle>,
) -> Result<Updater> {
    let current = resolve_current_version(env!("CARGO_PKG_VERSION"));
    Updater::from_config(config, current, dialog, lifecycle).context("Failed to initialize updater")
}
