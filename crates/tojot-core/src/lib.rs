//! # tojot-core
//!
//! Core library for toJot providing:
//! - Updater configuration types (release source, network, timings)
//! - Hierarchical configuration loading (embedded defaults, user file, environment)
//! - The shared configuration error type

pub mod config;
pub mod error;
pub mod types;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::UpdaterConfig;
