//! Type definitions for toJot configuration

mod updater_config;

pub use updater_config::*;
