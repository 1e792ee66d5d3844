//! Common test infrastructure for tojot-update tests
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Release identity, versions and asset names
//! - `builders`: Release payload builder, artifact and config helpers
//! - `mock_server`: Wiremock setup for the releases API and downloads
//! - `fakes`: Recording implementations of the dialog, system and lifecycle seams

// Each test binary uses a different subset of the helpers
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod constants;
pub mod fakes;
pub mod mock_server;

pub use builders::*;
pub use constants::*;
pub use fakes::*;
pub use mock_server::*;

/// Route tracing output through the test harness; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tojot_update=debug")
        .with_test_writer()
        .try_init();
}
