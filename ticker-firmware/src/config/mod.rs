//! Configuration loading
//!
//! Boot configuration comes from `ticker.toml` or the embedded defaults.
//! Runtime settings are handled by the settings registry (see
//! [`crate::containers`]).

pub mod boot;

pub use boot::{load_boot_config, BootConfig};
