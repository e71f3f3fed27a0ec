//! Host HAL for the ticker firmware
//!
//! This crate provides std implementations of the shared `ticker-hal`
//! traits, used when running the firmware on a development machine and in
//! tests:
//!
//! - Directory-backed volume (implements `ticker_hal::FileSystem`)
//! - RAM volume with fault injection for exercising error paths

pub mod ram_fs;
pub mod std_fs;

pub use ram_fs::{RamFile, RamFileSystem};
pub use std_fs::{StdFile, StdFileSystem};

// Re-export shared traits from ticker-hal for convenience
pub use ticker_hal::{FileHandle, FileSystem, FsError, OpenMode};
