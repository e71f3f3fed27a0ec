//! Ticker Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the ticker firmware
//! is written against. Board crates implement them for a concrete volume
//! (LittleFS on the device, a host directory or RAM during development),
//! so the persistence code in `ticker-core` never touches a platform API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (ticker-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ticker-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ ticker-hal-   │       │  device board │
//! │ host (std/RAM)│       │   (LittleFS)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`fs::FileSystem`] - Path-addressed volume (open/remove/rename)
//! - [`fs::FileHandle`] - Byte-addressable open file (seek/read/write)

#![no_std]
#![deny(unsafe_code)]

pub mod fs;

// Re-export key traits at crate root for convenience
pub use fs::{FileHandle, FileSystem, FsError, OpenMode};
