//! Board-agnostic persistent state for the ticker firmware
//!
//! This crate contains the storage logic that does not depend on a
//! specific board or file system implementation:
//!
//! - Fixed-slot record store for user-entered messages
//! - Local message rotation on top of the record store
//! - Settings registry mapping named fields to live configuration values,
//!   mirrored to `name=value` files and the web UI's JSON forms
//! - Logging macros shared by the above

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod logging;

pub mod settings;
pub mod store;

pub use settings::{
    FieldDescriptor, FieldKind, Lens, SettingsContainer, SettingsError, SettingsRegistry,
};
pub use store::{LocalMessages, RecordError, RecordStore};
