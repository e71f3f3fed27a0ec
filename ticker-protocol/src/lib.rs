//! Web UI Communication Protocol
//!
//! This crate defines the JSON messages exchanged between the ticker
//! firmware and the single-page web UI over the WebSocket. The firmware
//! only produces and consumes the structures below; rendering them as HTML
//! is the UI's job.
//!
//! # Protocol Overview
//!
//! ```text
//!  firmware ──► UI   {"type":"update","target":<target>,"settingsName":..,"fields":[..]}
//!  firmware ──► UI   {"type":"update","target":"message","content":..}
//!  firmware ──► UI   {"type":"custom","action":"LocalMessagesData","data":"[..]"}
//!  UI ──► firmware   {"fields":[{"fieldName":..,"value":..}, ..]}
//!  UI ──► firmware   ["message", "message", null, ..]
//! ```
//!
//! The settings form is generic: each field carries its type tag and
//! constraints so the UI can render an input without knowing the setting.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod local;
pub mod messages;

pub use local::{decode_message_list, encode_message_list, LocalMessagesData};
pub use messages::{
    FieldEntry, FieldSubmission, FieldValue, SettingsSubmission, SettingsUpdate, StatusMessage,
};

/// Errors from encoding or decoding protocol messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Input is not valid JSON or does not match the message shape
    InvalidJson,
    /// Expected a JSON array at the top level
    NotAnArray,
    /// Serialization failed
    Encode,
}

impl From<serde_json::Error> for ProtocolError {
    fn from(_: serde_json::Error) -> Self {
        ProtocolError::InvalidJson
    }
}
