//! Web UI message handlers
//!
//! The UI talks JSON over a WebSocket. These handlers take the payload of
//! one incoming message, update state and storage, and return the JSON
//! messages to send back. The socket itself is outside this crate.

pub mod local;
pub mod settings;

pub use local::{local_messages_payload, process_local_messages};
pub use settings::process_settings;
