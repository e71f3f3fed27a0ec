//! Fixed-slot record storage
//!
//! Short user-entered messages are stored in a flat file of equally sized
//! slots, so a record can be read or replaced by index without parsing the
//! rest of the file.

pub mod messages;
pub mod record;

pub use messages::LocalMessages;
pub use record::{RecordError, RecordStore, DELIMITER, MAX_RECORDS};
