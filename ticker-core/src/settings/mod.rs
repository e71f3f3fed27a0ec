//! Settings registry
//!
//! Configuration is described, not hard-coded: each setting is a
//! [`FieldDescriptor`] bound to a field of the application's state, grouped
//! into a [`SettingsContainer`] per settings file, and the
//! [`SettingsRegistry`] performs file and JSON operations on any container
//! by key.
//!
//! ```text
//!  SettingsRegistry ── "deviceSettings" ──► SettingsContainer (/settings.ini)
//!                                              ├─ hostname    Text   ─► state.device.hostname
//!                                              └─ tickerSpeed Number ─► state.device.ticker_speed
//! ```

pub mod container;
pub mod field;
pub mod parse;
pub mod registry;

pub use container::SettingsContainer;
pub use field::{FieldDescriptor, FieldKind, Lens};
pub use parse::{parse_bool, parse_int};
pub use registry::{SettingsError, SettingsRegistry, TEMP_SUFFIX};
