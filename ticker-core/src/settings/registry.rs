//! Settings registry
//!
//! Maps container keys to containers and mirrors the bound values to their
//! settings files and to the UI's JSON forms. The registry holds no values
//! itself; every operation is handed the state it works on.
//!
//! Settings files are plain text, one `name=value` per line:
//!
//! ```text
//! hostname=ticker
//! tickerSpeed=25
//! onlyDuringDay=true
//! ```

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use ticker_hal::{FileHandle, FileSystem, FsError, OpenMode};

use super::container::SettingsContainer;

/// Suffix of the file a new settings file is written to before it replaces
/// the old one
pub const TEMP_SUFFIX: &str = ".tmp";

/// Read chunk size
const CHUNK_SIZE: usize = 128;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// No container registered under the key
    UnknownContainer,
    /// Opening a file failed
    Open(FsError),
    /// Reading the settings file failed
    Read(FsError),
    /// Writing or flushing the new settings file failed
    Write(FsError),
    /// Not all bytes reached the new settings file
    ShortWrite { written: usize, expected: usize },
    /// Replacing the old settings file failed
    Commit(FsError),
}

/// Registry of settings containers over the state `S`
pub struct SettingsRegistry<S, F: FileSystem> {
    fs: F,
    containers: BTreeMap<String, SettingsContainer<S>>,
}

impl<S, F: FileSystem> SettingsRegistry<S, F> {
    /// Create an empty registry persisting to `fs`
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            containers: BTreeMap::new(),
        }
    }

    /// Register a container under `key`
    ///
    /// A container already registered under the same key is replaced.
    pub fn register(&mut self, key: &str, container: SettingsContainer<S>) -> &mut Self {
        if self
            .containers
            .insert(String::from(key), container)
            .is_some()
        {
            log_warn!("register(): [{}] registered twice, last one kept", key);
        }
        self
    }

    /// Container registered under `key`
    pub fn container(&self, key: &str) -> Option<&SettingsContainer<S>> {
        self.containers.get(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }

    /// Key of the container with the given target identifier
    pub fn key_for_target(&self, target: &str) -> Option<&str> {
        self.containers
            .iter()
            .find(|(_, c)| c.target() == target)
            .map(|(key, _)| key.as_str())
    }

    fn lookup(&self, key: &str) -> Result<&SettingsContainer<S>, SettingsError> {
        self.containers
            .get(key)
            .ok_or(SettingsError::UnknownContainer)
    }

    /// Settings form of a container as JSON
    ///
    /// Returns an empty string for an unknown key.
    pub fn build_json_fields_string(&self, key: &str, state: &S) -> String {
        let Some(container) = self.containers.get(key) else {
            log_warn!("build_json_fields_string(): unknown container [{}]", key);
            return String::new();
        };

        match container.to_update(state).to_json() {
            Ok(json) => json,
            Err(e) => {
                log_error!("build_json_fields_string(): [{}] encode failed: {:?}", key, e);
                String::new()
            }
        }
    }

    /// Load a container's settings file into `state`
    ///
    /// Fields missing from the file keep their current values. Returns
    /// whether the file was read.
    pub fn read_setting_fields(&mut self, key: &str, state: &mut S) -> bool {
        match self.try_read_setting_fields(key, state) {
            Ok(applied) => {
                log_info!("read_setting_fields(): [{}] {} values", key, applied);
                true
            }
            Err(SettingsError::UnknownContainer) => {
                log_warn!("read_setting_fields(): unknown container [{}]", key);
                false
            }
            Err(SettingsError::Open(FsError::NotFound)) => {
                log_info!("read_setting_fields(): [{}] has no settings file yet", key);
                false
            }
            Err(e) => {
                log_warn!("read_setting_fields(): [{}] failed: {:?}", key, e);
                false
            }
        }
    }

    /// Load a container's settings file, reporting why it could not be read
    ///
    /// Returns the number of lines that set a field.
    pub fn try_read_setting_fields(
        &mut self,
        key: &str,
        state: &mut S,
    ) -> Result<usize, SettingsError> {
        let container = self
            .containers
            .get(key)
            .ok_or(SettingsError::UnknownContainer)?;
        let text = read_file(&mut self.fs, container.file())?;
        Ok(container.apply_text(state, &text))
    }

    /// Persist a container's current values
    ///
    /// Values are first clamped into their constraints (in `state` too). The
    /// file is replaced as a whole: the new contents go to a temporary file
    /// which is then renamed over the old one, so a failed write leaves the
    /// previous settings in place.
    pub fn write_setting_fields(&mut self, key: &str, state: &mut S) -> bool {
        match self.try_write_setting_fields(key, state) {
            Ok(()) => {
                log_info!("write_setting_fields(): [{}] saved", key);
                true
            }
            Err(SettingsError::UnknownContainer) => {
                log_warn!("write_setting_fields(): unknown container [{}]", key);
                false
            }
            Err(e) => {
                log_warn!("write_setting_fields(): [{}] failed: {:?}", key, e);
                false
            }
        }
    }

    /// Persist a container's current values, reporting why it failed
    pub fn try_write_setting_fields(&mut self, key: &str, state: &mut S) -> Result<(), SettingsError> {
        let container = self
            .containers
            .get(key)
            .ok_or(SettingsError::UnknownContainer)?;

        let changed = container.normalize(state);
        if changed > 0 {
            log_debug!("write_setting_fields(): [{}] {} values clamped", key, changed);
        }

        let text = container.render(state);
        let path = container.file();
        let temp = format!("{}{}", path, TEMP_SUFFIX);

        let result = write_file(&mut self.fs, &temp, text.as_bytes())
            .and_then(|()| self.fs.rename(&temp, path).map_err(SettingsError::Commit));
        if result.is_err() {
            // Old file is untouched; only the leftover needs to go
            let _ = self.fs.remove(&temp);
        }
        result
    }

    /// Persist the container with the given target identifier
    pub fn save_settings(&mut self, target: &str, state: &mut S) -> bool {
        let Some(key) = self.key_for_target(target).map(String::from) else {
            log_warn!("save_settings(): unknown target [{}]", target);
            return false;
        };
        self.write_setting_fields(&key, state)
    }

    /// Set one field from its textual form
    ///
    /// Uses the same conversion as reading a settings file. Constraints are
    /// applied on the next write. Returns false for an unknown container or
    /// field.
    pub fn apply_field_value(&self, key: &str, state: &mut S, field_name: &str, raw: &str) -> bool {
        let container = match self.lookup(key) {
            Ok(container) => container,
            Err(_) => {
                log_warn!("apply_field_value(): unknown container [{}]", key);
                return false;
            }
        };
        let Some(field) = container.field(field_name) else {
            log_warn!("apply_field_value(): [{}] has no field [{}]", key, field_name);
            return false;
        };

        log_debug!("apply_field_value(): [{}].[{}] = [{}]", key, field_name, raw);
        field.apply_text(state, raw);
        true
    }
}

/// Read a whole file as text
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
fn read_file<F: FileSystem>(fs: &mut F, path: &str) -> Result<String, SettingsError> {
    let mut file = fs.open(path, OpenMode::Read).map_err(SettingsError::Open)?;
    let mut bytes = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk).map_err(SettingsError::Read)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `data` to a new file at `path`
fn write_file<F: FileSystem>(fs: &mut F, path: &str, data: &[u8]) -> Result<(), SettingsError> {
    let mut file = fs
        .open(path, OpenMode::Truncate)
        .map_err(SettingsError::Open)?;
    let written = file.write_fully(data).map_err(SettingsError::Write)?;
    if written != data.len() {
        return Err(SettingsError::ShortWrite {
            written,
            expected: data.len(),
        });
    }
    file.flush().map_err(SettingsError::Write)
}
