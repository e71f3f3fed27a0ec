//! Boot configuration
//!
//! Loads `ticker.toml`, which tells the firmware where its volume lives and
//! which defaults to apply on first boot. Falls back to the embedded
//! default when no file is given.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;

/// Embedded default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../ticker.toml");

/// Boot configuration errors
#[derive(Debug)]
pub enum BootConfigError {
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid TOML or has unknown keys
    Parse(toml::de::Error),
    /// A value is out of range
    Invalid(&'static str),
}

impl fmt::Display for BootConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootConfigError::Io(e) => write!(f, "cannot read config: {}", e),
            BootConfigError::Parse(e) => write!(f, "invalid config: {}", e),
            BootConfigError::Invalid(what) => write!(f, "invalid config: {}", what),
        }
    }
}

impl std::error::Error for BootConfigError {}

impl From<std::io::Error> for BootConfigError {
    fn from(e: std::io::Error) -> Self {
        BootConfigError::Io(e)
    }
}

impl From<toml::de::Error> for BootConfigError {
    fn from(e: toml::de::Error) -> Self {
        BootConfigError::Parse(e)
    }
}

/// Boot configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootConfig {
    /// Host directory backing the volume
    pub data_dir: PathBuf,
    /// Hostname stored when the device has none
    pub default_hostname: String,
    /// Volume path of the local messages file
    #[serde(default = "default_local_messages")]
    pub local_messages: String,
}

fn default_local_messages() -> String {
    String::from("/localMessages.txt")
}

impl BootConfig {
    /// Parse and validate a configuration
    pub fn parse(text: &str) -> Result<Self, BootConfigError> {
        let config: BootConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded default configuration
    pub fn embedded() -> Result<Self, BootConfigError> {
        Self::parse(DEFAULT_CONFIG)
    }

    fn validate(&self) -> Result<(), BootConfigError> {
        if self.default_hostname.trim().is_empty() {
            return Err(BootConfigError::Invalid("default_hostname is empty"));
        }
        if !self.local_messages.starts_with('/') || self.local_messages.len() < 2 {
            return Err(BootConfigError::Invalid(
                "local_messages must be an absolute volume path",
            ));
        }
        Ok(())
    }

    /// Resolve `data_dir` against the directory of the config file
    fn rebase(mut self, base: &Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        self
    }
}

/// Load the boot configuration
///
/// Without a path the embedded default is used. A relative `data_dir` is
/// taken relative to the config file.
pub fn load_boot_config(path: Option<&Path>) -> Result<BootConfig, BootConfigError> {
    let Some(path) = path else {
        info!("No config file given, using embedded defaults");
        return BootConfig::embedded();
    };

    match load_boot_config_inner(path) {
        Ok(config) => {
            info!("Loaded boot config from {}", path.display());
            debug!("{:?}", config);
            Ok(config)
        }
        Err(e) => {
            warn!("Failed to load boot config {}: {}", path.display(), e);
            Err(e)
        }
    }
}

/// Inner function that returns errors
fn load_boot_config_inner(path: &Path) -> Result<BootConfig, BootConfigError> {
    let text = std::fs::read_to_string(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(BootConfig::parse(&text)?.rebase(base))
}
