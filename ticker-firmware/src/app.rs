//! Device bring-up
//!
//! Owns the configuration state together with the storage that mirrors it.

use log::{info, warn};
use ticker_core::{LocalMessages, SettingsRegistry};
use ticker_hal::FileSystem;

use crate::config::BootConfig;
use crate::containers::{register_containers, ALL_SETTINGS, DEVICE_SETTINGS};
use crate::state::DeviceState;
use crate::ticker::{self, FeedSource};
use crate::web;

/// Size of one local message record, delimiter included
pub const LOCAL_MESSAGE_SIZE: usize = 150;

/// Running device
pub struct Ticker<F: FileSystem> {
    pub state: DeviceState,
    pub settings: SettingsRegistry<DeviceState, F>,
    pub messages: LocalMessages<F, LOCAL_MESSAGE_SIZE>,
}

impl<F: FileSystem + Clone> Ticker<F> {
    /// Register the settings containers and load them from the volume
    ///
    /// Missing settings files leave the compiled-in defaults in place. A
    /// device without a hostname gets the configured default, which is
    /// saved right away.
    pub fn boot(fs: F, config: &BootConfig) -> Self {
        let mut settings = register_containers(fs.clone());
        let mut state = DeviceState::default();

        for key in ALL_SETTINGS {
            settings.read_setting_fields(key, &mut state);
        }

        if state.device.hostname.is_empty() {
            info!(
                "No hostname stored, using default [{}]",
                config.default_hostname
            );
            state.device.hostname = config.default_hostname.clone();
            if !settings.write_setting_fields(DEVICE_SETTINGS, &mut state) {
                warn!("Could not store default hostname");
            }
        }

        let messages = LocalMessages::new(fs, &config.local_messages);
        info!("Booted as [{}]", state.device.hostname);

        Self {
            state,
            settings,
            messages,
        }
    }
}

impl<F: FileSystem> Ticker<F> {
    /// Settings form of a container as JSON (empty for an unknown key)
    pub fn settings_json(&self, key: &str) -> String {
        self.settings.build_json_fields_string(key, &self.state)
    }

    /// Handle a settings submission from the UI
    pub fn process_settings(&mut self, json: &str, key: &str) -> Vec<String> {
        web::process_settings(&mut self.settings, &mut self.state, json, key)
    }

    /// Handle an edited local message list from the UI
    pub fn process_local_messages(&mut self, json: &str) -> Option<String> {
        web::process_local_messages(&mut self.messages, json)
    }

    /// Local message list payload for the UI
    pub fn local_messages_json(&mut self) -> Option<String> {
        web::local_messages_payload(&mut self.messages)
    }

    /// Next message for the display, placeholders expanded
    pub fn next_message(&mut self, feeds: &mut impl FeedSource) -> String {
        ticker::next_message(&mut self.messages, feeds)
    }
}
