//! Settings page handler

use log::{debug, info, warn};
use ticker_core::SettingsRegistry;
use ticker_hal::FileSystem;
use ticker_protocol::{SettingsSubmission, StatusMessage};

use crate::state::DeviceState;

/// Status shown after a successful save
pub const STATUS_SAVED: &str = "Settings saved successfully!";

/// Status shown when the settings file could not be written
pub const STATUS_SAVE_FAILED: &str = "Saving settings failed!";

/// Apply a settings submission and persist the container
///
/// Every submitted field that names a field of the container is applied;
/// entries without a name or a usable value are skipped. Returns the
/// messages for the UI: a status line followed by the refreshed form.
/// Nothing is returned for an unknown container or unparsable input.
pub fn process_settings<F: FileSystem>(
    registry: &mut SettingsRegistry<DeviceState, F>,
    state: &mut DeviceState,
    json: &str,
    key: &str,
) -> Vec<String> {
    if registry.container(key).is_none() {
        warn!("processSettings(): Unknown settings type: {}", key);
        return Vec::new();
    }

    let submission = match SettingsSubmission::from_json(json) {
        Ok(submission) => submission,
        Err(e) => {
            warn!("processSettings(): [{}] invalid submission: {:?}", key, e);
            return Vec::new();
        }
    };
    debug!(
        "processSettings(): [{}] {} fields submitted",
        key,
        submission.fields.len()
    );

    let mut applied = 0;
    for field in &submission.fields {
        let (Some(name), Some(value)) = (field.field_name.as_deref(), field.value_text()) else {
            debug!("processSettings(): field missing name or value, skipped");
            continue;
        };
        if registry.apply_field_value(key, state, name, &value) {
            applied += 1;
        }
    }

    let saved = registry.write_setting_fields(key, state);
    info!(
        "processSettings(): [{}] {} fields applied, saved: {}",
        key, applied, saved
    );

    let status = if saved { STATUS_SAVED } else { STATUS_SAVE_FAILED };
    let mut outgoing = Vec::with_capacity(2);
    match StatusMessage::new(status).to_json() {
        Ok(json) => outgoing.push(json),
        Err(e) => warn!("processSettings(): status encode failed: {:?}", e),
    }
    let form = registry.build_json_fields_string(key, state);
    if !form.is_empty() {
        outgoing.push(form);
    }
    outgoing
}
