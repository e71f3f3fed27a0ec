//! Settings message types
//!
//! - Firmware → UI: [`SettingsUpdate`] describing a settings form,
//!   [`StatusMessage`] for one-line feedback
//! - UI → Firmware: [`SettingsSubmission`] carrying edited values

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProtocolError;

/// Message type for messages the UI applies to a page element
pub const MSG_UPDATE: &str = "update";

/// Message type for messages handled by page-specific script
pub const MSG_CUSTOM: &str = "custom";

/// Page element that shows status feedback
pub const TARGET_MESSAGE: &str = "message";

/// Field type tag for strings
pub const FIELD_TYPE_STRING: &str = "s";

/// Field type tag for numbers
pub const FIELD_TYPE_NUMBER: &str = "n";

/// Field type tag for booleans
pub const FIELD_TYPE_BOOL: &str = "b";

/// A settings form sent to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// Always [`MSG_UPDATE`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Container target identifier
    pub target: String,
    /// Display name of the container
    #[serde(rename = "settingsName")]
    pub settings_name: String,
    /// Fields in registration order
    pub fields: Vec<FieldEntry>,
}

impl SettingsUpdate {
    /// Create an empty form for a container
    pub fn new(target: &str, settings_name: &str) -> Self {
        Self {
            kind: MSG_UPDATE.to_string(),
            target: target.to_string(),
            settings_name: settings_name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|_| ProtocolError::Encode)
    }
}

/// One field of a settings form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEntry {
    /// Field name (key in the settings file)
    pub field_name: String,
    /// Label shown next to the input
    pub field_prompt: String,
    /// Current value, type tag and constraints
    #[serde(flatten)]
    pub value: FieldValue,
}

/// Typed value of a field with its constraints
///
/// Serialized with the `fieldType` tag next to the other field keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fieldType")]
pub enum FieldValue {
    /// String field with a maximum length
    #[serde(rename = "s", rename_all = "camelCase")]
    Text { field_value: String, field_len: usize },
    /// Integer field with range and step
    #[serde(rename = "n", rename_all = "camelCase")]
    Number {
        field_value: i32,
        field_min: i32,
        field_max: i32,
        field_step: i32,
    },
    /// Boolean field
    #[serde(rename = "b", rename_all = "camelCase")]
    Flag { field_value: bool },
}

impl FieldValue {
    /// Wire type tag of this value
    pub fn type_tag(&self) -> &'static str {
        match self {
            FieldValue::Text { .. } => FIELD_TYPE_STRING,
            FieldValue::Number { .. } => FIELD_TYPE_NUMBER,
            FieldValue::Flag { .. } => FIELD_TYPE_BOOL,
        }
    }
}

/// Status line shown by the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Always [`MSG_UPDATE`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Always [`TARGET_MESSAGE`]
    pub target: String,
    /// Text to show
    pub content: String,
}

impl StatusMessage {
    /// Create a status message
    pub fn new(content: &str) -> Self {
        Self {
            kind: MSG_UPDATE.to_string(),
            target: TARGET_MESSAGE.to_string(),
            content: content.to_string(),
        }
    }

    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|_| ProtocolError::Encode)
    }
}

/// Edited settings sent back by the UI
///
/// The UI echoes the form it was given with a `value` key added per field;
/// everything except `fieldName` and `value` is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SettingsSubmission {
    /// Submitted fields
    pub fields: Vec<FieldSubmission>,
}

impl SettingsSubmission {
    /// Decode a submission
    ///
    /// Fails if the input is not an object with a `fields` array.
    pub fn from_json(input: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// One submitted field
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldSubmission {
    /// Field name, if present
    #[serde(rename = "fieldName", default)]
    pub field_name: Option<String>,
    /// Raw submitted value, if present and not null
    #[serde(default)]
    pub value: Option<Value>,
}

impl FieldSubmission {
    /// Submitted value in the textual form used by the settings files
    ///
    /// Strings are returned as-is, numbers in decimal and booleans as
    /// `true`/`false`. Null, arrays and objects have no textual form.
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_settings_update_wire_shape() {
        let mut update = SettingsUpdate::new("weerliveSettings", "Weerlive Settings");
        update.fields.push(FieldEntry {
            field_name: "plaats".to_string(),
            field_prompt: "Plaats".to_string(),
            value: FieldValue::Text {
                field_value: "Amsterdam".to_string(),
                field_len: 32,
            },
        });
        update.fields.push(FieldEntry {
            field_name: "requestInterval".to_string(),
            field_prompt: "Request Interval (minuten)".to_string(),
            value: FieldValue::Number {
                field_value: 15,
                field_min: 10,
                field_max: 120,
                field_step: 1,
            },
        });
        update.fields.push(FieldEntry {
            field_name: "enabled".to_string(),
            field_prompt: "Enabled".to_string(),
            value: FieldValue::Flag { field_value: true },
        });

        let json: Value = serde_json::from_str(&update.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "update");
        assert_eq!(json["target"], "weerliveSettings");
        assert_eq!(json["settingsName"], "Weerlive Settings");

        let fields = json["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0]["fieldName"], "plaats");
        assert_eq!(fields[0]["fieldType"], "s");
        assert_eq!(fields[0]["fieldValue"], "Amsterdam");
        assert_eq!(fields[0]["fieldLen"], 32);
        assert_eq!(fields[1]["fieldType"], "n");
        assert_eq!(fields[1]["fieldValue"], 15);
        assert_eq!(fields[1]["fieldMin"], 10);
        assert_eq!(fields[1]["fieldMax"], 120);
        assert_eq!(fields[1]["fieldStep"], 1);
        assert_eq!(fields[2]["fieldType"], "b");
        assert_eq!(fields[2]["fieldValue"], true);
        assert!(fields[2].get("fieldLen").is_none());
    }

    #[test]
    fn test_settings_update_parses_back() {
        let input = r#"{"type":"update","target":"t","settingsName":"T","fields":[
            {"fieldName":"n","fieldPrompt":"N","fieldType":"n","fieldValue":5,
             "fieldMin":0,"fieldMax":9,"fieldStep":1}]}"#;
        let update: SettingsUpdate = serde_json::from_str(input).unwrap();
        assert_eq!(update.fields[0].value.type_tag(), FIELD_TYPE_NUMBER);
        assert_eq!(
            update.fields[0].value,
            FieldValue::Number {
                field_value: 5,
                field_min: 0,
                field_max: 9,
                field_step: 1
            }
        );
    }

    #[test]
    fn test_submission_ignores_display_metadata() {
        let input = r#"{"type":"update","fields":[
            {"fieldName":"hostname","fieldPrompt":"hostname","fieldType":"s","value":"ticker"},
            {"fieldName":"tickerSpeed","value":42},
            {"fieldName":"enabled","value":false},
            {"fieldName":"skip","value":null},
            {"value":"orphan"},
            {"fieldName":"noValue"}
        ]}"#;
        let submission = SettingsSubmission::from_json(input).unwrap();
        let texts: Vec<_> = submission
            .fields
            .iter()
            .map(|f| (f.field_name.as_deref(), f.value_text()))
            .collect();
        assert_eq!(
            texts,
            vec![
                (Some("hostname"), Some("ticker".to_string())),
                (Some("tickerSpeed"), Some("42".to_string())),
                (Some("enabled"), Some("false".to_string())),
                (Some("skip"), None),
                (None, Some("orphan".to_string())),
                (Some("noValue"), None),
            ]
        );
    }

    #[test]
    fn test_submission_requires_fields_array() {
        assert_eq!(
            SettingsSubmission::from_json(r#"{"type":"update"}"#),
            Err(ProtocolError::InvalidJson)
        );
        assert_eq!(
            SettingsSubmission::from_json("not json"),
            Err(ProtocolError::InvalidJson)
        );
    }

    #[test]
    fn test_status_message() {
        let json = StatusMessage::new("Settings saved successfully!")
            .to_json()
            .unwrap();
        assert_eq!(
            json,
            r#"{"type":"update","target":"message","content":"Settings saved successfully!"}"#
        );
    }
}
