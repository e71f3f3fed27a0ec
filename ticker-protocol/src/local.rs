//! Local message list payloads
//!
//! The local messages page exchanges the whole list at once: the firmware
//! sends the stored messages as a JSON array (wrapped in a
//! [`LocalMessagesData`] envelope) and the UI sends the edited array back.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::messages::MSG_CUSTOM;
use crate::ProtocolError;

/// Action name the local messages page script listens for
pub const ACTION_LOCAL_MESSAGES: &str = "LocalMessagesData";

/// Envelope carrying the local message list to the UI
///
/// `data` holds the list as an encoded JSON array string, not as a nested
/// array; the page script parses it separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMessagesData {
    /// Always [`MSG_CUSTOM`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Always [`ACTION_LOCAL_MESSAGES`]
    pub action: String,
    /// Encoded JSON array of messages
    pub data: String,
}

impl LocalMessagesData {
    /// Wrap a list of messages
    pub fn new<S: AsRef<str>>(messages: &[S]) -> Result<Self, ProtocolError> {
        Ok(Self {
            kind: MSG_CUSTOM.to_string(),
            action: ACTION_LOCAL_MESSAGES.to_string(),
            data: encode_message_list(messages)?,
        })
    }

    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|_| ProtocolError::Encode)
    }
}

/// Encode messages as a JSON array of strings
pub fn encode_message_list<S: AsRef<str>>(messages: &[S]) -> Result<String, ProtocolError> {
    let list: Vec<&str> = messages.iter().map(AsRef::as_ref).collect();
    serde_json::to_string(&list).map_err(|_| ProtocolError::Encode)
}

/// Decode the list sent by the UI
///
/// Every element maps to one entry: strings as-is, numbers and booleans in
/// their textual form, `null` (and nested structures) as `None`.
pub fn decode_message_list(input: &str) -> Result<Vec<Option<String>>, ProtocolError> {
    let value: Value = serde_json::from_str(input)?;
    let Value::Array(items) = value else {
        return Err(ProtocolError::NotAnArray);
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    #[test]
    fn test_encode_escapes_quotes() {
        let encoded = encode_message_list(&["say \"hi\"", "<weerlive>"]).unwrap();
        assert_eq!(encoded, r#"["say \"hi\"","<weerlive>"]"#);
    }

    #[test]
    fn test_envelope_wraps_encoded_array() {
        let envelope = LocalMessagesData::new(&["one", "two"]).unwrap();
        let json = envelope.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"type":"custom","action":"LocalMessagesData","data":"[\"one\",\"two\"]"}"#
        );
    }

    #[test]
    fn test_decode_mixed_elements() {
        let decoded = decode_message_list(r#"["a", null, 7, true, "", {"x":1}]"#).unwrap();
        assert_eq!(
            decoded,
            vec![
                Some("a".to_string()),
                None,
                Some("7".to_string()),
                Some("true".to_string()),
                Some(String::new()),
                None,
            ]
        );
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert_eq!(
            decode_message_list(r#"{"a":1}"#),
            Err(ProtocolError::NotAnArray)
        );
        assert_eq!(decode_message_list("["), Err(ProtocolError::InvalidJson));
    }

    proptest! {
        #[test]
        fn prop_any_text_survives_the_page(messages in proptest::collection::vec(".*", 0..8)) {
            let encoded = encode_message_list(&messages).unwrap();
            let decoded = decode_message_list(&encoded).unwrap();
            let expected: Vec<Option<String>> = messages.into_iter().map(Some).collect();
            prop_assert_eq!(decoded, expected);
        }
    }
}
