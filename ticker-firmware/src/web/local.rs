//! Local messages page handler

use log::{info, warn};
use ticker_core::LocalMessages;
use ticker_hal::FileSystem;
use ticker_protocol::{decode_message_list, LocalMessagesData};

/// Current list wrapped for the local messages page
///
/// Returns `None` if the payload cannot be encoded.
pub fn local_messages_payload<F: FileSystem, const R: usize>(
    messages: &mut LocalMessages<F, R>,
) -> Option<String> {
    let list = messages.all();
    match LocalMessagesData::new(&list).and_then(|data| data.to_json()) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!("sendLocalMessagesToClient(): encode failed: {:?}", e);
            None
        }
    }
}

/// Replace the stored list with the one edited in the UI
///
/// `json` is an array of strings; `null` entries and blank strings are
/// dropped. Returns the refreshed payload, or `None` (with the store
/// unchanged) if the input is not a JSON array.
pub fn process_local_messages<F: FileSystem, const R: usize>(
    messages: &mut LocalMessages<F, R>,
    json: &str,
) -> Option<String> {
    let list = match decode_message_list(json) {
        Ok(list) => list,
        Err(e) => {
            warn!("processLocalMessages(): invalid input: {:?}", e);
            return None;
        }
    };

    let written = messages.replace_all(list.iter().flatten());
    info!(
        "processLocalMessages(): [{}] Local Messages written to [{}]",
        written,
        messages.store().path()
    );
    local_messages_payload(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use ticker_hal_host::RamFileSystem;

    const PATH: &str = "/localMessages.txt";

    fn data_array(payload: &str) -> Vec<String> {
        let envelope: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope["type"], "custom");
        assert_eq!(envelope["action"], "LocalMessagesData");
        serde_json::from_str(envelope["data"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_process_compacts_and_echoes() {
        let fs = RamFileSystem::new();
        let mut messages: LocalMessages<_, 150> = LocalMessages::new(fs.clone(), PATH);

        let payload = process_local_messages(
            &mut messages,
            r#"["Hello", null, "  ", "say \"hi\"", 42, "<weerlive>"]"#,
        )
        .unwrap();

        assert_eq!(
            data_array(&payload),
            vec!["Hello", "say \"hi\"", "42", "<weerlive>"]
        );
        assert_eq!(fs.contents(PATH).unwrap().len(), 4 * 150);
    }

    #[test]
    fn test_nul_ends_message() {
        let fs = RamFileSystem::new();
        let mut messages: LocalMessages<_, 150> = LocalMessages::new(fs.clone(), PATH);

        let payload = process_local_messages(
            &mut messages,
            r#"["\u0000", "news\u0000hidden", "weather"]"#,
        )
        .unwrap();

        assert_eq!(data_array(&payload), vec!["news", "weather"]);
        assert_eq!(fs.contents(PATH).unwrap().len(), 2 * 150);
    }

    #[test]
    fn test_invalid_input_keeps_store() {
        let fs = RamFileSystem::new();
        let mut messages: LocalMessages<_, 150> = LocalMessages::new(fs.clone(), PATH);
        messages.replace_all(["keep me"]);

        assert!(process_local_messages(&mut messages, r#"{"a":1}"#).is_none());
        assert!(process_local_messages(&mut messages, "not json").is_none());
        assert_eq!(
            data_array(&local_messages_payload(&mut messages).unwrap()),
            vec!["keep me"]
        );
    }

    #[test]
    fn test_empty_list_clears_store() {
        let fs = RamFileSystem::new();
        let mut messages: LocalMessages<_, 150> = LocalMessages::new(fs.clone(), PATH);
        messages.replace_all(["old"]);

        let payload = process_local_messages(&mut messages, "[]").unwrap();
        assert!(data_array(&payload).is_empty());
        assert!(fs.contents(PATH).is_none());
    }
}
