//! Local message rotation
//!
//! User-entered messages live in a [`RecordStore`], one per slot, packed
//! from index 0 with no gaps. The ticker shows them one after the other and
//! starts over after the last one.

use alloc::vec::Vec;

use heapless::String as HString;
use ticker_hal::FileSystem;

use super::record::{RecordStore, MAX_RECORDS};

/// Record store plus a rotation cursor
pub struct LocalMessages<F: FileSystem, const R: usize> {
    store: RecordStore<F, R>,
    cursor: u8,
}

impl<F: FileSystem, const R: usize> LocalMessages<F, R> {
    /// Create a rotation over the messages at `path`
    pub fn new(fs: F, path: &str) -> Self {
        Self::from_store(RecordStore::new(fs, path))
    }

    /// Wrap an existing store
    pub fn from_store(store: RecordStore<F, R>) -> Self {
        Self { store, cursor: 0 }
    }

    /// Underlying record store
    pub fn store(&mut self) -> &mut RecordStore<F, R> {
        &mut self.store
    }

    /// Index of the record returned by the next [`LocalMessages::next_message`]
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Return the next message in rotation
    ///
    /// An empty record marks the end of the list; the rotation then starts
    /// over at index 0. Returns empty only when there are no messages.
    pub fn next_message(&mut self) -> HString<R> {
        let mut message = self.store.read(self.cursor);
        if message.is_empty() && self.cursor != 0 {
            log_debug!("next_message(): end of list at {}, wrap", self.cursor);
            self.cursor = 0;
            message = self.store.read(0);
        }
        if message.is_empty() {
            return message;
        }

        log_debug!("next_message(): [{}] = [{}]", self.cursor, message.as_str());
        self.cursor = self.cursor.wrapping_add(1);
        message
    }

    /// All messages, up to the first empty record
    pub fn all(&mut self) -> Vec<HString<R>> {
        let mut messages = Vec::new();
        for index in 0..=u8::MAX {
            let message = self.store.read(index);
            if message.is_empty() {
                break;
            }
            messages.push(message);
        }
        messages
    }

    /// Replace the stored list
    ///
    /// Messages are written from index 0; blank or failed entries do not use
    /// up a slot, so the result has no gaps. At most [`MAX_RECORDS`] records
    /// are kept. Returns the number of records written.
    pub fn replace_all<I, S>(&mut self, messages: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut written = 0usize;
        for message in messages {
            if written >= MAX_RECORDS {
                log_warn!("replace_all(): more than {} messages, rest dropped", MAX_RECORDS);
                break;
            }
            // written < MAX_RECORDS, so it fits a u8
            let index = written as u8;
            if self.store.write(index, message.as_ref()) {
                written += 1;
            }
        }

        if written == 0 {
            // Nothing reached index 0, so the old list is still there
            self.store.clear();
        }

        self.cursor = 0;
        log_info!("replace_all(): stored {} messages", written);
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use ticker_hal_host::RamFileSystem;

    const PATH: &str = "/localMessages.txt";

    fn messages() -> (RamFileSystem, LocalMessages<RamFileSystem, 32>) {
        let fs = RamFileSystem::new();
        (fs.clone(), LocalMessages::new(fs, PATH))
    }

    fn texts<const R: usize>(list: &[HString<R>]) -> Vec<&str> {
        list.iter().map(|m| m.as_str()).collect()
    }

    #[test]
    fn test_rotation_wraps() {
        let (_fs, mut local) = messages();
        assert_eq!(local.replace_all(["one", "two", "three"]), 3);

        let shown: Vec<_> = (0..7).map(|_| local.next_message()).collect();
        assert_eq!(
            texts(&shown),
            vec!["one", "two", "three", "one", "two", "three", "one"]
        );
        assert_eq!(local.cursor(), 1);
    }

    #[test]
    fn test_rotation_on_empty_store() {
        let (_fs, mut local) = messages();
        assert!(local.next_message().is_empty());
        assert!(local.next_message().is_empty());
        assert_eq!(local.cursor(), 0);
    }

    #[test]
    fn test_replace_all_compacts_blank_entries() {
        let (_fs, mut local) = messages();
        assert_eq!(local.replace_all(["first", "   ", "", "second"]), 2);
        assert_eq!(texts(&local.all()), vec!["first", "second"]);
    }

    #[test]
    fn test_replace_all_discards_previous_list() {
        let (_fs, mut local) = messages();
        local.replace_all(["a", "b", "c", "d"]);
        local.replace_all(["x"]);
        assert_eq!(texts(&local.all()), vec!["x"]);
    }

    #[test]
    fn test_replace_all_with_nothing_clears() {
        let (fs, mut local) = messages();
        local.replace_all(["a", "b"]);
        assert_eq!(local.replace_all(["  ", ""]), 0);
        assert!(local.all().is_empty());
        assert!(fs.contents(PATH).is_none());
    }

    #[test]
    fn test_replace_all_resets_cursor() {
        let (_fs, mut local) = messages();
        local.replace_all(["a", "b", "c"]);
        local.next_message();
        local.next_message();
        local.replace_all(["x", "y"]);
        assert_eq!(local.next_message().as_str(), "x");
    }

    #[test]
    fn test_replace_all_caps_record_count() {
        let fs = RamFileSystem::new();
        let mut local: LocalMessages<_, 4> = LocalMessages::new(fs.clone(), PATH);
        let many: Vec<_> = (0..300).map(|i| alloc::format!("{}", i % 100)).collect();
        assert_eq!(local.replace_all(&many), MAX_RECORDS);
        assert_eq!(fs.contents(PATH).unwrap().len(), MAX_RECORDS * 4);
        assert_eq!(local.all().len(), MAX_RECORDS);
    }

    #[test]
    fn test_failed_write_does_not_leave_gap() {
        let (fs, mut local) = messages();
        local.replace_all(["old"]);
        fs.fail_next_open();
        assert_eq!(local.replace_all(["lost", "kept", "also kept"]), 2);
        assert_eq!(texts(&local.all()), vec!["kept", "also kept"]);
    }

    #[test]
    fn test_all_stops_at_first_empty() {
        let (_fs, mut local) = messages();
        local.store().write(0, "zero");
        local.store().write(1, "one");
        local.store().write(3, "three");
        assert_eq!(texts(&local.all()), vec!["zero", "one"]);
    }
}
