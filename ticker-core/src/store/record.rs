//! Fixed-size record file
//!
//! File layout (no header):
//!
//! ```text
//! offset 0      R       2R      3R
//!        ┌───────┬───────┬───────┬──
//!        │ rec 0 │ rec 1 │ rec 2 │ ..
//!        └───────┴───────┴───────┴──
//! slot:  [ UTF-8 content (≤ R-1) | '\n' | 0x00 padding ]
//! ```
//!
//! Slots never move. An unwritten slot (or one past EOF) reads as empty.
//! Writing record 0 discards the whole file first, so a session of writes
//! always rebuilds the store from the beginning.

use alloc::string::String;

use heapless::String as HString;
use ticker_hal::{FileHandle, FileSystem, FsError, OpenMode};

/// Byte placed right after the record content
pub const DELIMITER: u8 = b'\n';

/// Number of addressable records (indices are `u8`)
pub const MAX_RECORDS: usize = 256;

/// Record store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Content is empty after trimming spaces
    Blank,
    /// Removing the old file for a reset failed
    Reset(FsError),
    /// Opening the backing file failed
    Open(FsError),
    /// Seeking to the slot failed
    Seek(FsError),
    /// Reading the slot failed
    Read(FsError),
    /// Writing or flushing the slot failed
    Write(FsError),
    /// Fewer than `R` bytes reached the file; the slot may be corrupted
    ShortWrite { written: usize, expected: usize },
}

/// Flat file of `R`-byte records addressed by index
///
/// Every call opens and closes the file; nothing is cached.
pub struct RecordStore<F: FileSystem, const R: usize> {
    fs: F,
    path: String,
}

impl<F: FileSystem, const R: usize> RecordStore<F, R> {
    /// A slot must hold at least one content byte plus the delimiter
    const SLOT_SIZE_OK: () = assert!(R >= 2, "record size must be at least 2 bytes");

    /// Create a store backed by the file at `path`
    pub fn new(fs: F, path: &str) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SLOT_SIZE_OK;
        Self {
            fs,
            path: String::from(path),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &str {
        &self.path
    }

    fn offset(index: u8) -> u64 {
        index as u64 * R as u64
    }

    /// Read a record, returning empty if it is absent or unreadable
    pub fn read(&mut self, index: u8) -> HString<R> {
        match self.try_read(index) {
            Ok(content) => {
                if content.is_empty() {
                    log_debug!("read(): no data for record {}", index);
                }
                content
            }
            Err(RecordError::Open(FsError::NotFound)) => {
                log_debug!("read(): [{}] does not exist", self.path.as_str());
                HString::new()
            }
            Err(e) => {
                log_warn!(
                    "read(): record {} of [{}] failed: {:?}",
                    index,
                    self.path.as_str(),
                    e
                );
                HString::new()
            }
        }
    }

    /// Read a record, reporting why it could not be read
    ///
    /// A slot past the end of the file is not an error; it reads as empty.
    pub fn try_read(&mut self, index: u8) -> Result<HString<R>, RecordError> {
        let mut file = self
            .fs
            .open(&self.path, OpenMode::Read)
            .map_err(RecordError::Open)?;
        file.seek(Self::offset(index)).map_err(RecordError::Seek)?;

        let mut slot = [0u8; R];
        let len = file.read_fully(&mut slot).map_err(RecordError::Read)?;
        drop(file);

        Ok(decode_slot(&slot[..len]))
    }

    /// Write a record, returning whether the full slot reached the file
    pub fn write(&mut self, index: u8, content: &str) -> bool {
        match self.try_write(index, content) {
            Ok(()) => true,
            Err(RecordError::Blank) => {
                log_debug!("write(): skipped empty record {}", index);
                false
            }
            Err(e) => {
                log_warn!(
                    "write(): record {} of [{}] failed: {:?}",
                    index,
                    self.path.as_str(),
                    e
                );
                false
            }
        }
    }

    /// Write a record, reporting why it could not be written
    ///
    /// Content ends at the first NUL, is trimmed of surrounding spaces and
    /// cut to `R - 1` bytes (on a character boundary). Blank content is
    /// rejected before anything is touched, including the reset for record 0.
    pub fn try_write(&mut self, index: u8, content: &str) -> Result<(), RecordError> {
        // A NUL would end the slot early on read
        let content = match content.find('\0') {
            Some(end) => &content[..end],
            None => content,
        };
        let trimmed = content.trim_matches(' ');
        if trimmed.is_empty() {
            return Err(RecordError::Blank);
        }

        if index == 0 {
            log_debug!("write(): record 0, erase [{}]", self.path.as_str());
            self.clear_inner().map_err(RecordError::Reset)?;
        }

        let content = truncate_bytes(trimmed, R - 1);
        let mut slot = [0u8; R];
        slot[..content.len()].copy_from_slice(content.as_bytes());
        slot[content.len()] = DELIMITER;

        let mut file = self
            .fs
            .open(&self.path, OpenMode::Update)
            .map_err(RecordError::Open)?;
        file.seek(Self::offset(index)).map_err(RecordError::Seek)?;
        let written = file.write_fully(&slot).map_err(RecordError::Write)?;
        file.flush().map_err(RecordError::Write)?;
        drop(file);

        if written != R {
            return Err(RecordError::ShortWrite {
                written,
                expected: R,
            });
        }

        log_debug!("write(): record {} = [{}]", index, content);
        Ok(())
    }

    /// Discard every record
    pub fn clear(&mut self) -> bool {
        match self.clear_inner() {
            Ok(()) => true,
            Err(e) => {
                log_warn!("clear(): [{}] failed: {:?}", self.path.as_str(), e);
                false
            }
        }
    }

    fn clear_inner(&mut self) -> Result<(), FsError> {
        match self.fs.remove(&self.path) {
            Ok(()) | Err(FsError::NotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Extract the content of a raw slot
///
/// Content ends at the first zero byte; one trailing delimiter is dropped.
/// Bytes that are not valid UTF-8 end the content as well.
fn decode_slot<const R: usize>(raw: &[u8]) -> HString<R> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let mut bytes = &raw[..end];
    if let [rest @ .., DELIMITER] = bytes {
        bytes = rest;
    }

    let text = match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            // valid_up_to() is always a char boundary
            core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default()
        }
    };
    HString::try_from(text).unwrap_or_default()
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char
fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
