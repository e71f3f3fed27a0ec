//! RAM volume for testing
//!
//! Provides an in-memory file system with a configurable capacity and
//! one-shot fault injection, so the persistence code can be driven through
//! every failure it is expected to absorb.
//!
//! Clones share the same volume. The shared state uses `Rc<RefCell<_>>`,
//! which keeps the volume on the single control thread.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub use ticker_hal::fs::{FileHandle, FileSystem, FsError, OpenMode};

/// Default capacity (1 MB, the size of the device's data partition)
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

#[derive(Debug, Default)]
struct Faults {
    fail_next_open: bool,
    fail_next_rename: bool,
    fail_next_remove: bool,
}

#[derive(Debug)]
struct Volume {
    files: BTreeMap<String, Vec<u8>>,
    capacity: usize,
    mounted: bool,
    faults: Faults,
}

impl Volume {
    fn used(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// In-memory volume
///
/// # Example
///
/// ```
/// use ticker_hal_host::{FileHandle, FileSystem, OpenMode, RamFileSystem};
///
/// let mut fs = RamFileSystem::new();
/// let mut file = fs.open("/hello.txt", OpenMode::Truncate).unwrap();
/// file.write_fully(b"hi").unwrap();
/// drop(file);
///
/// assert_eq!(fs.contents("/hello.txt").unwrap(), b"hi");
/// ```
#[derive(Debug, Clone)]
pub struct RamFileSystem {
    volume: Rc<RefCell<Volume>>,
}

impl RamFileSystem {
    /// Create an empty volume with [`DEFAULT_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty volume holding at most `capacity` bytes in total
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            volume: Rc::new(RefCell::new(Volume {
                files: BTreeMap::new(),
                capacity,
                mounted: true,
                faults: Faults::default(),
            })),
        }
    }

    /// Get file contents (for test verification)
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.volume.borrow().files.get(path).cloned()
    }

    /// Get file contents as UTF-8 text (for test verification)
    pub fn text(&self, path: &str) -> Option<String> {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Store a file directly, bypassing the handle API
    pub fn insert(&self, path: &str, contents: impl Into<Vec<u8>>) {
        self.volume
            .borrow_mut()
            .files
            .insert(path.to_string(), contents.into());
    }

    /// Paths of all files on the volume, sorted
    pub fn paths(&self) -> Vec<String> {
        self.volume.borrow().files.keys().cloned().collect()
    }

    /// Make every operation fail with [`FsError::Unavailable`]
    pub fn unmount(&self) {
        self.volume.borrow_mut().mounted = false;
    }

    /// Undo [`RamFileSystem::unmount`]
    pub fn mount(&self) {
        self.volume.borrow_mut().mounted = true;
    }

    /// Make the next `open` fail with [`FsError::Unavailable`]
    pub fn fail_next_open(&self) {
        self.volume.borrow_mut().faults.fail_next_open = true;
    }

    /// Make the next `rename` fail with [`FsError::Write`]
    pub fn fail_next_rename(&self) {
        self.volume.borrow_mut().faults.fail_next_rename = true;
    }

    /// Make the next `remove` fail with [`FsError::Write`]
    pub fn fail_next_remove(&self) {
        self.volume.borrow_mut().faults.fail_next_remove = true;
    }

    fn check_mounted(&self) -> Result<(), FsError> {
        if self.volume.borrow().mounted {
            Ok(())
        } else {
            Err(FsError::Unavailable)
        }
    }
}

impl Default for RamFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RamFileSystem {
    type File = RamFile;

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<RamFile, FsError> {
        self.check_mounted()?;
        if !path.starts_with('/') || path.len() < 2 {
            return Err(FsError::InvalidPath);
        }

        let mut volume = self.volume.borrow_mut();
        if core::mem::take(&mut volume.faults.fail_next_open) {
            return Err(FsError::Unavailable);
        }

        match mode {
            OpenMode::Read => {
                if !volume.files.contains_key(path) {
                    return Err(FsError::NotFound);
                }
            }
            OpenMode::Truncate => {
                volume.files.insert(path.to_string(), Vec::new());
            }
            OpenMode::Update => {
                volume.files.entry(path.to_string()).or_default();
            }
        }

        Ok(RamFile {
            volume: Rc::clone(&self.volume),
            path: path.to_string(),
            mode,
            position: 0,
        })
    }

    fn remove(&mut self, path: &str) -> Result<(), FsError> {
        self.check_mounted()?;
        let mut volume = self.volume.borrow_mut();
        if core::mem::take(&mut volume.faults.fail_next_remove) {
            return Err(FsError::Write);
        }
        volume
            .files
            .remove(path)
            .map(|_| ())
            .ok_or(FsError::NotFound)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError> {
        self.check_mounted()?;
        let mut volume = self.volume.borrow_mut();
        if core::mem::take(&mut volume.faults.fail_next_rename) {
            return Err(FsError::Write);
        }
        let data = volume.files.remove(from).ok_or(FsError::NotFound)?;
        volume.files.insert(to.to_string(), data);
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        let volume = self.volume.borrow();
        volume.mounted && volume.files.contains_key(path)
    }
}

/// Open file on a [`RamFileSystem`]
///
/// Writes go straight to the shared volume; there is no buffering.
#[derive(Debug)]
pub struct RamFile {
    volume: Rc<RefCell<Volume>>,
    path: String,
    mode: OpenMode,
    position: usize,
}

impl FileHandle for RamFile {
    fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        let offset = usize::try_from(offset).map_err(|_| FsError::Seek)?;
        if offset > self.volume.borrow().capacity {
            return Err(FsError::Seek);
        }
        self.position = offset;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        if self.mode == OpenMode::Truncate {
            return Err(FsError::Read);
        }
        let volume = self.volume.borrow();
        let data = volume.files.get(&self.path).ok_or(FsError::Read)?;
        if self.position >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - self.position);
        buf[..n].copy_from_slice(&data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, FsError> {
        if self.mode == OpenMode::Read {
            return Err(FsError::Write);
        }
        let mut volume = self.volume.borrow_mut();
        let capacity = volume.capacity;
        let used = volume.used();
        let file = volume.files.get_mut(&self.path).ok_or(FsError::Write)?;

        // Bytes that grow the file count against the volume capacity
        let end = self.position + data.len();
        let growth = end.saturating_sub(file.len());
        let free = capacity.saturating_sub(used);
        let accepted = if growth > free {
            data.len() - (growth - free)
        } else {
            data.len()
        };
        if accepted == 0 {
            return Ok(0);
        }

        let end = self.position + accepted;
        if file.len() < end {
            file.resize(end, 0);
        }
        file[self.position..end].copy_from_slice(&data[..accepted]);
        self.position = end;
        Ok(accepted)
    }

    fn flush(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}
