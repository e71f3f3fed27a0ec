//! File system abstractions
//!
//! Provides traits for a small path-addressed volume that can be implemented
//! by board HALs on top of their flash file system. All operations are
//! blocking: the firmware runs a single control loop and never has two
//! handles to the same file open at once.

/// How a file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenMode {
    /// Read only. Fails with [`FsError::NotFound`] if the file is missing.
    Read,
    /// Write only, truncating an existing file or creating a new one.
    Truncate,
    /// Read/write at arbitrary offsets. Creates the file if missing and
    /// never truncates it. Writing past the end zero-fills the gap.
    Update,
}

/// Errors from file system operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsError {
    /// File does not exist
    NotFound,
    /// Volume not mounted or not accessible
    Unavailable,
    /// Seek to the requested offset failed
    Seek,
    /// Read operation failed
    Read,
    /// Write operation failed
    Write,
    /// Volume is full
    Full,
    /// Path is not valid on this volume
    InvalidPath,
}

/// An open file
///
/// The handle is closed when dropped.
pub trait FileHandle {
    /// Move the cursor to an absolute byte offset
    fn seek(&mut self, offset: u64) -> Result<(), FsError>;

    /// Read into `buf`, returning the number of bytes read (0 at EOF)
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// Write from `data`, returning the number of bytes accepted
    fn write(&mut self, data: &[u8]) -> Result<usize, FsError>;

    /// Push buffered data to the volume
    fn flush(&mut self) -> Result<(), FsError>;

    /// Read until `buf` is full or EOF is reached
    ///
    /// # Returns
    /// The number of bytes read.
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }

    /// Write until all of `data` is accepted or the volume stops taking bytes
    ///
    /// A return value smaller than `data.len()` is a short write.
    fn write_fully(&mut self, data: &[u8]) -> Result<usize, FsError> {
        let mut written = 0;
        while written < data.len() {
            let n = self.write(&data[written..])?;
            if n == 0 {
                break;
            }
            written += n;
        }
        Ok(written)
    }
}

/// Path-addressed volume
///
/// Paths are absolute and `/`-separated, as on the device (`/settings.ini`).
pub trait FileSystem {
    /// Handle type returned by [`FileSystem::open`]
    type File: FileHandle;

    /// Open a file
    ///
    /// # Arguments
    /// * `path` - Absolute path on the volume
    /// * `mode` - Access mode
    fn open(&mut self, path: &str, mode: OpenMode) -> Result<Self::File, FsError>;

    /// Delete a file
    ///
    /// Removing a missing file is reported as [`FsError::NotFound`].
    fn remove(&mut self, path: &str) -> Result<(), FsError>;

    /// Atomically replace `to` with `from`
    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError>;

    /// Check if a file exists
    fn exists(&mut self, path: &str) -> bool;
}
