//! Directory-backed volume
//!
//! Maps the device's absolute paths (`/settings.ini`) onto files below a
//! root directory on the host, so a data directory can stand in for the
//! flash partition.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

pub use ticker_hal::fs::{FileHandle, FileSystem, FsError, OpenMode};

/// Volume rooted at a host directory
#[derive(Debug, Clone)]
pub struct StdFileSystem {
    root: PathBuf,
}

impl StdFileSystem {
    /// Create a volume rooted at `root`
    ///
    /// The directory is not created here; see [`StdFileSystem::mount`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if needed and return the volume
    pub fn mount(root: impl Into<PathBuf>) -> Result<Self, FsError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|_| FsError::Unavailable)?;
        Ok(Self { root })
    }

    /// Root directory of the volume
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a volume path to a host path
    ///
    /// Only plain components are accepted; `..` or an empty name is
    /// rejected so a path can never escape the root.
    pub fn host_path(&self, path: &str) -> Result<PathBuf, FsError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        let mut depth = 0;
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                _ => return Err(FsError::InvalidPath),
            }
        }
        if depth == 0 {
            return Err(FsError::InvalidPath);
        }
        Ok(resolved)
    }
}

fn open_error(err: io::Error) -> FsError {
    match err.kind() {
        ErrorKind::NotFound => FsError::NotFound,
        _ => FsError::Unavailable,
    }
}

impl FileSystem for StdFileSystem {
    type File = StdFile;

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<StdFile, FsError> {
        let host = self.host_path(path)?;
        let mut options = OpenOptions::new();
        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::Truncate => options.write(true).create(true).truncate(true),
            OpenMode::Update => options.read(true).write(true).create(true).truncate(false),
        };
        let file = options.open(&host).map_err(open_error)?;
        Ok(StdFile { file })
    }

    fn remove(&mut self, path: &str) -> Result<(), FsError> {
        let host = self.host_path(path)?;
        fs::remove_file(host).map_err(open_error)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError> {
        let from = self.host_path(from)?;
        let to = self.host_path(to)?;
        fs::rename(from, to).map_err(open_error)
    }

    fn exists(&mut self, path: &str) -> bool {
        self.host_path(path).map(|p| p.is_file()).unwrap_or(false)
    }
}

/// Open file on a [`StdFileSystem`]
#[derive(Debug)]
pub struct StdFile {
    file: File,
}

impl FileHandle for StdFile {
    fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(|_| FsError::Seek)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        loop {
            match self.file.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => return Err(FsError::Read),
            }
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, FsError> {
        loop {
            match self.file.write(data) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => return Err(FsError::Write),
            }
        }
    }

    fn flush(&mut self) -> Result<(), FsError> {
        self.file.flush().map_err(|_| FsError::Write)?;
        self.file.sync_data().map_err(|_| FsError::Write)
    }
}
