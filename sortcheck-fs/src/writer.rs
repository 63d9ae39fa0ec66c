//! Filesystem abstraction for corpus files.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid file content: {0}")]
    Content(String),
}

/// Whole-file access to corpus files: the corpus builder writes through it
/// and the oracle reads the same files back.
pub trait Filesystem: Send + Sync {
    /// Write the whole file, replacing any existing content.
    ///
    /// The data must be durable and the handle closed when this returns.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Read file contents as a string.
    fn read_file(&self, path: &Path) -> Result<String, FsError>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        use std::io::Write;

        let mut file = fs::File::create(path)?;
        file.write_all(data)?;
        file.sync_data()?;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        Ok(fs::read_to_string(path)?)
    }
}

/// Mock filesystem for testing.
/// Cloning creates a new handle to the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file directly (for test setup).
    pub fn add_file(&self, path: PathBuf, data: Vec<u8>) {
        self.files.write().unwrap().insert(path, data);
    }
}

impl Filesystem for MockFilesystem {
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        self.files.write().unwrap().insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        let files = self.files.read().unwrap();
        match files.get(path) {
            Some(data) => String::from_utf8(data.clone())
                .map_err(|e| FsError::Content(format!("invalid utf8: {}", e))),
            None => Err(FsError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            ))),
        }
    }
}

/// Filesystem that fails every write, for exercising error paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingFilesystem;

impl Filesystem for FailingFilesystem {
    fn write_file(&self, path: &Path, _data: &[u8]) -> Result<(), FsError> {
        Err(FsError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("write denied: {}", path.display()),
        )))
    }

    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        Err(FsError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        )))
    }
}
