//! The filesystem interface used by generation, and its disk backend.
//!
//! # Examples
//!
//! ```
//! use scaffold_files::{DiskFileSystem, FileSystem};
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! # let base = temp.path();
//! let fs = DiskFileSystem::new();
//! fs.create_dir_all(&base.join("payments/src")).unwrap();
//! fs.write(&base.join("payments/README.md"), b"# payments").unwrap();
//!
//! assert!(fs.is_dir(&base.join("payments/src")));
//! assert_eq!(fs.read_to_string(&base.join("payments/README.md")).unwrap(), "# payments");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::types::{FilesError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem operations needed to generate a module.
///
/// Implementations must be usable through a shared reference so a single
/// instance can back both the generation engine and the manifest updater.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Creates `path` and every missing ancestor. Existing directories are
    /// reused.
    ///
    /// # Errors
    ///
    /// Fails if a component exists as a file or the location is not writable.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Reads a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, is a directory, or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Creates or truncates `path` and writes `content`. The parent
    /// directory must exist.
    ///
    /// # Errors
    ///
    /// Fails if the parent is missing, `path` is a directory, or the
    /// location is not writable.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Appends `content` to an existing file in a single write.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or not writable.
    fn append(&self, path: &Path, content: &[u8]) -> Result<()>;
}

/// [`FileSystem`] backed by the real disk.
///
/// # Examples
///
/// ```
/// use scaffold_files::DiskFileSystem;
///
/// let fs = DiskFileSystem::new().with_atomic_writes(false);
/// assert!(!fs.atomic_writes());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DiskFileSystem {
    atomic: bool,
}

impl DiskFileSystem {
    /// Creates a disk filesystem with atomic writes enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self { atomic: true }
    }

    /// Sets whether writes go through a temp file and a rename.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Returns whether atomic writes are enabled.
    #[must_use]
    pub const fn atomic_writes(&self) -> bool {
        self.atomic
    }
}

impl Default for DiskFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path).map_err(|e| FilesError::from_io(path.display().to_string(), e))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        if path.is_dir() {
            return Err(FilesError::NotAFile {
                path: path.display().to_string(),
            });
        }
        fs::read_to_string(path).map_err(|e| FilesError::from_io(path.display().to_string(), e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        if path.is_dir() {
            return Err(FilesError::NotAFile {
                path: path.display().to_string(),
            });
        }
        if self.atomic {
            write_file_atomic(path, content)
        } else {
            fs::write(path, content).map_err(|e| FilesError::from_io(path.display().to_string(), e))
        }
    }

    fn append(&self, path: &Path, content: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| FilesError::from_io(path.display().to_string(), e))?;
        file.write_all(content)
            .map_err(|e| FilesError::from_io(path.display().to_string(), e))?;
        debug!("Appended {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

/// Sibling temp path: `dir/.name.tmp`.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| FilesError::NotAFile {
        path: path.display().to_string(),
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Writes content through a temp file followed by a rename, so readers never
/// see a partially written file.
fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path)?;

    fs::write(&temp_path, content)
        .map_err(|e| FilesError::from_io(temp_path.display().to_string(), e))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(FilesError::from_io(path.display().to_string(), e));
    }

    Ok(())
}
