//! Error types for filesystem operations.
//!
//! # Examples
//!
//! ```
//! use scaffold_files::FilesError;
//!
//! let error = FilesError::NotFound {
//!     path: "/proj/settings.gradle.kts".to_string(),
//! };
//!
//! assert!(error.is_not_found());
//! ```

use std::io;
use thiserror::Error;

/// Errors that can occur during filesystem operations.
#[derive(Error, Debug)]
pub enum FilesError {
    /// File or directory not found
    #[error("Not found: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// A path component exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The offending path
        path: String,
    },

    /// Path exists but is not a regular file
    #[error("Not a file: {path}")]
    NotAFile {
        /// The offending path
        path: String,
    },

    /// The path is not writable
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// The protected path
        path: String,
    },

    /// Content is not valid UTF-8
    #[error("Invalid UTF-8 content: {path}")]
    InvalidUtf8 {
        /// The file path
        path: String,
    },

    /// Any other I/O failure
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path where the error occurred
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl FilesError {
    /// Maps an I/O error at `path` onto the matching variant.
    #[must_use]
    pub fn from_io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::InvalidData => Self::InvalidUtf8 { path },
            _ => Self::IoError { path, source },
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a not-a-directory error.
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` if this is a not-a-file error.
    #[must_use]
    pub const fn is_not_file(&self) -> bool {
        matches!(self, Self::NotAFile { .. })
    }

    /// Returns `true` if this is a permission error.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Returns the path the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::NotAFile { path }
            | Self::PermissionDenied { path }
            | Self::InvalidUtf8 { path }
            | Self::IoError { path, .. } => path,
        }
    }
}

/// Result type for filesystem operations.
pub type Result<T> = std::result::Result<T, FilesError>;
