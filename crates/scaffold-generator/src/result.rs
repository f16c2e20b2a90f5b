//! Outcomes of generation and preview.

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one generation run.
///
/// `Warning` means some files or the manifest update failed while the rest
/// of the module was still written; nothing is rolled back. Only `Failure`
/// reports zero artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Everything was generated.
    Success {
        /// Module label
        module_label: String,
        /// Directory of the generated module
        module_directory: PathBuf,
        /// Files written, in template order
        generated_files: Vec<PathBuf>,
    },
    /// Generated with recoverable problems.
    Warning {
        /// Module label
        module_label: String,
        /// Directory of the generated module
        module_directory: PathBuf,
        /// Files written, in template order
        generated_files: Vec<PathBuf>,
        /// One message per failed item
        warnings: Vec<String>,
    },
    /// Nothing was generated.
    Failure {
        /// Error description
        error: String,
    },
}

impl GenerationResult {
    /// Returns `true` for [`GenerationResult::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` for [`GenerationResult::Warning`].
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }

    /// Returns `true` for [`GenerationResult::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Files written; empty on failure.
    #[must_use]
    pub fn generated_files(&self) -> &[PathBuf] {
        match self {
            Self::Success { generated_files, .. } | Self::Warning { generated_files, .. } => {
                generated_files
            }
            Self::Failure { .. } => &[],
        }
    }

    /// Warning messages; empty unless this is a warning.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Warning { warnings, .. } => warnings,
            _ => &[],
        }
    }
}

/// A directory the preview reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewDirectory {
    /// Resolved, target-relative path
    pub path: String,
    /// Number of `/` in the path
    pub level: usize,
}

/// A file the preview reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewFile {
    /// Resolved, target-relative path
    pub path: String,
    /// Encoded size in bytes
    pub size: usize,
    /// Number of `/` in the path
    pub level: usize,
}

/// What a generation run would produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationPreview {
    /// Directories in template order
    pub directories: Vec<PreviewDirectory>,
    /// Files in template order
    pub files: Vec<PreviewFile>,
    /// Manifest change lines
    pub manifest_changes: Vec<String>,
}
