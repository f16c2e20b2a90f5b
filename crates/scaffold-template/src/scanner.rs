//! Scanner for a template's `root/` output tree.
//!
//! Every subdirectory becomes a [`DirectoryEntry`] and every `*.ftl` file a
//! [`FileEntry`] whose path has the suffix stripped. Other files are not part
//! of the output tree and are ignored. Paths are relative to `root/` and
//! always `/`-separated.

use scaffold_core::layout::{TEMPLATE_SUFFIX, is_module_marker};
use scaffold_core::{DirectoryEntry, FileEntry, FileTree};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Errors that can occur while scanning an output tree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The tree root does not exist or is not a directory.
    #[error("template root does not exist: {path}")]
    RootNotFound {
        /// Expected root directory
        path: String,
    },

    /// Directory traversal failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Root being walked
        path: String,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },

    /// A template file could not be read as text.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Root-relative path of the file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Scans `root` into a [`FileTree`], both lists sorted by path.
///
/// Symbolic links are not followed and not included.
///
/// # Errors
///
/// Returns [`ScanError`] if `root` is missing, traversal fails, or a
/// template file is not readable UTF-8 text.
///
/// # Examples
///
/// ```
/// use scaffold_template::scanner::scan_structure;
/// use std::fs;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let root = temp.path();
/// fs::create_dir_all(root.join("${moduleName}/src")).unwrap();
/// fs::write(root.join("${moduleName}/README.md.ftl"), "# ${moduleName}").unwrap();
/// fs::write(root.join("notes.txt"), "ignored").unwrap();
///
/// let tree = scan_structure(root).unwrap();
/// let dirs: Vec<_> = tree.directories.iter().map(|d| d.path.as_str()).collect();
/// assert_eq!(dirs, vec!["${moduleName}", "${moduleName}/src"]);
/// assert_eq!(tree.files.len(), 1);
/// assert_eq!(tree.files[0].path, "${moduleName}/README.md");
/// ```
pub fn scan_structure(root: &Path) -> Result<FileTree, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.display().to_string(),
        });
    }

    let mut tree = FileTree::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: root.display().to_string(),
            source: e,
        })?;
        let file_type = entry.file_type();
        let relative = relative_path(root, entry.path());

        if file_type.is_dir() {
            tree.directories.push(DirectoryEntry::new(relative));
        } else if file_type.is_file() {
            let Some(output_path) = relative.strip_suffix(TEMPLATE_SUFFIX) else {
                debug!("Ignoring non-template file {relative}");
                continue;
            };
            if output_path.is_empty() || output_path.ends_with('/') {
                debug!("Ignoring template file with empty name {relative}");
                continue;
            }
            let content =
                std::fs::read_to_string(entry.path()).map_err(|e| ScanError::Read {
                    path: relative.clone(),
                    source: e,
                })?;
            tree.files.push(FileEntry::new(output_path, content));
        }
    }

    // walkdir sorts per directory; a flat sort by path string is required
    tree.directories.sort_by(|a, b| a.path.cmp(&b.path));
    tree.files.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        "Scanned {}: {} directories, {} files",
        root.display(),
        tree.directories.len(),
        tree.files.len()
    );
    Ok(tree)
}

/// Output paths of every module marker below `root`, sorted.
///
/// # Errors
///
/// Same as [`scan_structure`].
pub fn find_module_markers(root: &Path) -> Result<Vec<String>, ScanError> {
    let tree = scan_structure(root)?;
    Ok(tree
        .files
        .into_iter()
        .map(|f| f.path)
        .filter(|p| is_module_marker(p))
        .collect())
}
