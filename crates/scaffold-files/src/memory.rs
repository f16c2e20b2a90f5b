//! In-memory filesystem.
//!
//! Mirrors the disk semantics the generator relies on (parents must exist
//! before a write, files and directories never share a path) so tests and
//! dry runs can exercise the engine without touching disk. Paths are
//! normalized lexically: `.` components are dropped and `..` pops the
//! previous component.
//!
//! # Examples
//!
//! ```
//! use scaffold_files::{FileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("/proj/settings.gradle.kts", "rootProject.name = \"demo\"\n");
//!
//! fs.create_dir_all(Path::new("/proj/modules/payments")).unwrap();
//! assert!(fs.is_dir(Path::new("/proj/modules")));
//! assert!(fs.is_file(Path::new("/proj/settings.gradle.kts")));
//! ```

use crate::filesystem::FileSystem;
use crate::types::{FilesError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default, Clone)]
struct State {
    directories: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

/// An in-memory [`FileSystem`].
///
/// Interior mutability lets it be shared by reference like the disk
/// backend. Every successful mutation is counted, which makes "nothing was
/// written" directly assertable.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: RwLock<State>,
    read_only: Vec<PathBuf>,
    mutations: AtomicUsize,
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory (and its ancestors). Seeding is not counted as a
    /// mutation.
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            insert_dir_all(&mut state, &normalize(path.as_ref()));
        }
        self
    }

    /// Adds a file, creating its ancestors. Seeding is not counted as a
    /// mutation.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        {
            let path = normalize(path.as_ref());
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(parent) = path.parent() {
                insert_dir_all(&mut state, parent);
            }
            state.files.insert(path, content.into());
        }
        self
    }

    /// Marks `prefix` and everything below it as read-only: every mutation
    /// there fails with a permission error.
    #[must_use]
    pub fn with_read_only(mut self, prefix: impl AsRef<Path>) -> Self {
        self.read_only.push(normalize(prefix.as_ref()));
        self
    }

    /// Number of successful mutations since construction.
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// All directories, sorted.
    #[must_use]
    pub fn directories(&self) -> Vec<PathBuf> {
        self.read_state().directories.iter().cloned().collect()
    }

    /// All file paths, sorted.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.read_state().files.keys().cloned().collect()
    }

    /// Raw bytes of a file.
    #[must_use]
    pub fn read_bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.read_state().files.get(&normalize(path.as_ref())).cloned()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        if self.read_only.iter().any(|prefix| path.starts_with(prefix)) {
            return Err(FilesError::PermissionDenied {
                path: display(path),
            });
        }
        Ok(())
    }

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

fn insert_dir_all(state: &mut State, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        state.directories.insert(ancestor.to_path_buf());
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        let state = self.read_state();
        state.directories.contains(&path) || state.files.contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read_state().directories.contains(&normalize(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read_state().files.contains_key(&normalize(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(file) = path.ancestors().find(|a| state.files.contains_key(*a)) {
            return Err(FilesError::NotADirectory {
                path: display(file),
            });
        }

        let missing: Vec<PathBuf> = path
            .ancestors()
            .filter(|a| !a.as_os_str().is_empty() && !state.directories.contains(*a))
            .map(Path::to_path_buf)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }
        for dir in &missing {
            self.check_writable(dir)?;
        }

        state.directories.extend(missing);
        drop(state);
        self.record_mutation();
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = normalize(path);
        let state = self.read_state();

        if state.directories.contains(&path) {
            return Err(FilesError::NotAFile {
                path: display(&path),
            });
        }
        let bytes = state.files.get(&path).ok_or_else(|| FilesError::NotFound {
            path: display(&path),
        })?;
        String::from_utf8(bytes.clone()).map_err(|_| FilesError::InvalidUtf8 {
            path: display(&path),
        })
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        let path = normalize(path);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if state.directories.contains(&path) {
            return Err(FilesError::NotAFile {
                path: display(&path),
            });
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                if state.files.contains_key(parent) {
                    return Err(FilesError::NotADirectory {
                        path: display(parent),
                    });
                }
                if !state.directories.contains(parent) {
                    return Err(FilesError::NotFound {
                        path: display(parent),
                    });
                }
            }
            _ => {}
        }
        self.check_writable(&path)?;

        state.files.insert(path, content.to_vec());
        drop(state);
        self.record_mutation();
        Ok(())
    }

    fn append(&self, path: &Path, content: &[u8]) -> Result<()> {
        let path = normalize(path);
        self.check_writable(&path)?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let existing = state.files.get_mut(&path).ok_or_else(|| FilesError::NotFound {
            path: display(&path),
        })?;
        existing.extend_from_slice(content);
        drop(state);
        self.record_mutation();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("a/b/")), PathBuf::from("a/b"));
    }

    #[test]
    fn test_with_file_creates_ancestors() {
        let fs = MemoryFileSystem::new().with_file("/proj/a/b.txt", "x");
        assert!(fs.is_dir(Path::new("/proj/a")));
        assert!(fs.is_dir(Path::new("/proj")));
        assert!(fs.is_dir(Path::new("/")));
        assert_eq!(fs.mutation_count(), 0);
    }

    #[test]
    fn test_create_dir_all_counts_once() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/a/b/c")).unwrap();
        assert_eq!(fs.mutation_count(), 1);

        fs.create_dir_all(Path::new("/a/b")).unwrap();
        assert_eq!(fs.mutation_count(), 1);
    }

    #[test]
    fn test_create_dir_all_through_file() {
        let fs = MemoryFileSystem::new().with_file("/a/file", "x");
        let err = fs.create_dir_all(Path::new("/a/file/sub")).unwrap_err();
        assert!(err.is_not_directory());
        assert_eq!(err.path(), "/a/file");
    }

    #[test]
    fn test_write_requires_parent() {
        let fs = MemoryFileSystem::new();
        let err = fs.write(Path::new("/missing/a.txt"), b"x").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fs.mutation_count(), 0);
    }

    #[test]
    fn test_write_and_read() {
        let fs = MemoryFileSystem::new().with_dir("/proj");
        fs.write(Path::new("/proj/a.txt"), b"hello").unwrap();
        fs.write(Path::new("/proj/a.txt"), b"world").unwrap();

        assert_eq!(fs.read_to_string(Path::new("/proj/a.txt")).unwrap(), "world");
        assert_eq!(fs.mutation_count(), 2);
    }

    #[test]
    fn test_write_onto_directory() {
        let fs = MemoryFileSystem::new().with_dir("/proj/dir");
        let err = fs.write(Path::new("/proj/dir"), b"x").unwrap_err();
        assert!(err.is_not_file());
    }

    #[test]
    fn test_read_invalid_utf8() {
        let fs = MemoryFileSystem::new().with_file("/bin", vec![0xff, 0xfe]);
        let err = fs.read_to_string(Path::new("/bin")).unwrap_err();
        assert!(matches!(err, FilesError::InvalidUtf8 { .. }));
        assert_eq!(fs.read_bytes("/bin"), Some(vec![0xff, 0xfe]));
    }

    #[test]
    fn test_read_only_prefix() {
        let fs = MemoryFileSystem::new()
            .with_dir("/proj/locked")
            .with_read_only("/proj/locked");

        let err = fs
            .write(Path::new("/proj/locked/a.txt"), b"x")
            .unwrap_err();
        assert!(err.is_permission_denied());

        let err = fs
            .create_dir_all(Path::new("/proj/locked/sub"))
            .unwrap_err();
        assert!(err.is_permission_denied());

        // Existing directories can still be "created"
        fs.create_dir_all(Path::new("/proj/locked")).unwrap();
        assert_eq!(fs.mutation_count(), 0);
    }

    #[test]
    fn test_append() {
        let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "a\n");
        fs.append(Path::new("/proj/settings.gradle.kts"), b"b\n")
            .unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("/proj/settings.gradle.kts"))
                .unwrap(),
            "a\nb\n"
        );
        assert!(
            fs.append(Path::new("/proj/missing"), b"x")
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_listing_is_sorted() {
        let fs = MemoryFileSystem::new()
            .with_file("/b/2.txt", "")
            .with_file("/a/1.txt", "");

        assert_eq!(
            fs.files(),
            vec![PathBuf::from("/a/1.txt"), PathBuf::from("/b/2.txt")]
        );
        assert_eq!(
            fs.directories(),
            vec![
                PathBuf::from("/"),
                PathBuf::from("/a"),
                PathBuf::from("/b")
            ]
        );
    }
}
