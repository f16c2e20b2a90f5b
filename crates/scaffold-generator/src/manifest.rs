//! Registration of generated modules in the project manifest.
//!
//! The manifest (`settings.gradle.kts` or `settings.gradle`) lists included
//! modules as `include(":a:b")` statements. Registration only ever appends,
//! and only entries that are not already included, so running it again with
//! the same modules leaves the file byte-identical.
//!
//! The read-then-append sequence is not atomic across processes; callers
//! must be the only writer of the manifest while it runs.

use crate::module_path::{ModulePath, module_entries};
use scaffold_core::layout::MANIFEST_FILES;
use scaffold_core::{Error, Result};
use scaffold_files::{FileSystem, FilesError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of planning or applying a manifest update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestChange {
    /// Manifest that was (or would be) updated; `None` when there is none
    pub manifest: Option<PathBuf>,
    /// Entries appended, or to be appended
    pub added: Vec<String>,
    /// Entries already included
    pub already_present: Vec<String>,
}

impl ManifestChange {
    /// Returns `true` if nothing is (or was) appended.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.manifest.is_none() || self.added.is_empty()
    }

    /// Human readable lines describing the change.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_generator::ManifestChange;
    /// use std::path::PathBuf;
    ///
    /// let change = ManifestChange {
    ///     manifest: Some(PathBuf::from("/proj/settings.gradle.kts")),
    ///     added: vec![":modules:payments".to_string()],
    ///     already_present: vec![],
    /// };
    /// assert_eq!(
    ///     change.describe(),
    ///     vec!["Add to settings.gradle(.kts): include(\":modules:payments\")"]
    /// );
    /// ```
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        if self.manifest.is_none() {
            return self
                .added
                .iter()
                .map(|entry| format!("No settings.gradle(.kts) found, skipped: {}", include_statement(entry)))
                .collect();
        }
        self.added
            .iter()
            .map(|entry| format!("Add to settings.gradle(.kts): {}", include_statement(entry)))
            .chain(self.already_present.iter().map(|entry| {
                format!("Already in settings.gradle(.kts): {}", include_statement(entry))
            }))
            .collect()
    }
}

/// `include("<entry>")`.
#[must_use]
pub fn include_statement(entry: &str) -> String {
    format!("include(\"{entry}\")")
}

/// Returns `true` if `content` includes `entry` with either quoting style.
///
/// # Examples
///
/// ```
/// use scaffold_generator::manifest::is_included;
///
/// let content = "include(':app')\ninclude(\":payments\")\n";
/// assert!(is_included(content, ":app"));
/// assert!(is_included(content, ":payments"));
/// assert!(!is_included(content, ":pay"));
/// ```
#[must_use]
pub fn is_included(content: &str, entry: &str) -> bool {
    content.contains(&format!("include(\"{entry}\")"))
        || content.contains(&format!("include('{entry}')"))
}

/// Locates, plans and applies manifest updates through a [`FileSystem`].
#[derive(Debug)]
pub struct ManifestUpdater<'a> {
    fs: &'a dyn FileSystem,
    manifest_files: Vec<String>,
}

impl<'a> ManifestUpdater<'a> {
    /// Creates an updater looking for the standard manifest names.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            manifest_files: MANIFEST_FILES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Overrides the manifest names, in lookup order.
    #[must_use]
    pub fn with_manifest_files(mut self, names: Vec<String>) -> Self {
        self.manifest_files = names;
        self
    }

    /// First existing manifest at `project_root`.
    #[must_use]
    pub fn locate(&self, project_root: &Path) -> Option<PathBuf> {
        self.manifest_files
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| self.fs.is_file(path))
    }

    /// Computes which entries `update` would append, without writing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestUpdateError`] if the manifest exists but
    /// cannot be read.
    pub fn plan(
        &self,
        manifest: Option<&Path>,
        project_root: &Path,
        target: &Path,
        modules: &[ModulePath],
    ) -> Result<ManifestChange> {
        let entries = module_entries(project_root, target, modules);

        let Some(manifest) = manifest else {
            return Ok(ManifestChange {
                manifest: None,
                added: entries,
                already_present: Vec::new(),
            });
        };

        let content = self
            .fs
            .read_to_string(manifest)
            .map_err(|e| manifest_error(manifest, "cannot read manifest", e))?;

        let (already_present, added): (Vec<String>, Vec<String>) = entries
            .into_iter()
            .partition(|entry| is_included(&content, entry));

        Ok(ManifestChange {
            manifest: Some(manifest.to_path_buf()),
            added,
            already_present,
        })
    }

    /// Appends every entry not yet included, in one append.
    ///
    /// A missing manifest (`None`, or a path that is not a file) is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestUpdateError`] if the manifest cannot be read
    /// or appended to.
    pub fn update(
        &self,
        manifest: Option<&Path>,
        project_root: &Path,
        target: &Path,
        modules: &[ModulePath],
    ) -> Result<ManifestChange> {
        let manifest = manifest.filter(|path| self.fs.is_file(path));
        let mut change = self.plan(manifest, project_root, target, modules)?;

        let Some(path) = manifest else {
            debug!("No manifest found, skipping module registration");
            change.added.clear();
            return Ok(change);
        };
        if change.added.is_empty() {
            debug!("All modules already included in {}", path.display());
            return Ok(change);
        }

        let mut appended = String::from("\n");
        for entry in &change.added {
            appended.push_str(&include_statement(entry));
            appended.push('\n');
        }
        self.fs
            .append(path, appended.as_bytes())
            .map_err(|e| manifest_error(path, "cannot append to manifest", e))?;

        info!(
            "Registered {} in {}",
            change.added.join(", "),
            path.display()
        );
        Ok(change)
    }
}

fn manifest_error(path: &Path, message: &str, source: FilesError) -> Error {
    Error::ManifestUpdateError {
        path: path.display().to_string(),
        message: format!("{message}: {source}"),
        source: Some(std::io::Error::other(source)),
    }
}
