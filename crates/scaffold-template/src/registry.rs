//! Process-wide template registry.
//!
//! Templates are enumerated from the subfolders of one templates directory.
//! A broken folder never stops enumeration: its failure is recorded in the
//! [`LoadReport`] and the remaining folders still load. Reloading builds a
//! complete new map and swaps it in one step, so readers see either the old
//! or the new set of templates, never a mix.

use crate::loader::TemplateLoader;
use crate::parser::ParseDiagnostic;
use scaffold_core::{Error, Result, TemplateDefinition};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

type TemplateMap = BTreeMap<String, Arc<TemplateDefinition>>;

/// A template folder that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// Folder name
    pub folder: String,
    /// Error description
    pub message: String,
}

/// Summary of one (re)load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Ids of successfully registered templates, sorted
    pub loaded: Vec<String>,
    /// Folders that failed to load
    pub failures: Vec<LoadFailure>,
    /// Folders skipped because an earlier folder registered the same id
    pub duplicates: Vec<LoadFailure>,
    /// Tolerated descriptor problems across all templates
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl LoadReport {
    /// Returns `true` if every folder loaded without any problem.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.duplicates.is_empty() && self.diagnostics.is_empty()
    }
}

/// Registry of the templates found in a templates directory.
///
/// # Examples
///
/// ```
/// use scaffold_template::registry::TemplateRegistry;
/// use std::fs;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let folder = temp.path().join("feature");
/// fs::create_dir_all(&folder).unwrap();
/// fs::write(folder.join("template.xml"), "<template><id>feature</id></template>").unwrap();
///
/// let registry = TemplateRegistry::new(temp.path());
/// let report = registry.reload();
///
/// assert_eq!(report.loaded, vec!["feature"]);
/// assert!(registry.get("feature").is_some());
/// ```
#[derive(Debug)]
pub struct TemplateRegistry {
    templates_dir: PathBuf,
    loader: TemplateLoader,
    templates: RwLock<Arc<TemplateMap>>,
}

impl TemplateRegistry {
    /// Creates an empty registry over `templates_dir`. Nothing is read
    /// until [`load`](Self::load) or [`reload`](Self::reload).
    #[must_use]
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self::with_loader(templates_dir, TemplateLoader::new())
    }

    /// Creates an empty registry using a custom loader.
    #[must_use]
    pub fn with_loader(templates_dir: impl Into<PathBuf>, loader: TemplateLoader) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            loader,
            templates: RwLock::new(Arc::new(BTreeMap::new())),
        }
    }

    /// Creates a registry and loads it immediately.
    #[must_use]
    pub fn load(templates_dir: impl Into<PathBuf>, loader: TemplateLoader) -> (Self, LoadReport) {
        let registry = Self::with_loader(templates_dir, loader);
        let report = registry.reload();
        (registry, report)
    }

    /// Directory the templates are read from.
    #[must_use]
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Discards every registered template and reads the directory again.
    ///
    /// A missing templates directory yields an empty registry.
    pub fn reload(&self) -> LoadReport {
        let (map, report) = self.scan();

        info!(
            "Loaded {} templates from {} ({} failed, {} duplicates)",
            report.loaded.len(),
            self.templates_dir.display(),
            report.failures.len(),
            report.duplicates.len()
        );

        *self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(map);
        report
    }

    fn scan(&self) -> (TemplateMap, LoadReport) {
        let mut map = TemplateMap::new();
        let mut report = LoadReport::default();

        let entries = match std::fs::read_dir(&self.templates_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Templates directory {} is not readable: {e}",
                    self.templates_dir.display()
                );
                return (map, report);
            }
        };

        let mut folders: Vec<(String, PathBuf)> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.path().is_dir())
            .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
            .filter(|(name, _)| !name.starts_with('.'))
            .collect();
        folders.sort();

        for (folder, path) in folders {
            match self.loader.load_template(&path) {
                Ok(loaded) => {
                    report.diagnostics.extend(loaded.diagnostics);
                    let id = loaded.definition.id.clone();
                    if map.contains_key(&id) {
                        warn!("Template id '{id}' in folder '{folder}' is already registered, skipped");
                        report.duplicates.push(LoadFailure {
                            folder,
                            message: format!("duplicate template id '{id}'"),
                        });
                        continue;
                    }
                    map.insert(id, Arc::new(loaded.definition));
                }
                Err(e) => {
                    warn!("Skipping template folder '{folder}': {e}");
                    report.failures.push(LoadFailure {
                        folder,
                        message: e.to_string(),
                    });
                }
            }
        }

        report.loaded = map.keys().cloned().collect();
        (map, report)
    }

    fn snapshot(&self) -> Arc<TemplateMap> {
        Arc::clone(&self.templates.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<TemplateDefinition>> {
        self.snapshot().get(id).cloned()
    }

    /// Looks up a template by id, failing when it is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if no template has this id.
    pub fn require(&self, id: &str) -> Result<Arc<TemplateDefinition>> {
        self.get(id).ok_or_else(|| Error::ResourceNotFound {
            resource: format!("template:{id}"),
        })
    }

    /// All templates, sorted by id.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<TemplateDefinition>> {
        self.snapshot().values().cloned().collect()
    }

    /// Removes a template from the registry. The folder on disk is kept,
    /// so the next reload registers it again.
    pub fn unregister(&self, id: &str) -> Option<Arc<TemplateDefinition>> {
        let mut guard = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        if !guard.contains_key(id) {
            return None;
        }
        let mut map = TemplateMap::clone(&guard);
        let removed = map.remove(id);
        *guard = Arc::new(map);
        removed
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns `true` if no template is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn add_template(dir: &Path, folder: &str, descriptor: &str) {
        let path = dir.join(folder);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("template.xml"), descriptor).unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let registry = TemplateRegistry::new(temp.path().join("nope"));
        let report = registry.reload();
        assert!(registry.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_broken_folder_does_not_stop_enumeration() {
        let temp = TempDir::new().unwrap();
        add_template(temp.path(), "a", "<template/>");
        fs::create_dir_all(temp.path().join("b-broken")).unwrap();
        add_template(temp.path(), "c", "<template/>");

        let registry = TemplateRegistry::new(temp.path());
        let report = registry.reload();

        assert_eq!(report.loaded, vec!["a", "c"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].folder, "b-broken");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_id_first_folder_wins() {
        let temp = TempDir::new().unwrap();
        add_template(temp.path(), "one", "<template><id>same</id><name>First</name></template>");
        add_template(temp.path(), "two", "<template><id>same</id><name>Second</name></template>");

        let registry = TemplateRegistry::new(temp.path());
        let report = registry.reload();

        assert_eq!(registry.get("same").unwrap().name, "First");
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].folder, "two");
    }

    #[test]
    fn test_hidden_and_plain_files_ignored() {
        let temp = TempDir::new().unwrap();
        add_template(temp.path(), ".cache", "<template/>");
        fs::write(temp.path().join("README.md"), "templates").unwrap();

        let registry = TemplateRegistry::new(temp.path());
        let report = registry.reload();
        assert!(registry.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_reload_discards_removed_templates() {
        let temp = TempDir::new().unwrap();
        add_template(temp.path(), "a", "<template/>");
        add_template(temp.path(), "b", "<template/>");

        let registry = TemplateRegistry::new(temp.path());
        registry.reload();
        assert_eq!(registry.len(), 2);

        fs::remove_dir_all(temp.path().join("b")).unwrap();
        registry.reload();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("b").is_none());
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let temp = TempDir::new().unwrap();
        add_template(temp.path(), "a", "<template><name>Old</name></template>");

        let registry = TemplateRegistry::new(temp.path());
        registry.reload();
        let held = registry.get("a").unwrap();

        add_template(temp.path(), "a", "<template><name>New</name></template>");
        registry.reload();

        assert_eq!(held.name, "Old");
        assert_eq!(registry.get("a").unwrap().name, "New");
    }

    #[test]
    fn test_unregister() {
        let temp = TempDir::new().unwrap();
        add_template(temp.path(), "a", "<template/>");
        let (registry, _) = TemplateRegistry::load(temp.path(), TemplateLoader::new());

        assert!(registry.unregister("a").is_some());
        assert!(registry.unregister("a").is_none());
        assert!(registry.is_empty());

        registry.reload();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_require_unknown() {
        let registry = TemplateRegistry::new("/nonexistent");
        let err = registry.require("missing").unwrap_err();
        assert!(err.is_not_found());
    }
}
