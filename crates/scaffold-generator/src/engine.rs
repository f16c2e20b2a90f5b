//! Module generation.
//!
//! A run validates the configuration, creates the target directory, writes
//! the resolved tree and registers the derived modules in the manifest.
//! Validation and target failures abort before anything is written. Any
//! later problem is recorded as a warning and the run continues.

use crate::configuration::{MODULE_NAME_VARIABLE, ModuleConfiguration};
use crate::encoding::encode;
use crate::manifest::ManifestUpdater;
use crate::module_path::safe_join;
use crate::plan::{GenerationPlan, PlannedFile};
use crate::result::GenerationResult;
use scaffold_core::{Error, Result};
use scaffold_files::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Generates modules through a [`FileSystem`].
///
/// # Examples
///
/// ```
/// use scaffold_core::{DirectoryEntry, FileEntry, TemplateDefinition, Variables};
/// use scaffold_files::{FileSystem, MemoryFileSystem};
/// use scaffold_generator::{GenerationEngine, ModuleConfiguration};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let mut template = TemplateDefinition::new("feature");
/// template.file_tree.directories.push(DirectoryEntry::new("${moduleName}/src"));
/// template.file_tree.files.push(FileEntry::new("${moduleName}/README.md", "# ${moduleName}"));
///
/// let mut vars = Variables::new();
/// vars.insert("moduleName".to_string(), "payments".to_string());
/// let config = ModuleConfiguration::new(Arc::new(template), vars, "/proj/modules");
///
/// let fs = MemoryFileSystem::new().with_dir("/proj");
/// let result = GenerationEngine::new(&fs, "/proj").generate(&config);
///
/// assert!(result.is_success());
/// assert_eq!(
///     fs.read_to_string(Path::new("/proj/modules/payments/README.md")).unwrap(),
///     "# payments"
/// );
/// ```
#[derive(Debug)]
pub struct GenerationEngine<'a> {
    fs: &'a dyn FileSystem,
    project_root: PathBuf,
    manifest_files: Option<Vec<String>>,
}

impl<'a> GenerationEngine<'a> {
    /// Creates an engine for the project at `project_root`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, project_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            project_root: project_root.into(),
            manifest_files: None,
        }
    }

    /// Overrides the manifest names, in lookup order.
    #[must_use]
    pub fn with_manifest_files(mut self, names: Vec<String>) -> Self {
        self.manifest_files = Some(names);
        self
    }

    /// Project root used for manifest registration.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Generates the module described by `config`.
    ///
    /// Never panics and never returns early after the target directory
    /// exists: per-item problems end up in [`GenerationResult::Warning`].
    #[must_use]
    pub fn generate(&self, config: &ModuleConfiguration) -> GenerationResult {
        match self.run(config) {
            Ok(result) => result,
            Err(e) => {
                warn!("Generation from '{}' failed: {e}", config.template.id);
                GenerationResult::Failure {
                    error: failure_message(&e),
                }
            }
        }
    }

    fn run(&self, config: &ModuleConfiguration) -> Result<GenerationResult> {
        config.check()?;

        let target = &config.target_path;
        self.fs
            .create_dir_all(target)
            .map_err(|e| Error::DirectoryAccessError {
                path: target.display().to_string(),
                source: std::io::Error::other(e),
            })?;

        let plan = GenerationPlan::build(config);
        let mut warnings = Vec::new();

        for dir in &plan.directories {
            if let Err(e) = self.create_directory(target, &dir.path) {
                warn!("Cannot create directory {}: {e}", dir.template_path);
                warnings.push(format!(
                    "Error creating directory {}: {e}",
                    dir.template_path
                ));
            }
        }

        let mut generated_files = Vec::new();
        for file in &plan.files {
            match self.write_file(target, file) {
                Ok(path) => {
                    debug!("Generated {}", path.display());
                    generated_files.push(path);
                }
                Err(e) => {
                    warn!("{e}");
                    warnings.push(e.to_string());
                }
            }
        }

        if let Err(e) = self.register_modules(&plan) {
            warn!("{e}");
            warnings.push(e.to_string());
        }

        let module_label = config.module_label();
        let module_directory = self.module_directory(config);

        info!(
            "Generated module '{}' from template '{}': {} files, {} warnings",
            module_label,
            config.template.id,
            generated_files.len(),
            warnings.len()
        );

        Ok(if warnings.is_empty() {
            GenerationResult::Success {
                module_label,
                module_directory,
                generated_files,
            }
        } else {
            GenerationResult::Warning {
                module_label,
                module_directory,
                generated_files,
                warnings,
            }
        })
    }

    fn create_directory(&self, target: &Path, relative: &str) -> std::result::Result<(), String> {
        let path = safe_join(target, relative)
            .ok_or_else(|| format!("path '{relative}' escapes the target directory"))?;
        self.fs.create_dir_all(&path).map_err(|e| e.to_string())
    }

    fn write_file(&self, target: &Path, file: &PlannedFile) -> Result<PathBuf> {
        let file_error = |message: String, source: Option<Box<dyn std::error::Error + Send + Sync>>| {
            Error::FileGenerationError {
                path: file.template_path.clone(),
                message,
                source,
            }
        };

        let path = safe_join(target, &file.path)
            .filter(|p| p != target)
            .ok_or_else(|| {
                file_error(
                    format!("path '{}' escapes the target directory", file.path),
                    None,
                )
            })?;

        let bytes = encode(&file.content, &file.encoding)
            .map_err(|e| file_error(e.to_string(), Some(Box::new(e))))?;

        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|e| file_error(e.to_string(), Some(Box::new(e))))?;
        }
        self.fs
            .write(&path, &bytes)
            .map_err(|e| file_error(e.to_string(), Some(Box::new(e))))?;

        Ok(path)
    }

    fn register_modules(&self, plan: &GenerationPlan) -> Result<()> {
        if plan.module_paths.is_empty() {
            debug!("Template declares no module markers, manifest untouched");
            return Ok(());
        }

        let mut updater = ManifestUpdater::new(self.fs);
        if let Some(names) = &self.manifest_files {
            updater = updater.with_manifest_files(names.clone());
        }
        let manifest = updater.locate(&self.project_root);
        updater.update(
            manifest.as_deref(),
            &self.project_root,
            &plan.target,
            &plan.module_paths,
        )?;
        Ok(())
    }

    fn module_directory(&self, config: &ModuleConfiguration) -> PathBuf {
        let target = &config.target_path;
        config
            .variables
            .get(MODULE_NAME_VARIABLE)
            .and_then(|name| safe_join(target, name))
            .filter(|dir| dir != target && self.fs.is_dir(dir))
            .unwrap_or_else(|| target.clone())
    }
}

/// User-facing text of a fatal error.
fn failure_message(error: &Error) -> String {
    match error {
        Error::ConfigurationError { message } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::{DirectoryEntry, FileEntry, TemplateDefinition, Variables};
    use scaffold_files::MemoryFileSystem;
    use std::sync::Arc;

    fn config(files: Vec<FileEntry>, target: &str) -> ModuleConfiguration {
        let mut template = TemplateDefinition::new("t");
        template.file_tree.files = files;
        let mut vars = Variables::new();
        vars.insert("moduleName".to_string(), "payments".to_string());
        ModuleConfiguration::new(Arc::new(template), vars, target)
    }

    #[test]
    fn test_unsupported_encoding_is_warning() {
        let fs = MemoryFileSystem::new().with_dir("/proj");
        let cfg = config(
            vec![
                FileEntry::new("${moduleName}/a.txt", "a").with_encoding("UTF-16"),
                FileEntry::new("${moduleName}/b.txt", "b"),
            ],
            "/proj/modules",
        );

        let result = GenerationEngine::new(&fs, "/proj").generate(&cfg);
        assert!(result.is_warning());
        assert_eq!(
            result.warnings(),
            ["Error generating file ${moduleName}/a.txt: unsupported encoding 'UTF-16'"]
        );
        assert_eq!(
            result.generated_files(),
            [PathBuf::from("/proj/modules/payments/b.txt")]
        );
    }

    #[test]
    fn test_escaping_path_is_warning() {
        let fs = MemoryFileSystem::new().with_dir("/proj");
        let cfg = config(vec![FileEntry::new("../../etc/${moduleName}", "x")], "/proj/modules");

        let result = GenerationEngine::new(&fs, "/proj").generate(&cfg);
        assert!(result.is_warning());
        assert!(result.warnings()[0].contains("escapes the target directory"));
        assert!(!fs.exists(Path::new("/etc/payments")));
    }

    #[test]
    fn test_unwritable_target_is_failure() {
        let fs = MemoryFileSystem::new()
            .with_dir("/proj")
            .with_read_only("/proj");
        let cfg = config(vec![], "/proj/modules");

        let result = GenerationEngine::new(&fs, "/proj").generate(&cfg);
        assert!(result.is_failure());
        assert_eq!(fs.mutation_count(), 0);
    }

    #[test]
    fn test_directory_failure_is_warning() {
        let fs = MemoryFileSystem::new()
            .with_dir("/proj/modules/locked")
            .with_read_only("/proj/modules/locked");
        let mut template = TemplateDefinition::new("t");
        template.file_tree.directories = vec![
            DirectoryEntry::new("locked/inner"),
            DirectoryEntry::new("${moduleName}"),
        ];
        let mut vars = Variables::new();
        vars.insert("moduleName".to_string(), "payments".to_string());
        let cfg = ModuleConfiguration::new(Arc::new(template), vars, "/proj/modules");

        let result = GenerationEngine::new(&fs, "/proj").generate(&cfg);
        assert!(result.is_warning());
        assert!(fs.is_dir(Path::new("/proj/modules/payments")));
        assert!(result.warnings()[0].starts_with("Error creating directory locked/inner"));
    }

    #[test]
    fn test_module_directory_falls_back_to_target() {
        let fs = MemoryFileSystem::new().with_dir("/proj");
        let cfg = config(vec![FileEntry::new("README.md", "x")], "/proj/lib");

        match GenerationEngine::new(&fs, "/proj").generate(&cfg) {
            GenerationResult::Success {
                module_directory, ..
            } => assert_eq!(module_directory, PathBuf::from("/proj/lib")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
