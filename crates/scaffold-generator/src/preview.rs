//! Dry-run preview of a generation run.

use crate::configuration::ModuleConfiguration;
use crate::encoding::encoded_len;
use crate::manifest::ManifestUpdater;
use crate::plan::{GenerationPlan, path_level};
use crate::result::{GenerationPreview, PreviewDirectory, PreviewFile};
use scaffold_files::FileSystem;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Computes previews. Only reads the manifest; never writes.
#[derive(Debug)]
pub struct PreviewEngine<'a> {
    fs: &'a dyn FileSystem,
    project_root: PathBuf,
    manifest_files: Option<Vec<String>>,
}

impl<'a> PreviewEngine<'a> {
    /// Creates a preview engine for the project at `project_root`.
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

    /// Project root used for manifest entries.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Describes what generating `config` would do.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_core::{DirectoryEntry, FileEntry, TemplateDefinition, Variables};
    /// use scaffold_files::MemoryFileSystem;
    /// use scaffold_generator::{ModuleConfiguration, PreviewEngine};
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
    /// let preview = PreviewEngine::new(&fs, "/proj").preview(&config);
    ///
    /// assert_eq!(preview.directories[0].path, "payments/src");
    /// assert_eq!(preview.files[0].size, 10);
    /// assert_eq!(fs.mutation_count(), 0);
    /// ```
    #[must_use]
    pub fn preview(&self, config: &ModuleConfiguration) -> GenerationPreview {
        let plan = GenerationPlan::build(config);

        let directories = plan
            .directories
            .iter()
            .map(|dir| PreviewDirectory {
                level: path_level(&dir.path),
                path: dir.path.clone(),
            })
            .collect();

        let files = plan
            .files
            .iter()
            .map(|file| PreviewFile {
                level: path_level(&file.path),
                size: encoded_len(&file.content, &file.encoding),
                path: file.path.clone(),
            })
            .collect();

        let manifest_changes = self.manifest_changes(&plan);

        debug!(
            "Preview of '{}': {} directories, {} files, {} manifest lines",
            config.template.id,
            plan.directories.len(),
            plan.files.len(),
            manifest_changes.len()
        );

        GenerationPreview {
            directories,
            files,
            manifest_changes,
        }
    }

    fn manifest_changes(&self, plan: &GenerationPlan) -> Vec<String> {
        let mut updater = ManifestUpdater::new(self.fs);
        if let Some(names) = &self.manifest_files {
            updater = updater.with_manifest_files(names.clone());
        }
        let manifest = updater.locate(&self.project_root);

        match updater.plan(
            manifest.as_deref(),
            &self.project_root,
            &plan.target,
            &plan.module_paths,
        ) {
            Ok(change) => change.describe(),
            Err(e) => vec![format!("Cannot read settings.gradle(.kts): {e}")],
        }
    }
}
