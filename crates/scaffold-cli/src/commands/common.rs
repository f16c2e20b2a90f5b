//! Common utilities shared across CLI commands.
//!
//! Resolves the project and template folders from the global flags and
//! settings, and turns `--var` assignments into a [`ModuleConfiguration`].

use anyhow::{Context, Result};
use scaffold_core::cli::VariableAssignment;
use scaffold_core::{ScaffoldSettings, TemplateDefinition, Variables};
use scaffold_generator::ModuleConfiguration;
use scaffold_template::{LoadReport, TemplateLoader, TemplateRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// The project a command operates on.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Project root; manifest lookup and relative targets start here
    pub project_root: PathBuf,
    /// Folder holding one sub-folder per template
    pub templates_dir: PathBuf,
    /// Settings read from `<project_root>/scaffold.toml`
    pub settings: ScaffoldSettings,
}

impl Workspace {
    /// Resolves the workspace from the global CLI flags.
    ///
    /// The project root defaults to the current directory and is made
    /// absolute, so manifest entries compare it against absolute targets
    /// consistently. The template folder is `templates_dir` if given, else whatever the project
    /// settings resolve to.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or
    /// `scaffold.toml` is malformed.
    pub fn resolve(project_root: Option<PathBuf>, templates_dir: Option<PathBuf>) -> Result<Self> {
        let project_root = match project_root {
            Some(root) => root,
            None => std::env::current_dir().context("failed to determine current directory")?,
        };
        let project_root = std::path::absolute(&project_root)
            .with_context(|| format!("failed to resolve project root {}", project_root.display()))?;

        let settings = ScaffoldSettings::load(&project_root)
            .with_context(|| format!("failed to load settings for {}", project_root.display()))?;

        let templates_dir = match templates_dir {
            Some(dir) => dir,
            None => settings
                .resolve_templates_dir(Some(&project_root))
                .context("failed to resolve template folder")?,
        };

        debug!(
            "Project root {}, templates {}",
            project_root.display(),
            templates_dir.display()
        );

        Ok(Self {
            project_root,
            templates_dir,
            settings,
        })
    }

    /// Loader configured with the project's default encoding.
    #[must_use]
    pub fn loader(&self) -> TemplateLoader {
        TemplateLoader::new().with_default_encoding(self.settings.default_encoding.clone())
    }

    /// Loads every template in the template folder.
    #[must_use]
    pub fn load_registry(&self) -> (TemplateRegistry, LoadReport) {
        TemplateRegistry::load(&self.templates_dir, self.loader())
    }

    /// Loads the registry and looks up one template.
    ///
    /// # Errors
    ///
    /// Returns a `ResourceNotFound` error if no template has this id.
    pub fn require_template(&self, id: &str) -> Result<Arc<TemplateDefinition>> {
        let (registry, _) = self.load_registry();
        Ok(registry.require(id)?)
    }

    /// Target directory: `target` resolved against the project root, or
    /// the project root itself.
    #[must_use]
    pub fn target_path(&self, target: Option<&Path>) -> PathBuf {
        target.map_or_else(|| self.project_root.clone(), |t| self.project_root.join(t))
    }
}

/// Collects assignments into variables; a later assignment wins.
#[must_use]
pub fn build_variables(vars: Vec<VariableAssignment>) -> Variables {
    vars.into_iter().map(VariableAssignment::into_pair).collect()
}

/// Binds a template to CLI variables, filling the rest from defaults.
#[must_use]
pub fn build_configuration(
    template: Arc<TemplateDefinition>,
    vars: Vec<VariableAssignment>,
    target: PathBuf,
) -> ModuleConfiguration {
    ModuleConfiguration::new(template, build_variables(vars), target).with_defaults()
}
