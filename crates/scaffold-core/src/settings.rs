//! Project-level scaffolding settings.
//!
//! Settings live in `<project>/scaffold.toml`. Every key is optional; a
//! missing file yields the defaults.
//!
//! ```toml
//! templates_dir = "tools/templates"
//! manifest_files = ["settings.gradle.kts"]
//! default_encoding = "UTF-8"
//! ```
//!
//! # Examples
//!
//! ```
//! use scaffold_core::ScaffoldSettings;
//! use std::path::Path;
//!
//! let settings = ScaffoldSettings::from_toml_str("templates_dir = \"templates\"").unwrap();
//! assert_eq!(
//!     settings.resolve_templates_dir(Some(Path::new("/proj"))),
//!     Some(Path::new("/proj/templates").to_path_buf())
//! );
//! ```

use crate::layout::{DEFAULT_ENCODING, MANIFEST_FILES};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file name at the project root.
pub const SETTINGS_FILE: &str = "scaffold.toml";

/// Default template folder relative to the project root.
pub const PROJECT_TEMPLATES_DIR: &str = ".idea/kmp-templates";

/// Default template folder relative to the home directory.
pub const HOME_TEMPLATES_DIR: &str = ".kmp-templates";

/// Scaffolding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldSettings {
    /// Custom template folder; relative paths are resolved against the
    /// project root
    pub templates_dir: Option<PathBuf>,

    /// Manifest file names, in lookup order
    pub manifest_files: Vec<String>,

    /// Encoding for file entries that do not declare one
    pub default_encoding: String,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            templates_dir: None,
            manifest_files: MANIFEST_FILES.iter().map(ToString::to_string).collect(),
            default_encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl ScaffoldSettings {
    /// Parses settings from TOML text and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingsError`] if the text is not valid TOML, has
    /// unknown keys, or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(|e| Error::SettingsError {
            message: format!("failed to parse {SETTINGS_FILE}"),
            source: Some(e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `<project_root>/scaffold.toml`, or the defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingsError`] if the file exists but cannot be read
    /// or parsed.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(SETTINGS_FILE);
        if !path.is_file() {
            debug!("No {} in {}, using defaults", SETTINGS_FILE, project_root.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::SettingsError {
            message: format!("failed to read {}: {e}", path.display()),
            source: None,
        })?;

        debug!("Loaded settings from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Validates settings values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingsError`] if no manifest file name is given, a
    /// manifest name is blank or contains a path separator, or the default
    /// encoding is blank.
    pub fn validate(&self) -> Result<()> {
        if self.manifest_files.is_empty() {
            return Err(settings_error("manifest_files cannot be empty"));
        }
        for name in &self.manifest_files {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(settings_error(format!(
                    "invalid manifest file name '{name}'"
                )));
            }
        }
        if self.default_encoding.trim().is_empty() {
            return Err(settings_error("default_encoding cannot be empty"));
        }
        Ok(())
    }

    /// Resolves the template folder.
    ///
    /// An explicit `templates_dir` wins. Otherwise the project's
    /// `.idea/kmp-templates` is used, or `~/.kmp-templates` when there is no
    /// project. Returns `None` only when no project root is given and the
    /// home directory is unknown.
    #[must_use]
    pub fn resolve_templates_dir(&self, project_root: Option<&Path>) -> Option<PathBuf> {
        match (&self.templates_dir, project_root) {
            (Some(dir), Some(root)) if dir.is_relative() => Some(root.join(dir)),
            (Some(dir), _) => Some(dir.clone()),
            (None, Some(root)) => Some(root.join(PROJECT_TEMPLATES_DIR)),
            (None, None) => dirs::home_dir().map(|home| home.join(HOME_TEMPLATES_DIR)),
        }
    }
}

fn settings_error(message: impl Into<String>) -> Error {
    Error::SettingsError {
        message: message.into(),
        source: None,
    }
}
