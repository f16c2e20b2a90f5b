//! Loads one template folder into a [`TemplateDefinition`].

use crate::parser::{DiagnosticKind, ParseDiagnostic, parse_descriptor};
use crate::scanner::{ScanError, scan_structure};
use scaffold_core::layout::{BUILD_FRAGMENT_FILE, DEFAULT_ENCODING, DESCRIPTOR_FILE, ROOT_DIR};
use scaffold_core::{Error, FileTree, Result, TemplateDefinition};
use std::path::Path;
use tracing::{debug, warn};

/// A definition together with the problems tolerated while loading it.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    /// The parsed definition
    pub definition: TemplateDefinition,
    /// Recoverable descriptor problems
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Reads template folders from disk.
///
/// # Examples
///
/// ```
/// use scaffold_template::loader::TemplateLoader;
/// use std::fs;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let folder = temp.path().join("feature");
/// fs::create_dir_all(folder.join("root/${moduleName}")).unwrap();
/// fs::write(folder.join("template.xml"), "<template><name>Feature</name></template>").unwrap();
/// fs::write(folder.join("root/${moduleName}/build.gradle.kts.ftl"), "").unwrap();
///
/// let loaded = TemplateLoader::new().load_template(&folder).unwrap();
/// assert_eq!(loaded.definition.id, "feature");
/// assert_eq!(loaded.definition.module_markers, vec!["${moduleName}/build.gradle.kts"]);
/// ```
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    default_encoding: String,
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateLoader {
    /// Creates a loader using `UTF-8` as file encoding.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    /// Sets the encoding assigned to every scanned file.
    #[must_use]
    pub fn with_default_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.default_encoding = encoding.into();
        self
    }

    /// Encoding assigned to every scanned file.
    #[must_use]
    pub fn default_encoding(&self) -> &str {
        &self.default_encoding
    }

    /// Loads the template stored in `folder`.
    ///
    /// A folder without `root/` yields an empty tree; a missing build
    /// fragment yields an empty fragment, an unreadable one also adds a
    /// diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateParseError`] if `template.xml` is missing or
    /// unreadable, or if the output tree cannot be scanned.
    pub fn load_template(&self, folder: &Path) -> Result<LoadedTemplate> {
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parse_error = |message: String| Error::TemplateParseError {
            template: folder_name.clone(),
            message,
        };

        let descriptor_path = folder.join(DESCRIPTOR_FILE);
        if !descriptor_path.is_file() {
            return Err(parse_error(format!("{DESCRIPTOR_FILE} not found")));
        }
        let content = std::fs::read_to_string(&descriptor_path)
            .map_err(|e| parse_error(format!("cannot read {DESCRIPTOR_FILE}: {e}")))?;

        let outcome = parse_descriptor(&content, &folder_name);
        let mut diagnostics = outcome.diagnostics;

        let root = folder.join(ROOT_DIR);
        let mut file_tree = match scan_structure(&root) {
            Ok(tree) => tree,
            Err(ScanError::RootNotFound { .. }) => {
                debug!("Template '{folder_name}' has no {ROOT_DIR}/ directory");
                FileTree::new()
            }
            Err(e) => return Err(parse_error(e.to_string())),
        };
        for file in &mut file_tree.files {
            file.encoding.clone_from(&self.default_encoding);
        }

        let fragment_path = folder.join(BUILD_FRAGMENT_FILE);
        let build_fragment = if fragment_path.is_file() {
            std::fs::read_to_string(&fragment_path).unwrap_or_else(|e| {
                warn!("Template '{folder_name}': cannot read {BUILD_FRAGMENT_FILE}: {e}");
                diagnostics.push(ParseDiagnostic {
                    template: folder_name.clone(),
                    parameter: None,
                    kind: DiagnosticKind::UnreadableBuildFragment,
                    message: format!("cannot read {BUILD_FRAGMENT_FILE}: {e}"),
                });
                String::new()
            })
        } else {
            String::new()
        };

        let descriptor = outcome.descriptor;
        let module_markers = file_tree.module_markers();
        let definition = TemplateDefinition {
            id: descriptor.id,
            name: descriptor.name,
            description: descriptor.description,
            parameters: descriptor.parameters,
            file_tree,
            build_fragment,
            module_markers,
        };

        debug!(
            "Loaded template '{}' from {}: {} directories, {} files, {} markers",
            definition.id,
            folder.display(),
            definition.file_tree.directories.len(),
            definition.file_tree.files.len(),
            definition.module_markers.len()
        );

        Ok(LoadedTemplate {
            definition,
            diagnostics,
        })
    }
}
