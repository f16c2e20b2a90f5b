//! Template data model.
//!
//! A [`TemplateDefinition`] is built once by the template loader and then
//! shared read-only (behind an `Arc`) by the registry, the generation engine
//! and the preview engine.

use crate::layout::{DEFAULT_ENCODING, is_module_marker};
use crate::types::{FieldValidator, ParameterType, ValidationResult};
use serde::Serialize;

/// A single user-configurable template parameter.
///
/// # Examples
///
/// ```
/// use scaffold_core::{ParameterSpec, ParameterType};
///
/// let param = ParameterSpec::new("moduleName", ParameterType::Text)
///     .with_display_name("Module Name")
///     .with_default("feature");
///
/// assert_eq!(param.name, "moduleName");
/// assert!(param.required);
/// assert_eq!(param.default_value, "feature");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    /// Identifier used as the substitution key
    pub name: String,
    /// Human readable label
    pub display_name: String,
    /// Longer help text
    pub description: String,
    /// Kind of value
    pub parameter_type: ParameterType,
    /// Value used when the user supplies none
    pub default_value: String,
    /// Whether a non-blank value must be supplied
    pub required: bool,
    /// Allowed values; only meaningful for dropdowns
    pub options: Option<Vec<String>>,
    /// Per-field validation
    #[serde(skip)]
    pub validator: Option<FieldValidator>,
}

impl ParameterSpec {
    /// Creates a required parameter whose display name equals its name.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: String::new(),
            parameter_type,
            default_value: String::new(),
            required: true,
            options: None,
            validator: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Sets the required flag.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the dropdown options.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches a validator.
    #[must_use]
    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Checks a (possibly absent) value against this parameter.
    ///
    /// Returns one message per violation: a missing or blank value for a
    /// required parameter, or a validator rejection. Validators only see
    /// non-blank values.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_core::{ParameterSpec, ParameterType};
    ///
    /// let param = ParameterSpec::new("moduleName", ParameterType::Text)
    ///     .with_display_name("Module Name");
    ///
    /// assert_eq!(param.check_value(None), vec!["Module Name is required".to_string()]);
    /// assert!(param.check_value(Some("payments")).is_empty());
    /// ```
    #[must_use]
    pub fn check_value(&self, value: Option<&str>) -> Vec<String> {
        let mut errors = Vec::new();
        let present = value.filter(|v| !v.trim().is_empty());

        match present {
            None if self.required => {
                errors.push(format!("{} is required", self.display_name));
            }
            None => {}
            Some(value) => {
                if let Some(validator) = &self.validator
                    && let ValidationResult::Invalid(message) = validator.validate(value)
                {
                    errors.push(message);
                }
            }
        }

        errors
    }
}

/// A directory of the output tree, template-relative, may hold placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// `/`-separated path, e.g. `${moduleName}/src/main`
    pub path: String,
}

impl DirectoryEntry {
    /// Creates a directory entry.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A templated file of the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Output path with placeholders, templating suffix already stripped
    pub path: String,
    /// Raw content with placeholders
    pub content: String,
    /// Declared output encoding
    pub encoding: String,
}

impl FileEntry {
    /// Creates a file entry with the default encoding.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    /// Overrides the output encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Returns `true` if this file is a module marker (build file).
    #[must_use]
    pub fn is_module_marker(&self) -> bool {
        is_module_marker(&self.path)
    }
}

/// Directories and files making up a template's output tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileTree {
    /// Directories to create
    pub directories: Vec<DirectoryEntry>,
    /// Files to render
    pub files: Vec<FileEntry>,
}

impl FileTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Returns `true` if the tree has neither directories nor files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    /// Paths of every file that is a module marker, in tree order.
    #[must_use]
    pub fn module_markers(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|f| f.is_module_marker())
            .map(|f| f.path.clone())
            .collect()
    }
}

/// A parsed, immutable template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDefinition {
    /// Stable identity, defaults to the folder name
    pub id: String,
    /// Display name, defaults to the id
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterSpec>,
    /// Output tree
    pub file_tree: FileTree,
    /// Folder-level build fragment template
    pub build_fragment: String,
    /// Template-relative marker paths, possibly holding placeholders
    pub module_markers: Vec<String>,
}

impl TemplateDefinition {
    /// Creates a definition with no parameters and an empty tree.
    ///
    /// The name defaults to the id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            parameters: Vec::new(),
            file_tree: FileTree::new(),
            build_fragment: String::new(),
            module_markers: Vec::new(),
        }
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
