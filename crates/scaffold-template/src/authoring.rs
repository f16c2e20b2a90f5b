//! Writing new template folders.
//!
//! The descriptor and the README are rendered from built-in Handlebars
//! templates. A rendered descriptor parses back into the same metadata and
//! parameters it was rendered from.
//!
//! # Examples
//!
//! ```
//! use scaffold_core::{ParameterSpec, ParameterType, TemplateDefinition};
//! use scaffold_template::authoring::TemplateAuthor;
//! use scaffold_template::parser::parse_descriptor;
//!
//! let mut definition = TemplateDefinition::new("feature");
//! definition.name = "Feature & Domain".to_string();
//! definition
//!     .parameters
//!     .push(ParameterSpec::new("moduleName", ParameterType::Text).with_display_name("Module Name"));
//!
//! let author = TemplateAuthor::new().unwrap();
//! let xml = author.render_descriptor(&definition).unwrap();
//!
//! let parsed = parse_descriptor(&xml, "feature").descriptor;
//! assert_eq!(parsed.name, "Feature & Domain");
//! assert_eq!(parsed.parameters[0].display_name, "Module Name");
//! ```

use handlebars::Handlebars;
use regex::Regex;
use scaffold_core::layout::{BUILD_FRAGMENT_FILE, DESCRIPTOR_FILE, ROOT_DIR};
use scaffold_core::{Error, ParameterSpec, Result, TemplateDefinition};
use scaffold_files::FileSystem;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::info;

static TEMPLATE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid regex"));
static PARAMETER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// Build file placed in `root/` of every new template.
const DEFAULT_BUILD_FILE: &str = include_str!("../templates/build.gradle.kts");

/// README file name of a template folder.
pub const README_FILE: &str = "README.md";

#[derive(Debug, Serialize)]
struct DescriptorContext<'d> {
    id: &'d str,
    name: &'d str,
    description: &'d str,
    parameters: Vec<ParameterContext<'d>>,
}

#[derive(Debug, Serialize)]
struct ParameterContext<'d> {
    name: &'d str,
    display_name: &'d str,
    description: &'d str,
    parameter_type: &'static str,
    default_value: &'d str,
    options: String,
    required: bool,
    placeholder: String,
}

impl<'d> ParameterContext<'d> {
    fn from_spec(spec: &'d ParameterSpec) -> Self {
        Self {
            name: &spec.name,
            display_name: &spec.display_name,
            description: &spec.description,
            parameter_type: spec.parameter_type.as_str(),
            default_value: &spec.default_value,
            options: spec.options.as_ref().map(|o| o.join(", ")).unwrap_or_default(),
            required: spec.required,
            placeholder: format!("${{{}}}", spec.name),
        }
    }
}

impl<'d> DescriptorContext<'d> {
    fn from_definition(definition: &'d TemplateDefinition) -> Self {
        Self {
            id: &definition.id,
            name: &definition.name,
            description: &definition.description,
            parameters: definition
                .parameters
                .iter()
                .map(ParameterContext::from_spec)
                .collect(),
        }
    }
}

/// Renders and writes template folders.
#[derive(Debug)]
pub struct TemplateAuthor<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateAuthor<'_> {
    /// Creates an author with the built-in documents registered.
    ///
    /// # Errors
    ///
    /// Returns error if a built-in template fails to register.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string("descriptor", include_str!("../templates/descriptor.xml.hbs"))
            .map_err(|e| Error::InvalidArgument(format!("Failed to register descriptor template: {e}")))?;
        handlebars
            .register_template_string("readme", include_str!("../templates/readme.md.hbs"))
            .map_err(|e| Error::InvalidArgument(format!("Failed to register readme template: {e}")))?;

        Ok(Self { handlebars })
    }

    fn render(&self, name: &str, definition: &TemplateDefinition) -> Result<String> {
        self.handlebars
            .render(name, &DescriptorContext::from_definition(definition))
            .map_err(|e| Error::TemplateParseError {
                template: definition.id.clone(),
                message: format!("{name} rendering failed: {e}"),
            })
    }

    /// Renders `template.xml` for a definition. Text is XML-escaped.
    ///
    /// # Errors
    ///
    /// Returns error if rendering fails.
    pub fn render_descriptor(&self, definition: &TemplateDefinition) -> Result<String> {
        self.render("descriptor", definition)
    }

    /// Renders the folder's `README.md`.
    ///
    /// # Errors
    ///
    /// Returns error if rendering fails.
    pub fn render_readme(&self, definition: &TemplateDefinition) -> Result<String> {
        self.render("readme", definition)
    }

    /// Creates `<templates_dir>/<id>/` with `template.xml`, a starter
    /// `root/build.gradle.kts.ftl` and `README.md`.
    ///
    /// The file tree of `definition` is not written; templates are filled
    /// in by hand afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the id, the name or a parameter
    /// name is invalid, or if a folder with this id already exists. Returns
    /// [`Error::DirectoryAccessError`] if a file cannot be written.
    pub fn create_template(
        &self,
        fs: &dyn FileSystem,
        templates_dir: &Path,
        definition: &TemplateDefinition,
    ) -> Result<PathBuf> {
        validate_definition(definition)?;

        let folder = templates_dir.join(&definition.id);
        if fs.exists(&folder) {
            return Err(Error::ValidationError {
                field: "id".to_string(),
                reason: format!("Template with ID '{}' already exists", definition.id),
            });
        }

        let descriptor = self.render_descriptor(definition)?;
        let readme = self.render_readme(definition)?;

        let root = folder.join(ROOT_DIR);
        let io_error = |path: &Path, e: scaffold_files::FilesError| Error::DirectoryAccessError {
            path: path.display().to_string(),
            source: std::io::Error::other(e),
        };

        fs.create_dir_all(&root).map_err(|e| io_error(&root, e))?;
        for (path, content) in [
            (folder.join(DESCRIPTOR_FILE), descriptor.as_str()),
            (root.join(BUILD_FRAGMENT_FILE), DEFAULT_BUILD_FILE),
            (folder.join(README_FILE), readme.as_str()),
        ] {
            fs.write(&path, content.as_bytes())
                .map_err(|e| io_error(&path, e))?;
        }

        info!("Created template '{}' in {}", definition.id, folder.display());
        Ok(folder)
    }
}

fn validate_definition(definition: &TemplateDefinition) -> Result<()> {
    let invalid = |field: &str, reason: String| Error::ValidationError {
        field: field.to_string(),
        reason,
    };

    if definition.id.trim().is_empty() {
        return Err(invalid("id", "Template ID is required".to_string()));
    }
    if !TEMPLATE_ID_REGEX.is_match(&definition.id) {
        return Err(invalid(
            "id",
            "Template ID must start with lowercase letter and contain only lowercase, numbers, and hyphens"
                .to_string(),
        ));
    }
    if definition.name.trim().is_empty() {
        return Err(invalid("name", "Template name is required".to_string()));
    }

    let mut seen = HashSet::new();
    for parameter in &definition.parameters {
        if !PARAMETER_NAME_REGEX.is_match(&parameter.name) {
            return Err(invalid(
                "parameters",
                format!("'{}' is not a valid parameter name", parameter.name),
            ));
        }
        if !seen.insert(parameter.name.as_str()) {
            return Err(invalid(
                "parameters",
                format!("Parameter with name '{}' already exists", parameter.name),
            ));
        }
    }
    Ok(())
}
