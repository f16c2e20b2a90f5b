//! New command implementation.
//!
//! Creates a template folder from the command line.

use super::common::Workspace;
use anyhow::{Context, Result};
use scaffold_core::cli::{ExitCode, OutputFormat, VariableAssignment};
use scaffold_core::{ParameterSpec, ParameterType, TemplateDefinition};
use scaffold_files::{DiskFileSystem, FileSystem};
use scaffold_template::TemplateAuthor;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// A freshly created template folder.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatedTemplate {
    /// Template id
    pub id: String,
    /// Folder that was written
    pub path: PathBuf,
    /// Parameter names, in declaration order
    pub parameters: Vec<String>,
}

/// Builds a definition from `new` arguments.
///
/// Parameter types are matched case-insensitively (`package` is `PACKAGE`).
///
/// # Errors
///
/// Returns an error if a parameter type is unknown.
pub fn build_definition(
    id: &str,
    name: Option<String>,
    description: String,
    params: Vec<VariableAssignment>,
) -> Result<TemplateDefinition> {
    let mut definition = TemplateDefinition::new(id);
    if let Some(name) = name {
        definition.name = name;
    }
    definition.description = description;

    for param in params {
        let parameter_type: ParameterType = param
            .value()
            .trim()
            .to_ascii_uppercase()
            .parse()
            .with_context(|| format!("invalid type for parameter '{}'", param.name()))?;
        definition
            .parameters
            .push(ParameterSpec::new(param.name(), parameter_type));
    }

    Ok(definition)
}

/// Writes the template folder through `fs`.
///
/// # Errors
///
/// Returns an error if the definition is invalid, the folder already
/// exists, or a file cannot be written.
pub fn create_template(
    fs: &dyn FileSystem,
    workspace: &Workspace,
    definition: &TemplateDefinition,
) -> Result<CreatedTemplate> {
    let author = TemplateAuthor::new()?;
    let path = author.create_template(fs, &workspace.templates_dir, definition)?;
    Ok(CreatedTemplate {
        id: definition.id.clone(),
        path,
        parameters: definition.parameters.iter().map(|p| p.name.clone()).collect(),
    })
}

/// Runs the new command.
///
/// # Errors
///
/// Returns an error if the template cannot be created or output
/// formatting fails.
pub fn run(
    workspace: &Workspace,
    id: &str,
    name: Option<String>,
    description: String,
    params: Vec<VariableAssignment>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let definition = build_definition(id, name, description, params)?;
    let created = create_template(&DiskFileSystem::new(), workspace, &definition)?;
    info!("Created template '{}' in {}", created.id, created.path.display());

    let formatted = crate::formatters::format_output(&created, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}
