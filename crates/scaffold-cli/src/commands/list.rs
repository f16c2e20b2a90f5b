//! List command implementation.
//!
//! Loads the template folder and reports every template, plus the folders
//! that failed to load or lost an id clash.

use super::common::Workspace;
use anyhow::Result;
use scaffold_core::TemplateDefinition;
use scaffold_core::cli::{ExitCode, OutputFormat};
use scaffold_template::{LoadFailure, LoadReport, ParseDiagnostic};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// One loaded template.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TemplateSummary {
    /// Template id
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Number of parameters
    pub parameters: usize,
    /// Number of files in the output tree
    pub files: usize,
}

impl From<&TemplateDefinition> for TemplateSummary {
    fn from(template: &TemplateDefinition) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            parameters: template.parameters.len(),
            files: template.file_tree.files.len(),
        }
    }
}

/// Result of listing the template folder.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateList {
    /// Folder that was scanned
    pub templates_dir: PathBuf,
    /// Loaded templates, sorted by id
    pub templates: Vec<TemplateSummary>,
    /// Folders that could not be loaded
    pub failures: Vec<LoadFailure>,
    /// Folders skipped because their id was already taken
    pub duplicates: Vec<LoadFailure>,
    /// Parameter blocks that were skipped or corrected
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Builds the listing for a workspace.
#[must_use]
pub fn list_templates(workspace: &Workspace) -> (TemplateList, LoadReport) {
    let (registry, report) = workspace.load_registry();
    let list = TemplateList {
        templates_dir: workspace.templates_dir.clone(),
        templates: registry
            .all()
            .iter()
            .map(|t| TemplateSummary::from(t.as_ref()))
            .collect(),
        failures: report.failures.clone(),
        duplicates: report.duplicates.clone(),
        diagnostics: report.diagnostics.clone(),
    };
    (list, report)
}

/// Runs the list command.
///
/// Exits with [`ExitCode::WARNING`] when some template folder was broken.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn run(workspace: &Workspace, output_format: OutputFormat) -> Result<ExitCode> {
    let (list, report) = list_templates(workspace);
    info!(
        "Found {} templates in {}",
        list.templates.len(),
        workspace.templates_dir.display()
    );

    let formatted = crate::formatters::format_output(&list, output_format)?;
    println!("{formatted}");

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::WARNING
    })
}
