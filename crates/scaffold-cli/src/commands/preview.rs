//! Preview command implementation.
//!
//! Shows the directories, files and manifest entries `generate` would
//! produce. Reads the manifest; writes nothing.

use super::common::{Workspace, build_configuration};
use anyhow::Result;
use scaffold_core::cli::{ExitCode, OutputFormat, VariableAssignment};
use scaffold_files::{DiskFileSystem, FileSystem};
use scaffold_generator::{GenerationPreview, ModuleConfiguration, PreviewEngine};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Preview of one generation request.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    /// Template id
    pub template: String,
    /// Target directory
    pub target: PathBuf,
    /// Validation errors that would make `generate` fail
    pub errors: Vec<String>,
    /// What would be written
    #[serde(flatten)]
    pub preview: GenerationPreview,
}

/// Previews a configuration through `fs`.
#[must_use]
pub fn preview_configuration(
    fs: &dyn FileSystem,
    workspace: &Workspace,
    config: &ModuleConfiguration,
) -> PreviewReport {
    let engine = PreviewEngine::new(fs, &workspace.project_root)
        .with_manifest_files(workspace.settings.manifest_files.clone());

    PreviewReport {
        template: config.template.id.clone(),
        target: config.target_path.clone(),
        errors: config.validate(),
        preview: engine.preview(config),
    }
}

/// Runs the preview command.
///
/// Exits with [`ExitCode::INVALID_INPUT`] when the variables would be
/// rejected by `generate`.
///
/// # Errors
///
/// Returns an error if the template does not exist or output formatting
/// fails.
pub fn run(
    workspace: &Workspace,
    id: &str,
    vars: Vec<VariableAssignment>,
    target: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let template = workspace.require_template(id)?;
    let config = build_configuration(template, vars, workspace.target_path(target.as_deref()));

    let fs = DiskFileSystem::new();
    let report = preview_configuration(&fs, workspace, &config);

    info!(
        "Preview of '{id}': {} directories, {} files",
        report.preview.directories.len(),
        report.preview.files.len()
    );

    let formatted = crate::formatters::format_output(&report, output_format)?;
    println!("{formatted}");

    Ok(if report.errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::INVALID_INPUT
    })
}
