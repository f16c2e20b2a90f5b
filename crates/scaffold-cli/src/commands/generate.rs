//! Generate command implementation.
//!
//! Binds a template to `--var` values and writes the module under the
//! target directory, registering derived modules in the manifest.

use super::common::{Workspace, build_configuration};
use anyhow::Result;
use scaffold_core::cli::{ExitCode, OutputFormat, VariableAssignment};
use scaffold_files::{DiskFileSystem, FileSystem};
use scaffold_generator::{GenerationEngine, GenerationResult, ModuleConfiguration};
use std::path::PathBuf;
use tracing::{info, warn};

/// Generates a configured module through `fs`.
#[must_use]
pub fn generate_module(
    fs: &dyn FileSystem,
    workspace: &Workspace,
    config: &ModuleConfiguration,
) -> GenerationResult {
    GenerationEngine::new(fs, &workspace.project_root)
        .with_manifest_files(workspace.settings.manifest_files.clone())
        .generate(config)
}

/// Exit code for a generation outcome.
#[must_use]
pub const fn exit_code(result: &GenerationResult) -> ExitCode {
    match result {
        GenerationResult::Success { .. } => ExitCode::SUCCESS,
        GenerationResult::Warning { .. } => ExitCode::WARNING,
        GenerationResult::Failure { .. } => ExitCode::ERROR,
    }
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if the template does not exist or output formatting
/// fails. Generation problems are reported in the output and the exit code.
pub fn run(
    workspace: &Workspace,
    id: &str,
    vars: Vec<VariableAssignment>,
    target: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let template = workspace.require_template(id)?;
    let config = build_configuration(template, vars, workspace.target_path(target.as_deref()));
    info!(
        "Generating '{}' from template '{id}' into {}",
        config.module_label(),
        config.target_path.display()
    );

    let fs = DiskFileSystem::new();
    let result = generate_module(&fs, workspace, &config);
    for warning in result.warnings() {
        warn!("{warning}");
    }

    let formatted = crate::formatters::format_output(&result, output_format)?;
    println!("{formatted}");

    Ok(exit_code(&result))
}
