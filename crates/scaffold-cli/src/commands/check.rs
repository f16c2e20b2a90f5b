//! Check command implementation.
//!
//! Validates variable values against a template without touching the
//! project.

use super::common::{Workspace, build_configuration};
use anyhow::Result;
use scaffold_core::cli::{ExitCode, OutputFormat, VariableAssignment};
use scaffold_core::Variables;
use scaffold_generator::ModuleConfiguration;
use scaffold_template::missing_for_template;
use serde::Serialize;
use tracing::info;

/// Outcome of checking a configuration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    /// Template id
    pub template: String,
    /// `true` when generation would not be rejected
    pub valid: bool,
    /// Validation errors, in parameter order
    pub errors: Vec<String>,
    /// Placeholders without a value; they are left verbatim in the output
    pub unresolved: Vec<String>,
    /// Effective values, defaults included
    pub variables: Variables,
}

/// Checks a configuration.
#[must_use]
pub fn check_configuration(config: &ModuleConfiguration) -> CheckReport {
    let errors = config.validate();
    CheckReport {
        template: config.template.id.clone(),
        valid: errors.is_empty(),
        errors,
        unresolved: missing_for_template(&config.template, &config.variables),
        variables: config.variables.clone(),
    }
}

/// Runs the check command.
///
/// Exits with [`ExitCode::INVALID_INPUT`] when validation fails.
///
/// # Errors
///
/// Returns an error if the template does not exist or output formatting
/// fails.
pub fn run(
    workspace: &Workspace,
    id: &str,
    vars: Vec<VariableAssignment>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let template = workspace.require_template(id)?;
    let config = build_configuration(template, vars, workspace.target_path(None));
    let report = check_configuration(&config);

    info!(
        "Checked '{id}': {} errors, {} unresolved placeholders",
        report.errors.len(),
        report.unresolved.len()
    );

    let formatted = crate::formatters::format_output(&report, output_format)?;
    println!("{formatted}");

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::INVALID_INPUT
    })
}
