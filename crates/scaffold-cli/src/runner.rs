//! Command execution and runtime logic.
//!
//! Contains command routing, logging initialization and the mapping from
//! errors to process exit codes.

use anyhow::{Result, anyhow};
use clap::CommandFactory;
use scaffold_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands::{self, common::Workspace};

/// Initializes logging infrastructure.
///
/// `verbose` forces the `debug` level; otherwise `RUST_LOG` applies, with
/// `info` as fallback. Logs go to stderr so stdout stays parseable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

/// Executes the parsed command line.
///
/// # Errors
///
/// Returns an error if the output format is unknown, the workspace cannot
/// be resolved, or the command fails.
pub fn execute(cli: Cli) -> Result<ExitCode> {
    let output_format: OutputFormat = cli.format.parse()?;

    if let Commands::Completions { shell } = cli.command {
        return Ok(commands::completions::run(shell, &mut Cli::command()));
    }

    let workspace = Workspace::resolve(cli.project_root, cli.templates_dir)?;
    execute_command(&workspace, cli.command, output_format)
}

/// Routes a command to its handler.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn execute_command(
    workspace: &Workspace,
    command: Commands,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::List => commands::list::run(workspace, output_format),
        Commands::Show { id } => commands::show::run(workspace, &id, output_format),
        Commands::Check { id, vars } => commands::check::run(workspace, &id, vars, output_format),
        Commands::Preview { id, vars, target } => {
            commands::preview::run(workspace, &id, vars, target, output_format)
        }
        Commands::Generate { id, vars, target } => {
            commands::generate::run(workspace, &id, vars, target, output_format)
        }
        Commands::New {
            id,
            name,
            description,
            params,
        } => commands::new::run(workspace, &id, name, description, params, output_format),
        Commands::Completions { shell } => Ok(commands::completions::run(shell, &mut Cli::command())),
    }
}

/// Exit code for an error that aborted a command.
///
/// Unknown templates map to [`ExitCode::NOT_FOUND`], rejected input to
/// [`ExitCode::INVALID_INPUT`], everything else to [`ExitCode::ERROR`].
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<scaffold_core::Error>() {
        Some(e) if e.is_not_found() => ExitCode::NOT_FOUND,
        Some(
            scaffold_core::Error::InvalidArgument(_) | scaffold_core::Error::ValidationError { .. },
        ) => ExitCode::INVALID_INPUT,
        _ => ExitCode::ERROR,
    }
}
