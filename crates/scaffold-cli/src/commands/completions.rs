//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use clap::Command;
use clap_complete::{Shell, generate};
use scaffold_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::debug;

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    debug!("Generating {shell} completions");
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::Shell;
/// use scaffold_cli::commands::completions;
///
/// let mut cmd = Command::new("scaffold");
/// completions::run(Shell::Bash, &mut cmd);
/// ```
pub fn run(shell: Shell, cmd: &mut Command) -> ExitCode {
    write_completions(shell, cmd, &mut io::stdout());
    ExitCode::SUCCESS
}
