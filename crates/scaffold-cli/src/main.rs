//! `scaffold` binary entry point.

use clap::Parser;
use colored::Colorize;
use scaffold_cli::Cli;
use scaffold_cli::runner::{execute, exit_code_for, init_logging};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{} {e:#}", "warning:".yellow().bold());
    }

    let exit_code = execute(cli).unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "error:".red().bold());
        exit_code_for(&e)
    });

    std::process::exit(exit_code.as_i32());
}
