//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use scaffold_core::cli::VariableAssignment;
use std::path::PathBuf;

/// Template-driven scaffolding of Gradle modules.
///
/// Reads template folders (`template.xml` plus a `root/` tree of `.ftl`
/// files), substitutes `${name}` placeholders and registers generated
/// modules in `settings.gradle(.kts)`.
#[derive(Parser, Debug)]
#[command(name = "scaffold")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Template folder (default: <project>/.idea/kmp-templates)
    #[arg(long, global = true, env = "SCAFFOLD_TEMPLATES_DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Project root holding settings.gradle(.kts) (default: current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the templates found in the template folder.
    ///
    /// Broken template folders are reported next to the loaded ones.
    List,

    /// Show a template's parameters and file tree.
    Show {
        /// Template id
        id: String,
    },

    /// Check variable values against a template without writing anything.
    ///
    /// Reports validation errors and placeholders left without a value.
    ///
    /// # Examples
    ///
    /// ```bash
    /// scaffold check feature --var moduleName=payments
    /// ```
    Check {
        /// Template id
        id: String,

        /// Variable values in NAME=VALUE format
        #[arg(long = "var", value_name = "NAME=VALUE", num_args = 1)]
        vars: Vec<VariableAssignment>,
    },

    /// Show what `generate` would write, without writing.
    ///
    /// # Examples
    ///
    /// ```bash
    /// scaffold preview feature --var moduleName=payments --target modules
    /// ```
    Preview {
        /// Template id
        id: String,

        /// Variable values in NAME=VALUE format
        #[arg(long = "var", value_name = "NAME=VALUE", num_args = 1)]
        vars: Vec<VariableAssignment>,

        /// Target directory, relative to the project root
        /// (default: project root)
        #[arg(short, long)]
        target: Option<PathBuf>,
    },

    /// Generate a module from a template.
    ///
    /// Parameter defaults fill variables that are not given. Modules derived
    /// from the template's build files are added to settings.gradle(.kts).
    ///
    /// # Examples
    ///
    /// ```bash
    /// scaffold generate feature \
    ///     --var moduleName=payments \
    ///     --var packageName=com.example.payments \
    ///     --target modules
    /// ```
    Generate {
        /// Template id
        id: String,

        /// Variable values in NAME=VALUE format
        #[arg(long = "var", value_name = "NAME=VALUE", num_args = 1)]
        vars: Vec<VariableAssignment>,

        /// Target directory, relative to the project root
        /// (default: project root)
        #[arg(short, long)]
        target: Option<PathBuf>,
    },

    /// Create a new template folder.
    ///
    /// Writes `template.xml`, a starter `root/build.gradle.kts.ftl` and a
    /// `README.md` into `<templates-dir>/<id>/`.
    ///
    /// # Examples
    ///
    /// ```bash
    /// scaffold new feature --name "Feature module" \
    ///     --param moduleName=TEXT --param packageName=PACKAGE
    /// ```
    New {
        /// Template id (lowercase letters, digits and hyphens)
        id: String,

        /// Display name (default: the id)
        #[arg(long)]
        name: Option<String>,

        /// Template description
        #[arg(long, default_value = "")]
        description: String,

        /// Parameters in NAME=TYPE format (TEXT, PACKAGE, BOOLEAN, DROPDOWN,
        /// NUMBER, MULTILINE_TEXT)
        #[arg(long = "param", value_name = "NAME=TYPE", num_args = 1)]
        params: Vec<VariableAssignment>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_list() {
        let cli = Cli::parse_from(["scaffold", "list"]);
        assert!(matches!(cli.command, Commands::List));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_generate_with_vars() {
        let cli = Cli::parse_from([
            "scaffold",
            "generate",
            "feature",
            "--var",
            "moduleName=payments",
            "--var=packageName=com.example",
            "--target",
            "modules",
        ]);
        if let Commands::Generate { id, vars, target } = cli.command {
            assert_eq!(id, "feature");
            assert_eq!(vars.len(), 2);
            assert_eq!(vars[0].name(), "moduleName");
            assert_eq!(vars[1].value(), "com.example");
            assert_eq!(target, Some(PathBuf::from("modules")));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_rejects_malformed_var() {
        let result = Cli::try_parse_from(["scaffold", "check", "feature", "--var", "novalue"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_new() {
        let cli = Cli::parse_from([
            "scaffold",
            "new",
            "feature",
            "--name",
            "Feature",
            "--param",
            "moduleName=TEXT",
        ]);
        if let Commands::New {
            id, name, params, ..
        } = cli.command
        {
            assert_eq!(id, "feature");
            assert_eq!(name, Some("Feature".to_string()));
            assert_eq!(params[0].value(), "TEXT");
        } else {
            panic!("Expected New command");
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "scaffold",
            "show",
            "feature",
            "--templates-dir",
            "/tmp/templates",
            "--project-root",
            "/tmp/proj",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.templates_dir, Some(PathBuf::from("/tmp/templates")));
        assert_eq!(cli.project_root, Some(PathBuf::from("/tmp/proj")));
        assert_eq!(cli.format, "json");
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::parse_from(["scaffold", "list"]);
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_parsing_completions_zsh() {
        let cli = Cli::parse_from(["scaffold", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert_eq!(shell, Shell::Zsh);
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
