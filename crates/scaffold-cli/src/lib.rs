//! Scaffold CLI library.
//!
//! Exposes the argument definitions, commands and formatters behind the
//! `scaffold` binary so they can be tested.
//!
//! # Examples
//!
//! ```bash
//! # List templates in <project>/.idea/kmp-templates
//! scaffold list
//!
//! # Check values, preview, then generate
//! scaffold check feature --var moduleName=payments
//! scaffold preview feature --var moduleName=payments --target modules
//! scaffold generate feature --var moduleName=payments --target modules
//! ```

#![deny(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use cli::{Cli, Commands};
