//! Command implementations for the scaffold CLI.
//!
//! Each command resolves what it needs from the [`common::Workspace`],
//! builds a serializable report and prints it in the requested format.
//! Reports are built by plain functions so they can be tested without
//! capturing stdout.

pub mod check;
pub mod common;
pub mod completions;
pub mod generate;
pub mod list;
pub mod new;
pub mod preview;
pub mod show;
