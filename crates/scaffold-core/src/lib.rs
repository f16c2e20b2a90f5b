//! Core types, validators and errors for module scaffolding.
//!
//! This crate provides the foundational model shared by every crate in the
//! workspace:
//!
//! - Template model (`TemplateDefinition`, `ParameterSpec`, `FileTree`)
//! - Parameter types and pluggable field validators
//! - Module and package name validators
//! - Fixed template-folder and project layout names
//! - Project settings (`scaffold.toml`)
//! - Error hierarchy shared by the generation pipeline
//!
//! # Examples
//!
//! ```
//! use scaffold_core::{FileEntry, ParameterSpec, ParameterType, TemplateDefinition};
//!
//! let mut template = TemplateDefinition::new("feature");
//! template.parameters.push(ParameterSpec::new("moduleName", ParameterType::Text));
//! template
//!     .file_tree
//!     .files
//!     .push(FileEntry::new("${moduleName}/README.md", "# ${moduleName}"));
//!
//! assert_eq!(template.name, "feature");
//! assert_eq!(template.file_tree.files.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod settings;
mod template;
mod types;

pub mod cli;
pub mod layout;
pub mod validators;

pub use error::{Error, Result};
pub use settings::{HOME_TEMPLATES_DIR, PROJECT_TEMPLATES_DIR, SETTINGS_FILE, ScaffoldSettings};
pub use template::{DirectoryEntry, FileEntry, FileTree, ParameterSpec, TemplateDefinition};
pub use types::{FieldValidator, ParameterType, ValidationResult, Variables};
