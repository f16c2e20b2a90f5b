//! Template folders: parsing, scanning, registry and authoring.
//!
//! A template folder holds a `template.xml` descriptor, a `root/` tree of
//! `*.ftl` files mirroring the output, and an optional build fragment.
//! This crate turns such folders into [`TemplateDefinition`]s and keeps the
//! set of available templates in a [`TemplateRegistry`].
//!
//! # Modules
//!
//! - [`resolver`]: `${name}` / `{{name}}` placeholder substitution
//! - [`parser`]: tolerant `template.xml` parsing with diagnostics
//! - [`scanner`]: `root/` output tree scanning
//! - [`loader`]: one folder into one definition
//! - [`registry`]: all folders of a templates directory
//! - [`authoring`]: rendering and writing new template folders
//!
//! [`TemplateDefinition`]: scaffold_core::TemplateDefinition

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod authoring;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use authoring::TemplateAuthor;
pub use loader::{LoadedTemplate, TemplateLoader};
pub use parser::{DiagnosticKind, ParseDiagnostic, ParseOutcome, TemplateDescriptor, parse_descriptor};
pub use registry::{LoadFailure, LoadReport, TemplateRegistry};
pub use resolver::{find_variables, missing_for_template, missing_variables, resolve};
pub use scanner::{ScanError, find_module_markers, scan_structure};
