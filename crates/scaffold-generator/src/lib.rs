//! Module generation from templates.
//!
//! Binds a [`TemplateDefinition`] to variable values and a target directory
//! ([`ModuleConfiguration`]), then either writes the module
//! ([`GenerationEngine`]) or describes what would be written
//! ([`PreviewEngine`]). Both work from the same [`GenerationPlan`].
//! Generated modules are registered in the project manifest by the
//! [`ManifestUpdater`].
//!
//! # Examples
//!
//! ```
//! use scaffold_core::{DirectoryEntry, FileEntry, TemplateDefinition, Variables};
//! use scaffold_files::MemoryFileSystem;
//! use scaffold_generator::{GenerationEngine, ModuleConfiguration, PreviewEngine};
//! use std::sync::Arc;
//!
//! let mut template = TemplateDefinition::new("library");
//! template.file_tree.directories.push(DirectoryEntry::new("${moduleName}/src"));
//! template.file_tree.files.push(FileEntry::new("${moduleName}/build.gradle.kts", ""));
//! template.module_markers.push("${moduleName}/build.gradle.kts".to_string());
//!
//! let mut vars = Variables::new();
//! vars.insert("moduleName".to_string(), "core".to_string());
//! let config = ModuleConfiguration::new(Arc::new(template), vars, "/proj/libs");
//!
//! let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "");
//!
//! let preview = PreviewEngine::new(&fs, "/proj").preview(&config);
//! assert_eq!(
//!     preview.manifest_changes,
//!     vec!["Add to settings.gradle(.kts): include(\":libs:core\")"]
//! );
//!
//! let result = GenerationEngine::new(&fs, "/proj").generate(&config);
//! assert!(result.is_success());
//! ```
//!
//! [`TemplateDefinition`]: scaffold_core::TemplateDefinition

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod configuration;
pub mod encoding;
pub mod engine;
pub mod manifest;
pub mod module_path;
pub mod plan;
pub mod preview;
pub mod result;

pub use configuration::{MODULE_NAME_VARIABLE, ModuleConfiguration};
pub use engine::GenerationEngine;
pub use manifest::{ManifestChange, ManifestUpdater};
pub use module_path::ModulePath;
pub use plan::GenerationPlan;
pub use preview::PreviewEngine;
pub use result::{GenerationPreview, GenerationResult, PreviewDirectory, PreviewFile};
