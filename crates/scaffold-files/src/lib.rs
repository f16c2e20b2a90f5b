//! Filesystem interface for module generation.
//!
//! The generation engine and the manifest updater never touch `std::fs`
//! directly; they go through the [`FileSystem`] trait. Two backends are
//! provided:
//!
//! - [`DiskFileSystem`]: the real disk, with temp-file-and-rename writes
//! - [`MemoryFileSystem`]: an in-memory tree with mutation counting and
//!   read-only prefixes, for tests and dry runs
//!
//! # Examples
//!
//! ```
//! use scaffold_files::{FileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new().with_dir("/proj");
//! fs.create_dir_all(Path::new("/proj/modules/payments/src")).unwrap();
//! fs.write(Path::new("/proj/modules/payments/README.md"), b"# payments").unwrap();
//!
//! assert_eq!(
//!     fs.read_to_string(Path::new("/proj/modules/payments/README.md")).unwrap(),
//!     "# payments"
//! );
//! assert_eq!(fs.mutation_count(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod filesystem;
pub mod memory;
pub mod types;

pub use filesystem::{DiskFileSystem, FileSystem};
pub use memory::MemoryFileSystem;
pub use types::{FilesError, Result};
