//! Fixed names of the template folder layout and the target project.
//!
//! ```text
//! <templates>/
//! └── <folder>/
//!     ├── template.xml            descriptor (metadata + parameters)
//!     ├── build.gradle.kts.ftl    build fragment
//!     └── root/                   mirrored output tree, `*.ftl` files only
//! ```

/// Descriptor file inside every template folder.
pub const DESCRIPTOR_FILE: &str = "template.xml";

/// Subfolder holding the templated output tree.
pub const ROOT_DIR: &str = "root";

/// Suffix marking a file as part of the output tree. Stripped on output.
pub const TEMPLATE_SUFFIX: &str = ".ftl";

/// Folder-level build fragment, kept outside the output tree.
pub const BUILD_FRAGMENT_FILE: &str = "build.gradle.kts.ftl";

/// Build files whose presence marks a module directory.
pub const MODULE_MARKER_FILES: [&str; 2] = ["build.gradle.kts", "build.gradle"];

/// Manifest files accepted at the project root, in lookup order.
pub const MANIFEST_FILES: [&str; 2] = ["settings.gradle.kts", "settings.gradle"];

/// Encoding used when a file entry does not declare one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Separator between segments of a manifest module entry.
pub const MODULE_SEPARATOR: char = ':';

/// Returns `true` if the last segment of `path` is a module marker file.
///
/// # Examples
///
/// ```
/// use scaffold_core::layout::is_module_marker;
///
/// assert!(is_module_marker("feature/api/build.gradle.kts"));
/// assert!(is_module_marker("build.gradle"));
/// assert!(!is_module_marker("feature/api/mybuild.gradle"));
/// assert!(!is_module_marker("feature/README.md"));
/// ```
#[must_use]
pub fn is_module_marker(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    MODULE_MARKER_FILES.contains(&file_name)
}

/// Strips the marker file name from a marker path.
///
/// Returns `None` when `path` is not a marker, `Some("")` for a bare marker
/// at the root of the output tree.
///
/// # Examples
///
/// ```
/// use scaffold_core::layout::strip_module_marker;
///
/// assert_eq!(strip_module_marker("feature/api/build.gradle.kts"), Some("feature/api"));
/// assert_eq!(strip_module_marker("build.gradle.kts"), Some(""));
/// assert_eq!(strip_module_marker("feature/api/Main.kt"), None);
/// ```
#[must_use]
pub fn strip_module_marker(path: &str) -> Option<&str> {
    if !is_module_marker(path) {
        return None;
    }
    Some(path.rfind('/').map_or("", |idx| &path[..idx]))
}
