//! Module path derivation and manifest entry conversion.
//!
//! A module path is the `/`-separated location of a generated module,
//! relative to the directory it is anchored at. It is derived from a module
//! marker (a build file in the output tree) by stripping the build file
//! name. A marker at the very top of the output tree makes the generation
//! root itself the module; that module is named after the target directory
//! and anchored at the target's parent.

use crate::configuration::directory_name;
use scaffold_core::layout::{MODULE_SEPARATOR, strip_module_marker};
use scaffold_core::Variables;
use scaffold_template::resolver::resolve;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// A derived module location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModulePath {
    /// `/`-separated module path, e.g. `feature/api`
    pub path: String,
    /// `true` when the module is the generation root itself; the path is
    /// then relative to the target's parent
    pub at_target_root: bool,
}

impl ModulePath {
    /// A module below the target directory.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            at_target_root: false,
        }
    }

    /// The generation root itself, named `name`.
    #[must_use]
    pub fn target_root(name: impl Into<String>) -> Self {
        Self {
            path: name.into(),
            at_target_root: true,
        }
    }

    /// Directory the path is relative to.
    #[must_use]
    pub fn anchor<'p>(&self, target: &'p Path) -> &'p Path {
        if self.at_target_root {
            target.parent().unwrap_or(target)
        } else {
            target
        }
    }
}

/// Derives module paths from module markers.
///
/// Each marker is resolved, then its build file name stripped and the rest
/// normalized the way [`safe_join`] does. The result keeps
/// first-occurrence order and contains no duplicates. Markers that do not
/// resolve to a build file, or that climb out of the target, are ignored.
///
/// # Examples
///
/// ```
/// use scaffold_core::Variables;
/// use scaffold_generator::module_path::derive_module_paths;
/// use std::path::Path;
///
/// let markers = vec![
///     "feature/api/build.gradle.kts".to_string(),
///     "build.gradle.kts".to_string(),
/// ];
/// let paths = derive_module_paths(&markers, &Variables::new(), Path::new("/proj/feature"));
///
/// assert_eq!(paths[0].path, "feature/api");
/// assert_eq!(paths[1].path, "feature");
/// assert!(paths[1].at_target_root);
/// ```
#[must_use]
pub fn derive_module_paths(markers: &[String], variables: &Variables, target: &Path) -> Vec<ModulePath> {
    let mut seen = HashSet::new();
    markers
        .iter()
        .filter_map(|marker| {
            let resolved = resolve(marker, variables);
            let resolved = resolved.trim_matches('/');
            let module = strip_module_marker(resolved)?;
            let Some(module) = clean_module_path(module) else {
                warn!("Module marker '{resolved}' escapes the target directory, not registered");
                return None;
            };
            Some(if module.is_empty() {
                ModulePath::target_root(directory_name(target))
            } else {
                ModulePath::new(module)
            })
        })
        .filter(|module| !module.path.is_empty() && seen.insert(module.clone()))
        .collect()
}

/// `.` segments dropped and `..` applied; `None` when the path leaves its
/// base.
fn clean_module_path(module: &str) -> Option<String> {
    let cleaned = safe_join(Path::new(""), module)?;
    Some(
        cleaned
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

/// Normalizes a path lexically: `.` is dropped and `..` pops the previous
/// component. The filesystem is not consulted.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `/`-separated location of `target` below `project_root`, or empty when
/// it is not inside it (or is the root itself).
///
/// Relative paths are made absolute against the current directory before
/// comparing, so `.` as the project root matches an absolute target.
///
/// # Examples
///
/// ```
/// use scaffold_generator::module_path::relative_prefix;
/// use std::path::Path;
///
/// assert_eq!(relative_prefix(Path::new("/proj"), Path::new("/proj/shared/modules")), "shared/modules");
/// assert_eq!(relative_prefix(Path::new("/proj"), Path::new("/proj/./a/../b")), "b");
/// assert_eq!(relative_prefix(Path::new("/proj"), Path::new("/elsewhere")), "");
/// ```
#[must_use]
pub fn relative_prefix(project_root: &Path, target: &Path) -> String {
    let root = normalize(&absolute(project_root));
    let target = normalize(&absolute(target));
    let Ok(relative) = target.strip_prefix(&root) else {
        return String::new();
    };

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            _ => return String::new(),
        }
    }
    segments.join("/")
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Converts a prefix and a module path into a manifest entry.
///
/// # Examples
///
/// ```
/// use scaffold_generator::module_path::module_entry;
///
/// assert_eq!(module_entry("modules", "payments"), ":modules:payments");
/// assert_eq!(module_entry("", "feature/api"), ":feature:api");
/// ```
#[must_use]
pub fn module_entry(prefix: &str, module_path: &str) -> String {
    let segments: Vec<&str> = prefix
        .split('/')
        .chain(module_path.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    let separator = MODULE_SEPARATOR.to_string();
    format!("{MODULE_SEPARATOR}{}", segments.join(&separator))
}

/// Manifest entries for `modules` generated into `target`, deduplicated in
/// input order.
#[must_use]
pub fn module_entries(project_root: &Path, target: &Path, modules: &[ModulePath]) -> Vec<String> {
    let mut seen = HashSet::new();
    modules
        .iter()
        .map(|module| {
            let prefix = relative_prefix(project_root, module.anchor(target));
            module_entry(&prefix, &module.path)
        })
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

/// Joins a resolved, `/`-separated relative path onto `base`, refusing
/// paths that are absolute or climb out of `base`.
///
/// # Examples
///
/// ```
/// use scaffold_generator::module_path::safe_join;
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("/proj/modules");
/// assert_eq!(safe_join(base, "payments/./src"), Some(PathBuf::from("/proj/modules/payments/src")));
/// assert_eq!(safe_join(base, "payments/../../escape"), None);
/// assert_eq!(safe_join(base, "/etc/passwd"), None);
/// ```
#[must_use]
pub fn safe_join(base: &Path, relative: &str) -> Option<PathBuf> {
    if relative.starts_with('/') {
        return None;
    }
    let mut depth = 0usize;
    let mut out = base.to_path_buf();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                depth = depth.checked_sub(1)?;
                out.pop();
            }
            other => {
                if Path::new(other)
                    .components()
                    .any(|c| !matches!(c, Component::Normal(_)))
                {
                    return None;
                }
                depth += 1;
                out.push(other);
            }
        }
    }
    Some(out)
}
