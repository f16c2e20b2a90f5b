//! Placeholder substitution.
//!
//! Two interchangeable syntaxes are recognized: `${name}` and `{{name}}`.
//! Substitution is a single left-to-right pass over the input, so inserted
//! values are never scanned again and the order of the variable map has no
//! influence on the result. Placeholders without a matching variable are
//! left untouched.
//!
//! # Examples
//!
//! ```
//! use scaffold_core::Variables;
//! use scaffold_template::resolver::{find_variables, resolve};
//!
//! let mut vars = Variables::new();
//! vars.insert("moduleName".to_string(), "payments".to_string());
//!
//! assert_eq!(resolve("${moduleName}/{{moduleName}}.kt", &vars), "payments/payments.kt");
//! assert_eq!(resolve("${unknown}", &vars), "${unknown}");
//!
//! let names = find_variables("${a}/{{b}}/literal");
//! assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

use regex::{Captures, Regex};
use scaffold_core::{TemplateDefinition, Variables};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}|\{\{([^}]+)\}\}").expect("valid regex"));

fn placeholder_name<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Replaces every known placeholder in `text` with its value.
#[must_use]
pub fn resolve(text: &str, variables: &Variables) -> String {
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            placeholder_name(caps)
                .and_then(|name| variables.get(name))
                .map_or_else(|| caps[0].to_string(), Clone::clone)
        })
        .into_owned()
}

/// Returns every placeholder name referenced in `text`, from both syntaxes.
#[must_use]
pub fn find_variables(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .filter_map(|caps| placeholder_name(&caps).map(ToString::to_string))
        .collect()
}

/// Returns the referenced names that `variables` does not supply, sorted.
///
/// # Examples
///
/// ```
/// use scaffold_core::Variables;
/// use scaffold_template::resolver::missing_variables;
///
/// let mut vars = Variables::new();
/// vars.insert("a".to_string(), "1".to_string());
///
/// assert_eq!(missing_variables("${a}/${c}/{{b}}", &vars), vec!["b", "c"]);
/// ```
#[must_use]
pub fn missing_variables(text: &str, variables: &Variables) -> Vec<String> {
    find_variables(text)
        .into_iter()
        .filter(|name| !variables.contains_key(name))
        .collect()
}

/// Pre-flight check over a whole template: every directory path, file
/// path, file content and module marker.
///
/// The build fragment is not included; it is not rendered by generation.
#[must_use]
pub fn missing_for_template(template: &TemplateDefinition, variables: &Variables) -> Vec<String> {
    let tree = &template.file_tree;
    let texts = tree
        .directories
        .iter()
        .map(|d| d.path.as_str())
        .chain(
            tree.files
                .iter()
                .flat_map(|f| [f.path.as_str(), f.content.as_str()]),
        )
        .chain(template.module_markers.iter().map(String::as_str));

    let mut missing = BTreeSet::new();
    for text in texts {
        missing.extend(missing_variables(text, variables));
    }
    missing.into_iter().collect()
}
