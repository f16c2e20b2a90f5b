//! Strong types shared across the scaffolding crates.
//!
//! # Examples
//!
//! ```
//! use scaffold_core::{FieldValidator, ParameterType, ValidationResult};
//!
//! let kind: ParameterType = "PACKAGE".parse().unwrap();
//! assert_eq!(kind, ParameterType::Package);
//!
//! let even = FieldValidator::new(|value| {
//!     if value.len() % 2 == 0 {
//!         ValidationResult::Valid
//!     } else {
//!         ValidationResult::invalid("length must be even")
//!     }
//! });
//! assert!(even.validate("ab").is_valid());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Concrete variable values keyed by parameter name.
///
/// Ordered so that every derived artifact (warnings, previews) is
/// reproducible.
pub type Variables = BTreeMap<String, String>;

/// Kind of a template parameter.
///
/// The textual form is the upper-case name used in `template.xml`
/// (`TEXT`, `PACKAGE`, ...). Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterType {
    /// Free single-line text
    #[default]
    Text,
    /// Dotted package name
    Package,
    /// `true` / `false`
    Boolean,
    /// One of a fixed list of options
    Dropdown,
    /// Numeric value
    Number,
    /// Free multi-line text
    MultilineText,
}

impl ParameterType {
    /// All parameter types in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Package,
        Self::Boolean,
        Self::Dropdown,
        Self::Number,
        Self::MultilineText,
    ];

    /// Returns the descriptor-file spelling of the type.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_core::ParameterType;
    ///
    /// assert_eq!(ParameterType::MultilineText.as_str(), "MULTILINE_TEXT");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Package => "PACKAGE",
            Self::Boolean => "BOOLEAN",
            Self::Dropdown => "DROPDOWN",
            Self::Number => "NUMBER",
            Self::MultilineText => "MULTILINE_TEXT",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                crate::Error::InvalidArgument(format!("unknown parameter type: '{s}'"))
            })
    }
}

/// Outcome of validating a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value is acceptable
    Valid,
    /// The value is rejected, with a user-facing message
    Invalid(String),
}

impl ValidationResult {
    /// Creates an `Invalid` result.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Returns `true` for `Valid`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the rejection message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

type ValidateFn = dyn Fn(&str) -> ValidationResult + Send + Sync;

/// A pure per-field validation function stored alongside a parameter.
///
/// Cloning is cheap: the function is reference counted.
#[derive(Clone)]
pub struct FieldValidator {
    name: &'static str,
    check: Arc<ValidateFn>,
}

impl FieldValidator {
    /// Wraps a validation function.
    #[must_use]
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> ValidationResult + Send + Sync + 'static,
    {
        Self::named("custom", check)
    }

    /// Wraps a validation function under a descriptive name.
    ///
    /// The name only shows up in `Debug` output.
    #[must_use]
    pub fn named<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&str) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Runs the validator against a value.
    #[must_use]
    pub fn validate(&self, value: &str) -> ValidationResult {
        (self.check)(value)
    }

    /// Returns the validator's descriptive name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
