//! CLI-facing types shared by the `scaffold` binary.
//!
//! # Examples
//!
//! ```
//! use scaffold_core::cli::{ExitCode, OutputFormat, VariableAssignment};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format.as_str(), "json");
//!
//! assert!(ExitCode::SUCCESS.is_success());
//!
//! let assignment: VariableAssignment = "moduleName=payments".parse().unwrap();
//! assert_eq!(assignment.name(), "moduleName");
//! assert_eq!(assignment.value(), "payments");
//! ```

use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// # Examples
///
/// ```
/// use scaffold_core::cli::OutputFormat;
///
/// let format: OutputFormat = "pretty".parse().unwrap();
/// assert_eq!(format, OutputFormat::Pretty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Colored output for humans
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// Process exit code.
///
/// # Examples
///
/// ```
/// use scaffold_core::cli::ExitCode;
///
/// assert_eq!(ExitCode::WARNING.as_i32(), 3);
/// assert!(!ExitCode::ERROR.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution.
    pub const SUCCESS: Self = Self(0);

    /// General error, including a failed generation.
    pub const ERROR: Self = Self(1);

    /// Invalid input or arguments.
    pub const INVALID_INPUT: Self = Self(2);

    /// Generation completed with warnings.
    pub const WARNING: Self = Self(3);

    /// Template not found.
    pub const NOT_FOUND: Self = Self(4);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `name=value` variable assignment from the command line.
///
/// The name is trimmed and must be non-empty; the value is kept verbatim and
/// may itself contain `=`.
///
/// # Examples
///
/// ```
/// use scaffold_core::cli::VariableAssignment;
///
/// let a = VariableAssignment::new("query=a=b")?;
/// assert_eq!(a.value(), "a=b");
///
/// assert!(VariableAssignment::new("=value").is_err());
/// assert!(VariableAssignment::new("novalue").is_err());
/// # Ok::<(), scaffold_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableAssignment {
    name: String,
    value: String,
}

impl VariableAssignment {
    /// Parses a `name=value` assignment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if there is no `=`, the name
    /// is blank, or the name contains control characters or whitespace.
    pub fn new(s: impl AsRef<str>) -> crate::Result<Self> {
        let s = s.as_ref();
        let (name, value) = s.split_once('=').ok_or_else(|| {
            crate::Error::InvalidArgument(format!("expected name=value, got '{s}'"))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(crate::Error::InvalidArgument(format!(
                "variable name cannot be empty in '{s}'"
            )));
        }
        if name.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(crate::Error::InvalidArgument(format!(
                "invalid variable name '{name}'"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Splits into `(name, value)`.
    #[must_use]
    pub fn into_pair(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl FromStr for VariableAssignment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for VariableAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
        assert_eq!(OutputFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    fn test_exit_code_constants() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
        assert_eq!(ExitCode::ERROR.as_i32(), 1);
        assert_eq!(ExitCode::INVALID_INPUT.as_i32(), 2);
        assert_eq!(ExitCode::WARNING.as_i32(), 3);
        assert_eq!(ExitCode::NOT_FOUND.as_i32(), 4);
        assert_eq!(ExitCode::default(), ExitCode::SUCCESS);
        assert_eq!(i32::from(ExitCode::ERROR), 1);
    }

    #[test]
    fn test_variable_assignment_trims_name_only() {
        let a: VariableAssignment = " moduleName = pay ".parse().unwrap();
        assert_eq!(a.name(), "moduleName");
        assert_eq!(a.value(), " pay ");
    }

    #[test]
    fn test_variable_assignment_empty_value_allowed() {
        let a = VariableAssignment::new("description=").unwrap();
        assert_eq!(a.value(), "");
        assert_eq!(a.to_string(), "description=");
    }

    #[test]
    fn test_variable_assignment_rejects_bad_names() {
        assert!(VariableAssignment::new("module name=x").is_err());
        assert!(VariableAssignment::new("  =x").is_err());
        assert!(VariableAssignment::new("x").is_err());
    }

    #[test]
    fn test_variable_assignment_into_pair() {
        let (name, value) = VariableAssignment::new("a=1").unwrap().into_pair();
        assert_eq!((name.as_str(), value.as_str()), ("a", "1"));
    }
}
