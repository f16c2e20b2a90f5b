//! Error types for module scaffolding.
//!
//! One error hierarchy is shared by every crate in the workspace. Variants
//! map onto the failure classes of the generation pipeline: configuration
//! problems block generation before any I/O, template parse problems are
//! isolated to one template, and per-file or manifest problems degrade a
//! generation run to a warning instead of failing it.
//!
//! # Examples
//!
//! ```
//! use scaffold_core::{Error, Result};
//!
//! fn require_target(path: &str) -> Result<()> {
//!     if path.is_empty() {
//!         return Err(Error::ConfigurationError {
//!             message: "Target path cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_target("").unwrap_err();
//! assert!(err.is_configuration_error());
//! assert!(err.is_fatal());
//! ```

use thiserror::Error;

/// Main error type for module scaffolding.
#[derive(Error, Debug)]
pub enum Error {
    /// Module configuration is invalid.
    ///
    /// Raised when a required variable is missing or a per-field validator
    /// rejects a value. Always surfaced before any filesystem mutation.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Aggregated description of every violation
        message: String,
    },

    /// A template's description file could not be parsed.
    ///
    /// Isolated to one template; enumeration of the remaining templates
    /// continues.
    #[error("Failed to parse template '{template}': {message}")]
    TemplateParseError {
        /// Template folder name
        template: String,
        /// Description of the problem
        message: String,
    },

    /// A single file could not be generated.
    #[error("Error generating file {path}: {message}")]
    FileGenerationError {
        /// Template-relative path of the file
        path: String,
        /// Description of the failure
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The project manifest could not be read or written.
    #[error("Failed to update manifest {path}: {message}")]
    ManifestUpdateError {
        /// Manifest file path
        path: String,
        /// Description of the failure
        message: String,
        /// Underlying I/O error
        #[source]
        source: Option<std::io::Error>,
    },

    /// The generation target directory cannot be created or accessed.
    #[error("Cannot access target directory {path}")]
    DirectoryAccessError {
        /// Target directory
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Resource (template, file) not found.
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Validation error for a named field.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },

    /// The settings file is unreadable or malformed.
    #[error("Settings error: {message}")]
    SettingsError {
        /// Description of the problem
        message: String,
        /// Underlying TOML error
        #[source]
        source: Option<toml::de::Error>,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_core::Error;
    ///
    /// let err = Error::ConfigurationError {
    ///     message: "Module name is required".to_string(),
    /// };
    /// assert!(err.is_configuration_error());
    /// ```
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ConfigurationError { .. })
    }

    /// Returns `true` if this is a template parse error.
    #[must_use]
    pub const fn is_template_parse_error(&self) -> bool {
        matches!(self, Self::TemplateParseError { .. })
    }

    /// Returns `true` if this is a per-file generation error.
    #[must_use]
    pub const fn is_file_generation_error(&self) -> bool {
        matches!(self, Self::FileGenerationError { .. })
    }

    /// Returns `true` if this is a manifest update error.
    #[must_use]
    pub const fn is_manifest_error(&self) -> bool {
        matches!(self, Self::ManifestUpdateError { .. })
    }

    /// Returns `true` if this is a directory access error.
    #[must_use]
    pub const fn is_directory_access_error(&self) -> bool {
        matches!(self, Self::DirectoryAccessError { .. })
    }

    /// Returns `true` if this is a resource not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_core::Error;
    ///
    /// let err = Error::ResourceNotFound {
    ///     resource: "template:feature".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if this is a settings error.
    #[must_use]
    pub const fn is_settings_error(&self) -> bool {
        matches!(self, Self::SettingsError { .. })
    }

    /// Returns `true` if the error aborts a generation run.
    ///
    /// Per-file and manifest errors are recoverable: they are collected as
    /// warnings while the rest of the run continues.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_core::Error;
    ///
    /// let err = Error::FileGenerationError {
    ///     path: "README.md".to_string(),
    ///     message: "unsupported encoding".to_string(),
    ///     source: None,
    /// };
    /// assert!(!err.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::FileGenerationError { .. } | Self::ManifestUpdateError { .. }
        )
    }
}

/// Result type alias for scaffolding operations.
///
/// # Examples
///
/// ```
/// use scaffold_core::{Error, Result};
///
/// fn parse_port(value: &str) -> Result<u16> {
///     value
///         .parse()
///         .map_err(|_| Error::InvalidArgument(format!("not a port: {value}")))
/// }
///
/// assert!(parse_port("8080").is_ok());
/// assert!(parse_port("http").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_detection() {
        let err = Error::ConfigurationError {
            message: "Module Name is required".to_string(),
        };
        assert!(err.is_configuration_error());
        assert!(!err.is_template_parse_error());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_template_parse_error_display() {
        let err = Error::TemplateParseError {
            template: "feature".to_string(),
            message: "template.xml not found".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("feature"));
        assert!(display.contains("template.xml not found"));
    }

    #[test]
    fn test_file_generation_error_is_recoverable() {
        let err = Error::FileGenerationError {
            path: "${moduleName}/README.md".to_string(),
            message: "disk full".to_string(),
            source: Some("disk full".into()),
        };
        assert!(err.is_file_generation_error());
        assert!(!err.is_fatal());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_manifest_error_is_recoverable() {
        let err = Error::ManifestUpdateError {
            path: "settings.gradle.kts".to_string(),
            message: "permission denied".to_string(),
            source: None,
        };
        assert!(err.is_manifest_error());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_directory_access_error_is_fatal() {
        let err = Error::DirectoryAccessError {
            path: "/proj/modules".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_directory_access_error());
        assert!(err.is_fatal());
        assert!(format!("{err}").contains("/proj/modules"));
    }

    #[test]
    fn test_not_found_error_detection() {
        let err = Error::ResourceNotFound {
            resource: "template:missing".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_result_alias() {
        #[allow(clippy::unnecessary_wraps)]
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(Error::InvalidArgument("bad".to_string()))
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }
}
