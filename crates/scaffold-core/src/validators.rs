//! Name validators and the per-type validators attached to parameters.
//!
//! # Examples
//!
//! ```
//! use scaffold_core::validators::{validate_module_name, validate_package_name};
//!
//! assert!(validate_module_name("payments-api").is_valid());
//! assert!(!validate_module_name("Payments").is_valid());
//!
//! assert!(validate_package_name("com.example.payments").is_valid());
//! assert!(!validate_package_name("com.example.class").is_valid());
//! ```

use crate::types::{FieldValidator, ParameterType, ValidationResult};
use regex::Regex;
use std::sync::LazyLock;

/// Minimum module name length.
pub const MODULE_NAME_MIN_LEN: usize = 2;

/// Maximum module name length.
pub const MODULE_NAME_MAX_LEN: usize = 50;

/// Maximum length of one package segment.
pub const PACKAGE_SEGMENT_MAX_LEN: usize = 100;

/// Kotlin hard keywords, rejected as package segments.
pub const RESERVED_KEYWORDS: [&str; 29] = [
    "abstract",
    "as",
    "break",
    "class",
    "continue",
    "do",
    "else",
    "false",
    "for",
    "fun",
    "if",
    "in",
    "interface",
    "is",
    "null",
    "object",
    "package",
    "return",
    "super",
    "this",
    "throw",
    "true",
    "try",
    "typealias",
    "typeof",
    "val",
    "var",
    "when",
    "while",
];

static MODULE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid regex"));

static PACKAGE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("valid regex")
});

fn is_reserved(segment: &str) -> bool {
    RESERVED_KEYWORDS.contains(&segment)
}

/// Validates a module (directory) name.
///
/// Lower-case letters, digits and hyphens, starting with a letter, between
/// 2 and 50 characters, with no leading, trailing or doubled hyphen.
#[must_use]
pub fn validate_module_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return ValidationResult::invalid("Module name cannot be empty");
    }
    if name.len() < MODULE_NAME_MIN_LEN {
        return ValidationResult::invalid(format!(
            "Module name must be at least {MODULE_NAME_MIN_LEN} characters"
        ));
    }
    if name.len() > MODULE_NAME_MAX_LEN {
        return ValidationResult::invalid(format!(
            "Module name must be at most {MODULE_NAME_MAX_LEN} characters"
        ));
    }
    if !MODULE_NAME_PATTERN.is_match(name) {
        return ValidationResult::invalid(
            "Module name must start with a lowercase letter and contain only lowercase letters, digits and hyphens",
        );
    }
    if name.ends_with('-') {
        return ValidationResult::invalid("Module name cannot end with a hyphen");
    }
    if name.contains("--") {
        return ValidationResult::invalid("Module name cannot contain consecutive hyphens");
    }
    ValidationResult::Valid
}

/// Validates a dotted package name.
#[must_use]
pub fn validate_package_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return ValidationResult::invalid("Package name cannot be empty");
    }
    if !PACKAGE_NAME_PATTERN.is_match(name) {
        return ValidationResult::invalid(
            "Package name must consist of lowercase segments separated by dots (e.g. com.example.feature)",
        );
    }
    for segment in name.split('.') {
        if is_reserved(segment) {
            return ValidationResult::invalid(format!(
                "Package segment '{segment}' is a reserved keyword"
            ));
        }
        if segment.len() > PACKAGE_SEGMENT_MAX_LEN {
            return ValidationResult::invalid(format!(
                "Package segment '{segment}' is longer than {PACKAGE_SEGMENT_MAX_LEN} characters"
            ));
        }
    }
    ValidationResult::Valid
}

/// Converts a package name to a relative source path.
///
/// # Examples
///
/// ```
/// use scaffold_core::validators::package_to_path;
///
/// assert_eq!(package_to_path("com.example.payments"), "com/example/payments");
/// ```
#[must_use]
pub fn package_to_path(package: &str) -> String {
    package.replace('.', "/")
}

/// Converts a relative source path back to a package name.
///
/// Leading and trailing separators are ignored.
///
/// # Examples
///
/// ```
/// use scaffold_core::validators::path_to_package;
///
/// assert_eq!(path_to_package("com/example/payments/"), "com.example.payments");
/// assert_eq!(path_to_package("com\\example"), "com.example");
/// ```
#[must_use]
pub fn path_to_package(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Validator for `PACKAGE` parameters.
#[must_use]
pub fn package_name_validator() -> FieldValidator {
    FieldValidator::named("package-name", validate_package_name)
}

/// Validator for module name parameters.
#[must_use]
pub fn module_name_validator() -> FieldValidator {
    FieldValidator::named("module-name", validate_module_name)
}

/// Validator for `NUMBER` parameters.
#[must_use]
pub fn number_validator() -> FieldValidator {
    FieldValidator::named("number", |value| {
        if value.trim().parse::<f64>().is_ok_and(f64::is_finite) {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(format!("'{value}' is not a number"))
        }
    })
}

/// Validator for `BOOLEAN` parameters.
#[must_use]
pub fn boolean_validator() -> FieldValidator {
    FieldValidator::named("boolean", |value| match value.trim() {
        "true" | "false" => ValidationResult::Valid,
        _ => ValidationResult::invalid(format!("'{value}' must be 'true' or 'false'")),
    })
}

/// Validator for `DROPDOWN` parameters: the value must be one of `options`.
#[must_use]
pub fn options_validator(options: Vec<String>) -> FieldValidator {
    FieldValidator::named("options", move |value| {
        if options.iter().any(|option| option == value) {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(format!(
                "'{value}' is not one of: {}",
                options.join(", ")
            ))
        }
    })
}

/// Built-in validator for a parameter type, if the type has one.
///
/// Dropdowns only get a validator when they declare options.
#[must_use]
pub fn validator_for(
    parameter_type: ParameterType,
    options: Option<&[String]>,
) -> Option<FieldValidator> {
    match parameter_type {
        ParameterType::Package => Some(package_name_validator()),
        ParameterType::Number => Some(number_validator()),
        ParameterType::Boolean => Some(boolean_validator()),
        ParameterType::Dropdown => options
            .filter(|opts| !opts.is_empty())
            .map(|opts| options_validator(opts.to_vec())),
        ParameterType::Text | ParameterType::MultilineText => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_valid() {
        for name in ["ab", "payments", "payments-api", "feature2", "a1-b2-c3"] {
            assert!(validate_module_name(name).is_valid(), "{name}");
        }
    }

    #[test]
    fn test_module_name_invalid() {
        for name in [
            "",
            "a",
            "Payments",
            "1payments",
            "-payments",
            "payments-",
            "pay--ments",
            "pay_ments",
            "pay.ments",
        ] {
            assert!(!validate_module_name(name).is_valid(), "{name}");
        }
    }

    #[test]
    fn test_module_name_too_long() {
        let name = "a".repeat(MODULE_NAME_MAX_LEN + 1);
        let result = validate_module_name(&name);
        assert!(result.message().unwrap().contains("at most"));
        assert!(validate_module_name(&"a".repeat(MODULE_NAME_MAX_LEN)).is_valid());
    }

    #[test]
    fn test_package_name_valid() {
        for name in ["com", "com.example", "com.example.my_feature", "io.a1.b2"] {
            assert!(validate_package_name(name).is_valid(), "{name}");
        }
    }

    #[test]
    fn test_package_name_invalid_syntax() {
        for name in ["", "Com.example", "com..example", ".com", "com.", "com.1x", "com-example"] {
            assert!(!validate_package_name(name).is_valid(), "{name}");
        }
    }

    #[test]
    fn test_package_name_rejects_keywords() {
        let result = validate_package_name("com.example.object");
        assert!(result.message().unwrap().contains("'object'"));
        assert!(!validate_package_name("while.loop").is_valid());
        assert!(validate_package_name("com.example.objects").is_valid());
    }

    #[test]
    fn test_package_segment_length() {
        let long = format!("com.{}", "a".repeat(PACKAGE_SEGMENT_MAX_LEN + 1));
        assert!(!validate_package_name(&long).is_valid());
    }

    #[test]
    fn test_package_path_conversion() {
        assert_eq!(package_to_path("a.b.c"), "a/b/c");
        assert_eq!(path_to_package("/a/b/c"), "a.b.c");
        assert_eq!(path_to_package(&package_to_path("com.example")), "com.example");
    }

    #[test]
    fn test_number_validator() {
        let validator = number_validator();
        assert!(validator.validate("42").is_valid());
        assert!(validator.validate("-3.5").is_valid());
        assert!(!validator.validate("forty").is_valid());
        assert!(!validator.validate("NaN").is_valid());
    }

    #[test]
    fn test_boolean_validator() {
        let validator = boolean_validator();
        assert!(validator.validate("true").is_valid());
        assert!(validator.validate("false").is_valid());
        assert!(!validator.validate("yes").is_valid());
    }

    #[test]
    fn test_options_validator() {
        let validator = options_validator(vec!["jvm".to_string(), "android".to_string()]);
        assert!(validator.validate("jvm").is_valid());
        assert_eq!(
            validator.validate("ios").message(),
            Some("'ios' is not one of: jvm, android")
        );
    }

    #[test]
    fn test_validator_for_types() {
        assert!(validator_for(ParameterType::Text, None).is_none());
        assert!(validator_for(ParameterType::MultilineText, None).is_none());
        assert_eq!(
            validator_for(ParameterType::Package, None).unwrap().name(),
            "package-name"
        );
        assert!(validator_for(ParameterType::Dropdown, None).is_none());
        assert!(validator_for(ParameterType::Dropdown, Some(&[])).is_none());

        let options = vec!["a".to_string()];
        assert_eq!(
            validator_for(ParameterType::Dropdown, Some(&options))
                .unwrap()
                .name(),
            "options"
        );
    }
}
