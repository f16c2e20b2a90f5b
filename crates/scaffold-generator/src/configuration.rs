//! A template bound to variable values and a target directory.

use scaffold_core::{Error, Result, TemplateDefinition, Variables};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Variable conventionally holding the name of the generated module.
pub const MODULE_NAME_VARIABLE: &str = "moduleName";

/// One generation or preview request.
///
/// # Examples
///
/// ```
/// use scaffold_core::{ParameterSpec, ParameterType, TemplateDefinition, Variables};
/// use scaffold_generator::ModuleConfiguration;
/// use std::sync::Arc;
///
/// let mut template = TemplateDefinition::new("feature");
/// template.parameters.push(
///     ParameterSpec::new("packageName", ParameterType::Package).with_default("com.example"),
/// );
///
/// let config = ModuleConfiguration::new(Arc::new(template), Variables::new(), "/proj/modules")
///     .with_defaults();
///
/// assert_eq!(config.variables["packageName"], "com.example");
/// assert!(config.check().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ModuleConfiguration {
    /// Template to instantiate
    pub template: Arc<TemplateDefinition>,
    /// Variable values by parameter name
    pub variables: Variables,
    /// Generation root
    pub target_path: PathBuf,
}

impl ModuleConfiguration {
    /// Binds a template to values and a target directory.
    #[must_use]
    pub fn new(
        template: Arc<TemplateDefinition>,
        variables: Variables,
        target_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template,
            variables,
            target_path: target_path.into(),
        }
    }

    /// Fills every variable the caller left out with its parameter's
    /// non-empty default. Supplied values, even blank ones, are kept.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        for parameter in &self.template.parameters {
            if parameter.default_value.is_empty() {
                continue;
            }
            self.variables
                .entry(parameter.name.clone())
                .or_insert_with(|| parameter.default_value.clone());
        }
        self
    }

    /// Every violation, in parameter order: missing required values and
    /// validator rejections.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.target_path.as_os_str().is_empty() {
            errors.push("Target path cannot be empty".to_string());
        }
        for parameter in &self.template.parameters {
            let value = self.variables.get(&parameter.name).map(String::as_str);
            errors.extend(parameter.check_value(value));
        }
        errors
    }

    /// Fails with every violation aggregated into one message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] when [`validate`](Self::validate)
    /// reports anything.
    pub fn check(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        Err(Error::ConfigurationError {
            message: format!("Validation failed: {}", errors.join(", ")),
        })
    }

    /// Label of the generated module: the `moduleName` variable, or the
    /// target directory's name.
    #[must_use]
    pub fn module_label(&self) -> String {
        self.variables
            .get(MODULE_NAME_VARIABLE)
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| directory_name(&self.target_path))
    }
}

/// Last component of `path`, or the empty string.
pub(crate) fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::validators::validator_for;
    use scaffold_core::{ParameterSpec, ParameterType};

    fn template() -> Arc<TemplateDefinition> {
        let mut template = TemplateDefinition::new("feature");
        template.parameters = vec![
            ParameterSpec::new("moduleName", ParameterType::Text).with_display_name("Module Name"),
            ParameterSpec::new("packageName", ParameterType::Package)
                .with_display_name("Package")
                .with_default("com.example")
                .with_validator(validator_for(ParameterType::Package, None).unwrap()),
            ParameterSpec::new("comment", ParameterType::Text).with_required(false),
        ];
        Arc::new(template)
    }

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_with_defaults_keeps_supplied_values() {
        let config =
            ModuleConfiguration::new(template(), vars(&[("packageName", "")]), "/t").with_defaults();
        assert_eq!(config.variables["packageName"], "");
        assert!(!config.variables.contains_key("comment"));
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let config = ModuleConfiguration::new(
            template(),
            vars(&[("packageName", "com.Example")]),
            "/t",
        );
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Module Name is required");
    }

    #[test]
    fn test_check_message_format() {
        let config = ModuleConfiguration::new(template(), Variables::new(), "/t");
        let err = config.check().unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(
            err.to_string(),
            "Configuration error: Validation failed: Module Name is required, Package is required"
        );
    }

    #[test]
    fn test_empty_target_rejected() {
        let config = ModuleConfiguration::new(
            template(),
            vars(&[("moduleName", "payments"), ("packageName", "com.example")]),
            "",
        );
        assert_eq!(config.validate(), vec!["Target path cannot be empty"]);
    }

    #[test]
    fn test_module_label() {
        let config =
            ModuleConfiguration::new(template(), vars(&[("moduleName", "payments")]), "/proj/modules");
        assert_eq!(config.module_label(), "payments");

        let config = ModuleConfiguration::new(template(), Variables::new(), "/proj/modules");
        assert_eq!(config.module_label(), "modules");
    }
}
