//! Show command implementation.

use super::common::Workspace;
use anyhow::Result;
use scaffold_core::cli::{ExitCode, OutputFormat};
use scaffold_core::{ParameterSpec, TemplateDefinition};
use scaffold_template::find_variables;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

/// Everything a user needs to fill in a template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDetails {
    /// Template id
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Declared parameters
    pub parameters: Vec<ParameterSpec>,
    /// Directory paths of the output tree, unresolved
    pub directories: Vec<String>,
    /// File paths of the output tree, unresolved
    pub files: Vec<String>,
    /// Build files that become manifest entries
    pub module_markers: Vec<String>,
    /// Every placeholder used in paths, contents and the build fragment
    pub placeholders: BTreeSet<String>,
}

impl From<&TemplateDefinition> for TemplateDetails {
    fn from(template: &TemplateDefinition) -> Self {
        let tree = &template.file_tree;
        let mut placeholders = find_variables(&template.build_fragment);
        for dir in &tree.directories {
            placeholders.extend(find_variables(&dir.path));
        }
        for file in &tree.files {
            placeholders.extend(find_variables(&file.path));
            placeholders.extend(find_variables(&file.content));
        }

        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            parameters: template.parameters.clone(),
            directories: tree.directories.iter().map(|d| d.path.clone()).collect(),
            files: tree.files.iter().map(|f| f.path.clone()).collect(),
            module_markers: template.module_markers.clone(),
            placeholders,
        }
    }
}

/// Runs the show command.
///
/// # Errors
///
/// Returns an error if the template does not exist or output formatting
/// fails.
pub fn run(workspace: &Workspace, id: &str, output_format: OutputFormat) -> Result<ExitCode> {
    let template = workspace.require_template(id)?;
    info!("Showing template '{id}'");

    let details = TemplateDetails::from(template.as_ref());
    let formatted = crate::formatters::format_output(&details, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::{DirectoryEntry, FileEntry, ParameterType};

    #[test]
    fn test_details_collect_placeholders() {
        let mut template = TemplateDefinition::new("feature");
        template
            .parameters
            .push(ParameterSpec::new("moduleName", ParameterType::Text));
        template
            .file_tree
            .directories
            .push(DirectoryEntry::new("${moduleName}/src/${packagePath}"));
        template
            .file_tree
            .files
            .push(FileEntry::new("${moduleName}/README.md", "# ${title}"));
        template.build_fragment = "implementation(project(\":${moduleName}\"))".to_string();

        let details = TemplateDetails::from(&template);
        assert_eq!(
            details.placeholders.into_iter().collect::<Vec<_>>(),
            vec!["moduleName", "packagePath", "title"]
        );
        assert_eq!(details.files, vec!["${moduleName}/README.md"]);
        assert_eq!(details.parameters.len(), 1);
    }

    #[test]
    fn test_details_serialize_parameter_type() {
        let mut template = TemplateDefinition::new("feature");
        template
            .parameters
            .push(ParameterSpec::new("packageName", ParameterType::Package));

        let json = serde_json::to_value(TemplateDetails::from(&template)).unwrap();
        assert_eq!(json["parameters"][0]["name"], "packageName");
        assert!(json["parameters"][0].get("validator").is_none());
    }
}
