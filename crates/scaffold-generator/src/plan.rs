//! Resolution of a configuration into concrete output items.
//!
//! Generation and preview both work from a [`GenerationPlan`], so the
//! preview cannot drift from what generation actually does.

use crate::configuration::ModuleConfiguration;
use crate::module_path::{ModulePath, derive_module_paths, module_entries};
use scaffold_template::resolver::resolve;
use std::path::{Path, PathBuf};

/// A directory to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDirectory {
    /// Path as written in the template
    pub template_path: String,
    /// Resolved, target-relative path
    pub path: String,
}

/// A file to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path as written in the template
    pub template_path: String,
    /// Resolved, target-relative path
    pub path: String,
    /// Resolved content
    pub content: String,
    /// Declared output encoding
    pub encoding: String,
}

/// Nesting depth of a resolved relative path: its number of `/`.
#[must_use]
pub fn path_level(path: &str) -> usize {
    path.matches('/').count()
}

/// Everything one generation run would produce.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    /// Generation root
    pub target: PathBuf,
    /// Directories in template order
    pub directories: Vec<PlannedDirectory>,
    /// Files in template order
    pub files: Vec<PlannedFile>,
    /// Derived modules, first-occurrence order
    pub module_paths: Vec<ModulePath>,
}

impl GenerationPlan {
    /// Resolves every path, content and marker of `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_core::{DirectoryEntry, FileEntry, TemplateDefinition, Variables};
    /// use scaffold_generator::{GenerationPlan, ModuleConfiguration};
    /// use std::sync::Arc;
    ///
    /// let mut template = TemplateDefinition::new("feature");
    /// template.file_tree.directories.push(DirectoryEntry::new("${moduleName}/src"));
    /// template.file_tree.files.push(FileEntry::new("${moduleName}/README.md", "# ${moduleName}"));
    ///
    /// let mut vars = Variables::new();
    /// vars.insert("moduleName".to_string(), "payments".to_string());
    /// let config = ModuleConfiguration::new(Arc::new(template), vars, "/proj/modules");
    ///
    /// let plan = GenerationPlan::build(&config);
    /// assert_eq!(plan.directories[0].path, "payments/src");
    /// assert_eq!(plan.files[0].content, "# payments");
    /// ```
    #[must_use]
    pub fn build(config: &ModuleConfiguration) -> Self {
        let variables = &config.variables;
        let tree = &config.template.file_tree;

        let directories = tree
            .directories
            .iter()
            .map(|dir| PlannedDirectory {
                template_path: dir.path.clone(),
                path: resolve(&dir.path, variables),
            })
            .collect();

        let files = tree
            .files
            .iter()
            .map(|file| PlannedFile {
                template_path: file.path.clone(),
                path: resolve(&file.path, variables),
                content: resolve(&file.content, variables),
                encoding: file.encoding.clone(),
            })
            .collect();

        let module_paths =
            derive_module_paths(&config.template.module_markers, variables, &config.target_path);

        Self {
            target: config.target_path.clone(),
            directories,
            files,
            module_paths,
        }
    }

    /// Manifest entries for the derived modules.
    #[must_use]
    pub fn module_entries(&self, project_root: &Path) -> Vec<String> {
        module_entries(project_root, &self.target, &self.module_paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::{FileEntry, TemplateDefinition, Variables};
    use std::sync::Arc;

    #[test]
    fn test_path_level() {
        assert_eq!(path_level("payments"), 0);
        assert_eq!(path_level("payments/src"), 1);
        assert_eq!(path_level("payments/src/main/kotlin"), 3);
    }

    #[test]
    fn test_plan_keeps_template_paths_and_encoding() {
        let mut template = TemplateDefinition::new("t");
        template
            .file_tree
            .files
            .push(FileEntry::new("${name}.txt", "${name}").with_encoding("ISO-8859-1"));
        template.module_markers.push("${name}/build.gradle".to_string());

        let mut vars = Variables::new();
        vars.insert("name".to_string(), "core".to_string());
        let config = ModuleConfiguration::new(Arc::new(template), vars, "/proj/libs");

        let plan = GenerationPlan::build(&config);
        assert_eq!(plan.files[0].template_path, "${name}.txt");
        assert_eq!(plan.files[0].path, "core.txt");
        assert_eq!(plan.files[0].encoding, "ISO-8859-1");
        assert_eq!(plan.module_entries(Path::new("/proj")), vec![":libs:core"]);
    }
}
