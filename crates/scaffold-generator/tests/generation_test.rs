//! End-to-end generation tests.
//!
//! Each scenario runs against the in-memory backend, and the payments
//! scenario also against a real temporary directory.

use scaffold_core::validators::validator_for;
use scaffold_core::{
    DirectoryEntry, FileEntry, ParameterSpec, ParameterType, TemplateDefinition, Variables,
};
use scaffold_files::{DiskFileSystem, FileSystem, MemoryFileSystem};
use scaffold_generator::{GenerationEngine, GenerationResult, ModuleConfiguration, PreviewEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn payments_template() -> TemplateDefinition {
    let mut template = TemplateDefinition::new("feature");
    template.parameters.push(
        ParameterSpec::new("moduleName", ParameterType::Text).with_display_name("Module Name"),
    );
    template
        .file_tree
        .directories
        .push(DirectoryEntry::new("${moduleName}/src"));
    template
        .file_tree
        .files
        .push(FileEntry::new("${moduleName}/README.md", "# ${moduleName}"));
    template
}

fn vars(pairs: &[(&str, &str)]) -> Variables {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn payments_config(target: impl Into<PathBuf>) -> ModuleConfiguration {
    ModuleConfiguration::new(
        Arc::new(payments_template()),
        vars(&[("moduleName", "payments")]),
        target,
    )
}

#[test]
fn test_end_to_end_payments_in_memory() {
    let fs = MemoryFileSystem::new().with_dir("/proj");
    let result = GenerationEngine::new(&fs, "/proj").generate(&payments_config("/proj/modules"));

    assert!(result.is_success(), "{result:?}");
    assert!(fs.is_dir(Path::new("/proj/modules/payments/src")));
    assert_eq!(
        fs.read_to_string(Path::new("/proj/modules/payments/README.md"))
            .unwrap(),
        "# payments"
    );

    match result {
        GenerationResult::Success {
            module_label,
            module_directory,
            generated_files,
        } => {
            assert_eq!(module_label, "payments");
            assert_eq!(module_directory, PathBuf::from("/proj/modules/payments"));
            assert_eq!(
                generated_files,
                vec![PathBuf::from("/proj/modules/payments/README.md")]
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_end_to_end_payments_on_disk() {
    let temp = TempDir::new().unwrap();
    let project = temp.path();
    let target = project.join("modules");

    let fs = DiskFileSystem::new();
    let result = GenerationEngine::new(&fs, project).generate(&payments_config(&target));

    assert!(result.is_success(), "{result:?}");
    assert!(target.join("payments/src").is_dir());
    assert_eq!(
        std::fs::read_to_string(target.join("payments/README.md")).unwrap(),
        "# payments"
    );
}

#[test]
fn test_missing_required_variable_mutates_nothing() {
    let fs = MemoryFileSystem::new().with_dir("/proj");
    let before = (fs.directories(), fs.files());

    let config = ModuleConfiguration::new(Arc::new(payments_template()), Variables::new(), "/proj/modules");
    let result = GenerationEngine::new(&fs, "/proj").generate(&config);

    match &result {
        GenerationResult::Failure { error } => {
            assert_eq!(error, "Validation failed: Module Name is required");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs.mutation_count(), 0);
    assert_eq!((fs.directories(), fs.files()), before);
    assert!(!fs.exists(Path::new("/proj/modules")));
}

#[test]
fn test_validator_failure_mutates_nothing_on_disk() {
    let temp = TempDir::new().unwrap();
    let mut template = payments_template();
    template.parameters.push(
        ParameterSpec::new("packageName", ParameterType::Package)
            .with_validator(validator_for(ParameterType::Package, None).unwrap()),
    );
    let config = ModuleConfiguration::new(
        Arc::new(template),
        vars(&[("moduleName", "payments"), ("packageName", "com.example.class")]),
        temp.path().join("modules"),
    );

    let result = GenerationEngine::new(&DiskFileSystem::new(), temp.path()).generate(&config);

    assert!(result.is_failure());
    assert!(!temp.path().join("modules").exists());
}

#[test]
fn test_second_run_is_idempotent() {
    let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "rootProject.name = \"demo\"\n");
    let mut template = payments_template();
    template
        .file_tree
        .files
        .push(FileEntry::new("${moduleName}/build.gradle.kts", "plugins {}"));
    template
        .module_markers
        .push("${moduleName}/build.gradle.kts".to_string());
    let config = ModuleConfiguration::new(
        Arc::new(template),
        vars(&[("moduleName", "payments")]),
        "/proj/modules",
    );
    let engine = GenerationEngine::new(&fs, "/proj");

    assert!(engine.generate(&config).is_success());
    let manifest_after_first = fs.read_bytes("/proj/settings.gradle.kts").unwrap();
    assert_eq!(
        String::from_utf8(manifest_after_first.clone()).unwrap(),
        "rootProject.name = \"demo\"\n\ninclude(\":modules:payments\")\n"
    );

    let second = engine.generate(&config);
    assert!(second.is_success(), "{second:?}");
    assert_eq!(
        fs.read_bytes("/proj/settings.gradle.kts").unwrap(),
        manifest_after_first
    );
    assert_eq!(
        fs.read_to_string(Path::new("/proj/modules/payments/README.md"))
            .unwrap(),
        "# payments"
    );
}

#[test]
fn test_existing_include_not_duplicated() {
    let original = "rootProject.name = \"demo\"\ninclude(\":payments\")\n";
    let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle", original);
    let mut template = payments_template();
    template
        .module_markers
        .push("${moduleName}/build.gradle.kts".to_string());
    let config = ModuleConfiguration::new(
        Arc::new(template),
        vars(&[("moduleName", "payments")]),
        "/proj",
    );

    let result = GenerationEngine::new(&fs, "/proj").generate(&config);

    assert!(result.is_success(), "{result:?}");
    assert_eq!(
        fs.read_to_string(Path::new("/proj/settings.gradle")).unwrap(),
        original
    );
}

#[test]
fn test_root_marker_registers_target_directory() {
    let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "");
    let mut template = TemplateDefinition::new("single");
    template
        .file_tree
        .files
        .push(FileEntry::new("build.gradle.kts", "plugins {}"));
    template.module_markers.push("build.gradle.kts".to_string());
    let config = ModuleConfiguration::new(Arc::new(template), Variables::new(), "/proj/modules/feature");

    let result = GenerationEngine::new(&fs, "/proj").generate(&config);

    assert!(result.is_success(), "{result:?}");
    assert!(fs.is_file(Path::new("/proj/modules/feature/build.gradle.kts")));
    assert_eq!(
        fs.read_to_string(Path::new("/proj/settings.gradle.kts"))
            .unwrap(),
        "\ninclude(\":modules:feature\")\n"
    );
}

#[test]
fn test_nested_markers_register_full_paths() {
    let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "");
    let mut template = TemplateDefinition::new("feature");
    for marker in ["feature/api/build.gradle.kts", "feature/impl/build.gradle.kts"] {
        template.file_tree.files.push(FileEntry::new(marker, ""));
        template.module_markers.push(marker.to_string());
    }
    let config = ModuleConfiguration::new(Arc::new(template), Variables::new(), "/proj");

    let result = GenerationEngine::new(&fs, "/proj").generate(&config);

    assert!(result.is_success());
    assert_eq!(
        fs.read_to_string(Path::new("/proj/settings.gradle.kts"))
            .unwrap(),
        "\ninclude(\":feature:api\")\ninclude(\":feature:impl\")\n"
    );
}

#[test]
fn test_manifest_failure_is_warning_and_files_remain() {
    let fs = MemoryFileSystem::new()
        .with_file("/proj/settings.gradle.kts", "")
        .with_read_only("/proj/settings.gradle.kts");
    let mut template = payments_template();
    template
        .module_markers
        .push("${moduleName}/build.gradle.kts".to_string());
    let config = ModuleConfiguration::new(
        Arc::new(template),
        vars(&[("moduleName", "payments")]),
        "/proj/modules",
    );

    let result = GenerationEngine::new(&fs, "/proj").generate(&config);

    assert!(result.is_warning());
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].contains("settings.gradle.kts"));
    assert!(fs.is_file(Path::new("/proj/modules/payments/README.md")));
}

#[test]
fn test_missing_manifest_is_not_a_warning() {
    let fs = MemoryFileSystem::new().with_dir("/proj");
    let mut template = payments_template();
    template
        .module_markers
        .push("${moduleName}/build.gradle.kts".to_string());
    let config = ModuleConfiguration::new(
        Arc::new(template),
        vars(&[("moduleName", "payments")]),
        "/proj/modules",
    );

    assert!(GenerationEngine::new(&fs, "/proj").generate(&config).is_success());
}

#[test]
fn test_preview_payments() {
    let fs = MemoryFileSystem::new().with_dir("/proj");
    let preview = PreviewEngine::new(&fs, "/proj").preview(&payments_config("/proj/modules"));

    assert_eq!(preview.directories.len(), 1);
    assert_eq!(preview.directories[0].path, "payments/src");
    assert_eq!(preview.directories[0].level, 1);

    assert_eq!(preview.files.len(), 1);
    assert_eq!(preview.files[0].path, "payments/README.md");
    assert_eq!(preview.files[0].level, 1);
    assert_eq!(preview.files[0].size, "# payments".len());
    assert_eq!(preview.files[0].size, 10);

    assert!(preview.manifest_changes.is_empty());
    assert_eq!(fs.mutation_count(), 0);
}

#[test]
fn test_preview_matches_generation() {
    let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "include(\":modules:payments\")\n");
    let mut template = payments_template();
    for marker in ["${moduleName}/build.gradle.kts", "${moduleName}/api/build.gradle.kts"] {
        template.file_tree.files.push(FileEntry::new(marker, ""));
        template.module_markers.push(marker.to_string());
    }
    let config = ModuleConfiguration::new(
        Arc::new(template),
        vars(&[("moduleName", "payments")]),
        "/proj/modules",
    );

    let preview = PreviewEngine::new(&fs, "/proj").preview(&config);
    assert_eq!(
        preview.manifest_changes,
        vec![
            "Add to settings.gradle(.kts): include(\":modules:payments:api\")",
            "Already in settings.gradle(.kts): include(\":modules:payments\")",
        ]
    );
    assert_eq!(fs.mutation_count(), 0);

    let result = GenerationEngine::new(&fs, "/proj").generate(&config);
    let written: Vec<_> = result
        .generated_files()
        .iter()
        .map(|p| p.strip_prefix("/proj/modules").unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    let previewed: Vec<_> = preview.files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(written, previewed);

    assert_eq!(
        fs.read_to_string(Path::new("/proj/settings.gradle.kts"))
            .unwrap(),
        "include(\":modules:payments\")\n\ninclude(\":modules:payments:api\")\n"
    );
}

#[test]
fn test_preview_size_uses_declared_encoding() {
    let fs = MemoryFileSystem::new();
    let mut template = TemplateDefinition::new("t");
    template.file_tree.files = vec![
        FileEntry::new("a.txt", "café"),
        FileEntry::new("b.txt", "café").with_encoding("ISO-8859-1"),
    ];
    let config = ModuleConfiguration::new(Arc::new(template), Variables::new(), "/out");

    let preview = PreviewEngine::new(&fs, "/proj").preview(&config);
    let sizes: Vec<_> = preview.files.iter().map(|f| f.size).collect();
    assert_eq!(sizes, vec![5, 4]);
    assert_eq!(preview.files[0].level, 0);
}

fn marker_config(module_name: &str) -> ModuleConfiguration {
    let mut template = payments_template();
    let marker = "${moduleName}/build.gradle.kts";
    template.file_tree.files.push(FileEntry::new(marker, ""));
    template.module_markers.push(marker.to_string());
    ModuleConfiguration::new(
        Arc::new(template),
        vars(&[("moduleName", module_name)]),
        "/proj/modules",
    )
}

#[test]
fn test_escaping_module_is_never_registered() {
    let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "");
    let config = marker_config("../../evil");

    let preview = PreviewEngine::new(&fs, "/proj").preview(&config);
    assert!(preview.manifest_changes.is_empty());

    let result = GenerationEngine::new(&fs, "/proj").generate(&config);
    assert!(result.is_warning());
    assert!(result.warnings()[0].contains("escapes the target directory"));
    assert!(!fs.exists(Path::new("/evil")));
    assert_eq!(
        fs.read_to_string(Path::new("/proj/settings.gradle.kts"))
            .unwrap(),
        ""
    );
}

#[test]
fn test_dotted_module_name_registered_normalized() {
    for (module_name, entry) in [("a/./b", ":modules:a:b"), ("x/..", ":modules")] {
        let fs = MemoryFileSystem::new().with_file("/proj/settings.gradle.kts", "");
        let config = marker_config(module_name);

        let preview = PreviewEngine::new(&fs, "/proj").preview(&config);
        assert_eq!(
            preview.manifest_changes,
            vec![format!("Add to settings.gradle(.kts): include(\"{entry}\")")]
        );

        let result = GenerationEngine::new(&fs, "/proj").generate(&config);
        assert!(!result.is_failure(), "{result:?}");
        assert_eq!(
            fs.read_to_string(Path::new("/proj/settings.gradle.kts"))
                .unwrap(),
            format!("\ninclude(\"{entry}\")\n")
        );
    }
}
