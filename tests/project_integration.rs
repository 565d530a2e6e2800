//! Integration tests for project configuration.

use autumn::commands::{init_project, resolve_settings, RunOptions};
use autumn::config::{ProjectConfig, CONFIG_DIR, CONFIG_FILE};
use autumn::docs::DocGenerator;
use tempfile::TempDir;

#[test]
fn test_init_then_generate_from_subdirectory() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("pkg").join("inner")).unwrap();
    std::fs::write(root.join("pkg").join("mod.go"), "package pkg\n").unwrap();
    std::fs::write(root.join("main.py"), "print('hi')\n").unwrap();

    let init = init_project(root, None, Some("go")).unwrap();
    assert_eq!(init.config_path, root.join(CONFIG_DIR).join(CONFIG_FILE));

    // Resolving from a nested directory finds the project config above it.
    let resolved = resolve_settings(&RunOptions::new(root.join("pkg").join("inner"))).unwrap();
    assert_eq!(resolved.config_path.as_ref(), Some(&init.config_path));
    assert_eq!(resolved.settings.extensions, vec![".go"]);

    let generator = DocGenerator::new(resolved.settings).unwrap();
    let written = generator.update_documentation().unwrap();
    assert_eq!(written[0], root.join(CONFIG_DIR).join("CODE_DOCUMENTATION.md"));

    let doc = std::fs::read_to_string(&written[0]).unwrap();
    assert!(doc.contains("package pkg"));
    assert!(!doc.contains("print('hi')"));
}

#[test]
fn test_project_file_is_yaml() {
    let dir = TempDir::new().unwrap();
    let init = init_project(dir.path(), Some("CTX.md"), Some("py")).unwrap();

    let written = std::fs::read_to_string(&init.config_path).unwrap();
    assert!(written.contains("extensions:\n- .py\n"));
    assert!(written.contains("output_file: .autumn/CTX.md"));
    assert!(written.contains("watch_path: ."));

    let config = ProjectConfig::load(&init.config_path).unwrap();
    assert_eq!(config.output_file, dir.path().join(CONFIG_DIR).join("CTX.md"));
}

#[test]
fn test_autumn_dir_contents_are_not_mirrored() {
    let dir = TempDir::new().unwrap();
    init_project(dir.path(), None, Some("py")).unwrap();
    std::fs::write(dir.path().join(CONFIG_DIR).join("scratch.py"), "hidden = 1\n").unwrap();
    std::fs::write(dir.path().join("app.py"), "shown = 1\n").unwrap();

    let resolved = resolve_settings(&RunOptions::new(dir.path())).unwrap();
    let generator = DocGenerator::new(resolved.settings).unwrap();
    let written = generator.update_documentation().unwrap();

    let doc = std::fs::read_to_string(&written[0]).unwrap();
    assert!(doc.contains("shown = 1"));
    assert!(!doc.contains("hidden = 1"));
}
