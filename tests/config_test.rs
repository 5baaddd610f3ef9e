//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Project: UNION with negation support
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Global config files live in temp directories and are passed explicitly
//! through `Settings::load_from`.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use routetree::application::ApplicationError;
use routetree::config::{project_config_path, Settings};

// ============================================================
// Project config union merge
// ============================================================

#[test]
fn given_project_config_with_extensions_when_load_then_unions_with_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        project_config_path(project.path()),
        r#"
[scan]
extensions = ["md", "!js"]
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(None, Some(project.path())).expect("load settings");

    // Assert
    let ext = &settings.scan.extensions;
    assert!(ext.contains(&"md".to_string()), "project adds md");
    assert!(ext.contains(&"tsx".to_string()), "default tsx kept");
    assert!(!ext.contains(&"js".to_string()), "!js removes default js");
}

#[test]
fn given_global_and_project_config_when_load_then_global_replaces_and_project_unions() {
    // Arrange
    let global_dir = TempDir::new().unwrap();
    let global = global_dir.path().join("routetree.toml");
    fs::write(
        &global,
        r#"
app_dir = "src/app"

[scan]
extensions = ["tsx"]
ignore = ["dist"]
"#,
    )
    .unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        project_config_path(project.path()),
        r#"
[scan]
extensions = ["mdx"]
"#,
    )
    .unwrap();

    // Act
    let settings =
        Settings::load_from(Some(global.as_path()), Some(project.path())).expect("load settings");

    // Assert: defaults replaced by global, then union with project
    assert_eq!(settings.app_dir, PathBuf::from("src/app"));
    assert_eq!(
        settings.scan.extensions,
        vec!["mdx".to_string(), "tsx".to_string()]
    );
    assert_eq!(settings.scan.ignore, vec!["dist".to_string()]);
}

#[test]
fn given_project_conventions_when_load_then_only_named_fields_change() {
    let project = TempDir::new().unwrap();
    fs::write(
        project_config_path(project.path()),
        r#"
[conventions]
page_marker = "index"
"#,
    )
    .unwrap();

    let settings = Settings::load_from(None, Some(project.path())).unwrap();

    assert_eq!(settings.conventions.page_marker, "index");
    assert_eq!(settings.conventions.layout_marker, "layout");
    assert_eq!(settings.conventions.root_name, "app");
}

#[test]
fn given_missing_global_file_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let settings = Settings::load_from(Some(missing.as_path()), Some(dir.path())).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_malformed_project_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(project_config_path(project.path()), "app_dir = [unclosed").unwrap();

    let err = Settings::load_from(None, Some(project.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".routetree.toml"));
}

#[test]
fn given_effective_settings_when_rendered_then_toml_contains_sections() {
    let rendered = Settings::default().to_toml().unwrap();
    assert!(rendered.contains("app_dir = \"app\""));
    assert!(rendered.contains("[conventions]"));
    assert!(rendered.contains("[scan]"));
}
