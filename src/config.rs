//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/routetree/routetree.toml`
//! 3. Project config: `<project_dir>/.routetree.toml`
//! 4. Environment variables: `ROUTETREE_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Conventions;

/// Which files the scanner imports from disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to import (empty imports every file)
    pub extensions: Vec<String>,
    /// File or directory names skipped entirely
    pub ignore: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "tsx".into(),
                "ts".into(),
                "jsx".into(),
                "js".into(),
                "mdx".into(),
            ],
            ignore: vec!["node_modules".into(), ".git".into()],
        }
    }
}

/// Raw scan config for intermediate parsing (arrays are Option to detect "not specified").
///
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawScanConfig {
    pub extensions: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawConventions {
    pub root_name: Option<String>,
    pub page_marker: Option<String>,
    pub layout_marker: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub app_dir: Option<PathBuf>,
    pub conventions: RawConventions,
    pub scan: RawScanConfig,
}

impl ScanConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// ```
    /// use routetree::config::ScanConfig;
    ///
    /// let base = vec!["ts".to_string(), "js".to_string()];
    /// let merged = ScanConfig::merge_array(&base, &["!js".to_string(), "md".to_string()]);
    /// assert_eq!(merged, vec!["md".to_string(), "ts".to_string()]);
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // sorted for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Union-merge a project overlay onto self.
    pub fn merge(&self, overlay: &RawScanConfig) -> Self {
        Self {
            extensions: overlay
                .extensions
                .as_ref()
                .map(|o| Self::merge_array(&self.extensions, o))
                .unwrap_or_else(|| self.extensions.clone()),
            ignore: overlay
                .ignore
                .as_ref()
                .map(|o| Self::merge_array(&self.ignore, o))
                .unwrap_or_else(|| self.ignore.clone()),
        }
    }

    /// Apply global config onto defaults; specified arrays REPLACE.
    pub fn apply_global(&self, global: &RawScanConfig) -> Self {
        Self {
            extensions: global
                .extensions
                .clone()
                .unwrap_or_else(|| self.extensions.clone()),
            ignore: global.ignore.clone().unwrap_or_else(|| self.ignore.clone()),
        }
    }

    /// True when `extension` (without the dot) should be imported.
    pub fn accepts_extension(&self, extension: Option<&str>) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        extension
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|i| i == name)
    }
}

fn merge_conventions(base: &Conventions, overlay: &RawConventions) -> Conventions {
    Conventions {
        root_name: overlay
            .root_name
            .clone()
            .unwrap_or_else(|| base.root_name.clone()),
        page_marker: overlay
            .page_marker
            .clone()
            .unwrap_or_else(|| base.page_marker.clone()),
        layout_marker: overlay
            .layout_marker
            .clone()
            .unwrap_or_else(|| base.layout_marker.clone()),
    }
}

/// Unified configuration for routetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// App directory, relative to the project directory unless absolute
    pub app_dir: PathBuf,
    /// Reserved names that give the tree its routing meaning
    pub conventions: Conventions,
    /// Scanner filters
    pub scan: ScanConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_dir: PathBuf::from("app"),
            conventions: Conventions::default(),
            scan: ScanConfig::default(),
        }
    }
}

/// Get the XDG config directory for routetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "routetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("routetree.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".routetree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Absolute app directory for a project.
    pub fn app_dir_in(&self, project_dir: &Path) -> PathBuf {
        if self.app_dir.is_absolute() {
            self.app_dir.clone()
        } else {
            project_dir.join(&self.app_dir)
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in `app_dir`.
    fn expand_paths(&mut self) {
        let raw = self.app_dir.to_string_lossy().to_string();
        match shellexpand::full(&raw) {
            Ok(expanded) => self.app_dir = PathBuf::from(expanded.as_ref()),
            Err(e) => debug!("app_dir not expanded: {}", e),
        }
    }

    /// Union-merge overlay config onto self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            app_dir: overlay
                .app_dir
                .clone()
                .unwrap_or_else(|| self.app_dir.clone()),
            conventions: merge_conventions(&self.conventions, &overlay.conventions),
            scan: self.scan.merge(&overlay.scan),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            app_dir: global
                .app_dir
                .clone()
                .unwrap_or_else(|| self.app_dir.clone()),
            conventions: merge_conventions(&self.conventions, &global.conventions),
            scan: self.scan.apply_global(&global.scan),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Project: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), project_dir)
    }

    /// Like [`Settings::load`] with an explicit global config file.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(project) = project_dir {
            let local_path = project_config_path(project);
            if local_path.exists() {
                debug!("loading project config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ROUTETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ROUTETREE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("scan.extensions")
                    .with_list_parse_key("scan.ignore")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("app_dir") {
            settings.app_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("conventions.root_name") {
            settings.conventions.root_name = val;
        }
        if let Ok(val) = config.get_string("conventions.page_marker") {
            settings.conventions.page_marker = val;
        }
        if let Ok(val) = config.get_string("conventions.layout_marker") {
            settings.conventions.layout_marker = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("scan.extensions") {
            settings.scan.extensions = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("scan.ignore") {
            settings.scan.ignore = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# routetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:  ~/.config/routetree/routetree.toml  (defines your baseline)
#   Project: <project_dir>/.routetree.toml      (project-specific additions)
#   Env:     ROUTETREE_* environment variables  (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Project config UNIONS with global.
#   Use "!item" in project config to REMOVE an inherited item:
#     extensions = ["md", "!js"]  # adds md, removes js

# App directory, relative to the project directory
# app_dir = "app"

[conventions]
# Name of the root directory
# root_name = "app"

# File (or file stem) that makes a directory routable
# page_marker = "page"

# File (or file stem) that makes a directory layout-bearing
# layout_marker = "layout"

[scan]
# File extensions imported by the scanner (empty imports everything)
# extensions = ["tsx", "ts", "jsx", "js", "mdx"]

# Names skipped during scanning
# ignore = ["node_modules", ".git"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None).expect("load defaults");
        assert_eq!(settings.app_dir, PathBuf::from("app"));
        assert_eq!(settings.conventions, Conventions::default());
        assert!(settings.scan.extensions.contains(&"tsx".to_string()));
    }

    #[test]
    fn given_tilde_in_app_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            app_dir: PathBuf::from("~/site/app"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let app = settings.app_dir.to_string_lossy();
        assert!(app.starts_with(&home), "app_dir should start with home: {}", app);
        assert!(!app.contains('~'));
    }

    #[test]
    fn given_relative_and_absolute_app_dir_when_resolving_then_joins_only_relative() {
        let settings = Settings::default();
        assert_eq!(
            settings.app_dir_in(Path::new("/proj")),
            PathBuf::from("/proj/app")
        );

        let absolute = Settings {
            app_dir: PathBuf::from("/elsewhere/app"),
            ..Settings::default()
        };
        assert_eq!(
            absolute.app_dir_in(Path::new("/proj")),
            PathBuf::from("/elsewhere/app")
        );
    }

    // ========================================
    // Tests for merge_array union semantics
    // ========================================

    #[test]
    fn test_merge_array_union_and_negation() {
        let base = strings(&["a", "b"]);
        assert_eq!(
            ScanConfig::merge_array(&base, &strings(&["c"])),
            strings(&["a", "b", "c"])
        );
        assert_eq!(
            ScanConfig::merge_array(&base, &strings(&["!a", "c"])),
            strings(&["b", "c"])
        );
        assert_eq!(
            ScanConfig::merge_array(&base, &strings(&["!x", "a"])),
            strings(&["a", "b"])
        );
        assert!(ScanConfig::merge_array(&[], &[]).is_empty());
    }

    #[test]
    fn test_apply_global_replaces_arrays() {
        let base = ScanConfig::default();
        let global = RawScanConfig {
            extensions: Some(strings(&["md"])),
            ignore: None,
        };

        let result = base.apply_global(&global);

        assert_eq!(result.extensions, strings(&["md"]));
        assert_eq!(result.ignore, base.ignore);
    }

    #[test]
    fn test_merge_scan_config_unions() {
        let base = ScanConfig::default();
        let overlay = RawScanConfig {
            extensions: Some(strings(&["md", "!js"])),
            ignore: Some(strings(&["dist"])),
        };

        let result = base.merge(&overlay);

        assert!(result.extensions.contains(&"md".to_string()));
        assert!(!result.extensions.contains(&"js".to_string()));
        assert_eq!(result.extensions.len(), 5);
        assert_eq!(result.ignore, strings(&[".git", "dist", "node_modules"]));
    }

    #[test]
    fn test_conventions_overlay_keeps_unspecified_names() {
        let overlay = RawConventions {
            page_marker: Some("index".into()),
            ..RawConventions::default()
        };
        let merged = merge_conventions(&Conventions::default(), &overlay);
        assert_eq!(merged.page_marker, "index");
        assert_eq!(merged.layout_marker, "layout");
        assert_eq!(merged.root_name, "app");
    }

    #[test]
    fn test_accepts_extension() {
        let scan = ScanConfig::default();
        assert!(scan.accepts_extension(Some("tsx")));
        assert!(scan.accepts_extension(Some("TSX")));
        assert!(!scan.accepts_extension(Some("css")));
        assert!(!scan.accepts_extension(None));

        let open = ScanConfig {
            extensions: vec![],
            ignore: vec![],
        };
        assert!(open.accepts_extension(None));
    }

    #[test]
    fn test_template_parses_as_settings() {
        let parsed: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(parsed.app_dir.is_none());
        assert!(parsed.scan.extensions.is_none());
    }

    #[test]
    fn test_to_toml_round_trips_defaults() {
        let rendered = Settings::default().to_toml().unwrap();
        let parsed: Settings = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
