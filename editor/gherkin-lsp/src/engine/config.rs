//! Workspace configuration
//!
//! Read from `.gherkin-lsp.yaml` (or `.yml`, with or without the leading
//! dot) in the workspace root:
//!
//! ```yaml
//! engine:
//!   name: gherkin-lsp
//!   log_level: info
//!   workspace_discovery: true
//!
//! rules:
//!   max-steps:
//!     max: 5
//!   line-length:
//!     enabled: true
//! ```

use gherkin_lint::Settings;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file names, in lookup order
pub const CONFIG_FILES: &[&str] = &[
    ".gherkin-lsp.yaml",
    ".gherkin-lsp.yml",
    "gherkin-lsp.yaml",
    "gherkin-lsp.yml",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub engine: EngineSettings,
    /// Rule settings, same shape as the editor's `rules` object
    pub rules: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Server name
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Look for a configuration file in the workspace root
    pub workspace_discovery: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: "gherkin-lsp".to_string(),
            log_level: "info".to_string(),
            workspace_discovery: true,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// First existing configuration file in `workspace_root`
    pub fn find(workspace_root: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| workspace_root.join(name))
            .find(|candidate| candidate.exists())
    }

    /// Configuration of `workspace_root`, or the defaults when there is
    /// none or it cannot be read.
    pub fn load_default(workspace_root: &Path) -> Self {
        let Some(path) = Self::find(workspace_root) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(err) => {
                tracing::warn!("Ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Rule settings declared by the workspace
    pub fn rule_settings(&self) -> Settings {
        Settings::from_value(&serde_json::json!({ "rules": self.rules }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.engine.name, "gherkin-lsp");
        assert_eq!(config.engine.log_level, "info");
        assert!(config.engine.workspace_discovery);
        assert!(config.rule_settings().is_empty());
    }

    #[test]
    fn test_load_config_from_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.yaml");

        let yaml = r#"
engine:
  name: test-lsp
  log_level: debug
  workspace_discovery: false

rules:
  max-steps:
    max: 5
  line-length:
    enabled: true
"#;
        fs::write(&config_path, yaml).unwrap();

        let config = EngineConfig::load(&config_path).unwrap();
        assert_eq!(config.engine.name, "test-lsp");
        assert_eq!(config.engine.log_level, "debug");
        assert!(!config.engine.workspace_discovery);

        let settings = config.rule_settings();
        assert_eq!(settings.rule("line-length").unwrap().enabled, Some(true));
        assert_eq!(
            settings.rule("max-steps").unwrap().properties["max"],
            serde_json::json!(5)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = EngineConfig::load(&temp_dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".gherkin-lsp.yaml");
        fs::write(&config_path, "engine: [unclosed").unwrap();

        assert!(matches!(EngineConfig::load(&config_path), Err(ConfigError::Yaml(_))));
        // Falls back to defaults
        assert_eq!(EngineConfig::load_default(temp_dir.path()).engine.name, "gherkin-lsp");
    }

    #[test]
    fn test_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = EngineConfig::load_default(temp_dir.path());
        assert_eq!(config.engine.name, "gherkin-lsp");
    }

    #[test]
    fn test_load_default_config_with_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("gherkin-lsp.yml"),
            "engine:\n  name: custom-name\n",
        )
        .unwrap();

        let config = EngineConfig::load_default(temp_dir.path());
        assert_eq!(config.engine.name, "custom-name");
    }

    #[test]
    fn test_dotted_file_takes_precedence() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("gherkin-lsp.yaml"), "engine:\n  name: plain\n").unwrap();
        fs::write(temp_dir.path().join(".gherkin-lsp.yaml"), "engine:\n  name: dotted\n").unwrap();

        let found = EngineConfig::find(temp_dir.path()).unwrap();
        assert!(found.ends_with(".gherkin-lsp.yaml"));
        assert_eq!(EngineConfig::load_default(temp_dir.path()).engine.name, "dotted");
    }
}
