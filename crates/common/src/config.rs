//! Generation configuration loading from YAML files
//!
//! Lets a batch run be driven from a checked-in config file instead of
//! command-line flags. Flags still win when both are given.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a generation run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Config format version
    pub version: u32,

    /// Directory the per-service output folders are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Services to generate; empty means all discovered services
    #[serde(default)]
    pub services: Vec<String>,

    /// Whether to write the README index over the generated corpus
    #[serde(default = "default_index")]
    pub index: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./commands")
}

fn default_index() -> bool {
    true
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            version: 1,
            output_dir: default_output_dir(),
            services: Vec::new(),
            index: default_index(),
        }
    }
}

impl GenerationConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse config YAML: {}", e)))
    }

    /// Whether a service passes the config's service filter
    pub fn includes_service(&self, service: &str) -> bool {
        self.services.is_empty() || self.services.iter().any(|s| s == service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
version: 1
output_dir: ./generated/commands
services:
  - storage
  - queue
index: false
"#;

        let config = GenerationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.output_dir, PathBuf::from("./generated/commands"));
        assert!(config.includes_service("storage"));
        assert!(!config.includes_service("compute"));
        assert!(!config.index);
    }

    #[test]
    fn test_defaults_apply() {
        let config = GenerationConfig::from_yaml("version: 1").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("./commands"));
        assert!(config.services.is_empty());
        assert!(config.includes_service("anything"));
        assert!(config.index);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let result = GenerationConfig::from_yaml(": not yaml :");
        assert!(result.is_err());
    }
}
