// File: src/config.rs
// Purpose: Configuration parsing from pagetree.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Routing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Directory containing page files (default: "pages")
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// File extensions picked up by the scanner
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// How `(group)` folders map onto the URL
    #[serde(default)]
    pub group_policy: GroupPolicy,
}

/// Route-group handling for `(name)` folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GroupPolicy {
    /// The group gets its own pathless node and adds nothing to the URL
    #[default]
    Pathless,
    /// The group becomes an optional `name?` URL segment
    OptionalSegment,
}

/// Manifest output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print the JSON manifest
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Write the manifest here instead of stdout
    #[serde(default)]
    pub file: Option<String>,
}

// Default values
fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_extensions() -> Vec<String> {
    ["tsx", "jsx", "ts", "js"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            extensions: default_extensions(),
            group_policy: GroupPolicy::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            file: None,
        }
    }
}

impl RoutingConfig {
    /// Returns a copy using the given pages directory
    pub fn with_pages_dir(mut self, pages_dir: impl Into<String>) -> Self {
        self.pages_dir = pages_dir.into();
        self
    }

    /// Returns a copy using the given group policy
    pub fn with_group_policy(mut self, policy: GroupPolicy) -> Self {
        self.group_policy = policy;
        self
    }

    /// Whether the scanner should pick up a file with this extension
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|known| known == ext)
    }
}

impl Config {
    /// Load configuration from a pagetree.toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./pagetree.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("pagetree.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.routing.pages_dir, "pages");
        assert_eq!(config.routing.group_policy, GroupPolicy::Pathless);
        assert!(config.routing.accepts_extension("tsx"));
        assert!(!config.routing.accepts_extension("css"));
        assert!(config.output.pretty);
        assert_eq!(config.output.file, None);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.routing.pages_dir, "pages");
        assert_eq!(config.routing.extensions.len(), 4);
    }

    #[test]
    fn test_custom_routing() {
        let toml = r#"
            [routing]
            pages_dir = "src/pages"
            extensions = ["tsx"]
            group_policy = "optional-segment"

            [output]
            pretty = false
            file = "routes.json"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.pages_dir, "src/pages");
        assert_eq!(config.routing.extensions, vec!["tsx".to_string()]);
        assert_eq!(config.routing.group_policy, GroupPolicy::OptionalSegment);
        assert!(!config.output.pretty);
        assert_eq!(config.output.file.as_deref(), Some("routes.json"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("definitely/not/here/pagetree.toml").unwrap();
        assert_eq!(config.routing, RoutingConfig::default());
    }
}
