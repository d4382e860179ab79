//! Configuration types and loading for the tool registry
//!
//! Placeholders used when a tool omits display metadata, and the CSS classes
//! the loader puts on the markup it generates. Every field has a default, so
//! an empty file (or no file at all) yields the stock configuration:
//!
//! ```toml
//! [defaults]
//! name = "Untitled Tool"
//! description = "No description"
//!
//! [mount]
//! content_class = "tool-content p-4"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Display metadata filled in for tools that omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_name() -> String {
    "Untitled Tool".to_string()
}

fn default_description() -> String {
    "No description".to_string()
}

fn default_icon() -> String {
    r#"<i class="fa fa-wrench text-primary text-2xl"></i>"#.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            icon: default_icon(),
        }
    }
}

/// Classes applied to markup produced while mounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountConfig {
    /// Class of the wrapper node holding a tool's content
    #[serde(default = "default_content_class")]
    pub content_class: String,
    /// Class of the inline error view
    #[serde(default = "default_error_class")]
    pub error_class: String,
}

fn default_content_class() -> String {
    "tool-content p-4".to_string()
}

fn default_error_class() -> String {
    "text-center py-10 text-red-500".to_string()
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            content_class: default_content_class(),
            error_class: default_error_class(),
        }
    }
}

/// Top-level registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolboxConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub mount: MountConfig,
}

impl ToolboxConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ToolboxConfig::from_toml_str("").unwrap();
        assert_eq!(config, ToolboxConfig::default());
        assert_eq!(config.defaults.name, "Untitled Tool");
        assert_eq!(config.mount.content_class, "tool-content p-4");
    }

    #[test]
    fn test_partial_override() {
        let config = ToolboxConfig::from_toml_str(
            r#"
            [defaults]
            name = "Unnamed"

            [mount]
            error_class = "alert"
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.name, "Unnamed");
        assert_eq!(config.defaults.description, "No description");
        assert_eq!(config.mount.error_class, "alert");
        assert_eq!(config.mount.content_class, "tool-content p-4");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ToolboxConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toolbox.toml");
        fs::write(&path, "[defaults\nname = 1").unwrap();

        let err = ToolboxConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
