//! Loader for tool manifests
//!
//! Tools that only need static markup can be declared as TOML files instead
//! of code:
//!
//! ```text
//! tools/
//!   clock.toml
//!   notes.toml
//! ```
//!
//! ```toml
//! id = "clock"
//! name = "Clock"
//! category = "life"
//! content = "<time></time>"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Declarative description of a tool.
///
/// Display fields are optional; the registry fills in placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolManifest {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Raw category key; validated at registration
    #[serde(default)]
    pub category: Option<String>,
    /// Static markup returned by the content hook
    #[serde(default)]
    pub content: Option<String>,
}

impl ToolManifest {
    /// Parse a single manifest from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a single manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content).map_err(|e| Error::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Loads every `*.toml` manifest from a directory.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    dir: PathBuf,
}

impl ManifestLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all manifests, ordered by file name.
    ///
    /// A missing directory yields no manifests. Files that fail to parse are
    /// logged and skipped.
    pub fn load_all(&self) -> Result<Vec<ToolManifest>> {
        if !self.dir.exists() {
            tracing::debug!("Manifest directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| Error::io(&self.dir, e))?;

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut manifests = Vec::with_capacity(paths.len());
        for path in paths {
            match ToolManifest::load(&path) {
                Ok(manifest) => manifests.push(manifest),
                Err(e) => {
                    tracing::warn!("Skipping tool manifest {:?}: {}", path, e);
                }
            }
        }

        Ok(manifests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal() {
        let manifest = ToolManifest::from_toml_str(r#"id = "clock""#).unwrap();
        assert_eq!(manifest.id, "clock");
        assert!(manifest.name.is_none());
        assert!(manifest.content.is_none());
    }

    #[test]
    fn test_parse_requires_id() {
        assert!(ToolManifest::from_toml_str(r#"name = "Clock""#).is_err());
    }

    #[test]
    fn test_load_all_sorted_and_skips_invalid() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("b-notes.toml"),
            "id = \"notes\"\nname = \"Notes\"\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("a-clock.toml"),
            "id = \"clock\"\ncategory = \"life\"\n",
        )
        .unwrap();
        fs::write(temp.path().join("broken.toml"), "id = ").unwrap();
        fs::write(temp.path().join("readme.md"), "# not a manifest").unwrap();

        let manifests = ManifestLoader::new(temp.path()).load_all().unwrap();
        let ids: Vec<_> = manifests.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["clock", "notes"]);
    }

    #[test]
    fn test_load_all_missing_dir() {
        let temp = TempDir::new().unwrap();
        let loader = ManifestLoader::new(temp.path().join("nope"));
        assert!(loader.load_all().unwrap().is_empty());
    }
}
