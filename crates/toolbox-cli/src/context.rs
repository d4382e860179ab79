//! Registry construction from configuration and manifest catalog

use std::path::Path;

use toolbox_registry::{ManifestLoader, ToolDefinitionInput, ToolRegistry, ToolboxConfig};

use crate::error::Result;

/// Build a registry from an optional config file and a manifest directory.
///
/// Manifest tools have static markup and nothing to wire up, so they get a
/// no-op `init`. Manifests the registry rejects are logged and skipped.
pub fn load_registry(config: Option<&Path>, catalog: &Path) -> Result<ToolRegistry> {
    let config = match config {
        Some(path) => ToolboxConfig::load(path)?,
        None => ToolboxConfig::default(),
    };
    let mut registry = ToolRegistry::with_config(config);

    for manifest in ManifestLoader::new(catalog).load_all()? {
        let input = ToolDefinitionInput::from_manifest(&manifest).init(|_, _| Ok(()));
        if let Err(e) = registry.register(manifest.id.clone(), input) {
            tracing::warn!("Skipping tool {}: {}", manifest.id, e);
        }
    }

    registry.prepare_all();
    Ok(registry)
}
