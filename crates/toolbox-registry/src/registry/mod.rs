//! Tool registry
//!
//! Definitions, manifests and the registry store. Mounting is implemented on
//! [`ToolRegistry`] in [`crate::mount`].

mod manifest;
mod store;
mod types;

pub use manifest::{ManifestLoader, ToolManifest};
pub use store::{GroupedTools, PrepareSummary, ToolGroup, ToolRegistry};
pub use types::{ToolCategory, ToolDefinition, ToolDefinitionInput};
