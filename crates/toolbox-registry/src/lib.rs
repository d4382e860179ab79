//! Tool registry and loader for the Toolbox site.
//!
//! Independently authored tools (calculator, JSON formatter, password
//! generator, ...) register themselves with a [`ToolRegistry`]. The page
//! then lists or searches the catalog and mounts a selected tool into a
//! container node of a [`Surface`].
//!
//! # Architecture
//!
//! 1. **Registration** - [`ToolDefinitionInput`] collects metadata and hooks;
//!    [`ToolRegistry::register`] validates the hooks, normalizes the metadata
//!    and stores the definition.
//!
//! 2. **Discovery** - [`ToolRegistry::list`], [`ToolRegistry::list_grouped`]
//!    and the [`search`] / [`highlight`] helpers feed catalog rendering.
//!
//! 3. **Lifecycle** - [`ToolRegistry::mount`] renders a tool into a container
//!    and emits [`ToolEvent::Loaded`]; [`ToolRegistry::unmount`] runs cleanup
//!    and emits [`ToolEvent::Unloaded`]. Events propagate from the container
//!    to every ancestor node on the surface.

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod logging;
pub mod markup;
pub mod mount;
pub mod registry;
pub mod search;
pub mod surface;

pub use config::{DefaultsConfig, MountConfig, ToolboxConfig};
pub use error::{Error, HookError, HookResult, Result};
pub use events::ToolEvent;
pub use host::ToolHost;
pub use mount::{MountSession, MountStatus, MountedTool};
pub use registry::{
    GroupedTools, ManifestLoader, PrepareSummary, ToolCategory, ToolDefinition,
    ToolDefinitionInput, ToolGroup, ToolManifest, ToolRegistry,
};
pub use search::{highlight, search};
pub use surface::{NodeId, Subscription, Surface};
