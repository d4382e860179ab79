//! Mounting tools into surface containers
//!
//! A mount renders a tool's markup into a fresh child of the container,
//! announces it with [`ToolEvent::Loaded`] and then runs the tool's `init`
//! hook. Failures never propagate to the caller: the container shows an
//! inline error view and the failure is logged.
//!
//! The caller owns a [`MountSession`] per container. It records which tool
//! is mounted there, pinned to the definition that was mounted, so that a
//! later re-registration of the same id does not change which cleanup runs.

use std::rc::Rc;

use tracing::{debug, error, warn};

use crate::error::HookResult;
use crate::events::ToolEvent;
use crate::markup;
use crate::registry::{ToolDefinition, ToolRegistry};
use crate::surface::{NodeId, Surface};

/// Result of [`ToolRegistry::mount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountStatus {
    /// Tool content lives in `node`, a child of the container.
    Mounted { node: NodeId },
    /// No tool with that id; the container shows a not-found view.
    NotFound,
    /// `content` or `init` failed; the container shows an error view.
    Failed { reason: String },
    /// The container is not a live node of the surface. Nothing changed.
    InvalidContainer,
}

impl MountStatus {
    pub fn is_mounted(&self) -> bool {
        matches!(self, MountStatus::Mounted { .. })
    }
}

/// A tool currently mounted in a session's container.
#[derive(Clone)]
pub struct MountedTool {
    tool_id: String,
    node: NodeId,
    definition: Rc<ToolDefinition>,
}

impl MountedTool {
    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    /// Node holding the tool's content.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Definition the tool was mounted with.
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }
}

impl std::fmt::Debug for MountedTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedTool")
            .field("tool_id", &self.tool_id)
            .field("node", &self.node)
            .finish()
    }
}

/// Per-container mount state: `Empty` or `Mounted(tool)`.
#[derive(Debug, Clone)]
pub struct MountSession {
    container: NodeId,
    mounted: Option<MountedTool>,
}

impl MountSession {
    pub fn new(container: NodeId) -> Self {
        Self {
            container,
            mounted: None,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn mounted(&self) -> Option<&MountedTool> {
        self.mounted.as_ref()
    }

    pub fn mounted_id(&self) -> Option<&str> {
        self.mounted.as_ref().map(MountedTool::tool_id)
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_none()
    }
}

impl ToolRegistry {
    /// Render tool `id` into the session's container and initialize it.
    ///
    /// Steps, in order: clear the container, render `content()` into a new
    /// child node, append it, dispatch [`ToolEvent::Loaded`] at the
    /// container, run `init` on the child. Any prior record in `session` is
    /// replaced without running its cleanup; use [`ToolRegistry::unmount`]
    /// first (or [`crate::ToolHost`]) to switch tools cleanly.
    pub fn mount(
        &self,
        id: &str,
        surface: &mut Surface,
        session: &mut MountSession,
    ) -> MountStatus {
        let container = session.container;
        if !surface.contains(container) {
            error!("Cannot load tool {}: container {} is not a valid node", id, container);
            return MountStatus::InvalidContainer;
        }

        if let Some(previous) = session.mounted.take() {
            warn!(
                "Tool {} replaced in container {} without unmount; its cleanup will not run",
                previous.tool_id, container
            );
        }

        let Some(definition) = self.get_shared(id) else {
            warn!("Tool {} not found", id);
            self.show_error(surface, container, &format!("Tool {id} not found"));
            return MountStatus::NotFound;
        };

        match self.mount_definition(&definition, surface, container) {
            Ok(node) => {
                debug!("Tool {} mounted at {}", id, node);
                session.mounted = Some(MountedTool {
                    tool_id: id.to_string(),
                    node,
                    definition,
                });
                MountStatus::Mounted { node }
            }
            Err(e) => {
                let reason = e.to_string();
                error!("Tool {} failed to load: {}", id, reason);
                self.show_error(surface, container, &format!("Failed to load: {reason}"));
                MountStatus::Failed { reason }
            }
        }
    }

    fn mount_definition(
        &self,
        definition: &ToolDefinition,
        surface: &mut Surface,
        container: NodeId,
    ) -> HookResult<NodeId> {
        surface.clear(container)?;

        let content = definition.render_content()?;
        let node = surface.create_node();
        surface.set_class(node, self.config.mount.content_class.clone())?;
        surface.set_markup(node, content)?;
        surface.append_child(container, node)?;

        let event = ToolEvent::Loaded {
            tool_id: definition.id.clone(),
            node,
        };
        surface.dispatch(container, &event)?;

        definition.initialize(surface, node)?;
        Ok(node)
    }

    /// Tear down tool `id` in the session's container.
    ///
    /// Runs the cleanup of the mounted definition when the session holds a
    /// successful mount of `id`; a failing cleanup is logged. Always
    /// dispatches [`ToolEvent::Unloaded`] at the container afterwards and
    /// leaves the session empty when it held `id`.
    pub fn unmount(&self, id: &str, surface: &mut Surface, session: &mut MountSession) {
        let container = session.container;
        match session.mounted.take_if(|m| m.tool_id == id) {
            Some(mounted) => match mounted.definition.run_cleanup() {
                Some(Err(e)) => error!("Tool {} cleanup failed: {}", id, e),
                Some(Ok(())) => debug!("Tool {} cleaned up", id),
                None => {}
            },
            None => match session.mounted_id() {
                Some(other) => warn!(
                    "Unmount of {} requested but {} is mounted in {}",
                    id, other, container
                ),
                None => debug!("Unmount of {} with nothing mounted in {}", id, container),
            },
        }

        if !self.contains(id) {
            debug!("Unmounting {}, which is no longer registered", id);
        }

        let event = ToolEvent::Unloaded {
            tool_id: id.to_string(),
        };
        if let Err(e) = surface.dispatch(container, &event) {
            error!("Cannot deliver unload of {}: {}", id, e);
        }
    }

    fn show_error(&self, surface: &mut Surface, container: NodeId, message: &str) {
        let view = markup::error_view(&self.config.mount.error_class, message);
        if let Err(e) = surface.replace_content(container, view) {
            error!("Cannot render error view in {}: {}", container, e);
        }
    }
}
