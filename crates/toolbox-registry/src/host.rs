//! Page-side driver for a single tool container
//!
//! `ToolHost` keeps the mount/unmount pairing that [`ToolRegistry`] leaves to
//! its caller: opening a tool first unmounts whatever the container held, and
//! an optional title node shows the name of the open tool.

use crate::markup;
use crate::mount::{MountSession, MountStatus};
use crate::registry::ToolRegistry;
use crate::surface::{NodeId, Surface};

#[derive(Debug)]
pub struct ToolHost {
    session: MountSession,
    title: Option<NodeId>,
}

impl ToolHost {
    pub fn new(container: NodeId) -> Self {
        Self {
            session: MountSession::new(container),
            title: None,
        }
    }

    /// Node whose markup is set to the open tool's name.
    pub fn with_title(mut self, title: NodeId) -> Self {
        self.title = Some(title);
        self
    }

    pub fn session(&self) -> &MountSession {
        &self.session
    }

    /// Id of the open tool, if any.
    pub fn current(&self) -> Option<&str> {
        self.session.mounted_id()
    }

    /// Unmount the current tool (if any) and mount `id` in its place.
    pub fn open(
        &mut self,
        registry: &ToolRegistry,
        surface: &mut Surface,
        id: &str,
    ) -> MountStatus {
        self.close(registry, surface);

        let status = registry.mount(id, surface, &mut self.session);
        if status.is_mounted() {
            self.show_title(registry, surface, id);
        }
        status
    }

    /// Unmount the current tool. Returns false if nothing was open.
    pub fn close(&mut self, registry: &ToolRegistry, surface: &mut Surface) -> bool {
        let Some(current) = self.current().map(str::to_string) else {
            return false;
        };
        registry.unmount(&current, surface, &mut self.session);
        if let Some(title) = self.title {
            if let Err(e) = surface.set_markup(title, "") {
                tracing::warn!("Cannot reset tool title: {}", e);
            }
        }
        true
    }

    fn show_title(&self, registry: &ToolRegistry, surface: &mut Surface, id: &str) {
        let (Some(title), Some(tool)) = (self.title, registry.get(id)) else {
            return;
        };
        if let Err(e) = surface.set_markup(title, markup::escape(&tool.name)) {
            tracing::warn!("Cannot update tool title: {}", e);
        }
    }
}
