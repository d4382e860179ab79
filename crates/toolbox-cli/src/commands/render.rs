//! Render command: mount a tool into a scratch page

use std::cell::RefCell;
use std::rc::Rc;

use toolbox_registry::{MountStatus, Surface, ToolEvent, ToolHost, ToolRegistry};

use crate::error::{CliError, Result};

/// Run the render command
pub fn run_render(registry: &ToolRegistry, id: &str, show_events: bool) -> Result<()> {
    let mut surface = Surface::new();
    let page = surface.create_node();
    let title = surface.create_child(page)?;
    let container = surface.create_child(page)?;

    let events: Rc<RefCell<Vec<ToolEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    surface.subscribe(page, move |event, _| sink.borrow_mut().push(event.clone()))?;

    let mut host = ToolHost::new(container).with_title(title);
    let status = host.open(registry, &mut surface, id);
    let heading = surface.markup(title).unwrap_or_default().to_string();
    let markup = surface.render(container).unwrap_or_default();
    host.close(registry, &mut surface);

    if !heading.is_empty() {
        println!("<!-- {} -->", heading);
    }
    println!("{}", markup);

    if show_events {
        for event in events.borrow().iter() {
            println!("{}", serde_json::to_string(event)?);
        }
    }

    match status {
        MountStatus::Mounted { .. } => Ok(()),
        MountStatus::NotFound => Err(CliError::user(format!("Tool '{}' not found", id))),
        MountStatus::Failed { reason } => Err(CliError::user(format!(
            "Tool '{}' failed to load: {}",
            id, reason
        ))),
        MountStatus::InvalidContainer => Err(CliError::user("Render surface is unavailable")),
    }
}
