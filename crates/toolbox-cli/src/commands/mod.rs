//! Command implementations for toolbox-cli

pub mod list;
pub mod render;
pub mod search;

pub use list::run_list;
pub use render::run_render;
pub use search::run_search;

use serde::Serialize;
use toolbox_registry::{ToolCategory, ToolDefinition};

/// Serializable view of a tool for `--json` output
#[derive(Debug, Serialize)]
pub struct ToolSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub icon: &'a str,
    pub category: ToolCategory,
}

impl<'a> From<&'a ToolDefinition> for ToolSummary<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            id: &tool.id,
            name: &tool.name,
            description: &tool.description,
            icon: &tool.icon,
            category: tool.category,
        }
    }
}
