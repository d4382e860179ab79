//! Search command

use colored::Colorize;
use toolbox_registry::{ToolRegistry, highlight};

use super::ToolSummary;
use crate::error::Result;

/// Run the search command
pub fn run_search(registry: &ToolRegistry, keyword: &str, json: bool) -> Result<()> {
    let found = registry.search(keyword);

    if json {
        let tools: Vec<_> = found.iter().copied().map(ToolSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No tools match {}.", keyword.trim().yellow());
        return Ok(());
    }

    for tool in &found {
        println!(
            "  {:<20} {} - {}",
            tool.id.green(),
            highlight(&tool.name, keyword),
            highlight(&tool.description, keyword)
        );
    }

    Ok(())
}
