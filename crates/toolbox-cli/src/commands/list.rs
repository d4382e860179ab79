//! List command

use colored::Colorize;
use serde::Serialize;
use toolbox_registry::ToolRegistry;

use super::ToolSummary;
use crate::error::Result;

#[derive(Serialize)]
struct GroupSummary<'a> {
    label: &'a str,
    tools: Vec<ToolSummary<'a>>,
}

/// Run the list command
pub fn run_list(registry: &ToolRegistry, grouped: bool, json: bool) -> Result<()> {
    if json {
        let output = if grouped {
            let groups: Vec<_> = registry
                .list_grouped()
                .iter()
                .map(|g| GroupSummary {
                    label: g.label,
                    tools: g.tools.iter().copied().map(ToolSummary::from).collect(),
                })
                .collect();
            serde_json::to_string_pretty(&groups)?
        } else {
            let tools: Vec<_> = registry.iter().map(ToolSummary::from).collect();
            serde_json::to_string_pretty(&tools)?
        };
        println!("{}", output);
        return Ok(());
    }

    if registry.is_empty() {
        println!("{}", "No tools registered.".dimmed());
        return Ok(());
    }

    println!("{}", "Available Tools".bold());
    println!();

    if grouped {
        for group in registry.list_grouped().iter() {
            println!("{}:", group.label.cyan().bold());
            for tool in &group.tools {
                println!("  {:<20} {}", tool.id.green(), tool.name);
            }
            println!();
        }
    } else {
        for tool in registry.iter() {
            println!(
                "  {:<20} {} ({})",
                tool.id.green(),
                tool.name,
                tool.category.to_string().dimmed()
            );
        }
        println!();
    }

    println!(
        "{} {} tools available. Use {} to preview one.",
        "Total:".dimmed(),
        registry.len(),
        "toolbox render <id>".cyan()
    );

    Ok(())
}
