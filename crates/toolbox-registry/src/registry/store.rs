//! Tool registry storage

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use super::{ToolCategory, ToolDefinition, ToolDefinitionInput};
use crate::config::ToolboxConfig;
use crate::error::{Error, Result};

/// Central registry for tool definitions.
///
/// Provides validated registration, lookup by id, listing in registration
/// order (optionally grouped by category) and keyword search. Mounting lives
/// in [`crate::mount`].
pub struct ToolRegistry {
    tools: HashMap<String, Rc<ToolDefinition>>,
    /// Ids in first-registration order
    order: Vec<String>,
    pub(crate) config: ToolboxConfig,
}

/// Tools of one category in a grouped listing.
#[derive(Debug, Clone)]
pub struct ToolGroup<'a> {
    pub category: ToolCategory,
    pub label: &'static str,
    pub tools: Vec<&'a ToolDefinition>,
}

/// Listing grouped by category label. Groups appear in the order their
/// category was first seen; tools keep registration order within a group.
#[derive(Debug, Clone, Default)]
pub struct GroupedTools<'a> {
    groups: Vec<ToolGroup<'a>>,
}

impl<'a> GroupedTools<'a> {
    /// Tools filed under the given display label.
    pub fn get(&self, label: &str) -> Option<&[&'a ToolDefinition]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.tools.as_slice())
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.groups.iter().map(|g| g.label).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolGroup<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for GroupedTools<'a> {
    type Item = ToolGroup<'a>;
    type IntoIter = std::vec::IntoIter<ToolGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Outcome of [`ToolRegistry::prepare_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    /// Tools whose prepare hook ran successfully
    pub prepared: Vec<String>,
    /// Tools whose prepare hook failed
    pub failed: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty registry with the stock configuration.
    pub fn new() -> Self {
        Self::with_config(ToolboxConfig::default())
    }

    /// Create a new empty registry.
    pub fn with_config(config: ToolboxConfig) -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &ToolboxConfig {
        &self.config
    }

    /// Register a tool under `id`.
    ///
    /// Fails if `id` is blank or the input lacks a `content` or `init` hook;
    /// the registry is left untouched in that case. An unknown category is
    /// filed under [`ToolCategory::Other`] and an existing tool with the same
    /// id is replaced, keeping its listing position. Both only log a warning.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        input: ToolDefinitionInput,
    ) -> Result<&ToolDefinition> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::EmptyId);
        }

        let content = input.content.ok_or_else(|| Error::MissingHook {
            tool: id.clone(),
            hook: "content",
        })?;
        let init = input.init.ok_or_else(|| Error::MissingHook {
            tool: id.clone(),
            hook: "init",
        })?;

        let category = match input.category.as_deref() {
            None => ToolCategory::Other,
            Some(raw) => raw.parse::<ToolCategory>().unwrap_or_else(|invalid| {
                warn!(
                    "Tool {} has invalid category {:?}, filed under \"other\"",
                    id, invalid
                );
                ToolCategory::Other
            }),
        };

        let defaults = &self.config.defaults;
        let definition = ToolDefinition {
            id: id.clone(),
            name: input.name.unwrap_or_else(|| defaults.name.clone()),
            description: input
                .description
                .unwrap_or_else(|| defaults.description.clone()),
            icon: input.icon.unwrap_or_else(|| defaults.icon.clone()),
            category,
            content,
            init,
            cleanup: input.cleanup,
            prepare: input.prepare,
        };

        if self.tools.contains_key(&id) {
            warn!("Tool {} already exists and will be replaced", id);
        } else {
            self.order.push(id.clone());
        }
        debug!("Registered tool {} ({})", id, category);

        let entry = self.tools.entry(id).insert_entry(Rc::new(definition));
        Ok(&**entry.into_mut())
    }

    /// Get a definition by id.
    pub fn get(&self, id: &str) -> Option<&ToolDefinition> {
        self.tools.get(id).map(Rc::as_ref)
    }

    /// Shared handle to a definition, used to pin the version a mount used.
    pub(crate) fn get_shared(&self, id: &str) -> Option<Rc<ToolDefinition>> {
        self.tools.get(id).cloned()
    }

    /// Check if a tool is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(id)
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// All definitions in registration order.
    pub fn list(&self) -> Vec<&ToolDefinition> {
        self.iter().collect()
    }

    /// All definitions grouped by category label.
    pub fn list_grouped(&self) -> GroupedTools<'_> {
        let mut grouped = GroupedTools::default();
        for tool in self.iter() {
            match grouped
                .groups
                .iter_mut()
                .find(|g| g.category == tool.category)
            {
                Some(group) => group.tools.push(tool),
                None => grouped.groups.push(ToolGroup {
                    category: tool.category,
                    label: tool.category.label(),
                    tools: vec![tool],
                }),
            }
        }
        grouped
    }

    /// Definitions in one category, in registration order.
    pub fn by_category(&self, category: ToolCategory) -> Vec<&ToolDefinition> {
        self.iter().filter(|t| t.category == category).collect()
    }

    /// Tools whose name or description contains `keyword`.
    pub fn search(&self, keyword: &str) -> Vec<&ToolDefinition> {
        crate::search::search(&self.list(), keyword)
    }

    /// Run every tool's `prepare` hook.
    ///
    /// A failing hook is logged and recorded; the remaining tools still run.
    pub fn prepare_all(&self) -> PrepareSummary {
        let mut summary = PrepareSummary::default();
        if self.is_empty() {
            warn!("No tools registered; register tools before preparing them");
            return summary;
        }

        info!(
            "{} tools registered: {}",
            self.len(),
            self.ids().join(", ")
        );

        for tool in self.iter() {
            match tool.run_prepare() {
                None => {}
                Some(Ok(())) => summary.prepared.push(tool.id.clone()),
                Some(Err(e)) => {
                    error!("Tool {} failed to prepare: {}", tool.id, e);
                    summary.failed.push(tool.id.clone());
                }
            }
        }

        summary
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.order)
            .finish()
    }
}
