//! Core types for the tool registry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ToolManifest;
use crate::error::{HookError, HookResult};
use crate::surface::{NodeId, Surface};

/// Tool category for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// Text manipulation (case conversion, counters)
    Text,
    /// Developer utilities (JSON formatter, password generator)
    Dev,
    /// Everyday helpers (unit converter)
    Life,
    /// Math tools (calculator)
    Math,
    #[default]
    Other,
}

impl ToolCategory {
    /// Every category, in catalog display order.
    pub const ALL: [ToolCategory; 5] = [
        ToolCategory::Text,
        ToolCategory::Dev,
        ToolCategory::Life,
        ToolCategory::Math,
        ToolCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Text => "text",
            ToolCategory::Dev => "dev",
            ToolCategory::Life => "life",
            ToolCategory::Math => "math",
            ToolCategory::Other => "other",
        }
    }

    /// Heading used when listing tools grouped by category.
    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::Text => "Text Tools",
            ToolCategory::Dev => "Developer Tools",
            ToolCategory::Life => "Life Tools",
            ToolCategory::Math => "Math Tools",
            ToolCategory::Other => "Other Tools",
        }
    }
}

impl FromStr for ToolCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ToolCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ToolCategory> for String {
    fn from(category: ToolCategory) -> Self {
        category.as_str().to_string()
    }
}

pub(crate) type ContentHook = Box<dyn Fn() -> HookResult<String>>;
pub(crate) type InitHook = Box<dyn Fn(&mut Surface, NodeId) -> HookResult>;
pub(crate) type UnitHook = Box<dyn Fn() -> HookResult>;

/// Tool metadata and hooks as supplied by a tool module, before validation.
///
/// `content` and `init` are required; [`ToolRegistry::register`] rejects an
/// input that lacks either.
///
/// [`ToolRegistry::register`]: super::ToolRegistry::register
#[derive(Default)]
pub struct ToolDefinitionInput {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) content: Option<ContentHook>,
    pub(crate) init: Option<InitHook>,
    pub(crate) cleanup: Option<UnitHook>,
    pub(crate) prepare: Option<UnitHook>,
}

impl ToolDefinitionInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a manifest. The manifest's `content`, if any, becomes a
    /// static content hook; `init` still has to be supplied.
    pub fn from_manifest(manifest: &ToolManifest) -> Self {
        let mut input = Self {
            name: manifest.name.clone(),
            description: manifest.description.clone(),
            icon: manifest.icon.clone(),
            category: manifest.category.clone(),
            ..Self::default()
        };
        if let Some(content) = &manifest.content {
            input = input.static_content(content.clone());
        }
        input
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Category key (`text`, `dev`, `life`, `math`, `other`). Anything else
    /// is filed under `other` at registration with a warning. Leaving the
    /// category unset also files the tool under `other`, but without a
    /// warning.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Hook producing the tool's markup.
    pub fn content<F>(mut self, content: F) -> Self
    where
        F: Fn() -> HookResult<String> + 'static,
    {
        self.content = Some(Box::new(content));
        self
    }

    /// Content hook that always returns `markup`.
    pub fn static_content(self, markup: impl Into<String>) -> Self {
        let markup = markup.into();
        self.content(move || Ok(markup.clone()))
    }

    /// Hook wiring up the freshly mounted node.
    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(&mut Surface, NodeId) -> HookResult + 'static,
    {
        self.init = Some(Box::new(init));
        self
    }

    /// Hook releasing whatever `init` set up. Runs on unmount.
    pub fn cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn() -> HookResult + 'static,
    {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// Hook run by [`ToolRegistry::prepare_all`] before any mount.
    ///
    /// [`ToolRegistry::prepare_all`]: super::ToolRegistry::prepare_all
    pub fn prepare<F>(mut self, prepare: F) -> Self
    where
        F: Fn() -> HookResult + 'static,
    {
        self.prepare = Some(Box::new(prepare));
        self
    }
}

impl fmt::Debug for ToolDefinitionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinitionInput")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("content", &self.content.is_some())
            .field("init", &self.init.is_some())
            .field("cleanup", &self.cleanup.is_some())
            .field("prepare", &self.prepare.is_some())
            .finish()
    }
}

/// A validated, normalized tool as stored in the registry.
pub struct ToolDefinition {
    /// Unique identifier (e.g., "json-formatter")
    pub id: String,
    /// Display name (e.g., "JSON Formatter")
    pub name: String,
    pub description: String,
    /// Icon markup
    pub icon: String,
    pub category: ToolCategory,
    pub(crate) content: ContentHook,
    pub(crate) init: InitHook,
    pub(crate) cleanup: Option<UnitHook>,
    pub(crate) prepare: Option<UnitHook>,
}

impl ToolDefinition {
    /// Run the content hook.
    pub fn render_content(&self) -> std::result::Result<String, HookError> {
        (self.content)()
    }

    /// Run the init hook against a mounted node.
    pub fn initialize(&self, surface: &mut Surface, node: NodeId) -> HookResult {
        (self.init)(surface, node)
    }

    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Run the cleanup hook, if the tool has one.
    pub fn run_cleanup(&self) -> Option<HookResult> {
        self.cleanup.as_ref().map(|cleanup| cleanup())
    }

    /// Run the prepare hook, if the tool has one.
    pub fn run_prepare(&self) -> Option<HookResult> {
        self.prepare.as_ref().map(|prepare| prepare())
    }

    /// Whether `keyword` (already lowercased) occurs in the name or description.
    pub(crate) fn matches_lowercase(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(keyword)
            || self.description.to_lowercase().contains(keyword)
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("icon", &self.icon)
            .field("category", &self.category)
            .field("cleanup", &self.cleanup.is_some())
            .field("prepare", &self.prepare.is_some())
            .finish()
    }
}
