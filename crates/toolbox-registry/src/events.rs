//! Lifecycle notifications emitted while mounting and unmounting tools

use serde::Serialize;

use crate::surface::NodeId;

/// Notification dispatched at a mount container and delivered to listeners
/// on the container and all of its ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolEvent {
    /// Tool markup is in place; `init` has not run yet.
    Loaded {
        tool_id: String,
        /// Node holding the tool's content
        node: NodeId,
    },
    /// Cleanup has run.
    Unloaded { tool_id: String },
}

impl ToolEvent {
    pub fn tool_id(&self) -> &str {
        match self {
            ToolEvent::Loaded { tool_id, .. } | ToolEvent::Unloaded { tool_id } => tool_id,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ToolEvent::Loaded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_loaded() {
        let event = ToolEvent::Loaded {
            tool_id: "calculator".into(),
            node: NodeId::new(3, 0),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"loaded","tool_id":"calculator","node":3}"#
        );
    }

    #[test]
    fn test_serialize_unloaded() {
        let event = ToolEvent::Unloaded {
            tool_id: "calculator".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"unloaded","tool_id":"calculator"}"#);
        assert!(!event.is_loaded());
        assert_eq!(event.tool_id(), "calculator");
    }
}
