//! Error types for toolbox-registry

use std::path::PathBuf;

use crate::surface::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a tool hook (`content`, `init`, `cleanup`, `prepare`).
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by tool hooks.
pub type HookResult<T = ()> = std::result::Result<T, HookError>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tool id must not be empty")]
    EmptyId,

    #[error("Tool {tool} is missing required hook: {hook}()")]
    MissingHook { tool: String, hook: &'static str },

    #[error("Unknown surface node: {node}")]
    UnknownNode { node: NodeId },

    #[error("Surface node {node} is already attached to a parent")]
    AlreadyAttached { node: NodeId },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tool manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that reject a `register` call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::EmptyId | Error::MissingHook { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hook_names_member() {
        let err = Error::MissingHook {
            tool: "calculator".into(),
            hook: "init",
        };
        assert_eq!(
            err.to_string(),
            "Tool calculator is missing required hook: init()"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_runtime_errors_are_not_validation() {
        let err = Error::UnknownNode { node: NodeId::new(7, 0) };
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Unknown surface node: #7");
    }
}
