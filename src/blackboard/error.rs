//! Blackboard errors.

use thiserror::Error;

use super::scope::{NodeId, TreeId};

/// Errors raised by blackboard resolution, typed reads and configuration.
#[derive(Debug, Error)]
pub enum BlackboardError {
    /// A node scope was requested without the tree that owns it.
    #[error("invalid scope: node {node:?} given without a tree (tree: {tree:?})")]
    InvalidScope {
        tree: Option<TreeId>,
        node: Option<NodeId>,
    },

    /// A typed read found a value of another type under the key.
    #[error("type mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// JSON config parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parsing failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for blackboard operations.
pub type Result<T> = std::result::Result<T, BlackboardError>;
