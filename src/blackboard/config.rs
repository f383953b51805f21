//! Blackboard configuration.
//!
//! Capacities are only allocation hints; they never bound how many keys or
//! scopes a blackboard can hold.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{BlackboardError, Result};

/// Tuning knobs for a [`Blackboard`](super::Blackboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackboardConfig {
    /// Initial capacity of the global table.
    pub global_capacity: usize,
    /// Initial capacity of each tree-level table.
    pub tree_capacity: usize,
    /// Initial capacity of each node table.
    pub node_capacity: usize,
    /// Emit a debug log line whenever a tree or node scope is created.
    pub log_scope_creation: bool,
}

impl Default for BlackboardConfig {
    fn default() -> Self {
        Self {
            global_capacity: 16,
            tree_capacity: 8,
            node_capacity: 4,
            log_scope_creation: true,
        }
    }
}

impl BlackboardConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, keeping defaults for anything unset.
    ///
    /// - `BLACKBOARD_GLOBAL_CAPACITY`
    /// - `BLACKBOARD_TREE_CAPACITY`
    /// - `BLACKBOARD_NODE_CAPACITY`
    /// - `BLACKBOARD_LOG_SCOPES`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup (used by [`from_env`](Self::from_env)).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_from(&lookup, "BLACKBOARD_GLOBAL_CAPACITY", &mut config.global_capacity);
        override_from(&lookup, "BLACKBOARD_TREE_CAPACITY", &mut config.tree_capacity);
        override_from(&lookup, "BLACKBOARD_NODE_CAPACITY", &mut config.node_capacity);
        override_from(&lookup, "BLACKBOARD_LOG_SCOPES", &mut config.log_scope_creation);
        config
    }

    /// Parse from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Err(BlackboardError::Config(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }
}

fn override_from<F, T>(lookup: &F, name: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(name) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => log::warn!("Ignoring {}={:?}: not a valid value", name, raw),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
