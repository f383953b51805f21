//! Memory table — flat key/value storage for one scope.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::value::BlackboardValue;

/// String-keyed storage for one scope (global, tree or node).
#[derive(Debug, Default)]
pub struct MemoryTable {
    entries: HashMap<String, BlackboardValue>,
}

impl MemoryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Return the value under `key`, storing `default` first if the key is
    /// absent.
    ///
    /// The default is only built on a miss. Once stored it sticks until the
    /// key is explicitly overwritten.
    pub fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut BlackboardValue
    where
        F: FnOnce() -> BlackboardValue,
    {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default();
                log::trace!("lazy default for '{}' ({})", key, value.type_name());
                entry.insert(value)
            }
        }
    }

    /// Insert or overwrite the value under `key`, returning the old value.
    pub fn insert(&mut self, key: impl Into<String>, value: BlackboardValue) -> Option<BlackboardValue> {
        self.entries.insert(key.into(), value)
    }

    /// Borrow the value under `key` without creating it.
    pub fn get(&self, key: &str) -> Option<&BlackboardValue> {
        self.entries.get(key)
    }

    /// Check whether `key` holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over stored keys (unordered).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
