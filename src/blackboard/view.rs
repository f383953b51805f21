//! Blackboard — the scoped memory store owned by one agent.
//!
//! Reads are lazily initializing: reading a missing key stores the caller's
//! default under it, so the first read fixes the value until the next write.
//! Tree and node scopes are created on first touch and never removed.

use std::any::Any;
use std::collections::HashMap;

use super::config::BlackboardConfig;
use super::error::Result;
use super::memory::MemoryTable;
use super::scope::{MemoryScope, NodeId, TreeId};
use super::tree::TreeState;
use super::value::BlackboardValue;

/// Hierarchical key/value memory: one global table plus per-tree and
/// per-node tables.
///
/// # Example
///
/// ```
/// use agent_blackboard::blackboard::{Blackboard, MemoryScope, NodeId, TreeId};
///
/// let mut bb = Blackboard::new();
/// let tree = TreeId::new();
/// let (n1, n2) = (NodeId::new(), NodeId::new());
///
/// bb.set_typed("hp", 10i32, MemoryScope::Node(tree, n1));
/// assert_eq!(bb.get_typed("hp", MemoryScope::Node(tree, n1), 0i32).unwrap(), 10);
/// assert_eq!(bb.get_typed("hp", MemoryScope::Node(tree, n2), 0i32).unwrap(), 0);
/// assert_eq!(bb.get_typed("hp", MemoryScope::Global, -1i32).unwrap(), -1);
/// ```
#[derive(Debug)]
pub struct Blackboard {
    global: MemoryTable,
    trees: HashMap<TreeId, TreeState>,
    config: BlackboardConfig,
}

impl Default for Blackboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Blackboard {
    /// Create an empty blackboard with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BlackboardConfig::default())
    }

    /// Create an empty blackboard with the given configuration.
    pub fn with_config(config: BlackboardConfig) -> Self {
        Self {
            global: MemoryTable::with_capacity(config.global_capacity),
            trees: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &BlackboardConfig {
        &self.config
    }

    // --- Scope resolution ---

    /// Get or create the state of `tree`.
    pub fn tree_state_mut(&mut self, tree: TreeId) -> &mut TreeState {
        let config = &self.config;
        self.trees.entry(tree).or_insert_with(|| {
            if config.log_scope_creation {
                log::debug!("Created tree scope {}", tree);
            }
            TreeState::with_capacity(config.tree_capacity, config.node_capacity)
        })
    }

    /// Resolve `scope` to its memory table, creating tree and node
    /// containers on the way.
    ///
    /// Resolving the same scope again yields the same table.
    pub fn memory_mut(&mut self, scope: MemoryScope) -> &mut MemoryTable {
        match scope {
            MemoryScope::Global => &mut self.global,
            MemoryScope::Tree(tree) => self.tree_state_mut(tree).memory_mut(),
            MemoryScope::Node(tree, node) => {
                let log_scopes = self.config.log_scope_creation;
                let (table, created) = self.tree_state_mut(tree).node_memory_mut(node);
                if created && log_scopes {
                    log::debug!("Created node scope {} in tree {}", node, tree);
                }
                table
            }
        }
    }

    /// Borrow the memory table of `scope` if it already exists.
    pub fn memory(&self, scope: MemoryScope) -> Option<&MemoryTable> {
        match scope {
            MemoryScope::Global => Some(&self.global),
            MemoryScope::Tree(tree) => self.trees.get(&tree).map(TreeState::memory),
            MemoryScope::Node(tree, node) => {
                self.trees.get(&tree).and_then(|state| state.node_memory(node))
            }
        }
    }

    // --- Read operations ---

    /// Read `key` in `scope`, storing `default` first if the key is absent.
    pub fn get(&mut self, key: &str, scope: MemoryScope, default: BlackboardValue) -> &BlackboardValue {
        self.memory_mut(scope).get_or_insert_with(key, || default)
    }

    /// Typed read of `key` in `scope`, storing `default` first if absent.
    ///
    /// Fails with [`TypeMismatch`](super::BlackboardError::TypeMismatch) if
    /// the stored value is not a `T`.
    pub fn get_typed<T>(&mut self, key: &str, scope: MemoryScope, default: T) -> Result<T>
    where
        T: Any + Send + Sync + Clone,
    {
        let value = self.get(key, scope, BlackboardValue::new(default));
        match value.try_ref::<T>(key) {
            Ok(v) => Ok(v.clone()),
            Err(e) => {
                log::warn!("Typed read in {} failed: {}", scope, e);
                Err(e)
            }
        }
    }

    /// [`get`](Self::get) for callers holding an optional tree/node pair.
    ///
    /// Fails with [`InvalidScope`](super::BlackboardError::InvalidScope) if a
    /// node is given without a tree.
    pub fn get_scoped(
        &mut self,
        key: &str,
        tree: Option<TreeId>,
        node: Option<NodeId>,
        default: BlackboardValue,
    ) -> Result<&BlackboardValue> {
        let scope = MemoryScope::from_parts(tree, node)?;
        Ok(self.get(key, scope, default))
    }

    /// Check whether `key` holds a value in `scope`, without creating
    /// anything.
    pub fn contains(&self, key: &str, scope: MemoryScope) -> bool {
        self.memory(scope).is_some_and(|table| table.contains(key))
    }

    // --- Write operations ---

    /// Store `value` under `key` in `scope`, overwriting whatever was there.
    pub fn set(&mut self, key: impl Into<String>, value: BlackboardValue, scope: MemoryScope) {
        self.memory_mut(scope).insert(key, value);
    }

    /// Typed convenience for [`set`](Self::set).
    pub fn set_typed<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T, scope: MemoryScope) {
        self.set(key, BlackboardValue::new(value), scope);
    }

    /// [`set`](Self::set) for callers holding an optional tree/node pair.
    pub fn set_scoped(
        &mut self,
        key: impl Into<String>,
        value: BlackboardValue,
        tree: Option<TreeId>,
        node: Option<NodeId>,
    ) -> Result<()> {
        let scope = MemoryScope::from_parts(tree, node)?;
        self.set(key, value, scope);
        Ok(())
    }

    // --- Scope inspection ---

    /// Check whether `tree` has been touched.
    pub fn has_tree(&self, tree: TreeId) -> bool {
        self.trees.contains_key(&tree)
    }

    /// Number of trees with state on this blackboard.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Number of nodes of `tree` that have a memory table.
    pub fn node_count(&self, tree: TreeId) -> usize {
        self.trees.get(&tree).map_or(0, TreeState::node_count)
    }

    // --- Open nodes ---

    /// Mark `node` of `tree` as open. Returns `false` if it already was.
    pub fn open_node(&mut self, tree: TreeId, node: NodeId) -> bool {
        let opened = self.tree_state_mut(tree).open_node(node);
        if opened {
            log::trace!("Opened node {} in tree {}", node, tree);
        }
        opened
    }

    /// Mark `node` of `tree` as closed. Returns `false` if it was not open.
    pub fn close_node(&mut self, tree: TreeId, node: NodeId) -> bool {
        let closed = self
            .trees
            .get_mut(&tree)
            .is_some_and(|state| state.close_node(node));
        if closed {
            log::trace!("Closed node {} in tree {}", node, tree);
        }
        closed
    }

    pub fn is_node_open(&self, tree: TreeId, node: NodeId) -> bool {
        self.trees
            .get(&tree)
            .is_some_and(|state| state.is_node_open(node))
    }

    /// Iterate over the open nodes of `tree` (unordered).
    pub fn open_nodes(&self, tree: TreeId) -> impl Iterator<Item = NodeId> + '_ {
        self.trees
            .get(&tree)
            .into_iter()
            .flat_map(|state| state.open_nodes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackboard::BlackboardError;

    #[test]
    fn test_blackboard_new() {
        let bb = Blackboard::new();
        assert_eq!(bb.tree_count(), 0);
        assert!(bb.memory(MemoryScope::Global).unwrap().is_empty());
        assert_eq!(bb.config(), &BlackboardConfig::default());
    }

    #[test]
    fn test_tree_isolation() {
        let mut bb = Blackboard::new();
        let (t1, t2) = (TreeId::new(), TreeId::new());

        bb.set_typed("k", 7i32, MemoryScope::Tree(t1));
        assert_eq!(bb.get_typed("k", MemoryScope::Tree(t2), 0i32).unwrap(), 0);
        assert_eq!(bb.get_typed("k", MemoryScope::Tree(t1), 0i32).unwrap(), 7);
    }

    #[test]
    fn test_node_isolation() {
        let mut bb = Blackboard::new();
        let tree = TreeId::new();
        let (n1, n2) = (NodeId::new(), NodeId::new());

        bb.set_typed("k", 1i32, MemoryScope::Node(tree, n1));
        assert!(!bb.contains("k", MemoryScope::Node(tree, n2)));
        assert!(!bb.contains("k", MemoryScope::Tree(tree)));
        assert_eq!(bb.get_typed("k", MemoryScope::Node(tree, n2), -1i32).unwrap(), -1);
        assert_eq!(bb.get_typed("k", MemoryScope::Tree(tree), -2i32).unwrap(), -2);
        assert_eq!(bb.get_typed("k", MemoryScope::Node(tree, n1), 0i32).unwrap(), 1);
    }

    #[test]
    fn test_lazy_default_persists() {
        let mut bb = Blackboard::new();

        assert_eq!(bb.get_typed("k", MemoryScope::Global, 5i32).unwrap(), 5);
        assert_eq!(bb.get_typed("k", MemoryScope::Global, 99i32).unwrap(), 5);
        assert!(bb.contains("k", MemoryScope::Global));
    }

    #[test]
    fn test_set_overwrites() {
        let mut bb = Blackboard::new();
        bb.set_typed("k", 1i32, MemoryScope::Global);
        bb.set_typed("k", 2i32, MemoryScope::Global);
        assert_eq!(bb.get_typed("k", MemoryScope::Global, 0i32).unwrap(), 2);
    }

    #[test]
    fn test_set_overwrites_with_other_type() {
        let mut bb = Blackboard::new();
        bb.set_typed("k", 1i32, MemoryScope::Global);
        bb.set_typed("k", String::from("one"), MemoryScope::Global);

        let value = bb.get("k", MemoryScope::Global, BlackboardValue::new(0i32));
        assert!(value.is::<String>());
    }

    #[test]
    fn test_typed_read_mismatch() {
        let mut bb = Blackboard::new();
        bb.set_typed("target", String::from("orc"), MemoryScope::Global);

        let err = bb.get_typed("target", MemoryScope::Global, 0u32).unwrap_err();
        assert!(matches!(err, BlackboardError::TypeMismatch { ref key, .. } if key == "target"));
        // The stored value is untouched.
        assert_eq!(
            bb.get_typed("target", MemoryScope::Global, String::new()).unwrap(),
            "orc"
        );
    }

    #[test]
    fn test_untyped_get_stores_default() {
        let mut bb = Blackboard::new();
        let tree = TreeId::new();

        let value = bb.get("flag", MemoryScope::Tree(tree), BlackboardValue::new(true));
        assert_eq!(value.downcast_ref::<bool>(), Some(&true));
        assert!(bb.contains("flag", MemoryScope::Tree(tree)));
    }

    #[test]
    fn test_scoped_entry_points() {
        let mut bb = Blackboard::new();
        let tree = TreeId::new();
        let node = NodeId::new();

        bb.set_scoped("k", BlackboardValue::new(3i32), Some(tree), Some(node))
            .unwrap();
        let value = bb
            .get_scoped("k", Some(tree), Some(node), BlackboardValue::new(0i32))
            .unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&3));

        let value = bb
            .get_scoped("k", None, None, BlackboardValue::new(0i32))
            .unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&0));
    }

    #[test]
    fn test_scoped_node_without_tree_fails() {
        let mut bb = Blackboard::new();
        let node = NodeId::new();

        for key in ["a", "b", "hp"] {
            let err = bb
                .set_scoped(key, BlackboardValue::new(1i32), None, Some(node))
                .unwrap_err();
            assert!(matches!(err, BlackboardError::InvalidScope { .. }));

            let err = bb
                .get_scoped(key, None, Some(node), BlackboardValue::new(1i32))
                .unwrap_err();
            assert!(matches!(err, BlackboardError::InvalidScope { .. }));
        }
        // Nothing was created.
        assert!(bb.memory(MemoryScope::Global).unwrap().is_empty());
        assert_eq!(bb.tree_count(), 0);
    }

    #[test]
    fn test_resolution_creates_scopes() {
        let mut bb = Blackboard::new();
        let tree = TreeId::new();
        let node = NodeId::new();

        assert!(!bb.has_tree(tree));
        assert!(bb.memory(MemoryScope::Node(tree, node)).is_none());

        bb.memory_mut(MemoryScope::Node(tree, node));
        assert!(bb.has_tree(tree));
        assert_eq!(bb.node_count(tree), 1);
        assert!(bb.memory(MemoryScope::Node(tree, node)).unwrap().is_empty());
        assert!(bb.memory(MemoryScope::Tree(tree)).unwrap().is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut bb = Blackboard::new();
        let tree = TreeId::new();
        let node = NodeId::new();

        let first: *const MemoryTable = bb.memory_mut(MemoryScope::Node(tree, node));
        let second: *const MemoryTable = bb.memory_mut(MemoryScope::Node(tree, node));
        assert!(std::ptr::eq(first, second));

        let first: *const MemoryTable = bb.memory_mut(MemoryScope::Tree(tree));
        let second: *const MemoryTable = bb.memory_mut(MemoryScope::Tree(tree));
        assert!(std::ptr::eq(first, second));
        assert_eq!(bb.tree_count(), 1);
        assert_eq!(bb.node_count(tree), 1);
    }

    #[test]
    fn test_contains_does_not_create() {
        let bb = Blackboard::new();
        let tree = TreeId::new();
        assert!(!bb.contains("k", MemoryScope::Node(tree, NodeId::new())));
        assert!(!bb.has_tree(tree));
    }

    #[test]
    fn test_example_scenario() {
        let mut bb = Blackboard::new();
        let t1 = TreeId::new();
        let (n1, n2) = (NodeId::new(), NodeId::new());

        bb.set_typed("hp", 10i32, MemoryScope::Node(t1, n1));
        assert_eq!(bb.get_typed("hp", MemoryScope::Node(t1, n1), 0i32).unwrap(), 10);
        assert_eq!(bb.get_typed("hp", MemoryScope::Node(t1, n2), 0i32).unwrap(), 0);
        assert!(bb.contains("hp", MemoryScope::Node(t1, n2)));
        assert_eq!(bb.get_typed("hp", MemoryScope::Global, -1i32).unwrap(), -1);
    }

    #[test]
    fn test_open_nodes() {
        let mut bb = Blackboard::new();
        let (t1, t2) = (TreeId::new(), TreeId::new());
        let node = NodeId::new();

        assert!(!bb.close_node(t1, node));
        assert!(!bb.has_tree(t1));

        assert!(bb.open_node(t1, node));
        assert!(!bb.open_node(t1, node));
        assert!(bb.is_node_open(t1, node));
        assert!(!bb.is_node_open(t2, node));
        assert_eq!(bb.open_nodes(t1).collect::<Vec<_>>(), vec![node]);
        assert_eq!(bb.open_nodes(t2).count(), 0);

        assert!(bb.close_node(t1, node));
        assert!(!bb.is_node_open(t1, node));
    }

    #[test]
    fn test_with_config() {
        let config = BlackboardConfig {
            log_scope_creation: false,
            ..BlackboardConfig::default()
        };
        let mut bb = Blackboard::with_config(config);
        let tree = TreeId::new();
        bb.set_typed("k", 1u8, MemoryScope::Tree(tree));
        assert!(!bb.config().log_scope_creation);
        assert!(bb.contains("k", MemoryScope::Tree(tree)));
    }
}
