//! Per-tree state: tree-level memory, node memories and the open-node set.

use std::collections::{HashMap, HashSet};

use super::memory::MemoryTable;
use super::scope::NodeId;

/// Everything the blackboard keeps for one behavior tree instance.
///
/// The open-node set is a plain container. Deciding when a node opens or
/// closes is up to the tree evaluator.
#[derive(Debug, Default)]
pub struct TreeState {
    memory: MemoryTable,
    node_memory: HashMap<NodeId, MemoryTable>,
    open_nodes: HashSet<NodeId>,
    node_capacity: usize,
}

impl TreeState {
    /// Create an empty tree state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree state whose tables start with the given capacities.
    pub fn with_capacity(tree_capacity: usize, node_capacity: usize) -> Self {
        Self {
            memory: MemoryTable::with_capacity(tree_capacity),
            node_memory: HashMap::new(),
            open_nodes: HashSet::new(),
            node_capacity,
        }
    }

    /// Tree-level memory shared by all nodes of this tree.
    pub fn memory(&self) -> &MemoryTable {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryTable {
        &mut self.memory
    }

    /// Get or create the memory table of `node`.
    ///
    /// Returns the table and whether it was created by this call.
    pub fn node_memory_mut(&mut self, node: NodeId) -> (&mut MemoryTable, bool) {
        let mut created = false;
        let capacity = self.node_capacity;
        let table = self.node_memory.entry(node).or_insert_with(|| {
            created = true;
            MemoryTable::with_capacity(capacity)
        });
        (table, created)
    }

    /// Borrow the memory table of `node` without creating it.
    pub fn node_memory(&self, node: NodeId) -> Option<&MemoryTable> {
        self.node_memory.get(&node)
    }

    /// Number of nodes that have a memory table.
    pub fn node_count(&self) -> usize {
        self.node_memory.len()
    }

    // --- Open nodes ---

    /// Mark `node` as open. Returns `false` if it already was.
    pub fn open_node(&mut self, node: NodeId) -> bool {
        self.open_nodes.insert(node)
    }

    /// Mark `node` as closed. Returns `false` if it was not open.
    pub fn close_node(&mut self, node: NodeId) -> bool {
        self.open_nodes.remove(&node)
    }

    pub fn is_node_open(&self, node: NodeId) -> bool {
        self.open_nodes.contains(&node)
    }

    /// Iterate over open nodes (unordered).
    pub fn open_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.open_nodes.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
