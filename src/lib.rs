//! # Agent Blackboard
//!
//! Hierarchical, scoped key/value memory for behavior-tree driven agents.
//!
//! One [`Blackboard`] per agent holds a global table, a table per tree
//! instance and a table per node within each tree. Reads are lazily
//! initializing and typed accessors ([`BlackboardGetter`],
//! [`BlackboardSetter`]) let tree nodes bind a key and scope once and reuse
//! them across evaluations.

pub mod blackboard;

pub use blackboard::{
    Blackboard, BlackboardConfig, BlackboardError, BlackboardGetter, BlackboardSetter,
    BlackboardValue, EvaluationContext, MemoryScope, MemoryTable, NodeId, ScopeKind, ScopedNode,
    TreeContext, TreeId,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
