//! Blackboard — scoped key/value memory shared by behavior-tree agents.
//!
//! Each agent owns one [`Blackboard`]. Values live at one of three levels:
//!
//! - **Global**: visible to everything the agent runs.
//! - **Tree**: shared by all nodes of one tree instance ([`TreeId`]).
//! - **Node**: private to one node of one tree ([`NodeId`]).
//!
//! # Lazy Reads
//!
//! Reading a missing key stores the caller's default under it. The first read
//! fixes the value; later reads return it until something writes the key.
//!
//! # Scope Creation
//!
//! Tree and node containers are created on first touch and kept for the
//! blackboard's whole life. There is no eviction.
//!
//! # Accessors
//!
//! Tree nodes usually go through [`BlackboardGetter`] / [`BlackboardSetter`],
//! which bind a key and a [`ScopeKind`] once and resolve the concrete scope
//! from an [`EvaluationContext`] on every call.
//!
//! # Threading
//!
//! A blackboard has no internal locking and is meant to be driven by one
//! evaluation at a time. Accessors are immutable and `Send + Sync`.

pub mod accessor;
pub mod config;
pub mod error;
pub mod memory;
pub mod scope;
pub mod tree;
pub mod value;
pub mod view;

pub use accessor::{BlackboardGetter, BlackboardSetter, EvaluationContext, ScopedNode, TreeContext};
pub use config::BlackboardConfig;
pub use error::{BlackboardError, Result};
pub use memory::MemoryTable;
pub use scope::{MemoryScope, NodeId, ScopeKind, TreeId};
pub use tree::TreeState;
pub use value::BlackboardValue;
pub use view::Blackboard;
