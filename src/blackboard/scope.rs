//! Scope keys and scope selectors.
//!
//! Trees and nodes live in distinct identifier spaces, so each gets its own
//! newtype over [`Uuid`]. A concrete scope is always one of three shapes,
//! captured by [`MemoryScope`]; "node without tree" cannot be expressed.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{BlackboardError, Result};

/// Identifier of one behavior tree instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreeId(Uuid);

/// Identifier of one node within a behavior tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

macro_rules! scope_id {
    ($ty:ident) => {
        impl $ty {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $ty {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

scope_id!(TreeId);
scope_id!(NodeId);

/// A fully resolved memory scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryScope {
    /// Agent-wide memory.
    Global,
    /// Memory shared by every node of one tree.
    Tree(TreeId),
    /// Memory private to one node of one tree.
    Node(TreeId, NodeId),
}

impl MemoryScope {
    /// Build a scope from the optional tree/node pair used by callers that
    /// carry nullable identifiers.
    ///
    /// Fails with [`BlackboardError::InvalidScope`] when a node is given
    /// without its tree.
    pub fn from_parts(tree: Option<TreeId>, node: Option<NodeId>) -> Result<Self> {
        match (tree, node) {
            (None, None) => Ok(Self::Global),
            (Some(tree), None) => Ok(Self::Tree(tree)),
            (Some(tree), Some(node)) => Ok(Self::Node(tree, node)),
            (None, Some(node)) => Err(BlackboardError::InvalidScope {
                tree: None,
                node: Some(node),
            }),
        }
    }

    /// The tree this scope belongs to, if any.
    pub fn tree(&self) -> Option<TreeId> {
        match self {
            Self::Global => None,
            Self::Tree(tree) | Self::Node(tree, _) => Some(*tree),
        }
    }

    /// The node this scope belongs to, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Node(_, node) => Some(*node),
            _ => None,
        }
    }

    /// The category of this scope.
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Global => ScopeKind::Global,
            Self::Tree(_) => ScopeKind::Tree,
            Self::Node(_, _) => ScopeKind::Node,
        }
    }
}

impl fmt::Display for MemoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Tree(tree) => write!(f, "tree:{}", tree),
            Self::Node(tree, node) => write!(f, "tree:{}/node:{}", tree, node),
        }
    }
}

/// Scope category an accessor is bound to, before any identifiers are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Global,
    Tree,
    Node,
}

impl ScopeKind {
    /// Resolve this category against live identifiers.
    pub fn resolve(self, tree: TreeId, node: NodeId) -> MemoryScope {
        match self {
            Self::Global => MemoryScope::Global,
            Self::Tree => MemoryScope::Tree(tree),
            Self::Node => MemoryScope::Node(tree, node),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_valid_shapes() {
        let tree = TreeId::new();
        let node = NodeId::new();

        assert_eq!(MemoryScope::from_parts(None, None).unwrap(), MemoryScope::Global);
        assert_eq!(
            MemoryScope::from_parts(Some(tree), None).unwrap(),
            MemoryScope::Tree(tree)
        );
        assert_eq!(
            MemoryScope::from_parts(Some(tree), Some(node)).unwrap(),
            MemoryScope::Node(tree, node)
        );
    }

    #[test]
    fn test_from_parts_node_without_tree() {
        let node = NodeId::new();
        let err = MemoryScope::from_parts(None, Some(node)).unwrap_err();
        assert!(matches!(
            err,
            BlackboardError::InvalidScope { tree: None, node: Some(n) } if n == node
        ));
    }

    #[test]
    fn test_scope_accessors() {
        let tree = TreeId::new();
        let node = NodeId::new();
        let scope = MemoryScope::Node(tree, node);

        assert_eq!(scope.tree(), Some(tree));
        assert_eq!(scope.node(), Some(node));
        assert_eq!(scope.kind(), ScopeKind::Node);
        assert_eq!(MemoryScope::Global.tree(), None);
        assert_eq!(MemoryScope::Tree(tree).node(), None);
    }

    #[test]
    fn test_kind_resolve() {
        let tree = TreeId::new();
        let node = NodeId::new();

        assert_eq!(ScopeKind::Global.resolve(tree, node), MemoryScope::Global);
        assert_eq!(ScopeKind::Tree.resolve(tree, node), MemoryScope::Tree(tree));
        assert_eq!(ScopeKind::Node.resolve(tree, node), MemoryScope::Node(tree, node));
    }

    #[test]
    fn test_ids_are_distinct_and_stable() {
        let uuid = Uuid::new_v4();
        assert_eq!(TreeId::from_uuid(uuid), TreeId::from(uuid));
        assert_eq!(TreeId::from_uuid(uuid).as_uuid(), &uuid);
        assert_ne!(NodeId::new(), NodeId::new());
    }

    #[test]
    fn test_scope_display() {
        let tree = TreeId::from_uuid(Uuid::nil());
        assert_eq!(MemoryScope::Global.to_string(), "global");
        assert_eq!(
            MemoryScope::Tree(tree).to_string(),
            "tree:00000000-0000-0000-0000-000000000000"
        );
    }
}
