//! Scoped accessors — reusable typed handles for tree nodes.
//!
//! A node builds its getters and setters once, at configuration time, and
//! calls them on every evaluation with the live context. The accessor picks
//! the concrete scope from its fixed [`ScopeKind`], the context's tree and
//! the evaluating node.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use super::error::Result;
use super::scope::{NodeId, ScopeKind, TreeId};
use super::view::Blackboard;

/// What the tree evaluator hands to an accessor on each call: the current
/// agent's blackboard and the tree being evaluated.
pub trait EvaluationContext {
    /// Blackboard of the agent running the tree.
    fn blackboard_mut(&mut self) -> &mut Blackboard;

    /// Identifier of the tree being evaluated.
    fn tree_id(&self) -> TreeId;
}

/// A tree node that can own node-scoped memory.
pub trait ScopedNode {
    fn node_id(&self) -> NodeId;
}

impl ScopedNode for NodeId {
    fn node_id(&self) -> NodeId {
        *self
    }
}

/// Minimal [`EvaluationContext`] over a borrowed blackboard.
#[derive(Debug)]
pub struct TreeContext<'a> {
    blackboard: &'a mut Blackboard,
    tree: TreeId,
}

impl<'a> TreeContext<'a> {
    pub fn new(blackboard: &'a mut Blackboard, tree: TreeId) -> Self {
        Self { blackboard, tree }
    }
}

impl EvaluationContext for TreeContext<'_> {
    fn blackboard_mut(&mut self) -> &mut Blackboard {
        self.blackboard
    }

    fn tree_id(&self) -> TreeId {
        self.tree
    }
}

/// Typed read handle bound to a key and a scope category.
///
/// # Example
///
/// ```
/// use agent_blackboard::blackboard::{
///     Blackboard, BlackboardGetter, BlackboardSetter, NodeId, ScopeKind, TreeContext, TreeId,
/// };
///
/// let hp_set = BlackboardSetter::<i32>::new("hp", ScopeKind::Node);
/// let hp_get = BlackboardGetter::<i32>::new("hp", ScopeKind::Node);
///
/// let mut bb = Blackboard::new();
/// let node = NodeId::new();
/// let mut ctx = TreeContext::new(&mut bb, TreeId::new());
///
/// hp_set.set(&mut ctx, &node, 10);
/// assert_eq!(hp_get.get(&mut ctx, &node, 0).unwrap(), 10);
/// assert_eq!(hp_get.get(&mut ctx, &NodeId::new(), 0).unwrap(), 0);
/// ```
pub struct BlackboardGetter<T> {
    key: String,
    scope: ScopeKind,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BlackboardGetter<T>
where
    T: Any + Send + Sync + Clone,
{
    pub fn new(key: impl Into<String>, scope: ScopeKind) -> Self {
        Self {
            key: key.into(),
            scope,
            _marker: PhantomData,
        }
    }

    /// Read the bound key, storing `default` if it is absent in the
    /// resolved scope.
    pub fn get<C, N>(&self, context: &mut C, node: &N, default: T) -> Result<T>
    where
        C: EvaluationContext + ?Sized,
        N: ScopedNode + ?Sized,
    {
        let scope = self.scope.resolve(context.tree_id(), node.node_id());
        context.blackboard_mut().get_typed(&self.key, scope, default)
    }
}

/// Typed write handle bound to a key and a scope category.
pub struct BlackboardSetter<T> {
    key: String,
    scope: ScopeKind,
    _marker: PhantomData<fn(T)>,
}

impl<T> BlackboardSetter<T>
where
    T: Any + Send + Sync,
{
    pub fn new(key: impl Into<String>, scope: ScopeKind) -> Self {
        Self {
            key: key.into(),
            scope,
            _marker: PhantomData,
        }
    }

    /// Write `value` under the bound key in the resolved scope.
    pub fn set<C, N>(&self, context: &mut C, node: &N, value: T)
    where
        C: EvaluationContext + ?Sized,
        N: ScopedNode + ?Sized,
    {
        let scope = self.scope.resolve(context.tree_id(), node.node_id());
        context
            .blackboard_mut()
            .set_typed(self.key.clone(), value, scope);
    }
}

macro_rules! accessor_common {
    ($ty:ident) => {
        impl<T> $ty<T> {
            /// Key this accessor reads or writes.
            pub fn key(&self) -> &str {
                &self.key
            }

            /// Scope category this accessor is bound to.
            pub fn scope(&self) -> ScopeKind {
                self.scope
            }
        }

        impl<T> Clone for $ty<T> {
            fn clone(&self) -> Self {
                Self {
                    key: self.key.clone(),
                    scope: self.scope,
                    _marker: PhantomData,
                }
            }
        }

        impl<T> fmt::Debug for $ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("key", &self.key)
                    .field("scope", &self.scope)
                    .field("type", &std::any::type_name::<T>())
                    .finish()
            }
        }
    };
}

accessor_common!(BlackboardGetter);
accessor_common!(BlackboardSetter);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
