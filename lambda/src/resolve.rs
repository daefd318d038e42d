//! Named tree to index tree.
//!
//! Bound occurrences become de Bruijn indices. A free occurrence of the
//! `f`-th distinct free name (in preorder) under `n` binders becomes
//! `f + n`, i.e. it points past every enclosing binder into a global slot,
//! so the same free name gets a different literal index at each depth.

use indexmap::IndexSet;
use tracing::debug;

use crate::{
    prelude::*,
    store::{Node, NodeId, Tree, Visitor},
};

/// Free names in order of first occurrence; the position is the slot.
#[derive(Default, Clone, Debug)]
pub struct FreeVariables {
    names: IndexSet<Identifier>,
}

impl FreeVariables {
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn name_of(&self, id: usize) -> Option<&Identifier> {
        self.names.get_index(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Identifier)> {
        self.names.iter().enumerate()
    }

    fn intern(&mut self, name: &Identifier) -> usize {
        self.names.insert_full(name.clone()).0
    }
}

#[derive(Clone, Debug)]
pub struct Resolved {
    pub tree: Tree,
    pub free: FreeVariables,
}

/// Builds the index form of a named tree during one preorder walk. Binders
/// are pushed on `enter` and popped on `exit`; resolved nodes are produced
/// on `exit`, so they come out in postorder and are appended afterwards
/// starting at `base`.
struct Resolver {
    base: usize,
    scopes: Vec<Identifier>,
    free: FreeVariables,
    resolved: Vec<Node>,
    built: Vec<NodeId>,
}

impl Resolver {
    fn new(base: usize) -> Self {
        Self {
            base,
            scopes: vec![],
            free: FreeVariables::default(),
            resolved: vec![],
            built: vec![],
        }
    }

    fn bound_index(&self, name: &str) -> Option<Index> {
        self.scopes
            .iter()
            .rev()
            .enumerate()
            .find_map(|(i, x)| (x.as_ref() == name).then(|| i))
    }

    fn free_index(&mut self, name: &Identifier) -> Index {
        self.free.intern(name) + self.scopes.len()
    }

    fn child(&mut self, parent: NodeId) -> NodeId {
        match self.built.pop() {
            Some(id) => id,
            None => unreachable!("node {parent} exited before its children"),
        }
    }

    fn emit(&mut self, node: Node) {
        let id = NodeId::new(self.base + self.resolved.len());
        self.resolved.push(node);
        self.built.push(id);
    }
}

impl Visitor for Resolver {
    fn enter(&mut self, _id: NodeId, node: &Node) {
        if let Node::Abstraction { bound, .. } = node {
            self.scopes.push(bound.clone());
        }
    }

    fn exit(&mut self, id: NodeId, node: &Node) {
        let resolved = match node {
            Node::Variable(name) => {
                let index = match self.bound_index(name) {
                    Some(index) => index,
                    None => self.free_index(name),
                };
                debug!(%name, index, depth = self.scopes.len(), "resolved variable");
                Node::IndexVariable(index)
            }
            Node::Application { .. } => {
                let rhs = self.child(id);
                let lhs = self.child(id);
                Node::Application { lhs, rhs }
            }
            Node::Abstraction { bound, .. } => {
                assert_eq!(Some(bound), self.scopes.pop().as_ref());
                Node::PureAbstraction(self.child(id))
            }
            Node::IndexVariable(_) | Node::PureAbstraction(_) => {
                unreachable!("node {id} is already resolved: {node:?}")
            }
        };
        self.emit(resolved);
    }
}

/// Appends the index form of `tree` to its own store. The named nodes stay
/// where they are; the new root is the last node appended.
pub fn resolve(mut tree: Tree) -> Resolved {
    let mut resolver = Resolver::new(tree.store().len());
    tree.store().visit_preorder(tree.root(), &mut resolver);
    let Resolver {
        free,
        resolved,
        mut built,
        ..
    } = resolver;
    let store = tree.store_mut();
    for node in resolved {
        store.append(node);
    }
    let root = match (built.pop(), built.is_empty()) {
        (Some(root), true) => root,
        _ => unreachable!("resolution left {} dangling nodes", built.len()),
    };
    debug!(free = free.len(), "name resolution finished");
    Resolved {
        tree: Tree::new(tree.into_store(), root),
        free,
    }
}
