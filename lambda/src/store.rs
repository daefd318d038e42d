//! Append-only node arena shared by the named tree, the index tree and every
//! node produced while reducing.

use crate::prelude::*;

/// Handle of a node in a [`Store`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, Debug)]
#[display(fmt = "#{_0}")]
pub struct NodeId(usize);

impl NodeId {
    /// Handle of the slot `index`, for code that lays nodes out before
    /// appending them.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Node {
    /// Named tree only.
    Variable(Identifier),
    /// Named tree only.
    Abstraction { bound: Identifier, body: NodeId },
    Application { lhs: NodeId, rhs: NodeId },
    /// Index tree only.
    IndexVariable(Index),
    /// Index tree only; the parameter is implied by position.
    PureAbstraction(NodeId),
}

impl Node {
    pub fn children(&self) -> (Option<NodeId>, Option<NodeId>) {
        match self {
            Node::Variable(_) | Node::IndexVariable(_) => (None, None),
            Node::Abstraction { body, .. } | Node::PureAbstraction(body) => (Some(*body), None),
            Node::Application { lhs, rhs } => (Some(*lhs), Some(*rhs)),
        }
    }

    /// Whether the node introduces a binder.
    pub fn is_binder(&self) -> bool {
        matches!(self, Node::Abstraction { .. } | Node::PureAbstraction(_))
    }
}

pub trait Visitor {
    fn enter(&mut self, _id: NodeId, _node: &Node) {}
    fn exit(&mut self, _id: NodeId, _node: &Node) {}
}

#[derive(Default, Clone, Debug)]
pub struct Store {
    nodes: Vec<Node>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Panics on a handle this store never handed out.
    pub fn get(&self, id: NodeId) -> &Node {
        self.nodes.get(id.0).unwrap_or_else(|| {
            panic!(
                "node {id} is out of range of a store with {} nodes",
                self.nodes.len()
            )
        })
    }

    /// Copies the node at `src` into the slot `dst`. Every handle to `dst`
    /// now sees the content of `src`; this is the only way a slot changes
    /// kind after being appended.
    pub fn overwrite(&mut self, dst: NodeId, src: NodeId) {
        let node = self.get(src).clone();
        self.nodes[dst.0] = node;
    }

    /// Renumbers an index variable in place.
    pub fn set_index(&mut self, id: NodeId, index: Index) {
        match &mut self.nodes[id.0] {
            Node::IndexVariable(slot) => *slot = index,
            other => panic!("node {id} is not an index variable: {other:?}"),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks the subtree at `root`, calling `enter` before and `exit` after
    /// the children of each node. Left child first.
    pub fn visit_preorder(&self, root: NodeId, visitor: &mut impl Visitor) {
        let node = self.get(root);
        visitor.enter(root, node);
        let (lhs, rhs) = node.children();
        for child in [lhs, rhs].into_iter().flatten() {
            self.visit_preorder(child, visitor);
        }
        visitor.exit(root, node);
    }
}

/// A store together with the node currently considered the root.
#[derive(Clone, Debug)]
pub struct Tree {
    store: Store,
    root: NodeId,
}

impl Tree {
    pub fn new(store: Store, root: NodeId) -> Self {
        assert!(root.0 < store.len(), "root {root} is out of range");
        Self { store, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    /// Number of nodes reachable from the root.
    pub fn size(&self) -> usize {
        struct Count(usize);
        impl Visitor for Count {
            fn enter(&mut self, _: NodeId, _: &Node) {
                self.0 += 1;
            }
        }
        let mut count = Count(0);
        self.store.visit_preorder(self.root, &mut count);
        count.0
    }
}
