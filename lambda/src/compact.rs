//! Optional arena compaction.
//!
//! Reduction never frees anything: contracted applications, consumed
//! abstractions and the originals of substituted arguments all stay in the
//! store. [`compact`] copies what the root still reaches into a fresh store.
//! Every [`NodeId`] handed out before is meaningless for the new tree, so it
//! is only ever called explicitly, between evaluations.

use std::collections::HashMap;

use tracing::info;

use crate::store::{Node, NodeId, Store, Tree};

#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct CompactReport {
    pub live_nodes: usize,
    pub freed_nodes: usize,
}

pub fn compact(tree: &Tree) -> (Tree, CompactReport) {
    fn relocate(
        from: &Store,
        to: &mut Store,
        id: NodeId,
        moved: &mut HashMap<NodeId, NodeId>,
    ) -> NodeId {
        if let Some(&forwarded) = moved.get(&id) {
            return forwarded;
        }
        let node = match from.get(id).clone() {
            node @ (Node::Variable(_) | Node::IndexVariable(_)) => node,
            Node::Abstraction { bound, body } => Node::Abstraction {
                bound,
                body: relocate(from, to, body, moved),
            },
            Node::PureAbstraction(body) => Node::PureAbstraction(relocate(from, to, body, moved)),
            Node::Application { lhs, rhs } => {
                let lhs = relocate(from, to, lhs, moved);
                let rhs = relocate(from, to, rhs, moved);
                Node::Application { lhs, rhs }
            }
        };
        let forwarded = to.append(node);
        moved.insert(id, forwarded);
        forwarded
    }

    let mut store = Store::new();
    let root = relocate(tree.store(), &mut store, tree.root(), &mut HashMap::new());
    let report = CompactReport {
        live_nodes: store.len(),
        freed_nodes: tree.store().len() - store.len(),
    };
    info!(
        live = report.live_nodes,
        freed = report.freed_nodes,
        "compacted store"
    );
    (Tree::new(store, root), report)
}
