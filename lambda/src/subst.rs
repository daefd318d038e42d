//! Index arithmetic on the index tree, performed in place in the store.

use crate::{
    prelude::*,
    store::{Node, NodeId, Store},
};

/// Adds `amount` to every index variable under `node` that is at least
/// `cutoff`, where the cutoff grows by one under each binder.
///
/// Panics if an index would drop below zero.
pub fn shift(store: &mut Store, node: NodeId, cutoff: Index, amount: isize) {
    match store.get(node).clone() {
        Node::IndexVariable(k) if k >= cutoff => {
            let shifted = k.checked_add_signed(amount).unwrap_or_else(|| {
                panic!("shifting index {k} of node {node} by {amount} leaves the index range")
            });
            store.set_index(node, shifted);
        }
        Node::IndexVariable(_) => {}
        Node::PureAbstraction(body) => shift(store, body, cutoff + 1, amount),
        Node::Application { lhs, rhs } => {
            shift(store, lhs, cutoff, amount);
            shift(store, rhs, cutoff, amount);
        }
        node @ (Node::Variable(_) | Node::Abstraction { .. }) => {
            unreachable!("cannot shift a named node: {node:?}")
        }
    }
}

/// Replaces every occurrence of `level` under `within` with its own copy of
/// `expr`. Under `n` extra binders the copy is shifted by `n` so that the
/// free references of `expr` keep pointing at the same binders.
///
/// `expr` itself is left untouched.
pub fn substitute(store: &mut Store, within: NodeId, expr: NodeId, level: Index) {
    fn rec(store: &mut Store, node: NodeId, expr: NodeId, level: Index, crossed: usize) {
        match store.get(node).clone() {
            Node::IndexVariable(k) if k == level => {
                let copy = replicate(store, expr);
                if crossed > 0 {
                    shift(store, copy, 0, crossed as isize);
                }
                store.overwrite(node, copy);
            }
            Node::IndexVariable(_) => {}
            Node::PureAbstraction(body) => rec(store, body, expr, level + 1, crossed + 1),
            Node::Application { lhs, rhs } => {
                rec(store, lhs, expr, level, crossed);
                rec(store, rhs, expr, level, crossed);
            }
            node @ (Node::Variable(_) | Node::Abstraction { .. }) => {
                unreachable!("cannot substitute into a named node: {node:?}")
            }
        }
    }
    rec(store, within, expr, level, 0)
}

/// Deep-copies the subtree at `root` and returns the new root. No node of
/// the copy is shared with the original.
pub fn replicate(store: &mut Store, root: NodeId) -> NodeId {
    let node = match store.get(root).clone() {
        node @ (Node::Variable(_) | Node::IndexVariable(_)) => node,
        Node::Abstraction { bound, body } => Node::Abstraction {
            bound,
            body: replicate(store, body),
        },
        Node::PureAbstraction(body) => Node::PureAbstraction(replicate(store, body)),
        Node::Application { lhs, rhs } => {
            let lhs = replicate(store, lhs);
            let rhs = replicate(store, rhs);
            Node::Application { lhs, rhs }
        }
    };
    store.append(node)
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        resolve::resolve,
        store::{Tree, Visitor},
        testing::{arb_term, index_tree},
    };

    fn display(store: &Store, root: NodeId) -> String {
        store.display(root).to_string()
    }

    #[test]
    fn test_shift_respects_cutoff() {
        let mut tree = index_tree("λx.(x (y z))");
        assert_eq!(tree.to_string(), "(λ (0 (1 2)))");
        let root = tree.root();
        shift(tree.store_mut(), root, 0, 3);
        assert_eq!(tree.to_string(), "(λ (0 (4 5)))");
        shift(tree.store_mut(), root, 2, -1);
        assert_eq!(tree.to_string(), "(λ (0 (3 4)))");
    }

    #[test]
    #[should_panic(expected = "leaves the index range")]
    fn test_shift_below_zero() {
        let mut tree = index_tree("(x y)");
        let root = tree.root();
        shift(tree.store_mut(), root, 0, -1);
    }

    #[test]
    fn test_replicate() {
        let mut tree = index_tree("λx.(x y)");
        let root = tree.root();
        let before = tree.store().len();
        let copy = replicate(tree.store_mut(), root);
        assert_eq!(tree.store().len(), before + 4);
        assert_eq!(display(tree.store(), copy), "(λ (0 1))");

        struct Ids(Vec<NodeId>);
        impl Visitor for Ids {
            fn enter(&mut self, id: NodeId, _: &Node) {
                self.0.push(id);
            }
        }
        let mut original = Ids(vec![]);
        tree.store().visit_preorder(root, &mut original);
        let mut copied = Ids(vec![]);
        tree.store().visit_preorder(copy, &mut copied);
        assert!(copied.0.iter().all(|id| !original.0.contains(id)));
    }

    #[test]
    fn test_substitute_under_binders() {
        // body `((λ 1) 0)`, argument `(λ (0 3))`
        let mut tree = index_tree("((λx.((λy.x) x)) (λw.(w q)))");
        let root = tree.root();
        let (abs, arg) = match tree.store().get(root) {
            Node::Application { lhs, rhs } => (*lhs, *rhs),
            node => panic!("unexpected {node:?}"),
        };
        let body = match tree.store().get(abs) {
            Node::PureAbstraction(body) => *body,
            node => panic!("unexpected {node:?}"),
        };
        assert_eq!(display(tree.store(), body), "((λ 1) 0)");
        assert_eq!(display(tree.store(), arg), "(λ (0 1))");
        substitute(tree.store_mut(), body, arg, 0);
        assert_eq!(
            display(tree.store(), body),
            "((λ (λ (0 2))) (λ (0 1)))"
        );
        assert_eq!(display(tree.store(), arg), "(λ (0 1))");
    }

    #[test]
    fn test_substitute_copies_are_independent() {
        let mut tree = index_tree("λx.(x x)");
        let root = tree.root();
        let body = match tree.store().get(root) {
            Node::PureAbstraction(body) => *body,
            node => panic!("unexpected {node:?}"),
        };
        let arg = tree.store_mut().append(Node::IndexVariable(5));
        substitute(tree.store_mut(), body, arg, 1);
        let (lhs, rhs) = match tree.store().get(body) {
            Node::Application { lhs, rhs } => (*lhs, *rhs),
            node => panic!("unexpected {node:?}"),
        };
        // Both occurrences were index 0 under the binder, not 1.
        assert_eq!(tree.store().get(lhs), &Node::IndexVariable(0));
        assert_eq!(tree.store().get(rhs), &Node::IndexVariable(0));

        substitute(tree.store_mut(), body, arg, 0);
        assert_eq!(display(tree.store(), body), "(5 5)");
        tree.store_mut().set_index(lhs, 9);
        assert_eq!(display(tree.store(), body), "(9 5)");
        assert_eq!(tree.store().get(arg), &Node::IndexVariable(5));
    }

    proptest! {
        #[test]
        fn test_shift_round_trip(term in arb_term()) {
            let mut tree = resolve(term.lower()).tree;
            let root = tree.root();
            let before = tree.to_string();
            shift(tree.store_mut(), root, 0, 1);
            shift(tree.store_mut(), root, 0, -1);
            prop_assert_eq!(tree.to_string(), before);
        }

        #[test]
        fn test_replicate_is_structural(term in arb_term()) {
            let mut tree = resolve(term.lower()).tree;
            let root = tree.root();
            let copy = replicate(tree.store_mut(), root);
            let copied = Tree::new(tree.store().clone(), copy);
            prop_assert_eq!(copied.to_string(), tree.to_string());
            prop_assert_eq!(copied.size(), tree.size());
        }
    }
}
