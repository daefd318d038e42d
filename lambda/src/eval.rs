use tracing::{debug, trace};

use crate::{
    store::{Node, NodeId, Store, Tree},
    subst::{shift, substitute},
};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Outcome {
    /// The root reached weak head normal form.
    Whnf { steps: usize },
    /// The step budget ran out first. Says nothing about termination.
    Exhausted { steps: usize },
}

impl Outcome {
    pub fn steps(self) -> usize {
        match self {
            Outcome::Whnf { steps } | Outcome::Exhausted { steps } => steps,
        }
    }
}

/// Follows the left spine from `root` and returns the innermost application
/// whose function is an abstraction, or `None` if the term is in weak head
/// normal form.
pub fn find_redex(store: &Store, root: NodeId) -> Option<NodeId> {
    let mut current = root;
    loop {
        match store.get(current) {
            Node::Application { lhs, .. } => match store.get(*lhs) {
                Node::PureAbstraction(_) => return Some(current),
                Node::Application { .. } => current = *lhs,
                Node::IndexVariable(_) => return None,
                node => unreachable!("named node {lhs} in an index tree: {node:?}"),
            },
            Node::IndexVariable(_) | Node::PureAbstraction(_) => return None,
            node => unreachable!("named node {current} in an index tree: {node:?}"),
        }
    }
}

/// Beta-reduces the application at `redex` and turns its slot into the
/// reduced body.
fn contract(store: &mut Store, redex: NodeId) {
    let (abs, arg) = match store.get(redex) {
        Node::Application { lhs, rhs } => (*lhs, *rhs),
        node => unreachable!("redex {redex} is not an application: {node:?}"),
    };
    let body = match store.get(abs) {
        Node::PureAbstraction(body) => *body,
        node => unreachable!("redex {redex} does not apply an abstraction: {node:?}"),
    };
    shift(store, arg, 0, 1);
    substitute(store, body, arg, 0);
    shift(store, body, 0, -1);
    store.overwrite(redex, body);
}

/// Performs one call-by-name step. Returns the id of the contracted
/// application, or `None` if the term was already in weak head normal form.
pub fn step(store: &mut Store, root: NodeId) -> Option<NodeId> {
    let redex = find_redex(store, root)?;
    contract(store, redex);
    Some(redex)
}

/// Reduces to weak head normal form and returns the number of steps.
/// Does not return for terms without one.
pub fn whnf(tree: &mut Tree) -> usize {
    let root = tree.root();
    let mut steps = 0;
    while let Some(redex) = step(tree.store_mut(), root) {
        steps += 1;
        trace!(step = steps, %redex, "contracted");
    }
    debug!(steps, nodes = tree.store().len(), "reached weak head normal form");
    steps
}

/// Like [`whnf`], but gives up after `limit` steps.
pub fn whnf_with_limit(tree: &mut Tree, limit: usize) -> Outcome {
    let root = tree.root();
    let mut steps = 0;
    while steps < limit {
        match step(tree.store_mut(), root) {
            Some(redex) => {
                steps += 1;
                trace!(step = steps, %redex, "contracted");
            }
            None => {
                debug!(steps, nodes = tree.store().len(), "reached weak head normal form");
                return Outcome::Whnf { steps };
            }
        }
    }
    if find_redex(tree.store(), root).is_none() {
        return Outcome::Whnf { steps };
    }
    debug!(steps, nodes = tree.store().len(), "step budget exhausted");
    Outcome::Exhausted { steps }
}
