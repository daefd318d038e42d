use std::rc::Rc;

use crate::{
    prelude::*,
    store::{Node, NodeId, Store, Tree},
};

pub type TermRef = Rc<Term>;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Term {
    /// `x`
    Variable(Identifier),
    /// `λx. t`
    Abstraction(Identifier, TermRef),
    /// `(t t)`
    Application(TermRef, TermRef),
}

impl Term {
    /// Flattens the term into a fresh store, children first, so the root is
    /// the last node appended.
    pub fn lower(&self) -> Tree {
        fn lower_rec(store: &mut Store, term: &Term) -> NodeId {
            let node = match term {
                Term::Variable(name) => Node::Variable(name.clone()),
                Term::Abstraction(bound, body) => Node::Abstraction {
                    bound: bound.clone(),
                    body: lower_rec(store, body),
                },
                Term::Application(lhs, rhs) => {
                    let lhs = lower_rec(store, lhs);
                    let rhs = lower_rec(store, rhs);
                    Node::Application { lhs, rhs }
                }
            };
            store.append(node)
        }
        let mut store = Store::new();
        let root = lower_rec(&mut store, self);
        Tree::new(store, root)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Variable(name) => f.write_str(name),
            Term::Abstraction(bound, body) => f.write_fmt(format_args!("λ{bound}.{body}")),
            Term::Application(lhs, rhs) => f.write_fmt(format_args!("({lhs} {rhs})")),
        }
    }
}
