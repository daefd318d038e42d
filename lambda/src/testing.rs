use proptest::prelude::*;

use crate::{
    ast::Term,
    parser,
    resolve::{resolve, Resolved},
    store::Tree,
};

const NAMES: &[&str] = &["x", "y", "z", "f", "g"];

/// Random named terms over a small alphabet, so that both bound and free
/// occurrences show up at varying depths.
pub fn arb_term() -> impl Strategy<Value = Term> {
    let leaf = prop::sample::select(NAMES).prop_map(|x| Term::Variable(x.into()));
    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (prop::sample::select(NAMES), inner.clone())
                .prop_map(|(x, body)| Term::Abstraction(x.into(), body.into())),
            (inner.clone(), inner).prop_map(|(lhs, rhs)| Term::Application(lhs.into(), rhs.into())),
        ]
    })
}

/// Parses and resolves, panicking on a syntax error.
#[track_caller]
pub fn index_tree(input: &str) -> Tree {
    resolved(input).tree
}

#[track_caller]
pub fn resolved(input: &str) -> Resolved {
    match parser::parse(input) {
        Ok(tree) => resolve(tree),
        Err(es) => panic!("parse failure:\n'{input}'\n{es:?}"),
    }
}
