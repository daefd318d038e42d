//! Untyped lambda calculus: name resolution to de Bruijn indices and
//! call-by-name reduction to weak head normal form over a node arena.

use thiserror::Error;

pub mod ast;
pub mod compact;
pub mod config;
pub mod eval;
pub mod lang;
pub mod logging;
pub mod parser;
pub mod prelude;
pub mod printer;
pub mod report;
pub mod resolve;
pub mod store;
pub mod subst;

#[cfg(test)]
mod testing;

use crate::{
    eval::Outcome,
    resolve::{FreeVariables, Resolved},
    store::Tree,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<prelude::Error>),
}
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug)]
pub struct Evaluation {
    pub tree: Tree,
    pub free: FreeVariables,
    pub outcome: Outcome,
}

impl Evaluation {
    /// The result in source syntax, with free variables under their own names.
    pub fn readback(&self) -> String {
        printer::readback(&self.tree, &self.free)
    }
}

/// Parses and resolves `input` into an index tree.
pub fn parse_and_resolve(input: &str) -> Result<Resolved> {
    let named = parser::parse(input).map_err(Error::Syntax)?;
    Ok(resolve::resolve(named))
}

/// Parses, resolves and reduces `input` to weak head normal form, giving up
/// after `step_limit` steps if one is set.
pub fn evaluate(input: &str, step_limit: Option<usize>) -> Result<Evaluation> {
    let Resolved { mut tree, free } = parse_and_resolve(input)?;
    let outcome = match step_limit {
        Some(limit) => eval::whnf_with_limit(&mut tree, limit),
        None => Outcome::Whnf {
            steps: eval::whnf(&mut tree),
        },
    };
    Ok(Evaluation {
        tree,
        free,
        outcome,
    })
}
