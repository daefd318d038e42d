//! S-expression rendering for both trees, and readback of an index tree into
//! source syntax.

use std::collections::HashSet;

use crate::{
    resolve::FreeVariables,
    store::{Node, NodeId, Store, Tree},
};

pub struct Sexpr<'a> {
    store: &'a Store,
    root: NodeId,
}

impl Store {
    pub fn display(&self, root: NodeId) -> Sexpr<'_> {
        Sexpr { store: self, root }
    }
}

impl std::fmt::Display for Sexpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn fmt_rec(store: &Store, id: NodeId, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match store.get(id) {
                Node::Variable(name) => f.write_str(name),
                Node::IndexVariable(index) => f.write_fmt(format_args!("{index}")),
                Node::Abstraction { bound, body } => {
                    f.write_fmt(format_args!("(λ {bound} "))?;
                    fmt_rec(store, *body, f)?;
                    f.write_str(")")
                }
                Node::PureAbstraction(body) => {
                    f.write_str("(λ ")?;
                    fmt_rec(store, *body, f)?;
                    f.write_str(")")
                }
                Node::Application { lhs, rhs } => {
                    f.write_str("(")?;
                    fmt_rec(store, *lhs, f)?;
                    f.write_str(" ")?;
                    fmt_rec(store, *rhs, f)?;
                    f.write_str(")")
                }
            }
        }
        fmt_rec(self.store, self.root, f)
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.store().display(self.root()), f)
    }
}

/// Drops layout whitespace, so that S-expressions compare equal regardless
/// of line breaks and of spacing around parentheses.
pub fn minified(s: &str) -> String {
    let is_paren = |c: char| matches!(c, '(' | ')');
    let mut out = String::with_capacity(s.len());
    let mut gap = false;
    for c in s.chars() {
        if c.is_whitespace() {
            gap = true;
            continue;
        }
        if gap && !is_paren(c) && !out.is_empty() && !out.ends_with(is_paren) {
            out.push(' ');
        }
        gap = false;
        out.push(c);
    }
    out
}

/// Binder names for readback: `a`..`z`, then `a1`..`z1`, and so on,
/// skipping anything used as a free name. The binder at depth `d` always
/// gets the `d`-th name, so no binder shadows another.
struct Binders<'f> {
    taken: HashSet<&'f str>,
    names: Vec<String>,
    next: usize,
}

impl<'f> Binders<'f> {
    fn new(free: &'f FreeVariables) -> Self {
        Self {
            taken: free.iter().map(|(_, x)| x.as_ref()).collect(),
            names: vec![],
            next: 0,
        }
    }

    fn candidate(n: usize) -> String {
        let letter = char::from(b'a' + (n % 26) as u8);
        match n / 26 {
            0 => letter.to_string(),
            round => format!("{letter}{round}"),
        }
    }

    fn at_depth(&mut self, depth: usize) -> &str {
        while self.names.len() <= depth {
            let name = Self::candidate(self.next);
            self.next += 1;
            if !self.taken.contains(name.as_str()) {
                self.names.push(name);
            }
        }
        &self.names[depth]
    }
}

/// Renders an index tree as parseable source, naming free variables through
/// `free` and inventing binder names that cannot capture them.
pub fn readback(tree: &Tree, free: &FreeVariables) -> String {
    fn rec(
        store: &Store,
        id: NodeId,
        depth: usize,
        binders: &mut Binders<'_>,
        free: &FreeVariables,
        out: &mut String,
    ) {
        match store.get(id) {
            Node::IndexVariable(k) if *k < depth => {
                out.push_str(binders.at_depth(depth - 1 - k));
            }
            Node::IndexVariable(k) => match free.name_of(k - depth) {
                Some(name) => out.push_str(name),
                None => out.push_str(&format!("?{}", k - depth)),
            },
            Node::PureAbstraction(body) => {
                out.push('λ');
                out.push_str(binders.at_depth(depth));
                out.push('.');
                rec(store, *body, depth + 1, binders, free, out);
            }
            Node::Application { lhs, rhs } => {
                out.push('(');
                rec(store, *lhs, depth, binders, free, out);
                out.push(' ');
                rec(store, *rhs, depth, binders, free, out);
                out.push(')');
            }
            node @ (Node::Variable(_) | Node::Abstraction { .. }) => {
                unreachable!("readback of a named node: {node:?}")
            }
        }
    }
    let mut binders = Binders::new(free);
    let mut out = String::new();
    rec(tree.store(), tree.root(), 0, &mut binders, free, &mut out);
    out
}
