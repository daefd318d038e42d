use crate::prelude::*;

#[derive(PartialEq, Eq, Hash, Clone, derive_more::Display, Debug)]
pub enum Token {
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
    #[display(fmt = ".")]
    Dot,
    #[display(fmt = "λ")]
    Lambda,
    #[display(fmt = "let")]
    Let,
    #[display(fmt = "in")]
    In,
    #[display(fmt = "=")]
    Equal,
    #[display(fmt = "{_0}")]
    Ident(Identifier),
}

/// Characters that end an identifier.
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '.' | 'λ' | '\\')
}
