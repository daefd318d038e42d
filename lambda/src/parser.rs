use chumsky::prelude::*;

use crate::{
    ast::Term,
    lang::{is_delimiter, Token},
    prelude::*,
    store::Tree,
};

pub trait SimpleParser<I: Clone + std::hash::Hash, O>:
    Parser<I, O, Error = Error<I>> + Clone
{
    #[allow(clippy::type_complexity)]
    fn spanned(self) -> chumsky::combinator::MapWithSpan<Self, fn(O, Span) -> Spanned<O>, O>
    where
        Self: Sized,
        I: std::cmp::Eq,
    {
        self.map_with_span(|value, span| Spanned { span, value })
    }
}
impl<I: Clone + std::hash::Hash, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = Error<I>> + Clone
{
}

pub fn lexer() -> impl SimpleParser<char, Vec<Spanned<Token>>> {
    let symbols = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('.').to(Token::Dot),
        just('λ').to(Token::Lambda),
        just('\\').to(Token::Lambda),
    ));
    // Anything up to the next delimiter is one word, so `-7`, `+` and
    // `free_var` are all identifiers.
    let word = filter(|c: &char| !is_delimiter(*c))
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|word| match word.as_str() {
            "let" => Token::Let,
            "in" => Token::In,
            "=" => Token::Equal,
            _ => Token::Ident(Identifier::from(word.as_str())),
        });
    let token = choice((symbols, word));
    text::whitespace()
        .ignore_then(token.spanned().padded().repeated())
        .then_ignore(end())
}

fn term_parser() -> impl SimpleParser<Token, Term> {
    recursive(|term: Recursive<_, Term, _>| {
        let ident = select! { Token::Ident(ident) => ident };

        let variable = ident.clone().map(Term::Variable).labelled("variable");

        // λx. term
        let abstraction = just(Token::Lambda)
            .ignore_then(ident.clone())
            .then_ignore(just(Token::Dot))
            .then(term.clone())
            .map(|(bound, body)| Term::Abstraction(bound, body.into()))
            .labelled("abstraction");

        // let x = term in term
        let let_in = just(Token::Let)
            .ignore_then(ident)
            .then_ignore(just(Token::Equal))
            .then(term.clone())
            .then_ignore(just(Token::In))
            .then(term.clone())
            .map(|((bound, value), body)| {
                Term::Application(
                    Term::Abstraction(bound, body.into()).into(),
                    value.into(),
                )
            })
            .labelled("let");

        // (term term ...)
        let group = term
            .clone()
            .then(term.repeated())
            .foldl(|lhs, rhs| Term::Application(lhs.into(), rhs.into()))
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .labelled("application");

        choice((variable, abstraction, let_in, group))
    })
    .labelled("term")
}

pub fn tokenize(s: &str) -> Result<Vec<Spanned<Token>>, Vec<Error<String>>> {
    lexer().parse(s).map_err(|es| {
        es.into_iter()
            .map(|e| e.map(|e| e.to_string()))
            .collect::<Vec<_>>()
    })
}

pub fn parse_term(s: &str) -> Result<Term, Vec<Error<String>>> {
    let len = s.chars().count();
    let eoi = Span {
        start: len,
        end: len + 1,
    };
    let tokens = tokenize(s)?;
    term_parser()
        .then_ignore(end())
        .parse(chumsky::Stream::from_iter(
            eoi,
            tokens
                .into_iter()
                .map(|Spanned { span, value }| (value, span)),
        ))
        .map_err(|es| {
            es.into_iter()
                .map(|e| e.map(|e| e.to_string()))
                .collect::<Vec<_>>()
        })
}

/// Parses `s` into a named tree held in a fresh store.
pub fn parse(s: &str) -> Result<Tree, Vec<Error<String>>> {
    Ok(parse_term(s)?.lower())
}

#[cfg(test)]
mod test {
    use super::{Term::*, *};
    use crate::ast::TermRef;

    fn lex(s: &str) -> Result<Vec<Token>, Vec<Error<String>>> {
        Ok(tokenize(s)?
            .iter()
            .map(Spanned::value)
            .cloned()
            .collect::<Vec<_>>())
    }

    fn var(x: &str) -> TermRef {
        Variable(x.into()).into()
    }

    #[test]
    fn test_lexer() {
        assert_eq!(
            lex(r"(\x.x λy.y)").unwrap(),
            vec![
                Token::LParen,
                Token::Lambda,
                Token::Ident("x".into()),
                Token::Dot,
                Token::Ident("x".into()),
                Token::Lambda,
                Token::Ident("y".into()),
                Token::Dot,
                Token::Ident("y".into()),
                Token::RParen,
            ]
        );
        assert_eq!(
            lex("let a = -7 in letter").unwrap(),
            vec![
                Token::Let,
                Token::Ident("a".into()),
                Token::Equal,
                Token::Ident("-7".into()),
                Token::In,
                Token::Ident("letter".into()),
            ]
        );
        assert_eq!(lex("альфа").unwrap(), vec![Token::Ident("альфа".into())]);
        assert_eq!(lex("   ").unwrap(), vec![]);
        assert_eq!(lex("\n").unwrap(), vec![]);
        assert_eq!(lex("").unwrap(), vec![]);
        assert_eq!(lex(" x ").unwrap(), vec![Token::Ident("x".into())]);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("(f  g)").unwrap();
        let spans = tokens.iter().map(Spanned::span).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..1, 1..2, 4..5, 5..6]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_term("x").unwrap(), Variable("x".into()));
        assert_eq!(
            parse_term("λx.λy.(x y)").unwrap(),
            Abstraction(
                "x".into(),
                Abstraction("y".into(), Application(var("x"), var("y")).into()).into()
            )
        );
        assert_eq!(
            parse_term("(f g h)").unwrap(),
            Application(Application(var("f"), var("g")).into(), var("h"))
        );
        assert_eq!(parse_term("((x))").unwrap(), Variable("x".into()));
        assert_eq!(
            parse_term("let u = y in λv.(u x)").unwrap(),
            parse_term("((λu.λv.(u x)) y)").unwrap()
        );
    }

    #[test]
    fn test_abstraction_body_is_one_term() {
        // Inside a group the body stops at the first complete term, so the
        // rest of the group applies the abstraction.
        assert_eq!(
            parse_term("(λx.x y)").unwrap(),
            Application(Abstraction("x".into(), var("x")).into(), var("y"))
        );
        assert_eq!(
            parse_term("λx.(x y)").unwrap(),
            Abstraction("x".into(), Application(var("x"), var("y")).into())
        );
        let term = parse_term("(λx.x y)").unwrap();
        assert_eq!(parse_term(&term.to_string()).unwrap(), term);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_term("(λx.x").is_err());
        assert!(parse_term("x y").is_err());
        assert!(parse_term("λ.x").is_err());
        assert!(parse_term("let x = y").is_err());
        assert!(parse_term("").is_err());
        assert!(parse_term("()").is_err());
    }
}
