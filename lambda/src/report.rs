//! Syntax error rendering.

use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};

use crate::prelude::*;

const END_OF_INPUT: &str = "end of the input";

pub fn build_report(e: &Error) -> Report<Span> {
    use chumsky::error::SimpleReason;
    let report = Report::build(ReportKind::Error, (), e.span().start);
    let found = e.found().map(String::as_str).unwrap_or(END_OF_INPUT);
    match e.reason() {
        SimpleReason::Unexpected => {
            let expected = e
                .expected()
                .map(|t| t.as_ref().map(String::as_str).unwrap_or(END_OF_INPUT))
                .collect::<Vec<_>>()
                .join(", ");
            let expected = if expected.is_empty() {
                "something else"
            } else {
                &expected
            };
            let message = match e.label() {
                Some(label) => format!("Unexpected {found} in {label}, expected {expected}"),
                None => format!("Unexpected {found}, expected {expected}"),
            };
            report.with_message(message).with_label(
                Label::new(e.span())
                    .with_message(format!("Unexpected {}", found.fg(Color::Red)))
                    .with_color(Color::Red),
            )
        }
        SimpleReason::Unclosed { span, delimiter } => report
            .with_message(format!("Unclosed delimiter {}", delimiter.fg(Color::Yellow)))
            .with_label(
                Label::new(span.clone())
                    .with_message(format!("Opened here {}", delimiter.fg(Color::Yellow)))
                    .with_color(Color::Yellow),
            )
            .with_label(
                Label::new(e.span())
                    .with_message(format!("Must be closed before this {}", found.fg(Color::Red)))
                    .with_color(Color::Red),
            ),
        SimpleReason::Custom(msg) => report.with_message(msg).with_label(
            Label::new(e.span())
                .with_message(format!("{}", msg.fg(Color::Red)))
                .with_color(Color::Red),
        ),
    }
    .finish()
}

/// Prints every error against `input` to stderr.
pub fn eprint(input: &str, errors: &[Error]) -> std::io::Result<()> {
    for e in errors {
        build_report(e).eprint(Source::from(input))?;
    }
    Ok(())
}
