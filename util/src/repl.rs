use std::path::Path;

use rustyline::{error::ReadlineError, Editor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Readline(ReadlineError),
    #[error("Eval failed: {0:?}")]
    EvalError(E),
}

pub trait Repl {
    type Error: std::fmt::Debug;
    const PROMPT: &'static str = ">> ";
    const GREETING: Option<&'static str> = None;

    /// Where to keep the line history between sessions, if anywhere.
    fn history(&self) -> Option<&Path> {
        None
    }
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error>;
}

/// Joins physical lines ending with `\` into one logical input.
#[derive(Default, Debug)]
struct Pending(Option<String>);

impl Pending {
    fn push_continued(&mut self, mut line: String) {
        line.pop();
        line.push('\n');
        match self.0.as_mut() {
            Some(input) => input.push_str(&line),
            None => self.0 = Some(line),
        }
    }

    fn finish(&mut self, line: String) -> String {
        match self.0.take() {
            Some(mut input) => {
                input.push_str(&line);
                input
            }
            None => line,
        }
    }
}

pub fn start_repl<R: Repl>(mut repl: R) -> Result<(), Error<R::Error>> {
    let mut editor = Editor::<()>::new();
    if let Some(history) = repl.history() {
        if let Err(e) = editor.load_history(history) {
            tracing::debug!("no history loaded from {}: {e}", history.display());
        }
    }
    if let Some(greeting) = R::GREETING {
        println!("{greeting}");
        println!();
    }
    let mut pending = Pending::default();
    loop {
        match editor.readline(R::PROMPT) {
            Ok(line) if line.ends_with('\\') => pending.push_continued(line),
            Ok(line) => {
                let input = pending.finish(line);
                editor.add_history_entry(input.as_str());
                repl.evaluate(input).map_err(Error::EvalError)?;
                if let Some(history) = repl.history() {
                    editor.save_history(history).map_err(Error::Readline)?;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                break Ok(());
            }
            Err(e) => break Err(Error::Readline(e)),
        }
    }
}
