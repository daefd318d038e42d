use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser as _;
use lambda::{
    compact::compact,
    config::{self, Config},
    eval::{self, Outcome},
    logging, parser,
    printer::readback,
    report,
    resolve::Resolved,
    Evaluation,
};
use util::repl;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Untyped lambda calculus, reduced to weak head normal form")]
struct Cli {
    /// Give up after this many reduction steps; 0 reduces without a budget.
    #[arg(long, default_value_t = config::DEFAULT_STEP_LIMIT)]
    step_limit: usize,
    /// File to keep the REPL history in.
    #[arg(long, default_value = config::DEFAULT_HISTORY)]
    history: PathBuf,
    /// Log more; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Evaluate one expression and exit instead of starting the REPL.
    #[arg(short, long)]
    eval: Option<String>,
}

type CommandResult<'a> = Result<(), (&'a str, Vec<lambda::prelude::Error>)>;

struct Repl {
    config: Config,
}

impl Repl {
    fn tokenize(input: &str) -> CommandResult<'_> {
        let tokens = parser::tokenize(input).map_err(|es| (input, es))?;
        let tokens = tokens
            .iter()
            .map(|token| token.value().to_string())
            .collect::<Vec<_>>();
        println!("{}", tokens.join(" "));
        Ok(())
    }

    fn parse(input: &str) -> CommandResult<'_> {
        let tree = parser::parse(input).map_err(|es| (input, es))?;
        println!("{tree}");
        Ok(())
    }

    fn resolve(input: &str) -> CommandResult<'_> {
        let Resolved { tree, .. } = resolved(input)?;
        println!("{tree}");
        Ok(())
    }

    fn free(input: &str) -> CommandResult<'_> {
        let Resolved { free, .. } = resolved(input)?;
        if free.is_empty() {
            println!("no free variables");
        }
        for (id, name) in free.iter() {
            println!("{id}: {name}");
        }
        Ok(())
    }

    fn step(input: &str) -> CommandResult<'_> {
        let Resolved { mut tree, free } = resolved(input)?;
        let root = tree.root();
        match eval::step(tree.store_mut(), root) {
            Some(redex) => {
                println!("{tree}");
                println!("{}", readback(&tree, &free));
                tracing::info!(%redex, "contracted one redex");
            }
            None => println!("already in weak head normal form"),
        }
        Ok(())
    }

    fn evaluate<'i>(&self, input: &'i str) -> CommandResult<'i> {
        let evaluation =
            lambda::evaluate(input, self.config.step_limit).map_err(with_input(input))?;
        show(&evaluation);
        Ok(())
    }

    fn compact<'i>(&self, input: &'i str) -> CommandResult<'i> {
        let evaluation =
            lambda::evaluate(input, self.config.step_limit).map_err(with_input(input))?;
        let (tree, report) = compact(&evaluation.tree);
        println!("{tree}");
        println!(
            "{} live nodes, {} freed",
            report.live_nodes, report.freed_nodes
        );
        Ok(())
    }

    fn show_help() {
        println!(
            "{}",
            r#"
term                -- same as :eval term
:tokenize   term    -- show the tokens of the term
:parse      term    -- show the named tree
:resolve    term    -- show the de Bruijn indexed tree
:free       term    -- show the free variable table
:step       term    -- contract the first redex only
:eval       term    -- reduce to weak head normal form
:compact    term    -- reduce, then compact the node store
:help               -- show this message

Syntax: x | λx.term | \x.term | (term term ...) | let x = term in term
End a line with \ to continue on the next one.
        "#
            .trim()
        );
    }

    fn handle_repl_input<'i>(&mut self, input: &'i str) -> CommandResult<'i> {
        let (cmd, input) = if let Some(stripped) = input.strip_prefix(':') {
            stripped
                .trim_start()
                .split_once(' ')
                .unwrap_or((stripped, ""))
        } else {
            ("", input)
        };
        match cmd {
            "to" | "tokenize" => Self::tokenize(input)?,
            "p" | "parse" => Self::parse(input)?,
            "r" | "resolve" => Self::resolve(input)?,
            "f" | "free" => Self::free(input)?,
            "s" | "step" => Self::step(input)?,
            "" | "e" | "eval" | "evaluate" => self.evaluate(input)?,
            "c" | "compact" => self.compact(input)?,
            "h" | "he" | "hel" | "help" => Self::show_help(),
            _ => {
                eprintln!("Unknown command {cmd}");
                Self::show_help();
            }
        }
        Ok(())
    }
}

impl repl::Repl for Repl {
    type Error = anyhow::Error;
    const GREETING: Option<&'static str> =
        Some("Hi, this is an untyped lambda calculus REPL. :h to show help");

    fn history(&self) -> Option<&Path> {
        self.config.history.as_deref()
    }

    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        if input.trim().is_empty() {
            return Ok(());
        }
        if let Err((input, es)) = self.handle_repl_input(&input) {
            report::eprint(input, &es)?;
        }
        Ok(())
    }
}

fn with_input<'i>(
    input: &'i str,
) -> impl FnOnce(lambda::Error) -> (&'i str, Vec<lambda::prelude::Error>) + 'i {
    move |e| match e {
        lambda::Error::Syntax(es) => (input, es),
    }
}

fn resolved(input: &str) -> Result<Resolved, (&str, Vec<lambda::prelude::Error>)> {
    lambda::parse_and_resolve(input).map_err(with_input(input))
}

fn show(evaluation: &Evaluation) {
    println!("{}", evaluation.tree);
    println!("{}", evaluation.readback());
    match evaluation.outcome {
        Outcome::Whnf { steps } => tracing::info!(steps, "reached weak head normal form"),
        Outcome::Exhausted { steps } => {
            eprintln!("Gave up after {steps} steps without reaching weak head normal form")
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config {
        history: Some(cli.history),
        ..Config::default()
    }
    .with_step_limit(cli.step_limit)
    .with_verbosity(cli.verbose);
    logging::init(config.log_level);
    tracing::debug!(?config, "starting");

    if let Some(input) = cli.eval {
        match lambda::evaluate(&input, config.step_limit) {
            Ok(evaluation) => show(&evaluation),
            Err(lambda::Error::Syntax(es)) => {
                report::eprint(&input, &es)?;
                std::process::exit(1);
            }
        }
        return Ok(());
    }
    repl::start_repl(Repl { config })?;
    Ok(())
}
