//! The `folkb` CLI: parse arguments, dispatch a command, print a result
//! line. `clap` handles argument parsing and `tracing` handles logging.

mod options;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use tracing::{error, instrument};
use tracing_subscriber::EnvFilter;

use crate::error::{FormulaError, PersistError, SyntaxError};
use crate::kb::{KnowledgeBase, Provenance};
use crate::parser::parse_formula;
use crate::persist;

pub use options::{Cli, Command};

/// Parses arguments, installs the `tracing` subscriber, runs the
/// requested command, and persists the fact list on the way out.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    let mut kb = match load(cli.persist.as_deref()) {
        Ok(kb) => kb.with_max_steps(cli.max_steps),
        Err(err) => {
            error!(%err, "failed to load persisted facts");
            return ExitCode::FAILURE;
        }
    };

    let command_failed = dispatch(&cli.command, &mut kb).is_err();

    let persist_failed = match &cli.persist {
        Some(path) => save(path, &kb).is_err(),
        None => false,
    };

    if persist_failed || (cli.persist.is_some() && command_failed) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn install_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[instrument]
fn load(path: Option<&std::path::Path>) -> Result<KnowledgeBase, PersistError> {
    match path {
        Some(path) => Ok(KnowledgeBase::from_facts(persist::load(path)?)),
        None => Ok(KnowledgeBase::new()),
    }
}

#[instrument(skip(kb))]
fn save(path: &PathBuf, kb: &KnowledgeBase) -> Result<(), PersistError> {
    persist::save(path, &kb.facts())
}

/// Dispatches one CLI command. Returns `Err` if the formula failed to
/// parse or was ill-formed — every failure path prints a single line to
/// stderr and never panics (`spec.md` §7).
fn dispatch(command: &Command, kb: &mut KnowledgeBase) -> Result<(), ()> {
    match command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::List => {
            print_list(kb);
            Ok(())
        }
        Command::Axiom { formula } => run_axiom(formula, kb),
        Command::Lemma { formula } => run_lemma(formula, kb),
        Command::Prove { formula } => run_prove(formula, kb),
        Command::Query { formula } => run_query(formula, kb),
    }
}

fn print_help() {
    println!("Usage: folkb [-v | -vv] [--persist <path>] [--max-steps <n>] <command> [<args>]");
    println!();
    println!("commands:");
    println!("  help              print this message");
    println!("  list              list every asserted axiom and proven lemma");
    println!("  axiom <formula>   assert a formula unconditionally");
    println!("  lemma <formula>   assert a formula iff it can be proven");
    println!("  prove <formula>   check whether a formula is entailed");
    println!("  query <formula>   find a witness substitution for an existential formula");
}

fn print_list(kb: &KnowledgeBase) {
    for fact in kb.list() {
        let tag = match fact.provenance {
            Provenance::Axiom => "axiom",
            Provenance::Lemma => "lemma",
        };
        println!("{tag}: {}", fact.formula);
    }
}

fn parse(formula: &str) -> Result<crate::expr::Node, ()> {
    parse_formula(formula).map_err(|err| {
        let err = SyntaxError::from(err);
        eprintln!("{err}");
    })
}

fn report_formula_error(err: FormulaError) {
    eprintln!("{err}");
}

fn run_axiom(formula: &str, kb: &mut KnowledgeBase) -> Result<(), ()> {
    let phi = parse(formula)?;
    kb.add_axiom(phi).map_err(report_formula_error)?;
    println!("asserted");
    Ok(())
}

fn run_lemma(formula: &str, kb: &mut KnowledgeBase) -> Result<(), ()> {
    let phi = parse(formula)?;
    let asserted = kb.add_lemma(phi).map_err(report_formula_error)?;
    if asserted {
        println!("proven, asserted");
    } else {
        println!("not proven, not asserted");
    }
    Ok(())
}

fn run_prove(formula: &str, kb: &KnowledgeBase) -> Result<(), ()> {
    let phi = parse(formula)?;
    let entailed = kb.prove(phi).map_err(report_formula_error)?;
    println!("{}", if entailed { "entailed" } else { "not entailed" });
    Ok(())
}

fn run_query(formula: &str, kb: &KnowledgeBase) -> Result<(), ()> {
    let phi = parse(formula)?;
    match kb.query(phi).map_err(report_formula_error)? {
        Some(witness) if witness.is_empty() => println!("entailed, no free variables to witness"),
        Some(witness) => {
            for (var, term) in witness.iter() {
                println!("{var} = {term}");
            }
        }
        None => println!("no witness"),
    }
    Ok(())
}
