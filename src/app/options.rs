//! Command-line surface, defined with `clap`'s derive API.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folkb")]
#[command(about = "A first-order logic knowledge base with automated theorem proving")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (`-v` = info, `-vv` = debug).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Load the fact list from this path on startup and save it back on
    /// clean exit (`spec.md` §6.2). YAML unless the path ends `.json`.
    #[arg(long, global = true)]
    pub persist: Option<PathBuf>,

    /// Give up a `prove`/`query`/`lemma` search after this many derived
    /// clauses, rather than running until saturation (`spec.md` §5).
    #[arg(long, global = true)]
    pub max_steps: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print usage information.
    Help,
    /// List every asserted axiom and proven lemma.
    List,
    /// Assert a formula unconditionally.
    Axiom { formula: String },
    /// Assert a formula iff it can be proven from the current facts.
    Lemma { formula: String },
    /// Check whether a formula is entailed by the current facts.
    Prove { formula: String },
    /// Find a witness substitution for an existentially quantified formula.
    Query { formula: String },
}
