//! Crate-wide error types (`spec.md` §7). `NotUnifiable`
//! ([`crate::uni::NotUnifiable`]) and `NotInferable` (internal to
//! [`crate::res`]) are deliberately not wrapped here — §7 states those
//! two are recoverable signals internal to the prover and must never
//! surface to a caller.

use thiserror::Error;

/// The surface-grammar parser rejected the input. Carries only a
/// human-readable, position-tagged message — no partial tree.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct SyntaxError(#[from] pub crate::parser::Error);

/// A structurally valid [`crate::expr::Node`] tree that is not a
/// well-formed formula (`spec.md` §3's `is_formula` predicate is false),
/// e.g. a bare term passed where `prove`/`query`/`add_axiom` expects a
/// formula. Raised at the inference entry point.
#[derive(Debug, Error)]
#[error("not a well-formed formula: {0}")]
pub struct FormulaError(pub String);

impl FormulaError {
    pub fn new(msg: impl Into<String>) -> Self {
        FormulaError(msg.into())
    }
}

/// Persistence failed, either reading or writing the fact-list file
/// (`spec.md` §6.2).
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("persisted record is not a well-formed node: {0}")]
    Malformed(String),
    #[error("file extension not recognized as json or yaml, and the content parses as neither")]
    UnknownFormat,
}
