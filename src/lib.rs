/// Expression trees: the immutable FOL AST and structural normalization.
pub mod expr;

/// Substitution algebra: variable-to-term maps, application, composition.
pub mod subst;

/// Unification: Robinson's most-general-unifier over terms/atoms.
pub mod uni;

/// Normal forms: the tree-walk engine, the seven-pass CNF pipeline, and
/// clause extraction.
pub mod nf;

/// Resolution/paramodulation prover: predicate indexing and the
/// saturation loop.
pub mod res;

/// Surface-syntax pretty-printer (`Display` for [`expr::Node`]).
pub mod fmt;

/// Concrete-syntax parser (lexer + recursive-descent parser).
pub mod parser;

/// Fact-list persistence (the `{ kind: { Value, Children } }` record
/// format, loadable as either YAML or JSON).
pub mod persist;

/// Crate-wide error types.
pub mod error;

/// The `KnowledgeBase` facade: `add_axiom`, `add_lemma`, `prove`, `query`.
pub mod kb;

/// The `folkb` CLI: argument parsing, verbosity, persistence wiring.
pub mod app;
