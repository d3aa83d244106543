//! Resolution/paramodulation prover: predicate indexing for clause
//! storage, and the saturation-based refutation search.

mod index;
mod infer;

pub use index::{index_clause, PredicateIndex};
pub use infer::{infer, infer_bounded};
