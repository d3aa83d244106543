//! Normal-form machinery: the tree-walk engine shared by every CNF stage,
//! the seven-pass CNF conversion pipeline, and clause extraction.

mod clause;
mod cnf;
mod walk;

pub use clause::{to_clause_form, Clause, Literal};
pub use cnf::{to_cnf, to_cnf_with_generator};
