//! Concrete-syntax parser: lexer + recursive-descent parser producing
//! [`crate::expr::Node`] directly. No `ParseContext`/name-table façade is
//! needed — [`Symbol`] carries its own name, so there is no side table to
//! thread through a parse call.

mod coord;
mod error;
mod input;
mod lexer;
mod parser;
mod token;

pub use error::Error;
pub use input::Input;

use crate::expr::Node;
use parser::Parser;

/// Parses `input` as a single formula. The entire input must be consumed
/// by one well-formed formula — trailing tokens are a syntax error.
pub fn parse_formula<S>(input: S) -> Result<Node, Error>
where
    S: Input,
{
    Parser::new(input.char_stream()).parse_formula()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_str() {
        assert!(parse_formula("p(A)").is_ok());
    }

    #[test]
    fn reports_position_of_syntax_error() {
        let err = parse_formula("p(A") .unwrap_err();
        assert!(err.to_string().contains(':'));
    }
}
