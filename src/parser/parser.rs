//! Recursive-descent parser producing [`Node`] directly, rather than
//! building an intermediate `tree`/`token` representation resolved
//! against a separate name context — [`Symbol`] needs no side name
//! table, so the parser can build the final AST in one pass.
//!
//! Grammar (`spec.md` §6), precedence lowest to highest:
//!
//! ```text
//! formula    := quantified | biimp
//! quantified := quant ( ',' quantified )? ':' formula
//! quant      := ('*' | '?') ident
//! biimp      := implication ( '<=>' formula )?
//! implication:= disjunction ( '=>' formula )?
//! disjunction:= conjunction ( '|' disjunction )?
//! conjunction:= negation ( '&' conjunction )?
//! negation   := '!' negation | atom
//! atom       := '(' formula ')' | term ( '=' term | '!=' term )?
//! term       := ident ( '(' term ( ',' term )* ')' )?
//! ```
//!
//! A bare `term` that is not followed by `=`/`!=` and is not itself a
//! predicate application (i.e. a lowercase-headed `ident(...)`) is not a
//! formula — `atom` rejects it with a syntax error, matching `spec.md`
//! §7's "ill-formed formula" class for input that is syntactically a
//! term where a formula was expected.

use crate::expr::{Node, Quantifier, Symbol};

use super::coord::InputCoord;
use super::error::Error;
use super::lexer::Lexer;
use super::token::{TKind, Token};

pub struct Parser<I>
where
    I: Iterator<Item = char>,
{
    lexer: Lexer<I>,
    la: Option<Token>,
}

impl<I> Parser<I>
where
    I: Iterator<Item = char>,
{
    pub fn new(itr: I) -> Self {
        let mut lexer = Lexer::new(itr);
        let la = lexer.token();
        Self { lexer, la }
    }

    fn pos(&self) -> InputCoord {
        self.la.as_ref().map(|t| t.from).unwrap_or_else(|| self.lexer.pos())
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.token();
        std::mem::replace(&mut self.la, next).expect("advance called at end of input")
    }

    fn kind(&self) -> Option<TKind> {
        self.la.as_ref().map(|t| t.kind)
    }

    fn err_here(&self, msg: impl Into<String>) -> Error {
        let at = self.pos();
        Error { msg: msg.into(), from: at, to: at }
    }

    fn expect(&mut self, kind: TKind, what: &str) -> Result<Token, Error> {
        if self.kind() == Some(kind) {
            Ok(self.advance())
        } else {
            Err(self.err_here(format!("expected {what}")))
        }
    }

    fn eat(&mut self, kind: TKind) -> bool {
        if self.kind() == Some(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Parses a complete formula, requiring the whole input to be consumed.
    pub fn parse_formula(&mut self) -> Result<Node, Error> {
        let phi = self.formula()?;
        if self.la.is_some() {
            return Err(self.err_here("trailing input after formula"));
        }
        Ok(phi)
    }

    fn formula(&mut self) -> Result<Node, Error> {
        if matches!(self.kind(), Some(TKind::Star | TKind::Quest)) {
            self.quantified()
        } else {
            self.biimp()
        }
    }

    fn quantified(&mut self) -> Result<Node, Error> {
        let mut binders = Vec::new();
        loop {
            let q = match self.kind() {
                Some(TKind::Star) => Quantifier::ForAll,
                Some(TKind::Quest) => Quantifier::Exists,
                _ => return Err(self.err_here("expected '*' or '?'")),
            };
            self.advance();
            let name = self.ident_symbol()?;
            binders.push((q, name));
            if !self.eat(TKind::Comma) {
                break;
            }
        }
        self.expect(TKind::Colon, "':' after quantifier list")?;
        let mut body = self.formula()?;
        for (q, v) in binders.into_iter().rev() {
            body = Node::quantified(q, v, body);
        }
        Ok(body)
    }

    fn biimp(&mut self) -> Result<Node, Error> {
        let lhs = self.implication()?;
        if self.eat(TKind::Iff) {
            let rhs = self.formula()?;
            Ok(Node::equiv(vec![lhs, rhs]))
        } else {
            Ok(lhs)
        }
    }

    fn implication(&mut self) -> Result<Node, Error> {
        let lhs = self.disjunction()?;
        if self.eat(TKind::Implies) {
            let rhs = self.formula()?;
            Ok(Node::implies(lhs, rhs))
        } else {
            Ok(lhs)
        }
    }

    fn disjunction(&mut self) -> Result<Node, Error> {
        let lhs = self.conjunction()?;
        if self.eat(TKind::Bar) {
            let rhs = self.disjunction()?;
            Ok(Node::or(vec![lhs, rhs]))
        } else {
            Ok(lhs)
        }
    }

    fn conjunction(&mut self) -> Result<Node, Error> {
        let lhs = self.negation()?;
        if self.eat(TKind::Amp) {
            let rhs = self.conjunction()?;
            Ok(Node::and(vec![lhs, rhs]))
        } else {
            Ok(lhs)
        }
    }

    fn negation(&mut self) -> Result<Node, Error> {
        if self.eat(TKind::Excl) {
            Ok(Node::not(self.negation()?))
        } else {
            self.atom()
        }
    }

    fn atom(&mut self) -> Result<Node, Error> {
        if self.eat(TKind::LPar) {
            let phi = self.formula()?;
            self.expect(TKind::RPar, "')'")?;
            return Ok(phi);
        }

        let t = self.term()?;
        if t.is_atom() {
            // A lowercase-headed application already parsed as a predicate
            // — that is itself a formula.
            return Ok(t);
        }

        if self.eat(TKind::Eq) {
            let rhs = self.term()?;
            return Ok(Node::equality(t, rhs));
        }
        if self.eat(TKind::NEq) {
            let rhs = self.term()?;
            return Ok(Node::not(Node::equality(t, rhs)));
        }

        Err(self.err_here("expected a formula, found a bare term"))
    }

    /// A term: a constant, a variable, or a function/predicate application.
    /// The leading case of the identifier decides the shape — uppercase or
    /// digit leads a `Constant`/`Function`, lowercase leads a
    /// `Variable`/`Predicate` (`spec.md` §6).
    fn term(&mut self) -> Result<Node, Error> {
        let name = self.ident_symbol()?;
        if self.eat(TKind::LPar) {
            let mut args = vec![self.term()?];
            while self.eat(TKind::Comma) {
                args.push(self.term()?);
            }
            self.expect(TKind::RPar, "')'")?;
            if name.starts_uppercase_or_digit() {
                Ok(Node::func(name, args))
            } else {
                Ok(Node::pred(name, args))
            }
        } else if name.starts_uppercase_or_digit() {
            Ok(Node::constant(name))
        } else {
            Ok(Node::var(name))
        }
    }

    fn ident_symbol(&mut self) -> Result<Symbol, Error> {
        let tok = self.expect(TKind::Ident, "an identifier")?;
        let sym = Symbol::new(&tok.text);
        if sym.is_reserved() {
            return Err(Error {
                msg: format!("`{sym}` uses the reserved `_` prefix"),
                from: tok.from,
                to: tok.to,
            });
        }
        Ok(sym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Node, Error> {
        Parser::new(src.chars()).parse_formula()
    }

    #[test]
    fn parses_predicate_application() {
        let n = parse("human(Socrates)").unwrap();
        assert_eq!(n, Node::pred("human", vec![Node::constant("Socrates")]));
    }

    #[test]
    fn parses_implication_with_universal() {
        let n = parse("*x: human(x) => mortal(x)").unwrap();
        let expected = Node::forall(
            "x",
            Node::implies(
                Node::pred("human", vec![Node::var("x")]),
                Node::pred("mortal", vec![Node::var("x")]),
            ),
        );
        assert_eq!(n, expected);
    }

    #[test]
    fn parses_nested_quantifier_list() {
        let n = parse("*x, ?y: loyal(x,y)").unwrap();
        let expected = Node::forall("x", Node::exists("y", Node::pred("loyal", vec![Node::var("x"), Node::var("y")])));
        assert_eq!(n, expected);
    }

    #[test]
    fn parses_equality_and_negated_equality() {
        assert_eq!(
            parse("x = y").unwrap(),
            Node::equality(Node::var("x"), Node::var("y"))
        );
        assert_eq!(
            parse("x != y").unwrap(),
            Node::not(Node::equality(Node::var("x"), Node::var("y")))
        );
    }

    #[test]
    fn rejects_bare_term_as_formula() {
        assert!(parse("x").is_err());
    }

    #[test]
    fn rejects_reserved_prefix() {
        assert!(parse("p(_v1)").is_err());
    }

    #[test]
    fn respects_conjunction_over_disjunction_precedence() {
        let n = parse("a(X) | b(X) & c(X)").unwrap();
        let expected = Node::or(vec![
            Node::pred("a", vec![Node::constant("X")]),
            Node::and(vec![
                Node::pred("b", vec![Node::constant("X")]),
                Node::pred("c", vec![Node::constant("X")]),
            ]),
        ]);
        assert_eq!(n, expected);
    }
}
