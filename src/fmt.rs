//! Surface-syntax pretty-printer for [`Node`], following the same
//! operator-precedence parenthesization rule as the parser's grammar
//! (`=>`, `<=>`, `*`/`?` quantifiers, `=`/`!=`), printing directly off
//! [`Symbol`]'s own name rather than resolving through a side name table.

use std::fmt::{self, Display, Formatter};

use crate::expr::{Node, Quantifier};

/// Binding power, lowest to highest; used to decide when a child needs
/// parenthesization under [`Display`].
fn precedence(n: &Node) -> u8 {
    match n {
        Node::Quantified(..) => 0,
        Node::Equals(_) => 1,
        Node::Implies(..) => 2,
        Node::Or(_) => 3,
        Node::And(_) => 4,
        Node::Not(_) => 5,
        _ => 6,
    }
}

fn write_operand(f: &mut Formatter<'_>, parent_prec: u8, child: &Node) -> fmt::Result {
    if precedence(child) < parent_prec {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

fn write_chain(f: &mut Formatter<'_>, cs: &[Node], prec: u8, op: &str) -> fmt::Result {
    for (i, c) in cs.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write_operand(f, prec, c)?;
    }
    Ok(())
}

fn write_args(f: &mut Formatter<'_>, args: &[Node]) -> fmt::Result {
    write!(f, "(")?;
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{a}")?;
    }
    write!(f, ")")
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(s) | Node::Variable(s) => write!(f, "{s}"),
            Node::Function(s, args) | Node::Predicate(s, args) if args.len() == 2 && s.is_eq() => {
                write!(f, "{} = {}", args[0], args[1])
            }
            Node::Function(s, args) | Node::Predicate(s, args) => {
                write!(f, "{s}")?;
                write_args(f, args)
            }
            Node::Not(inner) => {
                if inner.is_equality() {
                    if let Node::Predicate(_, args) = inner.as_ref() {
                        return write!(f, "{} != {}", args[0], args[1]);
                    }
                }
                write!(f, "!")?;
                write_operand(f, precedence(self), inner)
            }
            Node::And(cs) => write_chain(f, cs, precedence(self) + 1, "&"),
            Node::Or(cs) => write_chain(f, cs, precedence(self) + 1, "|"),
            Node::Implies(a, b) => {
                write_operand(f, precedence(self) + 1, a)?;
                write!(f, " => ")?;
                write_operand(f, precedence(self), b)
            }
            Node::Equals(cs) => write_chain(f, cs, precedence(self) + 1, "<=>"),
            Node::Quantified(q, v, body) => {
                let sigil = match q {
                    Quantifier::ForAll => '*',
                    Quantifier::Exists => '?',
                };
                write!(f, "{sigil}{v}: ")?;
                write_operand(f, precedence(self), body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_predicate_application() {
        let n = Node::pred("human", vec![Node::constant("Socrates")]);
        assert_eq!(n.to_string(), "human(Socrates)");
    }

    #[test]
    fn prints_equality_as_infix() {
        let n = Node::equality(Node::var("x"), Node::constant("A"));
        assert_eq!(n.to_string(), "x = A");
    }

    #[test]
    fn prints_negated_equality_as_infix() {
        let n = Node::not(Node::equality(Node::var("x"), Node::constant("A")));
        assert_eq!(n.to_string(), "x != A");
    }

    #[test]
    fn parenthesizes_lower_precedence_operand() {
        let or_inside_and = Node::and(vec![
            Node::or(vec![
                Node::pred("p", vec![Node::constant("A")]),
                Node::pred("q", vec![Node::constant("A")]),
            ]),
            Node::pred("r", vec![Node::constant("A")]),
        ]);
        assert_eq!(or_inside_and.to_string(), "(p(A) | q(A)) & r(A)");
    }

    #[test]
    fn prints_quantifier_with_sigil() {
        let n = Node::forall("x", Node::pred("p", vec![Node::var("x")]));
        assert_eq!(n.to_string(), "*x: p(x)");
    }
}
