//! Robinson's most-general-unifier over terms/atoms, following a
//! three-case recursive algorithm directly rather than an explicit
//! G-set/U-map transformation loop, with the occurs-check inlined into
//! the variable-binding case.

use crate::expr::{Node, Symbol};
use crate::subst::{apply, compose, occurs_in, Substitution};

/// A recoverable signal inside the prover — never surfaces to the user
/// (`spec.md` §7). Carries no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotUnifiable;

/// Unifies `p` and `q`, returning their most general unifier.
pub fn unify(p: &Node, q: &Node) -> Result<Substitution, NotUnifiable> {
    match (p, q) {
        (Node::Constant(a), Node::Constant(b)) => {
            if a == b {
                Ok(Substitution::new())
            } else {
                Err(NotUnifiable)
            }
        }
        (Node::Variable(v), _) => unify_var(v, q),
        (_, Node::Variable(v)) => unify_var(v, p),
        (Node::Function(f, fs), Node::Function(g, gs)) if f == g && fs.len() == gs.len() => {
            unify_args(fs, gs)
        }
        (Node::Predicate(f, fs), Node::Predicate(g, gs)) if f == g && fs.len() == gs.len() => {
            unify_args(fs, gs)
        }
        _ => Err(NotUnifiable),
    }
}

fn unify_var(v: &Symbol, q: &Node) -> Result<Substitution, NotUnifiable> {
    if let Node::Variable(qv) = q {
        if qv == v {
            return Ok(Substitution::new());
        }
    }
    if occurs_in(v, q) {
        return Err(NotUnifiable);
    }
    Ok(Substitution::singleton(v.clone(), q.clone()))
}

fn unify_args(xs: &[Node], ys: &[Node]) -> Result<Substitution, NotUnifiable> {
    let mut sigma = Substitution::new();
    for (x, y) in xs.iter().zip(ys.iter()) {
        let x = apply(x, &sigma);
        let y = apply(y, &sigma);
        let step = unify(&x, &y)?;
        sigma = compose(&sigma, &step);
    }
    Ok(sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_function_arguments() {
        let p = Node::func("F", vec![Node::var("x"), Node::constant("A")]);
        let q = Node::func("F", vec![Node::constant("B"), Node::var("y")]);
        let sigma = unify(&p, &q).expect("should unify");
        assert_eq!(apply(&p, &sigma), apply(&q, &sigma));
    }

    #[test]
    fn occurs_check_rejects_self_reference() {
        let v = Node::var("x");
        let t = Node::func("F", vec![Node::var("x")]);
        assert!(unify(&v, &t).is_err());
    }

    #[test]
    fn mismatched_arity_fails() {
        let p = Node::pred("p", vec![Node::var("x")]);
        let q = Node::pred("p", vec![Node::var("x"), Node::var("y")]);
        assert!(unify(&p, &q).is_err());
    }
}
