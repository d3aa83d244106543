//! Substitution algebra: a finite map from variable names to terms, with
//! application to formulas, composition, and the occurs check. Grounded on
//! `spec.md` §4.2 and `original_source/knowledge_base/unification.py`'s
//! `apply`/`occurs_in` shape.

use std::collections::BTreeMap;

use crate::expr::{Node, Symbol};

/// A substitution: variable symbol → replacement term. Identity entries
/// (`v ↦ Variable(v)`) are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(BTreeMap<Symbol, Node>);

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(v: Symbol, t: Node) -> Self {
        let mut s = Self::new();
        s.insert(v, t);
        s
    }

    pub fn get(&self, v: &Symbol) -> Option<&Node> {
        self.0.get(v)
    }

    pub fn contains_key(&self, v: &Symbol) -> bool {
        self.0.contains_key(v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Node)> {
        self.0.iter()
    }

    pub fn remove(&mut self, v: &Symbol) {
        self.0.remove(v);
    }

    /// Inserts `v ↦ t`, eliding the entry entirely if `t` is `Variable(v)`.
    pub fn insert(&mut self, v: Symbol, t: Node) {
        if matches!(&t, Node::Variable(vv) if *vv == v) {
            self.0.remove(&v);
        } else {
            self.0.insert(v, t);
        }
    }
}

/// True iff `v` occurs as a (strict) subterm of `t`. `occurs_in(v, v)` is
/// false — callers handle the `p == q` case themselves, per `spec.md`
/// §4.2's unification rule ("fails if `occurs_in(p, q)` (when q≠p)").
pub fn occurs_in(v: &Symbol, t: &Node) -> bool {
    match t {
        Node::Variable(_) | Node::Constant(_) => false,
        Node::Function(_, cs) | Node::Predicate(_, cs) => cs.iter().any(|c| match c {
            Node::Variable(s) if s == v => true,
            _ => occurs_in(v, c),
        }),
        Node::Not(c) => occurs_in(v, c),
        Node::And(cs) | Node::Or(cs) | Node::Equals(cs) => cs.iter().any(|c| occurs_in(v, c)),
        Node::Implies(a, b) => occurs_in(v, a) || occurs_in(v, b),
        Node::Quantified(_, _, body) => occurs_in(v, body),
    }
}

/// Returns `n` with every *free* variable `x` replaced by `σ(x)`.
/// Replacement terms are not themselves recursively substituted — the
/// substitution is assumed already resolved by [`compose`].
pub fn apply(n: &Node, sigma: &Substitution) -> Node {
    match n {
        Node::Variable(v) => sigma.get(v).cloned().unwrap_or_else(|| n.clone()),
        Node::Constant(_) => n.clone(),
        Node::Function(s, cs) => Node::Function(s.clone(), cs.iter().map(|c| apply(c, sigma)).collect()),
        Node::Predicate(s, cs) => Node::Predicate(s.clone(), cs.iter().map(|c| apply(c, sigma)).collect()),
        Node::Not(c) => Node::not(apply(c, sigma)),
        Node::And(cs) => Node::And(cs.iter().map(|c| apply(c, sigma)).collect()),
        Node::Or(cs) => Node::Or(cs.iter().map(|c| apply(c, sigma)).collect()),
        Node::Equals(cs) => Node::Equals(cs.iter().map(|c| apply(c, sigma)).collect()),
        Node::Implies(a, b) => Node::Implies(Box::new(apply(a, sigma)), Box::new(apply(b, sigma))),
        Node::Quantified(q, v, body) => {
            // The bound variable shadows any same-named entry in `sigma`
            // for the scope of `body` — substitution must not capture it.
            if sigma.contains_key(v) {
                let mut inner = sigma.clone();
                inner.remove(v);
                Node::Quantified(*q, v.clone(), Box::new(apply(body, &inner)))
            } else {
                Node::Quantified(*q, v.clone(), Box::new(apply(body, sigma)))
            }
        }
    }
}

/// Returns the substitution `ρ` such that `apply(t, ρ) = apply(apply(t, r), s)`
/// for any term `t`.
pub fn compose(r: &Substitution, s: &Substitution) -> Substitution {
    let mut out = Substitution::new();
    for (v, t) in r.iter() {
        out.insert(v.clone(), apply(t, s));
    }
    for (v, t) in s.iter() {
        if !r.contains_key(v) {
            out.insert(v.clone(), t.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_does_not_capture_bound_variable() {
        let sigma = Substitution::singleton(Symbol::new("x"), Node::constant("A"));
        let phi = Node::forall("x", Node::pred("p", vec![Node::var("x")]));
        assert_eq!(apply(&phi, &sigma), phi);
    }

    #[test]
    fn compose_matches_sequential_application() {
        let r = Substitution::singleton(Symbol::new("x"), Node::var("y"));
        let s = Substitution::singleton(Symbol::new("y"), Node::constant("A"));
        let rs = compose(&r, &s);
        let t = Node::var("x");
        assert_eq!(apply(&t, &rs), apply(&apply(&t, &r), &s));
    }

    #[test]
    fn occurs_in_is_false_for_the_variable_itself() {
        let v = Symbol::new("x");
        assert!(!occurs_in(&v, &Node::var("x")));
        assert!(occurs_in(&v, &Node::func("F", vec![Node::var("x")])));
    }
}
