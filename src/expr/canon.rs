//! Structural normalization: associative-commutative flattening plus a
//! deterministic sort, and denormalization (its inverse for tree walks that
//! need binary shape). Ported from `_unfold`/`_fold`/`_sort`/`_sort_key` in
//! the original source, restricted to the operator set `spec.md` actually
//! calls associative-commutative: `And`, `Or`, `Equals`, and the equality
//! predicate. `Implies` is excluded from both fold and sort — see
//! `DESIGN.md`.

use crate::expr::node::{Node, Quantifier};
use crate::expr::symbol::Symbol;

/// Returns the canonical form: flattened and sorted.
pub fn normalize(n: &Node) -> Node {
    sort(&unfold(n))
}

/// Folds canonical n-ary nodes back into right-associated binary chains.
/// Mutual inverse of [`normalize`] on the foldable operators.
pub fn denormalize(n: &Node) -> Node {
    fold(n)
}

fn unfold(n: &Node) -> Node {
    match n {
        Node::Constant(_) | Node::Variable(_) => n.clone(),
        Node::Function(s, cs) => Node::Function(s.clone(), cs.iter().map(unfold).collect()),
        Node::Predicate(s, cs) if s.is_eq() && cs.len() == 2 => {
            Node::Predicate(s.clone(), vec![unfold(&cs[0]), unfold(&cs[1])])
        }
        Node::Predicate(s, cs) => Node::Predicate(s.clone(), cs.iter().map(unfold).collect()),
        Node::Not(c) => Node::not(unfold(c)),
        Node::And(cs) => Node::And(unfold_flatten(cs, |n| matches!(n, Node::And(_)))),
        Node::Or(cs) => Node::Or(unfold_flatten(cs, |n| matches!(n, Node::Or(_)))),
        Node::Equals(cs) => Node::Equals(unfold_flatten(cs, |n| matches!(n, Node::Equals(_)))),
        Node::Implies(a, b) => Node::Implies(Box::new(unfold(a)), Box::new(unfold(b))),
        Node::Quantified(q, v, body) => Node::Quantified(*q, v.clone(), Box::new(unfold(body))),
    }
}

fn unfold_flatten(cs: &[Node], is_same: impl Fn(&Node) -> bool) -> Vec<Node> {
    let mut out = Vec::with_capacity(cs.len());
    for c in cs {
        let c = unfold(c);
        if is_same(&c) {
            match c {
                Node::And(inner) | Node::Or(inner) | Node::Equals(inner) => out.extend(inner),
                _ => unreachable!("is_same only matches foldable n-ary variants"),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn fold(n: &Node) -> Node {
    match n {
        Node::Constant(_) | Node::Variable(_) => n.clone(),
        Node::Function(s, cs) => Node::Function(s.clone(), cs.iter().map(fold).collect()),
        Node::Predicate(s, cs) if s.is_eq() && cs.len() == 2 => {
            Node::Predicate(s.clone(), vec![fold(&cs[0]), fold(&cs[1])])
        }
        Node::Predicate(s, cs) => Node::Predicate(s.clone(), cs.iter().map(fold).collect()),
        Node::Not(c) => Node::not(fold(c)),
        Node::And(cs) => fold_chain(cs, Node::And),
        Node::Or(cs) => fold_chain(cs, Node::Or),
        Node::Equals(cs) => fold_chain(cs, Node::Equals),
        Node::Implies(a, b) => Node::Implies(Box::new(fold(a)), Box::new(fold(b))),
        Node::Quantified(q, v, body) => Node::Quantified(*q, v.clone(), Box::new(fold(body))),
    }
}

fn fold_chain(cs: &[Node], wrap: impl Fn(Vec<Node>) -> Node) -> Node {
    let mut folded: Vec<Node> = cs.iter().map(fold).collect();
    if folded.len() <= 1 {
        return wrap(folded);
    }
    let mut inner = folded.pop().expect("len > 1");
    while let Some(k) = folded.pop() {
        inner = wrap(vec![k, inner]);
    }
    inner
}

fn sort(n: &Node) -> Node {
    match n {
        Node::Constant(_) | Node::Variable(_) => n.clone(),
        Node::Function(s, cs) => Node::Function(s.clone(), cs.iter().map(sort).collect()),
        Node::Predicate(s, cs) if s.is_eq() && cs.len() == 2 => {
            let mut sorted = [sort(&cs[0]), sort(&cs[1])];
            sorted.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
            Node::Predicate(s.clone(), sorted.into())
        }
        Node::Predicate(s, cs) => Node::Predicate(s.clone(), cs.iter().map(sort).collect()),
        Node::Not(c) => Node::not(sort(c)),
        Node::And(cs) => Node::And(sort_children(cs)),
        Node::Or(cs) => Node::Or(sort_children(cs)),
        Node::Equals(cs) => Node::Equals(sort_children(cs)),
        Node::Implies(a, b) => Node::Implies(Box::new(sort(a)), Box::new(sort(b))),
        Node::Quantified(q, v, body) => Node::Quantified(*q, v.clone(), Box::new(sort(body))),
    }
}

fn sort_children(cs: &[Node]) -> Vec<Node> {
    let mut sorted: Vec<Node> = cs.iter().map(sort).collect();
    sorted.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    sorted
}

/// Recursive structural key `(kind, head, child_keys…)`. `Not(x)` sorts by
/// the key of `x` — this is what lets `a & !b` and `!b & a` agree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Key {
    Leaf(u8, Symbol),
    Node(u8, Vec<Key>),
    NamedNode(u8, Symbol, Vec<Key>),
}

fn sort_key(n: &Node) -> Key {
    match n {
        Node::Not(inner) => sort_key(inner),
        Node::Constant(s) => Key::Leaf(0, s.clone()),
        Node::Variable(s) => Key::Leaf(1, s.clone()),
        Node::Function(s, cs) => Key::NamedNode(2, s.clone(), cs.iter().map(sort_key).collect()),
        Node::Predicate(s, cs) => Key::NamedNode(3, s.clone(), cs.iter().map(sort_key).collect()),
        Node::And(cs) => Key::Node(4, cs.iter().map(sort_key).collect()),
        Node::Or(cs) => Key::Node(5, cs.iter().map(sort_key).collect()),
        Node::Implies(a, b) => Key::Node(6, vec![sort_key(a), sort_key(b)]),
        Node::Equals(cs) => Key::Node(7, cs.iter().map(sort_key).collect()),
        Node::Quantified(q, v, body) => {
            let tag = if *q == Quantifier::ForAll { 8 } else { 9 };
            Key::NamedNode(tag, v.clone(), vec![sort_key(body)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::node::Node;

    #[test]
    fn flattens_nested_conjunctions() {
        let a = Node::pred("a", vec![]);
        let b = Node::pred("b", vec![]);
        let c = Node::pred("c", vec![]);
        let nested = Node::and(vec![a.clone(), Node::and(vec![b.clone(), c.clone()])]);
        let flat = normalize(&nested);
        assert_eq!(flat, Node::and(vec![a, b, c]));
    }

    #[test]
    fn sorts_commutatively() {
        let a = Node::pred("a", vec![]);
        let b = Node::pred("b", vec![]);
        let lhs = normalize(&Node::and(vec![a.clone(), Node::not(b.clone())]));
        let rhs = normalize(&Node::and(vec![Node::not(b), a]));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn normalize_denormalize_are_idempotent_inverses() {
        let a = Node::pred("a", vec![]);
        let b = Node::pred("b", vec![]);
        let c = Node::pred("c", vec![]);
        let n = normalize(&Node::and(vec![a, b, c]));
        assert_eq!(normalize(&denormalize(&n)), n);
        assert_eq!(normalize(&n), n);
    }
}
