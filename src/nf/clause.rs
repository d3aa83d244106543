//! Clause extraction: turning a CNF formula into the flat clause-set
//! representation the prover operates on (`Clause = BTreeSet<Literal>`) —
//! sets rather than lists so that repeated identical literals (from an
//! instantiated factor, or simply written twice) collapse for free, and
//! so that clause equality is syntactic set equality rather than needing
//! a separate canonicalization pass.

use std::collections::BTreeSet;
use std::fmt;

use crate::expr::Node;

/// A literal: an atomic predicate application, or its negation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub negated: bool,
    pub atom: Node,
}

impl Literal {
    pub fn positive(atom: Node) -> Self {
        debug_assert!(atom.is_atom(), "literal atom must be a predicate application");
        Literal { negated: false, atom }
    }

    pub fn negative(atom: Node) -> Self {
        debug_assert!(atom.is_atom(), "literal atom must be a predicate application");
        Literal { negated: true, atom }
    }

    /// The complementary literal — same atom, opposite polarity.
    pub fn complement(&self) -> Literal {
        Literal {
            negated: !self.negated,
            atom: self.atom.clone(),
        }
    }

}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.atom)
        } else {
            write!(f, "{}", self.atom)
        }
    }
}

impl From<&Node> for Literal {
    /// Converts a literal-shaped node (`spec.md` §4.1's `is_literal`) into a
    /// [`Literal`]. Panics on a non-literal — callers only ever reach this
    /// from [`to_clause_form`], which has already checked the shape.
    fn from(n: &Node) -> Self {
        match n {
            Node::Not(inner) => Literal::negative((**inner).clone()),
            Node::Predicate(..) => Literal::positive(n.clone()),
            _ => panic!("not a literal: {n:?}"),
        }
    }
}

/// A disjunction of literals — one clause of a clausal normal form.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clause(BTreeSet<Literal>);

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_literals(lits: impl IntoIterator<Item = Literal>) -> Self {
        Clause(lits.into_iter().collect())
    }

    pub fn insert(&mut self, lit: Literal) -> bool {
        self.0.insert(lit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True iff some literal and its complement both occur in this clause —
    /// the clause is then a tautology, trivially satisfied and useless to
    /// the prover.
    pub fn is_tautology(&self) -> bool {
        self.0.iter().any(|lit| self.0.contains(&lit.complement()))
    }

    pub fn remove(&self, lit: &Literal) -> Clause {
        let mut out = self.0.clone();
        out.remove(lit);
        Clause(out)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, lit) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, ")")
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause(iter.into_iter().collect())
    }
}

/// Extracts the clause set from a CNF formula (`spec.md` §4.4). `cnf` must
/// already satisfy [`Node::is_cnf`] — the output of [`crate::nf::to_cnf`].
/// A bare literal or disjunction becomes a single clause; a top-level
/// conjunction becomes one clause per conjunct.
pub fn to_clause_form(cnf: &Node) -> BTreeSet<Clause> {
    debug_assert!(cnf.is_cnf(), "to_clause_form requires a CNF node: {cnf:?}");
    match cnf {
        Node::And(cs) => cs.iter().map(clause_from_disjunction).collect(),
        _ => {
            let mut set = BTreeSet::new();
            set.insert(clause_from_disjunction(cnf));
            set
        }
    }
}

fn clause_from_disjunction(n: &Node) -> Clause {
    match n {
        Node::Or(cs) => cs.iter().map(Literal::from).collect(),
        lit => {
            let mut c = Clause::new();
            c.insert(Literal::from(lit));
            c
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_one_clause_per_conjunct() {
        let a = Node::pred("a", vec![]);
        let b = Node::pred("b", vec![]);
        let c = Node::pred("c", vec![]);
        let cnf = Node::And(vec![Node::Or(vec![a.clone(), Node::not(b.clone())]), c.clone()]);
        let clauses = to_clause_form(&cnf);
        assert_eq!(clauses.len(), 2);
        assert!(clauses.contains(&Clause::from_literals([Literal::positive(a), Literal::negative(b)])));
        assert!(clauses.contains(&Clause::from_literals([Literal::positive(c)])));
    }

    #[test]
    fn detects_tautology() {
        let a = Node::pred("a", vec![]);
        let clause = Clause::from_literals([Literal::positive(a.clone()), Literal::negative(a)]);
        assert!(clause.is_tautology());
    }

    #[test]
    fn duplicate_literals_collapse() {
        let a = Node::pred("a", vec![]);
        let clause = Clause::from_literals([Literal::positive(a.clone()), Literal::positive(a)]);
        assert_eq!(clause.len(), 1);
    }
}
