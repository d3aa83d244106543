//! The `KnowledgeBase` facade (`spec.md` §4.6): a thin wrapper over
//! [`crate::res::infer`] holding an ordered fact list. Grounded on
//! `original_source/knowledge_base/knowledge_base.py`'s `KnowledgeBase`
//! class — `_axioms`/`_lemmas` become one ordered list here, each entry
//! tagged with its [`Provenance`], per `SPEC_FULL.md` §9's supplemented
//! `list` feature.

use tracing::{info, instrument};

use crate::error::FormulaError;
use crate::expr::Node;
use crate::res::infer_bounded;
use crate::subst::Substitution;

/// How a fact entered the knowledge base — asserted outright, or proven
/// and then asserted by [`KnowledgeBase::add_lemma`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Axiom,
    Lemma,
}

/// One entry of the knowledge base's fact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub formula: Node,
    pub provenance: Provenance,
}

/// Facade over a list of asserted facts (`spec.md` §4.6). Mutated only by
/// [`KnowledgeBase::add_axiom`]/[`KnowledgeBase::add_lemma`]; not
/// `Sync` — concurrent mutation is not supported and need not be guarded
/// (`spec.md` §5).
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    facts: Vec<Fact>,
    max_steps: Option<usize>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: every subsequent [`KnowledgeBase::prove`]/
    /// [`KnowledgeBase::query`] call gives up after `max_steps` derived
    /// clauses (`SPEC_FULL.md` §5, wired to the CLI's `--max-steps`).
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Seeds a knowledge base from a previously persisted fact list
    /// (`spec.md` §6.2). Every seeded fact is recorded as an axiom — the
    /// persisted format does not distinguish provenance.
    pub fn from_facts(facts: Vec<Node>) -> Self {
        KnowledgeBase {
            facts: facts
                .into_iter()
                .map(|formula| Fact { formula, provenance: Provenance::Axiom })
                .collect(),
            max_steps: None,
        }
    }

    /// The current fact list, in assertion order, for persistence
    /// (`spec.md` §6.2) or the CLI's `list` command (§6.3).
    pub fn list(&self) -> &[Fact] {
        &self.facts
    }

    /// The fact list stripped of provenance, for persistence.
    pub fn facts(&self) -> Vec<Node> {
        self.facts.iter().map(|f| f.formula.clone()).collect()
    }

    fn axiom_formulas(&self) -> Vec<Node> {
        self.facts.iter().map(|f| f.formula.clone()).collect()
    }

    /// Appends `phi` unconditionally (`spec.md` §4.6).
    #[instrument(skip(self), fields(formula = %phi))]
    pub fn add_axiom(&mut self, phi: Node) -> Result<(), FormulaError> {
        if !phi.is_formula() {
            return Err(FormulaError::new(format!("not a well-formed formula: {phi}")));
        }
        info!("asserting axiom");
        self.facts.push(Fact { formula: phi, provenance: Provenance::Axiom });
        Ok(())
    }

    /// Appends `phi` iff [`KnowledgeBase::prove`] succeeds (`spec.md`
    /// §4.6). Returns whether it was asserted.
    #[instrument(skip(self), fields(formula = %phi))]
    pub fn add_lemma(&mut self, phi: Node) -> Result<bool, FormulaError> {
        if self.prove(phi.clone())? {
            info!("lemma proven, asserting");
            self.facts.push(Fact { formula: phi, provenance: Provenance::Lemma });
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// `infer(facts, phi) != None` (`spec.md` §4.6).
    #[instrument(skip(self), fields(formula = %phi))]
    pub fn prove(&self, phi: Node) -> Result<bool, FormulaError> {
        Ok(infer_bounded(&self.axiom_formulas(), &phi, self.max_steps)?.is_some())
    }

    /// The substitution from [`infer`](crate::res::infer) directly
    /// (`spec.md` §4.6).
    #[instrument(skip(self), fields(formula = %phi))]
    pub fn query(&self, phi: Node) -> Result<Option<Substitution>, FormulaError> {
        infer_bounded(&self.axiom_formulas(), &phi, self.max_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_formula;

    fn f(src: &str) -> Node {
        parse_formula(src).unwrap()
    }

    #[test]
    fn add_axiom_appends_unconditionally() {
        let mut kb = KnowledgeBase::new();
        kb.add_axiom(f("human(Socrates)")).unwrap();
        assert_eq!(kb.list().len(), 1);
        assert_eq!(kb.list()[0].provenance, Provenance::Axiom);
    }

    #[test]
    fn add_lemma_only_asserts_when_proven() {
        let mut kb = KnowledgeBase::new();
        kb.add_axiom(f("human(Socrates)")).unwrap();
        kb.add_axiom(f("*x: human(x) => mortal(x)")).unwrap();

        assert!(kb.add_lemma(f("mortal(Socrates)")).unwrap());
        assert_eq!(kb.list().len(), 3);
        assert_eq!(kb.list()[2].provenance, Provenance::Lemma);

        assert!(!kb.add_lemma(f("immortal(Socrates)")).unwrap());
        assert_eq!(kb.list().len(), 3);
    }

    #[test]
    fn prove_reflects_entailment() {
        let mut kb = KnowledgeBase::new();
        kb.add_axiom(f("human(Socrates)")).unwrap();
        kb.add_axiom(f("*x: human(x) => mortal(x)")).unwrap();
        assert!(kb.prove(f("mortal(Socrates)")).unwrap());
        assert!(!kb.prove(f("immortal(Socrates)")).unwrap());
    }

    #[test]
    fn query_returns_a_witness_substitution() {
        let mut kb = KnowledgeBase::new();
        kb.add_axiom(f("*x: ?y: loves(x,y)")).unwrap();
        let witness = kb.query(f("?y: loves(Adam,y)")).unwrap();
        assert!(witness.is_some());
    }

    #[test]
    fn rejects_a_bare_term_as_not_a_formula() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.add_axiom(Node::var("x")).is_err());
    }
}
