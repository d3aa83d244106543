//! The saturation loop: binary resolution, reflexivity resolution, and
//! paramodulation over the clause set derived from the premises and the
//! negated goal. Uses a seen-pairs memo and a scan-and-restart-on-new-
//! clause loop for overall control flow.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::error::FormulaError;
use crate::expr::{NameGenerator, Node};
use crate::nf::{to_clause_form, to_cnf_with_generator, Clause, Literal};
use crate::res::index_clause;
use crate::subst::{apply, compose, Substitution};
use crate::uni::unify;

/// Which rule derived a clause — used only to scope the tried-pair memo,
/// since resolution and paramodulation pairs are independent searches
/// over the same clause set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rule {
    Resolution,
    Paramodulation,
}

/// Attempts to derive `goal` from `premises` (`spec.md` §4.5). Returns
/// `Ok(Some(witness))` if a refutation was found — `witness` binds each
/// existentially quantified variable of `goal` to a term in the original
/// symbol namespace, and is empty if `goal` carries no free variables to
/// report. Returns `Ok(None)` if the search saturates without deriving
/// the empty clause (the prover gives up — `spec.md` §7 notes this is
/// indistinguishable from genuine non-entailment without a termination
/// oracle). Returns `Err` if `premises` or `goal` is not a well-formed
/// formula.
pub fn infer(premises: &[Node], goal: &Node) -> Result<Option<Substitution>, FormulaError> {
    infer_bounded(premises, goal, None)
}

/// As [`infer`], but gives up and returns `Ok(None)` once `max_steps`
/// derived clauses have been recorded, even if the search has not
/// saturated (`spec.md` §5's quality-of-implementation step-bound;
/// `SPEC_FULL.md` §5 wires this to the CLI's `--max-steps`). `None` means
/// unbounded.
pub fn infer_bounded(
    premises: &[Node],
    goal: &Node,
    max_steps: Option<usize>,
) -> Result<Option<Substitution>, FormulaError> {
    for p in premises {
        if !p.is_formula() {
            return Err(FormulaError::new(format!("premise is not a well-formed formula: {p:?}")));
        }
    }
    if !goal.is_formula() {
        return Err(FormulaError::new(format!("goal is not a well-formed formula: {goal:?}")));
    }

    // `spec.md` §4.5 step 2: an empty knowledge base entails anything
    // vacuously. `DESIGN.md` records this as the chosen resolution of the
    // open question over the alternative ("not entailed" on an empty KB).
    if premises.is_empty() {
        debug!("premise set is empty, goal holds vacuously");
        return Ok(Some(Substitution::new()));
    }

    let mut gen = NameGenerator::new();
    let mut clauses: BTreeSet<Clause> = BTreeSet::new();
    let mut provenance: std::collections::BTreeMap<Clause, Substitution> = std::collections::BTreeMap::new();

    for premise in premises {
        let (cnf, _rho) = to_cnf_with_generator(premise, &mut gen);
        for c in to_clause_form(&cnf) {
            if !c.is_tautology() {
                provenance.entry(c.clone()).or_insert_with(Substitution::new);
                clauses.insert(c);
            }
        }
    }

    let (neg_goal_cnf, conclusion_subst) = to_cnf_with_generator(&Node::not(goal.clone()), &mut gen);
    for c in to_clause_form(&neg_goal_cnf) {
        if !c.is_tautology() {
            provenance.entry(c.clone()).or_insert_with(Substitution::new);
            clauses.insert(c);
        }
    }

    debug!(clause_count = clauses.len(), "starting saturation");

    let mut tried_resolution: BTreeSet<(Clause, Clause)> = BTreeSet::new();
    let mut tried_reflexivity: BTreeSet<Clause> = BTreeSet::new();
    let mut tried_param: BTreeSet<(Clause, Clause)> = BTreeSet::new();
    let mut steps: usize = 0;

    'saturate: loop {
        let snapshot: Vec<Clause> = clauses.iter().cloned().collect();

        // (a) binary resolution over every pair of distinct clauses.
        for c1 in &snapshot {
            for c2 in &snapshot {
                if c1 == c2 {
                    continue;
                }
                let key = ordered_pair(c1, c2);
                if tried_resolution.contains(&key) {
                    continue;
                }
                tried_resolution.insert(key);

                if !share_complementary_predicate(c1, c2) {
                    continue;
                }

                if let Some((result, sigma)) = try_binary_resolution(c1, c2) {
                    if let Some(prov) = record(
                        &mut clauses,
                        &mut provenance,
                        result,
                        combine(&provenance[c1], &provenance[c2], &sigma),
                        Rule::Resolution,
                    ) {
                        if let Some(witness) = prov {
                            return Ok(Some(finalize(&witness, &conclusion_subst)));
                        }
                        steps += 1;
                        if max_steps.is_some_and(|max| steps >= max) {
                            debug!(steps, "step bound reached");
                            return Ok(None);
                        }
                        continue 'saturate;
                    }
                }
            }
        }

        // (b) reflexivity resolution over every single clause.
        for c in &snapshot {
            if tried_reflexivity.contains(c) {
                continue;
            }
            tried_reflexivity.insert(c.clone());

            if let Some((result, sigma)) = try_reflexivity(c) {
                if let Some(prov) = record(
                    &mut clauses,
                    &mut provenance,
                    result,
                    compose(&provenance[c], &sigma),
                    Rule::Paramodulation,
                ) {
                    if let Some(witness) = prov {
                        return Ok(Some(finalize(&witness, &conclusion_subst)));
                    }
                    steps += 1;
                    if max_steps.is_some_and(|max| steps >= max) {
                        debug!(steps, "step bound reached");
                        return Ok(None);
                    }
                    continue 'saturate;
                }
            }
        }

        // (c) paramodulation over every ordered pair of clauses.
        for c1 in &snapshot {
            for c2 in &snapshot {
                if c1 == c2 {
                    continue;
                }
                let key = (c1.clone(), c2.clone());
                if tried_param.contains(&key) {
                    continue;
                }
                tried_param.insert(key);

                if let Some((result, sigma)) = try_paramodulation(c1, c2) {
                    if let Some(prov) = record(
                        &mut clauses,
                        &mut provenance,
                        result,
                        combine(&provenance[c1], &provenance[c2], &sigma),
                        Rule::Paramodulation,
                    ) {
                        if let Some(witness) = prov {
                            return Ok(Some(finalize(&witness, &conclusion_subst)));
                        }
                        steps += 1;
                        if max_steps.is_some_and(|max| steps >= max) {
                            debug!(steps, "step bound reached");
                            return Ok(None);
                        }
                        continue 'saturate;
                    }
                }
            }
        }

        debug!("saturated with no new inference");
        return Ok(None);
    }
}

/// Cheap pre-filter before the literal-level search in
/// [`try_binary_resolution`]: two clauses can only resolve if one carries
/// a positive occurrence of some predicate name the other carries
/// negatively. Built from [`index_clause`]'s per-clause predicate
/// grouping.
fn share_complementary_predicate(c1: &Clause, c2: &Clause) -> bool {
    let (pos1, neg1) = index_clause(c1);
    let (pos2, neg2) = index_clause(c2);
    pos1.names().any(|n| neg2.contains_name(n)) || neg1.names().any(|n| pos2.contains_name(n))
}

fn ordered_pair(a: &Clause, b: &Clause) -> (Clause, Clause) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Composes two parents' accumulated derivation substitutions (disjoint
/// domains, since every clause's variables were standardized apart by its
/// own `to_cnf` call) with the MGU of this inference step.
fn combine(p1: &Substitution, p2: &Substitution, sigma: &Substitution) -> Substitution {
    let mut union = p1.clone();
    for (v, t) in p2.iter() {
        union.insert(v.clone(), t.clone());
    }
    compose(&union, sigma)
}

/// Inserts `result` into the working clause set with its derivation
/// substitution `prov`, unless it is a tautology or already known.
/// Returns `None` if nothing changed (caller should keep scanning);
/// `Some(None)` if it was a genuinely new, non-empty clause (caller
/// should restart scanning); `Some(Some(prov))` if `result` was the empty
/// clause (refutation found, `prov` is the answer to finalize).
fn record(
    clauses: &mut BTreeSet<Clause>,
    provenance: &mut std::collections::BTreeMap<Clause, Substitution>,
    result: Clause,
    prov: Substitution,
    rule: Rule,
) -> Option<Option<Substitution>> {
    if result.is_tautology() || clauses.contains(&result) {
        return None;
    }
    trace!(?rule, clause = %result, "derived clause");
    if result.is_empty() {
        return Some(Some(prov));
    }
    clauses.insert(result.clone());
    provenance.insert(result, prov);
    Some(None)
}

/// Rewrites the accumulated derivation substitution `answer` back through
/// `conclusion_subst` (the ρ recorded by the negated goal's `to_cnf`
/// call) so the witness is expressed in the goal's own variable names
/// (`spec.md` §4.5 step 4).
fn finalize(answer: &Substitution, conclusion_subst: &Substitution) -> Substitution {
    let mut result = Substitution::new();
    for (generated, original) in conclusion_subst.iter() {
        if let Node::Variable(orig_var) = original {
            if let Some(t) = answer.get(generated) {
                result.insert(orig_var.clone(), apply(t, answer));
            }
        }
    }
    result
}

fn apply_clause(c: &Clause, sigma: &Substitution) -> Clause {
    c.iter()
        .map(|lit| {
            let atom = crate::expr::normalize(&apply(&lit.atom, sigma));
            if lit.negated {
                Literal::negative(atom)
            } else {
                Literal::positive(atom)
            }
        })
        .collect()
}

/// Binary resolution: `{A} ∪ C` and `{¬B} ∪ D` resolve to
/// `apply(C ∪ D, σ)` when `σ = unify(A, B)`, for non-equality atoms
/// `A`, `B` of opposite polarity. First unifiable complementary pair in
/// iteration order wins (`spec.md` §4.5).
fn try_binary_resolution(c1: &Clause, c2: &Clause) -> Option<(Clause, Substitution)> {
    for a in c1.iter() {
        if a.atom.is_equality() {
            continue;
        }
        for b in c2.iter() {
            if b.atom.is_equality() || a.negated == b.negated {
                continue;
            }
            if let Ok(sigma) = unify(&a.atom, &b.atom) {
                let mut result = Clause::new();
                for x in c1.iter().filter(|x| *x != a) {
                    result.insert(x.clone());
                }
                for y in c2.iter().filter(|y| *y != b) {
                    result.insert(y.clone());
                }
                return Some((apply_clause(&result, &sigma), sigma));
            }
        }
    }
    None
}

/// Reflexivity resolution: a clause containing `¬(s = t)` discharges that
/// literal (with the rest of the clause substituted) when `unify(s, t)`
/// succeeds (`spec.md` §4.5).
fn try_reflexivity(c: &Clause) -> Option<(Clause, Substitution)> {
    for lit in c.iter() {
        if !lit.negated || !lit.atom.is_equality() {
            continue;
        }
        if let Node::Predicate(_, args) = &lit.atom {
            if let Ok(sigma) = unify(&args[0], &args[1]) {
                let result: Clause = c.iter().filter(|x| *x != lit).cloned().collect();
                return Some((apply_clause(&result, &sigma), sigma));
            }
        }
    }
    None
}

/// Paramodulation: `{s = t} ∪ C` and `{L[r]} ∪ D` infer
/// `apply({L[t]} ∪ C ∪ D, σ)` when `σ = unify(s, r)` for some subterm `r`
/// of literal `L`. Both orientations of the equality and both clause
/// orders are tried by the caller iterating ordered pairs (`spec.md`
/// §4.5).
fn try_paramodulation(c1: &Clause, c2: &Clause) -> Option<(Clause, Substitution)> {
    for e in c1.iter() {
        if e.negated || !e.atom.is_equality() {
            continue;
        }
        let Node::Predicate(_, args) = &e.atom else { continue };
        let (s0, t0) = (&args[0], &args[1]);

        for (s, t) in [(s0, t0), (t0, s0)] {
            for l in c2.iter() {
                let mut found = None;
                let rewritten = rewrite_atom(&l.atom, s, t, &mut found);
                if let Some(sigma) = found {
                    let new_lit = if l.negated {
                        Literal::negative(rewritten)
                    } else {
                        Literal::positive(rewritten)
                    };
                    let mut result = Clause::new();
                    for x in c1.iter().filter(|x| *x != e) {
                        result.insert(x.clone());
                    }
                    for y in c2.iter().filter(|y| *y != l) {
                        result.insert(y.clone());
                    }
                    result.insert(new_lit);
                    return Some((apply_clause(&result, &sigma), sigma));
                }
            }
        }
    }
    None
}

/// Rewrites the first subterm of atom `node` (a `Predicate` application)
/// unifiable with `s`, by recursing into its argument terms — the atom
/// itself is never offered to `unify` against `s`, since `s` is a term
/// and an atom is not (`spec.md` §4.1's sort distinction between terms
/// and formulas), and a bare-variable `s` would otherwise unify with the
/// whole atom and replace it wholesale.
fn rewrite_atom(node: &Node, s: &Node, t: &Node, found: &mut Option<Substitution>) -> Node {
    match node {
        Node::Predicate(name, args) => {
            Node::Predicate(name.clone(), args.iter().map(|a| rewrite_term(a, s, t, found)).collect())
        }
        _ => node.clone(),
    }
}

/// Depth-first, left-to-right search for the first subterm of term
/// `node` unifiable with `s`, replacing it (unsubstituted) with `t`.
/// `found` records the unifier on the first hit; later candidates are
/// skipped.
fn rewrite_term(node: &Node, s: &Node, t: &Node, found: &mut Option<Substitution>) -> Node {
    if found.is_some() {
        return node.clone();
    }
    if let Ok(sigma) = unify(node, s) {
        *found = Some(sigma);
        return t.clone();
    }
    match node {
        Node::Function(name, args) => {
            Node::Function(name.clone(), args.iter().map(|a| rewrite_term(a, s, t, found)).collect())
        }
        _ => node.clone(),
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
    fn socrates_is_mortal() {
        let premises = vec![f("human(Socrates)"), f("*x: human(x) => mortal(x)")];
        let goal = f("mortal(Socrates)");
        assert!(infer(&premises, &goal).unwrap().is_some());
    }

    #[test]
    fn socrates_is_not_immortal_entailed() {
        let premises = vec![f("human(Socrates)"), f("*x: human(x) => mortal(x)")];
        let goal = f("immortal(Socrates)");
        assert!(infer(&premises, &goal).unwrap().is_none());
    }

    #[test]
    fn contradictory_premises_entail_anything() {
        let premises = vec![f("f(P) & !f(P)")];
        let goal = f("q(Z)");
        assert!(infer(&premises, &goal).unwrap().is_some());
    }

    #[test]
    fn tautologous_premise_does_not_entail_the_atom() {
        let premises = vec![f("f(P) | !f(P)")];
        let goal = f("f(P)");
        assert!(infer(&premises, &goal).unwrap().is_none());
    }

    #[test]
    fn existential_query_recovers_a_witness() {
        let premises = vec![
            f("man(Marcus)"),
            f("roman(Marcus)"),
            f("*x: man(x) => person(x)"),
            f("ruler(Caesar)"),
            f("*x: roman(x) => (loyal(x,Caesar) | hate(x,Caesar))"),
            f("*x: ?y: loyal(x,y)"),
            f("*x, *y: (person(x) & ruler(y) & tryAssassin(x,y)) => !loyal(x,y)"),
            f("tryAssassin(Marcus,Caesar)"),
        ];
        let goal = f("?x: hate(x,Caesar)");
        let witness = infer(&premises, &goal).unwrap().expect("goal should be entailed");
        let binding = witness.get(&crate::expr::Symbol::new("x"));
        assert_eq!(binding, Some(&Node::constant("Marcus")));
    }

    #[test]
    fn ill_formed_formula_is_rejected() {
        let bare_term = Node::var("x");
        let err = infer(&[bare_term], &f("p(A)"));
        assert!(err.is_err());
    }
}
