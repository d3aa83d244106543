//! End-to-end scenarios (`spec.md` §8), exercising `KnowledgeBase` across
//! the parser, the CNF pipeline, and the saturation loop together.

use folkb::kb::KnowledgeBase;
use folkb::parser::parse_formula;

fn f(src: &str) -> folkb::expr::Node {
    parse_formula(src).unwrap()
}

fn kb_with(axioms: &[&str]) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    for a in axioms {
        kb.add_axiom(f(a)).unwrap();
    }
    kb
}

#[test]
fn socrates_syllogism_is_entailed_with_an_empty_witness() {
    let kb = kb_with(&["human(Socrates)", "*x: human(x) => mortal(x)"]);
    let witness = kb.query(f("mortal(Socrates)")).unwrap();
    assert_eq!(witness, Some(folkb::subst::Substitution::new()));
}

#[test]
fn socrates_syllogism_does_not_entail_an_unrelated_goal() {
    let kb = kb_with(&["human(Socrates)", "*x: human(x) => mortal(x)"]);
    assert!(!kb.prove(f("immortal(Socrates)")).unwrap());
}

const CAESAR_AXIOMS: &[&str] = &[
    "man(Marcus)",
    "roman(Marcus)",
    "*x: man(x) => person(x)",
    "ruler(Caesar)",
    "*x: roman(x) => (loyal(x,Caesar) | hate(x,Caesar))",
    "*x: ?y: loyal(x,y)",
    "*x, *y: (person(x) & ruler(y) & tryAssassin(x,y)) => !loyal(x,y)",
    "tryAssassin(Marcus,Caesar)",
];

#[test]
fn caesar_model_entails_marcus_hates_caesar() {
    let kb = kb_with(CAESAR_AXIOMS);
    assert!(kb.prove(f("hate(Marcus,Caesar)")).unwrap());
}

#[test]
fn caesar_model_witnesses_the_existential_hater() {
    let kb = kb_with(CAESAR_AXIOMS);
    let witness = kb.query(f("?x: hate(x,Caesar)")).unwrap().expect("should be entailed");
    assert_eq!(witness.get(&folkb::expr::Symbol::new("x")), Some(&folkb::expr::Node::constant("Marcus")));
}

#[test]
fn peano_arithmetic_entails_a_multiplication_fact_via_paramodulation() {
    let kb = kb_with(&[
        "*x: Succ(x) != 0",
        "*x, *y: (Succ(x) = Succ(y)) => x = y",
        "*x: Add(x,0) = x",
        "*x, *y: Add(x,Succ(y)) = Succ(Add(x,y))",
        "*x: Mul(x,0) = 0",
        "*x, *y: Mul(x,Succ(y)) = Add(Mul(x,y),x)",
    ]);
    assert!(kb.prove(f("Mul(Succ(0),Succ(0)) = Succ(0)")).unwrap());
}

#[test]
fn contradictory_premises_entail_any_goal() {
    let kb = kb_with(&["f(P) & !f(P)"]);
    assert!(kb.prove(f("q(Z)")).unwrap());
}

#[test]
fn a_tautologous_premise_entails_nothing_new() {
    let kb = kb_with(&["f(P) | !f(P)"]);
    assert!(!kb.prove(f("f(P)")).unwrap());
}

#[test]
fn add_lemma_only_asserts_proven_formulas() {
    let mut kb = kb_with(&["human(Socrates)", "*x: human(x) => mortal(x)"]);
    assert!(kb.add_lemma(f("mortal(Socrates)")).unwrap());
    assert!(!kb.add_lemma(f("immortal(Socrates)")).unwrap());
    assert_eq!(kb.list().len(), 3);
}
