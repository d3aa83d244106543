//! Fact-list persistence round-tripping through the filesystem (`spec.md`
//! §6.2), exercising `persist::save`/`load` together with `KnowledgeBase`.

use folkb::kb::KnowledgeBase;
use folkb::parser::parse_formula;
use folkb::persist;

fn f(src: &str) -> folkb::expr::Node {
    parse_formula(src).unwrap()
}

#[test]
fn saved_facts_reload_into_an_equivalent_knowledge_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("facts.yaml");

    let mut kb = KnowledgeBase::new();
    kb.add_axiom(f("human(Socrates)")).unwrap();
    kb.add_axiom(f("*x: human(x) => mortal(x)")).unwrap();
    persist::save(&path, &kb.facts()).unwrap();

    let reloaded = KnowledgeBase::from_facts(persist::load(&path).unwrap());
    assert!(reloaded.prove(f("mortal(Socrates)")).unwrap());
}

#[test]
fn json_extension_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("facts.json");

    let facts = vec![f("*x: p(x) => q(x)"), f("p(A)")];
    persist::save(&path, &facts).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.trim_start().starts_with('['));

    let loaded = persist::load(&path).unwrap();
    assert_eq!(loaded, facts);
}

#[test]
fn loading_a_missing_path_yields_an_empty_fact_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.yaml");
    assert_eq!(persist::load(&path).unwrap(), Vec::new());
}
