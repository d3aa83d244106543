//! Fact-list persistence: each [`Node`] is serialized as a recursive
//! record `{ kind: { Value: <symbol>, Children: [...] } }`, `Children`
//! omitted when empty, loadable as either YAML or JSON.
//!
//! The record is never written in "compact mode" (collapsing a constant
//! or variable to its bare symbol string) — that mode is ambiguous on
//! load, so this module never emits it.
//!
//! `Node` does not derive `Serialize`/`Deserialize` directly: the shape
//! varies per variant (leaf vs named vs plain), which `#[derive]` cannot
//! express on an enum with irregular per-arm fields. Instead this module
//! defines a shadow [`NodeRecord`] enum whose arms `#[derive]` cleanly,
//! and converts to/from [`Node`] by hand.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::expr::{Node, Quantifier, Symbol};

#[derive(Serialize, Deserialize)]
struct Leaf {
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Serialize, Deserialize)]
struct Named {
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Children", default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeRecord>,
}

#[derive(Serialize, Deserialize)]
struct Plain {
    #[serde(rename = "Children", default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeRecord>,
}

#[derive(Serialize, Deserialize)]
enum NodeRecord {
    Constant(Leaf),
    Variable(Leaf),
    Function(Named),
    Predicate(Named),
    Not(Plain),
    And(Plain),
    Or(Plain),
    Implies(Plain),
    Equals(Plain),
    ForAll(Named),
    Exists(Named),
}

impl From<&Node> for NodeRecord {
    fn from(n: &Node) -> Self {
        match n {
            Node::Constant(s) => NodeRecord::Constant(Leaf { value: s.to_string() }),
            Node::Variable(s) => NodeRecord::Variable(Leaf { value: s.to_string() }),
            Node::Function(s, cs) => NodeRecord::Function(Named {
                value: s.to_string(),
                children: cs.iter().map(NodeRecord::from).collect(),
            }),
            Node::Predicate(s, cs) => NodeRecord::Predicate(Named {
                value: s.to_string(),
                children: cs.iter().map(NodeRecord::from).collect(),
            }),
            Node::Not(c) => NodeRecord::Not(Plain { children: vec![NodeRecord::from(c.as_ref())] }),
            Node::And(cs) => NodeRecord::And(Plain { children: cs.iter().map(NodeRecord::from).collect() }),
            Node::Or(cs) => NodeRecord::Or(Plain { children: cs.iter().map(NodeRecord::from).collect() }),
            Node::Implies(a, b) => {
                NodeRecord::Implies(Plain { children: vec![NodeRecord::from(a.as_ref()), NodeRecord::from(b.as_ref())] })
            }
            Node::Equals(cs) => NodeRecord::Equals(Plain { children: cs.iter().map(NodeRecord::from).collect() }),
            Node::Quantified(Quantifier::ForAll, v, body) => {
                NodeRecord::ForAll(Named { value: v.to_string(), children: vec![NodeRecord::from(body.as_ref())] })
            }
            Node::Quantified(Quantifier::Exists, v, body) => {
                NodeRecord::Exists(Named { value: v.to_string(), children: vec![NodeRecord::from(body.as_ref())] })
            }
        }
    }
}

impl TryFrom<NodeRecord> for Node {
    type Error = PersistError;

    fn try_from(r: NodeRecord) -> Result<Node, PersistError> {
        fn one(mut cs: Vec<NodeRecord>, what: &str) -> Result<Node, PersistError> {
            if cs.len() != 1 {
                return Err(PersistError::Malformed(format!("`{what}` expects exactly one child")));
            }
            Node::try_from(cs.remove(0))
        }
        fn two(mut cs: Vec<NodeRecord>, what: &str) -> Result<(Node, Node), PersistError> {
            if cs.len() != 2 {
                return Err(PersistError::Malformed(format!("`{what}` expects exactly two children")));
            }
            let b = Node::try_from(cs.remove(1))?;
            let a = Node::try_from(cs.remove(0))?;
            Ok((a, b))
        }
        fn many(cs: Vec<NodeRecord>) -> Result<Vec<Node>, PersistError> {
            cs.into_iter().map(Node::try_from).collect()
        }

        match r {
            NodeRecord::Constant(leaf) => Ok(Node::constant(leaf.value)),
            NodeRecord::Variable(leaf) => Ok(Node::var(leaf.value)),
            NodeRecord::Function(n) => Ok(Node::func(n.value, many(n.children)?)),
            NodeRecord::Predicate(n) => Ok(Node::pred(n.value, many(n.children)?)),
            NodeRecord::Not(p) => Ok(Node::not(one(p.children, "Not")?)),
            NodeRecord::And(p) => Ok(Node::and(many(p.children)?)),
            NodeRecord::Or(p) => Ok(Node::or(many(p.children)?)),
            NodeRecord::Implies(p) => {
                let (a, b) = two(p.children, "Implies")?;
                Ok(Node::implies(a, b))
            }
            NodeRecord::Equals(p) => Ok(Node::equiv(many(p.children)?)),
            NodeRecord::ForAll(n) => Ok(Node::forall(n.value, one(n.children, "ForAll")?)),
            NodeRecord::Exists(n) => Ok(Node::exists(n.value, one(n.children, "Exists")?)),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        NodeRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Node, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let record = NodeRecord::deserialize(deserializer)?;
        Node::try_from(record).map_err(serde::de::Error::custom)
    }
}

// Symbol doesn't derive Serialize/Deserialize (it wraps an `Rc<str>`,
// which `serde` has no blanket impl for) — the `Leaf`/`Named` records
// above go through `String` instead, so no impl is needed on `Symbol`
// itself; this marker exists only to document that choice.
#[allow(dead_code)]
fn _symbol_is_plain_string(_: &Symbol) {}

/// Serializes `facts` as a JSON array of records, one per fact.
pub fn dumps_json(facts: &[Node]) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(facts)?)
}

/// Serializes `facts` as a YAML sequence of records, one per fact.
pub fn dumps_yaml(facts: &[Node]) -> Result<String, PersistError> {
    Ok(serde_yaml::to_string(facts)?)
}

/// Parses a fact list previously produced by [`dumps_json`] or
/// [`dumps_yaml`] — both are accepted regardless of which produced it.
pub fn loads(text: &str) -> Result<Vec<Node>, PersistError> {
    if let Ok(facts) = serde_json::from_str::<Vec<Node>>(text) {
        return Ok(facts);
    }
    if let Ok(facts) = serde_yaml::from_str::<Vec<Node>>(text) {
        return Ok(facts);
    }
    Err(PersistError::UnknownFormat)
}

/// Writes `facts` to `path`, choosing JSON or YAML by the path's
/// extension (`.json` vs anything else, defaulting to YAML).
pub fn save(path: &Path, facts: &[Node]) -> Result<(), PersistError> {
    let text = if path.extension().is_some_and(|e| e == "json") {
        dumps_json(facts)?
    } else {
        dumps_yaml(facts)?
    };
    fs::write(path, text)?;
    Ok(())
}

/// Reads and parses the fact list at `path`, if it exists. Returns an
/// empty list if the path does not exist yet (first run with a fresh
/// persistence path).
pub fn load(path: &Path) -> Result<Vec<Node>, PersistError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    loads(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let phi = Node::forall(
            "x",
            Node::implies(
                Node::pred("human", vec![Node::var("x")]),
                Node::pred("mortal", vec![Node::var("x")]),
            ),
        );
        let text = dumps_json(&[phi.clone()]).unwrap();
        let back = loads(&text).unwrap();
        assert_eq!(back, vec![phi]);
    }

    #[test]
    fn round_trips_through_yaml() {
        let phi = Node::equality(Node::var("x"), Node::constant("A"));
        let text = dumps_yaml(&[phi.clone()]).unwrap();
        let back = loads(&text).unwrap();
        assert_eq!(back, vec![phi]);
    }

    #[test]
    fn omits_children_on_leaves() {
        let phi = Node::constant("A");
        let text = dumps_json(&[phi]).unwrap();
        assert!(!text.contains("Children"));
    }
}
