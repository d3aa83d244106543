use std::fmt;
use std::rc::Rc;

/// A FOL symbol: a constant, variable, function, or predicate name.
///
/// Backed by `Rc<str>` rather than an interned numeric handle, since the
/// persistence format (see [`crate::persist`]) writes symbol text directly
/// into the syntax tree with no side table to resolve it against.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Rc<str>);

/// The reserved symbol for the equality predicate. Not a legal user-input
/// predicate name (predicates must start with a lowercase letter).
pub const EQ: &str = "=";

impl Symbol {
    pub fn new(s: impl AsRef<str>) -> Self {
        Symbol(Rc::from(s.as_ref()))
    }

    pub fn eq_symbol() -> Self {
        Symbol::new(EQ)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_eq(&self) -> bool {
        self.0.as_ref() == EQ
    }

    /// Generated names (variables, constants, Skolem functions) live under
    /// this namespace; the parser rejects it from user input.
    pub fn is_reserved(&self) -> bool {
        self.0.starts_with('_')
    }

    pub fn starts_uppercase_or_digit(&self) -> bool {
        self.0
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    pub fn starts_lowercase(&self) -> bool {
        self.0.chars().next().is_some_and(|c| c.is_ascii_lowercase())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol(Rc::from(s))
    }
}

/// Generates fresh reserved-prefix symbols, scoped to one `to_cnf` call.
///
/// Per-kind prefixes (`_v`/`_C`/`_H`) so later passes can tell a renamed
/// variable from a Skolem constant from a Skolem function at a glance.
#[derive(Debug, Default)]
pub struct NameGenerator {
    vars: u64,
    consts: u64,
    funcs: u64,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_var(&mut self) -> Symbol {
        self.vars += 1;
        Symbol::new(format!("_v{}", self.vars))
    }

    pub fn fresh_const(&mut self) -> Symbol {
        self.consts += 1;
        Symbol::new(format!("_C{}", self.consts))
    }

    pub fn fresh_fn(&mut self) -> Symbol {
        self.funcs += 1;
        Symbol::new(format!("_H{}", self.funcs))
    }
}
