use crate::expr::symbol::Symbol;

/// Quantifier kind carried by [`Node::Quantified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantifier {
    ForAll,
    Exists,
}

impl Quantifier {
    pub fn flip(self) -> Quantifier {
        match self {
            Quantifier::ForAll => Quantifier::Exists,
            Quantifier::Exists => Quantifier::ForAll,
        }
    }
}

/// An immutable FOL syntax-tree node.
///
/// A tagged union with one variant per legal shape, replacing the source
/// language's heterogeneous `{kind, head, children}` record — see
/// `DESIGN.md` for the rationale. `And`/`Or`/`Equals` carry `Vec<Node>`
/// directly, since those are the associative-commutative operators stored
/// in flattened n-ary canonical form; `Not` and `Implies` are fixed arity.
///
/// Equality is the `Predicate` variant with head [`Symbol::eq_symbol`] —
/// a reserved sentinel that cannot collide with a user predicate name
/// (user predicates must start with a lowercase letter; `=` cannot).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    Constant(Symbol),
    Variable(Symbol),
    Function(Symbol, Vec<Node>),
    Predicate(Symbol, Vec<Node>),
    Not(Box<Node>),
    And(Vec<Node>),
    Or(Vec<Node>),
    Implies(Box<Node>, Box<Node>),
    Equals(Vec<Node>),
    Quantified(Quantifier, Symbol, Box<Node>),
}

// Builders
// -----------------------------------------------------------------------

impl Node {
    pub fn constant(name: impl Into<Symbol>) -> Node {
        Node::Constant(name.into())
    }

    pub fn var(name: impl Into<Symbol>) -> Node {
        Node::Variable(name.into())
    }

    pub fn func(name: impl Into<Symbol>, args: Vec<Node>) -> Node {
        Node::Function(name.into(), args)
    }

    pub fn pred(name: impl Into<Symbol>, args: Vec<Node>) -> Node {
        Node::Predicate(name.into(), args)
    }

    pub fn equality(a: Node, b: Node) -> Node {
        Node::Predicate(Symbol::eq_symbol(), vec![a, b])
    }

    pub fn not(a: Node) -> Node {
        match a {
            Node::Not(inner) => *inner,
            a => Node::Not(Box::new(a)),
        }
    }

    pub fn and(children: Vec<Node>) -> Node {
        Node::And(children)
    }

    pub fn or(children: Vec<Node>) -> Node {
        Node::Or(children)
    }

    pub fn implies(a: Node, b: Node) -> Node {
        Node::Implies(Box::new(a), Box::new(b))
    }

    pub fn equiv(children: Vec<Node>) -> Node {
        Node::Equals(children)
    }

    pub fn quantified(q: Quantifier, var: impl Into<Symbol>, body: Node) -> Node {
        Node::Quantified(q, var.into(), Box::new(body))
    }

    pub fn forall(var: impl Into<Symbol>, body: Node) -> Node {
        Node::quantified(Quantifier::ForAll, var, body)
    }

    pub fn exists(var: impl Into<Symbol>, body: Node) -> Node {
        Node::quantified(Quantifier::Exists, var, body)
    }
}

// Derived predicates (pure functions of shape)
// -----------------------------------------------------------------------

impl Node {
    pub fn is_term(&self) -> bool {
        matches!(self, Node::Constant(_) | Node::Variable(_) | Node::Function(..))
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, Node::Predicate(s, args) if s.is_eq() && args.len() == 2)
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Node::Predicate(..))
    }

    /// An atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Node::Predicate(..) => true,
            Node::Not(inner) => inner.is_atom(),
            _ => false,
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(
            self,
            Node::Predicate(..)
                | Node::Not(_)
                | Node::And(_)
                | Node::Or(_)
                | Node::Implies(..)
                | Node::Equals(_)
                | Node::Quantified(..)
        )
    }

    pub fn is_negation(&self) -> bool {
        matches!(self, Node::Not(_))
    }

    pub fn is_conjunction(&self) -> bool {
        matches!(self, Node::And(_))
    }

    pub fn is_disjunction(&self) -> bool {
        matches!(self, Node::Or(_))
    }

    pub fn is_implication(&self) -> bool {
        matches!(self, Node::Implies(..))
    }

    pub fn is_equivalence(&self) -> bool {
        matches!(self, Node::Equals(_))
    }

    pub fn is_quantified(&self) -> bool {
        matches!(self, Node::Quantified(..))
    }

    /// Whether `self` is quantifier-free, `Implies`-free, and `Equals`-free
    /// — i.e. built only from `And`/`Or`/`Not`/atoms.
    pub fn is_quantifier_free(&self) -> bool {
        match self {
            Node::Quantified(..) | Node::Implies(..) | Node::Equals(_) => false,
            Node::Not(a) => a.is_quantifier_free(),
            Node::And(cs) | Node::Or(cs) => cs.iter().all(Node::is_quantifier_free),
            _ => true,
        }
    }

    fn is_cnf_disjunction(&self) -> bool {
        match self {
            Node::Or(cs) => cs.iter().all(|c| c.is_literal()),
            _ => false,
        }
    }

    fn is_cnf_conjunction(&self) -> bool {
        match self {
            Node::And(cs) => cs.iter().all(|c| c.is_cnf_disjunction() || c.is_literal()),
            _ => false,
        }
    }

    pub fn is_cnf(&self) -> bool {
        self.is_cnf_conjunction() || self.is_cnf_disjunction() || self.is_literal()
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Constant(_) | Node::Variable(_) => &[],
            Node::Function(_, cs) | Node::Predicate(_, cs) => cs,
            Node::Not(c) => std::slice::from_ref(c),
            Node::And(cs) | Node::Or(cs) | Node::Equals(cs) => cs,
            Node::Implies(a, _) => std::slice::from_ref(a),
            Node::Quantified(_, _, body) => std::slice::from_ref(body),
        }
    }
}
