//! Tree-walk engine used by every CNF pipeline stage (`spec.md` §4.3):
//! applies `f(node, ctx, stack)` to a node, runs to a per-node fixpoint,
//! then recurses into children. `ctx` is shared mutable state threaded
//! through the whole walk; `stack` is path-local and cloned whenever the
//! walk branches into a child, so bookkeeping from one branch never leaks
//! into a sibling. Ported from the single `walk`/`WalkState` pair in
//! `original_source/knowledge_base/syntax.py`, restructured per `spec.md`
//! §9's redesign flag into dispatch on the tagged union's discriminant
//! instead of a runtime `isinstance` check.

use crate::expr::Node;

/// Walks `node` to a fixpoint under `f`, threading `ctx` (shared) and
/// `stack` (cloned per branch) through the traversal.
pub fn walk<Ctx, Frame: Clone>(
    node: &Node,
    ctx: &mut Ctx,
    stack: &mut Vec<Frame>,
    f: &mut impl FnMut(&Node, &mut Ctx, &mut Vec<Frame>) -> Node,
) -> Node {
    let mut current = node.clone();
    loop {
        let prev = current.clone();
        let rewritten = f(&current, ctx, stack);
        let rebuilt = descend(&rewritten, ctx, stack, f);
        if rebuilt == prev {
            return prev;
        }
        current = rebuilt;
    }
}

fn descend<Ctx, Frame: Clone>(
    node: &Node,
    ctx: &mut Ctx,
    stack: &mut Vec<Frame>,
    f: &mut impl FnMut(&Node, &mut Ctx, &mut Vec<Frame>) -> Node,
) -> Node {
    match node {
        Node::Constant(_) | Node::Variable(_) => node.clone(),
        Node::Function(s, cs) => Node::Function(s.clone(), walk_list(cs, ctx, stack, f)),
        Node::Predicate(s, cs) => Node::Predicate(s.clone(), walk_list(cs, ctx, stack, f)),
        Node::Not(c) => {
            let mut branch = stack.clone();
            Node::Not(Box::new(walk(c, ctx, &mut branch, f)))
        }
        Node::And(cs) => Node::And(walk_list(cs, ctx, stack, f)),
        Node::Or(cs) => Node::Or(walk_list(cs, ctx, stack, f)),
        Node::Equals(cs) => Node::Equals(walk_list(cs, ctx, stack, f)),
        Node::Implies(a, b) => {
            let mut sa = stack.clone();
            let wa = walk(a, ctx, &mut sa, f);
            let mut sb = stack.clone();
            let wb = walk(b, ctx, &mut sb, f);
            Node::Implies(Box::new(wa), Box::new(wb))
        }
        Node::Quantified(q, v, body) => {
            let mut branch = stack.clone();
            Node::Quantified(*q, v.clone(), Box::new(walk(body, ctx, &mut branch, f)))
        }
    }
}

fn walk_list<Ctx, Frame: Clone>(
    cs: &[Node],
    ctx: &mut Ctx,
    stack: &mut Vec<Frame>,
    f: &mut impl FnMut(&Node, &mut Ctx, &mut Vec<Frame>) -> Node,
) -> Vec<Node> {
    cs.iter()
        .map(|c| {
            let mut branch = stack.clone();
            walk(c, ctx, &mut branch, f)
        })
        .collect()
}

/// Runs a stage that needs neither shared context nor path-local stack.
pub fn run_stateless(node: &Node, mut f: impl FnMut(&Node) -> Node) -> Node {
    walk(node, &mut (), &mut Vec::<()>::new(), &mut move |n: &Node, _: &mut (), _: &mut Vec<()>| f(n))
}
