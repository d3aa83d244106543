//! The seven-pass CNF conversion pipeline (`spec.md` §4.3), ported
//! line-for-line in stage order from `original_source/knowledge_base/cnf.py`:
//! biconditional elimination, implication elimination, negation
//! propagation (NNF), bound-variable standardization, free-variable
//! standardization, Skolemization with quantifier dropping, and
//! distribution of `∧` over `∨`. The pipeline denormalizes its input to
//! strictly-binary shape on entry and renormalizes its output on exit, so
//! every stage below can assume `And`/`Or`/`Equals` nodes it touches carry
//! exactly two children.
//!
//! Name generation uses one [`NameGenerator`] shared across the whole call
//! (not reset per stage, and not per the original's UUID suffixes) — see
//! `spec.md` §9 and `DESIGN.md`.

use std::collections::BTreeMap;

use crate::expr::{denormalize, normalize, NameGenerator, Node, Quantifier, Symbol};
use crate::nf::walk::{run_stateless, walk};
use crate::subst::Substitution;

/// Converts a formula to clausal normal form, returning the CNF result
/// together with the substitution `ρ` mapping every generated symbol
/// (standardized-apart variable, Skolem constant, Skolem function) back to
/// the original node it replaced.
///
/// Uses a private, freshly-reset generator. When converting several
/// formulas that will be combined into one clause set (as the saturation
/// loop does for the premises and the negated goal), call
/// [`to_cnf_with_generator`] instead with one generator shared across all
/// of them — otherwise each call's reserved names start over at `_v1`,
/// `_C1`, `_H1`, and two formulas converted independently could collide.
pub fn to_cnf(phi: &Node) -> (Node, Substitution) {
    to_cnf_with_generator(phi, &mut NameGenerator::new())
}

/// As [`to_cnf`], but draws generated names from the caller's generator
/// instead of starting a fresh one.
pub fn to_cnf_with_generator(phi: &Node, gen: &mut NameGenerator) -> (Node, Substitution) {
    debug_assert!(phi.is_formula(), "to_cnf requires a formula");

    let mut node = denormalize(phi);
    let mut rho = Substitution::new();

    node = run_stateless(&node, eliminate_biconditional_step);
    node = run_stateless(&node, eliminate_implication_step);
    node = run_stateless(&node, propagate_negation_step);

    let mut bound_replaced = BTreeMap::new();
    {
        let mut ctx = BoundCtx {
            gen: &mut *gen,
            replaced: &mut bound_replaced,
        };
        node = walk(&node, &mut ctx, &mut Vec::new(), &mut standardize_bound_step);
    }
    merge_rho(&mut rho, &bound_replaced);

    let mut free_replaced = BTreeMap::new();
    {
        let mut ctx = FreeCtx {
            gen: &mut *gen,
            renamed: BTreeMap::new(),
            replaced: &mut free_replaced,
        };
        node = walk(&node, &mut ctx, &mut Vec::new(), &mut standardize_free_step);
    }
    merge_rho(&mut rho, &free_replaced);

    let mut skolem_replaced = BTreeMap::new();
    {
        let mut ctx = SkolemCtx {
            gen: &mut *gen,
            replaced: &mut skolem_replaced,
        };
        node = walk(&node, &mut ctx, &mut Vec::new(), &mut skolemize_step);
    }
    merge_rho(&mut rho, &skolem_replaced);

    node = run_stateless(&node, distribute_step);

    let result = normalize(&node);
    debug_assert!(result.is_cnf(), "to_cnf produced a non-CNF result: {result:?}");
    (result, rho)
}

fn merge_rho(rho: &mut Substitution, new: &BTreeMap<Symbol, Node>) {
    for (k, v) in new {
        debug_assert!(rho.get(k).is_none(), "generated symbol `{k}` used twice");
        rho.insert(k.clone(), v.clone());
    }
}

// Stage 1: biconditional elimination — A <=> B  ~>  (A => B) & (B => A)
// ---------------------------------------------------------------------

fn eliminate_biconditional_step(n: &Node) -> Node {
    match n {
        Node::Equals(cs) if cs.len() == 2 => {
            let (a, b) = (cs[0].clone(), cs[1].clone());
            Node::And(vec![Node::implies(a.clone(), b.clone()), Node::implies(b, a)])
        }
        _ => n.clone(),
    }
}

// Stage 2: implication elimination — A => B  ~>  !A | B
// ------------------------------------------------------

fn eliminate_implication_step(n: &Node) -> Node {
    match n {
        Node::Implies(a, b) => Node::Or(vec![Node::not((**a).clone()), (**b).clone()]),
        _ => n.clone(),
    }
}

// Stage 3: negation propagation (De Morgan + double-negation + quantifier
// flip), bringing the formula to negation normal form.
// ------------------------------------------------------------------------

fn propagate_negation_step(n: &Node) -> Node {
    match n {
        Node::Not(inner) => match inner.as_ref() {
            Node::Not(innermost) => (**innermost).clone(),
            Node::And(cs) if cs.len() == 2 => Node::Or(vec![Node::not(cs[0].clone()), Node::not(cs[1].clone())]),
            Node::Or(cs) if cs.len() == 2 => Node::And(vec![Node::not(cs[0].clone()), Node::not(cs[1].clone())]),
            Node::Quantified(q, v, body) => {
                Node::Quantified(q.flip(), v.clone(), Box::new(Node::not((**body).clone())))
            }
            _ => n.clone(),
        },
        _ => n.clone(),
    }
}

// Stage 4: standardize bound variables apart — every quantifier gets a
// fresh reserved variable name, with uses inside its scope rewritten to
// match. `stack` holds (original name, generated name) frames, innermost
// binding last, so a leaf looks up the nearest enclosing quantifier first.
// ----------------------------------------------------------------------

struct BoundCtx<'a> {
    gen: &'a mut NameGenerator,
    replaced: &'a mut BTreeMap<Symbol, Node>,
}

fn standardize_bound_step(n: &Node, ctx: &mut BoundCtx, stack: &mut Vec<(Symbol, Symbol)>) -> Node {
    match n {
        Node::Quantified(q, old, body) => {
            if old.is_reserved() {
                return n.clone();
            }
            let new = ctx.gen.fresh_var();
            ctx.replaced.insert(new.clone(), Node::Variable(old.clone()));
            stack.push((old.clone(), new.clone()));
            Node::Quantified(*q, new, body.clone())
        }
        Node::Variable(v) => {
            for (old, new) in stack.iter().rev() {
                if old == v {
                    return Node::Variable(new.clone());
                }
            }
            n.clone()
        }
        _ => n.clone(),
    }
}

// Stage 5: standardize free variables — every variable left unbound after
// stage 4 gets one fresh reserved name, consistently reused at every
// occurrence. No stack: freedom from quantifier scope means no shadowing.
// --------------------------------------------------------------------

struct FreeCtx<'a> {
    gen: &'a mut NameGenerator,
    renamed: BTreeMap<Symbol, Symbol>,
    replaced: &'a mut BTreeMap<Symbol, Node>,
}

fn standardize_free_step(n: &Node, ctx: &mut FreeCtx, _stack: &mut Vec<()>) -> Node {
    match n {
        Node::Variable(v) if !v.is_reserved() => {
            let new = match ctx.renamed.get(v) {
                Some(new) => new.clone(),
                None => {
                    let fresh = ctx.gen.fresh_var();
                    ctx.renamed.insert(v.clone(), fresh.clone());
                    ctx.replaced.insert(fresh.clone(), Node::Variable(v.clone()));
                    fresh
                }
            };
            Node::Variable(new)
        }
        _ => n.clone(),
    }
}

// Stage 6: Skolemization — each `Exists` variable is replaced by a fresh
// function of the universally quantified variables enclosing it (a fresh
// constant if none enclose it), and every quantifier is dropped.
// ------------------------------------------------------------------------

#[derive(Clone)]
enum SkolemFrame {
    Universal(Symbol),
    Replace(Symbol, Node),
}

struct SkolemCtx<'a> {
    gen: &'a mut NameGenerator,
    replaced: &'a mut BTreeMap<Symbol, Node>,
}

fn skolemize_step(n: &Node, ctx: &mut SkolemCtx, stack: &mut Vec<SkolemFrame>) -> Node {
    match n {
        Node::Quantified(Quantifier::ForAll, v, body) => {
            stack.push(SkolemFrame::Universal(v.clone()));
            (**body).clone()
        }
        Node::Quantified(Quantifier::Exists, v, body) => {
            let universal: Vec<Symbol> = stack
                .iter()
                .filter_map(|f| match f {
                    SkolemFrame::Universal(u) => Some(u.clone()),
                    SkolemFrame::Replace(..) => None,
                })
                .collect();
            let replacement = if universal.is_empty() {
                let c = ctx.gen.fresh_const();
                ctx.replaced.insert(c.clone(), Node::Variable(v.clone()));
                Node::Constant(c)
            } else {
                let f = ctx.gen.fresh_fn();
                ctx.replaced.insert(f.clone(), Node::Variable(v.clone()));
                Node::Function(f, universal.into_iter().map(Node::Variable).collect())
            };
            stack.push(SkolemFrame::Replace(v.clone(), replacement));
            (**body).clone()
        }
        Node::Variable(v) => {
            for frame in stack.iter() {
                if let SkolemFrame::Replace(old, new) = frame {
                    if old == v {
                        return new.clone();
                    }
                }
            }
            n.clone()
        }
        _ => n.clone(),
    }
}

// Stage 7: distribute conjunction over disjunction —
// A | (B & C)  ~>  (A | B) & (A | C), likewise on the other side.
// ------------------------------------------------------------------

fn distribute_step(n: &Node) -> Node {
    match n {
        Node::Or(cs) if cs.len() == 2 => {
            let (a, b) = (&cs[0], &cs[1]);
            if let Node::And(acs) = a {
                if acs.len() == 2 {
                    let rv1 = Node::Or(vec![acs[0].clone(), b.clone()]);
                    let rv2 = Node::Or(vec![acs[1].clone(), b.clone()]);
                    return Node::And(vec![rv1, rv2]);
                }
            }
            if let Node::And(bcs) = b {
                if bcs.len() == 2 {
                    let rv1 = Node::Or(vec![a.clone(), bcs[0].clone()]);
                    let rv2 = Node::Or(vec![a.clone(), bcs[1].clone()]);
                    return Node::And(vec![rv1, rv2]);
                }
            }
            n.clone()
        }
        _ => n.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_implication_to_cnf() {
        let phi = Node::implies(Node::pred("p", vec![]), Node::pred("q", vec![]));
        let (cnf, _) = to_cnf(&phi);
        assert!(cnf.is_cnf());
    }

    #[test]
    fn skolemizes_existential_under_universal() {
        let phi = Node::forall(
            "x",
            Node::exists("y", Node::pred("loves", vec![Node::var("x"), Node::var("y")])),
        );
        let (cnf, rho) = to_cnf(&phi);
        assert!(cnf.is_cnf());
        assert!(cnf.is_quantifier_free());
        let skolem_fn = rho.iter().find(|(k, _)| k.as_str().starts_with("_H"));
        assert!(skolem_fn.is_some(), "expected a Skolem function in rho: {rho:?}");
    }

    #[test]
    fn skolemizes_bare_existential_to_constant() {
        let phi = Node::exists("x", Node::pred("even", vec![Node::var("x")]));
        let (cnf, rho) = to_cnf(&phi);
        assert!(cnf.is_cnf());
        let skolem_const = rho.iter().find(|(k, _)| k.as_str().starts_with("_C"));
        assert!(skolem_const.is_some(), "expected a Skolem constant in rho: {rho:?}");
    }

    #[test]
    fn distributes_disjunction_over_conjunction() {
        let a = Node::pred("a", vec![]);
        let b = Node::pred("b", vec![]);
        let c = Node::pred("c", vec![]);
        let phi = Node::or(vec![a.clone(), Node::and(vec![b.clone(), c.clone()])]);
        let (cnf, _) = to_cnf(&phi);
        assert!(cnf.is_cnf());
        assert!(matches!(cnf, Node::And(_)));
    }

    #[test]
    fn eliminates_biconditional_into_two_implications() {
        let phi = Node::equiv(vec![Node::pred("p", vec![]), Node::pred("q", vec![])]);
        let (cnf, _) = to_cnf(&phi);
        assert!(cnf.is_cnf());
    }

    #[test]
    fn standardizes_same_named_variables_apart() {
        let phi = Node::and(vec![
            Node::forall("x", Node::pred("p", vec![Node::var("x")])),
            Node::forall("x", Node::pred("q", vec![Node::var("x")])),
        ]);
        let (cnf, rho) = to_cnf(&phi);
        assert!(cnf.is_cnf());
        let renamed_vars = rho.iter().filter(|(k, _)| k.as_str().starts_with("_v")).count();
        assert_eq!(renamed_vars, 2);
    }
}
