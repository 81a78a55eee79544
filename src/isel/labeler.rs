//! The labeling pass: bottom-up, cost-minimizing rule selection.
//!
//! For every node, in strict post order, the labeler evaluates each rule
//! whose pattern matches the subtree and records, per target nonterminal,
//! the cheapest rule found. Whenever a nonterminal's cost improves, every
//! chain rule sourced from it is re-evaluated immediately, cascading until
//! the node's costs stop improving; the cascade is bounded by the number
//! of nonterminals.
//!
//! Ties keep the first (lowest-numbered) rule: candidates are visited in
//! table order and only a strictly smaller cost replaces the incumbent.
//! This makes selection deterministic and is relied upon by the grammar.

use crate::core::{CodegenError, CodegenResult, CompilationSession};
use crate::ir::Node;
use crate::isel::grammar::Grammar;
use crate::isel::nonterm::Nt;
use crate::isel::rule::{Cost, Pat, Rule};
use crate::isel::state::{State, INFINITE_COST};

pub struct Labeler<'g, 's, 'a> {
    grammar: &'g Grammar,
    session: &'s CompilationSession<'a>,
}

impl<'g, 's, 'a> Labeler<'g, 's, 'a> {
    pub fn new(grammar: &'g Grammar, session: &'s CompilationSession<'a>) -> Self {
        Self { grammar, session }
    }

    /// Label `node` and its whole subtree. Children are fully labeled
    /// before the node itself, since rule costs reference child costs at
    /// specific nonterminals.
    pub fn label(&self, node: &'a Node<'a>) -> CodegenResult<()> {
        for i in 0..node.op.arity() {
            let kid = node.kid(i).ok_or(CodegenError::MalformedTree {
                stage: "label",
                op: node.op,
            })?;
            self.label(kid)?;
        }
        self.relabel(node)
    }

    /// Label `node` alone, from its children's current states. Fresh state
    /// replaces whatever was recorded before.
    pub fn relabel(&self, node: &'a Node<'a>) -> CodegenResult<()> {
        let mut st = State::new();

        // Recalculation shortcut: a node flagged as recomputing an already
        // labeled value may adopt that node's free reductions. Only
        // zero-cost entries transfer; anything dearer must re-win here.
        if let Some(donor) = node.cse.get() {
            if let Some(donor_st) = donor.state() {
                for nt in Nt::ALL {
                    if donor_st.cost(nt) == 0 {
                        st.set(nt, 0, donor_st.choice(nt));
                    }
                }
            }
        }

        for &id in self.grammar.rules_for(node.op) {
            let rule = self.grammar.rule(id);
            if let Some(cost) = self.match_cost(rule, node) {
                self.improve(&mut st, rule.lhs, cost, id);
            }
        }

        log::trace!(
            "labeled {}: stmt={} reg={}",
            node.op,
            st.cost(Nt::Stmt),
            st.cost(Nt::Reg)
        );
        self.session.record_node_labeled();
        node.set_state(st);
        Ok(())
    }

    /// Record `rule` for its nonterminal if strictly cheaper, then close
    /// over chain rules sourced from that nonterminal.
    fn improve(&self, st: &mut State, nt: Nt, cost: u32, id: u16) {
        if cost >= INFINITE_COST as u32 || cost >= st.cost(nt) as u32 {
            return;
        }
        st.set(nt, cost as u16, self.grammar.dense_index(id));
        for &chain_id in self.grammar.chains_from(nt) {
            let chain = self.grammar.rule(chain_id);
            self.improve(st, chain.lhs, cost + chain.fixed_cost() as u32, chain_id);
        }
    }

    /// Candidate cost of `rule` at `node`: the rule's own cost plus the
    /// children's recorded costs at the nonterminals the pattern demands.
    /// `None` when the pattern does not match or a demanded reduction is
    /// unreachable.
    fn match_cost(&self, rule: &Rule, node: &Node<'a>) -> Option<u32> {
        let mut total = match rule.cost {
            Cost::Fixed(c) => c as u32,
            Cost::InRange(lo, hi) => {
                let v = node.const_value()?;
                if v < lo || v > hi {
                    return None;
                }
                0
            }
        };
        self.match_pat(&rule.pat, node, &mut total)?;
        Some(total)
    }

    fn match_pat(&self, pat: &Pat, node: &Node<'a>, total: &mut u32) -> Option<()> {
        match pat {
            // A bare-nonterminal pattern is a chain rule; those never
            // enter the operator-matching loop.
            Pat::Nt(_) => None,
            Pat::Op(op, kid_pats) => {
                if node.op != *op {
                    return None;
                }
                for (i, kid_pat) in kid_pats.iter().enumerate() {
                    let kid = node.kid(i)?;
                    match kid_pat {
                        Pat::Nt(nt) => {
                            let c = kid.cost(*nt);
                            if c >= INFINITE_COST {
                                return None;
                            }
                            *total += c as u32;
                        }
                        Pat::Op(..) => self.match_pat(kid_pat, kid, total)?,
                    }
                }
                Some(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::op::*;
    use crate::ir::{Leaf, TreeBuilder};
    use bumpalo::Bump;

    #[test]
    fn test_constant_one_reaches_the_small_constant_nonterminal() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let labeler = Labeler::new(Grammar::neanderx(), &session);

        let one = b.leaf(CNSTI1, Leaf::Const { value: 1, size: 1 });
        labeler.label(one).unwrap();
        assert_eq!(one.cost(Nt::ConN), 0);
        assert_eq!(one.cost(Nt::Con1), 0);
        assert_eq!(one.cost(Nt::Reg), 1); // via reg: con1

        let two = b.leaf(CNSTI1, Leaf::Const { value: 2, size: 1 });
        labeler.label(two).unwrap();
        assert_eq!(two.cost(Nt::ConN), INFINITE_COST);
        assert_eq!(two.cost(Nt::Con1), 0);
    }

    #[test]
    fn test_closure_cascades_through_chain_rules() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let labeler = Labeler::new(Grammar::neanderx(), &session);

        // A frame address reaches faddr at 0, addr at 0 through the
        // chain, and its load reaches stmt through stmt: reg.
        let slot = b.leaf(ADDRLP2, Leaf::Local(-2));
        let load = b.node(INDIRI2, &[slot]);
        labeler.label(load).unwrap();

        assert_eq!(slot.cost(Nt::Faddr), 0);
        assert_eq!(slot.cost(Nt::Addr), 0);
        assert_eq!(load.cost(Nt::Reg), 1); // INDIRI2(faddr) at cost 1
        assert_eq!(load.cost(Nt::Stmt), 1); // stmt: reg chain
    }

    #[test]
    fn test_malformed_tree_is_fatal() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let labeler = Labeler::new(Grammar::neanderx(), &session);

        // An INDIR with no child is malformed by construction.
        let bad = session.alloc(Node::new(INDIRI2, [None, None], None));
        assert_eq!(
            labeler.label(bad),
            Err(CodegenError::MalformedTree {
                stage: "label",
                op: INDIRI2
            })
        );
    }
}
