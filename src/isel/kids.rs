//! Operand extraction.
//!
//! Given a selected rule and the node it was chosen for, find the
//! descendant subtrees that are the rule's visible operands: the nodes
//! matched by the nonterminal leaves of the rule's pattern, left to right,
//! each paired with the nonterminal it must be reduced to. Rules that fold
//! nested structure (indexed addressing, memory-to-memory arithmetic) skip
//! over the interior operator nodes entirely; chain rules expose the node
//! itself at the source nonterminal.
//!
//! Because operands are derived from the same pattern the labeler matched,
//! their order and count agree with the template's `%0`..`%9` placeholders
//! by construction.

use crate::core::{CodegenError, CodegenResult};
use crate::ir::Node;
use crate::isel::grammar::{Grammar, RuleId};
use crate::isel::nonterm::Nt;
use crate::isel::rule::Pat;

/// The operand subtrees of `rule` at `node`, with their goal nonterminals.
pub fn operands<'a>(
    grammar: &Grammar,
    node: &'a Node<'a>,
    rule: RuleId,
) -> CodegenResult<Vec<(&'a Node<'a>, Nt)>> {
    let pat = &grammar.rule(rule).pat;
    let mut out = Vec::new();
    match pat {
        Pat::Nt(src) => out.push((node, *src)),
        Pat::Op(_, kid_pats) => collect(kid_pats, node, &mut out)?,
    }
    Ok(out)
}

fn collect<'a>(
    pats: &[Pat],
    node: &'a Node<'a>,
    out: &mut Vec<(&'a Node<'a>, Nt)>,
) -> CodegenResult<()> {
    for (i, pat) in pats.iter().enumerate() {
        let kid = node.kid(i).ok_or(CodegenError::MalformedTree {
            stage: "kids",
            op: node.op,
        })?;
        match pat {
            Pat::Nt(nt) => out.push((kid, *nt)),
            Pat::Op(op, grand) => {
                debug_assert_eq!(kid.op, *op, "kids pattern diverged from labeling");
                collect(grand, kid, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CompilationSession;
    use crate::ir::op::*;
    use crate::ir::{Leaf, TreeBuilder};
    use crate::isel::{Labeler, Nt};
    use bumpalo::Bump;

    #[test]
    fn test_folded_addressing_exposes_inner_operands() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let grammar = Grammar::neanderx();
        let labeler = Labeler::new(grammar, &session);

        // INDIRU1(ADDP2(reg, addr)): no addr rule matches a
        // register-first sum, so the indexed fold is the only reduction.
        // It consumes the ADDP2 node and exposes the index expression and
        // the global address.
        let base = b.leaf(ADDRGP2, Leaf::Global("_buf"));
        let idx_slot = b.leaf(ADDRLP2, Leaf::Local(-2));
        let idx = b.node(INDIRI2, &[idx_slot]);
        let sum = b.node(ADDP2, &[idx, base]);
        let load = b.node(INDIRU1, &[sum]);
        labeler.label(load).unwrap();

        let st = load.state().unwrap();
        let id = grammar.rule_choice(&st, Nt::Reg);
        assert_eq!(grammar.rule(id).template, "    TAX\n    LDA %1,X\n");

        let ops = operands(grammar, load, id).unwrap();
        assert_eq!(ops.len(), 2);
        assert!(std::ptr::eq(ops[0].0, idx));
        assert_eq!(ops[0].1, Nt::Reg);
        assert!(std::ptr::eq(ops[1].0, base));
        assert_eq!(ops[1].1, Nt::Addr);
    }

    #[test]
    fn test_chain_rule_exposes_the_node_itself() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let grammar = Grammar::neanderx();
        let labeler = Labeler::new(grammar, &session);

        let k = b.leaf(CNSTI2, Leaf::Const { value: 7, size: 2 });
        labeler.label(k).unwrap();

        let st = k.state().unwrap();
        let id = grammar.rule_choice(&st, Nt::Reg); // reg: con2
        let ops = operands(grammar, k, id).unwrap();
        assert_eq!(ops.len(), 1);
        assert!(std::ptr::eq(ops[0].0, k));
        assert_eq!(ops[0].1, Nt::Con2);
    }

    #[test]
    fn test_leaf_rules_have_no_operands() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let grammar = Grammar::neanderx();
        let labeler = Labeler::new(grammar, &session);

        let label = b.leaf(LABELV, Leaf::Target("_Ltop"));
        labeler.label(label).unwrap();
        let id = grammar.rule_choice(&label.state().unwrap(), Nt::Stmt);
        assert!(operands(grammar, label, id).unwrap().is_empty());
    }
}
