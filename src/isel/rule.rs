//! Grammar rules: patterns, costs and instruction templates.

use std::fmt;

use crate::ir::Op;
use crate::isel::nonterm::Nt;

/// A tree pattern: either a subtree that must reduce to a nonterminal, or
/// an operator with patterns for each of its children.
///
/// A rule whose whole pattern is a single [`Pat::Nt`] is a chain rule: it
/// coerces one nonterminal into another at this node, consumes no structure
/// and is applied through closure rather than operator matching.
#[derive(Debug, Clone, Copy)]
pub enum Pat {
    Nt(Nt),
    Op(Op, &'static [Pat]),
}

/// Rule cost: a fixed constant, or 0 when the node's constant payload lies
/// in an inclusive range and infinity otherwise (the small-constant rules).
#[derive(Debug, Clone, Copy)]
pub enum Cost {
    Fixed(u16),
    InRange(i64, i64),
}

/// One production of the tree grammar.
///
/// Rules are identified by their 1-based position in the grammar table;
/// that order is the tie-break order, so it is load-bearing.
pub struct Rule {
    pub lhs: Nt,
    pub pat: Pat,
    pub cost: Cost,
    /// Instruction template. `%0`..`%9` splice operand text, `%a` the
    /// node's formatted payload, `%L` a synthesized label id unique to one
    /// instantiation, `%%` a literal percent sign.
    pub template: &'static str,
}

impl Rule {
    /// Chain rules coerce a source nonterminal without matching structure.
    pub fn chain_source(&self) -> Option<Nt> {
        match self.pat {
            Pat::Nt(src) => Some(src),
            Pat::Op(..) => None,
        }
    }

    /// A template ending in a newline is a printable instruction; anything
    /// else (operand text like `%a,FP`, or an empty chain template) only
    /// contributes text to its consumer.
    pub fn is_instruction(&self) -> bool {
        self.template.ends_with('\n')
    }

    /// Fixed cost component; range-costed rules contribute 0 or infinity
    /// depending on the node, evaluated by the labeler.
    pub fn fixed_cost(&self) -> u16 {
        match self.cost {
            Cost::Fixed(c) => c,
            Cost::InRange(..) => 0,
        }
    }

    /// Number of operand subtrees this rule exposes: the nonterminal
    /// leaves of its pattern (the node itself for chain rules).
    pub fn operand_count(&self) -> usize {
        fn count(pat: &Pat) -> usize {
            match pat {
                Pat::Nt(_) => 1,
                Pat::Op(_, kids) => kids.iter().map(count).sum(),
            }
        }
        count(&self.pat)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn pat(p: &Pat, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match p {
                Pat::Nt(nt) => write!(f, "{}", nt),
                Pat::Op(op, kids) => {
                    write!(f, "{}", op)?;
                    if !kids.is_empty() {
                        write!(f, "(")?;
                        for (i, k) in kids.iter().enumerate() {
                            if i > 0 {
                                write!(f, ",")?;
                            }
                            pat(k, f)?;
                        }
                        write!(f, ")")?;
                    }
                    Ok(())
                }
            }
        }
        write!(f, "{}: ", self.lhs)?;
        pat(&self.pat, f)
    }
}
