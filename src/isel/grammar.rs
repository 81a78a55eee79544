//! Grammar indexes and the rule decoder.
//!
//! The rule table is flat static data; this module builds the derived
//! structure the selector needs: which rules can match a given root
//! operator, which chain rules coerce from a given nonterminal, and the
//! per-nonterminal decode tables that translate the dense choice indexes
//! stored in node state back into global rule ids.

use hashbrown::HashMap;
use std::sync::OnceLock;

use crate::ir::Op;
use crate::isel::nonterm::Nt;
use crate::isel::rule::{Pat, Rule};
use crate::isel::state::State;
use crate::isel::tables::RULES;

/// Global rule id: 1-based position in the grammar table.
pub type RuleId = u16;

/// Sentinel for "no rule recorded".
pub const NO_RULE: RuleId = 0;

/// The grammar table plus its derived indexes. Immutable once built and
/// shared by every function compiled in the run.
pub struct Grammar {
    rules: &'static [Rule],

    /// Non-chain rules, keyed by their pattern's root operator, ascending.
    by_op: HashMap<Op, Vec<RuleId>>,

    /// Chain rules keyed by source nonterminal, ascending.
    chains: [Vec<RuleId>; Nt::COUNT],

    /// decode[nt][dense] = global rule id; index 0 is [`NO_RULE`].
    decode: [Vec<RuleId>; Nt::COUNT],

    /// dense[global - 1] = dense index of that rule among its
    /// nonterminal's competitors.
    dense: Vec<u16>,
}

impl Grammar {
    /// The NEANDER-X grammar, built once per process.
    pub fn neanderx() -> &'static Grammar {
        static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
        GRAMMAR.get_or_init(|| Grammar::build(RULES))
    }

    fn build(rules: &'static [Rule]) -> Grammar {
        let mut by_op: HashMap<Op, Vec<RuleId>> = HashMap::new();
        let mut chains: [Vec<RuleId>; Nt::COUNT] = Default::default();
        let mut decode: [Vec<RuleId>; Nt::COUNT] = Default::default();
        for d in decode.iter_mut() {
            d.push(NO_RULE);
        }
        let mut dense = Vec::with_capacity(rules.len());

        for (i, rule) in rules.iter().enumerate() {
            let id = (i + 1) as RuleId;
            match rule.pat {
                Pat::Op(op, _) => by_op.entry(op).or_default().push(id),
                Pat::Nt(src) => chains[src.index()].push(id),
            }
            let table = &mut decode[rule.lhs.index()];
            dense.push(table.len() as u16);
            table.push(id);
        }

        log::debug!(
            "grammar: {} rules, {} root operators",
            rules.len(),
            by_op.len()
        );

        Grammar {
            rules,
            by_op,
            chains,
            decode,
            dense,
        }
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[(id - 1) as usize]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Non-chain rules whose pattern root is `op`, in tie-break order.
    pub fn rules_for(&self, op: Op) -> &[RuleId] {
        self.by_op.get(&op).map_or(&[], Vec::as_slice)
    }

    /// Chain rules coercing from `src`, in tie-break order.
    pub fn chains_from(&self, src: Nt) -> &[RuleId] {
        &self.chains[src.index()]
    }

    /// Dense index of a rule among the competitors for its nonterminal.
    pub fn dense_index(&self, id: RuleId) -> u16 {
        self.dense[(id - 1) as usize]
    }

    /// The rule decoder: translate a node's recorded choice for `goal`
    /// back to the global rule id, [`NO_RULE`] if that nonterminal was
    /// never reduced. The labeler only stores dense indexes it issued, so
    /// the lookup cannot go out of range for a well-formed `State`.
    pub fn rule_choice(&self, state: &State, goal: Nt) -> RuleId {
        self.decode[goal.index()][state.choice(goal) as usize]
    }
}
