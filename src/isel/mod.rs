//! The BURS instruction selector.
//!
//! Selection runs in two passes over each statement tree:
//!
//! 1. The [`Labeler`] walks the tree in post order and computes, for every
//!    node and every grammar nonterminal, the minimum cost of reducing that
//!    subtree to that nonterminal, recording which rule wins. Chain rules
//!    (nonterminal-to-nonterminal coercions) are closed over immediately at
//!    each node.
//! 2. The [`Emitter`] walks the same tree top down, decoding the recorded
//!    choice for the requested nonterminal back to a global rule, realizing
//!    the rule's operand subtrees first, then instantiating its template.
//!
//! The grammar itself is static data ([`tables`]); [`Grammar`] builds the
//! operator index, the chain-rule lists and the per-nonterminal decode
//! tables from it once.

pub mod emit;
pub mod grammar;
pub mod kids;
pub mod labeler;
pub mod nonterm;
pub mod rule;
pub mod state;
pub mod tables;

pub use emit::Emitter;
pub use grammar::{Grammar, RuleId, NO_RULE};
pub use kids::operands;
pub use labeler::Labeler;
pub use nonterm::Nt;
pub use rule::{Cost, Pat, Rule};
pub use state::{State, INFINITE_COST};
