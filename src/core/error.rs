//! Error types for NEANDER-X code generation.
//!
//! Using thiserror for more idiomatic error handling.
//!
//! Code generation recognizes exactly two classes of failure, both of which
//! indicate a defect in the grammar or in tree construction rather than a
//! recoverable condition: a malformed tree reaching the selector, and a
//! request for a nonterminal no rule can produce. There is no retry or
//! partial-result path; the driver aborts the run.

use thiserror::Error;

use crate::ir::Op;
use crate::isel::Nt;

/// Main error type for code generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("{stage}: malformed tree at {op}")]
    MalformedTree { stage: &'static str, op: Op },

    #[error("no rule reduces {op} to nonterminal {goal}")]
    UnsatisfiableGoal { op: Op, goal: Nt },

    #[error("{op} reached emission without selection state")]
    UnlabeledNode { op: Op },

    #[error("rule {rule} references operand %{index} but extracts only {count}")]
    OperandMismatch {
        rule: u16,
        index: usize,
        count: usize,
    },

    #[error("rule {rule} template contains unknown directive %{found}")]
    BadTemplate { rule: u16, found: char },

    #[error("too many virtual registers in one function (limit {limit})")]
    VregOverflow { limit: usize },
}

/// Result type alias for code generation operations.
pub type CodegenResult<T> = Result<T, CodegenError>;
