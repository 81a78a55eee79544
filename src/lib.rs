//! NXGEN - BURS code generation for the NEANDER-X 16-bit CPU.
//!
//! NXGEN compiles expression/statement trees into NEANDER-X assembly using a
//! bottom-up rewrite system (BURS): a post-order labeling pass computes, for
//! every node, the cheapest way to reduce it to each grammar nonterminal, and
//! a top-down emission pass replays the recorded choices, instantiating the
//! winning rules' instruction templates.
//!
//! # Primary Usage
//!
//! ```ignore
//! use bumpalo::Bump;
//! use nxgen::{CompilationSession, Grammar, compile_module};
//! use nxgen::ir::parse_module;
//!
//! let arena = Bump::new();
//! let session = CompilationSession::new(&arena);
//! let module = parse_module(source, &session)?;
//! let asm = compile_module(&module, Grammar::neanderx(), &session)?;
//! ```
//!
//! # Architecture
//!
//! - [`isel`] - The instruction selector: grammar table, labeler, rule
//!   decoder, operand extraction and template emitter
//! - [`ir`] - Tree IR: operators, nodes, leaf payloads and the text front end
//! - [`core`] - Shared infrastructure (session, errors)
//! - [`neander`] - NEANDER-X module glue: segments, data directives,
//!   prologue/epilogue and the per-function compilation driver

pub mod core;
pub mod ir;
pub mod isel;
pub mod neander;

pub use crate::core::{CodegenError, CodegenResult, CompilationSession, SessionStats};
pub use crate::ir::{Leaf, Node, Op, OpKind, TreeBuilder, Ty};
pub use crate::isel::{Emitter, Grammar, Labeler, Nt, RuleId, NO_RULE};
pub use crate::neander::compile_module;
