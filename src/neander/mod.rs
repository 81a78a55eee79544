//! NEANDER-X module glue.
//!
//! Everything outside the selector proper lives here: the program header
//! with the runtime memory layout, segment switching, data directives,
//! linkage declarations, and the per-function driver that wraps selected
//! code in the prologue/epilogue required by the calling convention.

pub mod asm;

pub use asm::{compile_module, ModuleEmitter, Segment};
