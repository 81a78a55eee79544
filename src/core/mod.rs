//! Shared compilation infrastructure.
//!
//! This module contains the pieces every other part of the crate leans on:
//! the arena-backed [`CompilationSession`] and the fatal error type
//! [`CodegenError`].

pub mod error;
pub mod session;

pub use error::{CodegenError, CodegenResult};
pub use session::{CompilationSession, SessionStats, VREG_SLOTS};
