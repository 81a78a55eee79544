//! Arena-based compilation session management.
//!
//! This module provides simplified lifetime management for code generation
//! using arena allocation. IR nodes and interned strings are tied to the
//! session lifetime, eliminating complex lifetime propagation.
//!
//! The session also owns the only state that outlives a single tree: the
//! monotonic synthetic-label counter (never reset) and the bounded
//! virtual-register slot table (reset at function entry). Carrying them
//! here, rather than in process-wide globals, keeps the
//! one-function-at-a-time discipline visible in the types.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use bumpalo::Bump;

use crate::core::error::{CodegenError, CodegenResult};

/// Number of dedicated memory slots for virtual registers.
///
/// The program header reserves exactly this many `_vregN` words; a function
/// that needs more is a fatal error, not a silent fallback.
pub const VREG_SLOTS: usize = 16;

/// Arena-based compilation session.
///
/// This manages the lifetime of all compilation objects, using arena
/// allocation to simplify memory management. One session compiles one
/// module; functions are compiled strictly one at a time.
pub struct CompilationSession<'arena> {
    /// Arena allocator for IR nodes and interned strings.
    arena: &'arena Bump,

    /// Session statistics for debugging.
    stats: RefCell<SessionStats>,

    /// Monotonic counter for synthesized labels (shift loops, sign
    /// extension). Never reset, so label ids are unique across the run.
    labels: Cell<u32>,

    /// Virtual-register id to spill-slot mapping, reset per function.
    vreg_slots: RefCell<HashMap<u32, usize>>,

    /// Interned strings for symbol names.
    interned_strings: RefCell<HashMap<String, &'arena str>>,

    /// Current function being compiled.
    current_function: RefCell<Option<String>>,
}

impl<'arena> CompilationSession<'arena> {
    /// Create a new compilation session with the given arena.
    pub fn new(arena: &'arena Bump) -> Self {
        Self {
            arena,
            stats: RefCell::new(SessionStats::default()),
            labels: Cell::new(0),
            vreg_slots: RefCell::new(HashMap::new()),
            interned_strings: RefCell::new(HashMap::new()),
            current_function: RefCell::new(None),
        }
    }

    /// Get access to the arena allocator.
    pub fn arena(&self) -> &'arena Bump {
        self.arena
    }

    /// Allocate an object in the session arena.
    pub fn alloc<T>(&self, value: T) -> &'arena mut T {
        self.arena.alloc(value)
    }

    /// Intern a string in the arena.
    pub fn intern_str(&self, s: &str) -> &'arena str {
        let mut strings = self.interned_strings.borrow_mut();
        if let Some(&interned) = strings.get(s) {
            return interned;
        }

        let interned = self.arena.alloc_str(s);
        strings.insert(s.to_string(), interned);
        interned
    }

    /// Allocate the next unique synthetic label id.
    pub fn next_label(&self) -> u32 {
        let id = self.labels.get();
        self.labels.set(id + 1);
        id
    }

    /// Memory slot for a virtual register, allocating one on first use.
    ///
    /// The slot table is bounded by [`VREG_SLOTS`]; running out means the
    /// front end produced more simultaneously-live virtual registers than
    /// the target runtime reserves space for.
    pub fn vreg_slot(&self, vreg: u32) -> CodegenResult<usize> {
        let mut slots = self.vreg_slots.borrow_mut();
        if let Some(&slot) = slots.get(&vreg) {
            return Ok(slot);
        }
        let slot = slots.len();
        if slot >= VREG_SLOTS {
            return Err(CodegenError::VregOverflow { limit: VREG_SLOTS });
        }
        slots.insert(vreg, slot);
        Ok(slot)
    }

    /// Reset per-function state and mark `name` as the function under
    /// compilation. Must be called once per function, before labeling.
    pub fn begin_function(&self, name: &str) {
        self.vreg_slots.borrow_mut().clear();
        *self.current_function.borrow_mut() = Some(name.to_string());
        log::debug!("compiling function {}", name);
    }

    /// Name of the function currently being compiled, if any.
    pub fn current_function(&self) -> Option<String> {
        self.current_function.borrow().clone()
    }

    /// Record that a function was compiled.
    pub fn record_function_compiled(&self, name: &str, lines: usize) {
        let mut stats = self.stats.borrow_mut();
        stats.functions_compiled += 1;
        stats.lines_emitted += lines;

        if stats.largest_function_lines < lines {
            stats.largest_function_lines = lines;
            stats.largest_function_name = name.to_string();
        }
    }

    /// Record one emitted instruction template.
    pub fn record_instruction_emitted(&self) {
        self.stats.borrow_mut().instructions_emitted += 1;
    }

    /// Record one labeled tree node.
    pub fn record_node_labeled(&self) {
        self.stats.borrow_mut().nodes_labeled += 1;
    }

    /// Get compilation statistics.
    pub fn stats(&self) -> SessionStats {
        self.stats.borrow().clone()
    }
}

/// Compilation session statistics.
#[derive(Debug, Default, Clone)]
pub struct SessionStats {
    /// Number of functions compiled.
    pub functions_compiled: usize,

    /// Tree nodes processed by the labeler.
    pub nodes_labeled: usize,

    /// Instruction templates instantiated by the emitter.
    pub instructions_emitted: usize,

    /// Total assembly lines written for function bodies.
    pub lines_emitted: usize,

    /// Largest function compiled (for analysis).
    pub largest_function_lines: usize,

    /// Name of largest function.
    pub largest_function_name: String,
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compilation Session Statistics:")?;
        writeln!(f, "  Functions compiled: {}", self.functions_compiled)?;
        writeln!(f, "  Nodes labeled: {}", self.nodes_labeled)?;
        writeln!(f, "  Instructions emitted: {}", self.instructions_emitted)?;
        writeln!(f, "  Assembly lines: {}", self.lines_emitted)?;

        if !self.largest_function_name.is_empty() {
            writeln!(
                f,
                "  Largest function: {} ({} lines)",
                self.largest_function_name, self.largest_function_lines
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_counter_is_monotonic() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);

        assert_eq!(session.next_label(), 0);
        assert_eq!(session.next_label(), 1);
        session.begin_function("f");
        // begin_function resets vreg slots, never labels
        assert_eq!(session.next_label(), 2);
    }

    #[test]
    fn test_vreg_slots_allocate_and_reset() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);

        session.begin_function("f");
        assert_eq!(session.vreg_slot(7).unwrap(), 0);
        assert_eq!(session.vreg_slot(3).unwrap(), 1);
        assert_eq!(session.vreg_slot(7).unwrap(), 0); // stable mapping

        session.begin_function("g");
        assert_eq!(session.vreg_slot(3).unwrap(), 0); // fresh table
    }

    #[test]
    fn test_vreg_slot_table_is_bounded() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);

        session.begin_function("f");
        for i in 0..VREG_SLOTS as u32 {
            assert!(session.vreg_slot(i).is_ok());
        }
        assert_eq!(
            session.vreg_slot(VREG_SLOTS as u32),
            Err(CodegenError::VregOverflow { limit: VREG_SLOTS })
        );
    }

    #[test]
    fn test_string_interning() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);

        let s1 = session.intern_str("counter");
        let s2 = session.intern_str("counter");
        let s3 = session.intern_str("main");

        assert_eq!(s1.as_ptr(), s2.as_ptr());
        assert_ne!(s1.as_ptr(), s3.as_ptr());
    }

    #[test]
    fn test_session_statistics() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);

        session.record_function_compiled("main", 42);
        session.record_instruction_emitted();
        session.record_instruction_emitted();

        let stats = session.stats();
        assert_eq!(stats.functions_compiled, 1);
        assert_eq!(stats.instructions_emitted, 2);
        assert_eq!(stats.largest_function_name, "main");

        let output = format!("{}", stats);
        assert!(output.contains("Functions compiled: 1"));
        assert!(output.contains("main (42 lines)"));
    }
}
