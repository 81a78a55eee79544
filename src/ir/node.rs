//! Arena-allocated IR tree nodes.
//!
//! A [`Node`] carries its operator tag, up to two ordered children, an
//! optional leaf payload and the mutable selection [`State`] the labeler
//! attaches. Nodes live in the session arena; the selector never mutates a
//! tree beyond attaching state.

use std::cell::{Cell, RefCell};

use crate::core::CompilationSession;
use crate::ir::op::Op;
use crate::isel::{Nt, State, INFINITE_COST, NO_RULE};

/// Payload attached to leaf nodes, plus branch targets on compare/label
/// statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf<'a> {
    /// Integer constant with its width in bytes.
    Const { value: i64, size: u8 },
    /// Storage-qualified name of a global symbol.
    Global(&'a str),
    /// Parameter address: positive FP-relative offset.
    Frame(i32),
    /// Local address: negative FP-relative offset.
    Local(i32),
    /// Virtual-register id, bound to a memory slot at emission.
    Vreg(u32),
    /// Branch target or label-definition text.
    Target(&'a str),
}

/// One node of an expression/statement tree.
#[derive(Debug)]
pub struct Node<'a> {
    pub op: Op,
    kids: [Option<&'a Node<'a>>; 2],
    pub leaf: Option<Leaf<'a>>,

    /// Common-subexpression alias: if set, this node is known to compute
    /// the same value as the referenced (already labeled) node, and the
    /// labeler may adopt its zero-cost reductions. The referenced node
    /// keeps ownership of its own state.
    pub cse: Cell<Option<&'a Node<'a>>>,

    state: RefCell<Option<State>>,
}

impl<'a> Node<'a> {
    pub fn new(op: Op, kids: [Option<&'a Node<'a>>; 2], leaf: Option<Leaf<'a>>) -> Self {
        Self {
            op,
            kids,
            leaf,
            cse: Cell::new(None),
            state: RefCell::new(None),
        }
    }

    pub fn kid(&self, i: usize) -> Option<&'a Node<'a>> {
        self.kids.get(i).copied().flatten()
    }

    /// Iterator over the present children.
    pub fn kids(&self) -> impl Iterator<Item = &'a Node<'a>> + '_ {
        self.kids.iter().flatten().copied()
    }

    /// True once the labeler has attached selection state.
    pub fn labeled(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Selection state, if labeled. `State` is small and `Copy`.
    pub fn state(&self) -> Option<State> {
        *self.state.borrow()
    }

    pub fn set_state(&self, st: State) {
        *self.state.borrow_mut() = Some(st);
    }

    /// Drop any attached state (used by tests to re-label a tree).
    pub fn clear_state(&self) {
        *self.state.borrow_mut() = None;
        for kid in self.kids() {
            kid.clear_state();
        }
    }

    /// Recorded cost of reducing this node to `nt`, or infinity when
    /// unlabeled or unreachable.
    pub fn cost(&self, nt: Nt) -> u16 {
        self.state
            .borrow()
            .as_ref()
            .map_or(INFINITE_COST, |st| st.cost(nt))
    }

    /// Dense per-nonterminal choice index, 0 when none was recorded.
    pub fn choice(&self, nt: Nt) -> u16 {
        self.state
            .borrow()
            .as_ref()
            .map_or(NO_RULE, |st| st.choice(nt))
    }

    /// Constant payload value, if this node carries one.
    pub fn const_value(&self) -> Option<i64> {
        match self.leaf {
            Some(Leaf::Const { value, .. }) => Some(value),
            _ => None,
        }
    }
}

/// Convenience constructor for building trees in a session arena.
///
/// Used by the text front end and by tests; the selector itself only reads
/// nodes.
pub struct TreeBuilder<'a> {
    session: &'a CompilationSession<'a>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(session: &'a CompilationSession<'a>) -> Self {
        Self { session }
    }

    pub fn node(&self, op: Op, kids: &[&'a Node<'a>]) -> &'a Node<'a> {
        debug_assert_eq!(kids.len(), op.arity());
        let mut slots = [None, None];
        for (slot, kid) in slots.iter_mut().zip(kids) {
            *slot = Some(*kid);
        }
        self.session.alloc(Node::new(op, slots, None))
    }

    pub fn leaf(&self, op: Op, leaf: Leaf<'a>) -> &'a Node<'a> {
        self.session.alloc(Node::new(op, [None, None], Some(leaf)))
    }

    /// Node with both children and a branch-target payload (compares).
    pub fn branch(&self, op: Op, l: &'a Node<'a>, r: &'a Node<'a>, target: &'a str) -> &'a Node<'a> {
        self.session.alloc(Node::new(
            op,
            [Some(l), Some(r)],
            Some(Leaf::Target(target)),
        ))
    }

    pub fn intern(&self, s: &str) -> &'a str {
        self.session.intern_str(s)
    }
}
