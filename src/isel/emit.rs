//! The emission pass: replay recorded choices, instantiate templates.
//!
//! Emission asks a node for a nonterminal; the rule decoder recovers which
//! rule the labeler chose for it. All of the rule's operand subtrees are
//! realized first - a register operand prints its instructions on the way
//! and contributes no text, an address or constant operand prints nothing
//! and contributes its text - and only then is the rule's own template
//! instantiated. Instruction templates (trailing newline) are appended to
//! the output; operand templates pass their substituted text upward.
//! Chain rules with empty templates therefore print nothing and simply
//! re-enter emission at the source nonterminal of the same node.

use std::fmt::Write;

use crate::core::{CodegenError, CodegenResult, CompilationSession};
use crate::ir::{Leaf, Node};
use crate::isel::grammar::{Grammar, NO_RULE};
use crate::isel::kids::operands;
use crate::isel::nonterm::Nt;
use crate::isel::rule::Rule;

pub struct Emitter<'g, 's, 'a> {
    grammar: &'g Grammar,
    session: &'s CompilationSession<'a>,
}

impl<'g, 's, 'a> Emitter<'g, 's, 'a> {
    pub fn new(grammar: &'g Grammar, session: &'s CompilationSession<'a>) -> Self {
        Self { grammar, session }
    }

    /// Emit `node` reduced to `goal`, appending instructions to `out`.
    /// The top-level goal for a statement tree is [`Nt::Stmt`].
    pub fn emit(&self, node: &'a Node<'a>, goal: Nt, out: &mut String) -> CodegenResult<()> {
        self.reduce(node, goal, out).map(|_| ())
    }

    /// Emit `node` at `goal`; instructions go to `out`, the returned
    /// string is the operand text the reduction contributes to a consumer.
    fn reduce(&self, node: &'a Node<'a>, goal: Nt, out: &mut String) -> CodegenResult<String> {
        let st = node
            .state()
            .ok_or(CodegenError::UnlabeledNode { op: node.op })?;
        let id = self.grammar.rule_choice(&st, goal);
        if id == NO_RULE {
            return Err(CodegenError::UnsatisfiableGoal {
                op: node.op,
                goal,
            });
        }
        let rule = self.grammar.rule(id);
        log::trace!("emit {} via rule {} ({})", goal, id, rule);

        let mut texts = Vec::new();
        for (kid, nt) in operands(self.grammar, node, id)? {
            texts.push(self.reduce(kid, nt, out)?);
        }

        let text = self.instantiate(rule, id, node, &texts)?;
        if rule.is_instruction() {
            out.push_str(&text);
            self.session.record_instruction_emitted();
            Ok(String::new())
        } else {
            Ok(text)
        }
    }

    /// Substitute placeholders into a rule template.
    fn instantiate(
        &self,
        rule: &Rule,
        id: u16,
        node: &Node<'a>,
        texts: &[String],
    ) -> CodegenResult<String> {
        let mut label: Option<u32> = None;
        let mut out = String::with_capacity(rule.template.len());
        let mut chars = rule.template.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some(d @ '0'..='9') => {
                    let index = d as usize - '0' as usize;
                    let text = texts.get(index).ok_or(CodegenError::OperandMismatch {
                        rule: id,
                        index,
                        count: texts.len(),
                    })?;
                    out.push_str(text);
                }
                Some('a') => out.push_str(&self.payload_text(node)?),
                Some('L') => {
                    // One fresh id per instantiation, shared by every %L
                    // in the template so its internal branches agree.
                    let l = *label.get_or_insert_with(|| self.session.next_label());
                    write!(out, "{}", l).unwrap();
                }
                Some('%') => out.push('%'),
                other => {
                    return Err(CodegenError::BadTemplate {
                        rule: id,
                        found: other.unwrap_or(' '),
                    })
                }
            }
        }
        Ok(out)
    }

    /// Text for a `%a` payload reference: constants print their value,
    /// symbols their storage-qualified name, frame slots their offset,
    /// virtual registers their memory slot.
    fn payload_text(&self, node: &Node<'a>) -> CodegenResult<String> {
        match node.leaf {
            Some(Leaf::Const { value, .. }) => Ok(value.to_string()),
            Some(Leaf::Global(name)) | Some(Leaf::Target(name)) => Ok(name.to_string()),
            Some(Leaf::Frame(offset)) | Some(Leaf::Local(offset)) => Ok(offset.to_string()),
            Some(Leaf::Vreg(id)) => Ok(format!("_vreg{}", self.session.vreg_slot(id)?)),
            None => Err(CodegenError::MalformedTree {
                stage: "emit",
                op: node.op,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::op::*;
    use crate::ir::TreeBuilder;
    use crate::isel::Labeler;
    use bumpalo::Bump;

    #[test]
    fn test_store_constant_to_frame_slot() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let grammar = Grammar::neanderx();
        let labeler = Labeler::new(grammar, &session);
        let emitter = Emitter::new(grammar, &session);

        let slot = b.leaf(ADDRLP2, Leaf::Local(-2));
        let k = b.leaf(CNSTI2, Leaf::Const { value: 7, size: 2 });
        let store = b.node(ASGNI2, &[slot, k]);
        labeler.label(store).unwrap();

        let mut out = String::new();
        emitter.emit(store, Nt::Stmt, &mut out).unwrap();
        // The constant is realized in AC, then stored frame-relative.
        assert_eq!(out, "    LDI 7\n    STA -2,FP\n");
    }

    #[test]
    fn test_label_statement_emits_one_line_and_no_operands() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let grammar = Grammar::neanderx();
        let labeler = Labeler::new(grammar, &session);
        let emitter = Emitter::new(grammar, &session);

        let label = b.leaf(LABELV, Leaf::Target("_Ltop"));
        labeler.label(label).unwrap();
        let mut out = String::new();
        emitter.emit(label, Nt::Stmt, &mut out).unwrap();
        assert_eq!(out, "_Ltop:\n");
    }

    #[test]
    fn test_unsatisfiable_goal_is_fatal() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let grammar = Grammar::neanderx();
        let labeler = Labeler::new(grammar, &session);
        let emitter = Emitter::new(grammar, &session);

        // A label never reduces to reg.
        let label = b.leaf(LABELV, Leaf::Target("_Ltop"));
        labeler.label(label).unwrap();
        let mut out = String::new();
        assert_eq!(
            emitter.emit(label, Nt::Reg, &mut out),
            Err(CodegenError::UnsatisfiableGoal {
                op: LABELV,
                goal: Nt::Reg
            })
        );
    }

    #[test]
    fn test_shift_loop_labels_are_unique_per_instantiation() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let b = TreeBuilder::new(&session);
        let grammar = Grammar::neanderx();
        let labeler = Labeler::new(grammar, &session);
        let emitter = Emitter::new(grammar, &session);

        let mut out = String::new();
        for _ in 0..2 {
            let v = b.node(INDIRI2, &[b.leaf(ADDRLP2, Leaf::Local(-2))]);
            let n = b.node(INDIRI2, &[b.leaf(ADDRLP2, Leaf::Local(-4))]);
            let shift = b.node(LSHI2, &[v, n]);
            labeler.label(shift).unwrap();
            emitter.emit(shift, Nt::Reg, &mut out).unwrap();
        }

        // Two instantiations of the software shift loop must not share
        // label names.
        assert!(out.contains("_shl2_0:"));
        assert!(out.contains("_shl2_1:"));
        assert!(out.contains("JMP _shl2_0\n"));
        assert!(out.contains("JMP _shl2_1\n"));
    }
}
