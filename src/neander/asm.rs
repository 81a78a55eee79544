//! Assembly output for NEANDER-X modules.
//!
//! The [`ModuleEmitter`] drives whole-module compilation: program header,
//! data definitions, one function at a time (prologue, labeled and emitted
//! statement forest, epilogue), program footer. Output is plain text
//! assembly for the NEANDER-X toolchain.

use std::fmt::Write;

use crate::core::{CodegenResult, CompilationSession, VREG_SLOTS};
use crate::ir::{DataDef, DataItem, Function, Module};
use crate::isel::{Emitter, Grammar, Labeler, Nt};

/// Output sections of the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Code,
    Data,
    Bss,
    Lit,
}

impl Segment {
    fn directive(self) -> &'static str {
        match self {
            Segment::Code => ".text",
            Segment::Data => ".data",
            Segment::Bss => ".bss",
            Segment::Lit => ".rodata",
        }
    }
}

/// Compile a parsed module to assembly text.
pub fn compile_module<'a>(
    module: &Module<'a>,
    grammar: &Grammar,
    session: &'a CompilationSession<'a>,
) -> CodegenResult<String> {
    let mut emitter = ModuleEmitter::new(grammar, session);
    emitter.program_begin();

    for name in &module.exports {
        emitter.export(name);
    }
    for name in &module.imports {
        emitter.import(name);
    }
    for data in &module.datas {
        emitter.data_def(data);
    }
    for func in &module.functions {
        emitter.compile_function(func)?;
    }

    emitter.program_end();
    Ok(emitter.finish())
}

/// Streams one module's assembly, tracking the current segment.
pub struct ModuleEmitter<'g, 's, 'a> {
    grammar: &'g Grammar,
    session: &'s CompilationSession<'a>,
    out: String,
    segment: Option<Segment>,
}

impl<'g, 's, 'a> ModuleEmitter<'g, 's, 'a> {
    pub fn new(grammar: &'g Grammar, session: &'s CompilationSession<'a>) -> Self {
        Self {
            grammar,
            session,
            out: String::new(),
            segment: None,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Program header: reset vector, runtime temporaries, virtual-register
    /// slots, and the startup stub that calls `_main`.
    pub fn program_begin(&mut self) {
        self.out.push_str("; NEANDER-X 16-bit Assembly\n");
        self.out.push_str("; Generated by nxgen\n\n");
        self.out.push_str("; Memory layout:\n");
        self.out
            .push_str("; 0x0000-0x002F: Runtime variables (below stack area)\n");
        self.out
            .push_str("; 0x0030-0x00FF: Stack (SP starts at 0x00FF, grows down)\n");
        self.out.push_str("; 0x0100+: Code\n\n");
        self.out.push_str("    .org 0x0000\n");
        self.out.push_str("    JMP _start\n\n");
        self.out.push_str("; Runtime variables\n");
        self.out
            .push_str("_tmp:     .word 0     ; General purpose 16-bit temp\n");
        self.out
            .push_str("_tmp_hi:  .word 0     ; For 32-bit ops (high word)\n");
        self.out
            .push_str("_tmp2:    .word 0     ; Second 16-bit temp\n");
        self.out
            .push_str("_tmp2_hi: .word 0     ; For 32-bit ops (high word)\n");
        self.out
            .push_str("_mask_ff: .word 0x00FF ; Mask for 8-bit values\n");
        for i in 0..VREG_SLOTS {
            let _ = writeln!(self.out, "_vreg{}:   .word 0     ; VREG spill slot {}", i, i);
        }
        self.out.push('\n');
        self.out.push_str("; Code section above the stack area\n");
        self.out.push_str("    .org 0x0100\n");
        self.out.push_str("_start:\n");
        self.out.push_str("    CALL _main\n");
        self.out.push_str("    HLT\n");
    }

    pub fn program_end(&mut self) {
        self.out.push_str("\n; End of program\n");
        self.out.push_str("    HLT\n");
    }

    fn switch_segment(&mut self, segment: Segment) {
        if self.segment == Some(segment) {
            return;
        }
        self.segment = Some(segment);
        let _ = writeln!(self.out, "\n    {}", segment.directive());
    }

    pub fn export(&mut self, name: &str) {
        let _ = writeln!(self.out, "    .global _{}", name);
    }

    pub fn import(&mut self, name: &str) {
        let _ = writeln!(self.out, "    .extern _{}", name);
    }

    /// Emit one data definition. Definitions that reserve space only go
    /// to `.bss`, string literals to `.rodata`, everything else to
    /// `.data`.
    pub fn data_def(&mut self, data: &DataDef<'a>) {
        let segment = if data.items.iter().all(|i| matches!(i, DataItem::Space(_))) {
            Segment::Bss
        } else if data.items.iter().any(|i| matches!(i, DataItem::Ascii(_))) {
            Segment::Lit
        } else {
            Segment::Data
        };
        self.switch_segment(segment);

        let _ = writeln!(self.out, "_{}:", data.name);
        for item in &data.items {
            match item {
                DataItem::Bytes(bytes) => {
                    for b in bytes {
                        let _ = writeln!(self.out, "    .byte {}", b);
                    }
                }
                DataItem::Words(words) => {
                    for w in words {
                        // 16-bit value in little-endian
                        let _ = writeln!(self.out, "    .byte {}", w & 0xFF);
                        let _ = writeln!(self.out, "    .byte {}", (w >> 8) & 0xFF);
                    }
                }
                DataItem::Longs(longs) => {
                    for l in longs {
                        let _ = writeln!(self.out, "    .byte {}", l & 0xFF);
                        let _ = writeln!(self.out, "    .byte {}", (l >> 8) & 0xFF);
                        let _ = writeln!(self.out, "    .byte {}", (l >> 16) & 0xFF);
                        let _ = writeln!(self.out, "    .byte {}", (l >> 24) & 0xFF);
                    }
                }
                DataItem::Addr(sym) => {
                    let _ = writeln!(self.out, "    .word _{}", sym);
                }
                DataItem::Space(n) => {
                    let _ = writeln!(self.out, "    .space {}", n);
                }
                DataItem::Ascii(s) => {
                    for b in s.bytes() {
                        let _ = writeln!(self.out, "    .byte {}", b);
                    }
                }
            }
        }
    }

    /// Compile one function: label and emit every statement tree between
    /// the standard prologue and epilogue.
    pub fn compile_function(&mut self, func: &Function<'a>) -> CodegenResult<()> {
        self.switch_segment(Segment::Code);
        self.session.begin_function(func.name);

        let labeler = Labeler::new(self.grammar, self.session);
        let emitter = Emitter::new(self.grammar, self.session);

        let mut body = String::new();
        for stmt in func.body.iter().copied() {
            labeler.label(stmt)?;
            emitter.emit(stmt, Nt::Stmt, &mut body)?;
        }

        let _ = writeln!(self.out, "\n; Function: {}", func.name);
        let _ = writeln!(self.out, "_{}:", func.name);
        self.out.push_str("    ; Prologue\n");
        self.out.push_str("    PUSH_FP\n");
        self.out.push_str("    TSF\n");
        if func.frame_size > 0 {
            let _ = writeln!(
                self.out,
                "    ; Allocate {} bytes for locals",
                func.frame_size
            );
            for _ in 0..func.frame_size.div_ceil(2) {
                self.out.push_str("    LDI 0\n");
                self.out.push_str("    PUSH\n");
            }
        }
        self.out.push_str(&body);
        self.out.push_str("    ; Epilogue\n");
        self.out.push_str("    TFS\n");
        self.out.push_str("    POP_FP\n");
        self.out.push_str("    RET\n");

        self.session
            .record_function_compiled(func.name, body.lines().count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::parse_module;
    use bumpalo::Bump;

    #[test]
    fn test_module_shell() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let module = parse_module(
            "export main\n\
             data counter { word 0 }\n\
             data buf { space 8 }\n\
             func main() { (retv) }\n",
            &session,
        )
        .unwrap();

        let asm = compile_module(&module, Grammar::neanderx(), &session).unwrap();

        assert!(asm.starts_with("; NEANDER-X 16-bit Assembly"));
        assert!(asm.contains("    .global _main\n"));
        assert!(asm.contains("\n    .data\n_counter:\n    .byte 0\n    .byte 0\n"));
        assert!(asm.contains("\n    .bss\n_buf:\n    .space 8\n"));
        assert!(asm.contains("\n    .text\n"));
        assert!(asm.contains("_main:\n    ; Prologue\n    PUSH_FP\n    TSF\n"));
        assert!(asm.contains("; ret void\n"));
        assert!(asm.trim_end().ends_with("HLT"));
    }

    #[test]
    fn test_frame_allocation_rounds_to_words() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let module = parse_module("func f() locals(x:2, c:1) { (retv) }", &session).unwrap();
        let asm = compile_module(&module, Grammar::neanderx(), &session).unwrap();

        assert!(asm.contains("; Allocate 4 bytes for locals"));
        assert_eq!(asm.matches("    LDI 0\n    PUSH\n").count(), 2);
    }
}
