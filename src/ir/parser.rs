//! Parser for the textual tree-IR format.
//!
//! Hand-rolled cursor parser; errors carry the byte position and a short
//! context excerpt. The parser owns the symbol tables needed to resolve
//! frame slots to FP-relative offsets and applies the assembly naming
//! policy: globals become `_name`, labels become `_Lname`.

use std::collections::HashMap;

use crate::core::CompilationSession;
use crate::ir::op::{self, Op, OpKind};
use crate::ir::{DataDef, DataItem, FrameSlot, Function, Leaf, Module, Node, TreeBuilder};

/// Parse a complete module in the session arena.
pub fn parse_module<'a>(
    text: &str,
    session: &'a CompilationSession<'a>,
) -> Result<Module<'a>, String> {
    Parser::new(text, session).parse()
}

struct Parser<'a, 't> {
    text: &'t str,
    pos: usize,
    builder: TreeBuilder<'a>,

    // Per-function frame slot table: name -> (offset, is_param)
    slots: HashMap<&'t str, i32>,
}

impl<'a, 't> Parser<'a, 't> {
    fn new(text: &'t str, session: &'a CompilationSession<'a>) -> Self {
        Self {
            text,
            pos: 0,
            builder: TreeBuilder::new(session),
            slots: HashMap::new(),
        }
    }

    fn parse(mut self) -> Result<Module<'a>, String> {
        let mut module = Module {
            exports: Vec::new(),
            imports: Vec::new(),
            datas: Vec::new(),
            functions: Vec::new(),
        };

        loop {
            self.skip_whitespace();
            if self.is_eof() {
                break;
            }
            let keyword = self.read_identifier()?;
            match keyword {
                "export" => {
                    let name = self.read_identifier()?;
                    module.exports.push(self.builder.intern(name));
                }
                "import" => {
                    let name = self.read_identifier()?;
                    module.imports.push(self.builder.intern(name));
                }
                "data" => module.datas.push(self.parse_data()?),
                "func" => module.functions.push(self.parse_function()?),
                other => {
                    return Err(self.error(&format!(
                        "expected 'export', 'import', 'data' or 'func', found '{}'",
                        other
                    )))
                }
            }
        }

        Ok(module)
    }

    // ----- data definitions -----

    fn parse_data(&mut self) -> Result<DataDef<'a>, String> {
        let name = self.read_identifier()?;
        let name = self.builder.intern(name);
        self.expect('{')?;

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.try_read('}') {
                break;
            }
            let directive = self.read_identifier()?;
            match directive {
                "byte" => items.push(DataItem::Bytes(self.read_number_list()?)),
                "word" => items.push(DataItem::Words(self.read_number_list()?)),
                "long" => items.push(DataItem::Longs(self.read_number_list()?)),
                "addr" => {
                    let sym = self.read_identifier()?;
                    items.push(DataItem::Addr(self.builder.intern(sym)));
                }
                "space" => items.push(DataItem::Space(self.read_number()? as u32)),
                "ascii" => items.push(DataItem::Ascii(self.read_string()?)),
                other => return Err(self.error(&format!("unknown data directive '{}'", other))),
            }
        }

        Ok(DataDef { name, items })
    }

    fn read_number_list<T: TryFrom<i64>>(&mut self) -> Result<Vec<T>, String> {
        let mut out = Vec::new();
        loop {
            self.skip_whitespace();
            match self.current_char() {
                Some(c) if c.is_ascii_digit() || c == '-' => {
                    let n = self.read_number()?;
                    let v = T::try_from(n)
                        .map_err(|_| self.error(&format!("value {} out of range", n)))?;
                    out.push(v);
                }
                _ => break,
            }
        }
        if out.is_empty() {
            return Err(self.error("expected at least one value"));
        }
        Ok(out)
    }

    // ----- functions -----

    fn parse_function(&mut self) -> Result<Function<'a>, String> {
        let name = self.read_identifier()?;
        let name = self.builder.intern(name);
        self.slots.clear();

        // Parameters: FP+4 upward, 2-byte aligned (saved FP and return
        // address occupy FP+0..FP+3).
        self.expect('(')?;
        let mut params = Vec::new();
        let mut offset = 4i32;
        while !self.try_read(')') {
            if !params.is_empty() {
                self.expect(',')?;
            }
            let (pname, size) = self.read_slot_decl()?;
            self.slots.insert(pname, offset);
            params.push(FrameSlot {
                name: self.builder.intern(pname),
                size,
                offset,
            });
            offset += round_up(size, 2) as i32;
        }

        // Locals: FP-2 downward.
        let mut locals = Vec::new();
        let mut frame_size = 0u32;
        self.skip_whitespace();
        if self.peek_identifier("locals") {
            self.read_identifier()?;
            self.expect('(')?;
            while !self.try_read(')') {
                if !locals.is_empty() {
                    self.expect(',')?;
                }
                let (lname, size) = self.read_slot_decl()?;
                frame_size = round_up(frame_size + size, 2);
                let offset = -(frame_size as i32);
                self.slots.insert(lname, offset);
                locals.push(FrameSlot {
                    name: self.builder.intern(lname),
                    size,
                    offset,
                });
            }
        }

        self.expect('{')?;
        let mut body = Vec::new();
        loop {
            self.skip_whitespace();
            if self.try_read('}') {
                break;
            }
            body.push(self.parse_tree()?);
        }

        Ok(Function {
            name,
            params,
            locals,
            frame_size,
            body,
        })
    }

    fn read_slot_decl(&mut self) -> Result<(&'t str, u32), String> {
        let name = self.read_identifier()?;
        self.expect(':')?;
        let size = self.read_number()?;
        if !(1..=0xFFFF).contains(&size) {
            return Err(self.error("slot size must be between 1 and 65535"));
        }
        Ok((name, size as u32))
    }

    // ----- trees -----

    fn parse_tree(&mut self) -> Result<&'a Node<'a>, String> {
        self.expect('(')?;
        let opname = self.read_identifier()?;
        let op = Op::parse(opname)
            .ok_or_else(|| self.error(&format!("unknown operator '{}'", opname)))?;

        let node = match op.kind {
            OpKind::Cnst => {
                let value = self.read_number()?;
                self.builder.leaf(
                    op,
                    Leaf::Const {
                        value,
                        size: op.size,
                    },
                )
            }
            OpKind::AddrG => {
                self.skip_whitespace();
                if self.current_char() == Some('^') {
                    let label = self.read_label()?;
                    self.builder.leaf(op, Leaf::Target(label))
                } else {
                    let sym = self.read_identifier()?;
                    let qualified = self.builder.intern(&format!("_{}", sym));
                    self.builder.leaf(op, Leaf::Global(qualified))
                }
            }
            OpKind::AddrF | OpKind::AddrL => {
                let sym = self.read_identifier()?;
                let offset = *self
                    .slots
                    .get(sym)
                    .ok_or_else(|| self.error(&format!("unknown frame slot '{}'", sym)))?;
                let leaf = if offset >= 0 {
                    Leaf::Frame(offset)
                } else {
                    Leaf::Local(offset)
                };
                if (op.kind == OpKind::AddrF) != (offset >= 0) {
                    return Err(self.error(&format!(
                        "'{}' is a {}",
                        sym,
                        if offset >= 0 { "parameter" } else { "local" }
                    )));
                }
                self.builder.leaf(op, leaf)
            }
            OpKind::Vreg => {
                let id = self.read_number()? as u32;
                self.builder.leaf(op, Leaf::Vreg(id))
            }
            OpKind::Label => {
                let label = self.read_label()?;
                self.builder.leaf(op, Leaf::Target(label))
            }
            OpKind::Jump => {
                self.skip_whitespace();
                if self.current_char() == Some('^') {
                    // (jumpv ^l) is shorthand for a jump through the label
                    // address.
                    let label = self.read_label()?;
                    let addr = self.builder.leaf(op::ADDRGP2, Leaf::Target(label));
                    self.builder.node(op, &[addr])
                } else {
                    let target = self.parse_tree()?;
                    self.builder.node(op, &[target])
                }
            }
            OpKind::Eq | OpKind::Ne | OpKind::Lt | OpKind::Le | OpKind::Gt | OpKind::Ge => {
                let l = self.parse_tree()?;
                let r = self.parse_tree()?;
                let label = self.read_label()?;
                self.builder.branch(op, l, r, label)
            }
            _ => {
                let mut kids = Vec::with_capacity(op.arity());
                for _ in 0..op.arity() {
                    kids.push(self.parse_tree()?);
                }
                self.builder.node(op, &kids)
            }
        };

        self.expect(')')?;
        Ok(node)
    }

    fn read_label(&mut self) -> Result<&'a str, String> {
        self.skip_whitespace();
        self.expect('^')?;
        let name = self.read_identifier()?;
        Ok(self.builder.intern(&format!("_L{}", name)))
    }

    // ----- lexing -----

    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == ';' {
                while let Some(ch) = self.current_char() {
                    self.advance();
                    if ch == '\n' {
                        break;
                    }
                }
            } else if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn try_read(&mut self, ch: char) -> bool {
        self.skip_whitespace();
        if self.current_char() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, ch: char) -> Result<(), String> {
        if !self.try_read(ch) {
            return Err(self.error(&format!(
                "expected '{}' but found {:?}",
                ch,
                self.current_char()
            )));
        }
        Ok(())
    }

    fn peek_identifier(&self, word: &str) -> bool {
        let rest = &self.text[self.pos..];
        rest.starts_with(word)
            && !rest[word.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    fn read_identifier(&mut self) -> Result<&'t str, String> {
        self.skip_whitespace();
        let start = self.pos;

        match self.current_char() {
            Some(ch) if ch.is_alphabetic() || ch == '_' => {}
            other => {
                return Err(self.error(&format!("expected identifier, found {:?}", other)));
            }
        }
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        Ok(&self.text[start..self.pos])
    }

    fn read_number(&mut self) -> Result<i64, String> {
        self.skip_whitespace();
        let start = self.pos;
        if self.current_char() == Some('-') {
            self.advance();
        }
        if self.current_char() == Some('0')
            && self.text[self.pos..].len() > 1
            && matches!(self.text[self.pos + 1..].chars().next(), Some('x') | Some('X'))
        {
            self.advance();
            self.advance();
            let digits_start = self.pos;
            while self
                .current_char()
                .is_some_and(|c| c.is_ascii_hexdigit())
            {
                self.advance();
            }
            let digits = &self.text[digits_start..self.pos];
            let value = i64::from_str_radix(digits, 16)
                .map_err(|_| self.error("invalid hex literal"))?;
            return Ok(if self.text[start..].starts_with('-') {
                -value
            } else {
                value
            });
        }
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.text[start..self.pos]
            .parse::<i64>()
            .map_err(|_| self.error("expected number"))
    }

    fn read_string(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.current_char() {
                Some('"') => {
                    self.advance();
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => out.push('\n'),
                        Some('0') => out.push('\0'),
                        Some(c) => out.push(c),
                        None => return Err(self.error("unterminated string")),
                    }
                    self.advance();
                }
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn error(&self, msg: &str) -> String {
        let context_start = self.pos.saturating_sub(20);
        let context_end = (self.pos + 20).min(self.text.len());
        // Clamp to char boundaries for the excerpt.
        let start = (context_start..=self.pos)
            .find(|&i| self.text.is_char_boundary(i))
            .unwrap_or(self.pos);
        let end = (context_end..=self.text.len())
            .find(|&i| self.text.is_char_boundary(i))
            .unwrap_or(self.text.len());
        format!(
            "parse error at byte {}: {} (near '{}')",
            self.pos,
            msg,
            &self.text[start..end]
        )
    }
}

fn round_up(n: u32, align: u32) -> u32 {
    (n + align - 1) / align * align
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn test_parse_function_frame_layout() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let m = parse_module(
            "func f(a:2, b:1) locals(x:2, buf:10) { (retv) }",
            &session,
        )
        .unwrap();

        let f = &m.functions[0];
        assert_eq!(f.name, "f");
        assert_eq!(f.params[0].offset, 4);
        assert_eq!(f.params[1].offset, 6); // 1-byte param still 2-byte aligned
        assert_eq!(f.locals[0].offset, -2);
        assert_eq!(f.locals[1].offset, -12);
        assert_eq!(f.frame_size, 12);
        assert_eq!(f.body.len(), 1);
    }

    #[test]
    fn test_parse_tree_shapes() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let m = parse_module(
            "func f(p:2) {\
               (asgni2 (addrlp2 x) (addi2 (indiri2 (addrfp2 p)) (cnsti2 3)))\
             } ",
            &session,
        );
        // x is undeclared
        assert!(m.unwrap_err().contains("unknown frame slot"));

        let m = parse_module(
            "func f(p:2) locals(x:2) {\
               (asgni2 (addrlp2 x) (addi2 (indiri2 (addrfp2 p)) (cnsti2 3)))\
               (eqi2 (indiri2 (addrlp2 x)) (cnsti2 0) ^out)\
               (jumpv ^out)\
               (labelv ^out)\
               (retv)\
             } ",
            &session,
        )
        .unwrap();
        let f = &m.functions[0];
        assert_eq!(f.body.len(), 5);

        let asgn = f.body[0];
        assert_eq!(asgn.op, op::ASGNI2);
        assert_eq!(asgn.kid(0).unwrap().leaf, Some(Leaf::Local(-2)));

        let cmp = f.body[1];
        assert_eq!(cmp.op, op::EQI2);
        assert_eq!(cmp.leaf, Some(Leaf::Target("_Lout")));

        let jump = f.body[2];
        assert_eq!(jump.op, op::JUMPV);
        assert_eq!(jump.kid(0).unwrap().leaf, Some(Leaf::Target("_Lout")));
    }

    #[test]
    fn test_parse_data_and_linkage() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let m = parse_module(
            "export main\n\
             import helper\n\
             data tab { word 1 2 3 space 4 addr tab }\n\
             data msg { ascii \"hi\" byte 0 }\n",
            &session,
        )
        .unwrap();

        assert_eq!(m.exports, vec!["main"]);
        assert_eq!(m.imports, vec!["helper"]);
        assert_eq!(m.datas.len(), 2);
        assert_eq!(m.datas[0].items.len(), 3);
        match &m.datas[0].items[0] {
            DataItem::Words(ws) => assert_eq!(ws, &[1, 2, 3]),
            _ => panic!("expected words"),
        }
    }

    #[test]
    fn test_parse_error_has_context() {
        let arena = Bump::new();
        let session = CompilationSession::new(&arena);
        let err = parse_module("func f() { (frob2) }", &session).unwrap_err();
        assert!(err.contains("unknown operator 'frob2'"));
        assert!(err.contains("byte"));
    }
}
