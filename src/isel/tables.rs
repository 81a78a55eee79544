//! The NEANDER-X tree grammar.
//!
//! 356 productions over 9 nonterminals. The table order is the
//! registration order and therefore the tie-break order: when two rules
//! reduce a node to the same nonterminal at equal cost, the earlier rule
//! wins. Do not reorder.
//!
//! Template conventions (see [`crate::isel::rule::Rule`]): `%0`..`%9`
//! splice realized operand text, `%a` the node's payload (constant value,
//! symbol name, frame offset, vreg slot), `%L` a label id unique to one
//! instantiation. A template ending in a newline prints as instructions;
//! the rest form operand text for their consumer. Values wider than the
//! 16-bit accumulator travel through the runtime temporaries `_tmp`,
//! `_tmp2`, `_tmp_hi`, `_tmp2_hi` and the stack.

use crate::ir::op::*;
use crate::isel::nonterm::Nt::{self, *};
use crate::isel::rule::Pat::{Nt as N, Op as P};
use crate::isel::rule::{Cost, Pat, Rule};

const fn rule(lhs: Nt, pat: Pat, cost: Cost, template: &'static str) -> Rule {
    Rule {
        lhs,
        pat,
        cost,
        template,
    }
}

const fn c(n: u16) -> Cost {
    Cost::Fixed(n)
}

/// Cost of the small-constant rules: 0 when the constant is exactly 1.
const ONE: Cost = Cost::InRange(1, 1);

#[rustfmt::skip]
pub static RULES: &[Rule] = &[
    // virtual registers: reads, stores and the fused forms the front end
    // generates when it recycles a common subexpression into a vreg
    rule(Vreg, P(VREGP, &[]), c(0), "%a"),
    rule(Reg, P(INDIRI1, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(INDIRU1, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(INDIRI2, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(INDIRU2, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(INDIRP2, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(INDIRI4, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(INDIRU4, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(INDIRP4, &[N(Vreg)]), c(0), "    LDA %0\n"),
    rule(Reg, P(ADDI2, &[P(INDIRI2, &[N(Vreg)]), P(INDIRI2, &[N(Vreg)])]), c(3), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[P(INDIRU2, &[N(Vreg)]), P(INDIRU2, &[N(Vreg)])]), c(3), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDP2, &[P(INDIRP2, &[N(Vreg)]), P(INDIRI2, &[N(Vreg)])]), c(3), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[P(INDIRI2, &[N(Vreg)]), N(Con2)]), c(2), "    LDA %0\n    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[P(INDIRU2, &[N(Vreg)]), N(Con2)]), c(2), "    LDA %0\n    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(MULI2, &[P(INDIRI2, &[N(Vreg)]), P(INDIRI2, &[N(Vreg)])]), c(3), "    LDA %1\n    TAX\n    LDA %0\n    MUL\n"),
    rule(Reg, P(MULU2, &[P(INDIRU2, &[N(Vreg)]), P(INDIRU2, &[N(Vreg)])]), c(3), "    LDA %1\n    TAX\n    LDA %0\n    MUL\n"),
    rule(Stmt, P(ASGNI1, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),
    rule(Stmt, P(ASGNU1, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),
    rule(Stmt, P(ASGNI2, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),
    rule(Stmt, P(ASGNU2, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),
    rule(Stmt, P(ASGNP2, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),
    rule(Stmt, P(ASGNI4, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),
    rule(Stmt, P(ASGNU4, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),
    rule(Stmt, P(ASGNP4, &[N(Vreg), N(Reg)]), c(0), "    STA %0\n"),

    // constants by width; conN only accepts the literal 1 (INC/DEC, single
    // shifts)
    rule(Con1, P(CNSTI1, &[]), c(0), "%a"),
    rule(Con1, P(CNSTU1, &[]), c(0), "%a"),
    rule(Con2, P(CNSTI2, &[]), c(0), "%a"),
    rule(Con2, P(CNSTU2, &[]), c(0), "%a"),
    rule(Con2, P(CNSTP2, &[]), c(0), "%a"),
    rule(Con4, P(CNSTI4, &[]), c(0), "%a"),
    rule(Con4, P(CNSTU4, &[]), c(0), "%a"),
    rule(Con4, P(CNSTP4, &[]), c(0), "%a"),
    rule(ConN, P(CNSTI1, &[]), ONE, "%a"),
    rule(ConN, P(CNSTU1, &[]), ONE, "%a"),

    // chain rules loading constants into the accumulator
    rule(Reg, N(Con1), c(1), "    LDI %0\n"),
    rule(Reg, N(Con2), c(1), "    LDI %0\n"),
    rule(Reg, N(Con4), c(3), "    LDI lo(%0)\n    PUSH\n    LDI hi(%0)\n"),

    // addresses: globals are absolute, frame slots use the ,FP mode
    rule(Addr, P(ADDRGP2, &[]), c(0), "%a"),
    rule(Addr, P(ADDRGP4, &[]), c(0), "%a"),
    rule(Faddr, P(ADDRFP2, &[]), c(0), "%a,FP"),
    rule(Faddr, P(ADDRLP2, &[]), c(0), "%a,FP"),
    rule(Faddr, P(ADDRFP4, &[]), c(0), "%a,FP"),
    rule(Faddr, P(ADDRLP4, &[]), c(0), "%a,FP"),
    rule(Addr, N(Faddr), c(0), "%0"),
    rule(Reg, P(ADDRGP2, &[]), c(1), "    LDI %a\n"),
    rule(Reg, P(ADDRFP2, &[]), c(1), "    LDI %a\n"),
    rule(Reg, P(ADDRLP2, &[]), c(1), "    LDI %a\n"),

    // frame-relative loads and stores
    rule(Reg, P(INDIRI1, &[N(Faddr)]), c(1), "    LDA %0\n"),
    rule(Reg, P(INDIRU1, &[N(Faddr)]), c(1), "    LDA %0\n"),
    rule(Reg, P(INDIRI2, &[N(Faddr)]), c(1), "    LDA %0\n"),
    rule(Reg, P(INDIRU2, &[N(Faddr)]), c(1), "    LDA %0\n"),
    rule(Reg, P(INDIRP2, &[N(Faddr)]), c(1), "    LDA %0\n"),
    rule(Stmt, P(ASGNI1, &[N(Faddr), N(Reg)]), c(1), "    STA %0\n"),
    rule(Stmt, P(ASGNU1, &[N(Faddr), N(Reg)]), c(1), "    STA %0\n"),
    rule(Stmt, P(ASGNI2, &[N(Faddr), N(Reg)]), c(1), "    STA %0\n"),
    rule(Stmt, P(ASGNU2, &[N(Faddr), N(Reg)]), c(1), "    STA %0\n"),
    rule(Stmt, P(ASGNP2, &[N(Faddr), N(Reg)]), c(1), "    STA %0\n"),

    // absolute loads and stores (32-bit values travel through the stack)
    rule(Reg, P(INDIRI1, &[N(Addr)]), c(2), "    LDA %0\n"),
    rule(Reg, P(INDIRU1, &[N(Addr)]), c(2), "    LDA %0\n"),
    rule(Reg, P(INDIRI2, &[N(Addr)]), c(2), "    LDA %0\n"),
    rule(Reg, P(INDIRU2, &[N(Addr)]), c(2), "    LDA %0\n"),
    rule(Reg, P(INDIRP2, &[N(Addr)]), c(2), "    LDA %0\n"),
    rule(Reg, P(INDIRI4, &[N(Addr)]), c(4), "    LDA %0\n    PUSH\n    LDA %0+2\n"),
    rule(Reg, P(INDIRU4, &[N(Addr)]), c(4), "    LDA %0\n    PUSH\n    LDA %0+2\n"),
    rule(Reg, P(INDIRP4, &[N(Addr)]), c(4), "    LDA %0\n    PUSH\n    LDA %0+2\n"),
    rule(Stmt, P(ASGNI1, &[N(Addr), N(Reg)]), c(2), "    STA %0\n"),
    rule(Stmt, P(ASGNU1, &[N(Addr), N(Reg)]), c(2), "    STA %0\n"),
    rule(Stmt, P(ASGNI2, &[N(Addr), N(Reg)]), c(2), "    STA %0\n"),
    rule(Stmt, P(ASGNU2, &[N(Addr), N(Reg)]), c(2), "    STA %0\n"),
    rule(Stmt, P(ASGNP2, &[N(Addr), N(Reg)]), c(2), "    STA %0\n"),
    rule(Stmt, P(ASGNI4, &[N(Addr), N(Reg)]), c(4), "    STA %0+2\n    POP\n    STA %0\n"),
    rule(Stmt, P(ASGNU4, &[N(Addr), N(Reg)]), c(4), "    STA %0+2\n    POP\n    STA %0\n"),
    rule(Stmt, P(ASGNP4, &[N(Addr), N(Reg)]), c(4), "    STA %0+2\n    POP\n    STA %0\n"),

    // indexed addressing: fold an address-plus-register shape into ,X
    rule(Reg, P(INDIRI1, &[P(ADDI2, &[N(Addr), N(Reg)])]), c(3), "    TAX\n    LDA %0,X\n"),
    rule(Reg, P(INDIRU1, &[P(ADDI2, &[N(Addr), N(Reg)])]), c(3), "    TAX\n    LDA %0,X\n"),
    rule(Reg, P(INDIRI1, &[P(ADDP2, &[N(Addr), N(Reg)])]), c(3), "    TAX\n    LDA %0,X\n"),
    rule(Reg, P(INDIRU1, &[P(ADDP2, &[N(Addr), N(Reg)])]), c(3), "    TAX\n    LDA %0,X\n"),
    rule(Reg, P(INDIRI1, &[P(ADDP2, &[N(Reg), N(Addr)])]), c(3), "    TAX\n    LDA %1,X\n"),
    rule(Reg, P(INDIRU1, &[P(ADDP2, &[N(Reg), N(Addr)])]), c(3), "    TAX\n    LDA %1,X\n"),
    rule(Stmt, P(ASGNI1, &[P(ADDI2, &[N(Addr), N(Reg)]), N(Reg)]), c(5), "    TAY\n    POP\n    TAX\n    TYA\n    STA %0,X\n"),
    rule(Stmt, P(ASGNU1, &[P(ADDI2, &[N(Addr), N(Reg)]), N(Reg)]), c(5), "    TAY\n    POP\n    TAX\n    TYA\n    STA %0,X\n"),
    rule(Stmt, P(ASGNI1, &[P(ADDP2, &[N(Addr), N(Reg)]), N(Reg)]), c(5), "    TAY\n    POP\n    TAX\n    TYA\n    STA %0,X\n"),
    rule(Stmt, P(ASGNU1, &[P(ADDP2, &[N(Addr), N(Reg)]), N(Reg)]), c(5), "    TAY\n    POP\n    TAX\n    TYA\n    STA %0,X\n"),
    rule(Stmt, P(ASGNI1, &[P(ADDP2, &[N(Reg), N(Addr)]), N(Reg)]), c(5), "    TAY\n    POP\n    TAX\n    TYA\n    STA %1,X\n"),
    rule(Stmt, P(ASGNU1, &[P(ADDP2, &[N(Reg), N(Addr)]), N(Reg)]), c(5), "    TAY\n    POP\n    TAX\n    TYA\n    STA %1,X\n"),

    // 8-bit add/sub/neg
    rule(Reg, P(ADDI1, &[P(INDIRI1, &[N(Addr)]), P(INDIRI1, &[N(Addr)])]), c(2), "    LDA %0\n    ADD %1\n"),
    rule(Reg, P(ADDU1, &[P(INDIRU1, &[N(Addr)]), P(INDIRU1, &[N(Addr)])]), c(2), "    LDA %0\n    ADD %1\n"),
    rule(Reg, P(ADDI1, &[P(INDIRU1, &[N(Addr)]), P(INDIRU1, &[N(Addr)])]), c(2), "    LDA %0\n    ADD %1\n"),
    rule(Reg, P(ADDI1, &[P(LOADI1, &[P(INDIRU1, &[N(Addr)])]), P(LOADI1, &[P(INDIRU1, &[N(Addr)])])]), c(2), "    LDA %0\n    ADD %1\n"),
    rule(Reg, P(ADDU1, &[P(LOADU1, &[P(INDIRU1, &[N(Addr)])]), P(LOADU1, &[P(INDIRU1, &[N(Addr)])])]), c(2), "    LDA %0\n    ADD %1\n"),
    rule(Reg, P(ADDI1, &[N(Reg), N(Reg)]), c(10), "    ADDX\n"),
    rule(Reg, P(ADDU1, &[N(Reg), N(Reg)]), c(10), "    ADDX\n"),
    rule(Reg, P(ADDI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(1), "    ADD %1\n"),
    rule(Reg, P(ADDU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(1), "    ADD %1\n"),
    rule(Reg, P(ADDI1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(1), "    ADD %1\n"),
    rule(Reg, P(ADDI1, &[N(Reg), N(ConN)]), c(1), "    INC\n"),
    rule(Reg, P(ADDU1, &[N(Reg), N(ConN)]), c(1), "    INC\n"),
    rule(Reg, P(SUBI1, &[P(INDIRI1, &[N(Addr)]), P(INDIRI1, &[N(Addr)])]), c(2), "    LDA %0\n    SUB %1\n"),
    rule(Reg, P(SUBU1, &[P(INDIRU1, &[N(Addr)]), P(INDIRU1, &[N(Addr)])]), c(2), "    LDA %0\n    SUB %1\n"),
    rule(Reg, P(SUBI1, &[P(INDIRU1, &[N(Addr)]), P(INDIRU1, &[N(Addr)])]), c(2), "    LDA %0\n    SUB %1\n"),
    rule(Reg, P(SUBI1, &[P(LOADI1, &[P(INDIRU1, &[N(Addr)])]), P(LOADI1, &[P(INDIRU1, &[N(Addr)])])]), c(2), "    LDA %0\n    SUB %1\n"),
    rule(Reg, P(SUBU1, &[P(LOADU1, &[P(INDIRU1, &[N(Addr)])]), P(LOADU1, &[P(INDIRU1, &[N(Addr)])])]), c(2), "    LDA %0\n    SUB %1\n"),
    rule(Reg, P(SUBI1, &[N(Reg), N(Reg)]), c(10), "    SUBX\n"),
    rule(Reg, P(SUBU1, &[N(Reg), N(Reg)]), c(10), "    SUBX\n"),
    rule(Reg, P(SUBI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(1), "    SUB %1\n"),
    rule(Reg, P(SUBU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(1), "    SUB %1\n"),
    rule(Reg, P(SUBI1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(1), "    SUB %1\n"),
    rule(Reg, P(SUBI1, &[N(Reg), N(ConN)]), c(1), "    DEC\n"),
    rule(Reg, P(SUBU1, &[N(Reg), N(ConN)]), c(1), "    DEC\n"),
    rule(Reg, P(NEGI1, &[N(Reg)]), c(1), "    NEG\n"),

    // 16-bit add, and the address fold for pointer arithmetic
    rule(Reg, P(ADDI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(3), "    LDA %0\n    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(3), "    LDA %0\n    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDP2, &[P(INDIRP2, &[N(Faddr)]), N(Con2)]), c(3), "    LDA %0\n    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(4), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(4), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDP2, &[P(INDIRP2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(4), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[P(INDIRI2, &[N(Addr)]), N(Con2)]), c(3), "    LDA %0\n    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[P(INDIRU2, &[N(Addr)]), N(Con2)]), c(3), "    LDA %0\n    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[P(INDIRI2, &[N(Addr)]), P(INDIRI2, &[N(Addr)])]), c(4), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[P(INDIRU2, &[N(Addr)]), P(INDIRU2, &[N(Addr)])]), c(4), "    LDA %0\n    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[N(Reg), P(INDIRI2, &[N(Addr)])]), c(3), "    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[N(Reg), P(INDIRU2, &[N(Addr)])]), c(3), "    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDP2, &[N(Reg), P(INDIRP2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp\n    LDI %1\n    ADD _tmp\n"),
    rule(Reg, P(ADDI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    ADD _tmp\n"),
    rule(Reg, P(ADDU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    ADD _tmp\n"),
    rule(Reg, P(ADDP2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    ADD _tmp\n"),
    rule(Addr, P(ADDP2, &[N(Addr), N(Reg)]), c(1), "%0"),

    // 16-bit sub/neg
    rule(Reg, P(SUBI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(3), "    LDI %1\n    STA _tmp\n    LDA %0\n    SUB _tmp\n"),
    rule(Reg, P(SUBU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(3), "    LDI %1\n    STA _tmp\n    LDA %0\n    SUB _tmp\n"),
    rule(Reg, P(SUBI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(4), "    LDA %1\n    STA _tmp\n    LDA %0\n    SUB _tmp\n"),
    rule(Reg, P(SUBU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(4), "    LDA %1\n    STA _tmp\n    LDA %0\n    SUB _tmp\n"),
    rule(Reg, P(SUBI2, &[P(INDIRI2, &[N(Addr)]), N(Con2)]), c(3), "    LDI %1\n    STA _tmp\n    LDA %0\n    SUB _tmp\n"),
    rule(Reg, P(SUBU2, &[P(INDIRU2, &[N(Addr)]), N(Con2)]), c(3), "    LDI %1\n    STA _tmp\n    LDA %0\n    SUB _tmp\n"),
    rule(Reg, P(SUBI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(5), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    SUB _tmp\n"),
    rule(Reg, P(SUBU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(5), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    SUB _tmp\n"),
    rule(Reg, P(SUBI2, &[N(Reg), N(Con2)]), c(4), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    SUB _tmp\n"),
    rule(Reg, P(SUBU2, &[N(Reg), N(Con2)]), c(4), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    SUB _tmp\n"),
    rule(Reg, P(SUBI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    SUB _tmp\n"),
    rule(Reg, P(SUBU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    SUB _tmp\n"),
    rule(Reg, P(NEGI2, &[N(Reg)]), c(1), "    NEG\n"),

    // 32-bit add/sub via carry chains
    rule(Reg, P(ADDI4, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    STA _tmp_hi\n    POP\n    STA _tmp2_hi\n    POP\n    ADD _tmp\n    PUSH\n    LDA _tmp2_hi\n    ADC _tmp_hi\n"),
    rule(Reg, P(ADDU4, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    STA _tmp_hi\n    POP\n    STA _tmp2_hi\n    POP\n    ADD _tmp\n    PUSH\n    LDA _tmp2_hi\n    ADC _tmp_hi\n"),
    rule(Reg, P(SUBI4, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    STA _tmp_hi\n    POP\n    STA _tmp2_hi\n    POP\n    SUB _tmp\n    PUSH\n    LDA _tmp2_hi\n    SBC _tmp_hi\n"),
    rule(Reg, P(SUBU4, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    STA _tmp_hi\n    POP\n    STA _tmp2_hi\n    POP\n    SUB _tmp\n    PUSH\n    LDA _tmp2_hi\n    SBC _tmp_hi\n"),

    // mul/div/mod (hardware ops, operands in AC and X)
    rule(Reg, P(MULI1, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MUL\n"),
    rule(Reg, P(MULU1, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MUL\n"),
    rule(Reg, P(MULI2, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MUL\n"),
    rule(Reg, P(MULU2, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MUL\n"),
    rule(Reg, P(DIVI1, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    DIV\n"),
    rule(Reg, P(DIVU1, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    DIV\n"),
    rule(Reg, P(DIVI2, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    DIV\n"),
    rule(Reg, P(DIVU2, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    DIV\n"),
    rule(Reg, P(MODI1, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MOD\n"),
    rule(Reg, P(MODU1, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MOD\n"),
    rule(Reg, P(MODI2, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MOD\n"),
    rule(Reg, P(MODU2, &[N(Reg), N(Reg)]), c(3), "    TAX\n    POP\n    MOD\n"),

    // bitwise and/or/xor/complement
    rule(Reg, P(BANDI1, &[P(INDIRI1, &[N(Addr)]), P(INDIRI1, &[N(Addr)])]), c(2), "    LDA %0\n    AND %1\n"),
    rule(Reg, P(BANDU1, &[P(INDIRU1, &[N(Addr)]), P(INDIRU1, &[N(Addr)])]), c(2), "    LDA %0\n    AND %1\n"),
    rule(Reg, P(BANDI1, &[N(Reg), N(Reg)]), c(10), "    ANDX\n"),
    rule(Reg, P(BANDU1, &[N(Reg), N(Reg)]), c(10), "    ANDX\n"),
    rule(Reg, P(BANDI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(1), "    AND %1\n"),
    rule(Reg, P(BANDU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(1), "    AND %1\n"),
    rule(Reg, P(BORI1, &[P(INDIRI1, &[N(Addr)]), P(INDIRI1, &[N(Addr)])]), c(2), "    LDA %0\n    OR %1\n"),
    rule(Reg, P(BORU1, &[P(INDIRU1, &[N(Addr)]), P(INDIRU1, &[N(Addr)])]), c(2), "    LDA %0\n    OR %1\n"),
    rule(Reg, P(BORI1, &[N(Reg), N(Reg)]), c(10), "    ORX\n"),
    rule(Reg, P(BORU1, &[N(Reg), N(Reg)]), c(10), "    ORX\n"),
    rule(Reg, P(BORI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(1), "    OR %1\n"),
    rule(Reg, P(BORU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(1), "    OR %1\n"),
    rule(Reg, P(BXORI1, &[P(INDIRI1, &[N(Addr)]), P(INDIRI1, &[N(Addr)])]), c(2), "    LDA %0\n    XOR %1\n"),
    rule(Reg, P(BXORU1, &[P(INDIRU1, &[N(Addr)]), P(INDIRU1, &[N(Addr)])]), c(2), "    LDA %0\n    XOR %1\n"),
    rule(Reg, P(BXORI1, &[N(Reg), N(Reg)]), c(10), "    XORX\n"),
    rule(Reg, P(BXORU1, &[N(Reg), N(Reg)]), c(10), "    XORX\n"),
    rule(Reg, P(BXORI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(1), "    XOR %1\n"),
    rule(Reg, P(BXORU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(1), "    XOR %1\n"),
    rule(Reg, P(BCOMI1, &[N(Reg)]), c(1), "    NOT\n"),
    rule(Reg, P(BCOMU1, &[N(Reg)]), c(1), "    NOT\n"),
    rule(Reg, P(BANDI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    AND _tmp\n"),
    rule(Reg, P(BANDU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    AND _tmp\n"),
    rule(Reg, P(BANDI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(2), "    LDA %0\n    STA _tmp\n    LDA %1\n    AND _tmp\n"),
    rule(Reg, P(BANDU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(2), "    LDA %0\n    STA _tmp\n    LDA %1\n    AND _tmp\n"),
    rule(Reg, P(BANDI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    AND _tmp\n"),
    rule(Reg, P(BANDU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    AND _tmp\n"),
    rule(Reg, P(BORI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    OR _tmp\n"),
    rule(Reg, P(BORU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    OR _tmp\n"),
    rule(Reg, P(BORI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(2), "    LDA %0\n    STA _tmp\n    LDA %1\n    OR _tmp\n"),
    rule(Reg, P(BORU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(2), "    LDA %0\n    STA _tmp\n    LDA %1\n    OR _tmp\n"),
    rule(Reg, P(BORI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    OR _tmp\n"),
    rule(Reg, P(BORU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    OR _tmp\n"),
    rule(Reg, P(BXORI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    XOR _tmp\n"),
    rule(Reg, P(BXORU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    XOR _tmp\n"),
    rule(Reg, P(BXORI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(2), "    LDA %0\n    STA _tmp\n    LDA %1\n    XOR _tmp\n"),
    rule(Reg, P(BXORU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(2), "    LDA %0\n    STA _tmp\n    LDA %1\n    XOR _tmp\n"),
    rule(Reg, P(BXORI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    XOR _tmp\n"),
    rule(Reg, P(BXORU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(3), "    STA _tmp\n    LDA %1\n    XOR _tmp\n"),
    rule(Reg, P(BCOMI2, &[N(Reg)]), c(1), "    NOT\n"),
    rule(Reg, P(BCOMU2, &[N(Reg)]), c(1), "    NOT\n"),

    // shifts: single-position for the constant 1, software loops otherwise
    rule(Reg, P(LSHI2, &[N(Reg), N(ConN)]), c(1), "    SHL\n"),
    rule(Reg, P(LSHU2, &[N(Reg), N(ConN)]), c(1), "    SHL\n"),
    rule(Reg, P(RSHU2, &[N(Reg), N(ConN)]), c(1), "    SHR\n"),
    rule(Reg, P(RSHI2, &[N(Reg), N(ConN)]), c(1), "    ASR\n"),
    rule(Reg, P(LSHI2, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_shl2_%L:\n    TXA\n    JZ _shl2d_%L\n    TYA\n    SHL\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _shl2_%L\n_shl2d_%L:\n    TYA\n"),
    rule(Reg, P(LSHU2, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_shl2_%L:\n    TXA\n    JZ _shl2d_%L\n    TYA\n    SHL\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _shl2_%L\n_shl2d_%L:\n    TYA\n"),
    rule(Reg, P(RSHU2, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_shr2_%L:\n    TXA\n    JZ _shr2d_%L\n    TYA\n    SHR\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _shr2_%L\n_shr2d_%L:\n    TYA\n"),
    rule(Reg, P(RSHI2, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_asr2_%L:\n    TXA\n    JZ _asr2d_%L\n    TYA\n    ASR\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _asr2_%L\n_asr2d_%L:\n    TYA\n"),
    rule(Reg, P(LSHI1, &[N(Reg), N(ConN)]), c(1), "    SHL\n"),
    rule(Reg, P(LSHU1, &[N(Reg), N(ConN)]), c(1), "    SHL\n"),
    rule(Reg, P(RSHU1, &[N(Reg), N(ConN)]), c(1), "    SHR\n"),
    rule(Reg, P(RSHI1, &[N(Reg), N(ConN)]), c(1), "    ASR\n"),
    rule(Reg, P(LSHI1, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_shl_%L:\n    TXA\n    JZ _shld_%L\n    TYA\n    SHL\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _shl_%L\n_shld_%L:\n    TYA\n"),
    rule(Reg, P(LSHU1, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_shl_%L:\n    TXA\n    JZ _shld_%L\n    TYA\n    SHL\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _shl_%L\n_shld_%L:\n    TYA\n"),
    rule(Reg, P(RSHU1, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_shr_%L:\n    TXA\n    JZ _shrd_%L\n    TYA\n    SHR\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _shr_%L\n_shrd_%L:\n    TYA\n"),
    rule(Reg, P(RSHI1, &[N(Reg), N(Reg)]), c(15), "    TAX\n    POP\n    TAY\n_asr_%L:\n    TXA\n    JZ _asrd_%L\n    TYA\n    ASR\n    TAY\n    TXA\n    DEC\n    TAX\n    JMP _asr_%L\n_asrd_%L:\n    TYA\n"),

    // width conversions
    rule(Reg, P(CVII1, &[N(Reg)]), c(1), "    AND _mask_ff\n"),
    rule(Reg, P(CVIU1, &[N(Reg)]), c(1), "    AND _mask_ff\n"),
    rule(Reg, P(CVUI1, &[N(Reg)]), c(1), "    AND _mask_ff\n"),
    rule(Reg, P(CVUU1, &[N(Reg)]), c(1), "    AND _mask_ff\n"),
    rule(Reg, P(CVII2, &[N(Reg)]), c(0), "; cvii2 - sign extend 8 to 16\n"),
    rule(Reg, P(CVIU2, &[N(Reg)]), c(0), "; cviu2 - zero extend 8 to 16\n"),
    rule(Reg, P(CVUI2, &[N(Reg)]), c(0), "; cvui2 - already 16-bit\n"),
    rule(Reg, P(CVUU2, &[N(Reg)]), c(0), "; cvuu2 - already 16-bit\n"),
    rule(Reg, P(CVII1, &[P(INDIRI2, &[N(Addr)])]), c(2), "    LDA %0\n    AND _mask_ff\n"),
    rule(Reg, P(CVUU1, &[P(INDIRU2, &[N(Addr)])]), c(2), "    LDA %0\n    AND _mask_ff\n"),
    rule(Reg, P(CVPU2, &[N(Reg)]), c(0), "; cvpu2\n"),
    rule(Reg, P(CVUP2, &[N(Reg)]), c(0), "; cvup2\n"),
    rule(Reg, P(CVII4, &[N(Reg)]), c(8), "    TAY\n    JN _sx4_%L\n    LDI 0\n    JMP _sx4d_%L\n_sx4_%L:\n    LDI 0xFFFF\n_sx4d_%L:\n    PUSH\n    TYA\n"),
    rule(Reg, P(CVIU4, &[N(Reg)]), c(2), "    PUSH\n    LDI 0\n"),
    rule(Reg, P(CVUI4, &[N(Reg)]), c(2), "    PUSH\n    LDI 0\n"),
    rule(Reg, P(CVUU4, &[N(Reg)]), c(2), "    PUSH\n    LDI 0\n"),
    rule(Reg, P(CVPU4, &[N(Reg)]), c(2), "    PUSH\n    LDI 0\n"),
    rule(Reg, P(CVUP4, &[N(Reg)]), c(0), "; cvup4 - truncate to pointer\n"),

    // labels and jumps
    rule(Stmt, P(LABELV, &[]), c(0), "%a:\n"),
    rule(Stmt, P(JUMPV, &[N(Addr)]), c(1), "    JMP %0\n"),
    rule(Stmt, P(JUMPV, &[N(Reg)]), c(10), "    JMP AC\n"),

    // 8-bit compare-and-branch
    rule(Stmt, P(EQI1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQU1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(3), "    CMP %1\n    JZ %a\n"),
    rule(Stmt, P(EQU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(3), "    CMP %1\n    JZ %a\n"),
    rule(Stmt, P(NEI1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEU1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(3), "    CMP %1\n    JNZ %a\n"),
    rule(Stmt, P(NEU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(3), "    CMP %1\n    JNZ %a\n"),
    rule(Stmt, P(LTI1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JN %a\n"),
    rule(Stmt, P(LTI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(3), "    CMP %1\n    JN %a\n"),
    rule(Stmt, P(LTU1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JC %a\n"),
    rule(Stmt, P(LTU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(3), "    CMP %1\n    JC %a\n"),
    rule(Stmt, P(LEI1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JLE %a\n"),
    rule(Stmt, P(LEI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(3), "    CMP %1\n    JLE %a\n"),
    rule(Stmt, P(LEU1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JBE %a\n"),
    rule(Stmt, P(LEU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(3), "    CMP %1\n    JBE %a\n"),
    rule(Stmt, P(GTI1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JGT %a\n"),
    rule(Stmt, P(GTI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(3), "    CMP %1\n    JGT %a\n"),
    rule(Stmt, P(GTU1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JA %a\n"),
    rule(Stmt, P(GTU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(3), "    CMP %1\n    JA %a\n"),
    rule(Stmt, P(GEI1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JGE %a\n"),
    rule(Stmt, P(GEI1, &[N(Reg), P(INDIRI1, &[N(Addr)])]), c(3), "    CMP %1\n    JGE %a\n"),
    rule(Stmt, P(GEU1, &[N(Reg), N(Reg)]), c(5), "    TAX\n    POP\n    STA _tmp\n    TXA\n    CMP _tmp\n    JNC %a\n"),
    rule(Stmt, P(GEU1, &[N(Reg), P(INDIRU1, &[N(Addr)])]), c(3), "    CMP %1\n    JNC %a\n"),

    // 16-bit compare-and-branch
    rule(Stmt, P(EQI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(NEI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(LTI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JN %a\n"),
    rule(Stmt, P(LTU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JC %a\n"),
    rule(Stmt, P(LTI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JN %a\n"),
    rule(Stmt, P(LTU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JC %a\n"),
    rule(Stmt, P(LTI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JN %a\n"),
    rule(Stmt, P(LTU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JC %a\n"),
    rule(Stmt, P(LEI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JLE %a\n"),
    rule(Stmt, P(LEU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JBE %a\n"),
    rule(Stmt, P(LEI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JLE %a\n"),
    rule(Stmt, P(LEU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JBE %a\n"),
    rule(Stmt, P(LEI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JLE %a\n"),
    rule(Stmt, P(LEU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JBE %a\n"),
    rule(Stmt, P(GTI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JGT %a\n"),
    rule(Stmt, P(GTU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JA %a\n"),
    rule(Stmt, P(GTI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JGT %a\n"),
    rule(Stmt, P(GTU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JA %a\n"),
    rule(Stmt, P(GTI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JGT %a\n"),
    rule(Stmt, P(GTU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JA %a\n"),
    rule(Stmt, P(GEI2, &[P(INDIRI2, &[N(Faddr)]), P(INDIRI2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JGE %a\n"),
    rule(Stmt, P(GEU2, &[P(INDIRU2, &[N(Faddr)]), P(INDIRU2, &[N(Faddr)])]), c(3), "    LDA %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JNC %a\n"),
    rule(Stmt, P(GEI2, &[N(Reg), P(INDIRI2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JGE %a\n"),
    rule(Stmt, P(GEU2, &[N(Reg), P(INDIRU2, &[N(Faddr)])]), c(4), "    STA _tmp2\n    LDA %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JNC %a\n"),
    rule(Stmt, P(GEI2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JGE %a\n"),
    rule(Stmt, P(GEU2, &[N(Reg), N(Reg)]), c(10), "    STA _tmp\n    POP\n    CMP _tmp\n    JNC %a\n"),
    rule(Stmt, P(LEI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JLE %a\n"),
    rule(Stmt, P(LEU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JBE %a\n"),
    rule(Stmt, P(LEI2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JLE %a\n"),
    rule(Stmt, P(LEU2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JBE %a\n"),
    rule(Stmt, P(GTI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JGT %a\n"),
    rule(Stmt, P(GTU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JA %a\n"),
    rule(Stmt, P(GTI2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JGT %a\n"),
    rule(Stmt, P(GTU2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JA %a\n"),
    rule(Stmt, P(GEI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JGE %a\n"),
    rule(Stmt, P(GEU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JNC %a\n"),
    rule(Stmt, P(GEI2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JGE %a\n"),
    rule(Stmt, P(GEU2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JNC %a\n"),
    rule(Stmt, P(LTI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JN %a\n"),
    rule(Stmt, P(LTU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JC %a\n"),
    rule(Stmt, P(LTI2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JN %a\n"),
    rule(Stmt, P(LTU2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JC %a\n"),
    rule(Stmt, P(EQI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQI2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(EQU2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JZ %a\n"),
    rule(Stmt, P(NEI2, &[P(INDIRI2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEU2, &[P(INDIRU2, &[N(Faddr)]), N(Con2)]), c(2), "    LDI %1\n    STA _tmp\n    LDA %0\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEI2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JNZ %a\n"),
    rule(Stmt, P(NEU2, &[N(Reg), N(Con2)]), c(3), "    STA _tmp2\n    LDI %1\n    STA _tmp\n    LDA _tmp2\n    CMP _tmp\n    JNZ %a\n"),

    // argument pushes
    rule(Stmt, P(ARGI1, &[N(Reg)]), c(1), "    PUSH\n"),
    rule(Stmt, P(ARGU1, &[N(Reg)]), c(1), "    PUSH\n"),
    rule(Stmt, P(ARGI2, &[N(Reg)]), c(1), "    PUSH\n"),
    rule(Stmt, P(ARGU2, &[N(Reg)]), c(1), "    PUSH\n"),
    rule(Stmt, P(ARGP2, &[N(Reg)]), c(1), "    PUSH\n"),
    rule(Stmt, P(ARGI4, &[N(Reg)]), c(2), "    PUSH\n    POP\n    PUSH\n    PUSH\n"),
    rule(Stmt, P(ARGU4, &[N(Reg)]), c(2), "    PUSH\n    POP\n    PUSH\n    PUSH\n"),
    rule(Stmt, P(ARGP4, &[N(Reg)]), c(2), "    PUSH\n    POP\n    PUSH\n    PUSH\n"),

    // calls (result in AC, 32-bit results split across AC and stack)
    rule(Reg, P(CALLI1, &[N(Addr)]), c(5), "    CALL %0\n"),
    rule(Reg, P(CALLU1, &[N(Addr)]), c(5), "    CALL %0\n"),
    rule(Reg, P(CALLI2, &[N(Addr)]), c(5), "    CALL %0\n"),
    rule(Reg, P(CALLU2, &[N(Addr)]), c(5), "    CALL %0\n"),
    rule(Reg, P(CALLP2, &[N(Addr)]), c(5), "    CALL %0\n"),
    rule(Reg, P(CALLI4, &[N(Addr)]), c(8), "    CALL %0\n"),
    rule(Reg, P(CALLU4, &[N(Addr)]), c(8), "    CALL %0\n"),
    rule(Reg, P(CALLP4, &[N(Addr)]), c(8), "    CALL %0\n"),
    rule(Stmt, P(CALLV, &[N(Addr)]), c(5), "    CALL %0\n"),

    // returns (value already in AC per the calling convention)
    rule(Stmt, P(RETI1, &[N(Reg)]), c(0), "; ret - value in AC\n"),
    rule(Stmt, P(RETU1, &[N(Reg)]), c(0), "; ret - value in AC\n"),
    rule(Stmt, P(RETI2, &[N(Reg)]), c(0), "; ret - value in AC\n"),
    rule(Stmt, P(RETU2, &[N(Reg)]), c(0), "; ret - value in AC\n"),
    rule(Stmt, P(RETP2, &[N(Reg)]), c(0), "; ret - value in AC\n"),
    rule(Stmt, P(RETI4, &[N(Reg)]), c(0), "; ret - 32-bit value in stack\n"),
    rule(Stmt, P(RETU4, &[N(Reg)]), c(0), "; ret - 32-bit value in stack\n"),
    rule(Stmt, P(RETP4, &[N(Reg)]), c(0), "; ret - 32-bit value in stack\n"),
    rule(Stmt, P(RETV, &[]), c(0), "; ret void\n"),

    // register transfers inserted by the front end; selection-only
    rule(Reg, P(LOADI1, &[N(Reg)]), c(1), ""),
    rule(Reg, P(LOADU1, &[N(Reg)]), c(1), ""),
    rule(Reg, P(LOADI2, &[N(Reg)]), c(1), ""),
    rule(Reg, P(LOADU2, &[N(Reg)]), c(1), ""),
    rule(Reg, P(LOADP2, &[N(Reg)]), c(1), ""),
    rule(Reg, P(LOADI4, &[N(Reg)]), c(1), ""),
    rule(Reg, P(LOADU4, &[N(Reg)]), c(1), ""),
    rule(Reg, P(LOADP4, &[N(Reg)]), c(1), ""),

    // a computed value used as a statement: emit for effect, discard AC
    rule(Stmt, N(Reg), c(0), ""),
];
