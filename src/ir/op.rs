//! The IR operator set as a closed sum type.
//!
//! An operator is a tagged union of operation kind, result type class and
//! result size, so matching on it is exhaustive and a typo in an operator
//! name is a compile error instead of a silently dead case.

use std::fmt;

/// Operation kind, independent of type class and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Memory load through an address operand.
    Indir,
    /// Store: left operand is the address, right the value.
    Asgn,
    /// Integer constant leaf.
    Cnst,
    /// Address of a global symbol.
    AddrG,
    /// Address of a parameter (frame-relative, positive offset).
    AddrF,
    /// Address of a local (frame-relative, negative offset).
    AddrL,
    /// Virtual-register placeholder leaf.
    Vreg,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Neg,
    BAnd,
    BOr,
    BXor,
    BCom,
    Lsh,
    Rsh,
    /// Conversion from a signed value.
    CvI,
    /// Conversion from an unsigned value.
    CvU,
    /// Conversion from a pointer.
    CvP,
    /// Label definition.
    Label,
    /// Unconditional jump.
    Jump,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Push one call argument.
    Arg,
    Call,
    Ret,
    /// Register-to-register transfer inserted by the front end.
    Load,
}

/// Type class of an operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Signed integer.
    I,
    /// Unsigned integer.
    U,
    /// Pointer.
    P,
    /// Void (statements).
    V,
}

/// A full operator tag: kind, result type class and result size in bytes.
///
/// Size 0 is used by the void-typed operators and the sizeless `VREGP` leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Op {
    pub kind: OpKind,
    pub ty: Ty,
    pub size: u8,
}

impl Op {
    pub const fn new(kind: OpKind, ty: Ty, size: u8) -> Self {
        Self { kind, ty, size }
    }

    /// Number of children this operator requires.
    pub fn arity(&self) -> usize {
        use OpKind::*;
        match self.kind {
            Cnst | AddrG | AddrF | AddrL | Vreg | Label => 0,
            Ret if self.ty == Ty::V => 0,
            Indir | Neg | BCom | CvI | CvU | CvP | Jump | Arg | Call | Ret | Load => 1,
            Asgn | Add | Sub | Mul | Div | Mod | BAnd | BOr | BXor | Lsh | Rsh | Eq | Ne | Lt
            | Le | Gt | Ge => 2,
        }
    }

    /// Parse an operator from its display name, e.g. `ADDI2` or `jumpv`.
    pub fn parse(name: &str) -> Option<Op> {
        let upper = name.to_ascii_uppercase();
        // Longer bases first: ADDRG before ADD, NEG before NE.
        const BASES: &[(&str, OpKind)] = &[
            ("INDIR", OpKind::Indir),
            ("ADDRG", OpKind::AddrG),
            ("ADDRF", OpKind::AddrF),
            ("ADDRL", OpKind::AddrL),
            ("LABEL", OpKind::Label),
            ("BAND", OpKind::BAnd),
            ("BCOM", OpKind::BCom),
            ("BXOR", OpKind::BXor),
            ("CNST", OpKind::Cnst),
            ("ASGN", OpKind::Asgn),
            ("JUMP", OpKind::Jump),
            ("CALL", OpKind::Call),
            ("LOAD", OpKind::Load),
            ("VREG", OpKind::Vreg),
            ("CVI", OpKind::CvI),
            ("CVU", OpKind::CvU),
            ("CVP", OpKind::CvP),
            ("ADD", OpKind::Add),
            ("SUB", OpKind::Sub),
            ("MUL", OpKind::Mul),
            ("DIV", OpKind::Div),
            ("MOD", OpKind::Mod),
            ("NEG", OpKind::Neg),
            ("BOR", OpKind::BOr),
            ("LSH", OpKind::Lsh),
            ("RSH", OpKind::Rsh),
            ("ARG", OpKind::Arg),
            ("RET", OpKind::Ret),
            ("EQ", OpKind::Eq),
            ("NE", OpKind::Ne),
            ("LT", OpKind::Lt),
            ("LE", OpKind::Le),
            ("GT", OpKind::Gt),
            ("GE", OpKind::Ge),
        ];

        let (base, kind) = BASES
            .iter()
            .find(|(base, _)| upper.starts_with(base))
            .copied()?;
        let mut rest = upper[base.len()..].chars();
        // Address and vreg leaves may be written without their suffix:
        // `addrg` for ADDRGP2, `vreg` for VREGP.
        if upper.len() == base.len() {
            return match kind {
                OpKind::AddrG | OpKind::AddrF | OpKind::AddrL => {
                    Some(Op::new(kind, Ty::P, 2))
                }
                OpKind::Vreg => Some(Op::new(kind, Ty::P, 0)),
                _ => None,
            };
        }
        let ty = match rest.next()? {
            'I' => Ty::I,
            'U' => Ty::U,
            'P' => Ty::P,
            'V' => Ty::V,
            _ => return None,
        };
        let size = match rest.next() {
            None => 0,
            Some('1') => 1,
            Some('2') => 2,
            Some('4') => 4,
            Some(_) => return None,
        };
        if rest.next().is_some() {
            return None;
        }
        Some(Op::new(kind, ty, size))
    }

    fn base_name(&self) -> &'static str {
        use OpKind::*;
        match self.kind {
            Indir => "INDIR",
            Asgn => "ASGN",
            Cnst => "CNST",
            AddrG => "ADDRG",
            AddrF => "ADDRF",
            AddrL => "ADDRL",
            Vreg => "VREG",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Mod => "MOD",
            Neg => "NEG",
            BAnd => "BAND",
            BOr => "BOR",
            BXor => "BXOR",
            BCom => "BCOM",
            Lsh => "LSH",
            Rsh => "RSH",
            CvI => "CVI",
            CvU => "CVU",
            CvP => "CVP",
            Label => "LABEL",
            Jump => "JUMP",
            Eq => "EQ",
            Ne => "NE",
            Lt => "LT",
            Le => "LE",
            Gt => "GT",
            Ge => "GE",
            Arg => "ARG",
            Call => "CALL",
            Ret => "RET",
            Load => "LOAD",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = match self.ty {
            Ty::I => 'I',
            Ty::U => 'U',
            Ty::P => 'P',
            Ty::V => 'V',
        };
        write!(f, "{}{}", self.base_name(), ty)?;
        if self.size > 0 {
            write!(f, "{}", self.size)?;
        }
        Ok(())
    }
}

// Operator constants, named as in the grammar. These are the complete
// vocabulary the NEANDER-X grammar matches on.
#[rustfmt::skip]
mod consts {
    use super::{Op, OpKind, Ty};

    pub const ADDI1: Op = Op::new(OpKind::Add, Ty::I, 1);
    pub const ADDI2: Op = Op::new(OpKind::Add, Ty::I, 2);
    pub const ADDI4: Op = Op::new(OpKind::Add, Ty::I, 4);
    pub const ADDP2: Op = Op::new(OpKind::Add, Ty::P, 2);
    pub const ADDRFP2: Op = Op::new(OpKind::AddrF, Ty::P, 2);
    pub const ADDRFP4: Op = Op::new(OpKind::AddrF, Ty::P, 4);
    pub const ADDRGP2: Op = Op::new(OpKind::AddrG, Ty::P, 2);
    pub const ADDRGP4: Op = Op::new(OpKind::AddrG, Ty::P, 4);
    pub const ADDRLP2: Op = Op::new(OpKind::AddrL, Ty::P, 2);
    pub const ADDRLP4: Op = Op::new(OpKind::AddrL, Ty::P, 4);
    pub const ADDU1: Op = Op::new(OpKind::Add, Ty::U, 1);
    pub const ADDU2: Op = Op::new(OpKind::Add, Ty::U, 2);
    pub const ADDU4: Op = Op::new(OpKind::Add, Ty::U, 4);
    pub const ARGI1: Op = Op::new(OpKind::Arg, Ty::I, 1);
    pub const ARGI2: Op = Op::new(OpKind::Arg, Ty::I, 2);
    pub const ARGI4: Op = Op::new(OpKind::Arg, Ty::I, 4);
    pub const ARGP2: Op = Op::new(OpKind::Arg, Ty::P, 2);
    pub const ARGP4: Op = Op::new(OpKind::Arg, Ty::P, 4);
    pub const ARGU1: Op = Op::new(OpKind::Arg, Ty::U, 1);
    pub const ARGU2: Op = Op::new(OpKind::Arg, Ty::U, 2);
    pub const ARGU4: Op = Op::new(OpKind::Arg, Ty::U, 4);
    pub const ASGNI1: Op = Op::new(OpKind::Asgn, Ty::I, 1);
    pub const ASGNI2: Op = Op::new(OpKind::Asgn, Ty::I, 2);
    pub const ASGNI4: Op = Op::new(OpKind::Asgn, Ty::I, 4);
    pub const ASGNP2: Op = Op::new(OpKind::Asgn, Ty::P, 2);
    pub const ASGNP4: Op = Op::new(OpKind::Asgn, Ty::P, 4);
    pub const ASGNU1: Op = Op::new(OpKind::Asgn, Ty::U, 1);
    pub const ASGNU2: Op = Op::new(OpKind::Asgn, Ty::U, 2);
    pub const ASGNU4: Op = Op::new(OpKind::Asgn, Ty::U, 4);
    pub const BANDI1: Op = Op::new(OpKind::BAnd, Ty::I, 1);
    pub const BANDI2: Op = Op::new(OpKind::BAnd, Ty::I, 2);
    pub const BANDU1: Op = Op::new(OpKind::BAnd, Ty::U, 1);
    pub const BANDU2: Op = Op::new(OpKind::BAnd, Ty::U, 2);
    pub const BCOMI1: Op = Op::new(OpKind::BCom, Ty::I, 1);
    pub const BCOMI2: Op = Op::new(OpKind::BCom, Ty::I, 2);
    pub const BCOMU1: Op = Op::new(OpKind::BCom, Ty::U, 1);
    pub const BCOMU2: Op = Op::new(OpKind::BCom, Ty::U, 2);
    pub const BORI1: Op = Op::new(OpKind::BOr, Ty::I, 1);
    pub const BORI2: Op = Op::new(OpKind::BOr, Ty::I, 2);
    pub const BORU1: Op = Op::new(OpKind::BOr, Ty::U, 1);
    pub const BORU2: Op = Op::new(OpKind::BOr, Ty::U, 2);
    pub const BXORI1: Op = Op::new(OpKind::BXor, Ty::I, 1);
    pub const BXORI2: Op = Op::new(OpKind::BXor, Ty::I, 2);
    pub const BXORU1: Op = Op::new(OpKind::BXor, Ty::U, 1);
    pub const BXORU2: Op = Op::new(OpKind::BXor, Ty::U, 2);
    pub const CALLI1: Op = Op::new(OpKind::Call, Ty::I, 1);
    pub const CALLI2: Op = Op::new(OpKind::Call, Ty::I, 2);
    pub const CALLI4: Op = Op::new(OpKind::Call, Ty::I, 4);
    pub const CALLP2: Op = Op::new(OpKind::Call, Ty::P, 2);
    pub const CALLP4: Op = Op::new(OpKind::Call, Ty::P, 4);
    pub const CALLU1: Op = Op::new(OpKind::Call, Ty::U, 1);
    pub const CALLU2: Op = Op::new(OpKind::Call, Ty::U, 2);
    pub const CALLU4: Op = Op::new(OpKind::Call, Ty::U, 4);
    pub const CALLV: Op = Op::new(OpKind::Call, Ty::V, 0);
    pub const CNSTI1: Op = Op::new(OpKind::Cnst, Ty::I, 1);
    pub const CNSTI2: Op = Op::new(OpKind::Cnst, Ty::I, 2);
    pub const CNSTI4: Op = Op::new(OpKind::Cnst, Ty::I, 4);
    pub const CNSTP2: Op = Op::new(OpKind::Cnst, Ty::P, 2);
    pub const CNSTP4: Op = Op::new(OpKind::Cnst, Ty::P, 4);
    pub const CNSTU1: Op = Op::new(OpKind::Cnst, Ty::U, 1);
    pub const CNSTU2: Op = Op::new(OpKind::Cnst, Ty::U, 2);
    pub const CNSTU4: Op = Op::new(OpKind::Cnst, Ty::U, 4);
    pub const CVII1: Op = Op::new(OpKind::CvI, Ty::I, 1);
    pub const CVII2: Op = Op::new(OpKind::CvI, Ty::I, 2);
    pub const CVII4: Op = Op::new(OpKind::CvI, Ty::I, 4);
    pub const CVIU1: Op = Op::new(OpKind::CvI, Ty::U, 1);
    pub const CVIU2: Op = Op::new(OpKind::CvI, Ty::U, 2);
    pub const CVIU4: Op = Op::new(OpKind::CvI, Ty::U, 4);
    pub const CVPU2: Op = Op::new(OpKind::CvP, Ty::U, 2);
    pub const CVPU4: Op = Op::new(OpKind::CvP, Ty::U, 4);
    pub const CVUI1: Op = Op::new(OpKind::CvU, Ty::I, 1);
    pub const CVUI2: Op = Op::new(OpKind::CvU, Ty::I, 2);
    pub const CVUI4: Op = Op::new(OpKind::CvU, Ty::I, 4);
    pub const CVUP2: Op = Op::new(OpKind::CvU, Ty::P, 2);
    pub const CVUP4: Op = Op::new(OpKind::CvU, Ty::P, 4);
    pub const CVUU1: Op = Op::new(OpKind::CvU, Ty::U, 1);
    pub const CVUU2: Op = Op::new(OpKind::CvU, Ty::U, 2);
    pub const CVUU4: Op = Op::new(OpKind::CvU, Ty::U, 4);
    pub const DIVI1: Op = Op::new(OpKind::Div, Ty::I, 1);
    pub const DIVI2: Op = Op::new(OpKind::Div, Ty::I, 2);
    pub const DIVU1: Op = Op::new(OpKind::Div, Ty::U, 1);
    pub const DIVU2: Op = Op::new(OpKind::Div, Ty::U, 2);
    pub const EQI1: Op = Op::new(OpKind::Eq, Ty::I, 1);
    pub const EQI2: Op = Op::new(OpKind::Eq, Ty::I, 2);
    pub const EQU1: Op = Op::new(OpKind::Eq, Ty::U, 1);
    pub const EQU2: Op = Op::new(OpKind::Eq, Ty::U, 2);
    pub const GEI1: Op = Op::new(OpKind::Ge, Ty::I, 1);
    pub const GEI2: Op = Op::new(OpKind::Ge, Ty::I, 2);
    pub const GEU1: Op = Op::new(OpKind::Ge, Ty::U, 1);
    pub const GEU2: Op = Op::new(OpKind::Ge, Ty::U, 2);
    pub const GTI1: Op = Op::new(OpKind::Gt, Ty::I, 1);
    pub const GTI2: Op = Op::new(OpKind::Gt, Ty::I, 2);
    pub const GTU1: Op = Op::new(OpKind::Gt, Ty::U, 1);
    pub const GTU2: Op = Op::new(OpKind::Gt, Ty::U, 2);
    pub const INDIRI1: Op = Op::new(OpKind::Indir, Ty::I, 1);
    pub const INDIRI2: Op = Op::new(OpKind::Indir, Ty::I, 2);
    pub const INDIRI4: Op = Op::new(OpKind::Indir, Ty::I, 4);
    pub const INDIRP2: Op = Op::new(OpKind::Indir, Ty::P, 2);
    pub const INDIRP4: Op = Op::new(OpKind::Indir, Ty::P, 4);
    pub const INDIRU1: Op = Op::new(OpKind::Indir, Ty::U, 1);
    pub const INDIRU2: Op = Op::new(OpKind::Indir, Ty::U, 2);
    pub const INDIRU4: Op = Op::new(OpKind::Indir, Ty::U, 4);
    pub const JUMPV: Op = Op::new(OpKind::Jump, Ty::V, 0);
    pub const LABELV: Op = Op::new(OpKind::Label, Ty::V, 0);
    pub const LEI1: Op = Op::new(OpKind::Le, Ty::I, 1);
    pub const LEI2: Op = Op::new(OpKind::Le, Ty::I, 2);
    pub const LEU1: Op = Op::new(OpKind::Le, Ty::U, 1);
    pub const LEU2: Op = Op::new(OpKind::Le, Ty::U, 2);
    pub const LOADI1: Op = Op::new(OpKind::Load, Ty::I, 1);
    pub const LOADI2: Op = Op::new(OpKind::Load, Ty::I, 2);
    pub const LOADI4: Op = Op::new(OpKind::Load, Ty::I, 4);
    pub const LOADP2: Op = Op::new(OpKind::Load, Ty::P, 2);
    pub const LOADP4: Op = Op::new(OpKind::Load, Ty::P, 4);
    pub const LOADU1: Op = Op::new(OpKind::Load, Ty::U, 1);
    pub const LOADU2: Op = Op::new(OpKind::Load, Ty::U, 2);
    pub const LOADU4: Op = Op::new(OpKind::Load, Ty::U, 4);
    pub const LSHI1: Op = Op::new(OpKind::Lsh, Ty::I, 1);
    pub const LSHI2: Op = Op::new(OpKind::Lsh, Ty::I, 2);
    pub const LSHU1: Op = Op::new(OpKind::Lsh, Ty::U, 1);
    pub const LSHU2: Op = Op::new(OpKind::Lsh, Ty::U, 2);
    pub const LTI1: Op = Op::new(OpKind::Lt, Ty::I, 1);
    pub const LTI2: Op = Op::new(OpKind::Lt, Ty::I, 2);
    pub const LTU1: Op = Op::new(OpKind::Lt, Ty::U, 1);
    pub const LTU2: Op = Op::new(OpKind::Lt, Ty::U, 2);
    pub const MODI1: Op = Op::new(OpKind::Mod, Ty::I, 1);
    pub const MODI2: Op = Op::new(OpKind::Mod, Ty::I, 2);
    pub const MODU1: Op = Op::new(OpKind::Mod, Ty::U, 1);
    pub const MODU2: Op = Op::new(OpKind::Mod, Ty::U, 2);
    pub const MULI1: Op = Op::new(OpKind::Mul, Ty::I, 1);
    pub const MULI2: Op = Op::new(OpKind::Mul, Ty::I, 2);
    pub const MULU1: Op = Op::new(OpKind::Mul, Ty::U, 1);
    pub const MULU2: Op = Op::new(OpKind::Mul, Ty::U, 2);
    pub const NEGI1: Op = Op::new(OpKind::Neg, Ty::I, 1);
    pub const NEGI2: Op = Op::new(OpKind::Neg, Ty::I, 2);
    pub const NEI1: Op = Op::new(OpKind::Ne, Ty::I, 1);
    pub const NEI2: Op = Op::new(OpKind::Ne, Ty::I, 2);
    pub const NEU1: Op = Op::new(OpKind::Ne, Ty::U, 1);
    pub const NEU2: Op = Op::new(OpKind::Ne, Ty::U, 2);
    pub const RETI1: Op = Op::new(OpKind::Ret, Ty::I, 1);
    pub const RETI2: Op = Op::new(OpKind::Ret, Ty::I, 2);
    pub const RETI4: Op = Op::new(OpKind::Ret, Ty::I, 4);
    pub const RETP2: Op = Op::new(OpKind::Ret, Ty::P, 2);
    pub const RETP4: Op = Op::new(OpKind::Ret, Ty::P, 4);
    pub const RETU1: Op = Op::new(OpKind::Ret, Ty::U, 1);
    pub const RETU2: Op = Op::new(OpKind::Ret, Ty::U, 2);
    pub const RETU4: Op = Op::new(OpKind::Ret, Ty::U, 4);
    pub const RETV: Op = Op::new(OpKind::Ret, Ty::V, 0);
    pub const RSHI1: Op = Op::new(OpKind::Rsh, Ty::I, 1);
    pub const RSHI2: Op = Op::new(OpKind::Rsh, Ty::I, 2);
    pub const RSHU1: Op = Op::new(OpKind::Rsh, Ty::U, 1);
    pub const RSHU2: Op = Op::new(OpKind::Rsh, Ty::U, 2);
    pub const SUBI1: Op = Op::new(OpKind::Sub, Ty::I, 1);
    pub const SUBI2: Op = Op::new(OpKind::Sub, Ty::I, 2);
    pub const SUBI4: Op = Op::new(OpKind::Sub, Ty::I, 4);
    pub const SUBU1: Op = Op::new(OpKind::Sub, Ty::U, 1);
    pub const SUBU2: Op = Op::new(OpKind::Sub, Ty::U, 2);
    pub const SUBU4: Op = Op::new(OpKind::Sub, Ty::U, 4);
    pub const VREGP: Op = Op::new(OpKind::Vreg, Ty::P, 0);
}

pub use consts::*;
