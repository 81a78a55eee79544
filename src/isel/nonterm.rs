//! Grammar nonterminals.

use std::fmt;

/// A goal category of the tree grammar.
///
/// The set is fixed at grammar-definition time; every rule produces exactly
/// one of these and may demand them of subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Nt {
    /// A statement: emitted for effect, no value.
    Stmt = 0,
    /// A value realized in the accumulator.
    Reg,
    /// 16-bit constant.
    Con2,
    /// 8-bit constant.
    Con1,
    /// 32-bit constant.
    Con4,
    /// The constant 1, foldable into INC/DEC/single shifts.
    ConN,
    /// A directly addressable location (global, or resolved frame slot).
    Addr,
    /// A frame-relative address, printed with the `,FP` addressing mode.
    Faddr,
    /// A virtual register, bound to a dedicated memory slot.
    Vreg,
}

impl Nt {
    pub const COUNT: usize = 9;

    pub const ALL: [Nt; Nt::COUNT] = [
        Nt::Stmt,
        Nt::Reg,
        Nt::Con2,
        Nt::Con1,
        Nt::Con4,
        Nt::ConN,
        Nt::Addr,
        Nt::Faddr,
        Nt::Vreg,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Nt::Stmt => "stmt",
            Nt::Reg => "reg",
            Nt::Con2 => "con2",
            Nt::Con1 => "con1",
            Nt::Con4 => "con4",
            Nt::ConN => "conN",
            Nt::Addr => "addr",
            Nt::Faddr => "faddr",
            Nt::Vreg => "vreg",
        }
    }
}

impl fmt::Display for Nt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
