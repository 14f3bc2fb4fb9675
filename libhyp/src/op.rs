use num_derive::FromPrimitive;
use strum_macros::{Display, EnumString};

/// Instruction opcodes of the hypothetical machine.
#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum Opcode {
    STOP = 0,
    ADD = 1,
    SUB = 2,
    MULT = 3,
    MOVER = 4,
    MOVEM = 5,
    COMP = 6,
    BC = 7,
    DIV = 8,
    READ = 9,
    PRINT = 10,
}

impl Opcode {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        mnemonic.parse().ok()
    }

    pub fn from_code(code: u8) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum Register {
    AREG = 1,
    BREG = 2,
    CREG = 3,
    DREG = 4,
}

/// Branch conditions, encoded in the register field of `BC`.
#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum ConditionCode {
    LT = 1,
    LE = 2,
    EQ = 3,
    GT = 4,
    GE = 5,
    ANY = 6,
}
