use std::fmt::Display;

use thiserror::Error;

use crate::op::Opcode;

pub const REGISTER_DIGITS: usize = 1;
pub const ADDRESS_DIGITS: usize = 3;

const MAX_REGISTER: u32 = 9;
const MAX_ADDRESS: u32 = 999;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("{field} {value} does not fit in {digits} digit(s)")]
    FieldOverflow {
        field: &'static str,
        value: u32,
        digits: usize,
    },
}

/// One fixed-width word: `+ OO R AAA`.
///
/// The sign field is always `+`; negative values have no encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineWord {
    opcode: u8,
    register: u8,
    address: u16,
}

impl MachineWord {
    /// Build an instruction word.
    ///
    /// # Errors
    ///
    /// If the register or address doesn't fit its field
    pub fn new(opcode: Opcode, register: u8, address: u32) -> Result<Self, WordError> {
        check("register", register.into(), MAX_REGISTER, REGISTER_DIGITS)?;
        check("address", address, MAX_ADDRESS, ADDRESS_DIGITS)?;

        Ok(Self {
            opcode: opcode.code(),
            register,
            address: address as u16,
        })
    }

    /// Build the word for an inline constant. Opcode and register fields are zero.
    ///
    /// # Errors
    ///
    /// If the value doesn't fit the address field
    pub fn constant(value: u32) -> Result<Self, WordError> {
        check("constant", value, MAX_ADDRESS, ADDRESS_DIGITS)?;

        Ok(Self {
            opcode: 0,
            register: 0,
            address: value as u16,
        })
    }
}

fn check(field: &'static str, value: u32, max: u32, digits: usize) -> Result<(), WordError> {
    if value > max {
        return Err(WordError::FieldOverflow {
            field,
            value,
            digits,
        });
    }

    Ok(())
}

impl Display for MachineWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "+ {:0>2} {} {:0>3}",
            self.opcode, self.register, self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_format() {
        let word = MachineWord::new(Opcode::MOVER, 1, 201).unwrap();
        assert_eq!(word.to_string(), "+ 04 1 201");

        let word = MachineWord::new(Opcode::STOP, 0, 0).unwrap();
        assert_eq!(word.to_string(), "+ 00 0 000");
    }

    #[test]
    fn constant_format() {
        assert_eq!(MachineWord::constant(1).unwrap().to_string(), "+ 00 0 001");
        assert_eq!(MachineWord::constant(42).unwrap().to_string(), "+ 00 0 042");
    }

    #[test]
    fn overflow() {
        assert_eq!(
            MachineWord::new(Opcode::ADD, 1, 1000),
            Err(WordError::FieldOverflow {
                field: "address",
                value: 1000,
                digits: 3
            })
        );
        assert!(MachineWord::new(Opcode::ADD, 10, 5).is_err());
        assert!(MachineWord::constant(999).is_ok());
    }
}
