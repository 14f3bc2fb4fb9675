use std::fmt::Display;

use libhyp::op::Opcode;

use crate::directive::{Declarative, Directive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRef {
    Symbol(usize),
    Literal(usize),
    Constant(u32),
    None,
}

/// What pass one hands to pass two for each statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Directive {
        directive: Directive,
        operand: Option<u32>,
    },
    Declarative {
        declarative: Declarative,
        operand: u32,
    },
    Imperative {
        opcode: Opcode,
        register: u8,
        operand: OperandRef,
    },
}

impl Record {
    /// Machine words pass two emits for this record.
    pub fn word_count(&self) -> usize {
        match self {
            Record::Directive { .. } => 0,
            Record::Declarative { declarative, .. } => match declarative {
                Declarative::DC => 1,
                Declarative::DS => 0,
            },
            Record::Imperative { .. } => 1,
        }
    }
}

/// The classic intermediate code form, e.g. `(IS,04)(1)(L,2)`.
impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Directive { directive, operand } => {
                write!(f, "(AD,{:0>2})", directive.code())?;
                if let Some(operand) = operand {
                    write!(f, "(C,{})", operand)?;
                }
                Ok(())
            }
            Record::Declarative {
                declarative,
                operand,
            } => write!(f, "(DL,{:0>2})(C,{})", declarative.code(), operand),
            Record::Imperative {
                opcode,
                register,
                operand,
            } => {
                write!(f, "(IS,{:0>2})", opcode.code())?;
                if *register == 0 && *operand == OperandRef::None {
                    return Ok(());
                }
                write!(f, "({})", register)?;
                match operand {
                    OperandRef::Symbol(index) => write!(f, "(S,{})", index),
                    OperandRef::Literal(index) => write!(f, "(L,{})", index),
                    OperandRef::Constant(value) => write!(f, "(C,{})", value),
                    OperandRef::None => Ok(()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line_no: usize,
    pub offset: u32,
    pub record: Record,
}
