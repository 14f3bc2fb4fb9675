use libhyp::MachineWord;
use log::debug;

use crate::{
    directive::Declarative,
    error::{AsmError, Diagnostic},
    pass_one::Context,
    record::{OperandRef, ParsedLine, Record},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembledWord {
    pub line_no: usize,
    pub address: u32,
    pub word: MachineWord,
}

pub struct PassTwo {
    pub words: Vec<AssembledWord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turn pass one's records into machine words. A record whose operand has
/// no address produces an error instead of a word.
pub fn pass_two(lines: &[ParsedLine], context: &Context) -> PassTwo {
    let mut words = Vec::new();
    let mut diagnostics = Vec::new();

    for line in lines {
        match assemble_line(line, context) {
            Ok(Some(word)) => {
                debug!("{:>4} {:>5} {}", line.line_no, line.offset, word);
                words.push(AssembledWord {
                    line_no: line.line_no,
                    address: line.offset,
                    word,
                });
            }
            Ok(None) => {}
            Err(error) => diagnostics.push(Diagnostic::error(line.line_no, error)),
        }
    }

    PassTwo { words, diagnostics }
}

fn assemble_line(line: &ParsedLine, context: &Context) -> Result<Option<MachineWord>, AsmError> {
    let word = match line.record {
        Record::Directive { .. } => None,
        Record::Declarative {
            declarative: Declarative::DS,
            ..
        } => None,
        Record::Declarative {
            declarative: Declarative::DC,
            operand,
        } => Some(MachineWord::constant(operand)?),
        Record::Imperative {
            opcode,
            register,
            operand,
        } => Some(MachineWord::new(
            opcode,
            register,
            resolve(operand, context)?,
        )?),
    };

    Ok(word)
}

fn resolve(operand: OperandRef, context: &Context) -> Result<u32, AsmError> {
    match operand {
        OperandRef::Symbol(index) => {
            let symbol = context
                .symbols
                .get(index)
                .ok_or_else(|| AsmError::UndefinedSymbolReference(format!("#{}", index)))?;
            symbol
                .address
                .ok_or_else(|| AsmError::UndefinedSymbolReference(symbol.name.clone()))
        }
        OperandRef::Literal(index) => {
            let literal = context
                .literals
                .get(index)
                .ok_or_else(|| AsmError::UnresolvedLiteral(format!("#{}", index)))?;
            literal
                .address
                .ok_or_else(|| AsmError::UnresolvedLiteral(literal.text.clone()))
        }
        OperandRef::Constant(value) => Ok(value),
        OperandRef::None => Ok(0),
    }
}
