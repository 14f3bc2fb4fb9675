use libhyp::op::Opcode;
use log::{debug, warn};

use crate::{
    constants::{self, is_number, is_symbol_name, LITERAL_MARKER},
    directive::{Declarative, Directive, Mnemonic},
    error::{AsmError, Diagnostic},
    line::{classify, SourceLine, Statement},
    literals::LiteralTable,
    location::{evaluate, LocationCounter},
    record::{OperandRef, ParsedLine, Record},
    symbols::SymbolTable,
};

/// State shared by both passes. Pass one fills it, pass two only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub start: u32,
    pub location: LocationCounter,
    pub symbols: SymbolTable,
    pub literals: LiteralTable,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectStart,
    InBody,
    Done,
}

pub struct PassOne {
    pub lines: Vec<ParsedLine>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct FirstPass<'a> {
    context: &'a mut Context,
    state: State,
    lines: Vec<ParsedLine>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> FirstPass<'a> {
    fn new(context: &'a mut Context) -> Self {
        Self {
            context,
            state: State::ExpectStart,
            lines: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn parse_lines(context: &'a mut Context, lines: &[&str]) -> PassOne {
        let mut pass = Self::new(context);

        for (line_no, line) in lines.iter().enumerate().map(|(i, line)| (i + 1, line)) {
            if pass.state == State::Done {
                debug!("stopping at line {}, after END", line_no);
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            pass.parse_line(line_no, line);
        }

        if pass.state != State::Done {
            warn!("no END statement, closing the program at {}", pass.lc());
            pass.diagnostics
                .push(Diagnostic::warning(lines.len(), AsmError::MissingEnd));
            if let Err(error) = pass.close_program() {
                pass.diagnostics.push(Diagnostic::error(lines.len(), error));
            }
        }

        PassOne {
            lines: pass.lines,
            diagnostics: pass.diagnostics,
        }
    }

    fn lc(&self) -> u32 {
        self.context.location.current()
    }

    fn parse_line(&mut self, line_no: usize, line: &str) {
        let source = classify(line);

        if self.state == State::ExpectStart {
            self.state = State::InBody;
            if let Ok(SourceLine::Statement(ref statement)) = source {
                if statement.mnemonic == Mnemonic::Directive(Directive::START) {
                    self.start(line_no, statement);
                    return;
                }
            }
            warn!("line {}: first statement is not START, assembling from 0", line_no);
            self.diagnostics
                .push(Diagnostic::warning(line_no, AsmError::MissingStart));
        }

        if let Err(error) = source.and_then(|source| self.statement(line_no, source)) {
            debug!("line {}: {}", line_no, error);
            self.diagnostics.push(Diagnostic::error(line_no, error));
        }
    }

    fn start(&mut self, line_no: usize, statement: &Statement) {
        let start = match statement.operand(0) {
            None => {
                warn!("line {}: START has no address, assembling from 0", line_no);
                0
            }
            Some(address) => match address.parse::<u32>() {
                Ok(start) if is_number(address) => start,
                _ => {
                    warn!("line {}: bad START address `{}`, assembling from 0", line_no, address);
                    self.diagnostics.push(Diagnostic::warning(
                        line_no,
                        AsmError::operand(Directive::START, address),
                    ));
                    0
                }
            },
        };

        self.context.start = start;
        self.context.location.set(start);

        if let Some(label) = &statement.label {
            self.define_label(line_no, label, start);
        }

        self.emit(
            line_no,
            start,
            Record::Directive {
                directive: Directive::START,
                operand: Some(start),
            },
        );
    }

    fn statement(&mut self, line_no: usize, source: SourceLine) -> Result<(), AsmError> {
        let statement = match source {
            SourceLine::BareLiteral(text) => {
                self.context.literals.intern(&text);
                return Ok(());
            }
            SourceLine::Statement(statement) => statement,
        };

        // EQU binds its label to the expression instead
        if let Some(label) = &statement.label {
            if statement.mnemonic != Mnemonic::Directive(Directive::EQU) {
                let lc = self.lc();
                self.define_label(line_no, label, lc);
            }
        }

        match statement.mnemonic {
            Mnemonic::Directive(directive) => self.directive(line_no, directive, &statement),
            Mnemonic::Declarative(declarative) => {
                self.declarative(line_no, declarative, &statement)
            }
            Mnemonic::Imperative(opcode) => self.imperative(line_no, opcode, &statement),
        }
    }

    fn define_label(&mut self, line_no: usize, name: &str, address: u32) {
        let (_, previous) = self.context.symbols.define_label(name, address);
        if let Some(previous) = previous {
            warn!(
                "line {}: {} rebound from {} to {}",
                line_no, name, previous, address
            );
            self.diagnostics.push(Diagnostic::warning(
                line_no,
                AsmError::SymbolRedefined {
                    name: name.to_owned(),
                    previous,
                },
            ));
        }
    }

    fn directive(
        &mut self,
        line_no: usize,
        directive: Directive,
        statement: &Statement,
    ) -> Result<(), AsmError> {
        let offset = self.lc();

        let operand = match directive {
            Directive::START => {
                return Err(AsmError::MalformedStatement(
                    "START must be the first statement".into(),
                ))
            }
            Directive::LTORG => {
                let words = self.context.literals.flush_pool(offset)?;
                self.context.location.advance(words)?;
                None
            }
            Directive::END => {
                self.state = State::Done;
                self.close_program()?;
                None
            }
            Directive::ORIGIN => {
                let expr = required_operand(statement)?;
                Some(self.context.location.origin(expr, &self.context.symbols)?)
            }
            Directive::EQU => {
                let label = statement.label.as_deref().ok_or_else(|| {
                    AsmError::MalformedStatement("EQU needs a label to bind".into())
                })?;
                let expr = required_operand(statement)?;
                match evaluate(Directive::EQU, expr, &self.context.symbols) {
                    Ok(value) => {
                        self.define_label(line_no, label, value);
                        Some(value)
                    }
                    Err(error) => {
                        self.context.symbols.reference(label);
                        return Err(error);
                    }
                }
            }
        };

        self.emit(line_no, offset, Record::Directive { directive, operand });
        Ok(())
    }

    fn declarative(
        &mut self,
        line_no: usize,
        declarative: Declarative,
        statement: &Statement,
    ) -> Result<(), AsmError> {
        let offset = self.lc();

        let operand = match declarative {
            Declarative::DC => {
                self.context.location.advance(1)?;
                let raw = required_operand(statement)?;
                let value = raw.trim_matches('\'');
                if !is_number(value) {
                    return Err(AsmError::operand(declarative, raw));
                }
                value
                    .parse()
                    .map_err(|_| AsmError::operand(declarative, raw))?
            }
            Declarative::DS => {
                let size = self.context.location.reserve(statement.operand(0))?;
                if let Some(label) = &statement.label {
                    self.context.symbols.set_length(label, size);
                }
                size
            }
        };

        self.emit(
            line_no,
            offset,
            Record::Declarative {
                declarative,
                operand,
            },
        );
        Ok(())
    }

    fn imperative(
        &mut self,
        line_no: usize,
        opcode: Opcode,
        statement: &Statement,
    ) -> Result<(), AsmError> {
        let offset = self.lc();
        self.context.location.advance(1)?;

        let (register, operand) = match statement.operands.as_slice() {
            [] => (0, None),
            [operand] => (0, Some(operand.as_str())),
            [register, operand] => {
                let register = constants::register(opcode, register).ok_or_else(|| {
                    AsmError::MalformedStatement(format!("`{}` is not a register", register))
                })?;
                (register, Some(operand.as_str()))
            }
            operands => {
                return Err(AsmError::MalformedStatement(format!(
                    "{} takes at most two operands, found {}",
                    opcode,
                    operands.len()
                )))
            }
        };

        let operand = match operand {
            Some(operand) => self.operand_ref(operand)?,
            None => OperandRef::None,
        };

        self.emit(
            line_no,
            offset,
            Record::Imperative {
                opcode,
                register,
                operand,
            },
        );
        Ok(())
    }

    fn operand_ref(&mut self, operand: &str) -> Result<OperandRef, AsmError> {
        if operand.len() > 1 && operand.starts_with(LITERAL_MARKER) {
            Ok(OperandRef::Literal(self.context.literals.intern(operand)))
        } else if is_number(operand) {
            operand.parse().map(OperandRef::Constant).map_err(|_| {
                AsmError::MalformedStatement(format!("constant `{}` is too large", operand))
            })
        } else if is_symbol_name(operand) {
            Ok(OperandRef::Symbol(self.context.symbols.reference(operand)))
        } else {
            Err(AsmError::MalformedStatement(format!(
                "`{}` is not a symbol, literal or constant",
                operand
            )))
        }
    }

    /// Flush the open pool, then anything still unplaced.
    fn close_program(&mut self) -> Result<(), AsmError> {
        let pooled = self.context.literals.flush_pool(self.lc())?;
        self.context.location.advance(pooled)?;
        let rest = self.context.literals.flush_all(self.lc())?;
        self.context.location.advance(rest)
    }

    fn emit(&mut self, line_no: usize, offset: u32, record: Record) {
        debug!("{:>4} {:>5} {}", line_no, offset, record);
        self.lines.push(ParsedLine {
            line_no,
            offset,
            record,
        });
    }
}

fn required_operand(statement: &Statement) -> Result<&str, AsmError> {
    statement.operand(0).ok_or_else(|| {
        AsmError::MalformedStatement(format!("{} needs an operand", statement.mnemonic))
    })
}

pub fn pass_one(context: &mut Context, program_text: &str) -> PassOne {
    let lines = program_text.lines().collect::<Vec<_>>();
    FirstPass::parse_lines(context, &lines)
}
