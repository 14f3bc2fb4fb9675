use std::fmt::Display;

use libhyp::WordError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("malformed statement: {0}")]
    MalformedStatement(String),

    #[error("invalid operand for {directive}: `{operand}`")]
    MalformedDirectiveOperand { directive: String, operand: String },

    #[error("undefined symbol `{0}`")]
    UndefinedSymbolReference(String),

    #[error("literal {0} has no address")]
    UnresolvedLiteral(String),

    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    #[error(transparent)]
    AddressOverflow(#[from] WordError),

    #[error("location counter overflows placing {words} word(s) at {location}")]
    LocationOverflow { location: u32, words: u32 },

    #[error("symbol `{name}` redefined, was {previous}")]
    SymbolRedefined { name: String, previous: u32 },

    #[error("program does not begin with START, assembling from 0")]
    MissingStart,

    #[error("program has no END statement")]
    MissingEnd,
}

impl AsmError {
    pub(crate) fn operand(directive: impl Display, operand: &str) -> Self {
        AsmError::MalformedDirectiveOperand {
            directive: directive.to_string(),
            operand: operand.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found on one source line. Neither pass stops for these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line_no: usize,
    pub severity: Severity,
    pub error: AsmError,
}

impl Diagnostic {
    pub fn error(line_no: usize, error: AsmError) -> Self {
        Self {
            line_no,
            severity: Severity::Error,
            error,
        }
    }

    pub fn warning(line_no: usize, error: AsmError) -> Self {
        Self {
            line_no,
            severity: Severity::Warning,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "line {}: {}: {}", self.line_no, severity, self.error)
    }
}
