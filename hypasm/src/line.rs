use crate::{
    constants::{is_symbol_name, token_regex, LITERAL_MARKER},
    directive::Mnemonic,
    error::AsmError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLine {
    Statement(Statement),
    /// A literal standing alone on its line. It joins the open pool but
    /// takes no space until the pool is flushed.
    BareLiteral(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub label: Option<String>,
    pub mnemonic: Mnemonic,
    pub operands: Vec<String>,
}

impl Statement {
    pub fn operand(&self, n: usize) -> Option<&str> {
        self.operands.get(n).map(String::as_str)
    }
}

/// Split a non-blank source line into label, mnemonic and up to two operands.
///
/// The first token is a label when more tokens follow and it is not itself a mnemonic.
pub fn classify(line: &str) -> Result<SourceLine, AsmError> {
    let tokens = token_regex()
        .split(line.trim())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>();

    match tokens.as_slice() {
        [] => return Err(AsmError::MalformedStatement("empty statement".into())),
        [only] if only.starts_with(LITERAL_MARKER) => {
            return Ok(SourceLine::BareLiteral((*only).to_owned()))
        }
        _ => {}
    }

    let (label, rest) = if tokens.len() >= 2 && Mnemonic::parse(tokens[0]).is_none() {
        (Some(tokens[0]), &tokens[1..])
    } else {
        (None, &tokens[..])
    };

    if let Some(label) = label {
        if !is_symbol_name(label) {
            return Err(AsmError::MalformedStatement(format!(
                "`{}` is not a valid label",
                label
            )));
        }
    }

    let mnemonic =
        Mnemonic::parse(rest[0]).ok_or_else(|| AsmError::UnknownMnemonic(rest[0].to_owned()))?;

    let operands = &rest[1..];
    if operands.len() > 2 {
        return Err(AsmError::MalformedStatement(format!(
            "{} takes at most two operands, found {}",
            mnemonic,
            operands.len()
        )));
    }

    Ok(SourceLine::Statement(Statement {
        label: label.map(str::to_owned),
        mnemonic,
        operands: operands.iter().map(|op| (*op).to_owned()).collect(),
    }))
}
