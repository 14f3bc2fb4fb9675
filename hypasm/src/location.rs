use crate::{
    constants::{expr_regex, is_number},
    directive::{Declarative, Directive},
    error::AsmError,
    symbols::SymbolTable,
};

/// The address at which the next word will be placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationCounter {
    current: u32,
}

impl LocationCounter {
    pub fn new(start: u32) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// # Errors
    ///
    /// If the counter would pass the largest address
    pub fn advance(&mut self, words: u32) -> Result<(), AsmError> {
        self.current = self
            .current
            .checked_add(words)
            .ok_or(AsmError::LocationOverflow {
                location: self.current,
                words,
            })?;
        Ok(())
    }

    pub fn set(&mut self, address: u32) {
        self.current = address;
    }

    /// Move the counter to the target of an `ORIGIN`, returning it.
    pub fn origin(&mut self, expr: &str, symbols: &SymbolTable) -> Result<u32, AsmError> {
        let target = evaluate(Directive::ORIGIN, expr, symbols)?;
        self.set(target);
        Ok(target)
    }

    /// Reserve the storage for a `DS`, returning its size. No operand reserves one word.
    pub fn reserve(&mut self, size: Option<&str>) -> Result<u32, AsmError> {
        let words = match size {
            None => 1,
            Some(size) if is_number(size) => size
                .parse()
                .map_err(|_| AsmError::operand(Declarative::DS, size))?,
            Some(size) => return Err(AsmError::operand(Declarative::DS, size)),
        };
        self.advance(words).map_err(|error| match size {
            Some(size) => AsmError::operand(Declarative::DS, size),
            None => error,
        })?;
        Ok(words)
    }
}

/// Evaluate an address expression: `n`, `symbol`, `symbol+n` or `symbol-n`.
///
/// Symbols must already have an address; nothing is added to the table.
pub fn evaluate(directive: Directive, expr: &str, symbols: &SymbolTable) -> Result<u32, AsmError> {
    if is_number(expr) {
        return expr.parse().map_err(|_| AsmError::operand(directive, expr));
    }

    let captures = expr_regex()
        .captures(expr)
        .ok_or_else(|| AsmError::operand(directive, expr))?;

    let name = &captures["symbol"];
    let base = symbols
        .address_of(name)
        .ok_or_else(|| AsmError::UndefinedSymbolReference(name.to_owned()))?;

    let offset = match captures.name("offset") {
        Some(offset) => offset
            .as_str()
            .parse::<u32>()
            .map_err(|_| AsmError::operand(directive, expr))?,
        None => return Ok(base),
    };

    match captures.name("sign").map(|m| m.as_str()) {
        Some("-") => base.checked_sub(offset),
        _ => base.checked_add(offset),
    }
    .ok_or_else(|| AsmError::operand(directive, expr))
}
