use anyhow::{bail, Result};
use hypdbg::Sdb;
use std::fmt::Write;

use error::Diagnostic;
use pass_one::{pass_one, Context};
use pass_two::{pass_two, AssembledWord};
use record::ParsedLine;

pub mod constants;
pub mod directive;
pub mod error;
pub mod line;
pub mod literals;
pub mod location;
pub mod pass_one;
pub mod pass_two;
pub mod record;
pub mod symbols;

/// The result of both passes over one program.
pub struct Assembly {
    pub context: Context,
    pub lines: Vec<ParsedLine>,
    pub words: Vec<AssembledWord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn machine_code(&self) -> String {
        self.words
            .iter()
            .map(|word| format!("{}\n", word.word))
            .collect()
    }

    pub fn intermediate_code(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}\n", line.record))
            .collect()
    }

    pub fn debug_info(&self, name: &str) -> Sdb {
        let mut sdb = Sdb::new(name, self.context.start);

        let mut words = self.words.iter().peekable();
        for line in &self.lines {
            let word = words
                .next_if(|word| word.line_no == line.line_no)
                .map(|word| word.word.to_string());
            sdb.add_line(line.line_no, line.offset, line.record.to_string(), word);
        }

        for (index, symbol) in self.context.symbols.iter() {
            sdb.add_symbol(index, symbol.name.clone(), symbol.address, symbol.length);
        }
        for (index, literal) in self.context.literals.iter() {
            sdb.add_literal(index, literal.text.clone(), literal.address);
        }
        sdb.pools = self.context.literals.pools().to_vec();
        sdb.diagnostics = self.diagnostics.iter().map(|d| d.to_string()).collect();

        sdb
    }
}

/// Run both passes. Always completes; problems are in `diagnostics`.
pub fn assemble(program_text: &str) -> Assembly {
    let mut context = Context::new();

    let first = pass_one(&mut context, program_text);
    let second = pass_two(&first.lines, &context);

    let mut diagnostics = first.diagnostics;
    diagnostics.extend(second.diagnostics);

    Assembly {
        context,
        lines: first.lines,
        words: second.words,
        diagnostics,
    }
}

/// Assemble a program to machine code text, one word per line.
///
/// # Errors
///
/// If any statement has an error
pub fn assemble_program(program_text: &str) -> Result<String> {
    Ok(assemble_with_debug(program_text, "")?.0)
}

pub fn assemble_with_debug(program_text: &str, name: &str) -> Result<(String, String)> {
    let assembly = assemble(program_text);

    if assembly.has_errors() {
        let mut message = String::from("assembly failed");
        for diagnostic in assembly.diagnostics.iter().filter(|d| d.is_error()) {
            write!(&mut message, "\n  {}", diagnostic)?;
        }
        bail!(message);
    }

    Ok((
        assembly.machine_code(),
        assembly.debug_info(name).to_string()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_fail_the_program() {
        let result = assemble_program("START 0\nREAD NOWHERE\nEND");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("undefined symbol `NOWHERE`"));
    }

    #[test]
    fn debug_info_pairs_words_with_lines() -> Result<()> {
        let (code, debug) = assemble_with_debug("P START 40\nX DS 1\nREAD X\nEND", "P")?;
        assert_eq!(code, "+ 09 0 040\n");

        let sdb = Sdb::from_string(&debug)?;
        assert_eq!(sdb.name, "P");
        assert_eq!(sdb.start, 40);
        assert_eq!(sdb.lines.len(), 4);
        assert_eq!(sdb.lines[1].word, None);
        assert_eq!(sdb.lines[2].word.as_deref(), Some("+ 09 0 040"));
        assert_eq!(sdb.symbol("X").and_then(|s| s.address), Some(40));
        assert_eq!(sdb.line_at(41).map(|l| l.line_number), Some(3));
        Ok(())
    }
}
