use serde::{Deserialize, Serialize};
pub use serde_json::Error;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SdbLine {
    pub line_number: usize,
    pub offset: u32,
    pub intermediate: String,
    pub word: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SdbSymbol {
    pub index: usize,
    pub name: String,
    pub address: Option<u32>,
    pub length: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SdbLiteral {
    pub index: usize,
    pub text: String,
    pub address: Option<u32>,
}

/// Everything the assembler knew about a program, for tools that sit
/// downstream of it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Sdb {
    pub name: String,
    pub start: u32,
    pub lines: Vec<SdbLine>,
    pub symbols: Vec<SdbSymbol>,
    pub literals: Vec<SdbLiteral>,
    pub pools: Vec<usize>,
    pub diagnostics: Vec<String>,
}

impl Sdb {
    pub fn new(name: &str, start: u32) -> Self {
        Sdb {
            name: name.into(),
            start,
            lines: Vec::new(),
            symbols: Vec::new(),
            literals: Vec::new(),
            pools: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_string(dbg: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(dbg)
    }

    pub fn add_line(
        &mut self,
        line_number: usize,
        offset: u32,
        intermediate: String,
        word: Option<String>,
    ) {
        self.lines.push(SdbLine {
            line_number,
            offset,
            intermediate,
            word,
        });
    }

    pub fn add_symbol(&mut self, index: usize, name: String, address: Option<u32>, length: u32) {
        self.symbols.push(SdbSymbol {
            index,
            name,
            address,
            length,
        });
    }

    pub fn add_literal(&mut self, index: usize, text: String, address: Option<u32>) {
        self.literals.push(SdbLiteral {
            index,
            text,
            address,
        });
    }

    pub fn symbol(&self, name: &str) -> Option<&SdbSymbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }

    /// Source line that produced the word at `address`.
    pub fn line_at(&self, address: u32) -> Option<&SdbLine> {
        self.lines
            .iter()
            .find(|line| line.offset == address && line.word.is_some())
    }
}
