use std::fmt::Display;

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub address: Option<u32>,
    pub length: u32,
}

impl Symbol {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            address: None,
            length: 1,
        }
    }
}

/// Symbols in first-seen order. Indices are 1-based and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: IndexMap::new(),
        }
    }

    fn entry(&mut self, name: &str) -> (usize, &mut Symbol) {
        let entry = self.symbols.entry(name.to_owned());
        let index = entry.index() + 1;
        (index, entry.or_insert_with(|| Symbol::new(name)))
    }

    /// Bind `name` to `address`, returning its index and the address it had
    /// before if this rebinds it.
    pub fn define_label(&mut self, name: &str, address: u32) -> (usize, Option<u32>) {
        let (index, symbol) = self.entry(name);
        let previous = symbol.address.replace(address);
        (index, previous)
    }

    /// Index for an operand use of `name`. The address is left alone.
    pub fn reference(&mut self, name: &str) -> usize {
        self.entry(name).0
    }

    pub fn set_length(&mut self, name: &str, length: u32) {
        if let Some(symbol) = self.symbols.get_mut(name) {
            symbol.length = length;
        }
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        index
            .checked_sub(1)
            .and_then(|i| self.symbols.get_index(i))
            .map(|(_, symbol)| symbol)
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn address_of(&self, name: &str) -> Option<u32> {
        self.lookup(name).and_then(|symbol| symbol.address)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Symbol)> {
        self.symbols
            .values()
            .enumerate()
            .map(|(i, symbol)| (i + 1, symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// One row per symbol: `index name address length`, address 0 when unresolved.
impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, symbol) in self.iter() {
            writeln!(
                f,
                "{} {} {} {}",
                index,
                symbol.name,
                symbol.address.unwrap_or(0),
                symbol.length
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_first_sight() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.reference("X"), 1);
        assert_eq!(symbols.define_label("LOOP", 200), (2, None));
        assert_eq!(symbols.reference("X"), 1);
        assert_eq!(symbols.reference("LOOP"), 2);
        assert_eq!(symbols.define_label("X", 205), (1, None));
        assert_eq!(symbols.len(), 2);

        assert_eq!(symbols.get(1).map(|s| s.name.as_str()), Some("X"));
        assert_eq!(symbols.get(0), None);
        assert_eq!(symbols.get(3), None);
    }

    #[test]
    fn references_never_overwrite() {
        let mut symbols = SymbolTable::new();
        symbols.define_label("A", 100);
        symbols.reference("A");
        assert_eq!(symbols.address_of("A"), Some(100));
    }

    #[test]
    fn redefinition_rebinds() {
        let mut symbols = SymbolTable::new();
        symbols.define_label("A", 100);
        assert_eq!(symbols.define_label("A", 104), (1, Some(100)));
        assert_eq!(symbols.address_of("A"), Some(104));
    }

    #[test]
    fn rows() {
        let mut symbols = SymbolTable::new();
        symbols.define_label("BUF", 300);
        symbols.set_length("BUF", 4);
        symbols.reference("MISSING");

        assert_eq!(symbols.to_string(), "1 BUF 300 4\n2 MISSING 0 1\n");
        assert_eq!(symbols.address_of("MISSING"), None);
    }
}
