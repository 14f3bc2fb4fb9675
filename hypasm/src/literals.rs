use std::fmt::Display;

use indexmap::IndexMap;

use crate::error::AsmError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub text: String,
    pub address: Option<u32>,
}

/// Literals in first-reference order, grouped into pools by the flushes
/// between them. Indices are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralTable {
    literals: IndexMap<String, Literal>,
    // First index of each flushed pool.
    pools: Vec<usize>,
    // 0-based start of the open pool.
    open_pool: usize,
}

impl LiteralTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `text`, adding it to the open pool on first reference.
    pub fn intern(&mut self, text: &str) -> usize {
        let entry = self.literals.entry(text.to_owned());
        let index = entry.index() + 1;
        entry.or_insert_with(|| Literal {
            text: text.to_owned(),
            address: None,
        });
        index
    }

    /// Place the open pool at `address` and start a new one. Returns the
    /// number of words placed.
    pub fn flush_pool(&mut self, address: u32) -> Result<u32, AsmError> {
        let words = self.assign(self.open_pool, address)?;
        self.open_pool = self.literals.len();
        Ok(words)
    }

    /// Place every literal still without an address, whatever its pool.
    pub fn flush_all(&mut self, address: u32) -> Result<u32, AsmError> {
        let words = self.assign(0, address)?;
        self.open_pool = self.literals.len();
        Ok(words)
    }

    // Places all pending literals or none of them.
    fn assign(&mut self, from: usize, address: u32) -> Result<u32, AsmError> {
        let pending = self
            .literals
            .values()
            .skip(from)
            .filter(|literal| literal.address.is_none())
            .count();
        let words = u32::try_from(pending).unwrap_or(u32::MAX);
        if address.checked_add(words).is_none() {
            return Err(AsmError::LocationOverflow {
                location: address,
                words,
            });
        }

        let mut next = address;
        let mut first = None;

        for (i, literal) in self.literals.values_mut().enumerate().skip(from) {
            if literal.address.is_none() {
                literal.address = Some(next);
                next += 1;
                first.get_or_insert(i + 1);
            }
        }

        if let Some(first) = first {
            self.pools.push(first);
        }

        Ok(words)
    }

    pub fn get(&self, index: usize) -> Option<&Literal> {
        index
            .checked_sub(1)
            .and_then(|i| self.literals.get_index(i))
            .map(|(_, literal)| literal)
    }

    pub fn lookup(&self, text: &str) -> Option<&Literal> {
        self.literals.get(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Literal)> {
        self.literals
            .values()
            .enumerate()
            .map(|(i, literal)| (i + 1, literal))
    }

    pub fn pools(&self) -> &[usize] {
        &self.pools
    }

    pub fn pool_table(&self) -> PoolTable<'_> {
        PoolTable(&self.pools)
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// One row per literal: `index text address`, address 0 when unresolved.
impl Display for LiteralTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, literal) in self.iter() {
            writeln!(
                f,
                "{} {} {}",
                index,
                literal.text,
                literal.address.unwrap_or(0)
            )?;
        }
        Ok(())
    }
}

pub struct PoolTable<'a>(&'a [usize]);

impl Display for PoolTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for first in self.0 {
            writeln!(f, "{}", first)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_once() {
        let mut literals = LiteralTable::new();
        assert_eq!(literals.intern("='5'"), 1);
        assert_eq!(literals.intern("='1'"), 2);
        assert_eq!(literals.intern("='5'"), 1);
        assert_eq!(literals.len(), 2);
    }

    #[test]
    fn flush_in_reference_order() -> Result<(), AsmError> {
        let mut literals = LiteralTable::new();
        literals.intern("='5'");
        literals.intern("='1'");

        assert_eq!(literals.flush_pool(210)?, 2);
        assert_eq!(literals.lookup("='5'").and_then(|l| l.address), Some(210));
        assert_eq!(literals.lookup("='1'").and_then(|l| l.address), Some(211));
        assert_eq!(literals.pools(), &[1]);
        Ok(())
    }

    #[test]
    fn pools_partition() -> Result<(), AsmError> {
        let mut literals = LiteralTable::new();
        literals.intern("='5'");
        literals.flush_pool(100)?;

        // Already placed: no new pool member.
        assert_eq!(literals.intern("='5'"), 1);
        literals.intern("='7'");
        literals.intern("='8'");
        assert_eq!(literals.flush_pool(120)?, 2);

        assert_eq!(literals.pools(), &[1, 2]);
        assert_eq!(literals.get(1).and_then(|l| l.address), Some(100));
        assert_eq!(literals.get(2).and_then(|l| l.address), Some(120));
        assert_eq!(literals.get(3).and_then(|l| l.address), Some(121));
        Ok(())
    }

    #[test]
    fn empty_flush_records_nothing() -> Result<(), AsmError> {
        let mut literals = LiteralTable::new();
        assert_eq!(literals.flush_pool(100)?, 0);
        assert_eq!(literals.flush_all(100)?, 0);
        assert_eq!(literals.flush_all(u32::MAX)?, 0);
        assert!(literals.pools().is_empty());
        Ok(())
    }

    #[test]
    fn addresses_are_immutable() -> Result<(), AsmError> {
        let mut literals = LiteralTable::new();
        literals.intern("='2'");
        literals.flush_pool(50)?;
        literals.intern("='3'");
        assert_eq!(literals.flush_all(80)?, 1);

        assert_eq!(literals.get(1).and_then(|l| l.address), Some(50));
        assert_eq!(literals.get(2).and_then(|l| l.address), Some(80));
        assert_eq!(literals.to_string(), "1 ='2' 50\n2 ='3' 80\n");
        assert_eq!(literals.pool_table().to_string(), "1\n2\n");
        Ok(())
    }

    #[test]
    fn pool_past_the_top_stays_open() -> Result<(), AsmError> {
        let mut literals = LiteralTable::new();
        literals.intern("='1'");
        literals.intern("='2'");

        assert_eq!(
            literals.flush_pool(u32::MAX - 1),
            Err(AsmError::LocationOverflow {
                location: u32::MAX - 1,
                words: 2
            })
        );
        assert_eq!(literals.get(1).and_then(|l| l.address), None);
        assert!(literals.pools().is_empty());

        assert_eq!(literals.flush_pool(u32::MAX - 2)?, 2);
        assert_eq!(literals.get(2).and_then(|l| l.address), Some(u32::MAX - 1));
        assert_eq!(literals.pools(), &[1]);
        Ok(())
    }
}
