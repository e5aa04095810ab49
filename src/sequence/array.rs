//! Owned in-memory symbol sequence

use super::{Symbol, SymbolSource};

/// A symbol sequence held in a `Vec`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArraySequence {
    data: Vec<Symbol>,
}

impl ArraySequence {
    #[must_use]
    pub const fn new(data: Vec<Symbol>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.data
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Symbol> {
        self.data
    }
}

impl SymbolSource for ArraySequence {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn symbol_at(&self, index: usize) -> Symbol {
        self.data[index]
    }
}

impl SymbolSource for [Symbol] {
    fn len(&self) -> usize {
        <[Symbol]>::len(self)
    }

    fn symbol_at(&self, index: usize) -> Symbol {
        self[index]
    }
}

impl From<Vec<Symbol>> for ArraySequence {
    fn from(data: Vec<Symbol>) -> Self {
        Self::new(data)
    }
}

/// UTF-16 code units of the string
impl From<&str> for ArraySequence {
    fn from(text: &str) -> Self {
        Self::new(text.encode_utf16().collect())
    }
}

/// One symbol per byte
impl From<&[u8]> for ArraySequence {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().map(|&b| Symbol::from(b)).collect())
    }
}

impl FromIterator<Symbol> for ArraySequence {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
