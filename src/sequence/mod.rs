//! Symbol sequences that a wavelet tree can be built from
//!
//! A sequence is anything that can report its length and hand out the
//! symbol at a position. Two sources are provided: an owned in-memory
//! array and a read-only memory-mapped file.

pub mod array;
pub mod mapped;

pub use array::ArraySequence;
pub use mapped::MappedSequence;

/// A single symbol (a 16-bit code unit)
pub type Symbol = u16;

/// Random-access source of symbols
pub trait SymbolSource: Sync {
    /// Number of symbols in the sequence
    fn len(&self) -> usize;

    /// Symbol at `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    fn symbol_at(&self, index: usize) -> Symbol;

    /// Whether the sequence holds no symbols
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all symbols in order
    fn symbols(&self) -> impl Iterator<Item = Symbol> + '_
    where
        Self: Sized,
    {
        (0..self.len()).map(move |i| self.symbol_at(i))
    }

    /// Smallest and largest symbol, or `None` for an empty sequence
    fn symbol_range(&self) -> Option<(Symbol, Symbol)> {
        (0..self.len()).map(|i| self.symbol_at(i)).fold(None, |acc, c| match acc {
            None => Some((c, c)),
            Some((lo, hi)) => Some((lo.min(c), hi.max(c))),
        })
    }
}
