//! Node table entries

use crate::sequence::Symbol;

/// One node of the wavelet tree
///
/// Internal nodes cover a symbol range `[lo, hi]` with `lo < hi` and own a
/// bitmap of `len` bits in the store: bit `i` is set when the `i`-th symbol
/// routed to this node is greater than `mid()` and goes right. Leaves cover
/// a single symbol and own no bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub lo: Symbol,
    pub hi: Symbol,
    /// Number of symbols routed to this node
    pub len: usize,
    /// Byte offset of the bitmap in the store (unused for leaves)
    pub bitmap_offset: usize,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl Node {
    pub(crate) const fn new(lo: Symbol, hi: Symbol, len: usize) -> Self {
        Self {
            lo,
            hi,
            len,
            bitmap_offset: 0,
            left: None,
            right: None,
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    /// Largest symbol routed to the left child
    #[must_use]
    pub const fn mid(&self) -> Symbol {
        ((self.lo as u32 + self.hi as u32) / 2) as Symbol
    }

    #[must_use]
    pub const fn contains(&self, symbol: Symbol) -> bool {
        self.lo <= symbol && symbol <= self.hi
    }

    /// Child on the side selected by `bit` (`false` = left)
    #[must_use]
    pub const fn child(&self, bit: bool) -> Option<usize> {
        if bit { self.right } else { self.left }
    }
}
