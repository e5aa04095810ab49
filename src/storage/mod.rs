//! Append-only stores for packed node bitmaps
//!
//! A wavelet tree writes one bitmap per internal node while it is being
//! built and only reads them afterwards. Stores hand back the byte offset
//! of every appended bitmap; the tree keeps offsets and lengths in its node
//! table.

pub mod mapped;
pub mod memory;

pub use mapped::MappedStore;
pub use memory::MemoryStore;

use crate::error::{Result, WaveletError};

/// Append-only byte store for node bitmaps
pub trait BitmapStore: Send + Sync {
    /// Append a bitmap and return the offset it was written at
    ///
    /// The bytes are readable through [`BitmapStore::read`] once this returns.
    fn append(&mut self, bytes: &[u8]) -> Result<usize>;

    /// Borrow `len` committed bytes starting at `offset`
    fn read(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Number of committed bytes
    fn used(&self) -> usize;

    /// Maximum number of bytes the store can hold
    fn capacity(&self) -> usize;

    /// Bytes still available for appends
    fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.used())
    }
}

/// Bounds check shared by the store implementations
pub(crate) fn check_range(offset: usize, len: usize, used: usize) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(len) {
        Some(end) if end <= used => Ok(offset..end),
        _ => Err(WaveletError::StorageRange { offset, len, used }),
    }
}

/// Capacity check shared by the store implementations
pub(crate) fn check_room(requested: usize, available: usize) -> Result<()> {
    if requested > available {
        return Err(WaveletError::StorageExhausted {
            requested,
            available,
        });
    }
    Ok(())
}
