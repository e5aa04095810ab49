//! Heap-backed bitmap store

use super::{BitmapStore, check_range, check_room};
use crate::error::Result;

/// Bitmap store kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Vec<u8>,
    limit: Option<usize>,
}

impl MemoryStore {
    /// Unbounded store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses to grow past `limit` bytes
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit: Some(limit),
        }
    }
}

impl BitmapStore for MemoryStore {
    fn append(&mut self, bytes: &[u8]) -> Result<usize> {
        check_room(bytes.len(), self.remaining())?;
        let offset = self.bytes.len();
        self.bytes.extend_from_slice(bytes);
        Ok(offset)
    }

    fn read(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let range = check_range(offset, len, self.bytes.len())?;
        Ok(&self.bytes[range])
    }

    fn used(&self) -> usize {
        self.bytes.len()
    }

    fn capacity(&self) -> usize {
        self.limit.unwrap_or(usize::MAX)
    }
}
