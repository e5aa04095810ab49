//! Read-only memory-mapped file treated as a symbol sequence
//!
//! Each byte of the file is one symbol.

use std::path::{Path, PathBuf};

use memmap2::Mmap;

use super::{Symbol, SymbolSource};
use crate::error::util::safe_open_file;
use crate::error::{Result, WaveletError};

/// A file mapped into memory, one symbol per byte
#[derive(Debug)]
pub struct MappedSequence {
    // None for zero-length files, which cannot be mapped on every platform
    map: Option<Mmap>,
    path: PathBuf,
}

impl MappedSequence {
    /// Map the file at `path` read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = safe_open_file(path, "reading symbol sequence")?;
        let len = file
            .metadata()
            .map_err(|e| {
                WaveletError::io_error_with_source("Failed to read file metadata", e).with_path(path)
            })?
            .len();

        let map = if len == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only; the file must not be truncated while mapped.
            let map = unsafe { Mmap::map(&file) }.map_err(|e| {
                WaveletError::io_error_with_source("Failed to map file", e).with_path(path)
            })?;
            Some(map)
        };

        log::debug!("Mapped {} ({} bytes)", path.display(), len);

        Ok(Self {
            map,
            path: path.to_path_buf(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }
}

impl SymbolSource for MappedSequence {
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn symbol_at(&self, index: usize) -> Symbol {
        Symbol::from(self.as_bytes()[index])
    }
}
