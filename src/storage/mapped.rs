//! Bitmap store backed by a fixed-size memory-mapped file

use std::fs::{File, TryLockError};
use std::path::{Path, PathBuf};

use memmap2::MmapMut;

use super::{BitmapStore, check_range, check_room};
use crate::config::WaveletTreeConfig;
use crate::error::util::safe_open_read_write;
use crate::error::{Result, WaveletError};

/// Memory-mapped bitmap store
///
/// The backing file is exclusively locked for the lifetime of the store,
/// then cleared and grown to `capacity` bytes. A second store on the same
/// path fails while the first one is alive. Appends are staged in a batch buffer and copied into
/// the mapping whenever the buffer fills and at the end of every append.
#[derive(Debug)]
pub struct MappedStore {
    // dropped before `file`, so the mapping is gone before the lock is released
    map: MmapMut,
    file: File,
    path: PathBuf,
    position: usize,
    batch: Vec<u8>,
    batch_size: usize,
}

impl MappedStore {
    /// Create the backing file and map it read-write
    pub fn create(path: impl AsRef<Path>, capacity: usize, batch_size: usize) -> Result<Self> {
        let path = path.as_ref();
        if capacity == 0 {
            return Err(WaveletError::Config(
                "bitmap store capacity must be greater than zero".to_string(),
            ));
        }
        if batch_size == 0 {
            return Err(WaveletError::Config(
                "bitmap store batch size must be greater than zero".to_string(),
            ));
        }

        let file = safe_open_read_write(path, "bitmap storage")?;
        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(WaveletError::io_error(
                    "Backing file is locked by another bitmap store",
                )
                .with_path(path));
            }
            Err(TryLockError::Error(e)) => {
                return Err(WaveletError::io_error_with_source("Failed to lock backing file", e)
                    .with_path(path));
            }
        }

        // Clear stale bitmaps from a previous run, then grow to capacity
        file.set_len(0)
            .and_then(|()| file.set_len(capacity as u64))
            .map_err(|e| {
                WaveletError::io_error_with_source("Failed to size backing file", e)
                    .with_path(path)
            })?;

        // SAFETY: the store holds an exclusive lock on the file until the mapping
        // is dropped, and only resizes it before mapping.
        let map = unsafe { MmapMut::map_mut(&file) }.map_err(|e| {
            WaveletError::io_error_with_source("Failed to map backing file", e).with_path(path)
        })?;

        log::debug!(
            "Mapped bitmap store {} ({} bytes, batch {})",
            path.display(),
            capacity,
            batch_size
        );

        Ok(Self {
            map,
            file,
            path: path.to_path_buf(),
            position: 0,
            batch: Vec::with_capacity(batch_size),
            batch_size,
        })
    }

    /// Create a store from a tree configuration
    pub fn from_config(config: &WaveletTreeConfig) -> Result<Self> {
        config.validate()?;
        Self::create(&config.backing_path, config.capacity, config.batch_size)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush the mapping and the backing file to disk
    pub fn sync(&self) -> Result<()> {
        self.map
            .flush()
            .and_then(|()| self.file.sync_all())
            .map_err(|e| {
                WaveletError::io_error_with_source("Failed to flush bitmap store", e)
                    .with_path(&self.path)
            })
    }

    fn push(&mut self, byte: u8) {
        self.batch.push(byte);
        if self.batch.len() == self.batch_size {
            self.flush_batch();
        }
    }

    fn flush_batch(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let end = self.position + self.batch.len();
        self.map[self.position..end].copy_from_slice(&self.batch);
        self.position = end;
        self.batch.clear();
    }
}

impl BitmapStore for MappedStore {
    fn append(&mut self, bytes: &[u8]) -> Result<usize> {
        check_room(bytes.len(), self.remaining())?;

        let offset = self.position;
        for &byte in bytes {
            self.push(byte);
        }
        self.flush_batch();
        Ok(offset)
    }

    fn read(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let range = check_range(offset, len, self.position)?;
        Ok(&self.map[range])
    }

    fn used(&self) -> usize {
        self.position
    }

    fn capacity(&self) -> usize {
        self.map.len()
    }
}
