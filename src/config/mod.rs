//! Configuration for building a `WaveletTree`.

use std::path::PathBuf;

use crate::error::{Result, WaveletError};

/// Default backing file for node bitmaps
pub const DEFAULT_BACKING_FILE: &str = "wavelets.bin";

/// Default capacity of the bitmap backing file (512 MiB)
pub const DEFAULT_CAPACITY: usize = 512 * 1024 * 1024;

/// Default size of the write batch buffer
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Environment variable overriding the backing file path
pub const ENV_BACKING_FILE: &str = "WAVELET_BACKING_FILE";
/// Environment variable overriding the backing file capacity in bytes
pub const ENV_CAPACITY: &str = "WAVELET_CAPACITY";
/// Environment variable overriding the write batch size in bytes
pub const ENV_BATCH_SIZE: &str = "WAVELET_BATCH_SIZE";

/// Configuration for the `WaveletTree`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveletTreeConfig {
    /// File that holds the packed node bitmaps
    pub backing_path: PathBuf,
    /// Size the backing file is grown to before mapping
    pub capacity: usize,
    /// Bytes buffered before being copied into the mapping
    pub batch_size: usize,
}

impl Default for WaveletTreeConfig {
    fn default() -> Self {
        Self {
            backing_path: PathBuf::from(DEFAULT_BACKING_FILE),
            capacity: DEFAULT_CAPACITY,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl WaveletTreeConfig {
    /// Create a configuration with the given backing file and default sizes
    #[must_use]
    pub fn with_backing_path(path: impl Into<PathBuf>) -> Self {
        Self {
            backing_path: path.into(),
            ..Default::default()
        }
    }

    /// Set the backing file capacity
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the write batch size
    #[must_use]
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Default configuration with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup; unparseable sizes are ignored
    #[must_use]
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_BACKING_FILE).filter(|p| !p.trim().is_empty()) {
            self.backing_path = PathBuf::from(path);
        }
        if let Some(capacity) = parse_size(ENV_CAPACITY, lookup(ENV_CAPACITY)) {
            self.capacity = capacity;
        }
        if let Some(batch_size) = parse_size(ENV_BATCH_SIZE, lookup(ENV_BATCH_SIZE)) {
            self.batch_size = batch_size;
        }
        self
    }

    /// Check that sizes are usable
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(WaveletError::Config(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(WaveletError::Config(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        if self.backing_path.as_os_str().is_empty() {
            return Err(WaveletError::Config(
                "backing_path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_size(key: &str, value: Option<String>) -> Option<usize> {
    let value = value?;
    match value.trim().parse::<usize>() {
        Ok(size) => Some(size),
        Err(e) => {
            log::warn!("Ignoring {key}={value}: {e}");
            None
        }
    }
}
