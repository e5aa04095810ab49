//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wavelet_tree::{MappedSequence, Symbol, WaveletTree, WaveletTreeConfig};

/// Small backing file so tests do not reserve 512 MiB each
pub const TEST_CAPACITY: usize = 1024 * 1024;

/// A temporary directory holding a data file and a bitmap backing file
pub struct Fixture {
    pub dir: TempDir,
    pub data_path: PathBuf,
}

impl Fixture {
    /// Write `contents` to a fresh data file
    #[must_use]
    pub fn with_contents(contents: &[u8]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let data_path = dir.path().join("test_data.txt");
        std::fs::write(&data_path, contents).expect("write test data");
        Self { dir, data_path }
    }

    #[must_use]
    pub fn config(&self) -> WaveletTreeConfig {
        test_config(self.dir.path())
    }

    /// Map the data file and build a tree over it
    #[must_use]
    pub fn build(&self) -> WaveletTree {
        let sequence = MappedSequence::open(&self.data_path).expect("map test data");
        WaveletTree::build(&sequence, &self.config()).expect("build tree")
    }
}

/// Configuration with a backing file inside `dir`
#[must_use]
pub fn test_config(dir: &Path) -> WaveletTreeConfig {
    WaveletTreeConfig::with_backing_path(dir.join("wavelets.bin")).capacity(TEST_CAPACITY)
}

#[must_use]
pub fn sym(c: char) -> Symbol {
    Symbol::try_from(u32::from(c)).expect("symbol fits in 16 bits")
}

/// Occurrences of `symbol` in `data[..=index]`
#[must_use]
pub fn naive_rank(data: &[Symbol], symbol: Symbol, index: usize) -> usize {
    data[..=index].iter().filter(|&&c| c == symbol).count()
}
