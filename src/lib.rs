//! A Rust library for building wavelet trees over large symbol sequences,
//! with node bitmaps kept in a memory-mapped backing file.
//!
//! ```no_run
//! use wavelet_tree::{MappedSequence, WaveletTree, WaveletTreeConfig};
//!
//! # fn main() -> wavelet_tree::Result<()> {
//! let sequence = MappedSequence::open("wavelet_data.txt")?;
//! let tree = WaveletTree::build(&sequence, &WaveletTreeConfig::from_env())?;
//!
//! let first = tree.access(0)?;
//! let seen = tree.rank(u16::from(b'a'), 1_000)?;
//! # let _ = (first, seen);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod sequence;
pub mod storage;
pub mod tree;
pub mod utils;

// Re-export the most common types for easier use
pub use config::WaveletTreeConfig;
pub use error::{Result, WaveletError};
pub use sequence::{ArraySequence, MappedSequence, Symbol, SymbolSource};
pub use storage::{BitmapStore, MappedStore, MemoryStore};
pub use tree::{TreeStats, WaveletTree};
