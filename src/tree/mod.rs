//! Wavelet tree over a symbol sequence
//!
//! The tree splits the symbol range in half at every internal node and
//! records, per position, which half each symbol went to. Those routing
//! bits are packed into bitmaps kept in a [`BitmapStore`]; only the node
//! table (ranges, offsets, children) lives on the heap.
//!
//! Two queries are supported:
//! * [`WaveletTree::access`] returns the symbol at a position.
//! * [`WaveletTree::rank`] counts occurrences of a symbol up to and
//!   including a position.
//!
//! Queries take `&self`, so a built tree can be shared between threads;
//! [`WaveletTree::access_many`] and [`WaveletTree::rank_many`] fan out over
//! the rayon pool.

pub mod bitmap;
mod builder;
pub mod node;

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::WaveletTreeConfig;
use crate::error::{Result, WaveletError};
use crate::sequence::{Symbol, SymbolSource};
use crate::storage::{BitmapStore, MappedStore, MemoryStore};
use bitmap::{bitmap_len, get_bit, rank_bits};
use builder::TreeBuilder;
pub use node::Node;

/// Summary of a built tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Length of the indexed sequence
    pub len: usize,
    pub nodes: usize,
    pub leaves: usize,
    /// Longest root-to-leaf path, in edges
    pub depth: usize,
    /// Bytes of packed bitmaps in the store
    pub bitmap_bytes: usize,
    pub min_symbol: Option<Symbol>,
    pub max_symbol: Option<Symbol>,
}

/// Wavelet tree with bitmaps held in a store `S`
#[derive(Debug)]
pub struct WaveletTree<S: BitmapStore = MappedStore> {
    nodes: Vec<Node>,
    store: S,
    len: usize,
}

impl WaveletTree<MappedStore> {
    /// Build a tree whose bitmaps live in the memory-mapped file named by `config`
    pub fn build<Q>(source: &Q, config: &WaveletTreeConfig) -> Result<Self>
    where
        Q: SymbolSource + ?Sized,
    {
        let store = MappedStore::from_config(config)?;
        Self::build_with_store(source, store)
    }
}

impl WaveletTree<MemoryStore> {
    /// Build a tree whose bitmaps stay on the heap
    pub fn in_memory<Q>(source: &Q) -> Result<Self>
    where
        Q: SymbolSource + ?Sized,
    {
        Self::build_with_store(source, MemoryStore::new())
    }
}

impl<S: BitmapStore> WaveletTree<S> {
    /// Build a tree over `source`, appending bitmaps to `store`
    pub fn build_with_store<Q>(source: &Q, mut store: S) -> Result<Self>
    where
        Q: SymbolSource + ?Sized,
    {
        let start = Instant::now();
        let len = source.len();

        let nodes = match source.symbol_range() {
            None => Vec::new(),
            Some((lo, hi)) => {
                let mut builder = TreeBuilder::new(&mut store);
                builder.build(source, lo, hi)?;
                builder.nodes
            }
        };

        log::info!(
            "Built wavelet tree over {} symbols: {} nodes, {} bitmap bytes in {:?}",
            len,
            nodes.len(),
            store.used(),
            start.elapsed()
        );

        Ok(Self { nodes, store, len })
    }

    /// Length of the indexed sequence
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Smallest and largest indexed symbol
    #[must_use]
    pub fn symbol_range(&self) -> Option<(Symbol, Symbol)> {
        self.root().map(|root| (root.lo, root.hi))
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Symbol at `index`
    pub fn access(&self, index: usize) -> Result<Symbol> {
        let mut node = self.root_for(index)?;
        let mut pos = index;

        while !node.is_leaf() {
            let bitmap = self.bitmap(node)?;
            let bit = get_bit(bitmap, pos);
            pos = rank_bits(bitmap, bit, pos + 1) - 1;
            node = self.child(node, bit)?.ok_or_else(|| {
                WaveletError::Corrupted(format!(
                    "position routed to missing child of node [{}, {}]",
                    node.lo, node.hi
                ))
            })?;
        }

        Ok(node.lo)
    }

    /// Number of occurrences of `symbol` in positions `0..=index`
    pub fn rank(&self, symbol: Symbol, index: usize) -> Result<usize> {
        let mut node = self.root_for(index)?;
        if !node.contains(symbol) {
            return Ok(0);
        }

        let mut prefix = index + 1;
        while !node.is_leaf() {
            let bit = symbol > node.mid();
            prefix = rank_bits(self.bitmap(node)?, bit, prefix);
            match self.child(node, bit)? {
                Some(child) if prefix > 0 => node = child,
                _ => return Ok(0),
            }
        }

        Ok(prefix)
    }

    /// Total occurrences of `symbol`
    pub fn count(&self, symbol: Symbol) -> Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        self.rank(symbol, self.len - 1)
    }

    /// [`access`](Self::access) for many positions in parallel
    pub fn access_many(&self, indices: &[usize]) -> Result<Vec<Symbol>> {
        indices.par_iter().map(|&i| self.access(i)).collect()
    }

    /// [`rank`](Self::rank) for many `(symbol, index)` pairs in parallel
    pub fn rank_many(&self, queries: &[(Symbol, usize)]) -> Result<Vec<usize>> {
        queries
            .par_iter()
            .map(|&(symbol, index)| self.rank(symbol, index))
            .collect()
    }

    /// Shape and size summary
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut leaves = 0;
        let mut depth = 0;
        let mut stack: Vec<(usize, usize)> = self.root().map(|_| (0, 0)).into_iter().collect();

        while let Some((index, level)) = stack.pop() {
            let node = &self.nodes[index];
            depth = depth.max(level);
            if node.is_leaf() {
                leaves += 1;
            }
            stack.extend(node.left.iter().chain(node.right.iter()).map(|&c| (c, level + 1)));
        }

        let range = self.symbol_range();
        TreeStats {
            len: self.len,
            nodes: self.nodes.len(),
            leaves,
            depth,
            bitmap_bytes: self.store.used(),
            min_symbol: range.map(|(lo, _)| lo),
            max_symbol: range.map(|(_, hi)| hi),
        }
    }

    fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    fn root_for(&self, index: usize) -> Result<&Node> {
        match self.root() {
            Some(root) if index < self.len => Ok(root),
            _ => Err(WaveletError::IndexOutOfBounds {
                index,
                len: self.len,
            }),
        }
    }

    fn bitmap(&self, node: &Node) -> Result<&[u8]> {
        self.store.read(node.bitmap_offset, bitmap_len(node.len))
    }

    fn child(&self, node: &Node, bit: bool) -> Result<Option<&Node>> {
        match node.child(bit) {
            None => Ok(None),
            Some(index) => self.nodes.get(index).map(Some).ok_or_else(|| {
                WaveletError::Corrupted(format!("node index {index} out of range"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::ArraySequence;

    fn sym(c: char) -> Symbol {
        c as Symbol
    }

    #[test]
    fn test_node_layout_for_abacaba() {
        let tree = WaveletTree::in_memory(&ArraySequence::from("abacaba")).unwrap();

        // root [a, c] splits into [a, b] and the leaf c; [a, b] splits into leaves a and b
        let stats = tree.stats();
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.leaves, 3);
        assert_eq!(stats.depth, 2);
        // root bitmap is 7 bits, [a, b] bitmap is 6 bits
        assert_eq!(stats.bitmap_bytes, 2);
        assert_eq!(stats.min_symbol, Some(sym('a')));
        assert_eq!(stats.max_symbol, Some(sym('c')));

        let root = &tree.nodes()[0];
        assert_eq!((root.lo, root.hi, root.len), (sym('a'), sym('c'), 7));
        assert_eq!(tree.store().read(root.bitmap_offset, 1).unwrap(), &[0b0000_1000]);
    }

    #[test]
    fn test_missing_child_on_rank_path() {
        // [a, c]: left [a, b] receives only 'a', so its right child (b) is absent
        let tree = WaveletTree::in_memory(&ArraySequence::from("ac")).unwrap();
        assert_eq!(tree.rank(sym('b'), 1).unwrap(), 0);
        assert_eq!(tree.rank(sym('a'), 1).unwrap(), 1);
        assert_eq!(tree.rank(sym('c'), 1).unwrap(), 1);
    }

    #[test]
    fn test_broken_node_table_reports_corruption() {
        // nodes for "abacaba": 0 = [a, c], 1 = [a, b], 2 = a, 3 = b, 4 = c
        let mut tree = WaveletTree::in_memory(&ArraySequence::from("abacaba")).unwrap();
        tree.nodes[0].right = Some(99);

        assert!(matches!(tree.access(3), Err(WaveletError::Corrupted(_))));
        assert!(matches!(tree.rank(sym('c'), 6), Err(WaveletError::Corrupted(_))));
        assert!(matches!(tree.count(sym('c')), Err(WaveletError::Corrupted(_))));
        // paths that stay on the left are unaffected
        assert_eq!(tree.access(0).unwrap(), sym('a'));
        assert_eq!(tree.rank(sym('a'), 6).unwrap(), 4);

        // a bit that routes into a child the table does not have
        tree.nodes[0].right = Some(4);
        tree.nodes[1].right = None;
        let err = tree.access(1).unwrap_err();
        assert!(matches!(err, WaveletError::Corrupted(ref msg) if msg.contains("missing child")), "{err}");
    }

    #[test]
    fn test_empty_tree() {
        let tree = WaveletTree::in_memory(&ArraySequence::default()).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.symbol_range(), None);
        assert_eq!(tree.count(sym('a')).unwrap(), 0);
        assert!(matches!(
            tree.access(0),
            Err(WaveletError::IndexOutOfBounds { index: 0, len: 0 })
        ));
        assert_eq!(tree.stats().nodes, 0);
    }

    #[test]
    fn test_extreme_symbols_do_not_overflow_mid() {
        let data = vec![0, Symbol::MAX, 1, Symbol::MAX - 1];
        let tree = WaveletTree::in_memory(data.as_slice()).unwrap();
        for (i, &c) in data.iter().enumerate() {
            assert_eq!(tree.access(i).unwrap(), c);
        }
        assert_eq!(tree.count(Symbol::MAX).unwrap(), 1);
    }
}
