//! Recursive construction of the node table

use super::bitmap::{bitmap_len, set_bit};
use super::node::Node;
use crate::error::Result;
use crate::sequence::{Symbol, SymbolSource};
use crate::storage::BitmapStore;

/// Builds nodes into a table, writing internal-node bitmaps to a store
pub(crate) struct TreeBuilder<'a, S: BitmapStore> {
    pub(crate) nodes: Vec<Node>,
    store: &'a mut S,
}

impl<'a, S: BitmapStore> TreeBuilder<'a, S> {
    pub(crate) const fn new(store: &'a mut S) -> Self {
        Self {
            nodes: Vec::new(),
            store,
        }
    }

    /// Build the subtree for `source` over `[lo, hi]` and return its node index
    pub(crate) fn build<Q>(&mut self, source: &Q, lo: Symbol, hi: Symbol) -> Result<usize>
    where
        Q: SymbolSource + ?Sized,
    {
        let size = source.len();
        let index = self.nodes.len();
        self.nodes.push(Node::new(lo, hi, size));

        if lo == hi {
            return Ok(index);
        }

        let mid = self.nodes[index].mid();
        let count_left = (0..size).filter(|&i| source.symbol_at(i) <= mid).count();

        let mut left = Vec::with_capacity(count_left);
        let mut right = Vec::with_capacity(size - count_left);
        let mut bitmap = vec![0u8; bitmap_len(size)];

        for i in 0..size {
            let c = source.symbol_at(i);
            if c <= mid {
                left.push(c);
            } else {
                right.push(c);
                set_bit(&mut bitmap, i, true);
            }
        }

        let offset = self.store.append(&bitmap)?;
        self.nodes[index].bitmap_offset = offset;
        log::trace!(
            "node {index} [{lo}, {hi}]: {size} symbols, {} left, {} right, bitmap at {offset}",
            left.len(),
            right.len()
        );
        drop(bitmap);

        if !left.is_empty() {
            let child = self.build(left.as_slice(), lo, mid)?;
            self.nodes[index].left = Some(child);
        }
        drop(left);

        if !right.is_empty() {
            let child = self.build(right.as_slice(), mid + 1, hi)?;
            self.nodes[index].right = Some(child);
        }

        Ok(index)
    }
}
