//! Console output utilities

use crate::sequence::Symbol;
use crate::tree::TreeStats;

/// Render a symbol for display, falling back to its code for non-printables
#[must_use]
pub fn display_symbol(symbol: Symbol) -> String {
    match char::from_u32(u32::from(symbol)) {
        Some(c) if !c.is_control() => format!("'{c}'"),
        _ => format!("U+{symbol:04X}"),
    }
}

/// Print a human-readable summary of a built tree
pub fn print_tree_stats(stats: &TreeStats) {
    println!("Sequence length: {}", stats.len);
    match (stats.min_symbol, stats.max_symbol) {
        (Some(lo), Some(hi)) => {
            println!("Symbol range: {} .. {}", display_symbol(lo), display_symbol(hi));
        }
        _ => println!("Symbol range: (empty)"),
    }
    println!(
        "Nodes: {} ({} leaves), depth {}",
        stats.nodes, stats.leaves, stats.depth
    );
    println!("Bitmap bytes: {}", stats.bitmap_bytes);
}
