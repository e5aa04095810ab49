//! Log lines for indexing runs

use std::path::Path;
use std::time::Duration;

use crate::config::WaveletTreeConfig;
use crate::tree::TreeStats;

/// Log the start of an index build over `input`
pub fn log_index_start(input: &Path, config: &WaveletTreeConfig) {
    log::info!(
        "Indexing {} (bitmaps in {}, capacity {} bytes)",
        input.display(),
        config.backing_path.display(),
        config.capacity
    );
}

/// Log a finished index build with the shape of the resulting tree
pub fn log_index_complete(input: &Path, stats: &TreeStats, elapsed: Duration) {
    log::info!("{}", index_summary(input, stats, elapsed));
}

/// Log a warning, tagged with a path when one is involved
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

fn index_summary(input: &Path, stats: &TreeStats, elapsed: Duration) -> String {
    format!(
        "Indexed {} symbols from {} in {:?}: {} nodes ({} leaves, depth {}), {} bitmap bytes",
        stats.len,
        input.display(),
        elapsed,
        stats.nodes,
        stats.leaves,
        stats.depth,
        stats.bitmap_bytes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_summary_reports_tree_shape() {
        let stats = TreeStats {
            len: 7,
            nodes: 5,
            leaves: 3,
            depth: 2,
            bitmap_bytes: 2,
            min_symbol: Some(97),
            max_symbol: Some(99),
        };

        let line = index_summary(Path::new("data.txt"), &stats, Duration::from_millis(3));
        assert_eq!(
            line,
            "Indexed 7 symbols from data.txt in 3ms: 5 nodes (3 leaves, depth 2), 2 bitmap bytes"
        );
    }
}
