//! Stand-alone generator for benchmark data
//!
//! Writes `wavelet_data.txt` (500 million random lowercase letters) into
//! the working directory. An optional first argument overrides the size.

use std::path::Path;

use anyhow::Context;
use wavelet_tree::generator::{DEFAULT_ALPHABET, DEFAULT_DATA_FILE, DEFAULT_DATA_SIZE, generate_file};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let size = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("Invalid size: {arg}"))?,
        None => DEFAULT_DATA_SIZE,
    };

    let path = Path::new(DEFAULT_DATA_FILE);
    generate_file(path, size, DEFAULT_ALPHABET, &mut rand::rng(), true)?;

    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    println!("File created: {}", path.display());
    println!("Location: {}", absolute.display());
    Ok(())
}
