use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use wavelet_tree::generator::{
    DEFAULT_DATA_FILE, DEFAULT_DATA_SIZE, alphabet_from_str, generate_file,
};
use wavelet_tree::utils::logging::console::{display_symbol, print_tree_stats};
use wavelet_tree::utils::logging::{create_spinner, finish_progress_bar, log_warning};
use wavelet_tree::utils::{log_index_complete, log_index_start};
use wavelet_tree::{MappedSequence, Symbol, WaveletTree, WaveletTreeConfig};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Debug, Parser)]
#[command(name = "wavelet")]
#[command(about = "Build wavelet trees over files and answer access/rank queries")]
struct Cli {
    /// File holding node bitmaps (overrides WAVELET_BACKING_FILE)
    #[arg(long, global = true)]
    backing_file: Option<PathBuf>,

    /// Backing file capacity in bytes (overrides WAVELET_CAPACITY)
    #[arg(long, global = true)]
    capacity: Option<usize>,

    /// Worker threads for batch queries
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a file of random symbols
    Generate {
        #[arg(long, default_value = DEFAULT_DATA_FILE)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_DATA_SIZE)]
        size: u64,
        #[arg(long, default_value = "abcdefghijklmnopqrstuvwxyz")]
        alphabet: String,
    },
    /// Build a tree and print its shape
    Stats {
        #[arg(long)]
        input: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the symbol at each index
    Access {
        #[arg(long)]
        input: PathBuf,
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Count occurrences of a symbol up to each index
    Rank {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        symbol: char,
        #[arg(required = true)]
        indices: Vec<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let threads = cli.threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to configure thread pool")?;

    let mut config = WaveletTreeConfig::from_env();
    if let Some(path) = cli.backing_file {
        config.backing_path = path;
    }
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }

    match cli.command {
        Command::Generate {
            output,
            size,
            alphabet,
        } => {
            let alphabet = alphabet_from_str(&alphabet)?;
            generate_file(&output, size, &alphabet, &mut rand::rng(), true)
                .with_context(|| format!("Failed to generate {}", output.display()))?;
            println!("Created {}", output.display());
        }
        Command::Stats { input, json } => {
            let tree = build_tree(&input, &config)?;
            let stats = tree.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_tree_stats(&stats);
            }
        }
        Command::Access { input, indices } => {
            let tree = build_tree(&input, &config)?;
            let symbols = tree.access_many(&indices)?;
            for (index, symbol) in indices.iter().zip(symbols) {
                println!("{index}\t{}", display_symbol(symbol));
            }
        }
        Command::Rank {
            input,
            symbol,
            indices,
        } => {
            let Ok(symbol) = Symbol::try_from(u32::from(symbol)) else {
                bail!("Symbol {symbol:?} does not fit in 16 bits");
            };
            let tree = build_tree(&input, &config)?;
            let queries: Vec<(Symbol, usize)> = indices.iter().map(|&i| (symbol, i)).collect();
            let ranks = tree.rank_many(&queries)?;
            for (index, rank) in indices.iter().zip(ranks) {
                println!("{index}\t{rank}");
            }
        }
    }

    Ok(())
}

fn build_tree(input: &Path, config: &WaveletTreeConfig) -> anyhow::Result<WaveletTree> {
    log_index_start(input, config);
    let start = Instant::now();

    if config.backing_path.exists() {
        log_warning("Overwriting existing backing file", Some(&config.backing_path));
    }

    let sequence = MappedSequence::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let spinner = create_spinner(Some("building wavelet tree"));
    let tree = WaveletTree::build(&sequence, config).with_context(|| {
        format!(
            "Failed to build wavelet tree with backing file {}",
            config.backing_path.display()
        )
    })?;
    finish_progress_bar(&spinner, Some("built"));

    log_index_complete(input, &tree.stats(), start.elapsed());
    Ok(tree)
}
