//! Random test-data generation
//!
//! Writes files of symbols drawn uniformly from an alphabet, one byte per
//! symbol, for building and benchmarking trees over
//! [`MappedSequence`](crate::sequence::MappedSequence).

use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;
use rand::Rng;

use crate::error::util::safe_create_file;
use crate::error::{Result, WaveletError};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Default output file
pub const DEFAULT_DATA_FILE: &str = "wavelet_data.txt";

/// Default number of symbols written
pub const DEFAULT_DATA_SIZE: u64 = 500_000_000;

/// Default alphabet
pub const DEFAULT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

const CHUNK_SIZE: usize = 64 * 1024;

/// Turn command-line alphabet text into one byte per symbol
///
/// Only ASCII is accepted, so every character maps to exactly one byte.
/// An empty alphabet is passed through for [`generate_file`] to reject.
pub fn alphabet_from_str(text: &str) -> Result<Vec<u8>> {
    if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
        return Err(WaveletError::Config(format!(
            "alphabet must be ASCII, found {c:?}"
        )));
    }
    Ok(text.as_bytes().to_vec())
}

/// Write `size` random symbols from `alphabet` to `path`
///
/// Returns the number of bytes written.
pub fn generate_file<R: Rng>(
    path: &Path,
    size: u64,
    alphabet: &[u8],
    rng: &mut R,
    show_progress: bool,
) -> Result<u64> {
    if alphabet.is_empty() {
        return Err(WaveletError::Config(
            "alphabet must contain at least one symbol".to_string(),
        ));
    }

    let start = Instant::now();
    let file = safe_create_file(path, "generated data")?;
    let mut writer = BufWriter::new(file);

    let pb = if show_progress {
        create_main_progress_bar(size, Some("generating"))
    } else {
        ProgressBar::hidden()
    };

    let mut chunk = Vec::with_capacity(CHUNK_SIZE);
    let mut written = 0u64;
    while written < size {
        let n = usize::try_from(size - written).map_or(CHUNK_SIZE, |left| left.min(CHUNK_SIZE));
        chunk.clear();
        chunk.extend((0..n).map(|_| alphabet[rng.random_range(0..alphabet.len())]));
        writer
            .write_all(&chunk)
            .map_err(|e| WaveletError::io_error_with_source("Failed to write data", e).with_path(path))?;
        written += n as u64;
        pb.inc(n as u64);
    }

    writer
        .flush()
        .map_err(|e| WaveletError::io_error_with_source("Failed to flush data", e).with_path(path))?;
    finish_progress_bar(&pb, Some("done"));

    log::info!(
        "Generated {} symbols into {} in {:?}",
        written,
        path.display(),
        start.elapsed()
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generates_requested_size_from_alphabet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let mut rng = StdRng::seed_from_u64(7);

        let written = generate_file(&path, 200_000, b"xyz", &mut rng, false).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(written, 200_000);
        assert_eq!(bytes.len(), 200_000);
        assert!(bytes.iter().all(|b| b"xyz".contains(b)));
        for c in b"xyz" {
            assert!(bytes.contains(c), "symbol {c} never drawn");
        }
    }

    #[test]
    fn test_zero_size_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(generate_file(&path, 0, DEFAULT_ALPHABET, &mut rng, false).unwrap(), 0);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_alphabet_from_str() {
        assert_eq!(alphabet_from_str("abc").unwrap(), b"abc".to_vec());
        assert!(matches!(
            alphabet_from_str("a\u{e9}"),
            Err(WaveletError::Config(msg)) if msg.contains('\u{e9}')
        ));

        // empty text survives parsing and is refused when generating
        let empty = alphabet_from_str("").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_file(&dir.path().join("x.txt"), 10, &empty, &mut rng, false).unwrap_err();
        assert!(matches!(err, WaveletError::Config(_)));
    }

    #[test]
    fn test_empty_alphabet_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_file(&dir.path().join("x.txt"), 10, b"", &mut rng, false).unwrap_err();
        assert!(matches!(err, WaveletError::Config(_)));
    }
}
