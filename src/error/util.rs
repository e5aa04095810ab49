//! Utility functions for error handling
//!
//! Helpers that open files with path-aware error messages.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, WaveletError};

/// Open an existing file for reading with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(
            WaveletError::io_error(format!("File not found (needed for {purpose})")).with_path(path),
        );
    }

    if !path.is_file() {
        return Err(
            WaveletError::io_error(format!("Path is not a file (expected for {purpose})"))
                .with_path(path),
        );
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
            _ => format!("Failed to open file for {purpose}"),
        };
        WaveletError::io_error_with_source(context, e).with_path(path)
    })
}

/// Create (or truncate) a file for reading and writing
///
/// Missing parent directories are created.
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    open_read_write(path, purpose, true)
}

/// Open a file for reading and writing without truncating it
///
/// The file is created if missing, along with its parent directories.
/// Callers that share the file through a mapping must lock it before
/// changing its length.
pub fn safe_open_read_write(path: &Path, purpose: &str) -> Result<fs::File> {
    open_read_write(path, purpose, false)
}

fn open_read_write(path: &Path, purpose: &str, truncate: bool) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            WaveletError::io_error_with_source(
                format!("Failed to create parent directory for {purpose}"),
                e,
            )
            .with_path(parent)
        })?;
    }

    fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(truncate)
        .open(path)
        .map_err(|e| {
            WaveletError::io_error_with_source(format!("Failed to open file for {purpose}"), e)
                .with_path(path)
        })
}
