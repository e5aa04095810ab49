//! Shared utilities

pub mod logging;

pub use logging::{log_index_complete, log_index_start};
