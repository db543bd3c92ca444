//! Error types for Refscan core.

use thiserror::Error;

use refscan_engine::engine::ScanError;

/// Errors that can occur while loading or analyzing a schema document.
#[derive(Error, Debug)]
pub enum RefscanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema file too large ({size} bytes, max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub type Result<T> = std::result::Result<T, RefscanError>;
