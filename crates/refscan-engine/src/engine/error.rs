//! Error types for schema reference analysis.

use thiserror::Error;

/// Errors raised while resolving or walking `$ref` chains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("dangling reference: {pointer} does not resolve to a schema node")]
    DanglingReference { pointer: String },

    #[error("schema references its own root (\"#\") and cannot be expanded")]
    RootSelfReference,

    #[error("circular reference: {} -> {repeated}", .path.join(" -> "))]
    CircularReference {
        /// Pointers visited on the walk, in order, before the repeat.
        path: Vec<String>,
        /// The pointer that was about to be visited a second time.
        repeated: String,
    },

    #[error("reference chain exceeds {max} hops: {}", .path.join(" -> "))]
    MaxDepthExceeded { path: Vec<String>, max: usize },

    #[error("schema nesting exceeds {max} levels")]
    TraversalDepthExceeded { max: usize },
}

pub type Result<T> = std::result::Result<T, ScanError>;
