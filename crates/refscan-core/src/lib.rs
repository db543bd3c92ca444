//! refscan-core - UI-agnostic document model + analysis.

pub mod document;
pub mod error;

pub use document::{Analysis, DefinitionsOutcome, Document, RecursionFinding};
pub use error::{RefscanError, Result};

pub use refscan_engine::engine::{DefsKey, ScanError};
