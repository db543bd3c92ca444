//! Schema analysis engine API.
//!
//! This module provides the reference-analysis core:
//!
//! - [`resolve`] / [`resolve_pointer`] - local `$ref` resolution
//! - [`detect_recursion`] - structural recursion scan with diagnostic path
//! - [`check_definitions`] - bounded cycle detection over named definitions
//! - [`locate`] / [`locate_all`] - symbolic path to 1-based source lines
//! - [`ScanError`] - the failure conditions shared by the above

mod defs;
mod error;
mod locate;
mod pointer;
mod recursion;
mod resolve;
mod walk;

pub use defs::{check_definitions, DefsKey, MAX_RESOLUTION_HOPS};
pub use error::{Result, ScanError};
pub use locate::{locate, locate_all};
pub use pointer::{definition_pointer, reference_of, split_pointer};
pub use recursion::detect_recursion;
pub use resolve::{resolve, resolve_pointer};
pub use walk::{COMPOSITION_KEYS, MAX_TRAVERSAL_DEPTH};
