//! `$ref` resolution against the root schema document.

use serde_json::Value;

use super::error::{Result, ScanError};
use super::pointer::{reference_of, split_pointer};

/// Resolve a node through its `$ref`, if it carries one.
///
/// Non-ref nodes pass through unchanged. A pointer segment that does
/// not exist in the document is a hard [`ScanError::DanglingReference`]
/// failure, never a silent pass-through.
pub fn resolve<'a>(node: &'a Value, root: &'a Value) -> Result<&'a Value> {
    match reference_of(node) {
        Some(pointer) => resolve_pointer(pointer, root),
        None => Ok(node),
    }
}

/// Walk a pointer's segments as successive key lookups from the root.
pub fn resolve_pointer<'a>(pointer: &str, root: &'a Value) -> Result<&'a Value> {
    let mut current = root;
    for segment in split_pointer(pointer) {
        current = current
            .get(segment)
            .ok_or_else(|| ScanError::DanglingReference {
                pointer: pointer.to_string(),
            })?;
    }
    Ok(current)
}
