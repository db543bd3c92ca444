//! Structural recursion detection over a schema tree.
//!
//! Depth-first search that follows `$ref` pointers and reports the
//! first cycle found under the fixed traversal order, as a symbolic
//! `" -> "`-joined path suitable for line mapping.
//!
//! The visited set holds node identities (addresses within the
//! caller-owned document) and is never pruned on backtrack: a node
//! seen anywhere earlier in the same invocation counts as a revisit.
//! Two sibling properties referencing the same non-cyclic definition
//! (a diamond) therefore report recursion too; callers rely on this
//! observable behavior.

use std::collections::HashSet;

use serde_json::Value;
use tracing::trace;

use super::error::{Result, ScanError};
use super::pointer::reference_of;
use super::resolve::resolve_pointer;
use super::walk::{composition_children, object_schema, MAX_TRAVERSAL_DEPTH};

/// Detect recursion anywhere under `root`.
///
/// Returns the diagnostic path to the first cycle found, or `None`
/// when the document has no detectable recursion. Dangling `$ref`
/// pointers fail hard with [`ScanError::DanglingReference`].
pub fn detect_recursion(root: &Value) -> Result<Option<String>> {
    let mut visited = HashSet::new();
    let mut path = Vec::new();
    detect_dfs(root, root, &mut visited, &mut path)
}

/// Identity of a node within the document. The document is immutable
/// for the duration of one detection call, so addresses are stable.
fn identity(node: &Value) -> usize {
    node as *const Value as usize
}

fn detect_dfs(
    node: &Value,
    root: &Value,
    visited: &mut HashSet<usize>,
    path: &mut Vec<String>,
) -> Result<Option<String>> {
    if path.len() > MAX_TRAVERSAL_DEPTH {
        return Err(ScanError::TraversalDepthExceeded {
            max: MAX_TRAVERSAL_DEPTH,
        });
    }

    if let Some(pointer) = reference_of(node) {
        let resolved = resolve_pointer(pointer, root)?;
        trace!(pointer, "following reference");

        path.push(format!("$ref:{}", pointer));
        if visited.contains(&identity(resolved)) {
            return Ok(Some(path.join(" -> ")));
        }
        visited.insert(identity(node));

        let found = detect_dfs(resolved, root, visited, path)?;
        if found.is_some() {
            return Ok(found);
        }
        path.pop();
        return Ok(None);
    }

    if visited.contains(&identity(node)) {
        return Ok(Some(path.join(" -> ")));
    }
    visited.insert(identity(node));

    // Only object-typed mappings are traversed further; arrays, scalars
    // and schemas without an explicit object type end this branch.
    let Some(obj) = object_schema(node) else {
        return Ok(None);
    };

    for (step, child) in composition_children(obj) {
        path.push(step);
        let found = detect_dfs(child, root, visited, path)?;
        if found.is_some() {
            return Ok(found);
        }
        path.pop();
    }

    Ok(None)
}
