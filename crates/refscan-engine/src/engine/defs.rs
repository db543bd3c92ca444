//! Cycle detection over a document's named-definitions graph.
//!
//! Unlike the general detector, revisits are judged against the
//! pointers on the *current* walk only, so a definition reachable via
//! two sibling branches is simply visited twice. Only a true repeat of
//! an identical pointer on one path is a cycle. Resolution chains are
//! additionally bounded at [`MAX_RESOLUTION_HOPS`] to keep pathological
//! documents from walking forever.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use super::error::{Result, ScanError};
use super::pointer::definition_pointer;
use super::resolve::resolve_pointer;
use super::walk::walk_refs;

/// Bound on the length of one transitive resolution chain.
pub const MAX_RESOLUTION_HOPS: usize = 10;

/// Which key holds the named-definitions block. One key is active per
/// call, per the schema draft in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefsKey {
    /// Draft-07 style `definitions`.
    Definitions,
    /// 2019-09+ style `$defs`.
    #[default]
    Defs,
}

impl DefsKey {
    pub fn as_str(self) -> &'static str {
        match self {
            DefsKey::Definitions => "definitions",
            DefsKey::Defs => "$defs",
        }
    }
}

impl fmt::Display for DefsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefsKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "definitions" => Ok(DefsKey::Definitions),
            "$defs" => Ok(DefsKey::Defs),
            other => Err(format!("unknown definitions key: {}", other)),
        }
    }
}

/// Check the definitions graph of `root` for reference cycles.
///
/// Completes with `Ok(())` when every chain terminates within the hop
/// bound, or fails with one of [`ScanError::RootSelfReference`],
/// [`ScanError::CircularReference`], [`ScanError::MaxDepthExceeded`]
/// or [`ScanError::DanglingReference`].
pub fn check_definitions(root: &Value, defs_key: DefsKey) -> Result<()> {
    let root_refs = index_refs(root)?;
    let mut index = index_definitions(root, defs_key)?;

    debug!(
        refs = root_refs.len(),
        definitions = index.len(),
        key = defs_key.as_str(),
        "definitions graph indexed"
    );

    for (pointer, _found_at) in &root_refs {
        let mut chain = Vec::new();
        follow(pointer, &mut chain, &mut index, root)?;
    }

    Ok(())
}

/// Collect every `$ref` pointer in a subtree, with the path it was
/// found at, in traversal order. An immediate root self-reference is
/// fatal here: `"#"` by definition cannot be expanded finitely.
fn index_refs(node: &Value) -> Result<Vec<(String, String)>> {
    let mut refs = Vec::new();
    let mut path = Vec::new();
    walk_refs(node, &mut path, &mut |pointer, at| {
        if pointer == "#" {
            return Err(ScanError::RootSelfReference);
        }
        refs.push((pointer.to_string(), at.join(" -> ")));
        Ok(())
    })?;
    Ok(refs)
}

/// Build the per-definition outgoing-reference index, keyed by each
/// definition's full pointer.
fn index_definitions(root: &Value, defs_key: DefsKey) -> Result<HashMap<String, Vec<String>>> {
    let mut index = HashMap::new();

    // No definitions block means no named cycles are possible.
    let Some(definitions) = root.get(defs_key.as_str()).and_then(Value::as_object) else {
        return Ok(index);
    };

    for (name, body) in definitions {
        let outgoing = index_refs(body)?
            .into_iter()
            .map(|(pointer, _)| pointer)
            .collect();
        index.insert(definition_pointer(defs_key.as_str(), name), outgoing);
    }

    Ok(index)
}

/// Walk one pointer's outgoing references transitively.
///
/// `chain` is the ordered list of pointers on the current walk; a
/// pointer about to be revisited on it is a cycle. The cycle check
/// runs before the hop bound so a repeat at depth ten still reports
/// [`ScanError::CircularReference`].
fn follow(
    pointer: &str,
    chain: &mut Vec<String>,
    index: &mut HashMap<String, Vec<String>>,
    root: &Value,
) -> Result<()> {
    if chain.iter().any(|seen| seen == pointer) {
        return Err(ScanError::CircularReference {
            path: chain.clone(),
            repeated: pointer.to_string(),
        });
    }

    chain.push(pointer.to_string());
    if chain.len() > MAX_RESOLUTION_HOPS {
        return Err(ScanError::MaxDepthExceeded {
            path: chain.clone(),
            max: MAX_RESOLUTION_HOPS,
        });
    }

    // Pointers outside the definitions block (or into an unscanned
    // corner) are resolved and indexed on demand; a missing target is
    // a dangling reference, never silently non-recursive.
    let outgoing = match index.get(pointer) {
        Some(known) => known.clone(),
        None => {
            let target = resolve_pointer(pointer, root)?;
            let scanned: Vec<String> = index_refs(target)?
                .into_iter()
                .map(|(next, _)| next)
                .collect();
            index.insert(pointer.to_string(), scanned.clone());
            scanned
        }
    };

    for next in &outgoing {
        follow(next, chain, index, root)?;
    }

    chain.pop();
    Ok(())
}
