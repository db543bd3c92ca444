//! Shared traversal over object-typed schema subtrees.
//!
//! Both detectors descend the same way: only mappings with an explicit
//! `"type": "object"` are entered, and only through the composition
//! keys, in a fixed order. Recursion hidden purely inside array `items`
//! without an enclosing object type is out of scope for this traversal.

use serde_json::{Map, Value};

use super::error::{Result, ScanError};
use super::pointer::reference_of;

/// Composition keys descended into, in detection order.
pub const COMPOSITION_KEYS: [&str; 5] = ["allOf", "anyOf", "oneOf", "not", "properties"];

/// Guard against unbounded stack growth on pathological documents.
pub const MAX_TRAVERSAL_DEPTH: usize = 512;

/// The node's mapping, if traversal may descend into it: a mapping
/// with an explicit `"type": "object"`.
pub(crate) fn object_schema(node: &Value) -> Option<&Map<String, Value>> {
    let obj = node.as_object()?;
    match obj.get("type").and_then(Value::as_str) {
        Some("object") => Some(obj),
        _ => None,
    }
}

/// Enumerate the traversable children of a schema mapping, each paired
/// with its symbolic path step.
///
/// Sequence-valued keys yield `key[index]` steps in index order;
/// mapping-valued keys yield `key.name` steps in document order.
pub(crate) fn composition_children<'a>(obj: &'a Map<String, Value>) -> Vec<(String, &'a Value)> {
    let mut children = Vec::new();
    for key in COMPOSITION_KEYS {
        match obj.get(key) {
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    children.push((format!("{}[{}]", key, index), item));
                }
            }
            Some(Value::Object(entries)) => {
                for (name, child) in entries {
                    children.push((format!("{}.{}", key, name), child));
                }
            }
            _ => {}
        }
    }
    children
}

/// Depth-first scan collecting every `$ref` pointer in a subtree.
///
/// `on_ref` receives each pointer together with the symbolic path at
/// which it was found; it may abort the scan by returning an error.
/// References are recorded but not followed.
pub(crate) fn walk_refs<F>(node: &Value, path: &mut Vec<String>, on_ref: &mut F) -> Result<()>
where
    F: FnMut(&str, &[String]) -> Result<()>,
{
    if path.len() > MAX_TRAVERSAL_DEPTH {
        return Err(ScanError::TraversalDepthExceeded {
            max: MAX_TRAVERSAL_DEPTH,
        });
    }

    if let Some(pointer) = reference_of(node) {
        on_ref(pointer, path)?;
    }

    let Some(obj) = object_schema(node) else {
        return Ok(());
    };

    for (step, child) in composition_children(obj) {
        path.push(step);
        walk_refs(child, path, on_ref)?;
        path.pop();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect_refs(node: &Value) -> Vec<(String, String)> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        walk_refs(node, &mut path, &mut |pointer, at| {
            found.push((pointer.to_string(), at.join(" -> ")));
            Ok(())
        })
        .unwrap();
        found
    }

    #[test]
    fn test_children_ordered_by_fixed_key_order() {
        let obj = json!({
            "type": "object",
            "properties": {"a": {}},
            "allOf": [{}, {}],
            "oneOf": [{}]
        });
        let steps: Vec<String> = composition_children(obj.as_object().unwrap())
            .into_iter()
            .map(|(step, _)| step)
            .collect();
        assert_eq!(steps, vec!["allOf[0]", "allOf[1]", "oneOf[0]", "properties.a"]);
    }

    #[test]
    fn test_walk_prunes_non_object_schemas() {
        // The array-typed wrapper is never entered, so the ref inside
        // its items is invisible to this traversal.
        let schema = json!({
            "type": "object",
            "properties": {
                "list": {
                    "type": "array",
                    "items": {"$ref": "#/$defs/Node"}
                }
            }
        });
        assert!(collect_refs(&schema).is_empty());
    }

    #[test]
    fn test_walk_records_refs_with_paths() {
        let schema = json!({
            "type": "object",
            "properties": {
                "a": {"$ref": "#/$defs/A"},
                "b": {
                    "type": "object",
                    "properties": {"c": {"$ref": "#/$defs/C"}}
                }
            }
        });
        let found = collect_refs(&schema);
        assert_eq!(
            found,
            vec![
                ("#/$defs/A".to_string(), "properties.a".to_string()),
                (
                    "#/$defs/C".to_string(),
                    "properties.b -> properties.c".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_walk_callback_error_aborts() {
        let schema = json!({
            "type": "object",
            "properties": {"self": {"$ref": "#"}}
        });
        let mut path = Vec::new();
        let err = walk_refs(&schema, &mut path, &mut |_, _| {
            Err(ScanError::RootSelfReference)
        })
        .unwrap_err();
        assert_eq!(err, ScanError::RootSelfReference);
    }
}
