//! Local JSON-Pointer (`$ref`) string handling.
//!
//! Recognized forms are the root pointer `"#"` and path pointers like
//! `"#/$defs/Node"`. Segments are matched against object keys only;
//! these schemas never produce array-index pointers.

/// Split a local pointer into its lookup segments.
///
/// The leading `#` root marker contributes an empty segment which is
/// discarded; `"#"` itself yields no segments (the whole document).
pub fn split_pointer(pointer: &str) -> Vec<&str> {
    pointer
        .split('/')
        .skip(1) // the "#" root marker
        .collect()
}

/// Extract the `$ref` pointer from a schema node, if it carries one.
pub fn reference_of(node: &serde_json::Value) -> Option<&str> {
    node.get("$ref").and_then(serde_json::Value::as_str)
}

/// Full pointer for a named definition, e.g. `#/$defs/Node`.
pub fn definition_pointer(defs_key: &str, name: &str) -> String {
    format!("#/{}/{}", defs_key, name)
}
