use std::path::Path;

use serde_json::Value;

use crate::error::{RefscanError, Result};

/// Refuse to slurp arbitrarily large inputs; real schema documents
/// are tiny compared to this.
pub(crate) const MAX_SCHEMA_FILE_BYTES: u64 = 4_194_304; // 4 MiB

/// A schema document: the raw serialized text it was parsed from plus
/// the parsed root value. The text is kept because line mapping works
/// against the original serialization, not a re-render.
///
/// The document is immutable after construction; analysis never
/// mutates it, so one `Document` may be analyzed repeatedly (and from
/// parallel threads) with identical results.
#[derive(Debug)]
pub struct Document {
    text: String,
    root: Value,
}

impl Document {
    /// Parse a schema document from its serialized JSON text.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let root = serde_json::from_str(&text)?;
        Ok(Document { text, root })
    }

    /// Read and parse a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_SCHEMA_FILE_BYTES {
            return Err(RefscanError::FileTooLarge {
                size: meta.len(),
                max: MAX_SCHEMA_FILE_BYTES,
            });
        }
        Self::parse(std::fs::read_to_string(path)?)
    }

    /// The original serialized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed root schema node.
    pub fn root(&self) -> &Value {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_original_text() {
        let text = "{\n  \"type\": \"object\"\n}";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.text(), text);
        assert_eq!(doc.root()["type"], "object");
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            Document::parse("{nope").unwrap_err(),
            RefscanError::Parse(_)
        ));
    }
}
