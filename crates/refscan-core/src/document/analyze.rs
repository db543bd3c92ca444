//! Analysis orchestration over a parsed document.
//!
//! Runs the definitions-graph check first (its failures fold into the
//! report), then the general recursion scan, and maps a found cycle
//! back to source lines. Only a dangling reference or a blown
//! traversal guard from the recursion scan aborts the analysis.

use serde::Serialize;
use tracing::debug;

use refscan_engine::engine::{
    check_definitions, detect_recursion, locate, locate_all, DefsKey, ScanError,
};

use super::Document;
use crate::error::Result;

/// Result of one full analysis pass over a document.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// First structural cycle found, if any.
    pub recursion: Option<RecursionFinding>,
    /// Outcome of the named-definitions cycle check.
    pub definitions: DefinitionsOutcome,
}

/// A detected cycle with its highlight positions.
#[derive(Debug, Clone, Serialize)]
pub struct RecursionFinding {
    /// Symbolic `" -> "`-joined path to the cycle.
    pub path: String,
    /// Best-guess 1-based line for the first path step.
    pub line: Option<usize>,
    /// Per-step forward matches, concatenated in path order.
    pub lines: Vec<usize>,
}

/// What the definitions-graph check concluded.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DefinitionsOutcome {
    /// Every chain terminated within the hop bound.
    Clean,
    /// The graph is provably cyclic or cannot be finitely expanded.
    Cyclic { detail: String },
    /// The check could not complete (dangling pointer, blown guard).
    Failed { detail: String },
}

impl Analysis {
    /// True when either detector found something cyclic.
    pub fn has_recursion(&self) -> bool {
        self.recursion.is_some()
            || matches!(self.definitions, DefinitionsOutcome::Cyclic { .. })
    }
}

impl Document {
    /// Analyze this document for structural recursion.
    pub fn analyze(&self, defs_key: DefsKey) -> Result<Analysis> {
        let definitions = match check_definitions(self.root(), defs_key) {
            Ok(()) => DefinitionsOutcome::Clean,
            Err(
                err @ (ScanError::RootSelfReference
                | ScanError::CircularReference { .. }
                | ScanError::MaxDepthExceeded { .. }),
            ) => DefinitionsOutcome::Cyclic {
                detail: err.to_string(),
            },
            Err(err) => DefinitionsOutcome::Failed {
                detail: err.to_string(),
            },
        };

        let recursion = detect_recursion(self.root())?.map(|path| {
            let line = locate(self.text(), &path);
            let lines = locate_all(self.text(), &path);
            debug!(%path, ?line, "recursion detected");
            RecursionFinding { path, line, lines }
        });

        Ok(Analysis {
            recursion,
            definitions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::parse(text).unwrap()
    }

    #[test]
    fn test_clean_schema() {
        let analysis = doc(r#"{"type": "object", "properties": {"x": {"type": "string"}}}"#)
            .analyze(DefsKey::Defs)
            .unwrap();
        assert!(analysis.recursion.is_none());
        assert!(matches!(analysis.definitions, DefinitionsOutcome::Clean));
        assert!(!analysis.has_recursion());
    }

    #[test]
    fn test_recursive_schema_reports_path_and_lines() {
        let source = r##"{
  "type": "object",
  "properties": {
    "next": { "$ref": "#" }
  }
}"##;
        let analysis = doc(source).analyze(DefsKey::Defs).unwrap();

        let finding = analysis.recursion.as_ref().expect("recursion expected");
        assert_eq!(finding.path, "properties.next -> $ref:#");
        assert_eq!(finding.line, Some(4));
        assert!(!finding.lines.is_empty());

        // The root self-reference also dooms the definitions check.
        assert!(matches!(
            analysis.definitions,
            DefinitionsOutcome::Cyclic { .. }
        ));
        assert!(analysis.has_recursion());
    }

    #[test]
    fn test_mutual_definitions_cycle() {
        let source = r##"{
  "type": "object",
  "properties": { "a": { "$ref": "#/$defs/A" } },
  "$defs": {
    "A": { "type": "object", "properties": { "b": { "$ref": "#/$defs/B" } } },
    "B": { "type": "object", "properties": { "a": { "$ref": "#/$defs/A" } } }
  }
}"##;
        let analysis = doc(source).analyze(DefsKey::Defs).unwrap();
        assert!(analysis.recursion.is_some());
        match &analysis.definitions {
            DefinitionsOutcome::Cyclic { detail } => {
                assert!(detail.contains("#/$defs/A"), "detail: {detail}");
            }
            other => panic!("expected Cyclic, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_reference_aborts_analysis() {
        let source = r##"{"type": "object", "properties": {"x": {"$ref": "#/$defs/Gone"}}}"##;
        assert!(doc(source).analyze(DefsKey::Defs).is_err());
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = doc(r##"{"type": "object", "properties": {"next": {"$ref": "#"}}}"##)
            .analyze(DefsKey::Defs)
            .unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["definitions"]["status"], "cyclic");
        assert_eq!(json["recursion"]["path"], "properties.next -> $ref:#");
    }
}
