//! Map a symbolic traversal path back to lines in the source text.
//!
//! This is a heuristic over raw text lines, not a position-tracking
//! parser: a repeated key name in an unrelated context can match. The
//! search order is load-bearing and must not change — `$ref` steps
//! scan backward first (a recursion is usually detected at the later
//! textual occurrence of the pointer, not at its definition), plain
//! key steps scan forward only.
//!
//! A position-tracking JSON parser would be strictly more correct
//! here; the heuristic is kept because its results are what callers
//! and tests are calibrated against.

use regex::Regex;

const REF_STEP_PREFIX: &str = "$ref:";

/// Locate the first path step in `source`, as a 1-based line number.
///
/// `path` is the `" -> "`-joined diagnostic string produced by the
/// recursion detector. Returns `None` when nothing matches; that is a
/// soft "no highlight available", never an error.
pub fn locate(source: &str, path: &str) -> Option<usize> {
    let step = path.split(" -> ").next()?;
    let lines: Vec<&str> = source.lines().collect();

    if let Some(pointer) = step.strip_prefix(REF_STEP_PREFIX) {
        let pattern = ref_pattern(pointer)?;
        // Backward first, then fall back to a forward scan.
        for (index, line) in lines.iter().enumerate().rev() {
            if pattern.is_match(line) {
                return Some(index + 1);
            }
        }
        return matching_lines(&lines, &pattern).next();
    }

    let pattern = key_pattern(search_key(step))?;
    matching_lines(&lines, &pattern).next()
}

/// Locate every step of `path` independently with a forward key
/// search, concatenating all matches in path order, duplicates kept.
pub fn locate_all(source: &str, path: &str) -> Vec<usize> {
    let lines: Vec<&str> = source.lines().collect();
    let mut found = Vec::new();

    for step in path.split(" -> ") {
        let pattern = if let Some(pointer) = step.strip_prefix(REF_STEP_PREFIX) {
            ref_pattern(pointer)
        } else {
            key_pattern(search_key(step))
        };
        let Some(pattern) = pattern else { continue };
        found.extend(matching_lines(&lines, &pattern));
    }

    found
}

/// Derive the single search key for a plain step: `a.b.c` keeps the
/// last dotted segment, `key[index]` keeps the text before the
/// bracket, anything else is used verbatim.
fn search_key(step: &str) -> &str {
    if let Some(bracket) = step.find('[') {
        return &step[..bracket];
    }
    match step.rfind('.') {
        Some(dot) => &step[dot + 1..],
        None => step,
    }
}

fn ref_pattern(pointer: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#""\$ref"\s*:\s*"{}""#,
        regex::escape(pointer)
    ))
    .ok()
}

fn key_pattern(key: &str) -> Option<Regex> {
    Regex::new(&format!(r#""{}"\s*:"#, regex::escape(key))).ok()
}

/// Forward scan: 1-based numbers of every line matching `pattern`.
fn matching_lines<'a>(lines: &'a [&str], pattern: &'a Regex) -> impl Iterator<Item = usize> + 'a {
    lines
        .iter()
        .enumerate()
        .filter(move |(_, line)| pattern.is_match(line))
        .map(|(index, _)| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r##"{
  "type": "object",
  "properties": {
    "next": { "$ref": "#/$defs/A" }
  },
  "$defs": {
    "A": {
      "type": "object",
      "properties": {
        "next": { "$ref": "#/$defs/A" }
      }
    }
  }
}"##;

    #[test]
    fn test_locate_ref_step_prefers_later_occurrence() {
        // The pointer appears on lines 4 and 10; backward scan wins.
        assert_eq!(locate(SOURCE, "$ref:#/$defs/A"), Some(10));
    }

    #[test]
    fn test_locate_unique_ref_line() {
        let source = "{\n  \"x\": { \"$ref\": \"#/$defs/A\" }\n}";
        assert_eq!(locate(source, "$ref:#/$defs/A"), Some(2));
    }

    #[test]
    fn test_locate_property_step_takes_last_segment() {
        // "properties.next" searches for the "next" key, forward.
        assert_eq!(locate(SOURCE, "properties.next -> $ref:#/$defs/A"), Some(4));
    }

    #[test]
    fn test_locate_array_step_strips_index() {
        let source = "{\n  \"allOf\": [\n    { \"type\": \"string\" }\n  ]\n}";
        assert_eq!(locate(source, "allOf[0]"), Some(2));
    }

    #[test]
    fn test_locate_missing_key_is_none() {
        assert_eq!(locate(SOURCE, "properties.absent"), None);
        assert_eq!(locate("", "$ref:#"), None);
    }

    #[test]
    fn test_locate_tolerates_compact_json() {
        let source = "{\"a\":{\"$ref\":\"#\"}}";
        assert_eq!(locate(source, "$ref:#"), Some(1));
    }

    #[test]
    fn test_locate_all_concatenates_per_step() {
        let hits = locate_all(SOURCE, "properties.next -> $ref:#/$defs/A");
        // "next" matches lines 4 and 10; the ref matches 4 and 10 again.
        assert_eq!(hits, vec![4, 10, 4, 10]);
    }

    #[test]
    fn test_locate_all_empty_when_nothing_matches() {
        assert!(locate_all(SOURCE, "properties.absent").is_empty());
    }

    #[test]
    fn test_search_key_forms() {
        assert_eq!(search_key("properties.next"), "next");
        assert_eq!(search_key("a.b.c"), "c");
        assert_eq!(search_key("allOf[3]"), "allOf");
        assert_eq!(search_key("verbatim"), "verbatim");
    }
}
