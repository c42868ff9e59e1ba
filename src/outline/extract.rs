//! Heading extraction from the top level of a document

use serde_json::Value;
use std::collections::HashSet;

use super::{HeadingEntry, OutlineState};
use crate::model::Node;

/// Collect the headings among the direct children of `doc`
///
/// Only nodes of type `node_type` with non-empty text count. Headings whose
/// `level` or `id` attribute is missing or malformed are skipped, as is any
/// heading repeating an id seen earlier in the document.
pub fn extract_outline(doc: &Node, node_type: &str) -> OutlineState {
    let mut state = OutlineState::default();
    let mut seen = HashSet::new();

    for child in doc.content() {
        if child.kind() != node_type {
            continue;
        }
        let text = child.text_content();
        if text.is_empty() {
            continue;
        }

        let Some(level) = child.attr("level").and_then(parse_level) else {
            tracing::warn!("Skipping heading without a valid level: {:?}", text);
            continue;
        };
        let Some(id) = child.attr("id").and_then(parse_id) else {
            tracing::warn!("Skipping heading without an id: {:?}", text);
            continue;
        };
        if !seen.insert(id.clone()) {
            tracing::warn!(id = %id, "Skipping heading with a duplicate id: {:?}", text);
            continue;
        }

        if !state.levels.contains(&level) {
            state.levels.push(level);
        }
        state.headings.push(HeadingEntry { id, level, text });
    }

    state
}

fn parse_level(value: &Value) -> Option<u8> {
    let level = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (1..=6).contains(&level).then_some(level as u8)
}

fn parse_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attrs, NodeRole};

    fn doc(content: Vec<Node>) -> Node {
        Node::block("doc", content)
    }

    #[test]
    fn test_levels_keep_first_seen_order() {
        let d = doc(vec![
            Node::heading(3, "a", "A"),
            Node::paragraph("body"),
            Node::heading(1, "b", "B"),
            Node::heading(3, "c", "C"),
        ]);
        let state = extract_outline(&d, "heading");
        assert_eq!(state.levels, vec![3, 1]);
        assert_eq!(state.headings.len(), 3);
        assert_eq!(state.headings[1].text, "B");
    }

    #[test]
    fn test_empty_headings_are_ignored() {
        let d = doc(vec![Node::heading(1, "a", ""), Node::heading(2, "b", "B")]);
        let state = extract_outline(&d, "heading");
        assert_eq!(state.headings.len(), 1);
        assert_eq!(state.levels, vec![2]);
    }

    #[test]
    fn test_nested_headings_are_ignored() {
        let quote = Node::block("blockquote", vec![Node::heading(1, "q", "Quoted")]);
        let state = extract_outline(&doc(vec![quote]), "heading");
        assert!(state.headings.is_empty());
    }

    #[test]
    fn test_malformed_headings_are_skipped() {
        let mut no_id = Attrs::new();
        no_id.insert("level".to_string(), Value::from(2));
        let mut bad_level = Attrs::new();
        bad_level.insert("level".to_string(), Value::from(9));
        bad_level.insert("id".to_string(), Value::from("x"));

        let d = doc(vec![
            Node::new("heading", NodeRole::Textblock, no_id, vec![Node::text("No id")]),
            Node::new("heading", NodeRole::Textblock, bad_level, vec![Node::text("Bad")]),
            Node::heading(1, "ok", "Fine"),
        ]);
        let state = extract_outline(&d, "heading");
        assert_eq!(state.headings.len(), 1);
        assert_eq!(state.headings[0].id, "ok");
    }

    #[test]
    fn test_duplicate_ids_keep_first_heading() {
        let d = doc(vec![
            Node::heading(1, "intro", "Intro"),
            Node::heading(2, "next", "Next"),
            Node::heading(3, "intro", "Copy"),
        ]);
        let state = extract_outline(&d, "heading");
        let ids: Vec<_> = state.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "next"]);
        assert_eq!(state.headings[0].text, "Intro");
        assert_eq!(state.levels, vec![1, 2]);
    }

    #[test]
    fn test_level_as_string() {
        assert_eq!(parse_level(&Value::from("4")), Some(4));
        assert_eq!(parse_level(&Value::from(0)), None);
        assert_eq!(parse_level(&Value::Null), None);
    }
}
