//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use folio::limit::{LimitConfig, LimitGuard, SizeMode};
use folio::model::Node;
use folio::outline::{OutlineConfig, OutlineTracker};
use folio::Editor;

/// Document with the given top-level blocks
pub fn doc(content: Vec<Node>) -> Node {
    Node::block("doc", content)
}

pub fn p(text: &str) -> Node {
    Node::paragraph(text)
}

pub fn h(level: u8, id: &str, text: &str) -> Node {
    Node::heading(level, id, text)
}

/// Document with one paragraph of `len` copies of `x`
pub fn doc_of_len(len: usize) -> Node {
    doc(vec![p(&"x".repeat(len))])
}

/// End of the text in the first paragraph
pub fn end_of_first_paragraph(doc: &Node) -> usize {
    doc.child(0).map_or(0, |p| p.content_size() + 1)
}

pub fn guard(limit: i64) -> LimitGuard {
    LimitGuard::new(LimitConfig::new(Some(limit), SizeMode::TextSize))
}

/// Editor with both plugins attached and a text-size limit
pub fn test_editor(doc: Node, limit: Option<i64>) -> Editor {
    Editor::new(doc)
        .with_plugin(Box::new(LimitGuard::new(LimitConfig::new(
            limit,
            SizeMode::TextSize,
        ))))
        .with_plugin(Box::new(OutlineTracker::new(OutlineConfig::default())))
}
