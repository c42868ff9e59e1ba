//! Size metrics over a whole document

use serde::{Deserialize, Serialize};

use crate::model::Node;

/// Separator inserted between text-bearing blocks when flattening
pub const BLOCK_SEPARATOR: &str = " ";

/// Stand-in text for leaf nodes (images, hard breaks, rules) when flattening
pub const LEAF_TEXT: &str = " ";

/// How the character count of a document is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeMode {
    /// Length of the flattened visible text
    #[default]
    TextSize,
    /// Structural size of the document, counting open/close tokens and leaves
    NodeSize,
}

impl SizeMode {
    pub fn label(&self) -> &'static str {
        match self {
            SizeMode::TextSize => "text-size",
            SizeMode::NodeSize => "node-size",
        }
    }
}

/// Flattened text of the whole document
pub fn flatten(doc: &Node) -> String {
    doc.text_between(0, doc.content_size(), BLOCK_SEPARATOR, LEAF_TEXT)
}

/// Size of `doc` under `mode`
pub fn measure(doc: &Node, mode: SizeMode) -> usize {
    match mode {
        SizeMode::TextSize => flatten(doc).chars().count(),
        SizeMode::NodeSize => doc.node_size(),
    }
}

/// Number of whitespace-separated words in the flattened text
pub fn count_words(doc: &Node) -> usize {
    flatten(doc).split_whitespace().count()
}
