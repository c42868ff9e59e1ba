//! Document nodes - the immutable tree every edit produces a new version of
//!
//! Positions follow the token convention used by the editor core: a text node
//! counts one position per character, a leaf node counts one, and every other
//! node counts its content plus one opening and one closing token.

use serde_json::Value;
use std::collections::BTreeMap;

use super::DocumentError;

/// Node attributes (e.g. `level` and `id` on headings)
pub type Attrs = BTreeMap<String, Value>;

/// Structural role of a node, decided by the schema when the node is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Block container holding other blocks (doc, blockquote, list_item)
    Block,
    /// Block holding inline content (paragraph, heading, code_block)
    Textblock,
    /// Block without content (horizontal_rule)
    BlockLeaf,
    /// Inline node without content (image, hard_break)
    InlineLeaf,
    /// Run of text
    Text,
}

impl NodeRole {
    pub fn is_block(self) -> bool {
        matches!(self, Self::Block | Self::Textblock | Self::BlockLeaf)
    }

    pub fn is_inline(self) -> bool {
        matches!(self, Self::InlineLeaf | Self::Text)
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, Self::BlockLeaf | Self::InlineLeaf | Self::Text)
    }
}

/// A single node of the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: String,
    role: NodeRole,
    attrs: Attrs,
    content: Vec<Node>,
    text: String,
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            role: NodeRole::Text,
            attrs: Attrs::new(),
            content: Vec::new(),
            text: text.into(),
        }
    }

    /// Create a non-text node with the given role
    ///
    /// Leaf roles drop any content passed in.
    pub fn new(kind: impl Into<String>, role: NodeRole, attrs: Attrs, content: Vec<Node>) -> Self {
        let content = if role.is_leaf() { Vec::new() } else { content };
        Self {
            kind: kind.into(),
            role,
            attrs,
            content,
            text: String::new(),
        }
    }

    /// Create a block container node
    pub fn block(kind: impl Into<String>, content: Vec<Node>) -> Self {
        Self::new(kind, NodeRole::Block, Attrs::new(), content)
    }

    /// Create a textblock node
    pub fn textblock(kind: impl Into<String>, attrs: Attrs, content: Vec<Node>) -> Self {
        Self::new(kind, NodeRole::Textblock, attrs, merge_text(content))
    }

    /// Create a heading textblock with the `level` and `id` attributes set
    pub fn heading(level: u8, id: impl Into<String>, text: &str) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("level".to_string(), Value::from(level));
        attrs.insert("id".to_string(), Value::from(id.into()));
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Self::textblock("heading", attrs, content)
    }

    /// Create a paragraph holding a single text run
    pub fn paragraph(text: &str) -> Self {
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Self::textblock("paragraph", Attrs::new(), content)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.content.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.content.len()
    }

    /// Text of a text node (empty for every other node)
    pub fn text_str(&self) -> &str {
        &self.text
    }

    pub fn is_text(&self) -> bool {
        self.role == NodeRole::Text
    }

    pub fn is_textblock(&self) -> bool {
        self.role == NodeRole::Textblock
    }

    pub fn is_block(&self) -> bool {
        self.role.is_block()
    }

    pub fn is_leaf(&self) -> bool {
        self.role.is_leaf()
    }

    /// Total size of this node in positions, including its own open/close tokens
    pub fn node_size(&self) -> usize {
        match self.role {
            NodeRole::Text => self.text.chars().count(),
            NodeRole::BlockLeaf | NodeRole::InlineLeaf => 1,
            NodeRole::Block | NodeRole::Textblock => self.content_size() + 2,
        }
    }

    /// Size of this node's content (positions strictly inside it)
    pub fn content_size(&self) -> usize {
        if self.is_text() {
            return self.node_size();
        }
        self.content.iter().map(Node::node_size).sum()
    }

    /// Concatenated text of all descendant text nodes, without separators
    pub fn text_content(&self) -> String {
        if self.is_text() {
            return self.text.clone();
        }
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.content {
            if child.is_text() {
                out.push_str(&child.text);
            } else {
                child.collect_text(out);
            }
        }
    }

    /// Visit every descendant overlapping the content range `from..to`
    ///
    /// The callback receives the node and its absolute start position. Returning
    /// `false` skips the node's children.
    pub fn nodes_between<F>(&self, from: usize, to: usize, f: &mut F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        self.nodes_between_at(from, to, f, 0);
    }

    fn nodes_between_at<F>(&self, from: usize, to: usize, f: &mut F, node_start: usize)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        let mut pos = 0;
        for child in &self.content {
            if pos >= to {
                break;
            }
            let end = pos + child.node_size();
            if end > from && f(child, node_start + pos) && !child.is_leaf() {
                let start = pos + 1;
                child.nodes_between_at(
                    from.saturating_sub(start),
                    child.content_size().min(to.saturating_sub(start)),
                    f,
                    node_start + start,
                );
            }
            pos = end;
        }
    }

    /// Flattened text of the content range `from..to`
    ///
    /// `block_separator` is inserted before every textblock (and every leaf block
    /// that renders text) except the first; `leaf_text` stands in for leaf nodes.
    pub fn text_between(
        &self,
        from: usize,
        to: usize,
        block_separator: &str,
        leaf_text: &str,
    ) -> String {
        let mut out = String::new();
        let mut first = true;
        self.nodes_between(from, to, &mut |node, pos| {
            let node_text = if node.is_text() {
                char_slice(&node.text, from.max(pos) - pos, to.saturating_sub(pos))
            } else if node.is_leaf() {
                leaf_text
            } else {
                ""
            };
            let starts_block = node.is_block()
                && ((node.is_leaf() && !node_text.is_empty()) || node.is_textblock());
            if starts_block && !block_separator.is_empty() {
                if first {
                    first = false;
                } else {
                    out.push_str(block_separator);
                }
            }
            out.push_str(node_text);
            true
        });
        out
    }

    /// Copy of this node with the content range `from..to` removed
    ///
    /// Nodes entirely inside the range are dropped. Containers that are only
    /// partially covered are kept and lose just the covered part of their
    /// content, so a range spanning a block boundary never joins blocks.
    pub fn delete_range(&self, from: usize, to: usize) -> Result<Node, DocumentError> {
        let size = self.content_size();
        if from > to || to > size {
            return Err(DocumentError::InvalidRange { from, to, size });
        }
        Ok(self.without_range(from, to))
    }

    fn without_range(&self, from: usize, to: usize) -> Node {
        let mut content = Vec::with_capacity(self.content.len());
        let mut pos = 0;
        for child in &self.content {
            let end = pos + child.node_size();
            if end <= from || pos >= to {
                content.push(child.clone());
            } else if from <= pos && end <= to {
                // Fully covered
            } else if child.is_text() {
                let start = from.saturating_sub(pos);
                let stop = (to - pos).min(end - pos);
                let kept: String = child
                    .text
                    .chars()
                    .enumerate()
                    .filter(|(i, _)| *i < start || *i >= stop)
                    .map(|(_, c)| c)
                    .collect();
                content.push(Node::text(kept));
            } else if !child.is_leaf() {
                let inner = pos + 1;
                let inner_from = from.saturating_sub(inner).min(child.content_size());
                let inner_to = to.saturating_sub(inner).min(child.content_size());
                content.push(child.without_range(inner_from, inner_to));
            }
            pos = end;
        }
        self.with_content(content)
    }

    /// Copy of this node with `text` inserted at content position `pos`
    ///
    /// The position must lie inside a textblock.
    pub fn insert_text(&self, pos: usize, text: &str) -> Result<Node, DocumentError> {
        if self.is_textblock() {
            return self.insert_inline(pos, vec![Node::text(text)]);
        }
        let (index, start) = self.child_containing(pos)?;
        let child = &self.content[index];
        let updated = child.insert_text(pos - start - 1, text)?;
        Ok(self.replace_child(index, updated))
    }

    /// Copy of this node with `nodes` inserted at content position `pos`
    ///
    /// Inline nodes go into the textblock around `pos`; block nodes must land on
    /// a boundary between children of a block container.
    pub fn insert_nodes(&self, pos: usize, nodes: Vec<Node>) -> Result<Node, DocumentError> {
        if self.is_textblock() {
            if let Some(block) = nodes.iter().find(|n| n.is_block()) {
                return Err(DocumentError::SchemaViolation {
                    parent: self.kind.clone(),
                    child: block.kind.clone(),
                });
            }
            return self.insert_inline(pos, nodes);
        }

        let mut boundary = 0;
        for (index, child) in self.content.iter().enumerate() {
            if boundary == pos {
                return self.insert_blocks_at(index, nodes);
            }
            boundary += child.node_size();
        }
        if boundary == pos {
            return self.insert_blocks_at(self.content.len(), nodes);
        }

        let (index, start) = self.child_containing(pos)?;
        let updated = self.content[index].insert_nodes(pos - start - 1, nodes)?;
        Ok(self.replace_child(index, updated))
    }

    fn insert_blocks_at(&self, index: usize, nodes: Vec<Node>) -> Result<Node, DocumentError> {
        if let Some(inline) = nodes.iter().find(|n| !n.is_block()) {
            return Err(DocumentError::SchemaViolation {
                parent: self.kind.clone(),
                child: inline.kind.clone(),
            });
        }
        let mut content = self.content.clone();
        content.splice(index..index, nodes);
        Ok(self.with_content(content))
    }

    fn insert_inline(&self, pos: usize, nodes: Vec<Node>) -> Result<Node, DocumentError> {
        let size = self.content_size();
        if pos > size {
            return Err(DocumentError::InvalidPosition { pos, size });
        }

        let mut content = Vec::with_capacity(self.content.len() + nodes.len() + 1);
        let mut pending = Some(nodes);
        let mut offset = 0;
        for child in &self.content {
            let end = offset + child.node_size();
            if pos <= offset {
                if let Some(nodes) = pending.take() {
                    content.extend(nodes);
                }
                content.push(child.clone());
            } else if pos < end && child.is_text() {
                let (head, tail) = split_chars(&child.text, pos - offset);
                content.push(Node::text(head));
                if let Some(nodes) = pending.take() {
                    content.extend(nodes);
                }
                content.push(Node::text(tail));
            } else {
                content.push(child.clone());
            }
            offset = end;
        }
        if let Some(nodes) = pending {
            content.extend(nodes);
        }
        Ok(self.with_content(content))
    }

    /// Copy of this node with one attribute of the node starting at `pos` replaced
    pub fn set_attr_at(&self, pos: usize, key: &str, value: Value) -> Result<Node, DocumentError> {
        let mut start = 0;
        for (index, child) in self.content.iter().enumerate() {
            let end = start + child.node_size();
            if start == pos {
                let mut updated = child.clone();
                updated.attrs.insert(key.to_string(), value);
                return Ok(self.replace_child(index, updated));
            }
            if pos > start && pos < end && !child.is_leaf() {
                let updated = child.set_attr_at(pos - start - 1, key, value)?;
                return Ok(self.replace_child(index, updated));
            }
            start = end;
        }
        Err(DocumentError::InvalidPosition {
            pos,
            size: self.content_size(),
        })
    }

    /// Number of closing tokens between the end of this node's last inline
    /// content and the end of the node itself
    pub fn trailing_closes(&self) -> usize {
        match self.role {
            NodeRole::Text | NodeRole::InlineLeaf | NodeRole::BlockLeaf => 0,
            NodeRole::Textblock => 1,
            NodeRole::Block => 1 + self.content.last().map_or(0, Node::trailing_closes),
        }
    }

    /// Index and start position of the non-leaf child whose content contains `pos`
    fn child_containing(&self, pos: usize) -> Result<(usize, usize), DocumentError> {
        let mut start = 0;
        for (index, child) in self.content.iter().enumerate() {
            let end = start + child.node_size();
            if !child.is_leaf() && pos > start && pos < end {
                return Ok((index, start));
            }
            start = end;
        }
        Err(DocumentError::InvalidPosition {
            pos,
            size: self.content_size(),
        })
    }

    fn replace_child(&self, index: usize, child: Node) -> Node {
        let mut content = self.content.clone();
        content[index] = child;
        self.with_content(content)
    }

    fn with_content(&self, content: Vec<Node>) -> Node {
        let content = if self.is_textblock() {
            merge_text(content)
        } else {
            content
        };
        Node {
            kind: self.kind.clone(),
            role: self.role,
            attrs: self.attrs.clone(),
            content,
            text: String::new(),
        }
    }
}

/// Join adjacent text runs and drop empty ones
fn merge_text(content: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(content.len());
    for node in content {
        if node.is_text() {
            if node.text.is_empty() {
                continue;
            }
            if let Some(last) = merged.last_mut().filter(|n| n.is_text()) {
                last.text.push_str(&node.text);
                continue;
            }
        }
        merged.push(node);
    }
    merged
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| text.char_indices().nth(n).map_or(text.len(), |(i, _)| i);
    let (start, end) = (byte_at(start), byte_at(end));
    if start >= end {
        ""
    } else {
        &text[start..end]
    }
}

fn split_chars(text: &str, at: usize) -> (String, String) {
    let byte = text.char_indices().nth(at).map_or(text.len(), |(i, _)| i);
    (text[..byte].to_string(), text[byte..].to_string())
}
