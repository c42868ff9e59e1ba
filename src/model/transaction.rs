//! Pending edits
//!
//! A [`Transaction`] starts from a committed document and accumulates steps.
//! Gatekeeper plugins may inspect it and add further steps before the host
//! commits it.

use serde_json::Value;

use super::{DocumentError, Node};

/// A single change applied to the pending document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    InsertText { pos: usize, len: usize },
    InsertNodes { pos: usize, size: usize },
    Delete { from: usize, to: usize },
    SetAttr { pos: usize, key: String },
}

/// A pending edit against a committed document
#[derive(Debug, Clone)]
pub struct Transaction {
    before: Node,
    doc: Node,
    selection_head: usize,
    steps: Vec<Step>,
    paste: bool,
}

impl Transaction {
    /// Start a transaction on `doc` with the cursor at `selection_head`
    pub fn new(doc: Node, selection_head: usize) -> Self {
        Self {
            before: doc.clone(),
            doc,
            selection_head,
            steps: Vec::new(),
            paste: false,
        }
    }

    /// The committed document this transaction started from
    pub fn before(&self) -> &Node {
        &self.before
    }

    /// The document with every step so far applied
    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn selection_head(&self) -> usize {
        self.selection_head
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether any step changed the document
    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Whether this edit is a bulk insertion from the clipboard
    pub fn is_paste(&self) -> bool {
        self.paste
    }

    pub fn set_paste(&mut self, paste: bool) -> &mut Self {
        self.paste = paste;
        self
    }

    /// Move the cursor
    pub fn set_selection(&mut self, head: usize) -> Result<&mut Self, DocumentError> {
        let size = self.doc.content_size();
        if head > size {
            return Err(DocumentError::InvalidPosition { pos: head, size });
        }
        self.selection_head = head;
        Ok(self)
    }

    /// Insert text inside a textblock and place the cursor after it
    pub fn insert_text(&mut self, pos: usize, text: &str) -> Result<&mut Self, DocumentError> {
        if text.is_empty() {
            return Ok(self);
        }
        self.doc = self.doc.insert_text(pos, text)?;
        let len = text.chars().count();
        self.steps.push(Step::InsertText { pos, len });
        self.selection_head = pos + len;
        Ok(self)
    }

    /// Insert nodes and place the cursor at the end of the inserted content
    pub fn insert_nodes(
        &mut self,
        pos: usize,
        nodes: Vec<Node>,
    ) -> Result<&mut Self, DocumentError> {
        let Some(last) = nodes.last() else {
            return Ok(self);
        };
        let closes = last.trailing_closes();
        let size: usize = nodes.iter().map(Node::node_size).sum();
        self.doc = self.doc.insert_nodes(pos, nodes)?;
        self.steps.push(Step::InsertNodes { pos, size });
        self.selection_head = pos + size - closes;
        Ok(self)
    }

    /// Remove the content between `from` and `to`
    pub fn delete_range(&mut self, from: usize, to: usize) -> Result<&mut Self, DocumentError> {
        if from == to {
            return Ok(self);
        }
        let old_size = self.doc.content_size();
        self.doc = self.doc.delete_range(from, to)?;
        let removed = old_size - self.doc.content_size();
        self.steps.push(Step::Delete { from, to });

        let head = self.selection_head;
        self.selection_head = if head <= from {
            head
        } else if head >= to {
            head - removed
        } else {
            from
        };
        Ok(self)
    }

    /// Set one attribute on the node starting at `pos`
    pub fn set_node_attr(
        &mut self,
        pos: usize,
        key: &str,
        value: Value,
    ) -> Result<&mut Self, DocumentError> {
        self.doc = self.doc.set_attr_at(pos, key, value)?;
        self.steps.push(Step::SetAttr {
            pos,
            key: key.to_string(),
        });
        Ok(self)
    }
}
