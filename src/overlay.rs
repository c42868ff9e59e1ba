//! Presentational overlays
//!
//! Plugins describe what they draw as a small element tree anchored to a spot in
//! the view. Overlays never become part of the document content.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::messages::Msg;
use crate::model::Node;

/// Where an overlay is anchored in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAnchor {
    /// Widget placed after the last position of the document
    DocumentEnd,
    /// Persistent panel beside the document, anchored at its start
    SidePanel,
}

/// A positioned overlay produced by a plugin
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Stable key so the view can reuse the widget across renders
    pub key: String,
    pub anchor: OverlayAnchor,
    pub element: Element,
}

impl Overlay {
    pub fn new(key: impl Into<String>, anchor: OverlayAnchor, element: Element) -> Self {
        Self {
            key: key.into(),
            anchor,
            element,
        }
    }

    /// Document position the overlay is attached to
    pub fn position(&self, doc: &Node) -> usize {
        match self.anchor {
            OverlayAnchor::DocumentEnd => doc.content_size(),
            OverlayAnchor::SidePanel => 0,
        }
    }
}

/// A node of an overlay's element tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
    /// Message dispatched when the element is clicked
    pub on_click: Option<Msg>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Add a CSS class (builder pattern)
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set an attribute (builder pattern)
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Set the text content (builder pattern)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child (builder pattern)
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Attach a click message (builder pattern)
    pub fn on_click(mut self, msg: Msg) -> Self {
        self.on_click = Some(msg);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// All descendants (including self) carrying `class`, in document order
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_by_class(class, found);
        }
    }

    /// Render as HTML markup
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (key, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", key, escape(value));
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
