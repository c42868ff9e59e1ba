//! Document outline
//!
//! Tracks the top-level headings of a document and renders them as a side
//! panel. The panel is rebuilt on every state change, diffing each heading
//! against what was drawn last time.

mod extract;
mod render;

pub use extract::extract_outline;
pub use render::{OutlineRenderer, RenderDiff, RenderRecord};

use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::model::{Node, Transaction};
use crate::overlay::{Overlay, OverlayAnchor};
use crate::plugin::DocumentPlugin;

/// A heading found at the top level of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Stable id assigned when the heading node was created
    pub id: String,
    /// Heading level, 1-6
    pub level: u8,
    pub text: String,
}

/// Extracted outline of a document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineState {
    /// Distinct levels present, in first-seen order
    pub levels: Vec<u8>,
    pub headings: Vec<HeadingEntry>,
}

impl OutlineState {
    /// Distinct levels in ascending order
    pub fn sorted_levels(&self) -> Vec<u8> {
        let mut levels = self.levels.clone();
        levels.sort_unstable();
        levels
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }
}

/// Construction-time configuration of the outline plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Node type treated as a heading
    pub node_type: String,
    /// Caption of the side panel
    pub title: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            node_type: "heading".to_string(),
            title: "Outline".to_string(),
        }
    }
}

/// Table-of-contents plugin
#[derive(Debug, Clone)]
pub struct OutlineTracker {
    config: OutlineConfig,
    state: OutlineState,
    renderer: OutlineRenderer,
}

impl OutlineTracker {
    pub fn new(config: OutlineConfig) -> Self {
        let renderer = OutlineRenderer::new(&config.title);
        Self {
            config,
            state: OutlineState::default(),
            renderer,
        }
    }

    pub fn state(&self) -> &OutlineState {
        &self.state
    }

    pub fn renderer(&self) -> &OutlineRenderer {
        &self.renderer
    }

    /// Extract the outline of `doc` using the configured heading type
    pub fn extract(&self, doc: &Node) -> OutlineState {
        extract_outline(doc, &self.config.node_type)
    }
}

impl DocumentPlugin for OutlineTracker {
    fn key(&self) -> &'static str {
        "outline"
    }

    fn init(&mut self, doc: &Node) {
        self.state = self.extract(doc);
    }

    fn apply(&mut self, tr: &Transaction) {
        self.state = self.extract(tr.doc());
    }

    fn overlays(&mut self) -> Vec<Overlay> {
        let panel = self.renderer.render(&self.state);
        vec![Overlay::new("outline", OverlayAnchor::SidePanel, panel)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
