//! Minimal editor host
//!
//! Owns the committed document and runs the plugin lifecycle: gatekeepers see
//! every pending edit first, then every plugin re-derives its state from the
//! committed result.

use crate::messages::Msg;
use crate::model::{Node, Transaction};
use crate::overlay::Overlay;
use crate::plugin::DocumentPlugin;

/// Result of dispatching a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Committed (possibly after a plugin amended it)
    Applied,
    /// Dropped by the named plugin
    Rejected { plugin: &'static str },
}

pub struct Editor {
    doc: Node,
    selection_head: usize,
    plugins: Vec<Box<dyn DocumentPlugin>>,
}

impl Editor {
    pub fn new(doc: Node) -> Self {
        Self {
            doc,
            selection_head: 0,
            plugins: Vec::new(),
        }
    }

    /// Attach a plugin and initialize it from the current document (builder pattern)
    pub fn with_plugin(mut self, mut plugin: Box<dyn DocumentPlugin>) -> Self {
        plugin.init(&self.doc);
        self.plugins.push(plugin);
        self
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn selection_head(&self) -> usize {
        self.selection_head
    }

    /// Start a transaction against the committed document
    pub fn transaction(&self) -> Transaction {
        Transaction::new(self.doc.clone(), self.selection_head)
    }

    /// First attached plugin of type `T`
    pub fn plugin<T: 'static>(&self) -> Option<&T> {
        self.plugins
            .iter()
            .find_map(|plugin| plugin.as_any().downcast_ref::<T>())
    }

    /// Run gatekeepers on `tr` and commit it unless one of them rejects it
    pub fn dispatch(&mut self, mut tr: Transaction) -> DispatchOutcome {
        for plugin in &mut self.plugins {
            if !plugin.filter_transaction(&mut tr) {
                tracing::debug!(
                    plugin = plugin.key(),
                    steps = tr.steps().len(),
                    "transaction rejected"
                );
                return DispatchOutcome::Rejected {
                    plugin: plugin.key(),
                };
            }
        }

        self.doc = tr.doc().clone();
        self.selection_head = tr.selection_head();
        for plugin in &mut self.plugins {
            plugin.apply(&tr);
        }
        tracing::trace!(
            steps = tr.steps().len(),
            size = self.doc.content_size(),
            "transaction applied"
        );
        DispatchOutcome::Applied
    }

    /// Overlays from every plugin, in attachment order
    pub fn overlays(&mut self) -> Vec<Overlay> {
        self.plugins
            .iter_mut()
            .flat_map(|plugin| plugin.overlays())
            .collect()
    }

    /// Route a click on an overlay element
    pub fn click(&mut self, msg: Msg) {
        crate::update::update(self, msg);
    }
}
