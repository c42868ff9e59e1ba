//! Plugin contract between the editor host and document observers
//!
//! A plugin derives its state from the document on startup, may veto or
//! amend a pending edit, re-derives its state after every committed edit, and
//! describes overlays from its current state.

use std::any::Any;

use crate::model::{Node, Transaction};
use crate::overlay::Overlay;

pub trait DocumentPlugin {
    /// Stable name used in logs and rejection reports
    fn key(&self) -> &'static str;

    /// Derive initial state from the starting document
    fn init(&mut self, doc: &Node);

    /// Decide whether a pending edit may commit
    ///
    /// Plugins may add steps to `tr` before accepting it. Returning `false`
    /// drops the edit.
    fn filter_transaction(&mut self, _tr: &mut Transaction) -> bool {
        true
    }

    /// Re-derive state after `tr` was committed
    fn apply(&mut self, tr: &Transaction);

    /// Overlays to draw for the current state
    fn overlays(&mut self) -> Vec<Overlay>;

    fn as_any(&self) -> &dyn Any;
}
