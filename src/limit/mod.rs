//! Character limit plugin
//!
//! Keeps a running character and word count of the document and blocks edits
//! that would push it past a configured ceiling. Pastes that overflow are cut
//! down to fit instead of being dropped outright.

pub mod metric;

use serde::{Deserialize, Serialize};
use std::any::Any;

pub use metric::SizeMode;

use crate::model::{Node, Transaction};
use crate::overlay::{Element, Overlay, OverlayAnchor};
use crate::plugin::DocumentPlugin;

/// Construction-time configuration of the limit plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum size; absent or non-positive means no ceiling
    pub limit: Option<i64>,
    pub mode: SizeMode,
}

impl LimitConfig {
    pub fn new(limit: Option<i64>, mode: SizeMode) -> Self {
        Self { limit, mode }
    }

    /// The enforced ceiling, if any
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit
            .filter(|limit| *limit > 0)
            .and_then(|limit| usize::try_from(limit).ok())
    }
}

/// Running aggregate shown in the counter overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterCount {
    pub characters: usize,
    pub words: usize,
}

/// Why an edit was blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Already over the limit and the edit grows the document further
    GrowthWhileOverLimit,
    /// Typed input would cross the limit
    TypedPastLimit,
    /// An overflowing paste was trimmed but still does not fit
    TrimStillOverLimit,
}

/// Outcome of [`LimitGuard::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitDecision {
    Accept,
    /// Accepted after `removed` units were cut before the cursor
    AcceptTrimmed { removed: usize },
    Reject(RejectReason),
}

impl LimitDecision {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, LimitDecision::Reject(_))
    }
}

/// Character counter and edit gatekeeper
#[derive(Debug, Clone)]
pub struct LimitGuard {
    config: LimitConfig,
    state: CharacterCount,
    last_decision: Option<LimitDecision>,
}

impl LimitGuard {
    pub fn new(config: LimitConfig) -> Self {
        Self {
            config,
            state: CharacterCount::default(),
            last_decision: None,
        }
    }

    pub fn config(&self) -> &LimitConfig {
        &self.config
    }

    /// Current counts
    pub fn state(&self) -> CharacterCount {
        self.state
    }

    /// Decision taken for the most recent pending edit
    pub fn last_decision(&self) -> Option<LimitDecision> {
        self.last_decision
    }

    /// Size of `doc` under the configured mode
    pub fn characters(&self, doc: &Node) -> usize {
        metric::measure(doc, self.config.mode)
    }

    /// Full recount of `doc`
    pub fn recompute(&self, doc: &Node) -> CharacterCount {
        CharacterCount {
            characters: self.characters(doc),
            words: metric::count_words(doc),
        }
    }

    /// Decide whether the pending edit fits under the limit
    ///
    /// An overflowing paste is trimmed in place: the excess is deleted from
    /// just before the cursor, so an accepted trim has already modified `tr`.
    pub fn evaluate(&self, tr: &mut Transaction) -> LimitDecision {
        let Some(limit) = self.config.effective_limit() else {
            return LimitDecision::Accept;
        };
        if !tr.doc_changed() {
            return LimitDecision::Accept;
        }

        let old_size = self.characters(tr.before());
        let new_size = self.characters(tr.doc());

        if new_size <= limit {
            return LimitDecision::Accept;
        }
        if old_size > limit && new_size <= old_size {
            return LimitDecision::Accept;
        }
        if old_size > limit {
            return LimitDecision::Reject(RejectReason::GrowthWhileOverLimit);
        }
        if !tr.is_paste() {
            return LimitDecision::Reject(RejectReason::TypedPastLimit);
        }

        let over = new_size - limit;
        let to = tr.selection_head();
        let from = to.saturating_sub(over);
        if let Err(err) = tr.delete_range(from, to) {
            tracing::warn!("Could not trim paste at {}..{}: {}", from, to, err);
            return LimitDecision::Reject(RejectReason::TrimStillOverLimit);
        }

        let trimmed_size = self.characters(tr.doc());
        tracing::debug!(
            old_size,
            new_size,
            trimmed_size,
            limit,
            "trimmed paste by {} before position {}",
            over,
            to
        );
        if trimmed_size > limit {
            LimitDecision::Reject(RejectReason::TrimStillOverLimit)
        } else {
            LimitDecision::AcceptTrimmed { removed: over }
        }
    }

    /// Counter widget for the end of the document
    pub fn render_overlay(&self, state: &CharacterCount) -> Overlay {
        let label = match self.config.effective_limit() {
            Some(limit) => format!("{}/{} Characters", state.characters, limit),
            None => format!("{} Characters", state.characters),
        };
        let element = Element::new("span")
            .with_class("character-count")
            .with_attr("data-words", state.words.to_string())
            .with_text(label);
        Overlay::new("character-count", OverlayAnchor::DocumentEnd, element)
    }
}

impl DocumentPlugin for LimitGuard {
    fn key(&self) -> &'static str {
        "character-count"
    }

    fn init(&mut self, doc: &Node) {
        self.state = self.recompute(doc);
    }

    fn filter_transaction(&mut self, tr: &mut Transaction) -> bool {
        let decision = self.evaluate(tr);
        tracing::debug!(mode = self.config.mode.label(), "limit decision: {:?}", decision);
        self.last_decision = Some(decision);
        decision.is_accepted()
    }

    fn apply(&mut self, tr: &Transaction) {
        self.state = self.recompute(tr.doc());
    }

    fn overlays(&mut self) -> Vec<Overlay> {
        vec![self.render_overlay(&self.state)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(text: &str) -> Node {
        Node::block("doc", vec![Node::paragraph(text)])
    }

    fn guard(limit: i64) -> LimitGuard {
        LimitGuard::new(LimitConfig::new(Some(limit), SizeMode::TextSize))
    }

    #[test]
    fn test_effective_limit() {
        assert_eq!(LimitConfig::new(Some(10), SizeMode::TextSize).effective_limit(), Some(10));
        assert_eq!(LimitConfig::new(Some(0), SizeMode::TextSize).effective_limit(), None);
        assert_eq!(LimitConfig::new(Some(-5), SizeMode::TextSize).effective_limit(), None);
        assert_eq!(LimitConfig::default().effective_limit(), None);
    }

    #[test]
    fn test_unchanged_transaction_is_accepted_even_when_over() {
        let mut tr = Transaction::new(doc_with("far too long for the limit"), 1);
        assert_eq!(guard(3).evaluate(&mut tr), LimitDecision::Accept);
    }

    #[test]
    fn test_no_limit_accepts_everything() {
        let g = LimitGuard::new(LimitConfig::default());
        let mut tr = Transaction::new(doc_with("abc"), 4);
        tr.insert_text(4, &"x".repeat(1000)).unwrap();
        assert_eq!(g.evaluate(&mut tr), LimitDecision::Accept);
    }

    #[test]
    fn test_recompute() {
        let g = guard(100);
        let state = g.recompute(&doc_with("two words"));
        assert_eq!(state, CharacterCount { characters: 9, words: 2 });
    }

    #[test]
    fn test_render_overlay_label() {
        let g = guard(10);
        let overlay = g.render_overlay(&CharacterCount { characters: 4, words: 1 });
        assert_eq!(overlay.anchor, OverlayAnchor::DocumentEnd);
        assert_eq!(overlay.element.text.as_deref(), Some("4/10 Characters"));
    }

    #[test]
    fn test_render_overlay_without_limit() {
        let g = LimitGuard::new(LimitConfig::default());
        let overlay = g.render_overlay(&CharacterCount { characters: 7, words: 2 });
        assert_eq!(overlay.element.text.as_deref(), Some("7 Characters"));
    }
}
