//! Outline panel rendering with per-heading diffing

use std::collections::{HashMap, HashSet};

use super::OutlineState;
use crate::messages::{Msg, OutlineMsg};
use crate::overlay::Element;

/// What was last drawn for one heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRecord {
    pub text: String,
    pub level: u8,
    pub id: String,
    /// Whether the item shows a fold indicator
    pub collapsible: bool,
    /// 1-based indentation tier
    pub indent_tier: usize,
}

/// Classification of the headings in the latest render pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDiff {
    pub unchanged: Vec<String>,
    pub changed: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl RenderDiff {
    /// True when nothing differs from the previous render
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

/// Builds the outline panel and remembers what it drew
#[derive(Debug, Clone)]
pub struct OutlineRenderer {
    render_list: HashMap<String, RenderRecord>,
    panel: Element,
    last_diff: RenderDiff,
}

impl OutlineRenderer {
    pub fn new(title: &str) -> Self {
        let panel = Element::new("div")
            .with_class("outline")
            .with_child(Element::new("div").with_class("outline-title").with_text(title))
            .with_child(Element::new("ul").with_class("outline-body"));
        Self {
            render_list: HashMap::new(),
            panel,
            last_diff: RenderDiff::default(),
        }
    }

    /// Last drawn record for a heading id
    pub fn record(&self, id: &str) -> Option<&RenderRecord> {
        self.render_list.get(id)
    }

    pub fn last_diff(&self) -> &RenderDiff {
        &self.last_diff
    }

    /// Compute the visual record of every heading, in document order
    pub fn layout(state: &OutlineState) -> Vec<RenderRecord> {
        let levels = state.sorted_levels();
        let headings = &state.headings;

        headings
            .iter()
            .enumerate()
            .map(|(i, heading)| {
                let collapsible = headings
                    .get(i + 1)
                    .is_some_and(|next| next.level <= heading.level);
                let indent_tier = levels
                    .iter()
                    .position(|level| *level == heading.level)
                    .map_or(1, |rank| rank + 1);
                RenderRecord {
                    text: heading.text.clone(),
                    level: heading.level,
                    id: heading.id.clone(),
                    collapsible,
                    indent_tier,
                }
            })
            .collect()
    }

    /// Rebuild the panel for `state`
    pub fn render(&mut self, state: &OutlineState) -> Element {
        let records = Self::layout(state);
        let mut diff = RenderDiff::default();

        for record in &records {
            match self.render_list.get(&record.id) {
                Some(previous) if previous == record => {
                    diff.unchanged.push(record.id.clone());
                }
                Some(previous) => {
                    tracing::debug!(
                        id = %record.id,
                        "outline item changed: {:?} -> {:?}",
                        previous,
                        record
                    );
                    diff.changed.push(record.id.clone());
                    self.render_list.insert(record.id.clone(), record.clone());
                }
                None => {
                    tracing::debug!(id = %record.id, "outline item added: {:?}", record.text);
                    diff.added.push(record.id.clone());
                    self.render_list.insert(record.id.clone(), record.clone());
                }
            }
        }

        let current: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let mut stale: Vec<String> = self
            .render_list
            .keys()
            .filter(|id| !current.contains(id.as_str()))
            .cloned()
            .collect();
        stale.sort();
        for id in &stale {
            tracing::debug!(id = %id, "outline item removed");
            self.render_list.remove(id);
        }
        diff.removed = stale;

        if let Some(body) = self.panel.children.iter_mut().find(|c| c.has_class("outline-body")) {
            body.clear_children();
            for record in &records {
                body.append_child(render_item(record));
            }
        }

        self.last_diff = diff;
        self.panel.clone()
    }
}

fn render_item(record: &RenderRecord) -> Element {
    let mut item = Element::new("li")
        .with_class("outline-item")
        .with_class(&format!("outline-tier-{}", record.indent_tier))
        .with_attr("data-id", record.id.clone())
        .with_attr("data-level", record.level.to_string());

    if record.collapsible {
        item = item.with_child(
            Element::new("span")
                .with_class("outline-fold")
                .with_text("▾")
                .on_click(Msg::Outline(OutlineMsg::ToggleFold {
                    id: record.id.clone(),
                })),
        );
    }

    item.with_child(
        Element::new("span")
            .with_class("outline-text")
            .with_text(record.text.clone())
            .on_click(Msg::Outline(OutlineMsg::JumpToHeading {
                id: record.id.clone(),
            })),
    )
}
