//! Outline extraction and panel rendering tests

mod common;

use common::{doc, h, p};
use folio::messages::{Msg, OutlineMsg};
use folio::model::{Attrs, Node, Schema};
use folio::outline::{extract_outline, OutlineConfig, OutlineRenderer, OutlineTracker};
use folio::plugin::DocumentPlugin;

#[test]
fn test_extract_reads_only_top_level_headings() {
    let d = doc(vec![
        h(1, "title", "Title"),
        p("intro"),
        Node::block("blockquote", vec![h(2, "nested", "Nested")]),
        h(2, "section", "Section"),
    ]);
    let state = extract_outline(&d, "heading");
    let ids: Vec<_> = state.headings.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["title", "section"]);
    assert_eq!(state.levels, vec![1, 2]);
}

#[test]
fn test_custom_heading_type() {
    let mut attrs = Attrs::new();
    attrs.insert("level".into(), 1.into());
    attrs.insert("id".into(), "t".into());
    let title = Node::textblock("title", attrs, vec![Node::text("Doc")]);
    let d = doc(vec![title, h(1, "x", "Heading")]);

    let tracker = OutlineTracker::new(OutlineConfig {
        node_type: "title".to_string(),
        ..OutlineConfig::default()
    });
    let state = tracker.extract(&d);
    assert_eq!(state.headings.len(), 1);
    assert_eq!(state.headings[0].text, "Doc");
}

#[test]
fn test_indent_tiers_follow_sorted_levels() {
    let d = doc(vec![h(2, "a", "A"), h(4, "b", "B"), h(2, "c", "C")]);
    let state = extract_outline(&d, "heading");
    assert_eq!(state.sorted_levels(), vec![2, 4]);

    let tiers: Vec<_> = OutlineRenderer::layout(&state)
        .iter()
        .map(|r| r.indent_tier)
        .collect();
    assert_eq!(tiers, vec![1, 2, 1]);
}

#[test]
fn test_collapsible_headings() {
    let d = doc(vec![h(1, "a", "A"), h(2, "b", "B"), h(1, "c", "C")]);
    let state = extract_outline(&d, "heading");
    let collapsible: Vec<_> = OutlineRenderer::layout(&state)
        .iter()
        .map(|r| r.collapsible)
        .collect();
    assert_eq!(collapsible, vec![false, true, false]);
}

#[test]
fn test_panel_items_carry_click_messages() {
    let d = doc(vec![h(2, "a", "A"), h(1, "b", "B")]);
    let mut renderer = OutlineRenderer::new("Contents");
    let panel = renderer.render(&extract_outline(&d, "heading"));

    let folds = panel.find_by_class("outline-fold");
    assert_eq!(folds.len(), 1);
    assert_eq!(
        folds[0].on_click,
        Some(Msg::Outline(OutlineMsg::ToggleFold { id: "a".into() }))
    );

    let texts = panel.find_by_class("outline-text");
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[1].text.as_deref(), Some("B"));
    assert_eq!(
        texts[1].on_click,
        Some(Msg::Outline(OutlineMsg::JumpToHeading { id: "b".into() }))
    );

    assert_eq!(panel.find_by_class("outline-title")[0].text.as_deref(), Some("Contents"));
}

#[test]
fn test_rerender_unchanged_headings_is_stable() {
    let d = doc(vec![h(1, "a", "A"), p("body"), h(2, "b", "B")]);
    let state = extract_outline(&d, "heading");
    let mut renderer = OutlineRenderer::new("Outline");

    renderer.render(&state);
    let before: Vec<_> = ["a", "b"].iter().map(|id| renderer.record(id).cloned()).collect();

    renderer.render(&state);
    let after: Vec<_> = ["a", "b"].iter().map(|id| renderer.record(id).cloned()).collect();

    assert_eq!(before, after);
    assert!(renderer.last_diff().is_clean());
    assert_eq!(renderer.last_diff().unchanged, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_edited_heading_is_reported_changed() {
    let mut renderer = OutlineRenderer::new("Outline");
    let before = doc(vec![h(1, "a", "A"), h(2, "b", "B")]);
    renderer.render(&extract_outline(&before, "heading"));

    let after = doc(vec![h(1, "a", "A"), h(2, "b", "Better")]);
    renderer.render(&extract_outline(&after, "heading"));

    assert_eq!(renderer.last_diff().changed, vec!["b".to_string()]);
    assert_eq!(renderer.last_diff().unchanged, vec!["a".to_string()]);
    assert_eq!(renderer.record("b").map(|r| r.text.as_str()), Some("Better"));
}

#[test]
fn test_tracker_overlay_is_side_panel() {
    let d = doc(vec![h(1, "a", "A")]);
    let mut tracker = OutlineTracker::new(OutlineConfig::default());
    tracker.init(&d);

    let overlays = tracker.overlays();
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].anchor, folio::overlay::OverlayAnchor::SidePanel);
    assert_eq!(overlays[0].element.find_by_class("outline-item").len(), 1);
}

#[test]
fn test_new_heading_in_reloaded_document_renders_stably() {
    let schema = Schema::default();
    let saved = r#"{ "type": "doc", "content": [
        { "type": "heading", "attrs": { "level": 1, "id": "heading-1" },
          "content": [{ "type": "text", "text": "A" }] },
        { "type": "heading", "attrs": { "level": 2, "id": "heading-2" },
          "content": [{ "type": "text", "text": "B" }] }
    ] }"#;
    let d = schema.from_json(saved).unwrap();

    let mut attrs = Attrs::new();
    attrs.insert("level".into(), 1.into());
    let heading = schema
        .node_in(&d, "heading", attrs, vec![Node::text("C")])
        .unwrap();
    let d = d.insert_nodes(d.content_size(), vec![heading]).unwrap();

    let state = extract_outline(&d, "heading");
    let ids: Vec<_> = state.headings.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert!(!ids[2].is_empty() && ids[2] != "heading-1" && ids[2] != "heading-2");

    let mut renderer = OutlineRenderer::new("Outline");
    renderer.render(&state);
    renderer.render(&state);
    assert!(renderer.last_diff().is_clean(), "{:?}", renderer.last_diff());
}

#[test]
fn test_duplicate_ids_render_stably() {
    let d = doc(vec![h(1, "a", "A"), h(2, "a", "Copy"), h(2, "b", "B")]);
    let state = extract_outline(&d, "heading");
    assert_eq!(state.headings.len(), 2);

    let mut renderer = OutlineRenderer::new("Outline");
    renderer.render(&state);
    let panel = renderer.render(&state);
    assert!(renderer.last_diff().is_clean());
    assert_eq!(panel.find_by_class("outline-item").len(), 2);
    assert_eq!(renderer.record("a").map(|r| r.text.as_str()), Some("A"));
}
