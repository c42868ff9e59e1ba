//! Plugin lifecycle tests through the editor host

mod common;

use common::{doc, h, p, test_editor};
use folio::limit::{LimitDecision, LimitGuard, RejectReason};
use folio::messages::{Msg, OutlineMsg};
use folio::outline::OutlineTracker;
use folio::overlay::OverlayAnchor;
use folio::DispatchOutcome;

#[test]
fn test_plugins_initialize_from_starting_document() {
    let editor = test_editor(doc(vec![h(1, "a", "Title"), p("two words")]), Some(100));

    let guard = editor.plugin::<LimitGuard>().unwrap();
    assert_eq!(guard.state().characters, "Title two words".len());
    assert_eq!(guard.state().words, 3);

    let tracker = editor.plugin::<OutlineTracker>().unwrap();
    assert_eq!(tracker.state().headings.len(), 1);
}

#[test]
fn test_accepted_edit_updates_every_plugin() {
    let mut editor = test_editor(doc(vec![p("body")]), Some(100));

    let mut tr = editor.transaction();
    tr.insert_nodes(0, vec![h(2, "new", "Fresh")]).unwrap();
    assert_eq!(editor.dispatch(tr), DispatchOutcome::Applied);

    assert_eq!(editor.doc().child_count(), 2);
    let guard = editor.plugin::<LimitGuard>().unwrap();
    assert_eq!(guard.state().characters, "Fresh body".len());
    let tracker = editor.plugin::<OutlineTracker>().unwrap();
    assert_eq!(tracker.state().headings[0].id, "new");
}

#[test]
fn test_rejected_edit_leaves_document_and_state() {
    let mut editor = test_editor(doc(vec![h(1, "a", "Title"), p("12345")]), Some(12));
    let before = editor.doc().clone();

    let mut tr = editor.transaction();
    // end of "12345": heading spans 0..7, paragraph text 8..13
    tr.insert_text(13, "678").unwrap();
    assert_eq!(
        editor.dispatch(tr),
        DispatchOutcome::Rejected {
            plugin: "character-count"
        }
    );

    assert_eq!(editor.doc(), &before);
    let guard = editor.plugin::<LimitGuard>().unwrap();
    assert_eq!(guard.state().characters, 11);
    assert_eq!(
        guard.last_decision(),
        Some(LimitDecision::Reject(RejectReason::TypedPastLimit))
    );
}

#[test]
fn test_trimmed_paste_is_committed_trimmed() {
    let mut editor = test_editor(doc(vec![p("abcdefgh")]), Some(10));

    let mut tr = editor.transaction();
    tr.insert_text(9, "1234567").unwrap();
    tr.set_paste(true);
    assert_eq!(editor.dispatch(tr), DispatchOutcome::Applied);

    assert_eq!(editor.doc().text_content(), "abcdefgh12");
    assert_eq!(editor.selection_head(), 11);
    let guard = editor.plugin::<LimitGuard>().unwrap();
    assert_eq!(guard.state().characters, 10);
    assert_eq!(guard.last_decision(), Some(LimitDecision::AcceptTrimmed { removed: 5 }));
}

#[test]
fn test_overlays_from_both_plugins() {
    let mut editor = test_editor(doc(vec![h(1, "a", "Title"), p("body")]), Some(50));
    let overlays = editor.overlays();
    assert_eq!(overlays.len(), 2);

    let counter = overlays.iter().find(|o| o.key == "character-count").unwrap();
    assert_eq!(counter.anchor, OverlayAnchor::DocumentEnd);
    assert_eq!(counter.position(editor.doc()), editor.doc().content_size());
    assert_eq!(counter.element.text.as_deref(), Some("10/50 Characters"));

    let panel = overlays.iter().find(|o| o.key == "outline").unwrap();
    assert_eq!(panel.anchor, OverlayAnchor::SidePanel);
}

#[test]
fn test_overlays_do_not_touch_the_document() {
    let mut editor = test_editor(doc(vec![h(1, "a", "Title")]), None);
    let before = editor.doc().clone();
    editor.overlays();
    editor.overlays();
    assert_eq!(editor.doc(), &before);
}

#[test]
fn test_clicks_leave_the_document_alone() {
    let mut editor = test_editor(doc(vec![h(1, "a", "Title")]), None);
    let before = editor.doc().clone();
    editor.click(Msg::Outline(OutlineMsg::ToggleFold { id: "a".into() }));
    editor.click(Msg::Outline(OutlineMsg::JumpToHeading { id: "missing".into() }));
    assert_eq!(editor.doc(), &before);
}
