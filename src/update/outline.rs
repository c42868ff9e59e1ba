//! Outline panel update handlers

use crate::editor::Editor;
use crate::messages::OutlineMsg;

/// Position of the top-level heading with `id`, if it is still in the document
fn heading_position(editor: &Editor, id: &str) -> Option<usize> {
    let mut pos = 0;
    for child in editor.doc().content() {
        if child.attr("id").and_then(|v| v.as_str()) == Some(id) {
            return Some(pos);
        }
        pos += child.node_size();
    }
    None
}

/// Handle outline panel messages
///
/// Folding and jumping are not wired to the view yet; both are recorded in the
/// log together with where the heading currently sits.
pub fn update_outline(editor: &mut Editor, msg: OutlineMsg) {
    match msg {
        OutlineMsg::ToggleFold { id } => {
            let pos = heading_position(editor, &id);
            tracing::info!(id = %id, ?pos, "outline fold indicator clicked");
        }

        OutlineMsg::JumpToHeading { id } => match heading_position(editor, &id) {
            Some(pos) => tracing::info!(id = %id, pos, "outline heading clicked"),
            None => tracing::debug!(id = %id, "outline heading clicked but no longer present"),
        },
    }
}
