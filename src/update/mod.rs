//! Update functions for the Elm-style architecture
//!
//! Messages raised by overlay interactions flow through here.

mod outline;

use crate::editor::Editor;
use crate::messages::Msg;

pub use outline::update_outline;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with a tracing span.
#[inline]
pub fn update(editor: &mut Editor, msg: Msg) {
    #[cfg(debug_assertions)]
    let _span = tracing::span!(tracing::Level::DEBUG, "update", msg = ?msg).entered();

    match msg {
        Msg::Outline(m) => update_outline(editor, m),
    }
}
