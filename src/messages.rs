//! Message types for the Elm-style architecture
//!
//! Overlay elements carry these as click handlers; the host routes them to
//! [`crate::update::update`].

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Outline(OutlineMsg),
}

/// Outline panel interactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineMsg {
    /// Fold indicator clicked on the heading with this id
    ToggleFold { id: String },
    /// Heading text clicked
    JumpToHeading { id: String },
}
