//! Document model - the tree the editor core hands to every plugin
//!
//! Each edit produces a new [`Node`] tree; nothing is mutated in place. Plugins
//! only ever read documents and, as gatekeepers, the pending [`Transaction`].

mod node;
mod schema;
mod transaction;

pub use node::{Attrs, Node, NodeRole};
pub use schema::Schema;
pub use transaction::{Step, Transaction};

use thiserror::Error;

/// Errors raised by document operations and document loading
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Position does not point into a node that can take the operation
    #[error("position {pos} is not valid in content of size {size}")]
    InvalidPosition { pos: usize, size: usize },

    /// Range is reversed or extends past the content
    #[error("range {from}..{to} is not valid in content of size {size}")]
    InvalidRange { from: usize, to: usize, size: usize },

    /// A node was placed where its role does not fit
    #[error("node '{child}' cannot be placed inside '{parent}'")]
    SchemaViolation { parent: String, child: String },

    /// The schema has no role for this node type
    #[error("unknown node type '{0}'")]
    UnknownNodeType(String),

    /// Text node without a `text` field
    #[error("text node is missing its text")]
    MissingText,

    /// Malformed document JSON
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}
