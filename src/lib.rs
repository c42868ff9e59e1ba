//! Folio - document aggregates for rich-text editors
//!
//! This crate provides two plugins that observe an immutable document tree:
//! a character limit that counts and gatekeeps edits, and an outline that
//! tracks top-level headings and renders them as a side panel.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod limit;
pub mod messages;
pub mod model;
pub mod outline;
pub mod overlay;
pub mod plugin;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use config::FolioConfig;
pub use editor::{DispatchOutcome, Editor};
pub use limit::{LimitConfig, LimitDecision, LimitGuard, SizeMode};
pub use messages::Msg;
pub use model::{Node, Schema, Transaction};
pub use outline::{OutlineConfig, OutlineTracker};
pub use plugin::DocumentPlugin;
