//! Command-line argument parsing
//!
//! Supports:
//! - Counting characters and words of a document
//! - Printing the outline of a document
//! - Trying an insertion against the character limit

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::FolioConfig;
use crate::limit::SizeMode;

/// Document aggregates for rich-text documents
#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Character limits and outlines for rich-text documents")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/folio/config.yaml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the character limit (0 disables it)
    #[arg(long, value_name = "N", global = true)]
    pub limit: Option<i64>,

    /// Override how characters are measured
    #[arg(long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print character and word counts
    Count {
        /// Document JSON file
        file: PathBuf,
    },
    /// Print the heading outline
    Outline {
        /// Document JSON file
        file: PathBuf,
        /// Print the rendered panel markup instead of an indented list
        #[arg(long)]
        html: bool,
    },
    /// Insert text and report whether the limit lets it through
    Insert {
        /// Document JSON file
        file: PathBuf,
        /// Document position to insert at
        #[arg(long, value_name = "POS")]
        at: usize,
        /// Text to insert
        #[arg(long)]
        text: String,
        /// Treat the insertion as a paste (overflow is trimmed instead of rejected)
        #[arg(long)]
        paste: bool,
        /// Print the resulting document JSON
        #[arg(long)]
        print: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    TextSize,
    NodeSize,
}

impl From<ModeArg> for SizeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TextSize => SizeMode::TextSize,
            ModeArg::NodeSize => SizeMode::NodeSize,
        }
    }
}

impl CliArgs {
    /// Resolve the effective configuration: file (or default location), then flags
    pub fn resolve_config(&self) -> Result<FolioConfig, String> {
        let mut config = match &self.config {
            Some(path) => FolioConfig::load_from(path)?,
            None => FolioConfig::load(),
        };
        if let Some(limit) = self.limit {
            config.limit.limit = Some(limit);
        }
        if let Some(mode) = self.mode {
            config.limit.mode = mode.into();
        }
        Ok(config)
    }
}
