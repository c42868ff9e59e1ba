use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::Path;

use folio::cli::{CliArgs, CliCommand};
use folio::config::FolioConfig;
use folio::editor::{DispatchOutcome, Editor};
use folio::limit::LimitGuard;
use folio::model::{Node, Schema};
use folio::outline::{OutlineRenderer, OutlineTracker};

fn load_document(schema: &Schema, path: &Path) -> Result<Node> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    schema
        .from_json(&json)
        .with_context(|| format!("Failed to load document {}", path.display()))
}

fn build_editor(doc: Node, config: &FolioConfig) -> Editor {
    Editor::new(doc)
        .with_plugin(Box::new(LimitGuard::new(config.limit)))
        .with_plugin(Box::new(OutlineTracker::new(config.outline.clone())))
}

fn main() -> Result<()> {
    folio::tracing::init();

    let args = CliArgs::parse();
    let config = args.resolve_config().map_err(|e| anyhow!(e))?;
    let schema = Schema::default();

    match args.command {
        CliCommand::Count { file } => {
            let editor = build_editor(load_document(&schema, &file)?, &config);
            let guard = editor
                .plugin::<LimitGuard>()
                .context("limit plugin missing")?;
            let state = guard.state();
            println!("characters: {}", state.characters);
            println!("words: {}", state.words);
            if let Some(limit) = config.limit.effective_limit() {
                println!("limit: {} ({})", limit, config.limit.mode.label());
            }
        }

        CliCommand::Outline { file, html } => {
            let mut editor = build_editor(load_document(&schema, &file)?, &config);
            if html {
                for overlay in editor.overlays() {
                    if overlay.key == "outline" {
                        println!("{}", overlay.element.to_html());
                    }
                }
            } else {
                let tracker = editor
                    .plugin::<OutlineTracker>()
                    .context("outline plugin missing")?;
                for record in OutlineRenderer::layout(tracker.state()) {
                    let indent = "  ".repeat(record.indent_tier - 1);
                    let fold = if record.collapsible { "▾ " } else { "  " };
                    println!(
                        "{}{}{} (h{}, #{})",
                        indent, fold, record.text, record.level, record.id
                    );
                }
            }
        }

        CliCommand::Insert {
            file,
            at,
            text,
            paste,
            print,
        } => {
            let mut editor = build_editor(load_document(&schema, &file)?, &config);
            let mut tr = editor.transaction();
            tr.insert_text(at, &text)
                .with_context(|| format!("Cannot insert at position {}", at))?;
            tr.set_paste(paste);

            let outcome = editor.dispatch(tr);
            let guard = editor
                .plugin::<LimitGuard>()
                .context("limit plugin missing")?;
            match outcome {
                DispatchOutcome::Applied => println!("applied: {:?}", guard.last_decision()),
                DispatchOutcome::Rejected { plugin } => {
                    println!("rejected by {}: {:?}", plugin, guard.last_decision())
                }
            }
            println!("characters: {}", guard.state().characters);
            if print {
                println!("{}", serde_json::to_string_pretty(&Schema::to_json(editor.doc()))?);
            }
        }
    }

    Ok(())
}
