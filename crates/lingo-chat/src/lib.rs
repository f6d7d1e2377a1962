// ABOUTME: Library interface for lingo-chat.
// ABOUTME: Exposes the TUI runner and the scripting subcommands.

mod app;
pub mod cli;
pub mod error;
mod run;
mod tui;
mod ui;

use lingo_core::{Config, Pipeline};
use std::sync::Arc;

/// Build a pipeline wired to the helper commands named in `config`.
pub fn pipeline_from(config: &Config) -> Arc<Pipeline> {
    Arc::new(Pipeline::with_config(
        Arc::new(config.provider()),
        config.pipeline_config(),
    ))
}

/// Run the TUI chat interface.
///
/// Takes over the terminal until the user quits.
pub async fn run_chat(config: &Config) -> error::Result<()> {
    let pipeline = pipeline_from(config);
    let availability = pipeline.availability();
    tracing::info!(?availability, "Starting chat");

    let mut tui = tui::Tui::new()?;
    run::run(&mut tui, pipeline).await
}
