// ABOUTME: Event loop for the chat TUI.
// ABOUTME: Redraws on pipeline and terminal events; spawns pipeline work so the UI never blocks.

use std::sync::Arc;

use lingo_core::Pipeline;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::app::{Action, App};
use crate::error::{AppError, Result};
use crate::tui::event::TuiEvent;
use crate::tui::Tui;
use crate::ui;

pub async fn run(tui: &mut Tui, pipeline: Arc<Pipeline>) -> Result<()> {
    let mut app = App::new(pipeline.is_supported());
    app.sync(&pipeline);

    let mut pipeline_events = BroadcastStream::new(pipeline.subscribe());
    let mut tui_events = tui.event_stream();

    loop {
        tui.terminal_mut().draw(|f| ui::render(f, &app))?;

        tokio::select! {
            Some(event) = pipeline_events.next() => {
                // A lagged receiver only means we skipped intermediate states.
                if let Ok(event) = event {
                    tracing::trace!(?event, "Pipeline event");
                }
                app.sync(&pipeline);
            }
            event = tui_events.next() => {
                let Some(event) = event else {
                    return Err(AppError::Terminal("input stream closed".to_string()));
                };
                match event {
                    TuiEvent::Key(key) => {
                        if let Some(action) = app.handle_key(key) {
                            if !dispatch(&pipeline, action) {
                                break;
                            }
                            app.sync(&pipeline);
                        }
                    }
                    TuiEvent::Paste(text) => app.handle_paste(&text),
                    TuiEvent::Resize(..) => {}
                    TuiEvent::Tick => {
                        app.tick();
                        // Notices expire on their own; ticks pick that up.
                        app.sync(&pipeline);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Hand an action to the pipeline. Returns false when the app should quit.
fn dispatch(pipeline: &Arc<Pipeline>, action: Action) -> bool {
    match action {
        Action::Quit => return false,
        Action::Submit(text) => {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                pipeline.submit(text).await;
            });
        }
        Action::SelectLanguage(id, language) => {
            // Failures are already on the notice board.
            let _ = pipeline.select_target_language(id, language.code());
        }
        Action::Translate(id) => {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                let _ = pipeline.translate_selected(id).await;
            });
        }
        Action::Summarize(id) => {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                let _ = pipeline.request_summary(id).await;
            });
        }
    }
    true
}
