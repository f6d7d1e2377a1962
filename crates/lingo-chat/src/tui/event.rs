// ABOUTME: Terminal input events as an async stream.
// ABOUTME: A blocking poll loop feeds key, paste, resize and tick events into a channel.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Tick,
}

impl TuiEvent {
    fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            // Windows reports releases too; only presses drive the app.
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TuiEvent::Key(key)),
            Event::Paste(text) => Some(TuiEvent::Paste(text)),
            Event::Resize(w, h) => Some(TuiEvent::Resize(w, h)),
            _ => None,
        }
    }
}

pub struct EventStream {
    rx: UnboundedReceiverStream<TuiEvent>,
}

impl EventStream {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::task::spawn_blocking(move || loop {
            let next = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(evt) => TuiEvent::from_crossterm(evt),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read terminal event");
                        None
                    }
                }
            } else {
                Some(TuiEvent::Tick)
            };

            if let Some(e) = next {
                if tx.send(e).is_err() {
                    break;
                }
            }
        });

        Self {
            rx: UnboundedReceiverStream::new(rx),
        }
    }
}

impl Stream for EventStream {
    type Item = TuiEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}
