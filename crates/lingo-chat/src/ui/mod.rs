// ABOUTME: UI rendering module for the chat TUI
// ABOUTME: Dispatches rendering to widget modules

mod chat;
mod input;
mod picker;
mod status;

use crate::app::{App, Mode};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const UNSUPPORTED_BANNER: &str = "AI capabilities are not supported in this environment.";

/// Create a centered rect using percentages of the parent rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

pub fn render(f: &mut Frame, app: &App) {
    let banner_height = if app.supported { 0 } else { 1 };
    let chunks = Layout::vertical([
        Constraint::Length(banner_height), // Unsupported banner
        Constraint::Min(1),                // Chat area
        Constraint::Length(4),             // Input area
        Constraint::Length(1),             // Status bar
    ])
    .split(f.area());

    if !app.supported {
        let banner = Paragraph::new(Line::from(Span::styled(
            format!(" {UNSUPPORTED_BANNER} "),
            Style::default().bold(),
        )))
        .style(Style::default().on_red());
        f.render_widget(banner, chunks[0]);
    }

    chat::render(f, chunks[1], app);
    input::render(f, chunks[2], app);
    status::render(f, chunks[3], app);

    if app.mode == Mode::Picker {
        picker::render(f, app);
    }
}
