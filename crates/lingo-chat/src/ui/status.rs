// ABOUTME: Bottom status bar rendering
// ABOUTME: Shows the active notice, translation progress and keybinds

use crate::app::App;
use lingo_core::NoticeKind;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const KEYBINDS: &str = "│ Alt+↑↓ select │ ^L language │ ^T translate │ ^S summarize │ ^Q quit ";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(status_spans(app));
    let para = Paragraph::new(line).style(Style::default().on_dark_gray());
    f.render_widget(para, area);
}

fn status_spans(app: &App) -> Vec<Span<'static>> {
    let mut spans: Vec<Span> = vec![];

    if app.translating {
        spans.push(Span::styled(
            format!(" {} Translating... ", app.throbber_char()),
            Style::default().cyan(),
        ));
    }

    if let Some(notice) = &app.notice {
        let style = match notice.kind {
            NoticeKind::Validation => Style::default().yellow(),
            NoticeKind::Unavailable | NoticeKind::Failed => Style::default().red(),
        };
        spans.push(Span::styled(format!(" ✗ {} ", notice.text), style));
    } else if app.show_ctrl_c_hint() {
        spans.push(Span::styled(
            " Press Ctrl+C again to quit ",
            Style::default().yellow(),
        ));
    } else if spans.is_empty() {
        spans.push(Span::styled(
            format!(" {} messages ", app.messages.len()),
            Style::default().dim(),
        ));
    }

    spans.push(Span::styled(KEYBINDS, Style::default().dim()));
    spans
}
