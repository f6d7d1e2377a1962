// ABOUTME: Chat history rendering
// ABOUTME: Each message shows its text, detected language, translation, summary and summarize hint

use crate::app::App;
use lingo_core::Message;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const INDENT: &str = "           ";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = vec![];

    for message in &app.messages {
        lines.extend(message_lines(app, message));
        lines.push(Line::default());
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Start typing to chat...",
            Style::default().dim(),
        )));
    }

    let actual_scroll = scroll_position(lines.len(), area.height, app.scroll_offset);
    let para = Paragraph::new(lines).scroll((actual_scroll, 0));
    f.render_widget(para, area);
}

/// Top row to show. An offset of 0 means "show newest", higher values scroll up.
fn scroll_position(total_lines: usize, height: u16, offset: usize) -> u16 {
    let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    total.saturating_sub(height).saturating_sub(offset)
}

fn message_lines<'a>(app: &App, message: &'a Message) -> Vec<Line<'a>> {
    let mut lines = vec![];
    let selected = app.selected == Some(message.id);
    let bg = if selected {
        Style::default().bg(Color::Rgb(40, 40, 40))
    } else {
        Style::default()
    };
    let marker = if selected { "▶ " } else { "❯ " };

    let mut text_lines = message.text.lines();
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", message.display_time()), bg.dim()),
        Span::styled(marker, bg.bold()),
        Span::styled(text_lines.next().unwrap_or(""), bg),
    ]));
    for line in text_lines {
        lines.push(Line::from(Span::styled(format!("{INDENT}{line}"), bg)));
    }

    if let Some(detected) = &message.detected_language {
        lines.push(Line::from(Span::styled(
            format!("{INDENT}Language: {}", detected.display_name()),
            Style::default().dim(),
        )));
    }

    if let Some(translation) = &message.translation {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{INDENT}{}: ", translation.target.display_name()),
                Style::default().cyan(),
            ),
            Span::raw(translation.text.as_str()),
        ]));
    } else if let Some(target) = message.target_language {
        lines.push(Line::from(Span::styled(
            format!("{INDENT}Translate to {} with Ctrl+T", target.display_name()),
            Style::default().dim(),
        )));
    }

    if let Some(summary) = &message.summary {
        lines.push(Line::from(vec![
            Span::styled(format!("{INDENT}Summary: "), Style::default().green()),
            Span::raw(summary.as_str()),
        ]));
    } else if app.summarizing.contains(&message.id) {
        lines.push(Line::from(Span::styled(
            format!("{INDENT}{} Summarizing...", app.throbber_char()),
            Style::default().green(),
        )));
    } else if app.can_summarize(message) {
        lines.push(Line::from(Span::styled(
            format!("{INDENT}Summarize with Ctrl+S"),
            Style::default().dim(),
        )));
    }

    lines
}
