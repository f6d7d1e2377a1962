// ABOUTME: Target language picker overlay
// ABOUTME: Centered modal listing every supported language

use super::centered_rect;
use crate::app::App;
use lingo_core::Language;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let current = app.selected_message().and_then(|m| m.target_language);
    let items: Vec<ListItem> = Language::ALL
        .iter()
        .map(|language| {
            let marker = if Some(*language) == current { "●" } else { " " };
            ListItem::new(format!(
                " {} {} ({})",
                marker,
                language.display_name(),
                language.code()
            ))
        })
        .collect();

    let title = match app.selected {
        Some(id) => format!(" Translate to (message {id}) "),
        None => " Translate to ".to_string(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().cyan())
                .title(title),
        )
        .highlight_style(Style::default().reversed());

    let mut state = ListState::default().with_selected(Some(app.picker_index));
    f.render_stateful_widget(list, area, &mut state);
}
