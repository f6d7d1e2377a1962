// ABOUTME: Central chat state and key handling
// ABOUTME: Mirrors pipeline snapshots for rendering; user intents come back out as Actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lingo_core::{Language, Message, MessageId, Notice, Pipeline};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tui_textarea::TextArea;

const DOUBLE_TAP: Duration = Duration::from_millis(500);
const PAGE: usize = 10;
const MAX_SCROLL: usize = u16::MAX as usize;

/// Intents that need the pipeline (returned from handle_key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit(String),
    SelectLanguage(MessageId, Language),
    Translate(MessageId),
    Summarize(MessageId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chat,
    /// Choosing a target language for the selected message
    Picker,
}

pub struct App {
    pub mode: Mode,

    // Pipeline snapshot
    pub messages: Vec<Message>,
    pub translating: bool,
    pub summarizing: HashSet<MessageId>,
    pub notice: Option<Notice>,
    pub supported: bool,

    // View state
    pub selected: Option<MessageId>,
    pub scroll_offset: usize,
    pub input: TextArea<'static>,
    pub picker_index: usize,

    pub last_ctrl_c: Option<Instant>,
    pub throbber_frame: usize,
}

impl App {
    pub fn new(supported: bool) -> Self {
        Self {
            mode: Mode::Chat,
            messages: vec![],
            translating: false,
            summarizing: HashSet::new(),
            notice: None,
            supported,
            selected: None,
            scroll_offset: 0,
            input: TextArea::default(),
            picker_index: 0,
            last_ctrl_c: None,
            throbber_frame: 0,
        }
    }

    /// Refresh everything the view shows from the pipeline.
    pub fn sync(&mut self, pipeline: &Pipeline) {
        self.set_messages(pipeline.messages());
        self.translating = pipeline.is_translating();
        self.summarizing = self
            .messages
            .iter()
            .map(|m| m.id)
            .filter(|id| pipeline.is_summarizing(*id))
            .collect();
        self.notice = pipeline.current_notice();
        self.supported = pipeline.is_supported();
    }

    /// Replace the message list. A selection on the newest message follows new arrivals.
    pub fn set_messages(&mut self, messages: Vec<Message>) {
        let following = self
            .selected
            .map_or(true, |id| id.index() + 1 >= self.messages.len());
        self.messages = messages;
        if following {
            self.selected = self.messages.last().map(|m| m.id);
        }
    }

    pub fn selected_message(&self) -> Option<&Message> {
        self.selected.and_then(|id| self.messages.get(id.index()))
    }

    /// Summarize is offered for eligible messages that are not already being summarized.
    pub fn can_summarize(&self, message: &Message) -> bool {
        message.summary_eligible() && !self.summarizing.contains(&message.id)
    }

    pub fn tick(&mut self) {
        self.throbber_frame = (self.throbber_frame + 1) % 8;
    }

    pub fn throbber_char(&self) -> char {
        const THROBBER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
        THROBBER[self.throbber_frame]
    }

    pub fn show_ctrl_c_hint(&self) -> bool {
        self.last_ctrl_c.is_some_and(|t| t.elapsed() < DOUBLE_TAP)
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.input.insert_str(text);
    }

    /// Handle a key event, returning an action if needed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => return Some(Action::Quit),
            KeyCode::Char('c') if ctrl => {
                if self.show_ctrl_c_hint() {
                    return Some(Action::Quit);
                }
                self.last_ctrl_c = Some(Instant::now());
                return None;
            }
            _ => {}
        }

        match self.mode {
            Mode::Picker => self.handle_picker_key(key),
            Mode::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Chat,
            KeyCode::Up => self.picker_index = self.picker_index.saturating_sub(1),
            KeyCode::Down => {
                self.picker_index = (self.picker_index + 1).min(Language::ALL.len() - 1);
            }
            KeyCode::Enter => {
                self.mode = Mode::Chat;
                let id = self.selected?;
                return Some(Action::SelectLanguage(id, Language::ALL[self.picker_index]));
            }
            _ => {}
        }
        None
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            // Message selection
            KeyCode::Up if alt => self.move_selection(-1),
            KeyCode::Down if alt => self.move_selection(1),

            // Per-message actions
            KeyCode::Char('l') if ctrl => self.open_picker(),
            KeyCode::Char('t') if ctrl => {
                // Disabled while any translation is outstanding.
                if !self.translating {
                    return self.selected.map(Action::Translate);
                }
            }
            KeyCode::Char('s') if ctrl => {
                let message = self.selected_message()?;
                if self.can_summarize(message) {
                    return Some(Action::Summarize(message.id));
                }
            }

            // Scroll
            KeyCode::PageUp => {
                self.scroll_offset = (self.scroll_offset + PAGE).min(MAX_SCROLL);
            }
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(PAGE),

            // Submit
            KeyCode::Enter if !key.modifiers.contains(KeyModifiers::SHIFT) => {
                let content = self.input.lines().join("\n");
                if content.trim().is_empty() {
                    return None;
                }
                self.input = TextArea::default();
                self.scroll_offset = 0;
                return Some(Action::Submit(content));
            }

            _ => {
                self.input.input(key);
            }
        }
        None
    }

    fn move_selection(&mut self, delta: isize) {
        if self.messages.is_empty() {
            return;
        }
        let last = self.messages.len() - 1;
        let next = match self.selected {
            Some(id) => id.index().saturating_add_signed(delta).min(last),
            None => last,
        };
        self.selected = Some(MessageId::from_index(next));
    }

    fn open_picker(&mut self) {
        let Some(message) = self.selected_message() else {
            return;
        };
        self.picker_index = message
            .target_language
            .and_then(|current| Language::ALL.iter().position(|l| *l == current))
            .unwrap_or(0);
        self.mode = Mode::Picker;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::NoCapabilities;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn alt(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::ALT)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_with(texts: &[&str]) -> (App, Pipeline) {
        let pipeline = Pipeline::new(Arc::new(NoCapabilities));
        for text in texts {
            pipeline.append(*text);
        }
        let mut app = App::new(false);
        app.sync(&pipeline);
        (app, pipeline)
    }

    #[test]
    fn test_app_new() {
        let app = App::new(true);
        assert_eq!(app.mode, Mode::Chat);
        assert!(app.messages.is_empty());
        assert!(app.selected.is_none());
        assert!(app.supported);
    }

    #[test]
    fn test_throbber_cycles() {
        let mut app = App::new(true);
        let first = app.throbber_char();
        for _ in 0..8 {
            app.tick();
        }
        assert_eq!(app.throbber_char(), first);
    }

    #[test]
    fn test_enter_submits_input_as_typed() {
        let mut app = App::new(true);
        type_text(&mut app, "  hello  ");
        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(action, Some(Action::Submit("  hello  ".to_string())));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_enter_on_blank_input_does_nothing() {
        let mut app = App::new(true);
        type_text(&mut app, "   ");
        assert_eq!(app.handle_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut app = App::new(true);
        type_text(&mut app, "a");
        let action = app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        assert!(action.is_none());
        type_text(&mut app, "b");
        assert_eq!(app.input.lines(), ["a", "b"]);
    }

    #[test]
    fn test_double_ctrl_c_quits() {
        let mut app = App::new(true);
        assert_eq!(app.handle_key(ctrl('c')), None);
        assert!(app.show_ctrl_c_hint());
        assert_eq!(app.handle_key(ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = App::new(true);
        assert_eq!(app.handle_key(ctrl('q')), Some(Action::Quit));
    }

    #[test]
    fn test_selection_follows_newest_message() {
        let (mut app, pipeline) = app_with(&["one", "two"]);
        assert_eq!(app.selected, Some(MessageId::from_index(1)));

        pipeline.append("three");
        app.sync(&pipeline);
        assert_eq!(app.selected, Some(MessageId::from_index(2)));
    }

    #[test]
    fn test_selection_stays_on_older_message() {
        let (mut app, pipeline) = app_with(&["one", "two"]);
        app.handle_key(alt(KeyCode::Up));
        assert_eq!(app.selected, Some(MessageId::from_index(0)));

        pipeline.append("three");
        app.sync(&pipeline);
        assert_eq!(app.selected, Some(MessageId::from_index(0)));
    }

    #[test]
    fn test_selection_is_clamped() {
        let (mut app, _pipeline) = app_with(&["one", "two"]);
        app.handle_key(alt(KeyCode::Down));
        assert_eq!(app.selected, Some(MessageId::from_index(1)));
        for _ in 0..5 {
            app.handle_key(alt(KeyCode::Up));
        }
        assert_eq!(app.selected, Some(MessageId::from_index(0)));
    }

    #[test]
    fn test_picker_selects_language_for_message() {
        let (mut app, _pipeline) = app_with(&["hello"]);
        app.handle_key(ctrl('l'));
        assert_eq!(app.mode, Mode::Picker);
        assert_eq!(app.picker_index, 0);

        app.handle_key(key(KeyCode::Down));
        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            Some(Action::SelectLanguage(
                MessageId::from_index(0),
                Language::ALL[1]
            ))
        );
        assert_eq!(app.mode, Mode::Chat);
    }

    #[test]
    fn test_picker_starts_at_current_target() {
        let (mut app, pipeline) = app_with(&["hello"]);
        pipeline
            .select_target_language(MessageId::from_index(0), "fr")
            .unwrap();
        app.sync(&pipeline);

        app.handle_key(ctrl('l'));
        assert_eq!(Language::ALL[app.picker_index], Language::French);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Chat);
    }

    #[test]
    fn test_picker_needs_a_message() {
        let mut app = App::new(true);
        app.handle_key(ctrl('l'));
        assert_eq!(app.mode, Mode::Chat);
    }

    #[test]
    fn test_translate_disabled_while_translating() {
        let (mut app, _pipeline) = app_with(&["hello"]);
        assert_eq!(
            app.handle_key(ctrl('t')),
            Some(Action::Translate(MessageId::from_index(0)))
        );

        app.translating = true;
        assert_eq!(app.handle_key(ctrl('t')), None);
    }

    #[test]
    fn test_summarize_only_offered_when_eligible() {
        let (mut app, _pipeline) = app_with(&["too short"]);
        assert_eq!(app.handle_key(ctrl('s')), None);
    }

    #[test]
    fn test_page_keys_scroll() {
        let mut app = App::new(true);
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.scroll_offset, 10);
        app.handle_key(key(KeyCode::PageDown));
        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_offset_is_clamped() {
        let mut app = App::new(true);
        for _ in 0..10_000 {
            app.handle_key(key(KeyCode::PageUp));
        }
        assert_eq!(app.scroll_offset, usize::from(u16::MAX));
    }

    #[test]
    fn test_paste_goes_to_input() {
        let mut app = App::new(true);
        app.handle_paste("pasted text");
        assert_eq!(app.input.lines(), ["pasted text"]);
    }
}
