// ABOUTME: Chat message record and its stable identifier
// ABOUTME: Optional fields fill in as detection, translation and summarization complete

use crate::language::{Detection, Language};
use chrono::{DateTime, Local};
use std::fmt;

/// Messages longer than this many characters may be summarized.
pub const SUMMARY_MIN_CHARS: usize = 150;

/// Stable identifier assigned when a message is appended.
/// Equal to the insertion index since the store never deletes or reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(usize);

impl MessageId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completed translation together with the target it was produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub target: Language,
}

/// One user-submitted chat message.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub detected_language: Option<Detection>,
    pub target_language: Option<Language>,
    pub translation: Option<Translation>,
    pub summary: Option<String>,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub(crate) fn new(id: MessageId, text: String) -> Self {
        Self {
            id,
            text,
            detected_language: None,
            target_language: None,
            translation: None,
            summary: None,
            created_at: Local::now(),
        }
    }

    /// Timestamp as shown on every bubble, e.g. "09:41 AM".
    pub fn display_time(&self) -> String {
        self.created_at.format("%I:%M %p").to_string()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Long English messages without a summary may be summarized.
    /// Does not account for a summary already in flight; see `Pipeline::can_summarize`.
    pub fn summary_eligible(&self) -> bool {
        self.char_count() > SUMMARY_MIN_CHARS
            && self
                .detected_language
                .as_ref()
                .is_some_and(|d| d.is(Language::English))
            && self.summary.is_none()
    }

    /// Source language for translation requests, falling back to English.
    pub fn translation_source(&self) -> &str {
        self.detected_language
            .as_ref()
            .and_then(Detection::source_code)
            .unwrap_or(crate::language::DEFAULT_LANGUAGE.code())
    }
}
