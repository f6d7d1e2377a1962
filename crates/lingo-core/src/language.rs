// ABOUTME: Supported translation languages and detection results
// ABOUTME: Fixed code-to-name table plus the "Unknown" sentinel for inconclusive detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal shown when detection returned no candidates.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Source language assumed when detection never produced a usable code.
pub const DEFAULT_LANGUAGE: Language = Language::English;

/// A language that may be offered as a translation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    ChineseSimplified,
    ChineseTraditional,
    Japanese,
    Portuguese,
    Russian,
    Spanish,
    Turkish,
    Hindi,
    Vietnamese,
    Bengali,
    French,
}

impl Language {
    /// Every supported language, in the order they are offered.
    pub const ALL: [Language; 12] = [
        Language::English,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
        Language::Japanese,
        Language::Portuguese,
        Language::Russian,
        Language::Spanish,
        Language::Turkish,
        Language::Hindi,
        Language::Vietnamese,
        Language::Bengali,
        Language::French,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::ChineseSimplified => "zh",
            Language::ChineseTraditional => "zh-Hant",
            Language::Japanese => "ja",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Spanish => "es",
            Language::Turkish => "tr",
            Language::Hindi => "hi",
            Language::Vietnamese => "vi",
            Language::Bengali => "bn",
            Language::French => "fr",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::ChineseSimplified => "Mandarin Chinese (Simplified)",
            Language::ChineseTraditional => "Taiwanese Mandarin (Traditional)",
            Language::Japanese => "Japanese",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Spanish => "Spanish",
            Language::Turkish => "Turkish",
            Language::Hindi => "Hindi",
            Language::Vietnamese => "Vietnamese",
            Language::Bengali => "Bengali",
            Language::French => "French",
        }
    }

    /// Parse an exact language code. Codes are case-sensitive ("zh-Hant").
    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::from_code(&value).ok_or_else(|| format!("unsupported language code: {value}"))
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.code().to_string()
    }
}

/// Display name for any code a detector may return, falling back to the code itself.
pub fn display_name_for(code: &str) -> &str {
    Language::from_code(code)
        .map(Language::display_name)
        .unwrap_or(code)
}

/// Outcome of a completed detection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Best candidate's code. May be outside the supported set.
    Language(String),
    /// The detector returned zero candidates.
    Inconclusive,
}

impl Detection {
    pub fn as_str(&self) -> &str {
        match self {
            Detection::Language(code) => code,
            Detection::Inconclusive => UNKNOWN_LANGUAGE,
        }
    }

    pub fn is(&self, language: Language) -> bool {
        matches!(self, Detection::Language(code) if code == language.code())
    }

    /// Code usable as a translation source, if detection produced one.
    pub fn source_code(&self) -> Option<&str> {
        match self {
            Detection::Language(code) => Some(code),
            Detection::Inconclusive => None,
        }
    }

    /// Human-readable annotation for the message bubble.
    pub fn display_name(&self) -> &str {
        display_name_for(self.as_str())
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_roundtrips_every_language() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert_eq!(
            Language::from_code("zh-Hant"),
            Some(Language::ChineseTraditional)
        );
        assert_eq!(Language::from_code("zh-hant"), None);
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name_for("fr"), "French");
        assert_eq!(display_name_for("de"), "de");
        assert_eq!(display_name_for(UNKNOWN_LANGUAGE), "Unknown");
    }

    #[test]
    fn test_detection_sentinel() {
        assert_eq!(Detection::Inconclusive.as_str(), "Unknown");
        assert_eq!(Detection::Inconclusive.source_code(), None);
        assert!(!Detection::Inconclusive.is(Language::English));
    }

    #[test]
    fn test_detection_language() {
        let detection = Detection::Language("en".to_string());
        assert!(detection.is(Language::English));
        assert_eq!(detection.source_code(), Some("en"));
        assert_eq!(detection.display_name(), "English");
    }

    #[test]
    fn test_language_deserializes_from_code() {
        let lang: Language = parse_toml_language("\"zh-Hant\"");
        assert_eq!(lang, Language::ChineseTraditional);
    }

    fn parse_toml_language(raw: &str) -> Language {
        #[derive(Deserialize)]
        struct Wrapper {
            lang: Language,
        }
        let wrapper: Wrapper = toml::from_str(&format!("lang = {raw}")).unwrap();
        wrapper.lang
    }
}
