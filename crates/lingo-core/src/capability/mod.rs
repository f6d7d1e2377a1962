// ABOUTME: Capability contract between the pipeline and host-provided AI services
// ABOUTME: Detection, translation and summarization, each independently optional

mod command;

pub use command::{CommandProvider, CommandSpec};

use crate::error::CapabilityError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub type CapabilityResult<T> = std::result::Result<T, CapabilityError>;

/// The three services a host may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Detection,
    Translation,
    Summarization,
}

impl Capability {
    /// Name used in "... is not available." notices.
    pub fn service_name(self) -> &'static str {
        match self {
            Capability::Detection => "Language detector",
            Capability::Translation => "Translator",
            Capability::Summarization => "Summarizer",
        }
    }

    pub fn failure_notice(self) -> &'static str {
        match self {
            Capability::Detection => "Error detecting language. Please try again.",
            Capability::Translation => "Error translating message. Please try again.",
            Capability::Summarization => "Error summarizing message. Please try again.",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Detection => "detection",
            Capability::Translation => "translation",
            Capability::Summarization => "summarization",
        })
    }
}

/// One language guess, ordered best-first by the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionCandidate {
    pub language_code: String,
    pub confidence: f32,
}

impl DetectionCandidate {
    pub fn new(language_code: impl Into<String>, confidence: f32) -> Self {
        Self {
            language_code: language_code.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    pub source_language: String,
    pub target_language: String,
}

/// Summarizer policy. Summaries are always a medium-length plain-text tl;dr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerOptions {
    pub kind: &'static str,
    pub format: &'static str,
    pub length: &'static str,
}

impl SummarizerOptions {
    pub const TLDR: Self = Self {
        kind: "tl;dr",
        format: "plain-text",
        length: "medium",
    };
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self::TLDR
    }
}

#[async_trait]
pub trait DetectorHandle: Send + Sync {
    /// Candidates best-first. An empty list means detection was inconclusive.
    async fn detect(&self, text: &str) -> CapabilityResult<Vec<DetectionCandidate>>;
}

#[async_trait]
pub trait TranslatorHandle: Send + Sync {
    async fn translate(&self, text: &str) -> CapabilityResult<String>;
}

#[async_trait]
pub trait SummarizerHandle: Send + Sync {
    async fn summarize(&self, text: &str) -> CapabilityResult<String>;
}

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn create(&self) -> CapabilityResult<Box<dyn DetectorHandle>>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn create(
        &self,
        options: TranslatorOptions,
    ) -> CapabilityResult<Box<dyn TranslatorHandle>>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn create(
        &self,
        options: SummarizerOptions,
    ) -> CapabilityResult<Box<dyn SummarizerHandle>>;
}

/// Which capabilities the host currently exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    pub detection: bool,
    pub translation: bool,
    pub summarization: bool,
}

impl Availability {
    /// Chat processing needs at least detection and translation.
    pub fn is_supported(&self) -> bool {
        self.detection && self.translation
    }
}

/// Host-supplied set of services. Each accessor is re-queried before every call
/// so a capability can appear or disappear independently of the others.
pub trait CapabilityProvider: Send + Sync {
    fn language_detector(&self) -> Option<Arc<dyn LanguageDetector>>;

    fn translator(&self) -> Option<Arc<dyn Translator>>;

    fn summarizer(&self) -> Option<Arc<dyn Summarizer>>;

    fn availability(&self) -> Availability {
        Availability {
            detection: self.language_detector().is_some(),
            translation: self.translator().is_some(),
            summarization: self.summarizer().is_some(),
        }
    }
}

/// Provider for environments with no AI services at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapabilities;

impl CapabilityProvider for NoCapabilities {
    fn language_detector(&self) -> Option<Arc<dyn LanguageDetector>> {
        None
    }

    fn translator(&self) -> Option<Arc<dyn Translator>> {
        None
    }

    fn summarizer(&self) -> Option<Arc<dyn Summarizer>> {
        None
    }
}
