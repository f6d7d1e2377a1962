// ABOUTME: Pipeline controller that runs detection, translation and summarization for chat messages
// ABOUTME: Enforces preconditions, applies results by MessageId, and turns failures into notices

use crate::capability::{
    Availability, Capability, CapabilityProvider, SummarizerOptions, TranslatorOptions,
};
use crate::error::{CapabilityError, PipelineError};
use crate::language::{Detection, Language};
use crate::message::{Message, MessageId, Translation, SUMMARY_MIN_CHARS};
use crate::notice::{Notice, NoticeBoard, DEFAULT_DISMISS_AFTER};
use crate::store::MessageStore;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 256;

/// Notice shown when a translation is requested without a target.
pub const SELECT_LANGUAGE_NOTICE: &str = "Please select a language to translate to.";

/// State changes the presentation layer re-renders on.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    MessageAppended(MessageId),
    MessageUpdated(MessageId),
    /// The translating flag or a summarizing indicator changed.
    BusyChanged,
    NoticePosted(Notice),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub notice_dismiss_after: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            notice_dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }
}

/// Orchestrates capability calls for the messages of one chat session.
///
/// Operations take `&self` and are meant to be spawned from an `Arc<Pipeline>`
/// so the caller stays responsive while a capability call is outstanding.
pub struct Pipeline {
    provider: Arc<dyn CapabilityProvider>,
    store: MessageStore,
    notices: NoticeBoard,
    translating: AtomicBool,
    summarizing: Mutex<HashSet<MessageId>>,
    events: broadcast::Sender<PipelineEvent>,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self::with_config(provider, PipelineConfig::default())
    }

    pub fn with_config(provider: Arc<dyn CapabilityProvider>, config: PipelineConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            provider,
            store: MessageStore::new(),
            notices: NoticeBoard::new(config.notice_dismiss_after),
            translating: AtomicBool::new(false),
            summarizing: Mutex::new(HashSet::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: PipelineEvent) {
        // No receivers is fine: nobody is rendering.
        let _ = self.events.send(event);
    }

    /// Post the failure as the active notice and hand it back to the caller.
    fn fail(&self, err: PipelineError) -> PipelineError {
        match &err {
            PipelineError::CapabilityCallFailed {
                capability,
                message,
            } => tracing::error!(%capability, error = %message, "Capability call failed"),
            PipelineError::CapabilityUnavailable(capability) => {
                tracing::warn!(%capability, "Capability not available")
            }
            other => tracing::debug!(error = %other, "Request rejected"),
        }
        let notice = self.notices.post(err.notice_kind(), err.notice_text());
        self.emit(PipelineEvent::NoticePosted(notice));
        err
    }

    fn message_or_fail(&self, id: MessageId) -> Result<Message, PipelineError> {
        self.store
            .get(id)
            .ok_or_else(|| self.fail(PipelineError::MessageNotFound(id)))
    }

    // ------------------------------------------------------------------
    // Submit + detection
    // ------------------------------------------------------------------

    /// Append a message without running detection.
    /// Blank input is ignored silently; otherwise the active notice is cleared.
    pub fn append(&self, text: impl Into<String>) -> Option<MessageId> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        self.notices.clear();
        let id = self.store.append(text);
        tracing::debug!(%id, "Message appended");
        self.emit(PipelineEvent::MessageAppended(id));
        Some(id)
    }

    /// Append a message, then detect its language.
    ///
    /// The message is visible in the store before detection starts. Detection
    /// failures end up on the notice board; the message stays appended.
    pub async fn submit(&self, text: impl Into<String>) -> Option<MessageId> {
        let id = self.append(text)?;
        if let Err(e) = self.detect_language(id).await {
            tracing::debug!(%id, error = %e, "Message kept without a detected language");
        }
        Some(id)
    }

    /// Run detection for a message whose language is still unset.
    pub async fn detect_language(&self, id: MessageId) -> Result<(), PipelineError> {
        let message = self.message_or_fail(id)?;
        if message.detected_language.is_some() {
            return Ok(());
        }

        let detection = self
            .run_detection(&message.text)
            .await
            .map_err(|e| self.fail(e.into()))?;

        tracing::debug!(%id, language = %detection, "Language detected");
        self.store.update(id, |m| {
            if m.detected_language.is_none() {
                m.detected_language = Some(detection);
            }
        });
        self.emit(PipelineEvent::MessageUpdated(id));
        Ok(())
    }

    async fn run_detection(&self, text: &str) -> Result<Detection, CapabilityError> {
        let detector = self
            .provider
            .language_detector()
            .ok_or(CapabilityError::Unavailable(Capability::Detection))?;
        let handle = detector.create().await?;
        let candidates = handle.detect(text).await?;

        Ok(match candidates.into_iter().next() {
            Some(best) => Detection::Language(best.language_code),
            None => Detection::Inconclusive,
        })
    }

    // ------------------------------------------------------------------
    // Translation
    // ------------------------------------------------------------------

    fn parse_target(&self, code: &str) -> Result<Language, PipelineError> {
        if code.trim().is_empty() {
            return Err(self.fail(PipelineError::Validation(
                SELECT_LANGUAGE_NOTICE.to_string(),
            )));
        }
        Language::from_code(code).ok_or_else(|| {
            self.fail(PipelineError::Validation(format!(
                "{code} is not a supported language."
            )))
        })
    }

    /// Remember the user's target choice without translating.
    pub fn select_target_language(
        &self,
        id: MessageId,
        code: &str,
    ) -> Result<Language, PipelineError> {
        let language = self.parse_target(code)?;
        self.store
            .update(id, |m| m.target_language = Some(language))
            .ok_or_else(|| self.fail(PipelineError::MessageNotFound(id)))?;
        self.emit(PipelineEvent::MessageUpdated(id));
        Ok(language)
    }

    /// Translate using the target previously chosen with `select_target_language`.
    pub async fn translate_selected(&self, id: MessageId) -> Result<(), PipelineError> {
        let message = self.message_or_fail(id)?;
        let target = message.target_language.map(Language::code).unwrap_or("");
        self.request_translation(id, target).await
    }

    /// Translate a message's original text into `target`.
    ///
    /// Only one translation runs at a time across the whole session. On success
    /// `translation` and `target_language` change together; on failure nothing
    /// changes. A later request overwrites the earlier result.
    pub async fn request_translation(
        &self,
        id: MessageId,
        target: &str,
    ) -> Result<(), PipelineError> {
        let target = self.parse_target(target)?;
        let message = self.message_or_fail(id)?;
        let _busy = self
            .begin_translation()
            .ok_or_else(|| self.fail(PipelineError::TranslationInFlight))?;

        let options = TranslatorOptions {
            source_language: message.translation_source().to_string(),
            target_language: target.code().to_string(),
        };
        tracing::debug!(
            %id,
            source = %options.source_language,
            target = %options.target_language,
            "Translating message"
        );

        let text = self
            .run_translation(options, &message.text)
            .await
            .map_err(|e| self.fail(e.into()))?;

        self.store.update(id, |m| {
            m.translation = Some(Translation { text, target });
            m.target_language = Some(target);
        });
        self.emit(PipelineEvent::MessageUpdated(id));
        Ok(())
    }

    async fn run_translation(
        &self,
        options: TranslatorOptions,
        text: &str,
    ) -> Result<String, CapabilityError> {
        let translator = self
            .provider
            .translator()
            .ok_or(CapabilityError::Unavailable(Capability::Translation))?;
        let handle = translator.create(options).await?;
        handle.translate(text).await
    }

    fn begin_translation(&self) -> Option<TranslationGuard<'_>> {
        self.translating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.emit(PipelineEvent::BusyChanged);
        Some(TranslationGuard { pipeline: self })
    }

    pub fn is_translating(&self) -> bool {
        self.translating.load(Ordering::Acquire)
    }

    // ------------------------------------------------------------------
    // Summarization
    // ------------------------------------------------------------------

    /// Summarize a long English message that has no summary yet.
    ///
    /// Ineligible requests return `NotEligible` without a capability call or a
    /// notice. On failure the summary stays unset so the request can be retried.
    pub async fn request_summary(&self, id: MessageId) -> Result<(), PipelineError> {
        let message = self.message_or_fail(id)?;
        if let Some(reason) = summary_block_reason(&message) {
            return Err(PipelineError::NotEligible(reason.to_string()));
        }
        let _busy = self.begin_summary(id).ok_or_else(|| {
            PipelineError::NotEligible("Message is already being summarized.".to_string())
        })?;

        tracing::debug!(%id, "Summarizing message");
        let summary = self
            .run_summary(&message.text)
            .await
            .map_err(|e| self.fail(e.into()))?;

        self.store.update(id, |m| {
            if m.summary.is_none() {
                m.summary = Some(summary);
            }
        });
        self.emit(PipelineEvent::MessageUpdated(id));
        Ok(())
    }

    async fn run_summary(&self, text: &str) -> Result<String, CapabilityError> {
        let summarizer = self
            .provider
            .summarizer()
            .ok_or(CapabilityError::Unavailable(Capability::Summarization))?;
        let handle = summarizer.create(SummarizerOptions::TLDR).await?;
        handle.summarize(text).await
    }

    fn begin_summary(&self, id: MessageId) -> Option<SummaryGuard<'_>> {
        if !self.summarizing_set().insert(id) {
            return None;
        }
        self.emit(PipelineEvent::BusyChanged);
        Some(SummaryGuard { pipeline: self, id })
    }

    fn summarizing_set(&self) -> std::sync::MutexGuard<'_, HashSet<MessageId>> {
        self.summarizing.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_summarizing(&self, id: MessageId) -> bool {
        self.summarizing_set().contains(&id)
    }

    /// Whether the summarize action should be offered for this message right now.
    pub fn can_summarize(&self, id: MessageId) -> bool {
        self.store
            .get(id)
            .is_some_and(|m| m.summary_eligible() && !self.is_summarizing(id))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn messages(&self) -> Vec<Message> {
        self.store.snapshot()
    }

    pub fn message(&self, id: MessageId) -> Option<Message> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn current_notice(&self) -> Option<Notice> {
        self.notices.current()
    }

    pub fn availability(&self) -> Availability {
        self.provider.availability()
    }

    /// False when the host lacks detection or translation.
    pub fn is_supported(&self) -> bool {
        self.availability().is_supported()
    }
}

fn summary_block_reason(message: &Message) -> Option<&'static str> {
    if message.summary.is_some() {
        Some("Message already has a summary.")
    } else if message.char_count() <= SUMMARY_MIN_CHARS {
        Some("Message is too short to summarize.")
    } else if !message
        .detected_language
        .as_ref()
        .is_some_and(|d| d.is(Language::English))
    {
        Some("Only English messages can be summarized.")
    } else {
        None
    }
}

/// Clears the session-wide translating flag on every exit path.
struct TranslationGuard<'a> {
    pipeline: &'a Pipeline,
}

impl Drop for TranslationGuard<'_> {
    fn drop(&mut self) {
        self.pipeline.translating.store(false, Ordering::Release);
        self.pipeline.emit(PipelineEvent::BusyChanged);
    }
}

/// Clears one message's summarizing indicator on every exit path.
struct SummaryGuard<'a> {
    pipeline: &'a Pipeline,
    id: MessageId,
}

impl Drop for SummaryGuard<'_> {
    fn drop(&mut self) {
        self.pipeline.summarizing_set().remove(&self.id);
        self.pipeline.emit(PipelineEvent::BusyChanged);
    }
}
