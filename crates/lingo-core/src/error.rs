// ABOUTME: Error types for the lingo-core crate.
// ABOUTME: Capability errors keep "not available" apart from "call failed" for user messaging.

use crate::capability::Capability;
use crate::message::MessageId;
use crate::notice::NoticeKind;
use thiserror::Error;

/// Errors raised by a capability implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The host does not expose this capability.
    #[error("{0} is not available")]
    Unavailable(Capability),

    /// The capability exists but create or invoke failed.
    #[error("{capability} call failed: {message}")]
    CallFailed {
        capability: Capability,
        message: String,
    },
}

impl CapabilityError {
    pub fn call_failed(capability: Capability, message: impl Into<String>) -> Self {
        CapabilityError::CallFailed {
            capability,
            message: message.into(),
        }
    }
}

/// Failures at the pipeline controller boundary. Apart from `NotEligible`,
/// each one has already been posted to the notice board when the caller sees it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// User input violates a precondition.
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("{0} is not available")]
    CapabilityUnavailable(Capability),

    #[error("{capability} call failed: {message}")]
    CapabilityCallFailed {
        capability: Capability,
        message: String,
    },

    /// Another translation request is still outstanding.
    #[error("a translation is already in progress")]
    TranslationInFlight,

    /// The message does not currently qualify for the requested operation.
    #[error("not eligible: {0}")]
    NotEligible(String),

    #[error("message not found: {0}")]
    MessageNotFound(MessageId),
}

impl PipelineError {
    /// User-facing notice text. Underlying detail stays in the logs.
    pub fn notice_text(&self) -> String {
        match self {
            PipelineError::Validation(msg) => msg.clone(),
            PipelineError::CapabilityUnavailable(capability) => {
                format!("{} is not available.", capability.service_name())
            }
            PipelineError::CapabilityCallFailed { capability, .. } => {
                capability.failure_notice().to_string()
            }
            PipelineError::TranslationInFlight => {
                "A translation is already in progress.".to_string()
            }
            PipelineError::NotEligible(reason) => reason.clone(),
            PipelineError::MessageNotFound(_) => "That message no longer exists.".to_string(),
        }
    }

    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            PipelineError::Validation(_)
            | PipelineError::TranslationInFlight
            | PipelineError::NotEligible(_)
            | PipelineError::MessageNotFound(_) => NoticeKind::Validation,
            PipelineError::CapabilityUnavailable(_) => NoticeKind::Unavailable,
            PipelineError::CapabilityCallFailed { .. } => NoticeKind::Failed,
        }
    }
}

impl From<CapabilityError> for PipelineError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::Unavailable(capability) => {
                PipelineError::CapabilityUnavailable(capability)
            }
            CapabilityError::CallFailed {
                capability,
                message,
            } => PipelineError::CapabilityCallFailed {
                capability,
                message,
            },
        }
    }
}
