// ABOUTME: Non-interactive send command for scripting.
// ABOUTME: Submits one message, optionally translates and summarizes it, and reports the result.

use anyhow::{Context, Result};
use lingo_core::{Message, Pipeline};
use serde::Serialize;
use std::fmt::Write;

/// What the pipeline produced for one submitted message.
#[derive(Debug, Serialize)]
pub struct SendReport {
    pub text: String,
    pub language: Option<String>,
    pub target_language: Option<String>,
    pub translation: Option<String>,
    pub summary: Option<String>,
    /// Notices for every requested step that did not complete.
    pub notices: Vec<String>,
}

impl SendReport {
    fn new(message: Message, notices: Vec<String>) -> Self {
        Self {
            language: message.detected_language.map(|d| d.as_str().to_string()),
            target_language: message.target_language.map(|l| l.code().to_string()),
            translation: message.translation.map(|t| t.text),
            summary: message.summary,
            text: message.text,
            notices,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(code) = &self.language {
            let _ = writeln!(
                out,
                "Language: {} ({code})",
                lingo_core::language::display_name_for(code)
            );
        }
        if let (Some(translation), Some(target)) = (&self.translation, &self.target_language) {
            let _ = writeln!(
                out,
                "{}: {translation}",
                lingo_core::language::display_name_for(target)
            );
        }
        if let Some(summary) = &self.summary {
            let _ = writeln!(out, "Summary: {summary}");
        }
        out
    }
}

pub async fn run(
    pipeline: &Pipeline,
    text: &str,
    to: Option<&str>,
    summarize: bool,
) -> Result<SendReport> {
    let id = pipeline
        .submit(text)
        .await
        .context("Nothing to send: the message is empty")?;

    let mut notices = vec![];
    let detected = pipeline
        .message(id)
        .is_some_and(|m| m.detected_language.is_some());
    if !detected {
        if let Some(notice) = pipeline.current_notice() {
            notices.push(notice.text);
        }
    }

    if let Some(target) = to {
        if let Err(e) = pipeline.request_translation(id, target).await {
            notices.push(e.notice_text());
        }
    }

    if summarize {
        if let Err(e) = pipeline.request_summary(id).await {
            notices.push(e.notice_text());
        }
    }

    let message = pipeline
        .message(id)
        .context("Submitted message is missing from the store")?;
    tracing::debug!(%id, failures = notices.len(), "Send finished");
    Ok(SendReport::new(message, notices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::NoCapabilities;
    use std::sync::Arc;

    fn pipeline() -> Pipeline {
        Pipeline::new(Arc::new(NoCapabilities))
    }

    #[tokio::test]
    async fn test_blank_message_is_an_error() {
        let err = run(&pipeline(), "   ", None, false).await.unwrap_err();
        assert!(err.to_string().contains("Nothing to send"));
    }

    #[tokio::test]
    async fn test_unavailable_steps_are_reported() {
        let report = run(&pipeline(), "Hello there", Some("fr"), true)
            .await
            .unwrap();

        assert_eq!(report.text, "Hello there");
        assert!(report.language.is_none());
        assert!(report.translation.is_none());
        assert!(!report.succeeded());
        assert_eq!(
            report.notices,
            vec![
                "Language detector is not available.".to_string(),
                "Translator is not available.".to_string(),
                "Message is too short to summarize.".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_bad_target_is_reported() {
        let report = run(&pipeline(), "Hello", Some("xx"), false).await.unwrap();
        assert_eq!(report.notices.last().unwrap(), "xx is not a supported language.");
    }

    #[test]
    fn test_render_text() {
        let report = SendReport {
            text: "Hello there".to_string(),
            language: Some("en".to_string()),
            target_language: Some("fr".to_string()),
            translation: Some("Bonjour".to_string()),
            summary: None,
            notices: vec![],
        };
        assert_eq!(report.render_text(), "Language: English (en)\nFrench: Bonjour\n");
        assert!(report.succeeded());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = SendReport {
            text: "hi".to_string(),
            language: Some("Unknown".to_string()),
            target_language: None,
            translation: None,
            summary: None,
            notices: vec![],
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["language"], "Unknown");
        assert!(json["translation"].is_null());
    }
}
