// ABOUTME: Capability provider backed by external helper commands
// ABOUTME: Writes message text to the child's stdin and reads the result from stdout

use super::{
    Capability, CapabilityProvider, CapabilityResult, DetectionCandidate, DetectorHandle,
    LanguageDetector, Summarizer, SummarizerHandle, SummarizerOptions, Translator,
    TranslatorHandle, TranslatorOptions,
};
use crate::error::CapabilityError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A helper program and its argument template.
///
/// Arguments may contain placeholders that are substituted per call:
/// `{source}` and `{target}` for translation, `{type}`, `{format}` and
/// `{length}` for summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>, args: &[&str]) -> Self {
        Self {
            command: command.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn render_args(&self, vars: &[(&str, &str)]) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (key, value)| {
                    acc.replace(&format!("{{{key}}}"), value)
                })
            })
            .collect()
    }

    async fn run(
        &self,
        capability: Capability,
        args: &[String],
        input: &str,
    ) -> CapabilityResult<String> {
        tracing::debug!(
            command = %self.command,
            ?args,
            %capability,
            "Spawning capability command"
        );

        let mut child = Command::new(&self.command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CapabilityError::call_failed(
                    capability,
                    format!("failed to spawn {}: {e}", self.command),
                )
            })?;

        // Feed stdin while stdout drains, so a helper that streams its output
        // cannot fill the pipe and stall both sides.
        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(input.as_bytes()).await {
                // The helper may exit without reading its input.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                result => result,
            }
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        let output = output.map_err(|e| {
            CapabilityError::call_failed(capability, format!("{} failed: {e}", self.command))
        })?;
        fed.map_err(|e| {
            CapabilityError::call_failed(
                capability,
                format!("failed to write to {}: {e}", self.command),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CapabilityError::call_failed(
                capability,
                format!("{} exited with {}: {}", self.command, output.status, stderr.trim()),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            CapabilityError::call_failed(
                capability,
                format!("{} wrote invalid UTF-8: {e}", self.command),
            )
        })
    }
}

/// Parse detector output: one `code [confidence]` per line, best-first.
fn parse_candidates(output: &str) -> Vec<DetectionCandidate> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let code = parts.next()?;
            let confidence = parts
                .next()
                .and_then(|c| c.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some(DetectionCandidate::new(code, confidence))
        })
        .collect()
}

struct CommandDetector {
    spec: CommandSpec,
}

#[async_trait]
impl LanguageDetector for CommandDetector {
    async fn create(&self) -> CapabilityResult<Box<dyn DetectorHandle>> {
        Ok(Box::new(CommandDetectorHandle {
            spec: self.spec.clone(),
        }))
    }
}

struct CommandDetectorHandle {
    spec: CommandSpec,
}

#[async_trait]
impl DetectorHandle for CommandDetectorHandle {
    async fn detect(&self, text: &str) -> CapabilityResult<Vec<DetectionCandidate>> {
        let args = self.spec.render_args(&[]);
        let stdout = self.spec.run(Capability::Detection, &args, text).await?;
        Ok(parse_candidates(&stdout))
    }
}

struct CommandTranslator {
    spec: CommandSpec,
}

#[async_trait]
impl Translator for CommandTranslator {
    async fn create(
        &self,
        options: TranslatorOptions,
    ) -> CapabilityResult<Box<dyn TranslatorHandle>> {
        let args = self.spec.render_args(&[
            ("source", options.source_language.as_str()),
            ("target", options.target_language.as_str()),
        ]);
        Ok(Box::new(CommandTranslatorHandle {
            spec: self.spec.clone(),
            args,
        }))
    }
}

struct CommandTranslatorHandle {
    spec: CommandSpec,
    args: Vec<String>,
}

#[async_trait]
impl TranslatorHandle for CommandTranslatorHandle {
    async fn translate(&self, text: &str) -> CapabilityResult<String> {
        let stdout = self.spec.run(Capability::Translation, &self.args, text).await?;
        Ok(stdout.trim_end().to_string())
    }
}

struct CommandSummarizer {
    spec: CommandSpec,
}

#[async_trait]
impl Summarizer for CommandSummarizer {
    async fn create(
        &self,
        options: SummarizerOptions,
    ) -> CapabilityResult<Box<dyn SummarizerHandle>> {
        let args = self.spec.render_args(&[
            ("type", options.kind),
            ("format", options.format),
            ("length", options.length),
        ]);
        Ok(Box::new(CommandSummarizerHandle {
            spec: self.spec.clone(),
            args,
        }))
    }
}

struct CommandSummarizerHandle {
    spec: CommandSpec,
    args: Vec<String>,
}

#[async_trait]
impl SummarizerHandle for CommandSummarizerHandle {
    async fn summarize(&self, text: &str) -> CapabilityResult<String> {
        let stdout = self
            .spec
            .run(Capability::Summarization, &self.args, text)
            .await?;
        Ok(stdout.trim_end().to_string())
    }
}

/// Provider whose capabilities are external commands. A capability without a
/// configured command is reported as absent.
#[derive(Default, Clone)]
pub struct CommandProvider {
    detector: Option<Arc<dyn LanguageDetector>>,
    translator: Option<Arc<dyn Translator>>,
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl CommandProvider {
    pub fn new(
        detector: Option<CommandSpec>,
        translator: Option<CommandSpec>,
        summarizer: Option<CommandSpec>,
    ) -> Self {
        Self {
            detector: detector
                .map(|spec| Arc::new(CommandDetector { spec }) as Arc<dyn LanguageDetector>),
            translator: translator
                .map(|spec| Arc::new(CommandTranslator { spec }) as Arc<dyn Translator>),
            summarizer: summarizer
                .map(|spec| Arc::new(CommandSummarizer { spec }) as Arc<dyn Summarizer>),
        }
    }
}

impl CapabilityProvider for CommandProvider {
    fn language_detector(&self) -> Option<Arc<dyn LanguageDetector>> {
        self.detector.clone()
    }

    fn translator(&self) -> Option<Arc<dyn Translator>> {
        self.translator.clone()
    }

    fn summarizer(&self) -> Option<Arc<dyn Summarizer>> {
        self.summarizer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candidates() {
        let candidates = parse_candidates("fr 0.92\nen 0.05\n\n");
        assert_eq!(
            candidates,
            vec![
                DetectionCandidate::new("fr", 0.92),
                DetectionCandidate::new("en", 0.05),
            ]
        );
    }

    #[test]
    fn test_parse_candidates_without_confidence() {
        let candidates = parse_candidates("ja\n");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].language_code, "ja");
    }

    #[test]
    fn test_parse_candidates_empty_output() {
        assert!(parse_candidates("").is_empty());
        assert!(parse_candidates("  \n\n").is_empty());
    }

    #[test]
    fn test_render_args_substitutes_placeholders() {
        let spec = CommandSpec::new("translate", &["--from", "{source}", "--to={target}"]);
        let args = spec.render_args(&[("source", "en"), ("target", "fr")]);
        assert_eq!(args, vec!["--from", "en", "--to=fr"]);
    }

    #[test]
    fn test_unconfigured_capabilities_are_absent() {
        let provider = CommandProvider::new(Some(CommandSpec::new("detect", &[])), None, None);
        let availability = provider.availability();
        assert!(availability.detection);
        assert!(!availability.translation);
        assert!(!availability.summarization);
        assert!(!availability.is_supported());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_translator_reads_stdout() {
        let spec = CommandSpec::new("sh", &["-c", "echo \"[{source}->{target}] $(cat)\""]);
        let provider = CommandProvider::new(None, Some(spec), None);
        let translator = provider.translator().unwrap();
        let handle = translator
            .create(TranslatorOptions {
                source_language: "en".to_string(),
                target_language: "fr".to_string(),
            })
            .await
            .unwrap();
        let result = handle.translate("Hello").await.unwrap();
        assert_eq!(result, "[en->fr] Hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_detector_parses_candidates() {
        let spec = CommandSpec::new("sh", &["-c", "cat > /dev/null; printf 'es 0.8\\npt 0.1\\n'"]);
        let provider = CommandProvider::new(Some(spec), None, None);
        let handle = provider.language_detector().unwrap().create().await.unwrap();
        let candidates = handle.detect("Hola").await.unwrap();
        assert_eq!(candidates[0].language_code, "es");
        assert_eq!(candidates.len(), 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_call_failure() {
        let spec = CommandSpec::new("sh", &["-c", "echo nope >&2; exit 3"]);
        let provider = CommandProvider::new(None, None, Some(spec));
        let handle = provider
            .summarizer()
            .unwrap()
            .create(SummarizerOptions::default())
            .await
            .unwrap();
        let err = handle.summarize("text").await.unwrap_err();
        match err {
            CapabilityError::CallFailed {
                capability,
                message,
            } => {
                assert_eq!(capability, Capability::Summarization);
                assert!(message.contains("nope"));
            }
            other => panic!("expected CallFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_input_streams_through_helper() {
        let provider = CommandProvider::new(None, Some(CommandSpec::new("cat", &[])), None);
        let handle = provider
            .translator()
            .unwrap()
            .create(TranslatorOptions {
                source_language: "en".to_string(),
                target_language: "fr".to_string(),
            })
            .await
            .unwrap();
        let text = "a".repeat(1 << 20);
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            handle.translate(&text),
        )
        .await
        .expect("translating 1 MiB through cat should not hang")
        .unwrap();
        assert_eq!(result.len(), text.len());
    }

    #[tokio::test]
    async fn test_missing_binary_is_call_failure() {
        let spec = CommandSpec::new("lingo-definitely-not-installed", &[]);
        let provider = CommandProvider::new(Some(spec), None, None);
        let handle = provider.language_detector().unwrap().create().await.unwrap();
        let err = handle.detect("text").await.unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::CallFailed {
                capability: Capability::Detection,
                ..
            }
        ));
    }
}
