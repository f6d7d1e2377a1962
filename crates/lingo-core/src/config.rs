// ABOUTME: Configuration for lingo capability commands and notice timing.
// ABOUTME: Loaded from TOML with defaults for every section.

use crate::capability::{CommandProvider, CommandSpec};
use crate::pipeline::PipelineConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Helper that prints `code [confidence]` lines, best-first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector: Option<CommandSpec>,

    /// Helper that prints the translated text; args may use {source} and {target}
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator: Option<CommandSpec>,

    /// Helper that prints a summary; args may use {type}, {format} and {length}
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarizer: Option<CommandSpec>,

    #[serde(default)]
    pub notices: NoticeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

fn default_dismiss_after_ms() -> u64 {
    3000
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default config file path (~/.config/lingo/config.toml)
    pub fn default_path() -> PathBuf {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("."))
            })
            .join("lingo")
            .join("config.toml")
    }

    /// Load an explicitly requested file, or the default file if it exists.
    /// A missing default file yields an empty config (no capabilities).
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        match explicit {
            Some(path) => Ok((Self::load(path)?, path.to_path_buf())),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Ok((Self::load(&path)?, path))
                } else {
                    tracing::debug!(path = %path.display(), "No config file, using defaults");
                    Ok((Self::default(), path))
                }
            }
        }
    }

    pub fn provider(&self) -> CommandProvider {
        CommandProvider::new(
            self.detector.clone(),
            self.translator.clone(),
            self.summarizer.clone(),
        )
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            notice_dismiss_after: Duration::from_millis(self.notices.dismiss_after_ms),
        }
    }
}
