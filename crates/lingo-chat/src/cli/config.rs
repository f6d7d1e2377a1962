// ABOUTME: Config subcommand implementation.
// ABOUTME: Prints the active config, its path, or writes a starter file.

use anyhow::{Context, Result};
use lingo_core::capability::CommandSpec;
use lingo_core::Config;
use std::path::Path;

use super::ConfigAction;

pub fn run(action: Option<ConfigAction>, config: &Config, path: &Path) -> Result<()> {
    match action {
        Some(ConfigAction::Path) => println!("{}", path.display()),
        Some(ConfigAction::Init { force }) => {
            init(path, force)?;
            println!("Wrote {}", path.display());
        }
        None => {
            let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
            if rendered.trim().is_empty() {
                println!("# {} (defaults)", path.display());
            } else {
                print!("{rendered}");
            }
        }
    }
    Ok(())
}

/// A config wired to the conventional helper command names.
pub fn starter() -> Config {
    Config {
        detector: Some(CommandSpec::new("lingo-detect", &[])),
        translator: Some(CommandSpec::new(
            "lingo-translate",
            &["--from", "{source}", "--to", "{target}"],
        )),
        summarizer: Some(CommandSpec::new(
            "lingo-summarize",
            &["--type", "{type}", "--format", "{format}", "--length", "{length}"],
        )),
        ..Config::default()
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    starter().save(path)
}
