// ABOUTME: Shared tracing setup for lingo binaries
// ABOUTME: init() logs to stderr, init_file() keeps the TUI screen clean, init_for() scopes to one crate

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Directory name under the user config dir where lingo keeps its files.
pub const APP_DIR: &str = "lingo";

/// Standard logging to stderr. Default: INFO level, RUST_LOG override.
/// Used by the non-interactive subcommands.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// File-based logging for the chat TUI. Default: WARN level, RUST_LOG override.
/// Logs to ~/.config/lingo/{app_name}/{app_name}.log
/// If setup fails, prints a warning to stderr and continues without logging.
pub fn init_file(app_name: &str) {
    let Some(config_dir) = dirs::config_dir() else {
        eprintln!("Warning: failed to set up file logging: could not determine config directory");
        return;
    };
    if let Err(e) = init_file_in(&config_dir, app_name) {
        eprintln!("Warning: failed to set up file logging: {e}");
    }
}

/// Path of the log file for `app_name` rooted at `base`.
pub fn log_path(base: &Path, app_name: &str) -> PathBuf {
    base.join(APP_DIR)
        .join(app_name)
        .join(format!("{app_name}.log"))
}

fn open_log_file(base: &Path, app_name: &str) -> std::io::Result<std::fs::File> {
    let path = log_path(base, app_name);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

fn init_file_in(
    base: &Path,
    app_name: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let log_file = open_log_file(base, app_name)?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_ansi(false)
        .try_init()?;

    Ok(())
}

/// Crate-filtered logging to stderr. Default: INFO for named crate, WARN for everything else.
pub fn init_for(crate_name: &str) {
    let directive = format!("{}=info", crate_name.replace('-', "_"));
    let filter = EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into())
        .add_directive(
            directive
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
