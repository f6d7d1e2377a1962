// ABOUTME: Error types for the chat TUI.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
