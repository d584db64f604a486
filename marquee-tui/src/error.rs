//! Error types for marquee-tui
//!
//! Wraps engine errors and terminal/IO errors for unified handling in `main`.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Engine or configuration error
    #[error("Engine error: {0}")]
    Engine(#[from] libmarquee::MarqueeError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Headless output could not be encoded
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl TuiError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Engine(e) => e.exit_code(),
            TuiError::Terminal(_) | TuiError::Output(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
