//! marquee-tui library
//!
//! Exports the terminal landing page's state machine, rendering, and engine
//! adapter for testing and reuse.

pub mod app;
pub mod error;
pub mod headless;
pub mod services;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{map_key, reduce, Action, AppState};
pub use error::{Result, TuiError};
