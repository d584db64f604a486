//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! all possible actions that can modify application state.

use crossterm::event::KeyEvent;
use libmarquee::Snapshot;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick, drives the engine clock
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    /// Move the section cursor down, wrapping at the end
    SelectNextSection,

    /// Move the section cursor up, wrapping at the start
    SelectPreviousSection,

    // === Engine ===
    /// User asked to open or close a section. The event loop forwards this
    /// to the engine; the new state arrives as a snapshot.
    ToggleSectionRequested(String),

    /// Engine published a new snapshot
    SnapshotPublished(Snapshot),

    /// Engine reported a section change
    SectionToggled { id: String, is_open: bool },

    // === Error Handling ===
    /// Show error overlay
    ShowError(String),

    /// Dismiss error overlay
    DismissError,

    // === Status Bar ===
    /// Clear status bar message
    ClearStatus,
}
