//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State` with no I/O. Requests that need the engine
//! pass through unchanged; the event loop acts on them.

use super::actions::Action;
use super::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Pure reducer function
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => match map_key(&state, key) {
            Some(action) => reduce(state, action),
            None => state,
        },
        Action::Tick => state,
        Action::Resize(_, _) => state,

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::SelectNextSection => {
            let count = state.page.sections.len();
            if count == 0 {
                return state;
            }
            AppState {
                selected_section: (state.selected_section + 1) % count,
                ..state
            }
        }

        Action::SelectPreviousSection => {
            let count = state.page.sections.len();
            if count == 0 {
                return state;
            }
            AppState {
                selected_section: (state.selected_section + count - 1) % count,
                ..state
            }
        }

        // === Engine ===
        Action::ToggleSectionRequested(_) => state,

        Action::SnapshotPublished(snapshot) => AppState {
            snapshot: Some(snapshot),
            ..state
        },

        Action::SectionToggled { id, is_open } => {
            let title = state
                .page
                .sections
                .iter()
                .find(|section| section.id == id)
                .map(|section| section.title.clone())
                .unwrap_or(id);
            let verb = if is_open { "Opened" } else { "Closed" };
            AppState {
                status: Some(format!("{}: {}", verb, title)),
                ..state
            }
        }

        // === Error Handling ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState {
            error: None,
            ..state
        },

        // === Status Bar ===
        Action::ClearStatus => AppState {
            status: None,
            ..state
        },
    }
}

/// Map a key press to the action it stands for
///
/// This is where keybindings are defined. The event loop calls it directly
/// so requests such as [`Action::ToggleSectionRequested`] reach the engine.
pub fn map_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Some(Action::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),

        (KeyCode::F(1), _) | (KeyCode::Char('?'), _) => {
            return Some(if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            });
        }

        (KeyCode::Esc, _) if state.error.is_some() => return Some(Action::DismissError),
        (KeyCode::Esc, _) if state.help_visible => return Some(Action::HideHelp),
        (KeyCode::Esc, _) if state.status.is_some() => return Some(Action::ClearStatus),

        _ => {}
    }

    // Overlays swallow everything else
    if state.error.is_some() || state.help_visible {
        return None;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNextSection),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPreviousSection),
        KeyCode::Enter | KeyCode::Char(' ') => state
            .selected_section_id()
            .map(|id| Action::ToggleSectionRequested(id.to_string())),
        _ => None,
    }
}
