//! Engine output flowing through the reducer
//!
//! Mirrors what the event loop does: advance the engine, reduce every
//! action it yields, and forward toggle requests back to it.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libmarquee::config::{ContentBlock, Section};
use libmarquee::{EngineConfig, PageContent, TypingMode};
use marquee_tui::app::{map_key, reduce, Action, AppState};
use marquee_tui::services::EngineHandle;

fn page() -> PageContent {
    PageContent {
        title: "Test".to_string(),
        blocks: (0..3)
            .map(|i| ContentBlock {
                icon: "*".to_string(),
                text: format!("block {}", i),
            })
            .collect(),
        sections: ["faq", "about"]
            .iter()
            .map(|id| Section {
                id: id.to_string(),
                title: format!("{} title", id),
                body: format!("{} body", id),
            })
            .collect(),
        ..PageContent::default()
    }
}

fn engine_config() -> EngineConfig {
    let mut config = EngineConfig::new(["Hi", "Yo"])
        .with_block_count(3)
        .with_sections(["faq", "about"]);
    config.typing_delay_ms = 100;
    config.deleting_delay_ms = 50;
    config.pause_after_typed_ms = 1000;
    config.reveal_step_delay_ms = 300;
    config
}

fn apply(state: AppState, actions: Vec<Action>) -> AppState {
    actions.into_iter().fold(state, reduce)
}

/// What the event loop does with one key press
fn press(state: AppState, engine: &mut EngineHandle, code: KeyCode) -> AppState {
    let Some(action) = map_key(&state, KeyEvent::new(code, KeyModifiers::NONE)) else {
        return state;
    };
    let state = reduce(state, action.clone());
    match action {
        Action::ToggleSectionRequested(id) => match engine.toggle(&id) {
            Ok(actions) => apply(state, actions),
            Err(e) => reduce(state, Action::ShowError(e.to_string())),
        },
        _ => state,
    }
}

#[test]
fn test_state_tracks_latest_snapshot() {
    let mut engine = EngineHandle::start(engine_config()).unwrap();
    let state = apply(AppState::new(page()), engine.advance(Duration::from_millis(200)));

    assert_eq!(state.headline(), "Hi");
    assert_eq!(state.revealed_blocks(), 1);
    assert_eq!(state.snapshot.as_ref(), Some(engine.snapshot()));
}

#[test]
fn test_reveal_resets_when_cycle_completes() {
    let mut engine = EngineHandle::start(engine_config()).unwrap();

    // Typed at 200, fully revealed at 800
    let state = apply(AppState::new(page()), engine.advance(Duration::from_millis(800)));
    assert_eq!(state.revealed_blocks(), 3);

    // Pause ends at 1200, deleted at 1300
    let state = apply(state, engine.advance(Duration::from_millis(500)));
    let snapshot = state.snapshot.as_ref().unwrap();
    assert_eq!(snapshot.typing.phrase_index, 1);
    assert_eq!(snapshot.typing.mode, TypingMode::Typing);
    assert_eq!(state.revealed_blocks(), 0);
}

#[test]
fn test_enter_opens_selected_section() {
    let mut engine = EngineHandle::start(engine_config()).unwrap();
    let state = apply(AppState::new(page()), engine.advance(Duration::ZERO));

    let state = press(state, &mut engine, KeyCode::Char('j'));
    let state = press(state, &mut engine, KeyCode::Enter);

    assert!(state.is_section_open("about"));
    assert!(!state.is_section_open("faq"));
    assert_eq!(state.status.as_deref(), Some("Opened: about title"));

    let state = press(state, &mut engine, KeyCode::Char(' '));
    assert!(!state.is_section_open("about"));
    assert_eq!(state.status.as_deref(), Some("Closed: about title"));
}

#[test]
fn test_section_missing_from_engine_shows_error() {
    // Page lists a section the engine was not told about
    let config = engine_config().with_sections(["faq"]);
    let mut engine = EngineHandle::start(config).unwrap();
    let state = apply(AppState::new(page()), engine.advance(Duration::ZERO));

    let state = press(state, &mut engine, KeyCode::Down);
    let state = press(state, &mut engine, KeyCode::Enter);

    let error = state.error.as_deref().unwrap();
    assert!(error.contains("about"), "unexpected error: {}", error);
    assert!(!state.is_section_open("about"));
}

#[test]
fn test_stop_freezes_state() {
    let mut engine = EngineHandle::start(engine_config()).unwrap();
    let state = apply(AppState::new(page()), engine.advance(Duration::from_millis(150)));

    let state = apply(state, engine.stop());
    let frozen = state.snapshot.clone().unwrap();
    assert!(!frozen.running);

    let state = apply(state, engine.advance(Duration::from_secs(10)));
    assert_eq!(state.snapshot.unwrap(), frozen);
}
