//! Engine adapter for the TUI
//!
//! Owns an [`Orchestrator`] and a subscription to its bus, and turns bus
//! events into reducer [`Action`]s for the synchronous event loop.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use marquee_tui::services::{load_landing, EngineHandle};
//!
//! # fn example() -> marquee_tui::error::Result<()> {
//! let landing = load_landing(None, "minimal")?;
//! let mut engine = EngineHandle::start(landing.engine_config())?;
//!
//! let actions = engine.advance(Duration::from_millis(500));
//! assert!(!actions.is_empty());
//! engine.stop();
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::path::Path;
use std::time::Duration;

use libmarquee::{presets, EngineConfig, Event, EventBus, EventReceiver, LandingConfig, Orchestrator, Snapshot};
use tokio::sync::broadcast::error::TryRecvError;

use crate::app::Action;
use crate::error::Result;

/// Running engine plus the receiver the event loop drains
pub struct EngineHandle {
    engine: Orchestrator,
    events: EventReceiver,
}

impl EngineHandle {
    /// Start the engine. The first drain yields its initial snapshot.
    pub fn start(config: EngineConfig) -> Result<Self> {
        let bus = EventBus::default();
        let events = bus.subscribe();
        let engine = Orchestrator::start_with_bus(config, bus)?;
        Ok(Self { engine, events })
    }

    /// Move the engine clock forward and collect the resulting actions
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Action> {
        self.engine.advance(elapsed);
        self.drain()
    }

    pub fn toggle(&mut self, id: &str) -> Result<Vec<Action>> {
        self.engine.toggle(id)?;
        Ok(self.drain())
    }

    pub fn stop(&mut self) -> Vec<Action> {
        self.engine.stop();
        self.drain()
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.engine.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    fn drain(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => actions.extend(action_for_event(event)),
                // Only the newest snapshot matters, and it is still queued
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "engine events skipped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        actions
    }
}

/// Reducer action for an engine event, if the UI cares about it
pub fn action_for_event(event: Event) -> Option<Action> {
    match event {
        Event::Snapshot(snapshot) => Some(Action::SnapshotPublished(snapshot)),
        Event::SectionToggled { id, is_open } => Some(Action::SectionToggled { id, is_open }),
        Event::PhraseTyped { .. } | Event::PhraseCycleCompleted { .. } | Event::Stopped => None,
    }
}

/// Pick the landing page to show
///
/// An explicit `path` wins, then a file named by `MARQUEE_CONFIG`, then the
/// built-in preset.
pub fn load_landing(path: Option<&Path>, preset: &str) -> Result<LandingConfig> {
    let landing = match path {
        Some(path) => LandingConfig::load_from_path(path)?,
        None if std::env::var_os("MARQUEE_CONFIG").is_some() => LandingConfig::load()?,
        None => presets::preset(preset)?,
    };
    Ok(landing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libmarquee::{ConfigError, MarqueeError};
    use serial_test::serial;

    #[test]
    fn test_first_drain_has_initial_snapshot() {
        let mut engine = EngineHandle::start(EngineConfig::new(["Hi"])).unwrap();
        let actions = engine.advance(Duration::ZERO);

        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::SnapshotPublished(snapshot) => assert!(snapshot.running),
            other => panic!("Expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_milestones_are_not_actions() {
        assert!(action_for_event(Event::PhraseTyped { phrase_index: 0 }).is_none());
        assert!(action_for_event(Event::PhraseCycleCompleted { phrase_index: 0 }).is_none());
        assert!(action_for_event(Event::Stopped).is_none());
    }

    #[test]
    fn test_toggle_reports_section_and_snapshot() {
        let config = EngineConfig::new(["Hi"]).with_sections(["faq"]);
        let mut engine = EngineHandle::start(config).unwrap();
        engine.advance(Duration::ZERO);

        let actions = engine.toggle("faq").unwrap();
        assert!(matches!(
            &actions[0],
            Action::SectionToggled { id, is_open: true } if id == "faq"
        ));
        assert!(matches!(&actions[1], Action::SnapshotPublished(s) if s.accordion.is_open("faq") == Some(true)));
    }

    #[test]
    fn test_toggle_unknown_section_fails() {
        let mut engine = EngineHandle::start(EngineConfig::new(["Hi"])).unwrap();
        assert!(engine.toggle("nope").is_err());
    }

    #[test]
    fn test_stop_publishes_final_snapshot() {
        let mut engine = EngineHandle::start(EngineConfig::new(["Hi"])).unwrap();
        engine.advance(Duration::ZERO);

        let actions = engine.stop();
        assert!(!engine.is_running());
        assert!(matches!(actions.as_slice(), [Action::SnapshotPublished(s)] if !s.running));
        assert!(engine.stop().is_empty());
    }

    #[test]
    #[serial]
    fn test_load_landing_falls_back_to_preset() {
        std::env::remove_var("MARQUEE_CONFIG");
        let landing = load_landing(None, "minimal").unwrap();
        assert_eq!(landing.page.title, "Birdeye");

        match load_landing(None, "neon") {
            Err(crate::TuiError::Engine(MarqueeError::Config(ConfigError::UnknownPreset(name)))) => {
                assert_eq!(name, "neon")
            }
            other => panic!("Expected UnknownPreset, got {:?}", other.map(|l| l.page.title)),
        }
    }
}
