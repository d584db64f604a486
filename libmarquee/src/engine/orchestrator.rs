//! Orchestrator
//!
//! Owns one [`Timeline`] and the three components that schedule on it, routes
//! fired timers to their owner, forwards phrase milestones to the reveal
//! sequencer, and publishes a [`Snapshot`] after every change.
//!
//! Milestones are delivered synchronously inside the firing that produced
//! them, so the reveal sequencer has always seen a `PhraseTyped` before the
//! next phrase tick can fire.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use libmarquee::{EngineConfig, Orchestrator, TypingMode};
//!
//! # fn main() -> libmarquee::Result<()> {
//! let config = EngineConfig::new(["Hi"]).with_block_count(3).with_sections(["features"]);
//! let mut engine = Orchestrator::start(config)?;
//!
//! engine.advance(Duration::from_millis(300));
//! assert_eq!(engine.snapshot().typing.rendered_text, "Hi");
//! assert_eq!(engine.snapshot().typing.mode, TypingMode::Pausing);
//!
//! engine.toggle("features")?;
//! engine.stop();
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use crate::config::EngineConfig;
use crate::engine::accordion::AccordionController;
use crate::engine::phrase::{PhraseEvent, PhraseSequencer, TickOutcome};
use crate::engine::reveal::RevealSequencer;
use crate::engine::timeline::{Timeline, TimerId, TimerKind};
use crate::error::Result;
use crate::events::{Event, EventBus, EventReceiver};
use crate::types::Snapshot;

/// Longest span of virtual time a single [`Orchestrator::advance`] covers
pub const MAX_ADVANCE: Duration = Duration::from_secs(3600);

pub struct Orchestrator {
    timeline: Timeline,
    phrases: PhraseSequencer,
    reveal: RevealSequencer,
    accordion: AccordionController,
    bus: EventBus,
    snapshot: Snapshot,
    running: bool,
}

impl Orchestrator {
    /// Start with a private event bus
    pub fn start(config: EngineConfig) -> Result<Self> {
        Self::start_with_bus(config, EventBus::default())
    }

    /// Start publishing on `bus`. Subscribers attached before this call see
    /// the initial snapshot.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for empty phrases or zero delays, `DuplicateSection`
    /// for repeated section ids. Nothing is left scheduled on failure.
    pub fn start_with_bus(config: EngineConfig, bus: EventBus) -> Result<Self> {
        config.validate()?;

        let mut reveal = RevealSequencer::new(config.reveal_step_delay_ms)?;
        reveal.register(config.block_count())?;

        let mut accordion = AccordionController::new();
        for id in config.section_ids() {
            accordion.register_section(id.as_str())?;
        }

        let mut timeline = Timeline::new();
        let phrases = PhraseSequencer::start(config.phrase_list()?, config.timing(), &mut timeline)?;

        let snapshot = Snapshot {
            typing: phrases.state().clone(),
            reveal: reveal.state(),
            accordion: accordion.state(),
            running: true,
        };

        let orchestrator = Self {
            timeline,
            phrases,
            reveal,
            accordion,
            bus,
            snapshot,
            running: true,
        };

        tracing::info!(
            phrases = config.phrases.len(),
            blocks = config.block_count(),
            sections = config.section_ids().len(),
            "orchestrator started"
        );
        orchestrator.bus.emit(Event::Snapshot(orchestrator.snapshot.clone()));

        Ok(orchestrator)
    }

    /// Latest composite state
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.bus.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Virtual time since start
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timeline.pending()
    }

    pub fn pending_reveal_steps(&self) -> usize {
        self.timeline.pending_of(TimerKind::RevealStep)
    }

    /// Virtual time at which the next timer fires
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    /// Move time forward by `elapsed`, firing every timer that comes due in
    /// deadline order. Returns how many fired.
    ///
    /// Spans longer than [`MAX_ADVANCE`] are cut to it; the engine loops
    /// forever, so skipping further ahead only moves the clock.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let span = elapsed.min(MAX_ADVANCE);
        if span < elapsed {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                max_ms = MAX_ADVANCE.as_millis() as u64,
                "advance capped"
            );
        }
        let until = self.timeline.now().saturating_add(span);
        let mut fired = 0;

        while let Some((id, kind)) = self.timeline.pop_due(until) {
            self.fire(id, kind);
            fired += 1;
        }
        self.timeline.advance_to(until);

        fired
    }

    /// Jump to the next deadline and fire exactly that timer.
    /// Returns false when nothing is pending.
    pub fn fire_next(&mut self) -> bool {
        let Some(deadline) = self.timeline.next_deadline() else {
            return false;
        };
        match self.timeline.pop_due(deadline) {
            Some((id, kind)) => {
                self.fire(id, kind);
                true
            }
            None => false,
        }
    }

    fn fire(&mut self, id: TimerId, kind: TimerKind) {
        let changed = match kind {
            TimerKind::PhraseTick => match self.phrases.tick(id, &mut self.timeline) {
                TickOutcome::Ignored => false,
                TickOutcome::Advanced(event) => {
                    if let Some(event) = event {
                        self.on_phrase_event(event);
                    }
                    true
                }
            },
            TimerKind::RevealStep => self.reveal.step(id, &mut self.timeline),
        };

        if changed {
            self.publish();
        }
    }

    fn on_phrase_event(&mut self, event: PhraseEvent) {
        match event {
            PhraseEvent::Typed { phrase_index } => {
                self.bus.emit(Event::PhraseTyped { phrase_index });
                self.reveal.on_phrase_typed(&mut self.timeline);
            }
            PhraseEvent::CycleCompleted { phrase_index } => {
                self.bus.emit(Event::PhraseCycleCompleted { phrase_index });
                self.reveal.on_phrase_cycle_completed(&mut self.timeline);
            }
        }
    }

    /// Register another collapsible section after start
    pub fn register_section(&mut self, id: impl Into<String>) -> Result<()> {
        self.accordion.register_section(id)?;
        self.publish();
        Ok(())
    }

    /// Flip a section, returning its new state
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let is_open = self.accordion.toggle(id)?;
        tracing::debug!(section = id, is_open, "section toggled");

        self.bus.emit(Event::SectionToggled {
            id: id.to_string(),
            is_open,
        });
        self.publish();
        Ok(is_open)
    }

    /// Cancel every pending timer. Calling it again is a no-op.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        self.phrases.stop(&mut self.timeline);
        self.reveal.cancel(&mut self.timeline);
        self.timeline.clear();
        self.running = false;

        self.publish();
        self.bus.emit(Event::Stopped);
        tracing::info!(elapsed_ms = self.timeline.now().as_millis() as u64, "orchestrator stopped");
    }

    fn publish(&mut self) {
        self.snapshot = Snapshot {
            typing: self.phrases.state().clone(),
            reveal: self.reveal.state(),
            accordion: self.accordion.state(),
            running: self.running,
        };
        self.bus.emit(Event::Snapshot(self.snapshot.clone()));
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.stop();
    }
}
