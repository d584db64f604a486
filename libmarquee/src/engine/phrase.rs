//! Phrase sequencer
//!
//! Types each phrase one character per tick, holds it, deletes it one
//! character per tick, then moves on to the next phrase, forever.
//!
//! ```text
//!  Typing --(phrase complete)--> Pausing --> Deleting --(empty)--> Typing (next phrase)
//!    ^  |                                      ^  |
//!    +--+ one char per tick                    +--+ one char per tick
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::engine::timeline::{Timeline, TimerId, TimerKind};
use crate::error::{MarqueeError, Result};
use crate::types::{TypingMode, TypingState};

pub const DEFAULT_TYPING_DELAY_MS: u64 = 150;
pub const DEFAULT_DELETING_DELAY_MS: u64 = 120;
pub const DEFAULT_PAUSE_AFTER_TYPED_MS: u64 = 1200;

/// Ordered, non-empty, immutable list of non-empty phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseList(Arc<[String]>);

impl PhraseList {
    /// Build a phrase list
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the list is empty or any phrase is empty. An empty
    /// phrase would make a cycle that types and deletes nothing.
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();

        if phrases.is_empty() {
            return Err(MarqueeError::InvalidConfig(
                "phrase list cannot be empty".to_string(),
            ));
        }
        if let Some(index) = phrases.iter().position(|p| p.is_empty()) {
            return Err(MarqueeError::InvalidConfig(format!(
                "phrase {} is empty",
                index
            )));
        }

        Ok(Self(phrases.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Phrase at `index`, taken modulo the list length
    pub fn get(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Per-mode tick delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseTiming {
    pub typing_delay_ms: u64,
    pub deleting_delay_ms: u64,
    pub pause_after_typed_ms: u64,
}

impl Default for PhraseTiming {
    fn default() -> Self {
        Self {
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            deleting_delay_ms: DEFAULT_DELETING_DELAY_MS,
            pause_after_typed_ms: DEFAULT_PAUSE_AFTER_TYPED_MS,
        }
    }
}

impl PhraseTiming {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("typing_delay_ms", self.typing_delay_ms),
            ("deleting_delay_ms", self.deleting_delay_ms),
            ("pause_after_typed_ms", self.pause_after_typed_ms),
        ] {
            if value == 0 {
                return Err(MarqueeError::InvalidConfig(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }

    fn delay_for(&self, mode: TypingMode) -> u64 {
        match mode {
            TypingMode::Typing => self.typing_delay_ms,
            TypingMode::Pausing => self.pause_after_typed_ms,
            TypingMode::Deleting => self.deleting_delay_ms,
        }
    }
}

/// Milestones published alongside state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseEvent {
    /// The phrase at `phrase_index` is fully rendered
    Typed { phrase_index: usize },
    /// The phrase at `phrase_index` has been typed and deleted again
    CycleCompleted { phrase_index: usize },
}

/// Result of delivering a timer to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not our pending timer, or the sequencer is stopped. Nothing changed.
    Ignored,
    /// One transition happened
    Advanced(Option<PhraseEvent>),
}

#[derive(Debug)]
pub struct PhraseSequencer {
    phrases: PhraseList,
    timing: PhraseTiming,
    state: TypingState,
    rendered_chars: usize,
    pending: Option<TimerId>,
}

impl PhraseSequencer {
    /// Validate the timing and schedule the first tick
    ///
    /// Nothing is scheduled when validation fails.
    pub fn start(phrases: PhraseList, timing: PhraseTiming, timeline: &mut Timeline) -> Result<Self> {
        timing.validate()?;

        let state = TypingState {
            phrase_index: 0,
            rendered_text: String::new(),
            mode: TypingMode::Typing,
            tick_delay_ms: timing.typing_delay_ms,
        };
        let pending = Some(timeline.schedule(
            TimerKind::PhraseTick,
            Duration::from_millis(state.tick_delay_ms),
        ));

        tracing::debug!(phrases = phrases.len(), "phrase sequencer started");

        Ok(Self {
            phrases,
            timing,
            state,
            rendered_chars: 0,
            pending,
        })
    }

    pub fn state(&self) -> &TypingState {
        &self.state
    }

    pub fn phrases(&self) -> &PhraseList {
        &self.phrases
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a fired timer: exactly one transition, then reschedule
    pub fn tick(&mut self, id: TimerId, timeline: &mut Timeline) -> TickOutcome {
        if self.pending != Some(id) {
            tracing::warn!(?id, "ignoring stale phrase tick");
            return TickOutcome::Ignored;
        }

        let event = self.transition();
        self.state.tick_delay_ms = self.timing.delay_for(self.state.mode);
        self.pending = Some(timeline.schedule(
            TimerKind::PhraseTick,
            Duration::from_millis(self.state.tick_delay_ms),
        ));

        tracing::trace!(
            phrase_index = self.state.phrase_index,
            mode = %self.state.mode,
            text = %self.state.rendered_text,
            "phrase tick"
        );

        TickOutcome::Advanced(event)
    }

    fn transition(&mut self) -> Option<PhraseEvent> {
        let phrase_index = self.state.phrase_index;

        match self.state.mode {
            TypingMode::Typing => {
                let phrase = self.phrases.get(phrase_index);
                if let Some(next) = phrase.chars().nth(self.rendered_chars) {
                    self.state.rendered_text.push(next);
                    self.rendered_chars += 1;
                }

                if self.state.rendered_text.len() == phrase.len() {
                    self.state.mode = TypingMode::Pausing;
                    tracing::debug!(phrase_index, "phrase typed");
                    return Some(PhraseEvent::Typed { phrase_index });
                }
                None
            }
            TypingMode::Pausing => {
                self.state.mode = TypingMode::Deleting;
                None
            }
            TypingMode::Deleting => {
                if self.state.rendered_text.pop().is_some() {
                    self.rendered_chars -= 1;
                }

                if self.state.rendered_text.is_empty() {
                    self.state.phrase_index = (phrase_index + 1) % self.phrases.len();
                    self.state.mode = TypingMode::Typing;
                    tracing::debug!(phrase_index, "phrase cycle completed");
                    return Some(PhraseEvent::CycleCompleted { phrase_index });
                }
                None
            }
        }
    }

    /// Cancel the pending tick. Calling it again is a no-op.
    pub fn stop(&mut self, timeline: &mut Timeline) {
        if let Some(id) = self.pending.take() {
            timeline.cancel(id);
            tracing::debug!("phrase sequencer stopped");
        }
    }
}
