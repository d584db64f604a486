//! Reveal sequencer
//!
//! Staggers the appearance of a fixed number of content blocks. An episode
//! starts when a phrase finishes typing and ends when every block is visible
//! or the phrase cycle completes, whichever comes first.

use std::time::Duration;

use crate::engine::timeline::{Timeline, TimerId, TimerKind};
use crate::error::{MarqueeError, Result};
use crate::types::RevealState;

pub const DEFAULT_REVEAL_STEP_DELAY_MS: u64 = 700;

#[derive(Debug)]
pub struct RevealSequencer {
    step_delay: Duration,
    block_count: Option<usize>,
    revealed_count: usize,
    pending: Option<TimerId>,
}

impl RevealSequencer {
    pub fn new(step_delay_ms: u64) -> Result<Self> {
        if step_delay_ms == 0 {
            return Err(MarqueeError::InvalidConfig(
                "reveal_step_delay_ms must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            step_delay: Duration::from_millis(step_delay_ms),
            block_count: None,
            revealed_count: 0,
            pending: None,
        })
    }

    /// Fix the number of blocks. Only allowed once.
    pub fn register(&mut self, block_count: usize) -> Result<()> {
        if self.block_count.is_some() {
            return Err(MarqueeError::AlreadyRegistered);
        }
        self.block_count = Some(block_count);
        Ok(())
    }

    fn block_count(&self) -> usize {
        self.block_count.unwrap_or(0)
    }

    pub fn state(&self) -> RevealState {
        RevealState {
            revealed_count: self.revealed_count,
            block_count: self.block_count(),
        }
    }

    pub fn has_pending_step(&self) -> bool {
        self.pending.is_some()
    }

    /// Start an episode if none is in progress. Returns true if state changed.
    pub fn on_phrase_typed(&mut self, timeline: &mut Timeline) -> bool {
        if self.revealed_count != 0 || self.block_count() == 0 {
            return false;
        }

        self.revealed_count = 1;
        self.schedule_if_incomplete(timeline);
        tracing::debug!(revealed = 1, blocks = self.block_count(), "reveal episode started");
        true
    }

    /// Handle a fired step timer. Returns true if state changed.
    pub fn step(&mut self, id: TimerId, timeline: &mut Timeline) -> bool {
        if self.pending != Some(id) {
            tracing::warn!(?id, "ignoring stale reveal step");
            return false;
        }
        self.pending = None;

        if self.revealed_count >= self.block_count() {
            return false;
        }

        self.revealed_count += 1;
        self.schedule_if_incomplete(timeline);
        tracing::trace!(revealed = self.revealed_count, "reveal step");
        true
    }

    fn schedule_if_incomplete(&mut self, timeline: &mut Timeline) {
        if self.revealed_count < self.block_count() {
            self.pending = Some(timeline.schedule(TimerKind::RevealStep, self.step_delay));
        }
    }

    /// End the episode: hide everything and drop the pending step.
    /// Returns true if state changed.
    pub fn on_phrase_cycle_completed(&mut self, timeline: &mut Timeline) -> bool {
        self.cancel(timeline);
        let changed = self.revealed_count != 0;
        self.revealed_count = 0;
        changed
    }

    /// Drop the pending step, keeping the current count
    pub fn cancel(&mut self, timeline: &mut Timeline) {
        if let Some(id) = self.pending.take() {
            timeline.cancel(id);
        }
    }
}
