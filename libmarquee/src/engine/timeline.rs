//! Single-threaded virtual timeline
//!
//! Every transition in the engine happens inside a timer firing, and every
//! timer lives here. The clock only moves when the owner pops due timers, so
//! firings are serialized on one logical timeline and tests control time
//! exactly. A real-time driver feeds wall-clock deltas instead.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Which component a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    PhraseTick,
    RevealStep,
}

#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    next_id: u64,
    // Keyed by (deadline, id) so equal deadlines fire in scheduling order
    queue: BTreeMap<(Duration, TimerId), TimerKind>,
    deadlines: HashMap<TimerId, Duration>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the timeline was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a timer due `delay` from now
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let deadline = self.now.saturating_add(delay);
        self.queue.insert((deadline, id), kind);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove the earliest timer due at or before `until`, moving the clock to its deadline
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, TimerKind)> {
        let (&(deadline, id), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }

        let kind = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, kind))
    }

    /// Move the clock forward without firing anything.
    /// Never moves backwards and never past a pending deadline.
    pub fn advance_to(&mut self, until: Duration) {
        let bound = self.next_deadline().map_or(until, |deadline| deadline.min(until));
        self.now = self.now.max(bound);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.queue.values().filter(|k| **k == kind).count()
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }
}
