//! Event bus for snapshots and milestones
//!
//! The orchestrator publishes a [`Snapshot`] on every state change plus the
//! phrase milestones and section toggles that caused them. Any number of
//! presentation layers can listen.
//!
//! # Non-Blocking Behavior
//!
//! The bus is a `tokio::sync::broadcast` channel. Emitting with no
//! subscribers drops the event; a lagging subscriber loses the oldest events
//! instead of blocking the engine. Synchronous consumers use `try_recv`.
//!
//! # Example
//!
//! ```
//! use libmarquee::events::{Event, EventBus};
//!
//! let bus = EventBus::new(16);
//! let mut receiver = bus.subscribe();
//!
//! bus.emit(Event::PhraseTyped { phrase_index: 0 });
//!
//! assert!(matches!(receiver.try_recv(), Ok(Event::PhraseTyped { phrase_index: 0 })));
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::Snapshot;

/// Default per-subscriber buffer
pub const DEFAULT_CAPACITY: usize = 256;

pub type EventReceiver = broadcast::Receiver<Event>;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber.
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: Event) {
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Everything the engine publishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Latest composite state
    Snapshot(Snapshot),

    /// A phrase finished typing
    PhraseTyped { phrase_index: usize },

    /// A phrase finished deleting; typing of the next one begins
    PhraseCycleCompleted { phrase_index: usize },

    /// A section was opened or closed
    SectionToggled { id: String, is_open: bool },

    /// The orchestrator stopped; no further events follow
    Stopped,
}
