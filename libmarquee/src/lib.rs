//! Marquee - typewriter headlines and staggered reveals for landing pages
//!
//! This library provides the state machine behind an animated landing page:
//! a headline that types and deletes a rotating list of phrases, content
//! blocks that appear one after another once a phrase is typed, and
//! collapsible sections. Presentation layers subscribe to snapshots and
//! render them; the engine itself does no I/O.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod presets;
pub mod types;

// Re-export commonly used types
pub use config::{EngineConfig, LandingConfig, PageContent};
pub use engine::Orchestrator;
pub use error::{ConfigError, MarqueeError, Result};
pub use events::{Event, EventBus, EventReceiver};
pub use types::{AccordionState, RevealState, SectionState, Snapshot, TypingMode, TypingState};
