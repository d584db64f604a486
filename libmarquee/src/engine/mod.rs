//! Typewriter and staggered reveal engine
//!
//! - `timeline`: virtual clock and pending timers
//! - `phrase`: type/pause/delete state machine over a phrase list
//! - `reveal`: staggered visibility of content blocks
//! - `accordion`: independent collapsible sections
//! - `orchestrator`: wires the above together and publishes snapshots

pub mod accordion;
pub mod orchestrator;
pub mod phrase;
pub mod reveal;
pub mod timeline;

pub use accordion::AccordionController;
pub use orchestrator::{Orchestrator, MAX_ADVANCE};
pub use phrase::{PhraseEvent, PhraseList, PhraseSequencer, PhraseTiming, TickOutcome};
pub use reveal::RevealSequencer;
pub use timeline::{Timeline, TimerId, TimerKind};
