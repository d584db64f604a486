//! State snapshots published by the engine

use serde::{Deserialize, Serialize};

/// What the phrase sequencer does on its next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingMode {
    Typing,
    Pausing,
    Deleting,
}

impl std::fmt::Display for TypingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypingMode::Typing => write!(f, "typing"),
            TypingMode::Pausing => write!(f, "pausing"),
            TypingMode::Deleting => write!(f, "deleting"),
        }
    }
}

/// Typewriter state
///
/// `rendered_text` is always a prefix (in chars) of the phrase at
/// `phrase_index`. `tick_delay_ms` is the delay of the pending tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingState {
    pub phrase_index: usize,
    pub rendered_text: String,
    pub mode: TypingMode,
    pub tick_delay_ms: u64,
}

impl TypingState {
    /// Number of characters currently rendered
    pub fn rendered_len(&self) -> usize {
        self.rendered_text.chars().count()
    }
}

/// Staggered reveal progress over `block_count` content blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevealState {
    pub revealed_count: usize,
    pub block_count: usize,
}

impl RevealState {
    /// Blocks are revealed strictly in order, so block `i` is visible iff `i < revealed_count`
    pub fn is_revealed(&self, block: usize) -> bool {
        block < self.revealed_count
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_count == self.block_count
    }
}

/// One collapsible section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionState {
    pub id: String,
    pub is_open: bool,
}

/// Open/closed flags in registration order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccordionState {
    pub sections: Vec<SectionState>,
}

impl AccordionState {
    pub fn is_open(&self, id: &str) -> Option<bool> {
        self.sections
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.is_open)
    }

    pub fn open_count(&self) -> usize {
        self.sections.iter().filter(|section| section.is_open).count()
    }
}

/// Composite, immutable read of all engine state at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub typing: TypingState,
    pub reveal: RevealState,
    pub accordion: AccordionState,
    /// False once the orchestrator has been stopped
    pub running: bool,
}
