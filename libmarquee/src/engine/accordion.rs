//! Accordion controller
//!
//! Independent open/closed flags for named sections. Opening one section never
//! closes another.

use crate::error::{MarqueeError, Result};
use crate::types::{AccordionState, SectionState};

#[derive(Debug, Default)]
pub struct AccordionController {
    sections: Vec<SectionState>,
}

impl AccordionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closed section
    pub fn register_section(&mut self, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        if self.position(&id).is_some() {
            return Err(MarqueeError::DuplicateSection(id));
        }
        self.sections.push(SectionState { id, is_open: false });
        Ok(())
    }

    /// Flip a section, returning its new state
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let index = self
            .position(id)
            .ok_or_else(|| MarqueeError::UnknownSection(id.to_string()))?;

        let section = &mut self.sections[index];
        section.is_open = !section.is_open;
        Ok(section.is_open)
    }

    pub fn is_open(&self, id: &str) -> Option<bool> {
        self.position(id).map(|index| self.sections[index].is_open)
    }

    pub fn state(&self) -> AccordionState {
        AccordionState {
            sections: self.sections.clone(),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }
}
