use tracing::error;

use super::slot::MemorySlot;
use crate::kernel::error::CommunicationError;
use crate::kernel::event::{LanguageTag, Understanding};

pub const NLU_SLOT: &str = "NLUSlot";
pub const LANGUAGE_SLOT: &str = "Language";

/// Where a matched understanding ends up.
pub struct ResultSink {
    understanding: Box<dyn MemorySlot<Understanding>>,
    language: Option<Box<dyn MemorySlot<LanguageTag>>>,
}

impl ResultSink {
    pub fn new(
        understanding: Box<dyn MemorySlot<Understanding>>,
        language: Option<Box<dyn MemorySlot<LanguageTag>>>,
    ) -> Self {
        Self {
            understanding,
            language,
        }
    }

    pub fn write_understanding(&mut self, u: &Understanding) -> Result<(), CommunicationError> {
        self.understanding.memorize(u)
    }

    /// No-op when language capture is not configured.
    pub fn write_language_tag(&mut self, tag: &LanguageTag) -> Result<(), CommunicationError> {
        match self.language.as_mut() {
            Some(slot) => slot.memorize(tag),
            None => Ok(()),
        }
    }

    /// Primary write, then the language tag. Both share fate: the first
    /// failure aborts and the second write is never attempted after a
    /// primary failure.
    pub fn commit(&mut self, u: &Understanding) -> Result<(), CommunicationError> {
        if let Err(e) = self.write_understanding(u) {
            error!("Can not write understanding '{}' to memory: {}", u.intent, e);
            return Err(e);
        }
        if let Err(e) = self.write_language_tag(&LanguageTag::from(u)) {
            error!("Can not write language of '{}' to memory: {}", u.intent, e);
            return Err(e);
        }
        Ok(())
    }
}
