use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::kernel::error::CommunicationError;

/// Write side of a named shared-memory slot.
pub trait MemorySlot<T>: Send {
    fn name(&self) -> &str;
    fn memorize(&mut self, value: &T) -> Result<(), CommunicationError>;
}

/// In-process slot. Clones share the stored value, so the writer can be
/// handed to a task while the owner keeps reading.
#[derive(Debug)]
pub struct SharedSlot<T> {
    name: String,
    value: Arc<Mutex<Option<T>>>,
    writable: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl<T> Clone for SharedSlot<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value.clone(),
            writable: self.writable.clone(),
            writes: self.writes.clone(),
        }
    }
}

impl<T: Clone> SharedSlot<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Arc::new(Mutex::new(None)),
            writable: Arc::new(AtomicBool::new(true)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn get(&self) -> Option<T> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Simulates the backing medium going away (or coming back).
    pub fn set_writable(&self, writable: bool) {
        self.writable.store(writable, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl<T: Clone + Send> MemorySlot<T> for SharedSlot<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn memorize(&mut self, value: &T) -> Result<(), CommunicationError> {
        if !self.writable.load(Ordering::SeqCst) {
            return Err(CommunicationError {
                slot: self.name.clone(),
                reason: "memory unavailable".to_string(),
            });
        }
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_value() {
        let slot: SharedSlot<u32> = SharedSlot::new("Counter");
        let mut writer = slot.clone();
        writer.memorize(&7).unwrap();
        assert_eq!(slot.get(), Some(7));
        assert_eq!(slot.write_count(), 1);
    }

    #[test]
    fn unwritable_slot_rejects_and_keeps_old_value() {
        let slot: SharedSlot<u32> = SharedSlot::new("Counter");
        let mut writer = slot.clone();
        writer.memorize(&1).unwrap();
        slot.set_writable(false);

        let err = writer.memorize(&2).unwrap_err();
        assert_eq!(err.slot, "Counter");
        assert_eq!(slot.get(), Some(1));
        assert_eq!(slot.write_count(), 1);
    }
}
