//! Understanding channel and the per-task listener buffering it.
//!
//! Deliveries may come from any thread (`NluSensor::publish`). The polling
//! tick only ever sees the listener through `UnderstandingSource`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use uuid::Uuid;

use super::error::SourceError;
use super::event::Understanding;

type Buffer = Arc<Mutex<Vec<Understanding>>>;

fn lock(buffer: &Mutex<Vec<Understanding>>) -> MutexGuard<'_, Vec<Understanding>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Non-blocking view of an asynchronous understanding feed.
pub trait UnderstandingSource: Send {
    fn attach(&mut self) -> Result<(), SourceError>;
    /// Idempotent.
    fn detach(&mut self);
    fn is_attached(&self) -> bool;
    /// True if anything arrived since the last drain.
    fn has_pending(&self) -> bool;
    /// Everything since the previous drain, arrival order. Clears the buffer.
    fn drain_all(&mut self) -> Vec<Understanding>;
}

struct SensorInner {
    key: String,
    available: AtomicBool,
    listeners: Mutex<HashMap<Uuid, Buffer>>,
}

/// In-process understanding channel. Cheap to clone, all clones share listeners.
#[derive(Clone)]
pub struct NluSensor {
    inner: Arc<SensorInner>,
}

impl NluSensor {
    pub fn new(key: &str) -> Self {
        Self {
            inner: Arc::new(SensorInner {
                key: key.to_string(),
                available: AtomicBool::new(true),
                listeners: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// An unavailable sensor refuses new listeners. Attached ones keep receiving.
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.inner.available.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    /// Fans `understanding` out to every attached listener. Returns how many got it.
    pub fn publish(&self, understanding: Understanding) -> usize {
        let listeners = self.listeners();
        for buffer in listeners.values() {
            lock(buffer).push(understanding.clone());
        }
        listeners.len()
    }

    /// Fresh, detached listener on this channel.
    pub fn listener(&self) -> SensorListener {
        SensorListener {
            id: Uuid::new_v4(),
            sensor: self.clone(),
            buffer: Arc::new(Mutex::new(Vec::new())),
            attached: false,
        }
    }

    fn listeners(&self) -> MutexGuard<'_, HashMap<Uuid, Buffer>> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for NluSensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NluSensor")
            .field("key", &self.inner.key)
            .field("available", &self.is_available())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// One task's subscription. Detaches itself when dropped.
pub struct SensorListener {
    id: Uuid,
    sensor: NluSensor,
    buffer: Buffer,
    attached: bool,
}

impl UnderstandingSource for SensorListener {
    fn attach(&mut self) -> Result<(), SourceError> {
        if self.attached {
            return Ok(());
        }
        if !self.sensor.is_available() {
            return Err(SourceError::Unavailable(self.sensor.key().to_string()));
        }
        self.sensor.listeners().insert(self.id, self.buffer.clone());
        self.attached = true;
        debug!("listener {} attached to '{}'", self.id, self.sensor.key());
        Ok(())
    }

    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.sensor.listeners().remove(&self.id);
        self.attached = false;
        debug!("listener {} detached from '{}'", self.id, self.sensor.key());
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn has_pending(&self) -> bool {
        !lock(&self.buffer).is_empty()
    }

    fn drain_all(&mut self) -> Vec<Understanding> {
        std::mem::take(&mut *lock(&self.buffer))
    }
}

impl Drop for SensorListener {
    fn drop(&mut self) {
        self.detach();
    }
}
