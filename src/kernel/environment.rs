use std::collections::HashMap;
use std::sync::Arc;

use super::config::{TaskOptions, WaitConfig};
use super::error::ConfigError;
use super::event::{LanguageTag, Understanding};
use super::memory::{MemorySlot, ResultSink, SharedSlot, LANGUAGE_SLOT, NLU_SLOT};
use super::source::NluSensor;
use super::speech::SpeechActuator;
use super::task::{TaskParts, WaitTask};

/// What the engine offers a task at setup: sensors by key, the write
/// slots and the speech actuator.
pub struct TaskEnvironment {
    sensors: HashMap<String, NluSensor>,
    pub nlu_slot: SharedSlot<Understanding>,
    pub language_slot: SharedSlot<LanguageTag>,
    actuator: Option<Arc<dyn SpeechActuator>>,
}

impl TaskEnvironment {
    pub fn new() -> Self {
        Self {
            sensors: HashMap::new(),
            nlu_slot: SharedSlot::new(NLU_SLOT),
            language_slot: SharedSlot::new(LANGUAGE_SLOT),
            actuator: None,
        }
    }

    pub fn with_sensor(mut self, sensor: NluSensor) -> Self {
        self.sensors.insert(sensor.key().to_string(), sensor);
        self
    }

    pub fn with_actuator(mut self, actuator: Arc<dyn SpeechActuator>) -> Self {
        self.actuator = Some(actuator);
        self
    }

    pub fn build_task(&self, options: &TaskOptions) -> Result<WaitTask, ConfigError> {
        self.build_with(WaitConfig::from_options(options)?)
    }

    /// The `Language` slot is only wired when `set_language` is on.
    pub fn build_with(&self, config: WaitConfig) -> Result<WaitTask, ConfigError> {
        let sensor = self
            .sensors
            .get(&config.sensor_key)
            .ok_or_else(|| ConfigError::UnknownSensor(config.sensor_key.clone()))?;

        let language: Option<Box<dyn MemorySlot<LanguageTag>>> = if config.set_language {
            Some(Box::new(self.language_slot.clone()))
        } else {
            None
        };

        let parts = TaskParts {
            source: Box::new(sensor.listener()),
            sink: ResultSink::new(Box::new(self.nlu_slot.clone()), language),
            actuator: self.actuator.clone(),
        };
        Ok(WaitTask::new(config, parts))
    }
}

impl Default for TaskEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
