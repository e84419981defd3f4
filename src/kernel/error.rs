use thiserror::Error;

use super::task::TaskState;

/// Setup failures. Raised before the first tick and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot use '{any}' and '{intents}' together")]
    MutuallyExclusive {
        any: &'static str,
        intents: &'static str,
    },

    #[error("missing required option '{0}'")]
    MissingOption(&'static str),

    #[error("option '{key}' has invalid value '{value}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("option '{0}' lists no usable intents")]
    EmptyIntentList(&'static str),

    #[error("intent '{0}' is listed more than once")]
    DuplicateIntent(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("no sensor registered under '{0}'")]
    UnknownSensor(String),

    #[error("malformed option source: {0}")]
    Malformed(String),
}

/// Shared-memory write rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot write slot '{slot}': {reason}")]
pub struct CommunicationError {
    pub slot: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("understanding channel '{0}' is unavailable")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorError {
    #[error("speech actuator rejected request: {0}")]
    Rejected(String),

    #[error("speech actuator unreachable")]
    Unreachable,
}

/// Cause carried by `ExitSignal::Fatal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error(transparent)]
    Communication(#[from] CommunicationError),

    #[error("task ticked while {0:?}")]
    NotListening(TaskState),
}
