use std::fmt;

use super::error::TaskError;
use super::intent::types::ExitKey;

/// Outcome of one scheduling tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitSignal {
    /// Not decided yet. Call again after `delay_ms`.
    Loop { delay_ms: u64 },
    /// Exit key of the winning intent, or the wildcard key.
    Matched(ExitKey),
    TimedOut,
    Fatal(TaskError),
}

impl ExitSignal {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExitSignal::Loop { .. })
    }

    /// Status routed to the surrounding engine. `None` for `Loop`.
    pub fn status(&self) -> Option<ExitStatus> {
        match self {
            ExitSignal::Loop { .. } => None,
            ExitSignal::Matched(key) => Some(ExitStatus::from(key)),
            ExitSignal::TimedOut => Some(ExitStatus::ErrorTimeout),
            ExitSignal::Fatal(_) => Some(ExitStatus::Fatal),
        }
    }
}

/// Engine-facing exit names: `success`, `success.<intent>`, `error.timeout`, `fatal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExitStatus {
    Success(Option<String>),
    ErrorTimeout,
    Fatal,
}

impl From<&ExitKey> for ExitStatus {
    fn from(key: &ExitKey) -> Self {
        match key {
            ExitKey::Wildcard => ExitStatus::Success(None),
            ExitKey::Intent(intent) => ExitStatus::Success(Some(intent.clone())),
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Success(None) => write!(f, "success"),
            ExitStatus::Success(Some(intent)) => write!(f, "success.{}", intent),
            ExitStatus::ErrorTimeout => write!(f, "error.timeout"),
            ExitStatus::Fatal => write!(f, "fatal"),
        }
    }
}
