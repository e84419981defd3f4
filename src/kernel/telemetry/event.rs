use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskEvent {
    Started {
        deadline_ms: Option<u64>,
        attached: bool,
        asr_enabled: bool,
    },
    Looped,
    BatchDrained {
        size: usize,
    },
    /// Drained batch had no winner and is gone for good.
    BatchDiscarded {
        size: usize,
    },
    Matched {
        key: String,
    },
    TimedOut {
        at_ms: u64,
    },
    Fatal,
    Detached,
}
