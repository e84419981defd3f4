//! Task telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. It must **NEVER** be read
//! inside decision logic (WaitTask, IntentMatcher).
//!
//! # PRIVACY INVARIANT
//! Events never carry utterance content. Intent names are configuration,
//! not user content, and may appear.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::TaskEvent;
pub use metrics::TelemetrySnapshot;
pub use recorder::TelemetryRecorder;
