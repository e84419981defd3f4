use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::config::WaitConfig;
use super::error::TaskError;
use super::intent::IntentMatcher;
use super::memory::ResultSink;
use super::signal::ExitSignal;
use super::source::UnderstandingSource;
use super::speech::{enable_asr_best_effort, SpeechActuator};
use super::telemetry::{TaskEvent, TelemetryRecorder};
use super::time::{Deadline, LOOP_DELAY_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Configuring,
    Listening,
    /// Terminal. The listener is detached on entry.
    Completed,
}

/// Collaborators a task is wired to at setup.
pub struct TaskParts {
    pub source: Box<dyn UnderstandingSource>,
    pub sink: ResultSink,
    pub actuator: Option<Arc<dyn SpeechActuator>>,
}

/// Waits for an understanding matching the configured policy.
///
/// Driven by repeated `tick` calls; never blocks inside a tick.
pub struct WaitTask {
    config: WaitConfig,
    matcher: IntentMatcher,
    source: Box<dyn UnderstandingSource>,
    sink: ResultSink,
    actuator: Option<Arc<dyn SpeechActuator>>,
    deadline: Deadline,
    state: TaskState,
    exit: Option<ExitSignal>,
    pub telemetry: TelemetryRecorder,
}

impl WaitTask {
    pub fn new(config: WaitConfig, parts: TaskParts) -> Self {
        Self {
            matcher: IntentMatcher::new(config.policy.clone()),
            config,
            source: parts.source,
            sink: parts.sink,
            actuator: parts.actuator,
            deadline: Deadline::never(),
            state: TaskState::Configuring,
            exit: None,
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn config(&self) -> &WaitConfig {
        &self.config
    }

    /// Terminal signal, once one has been emitted.
    pub fn exit(&self) -> Option<&ExitSignal> {
        self.exit.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_attached()
    }

    /// Configuring -> Listening.
    ///
    /// Arms the deadline from `now`, then enables ASR (bounded, best effort)
    /// and attaches the listener. Neither failure is propagated: the task
    /// keeps listening and can then only end by timing out.
    pub async fn start(&mut self, now: u64) {
        if self.state != TaskState::Configuring {
            warn!("start ignored, task already {:?}", self.state);
            return;
        }

        self.deadline = Deadline::start(self.config.timeout_ms, now);
        if self.deadline.is_set() {
            debug!("using timeout of {} ms", self.config.timeout_ms);
        }

        let asr_enabled = match &self.actuator {
            Some(actuator) => enable_asr_best_effort(actuator.as_ref()).await,
            None => false,
        };

        let attached = match self.source.attach() {
            Ok(()) => true,
            Err(e) => {
                warn!("{}, listening without input", e);
                false
            }
        };

        self.telemetry.record(TaskEvent::Started {
            deadline_ms: self.deadline.expires_at(),
            attached,
            asr_enabled,
        });
        self.state = TaskState::Listening;
    }

    /// One scheduling step.
    ///
    /// After completion the recorded terminal signal is repeated unchanged;
    /// nothing is drained or written again. Ticking a task that never
    /// started (or was ended without a terminal signal) reports misuse as
    /// `Fatal(NotListening)` and changes nothing.
    ///
    /// Pending data takes priority over the deadline: a batch present in the
    /// tick the deadline expires is still matched. A drained batch without a
    /// winner is discarded.
    pub fn tick(&mut self, now: u64) -> ExitSignal {
        match (self.state, &self.exit) {
            (TaskState::Listening, _) => {}
            (TaskState::Completed, Some(exit)) => return exit.clone(),
            (state, _) => {
                error!("tick while {:?}", state);
                return ExitSignal::Fatal(TaskError::NotListening(state));
            }
        }

        if !self.source.has_pending() {
            if self.deadline.is_expired(now) {
                info!("timeout reached");
                self.telemetry.record(TaskEvent::TimedOut { at_ms: now });
                return self.complete(ExitSignal::TimedOut);
            }
            return self.keep_listening();
        }

        debug!("have new understanding...");
        let batch = self.source.drain_all();
        self.telemetry.record(TaskEvent::BatchDrained { size: batch.len() });

        let Some(selection) = self.matcher.select(&batch) else {
            self.telemetry
                .record(TaskEvent::BatchDiscarded { size: batch.len() });
            return self.keep_listening();
        };

        match self.sink.commit(&selection.understanding) {
            Ok(()) => {
                info!("understood \"{}\" -> {}", selection.understanding.intent, selection.key);
                self.telemetry.record(TaskEvent::Matched {
                    key: selection.key.to_string(),
                });
                self.complete(ExitSignal::Matched(selection.key))
            }
            Err(e) => {
                self.telemetry.record(TaskEvent::Fatal);
                self.complete(ExitSignal::Fatal(e.into()))
            }
        }
    }

    /// Engine teardown, valid in any state. Detaches and leaves the task
    /// Completed. Returns the terminal signal if one was emitted.
    pub fn end(&mut self) -> Option<ExitSignal> {
        self.detach();
        self.state = TaskState::Completed;
        self.exit.clone()
    }

    fn keep_listening(&mut self) -> ExitSignal {
        self.telemetry.record(TaskEvent::Looped);
        ExitSignal::Loop {
            delay_ms: LOOP_DELAY_MS,
        }
    }

    fn complete(&mut self, signal: ExitSignal) -> ExitSignal {
        self.detach();
        self.state = TaskState::Completed;
        self.exit = Some(signal.clone());
        signal
    }

    fn detach(&mut self) {
        if self.source.is_attached() {
            self.source.detach();
            self.telemetry.record(TaskEvent::Detached);
        }
    }
}
