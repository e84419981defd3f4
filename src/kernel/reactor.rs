use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::signal::ExitSignal;
use super::task::{TaskState, WaitTask};
use super::time::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Exited(ExitSignal),
    /// Stopped from outside before a terminal signal.
    Cancelled,
}

/// Async driver: ticks a task, sleeps for every `Loop`, ends it on exit or
/// cancellation.
pub struct Reactor<C: Clock> {
    clock: C,
    cancel: CancellationToken,
}

impl<C: Clock> Reactor<C> {
    pub fn new(clock: C, cancel: CancellationToken) -> Self {
        Self { clock, cancel }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub async fn run(&self, task: &mut WaitTask) -> RunOutcome {
        if task.state() == TaskState::Configuring {
            let cancelled = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => true,
                _ = task.start(self.clock.now_ms()) => false,
            };
            if cancelled {
                return self.abort(task);
            }
        }

        let mut ticks: u64 = 0;
        loop {
            if self.cancel.is_cancelled() {
                return self.abort(task);
            }

            ticks += 1;
            match task.tick(self.clock.now_ms()) {
                ExitSignal::Loop { delay_ms } => {
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => return self.abort(task),
                        _ = sleep(Duration::from_millis(delay_ms)) => {}
                    }
                }
                terminal => {
                    task.end();
                    if let Some(status) = terminal.status() {
                        info!("task exited with {} after {} ticks", status, ticks);
                    }
                    return RunOutcome::Exited(terminal);
                }
            }
        }
    }

    fn abort(&self, task: &mut WaitTask) -> RunOutcome {
        info!("task cancelled in {:?}", task.state());
        task.end();
        RunOutcome::Cancelled
    }
}
