use std::collections::VecDeque;

use super::event::TaskEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub loops: u64,
    pub batches_drained: u64,
    pub understandings_drained: u64,
    pub batches_discarded: u64,
    pub understandings_discarded: u64,
    pub matches: u64,
    pub timeouts: u64,
    pub fatals: u64,
    pub detaches: u64,
}

impl TelemetrySnapshot {
    pub fn terminals(&self) -> u64 {
        self.matches + self.timeouts + self.fatals
    }
}

pub fn compute_snapshot(events: &VecDeque<TaskEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TaskEvent::Looped => snap.loops += 1,
            TaskEvent::BatchDrained { size } => {
                snap.batches_drained += 1;
                snap.understandings_drained += *size as u64;
            }
            TaskEvent::BatchDiscarded { size } => {
                snap.batches_discarded += 1;
                snap.understandings_discarded += *size as u64;
            }
            TaskEvent::Matched { .. } => snap.matches += 1,
            TaskEvent::TimedOut { .. } => snap.timeouts += 1,
            TaskEvent::Fatal => snap.fatals += 1,
            TaskEvent::Detached => snap.detaches += 1,
            TaskEvent::Started { .. } => {}
        }
    }

    snap
}
