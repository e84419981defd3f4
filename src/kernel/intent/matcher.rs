use super::types::{ExitKey, MatchingPolicy, Selection};
use crate::kernel::event::Understanding;

/// Pure batch selection. Never touches the source or the sink.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    policy: MatchingPolicy,
}

impl IntentMatcher {
    pub fn new(policy: MatchingPolicy) -> Self {
        Self { policy }
    }

    /// Picks at most one understanding from `batch`.
    ///
    /// - Wildcard: index 0, the rest of the batch is ignored.
    /// - IntentSet: configured order beats arrival order. The first configured
    ///   intent with any match in the batch wins; within that intent the
    ///   earliest delivery is taken.
    pub fn select(&self, batch: &[Understanding]) -> Option<Selection> {
        match &self.policy {
            MatchingPolicy::Wildcard => batch.first().map(|u| Selection {
                understanding: u.clone(),
                key: ExitKey::Wildcard,
            }),
            MatchingPolicy::IntentSet(intents) => intents.iter().find_map(|intent| {
                batch
                    .iter()
                    .find(|u| u.intent == *intent)
                    .map(|u| Selection {
                        understanding: u.clone(),
                        key: ExitKey::Intent(intent.clone()),
                    })
            }),
        }
    }
}
