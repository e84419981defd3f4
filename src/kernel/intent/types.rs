use std::collections::HashSet;
use std::fmt;

use crate::kernel::config::KEY_INTENTS;
use crate::kernel::error::ConfigError;
use crate::kernel::event::Understanding;

/// Display name of the wildcard exit key.
pub const WILDCARD_KEY: &str = "any";

/// Which exit a match takes. The wildcard never collides with an intent,
/// even one literally named "any".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExitKey {
    Wildcard,
    Intent(String),
}

impl From<&str> for ExitKey {
    fn from(intent: &str) -> Self {
        ExitKey::Intent(intent.to_string())
    }
}

impl fmt::Display for ExitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKey::Wildcard => write!(f, "{}", WILDCARD_KEY),
            ExitKey::Intent(intent) => write!(f, "{}", intent),
        }
    }
}

/// Which understandings count as a match. Fixed for the lifetime of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingPolicy {
    /// First delivered understanding wins, whatever its intent.
    Wildcard,
    /// Declared order is the priority. Each intent is its own exit key.
    IntentSet(Vec<String>),
}

impl MatchingPolicy {
    /// Builds an `IntentSet`, rejecting empty and duplicated lists.
    pub fn intent_set<I, S>(intents: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let intents: Vec<String> = intents.into_iter().map(Into::into).collect();
        if intents.is_empty() {
            return Err(ConfigError::EmptyIntentList(KEY_INTENTS));
        }
        let mut seen = HashSet::new();
        for intent in &intents {
            if !seen.insert(intent.as_str()) {
                return Err(ConfigError::DuplicateIntent(intent.clone()));
            }
        }
        Ok(MatchingPolicy::IntentSet(intents))
    }

    /// Every exit key this policy can produce, in declaration order.
    pub fn exit_keys(&self) -> Vec<ExitKey> {
        match self {
            MatchingPolicy::Wildcard => vec![ExitKey::Wildcard],
            MatchingPolicy::IntentSet(intents) => intents
                .iter()
                .map(|intent| ExitKey::Intent(intent.clone()))
                .collect(),
        }
    }
}

/// Winner of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub understanding: Understanding,
    pub key: ExitKey,
}
