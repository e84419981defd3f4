//! Task options as handed over by the engine, and their validated form.
//!
//! Options arrive string-typed. They are parsed exactly once, before the
//! first tick; anything wrong here is a setup failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::intent::types::MatchingPolicy;
use super::signal::ExitStatus;

pub const KEY_ANY: &str = "any";
pub const KEY_INTENTS: &str = "intents";
pub const KEY_TIMEOUT: &str = "timeout";
pub const KEY_SET_LANGUAGE: &str = "set_language";
pub const KEY_SENSOR: &str = "sensor_key";

const KNOWN_KEYS: [&str; 5] = [KEY_ANY, KEY_INTENTS, KEY_TIMEOUT, KEY_SET_LANGUAGE, KEY_SENSOR];

pub const DEFAULT_SENSOR_KEY: &str = "NLUSensor";
pub const DEFAULT_TIMEOUT_MS: i64 = -1;
pub const INTENT_SEPARATOR: char = ';';

/// Raw string options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskOptions(BTreeMap<String, String>);

impl TaskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Parses `key=value` pairs, e.g. command line arguments.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::Malformed(format!("expected key=value, got '{}'", pair)))?;
            options.insert(key.trim(), value);
        }
        Ok(options)
    }

    /// Parses a flat JSON object. Booleans and numbers are kept in their textual form.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;

        let mut options = Self::new();
        for (key, value) in map {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(ConfigError::Malformed(format!(
                        "option '{}' must be a string, boolean or number, got {}",
                        key, other
                    )))
                }
            };
            options.0.insert(key, text);
        }
        Ok(options)
    }

    fn bool_or(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.to_string(),
                    expected: "true or false",
                }),
            },
        }
    }

    fn int_or(&self, key: &'static str, default: i64) -> Result<i64, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                expected: "an integer number of milliseconds",
            }),
        }
    }
}

/// Validated configuration of one wait task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    pub policy: MatchingPolicy,
    /// Relative, in ms. Only positive values arm the deadline.
    pub timeout_ms: i64,
    pub set_language: bool,
    pub sensor_key: String,
}

impl WaitConfig {
    pub fn from_options(options: &TaskOptions) -> Result<Self, ConfigError> {
        if let Some(unknown) = options.0.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            return Err(ConfigError::UnknownOption(unknown.clone()));
        }

        let sensor_key = options
            .get(KEY_SENSOR)
            .unwrap_or(DEFAULT_SENSOR_KEY)
            .to_string();
        let any = options.bool_or(KEY_ANY, false)?;

        let policy = if any {
            if options.contains_key(KEY_INTENTS) {
                return Err(ConfigError::MutuallyExclusive {
                    any: KEY_ANY,
                    intents: KEY_INTENTS,
                });
            }
            MatchingPolicy::Wildcard
        } else {
            let raw = options
                .get(KEY_INTENTS)
                .ok_or(ConfigError::MissingOption(KEY_INTENTS))?;
            MatchingPolicy::intent_set(
                raw.split(INTENT_SEPARATOR)
                    .map(str::trim)
                    .filter(|intent| !intent.is_empty()),
            )?
        };

        Ok(Self {
            policy,
            timeout_ms: options.int_or(KEY_TIMEOUT, DEFAULT_TIMEOUT_MS)?,
            set_language: options.bool_or(KEY_SET_LANGUAGE, false)?,
            sensor_key,
        })
    }

    pub fn has_timeout(&self) -> bool {
        self.timeout_ms > 0
    }

    /// Every status the task may exit with. `error.timeout` only when a
    /// positive timeout is configured.
    pub fn declared_exits(&self) -> Vec<ExitStatus> {
        let mut exits: Vec<ExitStatus> =
            self.policy.exit_keys().iter().map(ExitStatus::from).collect();
        if self.has_timeout() {
            exits.push(ExitStatus::ErrorTimeout);
        }
        exits.push(ExitStatus::Fatal);
        exits
    }
}
