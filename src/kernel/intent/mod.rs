pub mod matcher;
pub mod types;

pub use matcher::IntentMatcher;
pub use types::{ExitKey, MatchingPolicy, Selection, WILDCARD_KEY};
