use serde::{Deserialize, Serialize};

/// One parsed utterance as delivered by the NLU channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Understanding {
    pub intent: String,
    pub lang: String,
    #[serde(default)]
    pub text: String,
    /// Entities, scores, whatever the classifier attached. Never inspected here.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Understanding {
    pub fn new(intent: &str, lang: &str) -> Self {
        Self {
            intent: intent.to_string(),
            lang: lang.to_string(),
            text: String::new(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Language tag derived from an understanding, written to the `Language` slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageTag(pub String);

impl LanguageTag {
    /// Normalises "EN " and "en" to the same tag.
    pub fn from_lang(lang: &str) -> Self {
        Self(lang.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Understanding> for LanguageTag {
    fn from(u: &Understanding) -> Self {
        LanguageTag::from_lang(&u.lang)
    }
}
