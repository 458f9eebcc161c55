use std::env;

use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    500
}

fn default_auto_translate() -> bool {
    true
}

fn default_source_lang() -> String {
    "auto".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_fallback_lang() -> String {
    "en".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslationConfig {
    /// Delay between the last keystroke and the translation request.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Translate as the user types; off means explicit actions only.
    #[serde(default = "default_auto_translate")]
    pub auto_translate: bool,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Effective source when detection is inconclusive. Assumed able
    /// to reach any target, so re-validation is skipped for it.
    #[serde(default = "default_fallback_lang")]
    pub fallback_lang: String,
}

impl TranslationConfig {
    pub fn new() -> Self {
        let debounce_ms = env::var("LINGO_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        Self {
            debounce_ms,
            ..Self::default()
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            auto_translate: default_auto_translate(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            fallback_lang: default_fallback_lang(),
        }
    }
}
