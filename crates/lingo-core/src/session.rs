use crate::catalog::AUTO;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

/// Where the controller sits in the debounce → detect → validate →
/// translate → display pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Debouncing,
    Detecting,
    Translating,
    Settled(Outcome),
}

/// Mutable per-application translation state. Created once, mutated in
/// place by the controller for the life of the process.
#[derive(Debug, Clone)]
pub struct Session {
    pub source_lang: String,
    pub target_lang: String,
    /// Set only while `source_lang == "auto"` and a detection result
    /// was adopted.
    pub detected_lang: Option<String>,
    pub input_text: String,
    pub output_text: String,
    /// Id of the single authoritative in-flight translation request.
    /// Responses carrying any other id are superseded and dropped.
    pub pending_request: Option<u64>,
    pub phase: Phase,
}

impl Session {
    pub fn new(source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            detected_lang: None,
            input_text: String::new(),
            output_text: String::new(),
            pending_request: None,
            phase: Phase::Idle,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.source_lang == AUTO
    }

    /// Exchange source/target and input/output as one unit. Validity
    /// of the swapped pair is the caller's responsibility.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        std::mem::swap(&mut self.input_text, &mut self.output_text);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AUTO, "en")
    }
}
