use crate::error::SessionError;

/// Everything the controller's event loop consumes, UI actions and
/// internal completions alike, interleaved on one queue.
#[derive(Debug, Clone)]
pub enum AppEvent {
    InputChanged(String),
    /// Posted by the armed debounce timer; stale generations are
    /// ignored, which is how a new keystroke cancels the timer.
    DebounceElapsed {
        generation: u64,
    },
    SelectSourceLang(String),
    SelectTargetLang(String),
    SwapLanguages,
    SetAutoTranslate(bool),
    LookupWord(String),
    TranslationOutcome(TranslationOutcome),
    DefinitionReady {
        word: String,
        text: String,
    },
    ConnectionStatus(bool),
}

/// Completion of one translation request, posted back into the event
/// loop by the worker task that ran it.
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub request_id: u64,
    /// Detection result adopted for this request, auto mode only.
    pub detected: Option<String>,
    /// Target replacement decided by re-validation, if any.
    pub corrected_target: Option<String>,
    pub result: Result<String, SessionError>,
}

/// Display-state changes pushed to the rendering layer.
#[derive(Debug, Clone)]
pub enum UiEvent {
    OutputChanged(String),
    DetectedLang(Option<String>),
    SourceLangChanged(String),
    TargetLangChanged(String),
    ShowError(String),
    ClearError,
    ShowDefinition { word: String, text: String },
    Connection(bool),
    AutoTranslate(bool),
}
