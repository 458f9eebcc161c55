use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use lingo_api::{
    ApiError, CatalogSource, Detection, Detector, FrontendSettings, LexicalSearch, Translation,
    Translator,
};
use lingo_core::catalog::{Language, LanguageCatalog};
use lingo_core::ranker::LexicalHit;
use lingo_core::session::Session;
use lingo_core::types::{AppEvent, UiEvent};
use tokio::time::timeout;

use crate::session::{ControllerSettings, SessionController};

pub fn lang(code: &str, name: &str, targets: &[&str]) -> Language {
    Language {
        code: code.to_string(),
        name: name.to_string(),
        targets: targets.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn settings(debounce_ms: u64) -> ControllerSettings {
    ControllerSettings {
        debounce: Duration::from_millis(debounce_ms),
        auto_translate: true,
        fallback_lang: "en".to_string(),
    }
}

#[derive(Default)]
pub struct MockDetector {
    pub detections: Vec<Detection>,
}

impl MockDetector {
    pub fn returning(language: &str, confidence: f32) -> Self {
        Self {
            detections: vec![Detection {
                language: language.to_string(),
                confidence,
            }],
        }
    }
}

#[async_trait]
impl Detector for MockDetector {
    async fn detect(&self, _text: &str) -> Result<Vec<Detection>, ApiError> {
        Ok(self.detections.clone())
    }
}

/// Echoes `[source->target] text` so assertions can see exactly which
/// request produced an output. Delays are keyed by input text.
#[derive(Default)]
pub struct MockTranslator {
    pub delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<(String, String, String)>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, ApiError> {
        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));
        if let Some(message) = &self.fail_with {
            return Err(ApiError::Backend(message.clone()));
        }
        Ok(Translation {
            translated_text: format!("[{}->{}] {}", source, target, text),
        })
    }
}

#[derive(Default)]
pub struct MockSearch {
    pub hits: Vec<LexicalHit>,
    pub fail: bool,
}

#[async_trait]
impl LexicalSearch for MockSearch {
    async fn search(&self, _word: &str) -> Result<Vec<LexicalHit>, ApiError> {
        if self.fail {
            return Err(ApiError::Backend("search unavailable".to_string()));
        }
        Ok(self.hits.clone())
    }
}

/// Probe results in order; the last one repeats once exhausted.
pub struct ScriptedCatalogSource {
    results: Mutex<(usize, Vec<bool>)>,
}

impl ScriptedCatalogSource {
    pub fn new(results: Vec<bool>) -> Self {
        Self {
            results: Mutex::new((0, results)),
        }
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalogSource {
    async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError> {
        let ok = {
            let mut guard = self.results.lock().unwrap();
            let (index, results) = &mut *guard;
            let ok = results.get(*index).copied().unwrap_or_else(|| {
                results.last().copied().unwrap_or(true)
            });
            *index += 1;
            ok
        };
        if ok {
            Ok(vec![])
        } else {
            Err(ApiError::Backend("unreachable".to_string()))
        }
    }

    async fn fetch_settings(&self) -> Result<FrontendSettings, ApiError> {
        Ok(FrontendSettings { char_limit: -1 })
    }
}

/// Controller plus both channel ends, pumped manually so each test
/// decides how far the event loop advances.
pub struct Harness {
    pub controller: SessionController,
    pub event_rx: AsyncReceiver<AppEvent>,
    pub ui_rx: AsyncReceiver<UiEvent>,
}

impl Harness {
    pub fn new(
        session: Session,
        catalog: LanguageCatalog,
        detector: Arc<MockDetector>,
        translator: Arc<MockTranslator>,
        search: Arc<MockSearch>,
        settings: ControllerSettings,
    ) -> Self {
        let (event_tx, event_rx) = kanal::unbounded_async();
        let (ui_tx, ui_rx) = kanal::unbounded_async();
        let controller = SessionController::new(
            session,
            Arc::new(catalog),
            detector,
            translator,
            search,
            settings,
            event_tx,
            ui_tx,
        );
        Self {
            controller,
            event_rx,
            ui_rx,
        }
    }

    pub async fn send(&mut self, event: AppEvent) {
        self.controller.handle(event).await.expect("handle failed");
    }

    /// Advance the loop until `pred` matches a UI event.
    pub async fn pump_until(&mut self, pred: impl Fn(&UiEvent) -> bool) -> UiEvent {
        let controller = &mut self.controller;
        let event_rx = &self.event_rx;
        let ui_rx = &self.ui_rx;
        timeout(Duration::from_secs(5), async move {
            loop {
                tokio::select! {
                    event = event_rx.recv() => {
                        controller.handle(event.expect("event channel closed")).await.expect("handle failed");
                    }
                    ui = ui_rx.recv() => {
                        let ui = ui.expect("ui channel closed");
                        if pred(&ui) {
                            return ui;
                        }
                    }
                }
            }
        })
        .await
        .expect("timed out waiting for ui event")
    }

    /// Advance the loop for a fixed window, collecting UI events.
    pub async fn pump_for(&mut self, window: Duration) -> Vec<UiEvent> {
        let controller = &mut self.controller;
        let event_rx = &self.event_rx;
        let ui_rx = &self.ui_rx;
        let deadline = tokio::time::Instant::now() + window;
        let mut seen = Vec::new();
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => return seen,
                event = event_rx.recv() => {
                    controller.handle(event.expect("event channel closed")).await.expect("handle failed");
                }
                ui = ui_rx.recv() => seen.push(ui.expect("ui channel closed")),
            }
        }
    }
}

pub fn output_text(event: &UiEvent) -> Option<&str> {
    match event {
        UiEvent::OutputChanged(text) => Some(text.as_str()),
        _ => None,
    }
}
