use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use lingo_api::{Detector, LexicalSearch, Translator};
use lingo_core::catalog::{AUTO, LanguageCatalog};
use lingo_core::error::SessionError;
use lingo_core::session::{Outcome, Phase, Session};
use lingo_core::types::{AppEvent, TranslationOutcome, UiEvent};

use crate::lookup;

pub struct ControllerSettings {
    pub debounce: Duration,
    pub auto_translate: bool,
    pub fallback_lang: String,
}

/// Drives the debounce → detect → validate → translate → display
/// pipeline. Runs inside the single event-loop task; every `Session`
/// mutation happens here, so no locking is needed.
pub struct SessionController {
    session: Session,
    catalog: Arc<LanguageCatalog>,
    detector: Arc<dyn Detector>,
    translator: Arc<dyn Translator>,
    search: Arc<dyn LexicalSearch>,
    /// Worker completions and timer expiries loop back through the
    /// same queue the UI events arrive on.
    event_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<UiEvent>,
    auto_translate: bool,
    debounce: Duration,
    fallback_lang: String,
    /// Monotonic; a response is applied only if its id is still the
    /// pending one.
    next_request_id: u64,
    /// Bumping this orphans any armed debounce timer.
    debounce_generation: u64,
}

impl SessionController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session: Session,
        catalog: Arc<LanguageCatalog>,
        detector: Arc<dyn Detector>,
        translator: Arc<dyn Translator>,
        search: Arc<dyn LexicalSearch>,
        settings: ControllerSettings,
        event_tx: AsyncSender<AppEvent>,
        ui_tx: AsyncSender<UiEvent>,
    ) -> Self {
        Self {
            session,
            catalog,
            detector,
            translator,
            search,
            event_tx,
            ui_tx,
            auto_translate: settings.auto_translate,
            debounce: settings.debounce,
            fallback_lang: settings.fallback_lang,
            next_request_id: 0,
            debounce_generation: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn handle(&mut self, event: AppEvent) -> anyhow::Result<()> {
        match event {
            AppEvent::InputChanged(text) => self.on_input_changed(text).await?,
            AppEvent::DebounceElapsed { generation } => {
                if generation == self.debounce_generation {
                    self.run_translation();
                }
            }
            AppEvent::SelectSourceLang(code) => self.select_source_lang(code).await?,
            AppEvent::SelectTargetLang(code) => self.select_target_lang(code).await?,
            AppEvent::SwapLanguages => self.swap_languages().await?,
            AppEvent::SetAutoTranslate(enabled) => {
                self.auto_translate = enabled;
                if !enabled {
                    self.debounce_generation += 1;
                }
                self.ui_tx.send(UiEvent::AutoTranslate(enabled)).await?;
            }
            AppEvent::LookupWord(word) => {
                tokio::spawn(lookup::run_lookup(
                    word,
                    self.search.clone(),
                    self.event_tx.clone(),
                ));
            }
            AppEvent::TranslationOutcome(outcome) => self.on_translation_outcome(outcome).await?,
            AppEvent::DefinitionReady { word, text } => {
                self.ui_tx.send(UiEvent::ShowDefinition { word, text }).await?;
            }
            AppEvent::ConnectionStatus(ok) => {
                self.ui_tx.send(UiEvent::Connection(ok)).await?;
            }
        }
        Ok(())
    }

    async fn on_input_changed(&mut self, text: String) -> anyhow::Result<()> {
        // a keystroke invalidates the armed timer
        self.debounce_generation += 1;
        self.session.detected_lang = None;
        self.ui_tx.send(UiEvent::DetectedLang(None)).await?;
        self.ui_tx.send(UiEvent::ClearError).await?;

        self.session.input_text = text;
        if self.session.input_text.trim().is_empty() {
            self.session.phase = Phase::Idle;
            self.session.output_text.clear();
            // anything still in flight is now superseded
            self.session.pending_request = None;
            self.ui_tx.send(UiEvent::OutputChanged(String::new())).await?;
            return Ok(());
        }

        if self.auto_translate {
            self.session.phase = Phase::Debouncing;
            let generation = self.debounce_generation;
            let delay = self.debounce;
            let tx = self.event_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(AppEvent::DebounceElapsed { generation }).await;
            });
        }
        Ok(())
    }

    async fn select_source_lang(&mut self, code: String) -> anyhow::Result<()> {
        if code == self.session.target_lang {
            self.swap_languages().await?;
        } else {
            self.session.source_lang = code.clone();
            if !self.session.is_auto() {
                self.session.detected_lang = None;
            }
            self.ui_tx.send(UiEvent::SourceLangChanged(code)).await?;
        }
        // explicit user action: no debounce
        if !self.session.input_text.is_empty() {
            self.run_translation();
        }
        Ok(())
    }

    async fn select_target_lang(&mut self, code: String) -> anyhow::Result<()> {
        if code == self.session.source_lang {
            self.swap_languages().await?;
        } else {
            self.session.target_lang = code.clone();
            self.ui_tx.send(UiEvent::TargetLangChanged(code)).await?;
        }
        if !self.session.input_text.is_empty() {
            self.run_translation();
        }
        Ok(())
    }

    /// Auto has no defined inverse, so swapping out of auto mode is a
    /// silent no-op. An invalid reverse pair reports and changes
    /// nothing; a valid one exchanges languages and texts as one unit.
    async fn swap_languages(&mut self) -> anyhow::Result<()> {
        if self.session.is_auto() {
            return Ok(());
        }
        if !self
            .catalog
            .is_valid_target(&self.session.target_lang, &self.session.source_lang)
        {
            let err = SessionError::IncompatibleSwap {
                from: self.catalog.display_name(&self.session.target_lang),
                to: self.catalog.display_name(&self.session.source_lang),
            };
            self.ui_tx.send(UiEvent::ShowError(err.to_string())).await?;
            return Ok(());
        }

        self.session.swap();
        self.ui_tx
            .send(UiEvent::SourceLangChanged(self.session.source_lang.clone()))
            .await?;
        self.ui_tx
            .send(UiEvent::TargetLangChanged(self.session.target_lang.clone()))
            .await?;
        self.ui_tx
            .send(UiEvent::OutputChanged(self.session.output_text.clone()))
            .await?;
        Ok(())
    }

    /// Issue a new translation request and hand it to a worker task.
    /// The request id marks it as the single authoritative in-flight
    /// request; earlier ones become stale the moment this runs.
    fn run_translation(&mut self) {
        let text = self.session.input_text.clone();
        if text.trim().is_empty() {
            return;
        }
        self.session.detected_lang = None;
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.session.pending_request = Some(request_id);
        self.session.phase = if self.session.is_auto() {
            Phase::Detecting
        } else {
            Phase::Translating
        };
        tracing::debug!(request_id, "issuing translation request");

        let request = TranslateRequest {
            id: request_id,
            text,
            source: self.session.source_lang.clone(),
            target: self.session.target_lang.clone(),
            fallback: self.fallback_lang.clone(),
        };
        let catalog = self.catalog.clone();
        let detector = self.detector.clone();
        let translator = self.translator.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = run_request(request, catalog, detector, translator).await;
            // send fails only when the loop is gone at shutdown
            let _ = tx.send(AppEvent::TranslationOutcome(outcome)).await;
        });
    }

    async fn on_translation_outcome(&mut self, outcome: TranslationOutcome) -> anyhow::Result<()> {
        if self.session.pending_request != Some(outcome.request_id) {
            tracing::debug!(
                request_id = outcome.request_id,
                "dropping superseded translation response"
            );
            return Ok(());
        }
        self.session.pending_request = None;

        if let Some(detected) = &outcome.detected {
            self.session.detected_lang = Some(detected.clone());
            self.ui_tx
                .send(UiEvent::DetectedLang(Some(detected.clone())))
                .await?;
        }
        if let Some(target) = &outcome.corrected_target {
            self.session.target_lang = target.clone();
            self.ui_tx
                .send(UiEvent::TargetLangChanged(target.clone()))
                .await?;
        }

        match outcome.result {
            Ok(text) => {
                self.session.output_text = text.clone();
                self.session.phase = Phase::Settled(Outcome::Success);
                self.ui_tx.send(UiEvent::OutputChanged(text)).await?;
            }
            Err(err) => {
                self.session.phase = Phase::Settled(Outcome::Error);
                // a missing target aborted before translate; the
                // previous output stays
                if !matches!(err, SessionError::NoValidTarget { .. }) {
                    self.session.output_text.clear();
                    self.ui_tx.send(UiEvent::OutputChanged(String::new())).await?;
                }
                self.ui_tx.send(UiEvent::ShowError(err.to_string())).await?;
            }
        }
        Ok(())
    }
}

struct TranslateRequest {
    id: u64,
    text: String,
    source: String,
    target: String,
    fallback: String,
}

/// The suspendable portion of one translation request: detection
/// (auto mode), target re-validation, then the translate call. Pure
/// with respect to the session; everything it decides travels back in
/// the outcome and is applied only if the request is still the latest.
async fn run_request(
    request: TranslateRequest,
    catalog: Arc<LanguageCatalog>,
    detector: Arc<dyn Detector>,
    translator: Arc<dyn Translator>,
) -> TranslationOutcome {
    let mut detected = None;
    let mut effective = request.source.clone();
    let mut revalidate = request.source != AUTO;

    if request.source == AUTO {
        match detector.detect(&request.text).await {
            Ok(detections) => match detections.first() {
                // strict: a best guess at exactly 0.5 is not adopted
                Some(best) if best.confidence > 0.5 => {
                    effective = best.language.clone();
                    detected = Some(effective.clone());
                    revalidate = true;
                }
                _ => {
                    // inconclusive; the fallback is assumed to reach
                    // any target, so re-validation is skipped
                    effective = request.fallback.clone();
                }
            },
            Err(err) => {
                return TranslationOutcome {
                    request_id: request.id,
                    detected: None,
                    corrected_target: None,
                    result: Err(err.into()),
                };
            }
        }
    }

    let mut target = request.target.clone();
    let mut corrected_target = None;
    if revalidate {
        match catalog.corrected_target(&effective, &target, &request.fallback) {
            Ok(Some(replacement)) => {
                tracing::debug!(from = %target, to = %replacement, "target re-validated");
                target = replacement.clone();
                corrected_target = Some(replacement);
            }
            Ok(None) => {}
            Err(err) => {
                return TranslationOutcome {
                    request_id: request.id,
                    detected,
                    corrected_target: None,
                    result: Err(err),
                };
            }
        }
    }

    let result = translator
        .translate(&request.text, &effective, &target)
        .await
        .map(|t| t.translated_text)
        .map_err(SessionError::from);

    TranslationOutcome {
        request_id: request.id,
        detected,
        corrected_target,
        result,
    }
}
