use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lingo_api::{Detector, LexicalSearch, Translator};
use lingo_core::catalog::LanguageCatalog;
use lingo_core::session::Session;
use lingo_core::types::{AppEvent, UiEvent};

use crate::session::{ControllerSettings, SessionController};
use crate::state::AppState;

/// App's main loop. Single consumer of the event queue; UI actions,
/// debounce expiries and worker completions all interleave here, so
/// the controller's synchronous sections never overlap.
pub async fn event_loop(
    state: Arc<AppState>,
    catalog: Arc<LanguageCatalog>,
    detector: Arc<dyn Detector>,
    translator: Arc<dyn Translator>,
    search: Arc<dyn LexicalSearch>,
    event_rx: AsyncReceiver<AppEvent>,
    event_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let (session, settings) = {
        let config = state.config.read().await;
        (
            Session::new(
                config.translation.source_lang.clone(),
                config.translation.target_lang.clone(),
            ),
            ControllerSettings {
                debounce: Duration::from_millis(config.translation.debounce_ms),
                auto_translate: config.translation.auto_translate,
                fallback_lang: config.translation.fallback_lang.clone(),
            },
        )
    };

    let mut controller = SessionController::new(
        session, catalog, detector, translator, search, settings, event_tx, ui_tx,
    );

    tracing::info!("event loop started");
    loop {
        let event = event_rx.recv().await?;
        tracing::trace!(event = ?std::mem::discriminant(&event), "event received");
        controller.handle(event).await?;
    }
}
