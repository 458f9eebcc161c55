use std::sync::Arc;
use std::sync::atomic::Ordering;

use lingo_api::{CatalogSource, HttpBackend};
use lingo_config::Config;
use lingo_core::catalog::LanguageCatalog;
use lingo_core::error::SessionError;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod lookup;
pub mod monitor;
pub mod session;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::new();
    let backend = Arc::new(HttpBackend::with_max_results(
        config.network.base_url.clone(),
        config.lexicon.max_results,
    ));

    // Bootstrap: catalog and settings land together or not at all
    let (languages, settings) =
        match tokio::try_join!(backend.fetch_languages(), backend.fetch_settings()) {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::error!(%err, "bootstrap fetch failed");
                return Err(SessionError::Unavailable.into());
            }
        };
    let catalog = Arc::new(LanguageCatalog::new(languages));

    // A stored target the catalog no longer knows falls back to the
    // catalog's first entry
    if !catalog.is_empty() && !catalog.contains(&config.translation.target_lang) {
        if let Some(first) = catalog.first() {
            tracing::warn!(
                stored = %config.translation.target_lang,
                replacement = %first.code,
                "stored target language unknown to catalog"
            );
            config.translation.target_lang = first.code.clone();
        }
    }

    let state = Arc::new(AppState::new(config));
    state.connected.store(true, Ordering::Relaxed);
    state.char_limit.store(settings.char_limit, Ordering::Relaxed);
    tracing::info!(
        languages = catalog.languages().len(),
        char_limit = settings.char_limit,
        "backend ready"
    );

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(catalog, backend).await;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    Ok(())
}
