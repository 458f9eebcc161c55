use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use kanal::AsyncSender;
use lingo_api::CatalogSource;
use lingo_core::types::AppEvent;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Periodic backend reachability probe. Flips the health flag and
/// posts a status event on change only; never gates translation
/// traffic.
pub async fn connection_monitor(
    state: Arc<AppState>,
    source: Arc<dyn CatalogSource>,
    interval: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let ok = source.fetch_languages().await.is_ok();
                let was = state.connected.swap(ok, Ordering::Relaxed);
                if was != ok {
                    tracing::info!(connected = ok, "backend connectivity changed");
                    let _ = event_tx.send(AppEvent::ConnectionStatus(ok)).await;
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("connection monitor stopping");
                return Ok(());
            }
        }
    }
}
