use kanal::{AsyncReceiver, AsyncSender};
use lingo_core::types::{AppEvent, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Rendering boundary. A real frontend would own both channel ends;
/// this stand-in logs display updates and reads commands from stdin so
/// the pipeline stays drivable when headless.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<UiEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            ui = app_to_ui_rx.recv() => render(ui?),
            line = lines.next_line() => {
                let Some(line) = line? else { return Ok(()) };
                if let Some(event) = parse_command(&line) {
                    ui_to_app_tx.send(event).await?;
                }
            }
        }
    }
}

fn render(event: UiEvent) {
    match event {
        UiEvent::OutputChanged(text) => tracing::info!(%text, "output"),
        UiEvent::DetectedLang(Some(lang)) => tracing::info!(%lang, "detected language"),
        UiEvent::DetectedLang(None) => {}
        UiEvent::SourceLangChanged(code) => tracing::info!(%code, "source language"),
        UiEvent::TargetLangChanged(code) => tracing::info!(%code, "target language"),
        UiEvent::ShowError(message) => tracing::warn!(%message, "session error"),
        UiEvent::ClearError => {}
        UiEvent::ShowDefinition { word, text } => tracing::info!(%word, %text, "definition"),
        UiEvent::Connection(ok) => tracing::info!(connected = ok, "backend connectivity"),
        UiEvent::AutoTranslate(enabled) => {
            tracing::info!(enabled, "automatic translation toggled");
        }
    }
}

/// `:`-prefixed lines are commands; anything else is input text.
fn parse_command(line: &str) -> Option<AppEvent> {
    let Some(command) = line.strip_prefix(':') else {
        return Some(AppEvent::InputChanged(line.to_string()));
    };
    let mut parts = command.split_whitespace();
    match (parts.next()?, parts.next()) {
        ("swap", None) => Some(AppEvent::SwapLanguages),
        ("source", Some(code)) => Some(AppEvent::SelectSourceLang(code.to_string())),
        ("target", Some(code)) => Some(AppEvent::SelectTargetLang(code.to_string())),
        ("auto", Some(flag)) => Some(AppEvent::SetAutoTranslate(flag == "on")),
        ("def", Some(word)) => Some(AppEvent::LookupWord(word.to_string())),
        _ => {
            tracing::warn!(%line, "unrecognized command");
            None
        }
    }
}
