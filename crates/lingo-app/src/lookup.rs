use std::sync::Arc;

use kanal::AsyncSender;
use lingo_api::LexicalSearch;
use lingo_core::preprocess::{DefaultPreprocessor, Preprocessor};
use lingo_core::ranker::{NO_DEFINITION, format_definition, pick_best};
use lingo_core::types::AppEvent;

/// Definition pipeline for one selected word: search, rank, format.
/// Search failures degrade to the no-definition sentinel; they never
/// surface as session errors.
pub async fn run_lookup(
    word: String,
    search: Arc<dyn LexicalSearch>,
    event_tx: AsyncSender<AppEvent>,
) {
    let query = DefaultPreprocessor.process(&word);
    let text = if query.is_empty() {
        NO_DEFINITION.to_string()
    } else {
        match search.search(&query).await {
            Ok(hits) => {
                tracing::debug!(word = %query, candidates = hits.len(), "lexical search");
                format_definition(pick_best(&query, &hits))
            }
            Err(err) => {
                tracing::warn!(%err, word = %query, "lexical search failed");
                NO_DEFINITION.to_string()
            }
        }
    };

    if let Err(err) = event_tx.send(AppEvent::DefinitionReady { word, text }).await {
        tracing::error!("failed to deliver definition: {}", err);
    }
}
