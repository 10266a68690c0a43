use lexicard_types::AppEvent;

use crate::context::AppContext;

pub async fn handle_lookup(ctx: &AppContext, word: String) -> AppEvent {
    tracing::info!("Looking up {word:?}");
    let result = ctx
        .dictionary
        .translate(&word)
        .await
        .map_err(|e| e.to_string());
    if let Err(e) = &result {
        tracing::warn!("Lookup of {word:?} failed: {e}");
    }
    AppEvent::LookupFinished { word, result }
}
