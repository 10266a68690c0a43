use lexicard_types::AppEvent;

use crate::context::AppContext;

pub async fn handle_list_decks(ctx: &AppContext) -> AppEvent {
    AppEvent::DecksListed(ctx.cards.list_decks().await.map_err(|e| e.to_string()))
}

pub async fn handle_list_templates(ctx: &AppContext) -> AppEvent {
    AppEvent::TemplatesListed(ctx.cards.list_templates().await.map_err(|e| e.to_string()))
}

pub async fn handle_list_dictionaries(ctx: &AppContext, filter: Option<String>) -> AppEvent {
    AppEvent::DictionariesListed(
        ctx.dictionary
            .available(filter.as_deref())
            .await
            .map_err(|e| e.to_string()),
    )
}
