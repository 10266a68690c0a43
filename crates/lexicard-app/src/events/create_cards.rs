use lexicard_types::{AppEvent, EditRecord};

use crate::context::AppContext;

pub async fn handle_card_creation(ctx: &AppContext, records: Vec<EditRecord>) -> AppEvent {
    match lexicard_cards::create_cards(ctx.cards.as_ref(), &ctx.card_template, &records).await {
        Ok(created) => {
            tracing::info!("Created {created} cards from {} records", records.len());
            AppEvent::CardsCreated {
                created,
                total: created,
                error: None,
            }
        }
        Err(e) => {
            tracing::error!("Card creation stopped: {e}");
            AppEvent::CardsCreated {
                created: e.created,
                total: e.total,
                error: Some(e.source.to_string()),
            }
        }
    }
}
