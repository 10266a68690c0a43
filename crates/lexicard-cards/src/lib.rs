mod client;
mod error;
mod template;

pub use client::{API_KEY_VAR, CardService, MochiClient};
pub use error::{BatchError, CardError};
pub use template::{CardField, CardTemplate, NewCard};

use lexicard_types::EditRecord;

/// Create the forward and reverse card for every record, in order.
///
/// Stops at the first failure and reports how many cards made it.
pub async fn create_cards(
    service: &dyn CardService,
    template: &CardTemplate,
    records: &[EditRecord],
) -> Result<usize, BatchError> {
    let cards: Vec<NewCard> = records
        .iter()
        .flat_map(|record| template.cards_for(record))
        .collect();
    let total = cards.len();

    for (created, card) in cards.iter().enumerate() {
        match service.create_card(card).await {
            Ok(id) => tracing::debug!("created card {id} ({}/{total})", created + 1),
            Err(source) => {
                tracing::warn!("card {} of {total} failed: {source}", created + 1);
                return Err(BatchError {
                    created,
                    total,
                    source,
                });
            }
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lexicard_config::cards::CardsConfig;
    use lexicard_types::{Deck, Template};

    use super::*;

    /// Accepts `fail_at` cards, then rejects
    struct FlakyService {
        fail_at: Option<usize>,
        created: Mutex<Vec<NewCard>>,
    }

    impl FlakyService {
        fn new(fail_at: Option<usize>) -> Self {
            Self {
                fail_at,
                created: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CardService for FlakyService {
        async fn list_decks(&self) -> Result<Vec<Deck>, CardError> {
            Ok(Vec::new())
        }

        async fn list_templates(&self) -> Result<Vec<Template>, CardError> {
            Ok(Vec::new())
        }

        async fn create_card(&self, card: &NewCard) -> Result<String, CardError> {
            let mut created = self.created.lock().unwrap();
            if Some(created.len()) == self.fail_at {
                return Err(CardError::Api {
                    status: 500,
                    body: "boom".into(),
                });
            }
            created.push(card.clone());
            Ok(format!("card-{}", created.len()))
        }
    }

    fn records(n: usize) -> Vec<EditRecord> {
        (1..=n)
            .map(|i| EditRecord {
                target: format!("t{i}"),
                source: format!("s{i}"),
                source_example: None,
                target_example: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn creates_two_cards_per_record_in_order() {
        let service = FlakyService::new(None);
        let template = CardTemplate::from_config(&CardsConfig::default());

        let created = create_cards(&service, &template, &records(2)).await.unwrap();
        assert_eq!(created, 4);

        let cards = service.created.lock().unwrap();
        let order: Vec<_> = cards
            .iter()
            .map(|c| (c.template_id.as_str(), c.fields["name"].value.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("sxPZBYo9", "s1"),
                ("kuIZ8krm", "s1"),
                ("sxPZBYo9", "s2"),
                ("kuIZ8krm", "s2"),
            ]
        );
    }

    #[tokio::test]
    async fn failure_reports_partial_progress() {
        let service = FlakyService::new(Some(3));
        let template = CardTemplate::from_config(&CardsConfig::default());

        let err = create_cards(&service, &template, &records(2)).await.unwrap_err();
        assert_eq!(err.created, 3);
        assert_eq!(err.total, 4);
        assert_eq!(
            err.to_string(),
            "created 3 of 4: card service returned HTTP 500: boom"
        );
        assert_eq!(service.created.lock().unwrap().len(), 3);
    }
}
