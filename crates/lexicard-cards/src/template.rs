use std::collections::BTreeMap;

use lexicard_config::cards::{CardLayout, CardsConfig};
use lexicard_types::EditRecord;
use serde::Serialize;

/// Card body as the service expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCard {
    pub content: String,
    #[serde(rename = "deck-id")]
    pub deck_id: String,
    #[serde(rename = "template-id")]
    pub template_id: String,
    pub fields: BTreeMap<String, CardField>,
    #[serde(rename = "review-reverse?")]
    pub review_reverse: bool,
    #[serde(rename = "archived?")]
    pub archived: bool,
    pub reviews: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardField {
    pub id: String,
    pub value: String,
}

/// Forward and reverse layouts bound to one deck
#[derive(Debug, Clone)]
pub struct CardTemplate {
    pub deck_id: String,
    pub forward: CardLayout,
    pub reverse: CardLayout,
}

impl CardTemplate {
    pub fn from_config(config: &CardsConfig) -> Self {
        Self {
            deck_id: config.deck_id.clone(),
            forward: config.forward.clone(),
            reverse: config.reverse.clone(),
        }
    }

    /// Every record becomes exactly two cards: forward then reverse
    pub fn cards_for(&self, record: &EditRecord) -> [NewCard; 2] {
        [
            self.card(&self.forward, record),
            self.card(&self.reverse, record),
        ]
    }

    fn card(&self, layout: &CardLayout, record: &EditRecord) -> NewCard {
        let values = [
            (&layout.source_field, record.source.as_str()),
            (&layout.target_field, record.target.as_str()),
            (
                &layout.source_example_field,
                record.source_example.as_deref().unwrap_or_default(),
            ),
            (
                &layout.target_example_field,
                record.target_example.as_deref().unwrap_or_default(),
            ),
        ];

        let fields = values
            .into_iter()
            .map(|(id, value)| {
                (
                    id.clone(),
                    CardField {
                        id: id.clone(),
                        value: value.to_string(),
                    },
                )
            })
            .collect();

        NewCard {
            content: "ok".to_string(),
            deck_id: self.deck_id.clone(),
            template_id: layout.template_id.clone(),
            fields,
            review_reverse: false,
            archived: false,
            reviews: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EditRecord {
        EditRecord {
            target: "house (n)".into(),
            source: "casa (nf)".into(),
            source_example: Some("Mi casa.".into()),
            target_example: None,
        }
    }

    #[test]
    fn record_yields_forward_and_reverse() {
        let template = CardTemplate::from_config(&CardsConfig::default());
        let [forward, reverse] = template.cards_for(&record());

        assert_eq!(forward.template_id, "sxPZBYo9");
        assert_eq!(reverse.template_id, "kuIZ8krm");
        assert_eq!(forward.deck_id, "qyYRvdSD");
        assert_eq!(forward.fields["name"].value, "casa (nf)");
        assert_eq!(forward.fields["mkC1QWQA"].value, "house (n)");
        assert_eq!(forward.fields["z8lDM6FF"].value, "Mi casa.");
        assert_eq!(forward.fields["Ge7JC3bp"].value, "");
        assert_eq!(reverse.fields["Bhn3gM4o"].value, "house (n)");
    }

    #[test]
    fn serializes_with_service_field_names() {
        let template = CardTemplate::from_config(&CardsConfig::default());
        let [forward, _] = template.cards_for(&record());
        let json = serde_json::to_value(&forward).unwrap();

        assert_eq!(json["deck-id"], "qyYRvdSD");
        assert_eq!(json["template-id"], "sxPZBYo9");
        assert_eq!(json["review-reverse?"], false);
        assert_eq!(json["fields"]["name"]["id"], "name");
        assert_eq!(json["reviews"], serde_json::json!([]));
    }
}
