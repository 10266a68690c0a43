use std::collections::HashMap;

use async_trait::async_trait;
use lexicard_types::{Deck, Template, TemplateField};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::CardError;
use crate::template::NewCard;

pub const API_KEY_VAR: &str = "MOCHI_KEY";

/// Remote flashcard store
#[async_trait]
pub trait CardService: Send + Sync {
    async fn list_decks(&self) -> Result<Vec<Deck>, CardError>;

    async fn list_templates(&self) -> Result<Vec<Template>, CardError>;

    /// Create one card, returning the id assigned by the service
    async fn create_card(&self, card: &NewCard) -> Result<String, CardError>;
}

#[derive(Clone)]
pub struct MochiClient {
    base_url: String,
    client: reqwest::Client,
}

impl MochiClient {
    pub fn new(base_url: String) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, CardError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| CardError::InvalidUrl(format!("{}{path}: {e}", self.base_url)))
    }

    /// Read at call time so a key exported after startup is picked up
    fn api_key() -> Result<String, CardError> {
        std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CardError::MissingApiKey)
    }

    async fn get<T>(&self, path: &str) -> Result<T, CardError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .basic_auth(Self::api_key()?, Some(""))
            .send()
            .await?;
        read_json(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, CardError>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .basic_auth(Self::api_key()?, Some(""))
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T>(response: reqwest::Response) -> Result<T, CardError>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CardError::Api {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(CardError::Parse)
}

#[async_trait]
impl CardService for MochiClient {
    async fn list_decks(&self) -> Result<Vec<Deck>, CardError> {
        let page: Pagination<MochiDeck> = self.get("decks").await?;
        Ok(page.docs.into_iter().map(Deck::from).collect())
    }

    async fn list_templates(&self) -> Result<Vec<Template>, CardError> {
        let page: Pagination<MochiTemplate> = self.get("templates").await?;
        Ok(page.docs.into_iter().map(Template::from).collect())
    }

    async fn create_card(&self, card: &NewCard) -> Result<String, CardError> {
        let created: CreatedCard = self.post("cards", card).await?;
        Ok(created.id)
    }
}

#[derive(Deserialize)]
struct Pagination<T> {
    docs: Vec<T>,
}

#[derive(Deserialize)]
struct MochiDeck {
    id: String,
    name: String,
    #[serde(rename = "template-id", default)]
    template_id: Option<String>,
}

impl From<MochiDeck> for Deck {
    fn from(deck: MochiDeck) -> Self {
        Deck {
            id: deck.id,
            name: deck.name,
            template_id: deck.template_id.filter(|id| !id.is_empty()),
        }
    }
}

#[derive(Deserialize)]
struct MochiTemplate {
    id: String,
    name: String,
    #[serde(default)]
    fields: HashMap<String, MochiField>,
}

#[derive(Deserialize)]
struct MochiField {
    id: String,
    name: String,
    #[serde(default)]
    pos: String,
}

impl From<MochiTemplate> for Template {
    fn from(template: MochiTemplate) -> Self {
        let mut fields: Vec<MochiField> = template.fields.into_values().collect();
        fields.sort_by(|a, b| a.pos.cmp(&b.pos).then_with(|| a.id.cmp(&b.id)));

        Template {
            id: template.id,
            name: template.name,
            fields: fields
                .into_iter()
                .map(|field| TemplateField {
                    id: field.id,
                    name: field.name,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct CreatedCard {
    #[serde(default)]
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_page_decodes() {
        let body = r#"{
            "bookmark": "g1AAAA",
            "docs": [
                {"id": "abc", "name": "Spanish", "template-id": "sxPZBYo9", "archived?": false},
                {"id": "def", "name": "Misc", "sort": 3}
            ]
        }"#;
        let page: Pagination<MochiDeck> = serde_json::from_str(body).unwrap();
        let decks: Vec<Deck> = page.docs.into_iter().map(Deck::from).collect();

        assert_eq!(decks[0].template_id.as_deref(), Some("sxPZBYo9"));
        assert_eq!(decks[1].name, "Misc");
        assert_eq!(decks[1].template_id, None);
    }

    #[test]
    fn template_fields_sorted_by_position() {
        let body = r#"{
            "docs": [{
                "id": "t1",
                "name": "Vocab",
                "content": "<< name >>",
                "fields": {
                    "b": {"id": "b", "name": "Back", "pos": "m"},
                    "name": {"id": "name", "name": "Front", "pos": "a"},
                    "c": {"id": "c", "name": "Example", "pos": "s", "options": {"multi-line?": true}}
                }
            }]
        }"#;
        let page: Pagination<MochiTemplate> = serde_json::from_str(body).unwrap();
        let template = Template::from(page.docs.into_iter().next().unwrap());

        let names: Vec<_> = template.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Front", "Back", "Example"]);
    }

    #[test]
    fn endpoint_joins_relative_path() {
        let client = MochiClient::new("https://cards.test/api".into());
        assert_eq!(
            client.endpoint("cards").unwrap().as_str(),
            "https://cards.test/api/cards"
        );
    }
}
