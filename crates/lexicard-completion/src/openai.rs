use serde::{Deserialize, Serialize};

use crate::{CompletionError, CompletionProvider, ProviderMetadata};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct OpenAiClient {
    api_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_url: String, model: String) -> Self {
        Self {
            api_url,
            model,
            client: reqwest::Client::new(),
        }
    }

    fn request<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CompletionError::MissingApiKey)?;

        tracing::debug!("requesting completion from {} ({})", self.api_url, self.model);
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(key)
            .json(&self.request(system, user))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        first_choice(&body)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

fn first_choice(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(CompletionError::Parse)?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_system_then_user() {
        let client = OpenAiClient::new("https://llm.test/v1/chat".into(), "tiny".into());
        let body = serde_json::to_value(client.request("be brief", "Word: casa")).unwrap();

        assert_eq!(body["model"], "tiny");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Word: casa");
    }

    #[test]
    fn metadata_names_provider_and_model() {
        let client = OpenAiClient::new("https://llm.test/v1/chat".into(), "tiny".into());
        let metadata = client.metadata();

        assert!(metadata.requires_api_key);
        assert_eq!(metadata.to_string(), "OpenAI/tiny (api key)");
    }

    #[test]
    fn takes_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"- Hola — Hi"}},
                                  {"message":{"content":"ignored"}}]}"#;
        assert_eq!(first_choice(body).unwrap(), "- Hola — Hi");
    }

    #[test]
    fn no_choices_is_an_error() {
        assert!(matches!(
            first_choice(r#"{"choices":[]}"#),
            Err(CompletionError::EmptyResponse)
        ));
        assert!(matches!(first_choice("not json"), Err(CompletionError::Parse(_))));
    }
}
