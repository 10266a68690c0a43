mod openai;

pub use openai::{API_KEY_VAR, OpenAiClient};

/// Chat-style text completion provider
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one system + user exchange and return the assistant's text
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

impl std::fmt::Display for ProviderMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.model)?;
        if self.requires_api_key {
            write!(f, " (api key)")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("no choices in response")]
    EmptyResponse,

    #[error("parse response: {0}")]
    Parse(#[source] serde_json::Error),
}
