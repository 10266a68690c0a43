#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("MOCHI_KEY is not set")]
    MissingApiKey,

    #[error("card service request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("card service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected card service response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("invalid card service url: {0}")]
    InvalidUrl(String),
}

/// A batch stopped part way; cards already created stay created
#[derive(Debug, thiserror::Error)]
#[error("created {created} of {total}: {source}")]
pub struct BatchError {
    pub created: usize,
    pub total: usize,
    #[source]
    pub source: CardError,
}
