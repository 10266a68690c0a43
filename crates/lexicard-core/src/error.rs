#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Verbatim "no entry found" text from the dictionary page
    #[error("{0}")]
    NotFound(String),

    #[error("{0} is not available as a translation dictionary")]
    UnknownDictionary(String),

    #[error("invalid dictionary url: {0}")]
    InvalidUrl(String),
}

/// Problems with a `/command` line, reported inline without touching session state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("Invalid index: {index} (must be 1-{max})")]
    InvalidIndex { index: i64, max: usize },

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("No translation available. Look up a word first.")]
    NoTranslation,

    #[error("No phrases available. Use /phrases <n> first.")]
    NoPhrases,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("could not write card records: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid card records: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no cards found in the edited file")]
    Empty,
}
