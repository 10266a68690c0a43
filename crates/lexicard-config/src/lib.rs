use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::cards::CardsConfig;
use self::completion::CompletionConfig;
use self::dictionary::DictionaryConfig;
use self::ui::UiConfig;

pub mod cards;
pub mod completion;
pub mod dictionary;
pub mod ui;

pub use cards::CardLayout;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub cards: CardsConfig,
    pub completion: CompletionConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults, then the file named by `LEXICARD_CONFIG`, then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("LEXICARD_CONFIG") {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `LEXICARD_*` overrides using the given variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("LEXICARD_FROM") {
            self.dictionary.from = v.trim().to_lowercase();
        }
        if let Some(v) = get("LEXICARD_TO") {
            self.dictionary.to = v.trim().to_lowercase();
        }
        if let Some(v) = get("LEXICARD_DICT_URL") {
            self.dictionary.base_url = v;
        }
        if let Some(v) = get("LEXICARD_CARDS_URL") {
            self.cards.base_url = v;
        }
        if let Some(v) = get("LEXICARD_DECK_ID") {
            self.cards.deck_id = v;
        }
        if let Some(v) = get("LEXICARD_COMPLETION_URL") {
            self.completion.api_url = v;
        }
        if let Some(v) = get("LEXICARD_MODEL") {
            self.completion.model = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_card_service_ids() {
        let config = Config::default();
        assert_eq!(config.dictionary.from, "en");
        assert_eq!(config.dictionary.to, "es");
        assert_eq!(config.cards.deck_id, "qyYRvdSD");
        assert_eq!(config.cards.forward.template_id, "sxPZBYo9");
        assert_eq!(config.cards.reverse.template_id, "kuIZ8krm");
        assert_eq!(config.completion.phrase_count, 5);
    }

    #[test]
    fn overrides_ignore_blank_values() {
        let vars: HashMap<&str, &str> = [
            ("LEXICARD_FROM", " FR "),
            ("LEXICARD_TO", ""),
            ("LEXICARD_MODEL", "gpt-4o"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.dictionary.from, "fr");
        assert_eq!(config.dictionary.to, "es");
        assert_eq!(config.completion.model, "gpt-4o");
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dictionary": {{"to": "fr"}}, "ui": {{"editor": "nano"}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.dictionary.to, "fr");
        assert_eq!(config.dictionary.from, "en");
        assert_eq!(config.ui.editor.as_deref(), Some("nano"));
        assert_eq!(config.ui.spinner_tick_ms, 80);
        assert_eq!(config.cards.forward, CardLayout::forward());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
