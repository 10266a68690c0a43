use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://www.wordreference.com/".to_string()
}

fn default_from() -> String {
    "en".to_string()
}

fn default_to() -> String {
    "es".to_string()
}

fn default_user_agent() -> String {
    "lexicard".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Site root, also serves the catalog of language pairs
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_to")]
    pub to: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            from: default_from(),
            to: default_to(),
            user_agent: default_user_agent(),
        }
    }
}
