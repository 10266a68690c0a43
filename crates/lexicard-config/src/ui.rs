use serde::{Deserialize, Serialize};

fn default_spinner_tick_ms() -> u64 {
    80
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Editor command, `$EDITOR`/`$VISUAL`/`vi` when unset
    pub editor: Option<String>,
    #[serde(default = "default_spinner_tick_ms")]
    pub spinner_tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            editor: None,
            spinner_tick_ms: default_spinner_tick_ms(),
        }
    }
}

impl UiConfig {
    /// Editor to launch for card records
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.is_empty()))
            .or_else(|| std::env::var("VISUAL").ok().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| "vi".to_string())
    }
}
