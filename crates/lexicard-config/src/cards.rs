use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://app.mochi.cards/api/".to_string()
}

fn default_deck_id() -> String {
    "qyYRvdSD".to_string()
}

/// Template and field ids for one card direction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CardLayout {
    pub template_id: String,
    pub source_field: String,
    pub target_field: String,
    pub source_example_field: String,
    pub target_example_field: String,
}

impl CardLayout {
    pub fn forward() -> Self {
        Self {
            template_id: "sxPZBYo9".to_string(),
            source_field: "name".to_string(),
            target_field: "mkC1QWQA".to_string(),
            source_example_field: "z8lDM6FF".to_string(),
            target_example_field: "Ge7JC3bp".to_string(),
        }
    }

    pub fn reverse() -> Self {
        Self {
            template_id: "kuIZ8krm".to_string(),
            source_field: "name".to_string(),
            target_field: "Bhn3gM4o".to_string(),
            source_example_field: "bhk6AkQ5".to_string(),
            target_example_field: "e5u7LFKy".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CardsConfig {
    /// Card service API root
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deck that receives every created card
    #[serde(default = "default_deck_id")]
    pub deck_id: String,
    #[serde(default = "CardLayout::forward")]
    pub forward: CardLayout,
    #[serde(default = "CardLayout::reverse")]
    pub reverse: CardLayout,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            deck_id: default_deck_id(),
            forward: CardLayout::forward(),
            reverse: CardLayout::reverse(),
        }
    }
}
