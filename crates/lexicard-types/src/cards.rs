use serde::{Deserialize, Serialize};

use crate::translation::{ParsedEntry, Phrase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub template_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub fields: Vec<TemplateField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    pub id: String,
    pub name: String,
}

/// A from/to language pair offered by the dictionary site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryPair {
    pub from_code: String,
    pub to_code: String,
    pub from_label: String,
    pub to_label: String,
}

impl DictionaryPair {
    /// Path segment used in lookup URLs, e.g. `enes`
    pub fn code(&self) -> String {
        format!("{}{}", self.from_code, self.to_code)
    }
}

/// User-editable card content, two cards are created from each record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub target: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_example: Option<String>,
}

impl From<&ParsedEntry> for EditRecord {
    fn from(entry: &ParsedEntry) -> Self {
        Self {
            target: entry.from_word.to_string(),
            source: entry.definition(),
            source_example: Some(entry.from_example.clone()).filter(|ex| !ex.is_empty()),
            target_example: entry.to_examples.first().cloned(),
        }
    }
}

impl From<&Phrase> for EditRecord {
    fn from(phrase: &Phrase) -> Self {
        Self {
            target: phrase.source.clone(),
            source: phrase.target.clone(),
            source_example: Some(phrase.target.clone()),
            target_example: Some(phrase.source.clone()),
        }
    }
}
