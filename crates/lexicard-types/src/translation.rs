use std::fmt;

use serde::{Deserialize, Serialize};

pub const UNTITLED_SECTION: &str = "Untitled Section";

/// Result of one dictionary lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub word: String,
    pub from_lang: String,
    pub to_lang: String,
    pub url: String,
    pub sections: Vec<TranslationSection>,
}

impl Translation {
    pub fn new(word: String, from_lang: String, to_lang: String, url: String) -> Self {
        Self {
            word,
            from_lang,
            to_lang,
            url,
            sections: Vec::new(),
        }
    }

    /// Section with the given title, created on first use
    pub fn section_mut(&mut self, title: &str) -> &mut TranslationSection {
        let position = match self.sections.iter().position(|s| s.title == title) {
            Some(position) => position,
            None => {
                self.sections.push(TranslationSection {
                    title: title.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[position]
    }

    /// All entries across sections, in display order
    pub fn entries(&self) -> impl Iterator<Item = &ParsedEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Entry by its user-facing 1-based index
    pub fn entry(&self, index: usize) -> Option<&ParsedEntry> {
        index.checked_sub(1).and_then(|i| self.entries().nth(i))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationSection {
    pub title: String,
    pub entries: Vec<ParsedEntry>,
}

/// One dictionary sense
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub from_word: FromWord,
    pub to_words: Vec<ToWord>,
    pub context: String,
    pub from_example: String,
    pub to_examples: Vec<String>,
}

impl ParsedEntry {
    /// Plain meanings, comma separated
    pub fn meanings(&self) -> String {
        self.to_words
            .iter()
            .map(|tw| tw.meaning.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One line per target word, with grammar and notes
    pub fn definition(&self) -> String {
        self.to_words
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FromWord {
    pub source: String,
    pub grammar: String,
}

impl fmt::Display for FromWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.grammar.is_empty() {
            write!(f, "{}", self.source)
        } else {
            write!(f, "{} ({})", self.source, self.grammar)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToWord {
    pub meaning: String,
    pub notes: String,
    pub grammar: String,
}

impl fmt::Display for ToWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.meaning)?;
        if !self.grammar.is_empty() {
            write!(f, " ({})", self.grammar)?;
        }
        if !self.notes.is_empty() {
            write!(f, " ({})", self.notes)?;
        }
        Ok(())
    }
}

/// AI generated example sentence pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub source: String,
    pub target: String,
}
