pub mod cards;
pub mod translation;
pub mod types;

pub use cards::{Deck, DictionaryPair, EditRecord, Template, TemplateField};
pub use translation::{FromWord, ParsedEntry, Phrase, ToWord, Translation, TranslationSection};
pub use types::{AppEvent, Output, PhraseRequest, Request};
