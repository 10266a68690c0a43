use crate::cards::{Deck, DictionaryPair, EditRecord, Template};
use crate::translation::{ParsedEntry, Phrase, Translation};

/// Everything the session loop consumes: user lines and collaborator results
#[derive(Debug, Clone)]
pub enum AppEvent {
    Input(String),
    LookupFinished {
        word: String,
        result: Result<Translation, String>,
    },
    PhrasesFinished(Result<String, String>),
    EditorFinished(Result<String, String>),
    CardsCreated {
        created: usize,
        total: usize,
        error: Option<String>,
    },
    DecksListed(Result<Vec<Deck>, String>),
    TemplatesListed(Result<Vec<Template>, String>),
    DictionariesListed(Result<Vec<DictionaryPair>, String>),
}

/// Outbound work requested by the session
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Lookup(String),
    GeneratePhrases(PhraseRequest),
    OpenEditor(String),
    CreateCards(Vec<EditRecord>),
    ListDecks,
    ListTemplates,
    ListDictionaries(Option<String>),
}

impl Request {
    /// Label shown next to the spinner while the request runs
    pub fn busy_label(&self) -> &'static str {
        match self {
            Request::Lookup(_) => "Looking up",
            Request::GeneratePhrases(_) => "Generating example sentences",
            Request::OpenEditor(_) => "Editing",
            Request::CreateCards(_) => "Creating cards",
            Request::ListDecks => "Loading decks",
            Request::ListTemplates => "Loading templates",
            Request::ListDictionaries(_) => "Loading dictionaries",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhraseRequest {
    pub word: String,
    pub meanings: String,
    pub from_lang: String,
    pub to_lang: String,
}

/// Display items produced by the session, rendered by the terminal layer
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Entries numbered from `start + 1`; the word heading is shown when `start == 0`
    Entries {
        word: String,
        start: usize,
        entries: Vec<ParsedEntry>,
    },
    PageHint {
        shown: usize,
        total: usize,
    },
    Notice(String),
    Error(String),
    Success(String),
    Phrases(Vec<Phrase>),
    Decks(Vec<Deck>),
    Templates(Vec<Template>),
    Dictionaries(Vec<DictionaryPair>),
    Help,
}
