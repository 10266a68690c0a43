//! Interactive session state.
//!
//! [`Session`] owns the last lookup, the pagination cursor and the last
//! batch of generated phrases. Every change goes through
//! [`Session::handle`], which consumes one [`AppEvent`] (a typed line or a
//! collaborator result) and returns what to show plus at most one request
//! to run. While a request is outstanding the session is busy: typed lines
//! are ignored and only the matching completion is accepted.

use lexicard_types::{AppEvent, EditRecord, Output, Phrase, PhraseRequest, Request, Translation};

use crate::error::CommandError;
use crate::phrases::parse_phrases;
use crate::record::{decode_records, encode_records};

pub const PAGE_SIZE: usize = 5;

/// Kind of the outstanding collaborator call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Lookup,
    Phrases,
    Editor,
    Cards,
    Decks,
    Templates,
    Dictionaries,
}

impl Pending {
    fn of_request(request: &Request) -> Self {
        match request {
            Request::Lookup(_) => Pending::Lookup,
            Request::GeneratePhrases(_) => Pending::Phrases,
            Request::OpenEditor(_) => Pending::Editor,
            Request::CreateCards(_) => Pending::Cards,
            Request::ListDecks => Pending::Decks,
            Request::ListTemplates => Pending::Templates,
            Request::ListDictionaries(_) => Pending::Dictionaries,
        }
    }

    fn of_event(event: &AppEvent) -> Option<Self> {
        match event {
            AppEvent::Input(_) => None,
            AppEvent::LookupFinished { .. } => Some(Pending::Lookup),
            AppEvent::PhrasesFinished(_) => Some(Pending::Phrases),
            AppEvent::EditorFinished(_) => Some(Pending::Editor),
            AppEvent::CardsCreated { .. } => Some(Pending::Cards),
            AppEvent::DecksListed(_) => Some(Pending::Decks),
            AppEvent::TemplatesListed(_) => Some(Pending::Templates),
            AppEvent::DictionariesListed(_) => Some(Pending::Dictionaries),
        }
    }
}

/// Result of handling one event
#[derive(Debug, Default, PartialEq)]
pub struct Transition {
    pub output: Vec<Output>,
    pub request: Option<Request>,
}

impl Transition {
    fn show(output: Output) -> Self {
        Self {
            output: vec![output],
            request: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    last_translation: Option<Translation>,
    shown_entries: usize,
    last_phrases: Option<Vec<Phrase>>,
    pending: Option<Pending>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn last_translation(&self) -> Option<&Translation> {
        self.last_translation.as_ref()
    }

    pub fn shown_entries(&self) -> usize {
        self.shown_entries
    }

    pub fn last_phrases(&self) -> &[Phrase] {
        self.last_phrases.as_deref().unwrap_or_default()
    }

    fn total_entries(&self) -> usize {
        self.last_translation
            .as_ref()
            .map_or(0, Translation::entry_count)
    }

    /// Commands worth suggesting in the current state
    pub fn hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        if self.last_translation.is_some() {
            if self.shown_entries < self.total_entries() {
                hints.extend(["/more", "/all"]);
            }
            hints.extend(["/add", "/phrases"]);
        }
        if !self.last_phrases().is_empty() {
            hints.push("/cards");
        }
        hints.push("/help");
        hints
    }

    pub fn handle(&mut self, event: AppEvent) -> Transition {
        match event {
            AppEvent::Input(line) => self.submit(&line),
            event => self.complete(event),
        }
    }

    fn submit(&mut self, line: &str) -> Transition {
        if let Some(pending) = self.pending {
            tracing::debug!("busy with {pending:?}, dropping input");
            return Transition::default();
        }

        let input = line.trim();
        if input.is_empty() {
            return Transition::default();
        }

        if input.starts_with('/') {
            match self.command(input) {
                Ok(transition) => transition,
                Err(e) => Transition::show(Output::Error(e.to_string())),
            }
        } else {
            self.dispatch(Request::Lookup(input.to_string()))
        }
    }

    fn dispatch(&mut self, request: Request) -> Transition {
        self.pending = Some(Pending::of_request(&request));
        Transition {
            output: Vec::new(),
            request: Some(request),
        }
    }

    fn command(&mut self, input: &str) -> Result<Transition, CommandError> {
        let mut parts = input.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            "/help" => Ok(Transition::show(Output::Help)),
            "/more" => self.next_page(Some(PAGE_SIZE)),
            "/all" => self.next_page(None),
            "/decks" => Ok(self.dispatch(Request::ListDecks)),
            "/templates" => Ok(self.dispatch(Request::ListTemplates)),
            "/dicts" => {
                let filter = Some(args.join(" ")).filter(|f| !f.is_empty());
                Ok(self.dispatch(Request::ListDictionaries(filter)))
            }
            "/add" => self.add(&args),
            "/phrases" => self.phrases(&args),
            "/cards" | "/card" => self.cards(&args),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    fn next_page(&mut self, limit: Option<usize>) -> Result<Transition, CommandError> {
        if self.last_translation.is_none() {
            return Err(CommandError::NoTranslation);
        }
        if self.shown_entries >= self.total_entries() {
            return Ok(Transition::show(Output::Notice("No more results.".into())));
        }
        Ok(self.render_page(limit))
    }

    /// Show entries from the cursor onward and advance it
    fn render_page(&mut self, limit: Option<usize>) -> Transition {
        let Some(translation) = self.last_translation.as_ref() else {
            return Transition::default();
        };
        let total = translation.entry_count();
        let start = self.shown_entries.min(total);
        let end = limit.map_or(total, |n| (start + n).min(total));

        let mut output = vec![Output::Entries {
            word: translation.word.clone(),
            start,
            entries: translation
                .entries()
                .skip(start)
                .take(end - start)
                .cloned()
                .collect(),
        }];
        if end < total {
            output.push(Output::PageHint { shown: end, total });
        }

        self.shown_entries = end;
        Transition {
            output,
            request: None,
        }
    }

    fn add(&mut self, args: &[&str]) -> Result<Transition, CommandError> {
        let translation = self
            .last_translation
            .as_ref()
            .ok_or(CommandError::NoTranslation)?;
        if args.is_empty() {
            return Err(CommandError::Usage("/add <index...>"));
        }

        let records: Vec<EditRecord> = parse_indices(args, translation.entry_count())?
            .into_iter()
            .filter_map(|index| translation.entry(index))
            .map(EditRecord::from)
            .collect();

        match encode_records(&records) {
            Ok(text) => Ok(self.dispatch(Request::OpenEditor(text))),
            Err(e) => Ok(Transition::show(Output::Error(e.to_string()))),
        }
    }

    fn phrases(&mut self, args: &[&str]) -> Result<Transition, CommandError> {
        let translation = self
            .last_translation
            .as_ref()
            .ok_or(CommandError::NoTranslation)?;
        let Some(arg) = args.first() else {
            return Err(CommandError::Usage("/phrases <n>"));
        };

        let index = parse_index(arg, translation.entry_count())?;
        let Some(entry) = translation.entry(index) else {
            return Err(CommandError::InvalidIndex {
                index: index as i64,
                max: translation.entry_count(),
            });
        };

        let request = PhraseRequest {
            word: entry.from_word.source.clone(),
            meanings: entry.meanings(),
            from_lang: translation.from_lang.clone(),
            to_lang: translation.to_lang.clone(),
        };
        Ok(self.dispatch(Request::GeneratePhrases(request)))
    }

    fn cards(&mut self, args: &[&str]) -> Result<Transition, CommandError> {
        let phrases = self.last_phrases();
        if phrases.is_empty() {
            return Err(CommandError::NoPhrases);
        }
        if args.is_empty() {
            return Err(CommandError::Usage("/cards <n...> (e.g. /cards 1 3 5)"));
        }

        let records: Vec<EditRecord> = parse_indices(args, phrases.len())?
            .into_iter()
            .map(|index| EditRecord::from(&phrases[index - 1]))
            .collect();
        Ok(self.dispatch(Request::CreateCards(records)))
    }

    fn complete(&mut self, event: AppEvent) -> Transition {
        let kind = Pending::of_event(&event);
        if kind.is_none() || kind != self.pending {
            tracing::warn!(
                "ignoring {kind:?} completion while waiting for {:?}",
                self.pending
            );
            return Transition::default();
        }
        self.pending = None;

        match event {
            AppEvent::LookupFinished { word, result } => match result {
                Ok(translation) => {
                    tracing::info!(
                        "lookup {word:?}: {} entries",
                        translation.entry_count()
                    );
                    self.last_translation = Some(translation);
                    self.shown_entries = 0;
                    if self.total_entries() == 0 {
                        return Transition::show(Output::Notice(format!(
                            "No entries found for {word}."
                        )));
                    }
                    self.render_page(Some(PAGE_SIZE))
                }
                Err(e) => Transition::show(Output::Error(format!("Error: {e}"))),
            },
            AppEvent::PhrasesFinished(result) => match result {
                Ok(raw) => {
                    let phrases = parse_phrases(&raw);
                    let output = if phrases.is_empty() {
                        Output::Notice("No example sentences could be read from the response.".into())
                    } else {
                        Output::Phrases(phrases.clone())
                    };
                    self.last_phrases = Some(phrases);
                    Transition::show(output)
                }
                Err(e) => Transition::show(Output::Error(format!("Error: {e}"))),
            },
            AppEvent::EditorFinished(result) => match result.map(|content| decode_records(&content)) {
                Ok(Ok(records)) => self.dispatch(Request::CreateCards(records)),
                Ok(Err(e)) => Transition::show(Output::Error(format!("Error: {e}"))),
                Err(e) => Transition::show(Output::Error(format!("Editor error: {e}"))),
            },
            AppEvent::CardsCreated {
                created,
                total,
                error,
            } => match error {
                None => Transition::show(Output::Success(format!(
                    "Successfully created {created} card(s)."
                ))),
                Some(e) => Transition::show(Output::Error(format!(
                    "Error: created {created} of {total} cards: {e}"
                ))),
            },
            AppEvent::DecksListed(result) => list_output(result, Output::Decks),
            AppEvent::TemplatesListed(result) => list_output(result, Output::Templates),
            AppEvent::DictionariesListed(result) => list_output(result, Output::Dictionaries),
            AppEvent::Input(_) => Transition::default(),
        }
    }
}

fn list_output<T>(result: Result<T, String>, show: fn(T) -> Output) -> Transition {
    match result {
        Ok(items) => Transition::show(show(items)),
        Err(e) => Transition::show(Output::Error(format!("Error: {e}"))),
    }
}

/// Parse a user-facing 1-based index, valid in `[1, max]`
fn parse_index(arg: &str, max: usize) -> Result<usize, CommandError> {
    let index: i64 = arg
        .parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))?;
    if index < 1 || index as u64 > max as u64 {
        return Err(CommandError::InvalidIndex { index, max });
    }
    Ok(index as usize)
}

/// All-or-nothing: the first bad argument rejects the whole list
fn parse_indices(args: &[&str], max: usize) -> Result<Vec<usize>, CommandError> {
    args.iter().map(|arg| parse_index(arg, max)).collect()
}
