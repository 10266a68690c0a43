//! Terminal text for session output.
//!
//! Everything here returns plain `String`s; color is applied only when
//! stdout is a terminal.

use crossterm::style::{Color, Stylize, style};
use lexicard_types::{Deck, DictionaryPair, FromWord, Output, ParsedEntry, Phrase, Template, ToWord};

const HELP: &[(&str, &str)] = &[
    ("<word>", "look up a word"),
    ("/more", "show next page of results"),
    ("/all", "show all remaining results"),
    ("/add <n...>", "edit and create cards from entries n"),
    ("/phrases <n>", "generate example sentences for entry n"),
    ("/cards <n...>", "create cards from phrases n (e.g. /cards 1 3 5)"),
    ("/decks", "list decks"),
    ("/templates", "list templates"),
    ("/dicts [filter]", "list dictionaries"),
    ("/help", "show this help"),
];

#[derive(Debug, Clone, Copy)]
enum Tone {
    Heading,
    Word,
    Grammar,
    Notes,
    Index,
    FromExample,
    ToExample,
    Bar,
    Dim,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colors only when stdout is a terminal
    pub fn for_stdout() -> Self {
        Self::new(atty::is(atty::Stream::Stdout))
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = match tone {
            Tone::Heading => style(text).with(Color::Yellow).bold(),
            Tone::Word => style(text).with(Color::Cyan).bold(),
            Tone::Grammar => style(text).with(Color::DarkGrey),
            Tone::Notes => style(text).with(Color::DarkYellow).italic(),
            Tone::Index => style(text).with(Color::DarkGrey).bold(),
            Tone::FromExample => style(text).with(Color::Green),
            Tone::ToExample => style(text).with(Color::Magenta).italic(),
            Tone::Bar => style(text).with(Color::Blue),
            Tone::Dim => style(text).with(Color::DarkGrey),
            Tone::Error => style(text).with(Color::Red),
            Tone::Success => style(text).with(Color::Green).bold(),
        };
        styled.to_string()
    }

    pub fn render(&self, output: &Output) -> String {
        match output {
            Output::Entries {
                word,
                start,
                entries,
            } => self.entries(word, *start, entries),
            Output::PageHint { shown, total } => self.paint(
                &format!("  Showing {shown} of {total} — /more for next page, /all for everything"),
                Tone::Dim,
            ),
            Output::Notice(text) => self.paint(text, Tone::Dim),
            Output::Error(text) => self.paint(text, Tone::Error),
            Output::Success(text) => self.paint(text, Tone::Success),
            Output::Phrases(phrases) => self.phrases(phrases),
            Output::Decks(decks) => self.decks(decks),
            Output::Templates(templates) => self.templates(templates),
            Output::Dictionaries(pairs) => self.dictionaries(pairs),
            Output::Help => self.help(),
        }
    }

    pub fn hints(&self, hints: &[&str]) -> String {
        self.paint(&hints.join(" "), Tone::Dim)
    }

    fn from_word(&self, word: &FromWord) -> String {
        let mut out = self.paint(&word.source, Tone::Word);
        if !word.grammar.is_empty() {
            out.push(' ');
            out.push_str(&self.paint(&word.grammar, Tone::Grammar));
        }
        out
    }

    fn to_word(&self, word: &ToWord) -> String {
        let mut out = word.meaning.clone();
        if !word.grammar.is_empty() {
            out.push(' ');
            out.push_str(&self.paint(&word.grammar, Tone::Grammar));
        }
        if !word.notes.is_empty() {
            out.push(' ');
            out.push_str(&self.paint(&format!("({})", word.notes), Tone::Notes));
        }
        out
    }

    fn entry_block(&self, number: usize, entry: &ParsedEntry) -> Vec<String> {
        let mut lines = vec![format!(
            "{} {}",
            self.paint(&format!("{number}."), Tone::Index),
            self.from_word(&entry.from_word)
        )];
        if !entry.context.is_empty() {
            lines.push(format!("   {}", self.paint(&format!("({})", entry.context), Tone::Dim)));
        }
        lines.extend(entry.to_words.iter().map(|w| format!("   {}", self.to_word(w))));
        if !entry.from_example.is_empty() {
            lines.push(String::new());
            lines.push(format!("   {}", self.paint(&entry.from_example, Tone::FromExample)));
        }
        lines.extend(
            entry
                .to_examples
                .iter()
                .map(|ex| format!("   {}", self.paint(ex, Tone::ToExample))),
        );
        lines
    }

    fn entries(&self, word: &str, start: usize, entries: &[ParsedEntry]) -> String {
        let bar = self.paint("│", Tone::Bar);
        let footer = self.paint(&format!("╰{}", "─".repeat(24)), Tone::Bar);

        let mut out = Vec::new();
        if start == 0 {
            out.push(self.paint(word, Tone::Heading));
            out.push(String::new());
        }
        for (i, entry) in entries.iter().enumerate() {
            for line in self.entry_block(start + i + 1, entry) {
                if line.is_empty() {
                    out.push(format!(" {bar}"));
                } else {
                    out.push(format!(" {bar} {line}"));
                }
            }
            out.push(format!(" {footer}"));
        }
        out.join("\n")
    }

    fn phrases(&self, phrases: &[Phrase]) -> String {
        phrases
            .iter()
            .enumerate()
            .map(|(i, p)| {
                format!(
                    "  {} {} — {}",
                    self.paint(&format!("{}.", i + 1), Tone::Index),
                    self.paint(&p.source, Tone::Word),
                    self.paint(&p.target, Tone::ToExample)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn decks(&self, decks: &[Deck]) -> String {
        if decks.is_empty() {
            return self.paint("No decks.", Tone::Dim);
        }
        let mut out = Vec::new();
        for deck in decks {
            out.push(format!(
                "{} {}",
                self.paint(&deck.name, Tone::Word),
                self.paint(&deck.id, Tone::Dim)
            ));
            if let Some(template) = &deck.template_id {
                out.push(format!(
                    "  {} {}",
                    self.paint("template", Tone::Grammar),
                    self.paint(template, Tone::Dim)
                ));
            }
        }
        out.join("\n")
    }

    fn templates(&self, templates: &[Template]) -> String {
        if templates.is_empty() {
            return self.paint("No templates.", Tone::Dim);
        }
        let mut out = Vec::new();
        for template in templates {
            out.push(format!(
                "{} {}",
                self.paint(&template.name, Tone::Word),
                self.paint(&template.id, Tone::Dim)
            ));
            for field in &template.fields {
                out.push(format!(
                    "  {} {}",
                    self.paint(&field.name, Tone::Notes),
                    self.paint(&field.id, Tone::Dim)
                ));
            }
        }
        out.join("\n")
    }

    fn dictionaries(&self, pairs: &[DictionaryPair]) -> String {
        if pairs.is_empty() {
            return self.paint("No matching dictionaries.", Tone::Dim);
        }
        pairs
            .iter()
            .map(|pair| {
                format!(
                    "  {}  {} - {}",
                    self.paint(&pair.code(), Tone::Word),
                    pair.from_label,
                    pair.to_label
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn help(&self) -> String {
        let width = HELP.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);
        let mut out = vec![self.paint("Commands:", Tone::Heading)];
        out.extend(
            HELP.iter()
                .map(|(cmd, text)| format!("  {cmd:<width$} — {text}")),
        );
        out.join("\n")
    }
}
