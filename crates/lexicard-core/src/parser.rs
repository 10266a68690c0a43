//! Dictionary page parser.
//!
//! A page holds one or more `table.WRD` tables. Rows alternate between the
//! `even` and `odd` classes, and a run of rows sharing a class is one
//! sense: the first row carries the headword, the following rows add more
//! meanings or examples. There is no other record boundary in the markup.

use lazy_static::lazy_static;
use lexicard_types::translation::UNTITLED_SECTION;
use lexicard_types::{FromWord, ParsedEntry, ToWord, Translation};
use regex::Regex;

use crate::error::LookupError;
use crate::markup::MarkupNode;

const NO_ENTRY: &str = "p#noEntryFound";
const TABLE: &str = "table.WRD";
const FROM_WORD: &str = "td.FrWrd strong";
const FROM_GRAMMAR: &str = "td.FrWrd em.POS2";
const TO_WORD: &str = "td.ToWrd";
const GRAMMAR: &str = "em.POS2";
const NOTES: &str = "span.dsense i";
const FROM_EXAMPLE: &str = "td.FrEx";
const TO_EXAMPLE: &str = "td.ToEx";

/// Marks a link to another entry, never part of the word itself
const REFERENCE_GLYPH: char = '⇒';

lazy_static! {
    static ref CONTEXT_RE: Regex = Regex::new(r"\((.*?)\)").unwrap();
    // Site notes starting with "ⓘ" inside example translations, removed wherever they appear
    static ref ANNOTATION_RE: Regex = Regex::new(r"ⓘ[^.]*\. *").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowMarker {
    Even,
    Odd,
}

impl RowMarker {
    fn of<N: MarkupNode>(row: &N) -> Option<Self> {
        if row.has_class("even") {
            Some(RowMarker::Even)
        } else if row.has_class("odd") {
            Some(RowMarker::Odd)
        } else {
            None
        }
    }
}

/// Fill `translation` from a parsed page, failing on the "no entry found" marker
pub fn parse_page<N: MarkupNode>(
    root: &N,
    mut translation: Translation,
) -> Result<Translation, LookupError> {
    let not_found = root.find_text(NO_ENTRY);
    if !not_found.is_empty() {
        return Err(LookupError::NotFound(not_found));
    }

    for table in root.find(TABLE) {
        let title = table_title(&table);
        let entries = parse_table(&table);
        tracing::debug!("table {title:?}: {} entries", entries.len());
        translation.section_mut(&title).entries.extend(entries);
    }

    Ok(translation)
}

fn table_title<N: MarkupNode>(table: &N) -> String {
    table
        .find_first("tr td")
        .and_then(|cell| cell.attribute("title"))
        .unwrap_or_else(|| UNTITLED_SECTION.to_string())
}

pub(crate) fn parse_table<N: MarkupNode>(table: &N) -> Vec<ParsedEntry> {
    let rows = table
        .find("tr")
        .into_iter()
        .filter_map(|row| RowMarker::of(&row).map(|marker| (marker, row)));

    group_runs(rows)
        .iter()
        .map(|group| parse_entry(group))
        .collect()
}

/// Split a keyed sequence into maximal runs of equal keys, keeping order
pub(crate) fn group_runs<K, T, I>(items: I) -> Vec<Vec<T>>
where
    K: PartialEq,
    I: IntoIterator<Item = (K, T)>,
{
    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut last_key = None;

    for (key, item) in items {
        if last_key.as_ref() != Some(&key) && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
        current.push(item);
        last_key = Some(key);
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn parse_entry<N: MarkupNode>(rows: &[N]) -> ParsedEntry {
    ParsedEntry {
        from_word: parse_from_word(&rows[0]),
        to_words: rows.iter().filter_map(parse_to_word).collect(),
        context: parse_context(&rows[0]),
        from_example: rows
            .iter()
            .find_map(|row| row.find_first(FROM_EXAMPLE))
            .map(|cell| cell.text_content().trim().to_string())
            .unwrap_or_default(),
        to_examples: rows
            .iter()
            .filter_map(|row| row.find_first(TO_EXAMPLE))
            .map(|cell| {
                let text = cell.text_content();
                ANNOTATION_RE.replace_all(text.trim(), "").trim().to_string()
            })
            .collect(),
    }
}

fn strip_glyph(text: &str) -> String {
    text.replace(REFERENCE_GLYPH, "").trim().to_string()
}

fn parse_from_word<N: MarkupNode>(row: &N) -> FromWord {
    FromWord {
        source: strip_glyph(&row.find_text(FROM_WORD)),
        grammar: row.find_text(FROM_GRAMMAR),
    }
}

fn parse_to_word<N: MarkupNode>(row: &N) -> Option<ToWord> {
    let cell = row.find_first(TO_WORD)?;
    Some(ToWord {
        meaning: strip_glyph(&cell.text_content_without(GRAMMAR)),
        notes: row.find_text(NOTES),
        grammar: cell.find_text(GRAMMAR),
    })
}

fn parse_context<N: MarkupNode>(row: &N) -> String {
    let Some(cell) = row.find("td").into_iter().nth(1) else {
        return String::new();
    };
    CONTEXT_RE
        .captures(&cell.text_content())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
