use lexicard_types::{Phrase, PhraseRequest};

/// Separates the sentence from its translation on each line
pub const SEPARATOR: &str = " — ";

const BULLETS: [&str; 3] = ["- ", "* ", "• "];

/// Extract sentence pairs from a completion, one per line.
///
/// Lines without exactly two non-empty halves are dropped, so a partly
/// malformed response still yields the usable pairs.
pub fn parse_phrases(raw: &str) -> Vec<Phrase> {
    raw.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Phrase> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let line = BULLETS
        .iter()
        .find_map(|bullet| line.strip_prefix(bullet))
        .unwrap_or(line);
    let plain = line.replace("**", "");

    let (source, target) = plain.split_once(SEPARATOR)?;
    let (source, target) = (source.trim(), target.trim());
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some(Phrase {
        source: source.to_string(),
        target: target.to_string(),
    })
}

pub fn system_prompt(count: u32, request: &PhraseRequest) -> String {
    format!(
        "You are a language learning assistant. Generate {count} short example sentences in {to} \
         that use the given word with the given meaning. Include a {from} translation for each. \
         Wrap the target word/phrase in the {to} sentence with **asterisks** for emphasis. \
         Format each as: `- <{to} sentence>{SEPARATOR}<{from} translation>`",
        to = request.to_lang,
        from = request.from_lang,
    )
}

pub fn user_prompt(request: &PhraseRequest) -> String {
    format!("Word: {}\nMeaning: {}", request.word, request.meanings)
}
