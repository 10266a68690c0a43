use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use lexicard_types::{DictionaryPair, Translation};
use reqwest::Url;
use scraper::Html;
use unicode_normalization::UnicodeNormalization;

use crate::error::LookupError;
use crate::markup::{HtmlNode, MarkupNode};
use crate::parser::parse_page;

const CATALOG_OPTION: &str = "select#fSelect optgroup option";

/// Source of raw dictionary pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, LookupError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| LookupError::Network {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, LookupError> {
        let network = |source| LookupError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(network)
    }
}

/// Lookups against one resolved language pair
pub struct Dictionary {
    fetcher: Arc<dyn PageFetcher>,
    base_url: Url,
    pair: DictionaryPair,
}

impl Dictionary {
    /// Resolve `from` + `to` against the site catalog
    pub async fn connect(
        fetcher: Arc<dyn PageFetcher>,
        base_url: &str,
        from: &str,
        to: &str,
    ) -> Result<Self, LookupError> {
        let base_url = parse_base_url(base_url)?;
        let code = format!("{from}{to}").to_lowercase();

        let catalog = fetch_catalog(fetcher.as_ref(), &base_url).await?;
        let pair = catalog
            .into_iter()
            .find(|pair| pair.code() == code)
            .ok_or(LookupError::UnknownDictionary(code))?;

        tracing::info!(
            "Using dictionary {} ({} -> {})",
            pair.code(),
            pair.from_label,
            pair.to_label
        );
        Ok(Self {
            fetcher,
            base_url,
            pair,
        })
    }

    pub fn pair(&self) -> &DictionaryPair {
        &self.pair
    }

    /// `<base>/<pair>/<urlencoded word>`
    pub fn lookup_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = self
            .base_url
            .join(&format!("{}/", self.pair.code()))
            .map_err(|e| LookupError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }

    pub async fn translate(&self, word: &str) -> Result<Translation, LookupError> {
        let word: String = word.trim().nfc().collect();
        let url = self.lookup_url(&word)?;
        tracing::debug!("Fetching {url}");

        let body = self.fetcher.fetch(&url).await?;
        let translation = Translation::new(
            word,
            self.pair.from_label.clone(),
            self.pair.to_label.clone(),
            url.to_string(),
        );
        parse_translation(&body, translation)
    }

    /// Catalog entries, optionally filtered
    pub async fn available(&self, filter: Option<&str>) -> Result<Vec<DictionaryPair>, LookupError> {
        let catalog = fetch_catalog(self.fetcher.as_ref(), &self.base_url).await?;
        Ok(match filter {
            Some(filter) => catalog
                .into_iter()
                .filter(|pair| matches_filter(pair, filter))
                .collect(),
            None => catalog,
        })
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, LookupError> {
    let mut url = Url::parse(base_url).map_err(|e| LookupError::InvalidUrl(format!("{base_url}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_translation(body: &str, translation: Translation) -> Result<Translation, LookupError> {
    let document = Html::parse_document(body);
    parse_page(&HtmlNode::root(&document), translation)
}

async fn fetch_catalog(
    fetcher: &dyn PageFetcher,
    base_url: &Url,
) -> Result<Vec<DictionaryPair>, LookupError> {
    let body = fetcher.fetch(base_url).await?;
    let document = Html::parse_document(&body);
    Ok(parse_catalog(&HtmlNode::root(&document)))
}

/// Language pairs from the dictionary selector, keyed and sorted by code
pub fn parse_catalog<N: MarkupNode>(root: &N) -> Vec<DictionaryPair> {
    let mut pairs = BTreeMap::new();

    for option in root.find(CATALOG_OPTION) {
        let text = option.text_content();
        let Some(id) = option.attribute("id") else {
            continue;
        };
        let Some((from_label, to_label)) = text.trim().split_once('-') else {
            continue;
        };
        let (Some(from_code), Some(to_code)) = (id.get(..2), id.get(2..)) else {
            continue;
        };
        if to_code.is_empty() {
            continue;
        }

        let pair = DictionaryPair {
            from_code: from_code.to_lowercase(),
            to_code: to_code.to_lowercase(),
            from_label: from_label.trim().to_string(),
            to_label: to_label.split('-').next().unwrap_or_default().trim().to_string(),
        };
        pairs.insert(pair.code(), pair);
    }

    pairs.into_values().collect()
}

/// Keeps a pair when the filter text contains one of its codes or labels,
/// ignoring case. `"spanish english"` matches both directions of that pair.
pub fn matches_filter(pair: &DictionaryPair, filter: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return true;
    }
    [
        &pair.from_code,
        &pair.from_label,
        &pair.to_code,
        &pair.to_label,
    ]
    .iter()
    .map(|field| field.to_lowercase())
    .any(|field| filter.contains(&field))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const CATALOG: &str = r#"
        <html><body>
        <select id="fSelect">
          <optgroup label="Spanish">
            <option id="enes">English-Spanish</option>
            <option id="esen">Spanish-English</option>
          </optgroup>
          <optgroup label="French">
            <option id="enfr">English-French</option>
            <option id="fr">French</option>
            <option>German-English</option>
          </optgroup>
        </select>
        </body></html>"#;

    const CASA: &str = r#"
        <html><body>
        <table class="WRD">
          <tr class="wrtopsection"><td colspan="3" title="Principal Translations">Principal Translations</td></tr>
          <tr class="even"><td class="FrWrd"><strong>house&rArr;</strong> <em class="POS2">n</em></td>
            <td>(building)</td><td class="ToWrd">casa <em class="POS2">nf</em></td></tr>
          <tr class="even"><td>&nbsp;</td><td class="FrEx">They live in a big house.</td></tr>
          <tr class="even"><td>&nbsp;</td><td class="ToEx">Viven en una casa grande.</td></tr>
          <tr class="odd"><td class="FrWrd"><strong>house</strong> <em class="POS2">n</em></td>
            <td>(household)</td><td class="ToWrd">hogar <em class="POS2">nm</em></td></tr>
        </table>
        </body></html>"#;

    const MISSING: &str = r#"<html><body><p id="noEntryFound">No English translation found for 'qwzx'.</p></body></html>"#;

    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &Url) -> Result<String, LookupError> {
            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or(LookupError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn fetcher() -> FakeFetcher {
        FakeFetcher::default()
            .with("https://dict.test/", CATALOG)
            .with("https://dict.test/enes/house", CASA)
            .with("https://dict.test/enes/qwzx", MISSING)
    }

    #[test]
    fn bare_html_row_has_empty_grammar_context_and_examples() {
        let body = r#"<html><body><table class="WRD">
            <tr class="even"><td class="FrWrd"><strong>run</strong></td>
              <td>no parens</td><td class="ToWrd">correr</td></tr>
            </table></body></html>"#;
        let translation = Translation::new(
            "run".into(),
            "English".into(),
            "Spanish".into(),
            "https://dict.test/enes/run".into(),
        );

        let translation = parse_translation(body, translation).unwrap();
        let entry = &translation.sections[0].entries[0];
        assert_eq!(translation.sections[0].title, lexicard_types::translation::UNTITLED_SECTION);
        assert_eq!(entry.from_word.grammar, "");
        assert_eq!(entry.context, "");
        assert_eq!(entry.from_example, "");
        assert!(entry.to_examples.is_empty());
    }

    #[test]
    fn catalog_skips_options_without_pair_labels() {
        let document = Html::parse_document(CATALOG);
        let pairs = parse_catalog(&HtmlNode::root(&document));
        let codes: Vec<_> = pairs.iter().map(DictionaryPair::code).collect();
        assert_eq!(codes, vec!["enes", "enfr", "esen"]);
        assert_eq!(pairs[0].from_label, "English");
        assert_eq!(pairs[0].to_label, "Spanish");
    }

    #[test]
    fn filter_matches_codes_and_labels() {
        let pair = DictionaryPair {
            from_code: "en".into(),
            to_code: "es".into(),
            from_label: "English".into(),
            to_label: "Spanish".into(),
        };
        assert!(matches_filter(&pair, "ES"));
        assert!(matches_filter(&pair, "english"));
        assert!(matches_filter(&pair, "Spanish or French"));
        assert!(matches_filter(&pair, "  "));
        assert!(!matches_filter(&pair, "spa"));
        assert!(!matches_filter(&pair, "french"));
    }

    #[test]
    fn filter_is_not_matched_inside_labels() {
        let pair = DictionaryPair {
            from_code: "fr".into(),
            to_code: "it".into(),
            from_label: "French".into(),
            to_label: "Italian".into(),
        };
        assert!(!matches_filter(&pair, "en"));
        assert!(matches_filter(&pair, "fr"));
    }

    #[tokio::test]
    async fn connect_rejects_unknown_pair() {
        let result = Dictionary::connect(Arc::new(fetcher()), "https://dict.test", "en", "de").await;
        assert!(matches!(result, Err(LookupError::UnknownDictionary(code)) if code == "ende"));
    }

    #[tokio::test]
    async fn lookup_url_encodes_word() {
        let dict = Dictionary::connect(Arc::new(fetcher()), "https://dict.test/", "EN", "es")
            .await
            .unwrap();
        assert_eq!(
            dict.lookup_url("casa de campo").unwrap().as_str(),
            "https://dict.test/enes/casa%20de%20campo"
        );
    }

    #[tokio::test]
    async fn translate_parses_fetched_page() {
        let dict = Dictionary::connect(Arc::new(fetcher()), "https://dict.test/", "en", "es")
            .await
            .unwrap();
        let translation = dict.translate("  house ").await.unwrap();

        assert_eq!(translation.word, "house");
        assert_eq!(translation.from_lang, "English");
        assert_eq!(translation.url, "https://dict.test/enes/house");
        assert_eq!(translation.entry_count(), 2);

        let first = translation.entry(1).unwrap();
        assert_eq!(first.from_word.source, "house");
        assert_eq!(first.to_words[0].meaning, "casa");
        assert_eq!(first.to_words[0].grammar, "nf");
        assert_eq!(first.from_example, "They live in a big house.");
        assert_eq!(first.to_examples, vec!["Viven en una casa grande."]);
        assert_eq!(translation.entry(2).unwrap().context, "household");
    }

    #[tokio::test]
    async fn translate_reports_not_found_verbatim() {
        let dict = Dictionary::connect(Arc::new(fetcher()), "https://dict.test/", "en", "es")
            .await
            .unwrap();
        let err = dict.translate("qwzx").await.unwrap_err();
        assert_eq!(err.to_string(), "No English translation found for 'qwzx'.");
    }

    #[tokio::test]
    async fn translate_propagates_fetch_errors() {
        let dict = Dictionary::connect(Arc::new(fetcher()), "https://dict.test/", "en", "es")
            .await
            .unwrap();
        let err = dict.translate("nothing").await.unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 404, .. }));
    }
}
