use scraper::{ElementRef, Html, Selector};

use super::MarkupNode;

/// Element of a document parsed by `scraper`
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    pub fn root(document: &'a Html) -> Self {
        Self(document.root_element())
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("invalid selector {selector:?}: {e}");
            None
        }
    }
}

impl MarkupNode for HtmlNode<'_> {
    fn find(&self, selector: &str) -> Vec<Self> {
        let Some(selector) = parse_selector(selector) else {
            return Vec::new();
        };
        let own_id = self.0.id();
        self.0
            .select(&selector)
            .filter(|el| el.id() != own_id)
            .map(HtmlNode)
            .collect()
    }

    fn text_content(&self) -> String {
        self.0.text().collect()
    }

    fn text_content_without(&self, selector: &str) -> String {
        let Some(selector) = parse_selector(selector) else {
            return self.text_content();
        };
        let own_id = self.0.id();
        let skipped: Vec<_> = self.0.select(&selector).map(|el| el.id()).collect();

        self.0
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let inside_skipped = node
                    .ancestors()
                    .take_while(|ancestor| ancestor.id() != own_id)
                    .any(|ancestor| skipped.contains(&ancestor.id()));
                (!inside_skipped).then(|| String::from(&**text))
            })
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }
}
