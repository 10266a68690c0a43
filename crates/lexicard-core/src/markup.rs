//! Read-only view of a markup tree.
//!
//! The entry parser and the catalog reader only need three things from a
//! node: descendants by CSS selector, text content and attribute lookup.
//! [`HtmlNode`] provides them over a parsed HTML document; tests use a
//! hand-built tree instead.

mod html;
#[cfg(test)]
pub(crate) mod synthetic;

pub use html::HtmlNode;

pub trait MarkupNode: Sized {
    /// Descendants matching `selector`, in document order
    fn find(&self, selector: &str) -> Vec<Self>;

    /// Concatenated text of the node and all its descendants
    fn text_content(&self) -> String;

    /// Like [`MarkupNode::text_content`] but skipping descendants matching `selector`
    fn text_content_without(&self, selector: &str) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn find_first(&self, selector: &str) -> Option<Self> {
        self.find(selector).into_iter().next()
    }

    /// Trimmed text of every match, concatenated
    fn find_text(&self, selector: &str) -> String {
        self.find(selector)
            .iter()
            .map(MarkupNode::text_content)
            .collect::<String>()
            .trim()
            .to_string()
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}
