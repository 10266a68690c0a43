//! Hand-built node tree for parser tests.
//!
//! Selector support is limited to what the parsers use: compound
//! `tag.class#id` parts joined by the descendant combinator.

use std::rc::Rc;

use super::MarkupNode;

#[derive(Debug, Clone)]
pub(crate) struct Node(Rc<Element>);

#[derive(Debug)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
}

#[derive(Debug)]
enum Child {
    Element(Node),
    Text(String),
}

/// Builder for a synthetic element
pub(crate) struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
}

pub(crate) fn el(tag: &str) -> El {
    El {
        tag: tag.to_string(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl El {
    pub(crate) fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub(crate) fn text(mut self, text: &str) -> Self {
        self.children.push(Child::Text(text.to_string()));
        self
    }

    pub(crate) fn child(mut self, child: El) -> Self {
        self.children.push(Child::Element(child.build()));
        self
    }

    pub(crate) fn build(self) -> Node {
        Node(Rc::new(Element {
            tag: self.tag,
            attrs: self.attrs,
            children: self.children,
        }))
    }
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(part: &str) -> Self {
        let mut compound = Compound::default();
        let mut current = String::new();
        let mut kind = 't';
        for ch in part.chars().chain(std::iter::once('\0')) {
            if ch == '.' || ch == '#' || ch == '\0' {
                if !current.is_empty() {
                    match kind {
                        '.' => compound.classes.push(current.clone()),
                        '#' => compound.id = Some(current.clone()),
                        _ => compound.tag = Some(current.clone()),
                    }
                }
                current.clear();
                kind = ch;
            } else {
                current.push(ch);
            }
        }
        compound
    }

    fn matches(&self, node: &Node) -> bool {
        self.tag.as_ref().is_none_or(|tag| *tag == node.0.tag)
            && self
                .id
                .as_ref()
                .is_none_or(|id| node.attribute("id").as_deref() == Some(id.as_str()))
            && self.classes.iter().all(|class| node.has_class(class))
    }
}

impl Node {
    fn walk(&self, parts: &[Compound], ancestors: &mut Vec<Node>, out: &mut Vec<Node>) {
        for child in &self.0.children {
            if let Child::Element(node) = child {
                if matches_chain(parts, node, ancestors) {
                    out.push(node.clone());
                }
                ancestors.push(node.clone());
                node.walk(parts, ancestors, out);
                ancestors.pop();
            }
        }
    }

    fn collect_text(&self, skip: Option<&[Compound]>, ancestors: &mut Vec<Node>, out: &mut String) {
        for child in &self.0.children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(node) => {
                    if skip.is_some_and(|parts| matches_chain(parts, node, ancestors)) {
                        continue;
                    }
                    ancestors.push(node.clone());
                    node.collect_text(skip, ancestors, out);
                    ancestors.pop();
                }
            }
        }
    }
}

/// Right-most part matches the node, the rest match ancestors in order
fn matches_chain(parts: &[Compound], node: &Node, ancestors: &[Node]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };
    if !last.matches(node) {
        return false;
    }
    let mut remaining = rest.iter().rev().peekable();
    for ancestor in ancestors.iter().rev() {
        match remaining.peek() {
            Some(part) if part.matches(ancestor) => {
                remaining.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    remaining.peek().is_none()
}

fn parse_selector(selector: &str) -> Vec<Compound> {
    selector.split_whitespace().map(Compound::parse).collect()
}

impl MarkupNode for Node {
    fn find(&self, selector: &str) -> Vec<Self> {
        let parts = parse_selector(selector);
        let mut out = Vec::new();
        self.walk(&parts, &mut vec![self.clone()], &mut out);
        out
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(None, &mut vec![self.clone()], &mut out);
        out
    }

    fn text_content_without(&self, selector: &str) -> String {
        let parts = parse_selector(selector);
        let mut out = String::new();
        self.collect_text(Some(&parts), &mut vec![self.clone()], &mut out);
        out
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendant_selector_matches_through_ancestors() {
        let root = el("div")
            .child(
                el("td")
                    .class("FrWrd")
                    .child(el("strong").text("casa"))
                    .child(el("em").class("POS2").text("nf")),
            )
            .child(el("td").class("ToWrd").child(el("strong").text("house")))
            .build();

        assert_eq!(root.find_text("td.FrWrd strong"), "casa");
        assert_eq!(root.find("strong").len(), 2);
        assert_eq!(root.find("td.ToWrd em.POS2").len(), 0);
        assert_eq!(root.text_content_without("em.POS2"), "casahouse");
    }
}
