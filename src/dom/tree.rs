use crate::dom::element::ElementData;
use crate::error::{MapsError, Result};
use ego_tree::{NodeId, NodeRef};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};

/// An HTML document or fragment parsed by `scraper` and edited in place.
///
/// Node ids stay valid across insertions, so ids collected before an editing pass can still
/// be used after it.
#[derive(Debug, Clone)]
pub struct DomTree {
    html: Html,
}

impl From<Html> for DomTree {
    fn from(html: Html) -> Self {
        Self { html }
    }
}

impl DomTree {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    pub fn parse_document(html: &str) -> Self {
        Html::parse_document(html).into()
    }

    /// Parse an HTML fragment in body context
    pub fn parse_fragment(html: &str) -> Self {
        Html::parse_fragment(html).into()
    }

    pub fn is_fragment(&self) -> bool {
        self.html.tree.root().value().is_fragment()
    }

    /// The document (or fragment) node
    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).and_then(|node| node.value().as_element())
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .and_then(|node| node.value().as_text())
            .map(|text| &**text)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// Direct children that are elements
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|node| node.children().filter_map(ElementRef::wrap).map(|el| el.id()).collect())
            .unwrap_or_default()
    }

    /// All nodes below `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.descendants().skip(1))
            .map(|node| node.id())
    }

    /// Text nodes below `id` in document order
    pub fn text_nodes(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(id).filter(move |node| self.text(*node).is_some())
    }

    /// Concatenated text of every text node below `id`
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.text_nodes(id).filter_map(|node| self.text(node)).collect()
    }

    /// All elements with the given tag, in document order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .filter(|id| {
                self.element(*id)
                    .is_some_and(|el| el.name().eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    /// First descendant element satisfying `predicate`
    pub fn find_descendant_element<F>(&self, id: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(&Element) -> bool,
    {
        self.descendants(id)
            .find(|node| self.element(*node).is_some_and(&mut predicate))
    }

    /// First element in document order matching a CSS selector
    pub fn query_selector(&self, css: &str) -> Result<Option<NodeId>> {
        let selector =
            Selector::parse(css).map_err(|e| MapsError::InvalidSelector(format!("{}: {}", css, e)))?;

        Ok(self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| selector.matches(el))
            .map(|el| el.id()))
    }

    /// Child indices leading from the `<html>` element down to `id`.
    ///
    /// Indices count every child node (text and comments included), the same way
    /// `childNodes` does in a browser.
    pub fn child_path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let Some(mut node) = self.node(id) else {
            return path;
        };

        while let Some(parent) = node.parent() {
            if parent.parent().is_none() {
                break;
            }
            path.push(node.prev_siblings().count());
            node = parent;
        }

        path.reverse();
        path
    }

    /// Replace the data of a text node. Returns false if `id` is not a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return false;
        };
        match node.value() {
            Node::Text(existing) => {
                existing.text = text.into();
                true
            }
            _ => false,
        }
    }

    /// Insert a text node as the next sibling of `reference`
    pub fn insert_text_after(&mut self, reference: NodeId, text: &str) -> Option<NodeId> {
        self.insert_after(reference, Node::Text(Text { text: text.into() }))
    }

    /// Insert `<tag ...>label</tag>` as the next sibling of `reference`
    pub fn insert_element_after(
        &mut self,
        reference: NodeId,
        data: &ElementData,
        label: &str,
    ) -> Option<NodeId> {
        let id = self.insert_after(reference, Node::Element(data.to_element()))?;
        if !label.is_empty() {
            self.html
                .tree
                .get_mut(id)?
                .append(Node::Text(Text { text: label.into() }));
        }
        Some(id)
    }

    fn insert_after(&mut self, reference: NodeId, value: Node) -> Option<NodeId> {
        // the root and detached nodes have no sibling slot
        self.node(reference)?.parent()?;

        let mut node = self.html.tree.get_mut(reference)?;
        Some(node.insert_after(value).id())
    }

    /// Serialize back to HTML. Fragments serialize without the wrapping `<html>` element.
    pub fn to_html(&self) -> String {
        if self.is_fragment() {
            self.html.root_element().inner_html()
        } else {
            self.html.html()
        }
    }
}
