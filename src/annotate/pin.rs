use crate::dom::{DomTree, ElementData, NodeId};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;

/// Visible content of every pin
pub const PIN_GLYPH: &str = "📍";

const PIN_STYLE: &str = "text-decoration: none; border: none;";

/// Characters left as-is when encoding a URI component (same set as `encodeURIComponent`).
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Prefix shared by every map link built from `query_url`
pub fn map_link_prefix(query_url: &str) -> String {
    format!("{}q=", query_url)
}

/// `query_url` followed by `q=` and the encoded key. The query URL is used verbatim.
pub fn map_link_url(query_url: &str, key: &str) -> String {
    format!("{}{}", map_link_prefix(query_url), encode_component(key))
}

/// The pin link pointing at `href`, without its label
pub fn pin_element(href: &str) -> ElementData {
    ElementData::new("a")
        .with_attribute("href", href)
        .with_attribute("target", "_blank")
        .with_attribute("rel", "noopener noreferrer")
        .with_attribute("style", PIN_STYLE)
}

/// Insert a pin labelled `glyph` as the next sibling of `reference`
pub fn insert_pin_after(tree: &mut DomTree, reference: NodeId, href: &str, glyph: &str) -> Option<NodeId> {
    tree.insert_element_after(reference, &pin_element(href), glyph)
}

/// A map link found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapLink {
    #[serde(skip)]
    pub node: NodeId,
    pub href: String,
    /// Decoded place name from the `q=` component
    pub key: String,
}

/// Every `<a>` whose href starts with the map link prefix for `query_url`, in document order
pub fn find_map_links(tree: &DomTree, query_url: &str) -> Vec<MapLink> {
    let prefix = map_link_prefix(query_url);

    tree.descendants(tree.root())
        .filter_map(|id| {
            let element = tree.element(id).filter(|el| el.name() == "a")?;
            let href = element.attr("href")?;
            let encoded = href.strip_prefix(prefix.as_str())?;
            Some(MapLink {
                node: id,
                href: href.to_string(),
                key: percent_decode_str(encoded).decode_utf8_lossy().into_owned(),
            })
        })
        .collect()
}
