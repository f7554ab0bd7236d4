use html5ever::{Attribute, LocalName, QualName, namespace_url, ns};
use indexmap::IndexMap;
use scraper::node::Element;
use serde::{Deserialize, Serialize};

/// Tag name and attributes of an element to be created in a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementData {
    /// HTML tag name (e.g., "a", "span")
    pub tag_name: String,

    /// Element attributes in insertion order (e.g., href, target, rel)
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl ElementData {
    /// Create element data with no attributes
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Builder method: add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Add a single attribute, replacing any previous value
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// The parsed-document form of this element, in the HTML namespace
    pub fn to_element(&self) -> Element {
        let attributes = self
            .attributes
            .iter()
            .map(|(key, value)| Attribute {
                name: QualName::new(None, ns!(), LocalName::from(key.as_str())),
                value: value.as_str().into(),
            })
            .collect();

        Element::new(
            QualName::new(None, ns!(html), LocalName::from(self.tag_name.as_str())),
            attributes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_data_creation() {
        let element = ElementData::new("a")
            .with_attribute("id", "pin-1")
            .with_attribute("href", "https://maps.example.com/?q=Paris");

        assert_eq!(element.tag_name, "a");
        assert_eq!(element.attributes["id"], "pin-1");
        assert_eq!(element.attributes["href"], "https://maps.example.com/?q=Paris");
        assert!(!element.attributes.contains_key("title"));
    }

    #[test]
    fn test_to_element_keeps_attribute_order() {
        let element = ElementData::new("a")
            .with_attribute("href", "#")
            .with_attribute("target", "_blank")
            .with_attribute("rel", "noopener");

        let built = element.to_element();
        assert_eq!(built.name(), "a");
        assert_eq!(built.attr("target"), Some("_blank"));

        let keys: Vec<_> = built.attrs().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["href", "target", "rel"]);
    }

    #[test]
    fn test_add_attribute_replaces() {
        let mut element = ElementData::new("span").with_attribute("class", "old");
        element.add_attribute("class", "new");

        assert_eq!(element.attributes["class"], "new");
        assert_eq!(element.attributes.len(), 1);
    }

    #[test]
    fn test_serialization() {
        let element = ElementData::new("td").with_attribute("class", "cell");

        let json = serde_json::to_string(&element).unwrap();
        let deserialized: ElementData = serde_json::from_str(&json).unwrap();

        assert_eq!(element, deserialized);
    }
}
