//! XML document tree handed to the schema parser
//!
//! The parser never sees bytes: it walks this tree of literal element names,
//! ordered attributes and ordered child nodes. [`Document::parse`] builds
//! the tree with quick-xml; other readers can build it with the
//! [`Element`] builder methods.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

/// A child node of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Node {
    /// Child element
    Element(Element),
    /// Character data (CDATA sections included)
    Text(String),
    /// Comment
    Comment(String),
}

impl Node {
    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Literal tag name, prefix included (`xs:element`)
    pub name: String,
    /// Attributes in document order, keyed by literal name; values are unescaped
    pub attributes: IndexMap<String, String>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute (builder style)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a child element (builder style)
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Add a text node (builder style)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Prefix of the tag name, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Local part of the tag name
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Get an attribute value by literal name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(false);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e)?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        Self::attach(&mut doc, &mut element_stack, current)?;
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e)?;
                    Self::attach(&mut doc, &mut element_stack, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?
                        .into_owned();
                    Self::push_node(&mut element_stack, Node::Text(text))?;
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8(e.into_inner().into_owned())
                        .map_err(|e| Error::Xml(format!("Invalid CDATA section: {}", e)))?;
                    Self::push_node(&mut element_stack, Node::Text(text))?;
                }
                Ok(Event::Comment(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let comment = String::from_utf8_lossy(&e).into_owned();
                        current.children.push(Node::Comment(comment));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Declarations, processing instructions and doctypes carry no schema content
            }
            buf.clear();
        }

        if let Some(open) = element_stack.last() {
            return Err(Error::Xml(format!("Unclosed element '{}'", open.name)));
        }

        Ok(doc)
    }

    fn attach(doc: &mut Document, stack: &mut [Element], element: Element) -> Result<()> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(Node::Element(element));
        } else if doc.root.is_some() {
            return Err(Error::Xml(format!(
                "Second root element '{}'",
                element.name
            )));
        } else {
            doc.root = Some(element);
        }
        Ok(())
    }

    fn push_node(stack: &mut [Element], node: Node) -> Result<()> {
        match stack.last_mut() {
            Some(current) => current.children.push(node),
            None => {
                if let Node::Text(t) = &node {
                    if !t.trim().is_empty() {
                        return Err(Error::Xml(format!(
                            "Character data outside the root element: '{}'",
                            t.trim()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Parse element from BytesStart event
    fn parse_element(start: &BytesStart) -> Result<Element> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut element = Element::new(name);

        // Duplicate attributes are rejected by the attribute iterator
        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .into_owned();

            element.attributes.insert(attr_name, attr_value);
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.root.is_none());
    }

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<root><child>text</child></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.local_name(), "root");
        assert_eq!(root.child_elements().count(), 1);
        let child = root.child_elements().next().unwrap();
        assert_eq!(child.local_name(), "child");
        assert_eq!(child.text(), "text");
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let xml = r#"<root b="2" a="1" xmlns:x="urn:x"/>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        let names: Vec<_> = root.attributes.keys().cloned().collect();
        assert_eq!(names, vec!["b", "a", "xmlns:x"]);
        assert_eq!(root.get_attribute("a"), Some("1"));
    }

    #[test]
    fn test_prefixed_names() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.prefix(), Some("xs"));
        assert_eq!(root.local_name(), "schema");
    }

    #[test]
    fn test_attribute_values_are_unescaped_not_trimmed() {
        let xml = r#"<root fixed="  a &amp; b  "/>"#;
        let doc = Document::from_string(xml).unwrap();
        assert_eq!(doc.root.unwrap().get_attribute("fixed"), Some("  a & b  "));
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let result = Document::from_string(r#"<root a="1" a="2"/>"#);
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_unclosed_element_rejected() {
        assert!(Document::from_string("<root><child>").is_err());
    }

    #[test]
    fn test_cdata_and_comments() {
        let xml = r#"<root><!-- note --><![CDATA[<raw>]]></root>"#;
        let root = Document::from_string(xml).unwrap().root.unwrap();
        assert_eq!(root.children[0], Node::Comment(" note ".to_string()));
        assert_eq!(root.text(), "<raw>");
    }

    #[test]
    fn test_builder() {
        let elem = Element::new("xs:element")
            .with_attribute("name", "foo")
            .with_child(Element::new("xs:annotation"));
        assert_eq!(elem.get_attribute("name"), Some("foo"));
        assert_eq!(elem.child_elements().count(), 1);
    }
}
