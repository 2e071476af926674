//! Schema document parser
//!
//! A single recursive descent over the element tree. Each element is
//! classified by the content matcher of its parent, which yields the
//! [`ParsingContext`] it is parsed in. Within that context its attributes
//! are checked against the attribute table, its children are parsed
//! recursively, and the context's builder assembles the model node.
//!
//! Namespace declarations are pushed on entry to every element and popped
//! on exit, so prefixes always resolve against the bindings in scope at
//! that element. The first violation aborts the parse with a
//! [`ParseError`] naming the active context and the element path.
//!
//! ```
//! use xmlschema_parser::XsdSchema;
//!
//! let schema = XsdSchema::from_string(
//!     r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!          <xs:element name="note" type="xs:string"/>
//!        </xs:schema>"#,
//! ).unwrap();
//! assert_eq!(schema.elements().len(), 1);
//! ```

mod attributes;
mod builders;

use std::path::Path;

use tracing::{debug, trace};

use self::attributes::{read_attributes, Attributes};
use self::builders::{build, Parsed, Parts};
use crate::documents::{Document, Element, Node};
use crate::error::{Error, ParseError, ParseErrorKind, Result};
use crate::grammar::{Content, ContentMatcher, ParsingContext, Slot};
use crate::limits::Limits;
use crate::loaders::Loader;
use crate::model::{NodeInfo, XsdComponent, XsdSchema};
use crate::names::trim_xml_whitespace;
use crate::namespaces::{InvalidDeclaration, NamespaceDeclarations, NamespaceScopes};
use crate::XSD_NAMESPACE;

/// Parser from XML element trees to [`XsdSchema`] models
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    limits: Limits,
}

impl SchemaParser {
    /// Create a parser with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// The limits in effect
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Parse the root `xs:schema` element of a schema document
    pub fn parse(&self, root: &Element) -> Result<XsdSchema> {
        let mut descent = Descent {
            limits: &self.limits,
            scopes: NamespaceScopes::new(),
            path: Vec::new(),
        };
        let schema = descent.root(root)?;

        debug!(
            root = %root.name,
            compositions = schema.composition.len(),
            components = schema.content.len(),
            "parsed schema document"
        );
        Ok(schema)
    }

    /// Parse a loaded document
    pub fn parse_document(&self, document: &Document) -> Result<XsdSchema> {
        match document.root() {
            Some(root) => self.parse(root),
            None => Err(Error::Xml("empty document".to_string())),
        }
    }

    /// Parse schema document text
    pub fn parse_str(&self, xml: &str) -> Result<XsdSchema> {
        self.limits.check_xml_size(xml.len())?;
        self.parse_document(&Document::from_string(xml)?)
    }

    /// Load and parse a schema file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<XsdSchema> {
        let text = Loader::new()
            .with_limits(self.limits.clone())
            .load_file(path)?;
        self.parse_str(&text)
    }
}

/// Parse a root `xs:schema` element with default limits
pub fn parse(root: &Element) -> Result<XsdSchema> {
    SchemaParser::new().parse(root)
}

impl XsdSchema {
    /// Parse a schema document from text
    pub fn from_string(xml: &str) -> Result<Self> {
        SchemaParser::new().parse_str(xml)
    }

    /// Load and parse a schema document from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        SchemaParser::new().parse_file(path)
    }
}

/// State of one parse
struct Descent<'a> {
    limits: &'a Limits,
    scopes: NamespaceScopes,
    /// Literal names of the elements entered so far
    path: Vec<String>,
}

impl Descent<'_> {
    fn location(&self) -> String {
        format!("/{}", self.path.join("/"))
    }

    fn child_location(&self, element: &Element) -> String {
        if self.path.is_empty() {
            format!("/{}", element.name)
        } else {
            format!("{}/{}", self.location(), element.name)
        }
    }

    fn fail(&self, kind: ParseErrorKind, context: ParsingContext) -> Error {
        self.fail_at(kind, context, self.location())
    }

    fn fail_at(&self, kind: ParseErrorKind, context: ParsingContext, location: String) -> Error {
        Error::Parse(ParseError::new(kind, context).with_location(location))
    }

    fn root(&mut self, root: &Element) -> Result<XsdSchema> {
        let context = ParsingContext::Schema;
        let declarations = self.declarations(root, context)?;
        let handle = self.scopes.push(declarations.clone());

        let namespace = self
            .namespace_of(root)
            .map_err(|kind| self.fail_at(kind, context, self.child_location(root)))?;
        if namespace.as_deref() != Some(XSD_NAMESPACE) || root.local_name() != "schema" {
            let kind = ParseErrorKind::UnexpectedElement {
                element: root.name.clone(),
                expected: "xs:schema".to_string(),
            };
            return Err(self.fail_at(kind, context, self.child_location(root)));
        }

        let parsed = self.descend(context, root, declarations)?;
        self.scopes.pop(handle);

        match *parsed {
            Parsed::Schema(schema) => Ok(schema),
            other => {
                let kind = ParseErrorKind::UnexpectedElement {
                    element: format!("xs:{}", other.as_component().tag()),
                    expected: "xs:schema".to_string(),
                };
                Err(self.fail_at(kind, context, self.child_location(root)))
            }
        }
    }

    /// `xmlns` declarations of `element`, reported in the parent's context
    fn declarations(
        &self,
        element: &Element,
        context: ParsingContext,
    ) -> Result<NamespaceDeclarations> {
        NamespaceDeclarations::from_element(element).map_err(|error| {
            self.fail_at(invalid_declaration(error), context, self.child_location(element))
        })
    }

    /// Namespace of an element's tag under the bindings in scope
    fn namespace_of(&self, element: &Element) -> std::result::Result<Option<String>, ParseErrorKind> {
        let namespace = match element.prefix() {
            Some(prefix) => Some(self.scopes.resolve_prefix(prefix).ok_or_else(|| {
                ParseErrorKind::UnresolvableNamespacePrefix {
                    prefix: prefix.to_string(),
                    attribute: None,
                }
            })?),
            None => self.scopes.resolve_default(),
        };
        Ok(namespace.map(str::to_string))
    }

    fn parse_child(
        &mut self,
        parent: ParsingContext,
        child: &Element,
        matcher: &mut ContentMatcher,
    ) -> Result<Box<Parsed>> {
        let declarations = self.declarations(child, parent)?;
        let handle = self.scopes.push(declarations.clone());

        let namespace = self.namespace_of(child).map_err(|kind| self.fail(kind, parent))?;
        let accepted = if namespace.as_deref() == Some(XSD_NAMESPACE) {
            matcher.accept(child.local_name(), &child.name)
        } else {
            Err(matcher.unexpected(&child.name))
        };
        let context = accepted.map_err(|kind| self.fail(kind, parent))?;

        let parsed = self.descend(context, child, declarations)?;
        self.scopes.pop(handle);
        Ok(parsed)
    }

    /// Parse one element in `context`
    ///
    /// This is the recursive path, one call per nesting level, so model
    /// nodes only cross it boxed and the per-element work happens in
    /// [`Self::enter`] and [`Self::finish`].
    fn descend(
        &mut self,
        context: ParsingContext,
        element: &Element,
        declarations: NamespaceDeclarations,
    ) -> Result<Box<Parsed>> {
        let head = self.enter(context, element, declarations)?;
        let children = match context.content() {
            Content::Any => Vec::new(),
            Content::Elements(slots) => self.children(context, element, slots)?,
        };
        let parsed = self.finish(context, element, head, children)?;
        self.path.pop();
        Ok(parsed)
    }

    /// Check limits and read the attributes of an element being entered
    #[inline(never)]
    fn enter(
        &mut self,
        context: ParsingContext,
        element: &Element,
        declarations: NamespaceDeclarations,
    ) -> Result<Box<(NodeInfo, Attributes)>> {
        self.path.push(element.name.clone());
        self.limits
            .check_xml_depth(self.path.len())
            .map_err(|_| self.too_deep())?;
        self.limits.check_namespaces(declarations.len())?;
        self.limits.check_attributes(element.attributes.len())?;
        trace!(context = %context, location = %self.location(), "entering element");

        let mut attributes =
            read_attributes(element, context, &self.scopes).map_err(|kind| self.fail(kind, context))?;
        let info = NodeInfo {
            id: attributes.id.take(),
            namespace_declarations: declarations,
            foreign_attributes: std::mem::take(&mut attributes.foreign),
        };
        Ok(Box::new((info, attributes)))
    }

    fn too_deep(&self) -> Error {
        Error::LimitExceeded(format!(
            "element {} is nested {} levels deep, the parser stops at {}",
            self.location(),
            self.path.len(),
            self.limits.max_xml_depth
        ))
    }

    /// Match and parse the children of element-only content
    fn children(
        &mut self,
        context: ParsingContext,
        element: &Element,
        slots: &'static [Slot],
    ) -> Result<Vec<Box<Parsed>>> {
        let mut matcher = ContentMatcher::new(slots);
        let mut children = Vec::new();
        for node in &element.children {
            match node {
                Node::Element(child) => {
                    children.push(self.parse_child(context, child, &mut matcher)?);
                }
                Node::Text(text) => {
                    let text = trim_xml_whitespace(text);
                    if !text.is_empty() {
                        let kind = ParseErrorKind::UnexpectedText {
                            text: text.to_string(),
                        };
                        return Err(self.fail(kind, context));
                    }
                }
                Node::Comment(_) => {}
            }
        }
        matcher.finish().map_err(|kind| self.fail(kind, context))?;
        Ok(children)
    }

    /// Hand an element's parts to its builder
    #[inline(never)]
    fn finish(
        &self,
        context: ParsingContext,
        element: &Element,
        head: Box<(NodeInfo, Attributes)>,
        children: Vec<Box<Parsed>>,
    ) -> Result<Box<Parsed>> {
        let (info, attributes) = *head;
        let content = match context.content() {
            Content::Any => element.children.clone(),
            Content::Elements(_) => Vec::new(),
        };
        let parts = Parts {
            info,
            attributes,
            children: children.into_iter().map(|child| *child).collect(),
            content,
        };
        let parsed = build(context, parts).map_err(|kind| self.fail(kind, context))?;
        Ok(Box::new(parsed))
    }
}

fn invalid_declaration(error: InvalidDeclaration) -> ParseErrorKind {
    ParseErrorKind::InvalidAttributeValue {
        attribute: error.attribute,
        value: error.value,
        reason: error.error.to_string(),
    }
}
