//! XML namespace handling
//!
//! This module provides qualified names (QNames), the namespace
//! declarations literally present on one element, and the stack of
//! in-scope bindings the parser maintains while descending the tree.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::documents::Element;
use crate::names::{is_valid_ncname, parse_qname_lexical};
use crate::values::ValueError;
use crate::{XMLNS_NAMESPACE, XML_NAMESPACE};

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Whether the name is in a namespace
    pub fn has_namespace(&self) -> bool {
        self.namespace.is_some()
    }

    /// The namespace URI, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The local part
    pub fn local_part(&self) -> &str {
        &self.local_name
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// A malformed `xmlns` / `xmlns:prefix` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDeclaration {
    /// The declaring attribute as written
    pub attribute: String,
    /// Its value
    pub value: String,
    /// Why it was rejected
    pub error: ValueError,
}

/// Namespace bindings declared literally on one element
///
/// The empty prefix stands for the default namespace. Declarations are kept
/// exactly as written, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamespaceDeclarations {
    bindings: IndexMap<Prefix, NamespaceUri>,
}

impl NamespaceDeclarations {
    /// Create an empty declaration set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping (empty prefix for the default namespace)
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.bindings.insert(prefix.into(), namespace.into());
    }

    /// Read the `xmlns` and `xmlns:prefix` attributes of an element
    pub fn from_element(element: &Element) -> Result<Self, InvalidDeclaration> {
        let mut decls = Self::new();
        for (name, value) in &element.attributes {
            let prefix = if name == "xmlns" {
                ""
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                prefix
            } else {
                continue;
            };
            if let Err(error) = check_declaration(prefix, value) {
                return Err(InvalidDeclaration {
                    attribute: name.clone(),
                    value: value.clone(),
                    error,
                });
            }
            decls.add_prefix(prefix, value.as_str());
        }
        Ok(decls)
    }

    /// Get the namespace for a prefix declared here
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace declared here
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.get_namespace("")
    }

    /// Iterate over (prefix, namespace) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the element declares nothing
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn check_declaration(prefix: &str, uri: &str) -> Result<(), ValueError> {
    if prefix.is_empty() {
        if uri == XML_NAMESPACE || uri == XMLNS_NAMESPACE {
            return Err(ValueError::invalid("reserved namespace cannot be the default"));
        }
        return Ok(());
    }
    if !is_valid_ncname(prefix) {
        return Err(ValueError::invalid("prefix is not a valid NCName"));
    }
    match prefix {
        "xmlns" => Err(ValueError::invalid("the xmlns prefix cannot be declared")),
        "xml" if uri != XML_NAMESPACE => Err(ValueError::invalid(
            "the xml prefix can only be bound to the XML namespace",
        )),
        _ if uri.is_empty() => Err(ValueError::invalid("a prefix cannot be undeclared")),
        _ if uri == XML_NAMESPACE && prefix != "xml" => Err(ValueError::invalid(
            "the XML namespace can only be bound to the xml prefix",
        )),
        _ => Ok(()),
    }
}

/// Marker returned by [`NamespaceScopes::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pushed scope must be popped"]
pub struct ScopeHandle(usize);

/// Stack of in-scope namespace bindings, one frame per open element
///
/// The bottom frame binds `xml` to the XML namespace.
#[derive(Debug, Clone)]
pub struct NamespaceScopes {
    frames: Vec<NamespaceDeclarations>,
}

impl NamespaceScopes {
    /// Create a scope stack holding only the built-in `xml` binding
    pub fn new() -> Self {
        let mut builtin = NamespaceDeclarations::new();
        builtin.add_prefix("xml", XML_NAMESPACE);
        Self {
            frames: vec![builtin],
        }
    }

    /// Layer a new frame over the current one
    pub fn push(&mut self, declarations: NamespaceDeclarations) -> ScopeHandle {
        self.frames.push(declarations);
        ScopeHandle(self.frames.len())
    }

    /// Discard the most recently pushed frame
    pub fn pop(&mut self, handle: ScopeHandle) {
        debug_assert_eq!(
            handle.0,
            self.frames.len(),
            "namespace scopes must be popped in LIFO order"
        );
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of pushed frames (the built-in frame excluded)
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Nearest enclosing binding for a prefix
    pub fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get_namespace(prefix))
    }

    /// Nearest enclosing default namespace; `xmlns=""` undeclares it
    pub fn resolve_default(&self) -> Option<&str> {
        self.resolve_prefix("").filter(|ns| !ns.is_empty())
    }

    /// Resolve a lexical QName against the in-scope bindings
    ///
    /// Unprefixed names take the default namespace when one is bound.
    pub fn resolve_qname(&self, raw: &str) -> Result<QName, ValueError> {
        let (prefix, local) = parse_qname_lexical(raw)?;
        self.resolve_parts(prefix, local, true)
    }

    /// Resolve an already split name
    ///
    /// With `use_default` false an unprefixed name stays namespace-less,
    /// as for attribute names and XPath name tests.
    pub fn resolve_parts(
        &self,
        prefix: Option<&str>,
        local: &str,
        use_default: bool,
    ) -> Result<QName, ValueError> {
        let namespace = match prefix {
            Some(p) => Some(
                self.resolve_prefix(p)
                    .ok_or_else(|| ValueError::UnboundPrefix(p.to_string()))?,
            ),
            None if use_default => self.resolve_default(),
            None => None,
        };
        Ok(QName::new(namespace, local))
    }

    /// All effective bindings, innermost winning
    pub fn in_scope(&self) -> IndexMap<String, String> {
        let mut bindings = IndexMap::new();
        for frame in &self.frames {
            for (prefix, ns) in frame.iter() {
                bindings.insert(prefix.to_string(), ns.to_string());
            }
        }
        bindings.retain(|prefix, ns| !(prefix.is_empty() && ns.is_empty()));
        bindings
    }
}

impl Default for NamespaceScopes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: &str = "http://www.w3.org/2001/XMLSchema";

    #[test]
    fn test_qname_creation() {
        let qname = QName::namespaced("http://example.com", "element");
        assert_eq!(qname.namespace(), Some("http://example.com"));
        assert_eq!(qname.local_part(), "element");
        assert!(qname.has_namespace());
    }

    #[test]
    fn test_qname_display() {
        let qname = QName::namespaced("http://example.com", "element");
        assert_eq!(qname.to_string(), "{http://example.com}element");

        let qname_local = QName::local("element");
        assert_eq!(qname_local.to_string(), "element");
        assert!(!qname_local.has_namespace());
    }

    #[test]
    fn test_declarations_from_element() {
        let elem = Element::new("xs:schema")
            .with_attribute("xmlns:xs", XS)
            .with_attribute("targetNamespace", "urn:t")
            .with_attribute("xmlns", "urn:default");
        let decls = NamespaceDeclarations::from_element(&elem).unwrap();

        assert_eq!(decls.len(), 2);
        assert_eq!(decls.get_namespace("xs"), Some(XS));
        assert_eq!(decls.get_default_namespace(), Some("urn:default"));
        let order: Vec<_> = decls.iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec!["xs", ""]);
    }

    #[test]
    fn test_invalid_declarations() {
        for (name, value) in [
            ("xmlns:p", ""),
            ("xmlns:xmlns", "urn:x"),
            ("xmlns:xml", "urn:x"),
            ("xmlns:1p", "urn:x"),
            ("xmlns", XML_NAMESPACE),
        ] {
            let elem = Element::new("e").with_attribute(name, value);
            let err = NamespaceDeclarations::from_element(&elem).unwrap_err();
            assert_eq!(err.attribute, name);
        }
    }

    #[test]
    fn test_scopes_shadowing() {
        let mut scopes = NamespaceScopes::new();
        let mut outer = NamespaceDeclarations::new();
        outer.add_prefix("p", "urn:outer");
        outer.add_prefix("", "urn:default");
        let h1 = scopes.push(outer);

        let mut inner = NamespaceDeclarations::new();
        inner.add_prefix("p", "urn:inner");
        let h2 = scopes.push(inner);

        assert_eq!(scopes.resolve_prefix("p"), Some("urn:inner"));
        assert_eq!(scopes.resolve_default(), Some("urn:default"));
        assert_eq!(scopes.depth(), 2);

        scopes.pop(h2);
        assert_eq!(scopes.resolve_prefix("p"), Some("urn:outer"));
        scopes.pop(h1);
        assert_eq!(scopes.resolve_prefix("p"), None);
        assert_eq!(scopes.resolve_prefix("xml"), Some(XML_NAMESPACE));
    }

    #[test]
    fn test_resolve_qname() {
        let mut scopes = NamespaceScopes::new();
        let mut decls = NamespaceDeclarations::new();
        decls.add_prefix("baz", "http://example.org/baz");
        let _h = scopes.push(decls);

        let qname = scopes.resolve_qname("baz:foo").unwrap();
        assert_eq!(qname, QName::namespaced("http://example.org/baz", "foo"));

        let bare = scopes.resolve_qname("foo").unwrap();
        assert!(!bare.has_namespace());
        assert_eq!(bare.local_part(), "foo");

        assert_eq!(
            scopes.resolve_qname("nope:foo"),
            Err(ValueError::UnboundPrefix("nope".to_string()))
        );
    }

    #[test]
    fn test_empty_default_undeclares() {
        let mut scopes = NamespaceScopes::new();
        let mut outer = NamespaceDeclarations::new();
        outer.add_prefix("", "urn:default");
        let _h1 = scopes.push(outer);
        let mut inner = NamespaceDeclarations::new();
        inner.add_prefix("", "");
        let _h2 = scopes.push(inner);

        assert_eq!(scopes.resolve_default(), None);
        assert!(!scopes.resolve_qname("foo").unwrap().has_namespace());
        assert!(!scopes.in_scope().contains_key(""));
    }
}
