//! XPath subset for identity constraints
//!
//! `xs:selector` and `xs:field` carry a restricted XPath expression in their
//! `xpath` attribute. This module parses that subset into a list of
//! location paths with namespace-resolved name tests; it does not evaluate
//! them.
//!
//! ## Limitations
//!
//! Only the identity-constraint subset is accepted: no predicates, no
//! functions, no axes other than `child::` and `attribute::`, no absolute
//! paths. Attribute steps are only allowed as the last step of a field path.

mod parsers;

pub use parsers::{parse_field, parse_selector, XPathAxis};

use std::fmt;

use serde::{Serialize, Serializer};

use crate::namespaces::QName;

/// A parsed `xpath` attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XPathExpr {
    /// The literal attribute value
    pub expression: String,
    /// `|`-separated alternatives, in order
    pub paths: Vec<XPathPath>,
}

impl XPathExpr {
    /// Whether any path selects an attribute
    pub fn selects_attribute(&self) -> bool {
        self.paths.iter().any(|p| {
            p.steps
                .last()
                .map(|s| matches!(s.kind, StepKind::Attribute(_)))
                .unwrap_or(false)
        })
    }
}

impl fmt::Display for XPathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// One location path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XPathPath {
    /// Steps in order
    pub steps: Vec<XPathStep>,
}

/// One location step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XPathStep {
    /// Whether the step is preceded by `//`
    pub descendant: bool,
    /// What the step selects
    pub kind: StepKind,
}

/// Step kinds of the subset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    /// `.`
    SelfNode,
    /// A child element step
    Child(NameTest),
    /// An attribute step (fields only)
    Attribute(NameTest),
}

/// A name test with its prefix resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// `*`
    Any,
    /// `prefix:*`, holding the bound namespace
    Namespace(String),
    /// A QName; unprefixed names are in no namespace
    Name(QName),
}

impl Serialize for NameTest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NameTest::Any => serializer.serialize_str("*"),
            NameTest::Namespace(ns) => serializer.collect_str(&format_args!("{{{}}}*", ns)),
            NameTest::Name(name) => name.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::NamespaceScopes;

    #[test]
    fn test_selects_attribute() {
        let scopes = NamespaceScopes::new();
        assert!(parse_field("a/@b", &scopes).unwrap().selects_attribute());
        assert!(parse_field("a | @b", &scopes).unwrap().selects_attribute());
        assert!(!parse_field("a/b", &scopes).unwrap().selects_attribute());
    }

    #[test]
    fn test_display_keeps_literal() {
        let scopes = NamespaceScopes::new();
        let expr = parse_selector(" .//a ", &scopes).unwrap();
        assert_eq!(expr.to_string(), " .//a ");
    }

    #[test]
    fn test_name_test_json() {
        let json = serde_json::to_string(&NameTest::Namespace("urn:x".into())).unwrap();
        assert_eq!(json, "\"{urn:x}*\"");
        let json = serde_json::to_string(&NameTest::Any).unwrap();
        assert_eq!(json, "\"*\"");
    }
}
