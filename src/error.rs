//! Error types for xmlschema-parser
//!
//! This module defines all error types used throughout the library.
//! Every grammar violation is a [`ParseError`], which names the parsing
//! context that was active, the offending attribute or element, and the
//! location of the failing element in the source document.

use std::fmt;
use thiserror::Error;

use crate::grammar::ParsingContext;

/// Result type alias using the crate Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xmlschema-parser operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema document violates the XSD grammar
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),
}

impl Error {
    /// The grammar violation behind this error, if it is one
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }

    /// The kind of grammar violation behind this error, if it is one
    pub fn kind(&self) -> Option<&ParseErrorKind> {
        self.parse_error().map(|e| &e.kind)
    }
}

/// What went wrong while parsing a schema element
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The literal value of a recognized attribute fails its value grammar
    #[error("invalid value '{value}' for attribute '{attribute}': {reason}")]
    InvalidAttributeValue {
        /// Attribute name as written
        attribute: String,
        /// The literal, unmodified value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The attribute is not legal in this context
    #[error("unexpected attribute '{attribute}'")]
    UnexpectedAttribute {
        /// Attribute name as written
        attribute: String,
    },

    /// A required attribute is absent
    #[error("missing required attribute '{attribute}'")]
    MissingRequiredAttribute {
        /// Name of the missing attribute
        attribute: String,
    },

    /// Two attributes that exclude each other are both present
    #[error("attributes '{first}' and '{second}' are mutually exclusive")]
    ConflictingAttributes {
        /// First attribute of the pair
        first: String,
        /// Second attribute of the pair
        second: String,
    },

    /// A child element that the content model does not allow here
    #[error("unexpected element '{element}', expected {expected}")]
    UnexpectedElement {
        /// Tag of the offending child
        element: String,
        /// What the content model would have accepted
        expected: String,
    },

    /// A child element that is legal in this context but not at this position
    #[error("element '{element}' is out of order, expected {expected}")]
    OutOfOrderElement {
        /// Tag of the offending child
        element: String,
        /// What the content model would have accepted
        expected: String,
    },

    /// A required child element is absent
    #[error("missing required element {element}{}", found_suffix(.found))]
    MissingRequiredElement {
        /// Description of the required element(s)
        element: String,
        /// The child found in its place, if any
        found: Option<String>,
    },

    /// Character data inside element-only content
    #[error("unexpected character content '{text}'")]
    UnexpectedText {
        /// The trimmed text
        text: String,
    },

    /// A prefix with no enclosing namespace binding
    #[error("unresolvable namespace prefix '{prefix}'{}", attribute_suffix(.attribute))]
    UnresolvableNamespacePrefix {
        /// The unbound prefix
        prefix: String,
        /// Attribute holding the QName, or None for an element/attribute name
        attribute: Option<String>,
    },
}

fn found_suffix(found: &Option<String>) -> String {
    found
        .as_ref()
        .map(|f| format!(", found '{}'", f))
        .unwrap_or_default()
}

fn attribute_suffix(attribute: &Option<String>) -> String {
    attribute
        .as_ref()
        .map(|a| format!(" in attribute '{}'", a))
        .unwrap_or_default()
}

/// XML Schema grammar violation with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong
    pub kind: ParseErrorKind,
    /// The grammar production active when the error was raised
    pub context: ParsingContext,
    /// Path of the failing element in the document
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(kind: ParseErrorKind, context: ParsingContext) -> Self {
        Self {
            kind,
            context,
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.kind, self.context)?;

        if let Some(ref loc) = self.location {
            write!(f, " at {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(
            ParseErrorKind::InvalidAttributeValue {
                attribute: "minOccurs".to_string(),
                value: "-1".to_string(),
                reason: "not a non-negative integer".to_string(),
            },
            ParsingContext::NarrowElement,
        )
        .with_location("/xs:schema/xs:complexType/xs:sequence/xs:element");

        let msg = format!("{}", err);
        assert!(msg.contains("'-1'"));
        assert!(msg.contains("minOccurs"));
        assert!(msg.contains("narrowElement"));
        assert!(msg.contains("/xs:schema/xs:complexType"));
    }

    #[test]
    fn test_missing_element_display() {
        let kind = ParseErrorKind::MissingRequiredElement {
            element: "xs:selector".to_string(),
            found: Some("xs:field".to_string()),
        };
        assert_eq!(
            kind.to_string(),
            "missing required element xs:selector, found 'xs:field'"
        );
    }

    #[test]
    fn test_error_conversion() {
        let parse_err = ParseError::new(
            ParseErrorKind::UnexpectedAttribute {
                attribute: "foo".to_string(),
            },
            ParsingContext::Schema,
        );
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(_)));
        assert!(matches!(
            err.kind(),
            Some(ParseErrorKind::UnexpectedAttribute { .. })
        ));
    }
}
