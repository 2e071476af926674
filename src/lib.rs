//! # xmlschema-parser
//!
//! A conformance-grade parser for XML Schema (XSD 1.0) documents.
//!
//! A schema document is read into an element tree and checked against the
//! XSD document grammar: the legal attributes of every element with their
//! value grammars, the legal child sequence with ordering, cardinality and
//! mutual exclusion, and qualified-name resolution against the namespace
//! declarations in scope. The result is a strongly typed object model
//! ([`XsdSchema`] and the node types in [`model`]) or a [`ParseError`]
//! naming what went wrong, in which grammar context and where.
//!
//! The parser does not resolve references between components, follow
//! `include`/`import` locations or validate instance documents.
//!
//! ## Example
//!
//! ```rust
//! use xmlschema_parser::{ParseErrorKind, XsdSchema};
//!
//! let schema = XsdSchema::from_string(
//!     r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
//!                  targetNamespace="urn:example">
//!          <xs:element name="order" type="xs:string"/>
//!        </xs:schema>"#,
//! )?;
//! assert_eq!(schema.target_namespace.as_deref(), Some("urn:example"));
//! assert!(schema.element("order").is_some());
//!
//! let error = XsdSchema::from_string(
//!     r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!          <xs:element/>
//!        </xs:schema>"#,
//! )
//! .unwrap_err();
//! assert!(matches!(
//!     error.kind(),
//!     Some(ParseErrorKind::MissingRequiredAttribute { .. })
//! ));
//! # Ok::<(), xmlschema_parser::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Documents and names
pub mod documents;
pub mod loaders;
pub mod names;
pub mod namespaces;

// Lexical value grammars
pub mod values;
pub mod xpath;

// Element grammar, object model and parser
pub mod grammar;
pub mod model;
pub mod parser;

// Re-exports for convenience
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use grammar::ParsingContext;
pub use limits::Limits;
pub use model::XsdSchema;
pub use namespaces::QName;
pub use parser::{parse, SchemaParser};

/// Version of the xmlschema-parser library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";
