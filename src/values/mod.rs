//! Lexical value parsers
//!
//! Stateless parsers for the micro-grammars of XSD attribute values. Each
//! takes the raw attribute string and returns a typed value or a
//! [`ValueError`]; the attribute reader in `parser` adds the attribute name,
//! the parsing context and the literal to turn that into a diagnostic.

mod derivation;
mod keywords;
mod language;
mod occurs;
mod wildcards;

pub use derivation::{parse_derivation_set, DerivationKind, DerivationSet};
pub use keywords::{AttributeUse, Form, ProcessContents, WhiteSpace};
pub use language::Language;
pub use occurs::{parse_max_occurs, parse_non_negative_integer, parse_positive_integer, MaxOccurs};
pub use wildcards::{NamespaceConstraint, NamespaceItem};

use thiserror::Error;

use crate::names::{collapse_whitespace, trim_xml_whitespace};

/// Failure of a lexical value parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The literal does not match the value grammar
    #[error("{0}")]
    Invalid(String),

    /// A QName uses a prefix with no in-scope binding
    #[error("unbound prefix '{0}'")]
    UnboundPrefix(String),
}

impl ValueError {
    /// Shorthand for [`ValueError::Invalid`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValueError::Invalid(reason.into())
    }
}

/// Parse an `xs:boolean`: `true`, `false`, `1` or `0`, whitespace trimmed
pub fn parse_boolean(raw: &str) -> Result<bool, ValueError> {
    match trim_xml_whitespace(raw) {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ValueError::invalid(
            "expected one of 'true', 'false', '1', '0'",
        )),
    }
}

/// Parse a token-typed value (`xs:token`, `xs:anyURI`): whitespace collapsed
pub fn parse_token(raw: &str) -> String {
    collapse_whitespace(raw)
}

/// Match a trimmed value against a fixed keyword table
pub(crate) fn parse_keyword<T: Copy>(
    raw: &str,
    table: &[(&str, T)],
) -> Result<T, ValueError> {
    let value = trim_xml_whitespace(raw);
    table
        .iter()
        .find(|(keyword, _)| *keyword == value)
        .map(|(_, v)| *v)
        .ok_or_else(|| {
            let expected: Vec<_> = table.iter().map(|(k, _)| format!("'{}'", k)).collect();
            ValueError::invalid(format!("expected one of {}", expected.join(", ")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boolean_variants() {
        for raw in ["true", "1", " true ", "\t1\n"] {
            assert_eq!(parse_boolean(raw), Ok(true), "{:?}", raw);
        }
        for raw in ["false", "0", "  false", "0 "] {
            assert_eq!(parse_boolean(raw), Ok(false), "{:?}", raw);
        }
        for raw in ["TRUE", "yes", "", "01", "t rue"] {
            assert!(parse_boolean(raw).is_err(), "{:?}", raw);
        }
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token("  http://example.org/a  "), "http://example.org/a");
        assert_eq!(parse_token("1.0\n beta"), "1.0 beta");
    }
}
