//! XML name validation and utilities
//!
//! This module provides validation for NCNames and QNames according to
//! XML 1.0 (fifth edition) and Namespaces in XML, plus the whitespace
//! helpers shared by the lexical value parsers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::values::ValueError;

const NAME_START_CHARS: &str = r"A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}";

const NAME_EXTRA_CHARS: &str = r"\-\.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}";

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^[{start}][{start}{extra}]*$",
        start = NAME_START_CHARS,
        extra = NAME_EXTRA_CHARS
    ))
    .expect("NCName pattern is valid")
});

/// Whitespace as defined by the XML `S` production
pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Strip leading and trailing XML whitespace
pub fn trim_xml_whitespace(s: &str) -> &str {
    s.trim_matches(is_xml_whitespace)
}

/// Collapse whitespace the way the XSD `collapse` facet does
pub fn collapse_whitespace(s: &str) -> String {
    s.split(is_xml_whitespace)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check if a string is a valid QName (qualified name)
pub fn is_valid_qname(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, local)) => is_valid_ncname(prefix) && is_valid_ncname(local),
        None => is_valid_ncname(name),
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

/// Parse an NCName-typed attribute value, trimming surrounding whitespace
pub fn parse_ncname(raw: &str) -> Result<String, ValueError> {
    let name = trim_xml_whitespace(raw);
    if is_valid_ncname(name) {
        Ok(name.to_string())
    } else {
        Err(ValueError::invalid("not a valid NCName"))
    }
}

/// Check the lexical form of a QName, returning its trimmed prefix and local part
pub fn parse_qname_lexical(raw: &str) -> Result<(Option<&str>, &str), ValueError> {
    let name = trim_xml_whitespace(raw);
    if !is_valid_qname(name) {
        return Err(ValueError::invalid("not a valid QName"));
    }
    Ok(split_qname(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("element"));
        assert!(is_valid_ncname("my-element"));
        assert!(is_valid_ncname("my_element"));
        assert!(is_valid_ncname("f00"));
        assert!(is_valid_ncname("_element"));
        assert!(is_valid_ncname("a.b"));
        assert!(is_valid_ncname("\u{e9}l\u{e9}ment"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("123element"));
        assert!(!is_valid_ncname("-element"));
        assert!(!is_valid_ncname(".element"));
        assert!(!is_valid_ncname("prefix:element"));
        assert!(!is_valid_ncname("two words"));
    }

    #[test]
    fn test_is_valid_qname() {
        assert!(is_valid_qname("element"));
        assert!(is_valid_qname("prefix:element"));
        assert!(is_valid_qname("xs:schema"));

        assert!(!is_valid_qname(""));
        assert!(!is_valid_qname(":element"));
        assert!(!is_valid_qname("element:"));
        assert!(!is_valid_qname("a:b:c"));
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("element"), (None, "element"));
        assert_eq!(split_qname("xs:element"), (Some("xs"), "element"));
    }

    #[test]
    fn test_parse_ncname_trims() {
        assert_eq!(parse_ncname("  foo \n").unwrap(), "foo");
        assert_eq!(parse_ncname("\tf00").unwrap(), "f00");
        assert!(parse_ncname("fo o").is_err());
        assert!(parse_ncname("   ").is_err());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_parse_qname_lexical() {
        assert_eq!(parse_qname_lexical(" baz:foo ").unwrap(), (Some("baz"), "foo"));
        assert_eq!(parse_qname_lexical("foo").unwrap(), (None, "foo"));
        assert!(parse_qname_lexical("baz:").is_err());
    }
}
