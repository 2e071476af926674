//! Non-negative integers and occurrence bounds
//!
//! Values are arbitrary precision: the XSD grammar puts no upper bound on
//! `minOccurs`, `maxOccurs` or the length facets.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Serialize, Serializer};

use super::ValueError;
use crate::names::trim_xml_whitespace;

/// The value of a `maxOccurs` attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// A finite bound
    Bounded(BigUint),
    /// The literal `unbounded`
    Unbounded,
}

impl MaxOccurs {
    /// The XSD default, 1
    pub fn one() -> Self {
        MaxOccurs::Bounded(BigUint::one())
    }

    /// Whether this is `unbounded`
    pub fn is_unlimited(&self) -> bool {
        matches!(self, MaxOccurs::Unbounded)
    }

    /// The finite bound, if any
    pub fn bound(&self) -> Option<&BigUint> {
        match self {
            MaxOccurs::Bounded(n) => Some(n),
            MaxOccurs::Unbounded => None,
        }
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{}", n),
            MaxOccurs::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl Serialize for MaxOccurs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse an `xs:nonNegativeInteger`
///
/// Accepts surrounding whitespace, a leading `+`, leading zeros, and the
/// lexically legal negative zero (`-0`, `-000`).
pub fn parse_non_negative_integer(raw: &str) -> Result<BigUint, ValueError> {
    let value = trim_xml_whitespace(raw);
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'+') => (false, &value[1..]),
        Some(b'-') => (true, &value[1..]),
        _ => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::invalid("not a non-negative integer"));
    }
    let number = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| ValueError::invalid("not a non-negative integer"))?;
    if negative && !number.is_zero() {
        return Err(ValueError::invalid("value must not be negative"));
    }
    Ok(number)
}

/// Parse an `xs:positiveInteger`
pub fn parse_positive_integer(raw: &str) -> Result<BigUint, ValueError> {
    let number = parse_non_negative_integer(raw)?;
    if number.is_zero() {
        return Err(ValueError::invalid("value must be positive"));
    }
    Ok(number)
}

/// Parse a `maxOccurs` value: a non-negative integer or `unbounded`
pub fn parse_max_occurs(raw: &str) -> Result<MaxOccurs, ValueError> {
    if trim_xml_whitespace(raw) == "unbounded" {
        return Ok(MaxOccurs::Unbounded);
    }
    parse_non_negative_integer(raw)
        .map(MaxOccurs::Bounded)
        .map_err(|_| ValueError::invalid("expected a non-negative integer or 'unbounded'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_variants_canonicalize() {
        for raw in ["0", "+0", "+00", "   +00   ", "000", "-0", "-00"] {
            assert_eq!(
                parse_non_negative_integer(raw),
                Ok(BigUint::zero()),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_large_values_keep_precision() {
        let n = parse_non_negative_integer("123456789012345678901234567890").unwrap();
        assert_eq!(n.to_string(), "123456789012345678901234567890");
        let n = parse_non_negative_integer("+0004294967296").unwrap();
        assert_eq!(n, BigUint::from(4_294_967_296u64));
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["", " ", "+", "-1", "1.0", "1e3", "0x10", "1 2", "++1", "abc", "unbounded"] {
            assert!(parse_non_negative_integer(raw).is_err(), "{:?}", raw);
        }
    }

    #[test]
    fn test_positive_integer() {
        assert_eq!(parse_positive_integer("+01"), Ok(BigUint::one()));
        assert!(parse_positive_integer("0").is_err());
        assert!(parse_positive_integer("-0").is_err());
    }

    #[test]
    fn test_max_occurs() {
        assert!(parse_max_occurs("unbounded").unwrap().is_unlimited());
        assert!(parse_max_occurs("  unbounded ").unwrap().is_unlimited());
        assert_eq!(parse_max_occurs(" 1 "), Ok(MaxOccurs::one()));
        assert!(!parse_max_occurs("5").unwrap().is_unlimited());
        assert!(parse_max_occurs("Unbounded").is_err());
        assert!(parse_max_occurs("-5").is_err());
    }

    #[test]
    fn test_max_occurs_display() {
        assert_eq!(MaxOccurs::Unbounded.to_string(), "unbounded");
        assert_eq!(parse_max_occurs("+007").unwrap().to_string(), "7");
    }
}
