//! `block` / `final` keyword sets
//!
//! Each context allows a different subset of the derivation keywords;
//! `#all` stands for every keyword of that subset and must appear alone.

use serde::Serialize;

use super::ValueError;
use crate::names::is_xml_whitespace;

/// A derivation keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationKind {
    /// `extension`
    Extension,
    /// `restriction`
    Restriction,
    /// `substitution`
    Substitution,
    /// `list`
    List,
    /// `union`
    Union,
}

impl DerivationKind {
    /// The keyword as written in a schema
    pub fn keyword(&self) -> &'static str {
        match self {
            DerivationKind::Extension => "extension",
            DerivationKind::Restriction => "restriction",
            DerivationKind::Substitution => "substitution",
            DerivationKind::List => "list",
            DerivationKind::Union => "union",
        }
    }
}

/// Parsed value of a `block`, `final`, `blockDefault` or `finalDefault` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DerivationSet {
    /// `extension` is set
    pub extension: bool,
    /// `restriction` is set
    pub restriction: bool,
    /// `substitution` is set
    pub substitution: bool,
    /// `list` is set
    pub list: bool,
    /// `union` is set
    pub union: bool,
}

impl DerivationSet {
    /// Whether a keyword is in the set
    pub fn contains(&self, kind: DerivationKind) -> bool {
        match kind {
            DerivationKind::Extension => self.extension,
            DerivationKind::Restriction => self.restriction,
            DerivationKind::Substitution => self.substitution,
            DerivationKind::List => self.list,
            DerivationKind::Union => self.union,
        }
    }

    fn insert(&mut self, kind: DerivationKind) {
        match kind {
            DerivationKind::Extension => self.extension = true,
            DerivationKind::Restriction => self.restriction = true,
            DerivationKind::Substitution => self.substitution = true,
            DerivationKind::List => self.list = true,
            DerivationKind::Union => self.union = true,
        }
    }

    /// Whether no keyword is set (an empty attribute value)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse a whitespace-separated derivation keyword list
///
/// Repeated keywords are idempotent; keywords outside `allowed` fail.
pub fn parse_derivation_set(
    raw: &str,
    allowed: &[DerivationKind],
) -> Result<DerivationSet, ValueError> {
    let tokens: Vec<&str> = raw
        .split(is_xml_whitespace)
        .filter(|t| !t.is_empty())
        .collect();

    let mut set = DerivationSet::default();
    if tokens.contains(&"#all") {
        if tokens.iter().any(|t| *t != "#all") {
            return Err(ValueError::invalid("'#all' cannot be combined with other keywords"));
        }
        for kind in allowed {
            set.insert(*kind);
        }
        return Ok(set);
    }

    for token in tokens {
        let kind = allowed
            .iter()
            .find(|k| k.keyword() == token)
            .ok_or_else(|| {
                let expected: Vec<_> = allowed.iter().map(|k| k.keyword()).collect();
                ValueError::invalid(format!(
                    "unknown keyword '{}', expected '#all' or a list of {}",
                    token,
                    expected.join(", ")
                ))
            })?;
        set.insert(*kind);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use DerivationKind::*;

    const BLOCK: &[DerivationKind] = &[Extension, Restriction, Substitution];
    const SIMPLE_FINAL: &[DerivationKind] = &[List, Union, Restriction];

    #[test]
    fn test_all_expands_to_allowed_keywords() {
        let set = parse_derivation_set("#all", BLOCK).unwrap();
        assert!(set.extension && set.restriction && set.substitution);
        assert!(!set.list && !set.union);

        let set = parse_derivation_set(" #all ", SIMPLE_FINAL).unwrap();
        assert!(set.list && set.union && set.restriction);
        assert!(!set.extension && !set.substitution);
    }

    #[test]
    fn test_duplicates_are_idempotent() {
        let set = parse_derivation_set("extension extension\trestriction", BLOCK).unwrap();
        assert!(set.extension && set.restriction);
        assert!(!set.substitution);
    }

    #[test]
    fn test_empty_value_is_empty_set() {
        let set = parse_derivation_set("   ", BLOCK).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_rejects_unknown_and_disallowed() {
        assert!(parse_derivation_set("list", BLOCK).is_err());
        assert!(parse_derivation_set("extensions", BLOCK).is_err());
        assert!(parse_derivation_set("#all extension", BLOCK).is_err());
        assert!(parse_derivation_set("all", BLOCK).is_err());
    }
}
