//! The `namespace` attribute of `any` and `anyAttribute`

use serde::Serialize;

use super::{parse_token, ValueError};
use crate::names::is_xml_whitespace;

/// One member of an explicit wildcard namespace list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamespaceItem {
    /// `##targetNamespace`
    TargetNamespace,
    /// `##local` (no namespace)
    Local,
    /// An explicit namespace URI
    Uri(String),
}

/// Parsed wildcard namespace constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamespaceConstraint {
    /// `##any`
    Any,
    /// `##other`
    Other,
    /// A whitespace-separated list, possibly empty
    List(Vec<NamespaceItem>),
}

impl NamespaceConstraint {
    /// Parse a wildcard `namespace` value
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let value = parse_token(raw);
        match value.as_str() {
            "##any" => return Ok(NamespaceConstraint::Any),
            "##other" => return Ok(NamespaceConstraint::Other),
            _ => {}
        }

        raw.split(is_xml_whitespace)
            .filter(|t| !t.is_empty())
            .map(|token| match token {
                "##targetNamespace" => Ok(NamespaceItem::TargetNamespace),
                "##local" => Ok(NamespaceItem::Local),
                "##any" | "##other" => Err(ValueError::invalid(format!(
                    "'{}' must appear alone",
                    token
                ))),
                t if t.starts_with("##") => {
                    Err(ValueError::invalid(format!("unknown keyword '{}'", t)))
                }
                uri => Ok(NamespaceItem::Uri(uri.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NamespaceConstraint::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(NamespaceConstraint::parse(" ##any "), Ok(NamespaceConstraint::Any));
        assert_eq!(NamespaceConstraint::parse("##other"), Ok(NamespaceConstraint::Other));
    }

    #[test]
    fn test_list() {
        let parsed = NamespaceConstraint::parse("##targetNamespace  urn:a ##local").unwrap();
        assert_eq!(
            parsed,
            NamespaceConstraint::List(vec![
                NamespaceItem::TargetNamespace,
                NamespaceItem::Uri("urn:a".to_string()),
                NamespaceItem::Local,
            ])
        );
        assert_eq!(NamespaceConstraint::parse(""), Ok(NamespaceConstraint::List(vec![])));
    }

    #[test]
    fn test_rejects_misplaced_keywords() {
        assert!(NamespaceConstraint::parse("##any urn:a").is_err());
        assert!(NamespaceConstraint::parse("##others").is_err());
    }
}
