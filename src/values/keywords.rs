//! Single-keyword attribute values

use serde::Serialize;

use super::{parse_keyword, ValueError};

/// `form`, `elementFormDefault`, `attributeFormDefault`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    /// `qualified`
    Qualified,
    /// `unqualified`
    Unqualified,
}

impl Form {
    /// Parse a form keyword
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        parse_keyword(
            raw,
            &[("qualified", Form::Qualified), ("unqualified", Form::Unqualified)],
        )
    }

    /// Whether this is `qualified`
    pub fn is_qualified(&self) -> bool {
        matches!(self, Form::Qualified)
    }
}

/// The `use` attribute of a local attribute declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeUse {
    /// `optional` (the default)
    Optional,
    /// `prohibited`
    Prohibited,
    /// `required`
    Required,
}

impl AttributeUse {
    /// Parse a use keyword
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        parse_keyword(
            raw,
            &[
                ("optional", AttributeUse::Optional),
                ("prohibited", AttributeUse::Prohibited),
                ("required", AttributeUse::Required),
            ],
        )
    }
}

/// `processContents` of a wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessContents {
    /// `skip`
    Skip,
    /// `lax`
    Lax,
    /// `strict` (the default)
    Strict,
}

impl ProcessContents {
    /// Parse a processContents keyword
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        parse_keyword(
            raw,
            &[
                ("skip", ProcessContents::Skip),
                ("lax", ProcessContents::Lax),
                ("strict", ProcessContents::Strict),
            ],
        )
    }
}

/// Value of the `whiteSpace` facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WhiteSpace {
    /// `preserve`
    Preserve,
    /// `replace`
    Replace,
    /// `collapse`
    Collapse,
}

impl WhiteSpace {
    /// Parse a whiteSpace keyword
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        parse_keyword(
            raw,
            &[
                ("preserve", WhiteSpace::Preserve),
                ("replace", WhiteSpace::Replace),
                ("collapse", WhiteSpace::Collapse),
            ],
        )
    }
}
