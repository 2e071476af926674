//! Simple type definitions and constraining facets

use num_bigint::BigUint;
use serde::Serialize;

use super::{push_annotation, Component, NodeInfo, XsdAnnotation, XsdComponent};
use crate::namespaces::QName;
use crate::values::{DerivationSet, WhiteSpace};

/// `xs:simpleType`, named (global) or anonymous (local)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSimpleType {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `name`; always present on global definitions, never on local ones
    pub name: Option<String>,
    /// `final`
    #[serde(rename = "final")]
    pub final_set: Option<DerivationSet>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// `restriction`, `list` or `union`
    pub derivation: SimpleDerivation,
}

/// How a simple type is derived
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleDerivation {
    /// `xs:restriction`
    Restriction(XsdSimpleRestriction),
    /// `xs:list`
    List(XsdList),
    /// `xs:union`
    Union(XsdUnion),
}

impl XsdSimpleType {
    /// The restriction, if derived by restriction
    pub fn restriction(&self) -> Option<&XsdSimpleRestriction> {
        match &self.derivation {
            SimpleDerivation::Restriction(r) => Some(r),
            _ => None,
        }
    }

    /// The list, if derived by list
    pub fn list(&self) -> Option<&XsdList> {
        match &self.derivation {
            SimpleDerivation::List(l) => Some(l),
            _ => None,
        }
    }

    /// The union, if derived by union
    pub fn union(&self) -> Option<&XsdUnion> {
        match &self.derivation {
            SimpleDerivation::Union(u) => Some(u),
            _ => None,
        }
    }
}

impl XsdComponent for XsdSimpleType {
    fn tag(&self) -> &'static str {
        "simpleType"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.push(match &self.derivation {
            SimpleDerivation::Restriction(r) => r.into(),
            SimpleDerivation::List(l) => l.into(),
            SimpleDerivation::Union(u) => u.into(),
        });
        children
    }
}

/// A base or item type: a QName attribute or an inline `xs:simpleType`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleTypeRef {
    /// Named by `base` / `itemType`
    Named(QName),
    /// Anonymous child `xs:simpleType`
    Inline(Box<XsdSimpleType>),
}

impl SimpleTypeRef {
    /// The referenced name, if named
    pub fn name(&self) -> Option<&QName> {
        match self {
            SimpleTypeRef::Named(name) => Some(name),
            SimpleTypeRef::Inline(_) => None,
        }
    }

    /// The inline type, if anonymous
    pub fn inline(&self) -> Option<&XsdSimpleType> {
        match self {
            SimpleTypeRef::Named(_) => None,
            SimpleTypeRef::Inline(t) => Some(t),
        }
    }
}

/// `xs:restriction` inside `xs:simpleType`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSimpleRestriction {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `base` attribute or inline base type
    pub base: SimpleTypeRef,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Facets in document order
    pub facets: Vec<XsdFacet>,
}

impl XsdSimpleRestriction {
    /// Facets of one kind, in document order
    pub fn facets_of(&self, kind: FacetKind) -> Vec<&XsdFacet> {
        self.facets.iter().filter(|f| f.kind == kind).collect()
    }
}

impl XsdComponent for XsdSimpleRestriction {
    fn tag(&self) -> &'static str {
        "restriction"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        if let Some(inline) = self.base.inline() {
            children.push(inline.into());
        }
        children.extend(self.facets.iter().map(Component::from));
        children
    }
}

/// `xs:list`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdList {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `itemType` attribute or inline item type
    pub item_type: SimpleTypeRef,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdList {
    fn tag(&self) -> &'static str {
        "list"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        if let Some(inline) = self.item_type.inline() {
            children.push(inline.into());
        }
        children
    }
}

/// `xs:union`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdUnion {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `memberTypes`; an empty attribute is an empty list
    pub member_types: Option<Vec<QName>>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Inline member types
    pub simple_types: Vec<XsdSimpleType>,
}

impl XsdUnion {
    /// Number of members, named and inline
    pub fn member_count(&self) -> usize {
        self.member_types.as_ref().map(Vec::len).unwrap_or(0) + self.simple_types.len()
    }
}

impl XsdComponent for XsdUnion {
    fn tag(&self) -> &'static str {
        "union"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.extend(self.simple_types.iter().map(Component::from));
        children
    }
}

/// The constraining facets of XSD 1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FacetKind {
    /// `xs:minExclusive`
    MinExclusive,
    /// `xs:minInclusive`
    MinInclusive,
    /// `xs:maxExclusive`
    MaxExclusive,
    /// `xs:maxInclusive`
    MaxInclusive,
    /// `xs:totalDigits`
    TotalDigits,
    /// `xs:fractionDigits`
    FractionDigits,
    /// `xs:length`
    Length,
    /// `xs:minLength`
    MinLength,
    /// `xs:maxLength`
    MaxLength,
    /// `xs:enumeration`
    Enumeration,
    /// `xs:whiteSpace`
    WhiteSpace,
    /// `xs:pattern`
    Pattern,
}

impl FacetKind {
    /// Every facet kind
    pub const ALL: &'static [FacetKind] = &[
        FacetKind::MinExclusive,
        FacetKind::MinInclusive,
        FacetKind::MaxExclusive,
        FacetKind::MaxInclusive,
        FacetKind::TotalDigits,
        FacetKind::FractionDigits,
        FacetKind::Length,
        FacetKind::MinLength,
        FacetKind::MaxLength,
        FacetKind::Enumeration,
        FacetKind::WhiteSpace,
        FacetKind::Pattern,
    ];

    /// Local name of the facet element
    pub fn tag(&self) -> &'static str {
        match self {
            FacetKind::MinExclusive => "minExclusive",
            FacetKind::MinInclusive => "minInclusive",
            FacetKind::MaxExclusive => "maxExclusive",
            FacetKind::MaxInclusive => "maxInclusive",
            FacetKind::TotalDigits => "totalDigits",
            FacetKind::FractionDigits => "fractionDigits",
            FacetKind::Length => "length",
            FacetKind::MinLength => "minLength",
            FacetKind::MaxLength => "maxLength",
            FacetKind::Enumeration => "enumeration",
            FacetKind::WhiteSpace => "whiteSpace",
            FacetKind::Pattern => "pattern",
        }
    }

    /// Whether the facet accepts a `fixed` attribute
    pub fn is_fixable(&self) -> bool {
        !matches!(self, FacetKind::Enumeration | FacetKind::Pattern)
    }
}

/// A facet's `value`, typed by facet kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FacetValue {
    /// Bounds, `enumeration` and `pattern` keep the literal
    Literal(String),
    /// Length and digit facets
    #[serde(serialize_with = "serialize_decimal")]
    Integer(BigUint),
    /// `whiteSpace`
    WhiteSpace(WhiteSpace),
}

fn serialize_decimal<S: serde::Serializer>(n: &BigUint, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(n)
}

impl FacetValue {
    /// The integer value, for length and digit facets
    pub fn as_integer(&self) -> Option<&BigUint> {
        match self {
            FacetValue::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// The literal value, for bound, enumeration and pattern facets
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            FacetValue::Literal(s) => Some(s),
            _ => None,
        }
    }
}

/// A constraining facet element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdFacet {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// Which facet
    pub kind: FacetKind,
    /// `value`
    pub value: FacetValue,
    /// `fixed`, where allowed
    pub fixed: Option<bool>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdFacet {
    fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children
    }
}
