//! Attribute tables
//!
//! Each context lists its legal unqualified attributes (plus `xml:lang`
//! where allowed) and the value grammar each one is parsed with. `id` is
//! legal everywhere and is not listed; attributes qualified with a
//! namespace other than the XSD namespace are always accepted as foreign
//! attributes.

use std::fmt;

use super::ParsingContext;
use crate::model::FacetKind;
use crate::values::DerivationKind;

use AttributeSpec as A;
use DerivationKind as D;
use ValueKind as V;

/// Value grammar of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `xs:NCName`, trimmed
    NCName,
    /// `xs:QName`, resolved against the in-scope default namespace
    QName,
    /// Whitespace-separated `xs:QName` list
    QNameList,
    /// `xs:anyURI`, whitespace collapsed
    AnyUri,
    /// `xs:token`, whitespace collapsed
    Token,
    /// `xs:string`, kept verbatim
    String,
    /// `xs:boolean`
    Boolean,
    /// `xs:nonNegativeInteger`
    NonNegativeInteger,
    /// `xs:positiveInteger`
    PositiveInteger,
    /// Non-negative integer or `unbounded`
    MaxOccurs,
    /// `minOccurs` limited to 0 or 1
    MinZeroOrOne,
    /// `maxOccurs` limited to 0 or 1
    MaxZeroOrOne,
    /// `maxOccurs` limited to 1
    MaxOne,
    /// `#all` or a list drawn from the given keywords
    Derivation(&'static [DerivationKind]),
    /// `qualified` / `unqualified`
    Form,
    /// `optional` / `prohibited` / `required`
    Use,
    /// `skip` / `lax` / `strict`
    ProcessContents,
    /// Wildcard namespace constraint
    NamespaceConstraint,
    /// `xml:lang` language tag
    Language,
    /// Selector XPath subset
    SelectorXPath,
    /// Field XPath subset
    FieldXPath,
    /// `preserve` / `replace` / `collapse`
    WhiteSpace,
}

/// One legal attribute of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Local name
    pub name: &'static str,
    /// Whether the attribute lives in the XML namespace (`xml:lang`)
    pub xml_namespace: bool,
    /// Value grammar
    pub kind: ValueKind,
    /// Whether the attribute must be present
    pub required: bool,
}

impl AttributeSpec {
    const fn optional(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            xml_namespace: false,
            kind,
            required: false,
        }
    }

    const fn required(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            xml_namespace: false,
            kind,
            required: true,
        }
    }

    const fn xml(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            xml_namespace: true,
            kind,
            required: false,
        }
    }
}

impl fmt::Display for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.xml_namespace {
            write!(f, "xml:{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Find the spec for an attribute name
pub fn find(
    specs: &'static [AttributeSpec],
    local_name: &str,
    xml_namespace: bool,
) -> Option<&'static AttributeSpec> {
    specs
        .iter()
        .find(|s| s.name == local_name && s.xml_namespace == xml_namespace)
}

const BLOCK_DEFAULT: &[DerivationKind] = &[D::Extension, D::Restriction, D::Substitution];
const FINAL_DEFAULT: &[DerivationKind] = &[D::Extension, D::Restriction, D::List, D::Union];
const COMPLEX_DERIVATION: &[DerivationKind] = &[D::Extension, D::Restriction];
const SIMPLE_FINAL: &[DerivationKind] = &[D::List, D::Union, D::Restriction];

const SCHEMA: &[AttributeSpec] = &[
    A::optional("targetNamespace", V::AnyUri),
    A::optional("version", V::Token),
    A::optional("finalDefault", V::Derivation(FINAL_DEFAULT)),
    A::optional("blockDefault", V::Derivation(BLOCK_DEFAULT)),
    A::optional("attributeFormDefault", V::Form),
    A::optional("elementFormDefault", V::Form),
    A::xml("lang", V::Language),
];

const APPINFO: &[AttributeSpec] = &[A::optional("source", V::AnyUri)];

const DOCUMENTATION: &[AttributeSpec] = &[
    A::optional("source", V::AnyUri),
    A::xml("lang", V::Language),
];

const SCHEMA_LOCATION: &[AttributeSpec] = &[A::required("schemaLocation", V::AnyUri)];

const IMPORT: &[AttributeSpec] = &[
    A::optional("namespace", V::AnyUri),
    A::optional("schemaLocation", V::AnyUri),
];

const NOTATION: &[AttributeSpec] = &[
    A::required("name", V::NCName),
    A::optional("public", V::Token),
    A::optional("system", V::AnyUri),
];

const TOP_LEVEL_SIMPLE_TYPE: &[AttributeSpec] = &[
    A::required("name", V::NCName),
    A::optional("final", V::Derivation(SIMPLE_FINAL)),
];

const SIMPLE_RESTRICTION: &[AttributeSpec] = &[A::optional("base", V::QName)];

const LIST: &[AttributeSpec] = &[A::optional("itemType", V::QName)];

const UNION: &[AttributeSpec] = &[A::optional("memberTypes", V::QNameList)];

const FACET_LITERAL: &[AttributeSpec] = &[
    A::required("value", V::String),
    A::optional("fixed", V::Boolean),
];

const FACET_NON_NEGATIVE: &[AttributeSpec] = &[
    A::required("value", V::NonNegativeInteger),
    A::optional("fixed", V::Boolean),
];

const FACET_POSITIVE: &[AttributeSpec] = &[
    A::required("value", V::PositiveInteger),
    A::optional("fixed", V::Boolean),
];

const FACET_WHITE_SPACE: &[AttributeSpec] = &[
    A::required("value", V::WhiteSpace),
    A::optional("fixed", V::Boolean),
];

const FACET_UNFIXED: &[AttributeSpec] = &[A::required("value", V::String)];

const TOP_LEVEL_COMPLEX_TYPE: &[AttributeSpec] = &[
    A::required("name", V::NCName),
    A::optional("mixed", V::Boolean),
    A::optional("abstract", V::Boolean),
    A::optional("final", V::Derivation(COMPLEX_DERIVATION)),
    A::optional("block", V::Derivation(COMPLEX_DERIVATION)),
];

const MIXED: &[AttributeSpec] = &[A::optional("mixed", V::Boolean)];

const BASE: &[AttributeSpec] = &[A::required("base", V::QName)];

const NAME: &[AttributeSpec] = &[A::required("name", V::NCName)];

const REF: &[AttributeSpec] = &[A::required("ref", V::QName)];

const GROUP_REF: &[AttributeSpec] = &[
    A::required("ref", V::QName),
    A::optional("minOccurs", V::NonNegativeInteger),
    A::optional("maxOccurs", V::MaxOccurs),
];

const ALL: &[AttributeSpec] = &[
    A::optional("minOccurs", V::MinZeroOrOne),
    A::optional("maxOccurs", V::MaxOne),
];

const EXPLICIT_GROUP: &[AttributeSpec] = &[
    A::optional("minOccurs", V::NonNegativeInteger),
    A::optional("maxOccurs", V::MaxOccurs),
];

const ANY: &[AttributeSpec] = &[
    A::optional("minOccurs", V::NonNegativeInteger),
    A::optional("maxOccurs", V::MaxOccurs),
    A::optional("namespace", V::NamespaceConstraint),
    A::optional("processContents", V::ProcessContents),
];

const ANY_ATTRIBUTE: &[AttributeSpec] = &[
    A::optional("namespace", V::NamespaceConstraint),
    A::optional("processContents", V::ProcessContents),
];

const TOP_LEVEL_ATTRIBUTE: &[AttributeSpec] = &[
    A::required("name", V::NCName),
    A::optional("type", V::QName),
    A::optional("default", V::String),
    A::optional("fixed", V::String),
];

const LOCAL_ATTRIBUTE: &[AttributeSpec] = &[
    A::optional("name", V::NCName),
    A::optional("ref", V::QName),
    A::optional("type", V::QName),
    A::optional("use", V::Use),
    A::optional("default", V::String),
    A::optional("fixed", V::String),
    A::optional("form", V::Form),
];

const TOP_LEVEL_ELEMENT: &[AttributeSpec] = &[
    A::required("name", V::NCName),
    A::optional("type", V::QName),
    A::optional("substitutionGroup", V::QName),
    A::optional("default", V::String),
    A::optional("fixed", V::String),
    A::optional("nillable", V::Boolean),
    A::optional("abstract", V::Boolean),
    A::optional("final", V::Derivation(COMPLEX_DERIVATION)),
    A::optional("block", V::Derivation(BLOCK_DEFAULT)),
];

const NARROW_ELEMENT: &[AttributeSpec] = &[
    A::optional("name", V::NCName),
    A::optional("ref", V::QName),
    A::optional("type", V::QName),
    A::optional("minOccurs", V::NonNegativeInteger),
    A::optional("maxOccurs", V::MaxOccurs),
    A::optional("default", V::String),
    A::optional("fixed", V::String),
    A::optional("nillable", V::Boolean),
    A::optional("block", V::Derivation(BLOCK_DEFAULT)),
    A::optional("form", V::Form),
];

const NARROW_MAX_MIN_ELEMENT: &[AttributeSpec] = &[
    A::optional("name", V::NCName),
    A::optional("ref", V::QName),
    A::optional("type", V::QName),
    A::optional("minOccurs", V::MinZeroOrOne),
    A::optional("maxOccurs", V::MaxZeroOrOne),
    A::optional("default", V::String),
    A::optional("fixed", V::String),
    A::optional("nillable", V::Boolean),
    A::optional("block", V::Derivation(BLOCK_DEFAULT)),
    A::optional("form", V::Form),
];

const KEYREF: &[AttributeSpec] = &[
    A::required("name", V::NCName),
    A::required("refer", V::QName),
];

const SELECTOR: &[AttributeSpec] = &[A::required("xpath", V::SelectorXPath)];

const FIELD: &[AttributeSpec] = &[A::required("xpath", V::FieldXPath)];

pub(super) fn for_context(context: ParsingContext) -> &'static [AttributeSpec] {
    use ParsingContext::*;
    match context {
        Schema => SCHEMA,
        AppInfo => APPINFO,
        Documentation => DOCUMENTATION,
        Include | Redefine => SCHEMA_LOCATION,
        Import => IMPORT,
        Notation => NOTATION,
        TopLevelSimpleType => TOP_LEVEL_SIMPLE_TYPE,
        SimpleRestriction => SIMPLE_RESTRICTION,
        List => LIST,
        Union => UNION,
        Facet(kind) => match kind {
            FacetKind::Length
            | FacetKind::MinLength
            | FacetKind::MaxLength
            | FacetKind::FractionDigits => FACET_NON_NEGATIVE,
            FacetKind::TotalDigits => FACET_POSITIVE,
            FacetKind::WhiteSpace => FACET_WHITE_SPACE,
            FacetKind::Pattern | FacetKind::Enumeration => FACET_UNFIXED,
            FacetKind::MinExclusive
            | FacetKind::MinInclusive
            | FacetKind::MaxExclusive
            | FacetKind::MaxInclusive => FACET_LITERAL,
        },
        TopLevelComplexType => TOP_LEVEL_COMPLEX_TYPE,
        LocalComplexType | ComplexContent => MIXED,
        SimpleContentRestriction
        | SimpleContentExtension
        | ComplexContentRestriction
        | ComplexContentExtension => BASE,
        GroupDefinition | AttributeGroupDefinition | Unique | Key => NAME,
        GroupRef => GROUP_REF,
        All => ALL,
        Choice | Sequence => EXPLICIT_GROUP,
        Any => ANY,
        AnyAttribute => ANY_ATTRIBUTE,
        TopLevelAttribute => TOP_LEVEL_ATTRIBUTE,
        LocalAttribute => LOCAL_ATTRIBUTE,
        AttributeGroupRef => REF,
        TopLevelElement => TOP_LEVEL_ELEMENT,
        NarrowElement => NARROW_ELEMENT,
        NarrowMaxMinElement => NARROW_MAX_MIN_ELEMENT,
        KeyRef => KEYREF,
        Selector => SELECTOR,
        Field => FIELD,
        Annotation | LocalSimpleType | SimpleContent | SimpleAll | SimpleChoice
        | SimpleSequence => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let specs = ParsingContext::Schema.attributes();
        assert!(find(specs, "lang", true).is_some());
        assert!(find(specs, "lang", false).is_none());
        assert!(find(specs, "targetNamespace", false).is_some());
        assert!(find(specs, "name", false).is_none());
    }

    #[test]
    fn test_required_attributes() {
        let required: Vec<_> = ParsingContext::KeyRef
            .attributes()
            .iter()
            .filter(|s| s.required)
            .map(|s| s.name)
            .collect();
        assert_eq!(required, ["name", "refer"]);
        assert!(ParsingContext::NarrowElement
            .attributes()
            .iter()
            .all(|s| !s.required));
    }

    #[test]
    fn test_facet_tables() {
        let specs = ParsingContext::Facet(FacetKind::Pattern).attributes();
        assert!(find(specs, "fixed", false).is_none());
        let specs = ParsingContext::Facet(FacetKind::TotalDigits).attributes();
        assert_eq!(
            find(specs, "value", false).map(|s| s.kind),
            Some(ValueKind::PositiveInteger)
        );
    }

    #[test]
    fn test_display() {
        let specs = ParsingContext::Documentation.attributes();
        let lang = find(specs, "lang", true).unwrap();
        assert_eq!(lang.to_string(), "xml:lang");
    }
}
