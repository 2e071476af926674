//! The XSD element grammar
//!
//! Every element of a schema document is parsed in a [`ParsingContext`],
//! one per grammar production. A context determines the tag it accepts, the
//! legal attributes with their value grammars (see [`attributes`]) and the
//! legal child sequence (see [`content`]). The tables are static and
//! read-only; [`ContentMatcher`] walks a child sequence against them.

pub mod attributes;
pub mod content;
mod matcher;

pub use attributes::{AttributeSpec, ValueKind};
pub use content::{Cardinality, Content, Particle, Slot};
pub use matcher::ContentMatcher;

use std::fmt;

use crate::model::FacetKind;

/// A grammar production of the XSD document grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsingContext {
    /// `xs:schema`
    Schema,
    /// `xs:annotation`
    Annotation,
    /// `xs:appinfo`
    AppInfo,
    /// `xs:documentation`
    Documentation,
    /// `xs:include`
    Include,
    /// `xs:import`
    Import,
    /// `xs:redefine`
    Redefine,
    /// `xs:notation`
    Notation,
    /// Named `xs:simpleType` at schema level
    TopLevelSimpleType,
    /// Anonymous `xs:simpleType`
    LocalSimpleType,
    /// `xs:restriction` inside `xs:simpleType`
    SimpleRestriction,
    /// `xs:list`
    List,
    /// `xs:union`
    Union,
    /// A constraining facet
    Facet(FacetKind),
    /// Named `xs:complexType` at schema level
    TopLevelComplexType,
    /// Anonymous `xs:complexType`
    LocalComplexType,
    /// `xs:simpleContent`
    SimpleContent,
    /// `xs:restriction` inside `xs:simpleContent`
    SimpleContentRestriction,
    /// `xs:extension` inside `xs:simpleContent`
    SimpleContentExtension,
    /// `xs:complexContent`
    ComplexContent,
    /// `xs:restriction` inside `xs:complexContent`
    ComplexContentRestriction,
    /// `xs:extension` inside `xs:complexContent`
    ComplexContentExtension,
    /// Named `xs:group` at schema level
    GroupDefinition,
    /// `xs:group ref=".."`
    GroupRef,
    /// `xs:all` as a particle
    All,
    /// `xs:choice` as a particle
    Choice,
    /// `xs:sequence` as a particle
    Sequence,
    /// `xs:all` directly inside a group definition
    SimpleAll,
    /// `xs:choice` directly inside a group definition
    SimpleChoice,
    /// `xs:sequence` directly inside a group definition
    SimpleSequence,
    /// `xs:any`
    Any,
    /// `xs:anyAttribute`
    AnyAttribute,
    /// `xs:attribute` at schema level
    TopLevelAttribute,
    /// `xs:attribute` inside a type or attribute group
    LocalAttribute,
    /// Named `xs:attributeGroup` at schema level
    AttributeGroupDefinition,
    /// `xs:attributeGroup ref=".."`
    AttributeGroupRef,
    /// `xs:element` at schema level
    TopLevelElement,
    /// `xs:element` inside `xs:choice` / `xs:sequence`
    NarrowElement,
    /// `xs:element` inside `xs:all`
    NarrowMaxMinElement,
    /// `xs:unique`
    Unique,
    /// `xs:key`
    Key,
    /// `xs:keyref`
    KeyRef,
    /// `xs:selector`
    Selector,
    /// `xs:field`
    Field,
}

impl ParsingContext {
    /// Production name, used in diagnostics
    pub fn name(&self) -> &'static str {
        use ParsingContext::*;
        match self {
            Schema => "schema",
            Annotation => "annotation",
            AppInfo => "appinfo",
            Documentation => "documentation",
            Include => "include",
            Import => "import",
            Redefine => "redefine",
            Notation => "notation",
            TopLevelSimpleType => "topLevelSimpleType",
            LocalSimpleType => "localSimpleType",
            SimpleRestriction => "simpleRestriction",
            List => "list",
            Union => "union",
            Facet(kind) => kind.tag(),
            TopLevelComplexType => "topLevelComplexType",
            LocalComplexType => "localComplexType",
            SimpleContent => "simpleContent",
            SimpleContentRestriction => "simpleContentRestriction",
            SimpleContentExtension => "simpleContentExtension",
            ComplexContent => "complexContent",
            ComplexContentRestriction => "complexContentRestriction",
            ComplexContentExtension => "complexContentExtension",
            GroupDefinition => "groupDefinition",
            GroupRef => "groupRef",
            All => "all",
            Choice => "choice",
            Sequence => "sequence",
            SimpleAll => "simpleAll",
            SimpleChoice => "simpleChoice",
            SimpleSequence => "simpleSequence",
            Any => "any",
            AnyAttribute => "anyAttribute",
            TopLevelAttribute => "topLevelAttribute",
            LocalAttribute => "localAttribute",
            AttributeGroupDefinition => "attributeGroupDefinition",
            AttributeGroupRef => "attributeGroupRef",
            TopLevelElement => "topLevelElement",
            NarrowElement => "narrowElement",
            NarrowMaxMinElement => "narrowMaxMinElement",
            Unique => "unique",
            Key => "key",
            KeyRef => "keyref",
            Selector => "selector",
            Field => "field",
        }
    }

    /// Local name of the XSD element parsed in this context
    pub fn tag(&self) -> &'static str {
        use ParsingContext::*;
        match self {
            TopLevelSimpleType | LocalSimpleType => "simpleType",
            SimpleRestriction | SimpleContentRestriction | ComplexContentRestriction => {
                "restriction"
            }
            SimpleContentExtension | ComplexContentExtension => "extension",
            TopLevelComplexType | LocalComplexType => "complexType",
            GroupDefinition | GroupRef => "group",
            All | SimpleAll => "all",
            Choice | SimpleChoice => "choice",
            Sequence | SimpleSequence => "sequence",
            TopLevelAttribute | LocalAttribute => "attribute",
            AttributeGroupDefinition | AttributeGroupRef => "attributeGroup",
            TopLevelElement | NarrowElement | NarrowMaxMinElement => "element",
            other => other.name(),
        }
    }

    /// Legal attributes besides `id` and foreign attributes
    pub fn attributes(&self) -> &'static [AttributeSpec] {
        attributes::for_context(*self)
    }

    /// Legal child content
    pub fn content(&self) -> Content {
        content::for_context(*self)
    }
}

impl fmt::Display for ParsingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_tags() {
        assert_eq!(ParsingContext::NarrowElement.to_string(), "narrowElement");
        assert_eq!(ParsingContext::NarrowElement.tag(), "element");
        assert_eq!(ParsingContext::KeyRef.tag(), "keyref");
        assert_eq!(ParsingContext::AppInfo.tag(), "appinfo");
        assert_eq!(ParsingContext::SimpleContentRestriction.tag(), "restriction");
        assert_eq!(ParsingContext::Facet(FacetKind::MinInclusive).tag(), "minInclusive");
        assert_eq!(ParsingContext::Facet(FacetKind::WhiteSpace).name(), "whiteSpace");
    }
}
