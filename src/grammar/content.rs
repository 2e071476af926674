//! Child-sequence tables
//!
//! A context's content is an ordered list of [`Slot`]s. A slot is either a
//! single [`Particle`] (one or more element kinds with a cardinality) or a
//! mutually exclusive choice among branches, each branch itself a short
//! sequence of particles. The first child that matches a branch commits the
//! slot to that branch.

use super::ParsingContext::{self, *};
use crate::model::FacetKind;

/// Occurrence bounds of a particle; `None` for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// Minimum number of occurrences
    pub min: u32,
    /// Maximum number of occurrences
    pub max: Option<u32>,
}

impl Cardinality {
    /// `?`
    pub const OPTIONAL: Self = Self { min: 0, max: Some(1) };
    /// Exactly once
    pub const REQUIRED: Self = Self { min: 1, max: Some(1) };
    /// `*`
    pub const ZERO_OR_MORE: Self = Self { min: 0, max: None };
    /// `+`
    pub const ONE_OR_MORE: Self = Self { min: 1, max: None };

    /// Check if this particle can be absent
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if occurrence count is under the minimum
    pub fn is_missing(&self, count: u32) -> bool {
        count < self.min
    }

    /// Check if occurrence count is at or over the maximum
    pub fn is_over(&self, count: u32) -> bool {
        match self.max {
            Some(max) => count >= max,
            None => false,
        }
    }
}

/// One or more element kinds sharing a cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    /// Contexts the matching children are parsed in
    pub contexts: &'static [ParsingContext],
    /// How often the particle may occur
    pub occurs: Cardinality,
}

impl Particle {
    const fn new(contexts: &'static [ParsingContext], occurs: Cardinality) -> Self {
        Self { contexts, occurs }
    }

    /// The context for a child with this XSD local name
    pub fn find(&self, local_name: &str) -> Option<ParsingContext> {
        self.contexts.iter().find(|c| c.tag() == local_name).copied()
    }

    /// Conventional `xs:` tags of the element kinds
    pub fn tags(&self) -> impl Iterator<Item = String> + '_ {
        self.contexts.iter().map(|c| format!("xs:{}", c.tag()))
    }
}

/// A position in a child sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A single particle
    Particle(Particle),
    /// Exactly one of several branches
    Exclusive(&'static [&'static [Particle]]),
}

/// Legal content of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Element-only content matched against slots
    Elements(&'static [Slot]),
    /// Any well-formed content, kept verbatim
    Any,
}

use Cardinality as C;
use Particle as P;

const FACETS: &[ParsingContext] = &[
    Facet(FacetKind::MinExclusive),
    Facet(FacetKind::MinInclusive),
    Facet(FacetKind::MaxExclusive),
    Facet(FacetKind::MaxInclusive),
    Facet(FacetKind::TotalDigits),
    Facet(FacetKind::FractionDigits),
    Facet(FacetKind::Length),
    Facet(FacetKind::MinLength),
    Facet(FacetKind::MaxLength),
    Facet(FacetKind::Enumeration),
    Facet(FacetKind::WhiteSpace),
    Facet(FacetKind::Pattern),
];

const ANNOTATION: Slot = Slot::Particle(P::new(&[Annotation], C::OPTIONAL));
const ATTRIBUTES: Slot =
    Slot::Particle(P::new(&[LocalAttribute, AttributeGroupRef], C::ZERO_OR_MORE));
const ANY_ATTRIBUTE: Slot = Slot::Particle(P::new(&[AnyAttribute], C::OPTIONAL));
const MODEL_GROUP: Particle = P::new(&[GroupRef, All, Choice, Sequence], C::OPTIONAL);

const SCHEMA: &[Slot] = &[
    Slot::Particle(P::new(
        &[Include, Import, Redefine, Annotation],
        C::ZERO_OR_MORE,
    )),
    Slot::Particle(P::new(
        &[
            TopLevelSimpleType,
            TopLevelComplexType,
            GroupDefinition,
            AttributeGroupDefinition,
            TopLevelElement,
            TopLevelAttribute,
            Notation,
            Annotation,
        ],
        C::ZERO_OR_MORE,
    )),
];

const ANNOTATION_CONTENT: &[Slot] = &[Slot::Particle(P::new(
    &[AppInfo, Documentation],
    C::ZERO_OR_MORE,
))];

const ANNOTATED: &[Slot] = &[ANNOTATION];

const REDEFINE: &[Slot] = &[Slot::Particle(P::new(
    &[
        Annotation,
        TopLevelSimpleType,
        TopLevelComplexType,
        GroupDefinition,
        AttributeGroupDefinition,
    ],
    C::ZERO_OR_MORE,
))];

const SIMPLE_TYPE: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[SimpleRestriction, List, Union], C::REQUIRED)),
];

const SIMPLE_RESTRICTION: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[LocalSimpleType], C::OPTIONAL)),
    Slot::Particle(P::new(FACETS, C::ZERO_OR_MORE)),
];

const LIST: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[LocalSimpleType], C::OPTIONAL)),
];

const UNION: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[LocalSimpleType], C::ZERO_OR_MORE)),
];

const COMPLEX_TYPE: &[Slot] = &[
    ANNOTATION,
    Slot::Exclusive(&[
        &[P::new(&[SimpleContent], C::REQUIRED)],
        &[P::new(&[ComplexContent], C::REQUIRED)],
        &[
            MODEL_GROUP,
            P::new(&[LocalAttribute, AttributeGroupRef], C::ZERO_OR_MORE),
            P::new(&[AnyAttribute], C::OPTIONAL),
        ],
    ]),
];

const SIMPLE_CONTENT: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(
        &[SimpleContentRestriction, SimpleContentExtension],
        C::REQUIRED,
    )),
];

const SIMPLE_CONTENT_RESTRICTION: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[LocalSimpleType], C::OPTIONAL)),
    Slot::Particle(P::new(FACETS, C::ZERO_OR_MORE)),
    ATTRIBUTES,
    ANY_ATTRIBUTE,
];

const ATTRIBUTE_CONTENT: &[Slot] = &[ANNOTATION, ATTRIBUTES, ANY_ATTRIBUTE];

const COMPLEX_CONTENT: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(
        &[ComplexContentRestriction, ComplexContentExtension],
        C::REQUIRED,
    )),
];

const COMPLEX_DERIVATION: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(MODEL_GROUP),
    ATTRIBUTES,
    ANY_ATTRIBUTE,
];

const GROUP_DEFINITION: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(
        &[SimpleAll, SimpleChoice, SimpleSequence],
        C::REQUIRED,
    )),
];

const ALL: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[NarrowMaxMinElement], C::ZERO_OR_MORE)),
];

const EXPLICIT_GROUP: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(
        &[NarrowElement, GroupRef, Choice, Sequence, Any],
        C::ZERO_OR_MORE,
    )),
];

const ATTRIBUTE: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[LocalSimpleType], C::OPTIONAL)),
];

const ELEMENT: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[LocalSimpleType, LocalComplexType], C::OPTIONAL)),
    Slot::Particle(P::new(&[Unique, Key, KeyRef], C::ZERO_OR_MORE)),
];

const IDENTITY_CONSTRAINT: &[Slot] = &[
    ANNOTATION,
    Slot::Particle(P::new(&[Selector], C::REQUIRED)),
    Slot::Particle(P::new(&[Field], C::ONE_OR_MORE)),
];

pub(super) fn for_context(context: ParsingContext) -> Content {
    let slots = match context {
        AppInfo | Documentation => return Content::Any,
        Schema => SCHEMA,
        Annotation => ANNOTATION_CONTENT,
        Include | Import | Notation | Facet(_) | GroupRef | Any | AnyAttribute
        | AttributeGroupRef | Selector | Field => ANNOTATED,
        Redefine => REDEFINE,
        TopLevelSimpleType | LocalSimpleType => SIMPLE_TYPE,
        SimpleRestriction => SIMPLE_RESTRICTION,
        List => LIST,
        Union => UNION,
        TopLevelComplexType | LocalComplexType => COMPLEX_TYPE,
        SimpleContent => SIMPLE_CONTENT,
        SimpleContentRestriction => SIMPLE_CONTENT_RESTRICTION,
        SimpleContentExtension | AttributeGroupDefinition => ATTRIBUTE_CONTENT,
        ComplexContent => COMPLEX_CONTENT,
        ComplexContentRestriction | ComplexContentExtension => COMPLEX_DERIVATION,
        GroupDefinition => GROUP_DEFINITION,
        All | SimpleAll => ALL,
        Choice | Sequence | SimpleChoice | SimpleSequence => EXPLICIT_GROUP,
        TopLevelAttribute | LocalAttribute => ATTRIBUTE,
        TopLevelElement | NarrowElement | NarrowMaxMinElement => ELEMENT,
        Unique | Key | KeyRef => IDENTITY_CONSTRAINT,
    };
    Content::Elements(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality() {
        assert!(C::OPTIONAL.is_emptiable());
        assert!(C::OPTIONAL.is_over(1));
        assert!(!C::ZERO_OR_MORE.is_over(1000));
        assert!(C::ONE_OR_MORE.is_missing(0));
        assert!(!C::ONE_OR_MORE.is_missing(1));
    }

    #[test]
    fn test_particle_find() {
        let particle = P::new(&[LocalSimpleType, LocalComplexType], C::OPTIONAL);
        assert_eq!(particle.find("complexType"), Some(LocalComplexType));
        assert_eq!(particle.find("element"), None);
        assert_eq!(
            particle.tags().collect::<Vec<_>>(),
            ["xs:simpleType", "xs:complexType"]
        );
    }

    #[test]
    fn test_every_facet_is_listed_once() {
        for kind in FacetKind::ALL {
            let count = FACETS.iter().filter(|c| **c == Facet(*kind)).count();
            assert_eq!(count, 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_any_content() {
        assert_eq!(for_context(Documentation), Content::Any);
        assert!(matches!(for_context(Schema), Content::Elements(s) if s.len() == 2));
    }
}
