//! Typed schema object model
//!
//! One node type per XSD element. Every node keeps the namespace
//! declarations literally present on its element, its `id`, any foreign
//! attributes, its typed attributes (absent attributes are `None`) and its
//! children. Children are stored once, in document order; kind-specific
//! accessors such as [`XsdSchema::elements`] are filtered views of that
//! storage. Grammar alternatives that exclude each other are enums, so only
//! one branch can ever be populated.

mod annotations;
mod attributes;
mod complex_types;
mod elements;
mod groups;
mod identities;
mod schema;
mod simple_types;

pub use annotations::{AnnotationItem, XsdAnnotation, XsdAppInfo, XsdDocumentation};
pub use attributes::{XsdAttribute, XsdAttributeGroup, XsdAttributeGroupRef};
pub use complex_types::{
    AttributeContent, AttributeItem, ComplexTypeContent, ContentModel, DerivationMethod,
    SimpleContentDerivation, XsdComplexContent, XsdComplexDerivation, XsdComplexType,
    XsdSimpleContent, XsdSimpleContentExtension, XsdSimpleContentRestriction,
};
pub use elements::{LocalType, XsdElement};
pub use groups::{
    Compositor, GroupModel, GroupParticle, ModelGroup, XsdAll, XsdAny, XsdAnyAttribute,
    XsdExplicitGroup, XsdGroup, XsdGroupRef,
};
pub use identities::{IdentityConstraintKind, XsdField, XsdIdentity, XsdSelector};
pub use schema::{
    Composition, RedefineItem, SchemaTop, XsdImport, XsdInclude, XsdNotation, XsdRedefine,
    XsdSchema,
};
pub use simple_types::{
    FacetKind, FacetValue, SimpleDerivation, SimpleTypeRef, XsdFacet, XsdList,
    XsdSimpleRestriction, XsdSimpleType, XsdUnion,
};

use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;

use crate::namespaces::{NamespaceDeclarations, QName};
use crate::values::MaxOccurs;

/// Data every node carries regardless of its kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// The `id` attribute
    pub id: Option<String>,
    /// `xmlns` / `xmlns:*` declarations written on this element
    pub namespace_declarations: NamespaceDeclarations,
    /// Attributes qualified with a non-XSD namespace, in document order
    pub foreign_attributes: Vec<ForeignAttribute>,
}

/// An attribute from another namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignAttribute {
    /// Resolved attribute name
    pub name: QName,
    /// Literal value
    pub value: String,
}

/// `minOccurs` / `maxOccurs` as written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurs {
    /// `minOccurs`, if specified
    #[serde(serialize_with = "serialize_optional_decimal")]
    pub min_occurs: Option<BigUint>,
    /// `maxOccurs`, if specified
    pub max_occurs: Option<MaxOccurs>,
}

impl Occurs {
    /// Effective minimum (default 1)
    pub fn min(&self) -> BigUint {
        self.min_occurs.clone().unwrap_or_else(BigUint::one)
    }

    /// Effective maximum (default 1)
    pub fn max(&self) -> MaxOccurs {
        self.max_occurs.clone().unwrap_or_else(MaxOccurs::one)
    }

    /// Whether the effective maximum is `unbounded`
    pub fn is_unlimited(&self) -> bool {
        self.max().is_unlimited()
    }
}

fn serialize_optional_decimal<S: serde::Serializer>(
    n: &Option<BigUint>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match n {
        Some(n) => s.collect_str(n),
        None => s.serialize_none(),
    }
}

/// `default` or `fixed`; the two never appear together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueConstraint {
    /// `default="..."`
    Default(String),
    /// `fixed="..."`
    Fixed(String),
}

impl ValueConstraint {
    /// The literal value
    pub fn value(&self) -> &str {
        match self {
            ValueConstraint::Default(v) | ValueConstraint::Fixed(v) => v,
        }
    }

    /// Whether this is `fixed`
    pub fn is_fixed(&self) -> bool {
        matches!(self, ValueConstraint::Fixed(_))
    }
}

/// Whether a declaration is global (a schema child) or local
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Top-level declaration
    Global,
    /// Nested declaration or reference
    Local,
}

/// Common view of every model node
pub trait XsdComponent {
    /// Local name of the XSD element this node was parsed from
    fn tag(&self) -> &'static str;

    /// Data shared by all nodes
    fn info(&self) -> &NodeInfo;

    /// Child nodes in document order
    fn children(&self) -> Vec<Component<'_>>;

    /// The `id` attribute
    fn id(&self) -> Option<&str> {
        self.info().id.as_deref()
    }

    /// Namespace declarations written on this element
    fn namespace_declarations(&self) -> &NamespaceDeclarations {
        &self.info().namespace_declarations
    }

    /// Attributes from other namespaces
    fn foreign_attributes(&self) -> &[ForeignAttribute] {
        &self.info().foreign_attributes
    }
}

macro_rules! components {
    ($($(#[$doc:meta])* $variant:ident($ty:ty),)*) => {
        /// A borrowed model node of any kind
        #[derive(Debug, Clone, Copy)]
        pub enum Component<'a> {
            $($(#[$doc])* $variant(&'a $ty),)*
        }

        impl<'a> Component<'a> {
            fn as_dyn(&self) -> &'a dyn XsdComponent {
                match *self {
                    $(Component::$variant(node) => node,)*
                }
            }
        }

        $(
            impl<'a> From<&'a $ty> for Component<'a> {
                fn from(node: &'a $ty) -> Self {
                    Component::$variant(node)
                }
            }
        )*
    };
}

components! {
    /// `xs:schema`
    Schema(XsdSchema),
    /// `xs:annotation`
    Annotation(XsdAnnotation),
    /// `xs:appinfo`
    AppInfo(XsdAppInfo),
    /// `xs:documentation`
    Documentation(XsdDocumentation),
    /// `xs:include`
    Include(XsdInclude),
    /// `xs:import`
    Import(XsdImport),
    /// `xs:redefine`
    Redefine(XsdRedefine),
    /// `xs:notation`
    Notation(XsdNotation),
    /// `xs:simpleType`
    SimpleType(XsdSimpleType),
    /// `xs:restriction` of a simple type
    SimpleRestriction(XsdSimpleRestriction),
    /// `xs:list`
    List(XsdList),
    /// `xs:union`
    Union(XsdUnion),
    /// A constraining facet
    Facet(XsdFacet),
    /// `xs:complexType`
    ComplexType(XsdComplexType),
    /// `xs:simpleContent`
    SimpleContent(XsdSimpleContent),
    /// `xs:restriction` inside `xs:simpleContent`
    SimpleContentRestriction(XsdSimpleContentRestriction),
    /// `xs:extension` inside `xs:simpleContent`
    SimpleContentExtension(XsdSimpleContentExtension),
    /// `xs:complexContent`
    ComplexContent(XsdComplexContent),
    /// `xs:restriction` / `xs:extension` inside `xs:complexContent`
    ComplexDerivation(XsdComplexDerivation),
    /// Named `xs:group`
    Group(XsdGroup),
    /// `xs:group ref=".."`
    GroupRef(XsdGroupRef),
    /// `xs:all`
    All(XsdAll),
    /// `xs:choice` / `xs:sequence`
    ExplicitGroup(XsdExplicitGroup),
    /// `xs:any`
    Any(XsdAny),
    /// `xs:anyAttribute`
    AnyAttribute(XsdAnyAttribute),
    /// `xs:attribute`
    Attribute(XsdAttribute),
    /// Named `xs:attributeGroup`
    AttributeGroup(XsdAttributeGroup),
    /// `xs:attributeGroup ref=".."`
    AttributeGroupRef(XsdAttributeGroupRef),
    /// `xs:element`
    Element(XsdElement),
    /// `xs:unique` / `xs:key` / `xs:keyref`
    Identity(XsdIdentity),
    /// `xs:selector`
    Selector(XsdSelector),
    /// `xs:field`
    Field(XsdField),
}

impl XsdComponent for Component<'_> {
    fn tag(&self) -> &'static str {
        self.as_dyn().tag()
    }

    fn info(&self) -> &NodeInfo {
        self.as_dyn().info()
    }

    fn children(&self) -> Vec<Component<'_>> {
        self.as_dyn().children()
    }
}

impl<'a> Component<'a> {
    /// This node and all its descendants, depth first in document order
    pub fn descendants(self) -> Vec<Component<'a>> {
        let mut out = vec![self];
        for child in self.as_dyn().children() {
            out.extend(child.descendants());
        }
        out
    }
}

/// Push an optional annotation into a children list
pub(crate) fn push_annotation<'a>(
    children: &mut Vec<Component<'a>>,
    annotation: &'a Option<XsdAnnotation>,
) {
    if let Some(annotation) = annotation {
        children.push(annotation.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurs_defaults() {
        let occurs = Occurs::default();
        assert_eq!(occurs.min(), BigUint::one());
        assert_eq!(occurs.max(), MaxOccurs::one());
        assert!(!occurs.is_unlimited());

        let occurs = Occurs {
            min_occurs: Some(BigUint::from(0u32)),
            max_occurs: Some(MaxOccurs::Unbounded),
        };
        assert!(occurs.is_unlimited());
    }

    #[test]
    fn test_value_constraint() {
        let fixed = ValueConstraint::Fixed(" a ".to_string());
        assert!(fixed.is_fixed());
        assert_eq!(fixed.value(), " a ");
        assert!(!ValueConstraint::Default(String::new()).is_fixed());
    }
}
