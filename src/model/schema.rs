//! The schema root and its composition elements

use serde::Serialize;

use super::{
    push_annotation, Component, NodeInfo, XsdAnnotation, XsdAttribute, XsdAttributeGroup,
    XsdComplexType, XsdComponent, XsdElement, XsdGroup, XsdSimpleType,
};
use crate::values::{DerivationSet, Form, Language};

/// `xs:schema`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSchema {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `targetNamespace`
    pub target_namespace: Option<String>,
    /// `version`
    pub version: Option<String>,
    /// `finalDefault`
    pub final_default: Option<DerivationSet>,
    /// `blockDefault`
    pub block_default: Option<DerivationSet>,
    /// `attributeFormDefault`
    pub attribute_form_default: Option<Form>,
    /// `elementFormDefault`
    pub element_form_default: Option<Form>,
    /// `xml:lang`
    pub lang: Option<Language>,
    /// Leading include / import / redefine / annotation children
    pub composition: Vec<Composition>,
    /// Definitions, declarations and annotations after the composition part
    pub content: Vec<SchemaTop>,
}

/// A child of the leading composition part of a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Composition {
    /// `xs:include`
    Include(XsdInclude),
    /// `xs:import`
    Import(XsdImport),
    /// `xs:redefine`
    Redefine(XsdRedefine),
    /// `xs:annotation`
    Annotation(XsdAnnotation),
}

/// A top-level definition or declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaTop {
    /// Named `xs:simpleType`
    SimpleType(XsdSimpleType),
    /// Named `xs:complexType`
    ComplexType(XsdComplexType),
    /// Named `xs:group`
    Group(XsdGroup),
    /// Named `xs:attributeGroup`
    AttributeGroup(XsdAttributeGroup),
    /// Global `xs:element`
    Element(XsdElement),
    /// Global `xs:attribute`
    Attribute(XsdAttribute),
    /// `xs:notation`
    Notation(XsdNotation),
    /// `xs:annotation`
    Annotation(XsdAnnotation),
}

impl SchemaTop {
    /// The `name` of the definition, if it has one
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaTop::SimpleType(t) => t.name.as_deref(),
            SchemaTop::ComplexType(t) => t.name.as_deref(),
            SchemaTop::Group(g) => Some(&g.name),
            SchemaTop::AttributeGroup(g) => Some(&g.name),
            SchemaTop::Element(e) => e.name.as_deref(),
            SchemaTop::Attribute(a) => a.name.as_deref(),
            SchemaTop::Notation(n) => Some(&n.name),
            SchemaTop::Annotation(_) => None,
        }
    }

    fn as_component(&self) -> Component<'_> {
        match self {
            SchemaTop::SimpleType(t) => t.into(),
            SchemaTop::ComplexType(t) => t.into(),
            SchemaTop::Group(g) => g.into(),
            SchemaTop::AttributeGroup(g) => g.into(),
            SchemaTop::Element(e) => e.into(),
            SchemaTop::Attribute(a) => a.into(),
            SchemaTop::Notation(n) => n.into(),
            SchemaTop::Annotation(a) => a.into(),
        }
    }
}

impl XsdSchema {
    /// `xs:include` children
    pub fn includes(&self) -> Vec<&XsdInclude> {
        self.composition
            .iter()
            .filter_map(|c| match c {
                Composition::Include(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    /// `xs:import` children
    pub fn imports(&self) -> Vec<&XsdImport> {
        self.composition
            .iter()
            .filter_map(|c| match c {
                Composition::Import(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    /// `xs:redefine` children
    pub fn redefines(&self) -> Vec<&XsdRedefine> {
        self.composition
            .iter()
            .filter_map(|c| match c {
                Composition::Redefine(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Every `xs:annotation` child, from both parts, in document order
    pub fn annotations(&self) -> Vec<&XsdAnnotation> {
        let leading = self.composition.iter().filter_map(|c| match c {
            Composition::Annotation(a) => Some(a),
            _ => None,
        });
        let trailing = self.content.iter().filter_map(|c| match c {
            SchemaTop::Annotation(a) => Some(a),
            _ => None,
        });
        leading.chain(trailing).collect()
    }

    /// Named simple types
    pub fn simple_types(&self) -> Vec<&XsdSimpleType> {
        self.content
            .iter()
            .filter_map(|c| match c {
                SchemaTop::SimpleType(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Named complex types
    pub fn complex_types(&self) -> Vec<&XsdComplexType> {
        self.content
            .iter()
            .filter_map(|c| match c {
                SchemaTop::ComplexType(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Named model groups
    pub fn groups(&self) -> Vec<&XsdGroup> {
        self.content
            .iter()
            .filter_map(|c| match c {
                SchemaTop::Group(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Named attribute groups
    pub fn attribute_groups(&self) -> Vec<&XsdAttributeGroup> {
        self.content
            .iter()
            .filter_map(|c| match c {
                SchemaTop::AttributeGroup(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Global element declarations
    pub fn elements(&self) -> Vec<&XsdElement> {
        self.content
            .iter()
            .filter_map(|c| match c {
                SchemaTop::Element(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// Global attribute declarations
    pub fn attributes(&self) -> Vec<&XsdAttribute> {
        self.content
            .iter()
            .filter_map(|c| match c {
                SchemaTop::Attribute(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// Notation declarations
    pub fn notations(&self) -> Vec<&XsdNotation> {
        self.content
            .iter()
            .filter_map(|c| match c {
                SchemaTop::Notation(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    /// Look up a global element by name
    pub fn element(&self, name: &str) -> Option<&XsdElement> {
        self.elements()
            .into_iter()
            .find(|e| e.name.as_deref() == Some(name))
    }

    /// Look up a global attribute by name
    pub fn attribute(&self, name: &str) -> Option<&XsdAttribute> {
        self.attributes()
            .into_iter()
            .find(|a| a.name.as_deref() == Some(name))
    }

    /// Look up a named simple type
    pub fn simple_type(&self, name: &str) -> Option<&XsdSimpleType> {
        self.simple_types()
            .into_iter()
            .find(|t| t.name.as_deref() == Some(name))
    }

    /// Look up a named complex type
    pub fn complex_type(&self, name: &str) -> Option<&XsdComplexType> {
        self.complex_types()
            .into_iter()
            .find(|t| t.name.as_deref() == Some(name))
    }

    /// Look up a named model group
    pub fn group(&self, name: &str) -> Option<&XsdGroup> {
        self.groups().into_iter().find(|g| g.name == name)
    }

    /// Look up a named attribute group
    pub fn attribute_group(&self, name: &str) -> Option<&XsdAttributeGroup> {
        self.attribute_groups().into_iter().find(|g| g.name == name)
    }
}

impl XsdComponent for XsdSchema {
    fn tag(&self) -> &'static str {
        "schema"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let leading = self.composition.iter().map(|c| match c {
            Composition::Include(i) => Component::from(i),
            Composition::Import(i) => i.into(),
            Composition::Redefine(r) => r.into(),
            Composition::Annotation(a) => a.into(),
        });
        leading
            .chain(self.content.iter().map(SchemaTop::as_component))
            .collect()
    }
}

/// `xs:include`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdInclude {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `schemaLocation`
    pub schema_location: String,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdInclude {
    fn tag(&self) -> &'static str {
        "include"
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

/// `xs:import`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdImport {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `namespace`
    pub namespace: Option<String>,
    /// `schemaLocation`
    pub schema_location: Option<String>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdImport {
    fn tag(&self) -> &'static str {
        "import"
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

/// `xs:redefine`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdRedefine {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `schemaLocation`
    pub schema_location: String,
    /// Redefined components and annotations in document order
    pub content: Vec<RedefineItem>,
}

/// A child of `xs:redefine`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RedefineItem {
    /// `xs:annotation`
    Annotation(XsdAnnotation),
    /// Named `xs:simpleType`
    SimpleType(XsdSimpleType),
    /// Named `xs:complexType`
    ComplexType(XsdComplexType),
    /// Named `xs:group`
    Group(XsdGroup),
    /// Named `xs:attributeGroup`
    AttributeGroup(XsdAttributeGroup),
}

impl XsdComponent for XsdRedefine {
    fn tag(&self) -> &'static str {
        "redefine"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        self.content
            .iter()
            .map(|item| match item {
                RedefineItem::Annotation(a) => Component::from(a),
                RedefineItem::SimpleType(t) => t.into(),
                RedefineItem::ComplexType(t) => t.into(),
                RedefineItem::Group(g) => g.into(),
                RedefineItem::AttributeGroup(g) => g.into(),
            })
            .collect()
    }
}

/// `xs:notation`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdNotation {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `name`
    pub name: String,
    /// `public`
    pub public: Option<String>,
    /// `system`
    pub system: Option<String>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdNotation {
    fn tag(&self) -> &'static str {
        "notation"
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
