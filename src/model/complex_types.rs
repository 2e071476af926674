//! Complex type definitions and their content

use serde::Serialize;

use super::{
    push_annotation, Component, ModelGroup, NodeInfo, XsdAnnotation, XsdAnyAttribute,
    XsdAttribute, XsdAttributeGroupRef, XsdComponent, XsdFacet, XsdSimpleType,
};
use crate::namespaces::QName;
use crate::values::DerivationSet;

/// `xs:complexType`, named (global) or anonymous (local)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdComplexType {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `name`; present exactly on global definitions
    pub name: Option<String>,
    /// `mixed`
    pub mixed: Option<bool>,
    /// `abstract`
    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
    /// `final`
    #[serde(rename = "final")]
    pub final_set: Option<DerivationSet>,
    /// `block`
    #[serde(rename = "block")]
    pub block_set: Option<DerivationSet>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Exactly one content alternative
    pub content: ComplexTypeContent,
}

/// The mutually exclusive content of a complex type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplexTypeContent {
    /// `xs:simpleContent`
    SimpleContent(XsdSimpleContent),
    /// `xs:complexContent`
    ComplexContent(XsdComplexContent),
    /// Shorthand: an optional model group followed by attributes
    Model(ContentModel),
}

impl XsdComplexType {
    /// `mixed`, defaulting to false
    pub fn is_mixed(&self) -> bool {
        self.mixed.unwrap_or(false)
    }

    /// The `xs:simpleContent` child, if that is the content
    pub fn simple_content(&self) -> Option<&XsdSimpleContent> {
        match &self.content {
            ComplexTypeContent::SimpleContent(c) => Some(c),
            _ => None,
        }
    }

    /// The `xs:complexContent` child, if that is the content
    pub fn complex_content(&self) -> Option<&XsdComplexContent> {
        match &self.content {
            ComplexTypeContent::ComplexContent(c) => Some(c),
            _ => None,
        }
    }

    /// The shorthand content model, if that is the content
    pub fn content_model(&self) -> Option<&ContentModel> {
        match &self.content {
            ComplexTypeContent::Model(m) => Some(m),
            _ => None,
        }
    }
}

impl XsdComponent for XsdComplexType {
    fn tag(&self) -> &'static str {
        "complexType"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        match &self.content {
            ComplexTypeContent::SimpleContent(c) => children.push(c.into()),
            ComplexTypeContent::ComplexContent(c) => children.push(c.into()),
            ComplexTypeContent::Model(m) => m.push_children(&mut children),
        }
        children
    }
}

/// An optional model group followed by attribute uses
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModel {
    /// `group`, `all`, `choice` or `sequence`
    pub group: Option<ModelGroup>,
    /// Attribute uses and wildcard
    pub attributes: AttributeContent,
}

impl ContentModel {
    /// Whether neither a model group nor attributes are present
    pub fn is_empty(&self) -> bool {
        self.group.is_none() && self.attributes.is_empty()
    }

    fn push_children<'a>(&'a self, children: &mut Vec<Component<'a>>) {
        if let Some(group) = &self.group {
            children.push(group.as_component());
        }
        self.attributes.push_children(children);
    }
}

/// `(attribute | attributeGroup)*, anyAttribute?`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeContent {
    /// Attributes and attribute group references in document order
    pub items: Vec<AttributeItem>,
    /// Trailing `xs:anyAttribute`
    pub any_attribute: Option<XsdAnyAttribute>,
}

/// An attribute use or an attribute group reference
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeItem {
    /// `xs:attribute`
    Attribute(XsdAttribute),
    /// `xs:attributeGroup ref=".."`
    AttributeGroup(XsdAttributeGroupRef),
}

impl AttributeContent {
    /// Attribute declarations and references
    pub fn attributes(&self) -> Vec<&XsdAttribute> {
        self.items
            .iter()
            .filter_map(|item| match item {
                AttributeItem::Attribute(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// Attribute group references
    pub fn attribute_group_refs(&self) -> Vec<&XsdAttributeGroupRef> {
        self.items
            .iter()
            .filter_map(|item| match item {
                AttributeItem::AttributeGroup(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Whether no attribute, group reference or wildcard is present
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.any_attribute.is_none()
    }

    pub(crate) fn push_children<'a>(&'a self, children: &mut Vec<Component<'a>>) {
        children.extend(self.items.iter().map(|item| match item {
            AttributeItem::Attribute(a) => Component::from(a),
            AttributeItem::AttributeGroup(g) => g.into(),
        }));
        if let Some(any) = &self.any_attribute {
            children.push(any.into());
        }
    }
}

/// `xs:simpleContent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSimpleContent {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// `restriction` or `extension`
    pub derivation: SimpleContentDerivation,
}

/// Derivation inside `xs:simpleContent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleContentDerivation {
    /// `xs:restriction`
    Restriction(XsdSimpleContentRestriction),
    /// `xs:extension`
    Extension(XsdSimpleContentExtension),
}

impl XsdComponent for XsdSimpleContent {
    fn tag(&self) -> &'static str {
        "simpleContent"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.push(match &self.derivation {
            SimpleContentDerivation::Restriction(r) => r.into(),
            SimpleContentDerivation::Extension(e) => e.into(),
        });
        children
    }
}

/// `xs:restriction` inside `xs:simpleContent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSimpleContentRestriction {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `base`
    pub base: QName,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Anonymous restricting type
    pub simple_type: Option<XsdSimpleType>,
    /// Facets in document order
    pub facets: Vec<XsdFacet>,
    /// Attribute uses and wildcard
    pub attributes: AttributeContent,
}

impl XsdComponent for XsdSimpleContentRestriction {
    fn tag(&self) -> &'static str {
        "restriction"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        if let Some(simple_type) = &self.simple_type {
            children.push(simple_type.into());
        }
        children.extend(self.facets.iter().map(Component::from));
        self.attributes.push_children(&mut children);
        children
    }
}

/// `xs:extension` inside `xs:simpleContent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSimpleContentExtension {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `base`
    pub base: QName,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Attribute uses and wildcard
    pub attributes: AttributeContent,
}

impl XsdComponent for XsdSimpleContentExtension {
    fn tag(&self) -> &'static str {
        "extension"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        self.attributes.push_children(&mut children);
        children
    }
}

/// `xs:complexContent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdComplexContent {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `mixed`
    pub mixed: Option<bool>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// `restriction` or `extension`
    pub derivation: XsdComplexDerivation,
}

impl XsdComponent for XsdComplexContent {
    fn tag(&self) -> &'static str {
        "complexContent"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.push((&self.derivation).into());
        children
    }
}

/// Derivation method of a complex content derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationMethod {
    /// `xs:restriction`
    Restriction,
    /// `xs:extension`
    Extension,
}

/// `xs:restriction` / `xs:extension` inside `xs:complexContent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdComplexDerivation {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// Restriction or extension
    pub method: DerivationMethod,
    /// `base`
    pub base: QName,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Model group and attributes
    pub content: ContentModel,
}

impl XsdComplexDerivation {
    /// Whether this is an extension
    pub fn is_extension(&self) -> bool {
        self.method == DerivationMethod::Extension
    }
}

impl XsdComponent for XsdComplexDerivation {
    fn tag(&self) -> &'static str {
        match self.method {
            DerivationMethod::Restriction => "restriction",
            DerivationMethod::Extension => "extension",
        }
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        self.content.push_children(&mut children);
        children
    }
}
