//! Attribute declarations and attribute groups

use serde::Serialize;

use super::{
    push_annotation, AttributeContent, Component, NodeInfo, Scope, ValueConstraint,
    XsdAnnotation, XsdComponent, XsdSimpleType,
};
use crate::namespaces::QName;
use crate::values::{AttributeUse, Form};

/// `xs:attribute`, global or local
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdAttribute {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// Global or local
    pub scope: Scope,
    /// `name`
    pub name: Option<String>,
    /// `ref`
    #[serde(rename = "ref")]
    pub reference: Option<QName>,
    /// `type`
    #[serde(rename = "type")]
    pub type_name: Option<QName>,
    /// `use`
    #[serde(rename = "use")]
    pub use_mode: Option<AttributeUse>,
    /// `default` or `fixed`
    pub value_constraint: Option<ValueConstraint>,
    /// `form`
    pub form: Option<Form>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Anonymous type
    pub simple_type: Option<XsdSimpleType>,
}

impl XsdAttribute {
    /// `use`, defaulting to `optional`
    pub fn use_or_default(&self) -> AttributeUse {
        self.use_mode.unwrap_or(AttributeUse::Optional)
    }

    /// The `default` value
    pub fn default_value(&self) -> Option<&str> {
        match &self.value_constraint {
            Some(ValueConstraint::Default(v)) => Some(v),
            _ => None,
        }
    }

    /// The `fixed` value
    pub fn fixed_value(&self) -> Option<&str> {
        match &self.value_constraint {
            Some(ValueConstraint::Fixed(v)) => Some(v),
            _ => None,
        }
    }

    /// Whether this is a reference to a global attribute
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }
}

impl XsdComponent for XsdAttribute {
    fn tag(&self) -> &'static str {
        "attribute"
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
        children
    }
}

/// Named `xs:attributeGroup` definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdAttributeGroup {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `name`
    pub name: String,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Attribute uses and wildcard
    pub attributes: AttributeContent,
}

impl XsdComponent for XsdAttributeGroup {
    fn tag(&self) -> &'static str {
        "attributeGroup"
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

/// `xs:attributeGroup ref=".."`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdAttributeGroupRef {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `ref`
    #[serde(rename = "ref")]
    pub reference: QName,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdAttributeGroupRef {
    fn tag(&self) -> &'static str {
        "attributeGroup"
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
