//! Element declarations

use serde::Serialize;

use super::{
    push_annotation, Component, NodeInfo, Occurs, Scope, ValueConstraint, XsdAnnotation,
    XsdComplexType, XsdComponent, XsdIdentity, XsdSimpleType,
};
use crate::namespaces::QName;
use crate::values::{DerivationSet, Form};

/// `xs:element`: global, local, a reference, or a member of `xs:all`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdElement {
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
    /// `substitutionGroup`
    pub substitution_group: Option<QName>,
    /// `default` or `fixed`
    pub value_constraint: Option<ValueConstraint>,
    /// `nillable`
    pub nillable: Option<bool>,
    /// `abstract`
    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
    /// `final`
    #[serde(rename = "final")]
    pub final_set: Option<DerivationSet>,
    /// `block`
    #[serde(rename = "block")]
    pub block_set: Option<DerivationSet>,
    /// `form`
    pub form: Option<Form>,
    /// `minOccurs` / `maxOccurs`
    #[serde(flatten)]
    pub occurs: Occurs,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Anonymous type
    pub local_type: Option<LocalType>,
    /// `unique`, `key` and `keyref` children in document order
    pub identities: Vec<XsdIdentity>,
}

/// An anonymous type of an element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LocalType {
    /// `xs:simpleType`
    SimpleType(Box<XsdSimpleType>),
    /// `xs:complexType`
    ComplexType(Box<XsdComplexType>),
}

impl XsdElement {
    /// `nillable`, defaulting to false
    pub fn is_nillable(&self) -> bool {
        self.nillable.unwrap_or(false)
    }

    /// `abstract`, defaulting to false
    pub fn is_abstract(&self) -> bool {
        self.is_abstract.unwrap_or(false)
    }

    /// Whether this is a reference to a global element
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
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

    /// The anonymous simple type, if any
    pub fn simple_type(&self) -> Option<&XsdSimpleType> {
        match &self.local_type {
            Some(LocalType::SimpleType(t)) => Some(t),
            _ => None,
        }
    }

    /// The anonymous complex type, if any
    pub fn complex_type(&self) -> Option<&XsdComplexType> {
        match &self.local_type {
            Some(LocalType::ComplexType(t)) => Some(t),
            _ => None,
        }
    }
}

impl XsdComponent for XsdElement {
    fn tag(&self) -> &'static str {
        "element"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        match &self.local_type {
            Some(LocalType::SimpleType(t)) => children.push(Component::from(&**t)),
            Some(LocalType::ComplexType(t)) => children.push(Component::from(&**t)),
            None => {}
        }
        children.extend(self.identities.iter().map(Component::from));
        children
    }
}
