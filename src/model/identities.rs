//! Identity constraints
//!
//! - `xs:unique`: selected values are unique within the scope
//! - `xs:key`: like unique, and every field must be present
//! - `xs:keyref`: refers to a key or unique constraint by name

use serde::Serialize;

use super::{push_annotation, Component, NodeInfo, XsdAnnotation, XsdComponent};
use crate::namespaces::QName;
use crate::xpath::XPathExpr;

/// Kind of identity constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityConstraintKind {
    /// `xs:unique`
    Unique,
    /// `xs:key`
    Key,
    /// `xs:keyref`
    KeyRef,
}

impl IdentityConstraintKind {
    /// Local name of the element
    pub fn tag(&self) -> &'static str {
        match self {
            IdentityConstraintKind::Unique => "unique",
            IdentityConstraintKind::Key => "key",
            IdentityConstraintKind::KeyRef => "keyref",
        }
    }
}

/// `xs:unique`, `xs:key` or `xs:keyref`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdIdentity {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// Which constraint
    pub kind: IdentityConstraintKind,
    /// `name`
    pub name: String,
    /// `refer`, keyref only
    pub refer: Option<QName>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// `xs:selector`
    pub selector: XsdSelector,
    /// `xs:field` children, at least one
    pub fields: Vec<XsdField>,
}

impl XsdIdentity {
    /// Check if this is a unique constraint
    pub fn is_unique(&self) -> bool {
        self.kind == IdentityConstraintKind::Unique
    }

    /// Check if this is a key constraint
    pub fn is_key(&self) -> bool {
        self.kind == IdentityConstraintKind::Key
    }

    /// Check if this is a keyref constraint
    pub fn is_keyref(&self) -> bool {
        self.kind == IdentityConstraintKind::KeyRef
    }
}

impl XsdComponent for XsdIdentity {
    fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.push((&self.selector).into());
        children.extend(self.fields.iter().map(Component::from));
        children
    }
}

/// `xs:selector`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSelector {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `xpath`
    pub xpath: XPathExpr,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdSelector {
    fn tag(&self) -> &'static str {
        "selector"
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

/// `xs:field`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdField {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `xpath`
    pub xpath: XPathExpr,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdField {
    fn tag(&self) -> &'static str {
        "field"
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
