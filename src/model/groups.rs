//! Model groups, group references and wildcards

use serde::Serialize;

use super::{push_annotation, Component, NodeInfo, Occurs, XsdAnnotation, XsdComponent, XsdElement};
use crate::namespaces::QName;
use crate::values::{NamespaceConstraint, ProcessContents};

/// A content-model particle: a group reference or a compositor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelGroup {
    /// `xs:group ref=".."`
    Group(XsdGroupRef),
    /// `xs:all`
    All(XsdAll),
    /// `xs:choice`
    Choice(XsdExplicitGroup),
    /// `xs:sequence`
    Sequence(XsdExplicitGroup),
}

impl ModelGroup {
    pub(crate) fn as_component(&self) -> Component<'_> {
        match self {
            ModelGroup::Group(g) => g.into(),
            ModelGroup::All(a) => a.into(),
            ModelGroup::Choice(g) | ModelGroup::Sequence(g) => g.into(),
        }
    }

    /// Occurrence attributes of the particle
    pub fn occurs(&self) -> &Occurs {
        match self {
            ModelGroup::Group(g) => &g.occurs,
            ModelGroup::All(a) => &a.occurs,
            ModelGroup::Choice(g) | ModelGroup::Sequence(g) => &g.occurs,
        }
    }
}

/// The compositor of a named group definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupModel {
    /// `xs:all`
    All(XsdAll),
    /// `xs:choice`
    Choice(XsdExplicitGroup),
    /// `xs:sequence`
    Sequence(XsdExplicitGroup),
}

/// Named `xs:group` definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdGroup {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `name`
    pub name: String,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// The compositor
    pub model: GroupModel,
}

impl XsdComponent for XsdGroup {
    fn tag(&self) -> &'static str {
        "group"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.push(match &self.model {
            GroupModel::All(a) => a.into(),
            GroupModel::Choice(g) | GroupModel::Sequence(g) => g.into(),
        });
        children
    }
}

/// `xs:group ref=".."`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdGroupRef {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `ref`
    #[serde(rename = "ref")]
    pub reference: QName,
    /// `minOccurs` / `maxOccurs`
    #[serde(flatten)]
    pub occurs: Occurs,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdGroupRef {
    fn tag(&self) -> &'static str {
        "group"
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

/// `xs:all`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdAll {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `minOccurs` / `maxOccurs`, limited to 0 or 1
    #[serde(flatten)]
    pub occurs: Occurs,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Element declarations in document order
    pub elements: Vec<XsdElement>,
}

impl XsdComponent for XsdAll {
    fn tag(&self) -> &'static str {
        "all"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.extend(self.elements.iter().map(Component::from));
        children
    }
}

/// Which explicit compositor a group uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compositor {
    /// `xs:choice`
    Choice,
    /// `xs:sequence`
    Sequence,
}

/// `xs:choice` or `xs:sequence`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdExplicitGroup {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// Choice or sequence
    pub compositor: Compositor,
    /// `minOccurs` / `maxOccurs`
    #[serde(flatten)]
    pub occurs: Occurs,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
    /// Nested particles in document order
    pub particles: Vec<GroupParticle>,
}

/// A particle nested in a choice or sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupParticle {
    /// Local `xs:element`
    Element(XsdElement),
    /// `xs:group ref=".."`
    Group(XsdGroupRef),
    /// Nested `xs:choice`
    Choice(XsdExplicitGroup),
    /// Nested `xs:sequence`
    Sequence(XsdExplicitGroup),
    /// `xs:any`
    Any(XsdAny),
}

impl XsdExplicitGroup {
    /// Whether this is an `xs:sequence`
    pub fn is_sequence(&self) -> bool {
        self.compositor == Compositor::Sequence
    }

    /// Whether this is an `xs:choice`
    pub fn is_choice(&self) -> bool {
        self.compositor == Compositor::Choice
    }

    /// Local element declarations
    pub fn elements(&self) -> Vec<&XsdElement> {
        self.particles
            .iter()
            .filter_map(|p| match p {
                GroupParticle::Element(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// Group references
    pub fn group_refs(&self) -> Vec<&XsdGroupRef> {
        self.particles
            .iter()
            .filter_map(|p| match p {
                GroupParticle::Group(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Nested choices
    pub fn choices(&self) -> Vec<&XsdExplicitGroup> {
        self.particles
            .iter()
            .filter_map(|p| match p {
                GroupParticle::Choice(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Nested sequences
    pub fn sequences(&self) -> Vec<&XsdExplicitGroup> {
        self.particles
            .iter()
            .filter_map(|p| match p {
                GroupParticle::Sequence(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Element wildcards
    pub fn anys(&self) -> Vec<&XsdAny> {
        self.particles
            .iter()
            .filter_map(|p| match p {
                GroupParticle::Any(a) => Some(a),
                _ => None,
            })
            .collect()
    }
}

impl XsdComponent for XsdExplicitGroup {
    fn tag(&self) -> &'static str {
        match self.compositor {
            Compositor::Choice => "choice",
            Compositor::Sequence => "sequence",
        }
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        let mut children = Vec::new();
        push_annotation(&mut children, &self.annotation);
        children.extend(self.particles.iter().map(|p| match p {
            GroupParticle::Element(e) => Component::from(e),
            GroupParticle::Group(g) => g.into(),
            GroupParticle::Choice(g) | GroupParticle::Sequence(g) => g.into(),
            GroupParticle::Any(a) => a.into(),
        }));
        children
    }
}

/// `xs:any`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdAny {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `minOccurs` / `maxOccurs`
    #[serde(flatten)]
    pub occurs: Occurs,
    /// `namespace`
    pub namespace: Option<NamespaceConstraint>,
    /// `processContents`
    pub process_contents: Option<ProcessContents>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdAny {
    fn tag(&self) -> &'static str {
        "any"
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

/// `xs:anyAttribute`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdAnyAttribute {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `namespace`
    pub namespace: Option<NamespaceConstraint>,
    /// `processContents`
    pub process_contents: Option<ProcessContents>,
    /// Leading annotation
    pub annotation: Option<XsdAnnotation>,
}

impl XsdComponent for XsdAnyAttribute {
    fn tag(&self) -> &'static str {
        "anyAttribute"
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
