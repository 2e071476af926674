//! `xs:annotation`, `xs:appinfo`, `xs:documentation`

use serde::Serialize;

use super::{Component, NodeInfo, XsdComponent};
use crate::documents::Node;
use crate::values::Language;

/// `xs:annotation`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XsdAnnotation {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `appinfo` and `documentation` children in document order
    pub items: Vec<AnnotationItem>,
}

/// A child of `xs:annotation`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationItem {
    /// `xs:appinfo`
    AppInfo(XsdAppInfo),
    /// `xs:documentation`
    Documentation(XsdDocumentation),
}

impl XsdAnnotation {
    /// The `appinfo` children
    pub fn app_infos(&self) -> Vec<&XsdAppInfo> {
        self.items
            .iter()
            .filter_map(|item| match item {
                AnnotationItem::AppInfo(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// The `documentation` children
    pub fn documentation(&self) -> Vec<&XsdDocumentation> {
        self.items
            .iter()
            .filter_map(|item| match item {
                AnnotationItem::Documentation(d) => Some(d),
                _ => None,
            })
            .collect()
    }
}

impl XsdComponent for XsdAnnotation {
    fn tag(&self) -> &'static str {
        "annotation"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        self.items
            .iter()
            .map(|item| match item {
                AnnotationItem::AppInfo(a) => a.into(),
                AnnotationItem::Documentation(d) => d.into(),
            })
            .collect()
    }
}

/// `xs:appinfo`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XsdAppInfo {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `source`
    pub source: Option<String>,
    /// Content, kept verbatim
    pub content: Vec<Node>,
}

impl XsdComponent for XsdAppInfo {
    fn tag(&self) -> &'static str {
        "appinfo"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        Vec::new()
    }
}

/// `xs:documentation`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XsdDocumentation {
    /// Shared node data
    #[serde(flatten)]
    pub info: NodeInfo,
    /// `source`
    pub source: Option<String>,
    /// `xml:lang`
    pub lang: Option<Language>,
    /// Content, kept verbatim
    pub content: Vec<Node>,
}

impl XsdDocumentation {
    /// Concatenated character data of the top-level content
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl XsdComponent for XsdDocumentation {
    fn tag(&self) -> &'static str {
        "documentation"
    }

    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn children(&self) -> Vec<Component<'_>> {
        Vec::new()
    }
}
