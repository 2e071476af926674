//! Model builders
//!
//! One builder per context turns validated attributes and already parsed
//! children into a model node. The child sequence has been matched against
//! the grammar before a builder runs, so builders only distribute children
//! into fields and check the representation constraints that the grammar
//! tables cannot express (`name` versus `ref`, `default` versus `fixed`, an
//! attribute versus an inline type).

use std::iter::Peekable;
use std::vec::IntoIter;

use super::attributes::Attributes;
use crate::documents::Node;
use crate::error::ParseErrorKind;
use crate::grammar::ParsingContext;
use crate::model::*;
use crate::namespaces::QName;
use crate::values::AttributeUse;

/// A parsed node, handed from a child to its parent's builder
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Parsed {
    Schema(XsdSchema),
    Annotation(XsdAnnotation),
    AppInfo(XsdAppInfo),
    Documentation(XsdDocumentation),
    Include(XsdInclude),
    Import(XsdImport),
    Redefine(XsdRedefine),
    Notation(XsdNotation),
    SimpleType(XsdSimpleType),
    SimpleRestriction(XsdSimpleRestriction),
    List(XsdList),
    Union(XsdUnion),
    Facet(XsdFacet),
    ComplexType(XsdComplexType),
    SimpleContent(XsdSimpleContent),
    SimpleContentRestriction(XsdSimpleContentRestriction),
    SimpleContentExtension(XsdSimpleContentExtension),
    ComplexContent(XsdComplexContent),
    ComplexDerivation(XsdComplexDerivation),
    Group(XsdGroup),
    GroupRef(XsdGroupRef),
    All(XsdAll),
    ExplicitGroup(XsdExplicitGroup),
    Any(XsdAny),
    AnyAttribute(XsdAnyAttribute),
    Attribute(XsdAttribute),
    AttributeGroup(XsdAttributeGroup),
    AttributeGroupRef(XsdAttributeGroupRef),
    Element(XsdElement),
    Identity(XsdIdentity),
    Selector(XsdSelector),
    Field(XsdField),
}

impl Parsed {
    /// Borrow the node as a component
    pub(crate) fn as_component(&self) -> Component<'_> {
        match self {
            Parsed::Schema(n) => n.into(),
            Parsed::Annotation(n) => n.into(),
            Parsed::AppInfo(n) => n.into(),
            Parsed::Documentation(n) => n.into(),
            Parsed::Include(n) => n.into(),
            Parsed::Import(n) => n.into(),
            Parsed::Redefine(n) => n.into(),
            Parsed::Notation(n) => n.into(),
            Parsed::SimpleType(n) => n.into(),
            Parsed::SimpleRestriction(n) => n.into(),
            Parsed::List(n) => n.into(),
            Parsed::Union(n) => n.into(),
            Parsed::Facet(n) => n.into(),
            Parsed::ComplexType(n) => n.into(),
            Parsed::SimpleContent(n) => n.into(),
            Parsed::SimpleContentRestriction(n) => n.into(),
            Parsed::SimpleContentExtension(n) => n.into(),
            Parsed::ComplexContent(n) => n.into(),
            Parsed::ComplexDerivation(n) => n.into(),
            Parsed::Group(n) => n.into(),
            Parsed::GroupRef(n) => n.into(),
            Parsed::All(n) => n.into(),
            Parsed::ExplicitGroup(n) => n.into(),
            Parsed::Any(n) => n.into(),
            Parsed::AnyAttribute(n) => n.into(),
            Parsed::Attribute(n) => n.into(),
            Parsed::AttributeGroup(n) => n.into(),
            Parsed::AttributeGroupRef(n) => n.into(),
            Parsed::Element(n) => n.into(),
            Parsed::Identity(n) => n.into(),
            Parsed::Selector(n) => n.into(),
            Parsed::Field(n) => n.into(),
        }
    }
}

/// Everything a builder gets for one element
pub(crate) struct Parts {
    pub(crate) info: NodeInfo,
    pub(crate) attributes: Attributes,
    pub(crate) children: Vec<Parsed>,
    /// Raw content of open-content elements (`appinfo`, `documentation`)
    pub(crate) content: Vec<Node>,
}

type Built = Result<Parsed, ParseErrorKind>;

/// Build the model node for `context`
pub(crate) fn build(context: ParsingContext, parts: Parts) -> Built {
    use ParsingContext::*;
    let Parts {
        info,
        attributes: mut attrs,
        children,
        content,
    } = parts;
    let mut children = Children(children.into_iter().peekable());

    match context {
        Schema => schema(info, attrs, children),
        Annotation => annotation(info, children).map(Parsed::Annotation),
        AppInfo => Ok(Parsed::AppInfo(XsdAppInfo {
            info,
            source: attrs.text("source"),
            content,
        })),
        Documentation => Ok(Parsed::Documentation(XsdDocumentation {
            info,
            source: attrs.text("source"),
            lang: attrs.language("lang"),
            content,
        })),
        Include => Ok(Parsed::Include(XsdInclude {
            info,
            schema_location: required(attrs.text("schemaLocation"), "schemaLocation")?,
            annotation: children.annotation(),
        })),
        Import => Ok(Parsed::Import(XsdImport {
            info,
            namespace: attrs.text("namespace"),
            schema_location: attrs.text("schemaLocation"),
            annotation: children.annotation(),
        })),
        Redefine => redefine(info, attrs, children),
        Notation => notation(info, attrs, children),
        TopLevelSimpleType | LocalSimpleType => simple_type(info, attrs, children),
        SimpleRestriction => simple_restriction(info, attrs, children),
        List => list(info, attrs, children),
        Union => union(info, attrs, children),
        Facet(kind) => facet(kind, info, attrs, children),
        TopLevelComplexType | LocalComplexType => complex_type(info, attrs, children),
        SimpleContent => simple_content(info, children),
        SimpleContentRestriction => simple_content_restriction(info, attrs, children),
        SimpleContentExtension => Ok(Parsed::SimpleContentExtension(XsdSimpleContentExtension {
            info,
            base: required(attrs.qname("base"), "base")?,
            annotation: children.annotation(),
            attributes: children.attribute_content()?,
        })),
        ComplexContent => complex_content(info, attrs, children),
        ComplexContentRestriction => {
            complex_derivation(DerivationMethod::Restriction, info, attrs, children)
        }
        ComplexContentExtension => {
            complex_derivation(DerivationMethod::Extension, info, attrs, children)
        }
        GroupDefinition => group_definition(info, attrs, children),
        GroupRef => Ok(Parsed::GroupRef(XsdGroupRef {
            info,
            reference: required(attrs.qname("ref"), "ref")?,
            occurs: occurs(&mut attrs),
            annotation: children.annotation(),
        })),
        All | SimpleAll => all(info, attrs, children),
        Choice | SimpleChoice => explicit_group(Compositor::Choice, info, attrs, children),
        Sequence | SimpleSequence => explicit_group(Compositor::Sequence, info, attrs, children),
        Any => Ok(Parsed::Any(XsdAny {
            info,
            occurs: occurs(&mut attrs),
            namespace: attrs.namespace("namespace"),
            process_contents: attrs.process_contents("processContents"),
            annotation: children.annotation(),
        })),
        AnyAttribute => Ok(Parsed::AnyAttribute(XsdAnyAttribute {
            info,
            namespace: attrs.namespace("namespace"),
            process_contents: attrs.process_contents("processContents"),
            annotation: children.annotation(),
        })),
        TopLevelAttribute => attribute(Scope::Global, info, attrs, children),
        LocalAttribute => attribute(Scope::Local, info, attrs, children),
        AttributeGroupDefinition => Ok(Parsed::AttributeGroup(XsdAttributeGroup {
            info,
            name: required(attrs.name("name"), "name")?,
            annotation: children.annotation(),
            attributes: children.attribute_content()?,
        })),
        AttributeGroupRef => Ok(Parsed::AttributeGroupRef(XsdAttributeGroupRef {
            info,
            reference: required(attrs.qname("ref"), "ref")?,
            annotation: children.annotation(),
        })),
        TopLevelElement => element(Scope::Global, info, attrs, children),
        NarrowElement | NarrowMaxMinElement => element(Scope::Local, info, attrs, children),
        Unique => identity(IdentityConstraintKind::Unique, info, attrs, children),
        Key => identity(IdentityConstraintKind::Key, info, attrs, children),
        KeyRef => identity(IdentityConstraintKind::KeyRef, info, attrs, children),
        Selector => Ok(Parsed::Selector(XsdSelector {
            info,
            xpath: required(attrs.xpath("xpath"), "xpath")?,
            annotation: children.annotation(),
        })),
        Field => Ok(Parsed::Field(XsdField {
            info,
            xpath: required(attrs.xpath("xpath"), "xpath")?,
            annotation: children.annotation(),
        })),
    }
}

/// Parsed children of one element, consumed front to back
struct Children(Peekable<IntoIter<Parsed>>);

impl Children {
    fn next(&mut self) -> Option<Parsed> {
        self.0.next()
    }

    fn annotation(&mut self) -> Option<XsdAnnotation> {
        match self.0.next_if(|p| matches!(p, Parsed::Annotation(_)))? {
            Parsed::Annotation(a) => Some(a),
            _ => None,
        }
    }

    fn simple_type(&mut self) -> Option<XsdSimpleType> {
        match self.0.next_if(|p| matches!(p, Parsed::SimpleType(_)))? {
            Parsed::SimpleType(t) => Some(t),
            _ => None,
        }
    }

    fn facets(&mut self) -> Vec<XsdFacet> {
        let mut facets = Vec::new();
        while let Some(Parsed::Facet(facet)) = self.0.next_if(|p| matches!(p, Parsed::Facet(_))) {
            facets.push(facet);
        }
        facets
    }

    /// `(attribute | attributeGroup)*, anyAttribute?` up to the end
    fn attribute_content(&mut self) -> Result<AttributeContent, ParseErrorKind> {
        let mut content = AttributeContent::default();
        for child in self.0.by_ref() {
            match child {
                Parsed::Attribute(a) => content.items.push(AttributeItem::Attribute(a)),
                Parsed::AttributeGroupRef(g) => {
                    content.items.push(AttributeItem::AttributeGroup(g))
                }
                Parsed::AnyAttribute(a) => content.any_attribute = Some(a),
                other => return Err(misplaced(&other)),
            }
        }
        Ok(content)
    }

    /// An optional model group followed by attribute content
    fn content_model(&mut self) -> Result<ContentModel, ParseErrorKind> {
        let group = match self.0.next_if(|p| {
            matches!(p, Parsed::GroupRef(_) | Parsed::All(_) | Parsed::ExplicitGroup(_))
        }) {
            Some(Parsed::GroupRef(g)) => Some(ModelGroup::Group(g)),
            Some(Parsed::All(a)) => Some(ModelGroup::All(a)),
            Some(Parsed::ExplicitGroup(g)) => Some(match g.compositor {
                Compositor::Choice => ModelGroup::Choice(g),
                Compositor::Sequence => ModelGroup::Sequence(g),
            }),
            _ => None,
        };
        Ok(ContentModel {
            group,
            attributes: self.attribute_content()?,
        })
    }

    /// Fail if any child is left over
    fn done(mut self) -> Result<(), ParseErrorKind> {
        match self.next() {
            Some(other) => Err(misplaced(&other)),
            None => Ok(()),
        }
    }
}

/// A child the grammar tables let through but the builder has no place for
fn misplaced(parsed: &Parsed) -> ParseErrorKind {
    ParseErrorKind::UnexpectedElement {
        element: format!("xs:{}", parsed.as_component().tag()),
        expected: "no more elements".to_string(),
    }
}

fn required<T>(value: Option<T>, attribute: &str) -> Result<T, ParseErrorKind> {
    value.ok_or_else(|| ParseErrorKind::MissingRequiredAttribute {
        attribute: attribute.to_string(),
    })
}

fn missing_element(element: &str) -> ParseErrorKind {
    ParseErrorKind::MissingRequiredElement {
        element: element.to_string(),
        found: None,
    }
}

fn conflict(first: &str, second: &str) -> ParseErrorKind {
    ParseErrorKind::ConflictingAttributes {
        first: first.to_string(),
        second: second.to_string(),
    }
}

fn occurs(attrs: &mut Attributes) -> Occurs {
    Occurs {
        min_occurs: attrs.integer("minOccurs"),
        max_occurs: attrs.max_occurs("maxOccurs"),
    }
}

fn value_constraint(attrs: &mut Attributes) -> Result<Option<ValueConstraint>, ParseErrorKind> {
    match (attrs.text("default"), attrs.text("fixed")) {
        (Some(_), Some(_)) => Err(conflict("default", "fixed")),
        (Some(default), None) => Ok(Some(ValueConstraint::Default(default))),
        (None, Some(fixed)) => Ok(Some(ValueConstraint::Fixed(fixed))),
        (None, None) => Ok(None),
    }
}

fn schema(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let mut schema = XsdSchema {
        info,
        target_namespace: attrs.text("targetNamespace"),
        version: attrs.text("version"),
        final_default: attrs.derivation("finalDefault"),
        block_default: attrs.derivation("blockDefault"),
        attribute_form_default: attrs.form("attributeFormDefault"),
        element_form_default: attrs.form("elementFormDefault"),
        lang: attrs.language("lang"),
        composition: Vec::new(),
        content: Vec::new(),
    };

    while let Some(child) = children.next() {
        let top = match child {
            Parsed::Include(i) if schema.content.is_empty() => {
                schema.composition.push(Composition::Include(i));
                continue;
            }
            Parsed::Import(i) if schema.content.is_empty() => {
                schema.composition.push(Composition::Import(i));
                continue;
            }
            Parsed::Redefine(r) if schema.content.is_empty() => {
                schema.composition.push(Composition::Redefine(r));
                continue;
            }
            Parsed::Annotation(a) if schema.content.is_empty() => {
                schema.composition.push(Composition::Annotation(a));
                continue;
            }
            Parsed::Annotation(a) => SchemaTop::Annotation(a),
            Parsed::SimpleType(t) => SchemaTop::SimpleType(t),
            Parsed::ComplexType(t) => SchemaTop::ComplexType(t),
            Parsed::Group(g) => SchemaTop::Group(g),
            Parsed::AttributeGroup(g) => SchemaTop::AttributeGroup(g),
            Parsed::Element(e) => SchemaTop::Element(e),
            Parsed::Attribute(a) => SchemaTop::Attribute(a),
            Parsed::Notation(n) => SchemaTop::Notation(n),
            other => return Err(misplaced(&other)),
        };
        schema.content.push(top);
    }

    Ok(Parsed::Schema(schema))
}

fn annotation(info: NodeInfo, children: Children) -> Result<XsdAnnotation, ParseErrorKind> {
    let mut annotation = XsdAnnotation {
        info,
        items: Vec::new(),
    };
    for child in children.0 {
        match child {
            Parsed::AppInfo(a) => annotation.items.push(AnnotationItem::AppInfo(a)),
            Parsed::Documentation(d) => annotation.items.push(AnnotationItem::Documentation(d)),
            other => return Err(misplaced(&other)),
        }
    }
    Ok(annotation)
}

fn redefine(info: NodeInfo, mut attrs: Attributes, children: Children) -> Built {
    let mut redefine = XsdRedefine {
        info,
        schema_location: required(attrs.text("schemaLocation"), "schemaLocation")?,
        content: Vec::new(),
    };
    for child in children.0 {
        let item = match child {
            Parsed::Annotation(a) => RedefineItem::Annotation(a),
            Parsed::SimpleType(t) => RedefineItem::SimpleType(t),
            Parsed::ComplexType(t) => RedefineItem::ComplexType(t),
            Parsed::Group(g) => RedefineItem::Group(g),
            Parsed::AttributeGroup(g) => RedefineItem::AttributeGroup(g),
            other => return Err(misplaced(&other)),
        };
        redefine.content.push(item);
    }
    Ok(Parsed::Redefine(redefine))
}

fn notation(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let public = attrs.text("public");
    let system = attrs.text("system");
    if public.is_none() && system.is_none() {
        return Err(ParseErrorKind::MissingRequiredAttribute {
            attribute: "public".to_string(),
        });
    }
    Ok(Parsed::Notation(XsdNotation {
        info,
        name: required(attrs.name("name"), "name")?,
        public,
        system,
        annotation: children.annotation(),
    }))
}

fn simple_type(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let derivation = match children.next() {
        Some(Parsed::SimpleRestriction(r)) => SimpleDerivation::Restriction(r),
        Some(Parsed::List(l)) => SimpleDerivation::List(l),
        Some(Parsed::Union(u)) => SimpleDerivation::Union(u),
        Some(other) => return Err(misplaced(&other)),
        None => return Err(missing_element("one of xs:restriction, xs:list, xs:union")),
    };
    children.done()?;
    Ok(Parsed::SimpleType(XsdSimpleType {
        info,
        name: attrs.name("name"),
        final_set: attrs.derivation("final"),
        annotation,
        derivation,
    }))
}

/// A QName attribute or an inline simple type, exactly one of them
fn type_ref(
    name: Option<QName>,
    inline: Option<XsdSimpleType>,
    attribute: &str,
) -> Result<SimpleTypeRef, ParseErrorKind> {
    match (name, inline) {
        (Some(_), Some(_)) => Err(conflict(attribute, "xs:simpleType")),
        (Some(name), None) => Ok(SimpleTypeRef::Named(name)),
        (None, Some(inline)) => Ok(SimpleTypeRef::Inline(Box::new(inline))),
        (None, None) => Err(ParseErrorKind::MissingRequiredAttribute {
            attribute: attribute.to_string(),
        }),
    }
}

fn simple_restriction(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let base = type_ref(attrs.qname("base"), children.simple_type(), "base")?;
    let facets = children.facets();
    children.done()?;
    Ok(Parsed::SimpleRestriction(XsdSimpleRestriction {
        info,
        base,
        annotation,
        facets,
    }))
}

fn list(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let item_type = type_ref(attrs.qname("itemType"), children.simple_type(), "itemType")?;
    children.done()?;
    Ok(Parsed::List(XsdList {
        info,
        item_type,
        annotation,
    }))
}

fn union(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let mut simple_types = Vec::new();
    while let Some(simple_type) = children.simple_type() {
        simple_types.push(simple_type);
    }
    children.done()?;

    let union = XsdUnion {
        info,
        member_types: attrs.qnames("memberTypes"),
        annotation,
        simple_types,
    };
    if union.member_count() == 0 {
        return Err(match union.member_types {
            None => ParseErrorKind::MissingRequiredAttribute {
                attribute: "memberTypes".to_string(),
            },
            Some(_) => missing_element("xs:simpleType"),
        });
    }
    Ok(Parsed::Union(union))
}

fn facet(kind: FacetKind, info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let value = match kind {
        FacetKind::Length
        | FacetKind::MinLength
        | FacetKind::MaxLength
        | FacetKind::TotalDigits
        | FacetKind::FractionDigits => FacetValue::Integer(required(attrs.integer("value"), "value")?),
        FacetKind::WhiteSpace => FacetValue::WhiteSpace(required(attrs.white_space("value"), "value")?),
        _ => FacetValue::Literal(required(attrs.text("value"), "value")?),
    };
    Ok(Parsed::Facet(XsdFacet {
        info,
        kind,
        value,
        fixed: attrs.boolean("fixed"),
        annotation: children.annotation(),
    }))
}

fn complex_type(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let content = match children.0.next_if(|p| {
        matches!(p, Parsed::SimpleContent(_) | Parsed::ComplexContent(_))
    }) {
        Some(Parsed::SimpleContent(c)) => ComplexTypeContent::SimpleContent(c),
        Some(Parsed::ComplexContent(c)) => ComplexTypeContent::ComplexContent(c),
        _ => ComplexTypeContent::Model(children.content_model()?),
    };
    children.done()?;
    Ok(Parsed::ComplexType(XsdComplexType {
        info,
        name: attrs.name("name"),
        mixed: attrs.boolean("mixed"),
        is_abstract: attrs.boolean("abstract"),
        final_set: attrs.derivation("final"),
        block_set: attrs.derivation("block"),
        annotation,
        content,
    }))
}

fn simple_content(info: NodeInfo, mut children: Children) -> Built {
    let annotation = children.annotation();
    let derivation = match children.next() {
        Some(Parsed::SimpleContentRestriction(r)) => SimpleContentDerivation::Restriction(r),
        Some(Parsed::SimpleContentExtension(e)) => SimpleContentDerivation::Extension(e),
        Some(other) => return Err(misplaced(&other)),
        None => return Err(missing_element("one of xs:restriction, xs:extension")),
    };
    children.done()?;
    Ok(Parsed::SimpleContent(XsdSimpleContent {
        info,
        annotation,
        derivation,
    }))
}

fn simple_content_restriction(
    info: NodeInfo,
    mut attrs: Attributes,
    mut children: Children,
) -> Built {
    let annotation = children.annotation();
    let simple_type = children.simple_type();
    let facets = children.facets();
    Ok(Parsed::SimpleContentRestriction(XsdSimpleContentRestriction {
        info,
        base: required(attrs.qname("base"), "base")?,
        annotation,
        simple_type,
        facets,
        attributes: children.attribute_content()?,
    }))
}

fn complex_content(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let derivation = match children.next() {
        Some(Parsed::ComplexDerivation(d)) => d,
        Some(other) => return Err(misplaced(&other)),
        None => return Err(missing_element("one of xs:restriction, xs:extension")),
    };
    children.done()?;
    Ok(Parsed::ComplexContent(XsdComplexContent {
        info,
        mixed: attrs.boolean("mixed"),
        annotation,
        derivation,
    }))
}

fn complex_derivation(
    method: DerivationMethod,
    info: NodeInfo,
    mut attrs: Attributes,
    mut children: Children,
) -> Built {
    let annotation = children.annotation();
    Ok(Parsed::ComplexDerivation(XsdComplexDerivation {
        info,
        method,
        base: required(attrs.qname("base"), "base")?,
        annotation,
        content: children.content_model()?,
    }))
}

fn group_definition(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let model = match children.next() {
        Some(Parsed::All(a)) => GroupModel::All(a),
        Some(Parsed::ExplicitGroup(g)) => match g.compositor {
            Compositor::Choice => GroupModel::Choice(g),
            Compositor::Sequence => GroupModel::Sequence(g),
        },
        Some(other) => return Err(misplaced(&other)),
        None => return Err(missing_element("one of xs:all, xs:choice, xs:sequence")),
    };
    children.done()?;
    Ok(Parsed::Group(XsdGroup {
        info,
        name: required(attrs.name("name"), "name")?,
        annotation,
        model,
    }))
}

fn all(info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let annotation = children.annotation();
    let mut elements = Vec::new();
    for child in children.0 {
        match child {
            Parsed::Element(e) => elements.push(e),
            other => return Err(misplaced(&other)),
        }
    }
    Ok(Parsed::All(XsdAll {
        info,
        occurs: occurs(&mut attrs),
        annotation,
        elements,
    }))
}

fn explicit_group(
    compositor: Compositor,
    info: NodeInfo,
    mut attrs: Attributes,
    mut children: Children,
) -> Built {
    let annotation = children.annotation();
    let mut particles = Vec::new();
    for child in children.0 {
        let particle = match child {
            Parsed::Element(e) => GroupParticle::Element(e),
            Parsed::GroupRef(g) => GroupParticle::Group(g),
            Parsed::ExplicitGroup(g) if g.is_choice() => GroupParticle::Choice(g),
            Parsed::ExplicitGroup(g) => GroupParticle::Sequence(g),
            Parsed::Any(a) => GroupParticle::Any(a),
            other => return Err(misplaced(&other)),
        };
        particles.push(particle);
    }
    Ok(Parsed::ExplicitGroup(XsdExplicitGroup {
        info,
        compositor,
        occurs: occurs(&mut attrs),
        annotation,
        particles,
    }))
}

/// `name` xor `ref` on local declarations
fn name_or_ref(
    attrs: &mut Attributes,
) -> Result<(Option<String>, Option<QName>), ParseErrorKind> {
    let name = attrs.name("name");
    let reference = attrs.qname("ref");
    match (&name, &reference) {
        (Some(_), Some(_)) => Err(conflict("name", "ref")),
        (None, None) => Err(ParseErrorKind::MissingRequiredAttribute {
            attribute: "name".to_string(),
        }),
        _ => Ok((name, reference)),
    }
}

/// Attributes a reference must not carry
fn check_reference(attrs: &Attributes, excluded: &[&str]) -> Result<(), ParseErrorKind> {
    match excluded.iter().find(|a| attrs.has(a)) {
        Some(attribute) => Err(conflict("ref", attribute)),
        None => Ok(()),
    }
}

fn attribute(scope: Scope, info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let (name, reference) = match scope {
        Scope::Global => (Some(required(attrs.name("name"), "name")?), None),
        Scope::Local => name_or_ref(&mut attrs)?,
    };
    if reference.is_some() {
        check_reference(&attrs, &["type", "form"])?;
    }

    let annotation = children.annotation();
    let simple_type = children.simple_type();
    children.done()?;
    if simple_type.is_some() {
        if reference.is_some() {
            return Err(conflict("ref", "xs:simpleType"));
        }
        if attrs.has("type") {
            return Err(conflict("type", "xs:simpleType"));
        }
    }

    let use_mode = attrs.use_mode("use");
    let value_constraint = value_constraint(&mut attrs)?;
    if let (Some(ValueConstraint::Default(_)), Some(use_mode)) = (&value_constraint, use_mode) {
        if use_mode != AttributeUse::Optional {
            return Err(conflict("default", "use"));
        }
    }

    Ok(Parsed::Attribute(XsdAttribute {
        info,
        scope,
        name,
        reference,
        type_name: attrs.qname("type"),
        use_mode,
        value_constraint,
        form: attrs.form("form"),
        annotation,
        simple_type,
    }))
}

fn element(scope: Scope, info: NodeInfo, mut attrs: Attributes, mut children: Children) -> Built {
    let (name, reference) = match scope {
        Scope::Global => (Some(required(attrs.name("name"), "name")?), None),
        Scope::Local => name_or_ref(&mut attrs)?,
    };
    if reference.is_some() {
        check_reference(
            &attrs,
            &["type", "form", "block", "nillable", "default", "fixed"],
        )?;
    }

    let annotation = children.annotation();
    let local_type = match children.0.next_if(|p| {
        matches!(p, Parsed::SimpleType(_) | Parsed::ComplexType(_))
    }) {
        Some(Parsed::SimpleType(t)) => Some(LocalType::SimpleType(Box::new(t))),
        Some(Parsed::ComplexType(t)) => Some(LocalType::ComplexType(Box::new(t))),
        _ => None,
    };
    let mut identities = Vec::new();
    for child in children.0 {
        match child {
            Parsed::Identity(i) => identities.push(i),
            other => return Err(misplaced(&other)),
        }
    }

    if let Some(local_type) = &local_type {
        let tag = match local_type {
            LocalType::SimpleType(_) => "xs:simpleType",
            LocalType::ComplexType(_) => "xs:complexType",
        };
        if reference.is_some() {
            return Err(conflict("ref", tag));
        }
        if attrs.has("type") {
            return Err(conflict("type", tag));
        }
    }
    if reference.is_some() {
        if let Some(identity) = identities.first() {
            return Err(conflict("ref", &format!("xs:{}", identity.kind.tag())));
        }
    }

    Ok(Parsed::Element(XsdElement {
        info,
        scope,
        name,
        reference,
        type_name: attrs.qname("type"),
        substitution_group: attrs.qname("substitutionGroup"),
        value_constraint: value_constraint(&mut attrs)?,
        nillable: attrs.boolean("nillable"),
        is_abstract: attrs.boolean("abstract"),
        final_set: attrs.derivation("final"),
        block_set: attrs.derivation("block"),
        form: attrs.form("form"),
        occurs: occurs(&mut attrs),
        annotation,
        local_type,
        identities,
    }))
}

fn identity(
    kind: IdentityConstraintKind,
    info: NodeInfo,
    mut attrs: Attributes,
    mut children: Children,
) -> Built {
    let annotation = children.annotation();
    let selector = match children.next() {
        Some(Parsed::Selector(s)) => s,
        Some(other) => return Err(misplaced(&other)),
        None => return Err(missing_element("xs:selector")),
    };
    let mut fields = Vec::new();
    for child in children.0 {
        match child {
            Parsed::Field(f) => fields.push(f),
            other => return Err(misplaced(&other)),
        }
    }
    if fields.is_empty() {
        return Err(missing_element("xs:field"));
    }
    Ok(Parsed::Identity(XsdIdentity {
        info,
        kind,
        name: required(attrs.name("name"), "name")?,
        refer: attrs.qname("refer"),
        annotation,
        selector,
        fields,
    }))
}
