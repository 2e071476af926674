//! Attribute reading
//!
//! Checks every attribute of an element against the table of its context,
//! runs the value grammar of each legal attribute and collects the typed
//! results. Namespace declarations are skipped, `id` is accepted
//! everywhere, and attributes qualified with a non-XSD namespace are kept
//! as foreign attributes.

use indexmap::IndexMap;
use num_bigint::BigUint;
use num_traits::One;

use crate::documents::Element;
use crate::error::ParseErrorKind;
use crate::grammar::{attributes::find, AttributeSpec, ParsingContext, ValueKind};
use crate::model::ForeignAttribute;
use crate::names::{is_xml_whitespace, parse_ncname, split_qname};
use crate::namespaces::{NamespaceScopes, QName};
use crate::values::{
    parse_boolean, parse_derivation_set, parse_max_occurs, parse_non_negative_integer,
    parse_positive_integer, parse_token, AttributeUse, DerivationSet, Form, Language,
    MaxOccurs, NamespaceConstraint, ProcessContents, ValueError, WhiteSpace,
};
use crate::xpath::{parse_field, parse_selector, XPathExpr};
use crate::{XML_NAMESPACE, XSD_NAMESPACE};

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Name(String),
    QName(QName),
    QNames(Vec<QName>),
    Text(String),
    Bool(bool),
    Integer(BigUint),
    MaxOccurs(MaxOccurs),
    Derivation(DerivationSet),
    Form(Form),
    Use(AttributeUse),
    ProcessContents(ProcessContents),
    Namespace(NamespaceConstraint),
    Language(Language),
    XPath(XPathExpr),
    WhiteSpace(WhiteSpace),
}

/// The validated attributes of one element
#[derive(Debug, Default)]
pub(crate) struct Attributes {
    pub(crate) id: Option<String>,
    pub(crate) foreign: Vec<ForeignAttribute>,
    values: IndexMap<&'static str, Value>,
}

macro_rules! take {
    ($($method:ident: $variant:ident => $ty:ty,)*) => {
        impl Attributes {
            $(
                pub(crate) fn $method(&mut self, name: &str) -> Option<$ty> {
                    match self.values.shift_remove(name)? {
                        Value::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            )*
        }
    };
}

take! {
    name: Name => String,
    qname: QName => QName,
    qnames: QNames => Vec<QName>,
    text: Text => String,
    boolean: Bool => bool,
    integer: Integer => BigUint,
    max_occurs: MaxOccurs => MaxOccurs,
    derivation: Derivation => DerivationSet,
    form: Form => Form,
    use_mode: Use => AttributeUse,
    process_contents: ProcessContents => ProcessContents,
    namespace: Namespace => NamespaceConstraint,
    language: Language => Language,
    xpath: XPath => XPathExpr,
    white_space: WhiteSpace => WhiteSpace,
}

impl Attributes {
    /// Whether an attribute was specified
    pub(crate) fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Literal names of the specified attributes, in document order
    #[cfg(test)]
    fn names(&self) -> Vec<&'static str> {
        self.values.keys().copied().collect()
    }
}

/// Read and validate the attributes of `element` in `context`
pub(crate) fn read_attributes(
    element: &Element,
    context: ParsingContext,
    scopes: &NamespaceScopes,
) -> Result<Attributes, ParseErrorKind> {
    let specs = context.attributes();
    let mut attributes = Attributes::default();

    for (name, raw) in &element.attributes {
        if name == "xmlns" || name.starts_with("xmlns:") {
            continue;
        }
        match split_qname(name) {
            (None, "id") => {
                let id = parse_ncname(raw).map_err(|e| value_error(name, raw, e))?;
                attributes.id = Some(id);
            }
            (None, local) => {
                let spec = find(specs, local, false).ok_or_else(|| unexpected(name))?;
                let value = parse_value(spec, raw, scopes).map_err(|e| value_error(name, raw, e))?;
                attributes.values.insert(spec.name, value);
            }
            (Some(prefix), local) => {
                let namespace = scopes.resolve_prefix(prefix).ok_or_else(|| {
                    ParseErrorKind::UnresolvableNamespacePrefix {
                        prefix: prefix.to_string(),
                        attribute: None,
                    }
                })?;
                if namespace == XSD_NAMESPACE {
                    return Err(unexpected(name));
                }
                if namespace == XML_NAMESPACE {
                    if let Some(spec) = find(specs, local, true) {
                        let value =
                            parse_value(spec, raw, scopes).map_err(|e| value_error(name, raw, e))?;
                        attributes.values.insert(spec.name, value);
                        continue;
                    }
                }
                attributes.foreign.push(ForeignAttribute {
                    name: QName::namespaced(namespace, local),
                    value: raw.clone(),
                });
            }
        }
    }

    if let Some(spec) = specs
        .iter()
        .find(|s| s.required && !attributes.values.contains_key(s.name))
    {
        return Err(ParseErrorKind::MissingRequiredAttribute {
            attribute: spec.to_string(),
        });
    }

    Ok(attributes)
}

fn unexpected(name: &str) -> ParseErrorKind {
    ParseErrorKind::UnexpectedAttribute {
        attribute: name.to_string(),
    }
}

fn value_error(name: &str, raw: &str, error: ValueError) -> ParseErrorKind {
    match error {
        ValueError::UnboundPrefix(prefix) => ParseErrorKind::UnresolvableNamespacePrefix {
            prefix,
            attribute: Some(name.to_string()),
        },
        ValueError::Invalid(reason) => ParseErrorKind::InvalidAttributeValue {
            attribute: name.to_string(),
            value: raw.to_string(),
            reason,
        },
    }
}

fn parse_value(
    spec: &AttributeSpec,
    raw: &str,
    scopes: &NamespaceScopes,
) -> Result<Value, ValueError> {
    let value = match spec.kind {
        ValueKind::NCName => Value::Name(parse_ncname(raw)?),
        ValueKind::QName => Value::QName(scopes.resolve_qname(raw)?),
        ValueKind::QNameList => Value::QNames(
            raw.split(is_xml_whitespace)
                .filter(|t| !t.is_empty())
                .map(|t| scopes.resolve_qname(t))
                .collect::<Result<_, _>>()?,
        ),
        ValueKind::AnyUri | ValueKind::Token => Value::Text(parse_token(raw)),
        ValueKind::String => Value::Text(raw.to_string()),
        ValueKind::Boolean => Value::Bool(parse_boolean(raw)?),
        ValueKind::NonNegativeInteger => Value::Integer(parse_non_negative_integer(raw)?),
        ValueKind::PositiveInteger => Value::Integer(parse_positive_integer(raw)?),
        ValueKind::MaxOccurs => Value::MaxOccurs(parse_max_occurs(raw)?),
        ValueKind::MinZeroOrOne => {
            let n = parse_non_negative_integer(raw)?;
            if n > BigUint::one() {
                return Err(ValueError::invalid("must be 0 or 1"));
            }
            Value::Integer(n)
        }
        ValueKind::MaxZeroOrOne => {
            let max = parse_max_occurs(raw)?;
            if max.bound().map_or(true, |n| *n > BigUint::one()) {
                return Err(ValueError::invalid("must be 0 or 1"));
            }
            Value::MaxOccurs(max)
        }
        ValueKind::MaxOne => {
            let max = parse_max_occurs(raw)?;
            if max != MaxOccurs::one() {
                return Err(ValueError::invalid("must be 1"));
            }
            Value::MaxOccurs(max)
        }
        ValueKind::Derivation(allowed) => Value::Derivation(parse_derivation_set(raw, allowed)?),
        ValueKind::Form => Value::Form(Form::parse(raw)?),
        ValueKind::Use => Value::Use(AttributeUse::parse(raw)?),
        ValueKind::ProcessContents => Value::ProcessContents(ProcessContents::parse(raw)?),
        ValueKind::NamespaceConstraint => Value::Namespace(NamespaceConstraint::parse(raw)?),
        ValueKind::Language => Value::Language(Language::parse(raw)?),
        ValueKind::SelectorXPath => Value::XPath(parse_selector(raw, scopes)?),
        ValueKind::FieldXPath => Value::XPath(parse_field(raw, scopes)?),
        ValueKind::WhiteSpace => Value::WhiteSpace(WhiteSpace::parse(raw)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::NamespaceDeclarations;

    fn scopes() -> NamespaceScopes {
        let mut scopes = NamespaceScopes::new();
        let mut decls = NamespaceDeclarations::new();
        decls.add_prefix("xs", XSD_NAMESPACE);
        decls.add_prefix("ex", "http://example.org/ex");
        let _ = scopes.push(decls);
        scopes
    }

    fn read(context: ParsingContext, attrs: &[(&str, &str)]) -> Result<Attributes, ParseErrorKind> {
        let mut element = Element::new(format!("xs:{}", context.tag()));
        for (name, value) in attrs {
            element = element.with_attribute(*name, *value);
        }
        read_attributes(&element, context, &scopes())
    }

    #[test]
    fn test_typed_values() {
        let mut attrs = read(
            ParsingContext::NarrowElement,
            &[("name", " f00 "), ("minOccurs", "+00"), ("maxOccurs", "unbounded"), ("type", "ex:T")],
        )
        .unwrap();
        assert_eq!(attrs.names(), ["name", "minOccurs", "maxOccurs", "type"]);
        assert_eq!(attrs.name("name").as_deref(), Some("f00"));
        assert_eq!(attrs.integer("minOccurs"), Some(BigUint::from(0u32)));
        assert_eq!(attrs.max_occurs("maxOccurs"), Some(MaxOccurs::Unbounded));
        assert_eq!(
            attrs.qname("type"),
            Some(QName::namespaced("http://example.org/ex", "T"))
        );
        assert!(!attrs.has("type"));
    }

    #[test]
    fn test_id_and_foreign_attributes() {
        let attrs = read(
            ParsingContext::Annotation,
            &[("id", "a1"), ("ex:note", "kept"), ("xmlns:y", "urn:y")],
        )
        .unwrap();
        assert_eq!(attrs.id.as_deref(), Some("a1"));
        assert_eq!(attrs.foreign.len(), 1);
        assert_eq!(attrs.foreign[0].name, QName::namespaced("http://example.org/ex", "note"));
        assert_eq!(attrs.foreign[0].value, "kept");
    }

    #[test]
    fn test_rejections() {
        let err = read(ParsingContext::Annotation, &[("name", "x")]).unwrap_err();
        assert_eq!(err, ParseErrorKind::UnexpectedAttribute { attribute: "name".to_string() });

        let err = read(ParsingContext::Annotation, &[("xs:name", "x")]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::UnexpectedAttribute { .. }));

        let err = read(ParsingContext::Annotation, &[("zz:name", "x")]).unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::UnresolvableNamespacePrefix { prefix: "zz".to_string(), attribute: None }
        );

        let err = read(ParsingContext::KeyRef, &[("name", "k")]).unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::MissingRequiredAttribute { attribute: "refer".to_string() }
        );

        let err = read(ParsingContext::GroupRef, &[("ref", "zz:g")]).unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::UnresolvableNamespacePrefix {
                prefix: "zz".to_string(),
                attribute: Some("ref".to_string())
            }
        );
    }

    #[test]
    fn test_invalid_value_keeps_literal() {
        let err = read(ParsingContext::All, &[("minOccurs", " 2 ")]).unwrap_err();
        match err {
            ParseErrorKind::InvalidAttributeValue { attribute, value, .. } => {
                assert_eq!(attribute, "minOccurs");
                assert_eq!(value, " 2 ");
            }
            other => panic!("{:?}", other),
        }
        assert!(read(ParsingContext::All, &[("maxOccurs", "unbounded")]).is_err());
        assert!(read(ParsingContext::NarrowMaxMinElement, &[("name", "a"), ("maxOccurs", "0")]).is_ok());
    }

    #[test]
    fn test_string_values_are_verbatim() {
        let mut attrs = read(
            ParsingContext::TopLevelAttribute,
            &[("name", "a"), ("default", "  two  words ")],
        )
        .unwrap();
        assert_eq!(attrs.text("default").as_deref(), Some("  two  words "));
    }

    #[test]
    fn test_xml_lang() {
        let mut attrs = read(ParsingContext::Documentation, &[("xml:lang", " en-GB ")]).unwrap();
        assert_eq!(attrs.language("lang").map(|l| l.to_string()).as_deref(), Some("en-GB"));
    }

    #[test]
    fn test_empty_member_types() {
        let mut attrs = read(ParsingContext::Union, &[("memberTypes", "  ")]).unwrap();
        assert_eq!(attrs.qnames("memberTypes"), Some(vec![]));
    }
}
