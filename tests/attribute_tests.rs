//! Documents that specify one optional attribute at a time
//!
//! Each case parses a node with a single optional attribute on top of its
//! required ones and compares the whole node against the bare node with just
//! that field set, so every other optional attribute must come out absent.

use num_bigint::BigUint;
use pretty_assertions::assert_eq;

use xmlschema_parser::model::*;
use xmlschema_parser::values::{
    AttributeUse, DerivationSet, Form, MaxOccurs, NamespaceConstraint, NamespaceItem,
    ProcessContents, WhiteSpace,
};
use xmlschema_parser::{QName, XsdSchema, XSD_NAMESPACE};

const XS: &str = r#"xmlns:xs="http://www.w3.org/2001/XMLSchema""#;

fn parse(body: &str) -> XsdSchema {
    let xml = format!(r#"<xs:schema {XS} xmlns:p="urn:p">{body}</xs:schema>"#);
    match XsdSchema::from_string(&xml) {
        Ok(schema) => schema,
        Err(error) => panic!("{body}: {error}"),
    }
}

fn xs(local: &str) -> QName {
    QName::namespaced(XSD_NAMESPACE, local)
}

fn integer(n: u32) -> BigUint {
    BigUint::from(n)
}

/// Compare each single-attribute node against the bare node with one change
fn check_cases<T>(parse_node: impl Fn(&str) -> T, cases: &[(&str, fn(&mut T))])
where
    T: Clone + PartialEq + std::fmt::Debug,
{
    let bare = parse_node("");
    for &(attribute, set) in cases {
        let mut expected = bare.clone();
        set(&mut expected);
        assert_eq!(parse_node(attribute), expected, "only {attribute}");
    }
}

fn top_level_element(attribute: &str) -> XsdElement {
    parse(&format!(r#"<xs:element name="e" {attribute}/>"#)).elements()[0].clone()
}

fn local_element(attribute: &str) -> XsdElement {
    let schema = parse(&format!(
        r#"<xs:complexType name="T">
             <xs:sequence><xs:element {attribute}/></xs:sequence>
           </xs:complexType>"#
    ));
    match schema.complex_types()[0].content_model().and_then(|m| m.group.as_ref()) {
        Some(ModelGroup::Sequence(sequence)) => sequence.elements()[0].clone(),
        other => panic!("expected a sequence, got {other:?}"),
    }
}

fn local_attribute(attribute: &str) -> XsdAttribute {
    let schema = parse(&format!(
        r#"<xs:complexType name="T"><xs:attribute {attribute}/></xs:complexType>"#
    ));
    schema.complex_types()[0]
        .content_model()
        .unwrap()
        .attributes
        .attributes()[0]
        .clone()
}

// ============================================================================
// Elements
// ============================================================================

#[test]
fn test_bare_top_level_element() {
    let element = top_level_element("");
    assert_eq!(element.name.as_deref(), Some("e"));
    assert_eq!(element.scope, Scope::Global);
    assert!(element.reference.is_none());
    assert!(element.type_name.is_none());
    assert!(element.substitution_group.is_none());
    assert!(element.value_constraint.is_none());
    assert!(element.nillable.is_none());
    assert!(element.is_abstract.is_none());
    assert!(element.final_set.is_none());
    assert!(element.block_set.is_none());
    assert!(element.form.is_none());
    assert!(element.occurs.min_occurs.is_none());
    assert!(element.occurs.max_occurs.is_none());
    assert!(element.info.id.is_none());
    assert!(element.annotation.is_none());
    assert!(element.local_type.is_none());
    assert!(element.identities.is_empty());
}

#[test]
fn test_top_level_element_single_attribute() {
    let cases: &[(&str, fn(&mut XsdElement))] = &[
        (r#"type="xs:string""#, |e| e.type_name = Some(xs("string"))),
        (r#"substitutionGroup="p:head""#, |e| {
            e.substitution_group = Some(QName::namespaced("urn:p", "head"))
        }),
        (r#"default=" 1 ""#, |e| {
            e.value_constraint = Some(ValueConstraint::Default(" 1 ".to_string()))
        }),
        (r#"fixed="x""#, |e| {
            e.value_constraint = Some(ValueConstraint::Fixed("x".to_string()))
        }),
        (r#"nillable="1""#, |e| e.nillable = Some(true)),
        (r#"abstract="false""#, |e| e.is_abstract = Some(false)),
        (r#"final="extension""#, |e| {
            e.final_set = Some(DerivationSet {
                extension: true,
                ..Default::default()
            })
        }),
        (r#"block="substitution""#, |e| {
            e.block_set = Some(DerivationSet {
                substitution: true,
                ..Default::default()
            })
        }),
        (r#"id="e1""#, |e| e.info.id = Some("e1".to_string())),
    ];
    check_cases(top_level_element, cases);
}

#[test]
fn test_local_element_single_attribute() {
    let bare = local_element(r#"name="a""#);
    assert_eq!(bare.scope, Scope::Local);
    assert!(bare.reference.is_none());
    assert!(bare.occurs.min_occurs.is_none());
    assert!(bare.occurs.max_occurs.is_none());
    assert!(bare.block_set.is_none());
    assert!(bare.form.is_none());

    let cases: &[(&str, fn(&mut XsdElement))] = &[
        (r#"type="p:T""#, |e| {
            e.type_name = Some(QName::namespaced("urn:p", "T"))
        }),
        (r#"minOccurs="+00""#, |e| e.occurs.min_occurs = Some(integer(0))),
        (r#"maxOccurs="unbounded""#, |e| {
            e.occurs.max_occurs = Some(MaxOccurs::Unbounded)
        }),
        (r#"maxOccurs=" 0010 ""#, |e| {
            e.occurs.max_occurs = Some(MaxOccurs::Bounded(integer(10)))
        }),
        (r#"default="""#, |e| {
            e.value_constraint = Some(ValueConstraint::Default(String::new()))
        }),
        (r#"fixed="f""#, |e| {
            e.value_constraint = Some(ValueConstraint::Fixed("f".to_string()))
        }),
        (r#"nillable="true""#, |e| e.nillable = Some(true)),
        (r#"block="restriction extension""#, |e| {
            e.block_set = Some(DerivationSet {
                extension: true,
                restriction: true,
                ..Default::default()
            })
        }),
        (r#"form="unqualified""#, |e| e.form = Some(Form::Unqualified)),
    ];
    check_cases(|attribute| local_element(&format!(r#"name="a" {attribute}"#)), cases);
}

#[test]
fn test_element_reference_alone() {
    let element = local_element(r#"ref="p:a""#);
    assert_eq!(element.reference, Some(QName::namespaced("urn:p", "a")));
    assert!(element.name.is_none());
    assert!(element.type_name.is_none());
    assert!(element.value_constraint.is_none());
    assert!(element.nillable.is_none());
    assert!(element.block_set.is_none());
    assert!(element.form.is_none());
    assert!(element.occurs.min_occurs.is_none());
    assert!(element.occurs.max_occurs.is_none());
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_local_attribute_single_attribute() {
    let bare = local_attribute(r#"name="a""#);
    assert_eq!(bare.scope, Scope::Local);
    assert!(bare.reference.is_none());
    assert!(bare.type_name.is_none());
    assert!(bare.use_mode.is_none());
    assert_eq!(bare.use_or_default(), AttributeUse::Optional);
    assert!(bare.value_constraint.is_none());
    assert!(bare.form.is_none());
    assert!(bare.simple_type.is_none());

    let cases: &[(&str, fn(&mut XsdAttribute))] = &[
        (r#"type="xs:int""#, |a| a.type_name = Some(xs("int"))),
        (r#"use="required""#, |a| a.use_mode = Some(AttributeUse::Required)),
        (r#"use=" prohibited ""#, |a| {
            a.use_mode = Some(AttributeUse::Prohibited)
        }),
        (r#"default="  d  ""#, |a| {
            a.value_constraint = Some(ValueConstraint::Default("  d  ".to_string()))
        }),
        (r#"fixed="f""#, |a| {
            a.value_constraint = Some(ValueConstraint::Fixed("f".to_string()))
        }),
        (r#"form="qualified""#, |a| a.form = Some(Form::Qualified)),
    ];
    check_cases(|attribute| local_attribute(&format!(r#"name="a" {attribute}"#)), cases);
}

#[test]
fn test_attribute_reference_alone() {
    let attribute = local_attribute(r#"ref="xml:lang""#);
    assert_eq!(
        attribute.reference,
        Some(QName::namespaced(xmlschema_parser::XML_NAMESPACE, "lang"))
    );
    assert!(attribute.name.is_none());
    assert!(attribute.type_name.is_none());
    assert!(attribute.use_mode.is_none());
    assert!(attribute.value_constraint.is_none());
    assert!(attribute.form.is_none());
}

// ============================================================================
// Complex types
// ============================================================================

#[test]
fn test_complex_type_single_attribute() {
    let complex = |attribute: &str| {
        parse(&format!(r#"<xs:complexType name="T" {attribute}/>"#)).complex_types()[0].clone()
    };

    let bare = complex("");
    assert!(bare.mixed.is_none());
    assert!(bare.is_abstract.is_none());
    assert!(bare.final_set.is_none());
    assert!(bare.block_set.is_none());
    assert!(bare.annotation.is_none());
    assert!(bare.content_model().is_some_and(|m| m.group.is_none()));

    let cases: &[(&str, fn(&mut XsdComplexType))] = &[
        (r#"mixed="true""#, |c| c.mixed = Some(true)),
        (r#"abstract="0""#, |c| c.is_abstract = Some(false)),
        (r#"final="restriction""#, |c| {
            c.final_set = Some(DerivationSet {
                restriction: true,
                ..Default::default()
            })
        }),
        (r#"block="""#, |c| c.block_set = Some(DerivationSet::default())),
    ];
    check_cases(complex, cases);
}

// ============================================================================
// Wildcards
// ============================================================================

#[test]
fn test_any_single_attribute() {
    let any = |attribute: &str| {
        let schema = parse(&format!(
            r#"<xs:complexType name="T">
                 <xs:sequence><xs:any {attribute}/></xs:sequence>
               </xs:complexType>"#
        ));
        match schema.complex_types()[0].content_model().and_then(|m| m.group.as_ref()) {
            Some(ModelGroup::Sequence(sequence)) => sequence.anys()[0].clone(),
            other => panic!("expected a sequence, got {other:?}"),
        }
    };

    let bare = any("");
    assert!(bare.occurs.min_occurs.is_none());
    assert!(bare.occurs.max_occurs.is_none());
    assert!(bare.namespace.is_none());
    assert!(bare.process_contents.is_none());

    let cases: &[(&str, fn(&mut XsdAny))] = &[
        (r#"minOccurs="2""#, |w| w.occurs.min_occurs = Some(integer(2))),
        (r#"maxOccurs="unbounded""#, |w| {
            w.occurs.max_occurs = Some(MaxOccurs::Unbounded)
        }),
        (r###"namespace="##other""###, |w| {
            w.namespace = Some(NamespaceConstraint::Other)
        }),
        (r#"processContents="lax""#, |w| {
            w.process_contents = Some(ProcessContents::Lax)
        }),
    ];
    check_cases(any, cases);
}

#[test]
fn test_any_attribute_single_attribute() {
    let any_attribute = |attribute: &str| {
        let schema = parse(&format!(
            r#"<xs:complexType name="T"><xs:anyAttribute {attribute}/></xs:complexType>"#
        ));
        schema.complex_types()[0]
            .content_model()
            .and_then(|m| m.attributes.any_attribute.clone())
            .unwrap()
    };

    let bare = any_attribute("");
    assert!(bare.namespace.is_none());
    assert!(bare.process_contents.is_none());

    let cases: &[(&str, fn(&mut XsdAnyAttribute))] = &[
        (r###"namespace="##local urn:a""###, |w| {
            w.namespace = Some(NamespaceConstraint::List(vec![
                NamespaceItem::Local,
                NamespaceItem::Uri("urn:a".to_string()),
            ]))
        }),
        (r#"processContents="skip""#, |w| {
            w.process_contents = Some(ProcessContents::Skip)
        }),
    ];
    check_cases(any_attribute, cases);
}

// ============================================================================
// Facets
// ============================================================================

fn facet(tag: &str, attributes: &str) -> XsdFacet {
    let schema = parse(&format!(
        r#"<xs:simpleType name="S">
             <xs:restriction base="xs:string"><xs:{tag} {attributes}/></xs:restriction>
           </xs:simpleType>"#
    ));
    schema.simple_types()[0].restriction().unwrap().facets[0].clone()
}

#[test]
fn test_facets_value_alone_and_with_fixed() {
    let cases = [
        ("minExclusive", FacetKind::MinExclusive, "1", FacetValue::Literal("1".to_string())),
        ("minInclusive", FacetKind::MinInclusive, "a", FacetValue::Literal("a".to_string())),
        ("maxExclusive", FacetKind::MaxExclusive, " 9", FacetValue::Literal(" 9".to_string())),
        ("maxInclusive", FacetKind::MaxInclusive, "9", FacetValue::Literal("9".to_string())),
        ("totalDigits", FacetKind::TotalDigits, "+05", FacetValue::Integer(integer(5))),
        ("fractionDigits", FacetKind::FractionDigits, "0", FacetValue::Integer(integer(0))),
        ("length", FacetKind::Length, " 3 ", FacetValue::Integer(integer(3))),
        ("minLength", FacetKind::MinLength, "1", FacetValue::Integer(integer(1))),
        ("maxLength", FacetKind::MaxLength, "10", FacetValue::Integer(integer(10))),
        ("whiteSpace", FacetKind::WhiteSpace, "collapse", FacetValue::WhiteSpace(WhiteSpace::Collapse)),
    ];

    for (tag, kind, raw, value) in cases {
        let alone = facet(tag, &format!(r#"value="{raw}""#));
        assert_eq!(alone.kind, kind, "{tag}");
        assert_eq!(alone.value, value, "{tag}");
        assert!(alone.fixed.is_none(), "{tag}");
        assert!(alone.info.id.is_none(), "{tag}");
        assert!(alone.annotation.is_none(), "{tag}");

        let fixed = facet(tag, &format!(r#"value="{raw}" fixed="true""#));
        let mut expected = alone.clone();
        expected.fixed = Some(true);
        assert_eq!(fixed, expected, "{tag}");
    }
}

#[test]
fn test_pattern_and_enumeration_value_alone() {
    let pattern = facet("pattern", r#"value="[a-z]+""#);
    assert_eq!(pattern.kind, FacetKind::Pattern);
    assert_eq!(pattern.value, FacetValue::Literal("[a-z]+".to_string()));
    assert!(pattern.fixed.is_none());

    let enumeration = facet("enumeration", r#"value=" red ""#);
    assert_eq!(enumeration.kind, FacetKind::Enumeration);
    assert_eq!(enumeration.value, FacetValue::Literal(" red ".to_string()));
    assert!(enumeration.fixed.is_none());
}

// ============================================================================
// #all
// ============================================================================

#[test]
fn test_element_block_and_final_all() {
    let element = top_level_element(r##"block="#all" final=" #all ""##);
    assert_eq!(
        element.block_set,
        Some(DerivationSet {
            extension: true,
            restriction: true,
            substitution: true,
            ..Default::default()
        })
    );
    assert_eq!(
        element.final_set,
        Some(DerivationSet {
            extension: true,
            restriction: true,
            ..Default::default()
        })
    );

    let local = local_element(r##"name="a" block="#all""##);
    assert_eq!(local.block_set, element.block_set);
}

#[test]
fn test_complex_and_simple_type_all() {
    let schema = parse(
        r##"<xs:complexType name="T" block="#all" final="#all"/>
            <xs:simpleType name="S" final="#all">
              <xs:restriction base="xs:string"/>
            </xs:simpleType>"##,
    );

    let extension_and_restriction = Some(DerivationSet {
        extension: true,
        restriction: true,
        ..Default::default()
    });
    let complex = schema.complex_type("T").unwrap();
    assert_eq!(complex.block_set, extension_and_restriction);
    assert_eq!(complex.final_set, extension_and_restriction);

    assert_eq!(
        schema.simple_type("S").unwrap().final_set,
        Some(DerivationSet {
            restriction: true,
            list: true,
            union: true,
            ..Default::default()
        })
    );
}

#[test]
fn test_schema_defaults_all() {
    let xml = format!(r##"<xs:schema {XS} blockDefault="#all" finalDefault="#all"/>"##);
    let schema = XsdSchema::from_string(&xml).unwrap();
    assert_eq!(
        schema.block_default,
        Some(DerivationSet {
            extension: true,
            restriction: true,
            substitution: true,
            ..Default::default()
        })
    );
    assert_eq!(
        schema.final_default,
        Some(DerivationSet {
            extension: true,
            restriction: true,
            list: true,
            union: true,
            ..Default::default()
        })
    );
}
