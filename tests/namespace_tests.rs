//! Namespace scoping and lexical value properties

use num_bigint::BigUint;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use xmlschema_parser::model::{ModelGroup, XsdElement, XsdSchema};
use xmlschema_parser::{QName, XSD_NAMESPACE};

fn parse(xml: &str) -> XsdSchema {
    XsdSchema::from_string(xml).unwrap()
}

fn first_local_element(schema: &XsdSchema) -> &XsdElement {
    let complex = schema.complex_types()[0];
    match complex.content_model().and_then(|m| m.group.as_ref()) {
        Some(ModelGroup::Sequence(sequence)) => sequence.elements()[0],
        other => panic!("expected a sequence, got {other:?}"),
    }
}

#[test]
fn test_default_namespace_applies_to_qname_values() {
    let schema = parse(&format!(
        r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}" xmlns="urn:default">
             <xs:element name="a" type="T"/>
             <xs:element name="b" type="T" xmlns=""/>
           </xs:schema>"#
    ));

    let elements = schema.elements();
    assert_eq!(elements[0].type_name, Some(QName::namespaced("urn:default", "T")));
    assert_eq!(elements[1].type_name, Some(QName::local("T")));
    assert_eq!(elements[1].info.namespace_declarations.get_default_namespace(), Some(""));
}

#[test]
fn test_innermost_binding_wins() {
    let schema = parse(&format!(
        r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}" xmlns:p="urn:outer">
             <xs:complexType name="t" xmlns:p="urn:inner">
               <xs:sequence>
                 <xs:element name="a" type="p:T"/>
               </xs:sequence>
               <xs:attribute name="x" type="p:T"/>
             </xs:complexType>
             <xs:element name="b" type="p:T"/>
           </xs:schema>"#
    ));

    assert_eq!(
        first_local_element(&schema).type_name,
        Some(QName::namespaced("urn:inner", "T"))
    );
    let attribute = schema.complex_types()[0]
        .content_model()
        .unwrap()
        .attributes
        .attributes()[0];
    assert_eq!(attribute.type_name, Some(QName::namespaced("urn:inner", "T")));
    assert_eq!(
        schema.element("b").unwrap().type_name,
        Some(QName::namespaced("urn:outer", "T"))
    );
}

#[test]
fn test_any_prefix_for_xsd_elements() {
    let schema = parse(&format!(
        r#"<x:schema xmlns:x="{XSD_NAMESPACE}">
             <x:element name="a"/>
             <schema:element xmlns:schema="{XSD_NAMESPACE}" name="b"/>
             <element xmlns="{XSD_NAMESPACE}" name="c" type="string"/>
           </x:schema>"#
    ));

    assert_eq!(schema.elements().len(), 3);
    assert_eq!(
        schema.element("c").unwrap().type_name,
        Some(QName::namespaced(XSD_NAMESPACE, "string"))
    );
}

#[test]
fn test_xml_prefix_is_always_bound() {
    let schema = parse(&format!(
        r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}">
             <xs:element name="a" type="xml:lang"/>
           </xs:schema>"#
    ));
    assert_eq!(
        schema.element("a").unwrap().type_name,
        Some(QName::namespaced(xmlschema_parser::XML_NAMESPACE, "lang"))
    );
}

#[test]
fn test_declarations_kept_where_written() {
    let schema = parse(&format!(
        r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}">
             <xs:element name="a" xmlns:p="urn:p" xmlns:q="urn:q"/>
           </xs:schema>"#
    ));

    let element = schema.element("a").unwrap();
    let declarations: Vec<_> = element.info.namespace_declarations.iter().collect();
    assert_eq!(declarations, [("p", "urn:p"), ("q", "urn:q")]);
    assert_eq!(schema.info.namespace_declarations.len(), 1);
}

proptest! {
    #[test]
    fn prop_declared_prefix_resolves(prefix in "[a-w][a-z0-9]{0,6}", uri in "urn:[a-z]{1,12}") {
        let schema = parse(&format!(
            r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}">
                 <xs:element name="e" xmlns:{prefix}="{uri}" type="{prefix}:T"/>
               </xs:schema>"#
        ));
        let element = schema.element("e").unwrap();
        prop_assert_eq!(element.type_name.clone(), Some(QName::namespaced(uri.as_str(), "T")));
    }

    #[test]
    fn prop_nested_rebinding(uris in prop::collection::vec("urn:[a-z]{1,8}", 1..6)) {
        // Each nesting level rebinds `p`; the innermost element sees the last binding
        let mut body = String::from(r#"<xs:element name="leaf" type="p:T"/>"#);
        for (depth, uri) in uris.iter().enumerate().rev() {
            body = format!(
                r#"<xs:sequence xmlns:p="{uri}" minOccurs="{depth}">{body}</xs:sequence>"#
            );
        }
        let schema = parse(&format!(
            r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}"><xs:complexType name="t">{body}</xs:complexType></xs:schema>"#
        ));

        let complex = schema.complex_types()[0];
        let mut group = match complex.content_model().and_then(|m| m.group.as_ref()) {
            Some(ModelGroup::Sequence(sequence)) => sequence,
            other => panic!("expected a sequence, got {other:?}"),
        };
        while let Some(inner) = group.sequences().first().copied() {
            group = inner;
        }
        let leaf = group.elements()[0];
        let innermost = uris.last().unwrap();
        prop_assert_eq!(leaf.type_name.clone(), Some(QName::namespaced(innermost.as_str(), "T")));
    }

    #[test]
    fn prop_occurs_are_arbitrary_precision(digits in "[0-9]{1,40}") {
        let schema = parse(&format!(
            r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}">
                 <xs:complexType name="t">
                   <xs:sequence><xs:element name="e" minOccurs="{digits}" maxOccurs="{digits}"/></xs:sequence>
                 </xs:complexType>
               </xs:schema>"#
        ));
        let expected = BigUint::parse_bytes(digits.as_bytes(), 10).unwrap();
        let element = first_local_element(&schema);
        prop_assert_eq!(element.occurs.min(), expected.clone());
        prop_assert_eq!(element.occurs.max().bound().cloned(), Some(expected));
    }

    #[test]
    fn prop_boolean_lexical_forms(
        (literal, expected) in prop_oneof![
            Just(("true", true)),
            Just(("1", true)),
            Just(("false", false)),
            Just(("0", false)),
        ],
        pad in "[ \t\n]{0,3}",
    ) {
        let schema = parse(&format!(
            r#"<xs:schema xmlns:xs="{XSD_NAMESPACE}">
                 <xs:element name="e" nillable="{pad}{literal}{pad}"/>
               </xs:schema>"#
        ));
        prop_assert_eq!(schema.element("e").unwrap().nillable, Some(expected));
    }
}
