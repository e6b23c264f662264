use pretty_assertions::assert_eq;

use super::*;

#[test]
fn primitive_host_names_round_trip() {
    for name in ["string", "int", "int64", "uint16", "byte", "bool", "error"] {
        let kind = PrimitiveKind::from_host_name(name).unwrap();
        assert_eq!(kind.host_name(), name);
    }
    assert_eq!(PrimitiveKind::from_host_name("uint8"), Some(PrimitiveKind::Byte));
    assert_eq!(PrimitiveKind::from_host_name("float64"), None);
}

#[test]
fn field_visibility_follows_identifier() {
    assert!(FieldShape::new("Scheme", TypeShape::string()).is_exported());
    assert!(!FieldShape::new("scheme", TypeShape::string()).is_exported());
    assert!(!FieldShape::new("_", TypeShape::string()).is_exported());
}

#[test]
fn shapes_decode_from_manifest_json() {
    let json = r#"{
        "kind": "pointer",
        "of": {
            "kind": "struct",
            "of": [
                { "name": "Host", "visibility": "exported", "shape": { "kind": "primitive", "of": "string" } },
                { "name": "Ports", "visibility": "exported", "shape": { "kind": "sequence", "of": { "kind": "primitive", "of": "uint16" } } },
                { "name": "User", "visibility": "exported", "shape": { "kind": "named", "of": "net/url.Userinfo" } },
                { "name": "hook", "visibility": "private", "shape": { "kind": "unsupported", "of": "func()" } }
            ]
        }
    }"#;
    let shape: TypeShape = serde_json::from_str(json).unwrap();
    let expected = TypeShape::pointer(TypeShape::Struct(vec![
        FieldShape::new("Host", TypeShape::string()),
        FieldShape::new(
            "Ports",
            TypeShape::sequence(TypeShape::Primitive(PrimitiveKind::Integer(IntKind::Uint16))),
        ),
        FieldShape::new(
            "User",
            TypeShape::named(QualifiedName::new("net/url", "Userinfo")),
        ),
        FieldShape::new("hook", TypeShape::unsupported("func()")),
    ]));
    assert_eq!(shape, expected);
}

#[test]
fn unknown_primitive_is_a_decode_error() {
    let json = r#"{ "kind": "primitive", "of": "complex128" }"#;
    assert!(serde_json::from_str::<TypeShape>(json).is_err());
}
