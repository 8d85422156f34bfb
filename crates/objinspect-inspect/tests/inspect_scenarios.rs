//! End-to-end inspection of hand-built reflection objects.

use std::sync::Arc;

use objinspect_core::{
    Annotation, Callable, ClassObject, DefaultValue, Inspected, Member, MethodBinding, ModuleObject,
    Object, ParameterKind, PropertyObject, RawParameter, TypeExpr, Value,
};
use objinspect_inspect::{Inspector, MemberFilter, inspect};
use pretty_assertions::assert_eq;

fn pow() -> Arc<Callable> {
    Callable::builder("pow")
        .doc("Return x**y.")
        .param(RawParameter::new("x", ParameterKind::PositionalOnly))
        .param(RawParameter::new("y", ParameterKind::PositionalOnly))
        .body(|bound| match (bound.get("x"), bound.get("y")) {
            (Some(Value::Int(x)), Some(Value::Int(y))) => u32::try_from(*y)
                .map(|y| Value::Int(x.pow(y)))
                .map_err(|_| "negative exponent".to_string()),
            _ => Err("expected integers".to_string()),
        })
        .build()
}

fn instance_method(name: &str, doc: &str) -> Arc<Callable> {
    Callable::builder(name)
        .doc(doc)
        .param(RawParameter::new("self", ParameterKind::PositionalOrKeyword))
        .build()
}

/// `Base` defines `m` and `base_only`; `Derived` overrides `m`.
fn hierarchy() -> (Arc<ClassObject>, Arc<ClassObject>) {
    let base = ClassObject::builder("Base")
        .doc("The base.")
        .method(instance_method("m", "Base version."))
        .method(instance_method("base_only", "Only on the base."))
        .build();
    let derived = ClassObject::builder("Derived")
        .base(Arc::clone(&base))
        .method(
            Callable::builder("__init__")
                .param(RawParameter::new("self", ParameterKind::PositionalOrKeyword))
                .param(RawParameter::new("a", ParameterKind::PositionalOrKeyword))
                .param(RawParameter::new("b", ParameterKind::PositionalOrKeyword).with_default(5_i64))
                .build(),
        )
        .method(instance_method("m", "Derived version."))
        .static_method(
            Callable::builder("create")
                .param(RawParameter::new("size", ParameterKind::PositionalOrKeyword))
                .build(),
        )
        .class_method(
            Callable::builder("named")
                .param(RawParameter::new("cls", ParameterKind::PositionalOrKeyword))
                .param(RawParameter::new("name", ParameterKind::PositionalOrKeyword))
                .build(),
        )
        .property(
            "area",
            PropertyObject::read_only(
                Callable::builder("area")
                    .doc("Covered area.")
                    .param(RawParameter::new("self", ParameterKind::PositionalOrKeyword))
                    .returns(TypeExpr::name("float"))
                    .build(),
            ),
        )
        .method(instance_method("_helper", "Protected."))
        .attribute("LIMIT", 10_i64)
        .build();
    (base, derived)
}

#[test]
fn pow_has_two_positional_only_parameters() {
    let function = Inspector::new().function(&pow()).unwrap();
    assert_eq!(function.name, "pow");
    assert_eq!(function.parameters.len(), 2);
    for param in &function.parameters {
        assert_eq!(param.kind, ParameterKind::PositionalOnly);
        assert_eq!(param.default, DefaultValue::NoDefault);
        assert_eq!(param.ty, Annotation::Unresolved);
    }
    assert_eq!(function.description.as_deref(), Some("Return x**y."));
    assert_eq!(
        function.call(vec![Value::Int(2), Value::Int(10)], vec![]).unwrap(),
        Value::Int(1024)
    );
}

#[test]
fn constructor_drops_instance_parameter() {
    let (_, derived) = hierarchy();
    let class = Inspector::new()
        .class(&derived, &MemberFilter::default())
        .unwrap();

    let init = class.init_method().expect("constructor listed");
    assert!(init.is_constructor);
    let params = class.init_args().unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "a");
    assert_eq!(params[0].default, DefaultValue::NoDefault);
    assert_eq!(params[1].name, "b");
    assert_eq!(params[1].default, DefaultValue::Value(Value::Int(5)));
    assert!(params.iter().all(|p| p.kind == ParameterKind::PositionalOrKeyword));
}

#[test]
fn overridden_member_appears_once_as_derived_definition() {
    let (_, derived) = hierarchy();
    let class = Inspector::new()
        .class(&derived, &MemberFilter::default())
        .unwrap();

    let ms: Vec<&Member> = class.members.iter().filter(|m| m.name() == "m").collect();
    assert_eq!(ms.len(), 1);
    assert_eq!(ms[0].owner(), "Derived");
    assert_eq!(ms[0].description(), Some("Derived version."));
    assert!(!ms[0].is_inherited());

    let base_only = class.get("base_only").expect("inherited member listed");
    assert!(base_only.is_inherited());
    assert_eq!(base_only.owner(), "Base");
}

#[test]
fn inheritance_off_lists_only_own_members() {
    let (_, derived) = hierarchy();
    let filter = MemberFilter::default().with_inherited(false);
    let class = Inspector::new().class(&derived, &filter).unwrap();
    assert!(class.get("base_only").is_none());
    assert!(!class.include_inherited);
    assert!(class.members.iter().all(|m| !m.is_inherited()));
}

#[test]
fn members_follow_constructor_then_resolution_order() {
    let (_, derived) = hierarchy();
    let class = Inspector::new()
        .class(&derived, &MemberFilter::default())
        .unwrap();
    assert_eq!(
        class.member_names(),
        ["__init__", "m", "create", "named", "area", "base_only"]
    );
    assert_eq!(class.mro, ["Derived", "Base"]);
    assert_eq!(class.description, None);
}

#[test]
fn binding_kinds_and_property_types() {
    let (_, derived) = hierarchy();
    let class = Inspector::new()
        .class(&derived, &MemberFilter::default())
        .unwrap();

    let create = class.get("create").and_then(Member::as_method).unwrap();
    assert!(create.is_static());
    assert_eq!(create.parameters.len(), 1);

    let named = class.get("named").and_then(Member::as_method).unwrap();
    assert_eq!(named.binding, MethodBinding::Class);
    assert_eq!(named.parameters[0].name, "name");

    let area = class.properties().next().unwrap();
    assert_eq!(area.ty, Annotation::Type(TypeExpr::name("float")));
    assert_eq!(area.description.as_deref(), Some("Covered area."));
    assert!(!area.writable);
}

#[test]
fn filter_opt_ins() {
    let (_, derived) = hierarchy();
    let filter = MemberFilter {
        protected: true,
        init: false,
        static_methods: false,
        properties: false,
        ..MemberFilter::default()
    };
    let class = Inspector::new().class(&derived, &filter).unwrap();
    assert_eq!(class.member_names(), ["m", "named", "_helper", "base_only"]);
    assert!(!class.has_init());
}

#[test]
fn dispatch_by_object_kind() {
    let (_, derived) = hierarchy();
    let filter = MemberFilter::default();

    let function = inspect(&Object::Callable(pow()), &filter).unwrap();
    assert!(matches!(function, Inspected::Function(_)));

    let member = Object::Member {
        class: Arc::clone(&derived),
        name: "base_only".into(),
    };
    match inspect(&member, &filter).unwrap() {
        Inspected::Method(method) => {
            assert!(method.is_inherited);
            assert_eq!(method.owner, "Base");
            assert!(method.parameters.is_empty());
        }
        other => panic!("expected a method, got {other:?}"),
    }

    let class = inspect(&Object::Class(Arc::clone(&derived)), &filter).unwrap();
    assert_eq!(class.name(), "Derived");

    let attribute = Object::Member {
        class: Arc::clone(&derived),
        name: "LIMIT".into(),
    };
    assert!(inspect(&attribute, &filter).unwrap_err().is_invalid_target());
    let module = Object::Module(Arc::new(ModuleObject::new("m")));
    assert!(inspect(&module, &filter).unwrap_err().is_invalid_target());
}

#[test]
fn class_signature_is_its_constructor() {
    let (base, derived) = hierarchy();
    let inspector = Inspector::new();

    let signature = inspector.signature(&Object::Class(derived)).unwrap();
    assert_eq!(signature.name, "Derived");
    assert_eq!(signature.parameters.len(), 2);

    let no_init = inspector.signature(&Object::Class(base)).unwrap();
    assert_eq!(no_init.name, "Base");
    assert!(no_init.parameters.is_empty());
    assert_eq!(no_init.description.as_deref(), Some("The base."));
}

#[test]
fn mapping_roundtrip_of_inspected_class() {
    use objinspect_core::MappingView;

    let (_, derived) = hierarchy();
    let class = Inspector::new()
        .class(&derived, &MemberFilter::default())
        .unwrap();
    let rebuilt = objinspect_core::Class::from_mapping(class.to_mapping().unwrap()).unwrap();
    assert_eq!(rebuilt, class);
}

#[test]
fn inspections_are_independent_snapshots() {
    let (_, derived) = hierarchy();
    let inspector = Inspector::new();
    let mut first = inspector.class(&derived, &MemberFilter::default()).unwrap();
    let second = inspector.class(&derived, &MemberFilter::default()).unwrap();
    first.members.clear();
    assert!(!second.members.is_empty());
}

#[test]
fn walking_a_non_class_is_rejected() {
    let inspector = Inspector::new();
    let filter = MemberFilter::default();
    let error = inspector
        .class_of(&Object::Callable(pow()), &filter)
        .unwrap_err();
    assert!(error.is_invalid_target());
    assert!(
        inspector
            .class_of(&Object::Value(Value::Int(3)), &filter)
            .unwrap_err()
            .is_invalid_target()
    );

    let (_, derived) = hierarchy();
    let class = inspector.class_of(&Object::Class(derived), &filter).unwrap();
    assert_eq!(class.name, "Derived");
}
