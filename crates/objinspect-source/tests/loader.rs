//! Load the shapes fixture and inspect what comes out.

use objinspect_core::{
    Annotation, DefaultValue, Object, ParameterKind, TypeExpr, Value,
};
use objinspect_inspect::{Inspector, MemberFilter};
use objinspect_source::{SourceError, load_file, load_module};
use pretty_assertions::assert_eq;

const SHAPES: &str = include_str!("fixtures/shapes.py");

fn shapes() -> objinspect_core::ModuleObject {
    load_module("shapes", SHAPES).expect("fixture should load")
}

fn function(path: &str) -> objinspect_core::Function {
    let module = shapes();
    let object = module.resolve(path).expect("path should resolve");
    Inspector::new().signature(&object).expect("signature")
}

#[test]
fn module_bindings_in_source_order() {
    let module = shapes();
    let names: Vec<&str> = module.namespace().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        [
            "VERSION",
            "DEFAULT_SIDES",
            "TOLERANCE",
            "ORIGIN",
            "pow",
            "fetch",
            "scale",
            "Color",
            "Shape",
            "Rectangle",
            "Square",
        ]
    );
    assert_eq!(
        module.doc(),
        Some("Geometric shapes used to exercise the loader.")
    );
    assert!(matches!(module.get("VERSION"), Some(Object::Value(Value::Str(v))) if v == "1.4.0"));
    assert!(matches!(
        module.get("ORIGIN"),
        Some(Object::Value(Value::Tuple(items))) if items.len() == 2
    ));
}

#[test]
fn positional_only_pow() {
    let pow = function("pow");
    assert_eq!(pow.parameters.len(), 2);
    for param in &pow.parameters {
        assert_eq!(param.kind, ParameterKind::PositionalOnly);
        assert_eq!(param.default, DefaultValue::NoDefault);
        assert_eq!(param.ty, Annotation::Unresolved);
    }
    assert_eq!(
        pow.description.as_deref(),
        Some("Return x raised to the power y.")
    );
}

#[test]
fn async_function_with_google_docs() {
    let fetch = function("fetch");
    assert!(fetch.is_async);
    assert_eq!(fetch.return_type, Annotation::Type(TypeExpr::name("bytes")));

    let timeout = fetch.param("timeout").unwrap();
    assert_eq!(timeout.kind, ParameterKind::KeywordOnly);
    assert_eq!(timeout.default, DefaultValue::Value(Value::Float(10.0)));
    assert_eq!(timeout.description.as_deref(), Some("Seconds before giving up."));

    let retries = fetch.param("retries").unwrap();
    assert_eq!(
        retries.ty,
        Annotation::Type(TypeExpr::union([TypeExpr::name("int"), TypeExpr::None]))
    );
    assert_eq!(retries.default, DefaultValue::Value(Value::None));
}

#[test]
fn forward_reference_is_unresolved() {
    let scale = function("scale");
    let shape = scale.param("shape").unwrap();
    assert_eq!(shape.ty, Annotation::Unresolved);
    assert_eq!(shape.description.as_deref(), Some("The shape to scale."));
    assert_eq!(scale.description.as_deref(), Some("Scale a shape."));
    let kinds: Vec<ParameterKind> = scale.parameters.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        [
            ParameterKind::PositionalOrKeyword,
            ParameterKind::PositionalOrKeyword,
            ParameterKind::VarPositional,
            ParameterKind::VarKeyword,
        ]
    );
}

#[test]
fn rectangle_constructor_scenario() {
    let module = shapes();
    let rectangle = module.class("Rectangle").unwrap();
    let class = Inspector::new()
        .class(rectangle, &MemberFilter::default())
        .unwrap();

    let params = class.init_args().unwrap();
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(params[0].default, DefaultValue::NoDefault);
    assert_eq!(params[1].default, DefaultValue::Value(Value::Int(5)));
    assert!(params.iter().all(|p| p.ty == Annotation::Unresolved));
}

#[test]
fn rectangle_members_resolve_inheritance() {
    let module = shapes();
    let rectangle = module.class("Rectangle").unwrap();
    let class = Inspector::new()
        .class(rectangle, &MemberFilter::default())
        .unwrap();

    assert_eq!(
        class.member_names(),
        ["__init__", "area", "diagonal", "describe", "unit", "named"]
    );
    let area = class.get("area").unwrap();
    assert_eq!(area.owner(), "Rectangle");
    assert_eq!(area.description(), Some("Width times height."));
    assert!(class.get("describe").unwrap().is_inherited());

    let diagonal = class.properties().next().unwrap();
    assert!(diagonal.writable);
    assert_eq!(diagonal.ty, Annotation::Type(TypeExpr::name("float")));
    assert_eq!(class.mro, ["Rectangle", "Shape"]);
}

#[test]
fn own_members_only() {
    let module = shapes();
    let square = module.class("Square").unwrap();
    let filter = MemberFilter::default().with_inherited(false);
    let class = Inspector::new().class(square, &filter).unwrap();
    assert_eq!(class.member_names(), ["__init__"]);
    assert_eq!(class.mro, ["Square", "Rectangle", "Shape"]);
}

#[test]
fn constructor_docs_reach_parameters() {
    let init = function("Shape.__init__");
    assert_eq!(init.description.as_deref(), Some("Create a shape."));
    let color = init.param("color").unwrap();
    assert_eq!(color.description.as_deref(), Some("Fill color."));
    assert_eq!(color.default, DefaultValue::Value(Value::None));
    assert_eq!(color.ty, Annotation::Type(TypeExpr::name("Color")));
}

#[test]
fn enum_choices_from_source() {
    let module = shapes();
    let color = module.class("Color").unwrap();
    assert_eq!(color.enum_choices(), Some(vec!["RED", "GREEN"]));
}

#[test]
fn syntax_errors_are_reported() {
    let error = load_module("broken", "def ok():\n    pass\n\nclass (:\n").unwrap_err();
    match error {
        SourceError::Syntax { module, line, .. } => {
            assert_eq!(module, "broken");
            assert_eq!(line, 4);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn load_file_names_module_after_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geometry.py");
    std::fs::write(&path, SHAPES).unwrap();
    let module = load_file(&path).unwrap();
    assert_eq!(module.name(), "geometry");
    assert!(module.class("Shape").is_some());

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "x = 1\n").unwrap();
    assert!(matches!(load_file(&text), Err(SourceError::NotPython(_))));
    assert!(matches!(
        load_file(dir.path().join("missing.py")),
        Err(SourceError::Io(_))
    ));
}

#[test]
fn undefined_base_shared_across_classes() {
    let source = "class A(Base):\n    pass\n\nclass B(Base):\n    pass\n\nclass C(A, B):\n    pass\n";
    let module = load_module("diamond", source).unwrap();
    let class = Inspector::new()
        .class(module.class("C").unwrap(), &MemberFilter::default())
        .unwrap();
    assert_eq!(class.mro, ["C", "A", "B", "Base"]);

    let a = module.class("A").unwrap();
    let b = module.class("B").unwrap();
    assert!(std::sync::Arc::ptr_eq(&a.bases()[0], &b.bases()[0]));
}

#[test]
fn inconsistent_order_with_undefined_base_is_rejected() {
    let source = "class A(Base):\n    pass\n\nclass B(Base, A):\n    pass\n";
    let module = load_module("broken_mro", source).unwrap();
    let b = module.class("B").unwrap();
    assert!(b.mro().unwrap_err().is_invalid_target());
    assert!(
        Inspector::new()
            .class(b, &MemberFilter::default())
            .unwrap_err()
            .is_invalid_target()
    );
}
