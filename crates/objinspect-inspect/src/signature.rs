//! Signature extraction: one callable in, one `Function` model out.

use std::collections::HashSet;
use std::sync::Arc;

use objinspect_core::{
    Annotation, Callable, ClassMember, ClassObject, DefaultValue, Function, InspectError,
    MethodBinding, Object, Parameter, ParameterKind, RawAnnotation, RawParameter,
};
use objinspect_docs::{DocParser, DocstringParser, ParsedDoc, clean_doc};

use crate::filter::CONSTRUCTOR;

/// Entry point for every inspection.
///
/// Holds the documentation parser; cheap to clone and safe to share.
#[derive(Clone)]
pub struct Inspector {
    parser: Arc<dyn DocParser>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector").finish_non_exhaustive()
    }
}

impl Inspector {
    /// Inspector using the built-in Google/Sphinx/NumPy parser.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parser(DocstringParser::new())
    }

    #[must_use]
    pub fn with_parser(parser: impl DocParser + 'static) -> Self {
        Self {
            parser: Arc::new(parser),
        }
    }

    /// Extract the full signature of a free callable.
    ///
    /// # Errors
    /// `InvalidTarget` when a parameter has no kind, kinds are out of binding
    /// order, a variadic repeats, or a name is declared twice.
    pub fn function(&self, callable: &Arc<Callable>) -> Result<Function, InspectError> {
        self.extract(callable, false, callable.doc())
    }

    /// Extract a method signature, dropping the implicit first parameter
    /// for instance and class methods.
    ///
    /// # Errors
    /// Same as [`Inspector::function`].
    pub fn method_function(
        &self,
        callable: &Arc<Callable>,
        binding: MethodBinding,
    ) -> Result<Function, InspectError> {
        self.extract(callable, binding != MethodBinding::Static, callable.doc())
    }

    /// Signature of anything callable: a function, a class member, or a class
    /// (its constructor, named after the class).
    ///
    /// # Errors
    /// `InvalidTarget` for modules, plain values and data attributes, plus any
    /// signature validation failure.
    pub fn signature(&self, object: &Object) -> Result<Function, InspectError> {
        match object {
            Object::Callable(callable) => self.function(callable),
            Object::Class(class) => self.constructor(class),
            Object::Member { class, name } => {
                let (_, member) = lookup(class, name)?;
                match &member {
                    ClassMember::Method(c) => self.method_function(c, MethodBinding::Instance),
                    ClassMember::ClassMethod(c) => self.method_function(c, MethodBinding::Class),
                    ClassMember::StaticMethod(c) => self.method_function(c, MethodBinding::Static),
                    ClassMember::Property(p) => {
                        self.method_function(&p.getter, MethodBinding::Instance)
                    }
                    ClassMember::Attribute(_) => Err(not_callable(object)),
                }
            }
            Object::Module(_) | Object::Value(_) => Err(not_callable(object)),
        }
    }

    /// Constructor signature of a class, named after the class.
    ///
    /// Documentation comes from the constructor, or from the class when the
    /// constructor has none. A class without a known constructor takes no
    /// arguments.
    ///
    /// # Errors
    /// `InvalidTarget` for an inconsistent hierarchy or a bad constructor.
    pub fn constructor(&self, class: &Arc<ClassObject>) -> Result<Function, InspectError> {
        let found = class.find_member(CONSTRUCTOR)?;
        let init = found.as_ref().and_then(|(_, member)| match member {
            ClassMember::Method(c) | ClassMember::ClassMethod(c) => Some((c, true)),
            ClassMember::StaticMethod(c) => Some((c, false)),
            ClassMember::Property(_) | ClassMember::Attribute(_) => None,
        });

        let Some((callable, skip_first)) = init else {
            let mut function = Function::new(class.name(), Vec::new());
            self.attach_docs(&mut function, class.doc(), class.qualname());
            return Ok(function);
        };

        let doc = callable
            .doc()
            .filter(|doc| !doc.trim().is_empty())
            .or_else(|| class.doc());
        let mut function = self.extract(callable, skip_first, doc)?;
        function.name = class.name().to_string();
        Ok(function)
    }

    fn extract(
        &self,
        callable: &Arc<Callable>,
        skip_first: bool,
        doc: Option<&str>,
    ) -> Result<Function, InspectError> {
        validate(callable)?;

        let raw = callable.params();
        let skip = usize::from(
            skip_first
                && raw
                    .first()
                    .and_then(|p| p.kind)
                    .is_some_and(ParameterKind::accepts_positional),
        );

        let parameters = raw[skip..].iter().filter_map(to_parameter).collect();
        let mut function = Function::new(callable.name(), parameters)
            .with_source(Arc::clone(callable));
        function.return_type = annotation(callable.returns());
        function.is_async = callable.is_async();
        self.attach_docs(&mut function, doc, callable.qualname());
        Ok(function)
    }

    /// Clean and parse documentation, merging prose into the model.
    /// Parse failures are logged and leave every description empty.
    pub(crate) fn attach_docs(&self, function: &mut Function, doc: Option<&str>, owner: &str) {
        let Some(raw) = doc else {
            return;
        };
        let cleaned = clean_doc(raw);
        if cleaned.is_empty() {
            return;
        }
        function.docstring = Some(cleaned);

        let Some(parsed) = self.parse_doc(raw, owner) else {
            return;
        };
        function.description = parsed.description().map(str::to_string);
        for param in &mut function.parameters {
            if let Some(text) = parsed.param(&param.name) {
                param.description = Some(text.to_string());
            }
        }
    }

    pub(crate) fn parse_doc(&self, raw: &str, owner: &str) -> Option<ParsedDoc> {
        match self.parser.parse(raw) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::warn!(%error, callable = owner, "ignoring unparseable documentation");
                None
            }
        }
    }
}

pub(crate) fn lookup(
    class: &Arc<ClassObject>,
    name: &str,
) -> Result<(Arc<ClassObject>, ClassMember), InspectError> {
    class
        .find_member(name)?
        .ok_or_else(|| InspectError::UnknownMember {
            owner: format!("class {}", class.qualname()),
            member: name.to_string(),
        })
}

pub(crate) fn not_callable(object: &Object) -> InspectError {
    InspectError::InvalidTarget {
        target: object.display_name(),
        reason: format!("a {} is not callable", object.kind_name()),
    }
}

fn invalid(callable: &Callable, reason: String) -> InspectError {
    InspectError::InvalidTarget {
        target: callable.qualname().to_string(),
        reason,
    }
}

/// Check the declared parameters form a signature the binding rules accept.
fn validate(callable: &Callable) -> Result<(), InspectError> {
    let mut seen = HashSet::new();
    let mut previous: Option<ParameterKind> = None;

    for param in callable.params() {
        let Some(kind) = param.kind else {
            return Err(invalid(
                callable,
                format!("parameter '{}' has no binding kind", param.name),
            ));
        };
        if !seen.insert(param.name.as_str()) {
            return Err(invalid(
                callable,
                format!("duplicate parameter name '{}'", param.name),
            ));
        }
        if let Some(prev) = previous {
            if kind < prev {
                return Err(invalid(
                    callable,
                    format!("{kind} parameter '{}' follows a {prev} parameter", param.name),
                ));
            }
            if kind == prev && kind.is_variadic() {
                return Err(invalid(
                    callable,
                    format!("more than one {kind} parameter ('{}')", param.name),
                ));
            }
        }
        previous = Some(kind);
    }
    Ok(())
}

fn to_parameter(raw: &RawParameter) -> Option<Parameter> {
    let kind = raw.kind?;
    let mut param = Parameter::new(raw.name.clone(), kind);
    param.ty = annotation(raw.annotation.as_ref());
    param.default = raw
        .default
        .clone()
        .map_or(DefaultValue::NoDefault, DefaultValue::Value);
    Some(param)
}

/// Declared annotations map to types; forward references stay unresolved.
fn annotation(raw: Option<&RawAnnotation>) -> Annotation {
    match raw {
        Some(RawAnnotation::Type(ty)) => Annotation::Type(ty.clone()),
        Some(RawAnnotation::ForwardRef(_)) | None => Annotation::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objinspect_core::{TypeExpr, Value};
    use pretty_assertions::assert_eq;

    fn p(name: &str, kind: ParameterKind) -> RawParameter {
        RawParameter::new(name, kind)
    }

    #[test]
    fn keeps_declaration_order_and_sentinels() {
        let callable = Callable::builder("f")
            .param(p("a", ParameterKind::PositionalOrKeyword))
            .param(p("b", ParameterKind::PositionalOrKeyword).with_default(Value::None))
            .param(p("c", ParameterKind::KeywordOnly).annotated(TypeExpr::None))
            .build();
        let function = Inspector::new().function(&callable).expect("valid");

        let names: Vec<&str> = function.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(function.parameters[0].default, DefaultValue::NoDefault);
        assert_eq!(function.parameters[0].ty, Annotation::Unresolved);
        assert_eq!(function.parameters[1].default, DefaultValue::Value(Value::None));
        assert_eq!(function.parameters[2].ty, Annotation::Type(TypeExpr::None));
        assert_eq!(function.return_type, Annotation::Unresolved);
    }

    #[test]
    fn forward_reference_is_unresolved() {
        let callable = Callable::builder("link")
            .param(p("node", ParameterKind::PositionalOrKeyword).forward_ref("Node"))
            .returns_raw(RawAnnotation::ForwardRef("Node".into()))
            .build();
        let function = Inspector::new().function(&callable).expect("valid");
        assert_eq!(function.parameters[0].ty, Annotation::Unresolved);
        assert_eq!(function.return_type, Annotation::Unresolved);
    }

    #[test]
    fn invalid_signatures_are_rejected() {
        let cases = [
            Callable::builder("unclassified")
                .param(RawParameter::unclassified("x"))
                .build(),
            Callable::builder("out_of_order")
                .param(p("k", ParameterKind::KeywordOnly))
                .param(p("a", ParameterKind::PositionalOrKeyword))
                .build(),
            Callable::builder("two_varargs")
                .param(p("a", ParameterKind::VarPositional))
                .param(p("b", ParameterKind::VarPositional))
                .build(),
            Callable::builder("duplicate")
                .param(p("a", ParameterKind::PositionalOnly))
                .param(p("a", ParameterKind::KeywordOnly))
                .build(),
        ];
        for callable in &cases {
            let err = Inspector::new().function(callable).expect_err(callable.name());
            assert!(err.is_invalid_target(), "{}: {err}", callable.name());
        }
    }

    #[test]
    fn documentation_merges_by_name() {
        let callable = Callable::builder("scale")
            .doc("Scale a value.\n\n    Args:\n        x: The value.\n        ghost: Not a parameter.\n    ")
            .param(p("x", ParameterKind::PositionalOrKeyword))
            .param(p("factor", ParameterKind::PositionalOrKeyword).with_default(2_i64))
            .build();
        let function = Inspector::new().function(&callable).expect("valid");
        assert_eq!(function.description.as_deref(), Some("Scale a value."));
        assert_eq!(function.parameters[0].description.as_deref(), Some("The value."));
        assert_eq!(function.parameters[1].description, None);
        assert_eq!(function.parameters.len(), 2);
        assert_eq!(
            function.docstring.as_deref(),
            Some("Scale a value.\n\nArgs:\n    x: The value.\n    ghost: Not a parameter.")
        );
    }

    #[test]
    fn unparseable_documentation_degrades() {
        let callable = Callable::builder("sum")
            .doc("Sum.\n\nArgs:\n    a (int)\n")
            .param(p("a", ParameterKind::PositionalOrKeyword))
            .build();
        let function = Inspector::new().function(&callable).expect("still extracted");
        assert_eq!(function.description, None);
        assert_eq!(function.parameters[0].description, None);
        assert!(function.has_docstring());
    }

    #[test]
    fn method_binding_controls_implicit_parameter() {
        let callable = Callable::builder("m")
            .param(p("self", ParameterKind::PositionalOrKeyword))
            .param(p("x", ParameterKind::PositionalOrKeyword))
            .build();
        let inspector = Inspector::new();
        let bound = inspector
            .method_function(&callable, MethodBinding::Instance)
            .expect("valid");
        assert_eq!(bound.parameters.len(), 1);
        let unbound = inspector
            .method_function(&callable, MethodBinding::Static)
            .expect("valid");
        assert_eq!(unbound.parameters.len(), 2);
    }

    #[test]
    fn modules_and_values_are_not_callable() {
        let err = Inspector::new()
            .signature(&Object::Value(Value::Int(3)))
            .expect_err("not callable");
        assert!(err.is_invalid_target());
    }
}
