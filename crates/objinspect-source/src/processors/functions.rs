//! Function definition processing: signatures become `Callable`s.

use std::sync::Arc;

use ast_grep_core::Node;
use objinspect_core::typing::TypeParseError;
use objinspect_core::{Callable, ParameterKind, RawAnnotation, RawParameter, TypeExpr};

use crate::helpers::extract_docstring;
use crate::literal::value_or_expr;

/// Build a callable from a `function_definition` node.
///
/// `qualname_prefix` is the qualified name of the enclosing class, if any.
pub(crate) fn process_function<D: ast_grep_core::Doc>(
    node: &Node<D>,
    qualname_prefix: Option<&str>,
) -> Option<Arc<Callable>> {
    let name = node.field("name").map(|n| n.text().to_string())?;
    let qualname = qualname_prefix.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));

    // Trim leading whitespace before checking for "async " prefix
    let is_async = node.text().trim_start().starts_with("async ");

    let mut builder = Callable::builder(&name)
        .qualname(qualname)
        .params(extract_parameters(node))
        .is_async(is_async);
    if let Some(doc) = extract_docstring(node) {
        builder = builder.doc(doc);
    }
    if let Some(return_type) = node.field("return_type") {
        builder = builder.returns_raw(annotation(&return_type.text()));
    }
    Some(builder.build())
}

/// Parameters in declaration order, kinds assigned from the `/`, `*`,
/// `*args` and `**kwargs` markers.
fn extract_parameters<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<RawParameter> {
    let Some(list) = node.field("parameters") else {
        return Vec::new();
    };
    let mut params: Vec<RawParameter> = Vec::new();
    let mut keyword_only = false;
    for child in list.children() {
        let kind = child.kind();
        match kind.as_ref() {
            "(" | ")" | "," | "comment" => {}
            "positional_separator" => {
                for param in &mut params {
                    if param.kind == Some(ParameterKind::PositionalOrKeyword) {
                        param.kind = Some(ParameterKind::PositionalOnly);
                    }
                }
            }
            "keyword_separator" => keyword_only = true,
            _ => {
                let Some(param) = parameter(&child, keyword_only) else {
                    tracing::warn!(
                        parameter = %child.text(),
                        line = child.start_pos().line() + 1,
                        "skipping unsupported parameter form"
                    );
                    continue;
                };
                if param.kind == Some(ParameterKind::VarPositional) {
                    keyword_only = true;
                }
                params.push(param);
            }
        }
    }
    params
}

fn parameter<D: ast_grep_core::Doc>(node: &Node<D>, keyword_only: bool) -> Option<RawParameter> {
    let named_kind = if keyword_only {
        ParameterKind::KeywordOnly
    } else {
        ParameterKind::PositionalOrKeyword
    };
    let kind = node.kind();
    let mut param = match kind.as_ref() {
        "identifier" => RawParameter::new(node.text(), named_kind),
        "list_splat_pattern" | "dictionary_splat_pattern" => splat(node)?,
        "typed_parameter" => {
            let target = node.children().find(|c| {
                matches!(
                    c.kind().as_ref(),
                    "identifier" | "list_splat_pattern" | "dictionary_splat_pattern"
                )
            })?;
            if target.kind().as_ref() == "identifier" {
                RawParameter::new(target.text(), named_kind)
            } else {
                splat(&target)?
            }
        }
        "default_parameter" | "typed_default_parameter" => {
            let name = node.field("name")?;
            let mut param = RawParameter::new(name.text(), named_kind);
            param.default = Some(value_or_expr(&node.field("value")?));
            param
        }
        _ => return None,
    };
    if let Some(ty) = node.field("type") {
        param.annotation = Some(annotation(&ty.text()));
    }
    Some(param)
}

fn splat<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<RawParameter> {
    let kind = match node.kind().as_ref() {
        "list_splat_pattern" => ParameterKind::VarPositional,
        "dictionary_splat_pattern" => ParameterKind::VarKeyword,
        _ => return None,
    };
    let text = node.text();
    let name = text.trim_start_matches('*').trim();
    if name.is_empty() {
        return None;
    }
    Some(RawParameter::new(name, kind))
}

/// Structured annotation where possible. String annotations stay forward
/// references; syntax the type parser does not model is kept verbatim.
fn annotation(text: &str) -> RawAnnotation {
    match TypeExpr::parse(text) {
        Ok(ty) => RawAnnotation::Type(ty),
        Err(TypeParseError::ForwardRef(name)) => RawAnnotation::ForwardRef(name),
        Err(error) => {
            tracing::debug!(%error, annotation = text, "keeping annotation verbatim");
            RawAnnotation::Type(TypeExpr::Raw(text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use objinspect_core::Value;
    use pretty_assertions::assert_eq;

    fn callable(source: &str) -> Arc<Callable> {
        let root = parse_source(source);
        let node = root
            .root()
            .children()
            .find(|c| c.kind().as_ref() == "function_definition")
            .expect("function definition");
        process_function(&node, None).expect("callable")
    }

    fn kinds(callable: &Callable) -> Vec<(&str, Option<ParameterKind>)> {
        callable
            .params()
            .iter()
            .map(|p| (p.name.as_str(), p.kind))
            .collect()
    }

    #[test]
    fn every_parameter_kind() {
        let f = callable("def f(a, b, /, c, *args, d, e=1, **kw):\n    pass\n");
        assert_eq!(
            kinds(&f),
            [
                ("a", Some(ParameterKind::PositionalOnly)),
                ("b", Some(ParameterKind::PositionalOnly)),
                ("c", Some(ParameterKind::PositionalOrKeyword)),
                ("args", Some(ParameterKind::VarPositional)),
                ("d", Some(ParameterKind::KeywordOnly)),
                ("e", Some(ParameterKind::KeywordOnly)),
                ("kw", Some(ParameterKind::VarKeyword)),
            ]
        );
    }

    #[test]
    fn bare_star_makes_keyword_only() {
        let f = callable("def f(x, *, key: str = 'k'):\n    pass\n");
        assert_eq!(f.params()[1].kind, Some(ParameterKind::KeywordOnly));
        assert_eq!(
            f.params()[1].annotation,
            Some(RawAnnotation::Type(TypeExpr::name("str")))
        );
        assert_eq!(f.params()[1].default, Some(Value::from("k")));
    }

    #[test]
    fn typed_variadics() {
        let f = callable("def f(*args: int, **kwargs: str) -> None:\n    pass\n");
        assert_eq!(
            kinds(&f),
            [
                ("args", Some(ParameterKind::VarPositional)),
                ("kwargs", Some(ParameterKind::VarKeyword)),
            ]
        );
        assert_eq!(
            f.params()[0].annotation,
            Some(RawAnnotation::Type(TypeExpr::name("int")))
        );
    }

    #[test]
    fn docstring_async_and_return_type() {
        let f = callable(
            "async def fetch(url: str) -> 'Response':\n    \"\"\"Fetch a URL.\"\"\"\n",
        );
        assert!(f.is_async());
        assert_eq!(f.doc(), Some("Fetch a URL."));
        assert_eq!(
            f.returns(),
            Some(&RawAnnotation::ForwardRef("Response".into()))
        );
    }

    #[test]
    fn non_literal_default_is_expression() {
        let f = callable("def f(path=os.getcwd(), n=-1):\n    pass\n");
        assert_eq!(f.params()[0].default, Some(Value::Expr("os.getcwd()".into())));
        assert_eq!(f.params()[1].default, Some(Value::Int(-1)));
    }
}
