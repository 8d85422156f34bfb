use objinspect_core::{Annotation, Function, Parameter, ParameterKind};

use super::table::paint;
use super::{FormatOptions, theme};

/// `name: type = default`, with `*`/`**` on variadics.
#[must_use]
pub fn render_parameter(param: &Parameter, options: &FormatOptions) -> String {
    let prefix = match param.kind {
        ParameterKind::VarPositional => "*",
        ParameterKind::VarKeyword => "**",
        _ => "",
    };
    let mut out = format!(
        "{prefix}{}",
        paint(&param.name, Some(theme::NAME), options.color)
    );
    if let Some(ty) = param.type_expr() {
        out.push_str(": ");
        out.push_str(&paint(&ty.type_name(), Some(theme::TYPE), options.color));
    }
    if let Some(default) = param.default_value() {
        out.push_str(" = ");
        out.push_str(&paint(&default.to_string(), Some(theme::DEFAULT), options.color));
    }
    out
}

/// `name(a: int, /, b: str = 'b', *args, **kw) -> None`
///
/// A `/` follows the last positional-only parameter, and a bare `*` precedes
/// keyword-only parameters when there is no `*args`.
#[must_use]
pub fn render_signature(function: &Function, options: &FormatOptions) -> String {
    let params = &function.parameters;
    let mut parts: Vec<String> = Vec::with_capacity(params.len() + 2);
    let has_var_positional = params
        .iter()
        .any(|p| p.kind == ParameterKind::VarPositional);

    for (index, param) in params.iter().enumerate() {
        if param.kind == ParameterKind::KeywordOnly
            && !has_var_positional
            && params[..index]
                .iter()
                .all(|p| p.kind != ParameterKind::KeywordOnly)
        {
            parts.push("*".to_string());
        }
        parts.push(render_parameter(param, options));
        let next_kind = params.get(index + 1).map(|p| p.kind);
        if param.kind == ParameterKind::PositionalOnly
            && next_kind != Some(ParameterKind::PositionalOnly)
        {
            parts.push("/".to_string());
        }
    }

    let name = paint(&function.name, Some(theme::FUNCTION), options.color);
    let mut out = format!("{name}({})", parts.join(", "));
    if let Annotation::Type(ty) = &function.return_type {
        out.push_str(" -> ");
        out.push_str(&paint(&ty.type_name(), Some(theme::TYPE), options.color));
    }
    if function.is_async {
        out.insert_str(0, &paint("async ", Some(theme::KEYWORD), options.color));
    }
    out
}

/// Short type tag for listings: simplified type name, or empty.
pub(crate) fn type_tag(annotation: &Annotation) -> String {
    annotation
        .type_expr()
        .map(objinspect_core::TypeExpr::simplified_name)
        .unwrap_or_default()
}
