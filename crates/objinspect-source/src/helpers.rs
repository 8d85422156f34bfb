use ast_grep_core::Node;

use crate::literal;

/// Node kinds that carry no meaning when walking a node's children.
const PUNCTUATION: &[&str] = &["(", ")", "[", "]", "{", "}", ",", ":", "comment"];

/// Children that are not punctuation or comments.
pub(crate) fn meaningful_children<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Vec<Node<'r, D>> {
    node.children()
        .filter(|c| !PUNCTUATION.contains(&c.kind().as_ref()))
        .collect()
}

pub(crate) fn extract_decorators<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<String> {
    node.children()
        .filter(|c| c.kind().as_ref() == "decorator")
        .map(|c| {
            let text = c.text().to_string();
            text.trim_start_matches('@').trim().to_string()
        })
        .collect()
}

/// Decorator text without call arguments: `functools.wraps(f)` → `functools.wraps`.
pub(crate) fn decorator_base(decorator: &str) -> &str {
    decorator.split('(').next().unwrap_or(decorator).trim()
}

/// Check if any decorator matches the given suffixes (handles dotted paths).
pub(crate) fn decorator_matches_any(decorators: &[String], suffixes: &[&str]) -> bool {
    decorators.iter().any(|d| {
        let base = decorator_base(d);
        suffixes
            .iter()
            .any(|s| base == *s || base.ends_with(&format!(".{s}")))
    })
}

pub(crate) fn decorator_matches(decorators: &[String], suffix: &str) -> bool {
    decorator_matches_any(decorators, &[suffix])
}

/// The definition wrapped by a `decorated_definition`.
pub(crate) fn decorated_inner<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    node.children().find(|c| {
        let k = c.kind();
        k.as_ref() == "class_definition" || k.as_ref() == "function_definition"
    })
}

/// Docstring of a definition: the string literal that opens its body.
pub(crate) fn extract_docstring<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    leading_docstring(&node.field("body")?)
}

/// Raw text of the string statement opening a block or module, escapes
/// resolved. Indentation is left for the documentation cleaner.
pub(crate) fn leading_docstring<D: ast_grep_core::Doc>(block: &Node<D>) -> Option<String> {
    let first = block.children().find(|c| c.kind().as_ref() != "comment")?;
    if first.kind().as_ref() != "expression_statement" {
        return None;
    }
    let parts = meaningful_children(&first);
    let [string] = parts.as_slice() else {
        return None;
    };
    match literal::literal(string)? {
        objinspect_core::Value::Str(doc) => Some(doc),
        _ => None,
    }
}

/// `name = value` (or `name: T = value`) in an expression statement.
///
/// Returns `None` for bare annotations, tuple unpacking, attribute targets,
/// and statements that are not assignments.
pub(crate) fn simple_assignment<'r, D: ast_grep_core::Doc>(
    stmt: &Node<'r, D>,
) -> Option<(String, Node<'r, D>)> {
    let assignment = stmt
        .children()
        .find(|c| c.kind().as_ref() == "assignment")?;
    let left = assignment.field("left")?;
    if left.kind().as_ref() != "identifier" {
        return None;
    }
    let right = assignment.field("right")?;
    Some((left.text().to_string(), right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn decorator_suffixes() {
        let decorators = vec![
            "functools.cached_property".to_string(),
            "retry(times=3)".to_string(),
        ];
        assert!(decorator_matches(&decorators, "cached_property"));
        assert!(decorator_matches(&decorators, "retry"));
        assert!(!decorator_matches(&decorators, "property"));
    }

    #[test]
    fn docstring_of_function() {
        let root = parse_source("def f():\n    # note\n    '''Say hi.'''\n    return 1\n");
        let function = root.root().children().next().expect("def");
        assert_eq!(extract_docstring(&function).as_deref(), Some("Say hi."));
    }

    #[test]
    fn non_string_body_has_no_docstring() {
        let root = parse_source("def f():\n    return 'x'\n");
        let function = root.root().children().next().expect("def");
        assert_eq!(extract_docstring(&function), None);
    }

    #[test]
    fn annotated_assignment() {
        let root = parse_source("LIMIT: int = 10\na, b = 1, 2\nx: int\n");
        let found: Vec<String> = root
            .root()
            .children()
            .filter_map(|stmt| simple_assignment(&stmt).map(|(name, _)| name))
            .collect();
        assert_eq!(found, ["LIMIT"]);
    }
}
