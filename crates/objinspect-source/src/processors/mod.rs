//! Top-level module walk.
//!
//! Only direct children of the module are processed. Methods are picked up
//! through their class, and code inside `if`/`try` blocks is not executed, so
//! it is not bound.

mod classes;
mod functions;

use std::collections::HashMap;
use std::sync::Arc;

use ast_grep_core::Node;
use objinspect_core::{ClassObject, ModuleObject};

use crate::helpers::{decorated_inner, extract_decorators, leading_docstring, simple_assignment};
use crate::literal;

/// Base classes named but not defined in the module, by dotted path. Every
/// class naming the same path shares one object.
pub(crate) type Externals = HashMap<String, Arc<ClassObject>>;

/// Bind every top-level definition and literal assignment into `module`, in
/// source order. Later bindings of a name replace earlier ones.
pub(crate) fn populate<D: ast_grep_core::Doc>(root: &Node<D>, module: &mut ModuleObject) {
    let mut externals = Externals::new();
    for child in root.children() {
        let kind = child.kind();
        match kind.as_ref() {
            "function_definition" => bind_function(&child, &[], module),
            "class_definition" => bind_class(&child, &[], module, &mut externals),
            "decorated_definition" => {
                let Some(inner) = decorated_inner(&child) else {
                    continue;
                };
                let decorators = extract_decorators(&child);
                if inner.kind().as_ref() == "class_definition" {
                    bind_class(&inner, &decorators, module, &mut externals);
                } else {
                    bind_function(&inner, &decorators, module);
                }
            }
            "expression_statement" => bind_assignment(&child, module),
            _ => {}
        }
    }
}

/// Module docstring, if the module opens with one.
pub(crate) fn module_docstring<D: ast_grep_core::Doc>(root: &Node<D>) -> Option<String> {
    leading_docstring(root)
}

fn bind_function<D: ast_grep_core::Doc>(
    node: &Node<D>,
    decorators: &[String],
    module: &mut ModuleObject,
) {
    let Some(callable) = functions::process_function(node, None) else {
        return;
    };
    if !decorators.is_empty() {
        tracing::debug!(
            function = callable.name(),
            ?decorators,
            "module-level decorators are not applied"
        );
    }
    module.insert(callable.name().to_string(), callable);
}

fn bind_class<D: ast_grep_core::Doc>(
    node: &Node<D>,
    decorators: &[String],
    module: &mut ModuleObject,
    externals: &mut Externals,
) {
    if let Some(class) = classes::process_class(node, decorators, module, externals) {
        module.insert(class.name().to_string(), class);
    }
}

fn bind_assignment<D: ast_grep_core::Doc>(stmt: &Node<D>, module: &mut ModuleObject) {
    let Some((name, value)) = simple_assignment(stmt) else {
        return;
    };
    match literal::literal(&value) {
        Some(value) => module.insert(name, value),
        None => tracing::debug!(variable = %name, "non-literal module assignment not bound"),
    }
}
