//! Class definition processing: bodies become `ClassObject` namespaces.

use std::sync::Arc;

use ast_grep_core::Node;
use objinspect_core::reflect::ClassBuilder;
use objinspect_core::{ClassMember, ClassObject, ModuleObject, PropertyObject};

use super::Externals;
use super::functions::process_function;
use crate::helpers::{
    decorated_inner, decorator_base, decorator_matches, decorator_matches_any, extract_decorators,
    extract_docstring, meaningful_children, simple_assignment,
};
use crate::literal::value_or_expr;

/// Implicit root of every class; never listed as a base.
const OBJECT: &str = "object";

/// Build a class from a `class_definition` node. Bases resolve against
/// classes already bound in `module`, then against `externals`.
pub(crate) fn process_class<D: ast_grep_core::Doc>(
    node: &Node<D>,
    decorators: &[String],
    module: &ModuleObject,
    externals: &mut Externals,
) -> Option<Arc<ClassObject>> {
    let name = node.field("name").map(|n| n.text().to_string())?;
    if !decorators.is_empty() {
        tracing::debug!(class = %name, ?decorators, "class decorators are not applied");
    }

    let mut builder = ClassObject::builder(&name);
    if let Some(doc) = extract_docstring(node) {
        builder = builder.doc(doc);
    }
    for base in resolve_bases(node, module, externals) {
        builder = builder.base(base);
    }

    if let Some(body) = node.field("body") {
        for child in body.children() {
            let kind = child.kind();
            match kind.as_ref() {
                "function_definition" => add_function(&mut builder, &child, &[], &name),
                "decorated_definition" => {
                    let Some(inner) = decorated_inner(&child) else {
                        continue;
                    };
                    if inner.kind().as_ref() == "function_definition" {
                        add_function(&mut builder, &inner, &extract_decorators(&child), &name);
                    } else {
                        skip_nested_class(&inner, &name);
                    }
                }
                "class_definition" => skip_nested_class(&child, &name),
                "expression_statement" => {
                    if let Some((attr, value)) = simple_assignment(&child) {
                        builder.insert(attr, ClassMember::Attribute(value_or_expr(&value)));
                    }
                }
                _ => {}
            }
        }
    }
    Some(builder.build())
}

/// Base classes in declaration order, keyword arguments (`metaclass=...`)
/// left out. Names not bound to a class in the module become external
/// classes, one per dotted path.
fn resolve_bases<D: ast_grep_core::Doc>(
    node: &Node<D>,
    module: &ModuleObject,
    externals: &mut Externals,
) -> Vec<Arc<ClassObject>> {
    let Some(superclasses) = node.field("superclasses") else {
        return Vec::new();
    };
    let mut bases = Vec::new();
    for child in meaningful_children(&superclasses) {
        if matches!(
            child.kind().as_ref(),
            "keyword_argument" | "list_splat" | "dictionary_splat"
        ) {
            continue;
        }
        let text = child.text();
        // `Generic[T]` resolves as `Generic`.
        let path = text.split('[').next().unwrap_or_default().trim();
        if path.is_empty() || path == OBJECT {
            continue;
        }
        if let Some(class) = module.class(path) {
            bases.push(Arc::clone(class));
            continue;
        }
        let external = externals.entry(path.to_string()).or_insert_with(|| {
            tracing::warn!(
                base = path,
                module = module.name(),
                "base class is not defined in this module, members not walked"
            );
            ClassObject::external(path.rsplit('.').next().unwrap_or(path))
        });
        bases.push(Arc::clone(external));
    }
    bases
}

/// Bind a method into the class namespace according to its decorators.
fn add_function<D: ast_grep_core::Doc>(
    builder: &mut ClassBuilder,
    node: &Node<D>,
    decorators: &[String],
    class_name: &str,
) {
    let Some(callable) = process_function(node, Some(class_name)) else {
        return;
    };
    let name = callable.name().to_string();

    if let Some(target) = accessor_target(decorators, "setter") {
        match builder.get(target) {
            Some(ClassMember::Property(property)) => {
                let property = PropertyObject {
                    getter: Arc::clone(&property.getter),
                    setter: Some(callable),
                };
                builder.insert(target.to_string(), ClassMember::Property(property));
            }
            _ => tracing::warn!(
                member = %name,
                class = class_name,
                "setter does not refer to a property defined earlier, skipped"
            ),
        }
        return;
    }
    if accessor_target(decorators, "deleter").is_some() {
        tracing::debug!(member = %name, class = class_name, "property deleter ignored");
        return;
    }

    let member = if decorator_matches(decorators, "staticmethod") {
        ClassMember::StaticMethod(callable)
    } else if decorator_matches(decorators, "classmethod") {
        ClassMember::ClassMethod(callable)
    } else if decorator_matches_any(decorators, &["property", "cached_property"]) {
        ClassMember::Property(PropertyObject::read_only(callable))
    } else {
        ClassMember::Method(callable)
    };
    builder.insert(name, member);
}

/// `x` for a `@x.<accessor>` decorator.
fn accessor_target<'a>(decorators: &'a [String], accessor: &str) -> Option<&'a str> {
    decorators.iter().find_map(|d| {
        let base = decorator_base(d);
        base.strip_suffix(accessor)?.strip_suffix('.')
    })
}

fn skip_nested_class<D: ast_grep_core::Doc>(node: &Node<D>, owner: &str) {
    let nested = node.field("name").map(|n| n.text().to_string());
    tracing::debug!(class = owner, ?nested, "nested class not loaded");
}
