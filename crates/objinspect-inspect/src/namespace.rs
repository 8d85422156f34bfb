//! Sectioned namespace listings of modules and classes.

use std::collections::HashSet;
use std::sync::Arc;

use objinspect_core::{
    ClassMember, ClassObject, Function, InspectError, MethodBinding, ModuleObject, Object, Value,
    Visibility,
};

use crate::signature::Inspector;

/// Module-level names that are bookkeeping, not user variables.
const VARIABLE_SKIPS: &[&str] = &[
    "__class__",
    "__dict__",
    "__weakref__",
    "__doc__",
    "__cached__",
    "__file__",
    "__loader__",
    "__builtins__",
    "__spec__",
    "__annotations__",
    "__module__",
];

/// A class named in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: String,
    pub bases: Vec<String>,
    pub description: Option<String>,
}

/// Names of a namespace grouped by what they hold, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub name: String,
    pub variables: Vec<(String, Value)>,
    pub classes: Vec<ClassEntry>,
    pub methods: Vec<Function>,
    pub functions: Vec<Function>,
    pub dunders: Vec<Function>,
}

impl Listing {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
            && self.classes.is_empty()
            && self.methods.is_empty()
            && self.functions.is_empty()
            && self.dunders.is_empty()
    }
}

impl Inspector {
    /// Group a module's names into variables, classes, functions and dunders.
    ///
    /// Callables whose signature cannot be extracted are logged and left out.
    #[must_use]
    pub fn module_listing(&self, module: &ModuleObject) -> Listing {
        let mut listing = Listing {
            name: module.name().to_string(),
            ..Listing::default()
        };
        for (name, object) in module.namespace() {
            match object {
                Object::Value(value) => {
                    if !VARIABLE_SKIPS.contains(&name.as_str()) {
                        listing.variables.push((name.clone(), value.clone()));
                    }
                }
                Object::Class(class) => listing.classes.push(self.class_entry(name, class)),
                Object::Callable(_) | Object::Member { .. } => {
                    let Some(mut function) = skip_invalid(name, self.signature(object)) else {
                        continue;
                    };
                    function.name.clone_from(name);
                    if Visibility::of(name) == Visibility::Dunder {
                        listing.dunders.push(function);
                    } else {
                        listing.functions.push(function);
                    }
                }
                Object::Module(_) => {
                    tracing::debug!(module = %name, "skipping nested module in listing");
                }
            }
        }
        listing
    }

    /// Group a class's names, inherited ones included, the way `dir()` sees
    /// them: attributes as variables, methods and properties as methods.
    ///
    /// # Errors
    /// `InvalidTarget` for an inconsistent hierarchy.
    pub fn class_listing(&self, class: &Arc<ClassObject>) -> Result<Listing, InspectError> {
        let mut listing = Listing {
            name: class.name().to_string(),
            ..Listing::default()
        };
        let mut seen = HashSet::new();
        for owner in class.mro()? {
            for (name, entry) in owner.namespace() {
                if !seen.insert(name.clone()) {
                    continue;
                }
                let extracted = match entry {
                    ClassMember::Attribute(value) => {
                        if !VARIABLE_SKIPS.contains(&name.as_str()) {
                            listing.variables.push((name.clone(), value.clone()));
                        }
                        continue;
                    }
                    ClassMember::Method(c) => self.method_function(c, MethodBinding::Instance),
                    ClassMember::ClassMethod(c) => self.method_function(c, MethodBinding::Class),
                    ClassMember::StaticMethod(c) => {
                        self.method_function(c, MethodBinding::Static)
                    }
                    ClassMember::Property(p) => {
                        self.method_function(&p.getter, MethodBinding::Instance)
                    }
                };
                let Some(mut function) = skip_invalid(name, extracted) else {
                    continue;
                };
                function.name.clone_from(name);
                if Visibility::of(name) == Visibility::Dunder {
                    listing.dunders.push(function);
                } else {
                    listing.methods.push(function);
                }
            }
        }
        Ok(listing)
    }

    fn class_entry(&self, name: &str, class: &ClassObject) -> ClassEntry {
        ClassEntry {
            name: name.to_string(),
            bases: class.bases().iter().map(|b| b.name().to_string()).collect(),
            description: class
                .doc()
                .and_then(|doc| self.parse_doc(doc, class.qualname()))
                .and_then(|doc| doc.description().map(str::to_string)),
        }
    }
}

fn skip_invalid(name: &str, result: Result<Function, InspectError>) -> Option<Function> {
    match result {
        Ok(function) => Some(function),
        Err(error) => {
            tracing::warn!(%error, member = name, "leaving callable out of listing");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objinspect_core::{Callable, ParameterKind, PropertyObject, RawParameter};
    use pretty_assertions::assert_eq;

    fn method(name: &str) -> Arc<Callable> {
        Callable::builder(name)
            .param(RawParameter::new("self", ParameterKind::PositionalOrKeyword))
            .build()
    }

    fn names(functions: &[Function]) -> Vec<&str> {
        functions.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn module_names_grouped_by_kind() {
        let mut module = ModuleObject::new("tools");
        module.insert("LIMIT", Value::Int(3));
        module.insert("__file__", Value::from("tools.py"));
        module.insert("helper", Callable::builder("helper").doc("Help.").build());
        module.insert("__getattr__", Callable::builder("__getattr__").build());
        module.insert(
            "Widget",
            ClassObject::builder("Widget").doc("A widget.").build(),
        );

        let listing = Inspector::new().module_listing(&module);
        assert_eq!(listing.name, "tools");
        assert_eq!(listing.variables, [("LIMIT".to_string(), Value::Int(3))]);
        assert_eq!(names(&listing.functions), ["helper"]);
        assert_eq!(names(&listing.dunders), ["__getattr__"]);
        assert_eq!(
            listing.classes,
            [ClassEntry {
                name: "Widget".into(),
                bases: Vec::new(),
                description: Some("A widget.".into()),
            }]
        );
        assert!(listing.methods.is_empty());
    }

    #[test]
    fn class_names_include_inherited_once() {
        let base = ClassObject::builder("Base")
            .method(method("run"))
            .method(method("__len__"))
            .attribute("KIND", "base")
            .build();
        let child = ClassObject::builder("Child")
            .base(base)
            .method(method("run"))
            .property("size", PropertyObject::read_only(method("size")))
            .attribute("KIND", "child")
            .build();

        let listing = Inspector::new().class_listing(&child).unwrap();
        assert_eq!(names(&listing.methods), ["run", "size"]);
        assert_eq!(names(&listing.dunders), ["__len__"]);
        assert_eq!(listing.variables, [("KIND".to_string(), Value::from("child"))]);
        assert!(listing.functions.is_empty());
    }

    #[test]
    fn empty_module_lists_nothing() {
        let listing = Inspector::new().module_listing(&ModuleObject::new("empty"));
        assert!(listing.is_empty());
    }
}
