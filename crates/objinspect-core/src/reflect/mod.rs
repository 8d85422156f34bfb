//! Reflection objects standing in for live runtime objects.
//!
//! Everything here is immutable once built and shared through `Arc`, so any
//! number of inspections may read the same object concurrently.

mod callable;
mod class;

use std::sync::Arc;

pub use callable::{Callable, CallableBuilder, NativeFn, RawAnnotation, RawParameter};
pub use class::{ClassBuilder, ClassMember, ClassObject, PropertyObject};

use crate::errors::InspectError;
use crate::value::Value;

/// Any object that can be handed to an inspection call.
#[derive(Debug, Clone)]
pub enum Object {
    /// A free function.
    Callable(Arc<Callable>),
    /// A member looked up through a class (`Class.method`).
    Member { class: Arc<ClassObject>, name: String },
    Class(Arc<ClassObject>),
    Module(Arc<ModuleObject>),
    Value(Value),
}

impl Object {
    /// What kind of object this is, for messages.
    #[must_use]
    pub fn kind_name(&self) -> String {
        match self {
            Self::Callable(_) => "function".to_string(),
            Self::Member { .. } => "class member".to_string(),
            Self::Class(_) => "class".to_string(),
            Self::Module(_) => "module".to_string(),
            Self::Value(value) => value.type_name().unwrap_or("expression").to_string(),
        }
    }

    /// Name used when reporting on this object.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Callable(c) => c.qualname().to_string(),
            Self::Member { class, name } => format!("{}.{name}", class.qualname()),
            Self::Class(c) => c.qualname().to_string(),
            Self::Module(m) => m.name().to_string(),
            Self::Value(v) => v.to_string(),
        }
    }
}

impl From<Arc<Callable>> for Object {
    fn from(value: Arc<Callable>) -> Self {
        Self::Callable(value)
    }
}

impl From<Arc<ClassObject>> for Object {
    fn from(value: Arc<ClassObject>) -> Self {
        Self::Class(value)
    }
}

impl From<Value> for Object {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// A module: a named, ordered namespace.
#[derive(Debug, Clone, Default)]
pub struct ModuleObject {
    name: String,
    doc: Option<String>,
    namespace: Vec<(String, Object)>,
}

impl ModuleObject {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    #[must_use]
    pub fn namespace(&self) -> &[(String, Object)] {
        &self.namespace
    }

    /// Bind a name; rebinding replaces the object in place.
    pub fn insert(&mut self, name: impl Into<String>, object: impl Into<Object>) {
        let name = name.into();
        let object = object.into();
        if let Some(slot) = self.namespace.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = object;
        } else {
            self.namespace.push((name, object));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Object> {
        self.namespace
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, object)| object)
    }

    /// Class bound under `name`, if that name holds a class.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&Arc<ClassObject>> {
        match self.get(name) {
            Some(Object::Class(class)) => Some(class),
            _ => None,
        }
    }

    /// Resolve a dotted path: `func`, `Class`, or `Class.member`.
    ///
    /// # Errors
    /// Returns `UnknownMember` when a segment does not exist, and
    /// `InvalidTarget` when a segment other than the last is not a class.
    pub fn resolve(&self, path: &str) -> Result<Object, InspectError> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = self
            .get(first)
            .cloned()
            .ok_or_else(|| InspectError::UnknownMember {
                owner: format!("module {}", self.name),
                member: first.to_string(),
            })?;

        for segment in segments {
            let Object::Class(class) = &current else {
                return Err(InspectError::invalid_target(
                    current.display_name(),
                    format!("cannot look up '{segment}' on a {}", current.kind_name()),
                ));
            };
            let class = Arc::clone(class);
            current = match class.find_member(segment)? {
                Some((_, ClassMember::Attribute(value))) => Object::Value(value),
                Some(_) => Object::Member {
                    class,
                    name: segment.to_string(),
                },
                None => {
                    return Err(InspectError::UnknownMember {
                        owner: format!("class {}", class.qualname()),
                        member: segment.to_string(),
                    });
                }
            };
        }
        Ok(current)
    }
}
