use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::function::Function;
use super::parameter::{Annotation, Parameter};

/// How a class member binds when accessed through an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MethodBinding {
    Instance,
    Class,
    Static,
}

impl MethodBinding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instance => "method",
            Self::Class => "classmethod",
            Self::Static => "staticmethod",
        }
    }
}

impl fmt::Display for MethodBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Naming-convention visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    /// `_name`
    Protected,
    /// `__name` (name-mangled)
    Private,
    /// `__name__`
    Dunder,
}

impl Visibility {
    /// Classify a member name:
    /// - `__dunder__` (starts AND ends with `__`) -> Dunder
    /// - `__name_mangled` -> Private
    /// - `_protected` -> Protected
    /// - everything else -> Public
    #[must_use]
    pub fn of(name: &str) -> Self {
        if name.starts_with("__") && name.ends_with("__") && name.len() > 4 {
            Self::Dunder
        } else if name.starts_with("__") {
            Self::Private
        } else if name.starts_with('_') {
            Self::Protected
        } else {
            Self::Public
        }
    }
}

/// A function found on a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Method {
    #[serde(flatten)]
    pub function: Function,
    /// Class whose body defines the method.
    pub owner: String,
    pub binding: MethodBinding,
    pub is_constructor: bool,
    /// Defined on an ancestor rather than on the inspected class.
    pub is_inherited: bool,
}

impl Method {
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        Visibility::of(&self.function.name)
    }

    #[must_use]
    pub const fn is_static(&self) -> bool {
        matches!(self.binding, MethodBinding::Static)
    }

    #[must_use]
    pub const fn is_classmethod(&self) -> bool {
        matches!(self.binding, MethodBinding::Class)
    }
}

impl Deref for Method {
    type Target = Function;

    fn deref(&self) -> &Self::Target {
        &self.function
    }
}

/// An attribute-like member backed by accessor functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Annotation,
    pub description: Option<String>,
    pub writable: bool,
    pub owner: String,
    pub is_inherited: bool,
}

impl Property {
    /// The property as a zero-parameter function returning its type.
    #[must_use]
    pub fn as_function(&self) -> Function {
        let mut function = Function::new(self.name.clone(), Vec::new());
        function.return_type = self.ty.clone();
        function.description.clone_from(&self.description);
        function
    }
}

/// One entry in a class listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Method(Method),
    Property(Property),
}

impl Member {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Method(m) => &m.function.name,
            Self::Property(p) => &p.name,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Method(m) => m.function.description.as_deref(),
            Self::Property(p) => p.description.as_deref(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Self::Method(m) => &m.owner,
            Self::Property(p) => &p.owner,
        }
    }

    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        match self {
            Self::Method(m) => m.is_inherited,
            Self::Property(p) => p.is_inherited,
        }
    }

    /// Uniform function view; properties become zero-parameter functions.
    #[must_use]
    pub fn function(&self) -> Cow<'_, Function> {
        match self {
            Self::Method(m) => Cow::Borrowed(&m.function),
            Self::Property(p) => Cow::Owned(p.as_function()),
        }
    }

    #[must_use]
    pub const fn as_method(&self) -> Option<&Method> {
        match self {
            Self::Method(m) => Some(m),
            Self::Property(_) => None,
        }
    }
}

/// Inspected class: its members after inheritance and visibility filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Class {
    pub name: String,
    pub description: Option<String>,
    pub docstring: Option<String>,
    /// Constructor first, then members in resolution order.
    pub members: Vec<Member>,
    /// Whether ancestors were walked when this model was built.
    pub include_inherited: bool,
    /// Method-resolution order (class names, most-derived first).
    pub mro: Vec<String>,
}

impl Class {
    /// Member by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Member by position.
    #[must_use]
    pub fn member_at(&self, index: usize) -> Option<&Member> {
        self.members.get(index)
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(Member::as_method)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(p) => Some(p),
            Member::Method(_) => None,
        })
    }

    #[must_use]
    pub fn init_method(&self) -> Option<&Method> {
        self.methods().find(|m| m.is_constructor)
    }

    #[must_use]
    pub fn has_init(&self) -> bool {
        self.init_method().is_some()
    }

    /// Constructor parameters, without the implicit instance parameter.
    #[must_use]
    pub fn init_args(&self) -> Option<&[Parameter]> {
        self.init_method().map(|m| m.function.params())
    }

    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(Member::name).collect()
    }
}

/// Result of inspecting an arbitrary object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Inspected {
    Function(Function),
    Method(Method),
    Property(Property),
    Class(Class),
}

impl Inspected {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Method(m) => &m.function.name,
            Self::Property(p) => &p.name,
            Self::Class(c) => &c.name,
        }
    }
}
