//! Class reflection objects and method-resolution order.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::errors::InspectError;
use crate::value::Value;

use super::callable::Callable;

const ENUM_BASES: &[&str] = &["Enum", "IntEnum", "StrEnum", "Flag", "IntFlag"];

/// Accessor functions behind a property.
#[derive(Debug, Clone)]
pub struct PropertyObject {
    pub getter: Arc<Callable>,
    pub setter: Option<Arc<Callable>>,
}

impl PropertyObject {
    #[must_use]
    pub const fn read_only(getter: Arc<Callable>) -> Self {
        Self {
            getter,
            setter: None,
        }
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}

/// An entry in a class namespace, tagged with how it binds.
#[derive(Debug, Clone)]
pub enum ClassMember {
    /// Plain function: binds the instance as first argument.
    Method(Arc<Callable>),
    /// Binds the class as first argument.
    ClassMethod(Arc<Callable>),
    /// Binds nothing.
    StaticMethod(Arc<Callable>),
    Property(PropertyObject),
    /// A data attribute (class variable, enum member).
    Attribute(Value),
}

impl ClassMember {
    /// The callable behind this member, if it is one.
    #[must_use]
    pub const fn callable(&self) -> Option<&Arc<Callable>> {
        match self {
            Self::Method(c) | Self::ClassMethod(c) | Self::StaticMethod(c) => Some(c),
            Self::Property(p) => Some(&p.getter),
            Self::Attribute(_) => None,
        }
    }
}

/// A class: name, documentation, ordered bases, and its own namespace.
///
/// The namespace holds only what the class body defines. Inherited members are
/// found through [`ClassObject::mro`], linearized once when the class is built.
#[derive(Debug, Clone)]
pub struct ClassObject {
    name: String,
    qualname: String,
    doc: Option<String>,
    bases: Vec<Arc<ClassObject>>,
    namespace: Vec<(String, ClassMember)>,
    external: bool,
    /// Ancestors in C3 order, or why no consistent order exists.
    ancestors: Result<Vec<Arc<ClassObject>>, String>,
}

impl ClassObject {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        let name = name.into();
        ClassBuilder {
            inner: Self {
                qualname: name.clone(),
                name,
                doc: None,
                bases: Vec::new(),
                namespace: Vec::new(),
                external: false,
                ancestors: Ok(Vec::new()),
            },
        }
    }

    /// A class known only by name (defined outside what was loaded).
    #[must_use]
    pub fn external(name: impl Into<String>) -> Arc<Self> {
        let mut builder = Self::builder(name);
        builder.inner.external = true;
        builder.build()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn qualname(&self) -> &str {
        &self.qualname
    }

    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    #[must_use]
    pub fn bases(&self) -> &[Arc<Self>] {
        &self.bases
    }

    /// Own namespace in definition order.
    #[must_use]
    pub fn namespace(&self) -> &[(String, ClassMember)] {
        &self.namespace
    }

    /// Whether the class body was not available to inspect.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        self.external
    }

    /// Member defined directly in this class body.
    #[must_use]
    pub fn own_member(&self, name: &str) -> Option<&ClassMember> {
        self.namespace
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, member)| member)
    }

    /// C3 linearization, most-derived first, starting with this class.
    ///
    /// # Errors
    /// Returns `InvalidTarget` when the bases admit no consistent order.
    pub fn mro(self: &Arc<Self>) -> Result<Vec<Arc<Self>>, InspectError> {
        let ancestors = self.ancestors()?;
        let mut mro = Vec::with_capacity(ancestors.len() + 1);
        mro.push(Arc::clone(self));
        mro.extend(ancestors.iter().cloned());
        Ok(mro)
    }

    /// The linearization without the class itself.
    ///
    /// # Errors
    /// Returns `InvalidTarget` when the bases admit no consistent order.
    pub fn ancestors(&self) -> Result<&[Arc<Self>], InspectError> {
        self.ancestors
            .as_deref()
            .map_err(|reason| InspectError::invalid_target(&self.qualname, reason.as_str()))
    }

    /// Resolve a member name through the MRO: the defining class and the member.
    ///
    /// # Errors
    /// Propagates MRO failures.
    pub fn find_member(
        self: &Arc<Self>,
        name: &str,
    ) -> Result<Option<(Arc<Self>, ClassMember)>, InspectError> {
        if let Some(member) = self.own_member(name) {
            return Ok(Some((Arc::clone(self), member.clone())));
        }
        Ok(self.ancestors()?.iter().find_map(|class| {
            class
                .own_member(name)
                .map(|member| (Arc::clone(class), member.clone()))
        }))
    }

    /// Whether any ancestor (or the class itself) has this name.
    #[must_use]
    pub fn derives_from(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        match &self.ancestors {
            Ok(ancestors) => ancestors.iter().any(|class| class.name == name),
            Err(_) => self.bases.iter().any(|base| base.derives_from(name)),
        }
    }

    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.bases
            .iter()
            .any(|base| ENUM_BASES.iter().any(|e| base.derives_from(e)))
    }

    /// Member names of an enum class, in definition order.
    #[must_use]
    pub fn enum_choices(&self) -> Option<Vec<&str>> {
        if !self.is_enum() {
            return None;
        }
        Some(
            self.namespace
                .iter()
                .filter(|(name, member)| {
                    matches!(member, ClassMember::Attribute(_)) && !name.starts_with('_')
                })
                .map(|(name, _)| name.as_str())
                .collect(),
        )
    }
}

/// Incremental construction of a [`ClassObject`].
pub struct ClassBuilder {
    inner: ClassObject,
}

impl ClassBuilder {
    #[must_use]
    pub fn qualname(mut self, qualname: impl Into<String>) -> Self {
        self.inner.qualname = qualname.into();
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.inner.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn base(mut self, base: Arc<ClassObject>) -> Self {
        self.inner.bases.push(base);
        self
    }

    /// Insert or replace a namespace entry. A replaced entry keeps its position.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, member: ClassMember) -> Self {
        self.insert(name.into(), member);
        self
    }

    #[must_use]
    pub fn method(self, callable: Arc<Callable>) -> Self {
        let name = callable.name().to_string();
        self.member(name, ClassMember::Method(callable))
    }

    #[must_use]
    pub fn class_method(self, callable: Arc<Callable>) -> Self {
        let name = callable.name().to_string();
        self.member(name, ClassMember::ClassMethod(callable))
    }

    #[must_use]
    pub fn static_method(self, callable: Arc<Callable>) -> Self {
        let name = callable.name().to_string();
        self.member(name, ClassMember::StaticMethod(callable))
    }

    #[must_use]
    pub fn property(self, name: impl Into<String>, property: PropertyObject) -> Self {
        self.member(name, ClassMember::Property(property))
    }

    #[must_use]
    pub fn attribute(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, ClassMember::Attribute(value.into()))
    }

    /// Current entry for `name`, used when a decorator refers back to it
    /// (`@value.setter`).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassMember> {
        self.inner.own_member(name)
    }

    pub fn insert(&mut self, name: String, member: ClassMember) {
        if let Some(slot) = self.inner.namespace.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = member;
        } else {
            self.inner.namespace.push((name, member));
        }
    }

    /// Finish the class, linearizing its bases. An inconsistent hierarchy is
    /// kept and reported by [`ClassObject::mro`].
    #[must_use]
    pub fn build(mut self) -> Arc<ClassObject> {
        self.inner.ancestors = linearize(&self.inner.bases);
        Arc::new(self.inner)
    }
}

/// C3 merge of the bases' own linearizations and the base list itself.
fn linearize(bases: &[Arc<ClassObject>]) -> Result<Vec<Arc<ClassObject>>, String> {
    let mut sequences: Vec<VecDeque<Arc<ClassObject>>> = Vec::with_capacity(bases.len() + 1);
    for base in bases {
        let inherited = base.ancestors.as_ref().map_err(|reason| {
            format!("base {} has no consistent order: {reason}", base.name)
        })?;
        let mut sequence = VecDeque::with_capacity(inherited.len() + 1);
        sequence.push_back(Arc::clone(base));
        sequence.extend(inherited.iter().cloned());
        sequences.push(sequence);
    }
    sequences.push(bases.iter().cloned().collect());

    let mut result = Vec::new();
    loop {
        sequences.retain(|seq| !seq.is_empty());
        let Some(next) = sequences
            .iter()
            .filter_map(VecDeque::front)
            .find(|head| {
                !sequences
                    .iter()
                    .any(|seq| seq.iter().skip(1).any(|c| Arc::ptr_eq(c, head)))
            })
            .cloned()
        else {
            if sequences.is_empty() {
                return Ok(result);
            }
            let names = bases
                .iter()
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(format!(
                "cannot create a consistent method resolution order for bases {names}"
            ));
        };

        for seq in &mut sequences {
            if seq.front().is_some_and(|head| Arc::ptr_eq(head, &next)) {
                seq.pop_front();
            }
        }
        result.push(next);
    }
}
