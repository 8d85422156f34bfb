//! Member walking: a class and a filter in, a `Class` model out.

use std::collections::HashSet;
use std::sync::Arc;

use objinspect_core::{
    Callable, Class, ClassMember, ClassObject, InspectError, Member, Method, MethodBinding, Object,
    Property, PropertyObject,
};
use objinspect_docs::clean_doc;

use crate::filter::{CONSTRUCTOR, MemberFilter, MemberKind};
use crate::signature::Inspector;

impl Inspector {
    /// Build the class model: constructor first, then members in resolution
    /// order, each class's members in declaration order.
    ///
    /// With inheritance on, the most-derived definition of a name hides every
    /// ancestor definition, even when it is a plain attribute or is filtered
    /// out itself.
    ///
    /// # Errors
    /// `InvalidTarget` for an inconsistent hierarchy or any member whose
    /// signature is ill-formed.
    pub fn class(
        &self,
        class: &Arc<ClassObject>,
        filter: &MemberFilter,
    ) -> Result<Class, InspectError> {
        let mro = class.mro()?;
        let sources: Vec<&Arc<ClassObject>> = if filter.include_inherited {
            mro.iter().collect()
        } else {
            vec![class]
        };

        let mut seen: HashSet<&str> = HashSet::new();
        let mut constructor: Option<Member> = None;
        let mut members: Vec<Member> = Vec::new();

        for owner in sources {
            if owner.is_external() {
                tracing::debug!(class = owner.name(), "skipping members of external class");
                continue;
            }
            let is_inherited = !Arc::ptr_eq(owner, class);
            for (name, entry) in owner.namespace() {
                if !seen.insert(name.as_str()) {
                    tracing::debug!(
                        member = %name,
                        owner = owner.name(),
                        "shadowed by a derived class"
                    );
                    continue;
                }
                let Some(kind) = member_kind(entry) else {
                    continue;
                };
                if !filter.allows(name, kind) {
                    tracing::debug!(member = %name, "excluded by member filter");
                    continue;
                }
                let member = self.member(name, entry, owner, is_inherited)?;
                if name == CONSTRUCTOR {
                    constructor = Some(member);
                } else {
                    members.push(member);
                }
            }
        }

        let mut ordered = Vec::with_capacity(members.len() + 1);
        ordered.extend(constructor);
        ordered.extend(members);

        let mut model = Class {
            name: class.name().to_string(),
            description: None,
            docstring: None,
            members: ordered,
            include_inherited: filter.include_inherited,
            mro: mro.iter().map(|c| c.name().to_string()).collect(),
        };
        if let Some(raw) = class.doc() {
            let cleaned = clean_doc(raw);
            if !cleaned.is_empty() {
                model.description = self
                    .parse_doc(raw, class.qualname())
                    .and_then(|doc| doc.description().map(str::to_string));
                model.docstring = Some(cleaned);
            }
        }
        Ok(model)
    }

    /// [`Inspector::class`] for an arbitrary object.
    ///
    /// # Errors
    /// `InvalidTarget` when `object` is not a class.
    pub fn class_of(&self, object: &Object, filter: &MemberFilter) -> Result<Class, InspectError> {
        match object {
            Object::Class(class) => self.class(class, filter),
            other => Err(InspectError::InvalidTarget {
                target: other.display_name(),
                reason: format!("a {} is not a class", other.kind_name()),
            }),
        }
    }

    pub(crate) fn member(
        &self,
        name: &str,
        entry: &ClassMember,
        owner: &ClassObject,
        is_inherited: bool,
    ) -> Result<Member, InspectError> {
        let method = |callable: &Arc<Callable>, binding| -> Result<Member, InspectError> {
            let mut function = self.method_function(callable, binding)?;
            function.name = name.to_string();
            Ok(Member::Method(Method {
                function,
                owner: owner.name().to_string(),
                binding,
                is_constructor: name == CONSTRUCTOR,
                is_inherited,
            }))
        };

        match entry {
            ClassMember::Method(c) => method(c, MethodBinding::Instance),
            ClassMember::ClassMethod(c) => method(c, MethodBinding::Class),
            ClassMember::StaticMethod(c) => method(c, MethodBinding::Static),
            ClassMember::Property(property) => {
                Ok(Member::Property(self.property(name, property, owner, is_inherited)?))
            }
            ClassMember::Attribute(_) => Err(InspectError::InvalidTarget {
                target: format!("{}.{name}", owner.qualname()),
                reason: "a data attribute is not a class member".to_string(),
            }),
        }
    }

    fn property(
        &self,
        name: &str,
        property: &PropertyObject,
        owner: &ClassObject,
        is_inherited: bool,
    ) -> Result<Property, InspectError> {
        let getter = self.method_function(&property.getter, MethodBinding::Instance)?;
        Ok(Property {
            name: name.to_string(),
            ty: getter.return_type,
            description: getter.description,
            writable: property.is_writable(),
            owner: owner.name().to_string(),
            is_inherited,
        })
    }
}

const fn member_kind(entry: &ClassMember) -> Option<MemberKind> {
    match entry {
        ClassMember::Method(_) => Some(MemberKind::Method(MethodBinding::Instance)),
        ClassMember::ClassMethod(_) => Some(MemberKind::Method(MethodBinding::Class)),
        ClassMember::StaticMethod(_) => Some(MemberKind::Method(MethodBinding::Static)),
        ClassMember::Property(_) => Some(MemberKind::Property),
        ClassMember::Attribute(_) => None,
    }
}
