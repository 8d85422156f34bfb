use std::sync::Arc;

use objinspect_core::{ClassMember, InspectError, Inspected, Member, Object};

use crate::filter::MemberFilter;
use crate::signature::{Inspector, lookup, not_callable};

impl Inspector {
    /// Inspect any object.
    ///
    /// Free callables become `Function`, class members become `Method` or
    /// `Property`, and classes become `Class` filtered by `filter`.
    ///
    /// # Errors
    /// `InvalidTarget` for modules, plain values, and data attributes;
    /// `UnknownMember` for a member name the class does not have.
    pub fn inspect(
        &self,
        object: &Object,
        filter: &MemberFilter,
    ) -> Result<Inspected, InspectError> {
        match object {
            Object::Callable(callable) => Ok(Inspected::Function(self.function(callable)?)),
            Object::Class(class) => Ok(Inspected::Class(self.class(class, filter)?)),
            Object::Member { class, name } => {
                let (owner, entry) = lookup(class, name)?;
                if matches!(entry, ClassMember::Attribute(_)) {
                    return Err(not_callable(object));
                }
                let is_inherited = !Arc::ptr_eq(&owner, class);
                Ok(match self.member(name, &entry, &owner, is_inherited)? {
                    Member::Method(method) => Inspected::Method(method),
                    Member::Property(property) => Inspected::Property(property),
                })
            }
            Object::Module(_) | Object::Value(_) => Err(not_callable(object)),
        }
    }
}

/// Inspect with the default documentation parser.
///
/// # Errors
/// See [`Inspector::inspect`].
pub fn inspect(object: &Object, filter: &MemberFilter) -> Result<Inspected, InspectError> {
    Inspector::new().inspect(object, filter)
}
