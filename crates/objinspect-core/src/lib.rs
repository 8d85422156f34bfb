//! # objinspect-core
//!
//! Core types shared by every objinspect crate:
//! - Inspection models (`Parameter`, `Function`, `Method`, `Property`, `Class`)
//!   with their "not declared" sentinels
//! - Reflection objects (`Callable`, `ClassObject`, `ModuleObject`, `Object`)
//!   that stand in for live runtime objects
//! - Literal values and type expressions
//! - Argument binding against an inspected signature
//! - Cross-cutting error types

pub mod errors;
pub mod model;
pub mod reflect;
pub mod typing;
pub mod value;

pub use errors::{BindError, InspectError};
pub use model::{
    Annotation, BoundArguments, Class, DefaultValue, Function, Inspected, MappingView, Member,
    Method, MethodBinding, Parameter, ParameterKind, Property, Visibility, split_args_kwargs,
    split_init_args,
};
pub use reflect::{
    Callable, ClassMember, ClassObject, ModuleObject, NativeFn, Object, PropertyObject,
    RawAnnotation, RawParameter,
};
pub use typing::TypeExpr;
pub use value::Value;
