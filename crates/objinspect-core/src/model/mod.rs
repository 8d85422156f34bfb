//! Inspection models: immutable snapshots of a callable surface.

mod binding;
mod class;
mod function;
mod parameter;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use binding::{BoundArguments, split_args_kwargs, split_init_args};
pub use class::{Class, Inspected, Member, Method, MethodBinding, Property, Visibility};
pub use function::Function;
pub use parameter::{Annotation, DefaultValue, Parameter, ParameterKind};

use crate::errors::InspectError;

/// Ordered key/value view of a model.
///
/// The mapping is a JSON object whose keys follow field declaration order.
/// Rebuilding from it gives back an equal model.
pub trait MappingView: Serialize + DeserializeOwned {
    /// # Errors
    /// Returns `Mapping` if the model cannot be represented.
    fn to_mapping(&self) -> Result<serde_json::Value, InspectError> {
        Ok(serde_json::to_value(self)?)
    }

    /// # Errors
    /// Returns `Mapping` if the value does not describe this model.
    fn from_mapping(value: serde_json::Value) -> Result<Self, InspectError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl MappingView for Parameter {}
impl MappingView for Function {}
impl MappingView for Method {}
impl MappingView for Property {}
impl MappingView for Member {}
impl MappingView for Class {}
impl MappingView for Inspected {}
