//! Binding call arguments to an inspected signature, and invoking through it.

use crate::errors::{BindError, InspectError};
use crate::value::Value;

use super::class::{Class, Method};
use super::function::Function;
use super::parameter::{DefaultValue, ParameterKind};

/// Arguments matched to parameters, defaults applied, in signature order.
///
/// `*args` collects into a `Value::Tuple` and `**kwargs` into a `Value::Dict`
/// with string keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    entries: Vec<(String, ParameterKind, Value)>,
}

impl BoundArguments {
    /// Value bound to a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, _, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParameterKind, &Value)> {
        self.entries
            .iter()
            .map(|(name, kind, value)| (name.as_str(), *kind, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positional part of the call, `*args` expanded.
    #[must_use]
    pub fn args(&self) -> Vec<Value> {
        let mut args = Vec::new();
        for (_, kind, value) in &self.entries {
            match (kind, value) {
                (ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword, v) => {
                    args.push(v.clone());
                }
                (ParameterKind::VarPositional, Value::Tuple(items)) => {
                    args.extend(items.iter().cloned());
                }
                _ => {}
            }
        }
        args
    }

    /// Keyword part of the call, `**kwargs` expanded.
    #[must_use]
    pub fn kwargs(&self) -> Vec<(String, Value)> {
        let mut kwargs = Vec::new();
        for (name, kind, value) in &self.entries {
            match (kind, value) {
                (ParameterKind::KeywordOnly, v) => kwargs.push((name.clone(), v.clone())),
                (ParameterKind::VarKeyword, Value::Dict(items)) => {
                    for (key, v) in items {
                        if let Value::Str(key) = key {
                            kwargs.push((key.clone(), v.clone()));
                        }
                    }
                }
                _ => {}
            }
        }
        kwargs
    }
}

impl Function {
    /// Match `args` and `kwargs` against the parameters.
    ///
    /// # Errors
    /// Returns a [`BindError`] for missing, duplicate, surplus, or unexpected
    /// arguments, and for positional-only parameters passed by keyword.
    pub fn bind(
        &self,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> Result<BoundArguments, BindError> {
        let positional_slots = self
            .parameters
            .iter()
            .filter(|p| p.kind.accepts_positional())
            .count();
        let has_var_positional = self
            .parameters
            .iter()
            .any(|p| p.kind == ParameterKind::VarPositional);
        let has_var_keyword = self
            .parameters
            .iter()
            .any(|p| p.kind == ParameterKind::VarKeyword);

        if !has_var_positional && args.len() > positional_slots {
            return Err(BindError::TooManyPositional {
                expected: positional_slots,
                given: args.len(),
            });
        }

        let mut remaining_kwargs: Vec<(String, Value)> = Vec::with_capacity(kwargs.len());
        for (name, value) in kwargs {
            if remaining_kwargs.iter().any(|(n, _)| *n == name) {
                return Err(BindError::MultipleValues(name));
            }
            remaining_kwargs.push((name, value));
        }

        let mut positional = args.into_iter();
        let mut bound = BoundArguments::default();

        for param in &self.parameters {
            let keyword_index = remaining_kwargs.iter().position(|(n, _)| *n == param.name);
            let value = match param.kind {
                ParameterKind::PositionalOnly => match positional.next() {
                    Some(value) => Some(value),
                    None if keyword_index.is_some() && !has_var_keyword => {
                        return Err(BindError::PositionalOnlyAsKeyword(param.name.clone()));
                    }
                    None => None,
                },
                ParameterKind::PositionalOrKeyword => match (positional.next(), keyword_index) {
                    (Some(_), Some(_)) => {
                        return Err(BindError::MultipleValues(param.name.clone()));
                    }
                    (Some(value), None) => Some(value),
                    (None, Some(index)) => Some(remaining_kwargs.remove(index).1),
                    (None, None) => None,
                },
                ParameterKind::VarPositional => Some(Value::Tuple(positional.by_ref().collect())),
                ParameterKind::KeywordOnly => {
                    keyword_index.map(|index| remaining_kwargs.remove(index).1)
                }
                ParameterKind::VarKeyword => Some(Value::Dict(
                    remaining_kwargs
                        .drain(..)
                        .map(|(name, value)| (Value::Str(name), value))
                        .collect(),
                )),
            };

            let value = match (value, &param.default) {
                (Some(value), _) => value,
                (None, DefaultValue::Value(default)) => default.clone(),
                (None, DefaultValue::NoDefault) => {
                    return Err(BindError::Missing(param.name.clone()));
                }
            };
            bound.entries.push((param.name.clone(), param.kind, value));
        }

        if let Some((name, _)) = remaining_kwargs.into_iter().next() {
            let positional_only = self
                .parameters
                .iter()
                .any(|p| p.name == name && p.kind == ParameterKind::PositionalOnly);
            return Err(if positional_only {
                BindError::PositionalOnlyAsKeyword(name)
            } else {
                BindError::UnexpectedKeyword(name)
            });
        }

        Ok(bound)
    }

    /// Bind the arguments and run the source callable's native body.
    ///
    /// # Errors
    /// `NotInvocable` when there is no body, `Bind` when the arguments do not
    /// fit, and `CallFailed` when the body reports an error.
    pub fn call(
        &self,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> Result<Value, InspectError> {
        let body = self
            .source()
            .and_then(|callable| callable.body())
            .ok_or_else(|| InspectError::NotInvocable(self.name.clone()))?;
        let bound = self.bind(args, kwargs)?;
        body(&bound).map_err(|message| InspectError::CallFailed {
            callable: self.name.clone(),
            message,
        })
    }
}

/// Split named argument values into a positional tuple and keyword pairs.
///
/// Positional-only parameters and `*args` go to the positional part; every
/// other parameter is passed by keyword, with `**kwargs` expanded. Parameters
/// without a value are skipped so their defaults apply.
#[must_use]
pub fn split_args_kwargs(
    values: &[(String, Value)],
    function: &Function,
) -> (Vec<Value>, Vec<(String, Value)>) {
    let mut args = Vec::new();
    let mut kwargs = Vec::new();
    for param in function.params() {
        let Some((_, value)) = values.iter().find(|(name, _)| *name == param.name) else {
            continue;
        };
        match (param.kind, value) {
            (ParameterKind::PositionalOnly, v) => args.push(v.clone()),
            (ParameterKind::VarPositional, Value::Tuple(items) | Value::List(items)) => {
                args.extend(items.iter().cloned());
            }
            (ParameterKind::VarKeyword, Value::Dict(items)) => {
                kwargs.extend(items.iter().filter_map(|(key, v)| match key {
                    Value::Str(key) => Some((key.clone(), v.clone())),
                    _ => None,
                }));
            }
            (_, v) => kwargs.push((param.name.clone(), v.clone())),
        }
    }
    (args, kwargs)
}

/// Split a flat argument map between the class constructor and a method call.
///
/// Static methods need no instance, so everything goes to the method. Returns
/// `(constructor_values, method_values)`.
#[must_use]
pub fn split_init_args(
    values: Vec<(String, Value)>,
    class: &Class,
    method: &Method,
) -> (Vec<(String, Value)>, Vec<(String, Value)>) {
    let init_names: Vec<&str> = match class.init_args() {
        Some(params) if !method.is_static() => params.iter().map(|p| p.name.as_str()).collect(),
        _ => return (Vec::new(), values),
    };
    values
        .into_iter()
        .partition(|(name, _)| init_names.contains(&name.as_str()))
}
