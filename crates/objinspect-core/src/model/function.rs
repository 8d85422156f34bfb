use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::reflect::Callable;

use super::parameter::{Annotation, Parameter};

/// Inspected signature and documentation of a callable.
///
/// Holds a shared handle to the source callable so callers can invoke it
/// later. The handle is not part of the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Annotation,
    /// Summary line from the documentation.
    pub description: Option<String>,
    /// Cleaned documentation text.
    pub docstring: Option<String>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(skip)]
    source: Option<Arc<Callable>>,
}

impl Function {
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type: Annotation::Unresolved,
            description: None,
            docstring: None,
            is_async: false,
            source: None,
        }
    }

    /// Attach the callable this model was extracted from.
    #[must_use]
    pub fn with_source(mut self, source: Arc<Callable>) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub const fn source(&self) -> Option<&Arc<Callable>> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Parameter by position.
    #[must_use]
    pub fn param_at(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    #[must_use]
    pub fn has_docstring(&self) -> bool {
        self.docstring.as_deref().is_some_and(|doc| !doc.is_empty())
    }

    /// Parameters a call must supply.
    pub fn required_params(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.is_required())
    }
}

/// Equality over the inspected data; the source handle is ignored.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.parameters == other.parameters
            && self.return_type == other.return_type
            && self.description == other.description
            && self.docstring == other.docstring
            && self.is_async == other.is_async
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterKind;

    #[test]
    fn lookup_by_name_and_index() {
        let function = Function::new(
            "f",
            vec![
                Parameter::new("a", ParameterKind::PositionalOrKeyword),
                Parameter::new("b", ParameterKind::KeywordOnly),
            ],
        );
        assert_eq!(function.param("b").map(|p| p.kind), Some(ParameterKind::KeywordOnly));
        assert_eq!(function.param_at(0).map(|p| p.name.as_str()), Some("a"));
        assert!(function.param("c").is_none());
        assert_eq!(function.required_params().count(), 2);
    }

    #[test]
    fn source_handle_is_not_serialized() {
        let callable = Callable::builder("f").build();
        let function = Function::new("f", Vec::new()).with_source(callable);
        let json = serde_json::to_value(&function).expect("serialize");
        assert!(json.get("source").is_none());
        let back: Function = serde_json::from_value(json).expect("deserialize");
        assert!(back.source().is_none());
        assert_eq!(back, function);
    }
}
