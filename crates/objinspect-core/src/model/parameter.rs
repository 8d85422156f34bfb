use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::typing::TypeExpr;
use crate::value::Value;

/// Binding category of a parameter.
///
/// Variants are declared in binding order, so `Ord` gives the order kinds must
/// appear in within a valid signature.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    PositionalOnly,
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

impl ParameterKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PositionalOnly => "positional_only",
            Self::PositionalOrKeyword => "positional_or_keyword",
            Self::VarPositional => "var_positional",
            Self::KeywordOnly => "keyword_only",
            Self::VarKeyword => "var_keyword",
        }
    }

    #[must_use]
    pub const fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }

    /// Whether an argument for this parameter may be passed positionally.
    #[must_use]
    pub const fn accepts_positional(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter or return type: declared, or the `Unresolved` sentinel.
///
/// `Unresolved` means "nothing declared" (or an unevaluated forward
/// reference). It never equals a declared type, including `TypeExpr::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    Unresolved,
    Type(TypeExpr),
}

impl Annotation {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Type(_))
    }

    #[must_use]
    pub const fn type_expr(&self) -> Option<&TypeExpr> {
        match self {
            Self::Type(ty) => Some(ty),
            Self::Unresolved => None,
        }
    }
}

impl From<TypeExpr> for Annotation {
    fn from(value: TypeExpr) -> Self {
        Self::Type(value)
    }
}

/// A parameter default: declared, or the `NoDefault` sentinel.
///
/// `NoDefault` never equals a declared default, including `Value::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    NoDefault,
    Value(Value),
}

impl DefaultValue {
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::NoDefault => None,
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// One parameter of an inspected signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    #[serde(rename = "type")]
    pub ty: Annotation,
    pub default: DefaultValue,
    pub description: Option<String>,
}

impl Parameter {
    /// An untyped parameter with no default and no description.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ty: Annotation::Unresolved,
            default: DefaultValue::NoDefault,
            description: None,
        }
    }

    #[must_use]
    pub const fn is_typed(&self) -> bool {
        self.ty.is_resolved()
    }

    #[must_use]
    pub const fn has_default(&self) -> bool {
        matches!(self.default, DefaultValue::Value(_))
    }

    /// Whether a call must supply this parameter. Variadics are never required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.has_default() && !self.kind.is_variadic()
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        !self.is_required()
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.value()
    }

    #[must_use]
    pub const fn type_expr(&self) -> Option<&TypeExpr> {
        self.ty.type_expr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_differ_from_none_values() {
        assert_ne!(DefaultValue::NoDefault, DefaultValue::Value(Value::None));
        assert_ne!(Annotation::Unresolved, Annotation::Type(TypeExpr::None));
    }

    #[test]
    fn sentinels_serialize_apart_from_values() {
        let no_default = serde_json::to_value(DefaultValue::NoDefault).expect("serialize");
        let none_default =
            serde_json::to_value(DefaultValue::Value(Value::None)).expect("serialize");
        assert_eq!(no_default, serde_json::json!("no_default"));
        assert_eq!(none_default, serde_json::json!({"value": "none"}));

        let unresolved = serde_json::to_value(Annotation::Unresolved).expect("serialize");
        let none_type = serde_json::to_value(Annotation::Type(TypeExpr::None)).expect("serialize");
        assert_eq!(unresolved, serde_json::json!("unresolved"));
        assert_eq!(none_type, serde_json::json!({"type": "none"}));
    }

    #[test]
    fn kinds_order_by_binding_rules() {
        assert!(ParameterKind::PositionalOnly < ParameterKind::PositionalOrKeyword);
        assert!(ParameterKind::PositionalOrKeyword < ParameterKind::VarPositional);
        assert!(ParameterKind::VarPositional < ParameterKind::KeywordOnly);
        assert!(ParameterKind::KeywordOnly < ParameterKind::VarKeyword);
    }

    #[test]
    fn required_and_optional_predicates() {
        let plain = Parameter::new("a", ParameterKind::PositionalOrKeyword);
        assert!(plain.is_required());
        assert!(!plain.is_typed());

        let mut defaulted = Parameter::new("b", ParameterKind::KeywordOnly);
        defaulted.default = DefaultValue::Value(Value::None);
        assert!(defaulted.is_optional());
        assert!(defaulted.has_default());

        let args = Parameter::new("args", ParameterKind::VarPositional);
        assert!(args.is_optional());
    }

    #[test]
    fn parameter_field_is_named_type() {
        let param = Parameter::new("x", ParameterKind::PositionalOnly);
        let json = serde_json::to_value(&param).expect("serialize");
        let keys: Vec<&str> = json
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["name", "kind", "type", "default", "description"]);
    }
}
