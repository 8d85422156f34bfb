//! Literal values carried by reflection objects: parameter defaults, class
//! attributes, module variables, and `Literal[...]` choices.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A value as the inspected runtime would print it.
///
/// Serialized externally tagged (`"none"`, `{"int": 5}`, `{"str": "b"}`), so no
/// value ever serializes to the bare strings used by the model sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Ellipsis,
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Set(Vec<Value>),
    Dict(Vec<(Value, Value)>),
    /// An expression that is not a literal, kept as its source text.
    Expr(String),
}

impl Value {
    /// Runtime type name of the value (`NoneType`, `int`, `list`, ...).
    ///
    /// Unevaluated expressions have no known type.
    #[must_use]
    pub const fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::None => Some("NoneType"),
            Self::Bool(_) => Some("bool"),
            Self::Int(_) => Some("int"),
            Self::Float(_) => Some("float"),
            Self::Str(_) => Some("str"),
            Self::Bytes(_) => Some("bytes"),
            Self::Ellipsis => Some("ellipsis"),
            Self::Tuple(_) => Some("tuple"),
            Self::List(_) => Some("list"),
            Self::Set(_) => Some("set"),
            Self::Dict(_) => Some("dict"),
            Self::Expr(_) => None,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Python `repr()` formatting.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write_float(f, *v),
            Self::Str(s) => write_quoted(f, s),
            Self::Bytes(bytes) => {
                f.write_str("b'")?;
                for byte in bytes {
                    match byte {
                        b'\'' => f.write_str("\\'")?,
                        b'\\' => f.write_str("\\\\")?,
                        b'\n' => f.write_str("\\n")?,
                        0x20..=0x7e => write!(f, "{}", char::from(*byte))?,
                        other => write!(f, "\\x{other:02x}")?,
                    }
                }
                f.write_str("'")
            }
            Self::Ellipsis => f.write_str("Ellipsis"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::List(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Self::Set(items) if items.is_empty() => f.write_str("set()"),
            Self::Set(items) => {
                f.write_str("{")?;
                write_items(f, items)?;
                f.write_str("}")
            }
            Self::Dict(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Expr(text) => f.write_str(text),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("nan")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "inf" } else { "-inf" })
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        write!(f, "{v:.1}")
    } else {
        write!(f, "{v}")
    }
}

/// Single quotes unless the text contains a single quote and no double quote.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for ch in s.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::None, "None")]
    #[case(Value::Bool(true), "True")]
    #[case(Value::Int(-3), "-3")]
    #[case(Value::Float(2.0), "2.0")]
    #[case(Value::Float(0.5), "0.5")]
    #[case(Value::from("b"), "'b'")]
    #[case(Value::from("it's"), "\"it's\"")]
    #[case(Value::Tuple(vec![Value::Int(1)]), "(1,)")]
    #[case(Value::List(vec![Value::Int(1), Value::Int(2)]), "[1, 2]")]
    #[case(Value::Set(Vec::new()), "set()")]
    #[case(Value::Dict(vec![(Value::from("a"), Value::None)]), "{'a': None}")]
    #[case(Value::Bytes(b"ab".to_vec()), "b'ab'")]
    #[case(Value::Expr("os.getcwd()".into()), "os.getcwd()")]
    fn repr_matches_runtime(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn none_serializes_as_tagged_string() {
        let json = serde_json::to_value(Value::None).expect("serialize");
        assert_eq!(json, serde_json::json!("none"));
        let json = serde_json::to_value(Value::Int(5)).expect("serialize");
        assert_eq!(json, serde_json::json!({"int": 5}));
    }

    #[test]
    fn expressions_have_no_type_name() {
        assert_eq!(Value::Expr("f()".into()).type_name(), None);
        assert_eq!(Value::None.type_name(), Some("NoneType"));
    }
}
