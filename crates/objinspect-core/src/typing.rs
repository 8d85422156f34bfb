//! Type expressions for declared annotations, plus the helpers used to name,
//! simplify, and classify them.
//!
//! Annotations arrive as source text (`list[str]`, `Optional[int]`,
//! `Literal['a', 'b']`, `int | None`). [`TypeExpr::parse`] turns that text into
//! a structured expression. String annotations are forward references and are
//! reported as [`TypeParseError::ForwardRef`] instead of being evaluated.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::Value;

/// A declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    /// The type of `None`.
    None,
    /// A plain or dotted name: `int`, `datetime.datetime`, `MyClass`.
    Name(String),
    /// A subscripted generic: `list[str]`, `dict[str, int]`.
    Generic { origin: String, args: Vec<TypeExpr> },
    /// A flattened, de-duplicated union. `Optional[X]` becomes `X | None`.
    Union(Vec<TypeExpr>),
    /// `Literal[...]` with its allowed values.
    Literal(Vec<Value>),
    /// A bracketed parameter list, as in `Callable[[int, str], bool]`.
    Params(Vec<TypeExpr>),
    /// `...` inside a subscript (`tuple[int, ...]`).
    Ellipsis,
    /// A declared annotation this parser cannot structure, kept verbatim.
    Raw(String),
}

/// Why annotation text could not be structured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("forward reference '{0}' is not evaluated")]
    ForwardRef(String),

    #[error("unsupported annotation syntax at '{0}'")]
    Unsupported(String),

    #[error("unexpected end of annotation")]
    UnexpectedEnd,
}

const ITERABLE_ORIGINS: &[&str] = &[
    "list",
    "tuple",
    "dict",
    "set",
    "frozenset",
    "str",
    "bytes",
    "deque",
    "defaultdict",
    "List",
    "Tuple",
    "Dict",
    "Set",
    "FrozenSet",
    "Deque",
    "DefaultDict",
    "Sequence",
    "OrderedDict",
    "ChainMap",
    "Counter",
    "Generator",
    "AsyncGenerator",
    "Iterable",
    "Iterator",
    "Collection",
    "AbstractSet",
    "MutableSet",
    "Mapping",
    "MutableMapping",
    "MutableSequence",
];

const MAPPING_ORIGINS: &[&str] = &[
    "dict",
    "Dict",
    "Mapping",
    "MutableMapping",
    "defaultdict",
    "DefaultDict",
    "OrderedDict",
    "ChainMap",
    "Counter",
];

impl TypeExpr {
    /// Parse annotation source text.
    ///
    /// # Errors
    /// Returns [`TypeParseError::ForwardRef`] when the annotation is, or
    /// contains, a string forward reference, and other variants for syntax this
    /// parser does not model (calls, attribute access on subscripts, ...).
    pub fn parse(text: &str) -> Result<Self, TypeParseError> {
        let tokens = tokenize(text)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.union()?;
        match parser.peek() {
            None => Ok(expr),
            Some(tok) => Err(TypeParseError::Unsupported(tok.to_string())),
        }
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    #[must_use]
    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        let mut flat: Vec<Self> = Vec::new();
        for member in members {
            let parts = match member {
                Self::Union(inner) => inner,
                other => vec![other],
            };
            for part in parts {
                if !flat.contains(&part) {
                    flat.push(part);
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Self::Union(flat)
        }
    }

    /// Shorthand for `TypeExpr::Name`.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Shorthand for a generic with the given origin and arguments.
    #[must_use]
    pub fn generic(origin: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Generic {
            origin: origin.into(),
            args,
        }
    }

    #[must_use]
    pub const fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    /// Whether this is a subscripted generic alias (`list[str]`), not a bare name.
    #[must_use]
    pub const fn is_generic_alias(&self) -> bool {
        matches!(self, Self::Generic { .. })
    }

    /// Union members in declaration order; a non-union yields itself.
    #[must_use]
    pub fn flatten_union(&self) -> Vec<&Self> {
        match self {
            Self::Union(members) => members.iter().collect(),
            other => vec![other],
        }
    }

    /// The unsubscripted origin: `list` for `list[str]`, `Union` for unions.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        match self {
            Self::Generic { origin, .. } => Some(origin),
            Self::Union(_) => Some("Union"),
            Self::Literal(_) => Some("Literal"),
            _ => None,
        }
    }

    /// Type arguments: generic parameters or union members.
    #[must_use]
    pub fn args(&self) -> &[Self] {
        match self {
            Self::Generic { args, .. } | Self::Union(args) | Self::Params(args) => args,
            _ => &[],
        }
    }

    /// The origin for generics, the name for plain names, else nothing.
    fn base_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) | Self::Generic { origin: name, .. } => {
                Some(name.rsplit('.').next().unwrap_or(name))
            }
            _ => None,
        }
    }

    /// Whether values of this type can be iterated (lists, tuples, mappings, ...).
    #[must_use]
    pub fn is_iterable(&self) -> bool {
        self.base_name()
            .is_some_and(|name| ITERABLE_ORIGINS.contains(&name))
    }

    /// Whether this is a mapping type (`dict`, `Mapping`, `OrderedDict`, ...).
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        self.base_name()
            .is_some_and(|name| MAPPING_ORIGINS.contains(&name))
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Whether this is a `Literal` or contains one anywhere in its arguments.
    #[must_use]
    pub fn contains_literal(&self) -> bool {
        self.is_literal() || self.args().iter().any(Self::contains_literal)
    }

    /// Values of the first `Literal` found, searching this type then its arguments.
    #[must_use]
    pub fn literal_choices(&self) -> Option<&[Value]> {
        if let Self::Literal(values) = self {
            return Some(values);
        }
        self.args().iter().find_map(Self::literal_choices)
    }

    /// Allowed values for a `Literal`, or for a union that mixes literals.
    ///
    /// Enum choices need the class itself, see `ClassObject::enum_choices`.
    #[must_use]
    pub fn choices(&self) -> Option<Vec<Value>> {
        match self {
            Self::Literal(values) => Some(values.clone()),
            Self::Union(members) => {
                let choices: Vec<Value> = members
                    .iter()
                    .filter_map(Self::literal_choices)
                    .flatten()
                    .cloned()
                    .collect();
                if choices.is_empty() {
                    None
                } else {
                    Some(choices)
                }
            }
            _ => None,
        }
    }

    /// Render without module paths: `datetime.datetime` becomes `datetime`.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::None => "None".to_string(),
            Self::Name(name) => short_name(name).to_string(),
            Self::Generic { origin, args } => {
                format!("{}[{}]", short_name(origin), join(args, ", ", Self::type_name))
            }
            Self::Union(members) => join(members, " | ", Self::type_name),
            Self::Literal(values) => format!("Literal[{}]", join(values, ", ", Value::to_string)),
            Self::Params(args) => format!("[{}]", join(args, ", ", Self::type_name)),
            Self::Ellipsis => "...".to_string(),
            Self::Raw(text) => text.clone(),
        }
    }

    /// Short display form: module paths removed, `X | None` written as `X?`.
    #[must_use]
    pub fn simplified_name(&self) -> String {
        match self {
            Self::Union(members) if members.contains(&Self::None) => {
                let body = members
                    .iter()
                    .filter(|m| **m != Self::None)
                    .map(Self::type_name)
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!("{body}?")
            }
            other => other.type_name(),
        }
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn join<T>(items: &[T], sep: &str, render: impl Fn(&T) -> String) -> String {
    items.iter().map(render).collect::<Vec<_>>().join(sep)
}

/// Source-like rendering, module paths kept.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Name(name) => f.write_str(name),
            Self::Generic { origin, args } => {
                write!(f, "{origin}[{}]", join(args, ", ", ToString::to_string))
            }
            Self::Union(members) => f.write_str(&join(members, " | ", ToString::to_string)),
            Self::Literal(values) => {
                write!(f, "Literal[{}]", join(values, ", ", ToString::to_string))
            }
            Self::Params(args) => write!(f, "[{}]", join(args, ", ", ToString::to_string)),
            Self::Ellipsis => f.write_str("..."),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotation text parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    LBracket,
    RBracket,
    Comma,
    Pipe,
    Minus,
    Ellipsis,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => f.write_str(s),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::LBracket => f.write_str("["),
            Self::RBracket => f.write_str("]"),
            Self::Comma => f.write_str(","),
            Self::Pipe => f.write_str("|"),
            Self::Minus => f.write_str("-"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, TypeParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '[' => {
                tokens.push(Token::LBracket);
                i += 1;
            }
            ']' => {
                tokens.push(Token::RBracket);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '|' => {
                tokens.push(Token::Pipe);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '.' if chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') => {
                tokens.push(Token::Ellipsis);
                i += 3;
            }
            '\'' | '"' => {
                let quote = c;
                let mut value = String::new();
                i += 1;
                loop {
                    let Some(&ch) = chars.get(i) else {
                        return Err(TypeParseError::UnexpectedEnd);
                    };
                    i += 1;
                    if ch == quote {
                        break;
                    }
                    if ch == '\\' {
                        if let Some(&escaped) = chars.get(i) {
                            value.push(escaped);
                            i += 1;
                        }
                        continue;
                    }
                    value.push(ch);
                }
                tokens.push(Token::Str(value));
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
                    i += 1;
                }
                let is_float = chars.get(i) == Some(&'.')
                    && chars.get(i + 1).is_some_and(char::is_ascii_digit);
                if is_float {
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                let literal: String = chars[start..i].iter().filter(|c| **c != '_').collect();
                let token = if is_float {
                    literal.parse().map(Token::Float).ok()
                } else {
                    literal.parse().map(Token::Int).ok()
                };
                tokens.push(token.ok_or(TypeParseError::Unsupported(literal))?);
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '.')
                {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                tokens.push(Token::Ident(ident.trim_end_matches('.').to_string()));
            }
            other => return Err(TypeParseError::Unsupported(other.to_string())),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), TypeParseError> {
        match self.next() {
            Some(ref tok) if tok == expected => Ok(()),
            Some(tok) => Err(TypeParseError::Unsupported(tok.to_string())),
            None => Err(TypeParseError::UnexpectedEnd),
        }
    }

    fn union(&mut self) -> Result<TypeExpr, TypeParseError> {
        let mut members = vec![self.atom()?];
        while self.peek() == Some(&Token::Pipe) {
            self.pos += 1;
            members.push(self.atom()?);
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            TypeExpr::union(members)
        })
    }

    fn atom(&mut self) -> Result<TypeExpr, TypeParseError> {
        match self.next() {
            Some(Token::Str(text)) => Err(TypeParseError::ForwardRef(text)),
            Some(Token::Ellipsis) => Ok(TypeExpr::Ellipsis),
            Some(Token::LBracket) => {
                let args = self.type_list(&Token::RBracket)?;
                Ok(TypeExpr::Params(args))
            }
            Some(Token::Ident(name)) => self.named(name),
            Some(tok) => Err(TypeParseError::Unsupported(tok.to_string())),
            None => Err(TypeParseError::UnexpectedEnd),
        }
    }

    fn named(&mut self, name: String) -> Result<TypeExpr, TypeParseError> {
        if name == "None" {
            return Ok(TypeExpr::None);
        }
        if self.peek() != Some(&Token::LBracket) {
            return Ok(TypeExpr::Name(name));
        }
        self.pos += 1;

        match short_name(&name) {
            "Literal" => {
                let mut values = Vec::new();
                loop {
                    if self.peek() == Some(&Token::RBracket) {
                        self.pos += 1;
                        break;
                    }
                    values.push(self.literal_value()?);
                    match self.next() {
                        Some(Token::Comma) => {}
                        Some(Token::RBracket) => break,
                        Some(tok) => return Err(TypeParseError::Unsupported(tok.to_string())),
                        None => return Err(TypeParseError::UnexpectedEnd),
                    }
                }
                Ok(TypeExpr::Literal(values))
            }
            "Optional" => {
                let args = self.type_list(&Token::RBracket)?;
                match <[TypeExpr; 1]>::try_from(args) {
                    Ok([inner]) => Ok(TypeExpr::union([inner, TypeExpr::None])),
                    Err(_) => Err(TypeParseError::Unsupported(name)),
                }
            }
            "Union" => {
                let args = self.type_list(&Token::RBracket)?;
                Ok(TypeExpr::union(args))
            }
            _ => {
                let args = self.type_list(&Token::RBracket)?;
                Ok(TypeExpr::Generic { origin: name, args })
            }
        }
    }

    /// Comma-separated types up to and including `close`.
    fn type_list(&mut self, close: &Token) -> Result<Vec<TypeExpr>, TypeParseError> {
        let mut args = Vec::new();
        loop {
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(args);
            }
            args.push(self.union()?);
            match self.peek() {
                Some(Token::Comma) => self.pos += 1,
                Some(tok) if tok == close => {}
                Some(tok) => return Err(TypeParseError::Unsupported(tok.to_string())),
                None => return Err(TypeParseError::UnexpectedEnd),
            }
            if self.peek().is_none() {
                self.expect(close)?;
            }
        }
    }

    fn literal_value(&mut self) -> Result<Value, TypeParseError> {
        match self.next() {
            Some(Token::Str(s)) => Ok(Value::Str(s)),
            Some(Token::Int(v)) => Ok(Value::Int(v)),
            Some(Token::Float(v)) => Ok(Value::Float(v)),
            Some(Token::Minus) => match self.next() {
                Some(Token::Int(v)) => Ok(Value::Int(-v)),
                Some(Token::Float(v)) => Ok(Value::Float(-v)),
                Some(tok) => Err(TypeParseError::Unsupported(tok.to_string())),
                None => Err(TypeParseError::UnexpectedEnd),
            },
            Some(Token::Ident(name)) => Ok(match name.as_str() {
                "None" => Value::None,
                "True" => Value::Bool(true),
                "False" => Value::Bool(false),
                _ => Value::Expr(name),
            }),
            Some(tok) => Err(TypeParseError::Unsupported(tok.to_string())),
            None => Err(TypeParseError::UnexpectedEnd),
        }
    }
}
