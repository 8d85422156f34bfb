//! Python literal expressions to [`Value`]s.
//!
//! Only what the runtime could evaluate without running code is converted:
//! numbers, strings, bytes, booleans, `None`, `...`, and containers of those.
//! Anything else stays an expression.

use ast_grep_core::Node;
use objinspect_core::Value;

use crate::helpers::meaningful_children;

/// The value of a literal node, or its source text as [`Value::Expr`].
pub(crate) fn value_or_expr<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    literal(node).unwrap_or_else(|| Value::Expr(node.text().to_string()))
}

/// The value of a literal node, `None` when it is not a literal.
pub(crate) fn literal<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<Value> {
    let kind = node.kind();
    match kind.as_ref() {
        "none" => Some(Value::None),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "ellipsis" => Some(Value::Ellipsis),
        "integer" => integer(&node.text()),
        "float" => float(&node.text()),
        "string" => string(&node.text()),
        "concatenated_string" => concatenated(node),
        "unary_operator" => unary(node),
        "parenthesized_expression" => match meaningful_children(node).as_slice() {
            [inner] => literal(inner),
            _ => None,
        },
        "list" => elements(node).map(Value::List),
        "tuple" => elements(node).map(Value::Tuple),
        "set" => elements(node).map(Value::Set),
        "dictionary" => dictionary(node),
        _ => None,
    }
}

fn elements<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<Vec<Value>> {
    meaningful_children(node).iter().map(literal).collect()
}

fn dictionary<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<Value> {
    let mut entries = Vec::new();
    for pair in meaningful_children(node) {
        if pair.kind().as_ref() != "pair" {
            return None;
        }
        let key = literal(&pair.field("key")?)?;
        let value = literal(&pair.field("value")?)?;
        entries.push((key, value));
    }
    Some(Value::Dict(entries))
}

fn unary<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<Value> {
    let operator = node.field("operator")?;
    let operand = literal(&node.field("argument")?)?;
    match (operator.text().as_ref(), operand) {
        ("-", Value::Int(v)) => v.checked_neg().map(Value::Int),
        ("-", Value::Float(v)) => Some(Value::Float(-v)),
        ("+", value @ (Value::Int(_) | Value::Float(_))) => Some(value),
        _ => None,
    }
}

fn integer(text: &str) -> Option<Value> {
    let digits = text.replace('_', "").to_ascii_lowercase();
    let parsed = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        i64::from_str_radix(oct, 8)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        i64::from_str_radix(bin, 2)
    } else {
        digits.parse()
    };
    // Imaginary literals and integers past i64 stay expressions.
    parsed.ok().map(Value::Int)
}

fn float(text: &str) -> Option<Value> {
    let digits = text.replace('_', "");
    if digits.ends_with(['j', 'J']) {
        return None;
    }
    digits.parse().ok().map(Value::Float)
}

fn concatenated<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<Value> {
    let mut text = String::new();
    let mut bytes: Vec<u8> = Vec::new();
    let mut is_bytes = None;
    for part in meaningful_children(node) {
        match (string(&part.text())?, is_bytes) {
            (Value::Str(s), None | Some(false)) => {
                text.push_str(&s);
                is_bytes = Some(false);
            }
            (Value::Bytes(b), None | Some(true)) => {
                bytes.extend(b);
                is_bytes = Some(true);
            }
            _ => return None,
        }
    }
    if is_bytes? {
        Some(Value::Bytes(bytes))
    } else {
        Some(Value::Str(text))
    }
}

/// One string literal with its prefix and quotes. f-strings are not literals.
fn string(text: &str) -> Option<Value> {
    let quote_at = text.find(['\'', '"'])?;
    let prefix = text[..quote_at].to_ascii_lowercase();
    if prefix.contains('f') || prefix.contains('t') {
        return None;
    }
    let body = &text[quote_at..];
    let delimiter = if body.starts_with("\"\"\"") || body.starts_with("'''") {
        &body[..3]
    } else {
        &body[..1]
    };
    let inner = body.strip_prefix(delimiter)?.strip_suffix(delimiter)?;
    let content = if prefix.contains('r') {
        inner.to_string()
    } else {
        unescape(inner)
    };
    if prefix.contains('b') {
        Some(Value::Bytes(content.into_bytes()))
    } else {
        Some(Value::Str(content))
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let hex: String = (0..width)
                    .map_while(|_| chars.next_if(char::is_ascii_hexdigit))
                    .collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == width => out.push(decoded),
                    _ => {
                        out.push('\\');
                        out.push(next);
                        out.push_str(&hex);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}
