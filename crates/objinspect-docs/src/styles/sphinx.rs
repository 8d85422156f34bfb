//! reST field-list docstrings (`:param x: ...`, `:returns: ...`).

use crate::clean::{block_text, split_description};
use crate::error::DocError;
use crate::types::{DocStyle, ParsedDoc, param_name};

const PARAM_FIELDS: &[&str] = &["param", "parameter", "arg", "argument", "key", "keyword"];
const RAISE_FIELDS: &[&str] = &["raises", "raise", "except", "exception"];
const RETURN_FIELDS: &[&str] = &["returns", "return"];
const YIELD_FIELDS: &[&str] = &["yields", "yield"];

fn is_field(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with(':') && !trimmed.starts_with("::")
}

pub(crate) fn detect(lines: &[&str]) -> bool {
    lines.iter().any(|line| {
        line.trim_start()
            .strip_prefix(':')
            .and_then(|rest| rest.split_whitespace().next())
            .is_some_and(|field| {
                let field = field.trim_end_matches(':');
                PARAM_FIELDS.contains(&field)
                    || RAISE_FIELDS.contains(&field)
                    || RETURN_FIELDS.contains(&field)
                    || field == "rtype"
                    || field == "type"
            })
    })
}

enum Target {
    Param(String),
    Raise(String),
    Returns,
    Yields,
    Ignored,
}

pub(crate) fn parse(lines: &[&str]) -> Result<ParsedDoc, DocError> {
    let mut doc = ParsedDoc {
        style: DocStyle::Sphinx,
        ..ParsedDoc::default()
    };

    let first_field = lines.iter().position(|line| is_field(line)).unwrap_or(lines.len());
    (doc.summary, doc.long_description) = split_description(&lines[..first_field]);

    let mut current: Option<(Target, Vec<&str>)> = None;
    for (offset, line) in lines[first_field..].iter().enumerate() {
        if !is_field(line) {
            if let Some((_, body)) = current.as_mut() {
                body.push(*line);
            }
            continue;
        }

        if let Some((target, body)) = current.take() {
            store(&mut doc, target, &body);
        }

        let rest = &line.trim_start()[1..];
        let Some((head, text)) = rest.split_once(':') else {
            return Err(DocError::MalformedField {
                line: first_field + offset + 1,
                text: line.trim().to_string(),
            });
        };
        let mut words = head.split_whitespace();
        let field = words.next().unwrap_or_default();
        let last_arg = words.last();

        let target = if PARAM_FIELDS.contains(&field) {
            last_arg.map_or(Target::Ignored, |name| Target::Param(param_name(name)))
        } else if RAISE_FIELDS.contains(&field) {
            Target::Raise(last_arg.unwrap_or_default().to_string())
        } else if RETURN_FIELDS.contains(&field) {
            Target::Returns
        } else if YIELD_FIELDS.contains(&field) {
            Target::Yields
        } else {
            Target::Ignored
        };
        current = Some((target, vec![text]));
    }
    if let Some((target, body)) = current {
        store(&mut doc, target, &body);
    }

    Ok(doc)
}

fn store(doc: &mut ParsedDoc, target: Target, body: &[&str]) {
    let joined = body
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    match target {
        Target::Param(name) => {
            doc.params.insert(name, joined);
        }
        Target::Raise(name) => {
            doc.raises.insert(name, joined);
        }
        Target::Returns => doc.returns = block_text(&[joined.as_str()]),
        Target::Yields => doc.yields = block_text(&[joined.as_str()]),
        Target::Ignored => {}
    }
}
