//! Google-style docstrings: `Args:` / `Returns:` / `Raises:` headers with
//! indented entries.

use std::collections::HashMap;

use crate::clean::{block_text, dedent, indent_of, split_description};
use crate::error::DocError;
use crate::types::{DocStyle, ParsedDoc, param_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Args,
    Returns,
    Yields,
    Raises,
    Examples,
    Notes,
    Other,
}

fn section_for(line: &str) -> Option<(Section, &str)> {
    let title = line.trim().strip_suffix(':')?;
    let section = match title {
        "Args" | "Arguments" | "Parameters" | "Params" | "Keyword Args" | "Keyword Arguments"
        | "Other Parameters" => Section::Args,
        "Returns" | "Return" => Section::Returns,
        "Yields" | "Yield" => Section::Yields,
        "Raises" | "Raise" | "Exceptions" | "Except" => Section::Raises,
        "Examples" | "Example" => Section::Examples,
        "Notes" | "Note" => Section::Notes,
        "Attributes" | "Todo" | "See Also" | "Warning" | "Warnings" | "References" => {
            Section::Other
        }
        _ => return None,
    };
    Some((section, title))
}

/// Whether the text has at least one Google section header.
pub(crate) fn detect(lines: &[&str]) -> bool {
    lines.iter().any(|line| section_for(line).is_some())
}

pub(crate) fn parse(lines: &[&str]) -> Result<ParsedDoc, DocError> {
    let mut doc = ParsedDoc {
        style: DocStyle::Google,
        ..ParsedDoc::default()
    };

    let first_header = lines
        .iter()
        .position(|line| section_for(line).is_some())
        .unwrap_or(lines.len());
    (doc.summary, doc.long_description) = split_description(&lines[..first_header]);

    let mut index = first_header;
    while index < lines.len() {
        let Some((section, title)) = section_for(lines[index]) else {
            index += 1;
            continue;
        };
        let header_indent = indent_of(lines[index]);
        let start = index + 1;
        let mut end = start;
        while end < lines.len() {
            let line = lines[end];
            if !line.trim().is_empty()
                && indent_of(line) <= header_indent
                && section_for(line).is_some()
            {
                break;
            }
            end += 1;
        }
        let body = &lines[start..end];

        match section {
            Section::Args => doc.params.extend(parse_entries(title, body)?),
            Section::Raises => doc.raises.extend(parse_entries(title, body)?),
            Section::Returns => doc.returns = block_text(body),
            Section::Yields => doc.yields = block_text(body),
            Section::Examples => doc.examples = block_text(body),
            Section::Notes => doc.notes = block_text(body),
            Section::Other => {}
        }
        index = end;
    }

    Ok(doc)
}

/// Entries start at the block's base indent; deeper lines continue the entry.
fn parse_entries(section: &str, body: &[&str]) -> Result<HashMap<String, String>, DocError> {
    let mut entries = HashMap::new();
    let mut current: Option<(String, String)> = None;

    for line in dedent(body) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) > 0 {
            if let Some((_, text)) = current.as_mut() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(line.trim());
            }
            continue;
        }

        if let Some((name, text)) = current.take() {
            entries.insert(name, text);
        }
        let Some(colon) = entry_colon(line) else {
            return Err(DocError::MissingColon {
                section: section.to_string(),
                entry: line.trim().to_string(),
            });
        };
        let head = &line[..colon];
        let name = head.split_once('(').map_or(head, |(name, _)| name);
        current = Some((param_name(name), line[colon + 1..].trim().to_string()));
    }
    if let Some((name, text)) = current {
        entries.insert(name, text);
    }
    Ok(entries)
}

/// Position of the colon ending an entry head, skipping bracketed type text.
fn entry_colon(line: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, ch) in line.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
