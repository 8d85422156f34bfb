//! NumPy-style docstrings.
//!
//! Sections are titles underlined with dashes:
//! ```text
//! Parameters
//! ----------
//! x, y : float
//!     Coordinates.
//! ```

use std::collections::HashMap;

use crate::clean::{block_text, dedent, indent_of, split_description};
use crate::types::{DocStyle, ParsedDoc, param_name};

fn is_underline(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

fn is_header(lines: &[&str], index: usize) -> bool {
    index + 1 < lines.len() && !lines[index].trim().is_empty() && is_underline(lines[index + 1])
}

pub(crate) fn detect(lines: &[&str]) -> bool {
    (0..lines.len()).any(|i| is_header(lines, i))
}

pub(crate) fn parse(lines: &[&str]) -> ParsedDoc {
    let mut doc = ParsedDoc {
        style: DocStyle::Numpy,
        ..ParsedDoc::default()
    };

    let first_header = (0..lines.len())
        .find(|&i| is_header(lines, i))
        .unwrap_or(lines.len());
    (doc.summary, doc.long_description) = split_description(&lines[..first_header]);

    let mut index = first_header;
    while index < lines.len() {
        if !is_header(lines, index) {
            index += 1;
            continue;
        }
        let title = lines[index].trim();
        let start = index + 2;
        let end = (start..lines.len())
            .find(|&i| is_header(lines, i))
            .unwrap_or(lines.len());
        let body = &lines[start..end];

        match title {
            "Parameters" | "Params" | "Args" | "Arguments" | "Other Parameters" => {
                doc.params.extend(parse_entries(body));
            }
            "Raises" | "Exceptions" => doc.raises.extend(parse_entries(body)),
            "Returns" | "Return" => doc.returns = block_text(body),
            "Yields" | "Yield" => doc.yields = block_text(body),
            "Examples" | "Example" => doc.examples = block_text(body),
            "Notes" | "Note" => doc.notes = block_text(body),
            _ => {}
        }
        index = end;
    }

    doc
}

/// `name : type` lines at the base indent, descriptions indented below.
/// A line naming several parameters (`x, y : float`) documents each of them.
fn parse_entries(body: &[&str]) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    let mut names: Vec<String> = Vec::new();
    let mut text = String::new();

    let mut flush = |names: &mut Vec<String>, text: &mut String| {
        for name in names.drain(..) {
            entries.insert(name, text.trim().to_string());
        }
        text.clear();
    };

    for line in dedent(body) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) == 0 {
            flush(&mut names, &mut text);
            let head = line.split_once(':').map_or(line, |(head, _)| head);
            names = head
                .split(',')
                .map(param_name)
                .filter(|name| !name.is_empty())
                .collect();
        } else {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(line.trim());
        }
    }
    flush(&mut names, &mut text);
    entries
}
