//! Indentation normalization for raw documentation text.

const TAB_WIDTH: usize = 8;

/// Normalize a raw docstring the way the host language's `cleandoc` does.
///
/// Tabs expand to 8 columns. The first line loses its leading whitespace, the
/// remaining lines lose their common indentation, and leading and trailing
/// blank lines are dropped.
#[must_use]
pub fn clean_doc(raw: &str) -> String {
    let lines: Vec<String> = raw.lines().map(expand_tabs).collect();
    let Some((first, rest)) = lines.split_first() else {
        return String::new();
    };

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    cleaned.push(first.trim_start());
    for line in rest {
        let cut = margin.min(line.len());
        cleaned.push(line.get(cut..).unwrap_or_default());
    }

    while cleaned.first().is_some_and(|line| line.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|line| line.trim().is_empty()) {
        cleaned.pop();
    }

    cleaned
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

/// Leading spaces of a line.
pub(crate) fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Remove the common indentation of a block, keeping relative indentation.
pub(crate) fn dedent<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let margin = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(margin..).unwrap_or_else(|| line.trim_start()))
        .collect()
}

/// Join a block into trimmed text, `None` when it is blank.
pub(crate) fn block_text(lines: &[&str]) -> Option<String> {
    let text = dedent(lines).join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Split the free text before any section into summary and long description.
///
/// The summary is the first line; the long description is everything after it.
pub(crate) fn split_description(lines: &[&str]) -> (Option<String>, Option<String>) {
    let mut rest = lines.iter().skip_while(|line| line.trim().is_empty());
    let summary = rest
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty());
    let remaining: Vec<&str> = rest.copied().collect();
    (summary, block_text(&remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn removes_common_indent_after_first_line() {
        let raw = "Summary line.\n\n        Details here.\n          nested\n    ";
        assert_eq!(clean_doc(raw), "Summary line.\n\nDetails here.\n  nested");
    }

    #[test]
    fn strips_leading_blank_lines() {
        let raw = "\n    Summary.\n\n    More.\n";
        assert_eq!(clean_doc(raw), "Summary.\n\nMore.");
    }

    #[test]
    fn expands_tabs_before_measuring() {
        let raw = "Summary.\n\tTabbed.\n        Spaced.";
        assert_eq!(clean_doc(raw), "Summary.\nTabbed.\nSpaced.");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_doc(""), "");
        assert_eq!(clean_doc("   \n  "), "");
    }

    #[test]
    fn description_split() {
        let (summary, long) = split_description(&["", "Short.", "", "Long text", "continues."]);
        assert_eq!(summary.as_deref(), Some("Short."));
        assert_eq!(long.as_deref(), Some("Long text\ncontinues."));
    }
}
