//! Aligned, header-less rows with optional ANSI color.

use std::borrow::Cow;

use super::FormatOptions;

/// Smallest width the last column is squeezed to.
const MIN_LAST_WIDTH: usize = 10;
const SEPARATOR: &str = "  ";

/// ANSI codes per column; `None` leaves the column uncolored.
pub(crate) type ColumnStyles<'a> = &'a [Option<&'a str>];

/// Render rows with every column padded to its widest cell.
///
/// When `max_width` is set, the last column (the description) is truncated
/// with an ellipsis so each line fits. Trailing padding is trimmed.
pub(crate) fn render_rows(
    rows: &[Vec<String>],
    styles: ColumnStyles<'_>,
    options: &FormatOptions,
) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut widths: Vec<usize> = (0..columns)
        .map(|index| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    fit_last_column(&mut widths, options);

    let pad = " ".repeat(options.indent);
    rows.iter()
        .map(|row| {
            let cells = widths
                .iter()
                .enumerate()
                .map(|(index, &width)| {
                    let shown = clip(row.get(index).map_or("", String::as_str), width);
                    // Padding follows the plain text; color codes take no columns.
                    let fill = width.saturating_sub(shown.chars().count());
                    let style = styles.get(index).copied().flatten();
                    format!("{}{:fill$}", paint(&shown, style, options.color), "")
                })
                .collect::<Vec<_>>()
                .join(SEPARATOR);
            format!("{pad}{}", cells.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fit_last_column(widths: &mut [usize], options: &FormatOptions) {
    let Some(max_width) = options.max_width else {
        return;
    };
    let Some((last, leading)) = widths.split_last_mut() else {
        return;
    };
    let used = options.indent + leading.iter().sum::<usize>() + leading.len() * SEPARATOR.len();
    let available = max_width.saturating_sub(used).max(MIN_LAST_WIDTH);
    if *last > available {
        *last = available;
    }
}

/// `value` limited to `width` columns, its last visible column an ellipsis
/// when anything was cut.
fn clip(value: &str, width: usize) -> Cow<'_, str> {
    if value.chars().nth(width).is_none() {
        return Cow::Borrowed(value);
    }
    let kept = value.chars().take(width.saturating_sub(1));
    Cow::Owned(kept.chain(std::iter::once('…')).collect())
}

/// Wrap `value` in an ANSI SGR sequence when color is on.
pub(crate) fn paint(value: &str, code: Option<&str>, color: bool) -> String {
    match code {
        Some(code) if color && !value.is_empty() => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        _ => value.to_string(),
    }
}
