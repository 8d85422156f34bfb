//! Terminal rendering of inspection models. Pure presentation.

mod listing;
mod signature;
mod table;

pub use listing::{render_class, render_function, render_inspected, render_listing};
pub use signature::{render_parameter, render_signature};

/// ANSI SGR codes used across renderings.
pub(crate) mod theme {
    pub const NAME: &str = "36";
    pub const FUNCTION: &str = "1;34";
    pub const TYPE: &str = "32";
    pub const DEFAULT: &str = "33";
    pub const KEYWORD: &str = "35";
    pub const DESCRIPTION: &str = "2";
    pub const HEADING: &str = "1";
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Emit ANSI color sequences.
    pub color: bool,
    /// Spaces before each member row.
    pub indent: usize,
    /// Truncate descriptions so lines fit this many columns.
    pub max_width: Option<usize>,
    /// Frame section listings with a rule line.
    pub separator: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            color: false,
            indent: 2,
            max_width: None,
            separator: false,
        }
    }
}

/// First line of an optional description.
pub(crate) fn first_line(text: Option<&str>) -> String {
    text.and_then(|t| t.lines().next())
        .unwrap_or_default()
        .trim()
        .to_string()
}
