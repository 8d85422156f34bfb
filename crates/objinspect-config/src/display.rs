//! `[display]`: terminal rendering settings.

use objinspect_inspect::FormatOptions;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Narrowest `max_width` that still fits a name, a tag and some description.
pub const MIN_WIDTH: usize = 40;

const fn default_indent() -> usize {
    2
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    #[must_use]
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub color: ColorChoice,

    /// Spaces before each member row.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Truncate descriptions to fit this width. Unset means no limit.
    #[serde(default)]
    pub max_width: Option<usize>,

    /// Frame namespace listings with rule lines.
    #[serde(default)]
    pub sections: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            indent: default_indent(),
            max_width: None,
            sections: false,
        }
    }
}

impl DisplayConfig {
    /// # Errors
    /// `InvalidValue` when `max_width` is below [`MIN_WIDTH`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.max_width {
            Some(width) if width < MIN_WIDTH => Err(ConfigError::InvalidValue {
                field: "display.max_width".to_string(),
                reason: format!("{width} is narrower than the minimum of {MIN_WIDTH}"),
            }),
            _ => Ok(()),
        }
    }

    /// Rendering options for an output stream.
    #[must_use]
    pub const fn format_options(&self, is_terminal: bool) -> FormatOptions {
        FormatOptions {
            color: self.color.enabled(is_terminal),
            indent: self.indent,
            max_width: self.max_width,
            separator: self.sections,
        }
    }
}
