use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Docstring convention detected in a piece of documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStyle {
    /// No sections; free text only.
    Plain,
    Google,
    /// reST field lists (`:param x: ...`).
    Sphinx,
    Numpy,
}

impl DocStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Google => "google",
            Self::Sphinx => "sphinx",
            Self::Numpy => "numpy",
        }
    }
}

/// Parsed documentation sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDoc {
    pub style: DocStyle,
    /// First line of the free text.
    pub summary: Option<String>,
    /// Free text after the summary, before any section.
    pub long_description: Option<String>,
    /// Parameter name (without `*`/`**`) to description.
    pub params: HashMap<String, String>,
    pub returns: Option<String>,
    pub yields: Option<String>,
    /// Exception name to description.
    pub raises: HashMap<String, String>,
    pub examples: Option<String>,
    pub notes: Option<String>,
}

impl Default for ParsedDoc {
    fn default() -> Self {
        Self {
            style: DocStyle::Plain,
            summary: None,
            long_description: None,
            params: HashMap::new(),
            returns: None,
            yields: None,
            raises: HashMap::new(),
            examples: None,
            notes: None,
        }
    }
}

impl ParsedDoc {
    /// Summary, falling back to the long description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .or(self.long_description.as_deref())
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub(crate) fn has_sections(&self) -> bool {
        !self.params.is_empty()
            || self.returns.is_some()
            || self.yields.is_some()
            || !self.raises.is_empty()
            || self.examples.is_some()
            || self.notes.is_some()
    }
}

/// Strip variadic markers from a documented parameter name.
pub(crate) fn param_name(raw: &str) -> String {
    raw.trim().trim_start_matches('*').trim().to_string()
}
