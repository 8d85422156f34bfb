//! Documentation parse errors.

/// A docstring that follows a recognised style but breaks its grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    /// A Google-style entry (`name (type): text`) without its colon.
    #[error("Entry '{entry}' in section '{section}' is missing a colon")]
    MissingColon { section: String, entry: String },

    /// A reST field list line that does not close its field name.
    #[error("Malformed field on line {line}: '{text}'")]
    MalformedField { line: usize, text: String },
}
