//! Cross-cutting error types for objinspect.
//!
//! Documentation parse failures are deliberately absent: they never abort an
//! inspection and live in `objinspect-docs` as `DocError`.

use thiserror::Error;

/// Errors raised while inspecting an object or converting its model.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The object is not what the operation needs (not callable, not a class),
    /// or its own metadata is ill-formed (unclassified parameter kind, bad
    /// parameter ordering, inconsistent class hierarchy).
    #[error("Invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// A member lookup by name or index found nothing.
    #[error("No member '{member}' on {owner}")]
    UnknownMember { owner: String, member: String },

    /// The callable carries metadata only and has no body to run.
    #[error("Callable '{0}' has no native body and cannot be invoked")]
    NotInvocable(String),

    /// Arguments could not be bound to the signature.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The native body returned an error.
    #[error("Call to '{callable}' failed: {message}")]
    CallFailed { callable: String, message: String },

    /// Mapping view conversion failed.
    #[error("Mapping conversion failed: {0}")]
    Mapping(#[from] serde_json::Error),
}

impl InspectError {
    pub(crate) fn invalid_target(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error reports a target the operation cannot work on.
    #[must_use]
    pub const fn is_invalid_target(&self) -> bool {
        matches!(self, Self::InvalidTarget { .. })
    }
}

/// Errors produced when binding call arguments to a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("missing a required argument: '{0}'")]
    Missing(String),

    #[error("multiple values for argument '{0}'")]
    MultipleValues(String),

    #[error("too many positional arguments: expected at most {expected}, got {given}")]
    TooManyPositional { expected: usize, given: usize },

    #[error("got an unexpected keyword argument '{0}'")]
    UnexpectedKeyword(String),

    #[error("'{0}' parameter is positional only, but was passed as a keyword")]
    PositionalOnlyAsKeyword(String),
}
