//! Loader error types for objinspect-source.

use std::path::PathBuf;

/// Errors that can occur while loading Python source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Syntax error in module '{module}' at line {line}: {snippet}")]
    Syntax {
        module: String,
        line: usize,
        snippet: String,
    },

    #[error("Not a Python source file: {}", .0.display())]
    NotPython(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
