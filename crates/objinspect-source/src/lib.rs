//! # objinspect-source
//!
//! Loads Python source text into objinspect reflection objects using the
//! ast-grep Python grammar.
//!
//! - `def` / `async def` become [`Callable`](objinspect_core::Callable)s with
//!   parameter kinds, annotations, literal defaults and docstrings
//! - `class` bodies become [`ClassObject`](objinspect_core::ClassObject)s,
//!   honouring `staticmethod`, `classmethod`, `property` and `.setter`
//! - literal module assignments become values
//!
//! Nothing is executed. Non-literal defaults are kept as expression text.

pub mod error;
mod helpers;
mod literal;
pub mod parser;
mod processors;

use std::path::Path;

use objinspect_core::ModuleObject;

pub use error::SourceError;

/// File extensions accepted by [`load_file`].
const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Load a module from Python source text.
///
/// # Errors
/// Returns [`SourceError::Syntax`] when the text does not parse.
pub fn load_module(name: &str, source: &str) -> Result<ModuleObject, SourceError> {
    let tree = parser::parse_source(source);
    let root = tree.root();
    if let Some((line, snippet)) = parser::first_syntax_error(&root) {
        return Err(SourceError::Syntax {
            module: name.to_string(),
            line,
            snippet,
        });
    }

    let mut module = ModuleObject::new(name);
    if let Some(doc) = processors::module_docstring(&root) {
        module = module.with_doc(doc);
    }
    processors::populate(&root, &mut module);
    tracing::debug!(
        module = name,
        bindings = module.namespace().len(),
        "loaded python module"
    );
    Ok(module)
}

/// Load a `.py` or `.pyi` file. The module is named after the file stem.
///
/// # Errors
/// Returns [`SourceError::NotPython`] for other extensions, [`SourceError::Io`]
/// when the file cannot be read, and [`SourceError::Syntax`] when it does not
/// parse.
pub fn load_file(path: impl AsRef<Path>) -> Result<ModuleObject, SourceError> {
    let path = path.as_ref();
    let is_python = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PYTHON_EXTENSIONS.contains(&ext));
    if !is_python {
        return Err(SourceError::NotPython(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("module");
    load_module(name, &source)
}
