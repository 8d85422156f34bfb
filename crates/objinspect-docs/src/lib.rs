//! # objinspect-docs
//!
//! Documentation text handling for objinspect:
//! - `clean_doc` normalizes indentation of raw docstrings
//! - `DocstringParser` splits them into summary, long description, and
//!   Google, Sphinx (reST field list), or NumPy sections
//!
//! Parsers sit behind the [`DocParser`] trait so callers can supply their own.

mod clean;
mod error;
mod parser;
mod styles;
mod types;

pub use clean::clean_doc;
pub use error::DocError;
pub use parser::{DocParser, DocstringParser};
pub use types::{DocStyle, ParsedDoc};
