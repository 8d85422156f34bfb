//! ast-grep wrapper for Python text.

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::{LanguageExt, SupportLang};

/// The concrete AST tree type returned by [`parse_source`].
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

const SNIPPET_LEN: usize = 40;

/// Parse Python source into an ast-grep tree.
///
/// Tree-sitter never fails outright; malformed regions show up as `ERROR`
/// nodes, which [`first_syntax_error`] reports.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    SupportLang::Python.ast_grep(source)
}

/// First `ERROR` node in document order, as its 1-based line and a short
/// excerpt of its text.
pub(crate) fn first_syntax_error<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<(usize, String)> {
    if node.kind().as_ref() == "ERROR" {
        let text = node.text();
        let first = text.lines().next().unwrap_or_default().trim();
        let snippet: String = first.chars().take(SNIPPET_LEN).collect();
        return Some((node.start_pos().line() + 1, snippet));
    }
    node.children().find_map(|child| first_syntax_error(&child))
}
