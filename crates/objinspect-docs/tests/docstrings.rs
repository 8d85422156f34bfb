//! End-to-end parsing of docstrings as they appear in source.

use objinspect_docs::{DocError, DocParser, DocStyle, DocstringParser, clean_doc};
use pretty_assertions::assert_eq;

const GOOGLE: &str = r#"Create a connection pool.

        Connections are opened lazily.

        Args:
            url (str): Database URL.
            size (int, optional): Pool size. Defaults to
                ten connections.
            **options: Passed to the driver.

        Returns:
            Pool: The pool.

        Example:
            >>> pool = create_pool("sqlite://")
        "#;

#[test]
fn google_docstring_from_source() {
    let doc = DocstringParser::new().parse(GOOGLE).unwrap();
    assert_eq!(doc.style, DocStyle::Google);
    assert_eq!(doc.summary.as_deref(), Some("Create a connection pool."));
    assert_eq!(
        doc.long_description.as_deref(),
        Some("Connections are opened lazily.")
    );
    assert_eq!(doc.param("url"), Some("Database URL."));
    assert_eq!(doc.param("size"), Some("Pool size. Defaults to ten connections."));
    assert_eq!(doc.param("options"), Some("Passed to the driver."));
    assert_eq!(doc.returns.as_deref(), Some("Pool: The pool."));
    assert_eq!(
        doc.examples.as_deref(),
        Some(r#">>> pool = create_pool("sqlite://")"#)
    );
}

#[test]
fn description_skips_leading_blank_lines() {
    let doc = DocstringParser::new()
        .parse("\n\n    \n    Only a line.")
        .unwrap();
    assert_eq!(doc.description(), Some("Only a line."));
}

#[test]
fn malformed_google_entry_reports_missing_colon() {
    let raw = "Sum two numbers.\n\n    Args:\n        a (int)\n        b (int): Second.\n";
    let err = DocstringParser::new().parse(raw).unwrap_err();
    assert!(matches!(err, DocError::MissingColon { ref entry, .. } if entry == "a (int)"));
}

#[test]
fn cleaning_is_idempotent() {
    let once = clean_doc(GOOGLE);
    assert_eq!(clean_doc(&once), once);
}
