use crate::clean::{clean_doc, split_description};
use crate::error::DocError;
use crate::styles::{google, numpy, sphinx};
use crate::types::{DocStyle, ParsedDoc};

/// Turns raw documentation text into structured sections.
pub trait DocParser: Send + Sync {
    /// # Errors
    /// Returns `DocError` when the text follows a style but violates it.
    fn parse(&self, text: &str) -> Result<ParsedDoc, DocError>;
}

/// Default parser: cleans the text, then detects Google, Sphinx, or NumPy
/// sections, in that order. Text with no sections parses as plain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocstringParser {
    style: Option<DocStyle>,
}

impl DocstringParser {
    #[must_use]
    pub const fn new() -> Self {
        Self { style: None }
    }

    /// Always parse with one style instead of detecting it.
    #[must_use]
    pub const fn with_style(style: DocStyle) -> Self {
        Self { style: Some(style) }
    }

    fn detect(lines: &[&str]) -> DocStyle {
        if google::detect(lines) {
            DocStyle::Google
        } else if sphinx::detect(lines) {
            DocStyle::Sphinx
        } else if numpy::detect(lines) {
            DocStyle::Numpy
        } else {
            DocStyle::Plain
        }
    }
}

impl DocParser for DocstringParser {
    fn parse(&self, text: &str) -> Result<ParsedDoc, DocError> {
        let cleaned = clean_doc(text);
        if cleaned.is_empty() {
            return Ok(ParsedDoc::default());
        }
        let lines: Vec<&str> = cleaned.lines().collect();
        let style = self.style.unwrap_or_else(|| Self::detect(&lines));
        tracing::debug!(style = style.as_str(), "parsing docstring");

        let doc = match style {
            DocStyle::Google => google::parse(&lines)?,
            DocStyle::Sphinx => sphinx::parse(&lines)?,
            DocStyle::Numpy => numpy::parse(&lines),
            DocStyle::Plain => {
                let (summary, long_description) = split_description(&lines);
                ParsedDoc {
                    summary,
                    long_description,
                    ..ParsedDoc::default()
                }
            }
        };
        if style != DocStyle::Plain && !doc.has_sections() {
            tracing::debug!(style = style.as_str(), "docstring has no recognised entries");
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::google("Sum.\n\n    Args:\n        a: First.\n", DocStyle::Google)]
    #[case::sphinx("Sum.\n\n    :param a: First.\n", DocStyle::Sphinx)]
    #[case::numpy("Sum.\n\n    Parameters\n    ----------\n    a : int\n        First.\n", DocStyle::Numpy)]
    fn detects_style_from_indented_source(#[case] raw: &str, #[case] style: DocStyle) {
        let doc = DocstringParser::new().parse(raw).expect("parses");
        assert_eq!(doc.style, style);
        assert_eq!(doc.summary.as_deref(), Some("Sum."));
        assert_eq!(doc.param("a"), Some("First."));
    }

    #[test]
    fn plain_text_has_summary_and_long_description() {
        let doc = DocstringParser::new()
            .parse("Just a summary.\n\n    And more words.")
            .expect("parses");
        assert_eq!(doc.style, DocStyle::Plain);
        assert_eq!(doc.summary.as_deref(), Some("Just a summary."));
        assert_eq!(doc.long_description.as_deref(), Some("And more words."));
        assert!(doc.params.is_empty());
    }

    #[test]
    fn empty_text_is_empty_doc() {
        let doc = DocstringParser::new().parse("   \n").expect("parses");
        assert_eq!(doc, ParsedDoc::default());
        assert_eq!(doc.description(), None);
    }

    #[test]
    fn forced_style_skips_detection() {
        let doc = DocstringParser::with_style(DocStyle::Plain)
            .parse("Sum.\n\nArgs:\n    a: First.")
            .expect("parses");
        assert!(doc.params.is_empty());
    }
}
