//! Whole-document conversion.
//!
//! Ties the pipeline together: segment → classify → assemble → wrap in a
//! root `div`. Title extraction is a separate scan so that a driver can ask
//! for the title of a document regardless of whether its body converts.

use crate::assemble::assemble;
use crate::block::classify;
use crate::error::ParseError;
use crate::lexer::segments;
use crate::node::Node;

/// Tag of the root container element.
pub const ROOT_TAG: &str = "div";

/// Prefix of a level-1 heading line.
const TITLE_PREFIX: &str = "# ";

/// A converted page: the pieces an HTML template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Text of the first level-1 heading.
    pub title: String,
    /// Rendered document body.
    pub html: String,
}

/// Build the document tree for `markdown`.
///
/// ```rust
/// use mdpage_core::markdown_to_html_node;
///
/// let root = markdown_to_html_node("# Hi\n\nSome **bold** text").unwrap();
/// assert_eq!(
///     root.to_html(),
///     "<div><h1>Hi</h1><p>Some <b>bold</b> text</p></div>"
/// );
/// ```
pub fn markdown_to_html_node(markdown: &str) -> Result<Node, ParseError> {
    let mut children = Vec::new();

    for segment in segments(markdown) {
        let kind = classify(segment.text);
        tracing::trace!(
            kind = %kind,
            start = segment.span.start,
            end = segment.span.end,
            "Classified block"
        );
        children.push(assemble(segment, kind)?);
    }

    tracing::debug!(blocks = children.len(), "Assembled document tree");
    Ok(Node::parent(ROOT_TAG, children))
}

/// Render `markdown` straight to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String, ParseError> {
    markdown_to_html_node(markdown).map(|root| root.to_html())
}

/// Find the document title: the text of the first `# ` line.
///
/// Lines are trimmed before matching, so an indented `# Title` counts. There
/// is no fallback; a document without a level-1 heading is an error.
pub fn extract_title(markdown: &str) -> Result<String, ParseError> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(TITLE_PREFIX))
        .map(|title| title.trim().to_owned())
        .ok_or_else(ParseError::missing_title)
}

/// Extract the title and render the body of `markdown`.
pub fn convert(markdown: &str) -> Result<Page, ParseError> {
    let title = extract_title(markdown)?;
    let html = markdown_to_html(markdown)?;
    tracing::debug!(title = %title, html_len = html.len(), "Converted page");
    Ok(Page { title, html })
}
