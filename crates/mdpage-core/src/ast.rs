//! Intermediate syntax types shared by the tokenizer and the assemblers.
//!
//! - [`InlineSpan`] is one typed run of inline text produced by the tokenizer.
//! - [`BlockKind`] is the structural class of one segmented block.
//!
//! Both are short-lived: they exist between parsing and HTML tree
//! construction and are consumed when the tree is built.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Borrowed or owned string type for zero-copy tokenizing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// The formatting applied to an inline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Unformatted text.
    Plain,
    /// `**bold**`
    Bold,
    /// `_italic_`
    Italic,
    /// `` `code` ``
    Code,
    /// `[text](url)`
    Link,
    /// `![alt](url)`
    Image,
}

impl SpanKind {
    /// All kinds, in tokenizer order.
    pub const ALL: [SpanKind; 6] = [
        SpanKind::Plain,
        SpanKind::Bold,
        SpanKind::Italic,
        SpanKind::Code,
        SpanKind::Link,
        SpanKind::Image,
    ];

    /// Serialized name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            SpanKind::Plain => "text",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }

    /// Whether spans of this kind carry a URL.
    pub const fn has_url(self) -> bool {
        matches!(self, SpanKind::Link | SpanKind::Image)
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpanKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpanKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseError::unknown_span_kind(s))
    }
}

/// A typed run of inline text.
///
/// `url` is only meaningful for [`SpanKind::Link`] and [`SpanKind::Image`];
/// renderers ignore it for every other kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan<'a> {
    /// Visible text (alt text for images).
    pub text: CowStr<'a>,
    /// Formatting of the run.
    pub kind: SpanKind,
    /// Link target or image source.
    pub url: Option<CowStr<'a>>,
}

impl<'a> InlineSpan<'a> {
    /// Create a span without a URL.
    pub fn new(text: impl Into<CowStr<'a>>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    /// Create a span with a URL.
    pub fn with_url(
        text: impl Into<CowStr<'a>>,
        kind: SpanKind,
        url: impl Into<CowStr<'a>>,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            url: Some(url.into()),
        }
    }

    /// Shorthand for a plain text span.
    pub fn plain(text: impl Into<CowStr<'a>>) -> Self {
        Self::new(text, SpanKind::Plain)
    }

    /// Shorthand for a link span.
    pub fn link(text: impl Into<CowStr<'a>>, url: impl Into<CowStr<'a>>) -> Self {
        Self::with_url(text, SpanKind::Link, url)
    }

    /// Shorthand for an image span; `alt` becomes the span text.
    pub fn image(alt: impl Into<CowStr<'a>>, url: impl Into<CowStr<'a>>) -> Self {
        Self::with_url(alt, SpanKind::Image, url)
    }

    /// Check whether the span is still untyped text.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }

    /// Get the URL as `&str`, or `""` when absent.
    pub fn url_str(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Detach the span from the input it borrows from.
    pub fn into_owned(self) -> InlineSpan<'static> {
        InlineSpan {
            text: CowStr::Owned(self.text.into_owned()),
            kind: self.kind,
            url: self.url.map(|u| CowStr::Owned(u.into_owned())),
        }
    }
}

/// Structural class of a segmented block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Running text; the fallback for anything unrecognized.
    Paragraph,
    /// `#` through `######` heading.
    Heading(u8),
    /// Triple-backtick fenced code.
    Code,
    /// Every line starts with `>`.
    Quote,
    /// Every line starts with `- `.
    UnorderedList,
    /// Lines numbered `1. `, `2. `, ... in order.
    OrderedList,
}

impl BlockKind {
    /// Stable name of the kind, without the heading level.
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading(_) => "heading",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::OrderedList => "ordered_list",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Heading(level) => write!(f, "heading({level})"),
            other => f.write_str(other.as_str()),
        }
    }
}
