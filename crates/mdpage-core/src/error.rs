use crate::span::Span;

/// Error kinds for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A delimiter (`**`, `_`, `` ` ``) without a matching closer.
    UnclosedDelimiter,
    /// The document has no level-1 heading to use as its title.
    MissingTitle,
    /// An inline span kind name that the renderer does not know.
    UnknownSpanKind,
}

/// A failure to convert a markdown document.
///
/// Every variant aborts conversion of the whole document; none of them is
/// recoverable locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A plain text run holds an odd number of occurrences of `delimiter`.
    #[error("invalid markdown syntax: unclosed delimiter '{delimiter}'{}", at(.span))]
    UnclosedDelimiter {
        /// The delimiter that is missing its closing half.
        delimiter: &'static str,
        /// Location of the unmatched occurrence, when known.
        span: Option<Span>,
    },

    /// No line of the document starts with `"# "`.
    #[error("No h1 header found in markdown")]
    MissingTitle,

    /// A span kind name outside the closed set of inline kinds.
    #[error("invalid text type: {name}")]
    UnknownSpanKind {
        /// The name that failed to resolve.
        name: String,
    },
}

fn at(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at bytes {}..{}", span.start, span.end),
        None => String::new(),
    }
}

impl ParseError {
    /// Create an error for an unclosed delimiter.
    pub fn unclosed_delimiter(delimiter: &'static str, span: Option<Span>) -> Self {
        Self::UnclosedDelimiter { delimiter, span }
    }

    /// Create an error for a document without a level-1 heading.
    pub fn missing_title() -> Self {
        Self::MissingTitle
    }

    /// Create an error for an unrecognized span kind name.
    pub fn unknown_span_kind(name: impl Into<String>) -> Self {
        Self::UnknownSpanKind { name: name.into() }
    }

    /// Get the error category.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnclosedDelimiter { .. } => ParseErrorKind::UnclosedDelimiter,
            Self::MissingTitle => ParseErrorKind::MissingTitle,
            Self::UnknownSpanKind { .. } => ParseErrorKind::UnknownSpanKind,
        }
    }

    /// Source location attached to the error, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnclosedDelimiter { span, .. } => *span,
            Self::MissingTitle | Self::UnknownSpanKind { .. } => None,
        }
    }

    /// Shift the attached location by `offset` bytes.
    ///
    /// The tokenizer reports positions relative to the text it was given;
    /// block assembly uses this to make them absolute.
    pub fn offset_by(self, offset: u32) -> Self {
        match self {
            Self::UnclosedDelimiter { delimiter, span } => Self::UnclosedDelimiter {
                delimiter,
                span: span.map(|s| s.shift(offset)),
            },
            other => other,
        }
    }

    /// Replace the attached location with `span`.
    pub fn with_span(self, span: Span) -> Self {
        match self {
            Self::UnclosedDelimiter { delimiter, .. } => Self::UnclosedDelimiter {
                delimiter,
                span: Some(span),
            },
            other => other,
        }
    }
}
