//! Source location tracking.
//!
//! Segmented blocks and parse errors carry a `Span` pointing back into the
//! markdown they came from, so drivers can report where a document failed.

/// A byte range in the source text.
///
/// Spans use byte offsets (not character offsets).
/// Both `start` and `end` are inclusive-exclusive: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use mdpage_core::span::Span;
///
/// let span = Span::new(4, 10);
/// assert_eq!(span.len(), 6);
/// assert_eq!(span.shift(2), Span::new(6, 12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span from `usize` offsets into a `&str`.
    #[inline]
    pub fn from_range(start: usize, end: usize) -> Self {
        Self::new(start as u32, end as u32)
    }

    /// Get the length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Move the span forward by `offset` bytes.
    ///
    /// Used to turn a position relative to an inline run into an absolute
    /// position in the enclosing document.
    #[inline]
    pub const fn shift(self, offset: u32) -> Span {
        Span {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}
