//! Block segmenter.
//!
//! Splits markdown into blocks at every `"\n\n"` separator, the way a plain
//! string split would, then trims each piece and drops the empty ones.
//!
//! # Performance
//!
//! - Zero-copy: segments borrow directly from input
//! - SIMD-accelerated separator scanning via `memchr::memmem`

use memchr::memmem;

use crate::span::Span;

/// Separator between blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// One trimmed block of the input with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The block text, without surrounding whitespace.
    pub text: &'a str,
    /// Byte span of `text` in the source document.
    pub span: Span,
}

impl<'a> Segment<'a> {
    /// Iterate the lines of the block.
    #[inline]
    pub fn lines(&self) -> std::str::Split<'a, char> {
        self.text.split('\n')
    }
}

/// Iterator over the non-empty blocks of a markdown document.
pub struct Segmenter<'a> {
    /// The complete input text.
    input: &'a str,
    /// Byte offset where the next raw piece starts.
    offset: usize,
    /// Set once the last piece has been produced.
    done: bool,
    finder: memmem::Finder<'static>,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            done: false,
            finder: memmem::Finder::new(BLOCK_SEPARATOR),
        }
    }

    /// Next raw piece between separators, untrimmed.
    fn next_piece(&mut self) -> Option<(usize, usize)> {
        if self.done {
            return None;
        }

        let start = self.offset;
        match self.finder.find(&self.input.as_bytes()[start..]) {
            Some(pos) => {
                self.offset = start + pos + BLOCK_SEPARATOR.len();
                Some((start, start + pos))
            }
            None => {
                self.done = true;
                Some((start, self.input.len()))
            }
        }
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        while let Some((start, end)) = self.next_piece() {
            let piece = &self.input[start..end];
            let trimmed = piece.trim();
            if trimmed.is_empty() {
                continue;
            }

            let leading = piece.len() - piece.trim_start().len();
            let text_start = start + leading;
            return Some(Segment {
                text: trimmed,
                span: Span::from_range(text_start, text_start + trimmed.len()),
            });
        }
        None
    }
}

/// Iterate the blocks of `markdown` with their source spans.
pub fn segments(markdown: &str) -> Segmenter<'_> {
    Segmenter::new(markdown)
}

/// Split `markdown` into trimmed, non-empty blocks.
///
/// Surrounding whitespace and runs of extra blank lines are lost, so joining
/// the result with [`BLOCK_SEPARATOR`] does not reproduce the input in
/// general.
///
/// ```rust
/// use mdpage_core::lexer::segment;
///
/// let blocks = segment("# Title\n\n\n\nSome text\n");
/// assert_eq!(blocks, vec!["# Title", "Some text"]);
/// ```
pub fn segment(markdown: &str) -> Vec<&str> {
    segments(markdown).map(|segment| segment.text).collect()
}
