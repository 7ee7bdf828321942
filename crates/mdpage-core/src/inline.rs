//! Inline tokenizer.
//!
//! Turns one run of text into typed [`InlineSpan`]s using a fixed sequence
//! of passes over the still-plain spans:
//!
//! 1. `**` → bold, `_` → italic, `` ` `` → code (delimiter splitting)
//! 2. `![alt](url)` → image
//! 3. `[text](url)` not preceded by `!` → link
//!
//! A pass never looks inside spans typed by an earlier pass, so `**_x_**`
//! yields one bold span with the text `_x_`. Scanning is byte based via
//! `memchr`; no regex engine is involved.

use std::ops::Range;

use memchr::{memchr2, memchr_iter, memmem};

use crate::ast::{CowStr, InlineSpan, SpanKind};
use crate::error::ParseError;
use crate::span::Span;

/// Delimiter passes in the order they are applied.
pub const DELIMITERS: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// Tokenize `text` into inline spans.
///
/// Fails with [`ParseError::UnclosedDelimiter`] when a plain run holds an
/// odd number of `**`, `_` or `` ` `` markers. Error positions are byte
/// offsets into `text`.
///
/// ```rust
/// use mdpage_core::ast::{InlineSpan, SpanKind};
/// use mdpage_core::inline::tokenize;
///
/// let spans = tokenize("a **b**").unwrap();
/// assert_eq!(spans, vec![InlineSpan::plain("a "), InlineSpan::new("b", SpanKind::Bold)]);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<InlineSpan<'_>>, ParseError> {
    tokenize_at(text, 0)
}

/// Tokenize `text`, reporting error positions shifted by `base_offset`.
///
/// Use this when `text` is a slice of a larger document so that errors
/// point into the document rather than into the slice.
pub fn tokenize_at(text: &str, base_offset: u32) -> Result<Vec<InlineSpan<'_>>, ParseError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut runs = vec![Run::new(InlineSpan::plain(text), 0)];
    for (delimiter, kind) in DELIMITERS {
        runs = split_delimiter_runs(runs, delimiter, kind)
            .map_err(|e| e.offset_by(base_offset))?;
    }
    runs = split_pattern_runs(runs, SpanKind::Image, find_image);
    runs = split_pattern_runs(runs, SpanKind::Link, find_link);

    Ok(runs.into_iter().map(|run| run.span).collect())
}

/// Run a single delimiter pass over `spans`.
///
/// Plain spans are split on `delimiter`; odd-numbered pieces become `kind`.
/// Error positions are relative to the span that holds the unmatched
/// delimiter.
pub fn split_delimiter<'a>(
    spans: Vec<InlineSpan<'a>>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<InlineSpan<'a>>, ParseError> {
    let runs = spans.into_iter().map(|span| Run::new(span, 0)).collect();
    Ok(split_delimiter_runs(runs, delimiter, kind)?
        .into_iter()
        .map(|run| run.span)
        .collect())
}

/// Run the image pass over `spans`.
pub fn split_images(spans: Vec<InlineSpan<'_>>) -> Vec<InlineSpan<'_>> {
    let runs = spans.into_iter().map(|span| Run::new(span, 0)).collect();
    split_pattern_runs(runs, SpanKind::Image, find_image)
        .into_iter()
        .map(|run| run.span)
        .collect()
}

/// Run the link pass over `spans`.
pub fn split_links(spans: Vec<InlineSpan<'_>>) -> Vec<InlineSpan<'_>> {
    let runs = spans.into_iter().map(|span| Run::new(span, 0)).collect();
    split_pattern_runs(runs, SpanKind::Link, find_link)
        .into_iter()
        .map(|run| run.span)
        .collect()
}

/// Find every `![alt](url)` in `text` as `(alt, url)` pairs.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    extract_with(text, find_image)
}

/// Find every `[text](url)` not preceded by `!` as `(text, url)` pairs.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    extract_with(text, find_link)
}

fn extract_with<'t>(text: &'t str, find: FindFn) -> Vec<(&'t str, &'t str)> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(m) = find(bytes, from) {
        found.push((&text[m.text.clone()], &text[m.url.clone()]));
        from = m.end;
    }
    found
}

/// A span together with its byte offset in the tokenized text.
struct Run<'a> {
    span: InlineSpan<'a>,
    offset: usize,
}

impl<'a> Run<'a> {
    #[inline]
    fn new(span: InlineSpan<'a>, offset: usize) -> Self {
        Self { span, offset }
    }
}

/// Slice a `Cow`, keeping the borrow when there is one.
#[inline]
fn slice<'a>(text: &CowStr<'a>, range: Range<usize>) -> CowStr<'a> {
    match text {
        CowStr::Borrowed(s) => CowStr::Borrowed(&s[range]),
        CowStr::Owned(s) => CowStr::Owned(s[range].to_owned()),
    }
}

fn split_delimiter_runs<'a>(
    runs: Vec<Run<'a>>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<Run<'a>>, ParseError> {
    let finder = memmem::Finder::new(delimiter);
    let mut out = Vec::with_capacity(runs.len());

    for run in runs {
        if !run.span.is_plain() {
            out.push(run);
            continue;
        }

        let positions: Vec<usize> = finder.find_iter(run.span.text.as_bytes()).collect();
        if positions.is_empty() {
            out.push(run);
            continue;
        }
        if positions.len() % 2 == 1 {
            // The last occurrence is the one left without a partner.
            let start = run.offset + positions[positions.len() - 1];
            return Err(ParseError::unclosed_delimiter(
                delimiter,
                Some(Span::from_range(start, start + delimiter.len())),
            ));
        }

        let text = &run.span.text;
        let mut piece_start = 0;
        let ends = positions.iter().copied().chain(std::iter::once(text.len()));
        for (index, piece_end) in ends.enumerate() {
            if piece_start < piece_end {
                let piece_kind = if index % 2 == 0 { SpanKind::Plain } else { kind };
                out.push(Run::new(
                    InlineSpan::new(slice(text, piece_start..piece_end), piece_kind),
                    run.offset + piece_start,
                ));
            }
            piece_start = piece_end + delimiter.len();
        }
    }

    Ok(out)
}

/// Byte ranges of one `[text](url)`-shaped match.
struct PatternMatch {
    start: usize,
    text: Range<usize>,
    url: Range<usize>,
    end: usize,
}

type FindFn = fn(&[u8], usize) -> Option<PatternMatch>;

fn split_pattern_runs<'a>(runs: Vec<Run<'a>>, kind: SpanKind, find: FindFn) -> Vec<Run<'a>> {
    let mut out = Vec::with_capacity(runs.len());

    for run in runs {
        if !run.span.is_plain() {
            out.push(run);
            continue;
        }

        let Some(first) = find(run.span.text.as_bytes(), 0) else {
            out.push(run);
            continue;
        };

        let text = &run.span.text;
        let bytes = text.as_bytes();
        let mut rest = 0;
        let mut next = Some(first);

        while let Some(m) = next {
            if rest < m.start {
                out.push(Run::new(
                    InlineSpan::plain(slice(text, rest..m.start)),
                    run.offset + rest,
                ));
            }
            out.push(Run::new(
                InlineSpan::with_url(slice(text, m.text.clone()), kind, slice(text, m.url.clone())),
                run.offset + m.start,
            ));
            rest = m.end;
            next = find(bytes, rest);
        }

        if rest < bytes.len() {
            out.push(Run::new(
                InlineSpan::plain(slice(text, rest..bytes.len())),
                run.offset + rest,
            ));
        }
    }

    out
}

/// Leftmost `![alt](url)` at or after `from`.
fn find_image(bytes: &[u8], from: usize) -> Option<PatternMatch> {
    memchr_iter(b'!', &bytes[from..])
        .map(|offset| from + offset)
        .filter(|&bang| bytes.get(bang + 1) == Some(&b'['))
        .find_map(|bang| {
            let (text, url, end) = match_bracket_paren(bytes, bang + 1)?;
            Some(PatternMatch {
                start: bang,
                text,
                url,
                end,
            })
        })
}

/// Leftmost `[text](url)` at or after `from` whose `[` is not preceded by `!`.
fn find_link(bytes: &[u8], from: usize) -> Option<PatternMatch> {
    memchr_iter(b'[', &bytes[from..])
        .map(|offset| from + offset)
        .filter(|&open| open == 0 || bytes[open - 1] != b'!')
        .find_map(|open| {
            let (text, url, end) = match_bracket_paren(bytes, open)?;
            Some(PatternMatch {
                start: open,
                text,
                url,
                end,
            })
        })
}

/// Match `[text](url)` starting at `open`, which must index a `[`.
///
/// `text` may not contain brackets and `url` may not contain parentheses.
/// Returns the text range, the url range and the index just past `)`.
fn match_bracket_paren(bytes: &[u8], open: usize) -> Option<(Range<usize>, Range<usize>, usize)> {
    debug_assert_eq!(bytes.get(open), Some(&b'['));

    let text_start = open + 1;
    let close = text_start + memchr2(b'[', b']', &bytes[text_start..])?;
    if bytes[close] != b']' || bytes.get(close + 1) != Some(&b'(') {
        return None;
    }

    let url_start = close + 2;
    let paren = url_start + memchr2(b'(', b')', &bytes[url_start..])?;
    if bytes[paren] != b')' {
        return None;
    }

    Some((text_start..close, url_start..paren, paren + 1))
}
