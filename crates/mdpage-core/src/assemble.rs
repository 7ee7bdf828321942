//! Block-to-node assembly.
//!
//! Strips the block markers of a classified block, tokenizes what is left
//! and wraps the resulting inline nodes in the block's element.

use crate::ast::{BlockKind, InlineSpan, SpanKind};
use crate::block::{ordered_marker, CODE_FENCE};
use crate::error::ParseError;
use crate::inline::tokenize_at;
use crate::lexer::Segment;
use crate::node::Node;
use crate::span::Span;

/// Convert one inline span into a tree node.
pub fn span_to_node(span: InlineSpan<'_>) -> Node {
    match span.kind {
        SpanKind::Plain => Node::text(span.text),
        SpanKind::Bold => Node::leaf("b", span.text),
        SpanKind::Italic => Node::leaf("i", span.text),
        SpanKind::Code => Node::leaf("code", span.text),
        SpanKind::Link => {
            Node::leaf("a", span.text).with_attr("href", span.url.unwrap_or_default())
        }
        SpanKind::Image => Node::leaf("img", "")
            .with_attr("src", span.url.unwrap_or_default())
            .with_attr("alt", span.text),
    }
}

/// Build the subtree for a block of the given kind.
///
/// Error positions are relative to `block`.
pub fn block_to_node(block: &str, kind: BlockKind) -> Result<Node, ParseError> {
    assemble(
        Segment {
            text: block,
            span: Span::from_range(0, block.len()),
        },
        kind,
    )
}

/// Build the subtree for a segmented block.
///
/// Error positions are absolute offsets in the segment's source document.
pub fn assemble(segment: Segment<'_>, kind: BlockKind) -> Result<Node, ParseError> {
    let block = segment.text;
    let base = segment.span.start;

    match kind {
        BlockKind::Paragraph => Ok(Node::parent("p", inline_nodes(block, base)?)),
        BlockKind::Heading(level) => {
            let prefix = usize::from(level) + 1;
            let text = block.get(prefix..).unwrap_or("");
            Ok(Node::parent(
                format!("h{level}"),
                inline_nodes(text, base + prefix as u32)?,
            ))
        }
        BlockKind::Code => {
            let fence = CODE_FENCE.len();
            let code = block
                .get(fence..block.len().saturating_sub(fence))
                .unwrap_or("");
            Ok(Node::parent(
                "pre",
                vec![Node::parent("code", vec![span_to_node(InlineSpan::plain(code))])],
            ))
        }
        BlockKind::Quote => {
            let text = segment
                .lines()
                .map(strip_quote_marker)
                .collect::<Vec<_>>()
                .join("\n");
            let children = inline_nodes(&text, 0).map_err(|e| e.with_span(segment.span))?;
            Ok(Node::parent("blockquote", children))
        }
        BlockKind::UnorderedList => {
            let mut items = Vec::new();
            for (line, offset) in line_offsets(segment) {
                let text = line.get(2..).unwrap_or("");
                items.push(Node::parent("li", inline_nodes(text, offset + 2)?));
            }
            Ok(Node::parent("ul", items))
        }
        BlockKind::OrderedList => {
            let mut items = Vec::new();
            for ((line, offset), index) in line_offsets(segment).zip(1..) {
                let text = strip_ordered_marker(line, index);
                let marker = (line.len() - text.len()) as u32;
                items.push(Node::parent("li", inline_nodes(text, offset + marker)?));
            }
            Ok(Node::parent("ol", items))
        }
    }
}

fn inline_nodes(text: &str, offset: u32) -> Result<Vec<Node>, ParseError> {
    Ok(tokenize_at(text, offset)?
        .into_iter()
        .map(span_to_node)
        .collect())
}

/// Lines of the segment paired with their absolute start offsets.
fn line_offsets<'a>(segment: Segment<'a>) -> impl Iterator<Item = (&'a str, u32)> {
    let mut offset = segment.span.start;
    segment.lines().map(move |line| {
        let start = offset;
        offset += line.len() as u32 + 1;
        (line, start)
    })
}

fn strip_quote_marker(line: &str) -> &str {
    line.strip_prefix("> ")
        .or_else(|| line.strip_prefix('>'))
        .unwrap_or(line)
}

/// Drop the `"{index}. "` marker of an ordered list line.
///
/// Classification guarantees the exact marker; the fallback only guards
/// against a block that was assembled with the wrong kind.
fn strip_ordered_marker(line: &str, index: usize) -> &str {
    let marker = ordered_marker(index);
    let item = line.strip_prefix(marker.as_str());
    debug_assert!(item.is_some(), "ordered list line {index} lacks `{marker}`");
    item.or_else(|| line.split_once(". ").map(|(_, rest)| rest))
        .unwrap_or(line)
}
