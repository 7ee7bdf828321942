//! Block classification.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. heading: one to six `#` followed by a space
//! 2. code: starts and ends with a triple backtick
//! 3. quote: every line starts with `>`
//! 4. unordered list: every line starts with `- `
//! 5. ordered list: line *i* starts with `i. `, counting from 1
//! 6. paragraph
//!
//! There is no best-effort matching. A block that almost fits a rule is a
//! paragraph.

use crate::ast::BlockKind;

/// Largest heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Code fence marker.
pub const CODE_FENCE: &str = "```";

/// Classify a trimmed block.
pub fn classify(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }
    if block.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE) {
        return BlockKind::Code;
    }
    if block.split('\n').all(|line| line.starts_with('>')) {
        return BlockKind::Quote;
    }
    if block.split('\n').all(|line| line.starts_with("- ")) {
        return BlockKind::UnorderedList;
    }
    if is_ordered_list(block) {
        return BlockKind::OrderedList;
    }
    BlockKind::Paragraph
}

/// Level of a heading line, or `None` when `text` is not a heading.
///
/// `"### a"` has level 3; `"###a"` and `"####### a"` are not headings.
pub fn heading_level(text: &str) -> Option<u8> {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > usize::from(MAX_HEADING_LEVEL) {
        return None;
    }
    if text.as_bytes().get(hashes) != Some(&b' ') {
        return None;
    }
    Some(hashes as u8)
}

/// Marker that must start line `index` (1-based) of an ordered list.
#[inline]
pub fn ordered_marker(index: usize) -> String {
    format!("{index}. ")
}

fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .zip(1..)
        .all(|(line, index)| line.starts_with(&ordered_marker(index)))
}
