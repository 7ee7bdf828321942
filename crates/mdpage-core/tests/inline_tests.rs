//! Integration tests for the inline tokenizer

use mdpage_core::ast::{InlineSpan, SpanKind};
use mdpage_core::inline::{
    extract_images, extract_links, split_delimiter, split_images, split_links, tokenize,
    tokenize_at,
};
use mdpage_core::span::Span;
use mdpage_core::{ParseError, ParseErrorKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn plain(text: &str) -> InlineSpan<'_> {
    InlineSpan::plain(text)
}

// ============================================================================
// Span Model Tests
// ============================================================================

#[test]
fn test_span_equality() {
    assert_eq!(
        InlineSpan::new("same", SpanKind::Bold),
        InlineSpan::new("same", SpanKind::Bold)
    );
    assert_ne!(
        InlineSpan::new("same", SpanKind::Bold),
        InlineSpan::new("other", SpanKind::Bold)
    );
    assert_ne!(
        InlineSpan::new("same", SpanKind::Bold),
        InlineSpan::new("same", SpanKind::Italic)
    );
}

#[test]
fn test_span_equality_considers_url() {
    let without = InlineSpan::new("Sample", SpanKind::Bold);
    let with = InlineSpan::with_url("Sample", SpanKind::Bold, "http://example.com");
    assert_ne!(without, with);
    assert_eq!(with.clone(), with);
}

#[test]
fn test_span_kind_names() {
    let names: Vec<&str> = SpanKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(names, ["text", "bold", "italic", "code", "link", "image"]);

    for kind in SpanKind::ALL {
        assert_eq!(kind.as_str().parse::<SpanKind>(), Ok(kind));
    }
}

#[test]
fn test_unknown_span_kind() {
    let err = "underline".parse::<SpanKind>().unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::UnknownSpanKind);
    assert_eq!(err.to_string(), "invalid text type: underline");
}

#[test]
fn test_into_owned_keeps_content() {
    let text = String::from("[docs](https://example.com)");
    let spans: Vec<InlineSpan<'static>> = tokenize(&text)
        .unwrap()
        .into_iter()
        .map(InlineSpan::into_owned)
        .collect();
    drop(text);
    assert_eq!(spans, vec![InlineSpan::link("docs", "https://example.com")]);
}

// ============================================================================
// Delimiter Splitting Tests
// ============================================================================

#[test]
fn test_delim_bold() {
    let spans = split_delimiter(
        vec![plain("This is text with a **bolded** word")],
        "**",
        SpanKind::Bold,
    )
    .unwrap();
    assert_eq!(
        spans,
        vec![
            plain("This is text with a "),
            InlineSpan::new("bolded", SpanKind::Bold),
            plain(" word"),
        ]
    );
}

#[test]
fn test_delim_bold_double() {
    let spans = split_delimiter(
        vec![plain("This is text with a **bolded** word and **another**")],
        "**",
        SpanKind::Bold,
    )
    .unwrap();
    assert_eq!(
        spans,
        vec![
            plain("This is text with a "),
            InlineSpan::new("bolded", SpanKind::Bold),
            plain(" word and "),
            InlineSpan::new("another", SpanKind::Bold),
        ]
    );
}

#[test]
fn test_delim_bold_multiword() {
    let spans = split_delimiter(
        vec![plain("This is text with a **bolded word** and **another**")],
        "**",
        SpanKind::Bold,
    )
    .unwrap();
    assert_eq!(
        spans,
        vec![
            plain("This is text with a "),
            InlineSpan::new("bolded word", SpanKind::Bold),
            plain(" and "),
            InlineSpan::new("another", SpanKind::Bold),
        ]
    );
}

#[test]
fn test_delim_italic() {
    let spans = split_delimiter(
        vec![plain("This is text with an _italic_ word")],
        "_",
        SpanKind::Italic,
    )
    .unwrap();
    assert_eq!(
        spans,
        vec![
            plain("This is text with an "),
            InlineSpan::new("italic", SpanKind::Italic),
            plain(" word"),
        ]
    );
}

#[test]
fn test_delim_bold_and_italic() {
    let spans = split_delimiter(vec![plain("**bold** and _italic_")], "**", SpanKind::Bold)
        .and_then(|spans| split_delimiter(spans, "_", SpanKind::Italic))
        .unwrap();
    assert_eq!(
        spans,
        vec![
            InlineSpan::new("bold", SpanKind::Bold),
            plain(" and "),
            InlineSpan::new("italic", SpanKind::Italic),
        ]
    );
}

#[test]
fn test_delim_code() {
    let spans = split_delimiter(
        vec![plain("This is text with a `code block` word")],
        "`",
        SpanKind::Code,
    )
    .unwrap();
    assert_eq!(
        spans,
        vec![
            plain("This is text with a "),
            InlineSpan::new("code block", SpanKind::Code),
            plain(" word"),
        ]
    );
}

#[test]
fn test_delim_leaves_typed_spans_alone() {
    let spans = split_delimiter(
        vec![InlineSpan::new("snake_case_name", SpanKind::Code)],
        "_",
        SpanKind::Italic,
    )
    .unwrap();
    assert_eq!(spans, vec![InlineSpan::new("snake_case_name", SpanKind::Code)]);
}

#[test]
fn test_delim_adjacent_markers_drop_empty_pieces() {
    let spans = tokenize("**a****b**").unwrap();
    assert_eq!(
        spans,
        vec![
            InlineSpan::new("a", SpanKind::Bold),
            InlineSpan::new("b", SpanKind::Bold),
        ]
    );
}

#[test]
fn test_delim_owned_input() {
    let owned = InlineSpan::plain(String::from("x `y` z"));
    let spans = split_delimiter(vec![owned], "`", SpanKind::Code).unwrap();
    assert_eq!(
        spans,
        vec![plain("x "), InlineSpan::new("y", SpanKind::Code), plain(" z")]
    );
}

// ============================================================================
// Unclosed Delimiter Tests
// ============================================================================

#[test]
fn test_unclosed_bold() {
    let err = tokenize("a **b").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::UnclosedDelimiter);
    assert_eq!(
        err,
        ParseError::unclosed_delimiter("**", Some(Span::new(2, 4)))
    );
    assert_eq!(
        err.to_string(),
        "invalid markdown syntax: unclosed delimiter '**' at bytes 2..4"
    );
}

#[test]
fn test_unclosed_reports_last_occurrence() {
    let err = tokenize("_a_ and _b").unwrap_err();
    assert_eq!(err.span(), Some(Span::new(8, 9)));
}

#[test]
fn test_unclosed_code() {
    let err = tokenize("run `cargo").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnclosedDelimiter { delimiter: "`", .. }
    ));
}

#[test]
fn test_unclosed_offset() {
    let err = tokenize_at("a _b", 10).unwrap_err();
    assert_eq!(err.span(), Some(Span::new(12, 13)));
}

#[test]
fn test_unclosed_in_second_plain_run() {
    // The stray `_` sits after a bold span, in the second plain run.
    let err = tokenize("**x** y_z").unwrap_err();
    assert_eq!(err.span(), Some(Span::new(7, 8)));
}

#[test]
fn test_split_delimiter_error() {
    let result = split_delimiter(vec![plain("1 * 2 ** 3")], "**", SpanKind::Bold);
    assert!(result.is_err());
}

// ============================================================================
// Image and Link Extraction Tests
// ============================================================================

#[test]
fn test_extract_markdown_images() {
    let matches = extract_images("This is text with an ![image](https://i.imgur.com/zjjcJKZ.png)");
    assert_eq!(matches, vec![("image", "https://i.imgur.com/zjjcJKZ.png")]);
}

#[test]
fn test_extract_markdown_links() {
    let matches = extract_links(
        "This is text with a [link](https://boot.dev) and [another link](https://blog.boot.dev)",
    );
    assert_eq!(
        matches,
        vec![
            ("link", "https://boot.dev"),
            ("another link", "https://blog.boot.dev"),
        ]
    );
}

#[test]
fn test_extract_links_skips_images() {
    let matches = extract_links("![pic](a.png) and [site](https://example.com)");
    assert_eq!(matches, vec![("site", "https://example.com")]);
}

#[test]
fn test_extract_rejects_nested_brackets() {
    assert_eq!(extract_links("[a [b](c)"), vec![("b", "c")]);
    assert!(extract_links("[a](b(c))").is_empty());
    assert!(extract_images("![alt(x)").is_empty());
}

#[test]
fn test_split_images() {
    let spans = split_images(vec![plain(
        "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and another ![second image](https://i.imgur.com/3elNhQu.png)",
    )]);
    assert_eq!(
        spans,
        vec![
            plain("This is text with an "),
            InlineSpan::image("image", "https://i.imgur.com/zjjcJKZ.png"),
            plain(" and another "),
            InlineSpan::image("second image", "https://i.imgur.com/3elNhQu.png"),
        ]
    );
}

#[test]
fn test_split_image_single() {
    let spans = split_images(vec![plain(
        "This is text with an ![image](https://example.com/img.png)",
    )]);
    assert_eq!(
        spans,
        vec![
            plain("This is text with an "),
            InlineSpan::image("image", "https://example.com/img.png"),
        ]
    );
}

#[test]
fn test_split_image_no_images() {
    let spans = split_images(vec![plain("This is plain text with no images")]);
    assert_eq!(spans, vec![plain("This is plain text with no images")]);
}

#[test]
fn test_split_links() {
    let spans = split_links(vec![plain(
        "This is text with a link [to boot dev](https://www.boot.dev) and [to youtube](https://www.youtube.com/@bootdotdev)",
    )]);
    assert_eq!(
        spans,
        vec![
            plain("This is text with a link "),
            InlineSpan::link("to boot dev", "https://www.boot.dev"),
            plain(" and "),
            InlineSpan::link("to youtube", "https://www.youtube.com/@bootdotdev"),
        ]
    );
}

#[test]
fn test_split_link_single() {
    let spans = split_links(vec![plain("Click [here](https://example.com) for more")]);
    assert_eq!(
        spans,
        vec![
            plain("Click "),
            InlineSpan::link("here", "https://example.com"),
            plain(" for more"),
        ]
    );
}

#[test]
fn test_split_link_no_links() {
    let spans = split_links(vec![plain("This is plain text with no links")]);
    assert_eq!(spans, vec![plain("This is plain text with no links")]);
}

#[test]
fn test_split_links_ignores_image_syntax() {
    let spans = split_links(vec![plain("see ![x](y.png)")]);
    assert_eq!(spans, vec![plain("see ![x](y.png)")]);
}

// ============================================================================
// Full Tokenizer Tests
// ============================================================================

#[test]
fn test_tokenize_all_types() {
    let spans = tokenize(
        "This is **text** with an _italic_ word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)",
    )
    .unwrap();
    assert_eq!(
        spans,
        vec![
            plain("This is "),
            InlineSpan::new("text", SpanKind::Bold),
            plain(" with an "),
            InlineSpan::new("italic", SpanKind::Italic),
            plain(" word and a "),
            InlineSpan::new("code block", SpanKind::Code),
            plain(" and an "),
            InlineSpan::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
            plain(" and a "),
            InlineSpan::link("link", "https://boot.dev"),
        ]
    );
}

#[test]
fn test_tokenize_plain_only() {
    let spans = tokenize("This is just plain text with no formatting").unwrap();
    assert_eq!(spans, vec![plain("This is just plain text with no formatting")]);
}

#[test]
fn test_tokenize_empty() {
    assert!(tokenize("").unwrap().is_empty());
}

#[test]
fn test_tokenize_mixed_formatting() {
    let spans = tokenize("**bold** and _italic_ together").unwrap();
    assert_eq!(
        spans,
        vec![
            InlineSpan::new("bold", SpanKind::Bold),
            plain(" and "),
            InlineSpan::new("italic", SpanKind::Italic),
            plain(" together"),
        ]
    );
}

#[test]
fn test_tokenize_multiple_images() {
    let spans = tokenize("![img1](url1.png) and ![img2](url2.png)").unwrap();
    assert_eq!(
        spans,
        vec![
            InlineSpan::image("img1", "url1.png"),
            plain(" and "),
            InlineSpan::image("img2", "url2.png"),
        ]
    );
}

#[test]
fn test_tokenize_lone_image() {
    let spans = tokenize("![alt](http://x/img.png)").unwrap();
    assert_eq!(spans, vec![InlineSpan::image("alt", "http://x/img.png")]);
}

#[test]
fn test_tokenize_does_not_nest() {
    let spans = tokenize("**_x_**").unwrap();
    assert_eq!(spans, vec![InlineSpan::new("_x_", SpanKind::Bold)]);
}

#[test]
fn test_tokenize_link_inside_bold_stays_bold() {
    let spans = tokenize("**[a](b)**").unwrap();
    assert_eq!(spans, vec![InlineSpan::new("[a](b)", SpanKind::Bold)]);
}

// ============================================================================
// Properties
// ============================================================================

fn wrap(word: &str, style: u8) -> String {
    match style {
        1 => format!("**{word}**"),
        2 => format!("_{word}_"),
        3 => format!("`{word}`"),
        _ => word.to_owned(),
    }
}

proptest! {
    #[test]
    fn prop_balanced_text_concatenates_to_unmarked_text(
        parts in prop::collection::vec(("[a-z ]{1,8}", 0u8..4), 1..8)
    ) {
        let marked: String = parts.iter().map(|(word, style)| wrap(word, *style)).collect();
        let unmarked: String = parts.iter().map(|(word, _)| word.as_str()).collect();

        let spans = tokenize(&marked).unwrap();
        let joined: String = spans.iter().map(|span| span.text.as_ref()).collect();
        prop_assert_eq!(joined, unmarked);
    }

    #[test]
    fn prop_odd_delimiter_count_fails(
        left in "[a-z ]{0,8}",
        right in "[a-z ]{0,8}",
        delimiter in prop::sample::select(vec!["**", "_", "`"]),
    ) {
        let text = format!("{left}{delimiter}{right}");
        let err = tokenize(&text).unwrap_err();
        prop_assert_eq!(err.kind(), ParseErrorKind::UnclosedDelimiter);
        let expected = Span::from_range(left.len(), left.len() + delimiter.len());
        prop_assert_eq!(err.span(), Some(expected));
    }
}
