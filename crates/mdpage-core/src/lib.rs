//! # mdpage Core
//!
//! Converts a markdown page into an HTML document tree.
//!
//! The supported dialect is small and strict: six block kinds (paragraph,
//! heading, fenced code, quote, unordered and ordered list) separated by
//! blank lines, and five inline kinds (`**bold**`, `_italic_`, `` `code` ``,
//! `[links](url)` and `![images](url)`). Malformed input, such as an
//! unclosed `**`, is an error rather than something to repair.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdpage_core::{extract_title, markdown_to_html_node};
//!
//! let input = "# Hello World\n\nThis is a **paragraph**.";
//! let root = markdown_to_html_node(input).unwrap();
//!
//! assert_eq!(extract_title(input).unwrap(), "Hello World");
//! println!("{}", root.to_html());
//! ```
//!
//! ## Pipeline
//!
//! - [`lexer`] splits the input into blocks
//! - [`block`] classifies each block
//! - [`inline`] tokenizes inline text into typed spans
//! - [`assemble`] turns a classified block into a [`Node`] subtree
//! - [`document`] drives the pipeline and extracts the title
//!
//! Every stage is a pure function of its input, so separate documents can be
//! converted in parallel without coordination.

pub mod assemble;
pub mod ast;
pub mod block;
pub mod document;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod node;
pub mod span;

pub use ast::{BlockKind, InlineSpan, SpanKind};
pub use document::{convert, extract_title, markdown_to_html, markdown_to_html_node, Page};
pub use error::{ParseError, ParseErrorKind};
pub use node::Node;
