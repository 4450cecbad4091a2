//! Markdown dialect to HTML conversion.
//!
//! This crate converts a small markdown dialect into an HTML [`Node`] tree
//! and renders it to a string.
//!
//! # Pipeline
//!
//! 1. [`segment`] cuts the document into blocks at blank lines
//! 2. [`parse_block`] classifies each block and splits its text into
//!    [`TextSpan`]s with [`split_spans`]
//! 3. [`compile`] turns each [`ClassifiedBlock`] into a [`Node`]
//! 4. [`convert_document`] wraps the block nodes in a `<div>`
//!
//! # Supported syntax
//!
//! - Headings (`#` to `######`)
//! - Fenced code blocks (```` ``` ````)
//! - Blockquotes (`> `)
//! - Unordered lists (`* ` or `- `) and ordered lists (`1. `)
//! - Paragraphs
//! - Inline `**bold**`, `_italic_`, `` `code` ``, `[links](url)` and
//!   `![images](url)`
//!
//! # Example
//!
//! ```
//! use quill_renderer::{convert_document, extract_title};
//!
//! let markdown = "# Hello\n\n**Bold** text";
//! let html = convert_document(markdown).unwrap().render().unwrap();
//! assert_eq!(html, "<div><h1>Hello</h1><p><b>Bold</b> text</p></div>");
//! assert_eq!(extract_title(markdown).unwrap(), "Hello");
//! ```

mod block;
mod compiler;
mod document;
mod error;
mod inline;
mod node;
mod span;

pub use block::{
    BlockChildren, BlockType, ClassifiedBlock, classify, parse_block, parse_blocks, segment,
};
pub use compiler::compile;
pub use document::{
    RenderedPage, convert_document, extract_title, render_markdown, render_markdown_with_urls,
};
pub use error::RenderError;
pub use inline::{extract_images, extract_links, split_spans};
pub use node::{Attributes, Node, render_attributes};
pub use span::{SpanKind, TextSpan};
