//! Whole-document conversion and title extraction.

use crate::block::{BlockChildren, BlockType, parse_blocks};
use crate::compiler::compile;
use crate::error::RenderError;
use crate::node::Node;

/// Rendered HTML fragment with the document title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// HTML of the `<div>` wrapping all blocks.
    pub html: String,
    /// Text of the first level-1 heading.
    pub title: String,
}

/// Convert a markdown document into a `<div>` wrapping one node per block.
///
/// # Errors
///
/// Returns [`RenderError::EmptyDocument`] if the document has no blocks, or
/// any error from [`compile`].
pub fn convert_document(markdown: &str) -> Result<Node, RenderError> {
    let children = parse_blocks(markdown)
        .iter()
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?;
    if children.is_empty() {
        return Err(RenderError::EmptyDocument);
    }
    Ok(Node::parent("div", children))
}

/// Extract the plain text of the first level-1 heading.
///
/// Inline formatting is dropped: `# A **bold** title` yields `A bold title`.
///
/// # Errors
///
/// Returns [`RenderError::TitleNotFound`] if no level-1 heading exists.
pub fn extract_title(markdown: &str) -> Result<String, RenderError> {
    parse_blocks(markdown)
        .into_iter()
        .find(|block| block.block_type == BlockType::Heading && block.level == Some(1))
        .and_then(|block| match block.children {
            BlockChildren::Inline(spans) => Some(spans.into_iter().map(|s| s.text).collect()),
            BlockChildren::Lines(_) => None,
        })
        .ok_or(RenderError::TitleNotFound)
}

/// Convert and render a document, extracting its title.
///
/// # Errors
///
/// Returns [`RenderError::TitleNotFound`] if the document has no level-1
/// heading, or any conversion or rendering error.
pub fn render_markdown(markdown: &str) -> Result<RenderedPage, RenderError> {
    render_markdown_with_urls(markdown, &|_| None)
}

/// Like [`render_markdown`], passing every link and image URL through
/// `rewrite_url` before rendering.
///
/// # Errors
///
/// Same as [`render_markdown`].
pub fn render_markdown_with_urls(
    markdown: &str,
    rewrite_url: &impl Fn(&str) -> Option<String>,
) -> Result<RenderedPage, RenderError> {
    let title = extract_title(markdown)?;
    let mut root = convert_document(markdown)?;
    root.rewrite_urls(rewrite_url);
    let html = root.render()?;
    Ok(RenderedPage { html, title })
}
