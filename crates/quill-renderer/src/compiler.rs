//! Compile classified blocks into HTML nodes.

use crate::block::{BlockChildren, BlockType, ClassifiedBlock};
use crate::error::RenderError;
use crate::node::Node;
use crate::span::TextSpan;

/// Compile a classified block into an HTML node.
///
/// | Block type      | Output                                   |
/// |-----------------|------------------------------------------|
/// | Paragraph       | `<p>` with inline nodes                  |
/// | Heading         | `<h1>`..`<h6>` with inline nodes         |
/// | Code            | `<code>` with inline nodes               |
/// | Quote           | `<blockquote>` with all lines' nodes     |
/// | `UnorderedList` | `<ul>` with one `<li>` per line          |
/// | `OrderedList`   | `<ol>` with one `<li>` per line          |
///
/// Content without spans compiles to an empty leaf (`<p></p>`).
///
/// # Errors
///
/// Returns [`RenderError::UnknownBlockType`] if the children do not fit the
/// block type or a heading has no valid level.
pub fn compile(block: &ClassifiedBlock) -> Result<Node, RenderError> {
    match (block.block_type, &block.children) {
        (BlockType::Paragraph, BlockChildren::Inline(spans)) => Ok(wrap("p", spans)),
        (BlockType::Heading, BlockChildren::Inline(spans)) => {
            let level = block
                .level
                .filter(|level| (1..=6).contains(level))
                .ok_or_else(|| {
                    RenderError::UnknownBlockType(format!(
                        "heading with level {:?}",
                        block.level
                    ))
                })?;
            Ok(wrap(&format!("h{level}"), spans))
        }
        (BlockType::Code, BlockChildren::Inline(spans)) => Ok(wrap("code", spans)),
        // Quote lines share one child sequence; list lines each get an `<li>`
        (BlockType::Quote, BlockChildren::Lines(lines)) => {
            let spans: Vec<TextSpan> = lines.iter().flatten().cloned().collect();
            Ok(wrap("blockquote", &spans))
        }
        (BlockType::UnorderedList, BlockChildren::Lines(lines)) => Ok(list("ul", lines)),
        (BlockType::OrderedList, BlockChildren::Lines(lines)) => Ok(list("ol", lines)),
        (block_type, children) => Err(RenderError::UnknownBlockType(format!(
            "{} with {} children",
            block_type.as_str(),
            match children {
                BlockChildren::Inline(_) => "inline",
                BlockChildren::Lines(_) => "per-line",
            }
        ))),
    }
}

fn wrap(tag: &str, spans: &[TextSpan]) -> Node {
    if spans.is_empty() {
        return Node::leaf(tag, "");
    }
    Node::parent(tag, spans.iter().map(TextSpan::to_node).collect())
}

fn list(tag: &str, lines: &[Vec<TextSpan>]) -> Node {
    if lines.is_empty() {
        return Node::leaf(tag, "");
    }
    Node::parent(tag, lines.iter().map(|line| wrap("li", line)).collect())
}
