//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines. Each block is classified by
//! an ordered rule table; the first matching rule wins and
//! [`BlockType::Paragraph`] catches everything else.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::split_spans;
use crate::span::TextSpan;

/// One or more blank lines (whitespace-only lines count as blank).
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("invalid blank line regex"));

/// Kind of a block-level element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    /// Whether the recognition rule applies to every line rather than the
    /// whole block.
    #[must_use]
    pub fn is_line_scoped(self) -> bool {
        match self {
            Self::Quote | Self::UnorderedList | Self::OrderedList => true,
            Self::Paragraph | Self::Heading | Self::Code => false,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::UnorderedList => "unordered_list",
            Self::OrderedList => "ordered_list",
        }
    }
}

/// Recognition rule for one block type.
struct BlockRule {
    block_type: BlockType,
    /// `None` matches anything.
    pattern: Option<Regex>,
}

impl BlockRule {
    fn new(block_type: BlockType, pattern: &str) -> Self {
        Self {
            block_type,
            pattern: Some(Regex::new(pattern).expect("invalid block rule regex")),
        }
    }

    fn matches(&self, block: &str) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        if self.block_type.is_line_scoped() {
            !block.is_empty() && block.lines().all(|line| pattern.is_match(line))
        } else {
            pattern.is_match(block)
        }
    }

    /// Strip the matched prefix from `text`.
    fn strip<'a>(&self, text: &'a str) -> &'a str {
        self.pattern
            .as_ref()
            .and_then(|p| p.find(text))
            .map_or(text, |m| &text[m.end()..])
    }
}

/// Classification rules in priority order.
static BLOCK_RULES: LazyLock<[BlockRule; 6]> = LazyLock::new(|| {
    [
        BlockRule::new(BlockType::Heading, r"^#{1,6} "),
        BlockRule::new(
            BlockType::Code,
            r"(?s)\A```(?:[^\n]*\n)?(?P<content>.*)```\z",
        ),
        BlockRule::new(BlockType::Quote, r"^> "),
        BlockRule::new(BlockType::UnorderedList, r"^[*-] "),
        BlockRule::new(BlockType::OrderedList, r"^[0-9]+\. "),
        BlockRule {
            block_type: BlockType::Paragraph,
            pattern: None,
        },
    ]
});

/// First rule matching `block`, falling back to the trailing paragraph rule.
fn matching_rule(block: &str) -> &'static BlockRule {
    let [rules @ .., paragraph] = &*BLOCK_RULES;
    rules
        .iter()
        .find(|rule| rule.matches(block))
        .unwrap_or(paragraph)
}

/// Inline content of a classified block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockChildren {
    /// Spans of the whole block (paragraphs, headings, code).
    Inline(Vec<TextSpan>),
    /// Spans of each line (quotes and lists).
    Lines(Vec<Vec<TextSpan>>),
}

/// A block with its type and inline-split content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBlock {
    pub block_type: BlockType,
    pub children: BlockChildren,
    /// Heading level (1-6); `None` for other block types.
    pub level: Option<u8>,
}

/// Split a document into trimmed, non-empty blocks.
///
/// CRLF line endings are normalized to LF first.
#[must_use]
pub fn segment(document: &str) -> Vec<String> {
    let normalized = document.replace("\r\n", "\n");
    BLANK_LINES
        .split(&normalized)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Classify a block. The first matching rule wins.
#[must_use]
pub fn classify(block: &str) -> BlockType {
    matching_rule(block).block_type
}

/// Classify a block and split its content into inline spans.
#[must_use]
pub fn parse_block(block: &str) -> ClassifiedBlock {
    let rule = matching_rule(block);
    let block_type = rule.block_type;

    if block.is_empty() {
        return ClassifiedBlock {
            block_type,
            children: BlockChildren::Inline(Vec::new()),
            level: None,
        };
    }

    match block_type {
        BlockType::Paragraph => ClassifiedBlock {
            block_type,
            children: BlockChildren::Inline(split_spans(block)),
            level: None,
        },
        BlockType::Heading => {
            let content = rule.strip(block);
            // prefix is the `#` run plus one space
            let prefix_len = block.len() - content.len();
            #[allow(clippy::cast_possible_truncation)] // at most 6
            let level = (prefix_len - 1) as u8;
            ClassifiedBlock {
                block_type,
                children: BlockChildren::Inline(split_spans(content)),
                level: Some(level),
            }
        }
        BlockType::Code => {
            let content = rule
                .pattern
                .as_ref()
                .and_then(|p| p.captures(block))
                .and_then(|caps| caps.name("content"))
                .map_or("", |m| m.as_str());
            ClassifiedBlock {
                block_type,
                children: BlockChildren::Inline(split_spans(content)),
                level: None,
            }
        }
        BlockType::Quote | BlockType::UnorderedList | BlockType::OrderedList => ClassifiedBlock {
            block_type,
            children: BlockChildren::Lines(
                block
                    .lines()
                    .map(|line| split_spans(rule.strip(line)))
                    .collect(),
            ),
            level: None,
        },
    }
}

/// Segment a document and parse every block.
#[must_use]
pub fn parse_blocks(document: &str) -> Vec<ClassifiedBlock> {
    segment(document)
        .iter()
        .map(|block| parse_block(block))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SpanKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_segment_splits_on_blank_lines() {
        let markdown = "This is **bolded** paragraph\n\n\
                        This is another paragraph with _italic_ text and `code` here\n\
                        This is the same paragraph on a new line\n\n\
                        * This is a list\n\
                        * with items";
        assert_eq!(
            segment(markdown),
            vec![
                "This is **bolded** paragraph",
                "This is another paragraph with _italic_ text and `code` here\n\
                 This is the same paragraph on a new line",
                "* This is a list\n* with items",
            ]
        );
    }

    #[test]
    fn test_segment_collapses_extra_blank_lines() {
        assert_eq!(segment("a\n\n\n\n\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_segment_treats_whitespace_lines_as_blank() {
        assert_eq!(segment("a\n   \nb\n\t\n\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_segment_trims_and_drops_empty_blocks() {
        assert_eq!(segment("\n\n  first  \n\n\n\n   \n\n"), vec!["first"]);
        assert!(segment("").is_empty());
        assert!(segment("\n\n\n").is_empty());
    }

    #[test]
    fn test_segment_normalizes_crlf() {
        assert_eq!(segment("# T\r\n\r\nbody\r\nmore"), vec!["# T", "body\nmore"]);
    }

    #[test]
    fn test_classify_headings() {
        for level in 1..=6 {
            let block = format!("{} heading", "#".repeat(level));
            assert_eq!(classify(&block), BlockType::Heading, "level {level}");
        }
    }

    #[test]
    fn test_classify_too_many_hashes_is_paragraph() {
        assert_eq!(classify("####### heading"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_hash_without_space_is_paragraph() {
        assert_eq!(classify("#hashtag"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(classify("```\nlet x = 1;\n```"), BlockType::Code);
        assert_eq!(classify("```rust\nlet x = 1;\n```"), BlockType::Code);
        assert_eq!(classify("```inline```"), BlockType::Code);
    }

    #[test]
    fn test_classify_unclosed_fence_is_paragraph() {
        assert_eq!(classify("```\nlet x = 1;"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_quote() {
        assert_eq!(classify("> one\n> two"), BlockType::Quote);
    }

    #[test]
    fn test_classify_quote_requires_every_line() {
        assert_eq!(classify("> one\ntwo"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_unordered_list_mixed_markers() {
        assert_eq!(classify("* a\n- b\n* c"), BlockType::UnorderedList);
    }

    #[test]
    fn test_classify_ordered_list_ignores_numbering() {
        assert_eq!(classify("1. a\n2. b"), BlockType::OrderedList);
        assert_eq!(classify("3. a\n1. b\n10. c"), BlockType::OrderedList);
    }

    #[test]
    fn test_classify_ordered_list_requires_space() {
        assert_eq!(classify("1.a\n2.b"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_empty_block_is_paragraph() {
        assert_eq!(classify(""), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_precedence_heading_over_others() {
        // A heading whose text looks like a list marker is still a heading
        assert_eq!(classify("# * not a list"), BlockType::Heading);
    }

    #[test]
    fn test_rule_table_has_each_type_once_with_paragraph_last() {
        let types: Vec<BlockType> = BLOCK_RULES.iter().map(|rule| rule.block_type).collect();
        assert_eq!(
            types,
            vec![
                BlockType::Heading,
                BlockType::Code,
                BlockType::Quote,
                BlockType::UnorderedList,
                BlockType::OrderedList,
                BlockType::Paragraph,
            ]
        );
        assert!(BLOCK_RULES.iter().rev().skip(1).all(|rule| rule.pattern.is_some()));
    }

    #[test]
    fn test_matching_rule_strips_its_own_prefix() {
        for (block, stripped) in [
            ("## Title", "Title"),
            ("> quoted", "quoted"),
            ("- item", "item"),
            ("12. item", "item"),
            ("plain", "plain"),
        ] {
            let rule = matching_rule(block);
            assert_eq!(rule.block_type, classify(block));
            assert_eq!(rule.strip(block), stripped);
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let blocks = ["# h", "```\nx\n```", "> q", "* u", "1. o", "plain"];
        for block in blocks {
            assert_eq!(classify(block), classify(block));
        }
    }

    #[test]
    fn test_parse_heading_level_and_content() {
        let parsed = parse_block("### third level");
        assert_eq!(parsed.block_type, BlockType::Heading);
        assert_eq!(parsed.level, Some(3));
        assert_eq!(
            parsed.children,
            BlockChildren::Inline(vec![TextSpan::normal("third level")])
        );
    }

    #[test]
    fn test_parse_heading_keeps_hash_in_text() {
        let parsed = parse_block("# #1 priority");
        assert_eq!(parsed.level, Some(1));
        assert_eq!(
            parsed.children,
            BlockChildren::Inline(vec![TextSpan::normal("#1 priority")])
        );
    }

    #[test]
    fn test_parse_code_skips_info_string() {
        let parsed = parse_block("```rust\nfn main() {}\n```");
        assert_eq!(parsed.block_type, BlockType::Code);
        assert_eq!(
            parsed.children,
            BlockChildren::Inline(vec![TextSpan::normal("fn main() {}\n")])
        );
    }

    #[test]
    fn test_parse_code_without_newline() {
        let parsed = parse_block("```inline```");
        assert_eq!(
            parsed.children,
            BlockChildren::Inline(vec![TextSpan::normal("inline")])
        );
    }

    #[test]
    fn test_parse_list_strips_markers() {
        let parsed = parse_block("* **a**\n- b");
        assert_eq!(parsed.block_type, BlockType::UnorderedList);
        assert_eq!(
            parsed.children,
            BlockChildren::Lines(vec![
                vec![TextSpan::new("a", SpanKind::Bold)],
                vec![TextSpan::normal("b")],
            ])
        );
    }

    #[test]
    fn test_parse_ordered_list_strips_numbers() {
        let parsed = parse_block("1. first\n12. second");
        assert_eq!(
            parsed.children,
            BlockChildren::Lines(vec![
                vec![TextSpan::normal("first")],
                vec![TextSpan::normal("second")],
            ])
        );
    }

    #[test]
    fn test_parse_quote_strips_prefix() {
        let parsed = parse_block("> quoted\n> text");
        assert_eq!(parsed.block_type, BlockType::Quote);
        assert_eq!(
            parsed.children,
            BlockChildren::Lines(vec![
                vec![TextSpan::normal("quoted")],
                vec![TextSpan::normal("text")],
            ])
        );
    }

    #[test]
    fn test_parse_empty_block() {
        let parsed = parse_block("");
        assert_eq!(parsed.block_type, BlockType::Paragraph);
        assert_eq!(parsed.children, BlockChildren::Inline(Vec::new()));
        assert_eq!(parsed.level, None);
    }

    #[test]
    fn test_parse_blocks_document() {
        let blocks = parse_blocks("# Title\n\nBody text");
        assert_eq!(
            blocks.iter().map(|b| b.block_type).collect::<Vec<_>>(),
            vec![BlockType::Heading, BlockType::Paragraph]
        );
    }
}
