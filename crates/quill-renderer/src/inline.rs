//! Inline span splitting.
//!
//! A text run is split by a fixed sequence of passes. Each pass only
//! subdivides spans that are still [`SpanKind::Normal`], so earlier passes
//! shield their content from later ones:
//!
//! 1. Code (`` `code` ``)
//! 2. Bold (`**bold**`)
//! 3. Italic (`_italic_`)
//! 4. Image (`![alt](url)` or `![alt](url "title")`)
//! 5. Link (`[text](url)`)
//!
//! Code runs first so `**` inside backticks stays literal, and images run
//! before links so `![alt](url)` is never read as a link preceded by `!`.
//! Unbalanced delimiters are left as plain text.

use std::sync::LazyLock;

use regex::Regex;

use crate::span::{SpanKind, TextSpan};

/// Image syntax; the optional title is matched but discarded.
static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[(?P<text>.*?)\]\((?P<url>[^) ]*)(?: "(?P<title>[^"]*)")?\)"#)
        .expect("invalid image regex")
});

/// Link syntax; the url stops at the first space or `)`.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<text>.*?)\]\((?P<url>[^) ]*)\)").expect("invalid link regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlinePass {
    Code,
    Bold,
    Italic,
    Image,
    Link,
}

/// Pass order. Changing it changes how overlapping syntax is read.
const INLINE_PASSES: [InlinePass; 5] = [
    InlinePass::Code,
    InlinePass::Bold,
    InlinePass::Italic,
    InlinePass::Image,
    InlinePass::Link,
];

impl InlinePass {
    fn split(self, span: TextSpan) -> Vec<TextSpan> {
        match self {
            Self::Code => split_delimited(span, "`", &SpanKind::Code),
            Self::Bold => split_delimited(span, "**", &SpanKind::Bold),
            Self::Italic => split_delimited(span, "_", &SpanKind::Italic),
            Self::Image => split_pattern(span, &IMAGE_PATTERN, |text, url| {
                TextSpan::image(text, url)
            }),
            Self::Link => split_pattern(span, &LINK_PATTERN, |text, url| TextSpan::link(text, url)),
        }
    }
}

/// Split a raw text run into typed spans.
///
/// # Examples
///
/// ```
/// use quill_renderer::{SpanKind, TextSpan, split_spans};
///
/// let spans = split_spans("a **b** c");
/// assert_eq!(
///     spans,
///     vec![
///         TextSpan::normal("a "),
///         TextSpan::new("b", SpanKind::Bold),
///         TextSpan::normal(" c"),
///     ]
/// );
/// ```
#[must_use]
pub fn split_spans(text: &str) -> Vec<TextSpan> {
    let mut spans = vec![TextSpan::normal(text)];
    for pass in INLINE_PASSES {
        spans = spans
            .into_iter()
            .flat_map(|span| {
                if span.is_normal() {
                    pass.split(span)
                } else {
                    vec![span]
                }
            })
            .collect();
    }
    spans
}

/// Collect `(alt, url)` pairs of every image in a text run.
#[must_use]
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    extract_with_url(text, |kind| matches!(kind, SpanKind::Image { .. }))
}

/// Collect `(text, url)` pairs of every link in a text run.
#[must_use]
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    extract_with_url(text, |kind| matches!(kind, SpanKind::Link { .. }))
}

fn extract_with_url(text: &str, wanted: impl Fn(&SpanKind) -> bool) -> Vec<(String, String)> {
    split_spans(text)
        .into_iter()
        .filter(|span| wanted(&span.kind))
        .filter_map(|span| {
            let url = span.url()?.to_owned();
            Some((span.text, url))
        })
        .collect()
}

/// Split a normal span on a paired delimiter.
///
/// Segments alternate normal/typed starting with normal. An odd number of
/// delimiters leaves the span untouched. Empty segments are dropped.
fn split_delimited(span: TextSpan, delimiter: &str, kind: &SpanKind) -> Vec<TextSpan> {
    let parts: Vec<&str> = span.text.split(delimiter).collect();
    // n delimiters yield n + 1 parts
    if parts.len() == 1 || parts.len().is_multiple_of(2) {
        return vec![span];
    }

    parts
        .iter()
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i.is_multiple_of(2) {
                TextSpan::normal(*part)
            } else {
                TextSpan::new(*part, kind.clone())
            }
        })
        .collect()
}

/// Split a normal span on every match of a url-bearing pattern.
fn split_pattern(
    span: TextSpan,
    pattern: &Regex,
    make: impl Fn(&str, &str) -> TextSpan,
) -> Vec<TextSpan> {
    if !pattern.is_match(&span.text) {
        return vec![span];
    }

    let mut out = Vec::new();
    let mut rest = span.text.as_str();
    while let Some(caps) = pattern.captures(rest) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        let before = &rest[..whole.start()];
        if !before.is_empty() {
            out.push(TextSpan::normal(before));
        }
        let text = caps.name("text").map_or("", |m| m.as_str());
        let url = caps.name("url").map_or("", |m| m.as_str());
        out.push(make(text, url));
        rest = &rest[whole.end()..];
    }
    if !rest.is_empty() {
        out.push(TextSpan::normal(rest));
    }
    out
}
