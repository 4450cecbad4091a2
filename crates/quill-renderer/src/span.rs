//! Typed text spans produced by inline splitting.

use crate::node::Node;

/// Inline formatting of a [`TextSpan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Normal,
    Bold,
    Italic,
    Code,
    Link { url: String },
    Image { url: String },
}

/// A run of text with a single inline formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// Text content. For links and images this is the link text or alt text.
    pub text: String,
    pub kind: SpanKind,
}

impl TextSpan {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    #[must_use]
    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Normal)
    }

    #[must_use]
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Link { url: url.into() })
    }

    #[must_use]
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(alt, SpanKind::Image { url: url.into() })
    }

    /// Target URL for links and images.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            SpanKind::Link { url } | SpanKind::Image { url } => Some(url),
            SpanKind::Normal | SpanKind::Bold | SpanKind::Italic | SpanKind::Code => None,
        }
    }

    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.kind == SpanKind::Normal
    }

    /// Convert to an HTML leaf node.
    ///
    /// Images render with an empty value and `src`/`alt` attributes.
    #[must_use]
    pub fn to_node(&self) -> Node {
        match &self.kind {
            SpanKind::Normal => Node::text(self.text.as_str()),
            SpanKind::Bold => Node::leaf("b", self.text.as_str()),
            SpanKind::Italic => Node::leaf("i", self.text.as_str()),
            SpanKind::Code => Node::leaf("code", self.text.as_str()),
            SpanKind::Link { url } => Node::leaf("a", self.text.as_str()).with_attr("href", url),
            SpanKind::Image { url } => Node::leaf("img", "")
                .with_attr("src", url)
                .with_attr("alt", self.text.as_str()),
        }
    }
}
