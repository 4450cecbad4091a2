//! HTML node tree and serialization.
//!
//! A [`Node`] is either a [`Node::Leaf`] carrying a text value or a
//! [`Node::Parent`] wrapping other nodes. Trees are built by the block
//! compiler and serialized once with [`Node::render`].

use std::fmt::Write;

use crate::error::RenderError;

/// Insertion-ordered HTML attributes.
pub type Attributes = Vec<(String, String)>;

/// Node of an HTML document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with a text value, or raw text when the tag is absent or empty.
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attrs: Attributes,
    },
    /// Element wrapping child nodes.
    Parent {
        tag: String,
        children: Vec<Node>,
        attrs: Attributes,
    },
}

impl Node {
    /// Create an untagged leaf that renders `value` verbatim.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: None,
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    /// Create a tagged leaf.
    #[must_use]
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    /// Create a parent element.
    #[must_use]
    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Parent {
            tag: tag.into(),
            children,
            attrs: Vec::new(),
        }
    }

    /// Append an attribute, keeping insertion order.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Leaf { attrs, .. } | Self::Parent { attrs, .. } => {
                attrs.push((key.into(), value.into()));
            }
        }
        self
    }

    /// Serialize this node and its descendants to HTML.
    ///
    /// Leaf values are written as-is, without escaping.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidNode`] if a leaf has no value, or a parent
    /// has an empty tag or no children.
    pub fn render(&self) -> Result<String, RenderError> {
        let mut out = String::with_capacity(256);
        render_into(self, &mut out)?;
        Ok(out)
    }

    /// Replace `href` and `src` attribute values throughout the tree.
    ///
    /// `rewrite` receives each URL and returns its replacement, or `None` to
    /// keep it.
    pub fn rewrite_urls(&mut self, rewrite: &impl Fn(&str) -> Option<String>) {
        let (Self::Leaf { attrs, .. } | Self::Parent { attrs, .. }) = self;
        for (key, value) in attrs.iter_mut() {
            if (key == "href" || key == "src")
                && let Some(url) = rewrite(value)
            {
                *value = url;
            }
        }
        if let Self::Parent { children, .. } = self {
            for child in children {
                child.rewrite_urls(rewrite);
            }
        }
    }
}

/// Serialize a node recursively into `out`.
fn render_into(node: &Node, out: &mut String) -> Result<(), RenderError> {
    match node {
        Node::Leaf { tag, value, attrs } => {
            let Some(value) = value else {
                return Err(RenderError::InvalidNode(format!(
                    "leaf <{}> has no value",
                    tag.as_deref().unwrap_or_default()
                )));
            };
            match tag.as_deref() {
                None | Some("") => out.push_str(value),
                Some(tag) => {
                    let _ = write!(out, "<{tag}{}>{value}</{tag}>", render_attributes(attrs));
                }
            }
        }
        Node::Parent {
            tag,
            children,
            attrs,
        } => {
            if tag.is_empty() {
                return Err(RenderError::InvalidNode(
                    "parent tag cannot be empty".to_owned(),
                ));
            }
            if children.is_empty() {
                return Err(RenderError::InvalidNode(format!(
                    "parent <{tag}> has no children"
                )));
            }
            let _ = write!(out, "<{tag}{}>", render_attributes(attrs));
            for child in children {
                render_into(child, out)?;
            }
            let _ = write!(out, "</{tag}>");
        }
    }
    Ok(())
}

/// Render attributes as ` key="value"` pairs in insertion order.
///
/// Values are substituted raw; quote characters are not escaped.
#[must_use]
pub fn render_attributes(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        let _ = write!(out, r#" {key}="{value}""#);
    }
    out
}
