//! Error types for markdown conversion and HTML rendering.

/// Error returned by the conversion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Node tree violates the leaf/parent contract.
    #[error("Invalid node: {0}")]
    InvalidNode(String),
    /// Document has no level-1 heading.
    #[error("No level-1 heading found")]
    TitleNotFound,
    /// Document contains no blocks.
    #[error("Document is empty")]
    EmptyDocument,
    /// Classified block content does not fit its block type.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
}
