//! Static site generation for Quill.
//!
//! Copies a static asset directory and renders a tree of markdown pages
//! through an HTML [`PageTemplate`].

mod builder;
mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, StaticSiteBuilder, generate_page};
pub use template::{CONTENT_PLACEHOLDER, PageTemplate, TITLE_PLACEHOLDER};
