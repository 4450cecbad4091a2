//! HTML page template with placeholder substitution.
//!
//! Templates are plain HTML containing `{{ Title }}` and `{{ Content }}`.
//! Every occurrence of each placeholder is replaced.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Placeholder replaced with the page title.
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
/// Placeholder replaced with the rendered page HTML.
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Site-absolute `href` and `src` attributes in template markup.
static SITE_ABSOLUTE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?P<attr>href|src)="(?P<url>/[^"]*)""#).expect("invalid attribute regex")
});

/// Page template loaded from an HTML file.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    source: String,
    base_path: String,
}

impl PageTemplate {
    /// Create a template from its HTML source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            base_path: "/".to_owned(),
        }
    }

    /// Read a template file.
    ///
    /// Logs a warning if the template has no content placeholder.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        if !source.contains(CONTENT_PLACEHOLDER) {
            tracing::warn!(
                path = %path.display(),
                placeholder = CONTENT_PLACEHOLDER,
                "Template has no content placeholder"
            );
        }
        Ok(Self::new(source))
    }

    /// Serve the site under `base_path` instead of the domain root.
    ///
    /// Site-absolute `href="/..."` and `src="/..."` attributes of the template
    /// markup are rewritten to start with `base_path`. Page content is not
    /// touched here; pass its URLs through [`PageTemplate::rebase_url`].
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        if self.base_path != "/" {
            let source = SITE_ABSOLUTE_ATTR.replace_all(&self.source, |caps: &regex::Captures| {
                let url = &caps["url"];
                let url = self.rebase_url(url).unwrap_or_else(|| url.to_owned());
                format!(r#"{}="{url}""#, &caps["attr"])
            });
            self.source = source.into_owned();
        }
        self
    }

    /// Prefix a site-absolute URL with the base path.
    ///
    /// Returns `None` for URLs left as they are: relative and external URLs,
    /// protocol-relative `//host` URLs, and every URL under the root base path.
    #[must_use]
    pub fn rebase_url(&self, url: &str) -> Option<String> {
        if self.base_path == "/" || url.starts_with("//") {
            return None;
        }
        let rest = url.strip_prefix('/')?;
        Some(format!("{}{rest}", self.base_path))
    }

    /// Render a page.
    ///
    /// The title is substituted before the content, so placeholder text inside
    /// the content is left alone. The content is inserted verbatim.
    #[must_use]
    pub fn render(&self, title: &str, content: &str) -> String {
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}
