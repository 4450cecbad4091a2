//! `quill render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use console::Term;
use quill_renderer::{convert_document, extract_title};

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Print the document title instead of the HTML.
    #[arg(long)]
    title: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let rendered = render_file(&self.file, self.title)?;
        Term::stdout().write_line(&rendered)?;
        Ok(())
    }
}

/// Render a markdown file to its HTML fragment, or extract its title.
fn render_file(path: &Path, title_only: bool) -> Result<String, CliError> {
    let markdown = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = markdown.len(), "Rendering file");
    if title_only {
        Ok(extract_title(&markdown)?)
    } else {
        Ok(convert_document(&markdown)?.render()?)
    }
}
