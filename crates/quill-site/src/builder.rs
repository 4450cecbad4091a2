//! Static site builder.
//!
//! A build runs in three steps:
//!
//! 1. Remove the previous output directory
//! 2. Copy the static directory into the output directory
//! 3. Render every `.md` file under the content directory through the page
//!    template, mirroring the directory layout (`blog/post.md` becomes
//!    `blog/post.html`)
//!
//! Hidden files and directories (names starting with `.`) and symlinked
//! directories are skipped in both trees.

use std::fs;
use std::path::{Component, Path, PathBuf};

use quill_renderer::{RenderError, render_markdown_with_urls};

use crate::template::PageTemplate;

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Directory of markdown pages.
    pub content_dir: PathBuf,
    /// Directory copied verbatim into the output.
    pub static_dir: PathBuf,
    /// HTML page template.
    pub template_path: PathBuf,
    /// URL prefix for site-absolute links.
    pub base_path: String,
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Static directory not found: {}", .0.display())]
    StaticDirNotFound(PathBuf),

    #[error("Content directory not found: {}", .0.display())]
    ContentDirNotFound(PathBuf),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Output directory {} overlaps a source directory", .0.display())]
    OutputOverlapsSource(PathBuf),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl BuildError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Files written by a build, as output paths.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Generated HTML pages.
    pub pages: Vec<PathBuf>,
    /// Copied static files.
    pub assets: Vec<PathBuf>,
}

/// Builds a static site from a content directory, a static directory and a
/// page template.
pub struct StaticSiteBuilder {
    config: BuildConfig,
}

impl StaticSiteBuilder {
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the site into `output_dir`, replacing its previous contents.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let BuildConfig {
            content_dir,
            static_dir,
            template_path,
            base_path,
        } = &self.config;

        if !static_dir.is_dir() {
            return Err(BuildError::StaticDirNotFound(static_dir.clone()));
        }
        if !content_dir.is_dir() {
            return Err(BuildError::ContentDirNotFound(content_dir.clone()));
        }
        if !template_path.is_file() {
            return Err(BuildError::TemplateNotFound(template_path.clone()));
        }
        if overlaps(output_dir, static_dir)? || overlaps(output_dir, content_dir)? {
            return Err(BuildError::OutputOverlapsSource(output_dir.to_path_buf()));
        }

        let template = PageTemplate::load(template_path)
            .map_err(BuildError::io(template_path))?
            .with_base_path(base_path.as_str());

        if output_dir.exists() {
            tracing::info!(path = %output_dir.display(), "Removing previous output");
            fs::remove_dir_all(output_dir).map_err(BuildError::io(output_dir))?;
        }
        fs::create_dir_all(output_dir).map_err(BuildError::io(output_dir))?;

        let mut report = BuildReport::default();
        copy_dir(static_dir, output_dir, &mut report.assets)?;
        generate_pages(content_dir, &template, output_dir, &mut report.pages)?;

        tracing::info!(
            pages = report.pages.len(),
            assets = report.assets.len(),
            "Site build completed"
        );
        Ok(report)
    }
}

/// Whether either path contains the other once both are resolved.
fn overlaps(a: &Path, b: &Path) -> Result<bool, BuildError> {
    let a = resolve(a)?;
    let b = resolve(b)?;
    Ok(a.starts_with(&b) || b.starts_with(&a))
}

/// Absolute form of `path` with `.` and `..` applied and symlinks resolved
/// along the part of the path that exists.
fn resolve(path: &Path) -> Result<PathBuf, BuildError> {
    let absolute = std::path::absolute(path).map_err(BuildError::io(path))?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => {
                resolved.push(other);
                if let Ok(canonical) = resolved.canonicalize() {
                    resolved = canonical;
                }
            }
        }
    }
    Ok(resolved)
}

/// Visible directory entries sorted by name.
fn visible_entries(dir: &Path) -> Result<Vec<fs::DirEntry>, BuildError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(BuildError::io(dir))? {
        let entry = entry.map_err(BuildError::io(dir))?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            tracing::debug!(path = %path.display(), "Skipping hidden entry");
            continue;
        }
        let file_type = entry.file_type().map_err(BuildError::io(&path))?;
        if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "Skipping symlinked directory");
            continue;
        }
        entries.push(entry);
    }
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}

/// Recursively copy `src` into `dest`.
fn copy_dir(src: &Path, dest: &Path, copied: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    fs::create_dir_all(dest).map_err(BuildError::io(dest))?;

    for entry in visible_entries(src)? {
        let path = entry.path();
        let target = dest.join(entry.file_name());
        if entry.file_type().map_err(BuildError::io(&path))?.is_dir() {
            copy_dir(&path, &target, copied)?;
        } else {
            fs::copy(&path, &target).map_err(BuildError::io(&path))?;
            tracing::info!(source = %path.display(), dest = %target.display(), "Copied asset");
            copied.push(target);
        }
    }
    Ok(())
}

/// Recursively render every markdown file under `content_dir`.
fn generate_pages(
    content_dir: &Path,
    template: &PageTemplate,
    dest_dir: &Path,
    generated: &mut Vec<PathBuf>,
) -> Result<(), BuildError> {
    fs::create_dir_all(dest_dir).map_err(BuildError::io(dest_dir))?;

    for entry in visible_entries(content_dir)? {
        let path = entry.path();
        if entry.file_type().map_err(BuildError::io(&path))?.is_dir() {
            generate_pages(&path, template, &dest_dir.join(entry.file_name()), generated)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let target = dest_dir.join(entry.file_name()).with_extension("html");
            generate_page(&path, template, &target)?;
            generated.push(target);
        } else {
            tracing::debug!(path = %path.display(), "Skipping non-markdown file");
        }
    }
    Ok(())
}

/// Render one markdown file through the template into `dest`.
///
/// Fails if the page has no level-1 heading to use as its title.
pub fn generate_page(source: &Path, template: &PageTemplate, dest: &Path) -> Result<(), BuildError> {
    tracing::info!(
        source = %source.display(),
        dest = %dest.display(),
        "Generating page"
    );

    let markdown = fs::read_to_string(source).map_err(BuildError::io(source))?;
    let page = render_markdown_with_urls(&markdown, &|url| template.rebase_url(url)).map_err(
        |source_err| BuildError::Render {
            path: source.to_path_buf(),
            source: source_err,
        },
    )?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
    }
    fs::write(dest, template.render(&page.title, &page.html)).map_err(BuildError::io(dest))?;
    Ok(())
}
