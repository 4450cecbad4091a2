//! `quill build` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_site::{BuildConfig, StaticSiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static assets directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// HTML page template (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// URL prefix the site is served under, e.g. `/blog/` (overrides config).
    #[arg(long, env = "QUILL_BASE_PATH")]
    base_path: Option<String>,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            static_dir: self.static_dir,
            template: self.template,
            output_dir: self.output_dir,
            base_path: self.base_path,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = config.site_resolved;

        output.info(&format!("Content: {}", site.content_dir.display()));
        output.info(&format!("Static: {}", site.static_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let builder = StaticSiteBuilder::new(BuildConfig {
            content_dir: site.content_dir,
            static_dir: site.static_dir,
            template_path: site.template,
            base_path: site.base_path,
        });
        let report = builder.build(&site.output_dir)?;

        if report.pages.is_empty() {
            output.warning("No markdown pages found");
        }
        output.success(&format!(
            "Built {} pages and copied {} assets to {}",
            report.pages.len(),
            report.assets.len(),
            site.output_dir.display()
        ));
        Ok(())
    }
}
