//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! All `[site]` fields are expanded.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override static assets directory.
    pub static_dir: Option<PathBuf>,
    /// Override page template path.
    pub template: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override base path for site-absolute URLs.
    pub base_path: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    content_dir: Option<String>,
    static_dir: Option<String>,
    template: Option<String>,
    output_dir: Option<String>,
    base_path: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory of markdown pages.
    pub content_dir: PathBuf,
    /// Directory copied verbatim into the output.
    pub static_dir: PathBuf,
    /// HTML page template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    /// Directory the site is generated into.
    pub output_dir: PathBuf,
    /// URL prefix for site-absolute links (`/` serves from the domain root).
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

impl SiteConfig {
    /// Default site layout relative to `base`.
    fn with_base(base: &Path) -> Self {
        Self {
            content_dir: base.join("content"),
            static_dir: base.join("static"),
            template: base.join("template.html"),
            output_dir: base.join("public"),
            base_path: "/".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_path`").
        field: String,
        /// Error message (e.g., "${`QUILL_BASE`} not set").
        message: String,
    },
}

/// Require a path field to be non-empty.
fn require_non_empty_path(value: &Path, field: &str) -> Result<(), ConfigError> {
    if value.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let site = &mut self.site_resolved;
        if let Some(content_dir) = &settings.content_dir {
            site.content_dir.clone_from(content_dir);
        }
        if let Some(static_dir) = &settings.static_dir {
            site.static_dir.clone_from(static_dir);
        }
        if let Some(template) = &settings.template {
            site.template.clone_from(template);
        }
        if let Some(output_dir) = &settings.output_dir {
            site.output_dir.clone_from(output_dir);
        }
        if let Some(base_path) = &settings.base_path {
            site.base_path.clone_from(base_path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            site_resolved: SiteConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        require_non_empty_path(&site.content_dir, "site.content_dir")?;
        require_non_empty_path(&site.static_dir, "site.static_dir")?;
        require_non_empty_path(&site.template, "site.template")?;
        require_non_empty_path(&site.output_dir, "site.output_dir")?;

        if !site.base_path.starts_with('/') || !site.base_path.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_path must start and end with '/', got {:?}",
                site.base_path
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        let fields = [
            (&mut site.content_dir, "site.content_dir"),
            (&mut site.static_dir, "site.static_dir"),
            (&mut site.template, "site.template"),
            (&mut site.output_dir, "site.output_dir"),
            (&mut site.base_path, "site.base_path"),
        ];
        for (value, field) in fields {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            content_dir: resolve(self.site.content_dir.as_deref(), "content"),
            static_dir: resolve(self.site.static_dir.as_deref(), "static"),
            template: resolve(self.site.template.as_deref(), "template.html"),
            output_dir: resolve(self.site.output_dir.as_deref(), "public"),
            base_path: self.site.base_path.clone().unwrap_or_else(|| "/".to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn assert_validation_error(config: &Config, expected_substring: &str) {
        match config.validate() {
            Err(ConfigError::Validation(msg)) => {
                assert!(
                    msg.contains(expected_substring),
                    "expected {expected_substring:?} in {msg:?}"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        let site = &config.site_resolved;
        assert_eq!(site.content_dir, PathBuf::from("/test/content"));
        assert_eq!(site.static_dir, PathBuf::from("/test/static"));
        assert_eq!(site.template, PathBuf::from("/test/template.html"));
        assert_eq!(site.output_dir, PathBuf::from("/test/public"));
        assert_eq!(site.base_path, "/");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.site.content_dir.is_none());
        assert!(config.site.base_path.is_none());
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
content_dir = "pages"
static_dir = "assets"
template = "layout.html"
output_dir = "dist"
base_path = "/blog/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.content_dir.as_deref(), Some("pages"));
        assert_eq!(config.site.static_dir.as_deref(), Some("assets"));
        assert_eq!(config.site.template.as_deref(), Some("layout.html"));
        assert_eq!(config.site.output_dir.as_deref(), Some("dist"));
        assert_eq!(config.site.base_path.as_deref(), Some("/blog/"));
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let result: Result<Config, _> = toml::from_str("[site]\ncontent_dir = 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_paths_relative_to_config() {
        let (dir, path) = write_config("[site]\ncontent_dir = \"pages\"\n");
        let config = Config::load(Some(&path), None).unwrap();
        let site = &config.site_resolved;
        assert_eq!(site.content_dir, dir.path().join("pages"));
        assert_eq!(site.static_dir, dir.path().join("static"));
        assert_eq!(site.template, dir.path().join("template.html"));
        assert_eq!(site.output_dir, dir.path().join("public"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == missing));
    }

    #[test]
    fn test_load_invalid_toml() {
        let (_dir, path) = write_config("[site\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_base_path() {
        let (_dir, path) = write_config("[site]\nbase_path = \"blog\"\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_expands_env_default() {
        let (dir, path) =
            write_config("[site]\noutput_dir = \"${QUILL_TEST_OUTPUT_UNSET:-docs}\"\n");
        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.site_resolved.output_dir, dir.path().join("docs"));
    }

    #[test]
    fn test_load_missing_env_var() {
        let (_dir, path) = write_config("[site]\ntemplate = \"${QUILL_TEST_TEMPLATE_UNSET}\"\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        match err {
            ConfigError::EnvVar { field, .. } => assert_eq!(field, "site.template"),
            other => panic!("expected EnvVar error, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_cli_settings_paths() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            content_dir: Some(PathBuf::from("/custom/content")),
            output_dir: Some(PathBuf::from("/custom/out")),
            ..CliSettings::default()
        };
        config.apply_cli_settings(&settings);
        let site = &config.site_resolved;
        assert_eq!(site.content_dir, PathBuf::from("/custom/content"));
        assert_eq!(site.output_dir, PathBuf::from("/custom/out"));
        assert_eq!(site.static_dir, PathBuf::from("/test/static"));
    }

    #[test]
    fn test_apply_cli_settings_base_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            base_path: Some("/docs/".to_owned()),
            ..CliSettings::default()
        };
        config.apply_cli_settings(&settings);
        assert_eq!(config.site_resolved.base_path, "/docs/");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(
            config.site_resolved,
            Config::default_with_base(Path::new("/test")).site_resolved
        );
    }

    #[test]
    fn test_cli_settings_override_file_values() {
        let (_dir, path) = write_config("[site]\nbase_path = \"/from-file/\"\n");
        let settings = CliSettings {
            base_path: Some("/from-cli/".to_owned()),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.site_resolved.base_path, "/from-cli/");
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_path_without_trailing_slash() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.base_path = "/blog".to_owned();
        assert_validation_error(&config, "site.base_path");
    }

    #[test]
    fn test_validate_empty_template() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.template = PathBuf::new();
        assert_validation_error(&config, "site.template");
    }
}
