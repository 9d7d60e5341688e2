//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
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
//! Expanded fields:
//! - `content.source_dir`
//! - `publish.base_url`
//! - `export.output_dir`
//! - `bundle.output_dir`
//! - `diagrams.program`
//! - `diagrams.tools_dir`

mod expand;

use folio_diagrams::consts::{
    DEFAULT_BACKGROUND, DEFAULT_CLI_VERSION, DEFAULT_INLINE_WIDTH, DEFAULT_LINK_WIDTH,
    DEFAULT_PADDING, DEFAULT_TIMEOUT,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the inline export output directory.
    pub export_dir: Option<PathBuf>,
    /// Override the bundle output directory.
    pub bundle_dir: Option<PathBuf>,
    /// Override the published base URL.
    pub base_url: Option<String>,
    /// Override the inline export strict flag.
    pub strict: Option<bool>,
    /// Override the diagram renderer program.
    pub renderer_program: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content discovery configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Published URL layout for inline exports.
    pub publish: PublishConfig,
    /// Inline export configuration.
    export: ExportConfigRaw,
    /// Bundle configuration.
    bundle: BundleConfigRaw,
    /// Diagram renderer configuration.
    diagrams: DiagramsConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved inline export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Resolved bundle configuration (set after loading).
    #[serde(skip)]
    pub bundle_resolved: BundleConfig,
    /// Resolved diagram configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    exclude: Option<Vec<String>>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory scanned for markdown documents.
    pub source_dir: PathBuf,
    /// Repository root used to resolve explicit changed-file lists.
    pub repo_root: PathBuf,
    /// Glob patterns (relative to `source_dir`) excluded from scans.
    pub exclude: Vec<String>,
}

/// Published URL layout.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Base URL of the published site (e.g. `https://blog.example.com`).
    ///
    /// Required by inline export; see [`Config::require_base_url`].
    pub base_url: Option<String>,
    /// Path segment between the base URL and the slug.
    pub section: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            section: "posts".to_owned(),
        }
    }
}

/// What inline export does when a diagram fails to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFailureMode {
    /// Keep the fenced source and carry on.
    #[default]
    Degrade,
    /// Fail the document.
    Fail,
}

/// How bundle mode treats diagram blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleDiagramMode {
    /// Render blocks into the bundle's images directory.
    #[default]
    Render,
    /// Require diagrams to be pre-rendered; any block fails the document.
    Forbid,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    output_dir: Option<String>,
    strict: Option<bool>,
    render_failure: Option<RenderFailureMode>,
}

/// Resolved inline export configuration.
#[derive(Debug, Default)]
pub struct ExportConfig {
    /// Flat output directory for `<slug>.html` files.
    pub output_dir: PathBuf,
    /// Exit non-zero when any document fails.
    pub strict: bool,
    /// Diagram failure handling.
    pub render_failure: RenderFailureMode,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BundleConfigRaw {
    output_dir: Option<String>,
    diagrams: Option<BundleDiagramMode>,
}

/// Resolved bundle configuration.
#[derive(Debug, Default)]
pub struct BundleConfig {
    /// Output root; cleared at the start of every bundle run.
    pub output_dir: PathBuf,
    /// Diagram handling.
    pub diagrams: BundleDiagramMode,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    program: Option<String>,
    tools_dir: Option<String>,
    cli_version: Option<String>,
    background: Option<String>,
    inline_width: Option<u32>,
    bundle_width: Option<u32>,
    padding: Option<u32>,
    timeout_secs: Option<u64>,
}

/// Resolved diagram renderer configuration.
#[derive(Debug, Clone)]
pub struct DiagramsConfig {
    /// Explicit renderer executable; skips discovery when set.
    pub program: Option<String>,
    /// Directory whose `node_modules/.bin` is searched for a local `mmdc`.
    pub tools_dir: Option<PathBuf>,
    /// Mermaid CLI version used with the `npx` shim.
    pub cli_version: String,
    /// Background mode passed to the renderer.
    pub background: String,
    /// Render width for inline exports.
    pub inline_width: u32,
    /// Render width for bundles and pre-rendering.
    pub bundle_width: u32,
    /// Pixels added to every side of a linked SVG's `viewBox`.
    pub padding: u32,
    /// Maximum wait for one renderer invocation.
    pub timeout: Duration,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            program: None,
            tools_dir: None,
            cli_version: DEFAULT_CLI_VERSION.to_owned(),
            background: DEFAULT_BACKGROUND.to_owned(),
            inline_width: DEFAULT_INLINE_WIDTH,
            bundle_width: DEFAULT_LINK_WIDTH,
            padding: DEFAULT_PADDING,
            timeout: DEFAULT_TIMEOUT,
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
        /// Config field path (e.g., "`publish.base_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Absolute form of a CLI path; falls back to the path as given when the
/// current directory is unavailable.
fn absolute_or_given(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a numeric field to fall within `1..=max`.
fn require_range(value: u64, max: u64, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    if value > max {
        return Err(ConfigError::Validation(format!(
            "{field} cannot exceed {max}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
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
    ///
    /// Relative override paths are taken from the current directory.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir = absolute_or_given(source_dir);
        }
        if let Some(export_dir) = &settings.export_dir {
            self.export_resolved.output_dir = absolute_or_given(export_dir);
        }
        if let Some(bundle_dir) = &settings.bundle_dir {
            self.bundle_resolved.output_dir = absolute_or_given(bundle_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.publish.base_url = Some(base_url.clone());
        }
        if let Some(strict) = settings.strict {
            self.export_resolved.strict = strict;
        }
        if let Some(program) = &settings.renderer_program {
            self.diagrams_resolved.program = Some(program.clone());
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
            content: ContentConfigRaw::default(),
            publish: PublishConfig::default(),
            export: ExportConfigRaw::default(),
            bundle: BundleConfigRaw::default(),
            diagrams: DiagramsConfigRaw::default(),
            content_resolved: ContentConfig {
                source_dir: base.join("content/posts"),
                repo_root: base.to_path_buf(),
                exclude: Vec::new(),
            },
            export_resolved: ExportConfig {
                output_dir: base.join("dist/medium"),
                strict: false,
                render_failure: RenderFailureMode::Degrade,
            },
            bundle_resolved: BundleConfig {
                output_dir: base.join("dist/bundles"),
                diagrams: BundleDiagramMode::Render,
            },
            diagrams_resolved: DiagramsConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, path.parent().unwrap_or(Path::new(".")))
            .map(|mut config| {
                config.config_path = Some(path.to_path_buf());
                config
            })
    }

    /// Parse, expand, resolve and validate configuration text.
    fn from_toml_str(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(config_dir);
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_publish()?;
        self.validate_diagrams()?;
        Ok(())
    }

    /// Published base URL, which inline export needs to build asset URLs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when no base URL is configured.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        self.publish.base_url.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "publish.base_url is required for export (set it in folio.toml or pass --base-url)"
                    .to_owned(),
            )
        })
    }

    fn validate_publish(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.publish.base_url {
            require_non_empty(base_url, "publish.base_url")?;
            require_http_url(base_url, "publish.base_url")?;
        }
        require_non_empty(&self.publish.section, "publish.section")?;
        Ok(())
    }

    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        const MAX_WIDTH: u64 = 10_000;
        const MAX_TIMEOUT_SECS: u64 = 3_600;

        let diagrams = &self.diagrams_resolved;
        if let Some(program) = &diagrams.program {
            require_non_empty(program, "diagrams.program")?;
        }
        require_non_empty(&diagrams.background, "diagrams.background")?;
        require_non_empty(&diagrams.cli_version, "diagrams.cli_version")?;
        require_range(
            u64::from(diagrams.inline_width),
            MAX_WIDTH,
            "diagrams.inline_width",
        )?;
        require_range(
            u64::from(diagrams.bundle_width),
            MAX_WIDTH,
            "diagrams.bundle_width",
        )?;
        require_range(
            diagrams.timeout.as_secs(),
            MAX_TIMEOUT_SECS,
            "diagrams.timeout_secs",
        )?;
        if diagrams.padding > 1_000 {
            return Err(ConfigError::Validation(
                "diagrams.padding cannot exceed 1000".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.content.source_dir, "content.source_dir")?;
        expand::expand_opt(&mut self.publish.base_url, "publish.base_url")?;
        expand::expand_opt(&mut self.export.output_dir, "export.output_dir")?;
        expand::expand_opt(&mut self.bundle.output_dir, "bundle.output_dir")?;
        expand::expand_opt(&mut self.diagrams.program, "diagrams.program")?;
        expand::expand_opt(&mut self.diagrams.tools_dir, "diagrams.tools_dir")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            source_dir: resolve(self.content.source_dir.as_deref(), "content/posts"),
            repo_root: config_dir.to_path_buf(),
            exclude: self.content.exclude.clone().unwrap_or_default(),
        };

        self.export_resolved = ExportConfig {
            output_dir: resolve(self.export.output_dir.as_deref(), "dist/medium"),
            strict: self.export.strict.unwrap_or(false),
            render_failure: self.export.render_failure.unwrap_or_default(),
        };

        self.bundle_resolved = BundleConfig {
            output_dir: resolve(self.bundle.output_dir.as_deref(), "dist/bundles"),
            diagrams: self.bundle.diagrams.unwrap_or_default(),
        };

        let defaults = DiagramsConfig::default();
        let raw = &self.diagrams;
        self.diagrams_resolved = DiagramsConfig {
            program: raw.program.clone(),
            tools_dir: raw.tools_dir.as_deref().map(|d| config_dir.join(d)),
            cli_version: raw.cli_version.clone().unwrap_or(defaults.cli_version),
            background: raw.background.clone().unwrap_or(defaults.background),
            inline_width: raw.inline_width.unwrap_or(defaults.inline_width),
            bundle_width: raw.bundle_width.unwrap_or(defaults.bundle_width),
            padding: raw.padding.unwrap_or(defaults.padding),
            timeout: raw
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/blog"));
        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/blog/content/posts")
        );
        assert_eq!(config.content_resolved.repo_root, PathBuf::from("/blog"));
        assert_eq!(
            config.export_resolved.output_dir,
            PathBuf::from("/blog/dist/medium")
        );
        assert_eq!(
            config.bundle_resolved.output_dir,
            PathBuf::from("/blog/dist/bundles")
        );
        assert_eq!(config.publish.section, "posts");
        assert_eq!(config.diagrams_resolved.inline_width, 900);
        assert_eq!(config.diagrams_resolved.bundle_width, 1100);
        assert_eq!(config.diagrams_resolved.padding, 8);
        assert!(!config.export_resolved.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml_str("", Path::new("/blog")).unwrap();
        assert_eq!(config.publish.base_url, None);
        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/blog/content/posts")
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[content]
source_dir = "site/content/posts"
exclude = ["drafts/**"]

[publish]
base_url = "https://blog.example.com"
section = "articles"

[export]
output_dir = "out/medium"
strict = true
render_failure = "fail"

[bundle]
output_dir = "out/bundles"
diagrams = "forbid"

[diagrams]
program = "/usr/local/bin/mmdc"
tools_dir = "tools"
background = "white"
inline_width = 800
bundle_width = 1200
padding = 12
timeout_secs = 30
"#;
        let config = Config::from_toml_str(toml, Path::new("/repo")).unwrap();

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/repo/site/content/posts")
        );
        assert_eq!(config.content_resolved.exclude, vec!["drafts/**".to_owned()]);
        assert_eq!(
            config.publish.base_url.as_deref(),
            Some("https://blog.example.com")
        );
        assert_eq!(config.publish.section, "articles");
        assert_eq!(
            config.export_resolved.output_dir,
            PathBuf::from("/repo/out/medium")
        );
        assert!(config.export_resolved.strict);
        assert_eq!(
            config.export_resolved.render_failure,
            RenderFailureMode::Fail
        );
        assert_eq!(config.bundle_resolved.diagrams, BundleDiagramMode::Forbid);
        assert_eq!(
            config.diagrams_resolved.program.as_deref(),
            Some("/usr/local/bin/mmdc")
        );
        assert_eq!(
            config.diagrams_resolved.tools_dir,
            Some(PathBuf::from("/repo/tools"))
        );
        assert_eq!(config.diagrams_resolved.background, "white");
        assert_eq!(config.diagrams_resolved.inline_width, 800);
        assert_eq!(config.diagrams_resolved.bundle_width, 1200);
        assert_eq!(config.diagrams_resolved.padding, 12);
        assert_eq!(config.diagrams_resolved.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_unknown_failure_mode_is_parse_error() {
        let toml = "[export]\nrender_failure = \"ignore\"\n";
        let result = Config::from_toml_str(toml, Path::new("/repo"));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let toml = "[publish]\nbase_url = \"ftp://example.com\"\n";
        let err = Config::from_toml_str(toml, Path::new("/repo")).unwrap_err();
        assert!(err.to_string().contains("publish.base_url"));
    }

    #[test]
    fn test_validate_zero_width() {
        let toml = "[diagrams]\ninline_width = 0\n";
        let err = Config::from_toml_str(toml, Path::new("/repo")).unwrap_err();
        assert!(err.to_string().contains("diagrams.inline_width"));
    }

    #[test]
    fn test_validate_timeout_upper_bound() {
        let toml = "[diagrams]\ntimeout_secs = 7200\n";
        let err = Config::from_toml_str(toml, Path::new("/repo")).unwrap_err();
        assert!(err.to_string().contains("cannot exceed 3600"));
    }

    #[test]
    fn test_validate_empty_section() {
        let toml = "[publish]\nsection = \"  \"\n";
        let err = Config::from_toml_str(toml, Path::new("/repo")).unwrap_err();
        assert!(err.to_string().contains("publish.section cannot be empty"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/blog"));

        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/posts")),
            export_dir: Some(PathBuf::from("/tmp/medium")),
            base_url: Some("https://override.example.com".to_owned()),
            strict: Some(true),
            renderer_program: Some("mmdc".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/elsewhere/posts")
        );
        assert_eq!(
            config.export_resolved.output_dir,
            PathBuf::from("/tmp/medium")
        );
        // Unchanged
        assert_eq!(
            config.bundle_resolved.output_dir,
            PathBuf::from("/blog/dist/bundles")
        );
        assert_eq!(
            config.publish.base_url.as_deref(),
            Some("https://override.example.com")
        );
        assert!(config.export_resolved.strict);
        assert_eq!(config.diagrams_resolved.program.as_deref(), Some("mmdc"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.publish.base_url, None);
        assert!(config.diagrams_resolved.program.is_none());
    }

    #[test]
    fn test_apply_cli_settings_relative_paths_become_absolute() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("posts")),
            bundle_dir: Some(PathBuf::from(".")),
            ..Default::default()
        });

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.content_resolved.source_dir, cwd.join("posts"));
        assert!(config.bundle_resolved.output_dir.is_absolute());
        assert!(config.bundle_resolved.output_dir.starts_with(&cwd));
    }

    #[test]
    fn test_require_base_url() {
        let config = Config::default_with_base(Path::new("/blog"));
        let err = config.require_base_url().unwrap_err();
        assert!(err.to_string().contains("publish.base_url is required"));

        let toml = "[publish]\nbase_url = \"https://blog.example.com\"\n";
        let config = Config::from_toml_str(toml, Path::new("/repo")).unwrap();
        assert_eq!(config.require_base_url().unwrap(), "https://blog.example.com");
    }

    #[test]
    fn test_diagram_defaults_match_renderer_defaults() {
        let defaults = DiagramsConfig::default();
        assert_eq!(defaults.cli_version, DEFAULT_CLI_VERSION);
        assert_eq!(defaults.inline_width, DEFAULT_INLINE_WIDTH);
        assert_eq!(defaults.bundle_width, DEFAULT_LINK_WIDTH);
        assert_eq!(defaults.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_expand_env_vars_in_base_url() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_BASE_HOST", "posts.example.org");
        }

        let toml = "[publish]\nbase_url = \"https://${FOLIO_TEST_BASE_HOST}\"\n";
        let config = Config::from_toml_str(toml, Path::new("/repo")).unwrap();

        unsafe {
            std::env::remove_var("FOLIO_TEST_BASE_HOST");
        }

        assert_eq!(
            config.publish.base_url.as_deref(),
            Some("https://posts.example.org")
        );
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FOLIO_TEST_NO_SUCH_DIR");
        }

        let toml = "[bundle]\noutput_dir = \"${FOLIO_TEST_NO_SUCH_DIR}\"\n";
        let err = Config::from_toml_str(toml, Path::new("/repo")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "bundle.output_dir"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/definitely/not/here/folio.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[publish]\nbase_url = \"https://a.example\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.content_resolved.repo_root, dir.path());
    }
}
