//! Configuration management for pagesync.
//!
//! Parses `pagesync.toml` configuration files with serde and provides
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
//! - `confluence.base_uri`
//! - `confluence.username`
//! - `confluence.password`
//! - `confluence.default_space_key`
//! - `markup.rst_command`
//!
//! Values that are empty after expansion are treated as not configured, so
//! `password = "${CONFLUENCE_PASSWORD:-}"` falls back to an interactive prompt.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the wiki API root.
    pub base_uri: Option<String>,
    /// Override the username.
    pub username: Option<String>,
    /// Override the default space key.
    pub default_space_key: Option<String>,
    /// Override pretty printing of fetched pages.
    pub pretty_print: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pagesync.toml";

/// Default docutils front end used for reStructuredText.
const DEFAULT_RST_COMMAND: &str = "rst2html";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wiki connection and credential settings.
    pub confluence: ConfluenceConfig,
    /// Markup conversion settings.
    pub markup: MarkupConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Wiki connection configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Wiki REST API root, e.g. `https://wiki.example.com/rest/api`.
    pub base_uri: Option<String>,
    /// Username; prompted for when absent.
    pub username: Option<String>,
    /// Password; prompted for when absent.
    pub password: Option<String>,
    /// Space searched by `get` when no space is given.
    pub default_space_key: Option<String>,
    /// Verify the server's TLS certificate.
    pub verify_tls: bool,
}

impl ConfluenceConfig {
    /// Get the API root, failing if it is not configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `base_uri` is missing.
    pub fn require_base_uri(&self) -> Result<&str, ConfigError> {
        self.base_uri.as_deref().ok_or_else(|| {
            ConfigError::Validation("confluence.base_uri is required".to_owned())
        })
    }
}

/// Markup conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Program converting reStructuredText on stdin to HTML on stdout.
    pub rst_command: String,
    /// Re-indent storage HTML of fetched pages.
    pub pretty_print: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            rst_command: DEFAULT_RST_COMMAND.to_owned(),
            pretty_print: true,
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
        /// Config field path (e.g., "`confluence.password`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_PASSWORD`} not set").
        message: String,
    },
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

/// Treat empty and whitespace-only values as unset.
fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pagesync.toml` in current directory and parents,
    /// falling back to defaults when none is found.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_uri) = &settings.base_uri {
            self.confluence.base_uri = Some(base_uri.clone());
        }
        if let Some(username) = &settings.username {
            self.confluence.username = Some(username.clone());
        }
        if let Some(space) = &settings.default_space_key {
            self.confluence.default_space_key = Some(space.clone());
        }
        if let Some(pretty_print) = settings.pretty_print {
            self.markup.pretty_print = pretty_print;
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Drop blank optional values and trailing slashes on the API root.
    fn normalize(&mut self) {
        let confluence = &mut self.confluence;
        blank_to_none(&mut confluence.base_uri);
        blank_to_none(&mut confluence.username);
        blank_to_none(&mut confluence.password);
        blank_to_none(&mut confluence.default_space_key);
        if let Some(uri) = confluence.base_uri.as_mut() {
            let trimmed = uri.trim().trim_end_matches('/').to_owned();
            *uri = trimmed;
        }
    }

    /// Validate configuration values.
    ///
    /// `base_uri` may be absent (commands report it), but when present it
    /// must be an http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(uri) = &self.confluence.base_uri {
            require_http_url(uri, "confluence.base_uri")?;
        }
        require_non_empty(&self.markup.rst_command, "markup.rst_command")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let confluence = &mut self.confluence;
        expand::expand_opt(&mut confluence.base_uri, "confluence.base_uri")?;
        expand::expand_opt(&mut confluence.username, "confluence.username")?;
        expand::expand_opt(&mut confluence.password, "confluence.password")?;
        expand::expand_opt(
            &mut confluence.default_space_key,
            "confluence.default_space_key",
        )?;
        self.markup.rst_command =
            expand::expand_env(&self.markup.rst_command, "markup.rst_command")?;
        Ok(())
    }
}
