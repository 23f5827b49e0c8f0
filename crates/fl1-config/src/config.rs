// crates/fl1-config/src/config.rs
// ============================================================================
// Module: Site Configuration
// Description: Configuration loading and validation for the FL1 site.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: fl1-i18n, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; an empty file yields a working local setup that
//! serves the catalogs in `messages/` on `127.0.0.1:3000`.
//!
//! Localized pathnames are written as `[i18n.pathnames.<route>]` tables keyed
//! by locale and are only accepted when they form a collision-free
//! [`RouteTable`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use fl1_i18n::Locale;
use fl1_i18n::RouteKey;
use fl1_i18n::RouteTable;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "fl1-site.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "FL1_SITE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default bind address for the HTTP listener.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
/// Upper bound accepted for `server.max_body_bytes`.
pub(crate) const MAX_BODY_BYTES_LIMIT: usize = 1024 * 1024;
/// Maximum number of localized pathname overrides.
pub(crate) const MAX_PATHNAME_OVERRIDES: usize = 64;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// FL1 site configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Catalog and routing configuration.
    #[serde(default)]
    pub i18n: I18nConfig,
    /// Structured audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl SiteConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| {
            ConfigError::Io(format!("{}: {err}", resolved.display()))
        })?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Like [`SiteConfig::load`], but an absent implicit `fl1-site.toml` yields
    /// the defaults. Explicit paths and `FL1_SITE_CONFIG` must still exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if path.is_none() && env::var_os(CONFIG_ENV_VAR).is_none() {
            let implicit = Path::new(DEFAULT_CONFIG_NAME);
            if !implicit.exists() {
                return Ok(Self::default());
            }
        }
        Self::load(path)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.i18n.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address (`host:port`); defaults to [`DEFAULT_BIND`].
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Attach the static security headers to every response.
    #[serde(default = "default_true")]
    pub security_headers: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: None,
            max_body_bytes: default_max_body_bytes(),
            security_headers: default_true(),
        }
    }
}

impl ServerConfig {
    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let bind = self.bind.as_deref().map_or(DEFAULT_BIND, str::trim);
        if bind.is_empty() {
            return Err(ConfigError::Invalid("server.bind must be non-empty".to_string()));
        }
        bind.parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid server.bind address: {bind}")))
    }

    /// Validates listener configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_BODY_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be at most {MAX_BODY_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: I18n
// ============================================================================

/// Catalog location, locale detection and localized pathnames.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct I18nConfig {
    /// Directory holding `{locale}.json` catalogs.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,
    /// Negotiate the redirect locale from `Accept-Language` for unprefixed paths.
    #[serde(default)]
    pub locale_detection: bool,
    /// Localized pathnames: route key, then locale, then pathname.
    #[serde(default)]
    pub pathnames: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            locale_detection: false,
            pathnames: BTreeMap::new(),
        }
    }
}

impl I18nConfig {
    /// Returns the catalog directory as a path.
    #[must_use]
    pub fn catalog_dir(&self) -> &Path {
        Path::new(self.catalog_dir.trim())
    }

    /// Builds the route table from the configured pathname overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a route or locale is unknown or
    /// the overrides do not form a valid table.
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        let mut overrides: Vec<(RouteKey, Locale, String)> = Vec::new();
        for (route, by_locale) in &self.pathnames {
            let route_key: RouteKey = route
                .parse()
                .map_err(|err| ConfigError::Invalid(format!("i18n.pathnames: {err}")))?;
            for (locale, pathname) in by_locale {
                let locale: Locale = locale.parse().map_err(|err| {
                    ConfigError::Invalid(format!("i18n.pathnames.{route}: {err}"))
                })?;
                overrides.push((route_key, locale, pathname.clone()));
            }
        }
        RouteTable::with_overrides(overrides)
            .map_err(|err| ConfigError::Invalid(format!("i18n.pathnames: {err}")))
    }

    /// Validates catalog and routing configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("i18n.catalog_dir", &self.catalog_dir)?;
        let count: usize = self.pathnames.values().map(BTreeMap::len).sum();
        if count > MAX_PATHNAME_OVERRIDES {
            return Err(ConfigError::Invalid(format!(
                "i18n.pathnames exceeds {MAX_PATHNAME_OVERRIDES} entries"
            )));
        }
        self.route_table()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Structured audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Enable structured audit logging.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when absent.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Default maximum request body size (contact form posts are small).
const fn default_max_body_bytes() -> usize {
    16 * 1024
}

/// Default catalog directory.
fn default_catalog_dir() -> String {
    "messages".to_string()
}

/// Serde default for flags that are on unless disabled.
const fn default_true() -> bool {
    true
}
