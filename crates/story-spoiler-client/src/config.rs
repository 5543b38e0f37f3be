// crates/story-spoiler-client/src/config.rs
// ============================================================================
// Module: Suite Configuration
// Description: Configuration loading and validation for the lifecycle suite.
// Purpose: Resolve fixture defaults, an optional TOML file, and env overrides.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! The suite targets one fixed API with fixed fixture credentials. Those
//! fixtures are the defaults; a TOML file and `STORY_SPOILER_*` environment
//! variables may override them so the same suite can be pointed at a local
//! stub. Invalid values fail closed before any request is sent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base URL of the Story Spoiler API.
pub const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";
/// Fixture account username.
pub const DEFAULT_USERNAME: &str = "vania345";
/// Fixture account password.
pub const DEFAULT_PASSWORD: &str = "vania345";
/// Identifier that is syntactically valid but never issued by the API.
pub const DEFAULT_MISSING_STORY_ID: &str = "123456";
/// Request timeout in seconds, matching the blocking client default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment keys recognized by the suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// Optional TOML config path.
    ConfigPath,
    /// Base URL override.
    BaseUrl,
    /// Username override.
    Username,
    /// Password override.
    Password,
    /// Request timeout override in seconds (positive integer).
    TimeoutSeconds,
}

impl SuiteEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "STORY_SPOILER_CONFIG",
            Self::BaseUrl => "STORY_SPOILER_BASE_URL",
            Self::Username => "STORY_SPOILER_USERNAME",
            Self::Password => "STORY_SPOILER_PASSWORD",
            Self::TimeoutSeconds => "STORY_SPOILER_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
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
// SECTION: Config Types
// ============================================================================

/// Resolved suite configuration.
///
/// # Invariants
/// - `base_url` parses as an `http`/`https` URL without embedded credentials.
/// - `username`, `password` and `missing_story_id` are non-empty.
/// - `timeout` is greater than zero.
#[derive(Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Base URL of the story API.
    pub base_url: String,
    /// Account username used by the bootstrapper.
    pub username: String,
    /// Account password used by the bootstrapper.
    pub password: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Sentinel identifier used by the negative edit/delete steps.
    pub missing_story_id: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            missing_story_id: DEFAULT_MISSING_STORY_ID.to_string(),
        }
    }
}

impl fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("missing_story_id", &self.missing_story_id)
            .finish()
    }
}

/// On-disk TOML representation. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuiteConfigFile {
    /// Base URL override.
    base_url: Option<String>,
    /// Username override.
    username: Option<String>,
    /// Password override.
    password: Option<String>,
    /// Timeout override in seconds.
    timeout_secs: Option<u64>,
    /// Sentinel identifier override.
    missing_story_id: Option<String>,
}

impl SuiteConfig {
    /// Loads configuration: fixture defaults, then the TOML file (explicit
    /// path or `STORY_SPOILER_CONFIG`), then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(resolved) = resolve_path(path)? {
            let file = read_config_file(&resolved)?;
            config.apply_file(file);
        }
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document on top of the fixture defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: SuiteConfigFile =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let mut config = Self::default();
        config.apply_file(file);
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy targeting a different base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns a copy using different credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("username must not be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Invalid("password must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be greater than zero".to_string()));
        }
        if self.missing_story_id.trim().is_empty() {
            return Err(ConfigError::Invalid("missing_story_id must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parses and checks the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unparsable URLs, non-HTTP schemes
    /// or URLs carrying credentials.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("base_url is not a valid url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("base_url must use http:// or https://".to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(ConfigError::Invalid(
                "base_url must not embed credentials".to_string(),
            ));
        }
        if url.cannot_be_a_base() {
            return Err(ConfigError::Invalid("base_url cannot be a base url".to_string()));
        }
        Ok(url)
    }

    /// Applies file values over the current configuration.
    fn apply_file(&mut self, file: SuiteConfigFile) {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(username) = file.username {
            self.username = username;
        }
        if let Some(password) = file.password {
            self.password = password;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(missing_story_id) = file.missing_story_id {
            self.missing_story_id = missing_story_id;
        }
    }

    /// Applies environment overrides over the current configuration.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(base_url) = read_env_nonempty(SuiteEnv::BaseUrl.as_str())? {
            self.base_url = base_url;
        }
        if let Some(username) = read_env_nonempty(SuiteEnv::Username.as_str())? {
            self.username = username;
        }
        if let Some(password) = read_env_nonempty(SuiteEnv::Password.as_str())? {
            self.password = password;
        }
        if let Some(raw) = read_env_nonempty(SuiteEnv::TimeoutSeconds.as_str())? {
            self.timeout = parse_timeout_seconds(SuiteEnv::TimeoutSeconds.as_str(), &raw)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or `STORY_SPOILER_CONFIG`.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(read_env_nonempty(SuiteEnv::ConfigPath.as_str())?.map(PathBuf::from))
}

/// Reads a bounded UTF-8 TOML file.
fn read_config_file(path: &Path) -> Result<SuiteConfigFile, ConfigError> {
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
