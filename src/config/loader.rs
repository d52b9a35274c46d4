use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{AppConfig, Config};
use crate::store::DEFAULT_ENTRY_NAME;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

impl Config {
    /// Directory holding the panel's config and log files.
    ///
    /// Uses `~/.config/quolab-setup` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`; falls back to the current
    /// directory if that is unavailable.
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("quolab-setup")
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL is an absolute http(s) URL
    /// - Credentials are present (token, or username and password)
    /// - The request timeout is non-zero
    /// - The app section is consistent (see [`AppConfig::validate`])
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.server.base_url)
            .map_err(|e| invalid(format!("Invalid base_url '{}': {}", self.server.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.server.credentials().is_none() {
            return Err(invalid(
                "Either token or username and password must be configured",
            ));
        }

        if self.server.timeout_seconds == 0 {
            return Err(invalid("timeout_seconds must be greater than zero"));
        }

        self.app.validate()
    }
}

impl AppConfig {
    /// Checks:
    /// - Name and collection path are set
    /// - The default stanza is a usable entry name
    /// - Field names are unique and include the secret and disabled fields
    /// - Every validation pattern compiles
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(invalid("App name must not be empty"));
        }

        if self.path.trim_matches('/').is_empty() {
            return Err(invalid("Collection path must not be empty"));
        }

        if self.default_stanza.trim().is_empty() || self.default_stanza == DEFAULT_ENTRY_NAME {
            return Err(invalid(format!(
                "default_stanza must be a non-empty name other than '{}'",
                DEFAULT_ENTRY_NAME
            )));
        }

        if self.fields.is_empty() {
            return Err(invalid("At least one field must be configured"));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(invalid("Field names must not be empty"));
            }
            if field.name == "stanza" {
                return Err(invalid("'stanza' is reserved for the entry name"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("Duplicate field '{}'", field.name)));
            }
            if let Some(validation) = &field.validation {
                validation.compile().map_err(|e| {
                    invalid(format!(
                        "Field '{}' has an invalid pattern '{}': {}",
                        field.name,
                        validation.pattern(),
                        e
                    ))
                })?;
            }
        }

        for required in [&self.secret_field, &self.disabled_field] {
            if !seen.contains(required.as_str()) {
                return Err(invalid(format!(
                    "Field '{}' is not among the configured fields",
                    required
                )));
            }
        }

        Ok(())
    }
}
