//! TOML configuration for trackdb query limits.
//!
//! ```toml
//! [query]
//! max_page_size = 100
//! default_page_size = 25
//! ```

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;
use trackdb_core::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE, db::query::QueryLimits};

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub query: QueryConfig,
}

impl Config {
    /// Parse and validate a TOML document. Missing sections and keys take
    /// their defaults; unknown keys are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.query.validate()
    }
}

///
/// QueryConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub max_page_size: u32,
    pub default_page_size: u32,
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size < 1 {
            return Err(ConfigError::Invalid(
                "query.max_page_size must be at least 1".to_string(),
            ));
        }
        if self.default_page_size < 1 {
            return Err(ConfigError::Invalid(
                "query.default_page_size must be at least 1".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "query.default_page_size ({}) exceeds query.max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }

        Ok(())
    }

    #[must_use]
    pub const fn limits(&self) -> QueryLimits {
        QueryLimits::new(self.max_page_size, self.default_page_size)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<QueryConfig> for QueryLimits {
    fn from(config: QueryConfig) -> Self {
        config.limits()
    }
}
