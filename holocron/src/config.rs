//! Configuration types for the catalogue client and search controller.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ConfigError;

/// Configuration for talking to the character catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Locator of page one of the "list all" listing.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Rewrite `http://` next links to `https://` before following them.
    #[serde(default = "default_true")]
    pub upgrade_insecure_links: bool,
    /// Optional ceiling on pages per fetch. Unbounded when `None`.
    #[serde(default)]
    pub max_pages: Option<usize>,
}

fn default_base_url() -> String {
    "https://swapi.dev/api/people/".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    concat!("holocron/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            upgrade_insecure_links: true,
            max_pages: None,
        }
    }
}

impl CatalogConfig {
    /// Creates a new catalogue configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Caps the number of pages followed per fetch.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Follows next links exactly as the server reports them.
    #[must_use]
    pub fn without_link_upgrade(mut self) -> Self {
        self.upgrade_insecure_links = false;
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Falls back to the default when the configured value is not
    /// representable; [`validate`](Self::validate) rejects such values.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f64(default_timeout()))
    }

    /// Checks the base URL and timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid_base_url(&self.base_url, e.to_string()))?;
        let representable = Duration::try_from_secs_f64(self.timeout_seconds).is_ok();
        if !(representable && self.timeout_seconds > 0.0) {
            return Err(ConfigError::InvalidTimeout(self.timeout_seconds.to_string()));
        }
        Ok(())
    }
}

/// Configuration for the search controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    400
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    /// Creates a new search configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debounce interval.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Gets the debounce interval as Duration.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Configuration for log output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Sets the fallback level.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Switches to JSON output.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HolocronConfig {
    /// Catalogue client configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Search controller configuration.
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HolocronConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the catalogue section.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the search section.
    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        if self.search.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        Ok(())
    }
}
