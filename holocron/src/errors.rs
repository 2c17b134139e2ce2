//! Error types for holocron.
//!
//! Fetch failures of every flavour collapse into [`NetworkError`]; the kind is
//! kept for logs and events, but the presentation layer only ever sees
//! [`USER_FACING_FETCH_ERROR`].

use std::collections::HashMap;
use thiserror::Error;

/// The message shown to users when any fetch fails.
pub const USER_FACING_FETCH_ERROR: &str = "Could not load characters. Please try again.";

/// The main error type for holocron operations.
#[derive(Debug, Error)]
pub enum HolocronError {
    /// A page request failed.
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// Configuration was rejected.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Filter input could not be parsed.
    #[error("{0}")]
    Filter(#[from] FilterError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HolocronError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience alias for results carrying a [`HolocronError`].
pub type Result<T> = std::result::Result<T, HolocronError>;

/// The category of a failed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// The request did not finish in time.
    Timeout,
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not a valid catalogue page.
    Decode,
    /// Connection, DNS, TLS or any other transport failure.
    Transport,
}

impl NetworkErrorKind {
    /// Short machine-readable name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Status(_) => "status",
            Self::Decode => "decode",
            Self::Transport => "transport",
        }
    }
}

/// Error raised when fetching a page of results fails.
///
/// Aborts the whole multi-page fetch; pages gathered before the failure are
/// dropped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Request to '{locator}' failed ({}): {message}", .kind.as_str())]
pub struct NetworkError {
    /// What went wrong.
    pub kind: NetworkErrorKind,
    /// The locator being requested.
    pub locator: String,
    /// Diagnostic detail from the transport.
    pub message: String,
}

impl NetworkError {
    /// Creates a new network error.
    #[must_use]
    pub fn new(
        kind: NetworkErrorKind,
        locator: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            locator: locator.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(locator: impl Into<String>) -> Self {
        Self::new(NetworkErrorKind::Timeout, locator, "request timed out")
    }

    /// Creates a non-success status error.
    #[must_use]
    pub fn status(locator: impl Into<String>, status: u16) -> Self {
        Self::new(
            NetworkErrorKind::Status(status),
            locator,
            format!("unexpected HTTP status {status}"),
        )
    }

    /// Creates a malformed body error.
    #[must_use]
    pub fn decode(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NetworkErrorKind::Decode, locator, message)
    }

    /// Creates a generic transport error.
    #[must_use]
    pub fn transport(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NetworkErrorKind::Transport, locator, message)
    }

    /// The single message shown to users, whatever the kind.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FETCH_ERROR
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), serde_json::json!(self.kind.as_str()));
        if let NetworkErrorKind::Status(code) = self.kind {
            map.insert("status".to_string(), serde_json::json!(code));
        }
        map.insert("locator".to_string(), serde_json::json!(self.locator));
        map.insert("message".to_string(), serde_json::json!(self.message));
        map
    }
}

/// Errors raised while validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The catalogue base URL does not parse.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The debounce interval must be positive.
    #[error("Debounce interval must be greater than zero")]
    ZeroDebounce,

    /// The request timeout must be positive.
    #[error("Request timeout must be greater than zero, got {0}")]
    InvalidTimeout(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    /// Creates an invalid base URL error.
    #[must_use]
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Error raised when a range bound typed by the user is not a number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {field} bound: '{input}' is not a number")]
pub struct FilterError {
    /// Which bound (e.g. "min mass").
    pub field: String,
    /// The raw input.
    pub input: String,
}

impl FilterError {
    /// Creates a new filter error.
    #[must_use]
    pub fn new(field: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            input: input.into(),
        }
    }
}
