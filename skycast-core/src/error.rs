//! Error types for network-facing operations, storage and configuration.

use thiserror::Error;

/// Message shown when a weather fetch is attempted without a selected location.
pub const NO_LOCATION: &str = "No location specified.";

/// Generic message for failures whose cause is only logged.
pub const GENERIC_FAILURE: &str = "Something went wrong. Try again later.";

/// Failure of a resolution or weather fetch.
///
/// Every network-facing operation resolves to one of these at its own
/// boundary; callers turn it into a [`Status`](crate::Status) update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Missing or invalid parameters. No request was made.
    #[error("{0}")]
    Input(String),

    /// Non-2xx response. Status and message are forwarded as received.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request could not complete or the body could not be read.
    #[error("Something went wrong. Try again later.")]
    Network,

    /// The resolver answered but had no candidate for the query.
    #[error("No matching location found.")]
    NoMatch,

    /// A newer request for the same surface superseded this one.
    #[error("Request cancelled.")]
    Cancelled,
}

impl FetchError {
    /// Create an input error with the given message.
    pub fn input(message: impl Into<String>) -> Self {
        FetchError::Input(message.into())
    }

    /// Create an upstream error in the `"<status>: <reason>"` form.
    pub fn upstream(status: reqwest::StatusCode) -> Self {
        FetchError::Upstream {
            status: status.as_u16(),
            message: format!(
                "{}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            ),
        }
    }

    /// HTTP status that caused this error, when known.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the operation was superseded rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

/// Failure reading or writing client-local storage.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Invalid runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidApiBase { url: String, reason: String },

    #[error("{name} interval must be greater than zero")]
    ZeroInterval { name: &'static str },
}
