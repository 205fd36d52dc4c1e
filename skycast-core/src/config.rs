//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// API base used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// How often each surface rotates pages and refreshes data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub current_page: Duration,
    pub extended_page: Duration,
    pub refresh: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            current_page: Duration::from_secs(15),
            extended_page: Duration::from_secs(20),
            refresh: Duration::from_secs(5 * 60),
        }
    }
}

/// Runtime configuration, assembled from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the location/weather API, without trailing slash.
    pub api_base: String,
    /// Directory for saved state and the log file.
    pub data_dir: PathBuf,
    pub cadence: Cadence,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: default_data_dir(),
            cadence: Cadence::default(),
        }
    }
}

impl Config {
    /// Reject settings the dashboard cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiBase {
            url: self.api_base.clone(),
            reason,
        };

        let url = Url::parse(&self.api_base).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!(
                "scheme must be http or https, got {}",
                url.scheme()
            )));
        }
        if url.host().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        for (name, value) in [
            ("current page", self.cadence.current_page),
            ("extended page", self.cadence.extended_page),
            ("refresh", self.cadence.refresh),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroInterval { name });
            }
        }
        Ok(())
    }
}

/// `<local data dir>/skycast`, or `./.skycast` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("skycast"))
        .unwrap_or_else(|| PathBuf::from(".skycast"))
}
