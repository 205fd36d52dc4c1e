//! HTTP access to the dashboard API routes
//!
//! Both the resolver and the weather client go through [`ApiClient::get`],
//! which turns every outcome into `Result<T, FetchError>`:
//! - 2xx: body decoded into `T`
//! - non-2xx: `{ error }` body forwarded with the status, or `"<status>: <reason>"`
//! - transport or decode failure: [`FetchError::Network`], cause logged

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::FetchError;

/// Error body returned by every route on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin JSON client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:3000/api`).
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http, base }
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Issue `GET <base><path>?<query>` and decode the JSON body.
    pub async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "request failed");
                FetchError::Network
            })?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            let error = match serde_json::from_slice::<ErrorBody>(&bytes) {
                Ok(body) => FetchError::Upstream {
                    status: status.as_u16(),
                    message: body.error,
                },
                Err(_) => FetchError::upstream(status),
            };
            tracing::debug!(%url, status = status.as_u16(), %error, "upstream error");
            return Err(error);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "could not decode response");
            FetchError::Network
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.base(), "http://localhost:3000/api");
    }
}
