//! Cancellable weather fetches over the `/weather/*` routes.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::wire::{Envelope, ProviderRecord};
use super::{MeasureUnits, WeatherSnapshot};
use crate::api::ApiClient;
use crate::error::{FetchError, NO_LOCATION};
use crate::location::Coordinate;

/// What to fetch: a target coordinate (if one is selected) and a unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    pub coord: Option<Coordinate>,
    pub units: MeasureUnits,
}

impl WeatherRequest {
    /// Create a new request. `coord` is `None` when no place is selected.
    pub fn new(coord: Option<Coordinate>, units: MeasureUnits) -> Self {
        Self { coord, units }
    }

    fn query(&self) -> Result<[(&'static str, String); 3], FetchError> {
        let coord = self.coord.ok_or_else(|| FetchError::input(NO_LOCATION))?;
        Ok([
            ("lat", coord.lat.to_string()),
            ("lon", coord.lon.to_string()),
            ("units", self.units.as_str().to_string()),
        ])
    }
}

/// Fetches current conditions and the 5-day forecast.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api: ApiClient,
}

impl WeatherClient {
    /// Create a new weather client on top of `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Current conditions for the requested place.
    ///
    /// Fails with `"No location specified."` before any request when no
    /// coordinate is set, and with [`FetchError::Cancelled`] as soon as
    /// `cancel` fires.
    pub async fn fetch_current(
        &self,
        request: &WeatherRequest,
        cancel: &CancellationToken,
    ) -> Result<WeatherSnapshot, FetchError> {
        let query = request.query()?;
        let envelope: Envelope<ProviderRecord> =
            cancellable(cancel, self.api.get("/weather/current", &query)).await?;
        envelope.weather.normalize(request.units)
    }

    /// Extended forecast in 3-hour steps, oldest first.
    pub async fn fetch_extended(
        &self,
        request: &WeatherRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<WeatherSnapshot>, FetchError> {
        let query = request.query()?;
        let envelope: Envelope<Vec<ProviderRecord>> =
            cancellable(cancel, self.api.get("/weather/extended", &query)).await?;
        envelope
            .weather
            .into_iter()
            .map(|record| record.normalize(request.units))
            .collect()
    }
}

async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, FetchError>>,
) -> Result<T, FetchError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_coordinate_fails_without_request() {
        // Unroutable base: any request attempt would surface as Network.
        let client = WeatherClient::new(ApiClient::new("http://127.0.0.1:9"));
        let request = WeatherRequest::new(None, MeasureUnits::Metric);

        let err = client
            .fetch_current(&request, &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Input(NO_LOCATION.to_string()));

        let err = client
            .fetch_extended(&request, &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), NO_LOCATION);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let client = WeatherClient::new(ApiClient::new("http://127.0.0.1:9"));
        let request = WeatherRequest::new(Some(Coordinate::new(1.0, 2.0)), MeasureUnits::Standard);
        let token = CancellationToken::new();
        token.cancel();

        let err = client.fetch_current(&request, &token).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
