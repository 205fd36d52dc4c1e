//! Location resolver client
//!
//! Translates coordinates, postal codes and city names into canonical
//! [`ResolvedLocation`] records through the `/location/*` routes.

use serde::Deserialize;

use super::{LocationQuery, ResolvedLocation, DEFAULT_COUNTRY};
use crate::api::ApiClient;
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct LocationsEnvelope {
    #[serde(default)]
    locations: Vec<ResolvedLocation>,
}

#[derive(Debug, Deserialize)]
struct LocationEnvelope {
    location: ResolvedLocation,
}

/// Stateless resolver over the location routes.
#[derive(Debug, Clone)]
pub struct ResolverClient {
    api: ApiClient,
}

impl ResolverClient {
    /// Create a new resolver on top of `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Reverse geocode a coordinate. May yield several candidates.
    pub async fn resolve_by_coordinate(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<ResolvedLocation>, FetchError> {
        let query = [("lat", lat.to_string()), ("lon", lon.to_string())];
        let envelope: LocationsEnvelope = self.api.get("/location/coordinates", &query).await?;
        Ok(envelope.locations)
    }

    /// Look up a postal code. `country` defaults to `"US"`.
    pub async fn resolve_by_zip(
        &self,
        zip: &str,
        country: Option<&str>,
    ) -> Result<ResolvedLocation, FetchError> {
        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COUNTRY);
        let query = [("zip", zip.trim().to_string()), ("country", country.to_string())];
        let envelope: LocationEnvelope = self.api.get("/location/zip", &query).await?;
        Ok(envelope.location)
    }

    /// Look up a city, optionally narrowed by state. May yield several candidates.
    pub async fn resolve_by_city(
        &self,
        city: &str,
        state: Option<&str>,
        country: &str,
    ) -> Result<Vec<ResolvedLocation>, FetchError> {
        let mut query = vec![("city", city.trim().to_string())];
        if let Some(state) = state.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("state", state.to_string()));
        }
        query.push(("country", country.trim().to_string()));

        let envelope: LocationsEnvelope = self.api.get("/location/city", &query).await?;
        Ok(envelope.locations)
    }

    /// Validate and resolve a query down to a single place.
    ///
    /// Ambiguous answers keep only the first candidate; an empty answer is
    /// [`FetchError::NoMatch`].
    pub async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation, FetchError> {
        query.validate()?;

        let candidates = match query {
            LocationQuery::Coordinates { lat, lon } => {
                self.resolve_by_coordinate(*lat, *lon).await?
            }
            LocationQuery::Zip { zip, country } => {
                return self.resolve_by_zip(zip, country.as_deref()).await;
            }
            LocationQuery::City {
                city,
                state,
                country,
            } => self.resolve_by_city(city, state.as_deref(), country).await?,
        };

        if candidates.len() > 1 {
            tracing::debug!(count = candidates.len(), "ambiguous resolution, using first");
        }
        candidates.into_iter().next().ok_or(FetchError::NoMatch)
    }
}
