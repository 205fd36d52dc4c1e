//! Canonical place records and the ways a user can describe one.

mod resolver;
mod store;

pub use resolver::ResolverClient;
pub use store::{LocationStore, MergeOutcome};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Country used when a postal code lookup omits one.
pub const DEFAULT_COUNTRY: &str = "US";

/// A point on the globe. Immutable once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a new coordinate. Range checks happen at query validation.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Identity string used for tracking (`"lat,lon"`).
    pub fn id(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// A resolved place.
///
/// Identity is the exact `(lat, lon)` pair; name and country text never
/// participate in deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub state: String,
    pub country: String,
    pub coord: Coordinate,
}

impl ResolvedLocation {
    /// Create a new place record from resolver fields.
    pub fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        coord: Coordinate,
    ) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            country: country.into(),
            coord,
        }
    }

    /// Whether `other` refers to the same physical place.
    pub fn same_place(&self, other: &Coordinate) -> bool {
        self.coord.lat == other.lat && self.coord.lon == other.lon
    }

    /// `"name, state, country"`, or `"name, country"` without a state.
    pub fn display_name(&self) -> String {
        if self.state.is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}, {}", self.name, self.state, self.country)
        }
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A user supplied location descriptor awaiting resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates { lat: f64, lon: f64 },
    Zip { zip: String, country: Option<String> },
    City {
        city: String,
        state: Option<String>,
        country: String,
    },
}

impl LocationQuery {
    /// Status message shown while this query resolves.
    pub fn loading_message(&self) -> &'static str {
        match self {
            LocationQuery::Coordinates { .. } => "Resolving coordinates...",
            LocationQuery::Zip { .. } => "Resolving zip code...",
            LocationQuery::City { .. } => "Resolving city and state...",
        }
    }

    /// Reject queries that cannot succeed, before any request is made.
    pub fn validate(&self) -> Result<(), FetchError> {
        match self {
            LocationQuery::Coordinates { lat, lon } => {
                if !lat.is_finite() || !(-90.0..=90.0).contains(lat) {
                    return Err(FetchError::input("Latitude must be between -90 and 90."));
                }
                if !lon.is_finite() || !(-180.0..=180.0).contains(lon) {
                    return Err(FetchError::input("Longitude must be between -180 and 180."));
                }
                Ok(())
            }
            LocationQuery::Zip { zip, .. } if zip.trim().is_empty() => {
                Err(FetchError::input("Please enter a zip code."))
            }
            LocationQuery::City { city, .. } if city.trim().is_empty() => {
                Err(FetchError::input("Please enter a city name."))
            }
            LocationQuery::City { country, .. } if country.trim().is_empty() => {
                Err(FetchError::input("Please enter a country code."))
            }
            _ => Ok(()),
        }
    }
}
