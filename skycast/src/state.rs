//! Application state - single source of truth
//!
//! Components read `&AppState` through their props; only the reducer
//! mutates it.

use std::fmt;

use skycast_core::{
    Carousel, LocationQuery, LocationStore, MeasureUnits, PersistedState, Status, Surface,
    SurfaceState, WeatherRequest, WeatherSnapshot,
};

/// Spinner frame period.
pub const SPINNER_TICK_MS: u64 = 120;

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub locations: LocationStore,
    pub units: MeasureUnits,
    /// Resolution and storage progress.
    pub location_status: Status,
    pub current: SurfaceState<WeatherSnapshot>,
    pub extended: SurfaceState<Vec<WeatherSnapshot>>,
    pub current_carousel: Carousel,
    pub extended_carousel: Carousel,
    /// Add-location overlay, when open.
    pub editor: Option<LocationEditor>,
    /// Highlighted row of the location list overlay, when open.
    pub picker: Option<usize>,
    pub spinner_frame: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LocationStore::new(), MeasureUnits::default())
    }
}

impl AppState {
    /// Create a new state over saved locations, with both surfaces empty.
    pub fn new(locations: LocationStore, units: MeasureUnits) -> Self {
        Self {
            locations,
            units,
            location_status: Status::new(),
            current: SurfaceState::new(Surface::Current),
            extended: SurfaceState::new(Surface::Extended),
            current_carousel: Carousel::for_surface(Surface::Current),
            extended_carousel: Carousel::for_surface(Surface::Extended),
            editor: None,
            picker: None,
            spinner_frame: 0,
        }
    }

    /// Restore from saved state.
    pub fn restore(saved: &PersistedState) -> Self {
        Self::new(saved.location_store(), saved.units)
    }

    /// What the weather surfaces should currently show.
    pub fn weather_request(&self) -> WeatherRequest {
        WeatherRequest::new(self.locations.current_coord(), self.units)
    }

    /// Snapshot of what survives a restart.
    pub fn persisted(&self) -> PersistedState {
        PersistedState::capture(&self.locations, self.units)
    }

    /// Carousel driving `surface`.
    pub fn carousel(&self, surface: Surface) -> &Carousel {
        match surface {
            Surface::Current => &self.current_carousel,
            Surface::Extended => &self.extended_carousel,
        }
    }

    pub fn carousel_mut(&mut self, surface: Surface) -> &mut Carousel {
        match surface {
            Surface::Current => &mut self.current_carousel,
            Surface::Extended => &mut self.extended_carousel,
        }
    }

    /// Whether any operation is showing a loading status.
    pub fn is_busy(&self) -> bool {
        self.location_status.is_loading()
            || self.current.status().is_loading()
            || self.extended.status().is_loading()
    }
}

/// Input mode of the add-location editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Zip,
    City,
    Coordinates,
}

impl EditorMode {
    pub const ALL: [EditorMode; 3] = [EditorMode::Zip, EditorMode::City, EditorMode::Coordinates];

    pub fn next(self) -> Self {
        match self {
            EditorMode::Zip => EditorMode::City,
            EditorMode::City => EditorMode::Coordinates,
            EditorMode::Coordinates => EditorMode::Zip,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditorMode::Zip => "Zip code",
            EditorMode::City => "City",
            EditorMode::Coordinates => "Coordinates",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            EditorMode::Zip => "49503 or 49503,US",
            EditorMode::City => "Grand Rapids,MI,US or Paris,FR",
            EditorMode::Coordinates => "42.96,-85.67",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text entry for a new location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationEditor {
    pub mode: EditorMode,
    pub input: String,
    pub error: Option<String>,
}

impl LocationEditor {
    /// Create a new, empty editor in zip code mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the typed text into a query for the current mode.
    pub fn parse(&self) -> Result<LocationQuery, String> {
        let parts: Vec<&str> = self.input.split(',').map(str::trim).collect();

        match self.mode {
            EditorMode::Zip => match parts.as_slice() {
                [zip] if !zip.is_empty() => Ok(LocationQuery::Zip {
                    zip: zip.to_string(),
                    country: None,
                }),
                [zip, country] if !zip.is_empty() => Ok(LocationQuery::Zip {
                    zip: zip.to_string(),
                    country: (!country.is_empty()).then(|| country.to_string()),
                }),
                _ => Err("Please enter a zip code.".to_string()),
            },
            EditorMode::City => match parts.as_slice() {
                [city, country] => Ok(LocationQuery::City {
                    city: city.to_string(),
                    state: None,
                    country: country.to_string(),
                }),
                [city, state, country] => Ok(LocationQuery::City {
                    city: city.to_string(),
                    state: (!state.is_empty()).then(|| state.to_string()),
                    country: country.to_string(),
                }),
                _ => Err("Enter City,Country or City,State,Country.".to_string()),
            },
            EditorMode::Coordinates => match parts.as_slice() {
                [lat, lon] => match (lat.parse::<f64>(), lon.parse::<f64>()) {
                    (Ok(lat), Ok(lon)) => Ok(LocationQuery::Coordinates { lat, lon }),
                    _ => Err("Coordinates must be numbers, as lat,lon.".to_string()),
                },
                _ => Err("Enter coordinates as lat,lon.".to_string()),
            },
        }
    }
}
