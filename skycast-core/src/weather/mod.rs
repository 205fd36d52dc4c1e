//! Weather snapshots, unit systems and the per-surface fetch state machine.

mod client;
mod surface;
mod wire;

pub use client::{WeatherClient, WeatherRequest};
pub use surface::{
    forecast_pages, Phase, RequestId, Surface, SurfaceState, FORECAST_STEPS_PER_PAGE,
};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system requested from the provider. Persisted as a user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnits {
    #[default]
    Standard,
    Metric,
    Imperial,
}

impl MeasureUnits {
    pub const ALL: [MeasureUnits; 3] = [Self::Standard, Self::Metric, Self::Imperial];

    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            MeasureUnits::Standard => "standard",
            MeasureUnits::Metric => "metric",
            MeasureUnits::Imperial => "imperial",
        }
    }

    pub fn temperature_unit(self) -> &'static str {
        match self {
            MeasureUnits::Standard => "K",
            MeasureUnits::Metric => "°C",
            MeasureUnits::Imperial => "°F",
        }
    }

    pub fn wind_unit(self) -> &'static str {
        match self {
            MeasureUnits::Imperial => "mi/hr",
            MeasureUnits::Standard | MeasureUnits::Metric => "m/sec",
        }
    }

    /// Next unit system in display order, wrapping.
    pub fn next(self) -> Self {
        match self {
            MeasureUnits::Standard => MeasureUnits::Metric,
            MeasureUnits::Metric => MeasureUnits::Imperial,
            MeasureUnits::Imperial => MeasureUnits::Standard,
        }
    }
}

impl fmt::Display for MeasureUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(MeasureUnits::Standard),
            "metric" => Ok(MeasureUnits::Metric),
            "imperial" => Ok(MeasureUnits::Imperial),
            other => Err(format!(
                "unknown unit system {other:?} (expected standard, metric or imperial)"
            )),
        }
    }
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a bearing in degrees onto one of 16 compass points.
///
/// Sectors are 22.5° wide, centred on each point, closed at the upper edge:
/// `(348.75, 11.25] -> N`, `(11.25, 33.75] -> NNE` and so on.
pub fn compass_point(degrees: f64) -> &'static str {
    let d = degrees.rem_euclid(360.0);
    if d <= 11.25 {
        return COMPASS_POINTS[0];
    }
    let index = ((d - 11.25) / 22.5).ceil() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Convert a `0.0..=1.0` probability into a whole percentage, rounding up.
///
/// The fraction is snapped to six decimal places first so float noise such
/// as `0.07 * 100.0 == 7.000000000000001` does not bump the result.
pub fn precip_percent(fraction: f64) -> u8 {
    let scaled = (fraction * 100.0 * 1e6).round() / 1e6;
    scaled.ceil().clamp(0.0, 100.0) as u8
}

/// Icon image URL for a provider icon code.
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}

/// Sky condition as reported, plus an icon URL and precipitation chance.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub icon_ref: String,
    /// Whole percent, forecast steps only.
    pub chance_of_precip: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Temperature {
    pub unit: &'static str,
    pub air: f64,
    pub feels_like: f64,
    pub min: f64,
    pub max: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// Wind speed in the request's units and direction both ways.
#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    pub unit: &'static str,
    pub speed: f64,
    pub gust: Option<f64>,
    pub direction_degrees: f64,
    pub direction_compass: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Misc {
    /// Metres.
    pub visibility: f64,
    /// Percent.
    pub cloud_cover: f64,
    pub timestamp: DateTime<Utc>,
}

/// Normalised weather at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub condition: Condition,
    pub temperature: Temperature,
    pub wind: Wind,
    pub misc: Misc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_labels() {
        assert_eq!(MeasureUnits::Imperial.temperature_unit(), "°F");
        assert_eq!(MeasureUnits::Imperial.wind_unit(), "mi/hr");
        assert_eq!(MeasureUnits::Metric.temperature_unit(), "°C");
        assert_eq!(MeasureUnits::Metric.wind_unit(), "m/sec");
        assert_eq!(MeasureUnits::Standard.temperature_unit(), "K");
        assert_eq!(MeasureUnits::Standard.wind_unit(), "m/sec");
    }

    #[test]
    fn test_units_cycle_and_parse() {
        let mut units = MeasureUnits::default();
        for expected in [MeasureUnits::Metric, MeasureUnits::Imperial, MeasureUnits::Standard] {
            units = units.next();
            assert_eq!(units, expected);
        }
        assert_eq!("Imperial".parse::<MeasureUnits>(), Ok(MeasureUnits::Imperial));
        assert!("kelvin".parse::<MeasureUnits>().is_err());
        assert_eq!(serde_json::to_string(&MeasureUnits::Metric).unwrap(), "\"metric\"");
    }

    #[test]
    fn test_compass_points() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(45.0), "NE");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(180.0), "S");
        assert_eq!(compass_point(360.0), "N");
        assert_eq!(compass_point(11.25), "N");
        assert_eq!(compass_point(11.26), "NNE");
        assert_eq!(compass_point(348.75), "NNW");
        assert_eq!(compass_point(348.76), "N");
        assert_eq!(compass_point(270.0), "W");
        assert_eq!(compass_point(-90.0), "W");
    }

    #[test]
    fn test_precip_percent_rounds_up() {
        assert_eq!(precip_percent(0.42), 42);
        assert_eq!(precip_percent(0.421), 43);
        assert_eq!(precip_percent(0.07), 7);
        assert_eq!(precip_percent(0.0), 0);
        assert_eq!(precip_percent(1.0), 100);
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(icon_url("10d"), "https://openweathermap.org/img/wn/10d@2x.png");
    }
}
