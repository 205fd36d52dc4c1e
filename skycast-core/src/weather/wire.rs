//! Provider-native weather records as forwarded by the `/weather/*` routes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    compass_point, icon_url, precip_percent, Condition, MeasureUnits, Misc, Temperature,
    WeatherSnapshot, Wind,
};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub weather: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderRecord {
    weather: Vec<ProviderCondition>,
    main: ProviderMain,
    wind: ProviderWind,
    #[serde(default)]
    clouds: ProviderClouds,
    #[serde(default)]
    visibility: f64,
    dt: i64,
    /// Probability of precipitation, forecast steps only.
    #[serde(default)]
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderWind {
    speed: f64,
    #[serde(default)]
    gust: Option<f64>,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderClouds {
    #[serde(default)]
    all: f64,
}

impl ProviderRecord {
    /// Normalise into a [`WeatherSnapshot`] labelled for `units`.
    pub(crate) fn normalize(self, units: MeasureUnits) -> Result<WeatherSnapshot, FetchError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            tracing::warn!("weather record without a condition entry");
            FetchError::Network
        })?;
        let timestamp: DateTime<Utc> = DateTime::from_timestamp(self.dt, 0).ok_or_else(|| {
            tracing::warn!(dt = self.dt, "weather record with invalid timestamp");
            FetchError::Network
        })?;

        Ok(WeatherSnapshot {
            condition: Condition {
                id: condition.id,
                name: condition.main,
                description: condition.description,
                icon_ref: icon_url(&condition.icon),
                chance_of_precip: self.pop.map(precip_percent),
            },
            temperature: Temperature {
                unit: units.temperature_unit(),
                air: self.main.temp,
                feels_like: self.main.feels_like,
                min: self.main.temp_min,
                max: self.main.temp_max,
                humidity: self.main.humidity,
                pressure: self.main.pressure,
            },
            wind: Wind {
                unit: units.wind_unit(),
                speed: self.wind.speed,
                gust: self.wind.gust,
                direction_degrees: self.wind.deg,
                direction_compass: compass_point(self.wind.deg),
            },
            misc: Misc {
                visibility: self.visibility,
                cloud_cover: self.clouds.all,
                timestamp,
            },
        })
    }
}
