//! Weather data retrieval
//!
//! The dashboard depends only on [`WeatherSource`]; [`open_meteo::OpenMeteoClient`]
//! is the production implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::models::{AddressContext, CurrentWeather, LatLong, WeatherForecast};

pub mod icon;
pub mod open_meteo;
pub mod time;

/// Everything one fetch delivers. Alerts travel inside the forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub current: Option<CurrentWeather>,
    pub forecast: WeatherForecast,
}

impl WeatherBundle {
    /// A bundle is usable when it carries current conditions and at least one day
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current.is_some() && !self.forecast.is_empty()
    }
}

/// Source of current conditions and forecast for an address
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, address: &AddressContext) -> Result<WeatherBundle>;
}

/// Sunrise and sunset computed from coordinates, for providers that omit them
pub fn solar_times(latlong: LatLong, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let coordinates = Coordinates::new(latlong.latitude, latlong.longitude).with_context(|| {
        format!(
            "Invalid coordinates: lat={}, lng={}",
            latlong.latitude, latlong.longitude
        )
    })?;

    let solar_day = SolarDay::new(coordinates, date);

    // polar day/night has no event; fall back to a nominal 06:00/19:00 UTC
    let sunrise = solar_day
        .event_time(SolarEvent::Sunrise)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(6));
    let sunset = solar_day
        .event_time(SolarEvent::Sunset)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(19));

    Ok((sunrise, sunset))
}
