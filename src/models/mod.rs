//! Data models for the weather dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Location: the shared address context and coordinates
//! - Weather: current conditions, intraday timeframes and alerts
//! - Forecast: days and the forecast collection
//! - Unit: temperature unit and conversion

pub mod forecast;
pub mod location;
pub mod unit;
pub mod weather;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export all public types for convenient access
pub use forecast::{Day, WeatherForecast};
pub use location::{Address, AddressContext, LatLong};
pub use unit::{TemperatureUnit, display_temperature, f_to_c};
pub use weather::{Alert, AlertSeverity, CurrentWeather, Timeframe};
