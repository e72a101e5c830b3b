//! Weather dashboard
//!
//! Resolves a location, polls Open-Meteo for current conditions and a
//! multi-day forecast, and renders the result to the terminal or serves it
//! over a small JSON API.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocode;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::DashboardConfig;
pub use dashboard::container::{ErrorReporter, TracingReporter, WeatherContainer};
pub use dashboard::render::{render_compact, render_text};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use error::DashboardError;
pub use geocode::{GeocodingClient, GeocodingResult, LocationInput};
pub use models::{AddressContext, LatLong, TemperatureUnit, WeatherForecast};
pub use weather::open_meteo::OpenMeteoClient;
pub use weather::{WeatherBundle, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
