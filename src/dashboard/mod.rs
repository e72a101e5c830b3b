//! Dashboard composition
//!
//! [`Dashboard`] combines the fetched weather state with the forecast
//! selection and produces a [`DashboardSnapshot`], the serializable view
//! both the terminal renderer and the web API show.

pub mod aggregate;
pub mod container;
pub mod current_view;
pub mod day_view;
pub mod forecast;
pub mod render;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DashboardError;
use crate::models::{AddressContext, Alert, CurrentWeather, TemperatureUnit, WeatherForecast};
use crate::weather::WeatherBundle;
use current_view::{CurrentCard, TimeframeCard};
use day_view::DayCard;
use forecast::{ForecastState, LOADER_TEXT};

/// "Powered by" attribution for the forecast provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub text: String,
    pub url: String,
}

pub const ATTRIBUTION_TEXT: &str = "Powered by Open-Meteo";
pub const ATTRIBUTION_URL: &str = "https://open-meteo.com/";

/// Fetched data plus fetch status flags
#[derive(Debug, Clone, Default)]
pub struct WeatherState {
    pub current: Option<CurrentWeather>,
    pub forecast: Option<WeatherForecast>,
    /// Address the displayed data was fetched for
    pub loaded_for: Option<AddressContext>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl WeatherState {
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.current.is_some() && self.forecast.is_some()
    }
}

/// Serializable view of the whole dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Loading indicator text, shown until data first arrives
    pub loading: Option<String>,
    /// Error indicator text
    pub error: Option<String>,
    pub current: Option<CurrentCard>,
    pub days: Vec<DayCard>,
    pub selected_index: Option<usize>,
    /// Timeframes of the selected day
    pub timeframes: Vec<TimeframeCard>,
    /// Loader for the forecast section while no day is selected
    pub forecast_loader: Option<String>,
    pub days_visible: bool,
    pub alerts: Vec<Alert>,
    pub attribution: Attribution,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    address: AddressContext,
    weather: WeatherState,
    forecast: ForecastState,
    unit: TemperatureUnit,
}

impl Dashboard {
    #[must_use]
    pub fn new(unit: TemperatureUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn address(&self) -> &AddressContext {
        &self.address
    }

    #[must_use]
    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    #[must_use]
    pub fn forecast_state(&self) -> &ForecastState {
        &self.forecast
    }

    #[must_use]
    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn set_address(&mut self, address: AddressContext) {
        self.address = address;
    }

    /// Mark a fetch as in flight
    pub fn begin_fetch(&mut self) {
        self.weather.is_loading = true;
    }

    /// Mark an in-flight fetch as abandoned
    pub fn end_fetch(&mut self) {
        self.weather.is_loading = false;
    }

    /// Apply a successful fetch. Incomplete bundles leave the previous data
    /// in place; either way the error flag is cleared.
    pub fn apply_bundle(&mut self, bundle: WeatherBundle, now: DateTime<Utc>) {
        self.weather.is_loading = false;
        self.weather.is_error = false;

        if !bundle.is_complete() {
            debug!("Fetch returned no usable data, keeping previous weather");
            return;
        }

        self.forecast
            .sync(&bundle.forecast, self.address.latlong, now);
        self.weather.current = bundle.current;
        self.weather.forecast = Some(bundle.forecast);
        self.weather.loaded_for = Some(self.address.clone());
    }

    /// Record a failed fetch; previous data stays visible
    pub fn apply_error(&mut self) {
        self.weather.is_loading = false;
        self.weather.is_error = true;
    }

    pub fn select_day(&mut self, index: usize) -> Result<(), DashboardError> {
        self.forecast.select_day(index)
    }

    pub fn toggle_days_visibility(&mut self) {
        self.forecast.toggle_days_visibility();
    }

    /// Loading text while the first fetch is in flight
    #[must_use]
    pub fn loading_message(&self) -> Option<String> {
        if !self.weather.is_loading || self.weather.has_data() {
            return None;
        }
        Some(match self.address.valid_city_name() {
            Some(city) => format!("Fetching weather forecast for {city} 😎"),
            None => "Fetching weather forecast 😎".to_string(),
        })
    }

    /// Error text, only once the user has a plausible location
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if !self.weather.is_error {
            return None;
        }
        let city = self.address.valid_city_name()?;
        Some(format!(
            "Something went wrong. Failed to fetch weather forecast for {city}! 😢"
        ))
    }

    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        let forecast = self.weather.forecast.as_ref();
        let timezone = forecast.and_then(WeatherForecast::timezone).unwrap_or(Tz::UTC);
        let city = self
            .weather
            .loaded_for
            .as_ref()
            .and_then(AddressContext::valid_city_name);

        let current = self
            .weather
            .current
            .as_ref()
            .map(|c| CurrentCard::render(c, city, timezone, self.unit));

        let (days, timeframes, alerts) = match forecast {
            Some(f) => (
                self.forecast.day_cards(f, self.unit),
                self.forecast.timeframe_cards(f, self.unit),
                f.alerts.iter().filter(|a| a.is_active(now)).cloned().collect(),
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        let forecast_loader = (forecast.is_some() && self.forecast.selected_index().is_none())
            .then(|| LOADER_TEXT.to_string());

        DashboardSnapshot {
            loading: self.loading_message(),
            error: self.error_message(),
            current,
            days,
            selected_index: self.forecast.selected_index(),
            timeframes,
            forecast_loader,
            days_visible: self.forecast.days_visible(),
            alerts,
            attribution: Attribution {
                text: ATTRIBUTION_TEXT.to_string(),
                url: ATTRIBUTION_URL.to_string(),
            },
        }
    }
}
