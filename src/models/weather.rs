//! Current conditions, intraday timeframes and alerts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current weather conditions at the location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Temperature in Fahrenheit
    pub temperature: f64,
    /// Apparent temperature in Fahrenheit
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in mph
    pub wind_speed_mph: f64,
    /// WMO weather code
    pub weather_code: u8,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Icon identifier
    pub icon: String,
    pub is_day: bool,
}

/// One intraday reading within a day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Timeframe {
    /// Start of the timeframe
    pub time: DateTime<Utc>,
    /// Temperature in Fahrenheit
    pub temperature: f64,
    /// WMO weather code
    pub wx_code: u8,
    /// Icon identifier
    pub wx_icon: String,
    /// Human-readable description of weather conditions
    pub wx_desc: String,
    /// Precipitation probability (0-100)
    pub precipitation_probability: u8,
    /// Wind speed in mph
    pub wind_speed_mph: f64,
}

/// Severity of a weather alert
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Advisory,
    Watch,
    Warning,
}

/// Weather alert issued for the location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub expires: Option<DateTime<Utc>>,
}

impl Alert {
    /// Alerts without an expiry never lapse
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_none_or(|expires| expires > now)
    }
}
