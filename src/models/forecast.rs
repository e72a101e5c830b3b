//! Multi-day weather forecast model

use super::{Alert, Timeframe};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One calendar day's aggregated forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Day {
    /// Calendar date in the location's timezone
    pub date: NaiveDate,
    /// Start of the day
    pub time: DateTime<Utc>,
    /// Timezone of the forecast location
    pub timezone: Tz,
    pub sunrise_time: DateTime<Utc>,
    pub sunset_time: DateTime<Utc>,
    /// Maximum temperature in Fahrenheit
    pub temperature_high: f64,
    /// Minimum temperature in Fahrenheit
    pub temperature_low: f64,
    /// Short summary of the day's weather
    pub summary: String,
    /// Icon identifier for the day's dominant weather code
    pub icon: String,
    /// WMO weather code for the day
    pub weather_code: u8,
    /// Intraday readings, chronological
    pub timeframes: Vec<Timeframe>,
}

/// Weather forecast: days plus any active alerts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherForecast {
    /// Days sorted by date
    pub days: Vec<Day>,
    pub alerts: Vec<Alert>,
    /// When this forecast was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl WeatherForecast {
    /// Create new forecast. Days are ordered chronologically.
    #[must_use]
    pub fn new(mut days: Vec<Day>, alerts: Vec<Alert>) -> Self {
        days.sort_by_key(|day| day.date);
        Self {
            days,
            alerts,
            retrieved_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    /// Index of the first day with the given date
    #[must_use]
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|day| day.date == date)
    }

    /// Timezone the forecast was issued for, taken from its first day
    #[must_use]
    pub fn timezone(&self) -> Option<Tz> {
        self.days.first().map(|day| day.timezone)
    }
}
