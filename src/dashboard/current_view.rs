//! Current conditions and intraday timeframe cards

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{CurrentWeather, TemperatureUnit, Timeframe, display_temperature};
use crate::weather::time::{TimePattern, format_time};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCard {
    pub city: Option<String>,
    pub temperature: i64,
    pub feels_like: i64,
    pub unit: TemperatureUnit,
    pub humidity: u8,
    pub wind_mph: i64,
    pub description: String,
    pub icon: String,
    /// Observation time, `HH:mm` at the location
    pub observed: String,
}

impl CurrentCard {
    #[must_use]
    pub fn render(
        current: &CurrentWeather,
        city: Option<&str>,
        timezone: Tz,
        unit: TemperatureUnit,
    ) -> Self {
        Self {
            city: city.map(str::to_string),
            temperature: display_temperature(current.temperature, unit),
            feels_like: display_temperature(current.feels_like, unit),
            unit,
            humidity: current.humidity,
            wind_mph: current.wind_speed_mph.round() as i64,
            description: current.description.clone(),
            icon: current.icon.clone(),
            observed: format_time(current.observed_at, timezone, TimePattern::Hour24),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeCard {
    /// `HH:mm` at the location
    pub time: String,
    pub icon: String,
    pub description: String,
    pub temperature: i64,
    pub unit: TemperatureUnit,
    pub precipitation_probability: u8,
    pub wind_mph: i64,
}

impl TimeframeCard {
    #[must_use]
    pub fn render(timeframe: &Timeframe, timezone: Tz, unit: TemperatureUnit) -> Self {
        Self {
            time: format_time(timeframe.time, timezone, TimePattern::Hour24),
            icon: timeframe.wx_icon.clone(),
            description: timeframe.wx_desc.clone(),
            temperature: display_temperature(timeframe.temperature, unit),
            unit,
            precipitation_probability: timeframe.precipitation_probability,
            wind_mph: timeframe.wind_speed_mph.round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{current, day};

    #[test]
    fn renders_current_conditions() {
        let card = CurrentCard::render(
            &current(),
            Some("Berlin"),
            chrono_tz::Europe::Berlin,
            TemperatureUnit::Celsius,
        );
        assert_eq!(card.temperature, 20);
        assert_eq!(card.feels_like, 19);
        assert_eq!(card.wind_mph, 8);
        assert_eq!(card.observed, "14:00");
        assert_eq!(card.city.as_deref(), Some("Berlin"));
    }

    #[test]
    fn renders_timeframe() {
        let d = day("2024-06-01", &[("wi-rain", "Slight rain"), ("wi-fog", "Fog")]);
        let card = TimeframeCard::render(&d.timeframes[1], d.timezone, TemperatureUnit::Fahrenheit);
        assert_eq!(card.time, "03:00");
        assert_eq!(card.icon, "wi-fog");
        assert_eq!(card.temperature, 61);
    }
}
