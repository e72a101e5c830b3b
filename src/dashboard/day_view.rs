//! Single forecast day card

use serde::{Deserialize, Serialize};

use crate::models::{Day, TemperatureUnit, display_temperature};
use crate::weather::icon::icon_for_day;
use crate::weather::time::{TimePattern, format_time};

/// Rendered summary of one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCard {
    pub index: usize,
    /// Short weekday in the location's timezone
    pub label: String,
    /// `DD/MM/YYYY`
    pub date: String,
    pub icon: String,
    /// Hover text for the icon
    pub title: String,
    pub high: i64,
    pub low: i64,
    pub unit: TemperatureUnit,
    /// `h:mm`
    pub sunrise: String,
    /// `HH:mm`
    pub sunset: String,
    pub selected: bool,
}

impl DayCard {
    /// Build the card for `day` at `index`. Aggregated timeframe icon and
    /// description take precedence over the day's own.
    #[must_use]
    pub fn render(
        day: &Day,
        index: usize,
        selected_index: Option<usize>,
        unit: TemperatureUnit,
        icon: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        Self {
            index,
            label: format_time(day.time, day.timezone, TimePattern::Weekday),
            date: format_time(day.time, day.timezone, TimePattern::Date),
            icon: icon.unwrap_or_else(|| icon_for_day(day)).to_string(),
            title: description.unwrap_or(day.summary.as_str()).to_string(),
            high: display_temperature(day.temperature_high, unit),
            low: display_temperature(day.temperature_low, unit),
            unit,
            sunrise: format_time(day.sunrise_time, day.timezone, TimePattern::Hour12),
            sunset: format_time(day.sunset_time, day.timezone, TimePattern::Hour24),
            selected: selected_index == Some(index),
        }
    }

    /// Index to hand back to the forecast container when this card is picked
    #[must_use]
    pub fn select(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{day, day_in};

    #[test]
    fn renders_fahrenheit_card() {
        // 2024-06-01 is a Saturday; fixture sunrise 06:05, sunset 20:45 UTC
        let d = day("2024-06-01", &[]);
        let card = DayCard::render(&d, 0, Some(0), TemperatureUnit::Fahrenheit, None, None);
        assert_eq!(card.label, "Sat");
        assert_eq!(card.date, "01/06/2024");
        assert_eq!(card.high, 77);
        assert_eq!(card.low, 56);
        assert_eq!(card.sunrise, "6:05");
        assert_eq!(card.sunset, "20:45");
        assert_eq!(card.icon, "wi-day-cloudy");
        assert_eq!(card.title, "Partly cloudy");
        assert!(card.selected);
    }

    #[test]
    fn renders_celsius_card() {
        let d = day("2024-06-01", &[]);
        let card = DayCard::render(&d, 2, Some(0), TemperatureUnit::Celsius, None, None);
        assert_eq!(card.high, 25);
        assert_eq!(card.low, 13);
        assert!(!card.selected);
        assert_eq!(card.select(), 2);
    }

    #[test]
    fn prefers_aggregated_icon_and_description() {
        let d = day("2024-06-01", &[]);
        let card = DayCard::render(
            &d,
            0,
            None,
            TemperatureUnit::Fahrenheit,
            Some("wi-rain"),
            Some("Slight rain"),
        );
        assert_eq!(card.icon, "wi-rain");
        assert_eq!(card.title, "Slight rain");
        assert!(!card.selected);
    }

    #[test]
    fn formats_in_day_timezone() {
        let d = day_in("2024-06-01", chrono_tz::Asia::Tokyo, &[]);
        let card = DayCard::render(&d, 0, None, TemperatureUnit::Fahrenheit, None, None);
        // local midnight-based fixture keeps local clock values
        assert_eq!(card.label, "Sat");
        assert_eq!(card.sunrise, "6:05");
        assert_eq!(card.sunset, "20:45");
    }
}
