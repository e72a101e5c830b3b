//! Forecast container: day selection and per-day aggregates
//!
//! Holds the index of the selected day and the icon/description derived
//! for every day from its timeframes. The selection is recomputed whenever
//! the location changes; refreshes for the same location keep it.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::aggregate::{DayField, grouped_day_values};
use super::current_view::TimeframeCard;
use super::day_view::DayCard;
use crate::DashboardError;
use crate::models::{Day, LatLong, TemperatureUnit, Timeframe, WeatherForecast};
use crate::weather::time::today_in;

/// Loader text while no day is selected
pub const LOADER_TEXT: &str = "Fetching weather forecast";

/// Day to select when the forecast is first shown: the day matching today
/// at the location, else the first day. `None` for an empty forecast.
#[must_use]
pub fn default_day_index(forecast: &WeatherForecast, now: DateTime<Utc>) -> Option<usize> {
    let timezone = forecast.timezone()?;
    let today = today_in(timezone, now);
    match forecast.position_of(today) {
        Some(index) => Some(index),
        None => {
            debug!("Today ({}) not in forecast, selecting first day", today);
            Some(0)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastState {
    selected: Option<usize>,
    day_count: usize,
    latlong: Option<LatLong>,
    icons: Vec<Option<String>>,
    descriptions: Vec<Option<String>>,
    days_visible: bool,
}

impl ForecastState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the state in line with a newly fetched forecast
    pub fn sync(&mut self, forecast: &WeatherForecast, latlong: Option<LatLong>, now: DateTime<Utc>) {
        let location_changed = self.latlong != latlong;
        self.latlong = latlong;
        self.day_count = forecast.days.len();
        self.icons = grouped_day_values(forecast, DayField::Icon);
        self.descriptions = grouped_day_values(forecast, DayField::Description);

        let still_valid = self.selected.is_some_and(|i| i < self.day_count);
        if location_changed || !still_valid {
            self.selected = default_day_index(forecast, now);
            debug!(selected = ?self.selected, "Selected default forecast day");
        }
    }

    /// Select a day. Out-of-range indexes leave the selection unchanged.
    pub fn select_day(&mut self, index: usize) -> Result<(), DashboardError> {
        if index >= self.day_count {
            return Err(DashboardError::validation(format!(
                "day index {index} out of range (forecast has {} days)",
                self.day_count
            )));
        }
        self.selected = Some(index);
        Ok(())
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_day<'a>(&self, forecast: &'a WeatherForecast) -> Option<&'a Day> {
        forecast.day(self.selected?)
    }

    /// Timeframes of the selected day, empty while nothing is selected
    #[must_use]
    pub fn selected_timeframes<'a>(&self, forecast: &'a WeatherForecast) -> &'a [Timeframe] {
        match self.selected_day(forecast) {
            Some(day) => &day.timeframes,
            None => &[],
        }
    }

    pub fn toggle_days_visibility(&mut self) {
        self.days_visible = !self.days_visible;
    }

    /// Whether the day list is expanded in the compact layout
    #[must_use]
    pub fn days_visible(&self) -> bool {
        self.days_visible
    }

    #[must_use]
    pub fn day_icon(&self, index: usize) -> Option<&str> {
        self.icons.get(index)?.as_deref()
    }

    #[must_use]
    pub fn day_description(&self, index: usize) -> Option<&str> {
        self.descriptions.get(index)?.as_deref()
    }

    #[must_use]
    pub fn day_cards(&self, forecast: &WeatherForecast, unit: TemperatureUnit) -> Vec<DayCard> {
        forecast
            .days
            .iter()
            .enumerate()
            .map(|(index, day)| {
                DayCard::render(
                    day,
                    index,
                    self.selected,
                    unit,
                    self.day_icon(index),
                    self.day_description(index),
                )
            })
            .collect()
    }

    #[must_use]
    pub fn timeframe_cards(
        &self,
        forecast: &WeatherForecast,
        unit: TemperatureUnit,
    ) -> Vec<TimeframeCard> {
        let Some(day) = self.selected_day(forecast) else {
            return Vec::new();
        };
        day.timeframes
            .iter()
            .map(|tf| TimeframeCard::render(tf, day.timezone, unit))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{day, day_in, forecast};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn berlin() -> Option<LatLong> {
        Some(LatLong::new(52.52, 13.41))
    }

    #[test]
    fn default_day_matches_today() {
        let f = forecast(&["2024-06-01", "2024-06-02", "2024-06-03"]);
        assert_eq!(default_day_index(&f, at(2024, 6, 2, 9)), Some(1));
    }

    #[test]
    fn default_day_uses_location_timezone() {
        let tz = chrono_tz::Pacific::Honolulu;
        let f = WeatherForecast::new(
            vec![day_in("2024-05-31", tz, &[]), day_in("2024-06-01", tz, &[])],
            Vec::new(),
        );
        // 04:00 UTC on June 1st is still May 31st in Honolulu
        assert_eq!(default_day_index(&f, at(2024, 6, 1, 4)), Some(0));
        assert_eq!(default_day_index(&f, at(2024, 6, 1, 12)), Some(1));
    }

    #[test]
    fn default_day_falls_back_to_first() {
        let f = forecast(&["2024-06-01", "2024-06-02"]);
        assert_eq!(default_day_index(&f, at(2024, 7, 1, 0)), Some(0));
    }

    #[test]
    fn default_day_unset_for_empty_forecast() {
        assert_eq!(default_day_index(&forecast(&[]), at(2024, 6, 1, 0)), None);
    }

    #[test]
    fn selecting_a_day_switches_timeframes() {
        let f = WeatherForecast::new(
            vec![
                day("2024-06-01", &[("wi-day-sunny", "Clear sky")]),
                day("2024-06-02", &[("wi-rain", "Slight rain"), ("wi-fog", "Fog")]),
            ],
            Vec::new(),
        );
        let mut state = ForecastState::new();
        state.sync(&f, berlin(), at(2024, 6, 1, 10));
        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(state.selected_timeframes(&f), f.days[0].timeframes.as_slice());

        state.select_day(1).unwrap();
        assert_eq!(state.selected_timeframes(&f), f.days[1].timeframes.as_slice());

        let cards = state.day_cards(&f, TemperatureUnit::Fahrenheit);
        assert!(!cards[0].selected);
        assert!(cards[1].selected);
        assert_eq!(cards[1].icon, "wi-rain");
        assert_eq!(state.timeframe_cards(&f, TemperatureUnit::Fahrenheit).len(), 2);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let f = forecast(&["2024-06-01", "2024-06-02"]);
        let mut state = ForecastState::new();
        state.sync(&f, berlin(), at(2024, 6, 2, 10));
        assert!(state.select_day(2).is_err());
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn unset_selection_has_no_timeframes() {
        let f = forecast(&["2024-06-01"]);
        let state = ForecastState::new();
        assert_eq!(state.selected_index(), None);
        assert!(state.selected_timeframes(&f).is_empty());
        assert!(state.timeframe_cards(&f, TemperatureUnit::Celsius).is_empty());
    }

    #[test]
    fn refresh_keeps_selection_for_same_location() {
        let f = forecast(&["2024-06-01", "2024-06-02", "2024-06-03"]);
        let mut state = ForecastState::new();
        state.sync(&f, berlin(), at(2024, 6, 1, 10));
        state.select_day(2).unwrap();

        state.sync(&f, berlin(), at(2024, 6, 1, 11));
        assert_eq!(state.selected_index(), Some(2));
    }

    #[test]
    fn location_change_resets_selection() {
        let f = forecast(&["2024-06-01", "2024-06-02", "2024-06-03"]);
        let mut state = ForecastState::new();
        state.sync(&f, berlin(), at(2024, 6, 1, 10));
        state.select_day(2).unwrap();

        state.sync(&f, Some(LatLong::new(48.85, 2.35)), at(2024, 6, 1, 11));
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn shrinking_forecast_resets_invalid_selection() {
        let mut state = ForecastState::new();
        let long = forecast(&["2024-06-01", "2024-06-02", "2024-06-03"]);
        state.sync(&long, berlin(), at(2024, 6, 1, 10));
        state.select_day(2).unwrap();

        let short = forecast(&["2024-06-01"]);
        state.sync(&short, berlin(), at(2024, 6, 1, 11));
        assert_eq!(state.selected_index(), Some(0));

        state.sync(&forecast(&[]), berlin(), at(2024, 6, 1, 12));
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn toggles_day_visibility() {
        let mut state = ForecastState::new();
        assert!(!state.days_visible());
        state.toggle_days_visibility();
        assert!(state.days_visible());
        state.toggle_days_visibility();
        assert!(!state.days_visible());
    }
}
