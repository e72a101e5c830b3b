//! Per-day aggregation of timeframe values

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{Timeframe, WeatherForecast};

/// Timeframe field a day's representative value is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayField {
    Icon,
    Description,
}

impl DayField {
    fn of(self, timeframe: &Timeframe) -> &str {
        match self {
            Self::Icon => &timeframe.wx_icon,
            Self::Description => &timeframe.wx_desc,
        }
    }
}

/// Most frequent value; on a tie the value seen first wins.
pub fn most_common<I, T>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order: Vec<T> = Vec::new();

    for value in values {
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for value in order {
        let count = counts[&value];
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// One aggregated value per day, `None` for days without timeframes
#[must_use]
pub fn grouped_day_values(forecast: &WeatherForecast, field: DayField) -> Vec<Option<String>> {
    forecast
        .days
        .iter()
        .map(|day| {
            most_common(day.timeframes.iter().map(|tf| field.of(tf))).map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::day;
    use rstest::rstest;

    #[rstest]
    #[case(&["a", "b", "b", "c"], Some("b"))]
    #[case(&["a", "b", "a", "b"], Some("a"))]
    #[case(&["c", "b", "a"], Some("c"))]
    #[case(&["x", "y", "y", "x", "z", "z", "z"], Some("z"))]
    #[case(&[], None)]
    fn picks_most_common(#[case] values: &[&str], #[case] expected: Option<&str>) {
        assert_eq!(most_common(values.iter().copied()), expected);
    }

    #[test]
    fn tie_goes_to_first_occurrence_not_first_to_reach_count() {
        // "b" reaches two first, but "a" occurs first
        assert_eq!(most_common(["a", "b", "b", "a"]), Some("a"));
    }

    #[test]
    fn groups_per_day() {
        let forecast = WeatherForecast::new(
            vec![
                day(
                    "2024-06-01",
                    &[
                        ("wi-rain", "Slight rain"),
                        ("wi-day-sunny", "Clear sky"),
                        ("wi-rain", "Slight rain"),
                    ],
                ),
                day("2024-06-02", &[]),
                day(
                    "2024-06-03",
                    &[("wi-cloudy", "Overcast"), ("wi-fog", "Fog")],
                ),
            ],
            Vec::new(),
        );

        let icons = grouped_day_values(&forecast, DayField::Icon);
        assert_eq!(
            icons,
            vec![Some("wi-rain".to_string()), None, Some("wi-cloudy".to_string())]
        );

        let descriptions = grouped_day_values(&forecast, DayField::Description);
        assert_eq!(descriptions[0].as_deref(), Some("Slight rain"));
        assert_eq!(descriptions[2].as_deref(), Some("Overcast"));
    }
}
