//! Plain-text rendering of a [`DashboardSnapshot`] for the terminal

use std::fmt::Write;

use super::DashboardSnapshot;
use super::current_view::{CurrentCard, TimeframeCard};
use super::day_view::DayCard;
use crate::weather::icon::is_font_icon;

/// Terminal glyph for a weather icon name
fn glyph(icon: &str) -> &'static str {
    if !is_font_icon(icon) {
        return "·";
    }
    let name = icon.trim_start_matches("wi-");
    if name.contains("thunderstorm") {
        "⛈"
    } else if name.contains("snow") || name.contains("sleet") {
        "❄"
    } else if name.contains("rain") || name.contains("showers") || name.contains("sprinkle") {
        "☔"
    } else if name.contains("fog") {
        "🌫"
    } else if name.contains("cloud") || name.contains("overcast") {
        "⛅"
    } else if name == "day-sunny" {
        "☀"
    } else if name.contains("clear") {
        "☾"
    } else {
        "·"
    }
}

fn current_block(out: &mut String, card: &CurrentCard) {
    let _ = writeln!(
        out,
        "{}  {} {}°{}  {}",
        card.city.as_deref().unwrap_or("Current conditions"),
        glyph(&card.icon),
        card.temperature,
        card.unit,
        card.description
    );
    let _ = writeln!(
        out,
        "   Feels like {}°{} | Humidity {}% | Wind {} mph | Updated {}",
        card.feels_like, card.unit, card.humidity, card.wind_mph, card.observed
    );
}

fn day_line(out: &mut String, card: &DayCard) {
    let marker = if card.selected { '>' } else { ' ' };
    let _ = writeln!(
        out,
        "{marker} [{}] {} {} {:>4}°/{:<4} {}  ↑{} ↓{}",
        card.index,
        card.label,
        glyph(&card.icon),
        card.high,
        format!("{}°", card.low),
        card.title,
        card.sunrise,
        card.sunset
    );
}

fn timeframe_line(out: &mut String, card: &TimeframeCard) {
    let _ = writeln!(
        out,
        "    {}  {} {:>4}°{}  {:>3}%  {:>3} mph  {}",
        card.time,
        glyph(&card.icon),
        card.temperature,
        card.unit,
        card.precipitation_probability,
        card.wind_mph,
        card.description
    );
}

fn render(snapshot: &DashboardSnapshot, show_days: bool) -> String {
    let mut out = String::new();

    if let Some(loading) = &snapshot.loading {
        let _ = writeln!(out, "{loading}");
    }
    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "{error}");
    }

    for alert in &snapshot.alerts {
        let _ = writeln!(out, "! {:?}: {}", alert.severity, alert.title);
    }

    if let Some(current) = &snapshot.current {
        current_block(&mut out, current);
        out.push('\n');
    }

    if let Some(loader) = &snapshot.forecast_loader {
        let _ = writeln!(out, "{loader}");
    } else if !snapshot.days.is_empty() {
        if show_days {
            for card in &snapshot.days {
                day_line(&mut out, card);
            }
        } else if let Some(card) = snapshot.days.iter().find(|c| c.selected) {
            day_line(&mut out, card);
            let _ = writeln!(out, "  ({} more days hidden)", snapshot.days.len() - 1);
        }

        if !snapshot.timeframes.is_empty() {
            out.push('\n');
            for card in &snapshot.timeframes {
                timeframe_line(&mut out, card);
            }
        }
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "{} ({})",
        snapshot.attribution.text, snapshot.attribution.url
    );
    out
}

/// Full layout: every day listed
#[must_use]
pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    render(snapshot, true)
}

/// Compact layout: only the selected day unless the day list is expanded
#[must_use]
pub fn render_compact(snapshot: &DashboardSnapshot) -> String {
    render(snapshot, snapshot.days_visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::models::fixtures::{current, day};
    use crate::models::{AddressContext, LatLong, TemperatureUnit, WeatherForecast};
    use crate::weather::WeatherBundle;
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn loaded() -> Dashboard {
        let mut dashboard = Dashboard::new(TemperatureUnit::Fahrenheit);
        dashboard.set_address(AddressContext::new("Berlin", LatLong::new(52.52, 13.41)));
        dashboard.apply_bundle(
            WeatherBundle {
                current: Some(current()),
                forecast: WeatherForecast::new(
                    vec![
                        day("2024-06-01", &[("wi-day-sunny", "Clear sky")]),
                        day("2024-06-02", &[("wi-rain", "Slight rain")]),
                    ],
                    Vec::new(),
                ),
            },
            now(),
        );
        dashboard
    }

    #[rstest]
    #[case("wi-day-sunny", "☀")]
    #[case("wi-rain", "☔")]
    #[case("wi-day-thunderstorm", "⛈")]
    #[case("wi-snow", "❄")]
    #[case("wi-na", "·")]
    #[case("cloudy-day-1", "·")]
    fn maps_icons_to_glyphs(#[case] icon: &str, #[case] expected: &str) {
        assert_eq!(glyph(icon), expected);
    }

    #[test]
    fn full_layout_lists_all_days() {
        let text = render_text(&loaded().snapshot(now()));
        assert!(text.starts_with("Berlin"));
        assert!(text.contains("> [0] Sat"));
        assert!(text.contains("  [1] Sun"));
        assert!(text.contains("Clear sky"));
        assert!(text.contains("Powered by Open-Meteo (https://open-meteo.com/)"));
    }

    #[test]
    fn compact_layout_hides_other_days_until_expanded() {
        let mut dashboard = loaded();
        let text = render_compact(&dashboard.snapshot(now()));
        assert!(text.contains("> [0] Sat"));
        assert!(!text.contains("[1] Sun"));
        assert!(text.contains("1 more days hidden"));

        dashboard.toggle_days_visibility();
        let text = render_compact(&dashboard.snapshot(now()));
        assert!(text.contains("[1] Sun"));
    }

    #[test]
    fn shows_loading_before_data() {
        let mut dashboard = Dashboard::new(TemperatureUnit::Celsius);
        dashboard.set_address(AddressContext::new("Berlin", LatLong::new(52.52, 13.41)));
        dashboard.begin_fetch();
        let text = render_text(&dashboard.snapshot(now()));
        assert!(text.starts_with("Fetching weather forecast for Berlin"));
    }

    #[test]
    fn shows_error_with_previous_data() {
        let mut dashboard = loaded();
        dashboard.apply_error();
        let text = render_text(&dashboard.snapshot(now()));
        assert!(text.starts_with("Something went wrong."));
        assert!(text.contains("[0] Sat"));
    }
}
