//! Weather code to icon and description mapping
//!
//! Icons use the "weather-icons" naming (`wi-*`). Codes are WMO codes as
//! delivered by Open-Meteo, see <https://open-meteo.com/en/docs#weathervariables>.

use crate::models::Day;

/// Icon shown when a code is not recognised
pub const UNKNOWN_ICON: &str = "wi-na";

/// Icon identifier for a WMO weather code
#[must_use]
pub fn icon_for_code(code: u8, is_day: bool) -> &'static str {
    match (code, is_day) {
        (0, true) => "wi-day-sunny",
        (0, false) => "wi-night-clear",
        (1, true) => "wi-day-sunny-overcast",
        (1, false) => "wi-night-alt-partly-cloudy",
        (2, true) => "wi-day-cloudy",
        (2, false) => "wi-night-alt-cloudy",
        (3, _) => "wi-cloudy",
        (45 | 48, _) => "wi-fog",
        (51 | 53 | 55, _) => "wi-sprinkle",
        (56 | 57 | 66 | 67, _) => "wi-sleet",
        (61 | 63, _) => "wi-rain",
        (65, _) => "wi-rain-wind",
        (71 | 73 | 75 | 77, _) => "wi-snow",
        (80 | 81, true) => "wi-day-showers",
        (80 | 81, false) => "wi-night-alt-showers",
        (82, _) => "wi-showers",
        (85 | 86, _) => "wi-snow-wind",
        (95, _) => "wi-thunderstorm",
        (96 | 99, _) => "wi-storm-showers",
        _ => UNKNOWN_ICON,
    }
}

/// Convert WMO weather code to human-readable description
#[must_use]
pub fn description_for_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Icon for a day when no aggregated timeframe icon is available
#[must_use]
pub fn icon_for_day(day: &Day) -> &str {
    if day.icon.is_empty() {
        icon_for_code(day.weather_code, true)
    } else {
        &day.icon
    }
}

/// Whether an icon is a font glyph (`wi-*`) rather than an image asset
#[must_use]
pub fn is_font_icon(icon: &str) -> bool {
    icon.starts_with("wi")
}
