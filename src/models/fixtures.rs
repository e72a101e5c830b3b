//! Forecast fixtures shared by unit tests

use super::{CurrentWeather, Day, Timeframe, WeatherForecast};
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

pub fn day(date: &str, timeframes: &[(&str, &str)]) -> Day {
    day_in(date, Tz::UTC, timeframes)
}

pub fn day_in(date: &str, timezone: Tz, timeframes: &[(&str, &str)]) -> Day {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let midnight = timezone
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .earliest()
        .unwrap()
        .with_timezone(&Utc);
    let timeframes = timeframes
        .iter()
        .enumerate()
        .map(|(i, (icon, desc))| Timeframe {
            time: midnight + chrono::Duration::hours(3 * i as i64),
            temperature: 60.0 + i as f64,
            wx_code: 0,
            wx_icon: (*icon).to_string(),
            wx_desc: (*desc).to_string(),
            precipitation_probability: 10,
            wind_speed_mph: 5.0,
        })
        .collect();

    Day {
        date,
        time: midnight,
        timezone,
        sunrise_time: midnight + chrono::Duration::minutes(6 * 60 + 5),
        sunset_time: midnight + chrono::Duration::minutes(20 * 60 + 45),
        temperature_high: 77.4,
        temperature_low: 55.6,
        summary: "Partly cloudy".to_string(),
        icon: "wi-day-cloudy".to_string(),
        weather_code: 2,
        timeframes,
    }
}

pub fn forecast(dates: &[&str]) -> WeatherForecast {
    WeatherForecast::new(dates.iter().map(|d| day(d, &[])).collect(), Vec::new())
}

pub fn current() -> CurrentWeather {
    CurrentWeather {
        observed_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        temperature: 68.0,
        feels_like: 66.2,
        humidity: 40,
        wind_speed_mph: 7.5,
        weather_code: 1,
        description: "Mainly clear".to_string(),
        icon: "wi-day-sunny-overcast".to_string(),
        is_day: true,
    }
}
