//! Open-Meteo forecast client
//!
//! Requests current, hourly and daily data in Fahrenheit/mph for the
//! location's own timezone and maps it into [`WeatherBundle`]s. Hourly
//! readings are sampled every `timeframe_hours` to form each day's
//! timeframes.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::icon::{description_for_code, icon_for_code};
use super::{WeatherBundle, WeatherSource, solar_times};
use crate::DashboardError;
use crate::config::WeatherConfig;
use crate::models::{AddressContext, CurrentWeather, Day, LatLong, Timeframe, WeatherForecast};

const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code,is_day";
const HOURLY_FIELDS: &str =
    "temperature_2m,weather_code,precipitation_probability,wind_speed_10m,is_day";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// Forecast response from the Open-Meteo API
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub current: Option<CurrentData>,
    pub hourly: Option<HourlyData>,
    pub daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub apparent_temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: u8,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    pub weather_code: u8,
    pub is_day: u8,
}

#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<Vec<Option<f64>>>,
    pub weather_code: Option<Vec<Option<u8>>>,
    pub precipitation_probability: Option<Vec<Option<u8>>>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Option<Vec<Option<f64>>>,
    pub is_day: Option<Vec<Option<u8>>>,
}

#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub weather_code: Option<Vec<Option<u8>>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<Vec<Option<f64>>>,
    pub sunrise: Option<Vec<Option<String>>>,
    pub sunset: Option<Vec<Option<String>>>,
}

fn value_at<T: Copy>(values: Option<&Vec<Option<T>>>, i: usize) -> Option<T> {
    values.and_then(|v| v.get(i).copied().flatten())
}

fn parse_local(value: &str, timezone: Tz) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()?;
    Some(local_to_utc(naive, timezone))
}

/// Resolve a wall-clock time at the location. Times inside a DST gap are
/// taken as UTC.
fn local_to_utc(naive: NaiveDateTime, timezone: Tz) -> DateTime<Utc> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => naive.and_utc(),
    }
}

fn map_current(current: &CurrentData, timezone: Tz) -> CurrentWeather {
    let is_day = current.is_day != 0;
    CurrentWeather {
        observed_at: parse_local(&current.time, timezone).unwrap_or_else(Utc::now),
        temperature: current.temperature,
        feels_like: current.apparent_temperature,
        humidity: current.humidity,
        wind_speed_mph: current.wind_speed,
        weather_code: current.weather_code,
        description: description_for_code(current.weather_code).to_string(),
        icon: icon_for_code(current.weather_code, is_day).to_string(),
        is_day,
    }
}

fn map_timeframes(
    hourly: &HourlyData,
    timezone: Tz,
    timeframe_hours: u32,
) -> BTreeMap<NaiveDate, Vec<Timeframe>> {
    let step = timeframe_hours.max(1);
    let mut by_date: BTreeMap<NaiveDate, Vec<Timeframe>> = BTreeMap::new();

    for (i, time) in hourly.time.iter().enumerate() {
        let Ok(naive) = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M") else {
            warn!("Skipping hourly entry with unparseable time '{}'", time);
            continue;
        };
        if naive.hour() % step != 0 {
            continue;
        }
        let Some(temperature) = value_at(hourly.temperature.as_ref(), i) else {
            continue;
        };
        let wx_code = value_at(hourly.weather_code.as_ref(), i).unwrap_or(0);
        let is_day = value_at(hourly.is_day.as_ref(), i).is_none_or(|d| d != 0);

        by_date.entry(naive.date()).or_default().push(Timeframe {
            time: local_to_utc(naive, timezone),
            temperature,
            wx_code,
            wx_icon: icon_for_code(wx_code, is_day).to_string(),
            wx_desc: description_for_code(wx_code).to_string(),
            precipitation_probability: value_at(hourly.precipitation_probability.as_ref(), i)
                .unwrap_or(0),
            wind_speed_mph: value_at(hourly.wind_speed.as_ref(), i).unwrap_or(0.0),
        });
    }

    by_date
}

fn map_days(
    daily: &DailyData,
    timezone: Tz,
    latlong: LatLong,
    mut timeframes: BTreeMap<NaiveDate, Vec<Timeframe>>,
) -> Vec<Day> {
    let mut days = Vec::with_capacity(daily.time.len());

    for (i, date) in daily.time.iter().enumerate() {
        let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            warn!("Skipping daily entry with unparseable date '{}'", date);
            continue;
        };
        let (Some(high), Some(low)) = (
            value_at(daily.temperature_max.as_ref(), i),
            value_at(daily.temperature_min.as_ref(), i),
        ) else {
            warn!("Skipping {} without temperature range", date);
            continue;
        };

        let sunrise = daily
            .sunrise
            .as_ref()
            .and_then(|v| v.get(i).cloned().flatten())
            .and_then(|s| parse_local(&s, timezone));
        let sunset = daily
            .sunset
            .as_ref()
            .and_then(|v| v.get(i).cloned().flatten())
            .and_then(|s| parse_local(&s, timezone));
        let (sunrise_time, sunset_time) = match (sunrise, sunset) {
            (Some(rise), Some(set)) => (rise, set),
            _ => match solar_times(latlong, date) {
                Ok(times) => times,
                Err(e) => {
                    warn!("No sunrise/sunset for {}: {}", date, e);
                    let midnight = date.and_time(NaiveTime::MIN).and_utc();
                    (midnight, midnight)
                }
            },
        };

        let weather_code = value_at(daily.weather_code.as_ref(), i).unwrap_or(0);
        days.push(Day {
            date,
            time: local_to_utc(date.and_time(NaiveTime::MIN), timezone),
            timezone,
            sunrise_time,
            sunset_time,
            temperature_high: high,
            temperature_low: low,
            summary: description_for_code(weather_code).to_string(),
            icon: icon_for_code(weather_code, true).to_string(),
            weather_code,
            timeframes: timeframes.remove(&date).unwrap_or_default(),
        });
    }

    days
}

/// Map an Open-Meteo response into a [`WeatherBundle`]
pub fn to_bundle(response: &ForecastResponse, timeframe_hours: u32) -> Result<WeatherBundle> {
    let timezone: Tz = response.timezone.parse().map_err(|_| {
        DashboardError::api(format!("Unknown timezone '{}' in forecast", response.timezone))
    })?;
    let latlong = LatLong::new(response.latitude, response.longitude);

    let current = response.current.as_ref().map(|c| map_current(c, timezone));
    let timeframes = response
        .hourly
        .as_ref()
        .map(|h| map_timeframes(h, timezone, timeframe_hours))
        .unwrap_or_default();
    let days = response
        .daily
        .as_ref()
        .map(|d| map_days(d, timezone, latlong, timeframes))
        .unwrap_or_default();

    Ok(WeatherBundle {
        current,
        // Open-Meteo publishes no alerts
        forecast: WeatherForecast::new(days, Vec::new()),
    })
}

/// Weather client for the Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    forecast_days: u32,
    timeframe_hours: u32,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weather-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forecast_days: config.forecast_days,
            timeframe_hours: config.timeframe_hours,
        })
    }

    fn forecast_url(&self, latlong: LatLong) -> String {
        let (latitude, longitude) = latlong.rounded(4);
        format!(
            "{}/forecast?latitude={}&longitude={}&current={CURRENT_FIELDS}&hourly={HOURLY_FIELDS}&daily={DAILY_FIELDS}&temperature_unit=fahrenheit&wind_speed_unit=mph&timezone=auto&forecast_days={}",
            self.base_url, latitude, longitude, self.forecast_days
        )
    }

    /// Fetch and map the forecast for coordinates
    #[instrument(skip(self), fields(lat = latlong.latitude, lon = latlong.longitude))]
    pub async fn get_forecast(&self, latlong: LatLong) -> Result<WeatherBundle> {
        let start_time = Instant::now();
        let url = self.forecast_url(latlong);
        debug!("Open-Meteo request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DashboardError::api(format!("Forecast request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::api(format!("Forecast request returned {status}")).into());
        }

        let forecast_response: ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Open-Meteo forecast response")?;

        let bundle = to_bundle(&forecast_response, self.timeframe_hours)?;

        info!(
            "Retrieved {}-day forecast in {:.3}s",
            bundle.forecast.days.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(bundle)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn fetch(&self, address: &AddressContext) -> Result<WeatherBundle> {
        let latlong = address
            .latlong
            .ok_or_else(|| DashboardError::validation("No coordinates resolved for address"))?;
        self.get_forecast(latlong).await
    }
}
