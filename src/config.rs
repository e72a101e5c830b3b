//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use crate::models::TemperatureUnit;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the weather dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Dashboard behaviour
    pub dashboard: DisplayConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Web API configuration
    pub web: WebConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    pub base_url: String,
    /// Base URL for the geocoding API
    pub geocoding_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Number of forecast days to request
    pub forecast_days: u32,
    /// Hours between two timeframes of a day
    pub timeframe_hours: u32,
}

/// Dashboard display and refresh settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Temperature unit shown on the dashboard
    pub unit: TemperatureUnit,
    /// Seconds between two background refreshes
    pub poll_interval_seconds: u64,
    /// City used when none is given on the command line
    pub default_city: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Web API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub port: u16,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_forecast_days() -> u32 {
    7
}

fn default_timeframe_hours() -> u32 {
    3
}

fn default_poll_interval() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_web_port() -> u16 {
    8080
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            geocoding_url: default_geocoding_url(),
            timeout_seconds: default_weather_timeout(),
            forecast_days: default_forecast_days(),
            timeframe_hours: default_timeframe_hours(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::default(),
            poll_interval_seconds: default_poll_interval(),
            default_city: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
        }
    }
}

impl DisplayConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

impl DashboardConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let explicit = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        } else if explicit {
            return Err(DashboardError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        // Environment overrides, e.g. WEATHER_DASHBOARD_WEB__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("WEATHER_DASHBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-dashboard").join("config.toml"))
    }

    /// Apply default values to empty or zero configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.forecast_days == 0 {
            self.weather.forecast_days = default_forecast_days();
        }
        if self.weather.timeframe_hours == 0 {
            self.weather.timeframe_hours = default_timeframe_hours();
        }
        if self.dashboard.poll_interval_seconds == 0 {
            self.dashboard.poll_interval_seconds = default_poll_interval();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.web.port == 0 {
            self.web.port = default_web_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                DashboardError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(1..=16).contains(&self.weather.forecast_days) {
            return Err(
                DashboardError::config("Forecast days must be between 1 and 16").into(),
            );
        }

        if !matches!(self.weather.timeframe_hours, 1 | 2 | 3 | 4 | 6 | 8 | 12) {
            return Err(DashboardError::config(
                "Timeframe hours must divide a day evenly (1, 2, 3, 4, 6, 8 or 12)",
            )
            .into());
        }

        if self.dashboard.poll_interval_seconds < 60 {
            return Err(
                DashboardError::config("Poll interval must be at least 60 seconds").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [&self.weather.base_url, &self.weather.geocoding_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "API base URL '{url}' must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
