//! Temperature unit selection and conversion

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DashboardError;

/// Unit temperatures are displayed in. Provider data is always Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "F", alias = "f", alias = "fahrenheit")]
    Fahrenheit,
    #[serde(rename = "C", alias = "c", alias = "celsius")]
    Celsius,
}

impl TemperatureUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            "c" | "celsius" => Ok(Self::Celsius),
            other => Err(DashboardError::validation(format!(
                "unknown temperature unit '{other}', expected F or C"
            ))),
        }
    }
}

/// Convert Fahrenheit to whole degrees Celsius.
#[must_use]
pub fn f_to_c(fahrenheit: f64) -> i64 {
    ((fahrenheit - 32.0) * 5.0 / 9.0).round() as i64
}

/// Temperature as shown on the dashboard: rounded in the active unit.
#[must_use]
pub fn display_temperature(fahrenheit: f64, unit: TemperatureUnit) -> i64 {
    match unit {
        TemperatureUnit::Fahrenheit => fahrenheit.round() as i64,
        TemperatureUnit::Celsius => f_to_c(fahrenheit),
    }
}
