//! Defines the four weather variables that each have their own forecaster,
//! together with their display names, units and default column names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four independently forecast weather variables.
///
/// The declaration order is the column order of an
/// [`crate::AlignedForecastTable`]: temperature, humidity, wind speed, pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherVariable {
    /// Daily mean temperature in degrees Celsius.
    Temperature,
    /// Daily mean relative humidity in percent.
    Humidity,
    /// Daily mean wind speed in km/h.
    WindSpeed,
    /// Daily mean atmospheric pressure in hPa.
    Pressure,
}

impl WeatherVariable {
    /// All variables in table column order.
    pub const ALL: [WeatherVariable; 4] = [
        WeatherVariable::Temperature,
        WeatherVariable::Humidity,
        WeatherVariable::WindSpeed,
        WeatherVariable::Pressure,
    ];

    /// Registry slot name, also used as the artifact file stem.
    pub fn slot(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "temperature",
            WeatherVariable::Humidity => "humidity",
            WeatherVariable::WindSpeed => "wind_speed",
            WeatherVariable::Pressure => "pressure",
        }
    }

    /// Human readable name without unit, e.g. `Wind Speed`.
    pub fn display_name(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "Temperature",
            WeatherVariable::Humidity => "Humidity",
            WeatherVariable::WindSpeed => "Wind Speed",
            WeatherVariable::Pressure => "Pressure",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "°C",
            WeatherVariable::Humidity => "%",
            WeatherVariable::WindSpeed => "km/h",
            WeatherVariable::Pressure => "hPa",
        }
    }

    /// Column name used in the exported outlook frame, e.g. `Humidity (%)`.
    pub fn column_name(&self) -> String {
        format!("{} ({})", self.display_name(), self.unit())
    }

    /// Default column holding this variable in the historical CSV.
    pub(crate) fn default_historical_column(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "meantemp",
            WeatherVariable::Humidity => "humidity",
            WeatherVariable::WindSpeed => "wind_speed",
            WeatherVariable::Pressure => "meanpressure",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            WeatherVariable::Temperature => 0,
            WeatherVariable::Humidity => 1,
            WeatherVariable::WindSpeed => 2,
            WeatherVariable::Pressure => 3,
        }
    }
}

/// Formats a `WeatherVariable` using its display name.
///
/// # Examples
///
/// ```
/// use weather_outlook::WeatherVariable;
///
/// assert_eq!(WeatherVariable::WindSpeed.to_string(), "Wind Speed");
/// ```
impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Parses a variable name, case-insensitively.
///
/// Accepts the slot names (`temperature`, `humidity`, `wind_speed`, `pressure`)
/// as well as the display names and a few common aliases. On failure the
/// unrecognised input is returned as the error.
impl FromStr for WeatherVariable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "temperature" | "temp" => Ok(WeatherVariable::Temperature),
            "humidity" | "hum" => Ok(WeatherVariable::Humidity),
            "wind_speed" | "wind" => Ok(WeatherVariable::WindSpeed),
            "pressure" => Ok(WeatherVariable::Pressure),
            _ => Err(s.to_string()),
        }
    }
}
