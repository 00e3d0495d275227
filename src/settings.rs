//! Configuration for a [`crate::WeatherOutlook`] session.

use crate::forecast::error::ForecastError;
use crate::types::weather_variable::WeatherVariable;
use bon::Builder;

/// Names of the columns read from the historical CSV.
///
/// Defaults match the daily Delhi climate layout:
/// `date,meantemp,humidity,wind_speed,meanpressure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalColumns {
    date: String,
    variables: [String; 4],
}

impl HistoricalColumns {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn variable(&self, variable: WeatherVariable) -> &str {
        &self.variables[variable.index()]
    }

    pub fn with_date_column(mut self, name: impl Into<String>) -> Self {
        self.date = name.into();
        self
    }

    pub fn with_variable_column(mut self, variable: WeatherVariable, name: impl Into<String>) -> Self {
        self.variables[variable.index()] = name.into();
        self
    }
}

impl Default for HistoricalColumns {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            variables: WeatherVariable::ALL.map(|v| v.default_historical_column().to_string()),
        }
    }
}

/// Session settings.
///
/// # Examples
///
/// ```
/// use weather_outlook::OutlookSettings;
///
/// let settings = OutlookSettings::builder().default_window_length(5).build();
/// assert_eq!(settings.max_window_length, 10);
/// assert_eq!(settings.default_window_length, 5);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct OutlookSettings {
    /// Largest accepted display window, in days.
    #[builder(default = 10)]
    pub max_window_length: u32,
    /// Window used when a request does not name one.
    #[builder(default = 7)]
    pub default_window_length: u32,
    /// Column layout of the historical CSV.
    #[builder(default)]
    pub columns: HistoricalColumns,
}

impl OutlookSettings {
    /// Checks that the default window lies within `1..=max_window_length`.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.max_window_length == 0
            || self.default_window_length == 0
            || self.default_window_length > self.max_window_length
        {
            return Err(ForecastError::InvalidWindow {
                window: self.default_window_length,
                max: self.max_window_length,
            });
        }
        Ok(())
    }
}

impl Default for OutlookSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = OutlookSettings::default();
        assert_eq!(settings.max_window_length, 10);
        assert_eq!(settings.default_window_length, 7);
        assert_eq!(settings.columns.date(), "date");
        assert_eq!(settings.columns.variable(WeatherVariable::Pressure), "meanpressure");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_window_above_max_is_rejected() {
        let settings = OutlookSettings::builder()
            .max_window_length(5)
            .default_window_length(7)
            .build();
        assert!(matches!(
            settings.validate(),
            Err(ForecastError::InvalidWindow { window: 7, max: 5 })
        ));
    }

    #[test]
    fn test_column_overrides() {
        let columns = HistoricalColumns::default()
            .with_date_column("day")
            .with_variable_column(WeatherVariable::Temperature, "tavg");
        assert_eq!(columns.date(), "day");
        assert_eq!(columns.variable(WeatherVariable::Temperature), "tavg");
        assert_eq!(columns.variable(WeatherVariable::Humidity), "humidity");
    }
}
