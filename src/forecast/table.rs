//! Contains `AlignedForecastTable`, the merged four-variable outlook handed to
//! the presentation layer.

use crate::types::weather_variable::WeatherVariable;
use crate::utils::to_epoch_days;
use chrono::NaiveDate;
use polars::prelude::*;

/// One date of the aligned outlook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
}

impl ForecastRow {
    pub(crate) fn from_values(date: NaiveDate, values: [f64; 4]) -> Self {
        Self {
            date,
            temperature: values[0],
            humidity: values[1],
            wind_speed: values[2],
            pressure: values[3],
        }
    }

    pub fn value(&self, variable: WeatherVariable) -> f64 {
        match variable {
            WeatherVariable::Temperature => self.temperature,
            WeatherVariable::Humidity => self.humidity,
            WeatherVariable::WindSpeed => self.wind_speed,
            WeatherVariable::Pressure => self.pressure,
        }
    }
}

/// A date-indexed table with one column per [`WeatherVariable`].
///
/// Built only by [`crate::ForecastAligner::align`], which guarantees that rows
/// are in strictly increasing date order, that every cell is filled, and that
/// there are exactly `window_length + 1` rows. The first row is the anchor
/// (conditions on the target date); the rest form the outlook.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedForecastTable {
    rows: Vec<ForecastRow>,
}

impl AlignedForecastTable {
    pub(crate) fn new(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// The anchor row. `None` only for a table that was never aligned.
    pub fn anchor(&self) -> Option<&ForecastRow> {
        self.rows.first()
    }

    /// The forward-looking rows after the anchor, in date order.
    pub fn outlook(&self) -> &[ForecastRow] {
        self.rows.get(1..).unwrap_or_default()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// All values of one variable in date order.
    pub fn column(&self, variable: WeatherVariable) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(variable)).collect()
    }

    /// Number of forward-looking rows.
    pub fn window_length(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exports the table as a polars `DataFrame`.
    ///
    /// The first column is `date` (`DataType::Date`), followed by the four
    /// variables named by [`WeatherVariable::column_name`], e.g. `Temperature (°C)`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let epoch_days: Vec<i32> = self.rows.iter().map(|r| to_epoch_days(r.date)).collect();
        let mut columns =
            vec![Column::new("date".into(), epoch_days).cast(&DataType::Date)?];
        for variable in WeatherVariable::ALL {
            columns.push(Column::new(
                variable.column_name().into(),
                self.column(variable),
            ));
        }
        DataFrame::new(columns)
    }
}
