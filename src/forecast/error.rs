use crate::models::error::ModelError;
use crate::types::weather_variable::WeatherVariable;
use chrono::NaiveDate;
use thiserror::Error;

/// Why four forecasts could not be merged into one table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignmentMismatch {
    #[error("{variable} forecaster returned {found} rows, {expected} are needed")]
    ShortSeries {
        variable: WeatherVariable,
        expected: usize,
        found: usize,
    },

    #[error("{variable} forecast dates are not strictly increasing at {date}")]
    UnorderedDates {
        variable: WeatherVariable,
        date: NaiveDate,
    },

    #[error("{variable} forecast covers {found_start}..={found_end}, {reference} covers {expected_start}..={expected_end}")]
    DateMismatch {
        variable: WeatherVariable,
        reference: WeatherVariable,
        expected_start: NaiveDate,
        expected_end: NaiveDate,
        found_start: NaiveDate,
        found_end: NaiveDate,
    },

    #[error("No {variable} value for {date} after joining")]
    MissingCell {
        variable: WeatherVariable,
        date: NaiveDate,
    },

    #[error("Aligned table has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },
}

/// Errors from a single forecast recomputation.
///
/// None of these are fatal to a session: the caller keeps showing the previous
/// table (see [`crate::ForecastDisplayState`]).
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Window length {window} is outside the allowed range 1..={max}")]
    InvalidWindow { window: u32, max: u32 },

    #[error("Target date {target} lies {day_offset} days from the last observation {last_observed}, beyond what a {window}-day window covers")]
    InvalidHorizon {
        last_observed: NaiveDate,
        target: NaiveDate,
        day_offset: i64,
        window: u32,
        total_steps: i64,
    },

    #[error("Forecast alignment failed: {0}")]
    AlignmentMismatch(#[from] AlignmentMismatch),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ForecastError {
    /// True for errors caused by user input, which are fixed by choosing a
    /// different target date or window.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ForecastError::InvalidWindow { .. } | ForecastError::InvalidHorizon { .. }
        )
    }
}
