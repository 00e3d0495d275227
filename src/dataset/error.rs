use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying the historical observation series.
///
/// Every variant except [`DatasetError::EmptyDataset`] is a load failure and is
/// fatal to session start.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Historical data source '{0}' could not be opened")]
    SourceMissing(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse CSV historical data '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Required column '{column}' not found in historical data")]
    MissingColumn {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Unparseable date '{value}' at row {row}, expected YYYY-MM-DD")]
    InvalidDate { row: usize, value: String },

    #[error("Column '{column}' cannot be read as numeric values")]
    InvalidValue {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Duplicate date {date} at row {row}")]
    DuplicateDate { row: usize, date: NaiveDate },

    #[error("Date {date} at row {row} is earlier than the preceding date {previous}")]
    NonMonotonicDate {
        row: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("Historical data source '{0}' contains no rows")]
    EmptySource(PathBuf),

    #[error("Historical dataset has no observations")]
    EmptyDataset,

    #[error("Failed processing historical DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
