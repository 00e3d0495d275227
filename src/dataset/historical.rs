//! Contains the `HistoricalDataset`, the immutable daily observation series the
//! forecasters were trained on.

use crate::dataset::error::DatasetError;
use crate::settings::HistoricalColumns;
use crate::types::weather_variable::WeatherVariable;
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// One day of historical observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    values: [Option<f64>; 4],
}

impl Observation {
    pub fn new(
        date: NaiveDate,
        temperature: Option<f64>,
        humidity: Option<f64>,
        wind_speed: Option<f64>,
        pressure: Option<f64>,
    ) -> Self {
        Self {
            date,
            values: [temperature, humidity, wind_speed, pressure],
        }
    }

    /// The observed value for `variable`, `None` if the source cell was empty.
    pub fn value(&self, variable: WeatherVariable) -> Option<f64> {
        self.values[variable.index()]
    }
}

/// An ordered, date-indexed sequence of daily observations.
///
/// Dates are unique and strictly increasing; both constructors reject anything
/// else. The dataset is read-only once built, so a single instance can be
/// shared between sessions.
#[derive(Debug, Clone)]
pub struct HistoricalDataset {
    source: Option<PathBuf>,
    observations: Vec<Observation>,
}

impl HistoricalDataset {
    /// Loads the historical series from a CSV file with a header row.
    ///
    /// The date column must hold `YYYY-MM-DD` dates. The four variable columns
    /// are cast to `f64`; empty cells become `None`, any other non-numeric cell
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::SourceMissing`] if the file cannot be opened,
    /// [`DatasetError::CsvRead`] if it is not valid CSV,
    /// [`DatasetError::MissingColumn`] if a configured column is absent,
    /// [`DatasetError::InvalidValue`] if a variable column holds non-numeric text,
    /// [`DatasetError::EmptySource`] if it has no data rows, and
    /// [`DatasetError::DuplicateDate`] / [`DatasetError::NonMonotonicDate`]
    /// if the dates are not strictly increasing.
    pub fn load(path: &Path, columns: &HistoricalColumns) -> Result<Self, DatasetError> {
        std::fs::metadata(path).map_err(|e| DatasetError::SourceMissing(path.to_path_buf(), e))?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| DatasetError::CsvRead {
                path: path.to_path_buf(),
                source: e,
            })?
            .finish()
            .map_err(|e| DatasetError::CsvRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        if df.height() == 0 {
            return Err(DatasetError::EmptySource(path.to_path_buf()));
        }
        debug!(
            "Read {} rows and {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        let dates = Self::parse_dates(&df, columns.date())?;
        let mut variable_values = Vec::with_capacity(WeatherVariable::ALL.len());
        for variable in WeatherVariable::ALL {
            variable_values.push(Self::numeric_column(&df, columns.variable(variable))?);
        }

        let observations = dates
            .into_iter()
            .enumerate()
            .map(|(row, date)| Observation {
                date,
                values: [
                    variable_values[0][row],
                    variable_values[1][row],
                    variable_values[2][row],
                    variable_values[3][row],
                ],
            })
            .collect();

        let mut dataset = Self::from_observations(observations)?;
        dataset.source = Some(path.to_path_buf());
        info!(
            "Loaded {} historical observations from {} ending {}",
            dataset.len(),
            path.display(),
            dataset.last_observed_date()?
        );
        Ok(dataset)
    }

    /// Builds a dataset from observations already in memory.
    ///
    /// An empty list is accepted; [`HistoricalDataset::last_observed_date`] then
    /// reports [`DatasetError::EmptyDataset`].
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self, DatasetError> {
        for (row, pair) in observations.windows(2).enumerate() {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current == previous {
                return Err(DatasetError::DuplicateDate {
                    row: row + 1,
                    date: current,
                });
            }
            if current < previous {
                return Err(DatasetError::NonMonotonicDate {
                    row: row + 1,
                    date: current,
                    previous,
                });
            }
        }
        Ok(Self {
            source: None,
            observations,
        })
    }

    /// The date of the most recent observation.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::EmptyDataset`] if there are no observations.
    pub fn last_observed_date(&self) -> Result<NaiveDate, DatasetError> {
        self.observations
            .last()
            .map(|o| o.date)
            .ok_or(DatasetError::EmptyDataset)
    }

    pub fn first_observed_date(&self) -> Result<NaiveDate, DatasetError> {
        self.observations
            .first()
            .map(|o| o.date)
            .ok_or(DatasetError::EmptyDataset)
    }

    /// Looks up the observation recorded on `date`.
    pub fn get(&self, date: NaiveDate) -> Option<&Observation> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|idx| &self.observations[idx])
    }

    /// The `(date, value)` series of a single variable.
    pub fn series(&self, variable: WeatherVariable) -> Vec<(NaiveDate, Option<f64>)> {
        self.observations
            .iter()
            .map(|o| (o.date, o.value(variable)))
            .collect()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The file this dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    fn parse_dates(df: &DataFrame, column: &str) -> Result<Vec<NaiveDate>, DatasetError> {
        let date_column = df
            .column(column)
            .map_err(|e| DatasetError::MissingColumn {
                column: column.to_string(),
                source: e,
            })?
            .cast(&DataType::String)?;

        date_column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                let raw = value.unwrap_or_default().trim();
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| DatasetError::InvalidDate {
                    row,
                    value: raw.to_string(),
                })
            })
            .collect()
    }

    fn numeric_column(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, DatasetError> {
        let values = df
            .column(column)
            .map_err(|e| DatasetError::MissingColumn {
                column: column.to_string(),
                source: e,
            })?
            .strict_cast(&DataType::Float64)
            .map_err(|e| DatasetError::InvalidValue {
                column: column.to_string(),
                source: e,
            })?;
        Ok(values.f64()?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_delhi_layout() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(
            "date,meantemp,humidity,wind_speed,meanpressure\n\
             2016-12-30,14.0,94.3,9.1,1017.0\n\
             2016-12-31,15.1,87.0,2.3,1016.1\n\
             2017-01-01,10.0,100.0,0.0,1016.0\n",
        );

        let dataset = HistoricalDataset::load(file.path(), &HistoricalColumns::default())?;

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.last_observed_date()?, day(2017, 1, 1));
        assert_eq!(dataset.first_observed_date()?, day(2016, 12, 30));
        assert_eq!(dataset.source(), Some(file.path()));

        let last = dataset.get(day(2016, 12, 31)).unwrap();
        assert_eq!(last.value(WeatherVariable::Humidity), Some(87.0));
        assert_eq!(last.value(WeatherVariable::Pressure), Some(1016.1));
        assert!(dataset.get(day(2017, 1, 2)).is_none());

        let wind = dataset.series(WeatherVariable::WindSpeed);
        assert_eq!(wind[2], (day(2017, 1, 1), Some(0.0)));
        Ok(())
    }

    #[test]
    fn test_integer_columns_are_cast_to_float() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(
            "date,meantemp,humidity,wind_speed,meanpressure\n\
             2017-01-01,10,100,0,1016\n",
        );
        let dataset = HistoricalDataset::load(file.path(), &HistoricalColumns::default())?;
        assert_eq!(
            dataset.observations()[0].value(WeatherVariable::Temperature),
            Some(10.0)
        );
        Ok(())
    }

    #[test]
    fn test_non_numeric_cells_rejected() {
        let file = write_csv(
            "date,meantemp,humidity,wind_speed,meanpressure\n\
             2017-01-01,10.0,abc,0.0,1016.0\n\
             2017-01-02,11.0,n/a,1.0,1015.0\n",
        );
        let result = HistoricalDataset::load(file.path(), &HistoricalColumns::default());
        match result {
            Err(DatasetError::InvalidValue { column, .. }) => assert_eq!(column, "humidity"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_cells_stay_missing() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(
            "date,meantemp,humidity,wind_speed,meanpressure\n\
             2017-01-01,10.0,,0.0,1016.0\n\
             2017-01-02,11.0,90.0,1.0,1015.0\n",
        );
        let dataset = HistoricalDataset::load(file.path(), &HistoricalColumns::default())?;
        assert_eq!(dataset.observations()[0].value(WeatherVariable::Humidity), None);
        assert_eq!(dataset.observations()[1].value(WeatherVariable::Humidity), Some(90.0));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = HistoricalDataset::load(
            Path::new("/definitely/not/here.csv"),
            &HistoricalColumns::default(),
        );
        assert!(matches!(result, Err(DatasetError::SourceMissing(..))));
    }

    #[test]
    fn test_header_only_source_is_empty() {
        let file = write_csv("date,meantemp,humidity,wind_speed,meanpressure\n");
        let result = HistoricalDataset::load(file.path(), &HistoricalColumns::default());
        assert!(matches!(result, Err(DatasetError::EmptySource(_))));
    }

    #[test]
    fn test_missing_variable_column() {
        let file = write_csv("date,meantemp,humidity,wind_speed\n2017-01-01,10.0,100.0,0.0\n");
        let result = HistoricalDataset::load(file.path(), &HistoricalColumns::default());
        match result {
            Err(DatasetError::MissingColumn { column, .. }) => assert_eq!(column, "meanpressure"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let file = write_csv(
            "date,meantemp,humidity,wind_speed,meanpressure\n\
             2017-01-01,10.0,100.0,0.0,1016.0\n\
             2017-01-01,11.0,90.0,1.0,1015.0\n",
        );
        let result = HistoricalDataset::load(file.path(), &HistoricalColumns::default());
        match result {
            Err(DatasetError::DuplicateDate { row, date }) => {
                assert_eq!(row, 1);
                assert_eq!(date, day(2017, 1, 1));
            }
            other => panic!("expected DuplicateDate, got {:?}", other),
        }
    }

    #[test]
    fn test_non_monotonic_dates_rejected() {
        let file = write_csv(
            "date,meantemp,humidity,wind_speed,meanpressure\n\
             2017-01-02,10.0,100.0,0.0,1016.0\n\
             2017-01-01,11.0,90.0,1.0,1015.0\n",
        );
        let result = HistoricalDataset::load(file.path(), &HistoricalColumns::default());
        assert!(matches!(
            result,
            Err(DatasetError::NonMonotonicDate { row: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let file = write_csv(
            "date,meantemp,humidity,wind_speed,meanpressure\n\
             01/02/2017,10.0,100.0,0.0,1016.0\n",
        );
        let result = HistoricalDataset::load(file.path(), &HistoricalColumns::default());
        match result {
            Err(DatasetError::InvalidDate { row, value }) => {
                assert_eq!(row, 0);
                assert_eq!(value, "01/02/2017");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_dataset_has_no_last_date() {
        let dataset = HistoricalDataset::from_observations(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert!(matches!(
            dataset.last_observed_date(),
            Err(DatasetError::EmptyDataset)
        ));
    }
}
