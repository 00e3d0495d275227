//! Runs every forecaster for one horizon and merges their trailing windows into
//! a single [`AlignedForecastTable`].

use crate::forecast::error::{AlignmentMismatch, ForecastError};
use crate::forecast::horizon::Horizon;
use crate::forecast::table::{AlignedForecastTable, ForecastRow};
use crate::models::forecaster::ForecastPoint;
use crate::models::registry::ModelRegistry;
use crate::types::weather_variable::WeatherVariable;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Aligns the four per-variable forecasts on a shared date index.
///
/// Alignment either produces a complete table or fails; a table with gaps is
/// never returned and no value is filled in or interpolated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastAligner;

impl ForecastAligner {
    pub fn new() -> Self {
        Self
    }

    /// Runs all four forecasters for `horizon` and merges the results.
    ///
    /// Each forecaster is asked for `horizon.total_steps` steps; the trailing
    /// `window_length + 1` rows of each result are kept and outer-joined on date.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::Model`] if a forecaster is missing or fails.
    /// * [`ForecastError::AlignmentMismatch`] if any series is too short, has
    ///   unordered dates, or covers different dates than the others, or if the
    ///   joined table is not exactly `window_length + 1` complete rows.
    pub fn align(
        &self,
        registry: &ModelRegistry,
        horizon: &Horizon,
    ) -> Result<AlignedForecastTable, ForecastError> {
        let rows = horizon.row_count();
        let mut windows: Vec<(WeatherVariable, Vec<ForecastPoint>)> =
            Vec::with_capacity(WeatherVariable::ALL.len());

        for variable in WeatherVariable::ALL {
            let forecaster = registry.forecaster(variable)?;
            let series = forecaster.predict_series(horizon.total_steps)?;
            debug!(
                "{} produced {} rows ending {:?} for {} steps",
                forecaster.name(),
                series.len(),
                series.last_date(),
                horizon.total_steps
            );

            if series.len() < rows {
                let mismatch = AlignmentMismatch::ShortSeries {
                    variable,
                    expected: rows,
                    found: series.len(),
                };
                warn!("{}", mismatch);
                return Err(mismatch.into());
            }
            windows.push((variable, series.tail(rows).to_vec()));
        }

        let table = Self::join(&windows, rows).map_err(|mismatch| {
            warn!("{}", mismatch);
            mismatch
        })?;
        if let Some(anchor) = table.anchor() {
            if anchor.date != horizon.target {
                warn!(
                    "Anchor row falls on {} but {} was requested; forecaster history ends differ from the dataset",
                    anchor.date, horizon.target
                );
            }
        }
        Ok(table)
    }

    /// Outer-joins trimmed windows on date and enforces the table invariants.
    fn join(
        windows: &[(WeatherVariable, Vec<ForecastPoint>)],
        rows: usize,
    ) -> Result<AlignedForecastTable, AlignmentMismatch> {
        for (variable, points) in windows {
            for pair in points.windows(2) {
                if pair[1].date <= pair[0].date {
                    return Err(AlignmentMismatch::UnorderedDates {
                        variable: *variable,
                        date: pair[1].date,
                    });
                }
            }
        }

        if let Some((reference, reference_points)) = windows.first() {
            for (variable, points) in &windows[1..] {
                let same_dates = points.len() == reference_points.len()
                    && points
                        .iter()
                        .zip(reference_points)
                        .all(|(a, b)| a.date == b.date);
                if !same_dates {
                    return Err(Self::date_mismatch(*reference, reference_points, *variable, points));
                }
            }
        }

        let mut joined: BTreeMap<chrono::NaiveDate, [Option<f64>; 4]> = BTreeMap::new();
        for (variable, points) in windows {
            for point in points {
                joined.entry(point.date).or_insert([None; 4])[variable.index()] =
                    Some(point.estimate);
            }
        }

        if joined.len() != rows {
            return Err(AlignmentMismatch::RowCount {
                expected: rows,
                found: joined.len(),
            });
        }

        joined
            .into_iter()
            .map(|(date, cells)| {
                let mut values = [0.0; 4];
                for variable in WeatherVariable::ALL {
                    values[variable.index()] = cells[variable.index()]
                        .ok_or(AlignmentMismatch::MissingCell { variable, date })?;
                }
                Ok(ForecastRow::from_values(date, values))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(AlignedForecastTable::new)
    }

    fn date_mismatch(
        reference: WeatherVariable,
        reference_points: &[ForecastPoint],
        variable: WeatherVariable,
        points: &[ForecastPoint],
    ) -> AlignmentMismatch {
        // Both windows are non-empty: every series was checked against `rows >= 1`.
        let span = |p: &[ForecastPoint]| match (p.first(), p.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => (chrono::NaiveDate::MIN, chrono::NaiveDate::MIN),
        };
        let (expected_start, expected_end) = span(reference_points);
        let (found_start, found_end) = span(points);
        AlignmentMismatch::DateMismatch {
            variable,
            reference,
            expected_start,
            expected_end,
            found_start,
            found_end,
        }
    }
}
