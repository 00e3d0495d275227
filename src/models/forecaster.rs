//! The black-box forecaster contract shared by every weather variable.

use crate::models::error::ModelError;
use chrono::NaiveDate;

/// One predicted day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Point estimate.
    pub estimate: f64,
    /// Lower bound of the uncertainty interval.
    pub lower: f64,
    /// Upper bound of the uncertainty interval.
    pub upper: f64,
}

impl ForecastPoint {
    /// A point without an uncertainty band.
    pub fn exact(date: NaiveDate, estimate: f64) -> Self {
        Self {
            date,
            estimate,
            lower: estimate,
            upper: estimate,
        }
    }
}

/// An ordered sequence of daily predictions produced by a [`Forecaster`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// The last `count` points, or every point if there are fewer.
    pub fn tail(&self, count: usize) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(count);
        &self.points[start..]
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<ForecastPoint> for ForecastSeries {
    fn from_iter<I: IntoIterator<Item = ForecastPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A trained univariate model for one weather variable.
///
/// `predict_series(steps)` returns a daily series that ends `steps` days after
/// the forecaster's own last training date. Implementations may include
/// in-sample (history) rows before the future ones; callers only rely on the
/// trailing rows. Implementations must be deterministic for a given `steps`.
///
/// The trait is object-safe; the registry stores `Arc<dyn Forecaster>`.
pub trait Forecaster: Send + Sync {
    fn predict_series(&self, steps: usize) -> Result<ForecastSeries, ModelError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_is_clamped() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        let series: ForecastSeries = start
            .iter_days()
            .take(5)
            .enumerate()
            .map(|(i, d)| ForecastPoint::exact(d, i as f64))
            .collect();

        assert_eq!(series.tail(2).len(), 2);
        assert_eq!(series.tail(2)[0].estimate, 3.0);
        assert_eq!(series.tail(50).len(), 5);
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2017, 1, 5));
        assert!(ForecastSeries::default().tail(3).is_empty());
    }
}
