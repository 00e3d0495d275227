//! The serialized forecaster used for every weather variable: a piecewise
//! linear trend plus additive Fourier seasonalities, evaluated on a daily grid
//! that covers the training history and the requested future steps.

use crate::models::error::ModelError;
use crate::models::forecaster::{ForecastPoint, ForecastSeries, Forecaster};
use crate::types::weather_variable::WeatherVariable;
use crate::utils::{daily_range, days_between, to_epoch_days};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

/// A change in trend slope starting on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Changepoint {
    pub date: NaiveDate,
    /// Added to the trend rate (per day) from `date` onwards.
    pub rate_delta: f64,
}

/// Continuous piecewise linear trend over days since `history_start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseTrend {
    /// Value on `history_start`.
    pub offset: f64,
    /// Base slope per day.
    pub rate: f64,
    #[serde(default)]
    pub changepoints: Vec<Changepoint>,
}

impl PiecewiseTrend {
    pub fn linear(offset: f64, rate: f64) -> Self {
        Self {
            offset,
            rate,
            changepoints: Vec::new(),
        }
    }

    fn value(&self, history_start: NaiveDate, date: NaiveDate) -> f64 {
        let t = days_between(history_start, date) as f64;
        let bends: f64 = self
            .changepoints
            .iter()
            .map(|cp| {
                let t_cp = days_between(history_start, cp.date) as f64;
                if t >= t_cp {
                    cp.rate_delta * (t - t_cp)
                } else {
                    0.0
                }
            })
            .sum();
        self.offset + self.rate * t + bends
    }
}

/// An additive Fourier seasonality.
///
/// `coefficients` holds `(sin, cos)` pairs for orders `1..=N`, evaluated on days
/// since 1970-01-01 so that models trained on different windows share phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub name: String,
    pub period_days: f64,
    pub coefficients: Vec<f64>,
}

impl Seasonality {
    fn value(&self, date: NaiveDate) -> f64 {
        let t = to_epoch_days(date) as f64;
        self.coefficients
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let x = 2.0 * PI * (i as f64 + 1.0) * t / self.period_days;
                pair[0] * x.sin() + pair.get(1).copied().unwrap_or(0.0) * x.cos()
            })
            .sum()
    }
}

fn default_interval_width() -> f64 {
    0.8
}

/// A trained additive model for one weather variable.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_outlook::{AdditiveModel, Forecaster, PiecewiseTrend, WeatherVariable};
///
/// let start = NaiveDate::from_ymd_opt(2016, 12, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
/// let model = AdditiveModel::new(WeatherVariable::Pressure, start, end, PiecewiseTrend::linear(1015.0, 0.0));
///
/// let series = model.predict_series(7).unwrap();
/// assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2017, 1, 8));
/// assert_eq!(series.len(), 32 + 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveModel {
    pub variable: WeatherVariable,
    pub history_start: NaiveDate,
    pub history_end: NaiveDate,
    pub trend: PiecewiseTrend,
    #[serde(default)]
    pub seasonalities: Vec<Seasonality>,
    /// Standard deviation of the training residuals.
    #[serde(default)]
    pub sigma_obs: f64,
    /// Coverage of the `lower..upper` band, in `(0, 1)`.
    #[serde(default = "default_interval_width")]
    pub interval_width: f64,
}

impl AdditiveModel {
    pub fn new(
        variable: WeatherVariable,
        history_start: NaiveDate,
        history_end: NaiveDate,
        trend: PiecewiseTrend,
    ) -> Self {
        Self {
            variable,
            history_start,
            history_end,
            trend,
            seasonalities: Vec::new(),
            sigma_obs: 0.0,
            interval_width: default_interval_width(),
        }
    }

    pub fn with_seasonality(mut self, name: &str, period_days: f64, coefficients: Vec<f64>) -> Self {
        self.seasonalities.push(Seasonality {
            name: name.to_string(),
            period_days,
            coefficients,
        });
        self
    }

    pub fn with_uncertainty(mut self, sigma_obs: f64, interval_width: f64) -> Self {
        self.sigma_obs = sigma_obs;
        self.interval_width = interval_width;
        self
    }

    /// Number of in-sample days included at the head of every prediction.
    pub fn history_len(&self) -> usize {
        (days_between(self.history_start, self.history_end) + 1).max(0) as usize
    }

    /// Checks the structural invariants a deserialized artifact must satisfy.
    pub fn validate(&self) -> Result<(), ModelError> {
        let invalid = |message: String| ModelError::InvalidModel {
            variable: self.variable,
            message,
        };

        if self.history_start > self.history_end {
            return Err(invalid(format!(
                "history_start {} is after history_end {}",
                self.history_start, self.history_end
            )));
        }
        if !self.trend.offset.is_finite() || !self.trend.rate.is_finite() {
            return Err(invalid("trend parameters must be finite".to_string()));
        }
        for pair in self.trend.changepoints.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(invalid(format!(
                    "changepoint {} does not follow {}",
                    pair[1].date, pair[0].date
                )));
            }
        }
        if self.trend.changepoints.iter().any(|cp| !cp.rate_delta.is_finite()) {
            return Err(invalid("changepoint deltas must be finite".to_string()));
        }
        for seasonality in &self.seasonalities {
            if !(seasonality.period_days.is_finite() && seasonality.period_days > 0.0) {
                return Err(invalid(format!(
                    "seasonality '{}' has non-positive period {}",
                    seasonality.name, seasonality.period_days
                )));
            }
            if seasonality.coefficients.is_empty() || seasonality.coefficients.len() % 2 != 0 {
                return Err(invalid(format!(
                    "seasonality '{}' needs (sin, cos) coefficient pairs, got {}",
                    seasonality.name,
                    seasonality.coefficients.len()
                )));
            }
            if seasonality.coefficients.iter().any(|c| !c.is_finite()) {
                return Err(invalid(format!(
                    "seasonality '{}' has non-finite coefficients",
                    seasonality.name
                )));
            }
        }
        if !(self.sigma_obs.is_finite() && self.sigma_obs >= 0.0) {
            return Err(invalid(format!("sigma_obs {} must be >= 0", self.sigma_obs)));
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(invalid(format!(
                "interval_width {} must be in (0, 1)",
                self.interval_width
            )));
        }
        Ok(())
    }

    fn estimate(&self, date: NaiveDate) -> f64 {
        let seasonal: f64 = self.seasonalities.iter().map(|s| s.value(date)).sum();
        self.trend.value(self.history_start, date) + seasonal
    }

    /// Two-sided standard normal quantile for the configured interval width.
    fn z_score(&self) -> Result<f64, ModelError> {
        let normal = Normal::new(0.0, 1.0).map_err(|e| ModelError::InvalidModel {
            variable: self.variable,
            message: e.to_string(),
        })?;
        Ok(normal.inverse_cdf(0.5 + self.interval_width / 2.0))
    }
}

impl Forecaster for AdditiveModel {
    fn predict_series(&self, steps: usize) -> Result<ForecastSeries, ModelError> {
        let total = self.history_len() + steps;
        if self
            .history_end
            .checked_add_days(chrono::Days::new(steps as u64))
            .is_none()
        {
            return Err(ModelError::Prediction {
                forecaster: self.name().to_string(),
                steps,
                message: "horizon exceeds the supported calendar range".to_string(),
            });
        }

        let margin = self.z_score()? * self.sigma_obs;
        Ok(daily_range(self.history_start, total)
            .map(|date| {
                let estimate = self.estimate(date);
                ForecastPoint {
                    date,
                    estimate,
                    lower: estimate - margin,
                    upper: estimate + margin,
                }
            })
            .collect())
    }

    fn name(&self) -> &str {
        self.variable.slot()
    }
}
