//! Converts a user-selected target date and display window into the number of
//! future steps every forecaster is asked for.

use crate::forecast::error::ForecastError;
use crate::utils::days_between;
use chrono::{Days, NaiveDate};
use log::debug;

/// The forecast horizon for one request.
///
/// Computed once and applied to all four forecasters so their trailing windows
/// line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Horizon {
    pub last_observed: NaiveDate,
    pub target: NaiveDate,
    /// `target - last_observed` in days; negative when the target lies in the history.
    pub day_offset: i64,
    pub window_length: u32,
    /// `day_offset + window_length`, never negative.
    pub total_steps: usize,
}

impl Horizon {
    /// Rows the aligned table must have: the anchor plus `window_length` days.
    pub fn row_count(&self) -> usize {
        self.window_length as usize + 1
    }

    /// Date the anchor row should fall on for a forecaster whose history ends
    /// on `last_observed`. Equal to `target`.
    pub fn expected_anchor(&self) -> Option<NaiveDate> {
        self.expected_end()?
            .checked_sub_days(Days::new(self.window_length as u64))
    }

    /// Last date a forecaster trained up to `last_observed` will produce.
    pub fn expected_end(&self) -> Option<NaiveDate> {
        self.last_observed
            .checked_add_days(Days::new(self.total_steps as u64))
    }
}

/// Validates request parameters and derives [`Horizon`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonCalculator {
    max_window_length: u32,
}

impl HorizonCalculator {
    pub fn new(max_window_length: u32) -> Self {
        Self { max_window_length }
    }

    pub fn max_window_length(&self) -> u32 {
        self.max_window_length
    }

    /// Computes the horizon for `target` and a window of `window_length` days.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InvalidWindow`] unless `1 <= window_length <= max_window_length`.
    /// * [`ForecastError::InvalidHorizon`] if `target` lies so far before
    ///   `last_observed` that `day_offset + window_length` is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use weather_outlook::HorizonCalculator;
    ///
    /// let last = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
    /// let target = NaiveDate::from_ymd_opt(2017, 1, 4).unwrap();
    /// let horizon = HorizonCalculator::new(10).compute(last, target, 7).unwrap();
    /// assert_eq!(horizon.day_offset, 3);
    /// assert_eq!(horizon.total_steps, 10);
    /// assert_eq!(horizon.row_count(), 8);
    /// ```
    pub fn compute(
        &self,
        last_observed: NaiveDate,
        target: NaiveDate,
        window_length: u32,
    ) -> Result<Horizon, ForecastError> {
        if window_length == 0 || window_length > self.max_window_length {
            return Err(ForecastError::InvalidWindow {
                window: window_length,
                max: self.max_window_length,
            });
        }

        let day_offset = days_between(last_observed, target);
        let total_steps = day_offset + window_length as i64;
        if total_steps < 0 {
            return Err(ForecastError::InvalidHorizon {
                last_observed,
                target,
                day_offset,
                window: window_length,
                total_steps,
            });
        }

        debug!(
            "Horizon for target {} from {}: offset {} + window {} = {} steps",
            target, last_observed, day_offset, window_length, total_steps
        );
        Ok(Horizon {
            last_observed,
            target,
            day_offset,
            window_length,
            total_steps: total_steps as usize,
        })
    }
}

impl Default for HorizonCalculator {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_target_on_last_observation() -> Result<(), ForecastError> {
        let horizon = HorizonCalculator::default().compute(day(2017, 1, 1), day(2017, 1, 1), 7)?;
        assert_eq!(horizon.day_offset, 0);
        assert_eq!(horizon.total_steps, 7);
        assert_eq!(horizon.row_count(), 8);
        assert_eq!(horizon.expected_end(), Some(day(2017, 1, 8)));
        assert_eq!(horizon.expected_anchor(), Some(day(2017, 1, 1)));
        Ok(())
    }

    #[test]
    fn test_future_targets_for_every_window() -> Result<(), ForecastError> {
        let calculator = HorizonCalculator::default();
        let last = day(2017, 1, 1);
        for offset in [0u64, 1, 30, 365, 1000] {
            let target = last + Days::new(offset);
            for window in 1..=10 {
                let horizon = calculator.compute(last, target, window)?;
                assert_eq!(horizon.total_steps, offset as usize + window as usize);
                assert!(horizon.total_steps >= window as usize);
                assert_eq!(horizon.expected_anchor(), Some(target));
            }
        }
        Ok(())
    }

    #[test]
    fn test_zero_total_steps_is_valid() -> Result<(), ForecastError> {
        let horizon = HorizonCalculator::default().compute(day(2017, 1, 1), day(2016, 12, 25), 7)?;
        assert_eq!(horizon.day_offset, -7);
        assert_eq!(horizon.total_steps, 0);
        assert_eq!(horizon.expected_end(), Some(day(2017, 1, 1)));
        assert_eq!(horizon.expected_anchor(), Some(day(2016, 12, 25)));
        Ok(())
    }

    #[test]
    fn test_negative_total_steps_is_rejected() {
        let result = HorizonCalculator::default().compute(day(2017, 1, 1), day(2016, 12, 20), 7);
        match result {
            Err(ForecastError::InvalidHorizon {
                day_offset,
                total_steps,
                ..
            }) => {
                assert_eq!(day_offset, -12);
                assert_eq!(total_steps, -5);
            }
            other => panic!("expected InvalidHorizon, got {:?}", other),
        }
    }

    #[test]
    fn test_window_bounds() {
        let calculator = HorizonCalculator::default();
        let last = day(2017, 1, 1);
        for window in [0, 11, 100] {
            let result = calculator.compute(last, last, window);
            assert!(
                matches!(result, Err(ForecastError::InvalidWindow { max: 10, .. })),
                "window {} should be rejected",
                window
            );
        }
        assert!(calculator.compute(last, last, 10).is_ok());
        assert!(calculator.compute(last, last, 1).is_ok());
    }

    #[test]
    fn test_invalid_input_is_recoverable() {
        let calculator = HorizonCalculator::default();
        let last = day(2017, 1, 1);
        assert!(calculator.compute(last, last, 0).unwrap_err().is_recoverable());
        assert!(calculator
            .compute(last, day(2016, 1, 1), 7)
            .unwrap_err()
            .is_recoverable());
    }
}
