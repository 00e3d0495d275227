//! Per-session view state: the last valid table plus the error, if any, of the
//! most recent recomputation.

use crate::forecast::error::ForecastError;
use crate::forecast::summary::ForecastSummary;
use crate::forecast::table::AlignedForecastTable;
use crate::outlook::WeatherOutlook;
use chrono::NaiveDate;
use log::warn;

/// What the presentation layer should currently show.
///
/// A failed recomputation never clears a previously shown table; it only sets
/// [`ForecastDisplayState::error`] so the view can flag the table as stale.
#[derive(Debug, Default)]
pub struct ForecastDisplayState {
    table: Option<AlignedForecastTable>,
    error: Option<ForecastError>,
    request: Option<(NaiveDate, u32)>,
}

impl ForecastDisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the table for a new target date / window.
    ///
    /// Returns `true` if the table was replaced.
    pub fn refresh(&mut self, outlook: &WeatherOutlook, target_date: NaiveDate, window_length: u32) -> bool {
        match outlook
            .forecast()
            .target_date(target_date)
            .window_length(window_length)
            .call()
        {
            Ok(table) => {
                self.table = Some(table);
                self.error = None;
                self.request = Some((target_date, window_length));
                true
            }
            Err(e) => {
                warn!(
                    "Forecast for {} ({} days) failed{}: {}",
                    target_date,
                    window_length,
                    if e.is_recoverable() { ", awaiting new input" } else { "" },
                    e
                );
                self.error = Some(e);
                false
            }
        }
    }

    /// The table to display, possibly from an earlier request.
    pub fn table(&self) -> Option<&AlignedForecastTable> {
        self.table.as_ref()
    }

    /// The error of the latest request, if it failed.
    pub fn error(&self) -> Option<&ForecastError> {
        self.error.as_ref()
    }

    /// `(target_date, window_length)` the displayed table was computed for.
    pub fn request(&self) -> Option<(NaiveDate, u32)> {
        self.request
    }

    /// True when a table is shown but the latest request failed.
    pub fn is_stale(&self) -> bool {
        self.table.is_some() && self.error.is_some()
    }

    pub fn summary(&self) -> Option<ForecastSummary> {
        self.table.as_ref().and_then(ForecastSummary::from_table)
    }
}
