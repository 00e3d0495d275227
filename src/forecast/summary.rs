//! Derived values the presentation layer shows next to the aligned table:
//! current conditions, daily cards and the temperature gauge.

use crate::forecast::table::{AlignedForecastTable, ForecastRow};
use crate::types::sky_outlook::{SkyOutlook, TemperatureBand};
use chrono::NaiveDate;

/// Most cards shown in one row of the outlook grid.
const MAX_CARD_COLUMNS: usize = 7;
/// Padding added below the minimum and above the maximum on the gauge axis.
const GAUGE_AXIS_PADDING: f64 = 5.0;

/// A single day in the outlook.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub date: NaiveDate,
    /// Abbreviated weekday, e.g. `Mon`.
    pub weekday: String,
    /// Zero-padded day of month, e.g. `08`.
    pub day_of_month: String,
    pub outlook: SkyOutlook,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
}

impl From<&ForecastRow> for DayCard {
    fn from(row: &ForecastRow) -> Self {
        Self {
            date: row.date,
            weekday: row.date.format("%a").to_string(),
            day_of_month: row.date.format("%d").to_string(),
            outlook: SkyOutlook::classify(row.temperature, row.humidity),
            temperature: row.temperature,
            humidity: row.humidity,
            wind_speed: row.wind_speed,
            pressure: row.pressure,
        }
    }
}

/// Temperature gauge for the anchor day, referenced against the table mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureGauge {
    pub value: f64,
    pub reference: f64,
    /// `value - reference`.
    pub delta: f64,
    pub axis_min: f64,
    pub axis_max: f64,
    pub band: TemperatureBand,
}

/// Everything the view needs besides the raw table.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub current: ForecastRow,
    pub cards: Vec<DayCard>,
    pub card_columns: usize,
    pub gauge: TemperatureGauge,
}

impl ForecastSummary {
    /// Summarises an aligned table. Returns `None` for an empty table.
    pub fn from_table(table: &AlignedForecastTable) -> Option<Self> {
        let current = *table.anchor()?;
        let cards: Vec<DayCard> = table.outlook().iter().map(DayCard::from).collect();
        let card_columns = cards.len().clamp(1, MAX_CARD_COLUMNS);

        let temperatures: Vec<f64> = table.rows().iter().map(|r| r.temperature).collect();
        let reference = temperatures.iter().sum::<f64>() / temperatures.len() as f64;
        let min = temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            current,
            cards,
            card_columns,
            gauge: TemperatureGauge {
                value: current.temperature,
                reference,
                delta: current.temperature - reference,
                axis_min: min - GAUGE_AXIS_PADDING,
                axis_max: max + GAUGE_AXIS_PADDING,
                band: TemperatureBand::from_celsius(current.temperature),
            },
        })
    }
}
