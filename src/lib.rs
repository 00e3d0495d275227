mod dataset;
mod display_state;
mod error;
mod forecast;
mod models;
mod outlook;
mod settings;
mod types;
mod utils;

pub use error::OutlookError;
pub use outlook::*;
pub use settings::{HistoricalColumns, OutlookSettings};

pub use display_state::ForecastDisplayState;

pub use dataset::error::DatasetError;
pub use dataset::historical::{HistoricalDataset, Observation};

pub use models::additive::{AdditiveModel, Changepoint, PiecewiseTrend, Seasonality};
pub use models::artifact::ArtifactFormat;
pub use models::error::ModelError;
pub use models::forecaster::{ForecastPoint, ForecastSeries, Forecaster};
pub use models::registry::ModelRegistry;

pub use forecast::aligner::ForecastAligner;
pub use forecast::error::{AlignmentMismatch, ForecastError};
pub use forecast::horizon::{Horizon, HorizonCalculator};
pub use forecast::summary::{DayCard, ForecastSummary, TemperatureGauge};
pub use forecast::table::{AlignedForecastTable, ForecastRow};

pub use types::sky_outlook::{SkyOutlook, TemperatureBand};
pub use types::weather_variable::WeatherVariable;
