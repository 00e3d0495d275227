use crate::dataset::error::DatasetError;
use crate::forecast::error::ForecastError;
use crate::models::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutlookError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Invalid outlook settings")]
    InvalidSettings(#[source] ForecastError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
