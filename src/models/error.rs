use crate::types::weather_variable::WeatherVariable;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact '{0}'")]
    ArtifactRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write model artifact '{0}'")]
    ArtifactWrite(PathBuf, #[source] std::io::Error),

    #[error("Unsupported model artifact format for '{0}', expected .json or .bin")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to decode JSON model artifact '{0}'")]
    JsonDecode(PathBuf, #[source] serde_json::Error),

    #[error("Failed to decode bincode model artifact '{0}'")]
    BincodeDecode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to encode model artifact")]
    JsonEncode(#[source] serde_json::Error),

    #[error("Failed to encode model artifact")]
    BincodeEncode(#[source] Box<bincode::error::EncodeError>),

    #[error("Model for {variable} is structurally invalid: {message}")]
    InvalidModel {
        variable: WeatherVariable,
        message: String,
    },

    #[error("Artifact '{path}' holds a {found} model, expected {expected}")]
    VariableMismatch {
        path: PathBuf,
        expected: WeatherVariable,
        found: WeatherVariable,
    },

    #[error("No model registered for weather variable '{0}'")]
    UnknownVariable(String),

    #[error("No artifact for {variable} found in '{dir}'")]
    ArtifactNotFound {
        variable: WeatherVariable,
        dir: PathBuf,
    },

    #[error("{forecaster} could not predict {steps} steps: {message}")]
    Prediction {
        forecaster: String,
        steps: usize,
        message: String,
    },
}
