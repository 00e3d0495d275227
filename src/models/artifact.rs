//! Reading and writing `AdditiveModel` artifacts as JSON or bincode.

use crate::models::additive::AdditiveModel;
use crate::models::error::ModelError;
use bincode::config::{Configuration, Fixint, LittleEndian};
use std::path::Path;

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// On-disk encoding of a model artifact, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFormat {
    /// `.json`, human readable.
    Json,
    /// `.bin`, bincode with fixed-width little-endian integers.
    Bincode,
}

impl ArtifactFormat {
    pub const ALL: [ArtifactFormat; 2] = [ArtifactFormat::Json, ArtifactFormat::Bincode];

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::Bincode => "bin",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(ArtifactFormat::Json),
            "bin" => Some(ArtifactFormat::Bincode),
            _ => None,
        }
    }
}

pub(crate) fn decode(path: &Path, bytes: &[u8]) -> Result<AdditiveModel, ModelError> {
    let format =
        ArtifactFormat::from_path(path).ok_or_else(|| ModelError::UnsupportedFormat(path.to_path_buf()))?;
    match format {
        ArtifactFormat::Json => serde_json::from_slice::<AdditiveModel>(bytes)
            .map_err(|e| ModelError::JsonDecode(path.to_path_buf(), e)),
        ArtifactFormat::Bincode => {
            let (model, _) = bincode::serde::decode_from_slice::<AdditiveModel, _>(bytes, BINCODE_CONFIG)
                .map_err(|e| ModelError::BincodeDecode(path.to_path_buf(), Box::from(e)))?;
            Ok(model)
        }
    }
}

pub(crate) fn encode(model: &AdditiveModel, format: ArtifactFormat) -> Result<Vec<u8>, ModelError> {
    match format {
        ArtifactFormat::Json => serde_json::to_vec_pretty(model).map_err(ModelError::JsonEncode),
        ArtifactFormat::Bincode => bincode::serde::encode_to_vec(model, BINCODE_CONFIG)
            .map_err(|e| ModelError::BincodeEncode(Box::new(e))),
    }
}

/// Reads and validates one artifact.
pub(crate) fn read(path: &Path) -> Result<AdditiveModel, ModelError> {
    let bytes = std::fs::read(path).map_err(|e| ModelError::ArtifactRead(path.to_path_buf(), e))?;
    let model = decode(path, &bytes)?;
    model.validate()?;
    Ok(model)
}

pub(crate) fn write(model: &AdditiveModel, path: &Path) -> Result<(), ModelError> {
    let format =
        ArtifactFormat::from_path(path).ok_or_else(|| ModelError::UnsupportedFormat(path.to_path_buf()))?;
    let bytes = encode(model, format)?;
    std::fs::write(path, bytes).map_err(|e| ModelError::ArtifactWrite(path.to_path_buf(), e))
}
