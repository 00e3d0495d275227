//! The `ModelRegistry` holds one forecaster per weather variable.

use crate::models::additive::AdditiveModel;
use crate::models::artifact::{self, ArtifactFormat};
use crate::models::error::ModelError;
use crate::models::forecaster::Forecaster;
use crate::types::weather_variable::WeatherVariable;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// One forecaster per [`WeatherVariable`].
///
/// A registry is built explicitly (there is no process-wide instance) and is
/// read-only once a session starts. Forecasters are stored behind `Arc` so a
/// loaded registry can be cloned cheaply into concurrent sessions.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    forecasters: HashMap<WeatherVariable, Arc<dyn Forecaster>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes the artifact at `source` and registers it for `variable_name`.
    ///
    /// The format is chosen from the extension (`.json` or `.bin`). Loading is
    /// idempotent: a second load for the same variable replaces the first.
    ///
    /// # Errors
    ///
    /// * [`ModelError::UnknownVariable`] if `variable_name` is not one of the four slots.
    /// * [`ModelError::ArtifactRead`], [`ModelError::UnsupportedFormat`],
    ///   [`ModelError::JsonDecode`], [`ModelError::BincodeDecode`] if the artifact is unreadable.
    /// * [`ModelError::InvalidModel`] or [`ModelError::VariableMismatch`] if it decodes
    ///   but does not describe a valid forecaster for that variable.
    pub fn load(&mut self, variable_name: &str, source: &Path) -> Result<(), ModelError> {
        let variable = Self::parse_variable(variable_name)?;
        let model = artifact::read(source)?;
        if model.variable != variable {
            return Err(ModelError::VariableMismatch {
                path: source.to_path_buf(),
                expected: variable,
                found: model.variable,
            });
        }
        info!(
            "Loaded {} model from {} (history {} to {})",
            variable,
            source.display(),
            model.history_start,
            model.history_end
        );
        self.register(variable, Arc::new(model));
        Ok(())
    }

    /// Loads `<slot>.json` or `<slot>.bin` from `dir` for all four variables.
    ///
    /// JSON wins when both exist.
    pub fn load_dir(dir: &Path) -> Result<Self, ModelError> {
        let mut registry = Self::new();
        for variable in WeatherVariable::ALL {
            let path = ArtifactFormat::ALL
                .iter()
                .map(|format| dir.join(format!("{}.{}", variable.slot(), format.extension())))
                .find(|path| path.is_file())
                .ok_or_else(|| ModelError::ArtifactNotFound {
                    variable,
                    dir: dir.to_path_buf(),
                })?;
            registry.load(variable.slot(), &path)?;
        }
        Ok(registry)
    }

    /// Writes `model` to `path`, encoded according to the path's extension.
    pub fn save(model: &AdditiveModel, path: &Path) -> Result<(), ModelError> {
        model.validate()?;
        artifact::write(model, path)?;
        debug!("Wrote {} model to {}", model.variable, path.display());
        Ok(())
    }

    /// Registers any forecaster, replacing a previous one for `variable`.
    pub fn register(&mut self, variable: WeatherVariable, forecaster: Arc<dyn Forecaster>) {
        if self.forecasters.insert(variable, forecaster).is_some() {
            debug!("Replaced forecaster for {}", variable);
        }
    }

    /// Looks up a forecaster by name (see [`WeatherVariable`]'s `FromStr`).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownVariable`] if the name is not recognised or
    /// nothing is registered for it.
    pub fn get(&self, variable_name: &str) -> Result<&dyn Forecaster, ModelError> {
        let variable = Self::parse_variable(variable_name)?;
        self.forecasters
            .get(&variable)
            .map(|f| f.as_ref())
            .ok_or_else(|| ModelError::UnknownVariable(variable_name.to_string()))
    }

    pub fn forecaster(&self, variable: WeatherVariable) -> Result<&dyn Forecaster, ModelError> {
        self.forecasters
            .get(&variable)
            .map(|f| f.as_ref())
            .ok_or_else(|| ModelError::UnknownVariable(variable.slot().to_string()))
    }

    /// True when every variable has a forecaster.
    pub fn is_complete(&self) -> bool {
        WeatherVariable::ALL
            .iter()
            .all(|v| self.forecasters.contains_key(v))
    }

    pub fn len(&self) -> usize {
        self.forecasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecasters.is_empty()
    }

    fn parse_variable(variable_name: &str) -> Result<WeatherVariable, ModelError> {
        variable_name.parse().map_err(ModelError::UnknownVariable)
    }
}
