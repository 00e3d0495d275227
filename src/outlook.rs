//! This module provides the main entry point: a `WeatherOutlook` session that
//! owns the historical dataset and the four forecasters and answers forecast
//! requests for a target date and window length.

use crate::dataset::historical::HistoricalDataset;
use crate::error::OutlookError;
use crate::forecast::aligner::ForecastAligner;
use crate::forecast::error::ForecastError;
use crate::forecast::horizon::{Horizon, HorizonCalculator};
use crate::forecast::table::AlignedForecastTable;
use crate::models::error::ModelError;
use crate::models::registry::ModelRegistry;
use crate::settings::OutlookSettings;
use crate::types::weather_variable::WeatherVariable;
use bon::bon;
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task;

/// A loaded forecasting session.
///
/// The dataset and registry are loaded once and never mutated afterwards, so a
/// `WeatherOutlook` can be shared (for example behind an `Arc`) by several
/// concurrent user sessions. Every forecast request recomputes the horizon and
/// the aligned table from scratch; nothing is cached between requests.
///
/// # Examples
///
/// ```no_run
/// # use weather_outlook::WeatherOutlook;
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let outlook = WeatherOutlook::load()
///     .data_path("DailyDelhiClimateTrain.csv")
///     .model_dir("models")
///     .call()
///     .await?;
///
/// let table = outlook
///     .forecast()
///     .target_date(NaiveDate::from_ymd_opt(2017, 1, 3).unwrap())
///     .window_length(5)
///     .call()?;
/// println!("{}", table.to_frame()?);
/// # Ok(())
/// # }
/// ```
pub struct WeatherOutlook {
    dataset: Arc<HistoricalDataset>,
    registry: ModelRegistry,
    settings: OutlookSettings,
    last_observed: NaiveDate,
    calculator: HorizonCalculator,
    aligner: ForecastAligner,
}

#[bon]
impl WeatherOutlook {
    /// Loads the historical CSV and the four model artifacts.
    ///
    /// `model_dir` must contain `temperature`, `humidity`, `wind_speed` and
    /// `pressure` artifacts, each as `.json` or `.bin`. File I/O runs on the
    /// blocking thread pool.
    ///
    /// # Errors
    ///
    /// Any [`OutlookError::Dataset`] or [`OutlookError::Model`] error aborts startup.
    /// [`OutlookError::InvalidSettings`] if the settings do not validate.
    #[builder]
    pub async fn load(
        #[builder(into)] data_path: PathBuf,
        #[builder(into)] model_dir: PathBuf,
        settings: Option<OutlookSettings>,
    ) -> Result<Self, OutlookError> {
        let settings = settings.unwrap_or_default();
        settings.validate().map_err(OutlookError::InvalidSettings)?;

        let columns = settings.columns.clone();
        let dataset =
            task::spawn_blocking(move || HistoricalDataset::load(&data_path, &columns)).await??;
        let registry = task::spawn_blocking(move || ModelRegistry::load_dir(&model_dir)).await??;

        Self::from_parts(dataset, registry, settings)
    }

    /// Builds a session from an already loaded dataset and registry.
    ///
    /// # Errors
    ///
    /// * [`OutlookError::Dataset`] if the dataset is empty.
    /// * [`OutlookError::Model`] with [`ModelError::UnknownVariable`] if a
    ///   variable has no forecaster.
    /// * [`OutlookError::InvalidSettings`] if the settings do not validate.
    pub fn from_parts(
        dataset: impl Into<Arc<HistoricalDataset>>,
        registry: ModelRegistry,
        settings: OutlookSettings,
    ) -> Result<Self, OutlookError> {
        settings.validate().map_err(OutlookError::InvalidSettings)?;
        let dataset = dataset.into();
        let last_observed = dataset.last_observed_date()?;

        if let Some(missing) = WeatherVariable::ALL
            .into_iter()
            .find(|v| registry.forecaster(*v).is_err())
        {
            return Err(ModelError::UnknownVariable(missing.slot().to_string()).into());
        }

        info!(
            "Outlook session ready: {} observations up to {}, {} forecasters",
            dataset.len(),
            last_observed,
            registry.len()
        );
        Ok(Self {
            calculator: HorizonCalculator::new(settings.max_window_length),
            aligner: ForecastAligner::new(),
            dataset,
            registry,
            settings,
            last_observed,
        })
    }

    /// Computes the horizon for a request without running the forecasters.
    ///
    /// `window_length` defaults to [`OutlookSettings::default_window_length`].
    #[builder]
    pub fn horizon(
        &self,
        target_date: NaiveDate,
        window_length: Option<u32>,
    ) -> Result<Horizon, ForecastError> {
        let window_length = window_length.unwrap_or(self.settings.default_window_length);
        self.calculator
            .compute(self.last_observed, target_date, window_length)
    }

    /// Produces the aligned outlook table for `target_date`.
    ///
    /// The first row of the table is the target date; it is followed by
    /// `window_length` forecast days.
    ///
    /// # Errors
    ///
    /// [`ForecastError::InvalidWindow`] and [`ForecastError::InvalidHorizon`]
    /// for bad input; [`ForecastError::AlignmentMismatch`] or
    /// [`ForecastError::Model`] if the forecasters disagree or fail.
    #[builder]
    pub fn forecast(
        &self,
        target_date: NaiveDate,
        window_length: Option<u32>,
    ) -> Result<AlignedForecastTable, ForecastError> {
        let horizon = self
            .horizon()
            .target_date(target_date)
            .maybe_window_length(window_length)
            .call()?;
        self.aligner.align(&self.registry, &horizon)
    }
}

impl WeatherOutlook {
    /// Date of the last historical observation; forecasts extend from here.
    pub fn last_observed_date(&self) -> NaiveDate {
        self.last_observed
    }

    pub fn dataset(&self) -> &HistoricalDataset {
        &self.dataset
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &OutlookSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::error::DatasetError;
    use crate::models::additive::{AdditiveModel, PiecewiseTrend};
    use std::io::Write;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_fixtures(dir: &TempDir, models_history_end: NaiveDate) -> Result<(PathBuf, PathBuf), Box<dyn std::error::Error>> {
        let csv_path = dir.path().join("history.csv");
        let mut csv = std::fs::File::create(&csv_path)?;
        writeln!(csv, "date,meantemp,humidity,wind_speed,meanpressure")?;
        for date in day(2016, 12, 1).iter_days().take_while(|d| *d <= day(2017, 1, 1)) {
            writeln!(csv, "{},15.0,80.0,4.0,1016.0", date.format("%Y-%m-%d"))?;
        }

        let model_dir = dir.path().join("models");
        std::fs::create_dir(&model_dir)?;
        let levels = [15.0, 80.0, 4.0, 1016.0];
        for variable in WeatherVariable::ALL {
            let model = AdditiveModel::new(
                variable,
                day(2016, 12, 1),
                models_history_end,
                PiecewiseTrend::linear(levels[variable.index()], 0.1),
            )
            .with_seasonality("weekly", 7.0, vec![0.5, 0.25]);
            let extension = if variable == WeatherVariable::Humidity { "bin" } else { "json" };
            ModelRegistry::save(&model, &model_dir.join(format!("{}.{}", variable.slot(), extension)))?;
        }
        Ok((csv_path, model_dir))
    }

    #[tokio::test]
    async fn test_load_and_forecast() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let (csv_path, model_dir) = write_fixtures(&dir, day(2017, 1, 1))?;

        let outlook = WeatherOutlook::load()
            .data_path(csv_path)
            .model_dir(model_dir)
            .call()
            .await?;
        assert_eq!(outlook.last_observed_date(), day(2017, 1, 1));
        assert_eq!(outlook.dataset().len(), 32);

        let table = outlook.forecast().target_date(day(2017, 1, 1)).call()?;
        assert_eq!(table.len(), 8);
        assert_eq!(table.anchor().unwrap().date, day(2017, 1, 1));
        assert_eq!(table.rows().last().unwrap().date, day(2017, 1, 8));

        let table = outlook
            .forecast()
            .target_date(day(2017, 2, 10))
            .window_length(3)
            .call()?;
        assert_eq!(table.dates(), day(2017, 2, 10).iter_days().take(4).collect::<Vec<_>>());
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_requests_are_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let (csv_path, model_dir) = write_fixtures(&dir, day(2017, 1, 1))?;
        let outlook = WeatherOutlook::load()
            .data_path(csv_path)
            .model_dir(model_dir)
            .call()
            .await?;

        assert!(matches!(
            outlook.forecast().target_date(day(2017, 1, 1)).window_length(11).call(),
            Err(ForecastError::InvalidWindow { window: 11, max: 10 })
        ));
        assert!(matches!(
            outlook.forecast().target_date(day(2016, 12, 20)).call(),
            Err(ForecastError::InvalidHorizon { total_steps: -5, .. })
        ));
        let horizon = outlook.horizon().target_date(day(2016, 12, 25)).call()?;
        assert_eq!(horizon.total_steps, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_models_trained_on_other_history_do_not_shift_silently() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        // Models end a day after the dataset: anchor moves, but all four agree
        let (csv_path, model_dir) = write_fixtures(&dir, day(2017, 1, 2))?;
        let outlook = WeatherOutlook::load()
            .data_path(csv_path)
            .model_dir(model_dir)
            .call()
            .await?;
        let table = outlook.forecast().target_date(day(2017, 1, 1)).call()?;
        assert_eq!(table.anchor().unwrap().date, day(2017, 1, 2));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_model_aborts_startup() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let (csv_path, model_dir) = write_fixtures(&dir, day(2017, 1, 1))?;
        std::fs::remove_file(model_dir.join("pressure.json"))?;

        let result = WeatherOutlook::load()
            .data_path(csv_path)
            .model_dir(model_dir)
            .call()
            .await;
        assert!(matches!(
            result,
            Err(OutlookError::Model(ModelError::ArtifactNotFound {
                variable: WeatherVariable::Pressure,
                ..
            }))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_dataset_aborts_startup() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let (_, model_dir) = write_fixtures(&dir, day(2017, 1, 1))?;
        let result = WeatherOutlook::load()
            .data_path(dir.path().join("nope.csv"))
            .model_dir(model_dir)
            .call()
            .await;
        assert!(matches!(
            result,
            Err(OutlookError::Dataset(DatasetError::SourceMissing(..)))
        ));
        Ok(())
    }

    #[test]
    fn test_from_parts_validation() {
        let empty = HistoricalDataset::from_observations(Vec::new()).unwrap();
        assert!(matches!(
            WeatherOutlook::from_parts(empty, ModelRegistry::new(), OutlookSettings::default()),
            Err(OutlookError::Dataset(DatasetError::EmptyDataset))
        ));

        let one_day = HistoricalDataset::from_observations(vec![
            crate::dataset::historical::Observation::new(day(2017, 1, 1), None, None, None, None),
        ])
        .unwrap();
        assert!(matches!(
            WeatherOutlook::from_parts(one_day.clone(), ModelRegistry::new(), OutlookSettings::default()),
            Err(OutlookError::Model(ModelError::UnknownVariable(name))) if name == "temperature"
        ));

        let bad_settings = OutlookSettings::builder().default_window_length(0).build();
        assert!(matches!(
            WeatherOutlook::from_parts(one_day, ModelRegistry::new(), bad_settings),
            Err(OutlookError::InvalidSettings(_))
        ));
    }
}
