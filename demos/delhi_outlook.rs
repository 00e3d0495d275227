use chrono::NaiveDate;
use std::env;
use std::fs;
use weather_outlook::{
    AdditiveModel, ForecastDisplayState, ForecastSummary, ModelRegistry, PiecewiseTrend,
    WeatherOutlook, WeatherVariable,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    configure_polars_display();
    let dir = tempfile::tempdir()?;

    let history_start = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    let last_observed = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();

    let mut csv = String::from("date,meantemp,humidity,wind_speed,meanpressure\n");
    for date in history_start.iter_days().take_while(|d| *d <= last_observed) {
        csv.push_str(&format!("{date},20.0,60.0,6.0,1012.0\n"));
    }
    let data_path = dir.path().join("DailyDelhiClimateTrain.csv");
    fs::write(&data_path, csv)?;

    let models = [
        (WeatherVariable::Temperature, 25.0, vec![-2.0, -7.5]),
        (WeatherVariable::Humidity, 60.0, vec![-10.0, 12.0]),
        (WeatherVariable::WindSpeed, 6.8, vec![1.5, -1.0]),
        (WeatherVariable::Pressure, 1008.0, vec![-0.5, 7.0]),
    ];
    for (variable, offset, yearly) in models {
        let model = AdditiveModel::new(
            variable,
            history_start,
            last_observed,
            PiecewiseTrend::linear(offset, 0.0005),
        )
        .with_seasonality("yearly", 365.25, yearly)
        .with_uncertainty(1.2, 0.8);
        ModelRegistry::save(&model, &dir.path().join(format!("{}.json", variable.slot())))?;
    }

    let outlook = WeatherOutlook::load()
        .data_path(data_path)
        .model_dir(dir.path())
        .call()
        .await?;

    let table = outlook
        .forecast()
        .target_date(NaiveDate::from_ymd_opt(2017, 1, 3).unwrap())
        .window_length(5)
        .call()?;
    println!("{}", table.to_frame()?);

    if let Some(summary) = ForecastSummary::from_table(&table) {
        for card in &summary.cards {
            println!(
                "{} {} {} {:.1} °C",
                card.weekday,
                card.day_of_month,
                card.outlook.icon(),
                card.temperature
            );
        }
        println!(
            "Gauge: {:.1} °C ({:+.1} vs mean, {:?})",
            summary.gauge.value, summary.gauge.delta, summary.gauge.band
        );
    }

    // a request before the history ends is rejected, the last table stays visible
    let mut state = ForecastDisplayState::new();
    state.refresh(&outlook, NaiveDate::from_ymd_opt(2017, 1, 2).unwrap(), 7);
    state.refresh(&outlook, NaiveDate::from_ymd_opt(2016, 12, 20).unwrap(), 7);
    if let Some(error) = state.error() {
        println!("Stale: {}, error: {}", state.is_stale(), error);
    }

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
