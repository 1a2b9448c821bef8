pub mod models;

use std::collections::HashMap;
use chrono::{DateTime, Local, Utc};
use log::info;
use crate::aggregator::models::{MetricsSummary, StationReport, WeatherRecord};
use crate::manager_smhi::errors::SMHIError;
use crate::manager_smhi::models::{Parameter, ParameterSeries};
use crate::manager_smhi::SMHI;

/// SMHI Göteborg A
pub const STATION_ID: &str = "71420";

const DAY_WINDOW: usize = 24;
const WEEK_WINDOW: usize = 168;

/// Merges the station's parameter series into one report per request
pub struct StationDataAggregator {
    smhi: SMHI,
}

impl StationDataAggregator {
    pub fn new(smhi: SMHI) -> Self {
        Self { smhi }
    }

    /// Fetches every parameter and builds a fresh report.
    /// Nothing is returned unless every fetch succeeded.
    pub async fn station_report(&self) -> Result<StationReport, SMHIError> {
        let all = self.smhi.fetch_all(&Parameter::ALL).await?;

        let data = merge_records(&all);
        let metrics = summarize(&data);
        info!("merged {} records, latest at '{}'", data.len(), metrics.latest_time);

        Ok(StationReport::new(data, metrics))
    }
}

/// Joins all series on the timestamps of the temperature series.
///
/// Records come out in the order of the temperature series. Parameters lacking
/// a reading for a timestamp get their fallback value.
///
/// # Arguments
///
/// * 'all' - series per parameter, missing parameters count as empty
pub fn merge_records(all: &HashMap<Parameter, ParameterSeries>) -> Vec<WeatherRecord> {
    let Some(temperature) = all.get(&Parameter::Temperature) else {
        return Vec::new();
    };

    let lookup = |p: Parameter, date: &DateTime<Utc>| {
        all.get(&p)
            .and_then(|s| s.get(date))
            .unwrap_or_else(|| p.fallback())
    };

    temperature.iter()
        .map(|(date, temp)| WeatherRecord {
            date_time: date.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
            temperature: temp,
            wind_direction: lookup(Parameter::WindDirection, &date),
            wind_speed: lookup(Parameter::WindSpeed, &date),
            humidity: lookup(Parameter::RelativeHumidity, &date),
            precipitation: lookup(Parameter::Precipitation, &date),
            air_pressure: lookup(Parameter::AirPressure, &date),
            rain_15min: lookup(Parameter::Rain15Min, &date),
            indoor_humidity: None,
        })
        .collect()
}

/// Latest readings and trailing temperature averages over the records.
/// "Latest" is the last record, so records are expected oldest first.
///
/// # Arguments
///
/// * 'records' - merged records
pub fn summarize(records: &[WeatherRecord]) -> MetricsSummary {
    let Some(latest) = records.last() else {
        return MetricsSummary::default();
    };

    let temps: Vec<f64> = records.iter().map(|r| r.temperature).collect();

    MetricsSummary {
        latest_temp: one_decimal(latest.temperature),
        latest_humidity: one_decimal(latest.humidity),
        latest_wind_speed: one_decimal(latest.wind_speed),
        latest_pressure: one_decimal(latest.air_pressure),
        latest_time: latest.date_time.clone(),
        indoor_humidity: None,
        day_avg_temp: one_decimal(trailing_mean(&temps, DAY_WINDOW)),
        week_avg_temp: one_decimal(trailing_mean(&temps, WEEK_WINDOW)),
        month_avg_temp: one_decimal(trailing_mean(&temps, temps.len())),
    }
}

/// Mean of the last `window` values, or of all of them when there are fewer
fn trailing_mean(values: &[f64], window: usize) -> f64 {
    let tail = &values[values.len().saturating_sub(window)..];
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().sum::<f64>() / tail.len() as f64
}

/// Rounds to one decimal, ties to even on the stored binary value
fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}
