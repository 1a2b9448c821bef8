use chrono::Local;
use serde::Serialize;

/// One merged observation, keyed the way the mobile client expects
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "Temperature (°C)")]
    pub temperature: f64,
    #[serde(rename = "Wind Direction (°)")]
    pub wind_direction: f64,
    #[serde(rename = "Wind Speed (m/s)")]
    pub wind_speed: f64,
    #[serde(rename = "Relative Humidity (%)")]
    pub humidity: f64,
    #[serde(rename = "Precipitation (mm/h)")]
    pub precipitation: f64,
    #[serde(rename = "Air Pressure (hPa)")]
    pub air_pressure: f64,
    #[serde(rename = "Rain (mm/15min)")]
    pub rain_15min: f64,
    #[serde(rename = "Indoor Humidity (%)")]
    pub indoor_humidity: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub latest_temp: String,
    pub latest_humidity: String,
    pub latest_wind_speed: String,
    pub latest_pressure: String,
    pub latest_time: String,
    pub indoor_humidity: Option<f64>,
    pub day_avg_temp: String,
    pub week_avg_temp: String,
    pub month_avg_temp: String,
}

impl Default for MetricsSummary {
    fn default() -> Self {
        MetricsSummary {
            latest_temp: "0".to_string(),
            latest_humidity: "60".to_string(),
            latest_wind_speed: "0".to_string(),
            latest_pressure: "1013".to_string(),
            latest_time: String::new(),
            indoor_humidity: None,
            day_avg_temp: "0".to_string(),
            week_avg_temp: "0".to_string(),
            month_avg_temp: "0".to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct StationReport {
    pub data: Vec<WeatherRecord>,
    pub metrics: MetricsSummary,
    pub last_update: String,
}

impl StationReport {
    /// Assembles the report, stamping it with the current local time
    ///
    /// # Arguments
    ///
    /// * 'data' - merged records
    /// * 'metrics' - summary over the records
    pub fn new(data: Vec<WeatherRecord>, metrics: MetricsSummary) -> Self {
        StationReport {
            data,
            metrics,
            last_update: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
