use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, TimestampMilliSeconds};

/// The weather parameters monitored at the station
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    Temperature,
    WindDirection,
    WindSpeed,
    RelativeHumidity,
    Precipitation,
    AirPressure,
    Rain15Min,
}

impl Parameter {
    pub const ALL: [Parameter; 7] = [
        Parameter::Temperature,
        Parameter::WindDirection,
        Parameter::WindSpeed,
        Parameter::RelativeHumidity,
        Parameter::Precipitation,
        Parameter::AirPressure,
        Parameter::Rain15Min,
    ];

    /// SMHI parameter id
    pub fn id(&self) -> u8 {
        match self {
            Parameter::Temperature => 1,
            Parameter::WindDirection => 3,
            Parameter::WindSpeed => 4,
            Parameter::RelativeHumidity => 6,
            Parameter::Precipitation => 7,
            Parameter::AirPressure => 9,
            Parameter::Rain15Min => 14,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature (°C)",
            Parameter::WindDirection => "Wind Direction (°)",
            Parameter::WindSpeed => "Wind Speed (m/s)",
            Parameter::RelativeHumidity => "Relative Humidity (%)",
            Parameter::Precipitation => "Precipitation (mm/h)",
            Parameter::AirPressure => "Air Pressure (hPa)",
            Parameter::Rain15Min => "Rain (mm/15min)",
        }
    }

    /// Value used when the parameter has no reading for a timestamp.
    /// Temperature drives the join and therefore never needs one.
    pub fn fallback(&self) -> f64 {
        match self {
            Parameter::RelativeHumidity => 60.0,
            Parameter::AirPressure => 1013.0,
            _ => 0.0,
        }
    }
}

#[serde_as]
#[derive(Deserialize)]
pub struct RawObservation {
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub date: DateTime<Utc>,
    #[serde_as(as = "DisplayFromStr")]
    pub value: f64,
}

/// The "latest-months" observation document, only the parts we use
#[derive(Deserialize)]
pub struct ObservationDocument {
    pub value: Vec<RawObservation>,
}

/// Time series for one parameter, keyed by observation time.
///
/// Iteration follows the order the observations arrived in. A timestamp that
/// shows up more than once keeps its first position but takes the last value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParameterSeries {
    order: Vec<DateTime<Utc>>,
    values: HashMap<DateTime<Utc>, f64>,
}

impl ParameterSeries {
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let mut series = ParameterSeries::default();
        for (date, value) in observations {
            if series.values.insert(date, value).is_none() {
                series.order.push(date);
            }
        }
        series
    }

    pub fn get(&self, date: &DateTime<Utc>) -> Option<f64> {
        self.values.get(date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.order.iter().map(|d| (*d, self.values[d]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl From<ObservationDocument> for ParameterSeries {
    fn from(doc: ObservationDocument) -> Self {
        ParameterSeries::from_observations(doc.value.into_iter().map(|o| (o.date, o.value)))
    }
}
