pub mod errors;
pub mod models;
#[cfg(test)]
pub mod mock;

use std::collections::HashMap;
use std::time::Duration;
use log::debug;
use reqwest::Client;
use tokio::task::JoinSet;
use crate::manager_smhi::errors::SMHIError;
use crate::manager_smhi::models::{ObservationDocument, Parameter, ParameterSeries};

pub const SMHI_DOMAIN: &str = "https://opendata-download-metobs.smhi.se";

/// Struct for fetching station observations from SMHI open data
pub struct SMHI {
    client: Client,
    base_url: String,
    station_id: String,
}

impl SMHI {
    /// Returns a SMHI struct ready for fetching observation series for one station
    ///
    /// # Arguments
    ///
    /// * 'base_url' - scheme and host of the observation API, e.g. SMHI_DOMAIN
    /// * 'station_id' - SMHI station id
    /// * 'timeout' - time limit for each single request
    pub fn new(base_url: &str, station_id: &str, timeout: Duration) -> Result<SMHI, SMHIError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            station_id: station_id.to_string(),
        })
    }

    /// Url to the latest months observations of the given parameter
    ///
    /// # Arguments
    ///
    /// * 'parameter' - the parameter to build the url for
    pub fn series_url(&self, parameter: Parameter) -> String {
        format!("{}/api/version/1.0/parameter/{}/station/{}/period/latest-months/data.json",
                self.base_url, parameter.id(), self.station_id)
    }

    /// Retrieves all given parameters concurrently.
    ///
    /// Either every series is returned or the first error is. Requests still in
    /// flight when an error shows up are aborted.
    ///
    /// # Arguments
    ///
    /// * 'parameters' - the parameters to fetch
    pub async fn fetch_all(&self, parameters: &[Parameter]) -> Result<HashMap<Parameter, ParameterSeries>, SMHIError> {
        let mut set: JoinSet<Result<(Parameter, ParameterSeries), SMHIError>> = JoinSet::new();

        for &p in parameters {
            let client = self.client.clone();
            let url = self.series_url(p);
            set.spawn(async move { Ok((p, request_series(&client, url).await?)) });
        }

        let mut all: HashMap<Parameter, ParameterSeries> = HashMap::new();
        while let Some(joined) = set.join_next().await {
            let (p, series) = joined??;
            debug!("{}: {} observations", p.label(), series.len());
            all.insert(p, series);
        }

        Ok(all)
    }
}

/// Makes a request for one observation series
///
/// # Arguments
///
/// * 'client' - http client to use
/// * 'url' - url to the series
async fn request_series(client: &Client, url: String) -> Result<ParameterSeries, SMHIError> {
    debug!("fetching {}", url);
    let response = client.get(&url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SMHIError::Status(format!("{} returned {}", url, status)));
    }

    let json = response.text().await?;
    let document: ObservationDocument = serde_json::from_str(&json)?;

    Ok(ParameterSeries::from(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use crate::manager_smhi::mock::{spawn_upstream, UpstreamFixture};

    const DOC: &str = r#"{
        "value": [
            {"date": 1700000000000, "value": "5.2", "quality": "G"},
            {"date": 1700003600000, "value": "-1.0", "quality": "Y"}
        ],
        "updated": 1700003600000
    }"#;

    fn smhi(base_url: &str) -> SMHI {
        SMHI::new(base_url, "71420", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn builds_latest_months_url() {
        let smhi = smhi("https://example.com/");
        assert_eq!(
            smhi.series_url(Parameter::AirPressure),
            "https://example.com/api/version/1.0/parameter/9/station/71420/period/latest-months/data.json"
        );
    }

    #[test]
    fn parses_string_values() {
        let doc: ObservationDocument = serde_json::from_str(DOC).unwrap();
        let series = ParameterSeries::from(doc);

        assert_eq!(series.len(), 2);
        let first = DateTime::from_timestamp_millis(1700000000000).unwrap();
        assert_eq!(series.get(&first), Some(5.2));
        assert_eq!(series.iter().last().map(|(_, v)| v), Some(-1.0));
    }

    #[test]
    fn rejects_non_numeric_value() {
        let result: Result<ObservationDocument, _> =
            serde_json::from_str(r#"{"value": [{"date": 1, "value": "n/a"}]}"#);
        let e = SMHIError::from(result.err().unwrap());
        assert!(matches!(e, SMHIError::Document(_)));
    }

    #[test]
    fn duplicate_timestamp_keeps_position_and_last_value() {
        let t0 = DateTime::from_timestamp_millis(0).unwrap();
        let t1 = DateTime::from_timestamp_millis(3_600_000).unwrap();
        let series = ParameterSeries::from_observations(vec![(t0, 1.0), (t1, 2.0), (t0, 3.0)]);

        let items: Vec<_> = series.iter().collect();
        assert_eq!(items, vec![(t0, 3.0), (t1, 2.0)]);
    }

    #[actix_web::test]
    async fn fetch_all_returns_every_parameter() {
        let fixture = UpstreamFixture::default().with_document(Parameter::Temperature, DOC);
        let base_url = spawn_upstream(fixture);

        let all = smhi(&base_url).fetch_all(&Parameter::ALL).await.unwrap();

        assert_eq!(all.len(), Parameter::ALL.len());
        assert_eq!(all[&Parameter::Temperature].len(), 2);
        assert!(all[&Parameter::Rain15Min].is_empty());
    }

    #[actix_web::test]
    async fn fetch_all_fails_when_one_parameter_fails() {
        let fixture = UpstreamFixture::default()
            .with_document(Parameter::Temperature, DOC)
            .failing(Parameter::AirPressure);
        let base_url = spawn_upstream(fixture);

        let result = smhi(&base_url).fetch_all(&Parameter::ALL).await;

        assert!(matches!(result, Err(SMHIError::Status(_))));
    }

    #[actix_web::test]
    async fn malformed_body_is_a_document_error() {
        let fixture = UpstreamFixture::default().with_document(Parameter::WindSpeed, "{\"station\": {}}");
        let base_url = spawn_upstream(fixture);

        let result = smhi(&base_url).fetch_all(&[Parameter::WindSpeed]).await;

        assert!(matches!(result, Err(SMHIError::Document(_))));
    }

    #[actix_web::test]
    async fn unreachable_host_is_a_transport_error() {
        let result = smhi("http://127.0.0.1:1").fetch_all(&[Parameter::Temperature]).await;

        assert!(matches!(result, Err(SMHIError::Transport(_))));
    }
}
