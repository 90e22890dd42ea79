//! Open-Meteo current-weather client

use std::time::Duration;

use contracts::{NewSample, SourceConfig};
use reqwest::{Client, Request};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::{IngestionError, Result, SampleSource};

/// `current_weather` object of the forecast response
///
/// Fields beyond the four the log needs (`time`, `weathercode`, `is_day`, ...)
/// are ignored.
#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    interval: i64,
}

impl From<CurrentWeather> for NewSample {
    fn from(current: CurrentWeather) -> Self {
        Self {
            temperature: current.temperature,
            windspeed: current.windspeed,
            winddirection: current.winddirection,
            interval: current.interval,
        }
    }
}

/// Extract a sample from a forecast response body
pub fn parse_current_weather(body: &Value) -> Result<NewSample> {
    let current = body
        .get("current_weather")
        .ok_or_else(|| IngestionError::unexpected_response("missing `current_weather`"))?;

    CurrentWeather::deserialize(current)
        .map(NewSample::from)
        .map_err(|e| IngestionError::unexpected_response(e.to_string()))
}

/// Live source for one fixed location
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            latitude: config.latitude,
            longitude: config.longitude,
        })
    }

    /// The request `fetch` sends
    pub fn request(&self) -> Result<Request> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .build()?;
        Ok(request)
    }

    async fn get_body(&self) -> Result<Value> {
        let request = self.request()?;
        let body = self
            .client
            .execute(request)
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(body)
    }
}

impl SampleSource for OpenMeteoSource {
    fn name(&self) -> &'static str {
        "open_meteo"
    }

    #[instrument(skip(self), fields(lat = self.latitude, lon = self.longitude))]
    async fn fetch(&self) -> Result<NewSample> {
        let body = match self.get_body().await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Error fetching weather data");
                return Err(e);
            }
        };

        match parse_current_weather(&body) {
            Ok(sample) => {
                debug!(?sample, "Fetched current weather");
                Ok(sample)
            }
            Err(e) => {
                error!(error = %e, "Unexpected API response format");
                Err(e)
            }
        }
    }
}
