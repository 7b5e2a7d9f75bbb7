//! # weather-client
//!
//! Current-conditions collaborator. [`WeatherProvider`] is the seam used by the route planner;
//! [`OpenWeatherClient`] implements it over the OpenWeather current weather API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Errors returned by a [`WeatherProvider`].
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("weather API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("weather response has no conditions")]
    MissingConditions,
}

// `appid` travels in the query string; strip the URL before it can be logged.
impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Request(e.without_url())
    }
}

/// Current conditions at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub description: String,
    pub temperature_celsius: f64,
}

/// Current-weather lookups by coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    main: MainReadings,
}

/// HTTP client for OpenWeather; always requests metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    lang: String,
}

impl OpenWeatherClient {
    /// Creates a client against `base_url` (normally [`OPENWEATHER_API_BASE`]); `lang` selects the
    /// description language (e.g. `en`, `ru`).
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            lang: lang.into(),
        })
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError> {
        info!("step: weather request");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, CURRENT_WEATHER_PATH))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("lang", self.lang.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Http { status, body });
        }

        let body: CurrentWeatherResponse = response.json().await?;
        let description = body
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingConditions)?
            .description;

        info!(description = %description, temp = body.main.temp, "step: weather done");
        Ok(CurrentWeather {
            description,
            temperature_celsius: body.main.temp,
        })
    }
}
