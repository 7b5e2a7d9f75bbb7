//! Google Maps Platform implementation of [`MapsProvider`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::types::{DirectionsRequest, GeocodeCandidate, Route};
use crate::{MapsError, MapsProvider};

pub const GOOGLE_MAPS_API_BASE: &str = "https://maps.googleapis.com";

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const DIRECTIONS_PATH: &str = "/maps/api/directions/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Maps an API status to "has results", "empty" or an error.
fn check_status(status: &str, error_message: Option<String>) -> Result<bool, MapsError> {
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(false),
        other => Err(MapsError::Status {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

/// HTTP client for the geocoding and directions web services.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: Option<String>,
}

impl GoogleMapsClient {
    /// Creates a client against `base_url` (normally [`GOOGLE_MAPS_API_BASE`]); every request is
    /// bounded by `timeout`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MapsError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: None,
        })
    }

    /// Sets the `language` parameter for formatted addresses and texts.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, MapsError> {
        params.push(("key", self.api_key.clone()));
        if let Some(lang) = &self.language {
            params.push(("language", lang.clone()));
        }

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Http { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, MapsError> {
        info!("step: geocode request");
        let body: GeocodeResponse = self
            .get_json(GEOCODE_PATH, vec![("address", address.to_string())])
            .await?;

        if !check_status(&body.status, body.error_message)? {
            info!("step: geocode returned no results");
            return Ok(Vec::new());
        }
        info!(candidates = body.results.len(), "step: geocode done");
        Ok(body.results)
    }

    #[instrument(skip(self, request), fields(mode = %request.mode))]
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<Route>, MapsError> {
        info!("step: directions request");
        let params = vec![
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("mode", request.mode.as_str().to_string()),
            ("departure_time", "now".to_string()),
            ("traffic_model", request.traffic_model.as_str().to_string()),
        ];
        let body: DirectionsResponse = self.get_json(DIRECTIONS_PATH, params).await?;

        match check_status(&body.status, body.error_message) {
            Ok(true) => {
                info!(routes = body.routes.len(), "step: directions done");
                Ok(body.routes)
            }
            Ok(false) => {
                info!("step: directions returned no route");
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(error = %e, "directions rejected by provider");
                Err(e)
            }
        }
    }
}
