//! # maps-client
//!
//! Geocoding and directions collaborator. [`MapsProvider`] is the seam the route planner depends
//! on; [`GoogleMapsClient`] implements it over the Google Maps Platform web services.
//!
//! An empty answer (`ZERO_RESULTS` / `NOT_FOUND`) is a normal outcome and yields an empty `Vec`;
//! only transport failures and other provider statuses are errors.

mod google;
mod types;

pub use google::{GoogleMapsClient, GOOGLE_MAPS_API_BASE};
pub use types::{
    DirectionsRequest, GeocodeCandidate, Geometry, LatLng, Leg, Route, Step, TextValue,
    TrafficModel, TransitDetails, TransitLine, TransitStop, TravelMode,
};

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a [`MapsProvider`].
#[derive(Error, Debug)]
pub enum MapsError {
    #[error("maps request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("maps API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("maps API status {status}: {message}")]
    Status { status: String, message: String },
}

// The request URL carries the API key in its query, so it never reaches the error text.
impl From<reqwest::Error> for MapsError {
    fn from(e: reqwest::Error) -> Self {
        MapsError::Request(e.without_url())
    }
}

/// Geocoding and directions lookups.
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Returns geocode candidates for free text, best match first; empty when nothing matched.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, MapsError>;

    /// Returns routes for one travel mode, best first; empty when the mode does not connect the points.
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<Route>, MapsError>;
}
