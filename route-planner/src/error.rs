//! Errors of the planning pipeline.

use maps_client::MapsError;
use thiserror::Error;

/// Failure of one route request. Weather and traffic problems never appear here: they degrade
/// inside the report instead.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("address not found: {input}")]
    AddressNotFound { input: String },

    /// Resolved, but outside the designated city. Shown to users exactly like `AddressNotFound`.
    #[error("address outside service area: {formatted_address}")]
    OutOfServiceArea {
        input: String,
        formatted_address: String,
    },

    #[error("no route found for any travel mode")]
    NoRouteFound,

    #[error("maps provider failed: {0}")]
    Maps(#[from] MapsError),
}

impl PlanError {
    /// True for both address failures, which share one user-facing message.
    pub fn is_address_error(&self) -> bool {
        matches!(
            self,
            PlanError::AddressNotFound { .. } | PlanError::OutOfServiceArea { .. }
        )
    }
}
