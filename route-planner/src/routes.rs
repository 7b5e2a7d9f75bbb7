//! Route Aggregator: one directions request per travel mode, fastest-mode selection and map links.

use std::sync::Arc;

use futures::future::join_all;
use maps_client::{DirectionsRequest, MapsError, MapsProvider, TravelMode};
use tracing::{info, instrument, warn};
use url::form_urlencoded;

use crate::error::PlanError;
use crate::model::{Coordinate, ResolvedAddress, RouteLeg};

const MAP_DIR_URL: &str = "https://www.google.com/maps/dir/?";

/// Deep link into the web route viewer. Addresses are form-encoded, so spaces become `+`.
pub fn map_link(origin: &str, destination: &str, mode: TravelMode) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("api", "1")
        .append_pair("origin", origin)
        .append_pair("destination", destination)
        .append_pair("travelmode", mode.as_str())
        .finish();
    format!("{MAP_DIR_URL}{query}")
}

/// Routes that succeeded for one request, in preference order (driving, walking, transit).
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    origin: ResolvedAddress,
    destination: ResolvedAddress,
    legs: Vec<RouteLeg>,
    fastest: usize,
}

impl RoutePlan {
    /// Fails with `NoRouteFound` when `legs` is empty. Legs are sorted into preference order; the
    /// fastest is the smallest free-flow duration, ties going to the earlier mode.
    pub fn new(
        origin: ResolvedAddress,
        destination: ResolvedAddress,
        mut legs: Vec<RouteLeg>,
    ) -> Result<Self, PlanError> {
        legs.sort_by_key(|leg| leg.mode);
        let fastest = legs
            .iter()
            .enumerate()
            .min_by_key(|(idx, leg)| (leg.duration_seconds, *idx))
            .map(|(idx, _)| idx)
            .ok_or(PlanError::NoRouteFound)?;
        Ok(Self {
            origin,
            destination,
            legs,
            fastest,
        })
    }

    pub fn origin(&self) -> &ResolvedAddress {
        &self.origin
    }

    pub fn destination(&self) -> &ResolvedAddress {
        &self.destination
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    pub fn leg(&self, mode: TravelMode) -> Option<&RouteLeg> {
        self.legs.iter().find(|leg| leg.mode == mode)
    }

    pub fn fastest(&self) -> &RouteLeg {
        &self.legs[self.fastest]
    }

    /// Start and end of the first available leg in preference order; weather is looked up there.
    pub fn endpoints(&self) -> (Coordinate, Coordinate) {
        let leg = &self.legs[0];
        (leg.start, leg.end)
    }

    pub fn map_link(&self, mode: TravelMode) -> String {
        map_link(
            &self.origin.formatted_address,
            &self.destination.formatted_address,
            mode,
        )
    }
}

pub struct RouteAggregator {
    maps: Arc<dyn MapsProvider>,
}

impl RouteAggregator {
    pub fn new(maps: Arc<dyn MapsProvider>) -> Self {
        Self { maps }
    }

    /// Requests every mode concurrently. A mode with no route, or whose request failed, is
    /// skipped; if nothing succeeded the first provider failure is returned, else `NoRouteFound`.
    #[instrument(skip_all, fields(origin = %origin.formatted_address, destination = %destination.formatted_address))]
    pub async fn aggregate(
        &self,
        origin: &ResolvedAddress,
        destination: &ResolvedAddress,
    ) -> Result<RoutePlan, PlanError> {
        let requests: Vec<DirectionsRequest> = TravelMode::ALL
            .iter()
            .map(|mode| {
                DirectionsRequest::new(
                    origin.formatted_address.as_str(),
                    destination.formatted_address.as_str(),
                    *mode,
                )
            })
            .collect();

        let results = join_all(requests.iter().map(|req| self.maps.directions(req))).await;

        let mut legs = Vec::new();
        let mut first_error: Option<MapsError> = None;
        for (request, result) in requests.iter().zip(results) {
            match result {
                Ok(routes) => {
                    match routes.first().and_then(|route| route.legs.first()) {
                        Some(leg) => {
                            info!(
                                mode = %request.mode,
                                duration_secs = leg.duration.value,
                                "step: route found"
                            );
                            legs.push(RouteLeg::from_leg(request.mode, leg));
                        }
                        None => info!(mode = %request.mode, "step: no route for mode"),
                    }
                }
                Err(e) => {
                    warn!(mode = %request.mode, error = %e, "Directions request failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if legs.is_empty() {
            return Err(match first_error {
                Some(e) => PlanError::Maps(e),
                None => PlanError::NoRouteFound,
            });
        }

        RoutePlan::new(origin.clone(), destination.clone(), legs)
    }
}
