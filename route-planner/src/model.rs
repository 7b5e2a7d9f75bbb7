//! Value types produced by the pipeline. All are immutable once built.

use maps_client::{LatLng, Leg, TravelMode};

/// Placeholder recorded in history when the driving leg is missing.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Self {
            lat: value.lat,
            lon: value.lng,
        }
    }
}

/// A geocoded address known to lie in the designated city.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub formatted_address: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitDetail {
    pub line_name: String,
    pub boarding_stop: String,
    pub alighting_stop: String,
}

/// One computed route for one travel mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub mode: TravelMode,
    pub distance_text: String,
    pub duration_text: String,
    pub duration_seconds: u64,
    pub duration_in_traffic_seconds: Option<u64>,
    pub duration_in_traffic_text: Option<String>,
    pub start: Coordinate,
    pub end: Coordinate,
    pub transit_detail: Option<TransitDetail>,
}

impl RouteLeg {
    /// Extracts the metrics of a provider leg. Traffic figures are kept for driving only and
    /// transit detail comes from the first step, when that step carries it.
    pub fn from_leg(mode: TravelMode, leg: &Leg) -> Self {
        let (duration_in_traffic_seconds, duration_in_traffic_text) = match mode {
            TravelMode::Driving => (
                leg.duration_in_traffic.as_ref().map(|t| t.value),
                leg.duration_in_traffic.as_ref().map(|t| t.text.clone()),
            ),
            _ => (None, None),
        };

        let transit_detail = match mode {
            TravelMode::Transit => leg
                .steps
                .first()
                .and_then(|step| step.transit_details.as_ref())
                .map(|d| TransitDetail {
                    line_name: d
                        .line
                        .short_name
                        .clone()
                        .or_else(|| d.line.name.clone())
                        .unwrap_or_else(|| "?".to_string()),
                    boarding_stop: d.departure_stop.name.clone(),
                    alighting_stop: d.arrival_stop.name.clone(),
                }),
            _ => None,
        };

        Self {
            mode,
            distance_text: leg.distance.text.clone(),
            duration_text: leg.duration.text.clone(),
            duration_seconds: leg.duration.value,
            duration_in_traffic_seconds,
            duration_in_traffic_text,
            start: leg.start_location.into(),
            end: leg.end_location.into(),
            transit_detail,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub description: String,
    pub temperature_celsius: f64,
}

/// Weather at both ends of the trip; `None` when that lookup failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointWeather {
    pub start: Option<WeatherSnapshot>,
    pub end: Option<WeatherSnapshot>,
}

impl EndpointWeather {
    pub fn is_unavailable(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// One completed request in a user's history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub origin: String,
    pub destination: String,
    pub distance_text: String,
    pub duration_text: String,
    pub traffic_text: String,
    pub weather: EndpointWeather,
}
