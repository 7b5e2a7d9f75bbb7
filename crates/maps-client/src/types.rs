//! Request and response models for geocoding and directions.

use serde::Deserialize;

/// Geographic coordinate as the provider spells it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// One geocoding match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    pub geometry: Geometry,
}

/// Travel modes, in the fixed preference order used for ties and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TravelMode {
    Driving,
    Walking,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Driving, TravelMode::Walking, TravelMode::Transit];

    /// Wire name used in directions requests and map links.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traffic assumption for driving time estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrafficModel {
    #[default]
    BestGuess,
    Pessimistic,
    Optimistic,
}

impl TrafficModel {
    pub fn as_str(self) -> &'static str {
        match self {
            TrafficModel::BestGuess => "best_guess",
            TrafficModel::Pessimistic => "pessimistic",
            TrafficModel::Optimistic => "optimistic",
        }
    }
}

/// Directions query departing now.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub traffic_model: TrafficModel,
}

impl DirectionsRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, mode: TravelMode) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode,
            traffic_model: TrafficModel::default(),
        }
    }
}

/// Human text plus the numeric value (metres or seconds).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitStop {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitLine {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitDetails {
    pub line: TransitLine,
    pub departure_stop: TransitStop,
    pub arrival_stop: TransitStop,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub travel_mode: Option<String>,
    #[serde(default)]
    pub transit_details: Option<TransitDetails>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,
    /// Only present for driving requests that asked for a departure time.
    #[serde(default)]
    pub duration_in_traffic: Option<TextValue>,
    pub start_location: LatLng,
    pub end_location: LatLng,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
}
