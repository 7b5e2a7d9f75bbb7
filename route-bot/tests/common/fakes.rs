//! In-process maps and weather providers.

use async_trait::async_trait;
use maps_client::{
    DirectionsRequest, GeocodeCandidate, Geometry, LatLng, Leg, MapsError, MapsProvider, Route,
    TextValue, TravelMode,
};
use std::collections::HashMap;
use weather_client::{CurrentWeather, WeatherError, WeatherProvider};

/// Geocodes from a fixed table; every mode has a route unless `broken` is set.
pub struct FakeMaps {
    pub addresses: HashMap<String, String>,
    pub broken: bool,
}

impl FakeMaps {
    pub fn astana() -> Self {
        let addresses = [
            ("Khan Shatyr", "Turan Ave 37, Astana 010000, Kazakhstan"),
            ("Baiterek", "Nurzhol Blvd 14, Astana 010000, Kazakhstan"),
            ("Medeu", "Dostyk Ave 1, Almaty, Kazakhstan"),
        ]
        .into_iter()
        .map(|(q, f)| (q.to_string(), f.to_string()))
        .collect();
        Self {
            addresses,
            broken: false,
        }
    }
}

fn tv(text: &str, value: u64) -> TextValue {
    TextValue {
        text: text.to_string(),
        value,
    }
}

#[async_trait]
impl MapsProvider for FakeMaps {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, MapsError> {
        Ok(self
            .addresses
            .get(address)
            .map(|formatted| {
                vec![GeocodeCandidate {
                    formatted_address: formatted.clone(),
                    geometry: Geometry {
                        location: LatLng {
                            lat: 51.13,
                            lng: 71.43,
                        },
                    },
                }]
            })
            .unwrap_or_default())
    }

    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<Route>, MapsError> {
        if self.broken {
            return Err(MapsError::Http {
                status: 500,
                body: "backend error".to_string(),
            });
        }
        let (duration, traffic) = match request.mode {
            TravelMode::Driving => (tv("8 mins", 480), Some(tv("21 mins", 1260))),
            TravelMode::Walking => (tv("40 mins", 2400), None),
            TravelMode::Transit => (tv("22 mins", 1320), None),
        };
        Ok(vec![Route {
            legs: vec![Leg {
                distance: tv("3.1 km", 3100),
                duration,
                duration_in_traffic: traffic,
                start_location: LatLng {
                    lat: 51.13,
                    lng: 71.40,
                },
                end_location: LatLng {
                    lat: 51.12,
                    lng: 71.43,
                },
                steps: vec![],
            }],
        }])
    }
}

pub struct FakeWeather;

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current(&self, _lat: f64, _lon: f64) -> Result<CurrentWeather, WeatherError> {
        Ok(CurrentWeather {
            description: "light snow".to_string(),
            temperature_celsius: -14.5,
        })
    }
}
