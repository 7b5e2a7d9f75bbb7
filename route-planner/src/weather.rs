//! Weather Annotator: best-effort current conditions at both ends of a trip.

use std::sync::Arc;

use tracing::{info, warn};
use weather_client::WeatherProvider;

use crate::model::{Coordinate, EndpointWeather, WeatherSnapshot};

const RAIN_INDICATORS: &[&str] = &["rain", "drizzle", "shower", "дождь", "ливень", "морось"];
const SNOW_INDICATORS: &[&str] = &["snow", "sleet", "снег"];
const HEAT_THRESHOLD_CELSIUS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherWarning {
    Rain,
    /// Snow on the ground, so a slip hazard.
    Snow,
    Heat,
}

/// Warnings for one endpoint, in the order rain, snow, heat. Empty means normal conditions.
pub fn classify(snapshot: &WeatherSnapshot) -> Vec<WeatherWarning> {
    let description = snapshot.description.to_lowercase();
    let mut warnings = Vec::new();
    if RAIN_INDICATORS.iter().any(|w| description.contains(w)) {
        warnings.push(WeatherWarning::Rain);
    }
    if SNOW_INDICATORS.iter().any(|w| description.contains(w)) {
        warnings.push(WeatherWarning::Snow);
    }
    if snapshot.temperature_celsius > HEAT_THRESHOLD_CELSIUS {
        warnings.push(WeatherWarning::Heat);
    }
    warnings
}

pub struct WeatherAnnotator {
    weather: Arc<dyn WeatherProvider>,
}

impl WeatherAnnotator {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }

    /// Looks up both endpoints concurrently; a failed lookup leaves that endpoint `None`.
    pub async fn annotate(&self, start: Coordinate, end: Coordinate) -> EndpointWeather {
        let (start, end) = tokio::join!(self.lookup("start", start), self.lookup("end", end));
        EndpointWeather { start, end }
    }

    async fn lookup(&self, endpoint: &'static str, at: Coordinate) -> Option<WeatherSnapshot> {
        match self.weather.current(at.lat, at.lon).await {
            Ok(current) => {
                info!(endpoint, description = %current.description, temp = current.temperature_celsius, "step: weather fetched");
                Some(WeatherSnapshot {
                    description: current.description,
                    temperature_celsius: current.temperature_celsius,
                })
            }
            Err(e) => {
                warn!(endpoint, lat = at.lat, lon = at.lon, error = %e, "Weather lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(description: &str, temperature_celsius: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            description: description.to_string(),
            temperature_celsius,
        }
    }

    #[test]
    fn light_rain_in_heat_gives_rain_and_heat() {
        assert_eq!(
            classify(&snapshot("light rain", 32.0)),
            vec![WeatherWarning::Rain, WeatherWarning::Heat]
        );
    }

    #[test]
    fn russian_descriptions_are_recognized() {
        assert_eq!(classify(&snapshot("небольшой дождь", 12.0)), vec![WeatherWarning::Rain]);
        assert_eq!(classify(&snapshot("Снег", -8.0)), vec![WeatherWarning::Snow]);
        assert_eq!(
            classify(&snapshot("rain and snow", 1.0)),
            vec![WeatherWarning::Rain, WeatherWarning::Snow]
        );
    }

    #[test]
    fn exactly_thirty_degrees_is_not_heat() {
        assert!(classify(&snapshot("clear sky", 30.0)).is_empty());
        assert_eq!(classify(&snapshot("clear sky", 30.1)), vec![WeatherWarning::Heat]);
    }
}
