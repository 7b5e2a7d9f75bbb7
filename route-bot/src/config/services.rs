//! External services: Google Maps, OpenWeather, the designated city and request timeouts.

use anyhow::{Context, Result};
use maps_client::GOOGLE_MAPS_API_BASE;
use route_planner::ServiceArea;
use std::env;
use std::time::Duration;
use weather_client::OPENWEATHER_API_BASE;

pub const DEFAULT_SERVICE_CITY: &str = "Astana";
pub const DEFAULT_SERVICE_CITY_ALIASES: &str = "Astana,Астана";
pub const DEFAULT_WEATHER_LANG: &str = "en";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ServicesConfig {
    /// GOOGLE_MAPS_API_KEY
    pub google_maps_api_key: String,
    /// GOOGLE_MAPS_BASE_URL
    pub google_maps_base_url: String,
    /// MAPS_LANGUAGE
    pub maps_language: Option<String>,
    /// OPENWEATHER_API_KEY
    pub openweather_api_key: String,
    /// OPENWEATHER_BASE_URL
    pub openweather_base_url: String,
    /// WEATHER_LANG
    pub weather_lang: String,
    /// SERVICE_CITY
    pub service_city: String,
    /// SERVICE_CITY_ALIASES, comma-separated
    pub service_city_aliases: Vec<String>,
    /// HTTP_TIMEOUT_SECS
    pub http_timeout_secs: u64,
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl ServicesConfig {
    pub fn from_env() -> Result<Self> {
        let google_maps_api_key =
            non_empty("GOOGLE_MAPS_API_KEY").context("GOOGLE_MAPS_API_KEY not set")?;
        let openweather_api_key =
            non_empty("OPENWEATHER_API_KEY").context("OPENWEATHER_API_KEY not set")?;
        let http_timeout_secs = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(s) => s
                .trim()
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {}", s))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        let service_city_aliases = non_empty("SERVICE_CITY_ALIASES")
            .unwrap_or_else(|| DEFAULT_SERVICE_CITY_ALIASES.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            google_maps_api_key,
            google_maps_base_url: non_empty("GOOGLE_MAPS_BASE_URL")
                .unwrap_or_else(|| GOOGLE_MAPS_API_BASE.to_string()),
            maps_language: non_empty("MAPS_LANGUAGE"),
            openweather_api_key,
            openweather_base_url: non_empty("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| OPENWEATHER_API_BASE.to_string()),
            weather_lang: non_empty("WEATHER_LANG")
                .unwrap_or_else(|| DEFAULT_WEATHER_LANG.to_string()),
            service_city: non_empty("SERVICE_CITY")
                .unwrap_or_else(|| DEFAULT_SERVICE_CITY.to_string()),
            service_city_aliases,
            http_timeout_secs,
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("GOOGLE_MAPS_BASE_URL", &self.google_maps_base_url),
            ("OPENWEATHER_BASE_URL", &self.openweather_base_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }
        if self.service_city.trim().is_empty() {
            anyhow::bail!("SERVICE_CITY is empty");
        }
        Ok(())
    }

    pub fn service_area(&self) -> ServiceArea {
        ServiceArea::new(
            self.service_city.trim(),
            self.service_city_aliases.iter().cloned(),
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
