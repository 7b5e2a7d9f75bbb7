//! [`RoutePlanner`]: runs one route request end to end.

use std::sync::Arc;

use futures::try_join;
use maps_client::{MapsProvider, TravelMode};
use tracing::{info, instrument, warn};
use weather_client::WeatherProvider;

use crate::address::{AddressNormalizer, ServiceArea};
use crate::error::PlanError;
use crate::format;
use crate::history::HistoryStore;
use crate::model::{EndpointWeather, HistoryEntry, NOT_AVAILABLE};
use crate::routes::{RouteAggregator, RoutePlan};
use crate::traffic::{advise, TrafficAdvice};
use crate::weather::WeatherAnnotator;

/// Outcome of a successful request.
#[derive(Debug, Clone, PartialEq)]
pub struct TripReport {
    pub plan: RoutePlan,
    pub weather: EndpointWeather,
    pub traffic: TrafficAdvice,
}

impl TripReport {
    /// Ledger entry for this trip; driving metrics when driving succeeded, placeholders otherwise.
    pub fn history_entry(&self) -> HistoryEntry {
        let driving = self.plan.leg(TravelMode::Driving);
        HistoryEntry {
            origin: self.plan.origin().formatted_address.clone(),
            destination: self.plan.destination().formatted_address.clone(),
            distance_text: driving
                .map(|l| l.distance_text.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            duration_text: driving
                .map(|l| l.duration_text.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            traffic_text: driving
                .and_then(|l| l.duration_in_traffic_text.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            weather: self.weather.clone(),
        }
    }

    pub fn render(&self) -> String {
        format::render_trip(&self.plan, &self.weather, &self.traffic)
    }
}

pub struct RoutePlanner {
    normalizer: AddressNormalizer,
    aggregator: RouteAggregator,
    annotator: WeatherAnnotator,
    history: Arc<dyn HistoryStore>,
}

impl RoutePlanner {
    pub fn new(
        maps: Arc<dyn MapsProvider>,
        weather: Arc<dyn WeatherProvider>,
        area: ServiceArea,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            normalizer: AddressNormalizer::new(maps.clone(), area),
            aggregator: RouteAggregator::new(maps),
            annotator: WeatherAnnotator::new(weather),
            history,
        }
    }

    pub fn service_area(&self) -> &ServiceArea {
        self.normalizer.area()
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// Normalizes both addresses, aggregates routes, then annotates weather and traffic and
    /// records the trip in the user's history. A history write failure is logged, not returned.
    #[instrument(skip(self))]
    pub async fn plan_trip(
        &self,
        user_id: i64,
        origin: &str,
        destination: &str,
    ) -> Result<TripReport, PlanError> {
        info!("step: normalizing addresses");
        let (origin, destination) = try_join!(
            self.normalizer.normalize(origin),
            self.normalizer.normalize(destination)
        )?;

        info!("step: requesting routes");
        let plan = self.aggregator.aggregate(&origin, &destination).await?;

        let (start, end) = plan.endpoints();
        let weather = self.annotator.annotate(start, end).await;
        let traffic = advise(plan.leg(TravelMode::Driving));

        let report = TripReport {
            plan,
            weather,
            traffic,
        };

        if let Err(e) = self.history.record(user_id, report.history_entry()).await {
            warn!(user_id, error = %e, "Failed to record history entry");
        }

        info!(
            fastest = %report.plan.fastest().mode,
            modes = report.plan.legs().len(),
            "step: trip planned"
        );
        Ok(report)
    }
}
