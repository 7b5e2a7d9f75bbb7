//! Traffic Advisor: congestion advice derived from the driving leg.

use crate::model::RouteLeg;

/// Delay over free-flow time above which congestion is reported.
pub const CONGESTION_DELAY_SECS: u64 = 600;
/// Traffic-adjusted duration above which another mode is suggested.
pub const LONG_TRIP_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficAdvisory {
    HeavyCongestion,
    OverAnHour,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrafficAdvice {
    /// No driving leg to analyze.
    NotAnalyzed,
    /// Driving leg without a traffic-adjusted duration.
    Unavailable,
    Favorable,
    Advisories(Vec<TrafficAdvisory>),
}

pub fn advise(driving: Option<&RouteLeg>) -> TrafficAdvice {
    let Some(leg) = driving else {
        return TrafficAdvice::NotAnalyzed;
    };
    let Some(in_traffic) = leg.duration_in_traffic_seconds else {
        return TrafficAdvice::Unavailable;
    };

    let delay = in_traffic.saturating_sub(leg.duration_seconds);
    let mut advisories = Vec::new();
    if delay > CONGESTION_DELAY_SECS {
        advisories.push(TrafficAdvisory::HeavyCongestion);
    }
    if in_traffic > LONG_TRIP_SECS {
        advisories.push(TrafficAdvisory::OverAnHour);
    }

    if advisories.is_empty() {
        TrafficAdvice::Favorable
    } else {
        TrafficAdvice::Advisories(advisories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use maps_client::TravelMode;

    fn driving(free_flow: u64, in_traffic: Option<u64>) -> RouteLeg {
        RouteLeg {
            mode: TravelMode::Driving,
            distance_text: "10 km".to_string(),
            duration_text: String::new(),
            duration_seconds: free_flow,
            duration_in_traffic_seconds: in_traffic,
            duration_in_traffic_text: None,
            start: Coordinate { lat: 0.0, lon: 0.0 },
            end: Coordinate { lat: 0.0, lon: 0.0 },
            transit_detail: None,
        }
    }

    #[test]
    fn congestion_without_long_trip() {
        assert_eq!(
            advise(Some(&driving(1000, Some(1700)))),
            TrafficAdvice::Advisories(vec![TrafficAdvisory::HeavyCongestion])
        );
    }

    #[test]
    fn both_advisories_can_fire() {
        assert_eq!(
            advise(Some(&driving(2000, Some(3700)))),
            TrafficAdvice::Advisories(vec![
                TrafficAdvisory::HeavyCongestion,
                TrafficAdvisory::OverAnHour
            ])
        );
        assert_eq!(
            advise(Some(&driving(3500, Some(3700)))),
            TrafficAdvice::Advisories(vec![TrafficAdvisory::OverAnHour])
        );
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(advise(Some(&driving(1000, Some(1600)))), TrafficAdvice::Favorable);
        assert_eq!(advise(Some(&driving(3000, Some(3600)))), TrafficAdvice::Favorable);
    }

    #[test]
    fn faster_than_free_flow_is_favorable() {
        assert_eq!(advise(Some(&driving(1000, Some(900)))), TrafficAdvice::Favorable);
    }

    #[test]
    fn missing_inputs() {
        assert_eq!(advise(None), TrafficAdvice::NotAnalyzed);
        assert_eq!(advise(Some(&driving(1000, None))), TrafficAdvice::Unavailable);
    }
}
