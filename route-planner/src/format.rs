//! Response Formatter: Telegram HTML replies. Every address, description and provider text is
//! escaped before it lands in markup.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};
use maps_client::TravelMode;

use crate::model::{EndpointWeather, HistoryEntry, RouteLeg, WeatherSnapshot};
use crate::routes::RoutePlan;
use crate::traffic::{TrafficAdvice, TrafficAdvisory};
use crate::weather::{classify, WeatherWarning};

pub const ASK_DESTINATION: &str = "Great! Now send me the destination.";
pub const START_FIRST: &str = "Send /start first.";
pub const NO_ROUTE_FOUND: &str = "No route was found between these addresses.";
pub const GENERIC_ERROR: &str = "An error occurred while processing your request.";
pub const CANCELLED: &str = "Your request has been cancelled.";
pub const HISTORY_CLEARED: &str = "Your request history has been cleared.";
pub const NOTHING_TO_CLEAR: &str = "You have no saved history.";
pub const NO_HISTORY: &str = "You have no route history yet.";

const WEATHER_NORMAL: &str = "Weather conditions are normal.";
const WEATHER_UNAVAILABLE: &str = "Weather data is unavailable.";
const TRAFFIC_NOT_ANALYZED: &str = "Traffic was not analyzed.";
const TRAFFIC_UNAVAILABLE: &str = "Could not analyze traffic conditions.";
const TRAFFIC_FAVORABLE: &str = "Traffic conditions are favorable.";
const MAP_LINK_TEXT: &str = "View route on Google Maps";

pub fn greeting(city: &str) -> String {
    format!(
        "Hi! I will help you plan a route in {} and warn you about the weather.\nTo begin, send me the starting point.",
        encode_text(city)
    )
}

/// Shared reply for addresses that were not found or lie outside the city.
pub fn address_not_found(city: &str) -> String {
    format!(
        "Could not find one of the addresses. Make sure both are in {}.",
        encode_text(city)
    )
}

fn mode_phrase(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "by car",
        TravelMode::Walking => "on foot",
        TravelMode::Transit => "by public transport",
    }
}

fn link(href: &str) -> String {
    format!(
        "<a href=\"{}\">{MAP_LINK_TEXT}</a>",
        encode_double_quoted_attribute(href)
    )
}

fn render_leg(out: &mut String, plan: &RoutePlan, leg: &RouteLeg) {
    let href = plan.map_link(leg.mode);
    // Writing to a String cannot fail.
    let _ = match leg.mode {
        TravelMode::Driving => write!(
            out,
            "🚗 <b>By car:</b>\n- Distance: {}\n- Time: {}\n- In traffic: {}\n{}\n\n",
            encode_text(&leg.distance_text),
            encode_text(&leg.duration_text),
            encode_text(leg.duration_in_traffic_text.as_deref().unwrap_or("unknown")),
            link(&href)
        ),
        TravelMode::Walking => write!(
            out,
            "🚶 <b>On foot:</b>\n- Distance: {}\n- Time: {}\n{}\n\n",
            encode_text(&leg.distance_text),
            encode_text(&leg.duration_text),
            link(&href)
        ),
        TravelMode::Transit => match &leg.transit_detail {
            Some(detail) => write!(
                out,
                "🚌 <b>By bus:</b>\n- Line: {}\n- Boarding stop: {}\n- Alighting stop: {}\n- Travel time: {}\n{}\n\n",
                encode_text(&detail.line_name),
                encode_text(&detail.boarding_stop),
                encode_text(&detail.alighting_stop),
                encode_text(&leg.duration_text),
                link(&href)
            ),
            None => write!(
                out,
                "🚌 <b>By public transport:</b>\n- Travel time: {}\n{}\n\n",
                encode_text(&leg.duration_text),
                link(&href)
            ),
        },
    };
}

fn endpoint_label(endpoint: &str) -> &'static str {
    if endpoint == "start" {
        "the starting point"
    } else {
        "the destination"
    }
}

fn weather_lines(endpoint: &str, snapshot: &WeatherSnapshot, lines: &mut Vec<String>) {
    let at = endpoint_label(endpoint);
    for warning in classify(snapshot) {
        lines.push(match warning {
            WeatherWarning::Rain => format!("- It is raining at {at}, be careful."),
            WeatherWarning::Snow => format!("- Snow at {at}, watch out for ice."),
            WeatherWarning::Heat => {
                format!("- It is hot at {at}, make sure you have enough water.")
            }
        });
    }
}

/// Weather block body: warnings per endpoint, or one canonical line.
pub fn render_weather(weather: &EndpointWeather) -> String {
    if weather.is_unavailable() {
        return WEATHER_UNAVAILABLE.to_string();
    }
    let mut lines = Vec::new();
    if let Some(start) = &weather.start {
        weather_lines("start", start, &mut lines);
    }
    if let Some(end) = &weather.end {
        weather_lines("end", end, &mut lines);
    }
    if lines.is_empty() {
        WEATHER_NORMAL.to_string()
    } else {
        lines.join("\n")
    }
}

pub fn render_traffic(advice: &TrafficAdvice) -> String {
    match advice {
        TrafficAdvice::NotAnalyzed => TRAFFIC_NOT_ANALYZED.to_string(),
        TrafficAdvice::Unavailable => TRAFFIC_UNAVAILABLE.to_string(),
        TrafficAdvice::Favorable => TRAFFIC_FAVORABLE.to_string(),
        TrafficAdvice::Advisories(advisories) => advisories
            .iter()
            .map(|a| match a {
                TrafficAdvisory::HeavyCongestion => {
                    "- Heavy congestion on the route. Consider an alternative route."
                }
                TrafficAdvisory::OverAnHour => {
                    "- The trip takes over an hour. Another mode of transport may be better."
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Full route reply: per-mode blocks in preference order, then fastest mode, weather and traffic.
pub fn render_trip(plan: &RoutePlan, weather: &EndpointWeather, traffic: &TrafficAdvice) -> String {
    let mut out = format!(
        "Best routes from <b>{}</b> to <b>{}</b>:\n\n",
        encode_text(&plan.origin().formatted_address),
        encode_text(&plan.destination().formatted_address)
    );
    for leg in plan.legs() {
        render_leg(&mut out, plan, leg);
    }

    let fastest = plan.fastest();
    let _ = write!(
        out,
        "✨ Fastest way to get there: {} ({} min).\n\n",
        mode_phrase(fastest.mode),
        fastest.duration_seconds / 60
    );
    let _ = write!(out, "🌤 <b>Weather:</b>\n{}\n\n", render_weather(weather));
    let _ = write!(out, "🚦 <b>Traffic advice:</b>\n{}\n", render_traffic(traffic));
    out
}

fn snapshot_text(snapshot: &WeatherSnapshot) -> String {
    format!(
        "{}, {:.1}°C",
        encode_text(&snapshot.description),
        snapshot.temperature_celsius
    )
}

/// Numbered history listing, 1-based, or the "no history" line.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return NO_HISTORY.to_string();
    }
    let mut out = String::from("<b>Route history:</b>\n");
    for (idx, entry) in entries.iter().enumerate() {
        let _ = write!(
            out,
            "{}. From {} to {}:\n   - Distance: {}\n   - Time without traffic: {}\n   - Time in traffic: {}\n",
            idx + 1,
            encode_text(&entry.origin),
            encode_text(&entry.destination),
            encode_text(&entry.distance_text),
            encode_text(&entry.duration_text),
            encode_text(&entry.traffic_text),
        );
        let parts: Vec<String> = [("start", &entry.weather.start), ("end", &entry.weather.end)]
            .into_iter()
            .filter_map(|(label, snap)| snap.as_ref().map(|s| format!("{label}: {}", snapshot_text(s))))
            .collect();
        if !parts.is_empty() {
            let _ = writeln!(out, "   - Weather: {}", parts.join("; "));
        }
    }
    out
}
