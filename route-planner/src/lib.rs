//! # route-planner
//!
//! Domain core of the route bot, independent of the chat transport:
//!
//! - [`session`]: the per-user conversation state machine and its [`SessionStore`].
//! - [`address`]: free text → [`ResolvedAddress`] inside the designated city.
//! - [`routes`]: per-mode directions, fastest-mode selection and map links.
//! - [`weather`]: best-effort endpoint weather and warning classification.
//! - [`traffic`]: congestion advice for the driving leg.
//! - [`history`]: per-user ledger of completed requests ([`HistoryStore`]).
//! - [`format`]: HTML rendering of replies.
//! - [`planner`]: [`RoutePlanner`], which runs the whole pipeline for one request.

pub mod address;
pub mod error;
pub mod format;
pub mod history;
pub mod model;
pub mod planner;
pub mod routes;
pub mod session;
pub mod traffic;
pub mod weather;

pub use address::{AddressNormalizer, ServiceArea};
pub use error::PlanError;
pub use history::{ClearOutcome, HistoryStore, InMemoryHistoryStore};
pub use maps_client::TravelMode;
pub use model::{
    Coordinate, EndpointWeather, HistoryEntry, ResolvedAddress, RouteLeg, TransitDetail,
    WeatherSnapshot, NOT_AVAILABLE,
};
pub use planner::{RoutePlanner, TripReport};
pub use routes::{map_link, RouteAggregator, RoutePlan};
pub use session::{Advance, InMemorySessionStore, SessionState, SessionStore};
pub use traffic::{advise, TrafficAdvice, TrafficAdvisory};
pub use weather::{classify, WeatherAnnotator, WeatherWarning};
